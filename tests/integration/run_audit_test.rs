// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::helpers::{lhr, run_use_case, MockAuditEngine};
use a11y_audit::domain::models::snapshot::SnapshotRecords;
use a11y_audit::utils::errors::{DispatchError, RunAuditError};
use chrono::NaiveDate;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::Duration;

fn date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 10, 12).unwrap()
}

fn two_page_engine() -> MockAuditEngine {
    MockAuditEngine::new()
        .with_page(
            "https://a.test/",
            lhr(0.75, &[("image-alt", "missing-alt", 3)]),
        )
        .with_page("https://b.test/", lhr(1.0, &[]))
}

#[tokio::test]
async fn test_run_persists_snapshot_matching_aggregate() {
    let dir = tempfile::tempdir().unwrap();
    let engine = Arc::new(two_page_engine());
    let use_case = run_use_case(engine.clone(), dir.path(), 2, false);

    let report = use_case
        .execute(
            vec!["https://a.test/".to_string(), "https://b.test/".to_string()],
            date(),
        )
        .await
        .unwrap();

    assert_eq!(engine.calls.load(Ordering::SeqCst), 2);
    assert!(report.failed_urls.is_empty());

    let json = std::fs::read_to_string(&report.artifacts.json_path).unwrap();
    let persisted: SnapshotRecords = serde_json::from_str(&json).unwrap();
    assert_eq!(persisted, report.snapshot.records);

    let a = &persisted["a-test-"];
    assert_eq!(a.url, "https://a.test/");
    assert_eq!(a.accessibility_score, 75.0);
    assert_eq!(a.total_issues, 3);
    assert!(a.html_report.ends_with("html-report/a-test-.html"));
    assert_eq!(persisted["b-test-"].total_issues, 0);
}

#[tokio::test]
async fn test_run_writes_csv_and_html_reports() {
    let dir = tempfile::tempdir().unwrap();
    let use_case = run_use_case(Arc::new(two_page_engine()), dir.path(), 2, false);

    let report = use_case
        .execute(
            vec!["https://b.test/".to_string(), "https://a.test/".to_string()],
            date(),
        )
        .await
        .unwrap();

    let csv = std::fs::read_to_string(&report.artifacts.csv_path).unwrap();
    assert_eq!(csv, ",a-test-,b-test-\nTotal Issues,3,0\nmissing-alt,3,0");
    assert!(report.artifacts.csv_path.ends_with("2024-10-12.csv"));

    assert_eq!(report.artifacts.html_paths.len(), 2);
    for path in &report.artifacts.html_paths {
        assert!(path.exists(), "missing {}", path.display());
    }
    let page = std::fs::read_to_string(dir.path().join("html-report/a-test-.html")).unwrap();
    assert!(page.contains("<div class=\"lh-root\">https://a.test/</div>"));

    let combined = std::fs::read_to_string(&report.artifacts.combined_html_path).unwrap();
    assert!(report.artifacts.combined_html_path.ends_with("2024-10-12.html"));
    assert_eq!(combined.matches("<iframe").count(), 2);
}

#[tokio::test]
async fn test_run_with_partial_failure_keeps_successful_pages() {
    let dir = tempfile::tempdir().unwrap();
    let use_case = run_use_case(Arc::new(two_page_engine()), dir.path(), 2, false);

    let report = use_case
        .execute(
            vec![
                "https://a.test/".to_string(),
                "https://missing.test/".to_string(),
            ],
            date(),
        )
        .await
        .unwrap();

    assert_eq!(report.failed_urls, vec!["https://missing.test/".to_string()]);
    assert_eq!(report.snapshot.records.len(), 1);
    assert!(!report.snapshot.records.contains_key("missing-test-"));
    assert!(report.artifacts.json_path.exists());
}

#[tokio::test]
async fn test_run_fail_fast_aborts_batch() {
    let dir = tempfile::tempdir().unwrap();
    let engine = MockAuditEngine::new()
        .with_page("https://a.test/", lhr(0.9, &[]))
        .with_delay(Duration::from_millis(50));
    let use_case = run_use_case(Arc::new(engine), dir.path(), 1, true);

    let result = use_case
        .execute(
            vec![
                "https://missing.test/".to_string(),
                "https://a.test/".to_string(),
            ],
            date(),
        )
        .await;

    assert!(matches!(
        result,
        Err(RunAuditError::Dispatch(DispatchError::JobFailed(_)))
    ));
    assert!(!dir.path().join("json-report/2024-10-12.json").exists());
}

#[tokio::test]
async fn test_rerun_on_same_day_overwrites_snapshot() {
    let dir = tempfile::tempdir().unwrap();
    let urls = vec!["https://a.test/".to_string()];

    let first = run_use_case(Arc::new(two_page_engine()), dir.path(), 1, false)
        .execute(urls.clone(), date())
        .await
        .unwrap();

    let fixed = MockAuditEngine::new().with_page("https://a.test/", lhr(1.0, &[]));
    let second = run_use_case(Arc::new(fixed), dir.path(), 1, false)
        .execute(urls, date())
        .await
        .unwrap();

    assert_eq!(first.artifacts.json_path, second.artifacts.json_path);
    let json = std::fs::read_to_string(&second.artifacts.json_path).unwrap();
    let persisted: SnapshotRecords = serde_json::from_str(&json).unwrap();
    assert_eq!(persisted["a-test-"].total_issues, 0);
}
