// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::helpers::{lhr, run_use_case, MockAuditEngine};
use a11y_audit::application::usecases::compare_reports::CompareReportsUseCase;
use a11y_audit::infrastructure::snapshot_store::SnapshotOrdering;
use a11y_audit::infrastructure::storage::ReportLayout;
use a11y_audit::utils::errors::CompareError;
use chrono::NaiveDate;
use std::sync::Arc;

async fn audit_day(root: &std::path::Path, day: u32, engine: MockAuditEngine) {
    run_use_case(Arc::new(engine), root, 2, false)
        .execute(
            vec!["https://a.test/".to_string(), "https://b.test/".to_string()],
            NaiveDate::from_ymd_opt(2024, 10, day).unwrap(),
        )
        .await
        .unwrap();
}

#[tokio::test]
async fn test_compare_after_two_runs() {
    let dir = tempfile::tempdir().unwrap();

    audit_day(
        dir.path(),
        12,
        MockAuditEngine::new()
            .with_page(
                "https://a.test/",
                lhr(
                    0.6,
                    &[
                        ("image-alt", "missing-alt", 3),
                        ("color-contrast", "low-contrast", 2),
                    ],
                ),
            )
            .with_page("https://b.test/", lhr(1.0, &[])),
    )
    .await;

    audit_day(
        dir.path(),
        13,
        MockAuditEngine::new()
            .with_page(
                "https://a.test/",
                lhr(0.8, &[("color-contrast", "low-contrast", 2)]),
            )
            .with_page("https://b.test/", lhr(1.0, &[])),
    )
    .await;

    let layout = ReportLayout::new(dir.path());
    let report = CompareReportsUseCase::new(layout.clone(), SnapshotOrdering::Chronological)
        .execute()
        .await
        .unwrap();

    assert!(report.base.ends_with("2024-10-12.json"));
    assert!(report.new.ends_with("2024-10-13.json"));
    assert_eq!(report.deltas.len(), 1);

    let delta = &report.deltas[0];
    assert_eq!(delta.key, "a-test-");
    assert_eq!(delta.scores, (5, 2));
    assert!(delta.issue_deltas["missing-alt"].changed);
    assert_eq!(delta.issue_deltas["missing-alt"].new, 0);
    assert!(!delta.issue_deltas["low-contrast"].changed);

    assert_eq!(report.output, layout.comparison_path());
    let html = std::fs::read_to_string(&report.output).unwrap();
    assert!(html.contains("<tr class=\"change\"><th>missing-alt</th><td>3</td><td>0</td></tr>"));
    assert!(!html.contains(">b-test-<"));
}

#[tokio::test]
async fn test_compare_without_snapshots() {
    let dir = tempfile::tempdir().unwrap();
    let result = CompareReportsUseCase::new(
        ReportLayout::new(dir.path()),
        SnapshotOrdering::Lexicographic,
    )
    .execute()
    .await;

    assert!(matches!(
        result,
        Err(CompareError::InsufficientSnapshots { found: 0 })
    ));
}

#[tokio::test]
async fn test_compare_rejects_malformed_snapshot() {
    let dir = tempfile::tempdir().unwrap();
    let layout = ReportLayout::new(dir.path());
    std::fs::create_dir_all(layout.json_dir()).unwrap();
    std::fs::write(layout.snapshot_path("2024-10-12"), "{\"a-test-\": {}}").unwrap();
    std::fs::write(layout.snapshot_path("2024-10-13"), "{}").unwrap();

    let result = CompareReportsUseCase::new(layout, SnapshotOrdering::Lexicographic)
        .execute()
        .await;

    assert!(matches!(
        result,
        Err(CompareError::MalformedSnapshot { .. })
    ));
}
