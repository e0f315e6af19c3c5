// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use clap::Parser;
use config::ConfigError;
use std::sync::Arc;
use tracing::{error, info, warn};

use crate::application::usecases::compare_reports::CompareReportsUseCase;
use crate::application::usecases::run_audit::RunAuditUseCase;
use crate::config::settings::{ReportSettings, Settings};
use crate::engines::lighthouse_engine::LighthouseEngine;
use crate::engines::traits::AuditEngine;
use crate::infrastructure::report_writer::ReportWriter;
use crate::infrastructure::snapshot_store::SnapshotOrdering;
use crate::infrastructure::storage::ReportLayout;
use crate::utils::errors::CompareError;
use crate::workers::{AuditWorker, Dispatcher};

const USAGE_HINT: &str = "Run with `run` to audit the configured URLs or `compare` to diff the two earliest snapshots";

/// 批量无障碍审计工具
#[derive(Parser, Debug)]
#[command(name = "a11y-audit", version, about = "Batch Lighthouse accessibility audits")]
pub struct Cli {
    /// 运行模式：`run` 或 `compare`
    pub mode: Option<String>,
}

/// 运行模式
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    Run,
    Compare,
    /// 未知或缺失的模式，只输出提示
    Usage(Option<String>),
}

impl Mode {
    pub fn parse(mode: Option<&str>) -> Self {
        match mode {
            Some("run") => Mode::Run,
            Some("compare") => Mode::Compare,
            other => Mode::Usage(other.map(str::to_string)),
        }
    }
}

/// 执行命令行模式
///
/// 配置只在 `run` 和 `compare` 时加载，未知或缺失的模式不会因为配置错误而失败
pub async fn dispatch<L>(mode: Mode, load_settings: L) -> anyhow::Result<()>
where
    L: FnOnce() -> Result<Settings, ConfigError>,
{
    match mode {
        Mode::Usage(Some(other)) => {
            warn!(mode = %other, "Unknown mode. {}", USAGE_HINT);
            Ok(())
        }
        Mode::Usage(None) => {
            info!("{}", USAGE_HINT);
            Ok(())
        }
        Mode::Run => {
            let settings = load_settings()?;
            let layout = report_layout(&settings.reports)?;
            let engine = Arc::new(LighthouseEngine::new(&settings.audit));
            run(&settings, layout, engine).await
        }
        Mode::Compare => {
            let settings = load_settings()?;
            let layout = report_layout(&settings.reports)?;
            compare(layout, &settings.reports.snapshot_ordering).await
        }
    }
}

/// 报告根目录为相对路径时以当前目录为基准
pub fn report_layout(settings: &ReportSettings) -> std::io::Result<ReportLayout> {
    let mut root = settings.root_dir.clone();
    if root.is_relative() {
        root = std::env::current_dir()?.join(root);
    }
    info!(root = %root.display(), "Report directory resolved");
    Ok(ReportLayout::new(root))
}

/// `run` 模式：任意URL失败时返回错误（成功页面的报告已写出）
pub async fn run(
    settings: &Settings,
    layout: ReportLayout,
    engine: Arc<dyn AuditEngine>,
) -> anyhow::Result<()> {
    let worker = AuditWorker::new(engine, Arc::new(settings.audit.clone()));
    let dispatcher = Dispatcher::from_settings(&settings.dispatcher);
    info!(
        urls = settings.audit.urls.len(),
        max_workers = dispatcher.max_workers(),
        "Starting audit batch"
    );

    let use_case = RunAuditUseCase::new(dispatcher, worker, ReportWriter::new(layout));
    let report = use_case
        .execute(
            settings.audit.urls.clone(),
            chrono::Local::now().date_naive(),
        )
        .await?;

    info!(
        json = %report.artifacts.json_path.display(),
        combined = %report.artifacts.combined_html_path.display(),
        csv = %report.artifacts.csv_path.display(),
        "Audit batch finished"
    );

    if !report.failed_urls.is_empty() {
        anyhow::bail!(
            "{} of {} URL(s) failed: {}",
            report.failed_urls.len(),
            settings.audit.urls.len(),
            report.failed_urls.join(", ")
        );
    }
    Ok(())
}

/// `compare` 模式：快照不足两个时只记录错误并正常返回
pub async fn compare(layout: ReportLayout, ordering: &str) -> anyhow::Result<()> {
    let ordering = SnapshotOrdering::parse(ordering)?;
    let use_case = CompareReportsUseCase::new(layout, ordering);

    match use_case.execute().await {
        Ok(report) => {
            info!(
                output = %report.output.display(),
                changed_pages = report.deltas.len(),
                "Comparison finished"
            );
            Ok(())
        }
        Err(CompareError::InsufficientSnapshots { found }) => {
            error!(found, "At least two JSON snapshots are needed to compare");
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::settings::{AuditSettings, DispatcherSettings};
    use crate::domain::models::lighthouse::LighthouseResult;
    use crate::engines::traits::{AuditRequest, EngineError, RawAudit};
    use async_trait::async_trait;
    use serde_json::json;
    use std::path::Path;

    /// 只有 `https://ok.test/` 能审计成功
    struct OneGoodPage;

    #[async_trait]
    impl AuditEngine for OneGoodPage {
        async fn audit(&self, request: &AuditRequest) -> Result<RawAudit, EngineError> {
            if request.url != "https://ok.test/" {
                return Err(EngineError::Timeout);
            }
            let report: LighthouseResult = serde_json::from_value(json!({
                "categories": { "accessibility": { "score": 1, "auditRefs": [] } }
            }))
            .unwrap();
            Ok(RawAudit {
                report,
                html_report: String::new(),
            })
        }

        fn name(&self) -> &'static str {
            "one-good-page"
        }
    }

    fn settings(root: &Path, urls: &[&str]) -> Settings {
        Settings {
            audit: AuditSettings {
                urls: urls.iter().map(|u| u.to_string()).collect(),
                lighthouse_bin: "lighthouse".to_string(),
                chrome_executable: None,
                viewport_width: 1920,
                viewport_height: 1080,
                timeout_secs: 5,
            },
            dispatcher: DispatcherSettings {
                max_workers: 2,
                fail_fast: false,
            },
            reports: ReportSettings {
                root_dir: root.to_path_buf(),
                snapshot_ordering: "lexicographic".to_string(),
            },
        }
    }

    #[test]
    fn test_mode_parse() {
        assert_eq!(Mode::parse(Some("run")), Mode::Run);
        assert_eq!(Mode::parse(Some("compare")), Mode::Compare);
        assert_eq!(
            Mode::parse(Some("foo")),
            Mode::Usage(Some("foo".to_string()))
        );
        assert_eq!(Mode::parse(None), Mode::Usage(None));
    }

    #[test]
    fn test_cli_accepts_optional_mode() {
        assert_eq!(Cli::parse_from(["a11y-audit"]).mode, None);
        assert_eq!(
            Cli::parse_from(["a11y-audit", "compare"]).mode.as_deref(),
            Some("compare")
        );
    }

    #[tokio::test]
    async fn test_usage_modes_skip_settings() {
        let broken = || Err(ConfigError::Message("max_workers must be at least 1".to_string()));
        assert!(dispatch(Mode::parse(Some("foo")), broken).await.is_ok());
        assert!(dispatch(Mode::parse(None), broken).await.is_ok());
    }

    #[tokio::test]
    async fn test_known_modes_report_settings_errors() {
        let broken = || Err(ConfigError::Message("max_workers must be at least 1".to_string()));
        assert!(dispatch(Mode::Compare, broken).await.is_err());
    }

    #[tokio::test]
    async fn test_compare_with_insufficient_snapshots_succeeds() {
        let dir = tempfile::tempdir().unwrap();
        assert!(compare(ReportLayout::new(dir.path()), "lexicographic")
            .await
            .is_ok());
    }

    #[tokio::test]
    async fn test_compare_with_malformed_snapshot_fails() {
        let dir = tempfile::tempdir().unwrap();
        let layout = ReportLayout::new(dir.path());
        std::fs::create_dir_all(layout.json_dir()).unwrap();
        std::fs::write(layout.snapshot_path("2024-10-12"), "{ not json").unwrap();
        std::fs::write(layout.snapshot_path("2024-10-13"), "{}").unwrap();

        assert!(compare(layout, "lexicographic").await.is_err());
    }

    #[tokio::test]
    async fn test_compare_rejects_unknown_ordering() {
        let dir = tempfile::tempdir().unwrap();
        assert!(compare(ReportLayout::new(dir.path()), "newest")
            .await
            .is_err());
    }

    #[tokio::test]
    async fn test_run_with_failed_url_fails_after_writing_reports() {
        let dir = tempfile::tempdir().unwrap();
        let settings = settings(dir.path(), &["https://ok.test/", "https://down.test/"]);
        let layout = ReportLayout::new(dir.path());

        let result = run(&settings, layout.clone(), Arc::new(OneGoodPage)).await;

        let message = result.unwrap_err().to_string();
        assert!(message.contains("https://down.test/"));
        assert!(layout.page_path("ok-test-").exists());
    }

    #[tokio::test]
    async fn test_run_with_all_pages_audited_succeeds() {
        let dir = tempfile::tempdir().unwrap();
        let settings = settings(dir.path(), &["https://ok.test/"]);

        assert!(run(&settings, ReportLayout::new(dir.path()), Arc::new(OneGoodPage))
            .await
            .is_ok());
    }

    #[test]
    fn test_report_layout_keeps_absolute_root() {
        let dir = tempfile::tempdir().unwrap();
        let layout = report_layout(&settings(dir.path(), &[]).reports).unwrap();
        assert_eq!(layout.root(), dir.path());
    }
}
