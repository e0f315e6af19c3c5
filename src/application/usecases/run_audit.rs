// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::NaiveDate;
use tracing::{info, warn};

use crate::domain::models::snapshot::{Snapshot, SnapshotSummary};
use crate::domain::services::aggregator::ReportAggregator;
use crate::infrastructure::report_writer::{PersistedArtifacts, ReportWriter};
use crate::utils::errors::RunAuditError;
use crate::workers::{AuditWorker, Dispatcher};

// === Section: Use Case Definition ===

/// 一次审计批次的结果
#[derive(Debug)]
pub struct RunReport {
    pub snapshot: Snapshot,
    pub summary: SnapshotSummary,
    pub artifacts: PersistedArtifacts,
    /// 审计失败的URL（非 fail-fast 模式）
    pub failed_urls: Vec<String>,
}

/// 审计批次用例：调度 -> 规范化 -> 聚合 -> 持久化
pub struct RunAuditUseCase {
    dispatcher: Dispatcher,
    worker: AuditWorker,
    writer: ReportWriter,
}

// === Section: Implementation ===

impl RunAuditUseCase {
    pub fn new(dispatcher: Dispatcher, worker: AuditWorker, writer: ReportWriter) -> Self {
        Self {
            dispatcher,
            worker,
            writer,
        }
    }

    /// 执行审计批次
    ///
    /// 部分页面失败时仍为成功页面写出报告，失败的URL记录在返回值中；
    /// 所有页面都失败时不写出任何快照。
    pub async fn execute(
        &self,
        urls: Vec<String>,
        created_at: NaiveDate,
    ) -> Result<RunReport, RunAuditError> {
        if urls.is_empty() {
            return Err(RunAuditError::NoUrls);
        }

        self.writer.prepare().await?;

        let worker = self.worker.clone();
        let outcome = self
            .dispatcher
            .run_batch(urls, move |url| {
                let worker = worker.clone();
                async move { worker.audit_page(url).await }
            })
            .await?;

        let failed_urls = outcome.failed_urls();
        if outcome.completed.is_empty() && !failed_urls.is_empty() {
            return Err(RunAuditError::AllFailed {
                failed: failed_urls,
            });
        }

        let run = ReportAggregator::new(self.writer.layout().html_dir())
            .aggregate(outcome.completed, created_at);
        let summary = run.snapshot.summary();
        info!(
            pages = summary.pages,
            total_issues = summary.total_issues,
            average_score = ?summary.average_score,
            distinct_issue_titles = summary.distinct_issue_titles,
            "Audit snapshot aggregated"
        );

        let artifacts = self.writer.persist(&run).await?;

        if !failed_urls.is_empty() {
            warn!(failed = ?failed_urls, "Reports written without the failed URLs");
        }

        Ok(RunReport {
            snapshot: run.snapshot,
            summary,
            artifacts,
            failed_urls,
        })
    }
}
