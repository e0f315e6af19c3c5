// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::sync::Arc;
use tracing::info;

use crate::config::settings::AuditSettings;
use crate::domain::models::audit_record::PageAudit;
use crate::domain::services::normalizer::normalize;
use crate::engines::traits::{AuditEngine, AuditRequest};
use crate::utils::errors::EngineFailure;

/// 页面审计工作器
///
/// 单个任务的完整流程：调用审计引擎，再把原始结果规范化为审计记录
#[derive(Clone)]
pub struct AuditWorker {
    engine: Arc<dyn AuditEngine>,
    settings: Arc<AuditSettings>,
}

impl AuditWorker {
    pub fn new(engine: Arc<dyn AuditEngine>, settings: Arc<AuditSettings>) -> Self {
        Self { engine, settings }
    }

    /// 审计单个页面
    ///
    /// # 返回值
    ///
    /// * `Ok(PageAudit)` - 规范化记录和 HTML 报告
    /// * `Err(EngineFailure)` - 引擎失败或结果缺少字段，不会产生空记录
    pub async fn audit_page(&self, url: String) -> Result<PageAudit, EngineFailure> {
        let request = AuditRequest::accessibility(url.clone(), &self.settings);

        let raw = self
            .engine
            .audit(&request)
            .await
            .map_err(|source| EngineFailure::Engine {
                url: url.clone(),
                source,
            })?;

        let record = normalize(&raw.report, &url).map_err(|source| EngineFailure::Data {
            url: url.clone(),
            source,
        })?;

        info!(
            url = %url,
            engine = self.engine.name(),
            score = record.accessibility_score,
            total_issues = record.total_issues,
            "Page audited"
        );

        Ok(PageAudit {
            record,
            report_html: raw.html_report,
        })
    }
}
