// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use a11y_audit::application::usecases::run_audit::RunAuditUseCase;
use a11y_audit::config::settings::AuditSettings;
use a11y_audit::domain::models::lighthouse::LighthouseResult;
use a11y_audit::engines::traits::{AuditEngine, AuditRequest, EngineError, RawAudit};
use a11y_audit::infrastructure::report_writer::ReportWriter;
use a11y_audit::infrastructure::storage::ReportLayout;
use a11y_audit::workers::{AuditWorker, Dispatcher};
use async_trait::async_trait;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// 模拟审计引擎
///
/// 每个URL对应一份预设的 LHR 文档；未登记的URL返回启动失败
#[derive(Default)]
pub struct MockAuditEngine {
    fixtures: HashMap<String, Value>,
    delay: Duration,
    pub calls: AtomicUsize,
}

#[allow(dead_code)]
impl MockAuditEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(mut self, url: &str, lhr: Value) -> Self {
        self.fixtures.insert(url.to_string(), lhr);
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

#[async_trait]
impl AuditEngine for MockAuditEngine {
    async fn audit(&self, request: &AuditRequest) -> Result<RawAudit, EngineError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        let lhr = self
            .fixtures
            .get(&request.url)
            .ok_or_else(|| EngineError::Launch(format!("no fixture for {}", request.url)))?;
        let report: LighthouseResult = serde_json::from_value(lhr.clone())?;

        Ok(RawAudit {
            report,
            html_report: format!("<div class=\"lh-root\">{}</div>", request.url),
        })
    }

    fn name(&self) -> &'static str {
        "mock"
    }
}

/// 构造一份 LHR：`failed` 为 (审计id, 标题, 明细条目数)
pub fn lhr(score: f64, failed: &[(&str, &str, usize)]) -> Value {
    let mut audit_refs = vec![json!({ "id": "document-title" })];
    let mut audits = serde_json::Map::new();
    audits.insert(
        "document-title".to_string(),
        json!({
            "title": "Document has a `<title>` element",
            "score": 1,
            "scoreDisplayMode": "binary"
        }),
    );

    for (id, title, count) in failed {
        audit_refs.push(json!({ "id": id }));
        let items: Vec<Value> = (0..*count).map(|_| json!({ "node": {} })).collect();
        audits.insert(
            id.to_string(),
            json!({
                "title": title,
                "score": 0,
                "scoreDisplayMode": "binary",
                "details": { "items": items }
            }),
        );
    }

    json!({
        "categories": { "accessibility": { "score": score, "auditRefs": audit_refs } },
        "audits": audits
    })
}

pub fn audit_settings() -> AuditSettings {
    AuditSettings {
        urls: Vec::new(),
        lighthouse_bin: "lighthouse".to_string(),
        chrome_executable: None,
        viewport_width: 1920,
        viewport_height: 1080,
        timeout_secs: 30,
    }
}

pub fn run_use_case(
    engine: Arc<MockAuditEngine>,
    root: &Path,
    max_workers: usize,
    fail_fast: bool,
) -> RunAuditUseCase {
    let worker = AuditWorker::new(engine, Arc::new(audit_settings()));
    RunAuditUseCase::new(
        Dispatcher::new(max_workers, fail_fast),
        worker,
        ReportWriter::new(ReportLayout::new(root)),
    )
}
