// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Instant;
use tokio::fs;
use tokio::process::Command;
use tracing::{debug, info};

use crate::config::settings::AuditSettings;
use crate::domain::models::lighthouse::LighthouseResult;
use crate::engines::browser_session::{BrowserSession, ChromeSession, LaunchOptions};
use crate::engines::traits::{AuditEngine, AuditRequest, EngineError, RawAudit};

/// Lighthouse 输出文件的基础名，实际文件为 `report.report.json` 和 `report.report.html`
const OUTPUT_BASE: &str = "report";

/// Lighthouse 审计引擎
///
/// 为每个请求启动独立的无头 Chrome，再让 Lighthouse CLI 通过远程调试端口连接它
pub struct LighthouseEngine {
    lighthouse_bin: String,
    chrome_executable: Option<PathBuf>,
}

impl LighthouseEngine {
    pub fn new(settings: &AuditSettings) -> Self {
        Self {
            lighthouse_bin: settings.lighthouse_bin.clone(),
            chrome_executable: settings.chrome_executable.as_ref().map(PathBuf::from),
        }
    }

    fn launch_options(&self, request: &AuditRequest, workdir: &Path) -> LaunchOptions {
        LaunchOptions {
            window_width: request.viewport.width,
            window_height: request.viewport.height,
            user_data_dir: workdir.join("profile"),
            chrome_executable: self.chrome_executable.clone(),
        }
    }

    /// Lighthouse CLI 参数
    fn lighthouse_args(request: &AuditRequest, port: u16, output_base: &Path) -> Vec<String> {
        let form_factor = if request.viewport.mobile {
            "mobile"
        } else {
            "desktop"
        };

        vec![
            request.url.clone(),
            format!("--port={}", port),
            format!("--only-categories={}", request.category),
            format!("--form-factor={}", form_factor),
            format!("--screenEmulation.mobile={}", request.viewport.mobile),
            format!("--screenEmulation.width={}", request.viewport.width),
            format!("--screenEmulation.height={}", request.viewport.height),
            "--screenEmulation.deviceScaleFactor=1".to_string(),
            "--output=json".to_string(),
            "--output=html".to_string(),
            format!("--output-path={}", output_base.display()),
            "--quiet".to_string(),
        ]
    }

    async fn run_lighthouse(
        &self,
        request: &AuditRequest,
        port: u16,
        workdir: &Path,
    ) -> Result<RawAudit, EngineError> {
        let output_base = workdir.join(OUTPUT_BASE);

        debug!(url = %request.url, port, mode = request.mode.as_str(), "Running lighthouse");
        let output = Command::new(&self.lighthouse_bin)
            .args(Self::lighthouse_args(request, port, &output_base))
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .output()
            .await?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(EngineError::Process(format!(
                "{} exited with {}: {}",
                self.lighthouse_bin,
                output.status,
                stderr.trim()
            )));
        }

        let json = fs::read(workdir.join(format!("{}.report.json", OUTPUT_BASE))).await?;
        let report: LighthouseResult = serde_json::from_slice(&json)?;
        let html_report = fs::read_to_string(workdir.join(format!("{}.report.html", OUTPUT_BASE))).await?;

        Ok(RawAudit {
            report,
            html_report,
        })
    }

    /// 在会话中运行 Lighthouse，超时与否、成功与否都会关闭会话
    async fn audit_in_session<S: ChromeSession>(
        &self,
        request: &AuditRequest,
        session: S,
        workdir: &Path,
    ) -> Result<RawAudit, EngineError> {
        let outcome = tokio::time::timeout(request.timeout, async {
            let port = session.port()?;
            self.run_lighthouse(request, port, workdir).await
        })
        .await;
        session.shutdown().await;

        outcome.map_err(|_| EngineError::Timeout)?
    }
}

#[async_trait]
impl AuditEngine for LighthouseEngine {
    /// 执行一次页面审计
    ///
    /// 浏览器在所有路径上都会被关闭：成功、出错以及超时
    async fn audit(&self, request: &AuditRequest) -> Result<RawAudit, EngineError> {
        let start = Instant::now();
        let workdir = tempfile::Builder::new().prefix("a11y-audit-").tempdir()?;

        let session = BrowserSession::launch(&self.launch_options(request, workdir.path())).await?;
        let raw = self.audit_in_session(request, session, workdir.path()).await?;
        info!(
            url = %request.url,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Lighthouse audit finished"
        );
        Ok(raw)
    }

    fn name(&self) -> &'static str {
        "lighthouse"
    }
}
