// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use chromiumoxide::{Browser, BrowserConfig};
use futures::StreamExt;
use std::path::PathBuf;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, warn};
use url::Url;

use crate::engines::traits::EngineError;

/// 浏览器启动参数
#[derive(Debug, Clone)]
pub struct LaunchOptions {
    pub window_width: u32,
    pub window_height: u32,
    /// 独立的用户数据目录，避免并发实例争用同一 profile
    pub user_data_dir: PathBuf,
    pub chrome_executable: Option<PathBuf>,
}

/// 独占的浏览器实例
///
/// 每个审计任务启动一个，正常路径调用 [`BrowserSession::close`]；
/// 提前返回或任务被取消时，`Browser` 在 drop 时结束 Chrome 子进程。
pub struct BrowserSession {
    browser: Browser,
    handler: JoinHandle<()>,
}

impl BrowserSession {
    /// 启动无头 Chrome 并开始处理 CDP 事件
    pub async fn launch(options: &LaunchOptions) -> Result<Self, EngineError> {
        let mut builder = BrowserConfig::builder()
            .no_sandbox()
            .window_size(options.window_width, options.window_height)
            .user_data_dir(&options.user_data_dir)
            .request_timeout(Duration::from_secs(30))
            .arg("--disable-gpu")
            .arg("--disable-dev-shm-usage");

        if let Some(executable) = &options.chrome_executable {
            builder = builder.chrome_executable(executable);
        }

        let config = builder.build().map_err(EngineError::Launch)?;
        let (browser, mut handler) = Browser::launch(config)
            .await
            .map_err(|e| EngineError::Launch(e.to_string()))?;

        // Spawn a handler to process browser events
        let handler = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if event.is_err() {
                    break;
                }
            }
        });

        debug!(address = %browser.websocket_address(), "Browser launched");
        Ok(Self { browser, handler })
    }

    /// 远程调试端口，供审计引擎连接
    pub fn debugging_port(&self) -> Result<u16, EngineError> {
        debugging_port(self.browser.websocket_address())
    }

    /// 关闭浏览器并等待进程退出，失败时强制结束进程
    pub async fn close(mut self) {
        if let Err(e) = self.browser.close().await {
            warn!(error = %e, "Graceful browser close failed, killing process");
            if let Some(Err(e)) = self.browser.kill().await {
                warn!(error = %e, "Failed to kill browser process");
            }
        }
        if let Err(e) = self.browser.wait().await {
            warn!(error = %e, "Failed to wait for browser exit");
        }
    }
}

/// 审计任务持有的浏览器会话
///
/// 引擎只需要调试端口和关闭操作，测试中可以替换为不启动 Chrome 的实现
#[async_trait]
pub trait ChromeSession: Send + Sync + Sized {
    fn port(&self) -> Result<u16, EngineError>;

    async fn shutdown(self);
}

#[async_trait]
impl ChromeSession for BrowserSession {
    fn port(&self) -> Result<u16, EngineError> {
        self.debugging_port()
    }

    async fn shutdown(self) {
        self.close().await;
    }
}

impl Drop for BrowserSession {
    fn drop(&mut self) {
        self.handler.abort();
    }
}

/// 从 DevTools websocket 地址中解析端口
pub fn debugging_port(websocket_address: &str) -> Result<u16, EngineError> {
    Url::parse(websocket_address)
        .ok()
        .and_then(|url| url.port())
        .ok_or_else(|| {
            EngineError::Browser(format!(
                "no debugging port in websocket address `{}`",
                websocket_address
            ))
        })
}
