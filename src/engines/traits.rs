// Copyright 2025 Kirky.X
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

use crate::config::settings::AuditSettings;
use crate::domain::models::lighthouse::LighthouseResult;
use crate::domain::services::normalizer::ACCESSIBILITY_CATEGORY;

/// 引擎错误类型
#[derive(Error, Debug)]
pub enum EngineError {
    /// 浏览器启动失败
    #[error("Browser launch failed: {0}")]
    Launch(String),
    /// 浏览器协议错误
    #[error("Browser error: {0}")]
    Browser(String),
    /// 审计进程非正常退出
    #[error("Audit process failed: {0}")]
    Process(String),
    /// IO错误
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// 审计结果无法解析
    #[error("Invalid audit report: {0}")]
    InvalidReport(#[from] serde_json::Error),
    /// 超时
    #[error("Timeout")]
    Timeout,
}

/// 视口配置
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
    pub mobile: bool,
}

/// 审计模式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuditMode {
    /// 导航到页面后审计
    Navigation,
}

impl AuditMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuditMode::Navigation => "navigation",
        }
    }
}

/// 审计请求
#[derive(Debug, Clone)]
pub struct AuditRequest {
    /// 目标URL
    pub url: String,
    /// 审计分类
    pub category: String,
    /// 视口
    pub viewport: Viewport,
    /// 审计模式
    pub mode: AuditMode,
    /// 超时时间
    pub timeout: Duration,
}

impl AuditRequest {
    /// 根据配置创建无障碍审计请求（桌面视口、导航模式）
    pub fn accessibility(url: impl Into<String>, settings: &AuditSettings) -> Self {
        Self {
            url: url.into(),
            category: ACCESSIBILITY_CATEGORY.to_string(),
            viewport: Viewport {
                width: settings.viewport_width,
                height: settings.viewport_height,
                mobile: false,
            },
            mode: AuditMode::Navigation,
            timeout: settings.timeout(),
        }
    }
}

/// 审计引擎原始输出
#[derive(Debug, Clone)]
pub struct RawAudit {
    /// 结果文档
    pub report: LighthouseResult,
    /// 引擎渲染的 HTML 报告
    pub html_report: String,
}

/// 审计引擎特质
///
/// 每次调用独占一个浏览器实例，返回前必须释放
#[async_trait]
pub trait AuditEngine: Send + Sync {
    /// 执行审计
    async fn audit(&self, request: &AuditRequest) -> Result<RawAudit, EngineError>;

    /// 引擎名称
    fn name(&self) -> &'static str;
}
