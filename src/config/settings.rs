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

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

/// 应用程序配置设置
///
/// 包含审计引擎、调度器和报告输出等所有配置项
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// 审计配置
    pub audit: AuditSettings,
    /// 调度器配置
    pub dispatcher: DispatcherSettings,
    /// 报告配置
    pub reports: ReportSettings,
}

/// 审计配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct AuditSettings {
    /// 待扫描的URL列表
    pub urls: Vec<String>,
    /// Lighthouse 可执行文件
    pub lighthouse_bin: String,
    /// Chrome 可执行文件路径（为空时自动探测）
    pub chrome_executable: Option<String>,
    /// 视口宽度
    pub viewport_width: u32,
    /// 视口高度
    pub viewport_height: u32,
    /// 单个页面的审计超时时间（秒）
    pub timeout_secs: u64,
}

impl AuditSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// 调度器配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct DispatcherSettings {
    /// 同时运行的浏览器实例上限
    pub max_workers: usize,
    /// 任意页面失败时是否立即终止整个批次
    pub fail_fast: bool,
}

/// 报告配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct ReportSettings {
    /// 报告根目录
    pub root_dir: PathBuf,
    /// 快照排序方式 (lexicographic, chronological)
    pub snapshot_ordering: String,
}

impl Settings {
    /// 创建新的配置实例
    ///
    /// 依次加载默认值、`config/default`、`config/{APP_ENVIRONMENT}` 以及
    /// `A11Y__` 前缀的环境变量
    ///
    /// # Returns
    ///
    /// * `Ok(Settings)` - 成功加载的配置
    /// * `Err(ConfigError)` - 配置加载失败
    pub fn new() -> Result<Self, ConfigError> {
        let env = std::env::var("APP_ENVIRONMENT").unwrap_or_else(|_| "default".to_string());
        let builder = Self::defaults()?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(
                Environment::with_prefix("A11Y")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("audit.urls")
                    .try_parsing(true),
            );

        let settings: Settings = builder.build()?.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    fn defaults() -> Result<config::ConfigBuilder<config::builder::DefaultState>, ConfigError> {
        Config::builder()
            // Default audit settings
            .set_default("audit.urls", Vec::<String>::new())?
            .set_default("audit.lighthouse_bin", "lighthouse")?
            .set_default("audit.viewport_width", 1920)?
            .set_default("audit.viewport_height", 1080)?
            .set_default("audit.timeout_secs", 180)?
            // Default dispatcher settings
            .set_default("dispatcher.max_workers", 6)?
            .set_default("dispatcher.fail_fast", false)?
            // Default report settings
            .set_default("reports.root_dir", "reports")?
            .set_default("reports.snapshot_ordering", "lexicographic")
    }

    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.dispatcher.max_workers == 0 {
            return Err(ConfigError::Message(
                "dispatcher.max_workers must be at least 1".to_string(),
            ));
        }
        if self.audit.timeout_secs == 0 {
            return Err(ConfigError::Message(
                "audit.timeout_secs must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
