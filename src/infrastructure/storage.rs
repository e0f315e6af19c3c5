// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::debug;

use crate::utils::errors::ReportError;

const JSON_DIR: &str = "json-report";
const HTML_DIR: &str = "html-report";
const COMPARISON_FILE: &str = "compared-report.html";

/// 报告目录布局
///
/// ```text
/// <root>/json-report/<date>.json
/// <root>/html-report/<slug>.html
/// <root>/<date>.html
/// <root>/<date>.csv
/// <root>/compared-report.html
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportLayout {
    root: PathBuf,
}

impl ReportLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn json_dir(&self) -> PathBuf {
        self.root.join(JSON_DIR)
    }

    pub fn html_dir(&self) -> PathBuf {
        self.root.join(HTML_DIR)
    }

    pub fn snapshot_path(&self, date_stem: &str) -> PathBuf {
        self.json_dir().join(format!("{}.json", date_stem))
    }

    pub fn page_path(&self, slug: &str) -> PathBuf {
        self.html_dir().join(format!("{}.html", slug))
    }

    /// 单页报告相对于报告根目录的链接，供汇总页面的 iframe 使用
    pub fn page_link(&self, slug: &str) -> String {
        format!("{}/{}.html", HTML_DIR, slug)
    }

    pub fn combined_path(&self, date_stem: &str) -> PathBuf {
        self.root.join(format!("{}.html", date_stem))
    }

    pub fn csv_path(&self, date_stem: &str) -> PathBuf {
        self.root.join(format!("{}.csv", date_stem))
    }

    pub fn comparison_path(&self) -> PathBuf {
        self.root.join(COMPARISON_FILE)
    }
}

/// 准备输出目录
///
/// 先递归删除 HTML 目录（不存在时忽略），再创建 JSON 和 HTML 目录（已存在时忽略）。
/// 因此 HTML 目录只保留最近一次运行的结果，而 JSON 快照会跨天累积。
pub async fn prepare_directories(layout: &ReportLayout) -> Result<(), ReportError> {
    let html_dir = layout.html_dir();
    match fs::remove_dir_all(&html_dir).await {
        Ok(()) => debug!(path = %html_dir.display(), "Removed previous HTML reports"),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!(path = %html_dir.display(), "HTML report directory does not exist yet")
        }
        Err(source) => {
            return Err(ReportError::DirectoryFailure {
                path: html_dir,
                source,
            })
        }
    }

    for dir in [layout.json_dir(), html_dir] {
        fs::create_dir_all(&dir)
            .await
            .map_err(|source| ReportError::DirectoryFailure {
                path: dir.clone(),
                source,
            })?;
    }

    Ok(())
}

/// 写入文件，必要时创建父目录
pub async fn write_file(path: &Path, data: &[u8]) -> Result<(), ReportError> {
    let to_error = |source: std::io::Error| ReportError::Write {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).await.map_err(to_error)?;
    }

    let mut file = fs::File::create(path).await.map_err(to_error)?;
    file.write_all(data).await.map_err(to_error)?;
    file.flush().await.map_err(to_error)?;

    Ok(())
}
