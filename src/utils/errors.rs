// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::engines::traits::EngineError;
use std::path::PathBuf;
use thiserror::Error;

/// 审计结果规范化错误
///
/// 引擎输出缺少预期字段时返回，调用方不能用 0 代替
#[derive(Error, Debug)]
pub enum NormalizeError {
    #[error("category `{0}` missing from audit result")]
    MissingCategory(String),

    #[error("category `{0}` has no score")]
    MissingScore(String),

    #[error("audit `{0}` referenced by category but not present in result")]
    MissingAudit(String),
}

/// 单个页面审计任务的失败
#[derive(Error, Debug)]
pub enum EngineFailure {
    #[error("engine failed for {url}: {source}")]
    Engine {
        url: String,
        #[source]
        source: EngineError,
    },

    #[error("malformed audit result for {url}: {source}")]
    Data {
        url: String,
        #[source]
        source: NormalizeError,
    },
}

impl EngineFailure {
    /// 失败页面的URL
    pub fn url(&self) -> &str {
        match self {
            EngineFailure::Engine { url, .. }
            | EngineFailure::Data { url, .. } => url,
        }
    }
}

/// 批次调度错误
#[derive(Error, Debug)]
pub enum DispatchError {
    /// fail-fast 模式下第一个失败的任务
    #[error("batch aborted: {0}")]
    JobFailed(#[from] EngineFailure),

    /// 任务上下文异常退出（panic 或被取消）
    #[error("audit task for {url} terminated abnormally: {reason}")]
    TaskAborted { url: String, reason: String },
}

/// 报告输出错误
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("failed to prepare directory {path}: {source}")]
    DirectoryFailure {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize snapshot: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("failed to render CSV: {0}")]
    Csv(#[from] csv::Error),
}

/// 快照比较错误
#[derive(Error, Debug)]
pub enum CompareError {
    #[error("at least two snapshot files are required to compare, found {found}")]
    InsufficientSnapshots { found: usize },

    #[error("malformed snapshot {path}: {source}")]
    MalformedSnapshot {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("unknown snapshot ordering `{0}`")]
    UnknownOrdering(String),

    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Report(#[from] ReportError),
}

/// 审计批次运行错误
#[derive(Error, Debug)]
pub enum RunAuditError {
    #[error("no URLs configured for the audit batch")]
    NoUrls,

    #[error(transparent)]
    Dispatch(#[from] DispatchError),

    #[error(transparent)]
    Report(#[from] ReportError),

    #[error("every URL failed: {}", failed.join(", "))]
    AllFailed { failed: Vec<String> },
}
