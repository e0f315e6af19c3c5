// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::NaiveDate;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

use crate::domain::models::snapshot::{Snapshot, SnapshotRecords};
use crate::infrastructure::storage::write_file;
use crate::utils::errors::{CompareError, ReportError};

const SNAPSHOT_EXTENSION: &str = "json";

/// 快照文件排序方式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotOrdering {
    /// 按文件名字典序。`YYYY-M-D` 命名下单位数的月/日会排错（`2024-9-1` 在 `2024-10-1` 之后）
    Lexicographic,
    /// 按文件名中的日期排序，无法解析的文件名排在最后
    Chronological,
}

impl SnapshotOrdering {
    pub fn parse(value: &str) -> Result<Self, CompareError> {
        match value {
            "lexicographic" => Ok(SnapshotOrdering::Lexicographic),
            "chronological" => Ok(SnapshotOrdering::Chronological),
            other => Err(CompareError::UnknownOrdering(other.to_string())),
        }
    }
}

/// JSON 快照存储
///
/// 持久化格式为 `{slug: {url, accessibilityScore, totalIssues, items, htmlReport}}`
pub struct SnapshotStore {
    json_dir: PathBuf,
}

impl SnapshotStore {
    pub fn new(json_dir: impl Into<PathBuf>) -> Self {
        Self {
            json_dir: json_dir.into(),
        }
    }

    pub fn path_for(&self, snapshot: &Snapshot) -> PathBuf {
        self.json_dir
            .join(format!("{}.{}", snapshot.file_stem(), SNAPSHOT_EXTENSION))
    }

    /// 保存快照，同一天的快照会被覆盖
    pub async fn save(&self, snapshot: &Snapshot) -> Result<PathBuf, ReportError> {
        let path = self.path_for(snapshot);
        let content = serde_json::to_string_pretty(&snapshot.records)?;
        write_file(&path, content.as_bytes()).await?;
        Ok(path)
    }

    /// 读取快照
    pub async fn load(&self, path: &Path) -> Result<SnapshotRecords, CompareError> {
        let content = fs::read_to_string(path)
            .await
            .map_err(|source| CompareError::Io {
                path: path.to_path_buf(),
                source,
            })?;

        serde_json::from_str(&content).map_err(|source| CompareError::MalformedSnapshot {
            path: path.to_path_buf(),
            source,
        })
    }

    /// 列出所有快照文件
    pub async fn list(&self, ordering: SnapshotOrdering) -> Result<Vec<PathBuf>, CompareError> {
        let mut entries = match fs::read_dir(&self.json_dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(source) => {
                return Err(CompareError::Io {
                    path: self.json_dir.clone(),
                    source,
                })
            }
        };

        let mut files = Vec::new();
        loop {
            let entry = entries
                .next_entry()
                .await
                .map_err(|source| CompareError::Io {
                    path: self.json_dir.clone(),
                    source,
                })?;
            let Some(entry) = entry else { break };

            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(SNAPSHOT_EXTENSION) {
                continue;
            }
            let file_type = entry
                .file_type()
                .await
                .map_err(|source| CompareError::Io {
                    path: path.clone(),
                    source,
                })?;
            if file_type.is_file() {
                files.push(path);
            }
        }

        sort_snapshots(&mut files, ordering);
        Ok(files)
    }

    /// 选出用于比较的两个快照：排序后的前两个，依次作为基准和新快照
    pub async fn select_pair(
        &self,
        ordering: SnapshotOrdering,
    ) -> Result<(PathBuf, PathBuf), CompareError> {
        let files = self.list(ordering).await?;
        debug!(found = files.len(), ?ordering, "Listed snapshot files");

        let mut files = files.into_iter();
        match (files.next(), files.next()) {
            (Some(base), Some(new)) => Ok((base, new)),
            (first, _) => Err(CompareError::InsufficientSnapshots {
                found: usize::from(first.is_some()),
            }),
        }
    }
}

fn sort_snapshots(files: &mut [PathBuf], ordering: SnapshotOrdering) {
    match ordering {
        SnapshotOrdering::Lexicographic => files.sort_by(|a, b| file_name(a).cmp(file_name(b))),
        SnapshotOrdering::Chronological => files.sort_by(|a, b| {
            let (da, db) = (stem_date(a), stem_date(b));
            da.is_none()
                .cmp(&db.is_none())
                .then(da.cmp(&db))
                .then_with(|| file_name(a).cmp(file_name(b)))
        }),
    }
}

fn file_name(path: &Path) -> &str {
    path.file_name().and_then(|n| n.to_str()).unwrap_or_default()
}

/// 解析 `Y-M-D` 形式的文件名（月、日可不补零）
fn stem_date(path: &Path) -> Option<NaiveDate> {
    let stem = path.file_stem()?.to_str()?;
    let mut parts = stem.split('-');
    let year = parts.next()?.parse().ok()?;
    let month = parts.next()?.parse().ok()?;
    let day = parts.next()?.parse().ok()?;
    if parts.next().is_some() {
        return None;
    }
    NaiveDate::from_ymd_opt(year, month, day)
}
