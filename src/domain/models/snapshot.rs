// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

use super::audit_record::AuditRecord;

/// 快照记录表：URL slug -> 审计记录，即持久化 JSON 的顶层结构
pub type SnapshotRecords = BTreeMap<String, AuditRecord>;

/// 一次完整批次运行的结果
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    /// 创建日期，决定持久化文件名
    pub created_at: NaiveDate,
    /// slug -> 审计记录
    pub records: SnapshotRecords,
}

/// 快照汇总统计
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SnapshotSummary {
    pub pages: usize,
    pub total_issues: u64,
    pub average_score: Option<f64>,
    pub distinct_issue_titles: usize,
    pub pages_with_issues: usize,
}

impl Snapshot {
    pub fn new(created_at: NaiveDate) -> Self {
        Self {
            created_at,
            records: BTreeMap::new(),
        }
    }

    /// 插入记录，返回被覆盖的旧记录（slug 冲突时）
    pub fn insert(&mut self, key: String, record: AuditRecord) -> Option<AuditRecord> {
        self.records.insert(key, record)
    }

    /// 文件名使用的日期，格式 `YYYY-M-D`（月、日不补零）
    pub fn file_stem(&self) -> String {
        date_stem(self.created_at)
    }

    /// 所有记录中出现过的问题标题
    pub fn issue_titles(&self) -> BTreeSet<&str> {
        self.records
            .values()
            .flat_map(|record| record.items.keys().map(String::as_str))
            .collect()
    }

    pub fn summary(&self) -> SnapshotSummary {
        let pages = self.records.len();
        let total_issues = self.records.values().map(|r| r.total_issues).sum();
        let average_score = if pages == 0 {
            None
        } else {
            let sum: f64 = self.records.values().map(|r| r.accessibility_score).sum();
            Some(sum / pages as f64)
        };

        SnapshotSummary {
            pages,
            total_issues,
            average_score,
            distinct_issue_titles: self.issue_titles().len(),
            pages_with_issues: self
                .records
                .values()
                .filter(|r| r.total_issues > 0)
                .count(),
        }
    }
}

/// `YYYY-M-D` 格式的日期字符串
pub fn date_stem(date: NaiveDate) -> String {
    format!("{}-{}-{}", date.year(), date.month(), date.day())
}
