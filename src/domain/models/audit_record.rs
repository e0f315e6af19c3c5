// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// 单个失败检查项
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditIssue {
    /// 失败实例数（例如页面上的元素个数）
    pub count: u64,
}

/// 单个URL一次运行的审计记录
///
/// 持久化为 `{url, accessibilityScore, totalIssues, items, htmlReport}`。
/// 通过 [`AuditRecord::new`] 构造时 `totalIssues` 等于 `items` 中所有 `count` 之和。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditRecord {
    /// 被扫描的URL
    #[serde(default)]
    pub url: String,
    /// 无障碍得分（0-100）
    #[serde(default)]
    pub accessibility_score: f64,
    /// 问题总数
    pub total_issues: u64,
    /// 问题标题 -> 问题
    pub items: BTreeMap<String, AuditIssue>,
    /// 单页 HTML 报告路径
    #[serde(default)]
    pub html_report: String,
}

impl AuditRecord {
    pub fn new(url: String, accessibility_score: f64, items: BTreeMap<String, AuditIssue>) -> Self {
        let total_issues = items.values().map(|issue| issue.count).sum();
        Self {
            url,
            accessibility_score,
            total_issues,
            items,
            html_report: String::new(),
        }
    }

    pub fn with_report_link(mut self, link: impl Into<String>) -> Self {
        self.html_report = link.into();
        self
    }

    /// 指定标题的问题数，未出现时为 0
    pub fn issue_count(&self, title: &str) -> u64 {
        self.items.get(title).map_or(0, |issue| issue.count)
    }
}

/// 一次页面审计的完整产出：规范化记录和引擎渲染的 HTML 报告
#[derive(Debug, Clone)]
pub struct PageAudit {
    pub record: AuditRecord,
    pub report_html: String,
}
