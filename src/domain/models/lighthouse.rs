// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::Deserialize;
use std::collections::HashMap;

/// Lighthouse 结果文档（LHR）中本系统用到的部分
///
/// 字段尽量宽松：缺失的分类或审计项在规范化阶段报错，而不是在反序列化阶段
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LighthouseResult {
    #[serde(default)]
    pub categories: HashMap<String, Category>,
    #[serde(default)]
    pub audits: HashMap<String, Audit>,
}

/// 审计分类
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    /// 分类总分（0-1），出错时为 null
    pub score: Option<f64>,
    #[serde(default)]
    pub audit_refs: Vec<AuditRef>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuditRef {
    pub id: String,
}

/// 单个审计项
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Audit {
    pub title: String,
    pub score: Option<f64>,
    pub score_display_mode: ScoreDisplayMode,
    pub details: Option<AuditDetails>,
}

impl Audit {
    /// 二元审计且得分为 0 或 null 时视为失败
    pub fn is_failed_binary(&self) -> bool {
        let failed = self.score.map_or(true, |score| score == 0.0);
        failed && self.score_display_mode == ScoreDisplayMode::Binary
    }

    /// 失败实例数
    ///
    /// 每个明细条目：有 `subItems` 时计子条目数，否则计 1。没有明细的审计计 1。
    pub fn issue_count(&self) -> u64 {
        match &self.details {
            Some(details) => details
                .items
                .iter()
                .map(|item| match &item.sub_items {
                    Some(sub_items) => sub_items.items.len() as u64,
                    None => 1,
                })
                .sum(),
            None => 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ScoreDisplayMode {
    Binary,
    Numeric,
    Manual,
    Informative,
    NotApplicable,
    Error,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuditDetails {
    #[serde(default)]
    pub items: Vec<DetailItem>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailItem {
    pub sub_items: Option<SubItems>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SubItems {
    #[serde(default)]
    pub items: Vec<serde_json::Value>,
}
