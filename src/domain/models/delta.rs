// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::Serialize;
use std::collections::BTreeMap;

/// 单个问题标题在两次运行间的变化
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct IssueDelta {
    pub base: u64,
    pub new: u64,
    pub changed: bool,
}

impl IssueDelta {
    pub fn new(base: u64, new: u64) -> Self {
        Self {
            base,
            new,
            changed: base != new,
        }
    }
}

/// 单个URL在两个快照间的差异
///
/// 仅当两次的 `totalIssues` 不同时产生
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Delta {
    /// 两个快照共有的 slug
    pub key: String,
    /// 基准快照中的报告链接
    pub report_link: String,
    /// (基准 totalIssues, 新 totalIssues)
    pub scores: (u64, u64),
    /// 基准快照中的问题标题 -> 变化
    pub issue_deltas: BTreeMap<String, IssueDelta>,
}
