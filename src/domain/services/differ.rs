// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::collections::BTreeMap;
use tracing::warn;

use crate::domain::models::delta::{Delta, IssueDelta};
use crate::domain::models::snapshot::SnapshotRecords;

/// 比较两个快照
///
/// 遍历基准快照的每个键，两次 `totalIssues` 不同时生成一个 [`Delta`]。
/// 问题明细只遍历基准快照中的标题，新快照中新增的标题不会出现在结果里。
/// 新快照中不存在的键会被跳过。
pub fn diff(base: &SnapshotRecords, new: &SnapshotRecords) -> Vec<Delta> {
    let mut deltas = Vec::new();

    for (key, base_record) in base {
        let Some(new_record) = new.get(key) else {
            warn!(key = %key, "Page missing from the newer snapshot, skipping");
            continue;
        };

        if base_record.total_issues == new_record.total_issues {
            continue;
        }

        let issue_deltas: BTreeMap<String, IssueDelta> = base_record
            .items
            .iter()
            .map(|(title, issue)| {
                (
                    title.clone(),
                    IssueDelta::new(issue.count, new_record.issue_count(title)),
                )
            })
            .collect();

        deltas.push(Delta {
            key: key.clone(),
            report_link: base_record.html_report.clone(),
            scores: (base_record.total_issues, new_record.total_issues),
            issue_deltas,
        });
    }

    deltas
}
