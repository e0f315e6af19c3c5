// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::collections::BTreeMap;

use crate::domain::models::audit_record::{AuditIssue, AuditRecord};
use crate::domain::models::lighthouse::LighthouseResult;
use crate::utils::errors::NormalizeError;

/// 本系统审计的唯一分类
pub const ACCESSIBILITY_CATEGORY: &str = "accessibility";

/// 将 Lighthouse 原始结果规范化为审计记录
///
/// 只统计 `accessibility` 分类下得分为 0/null 且展示模式为 `binary` 的审计项。
/// 得分为分类分数 × 100；分类或分数缺失时返回错误。
///
/// # 参数
///
/// * `report` - Lighthouse 结果文档
/// * `url` - 被扫描的URL
///
/// # 返回值
///
/// * `Ok(AuditRecord)` - 规范化后的记录（报告链接由聚合器填写）
/// * `Err(NormalizeError)` - 结果缺少预期字段
pub fn normalize(report: &LighthouseResult, url: &str) -> Result<AuditRecord, NormalizeError> {
    let category = report
        .categories
        .get(ACCESSIBILITY_CATEGORY)
        .ok_or_else(|| NormalizeError::MissingCategory(ACCESSIBILITY_CATEGORY.to_string()))?;

    let score = category
        .score
        .ok_or_else(|| NormalizeError::MissingScore(ACCESSIBILITY_CATEGORY.to_string()))?;

    let mut items = BTreeMap::new();
    for audit_ref in &category.audit_refs {
        let audit = report
            .audits
            .get(&audit_ref.id)
            .ok_or_else(|| NormalizeError::MissingAudit(audit_ref.id.clone()))?;

        if audit.is_failed_binary() {
            items.insert(
                audit.title.clone(),
                AuditIssue {
                    count: audit.issue_count(),
                },
            );
        }
    }

    Ok(AuditRecord::new(url.to_string(), score * 100.0, items))
}
