// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::NaiveDate;
use std::path::PathBuf;
use tracing::warn;

use crate::domain::models::audit_record::PageAudit;
use crate::domain::models::snapshot::Snapshot;
use crate::utils::url_utils::{page_report_file_name, slugify};

/// 单页 HTML 报告内容
#[derive(Debug, Clone, PartialEq)]
pub struct PageReport {
    pub url: String,
    pub slug: String,
    pub markup: String,
}

/// 聚合结果：快照以及待渲染的单页报告
#[derive(Debug, Clone)]
pub struct AggregatedRun {
    pub snapshot: Snapshot,
    pub pages: Vec<PageReport>,
}

/// 报告聚合器
///
/// 按URL slug 汇总各页面的审计记录，纯内存操作
pub struct ReportAggregator {
    html_dir: PathBuf,
}

impl ReportAggregator {
    /// # 参数
    ///
    /// * `html_dir` - 单页报告所在目录，用于生成记录中的报告链接
    pub fn new(html_dir: impl Into<PathBuf>) -> Self {
        Self {
            html_dir: html_dir.into(),
        }
    }

    /// 汇总页面审计结果
    ///
    /// 结果可以按任意完成顺序传入。两个URL得到相同 slug 时，后写入的覆盖先写入的。
    pub fn aggregate(&self, pages: Vec<PageAudit>, created_at: NaiveDate) -> AggregatedRun {
        let mut snapshot = Snapshot::new(created_at);
        let mut reports: Vec<PageReport> = Vec::with_capacity(pages.len());

        for page in pages {
            let url = page.record.url.clone();
            let slug = slugify(&url);
            let link = self
                .html_dir
                .join(page_report_file_name(&url))
                .to_string_lossy()
                .to_string();

            if let Some(previous) = snapshot.insert(slug.clone(), page.record.with_report_link(link)) {
                warn!(
                    slug = %slug,
                    previous = %previous.url,
                    current = %url,
                    "URL slug collision, keeping the later result"
                );
                reports.retain(|report| report.slug != slug);
            }

            reports.push(PageReport {
                url,
                slug,
                markup: page.report_html,
            });
        }

        AggregatedRun {
            snapshot,
            pages: reports,
        }
    }
}
