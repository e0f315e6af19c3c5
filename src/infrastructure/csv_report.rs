// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use csv::{Terminator, WriterBuilder};

use crate::domain::models::snapshot::Snapshot;
use crate::utils::errors::ReportError;

const TOTAL_ISSUES_LABEL: &str = "Total Issues";

/// 生成问题统计 CSV
///
/// 第一行是空单元格加各页面 slug，第二行是每页的问题总数，
/// 之后每个问题标题一行，未出现该问题的页面填 0。行以 `\n` 分隔，末尾没有换行。
pub fn render_csv(snapshot: &Snapshot) -> Result<String, ReportError> {
    let mut writer = WriterBuilder::new()
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record(
        std::iter::once("").chain(snapshot.records.keys().map(String::as_str)),
    )?;

    let totals = snapshot
        .records
        .values()
        .map(|record| record.total_issues.to_string());
    writer.write_record(std::iter::once(TOTAL_ISSUES_LABEL.to_string()).chain(totals))?;

    for title in snapshot.issue_titles() {
        let counts = snapshot
            .records
            .values()
            .map(|record| record.issue_count(title).to_string());
        writer.write_record(std::iter::once(title.to_string()).chain(counts))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| csv::Error::from(e.into_error()))?;
    let mut content = String::from_utf8_lossy(&bytes).into_owned();
    if content.ends_with('\n') {
        content.pop();
    }
    Ok(content)
}
