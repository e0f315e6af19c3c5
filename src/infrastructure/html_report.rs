// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use html_escape::{encode_double_quoted_attribute, encode_text};
use std::fmt::Write;

use crate::domain::models::delta::Delta;
use crate::domain::services::aggregator::PageReport;
use crate::infrastructure::storage::ReportLayout;

const PAGE_STYLE: &str = "body{ font-family: Arial, sans-serif; margin: 20px;}";

const COMBINED_STYLE: &str = ".tabcontent{ display: none; padding: 6px 12px; border: 1px solid #ccc; border-top: none; height: calc(100vh - 5rem);} select{ margin-bottom: 0.5rem; padding: 0.25rem;}";

const COMBINED_SCRIPT: &str = r#"function openTab(tabName){ var panels = document.getElementsByClassName("tabcontent"); for (var i = 0; i < panels.length; i++){ panels[i].style.display = "none";} document.getElementById(tabName).style.display = "block";}"#;

const COMPARISON_STYLE: &str = "body{ background: #ebebeb; margin: 0; display: flex; flex-direction: column; row-gap: 3rem; width: 100vw; height: 100vh; overflow: auto; padding: 2rem; box-sizing: border-box;} table{ width: calc(100% - 4rem); border: 0.5px solid #ccc; border-collapse: collapse; border-spacing: 0;} th, td{ padding: 0.5rem 1rem;} thead th{ background-color: #f2f2f2; color: #141414; border-bottom: 0.5px solid #ccc; text-align: center; cursor: pointer;} thead th:first-child{ text-align: left;} tbody th{ text-align: left; font-weight: 400;} tbody th, tbody td{ border-bottom: 0.5px solid #ccc; text-align: center; background-color: #fff;} tbody tr:last-child th, tbody tr:last-child td{ border-bottom: none;} tr.change th{ color: red;} tr.change td:last-child{ color: red; font-weight: bold;} .tabcontent{ display: none; position: fixed; top: 1rem; left: 1rem; width: calc(100vw - 2rem); height: calc(100vh - 2rem);} .tabcontent.show{ display: block;}";

const COMPARISON_SCRIPT: &str = r#"function openReport(link){ var frame = document.querySelector(".tabcontent iframe"); frame.setAttribute("src", link); document.querySelector(".tabcontent").classList.toggle("show");}"#;

fn document(title: &str, head: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html><html lang=\"en\"><head><meta charset=\"UTF-8\"><meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\"><title>{}</title>{}</head><body>{}</body></html>",
        encode_text(title),
        head,
        body
    )
}

/// 汇总页面中每个面板的 id，slug 在快照内唯一
fn tab_id(slug: &str) -> String {
    format!("tab-{}", slug)
}

/// 单页报告：包裹 Lighthouse 生成的 HTML
pub fn render_page(url: &str, markup: &str) -> String {
    document(
        &format!("Lighthouse A11Y Scan Results - {}", url),
        &format!("<style>{}</style>", PAGE_STYLE),
        markup,
    )
}

/// 汇总报告：下拉框选择页面，每个页面一个 iframe 面板，默认显示第一个
pub fn render_combined(pages: &[PageReport], layout: &ReportLayout) -> String {
    let mut options = String::new();
    let mut panels = String::new();

    for page in pages {
        let panel_id = encode_double_quoted_attribute(&tab_id(&page.slug)).into_owned();
        let _ = write!(
            options,
            "<option class=\"tablinks\" value=\"{}\">{}</option>",
            panel_id,
            encode_text(&page.url)
        );
        let _ = write!(
            panels,
            "<div id=\"{}\" class=\"tabcontent\"><iframe src=\"{}\" style=\"width: 100%; height: 100%; border: none;\"></iframe></div>",
            panel_id,
            encode_double_quoted_attribute(&layout.page_link(&page.slug))
        );
    }

    let body = format!(
        "<select onchange=\"openTab(this.value)\">{}</select>{}<script>var first = document.querySelector(\".tabcontent\"); if (first) {{ first.style.display = \"block\"; }}</script>",
        options, panels
    );

    document(
        "Lighthouse A11Y Scan Results - Multiple URLs",
        &format!(
            "<style>{}</style><script>{}</script>",
            COMBINED_STYLE, COMBINED_SCRIPT
        ),
        &body,
    )
}

/// 比较报告：每个有变化的页面一张前后对比表，变化的行带 `change` 样式
pub fn render_comparison(deltas: &[Delta]) -> String {
    let mut page = String::new();

    for delta in deltas {
        let _ = write!(
            page,
            "<table cellspacing=\"0\"><thead><tr><th data-report=\"{}\" onclick=\"openReport(this.dataset.report)\">{}</th><th style=\"width: 72px;\">Before fix</th><th style=\"width: 72px;\">After fix</th></tr></thead><tbody>",
            encode_double_quoted_attribute(&delta.report_link),
            encode_text(&delta.key)
        );
        let _ = write!(
            page,
            "<tr><th>A11y score</th><td>{}</td><td>{}</td></tr>",
            delta.scores.0, delta.scores.1
        );
        for (title, issue) in &delta.issue_deltas {
            let _ = write!(
                page,
                "<tr class=\"{}\"><th>{}</th><td>{}</td><td>{}</td></tr>",
                if issue.changed { "change" } else { "" },
                encode_text(title),
                issue.base,
                issue.new
            );
        }
        page.push_str("</tbody></table>");
    }

    let report_frame = "<div class=\"tabcontent\"><button style=\"display:block; position:fixed; z-index:2; right:1.5rem; top: 1.25rem;\" onclick=\"document.querySelector('.tabcontent').classList.toggle('show');\">close</button><iframe src=\"\" style=\"width: 100%; height: 100%; border: none;\"></iframe></div>";

    document(
        "Accessibility Comparison Report",
        &format!(
            "<style>{}</style><script>{}</script>",
            COMPARISON_STYLE, COMPARISON_SCRIPT
        ),
        &format!("{}{}", page, report_frame),
    )
}
