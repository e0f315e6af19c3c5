// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 将URL转换为可用作文件名和报告键的 slug
///
/// 去掉 `http://` 或 `https://` 前缀，并将 `/` 和 `.` 替换为 `-`。
/// 不同的URL可能得到相同的 slug，调用方需自行处理冲突。
pub fn slugify(url: &str) -> String {
    let without_scheme = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"))
        .unwrap_or(url);

    without_scheme.replace(['/', '.'], "-")
}

/// 单页报告的文件名
pub fn page_report_file_name(url: &str) -> String {
    format!("{}.html", slugify(url))
}
