// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 基础设施模块
///
/// 报告目录、快照文件存储以及 HTML/CSV 渲染
pub mod csv_report;
pub mod html_report;
pub mod report_writer;
pub mod snapshot_store;
pub mod storage;
