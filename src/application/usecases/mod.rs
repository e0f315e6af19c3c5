// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 应用用例模块
///
/// 定义命令行两种模式对应的用例
/// 负责协调工作器、领域服务和报告输出完成一次完整操作
pub mod compare_reports;
pub mod run_audit;
