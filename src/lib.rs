// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 应用程序模块
///
/// 包含审计批次和快照比较两个用例
pub mod application;

/// 配置模块
///
/// 处理应用程序的配置设置和环境变量
pub mod config;

/// 领域模块
///
/// 包含审计记录、快照模型以及规范化、聚合、比较服务
pub mod domain;

/// 引擎模块
///
/// 实现基于无头浏览器的 Lighthouse 审计引擎
pub mod engines;

/// 基础设施模块
///
/// 提供报告目录布局、快照存储以及 HTML/CSV 渲染
pub mod infrastructure;

/// 表示层模块
///
/// 命令行参数解析和运行模式分发
pub mod presentation;

/// 工具模块
///
/// 提供错误类型、日志初始化和URL工具
pub mod utils;

/// 工作器模块
///
/// 实现有界并发的审计调度器和页面审计工作器
pub mod workers;
