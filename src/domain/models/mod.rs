// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域模型模块
///
/// 该模块定义了系统的核心数据结构，包括：
/// - Lighthouse 结果（lighthouse）：审计引擎输出中本系统读取的部分
/// - 审计记录（audit_record）：单个URL一次运行的规范化结果
/// - 快照（snapshot）：一次批次运行的全部记录
/// - 差异（delta）：两个快照之间单个URL的变化
pub mod audit_record;
pub mod delta;
pub mod lighthouse;
pub mod snapshot;
