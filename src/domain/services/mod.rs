// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域服务模块
///
/// 包含不依赖任何 I/O 的核心逻辑：
/// - 规范化（normalizer）：Lighthouse 原始结果 -> 审计记录
/// - 聚合（aggregator）：审计记录 -> 快照
/// - 比较（differ）：两个快照 -> 差异列表
pub mod aggregator;
pub mod differ;
pub mod normalizer;
