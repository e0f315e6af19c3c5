// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域层模块
///
/// 该模块包含系统的核心业务逻辑，包括：
/// - 领域模型（models）：审计记录、快照和差异
/// - 服务（services）：规范化、聚合和比较
///
/// 领域层不依赖于任何外部实现。
pub mod models;
pub mod services;
