// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 引擎模块
///
/// 审计引擎边界：浏览器实例管理和 Lighthouse 调用
pub mod browser_session;
pub mod lighthouse_engine;
pub mod traits;
