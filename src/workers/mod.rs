// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 工作器模块
///
/// 提供审计任务的执行和有界并发调度
pub mod audit_worker;
pub mod dispatcher;

pub use audit_worker::AuditWorker;
pub use dispatcher::{BatchOutcome, Dispatcher};
