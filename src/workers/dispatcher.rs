// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use futures::stream::{FuturesUnordered, StreamExt};
use std::future::Future;
use std::sync::Arc;
use tokio::sync::{AcquireError, Semaphore};
use tokio::task::AbortHandle;
use tracing::{debug, error, info};

use crate::config::settings::DispatcherSettings;
use crate::utils::errors::{DispatchError, EngineFailure};

/// 批次执行结果
#[derive(Debug)]
pub struct BatchOutcome<T> {
    /// 成功完成的任务结果，按完成顺序排列
    pub completed: Vec<T>,
    /// 失败的任务（仅在非 fail-fast 模式下收集）
    pub failures: Vec<EngineFailure>,
}

impl<T> BatchOutcome<T> {
    pub fn failed_urls(&self) -> Vec<String> {
        self.failures.iter().map(|f| f.url().to_string()).collect()
    }
}

/// 有界工作池调度器
///
/// 每个URL一个任务，通过信号量限制同时运行的任务数；超出上限的任务排队等待许可。
/// 任务结果经由各自的 JoinHandle 交回调度方，只有调度方修改结果集合。
///
/// 失败策略：
/// - 任务 panic 或被取消：立即终止整个批次
/// - 任务返回 [`EngineFailure`]：`fail_fast` 时终止整个批次，否则记录后继续
pub struct Dispatcher {
    max_workers: usize,
    fail_fast: bool,
}

impl Dispatcher {
    pub fn new(max_workers: usize, fail_fast: bool) -> Self {
        Self {
            max_workers: max_workers.max(1),
            fail_fast,
        }
    }

    pub fn from_settings(settings: &DispatcherSettings) -> Self {
        Self::new(settings.max_workers, settings.fail_fast)
    }

    pub fn max_workers(&self) -> usize {
        self.max_workers
    }

    /// 执行一批任务
    ///
    /// # 参数
    ///
    /// * `urls` - 待处理的URL
    /// * `job` - 单个URL的任务函数
    ///
    /// # 返回值
    ///
    /// * `Ok(BatchOutcome)` - 所有任务都已结束
    /// * `Err(DispatchError)` - 批次被终止，未完成的任务已取消
    pub async fn run_batch<T, F, Fut>(
        &self,
        urls: Vec<String>,
        job: F,
    ) -> Result<BatchOutcome<T>, DispatchError>
    where
        T: Send + 'static,
        F: Fn(String) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<T, EngineFailure>> + Send + 'static,
    {
        info!(
            jobs = urls.len(),
            max_workers = self.max_workers,
            fail_fast = self.fail_fast,
            "Dispatching audit batch"
        );

        let semaphore = Arc::new(Semaphore::new(self.max_workers));
        let job = Arc::new(job);
        let mut abort_handles: Vec<AbortHandle> = Vec::with_capacity(urls.len());
        let mut pending = FuturesUnordered::new();

        for url in urls {
            let semaphore = semaphore.clone();
            let job = job.clone();
            let task_url = url.clone();

            let handle = tokio::spawn(async move {
                let _permit = semaphore.acquire_owned().await?;
                debug!(url = %task_url, "Audit job started");
                Ok::<_, AcquireError>(job(task_url).await)
            });

            abort_handles.push(handle.abort_handle());
            pending.push(async move { (url, handle.await) });
        }

        let mut completed = Vec::new();
        let mut failures = Vec::new();

        while let Some((url, joined)) = pending.next().await {
            match joined {
                Ok(Ok(Ok(value))) => {
                    debug!(url = %url, "Audit job completed");
                    completed.push(value);
                }
                Ok(Ok(Err(failure))) => {
                    error!(url = %url, error = %failure, "Audit job failed");
                    if self.fail_fast {
                        abort_all(&abort_handles);
                        return Err(DispatchError::JobFailed(failure));
                    }
                    failures.push(failure);
                }
                Ok(Err(closed)) => {
                    error!(url = %url, error = %closed, "Worker pool closed");
                    abort_all(&abort_handles);
                    return Err(DispatchError::TaskAborted {
                        url,
                        reason: closed.to_string(),
                    });
                }
                Err(join_error) => {
                    error!(url = %url, error = %join_error, "Audit task terminated abnormally");
                    abort_all(&abort_handles);
                    return Err(DispatchError::TaskAborted {
                        url,
                        reason: join_error.to_string(),
                    });
                }
            }
        }

        info!(
            completed = completed.len(),
            failed = failures.len(),
            "Audit batch finished"
        );
        Ok(BatchOutcome {
            completed,
            failures,
        })
    }
}

fn abort_all(handles: &[AbortHandle]) {
    for handle in handles {
        handle.abort();
    }
}
