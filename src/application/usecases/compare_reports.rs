// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::path::PathBuf;
use tracing::info;

use crate::domain::models::delta::Delta;
use crate::domain::services::differ::diff;
use crate::infrastructure::html_report::render_comparison;
use crate::infrastructure::snapshot_store::{SnapshotOrdering, SnapshotStore};
use crate::infrastructure::storage::{write_file, ReportLayout};
use crate::utils::errors::CompareError;

/// 快照比较结果
#[derive(Debug)]
pub struct ComparisonReport {
    pub base: PathBuf,
    pub new: PathBuf,
    pub deltas: Vec<Delta>,
    pub output: PathBuf,
}

/// 快照比较用例：选择快照 -> 比较 -> 渲染 -> 写出
pub struct CompareReportsUseCase {
    layout: ReportLayout,
    store: SnapshotStore,
    ordering: SnapshotOrdering,
}

impl CompareReportsUseCase {
    pub fn new(layout: ReportLayout, ordering: SnapshotOrdering) -> Self {
        let store = SnapshotStore::new(layout.json_dir());
        Self {
            layout,
            store,
            ordering,
        }
    }

    pub async fn execute(&self) -> Result<ComparisonReport, CompareError> {
        let (base, new) = self.store.select_pair(self.ordering).await?;
        info!(base = %base.display(), new = %new.display(), "Comparing snapshots");

        let base_records = self.store.load(&base).await?;
        let new_records = self.store.load(&new).await?;
        let deltas = diff(&base_records, &new_records);

        let output = self.layout.comparison_path();
        write_file(&output, render_comparison(&deltas).as_bytes()).await?;
        info!(path = %output.display(), changed_pages = deltas.len(), "Comparison report generated");

        Ok(ComparisonReport {
            base,
            new,
            deltas,
            output,
        })
    }
}
