// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use futures::future::try_join_all;
use std::path::PathBuf;
use tracing::info;

use crate::domain::services::aggregator::AggregatedRun;
use crate::infrastructure::csv_report::render_csv;
use crate::infrastructure::html_report::{render_combined, render_page};
use crate::infrastructure::snapshot_store::SnapshotStore;
use crate::infrastructure::storage::{prepare_directories, write_file, ReportLayout};
use crate::utils::errors::ReportError;

/// 一次运行写出的全部产物
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedArtifacts {
    pub json_path: PathBuf,
    pub html_paths: Vec<PathBuf>,
    pub combined_html_path: PathBuf,
    pub csv_path: PathBuf,
}

/// 快照写入器
pub struct ReportWriter {
    layout: ReportLayout,
    store: SnapshotStore,
}

impl ReportWriter {
    pub fn new(layout: ReportLayout) -> Self {
        let store = SnapshotStore::new(layout.json_dir());
        Self { layout, store }
    }

    pub fn layout(&self) -> &ReportLayout {
        &self.layout
    }

    /// 重建 HTML 目录并确保 JSON 目录存在
    pub async fn prepare(&self) -> Result<(), ReportError> {
        prepare_directories(&self.layout).await
    }

    /// 持久化一次运行的结果
    ///
    /// 依次写出 JSON 快照、每个页面的 HTML 报告、汇总 HTML 和 CSV
    pub async fn persist(&self, run: &AggregatedRun) -> Result<PersistedArtifacts, ReportError> {
        let stem = run.snapshot.file_stem();

        let json_path = self.store.save(&run.snapshot).await?;
        info!(path = %json_path.display(), "JSON report generated");

        let html_paths = try_join_all(run.pages.iter().map(|page| async move {
            let path = self.layout.page_path(&page.slug);
            write_file(&path, render_page(&page.url, &page.markup).as_bytes()).await?;
            Ok::<_, ReportError>(path)
        }))
        .await?;

        let combined_html_path = self.layout.combined_path(&stem);
        write_file(
            &combined_html_path,
            render_combined(&run.pages, &self.layout).as_bytes(),
        )
        .await?;
        info!(path = %combined_html_path.display(), pages = html_paths.len(), "HTML reports generated");

        let csv_path = self.layout.csv_path(&stem);
        write_file(&csv_path, render_csv(&run.snapshot)?.as_bytes()).await?;
        info!(path = %csv_path.display(), "CSV report generated");

        Ok(PersistedArtifacts {
            json_path,
            html_paths,
            combined_html_path,
            csv_path,
        })
    }
}
