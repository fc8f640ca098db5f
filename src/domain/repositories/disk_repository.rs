//! # Disk Repository Trait
//!
//! Compute Engine ディスク操作を抽象化

use anyhow::Result;
use async_trait::async_trait;

#[cfg(test)]
use mockall::automock;

use crate::domain::entities::disk::DiskSummary;

/// ディスクリポジトリ
#[cfg_attr(test, automock)]
#[async_trait]
pub trait DiskRepository: Send + Sync {
    /// リージョンディスクを全ページ分取得
    async fn list_region_disks(&self, project_id: &str, region: &str) -> Result<Vec<DiskSummary>>;

    /// プライマリディスクの非同期レプリケーションを開始し、操作の完了まで待機
    ///
    /// # Arguments
    ///
    /// * `secondary_disk_path` - `projects/{p}/zones/{z}/disks/{d}` 形式のセカンダリディスク
    async fn start_async_replication(
        &self,
        project_id: &str,
        primary_zone: &str,
        primary_disk: &str,
        secondary_disk_path: &str,
    ) -> Result<()>;
}
