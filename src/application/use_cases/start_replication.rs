//! # Start Replication Use Case
//!
//! プライマリディスクからセカンダリディスクへの非同期レプリケーションを開始する

use std::io::Write;
use std::sync::Arc;

use anyhow::{Context, Result};
use log::info;

use crate::domain::entities::disk::zonal_disk_path;
use crate::domain::repositories::disk_repository::DiskRepository;

/// レプリケーション開始ユースケース
pub struct StartReplicationUseCase<R: DiskRepository> {
    repository: Arc<R>,
}

impl<R: DiskRepository> StartReplicationUseCase<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// # Arguments
    ///
    /// * `zone` / `disk_name` - セカンダリディスク
    /// * `primary_zone` / `primary_disk_name` - プライマリディスク
    pub async fn execute<W: Write + Send + ?Sized>(
        &self,
        w: &mut W,
        project_id: &str,
        zone: &str,
        disk_name: &str,
        primary_disk_name: &str,
        primary_zone: &str,
    ) -> Result<()> {
        let secondary = zonal_disk_path(project_id, zone, disk_name);

        info!(
            "Starting replication {}/{} -> {}",
            primary_zone, primary_disk_name, secondary
        );

        self.repository
            .start_async_replication(project_id, primary_zone, primary_disk_name, &secondary)
            .await
            .context("Unable to start disk replication")?;

        writeln!(w, "Replication started")?;
        Ok(())
    }
}
