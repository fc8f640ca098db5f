//! Compute Engine Disk Repository Implementation

use anyhow::{Context, Result};
use async_trait::async_trait;
use google_cloud_auth::credentials::Credentials;
use google_cloud_compute_v1::client::{Disks, RegionDisks};
use google_cloud_compute_v1::model::DisksStartAsyncReplicationRequest;
use google_cloud_gax::paginator::ItemPaginator;
use google_cloud_lro::Poller;
use log::{debug, info};

use crate::adapter::compute::models::disk_summary;
use crate::domain::entities::disk::DiskSummary;
use crate::domain::repositories::disk_repository::DiskRepository;

/// Compute Engine ディスクリポジトリ
pub struct ComputeDiskRepository {
    region_disks: RegionDisks,
    disks: Disks,
}

impl ComputeDiskRepository {
    pub fn new(region_disks: RegionDisks, disks: Disks) -> Self {
        Self {
            region_disks,
            disks,
        }
    }

    /// Builds both clients, with Application Default Credentials unless
    /// `credentials` is given
    pub async fn connect(credentials: Option<Credentials>) -> Result<Self> {
        let mut region_disks = RegionDisks::builder();
        let mut disks = Disks::builder();
        if let Some(credentials) = credentials {
            region_disks = region_disks.with_credentials(credentials.clone());
            disks = disks.with_credentials(credentials);
        }

        let region_disks = region_disks
            .build()
            .await
            .context("Failed to create RegionDisks client")?;
        let disks = disks.build().await.context("Failed to create Disks client")?;

        Ok(Self::new(region_disks, disks))
    }
}

#[cfg_attr(coverage_nightly, coverage(off))]
#[async_trait]
impl DiskRepository for ComputeDiskRepository {
    async fn list_region_disks(&self, project_id: &str, region: &str) -> Result<Vec<DiskSummary>> {
        let mut items = self
            .region_disks
            .list()
            .set_project(project_id)
            .set_region(region)
            .by_item();

        let mut disks = Vec::new();
        while let Some(disk) = items
            .next()
            .await
            .transpose()
            .with_context(|| format!("Failed to list disks in {}", region))?
        {
            disks.push(disk_summary(&disk));
        }

        debug!("Found {} disks in {}", disks.len(), region);
        Ok(disks)
    }

    async fn start_async_replication(
        &self,
        project_id: &str,
        primary_zone: &str,
        primary_disk: &str,
        secondary_disk_path: &str,
    ) -> Result<()> {
        info!(
            "Starting replication {} -> {}",
            primary_disk, secondary_disk_path
        );

        self.disks
            .start_async_replication()
            .set_project(project_id)
            .set_zone(primary_zone)
            .set_disk(primary_disk)
            .set_body(
                DisksStartAsyncReplicationRequest::new()
                    .set_async_secondary_disk(secondary_disk_path),
            )
            .poller()
            .until_done()
            .await
            .with_context(|| format!("Failed to start replication of {}", primary_disk))?
            .to_result()
            .with_context(|| format!("Replication of {} failed", primary_disk))?;

        Ok(())
    }
}
