//! Compute Engine model conversions

use google_cloud_compute_v1::model::Disk;

use crate::domain::entities::disk::DiskSummary;

pub fn disk_summary(disk: &Disk) -> DiskSummary {
    DiskSummary::new(
        disk.name.clone().unwrap_or_default(),
        disk.resource_policies.clone(),
    )
}
