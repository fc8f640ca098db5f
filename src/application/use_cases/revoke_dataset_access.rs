//! # Revoke Dataset Access Use Case
//!
//! データセットのACLから entity のエントリを取り除く

use std::io::Write;
use std::sync::Arc;

use anyhow::{Context, Result};
use log::info;

use super::report::write_dataset_access;
use crate::domain::entities::access::DatasetAccess;
use crate::domain::repositories::bigquery_repository::DatasetAccessRepository;

/// データセットアクセス取り消しユースケース
pub struct RevokeDatasetAccessUseCase<R: DatasetAccessRepository> {
    repository: Arc<R>,
}

impl<R: DatasetAccessRepository> RevokeDatasetAccessUseCase<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    pub async fn execute<W: Write + Send + ?Sized>(
        &self,
        w: &mut W,
        project_id: &str,
        dataset_id: &str,
        entity: &str,
    ) -> Result<DatasetAccess> {
        let access = self
            .repository
            .get_access(project_id, dataset_id)
            .await
            .with_context(|| format!("Failed to read metadata of dataset {}", dataset_id))?;

        let entries = access.without_entity(entity);
        let removed = access.entries.len() - entries.len();

        let updated = self
            .repository
            .update_access(project_id, dataset_id, entries, &access.etag)
            .await
            .with_context(|| format!("Failed to update access of dataset {}", dataset_id))?;

        info!(
            "Removed {} access entries for {} from dataset {}",
            removed, entity, dataset_id
        );

        write_dataset_access(w, dataset_id, &updated)?;
        Ok(updated)
    }
}
