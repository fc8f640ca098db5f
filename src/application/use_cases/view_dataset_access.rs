//! # View Dataset Access Use Case

use std::io::Write;
use std::sync::Arc;

use anyhow::{Context, Result};

use super::report::write_dataset_access;
use crate::domain::entities::access::DatasetAccess;
use crate::domain::repositories::bigquery_repository::DatasetAccessRepository;

/// データセットACL表示ユースケース
pub struct ViewDatasetAccessUseCase<R: DatasetAccessRepository> {
    repository: Arc<R>,
}

impl<R: DatasetAccessRepository> ViewDatasetAccessUseCase<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    pub async fn execute<W: Write + Send + ?Sized>(
        &self,
        w: &mut W,
        project_id: &str,
        dataset_id: &str,
    ) -> Result<DatasetAccess> {
        let access = self
            .repository
            .get_access(project_id, dataset_id)
            .await
            .with_context(|| format!("Failed to read metadata of dataset {}", dataset_id))?;

        write_dataset_access(w, dataset_id, &access)?;
        Ok(access)
    }
}
