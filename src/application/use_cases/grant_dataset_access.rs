//! # Grant Dataset Access Use Case
//!
//! データセットのACLにエントリを追加するユースケース

use std::io::Write;
use std::sync::Arc;

use anyhow::{Context, Result};
use log::info;

use super::report::write_dataset_access;
use crate::application::dto::access_change::AccessGrant;
use crate::domain::entities::access::DatasetAccess;
use crate::domain::repositories::bigquery_repository::DatasetAccessRepository;

/// データセットアクセス付与ユースケース
///
/// メタデータを読み込み、既存のACLにエントリを追加して、
/// 読み込み時のetagを使って更新する
pub struct GrantDatasetAccessUseCase<R: DatasetAccessRepository> {
    repository: Arc<R>,
}

impl<R: DatasetAccessRepository> GrantDatasetAccessUseCase<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// アクセスを付与して更新後のACLを出力
    ///
    /// # Errors
    ///
    /// メタデータの取得・更新に失敗した場合、または読み込み以降に
    /// データセットが変更されていた場合にエラーを返す
    pub async fn execute<W: Write + Send + ?Sized>(
        &self,
        w: &mut W,
        project_id: &str,
        dataset_id: &str,
        grant: &AccessGrant,
    ) -> Result<DatasetAccess> {
        let access = self
            .repository
            .get_access(project_id, dataset_id)
            .await
            .with_context(|| format!("Failed to read metadata of dataset {}", dataset_id))?;

        let entries = access.with_entry(grant.to_entry());

        let updated = self
            .repository
            .update_access(project_id, dataset_id, entries, &access.etag)
            .await
            .with_context(|| format!("Failed to update access of dataset {}", dataset_id))?;

        info!(
            "Granted {} to {} on dataset {}",
            grant.role, grant.entity, dataset_id
        );

        write_dataset_access(w, dataset_id, &updated)?;
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::access::{AccessEntry, AccessRole, EntityType};
    use crate::domain::error::SnippetError;
    use crate::domain::repositories::bigquery_repository::MockDatasetAccessRepository;

    fn owner_only() -> DatasetAccess {
        DatasetAccess::new(
            "my_dataset",
            vec![AccessEntry::new(
                AccessRole::Owner,
                EntityType::SpecialGroup,
                "projectOwners",
            )],
            "etag-1",
        )
    }

    #[tokio::test]
    async fn test_grant_appends_entry_with_read_etag() {
        let mut mock = MockDatasetAccessRepository::new();
        mock.expect_get_access()
            .times(1)
            .returning(|_, _| Ok(owner_only()));
        mock.expect_update_access()
            .withf(|_, _, entries, etag| entries.len() == 2 && etag.to_string() == "etag-1")
            .times(1)
            .returning(|_, dataset, entries, _| Ok(DatasetAccess::new(dataset, entries, "etag-2")));

        let use_case = GrantDatasetAccessUseCase::new(Arc::new(mock));
        let mut buf = Vec::new();

        let updated = use_case
            .execute(&mut buf, "my-project", "my_dataset", &AccessGrant::default())
            .await
            .unwrap();

        assert!(updated.contains(
            &AccessRole::Reader,
            EntityType::GroupEmail,
            "example-analyst-group@google.com"
        ));
        let output = String::from_utf8(buf).unwrap();
        assert!(output.contains("Details for Access entries in dataset my_dataset."));
        assert!(output.contains("Role READER : example-analyst-group@google.com"));
        assert!(output.contains("Role OWNER : projectOwners"));
    }

    #[tokio::test]
    async fn test_grant_metadata_error() {
        let mut mock = MockDatasetAccessRepository::new();
        mock.expect_get_access()
            .returning(|_, _| Err(anyhow::anyhow!("404 Not found: Dataset")));
        mock.expect_update_access().times(0);

        let use_case = GrantDatasetAccessUseCase::new(Arc::new(mock));
        let mut buf = Vec::new();

        let err = use_case
            .execute(&mut buf, "my-project", "missing", &AccessGrant::default())
            .await
            .unwrap_err();

        assert!(format!("{:#}", err).contains("Failed to read metadata of dataset missing"));
        assert!(buf.is_empty());
    }

    #[tokio::test]
    async fn test_grant_concurrent_modification() {
        let mut mock = MockDatasetAccessRepository::new();
        mock.expect_get_access().returning(|_, _| Ok(owner_only()));
        mock.expect_update_access().returning(|_, dataset, _, etag| {
            Err(SnippetError::ConcurrentModification {
                resource: format!("dataset {}", dataset),
                expected: etag.to_string(),
            }
            .into())
        });

        let use_case = GrantDatasetAccessUseCase::new(Arc::new(mock));
        let mut buf = Vec::new();

        let err = use_case
            .execute(&mut buf, "my-project", "my_dataset", &AccessGrant::default())
            .await
            .unwrap_err();

        assert!(err
            .chain()
            .any(|cause| cause.downcast_ref::<SnippetError>().is_some()));
    }
}
