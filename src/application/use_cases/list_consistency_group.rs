//! # List Consistency Group Use Case
//!
//! リージョン内で整合性グループに属するディスクを列挙する

use std::io::Write;
use std::sync::Arc;

use anyhow::{Context, Result};
use log::debug;

use crate::domain::repositories::disk_repository::DiskRepository;

/// 整合性グループ一覧ユースケース
pub struct ListConsistencyGroupUseCase<R: DiskRepository> {
    repository: Arc<R>,
}

impl<R: DiskRepository> ListConsistencyGroupUseCase<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// リソースポリシーにグループ名を含むディスクを `- {name}` 形式で出力
    ///
    /// 一致したポリシーごとに1行出力し、出力したディスク名を返す
    pub async fn execute<W: Write + Send + ?Sized>(
        &self,
        w: &mut W,
        project_id: &str,
        region: &str,
        group_name: &str,
    ) -> Result<Vec<String>> {
        let disks = self
            .repository
            .list_region_disks(project_id, region)
            .await
            .with_context(|| format!("Failed to list disks in region {}", region))?;

        debug!("Scanning {} disks in {}", disks.len(), region);

        let mut listed = Vec::new();
        for disk in &disks {
            for _ in disk.matching_policies(group_name) {
                writeln!(w, "- {}", disk.name)?;
                listed.push(disk.name.clone());
            }
        }

        Ok(listed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::disk::DiskSummary;
    use crate::domain::repositories::disk_repository::MockDiskRepository;

    fn policy(name: &str) -> String {
        format!("projects/my-project/regions/europe-west4/resourcePolicies/{}", name)
    }

    #[tokio::test]
    async fn test_lists_only_group_members() {
        let mut mock = MockDiskRepository::new();
        mock.expect_list_region_disks().returning(|_, _| {
            Ok(vec![
                DiskSummary::new("disk-a", vec![policy("my-group")]),
                DiskSummary::new("disk-b", vec![policy("snapshot-schedule")]),
                DiskSummary::new("disk-c", vec![]),
                DiskSummary::new("disk-d", vec![policy("snapshot-schedule"), policy("my-group")]),
            ])
        });

        let use_case = ListConsistencyGroupUseCase::new(Arc::new(mock));
        let mut buf = Vec::new();

        let listed = use_case
            .execute(&mut buf, "my-project", "europe-west4", "my-group")
            .await
            .unwrap();

        assert_eq!(listed, vec!["disk-a", "disk-d"]);
        assert_eq!(String::from_utf8(buf).unwrap(), "- disk-a\n- disk-d\n");
    }

    #[tokio::test]
    async fn test_empty_region() {
        let mut mock = MockDiskRepository::new();
        mock.expect_list_region_disks().returning(|_, _| Ok(vec![]));

        let use_case = ListConsistencyGroupUseCase::new(Arc::new(mock));
        let mut buf = Vec::new();

        let listed = use_case
            .execute(&mut buf, "my-project", "europe-west4", "my-group")
            .await
            .unwrap();

        assert!(listed.is_empty());
        assert!(buf.is_empty());
    }

    #[tokio::test]
    async fn test_list_error_propagates() {
        let mut mock = MockDiskRepository::new();
        mock.expect_list_region_disks()
            .returning(|_, _| Err(anyhow::anyhow!("403 Forbidden")));

        let use_case = ListConsistencyGroupUseCase::new(Arc::new(mock));
        let mut buf = Vec::new();

        let err = use_case
            .execute(&mut buf, "my-project", "europe-west4", "my-group")
            .await
            .unwrap_err();

        assert!(format!("{:#}", err).contains("403 Forbidden"));
    }
}
