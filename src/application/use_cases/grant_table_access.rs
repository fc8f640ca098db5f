//! # Grant Table Access Use Case
//!
//! テーブル/ビューのIAMポリシーにメンバーを追加する

use std::io::Write;
use std::sync::Arc;

use anyhow::{Context, Result};
use log::info;

use super::report::write_table_policy;
use crate::application::dto::access_change::MemberChange;
use crate::domain::entities::iam_policy::IamPolicy;
use crate::domain::repositories::bigquery_repository::TableIamRepository;

/// テーブル/ビューアクセス付与ユースケース
pub struct GrantTableAccessUseCase<R: TableIamRepository> {
    repository: Arc<R>,
}

impl<R: TableIamRepository> GrantTableAccessUseCase<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    pub async fn execute<W: Write + Send + ?Sized>(
        &self,
        w: &mut W,
        project_id: &str,
        dataset_id: &str,
        resource_id: &str,
        change: &MemberChange,
    ) -> Result<IamPolicy> {
        let mut policy = self
            .repository
            .get_policy(project_id, dataset_id, resource_id)
            .await
            .with_context(|| format!("Failed to get IAM policy of {}", resource_id))?;

        policy.add(&change.member, &change.role);

        let updated = self
            .repository
            .set_policy(project_id, dataset_id, resource_id, policy)
            .await
            .with_context(|| format!("Failed to set IAM policy of {}", resource_id))?;

        info!("Granted {} to {} on {}", change.role, change.member, resource_id);

        write_table_policy(w, resource_id, &updated)?;
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::bigquery_repository::MockTableIamRepository;

    #[tokio::test]
    async fn test_grant_adds_member() {
        let mut mock = MockTableIamRepository::new();
        mock.expect_get_policy()
            .returning(|_, _, _| Ok(IamPolicy::default()));
        mock.expect_set_policy()
            .withf(|_, _, _, policy| {
                policy.has_member("group:example-analyst-group@google.com")
            })
            .times(1)
            .returning(|_, _, _, policy| Ok(policy));

        let use_case = GrantTableAccessUseCase::new(Arc::new(mock));
        let mut buf = Vec::new();

        use_case
            .execute(
                &mut buf,
                "my-project",
                "my_dataset",
                "my_table",
                &MemberChange::default(),
            )
            .await
            .unwrap();

        let output = String::from_utf8(buf).unwrap();
        assert!(output.contains("Details for Access entries in table or view my_table."));
        assert!(output.contains("Role: roles/viewer"));
        assert!(output.contains("group:example-analyst-group@google.com"));
    }
}
