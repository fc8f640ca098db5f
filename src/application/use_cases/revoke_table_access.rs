//! # Revoke Table Access Use Case
//!
//! テーブル/ビューのIAMポリシーからメンバーを削除する

use std::io::Write;
use std::sync::Arc;

use anyhow::{Context, Result};
use log::{info, warn};

use super::report::write_table_policy;
use crate::application::dto::access_change::MemberChange;
use crate::domain::entities::iam_policy::IamPolicy;
use crate::domain::repositories::bigquery_repository::TableIamRepository;

/// テーブル/ビューアクセス取り消しユースケース
pub struct RevokeTableAccessUseCase<R: TableIamRepository> {
    repository: Arc<R>,
}

impl<R: TableIamRepository> RevokeTableAccessUseCase<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// メンバーをロールから外してポリシーを更新し、更新後のポリシーを出力
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

        if !policy.remove(&change.member, &change.role) {
            warn!(
                "{} had no {} binding on {}",
                change.member, change.role, resource_id
            );
        }

        let updated = self
            .repository
            .set_policy(project_id, dataset_id, resource_id, policy)
            .await
            .with_context(|| format!("Failed to set IAM policy of {}", resource_id))?;

        info!("Revoked {} from {} on {}", change.role, change.member, resource_id);

        write_table_policy(w, resource_id, &updated)?;
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::iam_policy::VIEWER_ROLE;
    use crate::domain::repositories::bigquery_repository::MockTableIamRepository;

    const ANALYST: &str = "group:example-analyst-group@google.com";

    fn policy_with_analyst() -> IamPolicy {
        let mut policy = IamPolicy::default();
        policy.add(ANALYST, VIEWER_ROLE);
        policy.add("user:owner@example.com", "roles/bigquery.dataOwner");
        policy
    }

    #[tokio::test]
    async fn test_revoke_removes_member() {
        let mut mock = MockTableIamRepository::new();
        mock.expect_get_policy()
            .returning(|_, _, _| Ok(policy_with_analyst()));
        mock.expect_set_policy()
            .withf(|_, _, _, policy| !policy.has_member(ANALYST))
            .times(1)
            .returning(|_, _, _, policy| Ok(policy));

        let use_case = RevokeTableAccessUseCase::new(Arc::new(mock));
        let mut buf = Vec::new();

        let updated = use_case
            .execute(
                &mut buf,
                "my-project",
                "my_dataset",
                "my_view",
                &MemberChange::default(),
            )
            .await
            .unwrap();

        assert!(!updated.has_member(ANALYST));
        let output = String::from_utf8(buf).unwrap();
        assert!(output.contains("Details for Access entries in table or view my_view."));
        assert!(!output.contains(ANALYST));
        assert!(output.contains("user:owner@example.com"));
    }

    #[tokio::test]
    async fn test_revoke_set_policy_error() {
        let mut mock = MockTableIamRepository::new();
        mock.expect_get_policy()
            .returning(|_, _, _| Ok(policy_with_analyst()));
        mock.expect_set_policy()
            .returning(|_, _, _, _| Err(anyhow::anyhow!("403 Permission denied")));

        let use_case = RevokeTableAccessUseCase::new(Arc::new(mock));
        let mut buf = Vec::new();

        let err = use_case
            .execute(
                &mut buf,
                "my-project",
                "my_dataset",
                "my_table",
                &MemberChange::default(),
            )
            .await
            .unwrap_err();

        assert!(format!("{:#}", err).contains("Failed to set IAM policy of my_table"));
        assert!(buf.is_empty());
    }
}
