//! # View Table Access Use Case

use std::io::Write;
use std::sync::Arc;

use anyhow::{Context, Result};

use super::report::write_table_policy;
use crate::domain::entities::iam_policy::IamPolicy;
use crate::domain::repositories::bigquery_repository::TableIamRepository;

/// テーブル/ビューのIAMポリシー表示ユースケース
pub struct ViewTableAccessUseCase<R: TableIamRepository> {
    repository: Arc<R>,
}

impl<R: TableIamRepository> ViewTableAccessUseCase<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    pub async fn execute<W: Write + Send + ?Sized>(
        &self,
        w: &mut W,
        project_id: &str,
        dataset_id: &str,
        resource_id: &str,
    ) -> Result<IamPolicy> {
        let policy = self
            .repository
            .get_policy(project_id, dataset_id, resource_id)
            .await
            .with_context(|| format!("Failed to get IAM policy of {}", resource_id))?;

        write_table_policy(w, resource_id, &policy)?;
        Ok(policy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::bigquery_repository::MockTableIamRepository;

    #[tokio::test]
    async fn test_view_empty_policy_prints_header() {
        let mut mock = MockTableIamRepository::new();
        mock.expect_get_policy()
            .returning(|_, _, _| Ok(IamPolicy::default()));
        mock.expect_set_policy().times(0);

        let use_case = ViewTableAccessUseCase::new(Arc::new(mock));
        let mut buf = Vec::new();

        use_case
            .execute(&mut buf, "my-project", "my_dataset", "my_table")
            .await
            .unwrap();

        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "Details for Access entries in table or view my_table.\n"
        );
    }
}
