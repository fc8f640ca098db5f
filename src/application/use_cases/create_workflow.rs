//! # Create Workflow Use Case
//!
//! ワークフローを作成し、ACTIVE になるまでポーリングする

use std::io::Write;
use std::sync::Arc;

use anyhow::{Context, Result};
use log::info;

use crate::domain::entities::workflow::{workflow_path, WorkflowState};
use crate::domain::repositories::workflow_repository::WorkflowRepository;
use crate::domain::services::polling::{poll_until, PollSettings};

/// ワークフロー作成ユースケース
pub struct CreateWorkflowUseCase<R: WorkflowRepository> {
    repository: Arc<R>,
}

impl<R: WorkflowRepository> CreateWorkflowUseCase<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// ワークフローを作成して ACTIVE になるまで待つ
    ///
    /// # Returns
    ///
    /// ワークフローの完全なリソース名
    ///
    /// # Errors
    ///
    /// 作成・取得に失敗した場合、または `settings.timeout` 以内に
    /// ACTIVE にならなかった場合（`SnippetError::DeadlineExceeded`）
    pub async fn execute<W: Write + Send + ?Sized>(
        &self,
        w: &mut W,
        project_id: &str,
        location_id: &str,
        workflow_id: &str,
        source_contents: &str,
        settings: PollSettings,
    ) -> Result<String> {
        let name = workflow_path(project_id, location_id, workflow_id);

        self.repository
            .create_workflow(project_id, location_id, workflow_id, source_contents)
            .await
            .with_context(|| format!("Failed to create workflow {}", workflow_id))?;

        info!("Waiting for workflow {} to become ACTIVE", name);

        let repository = &self.repository;
        let workflow_name = name.as_str();
        poll_until(
            move || repository.get_workflow_state(workflow_name),
            WorkflowState::Active,
            settings,
        )
        .await
        .with_context(|| format!("Workflow {} did not become ACTIVE", workflow_id))?;

        writeln!(w, "Workflow {} is {}", name, WorkflowState::Active)?;
        Ok(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::error::is_deadline_exceeded;
    use crate::domain::repositories::workflow_repository::MockWorkflowRepository;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::time::Duration;

    fn fast(timeout_ms: u64) -> PollSettings {
        PollSettings {
            interval: Duration::from_millis(1),
            timeout: Duration::from_millis(timeout_ms),
        }
    }

    #[tokio::test]
    async fn test_create_then_poll_until_active() {
        let calls = Arc::new(AtomicU32::new(0));
        let calls_clone = calls.clone();

        let mut mock = MockWorkflowRepository::new();
        mock.expect_create_workflow()
            .withf(|_, _, id, source| id.to_string() == "wf" && source.contains("returnOutput"))
            .times(1)
            .returning(|_, _, _, _| Ok(()));
        mock.expect_get_workflow_state()
            .withf(|name| name.to_string() == "projects/p/locations/us-central1/workflows/wf")
            .returning(move |_| {
                if calls_clone.fetch_add(1, Ordering::SeqCst) < 2 {
                    Ok(WorkflowState::Unspecified)
                } else {
                    Ok(WorkflowState::Active)
                }
            });

        let use_case = CreateWorkflowUseCase::new(Arc::new(mock));
        let mut buf = Vec::new();

        let name = use_case
            .execute(
                &mut buf,
                "p",
                "us-central1",
                "wf",
                "main:\n  steps:\n    - returnOutput:\n        return: ok\n",
                fast(5_000),
            )
            .await
            .unwrap();

        assert_eq!(name, "projects/p/locations/us-central1/workflows/wf");
        assert_eq!(calls.load(Ordering::SeqCst), 3);
        assert!(String::from_utf8(buf).unwrap().contains("is ACTIVE"));
    }

    #[tokio::test]
    async fn test_never_active_times_out() {
        let mut mock = MockWorkflowRepository::new();
        mock.expect_create_workflow().returning(|_, _, _, _| Ok(()));
        mock.expect_get_workflow_state()
            .returning(|_| Ok(WorkflowState::Unavailable));

        let use_case = CreateWorkflowUseCase::new(Arc::new(mock));
        let mut buf = Vec::new();

        let err = use_case
            .execute(&mut buf, "p", "us-central1", "wf", "main: {}", fast(30))
            .await
            .unwrap_err();

        assert!(is_deadline_exceeded(&err));
        assert!(buf.is_empty());
    }

    #[tokio::test]
    async fn test_create_failure_skips_polling() {
        let mut mock = MockWorkflowRepository::new();
        mock.expect_create_workflow()
            .returning(|_, _, _, _| Err(anyhow::anyhow!("409 already exists")));
        mock.expect_get_workflow_state().times(0);

        let use_case = CreateWorkflowUseCase::new(Arc::new(mock));
        let mut buf = Vec::new();

        let err = use_case
            .execute(&mut buf, "p", "us-central1", "wf", "main: {}", fast(30))
            .await
            .unwrap_err();

        assert!(!is_deadline_exceeded(&err));
        assert!(format!("{:#}", err).contains("Failed to create workflow wf"));
    }
}
