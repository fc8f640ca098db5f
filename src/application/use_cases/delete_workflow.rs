//! # Delete Workflow Use Case

use std::io::Write;
use std::sync::Arc;

use anyhow::{Context, Result};

use crate::domain::entities::workflow::workflow_path;
use crate::domain::repositories::workflow_repository::WorkflowRepository;

/// ワークフロー削除ユースケース
pub struct DeleteWorkflowUseCase<R: WorkflowRepository> {
    repository: Arc<R>,
}

impl<R: WorkflowRepository> DeleteWorkflowUseCase<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    pub async fn execute<W: Write + Send + ?Sized>(
        &self,
        w: &mut W,
        project_id: &str,
        location_id: &str,
        workflow_id: &str,
    ) -> Result<()> {
        let name = workflow_path(project_id, location_id, workflow_id);

        self.repository
            .delete_workflow(&name)
            .await
            .with_context(|| format!("Failed to delete workflow {}", workflow_id))?;

        writeln!(w, "Workflow {} deleted", name)?;
        Ok(())
    }
}
