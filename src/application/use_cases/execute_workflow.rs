//! # Execute Workflow Use Case
//!
//! ワークフローを実行し、終了するまで待って結果を出力する

use std::io::Write;
use std::sync::Arc;

use anyhow::{Context, Result};
use log::info;
use tokio::time::sleep;

use crate::application::dto::execution_options::ExecutionOptions;
use crate::domain::entities::workflow::{workflow_path, WorkflowExecution};
use crate::domain::repositories::workflow_repository::ExecutionRepository;

/// ワークフロー実行ユースケース
pub struct ExecuteWorkflowUseCase<R: ExecutionRepository> {
    repository: Arc<R>,
}

impl<R: ExecutionRepository> ExecuteWorkflowUseCase<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// 実行を作成し、状態が終了になるまで指数バックオフで取得を繰り返す
    ///
    /// 失敗した実行もエラーにはせず、状態と結果を出力して返す
    pub async fn execute<W: Write + Send + ?Sized>(
        &self,
        w: &mut W,
        project_id: &str,
        workflow_id: &str,
        location_id: &str,
        options: &ExecutionOptions,
    ) -> Result<WorkflowExecution> {
        let workflow_name = workflow_path(project_id, location_id, workflow_id);

        let created = self
            .repository
            .create_execution(&workflow_name, options.argument.clone())
            .await
            .with_context(|| format!("Failed to create execution of {}", workflow_id))?;
        writeln!(w, "Created execution: {}", created.name)?;

        let mut attempt = 0;
        let execution = loop {
            let execution = self
                .repository
                .get_execution(&created.name)
                .await
                .with_context(|| format!("Failed to get execution {}", created.name))?;
            if execution.state.is_finished() {
                break execution;
            }

            attempt += 1;
            let delay = options.backoff.delay(attempt);
            writeln!(w, "- Waiting {}s for results...", delay.as_secs())?;
            sleep(delay).await;
        };

        info!("Execution {} finished: {}", execution.name, execution.state);

        writeln!(w, "Execution finished with state: {}", execution.state)?;
        if let Some(error) = &execution.error {
            writeln!(w, "Execution error: {}", error)?;
        }
        writeln!(w, "Execution results: {}", execution.result)?;
        Ok(execution)
    }
}
