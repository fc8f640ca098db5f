//! Workflows Repository Implementation

use anyhow::{Context, Result};
use async_trait::async_trait;
use google_cloud_auth::credentials::Credentials;
use google_cloud_lro::Poller;
use google_cloud_workflows_executions_v1::client::Executions;
use google_cloud_workflows_executions_v1::model::Execution;
use google_cloud_workflows_v1::client::Workflows;
use google_cloud_workflows_v1::model::Workflow;
use log::{debug, info};

use crate::adapter::workflows::models::{execution_elapsed, workflow_execution, workflow_state};
use crate::domain::entities::workflow::{location_path, WorkflowExecution, WorkflowState};
use crate::domain::repositories::workflow_repository::{ExecutionRepository, WorkflowRepository};

/// Workflows / Executions リポジトリ
pub struct CloudWorkflowsRepository {
    workflows: Workflows,
    executions: Executions,
}

impl CloudWorkflowsRepository {
    pub fn new(workflows: Workflows, executions: Executions) -> Self {
        Self {
            workflows,
            executions,
        }
    }

    pub async fn connect(credentials: Option<Credentials>) -> Result<Self> {
        let mut workflows = Workflows::builder();
        let mut executions = Executions::builder();
        if let Some(credentials) = credentials {
            workflows = workflows.with_credentials(credentials.clone());
            executions = executions.with_credentials(credentials);
        }

        let workflows = workflows
            .build()
            .await
            .context("Failed to create Workflows client")?;
        let executions = executions
            .build()
            .await
            .context("Failed to create Executions client")?;

        Ok(Self::new(workflows, executions))
    }
}

#[cfg_attr(coverage_nightly, coverage(off))]
#[async_trait]
impl WorkflowRepository for CloudWorkflowsRepository {
    async fn create_workflow(
        &self,
        project_id: &str,
        location_id: &str,
        workflow_id: &str,
        source_contents: &str,
    ) -> Result<()> {
        // 完了は呼び出し側が状態をポーリングして確認する
        self.workflows
            .create_workflow()
            .set_parent(location_path(project_id, location_id))
            .set_workflow(Workflow::new().set_source_contents(source_contents))
            .set_workflow_id(workflow_id)
            .send()
            .await
            .with_context(|| format!("Failed to create workflow {}", workflow_id))?;

        info!("Requested creation of workflow {}", workflow_id);
        Ok(())
    }

    async fn get_workflow_state(&self, workflow_name: &str) -> Result<WorkflowState> {
        let workflow = self
            .workflows
            .get_workflow()
            .set_name(workflow_name)
            .send()
            .await
            .with_context(|| format!("Failed to get workflow {}", workflow_name))?;

        Ok(workflow_state(&workflow))
    }

    async fn delete_workflow(&self, workflow_name: &str) -> Result<()> {
        self.workflows
            .delete_workflow()
            .set_name(workflow_name)
            .poller()
            .until_done()
            .await
            .with_context(|| format!("Failed to delete workflow {}", workflow_name))?;

        Ok(())
    }
}

#[cfg_attr(coverage_nightly, coverage(off))]
#[async_trait]
impl ExecutionRepository for CloudWorkflowsRepository {
    async fn create_execution(
        &self,
        workflow_name: &str,
        argument: Option<String>,
    ) -> Result<WorkflowExecution> {
        let mut execution = Execution::new();
        if let Some(argument) = argument {
            execution = execution.set_argument(argument);
        }

        let execution = self
            .executions
            .create_execution()
            .set_parent(workflow_name)
            .set_execution(execution)
            .send()
            .await
            .with_context(|| format!("Failed to execute workflow {}", workflow_name))?;

        debug!("Execution created: {}", execution.name);
        Ok(workflow_execution(&execution))
    }

    async fn get_execution(&self, execution_name: &str) -> Result<WorkflowExecution> {
        let execution = self
            .executions
            .get_execution()
            .set_name(execution_name)
            .send()
            .await
            .with_context(|| format!("Failed to get execution {}", execution_name))?;

        if let Some(elapsed) = execution_elapsed(&execution) {
            debug!(
                "Execution {} ran for {}ms",
                execution_name,
                elapsed.num_milliseconds()
            );
        }
        Ok(workflow_execution(&execution))
    }
}
