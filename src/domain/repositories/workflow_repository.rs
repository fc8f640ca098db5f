//! # Workflow Repository Traits
//!
//! ワークフロー定義と実行の操作を抽象化

use anyhow::Result;
use async_trait::async_trait;

#[cfg(test)]
use mockall::automock;

use crate::domain::entities::workflow::{WorkflowExecution, WorkflowState};

/// ワークフロー定義リポジトリ
#[cfg_attr(test, automock)]
#[async_trait]
pub trait WorkflowRepository: Send + Sync {
    /// ワークフローの作成を要求（作成完了は待たない）
    async fn create_workflow(
        &self,
        project_id: &str,
        location_id: &str,
        workflow_id: &str,
        source_contents: &str,
    ) -> Result<()>;

    /// ワークフローの現在の状態
    async fn get_workflow_state(&self, workflow_name: &str) -> Result<WorkflowState>;

    async fn delete_workflow(&self, workflow_name: &str) -> Result<()>;
}

/// 実行リポジトリ
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ExecutionRepository: Send + Sync {
    /// 実行を開始（`argument` はJSON文字列）
    async fn create_execution(
        &self,
        workflow_name: &str,
        argument: Option<String>,
    ) -> Result<WorkflowExecution>;

    async fn get_execution(&self, execution_name: &str) -> Result<WorkflowExecution>;
}
