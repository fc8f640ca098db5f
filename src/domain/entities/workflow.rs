//! # Workflow Entities
//!
//! Workflows のワークフロー定義と実行

use std::fmt;

/// ワークフロー定義の状態
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkflowState {
    Unspecified,
    Active,
    Unavailable,
}

impl WorkflowState {
    /// APIの状態名から変換（未知の値は Unspecified）
    pub fn parse(state: &str) -> Self {
        match state {
            "ACTIVE" => WorkflowState::Active,
            "UNAVAILABLE" => WorkflowState::Unavailable,
            _ => WorkflowState::Unspecified,
        }
    }
}

impl fmt::Display for WorkflowState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            WorkflowState::Unspecified => "STATE_UNSPECIFIED",
            WorkflowState::Active => "ACTIVE",
            WorkflowState::Unavailable => "UNAVAILABLE",
        };
        f.write_str(name)
    }
}

/// 実行の状態
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionState {
    Unspecified,
    Queued,
    Active,
    Succeeded,
    Failed,
    Cancelled,
    Unavailable,
}

impl ExecutionState {
    pub fn parse(state: &str) -> Self {
        match state {
            "QUEUED" => ExecutionState::Queued,
            "ACTIVE" => ExecutionState::Active,
            "SUCCEEDED" => ExecutionState::Succeeded,
            "FAILED" => ExecutionState::Failed,
            "CANCELLED" => ExecutionState::Cancelled,
            "UNAVAILABLE" => ExecutionState::Unavailable,
            _ => ExecutionState::Unspecified,
        }
    }

    /// 実行が終了しているか（待機を続ける必要がないか）
    pub fn is_finished(&self) -> bool {
        !matches!(self, ExecutionState::Active | ExecutionState::Queued)
    }
}

impl fmt::Display for ExecutionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ExecutionState::Unspecified => "STATE_UNSPECIFIED",
            ExecutionState::Queued => "QUEUED",
            ExecutionState::Active => "ACTIVE",
            ExecutionState::Succeeded => "SUCCEEDED",
            ExecutionState::Failed => "FAILED",
            ExecutionState::Cancelled => "CANCELLED",
            ExecutionState::Unavailable => "UNAVAILABLE",
        };
        f.write_str(name)
    }
}

/// ワークフローの実行
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkflowExecution {
    pub name: String,
    pub state: ExecutionState,
    /// 成功時の結果（JSON文字列）
    pub result: String,
    /// 失敗時のエラーペイロード
    pub error: Option<String>,
}

/// `projects/{project}/locations/{location}`
pub fn location_path(project_id: &str, location_id: &str) -> String {
    format!("projects/{}/locations/{}", project_id, location_id)
}

/// `projects/{project}/locations/{location}/workflows/{workflow}`
pub fn workflow_path(project_id: &str, location_id: &str, workflow_id: &str) -> String {
    format!(
        "{}/workflows/{}",
        location_path(project_id, location_id),
        workflow_id
    )
}
