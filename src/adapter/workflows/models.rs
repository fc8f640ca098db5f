//! Workflows model conversions

use chrono::{DateTime, Utc};
use google_cloud_wkt::Timestamp;
use google_cloud_workflows_executions_v1::model::{execution, Execution};
use google_cloud_workflows_v1::model::{workflow, Workflow};

use crate::domain::entities::workflow::{ExecutionState, WorkflowExecution, WorkflowState};

pub fn workflow_state(workflow: &Workflow) -> WorkflowState {
    match workflow.state {
        workflow::State::Active => WorkflowState::Active,
        workflow::State::Unavailable => WorkflowState::Unavailable,
        _ => WorkflowState::Unspecified,
    }
}

fn execution_state(state: &execution::State) -> ExecutionState {
    match state {
        execution::State::Queued => ExecutionState::Queued,
        execution::State::Active => ExecutionState::Active,
        execution::State::Succeeded => ExecutionState::Succeeded,
        execution::State::Failed => ExecutionState::Failed,
        execution::State::Cancelled => ExecutionState::Cancelled,
        execution::State::Unavailable => ExecutionState::Unavailable,
        _ => ExecutionState::Unspecified,
    }
}

/// `payload (context)`、どちらも空なら None
fn error_message(error: &execution::Error) -> Option<String> {
    match (error.payload.as_str(), error.context.as_str()) {
        ("", "") => None,
        (payload, "") => Some(payload.to_string()),
        ("", context) => Some(context.to_string()),
        (payload, context) => Some(format!("{} ({})", payload, context)),
    }
}

pub fn workflow_execution(execution: &Execution) -> WorkflowExecution {
    WorkflowExecution {
        name: execution.name.clone(),
        state: execution_state(&execution.state),
        result: execution.result.clone(),
        error: execution.error.as_ref().and_then(error_message),
    }
}

fn to_datetime(timestamp: &Timestamp) -> Option<DateTime<Utc>> {
    let nanos = u32::try_from(timestamp.nanos()).ok()?;
    DateTime::from_timestamp(timestamp.seconds(), nanos)
}

/// 終了済みの実行の所要時間
pub fn execution_elapsed(execution: &Execution) -> Option<chrono::Duration> {
    let start = to_datetime(execution.start_time.as_ref()?)?;
    let end = to_datetime(execution.end_time.as_ref()?)?;
    Some(end - start)
}
