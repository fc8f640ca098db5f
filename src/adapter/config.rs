//! Configuration
//!
//! JSON設定ファイルの読み込み

use std::fs;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::domain::services::polling::PollSettings;

fn default_region() -> String {
    "europe-west4".to_string()
}

fn default_zone() -> String {
    "europe-west4-b".to_string()
}

fn default_location() -> String {
    "us-central1".to_string()
}

fn default_poll_interval_secs() -> u64 {
    1
}

fn default_workflow_ready_timeout_secs() -> u64 {
    5 * 60
}

fn default_execution_timeout_secs() -> u64 {
    10 * 60
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub project_id: String,

    // Compute Engine
    #[serde(default = "default_region")]
    pub region: String,
    #[serde(default = "default_zone")]
    pub zone: String,

    // Workflows
    #[serde(default = "default_location")]
    pub location: String,

    // Authentication (Application Default Credentials when unset)
    #[serde(default)]
    pub service_account_key_path: Option<String>,

    // Polling
    #[serde(default = "default_poll_interval_secs")]
    pub poll_interval_secs: u64,
    #[serde(default = "default_workflow_ready_timeout_secs")]
    pub workflow_ready_timeout_secs: u64,
    #[serde(default = "default_execution_timeout_secs")]
    pub execution_timeout_secs: u64,
}

impl Config {
    pub fn load(path: &str) -> Result<Self> {
        let content =
            fs::read_to_string(path).with_context(|| format!("Failed to read config {}", path))?;
        let config: Config = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config {}", path))?;
        Ok(config)
    }

    /// Config with defaults for everything except the project
    pub fn for_project(project_id: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            region: default_region(),
            zone: default_zone(),
            location: default_location(),
            service_account_key_path: None,
            poll_interval_secs: default_poll_interval_secs(),
            workflow_ready_timeout_secs: default_workflow_ready_timeout_secs(),
            execution_timeout_secs: default_execution_timeout_secs(),
        }
    }

    /// Settings for waiting on a workflow to become ACTIVE
    pub fn workflow_poll_settings(&self) -> PollSettings {
        PollSettings {
            interval: Duration::from_secs(self.poll_interval_secs),
            timeout: Duration::from_secs(self.workflow_ready_timeout_secs),
        }
    }

    pub fn execution_timeout(&self) -> Duration {
        Duration::from_secs(self.execution_timeout_secs)
    }
}
