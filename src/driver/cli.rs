//! CLI Argument Parsing
//!
//! CLIの引数解析

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use log::debug;

use crate::adapter::config::Config;
use crate::application::dto::access_change::EXAMPLE_ANALYST_GROUP;
use crate::domain::entities::access::{AccessRole, EntityType};
use crate::domain::entities::iam_policy::VIEWER_ROLE;

/// BigQuery / Compute Engine / Workflows のスニペットを実行するCLI
#[derive(Parser, Debug, Clone)]
#[command(name = "gcsnip")]
#[command(about = "Run Google Cloud access, disk and workflow snippets", long_about = None)]
pub struct Args {
    /// Config file path
    #[arg(short, long, default_value = "./.gcsnip/config.json")]
    pub config: String,

    /// Project ID (overrides the config file)
    #[arg(long, global = true)]
    pub project: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Append an entry to a dataset's access list
    GrantDatasetAccess {
        dataset_id: String,
        /// READER, WRITER, OWNER or an IAM role
        #[arg(long, default_value = "READER", value_parser = parse_role)]
        role: AccessRole,
        /// user, group, domain, special-group, iam-member or view
        #[arg(long, default_value = "group", value_parser = parse_entity_type)]
        entity_type: EntityType,
        #[arg(long, default_value = EXAMPLE_ANALYST_GROUP)]
        entity: String,
    },

    /// Remove every access entry of an entity from a dataset
    RevokeDatasetAccess {
        dataset_id: String,
        #[arg(long, default_value = EXAMPLE_ANALYST_GROUP)]
        entity: String,
    },

    /// Print a dataset's access list
    ViewDatasetAccess { dataset_id: String },

    /// Add a member to a role on a table or view
    GrantTableAccess {
        dataset_id: String,
        resource_id: String,
        #[arg(long, default_value = "group:example-analyst-group@google.com")]
        member: String,
        #[arg(long, default_value = VIEWER_ROLE)]
        role: String,
    },

    /// Remove a member from a role on a table or view
    RevokeTableAccess {
        dataset_id: String,
        resource_id: String,
        #[arg(long, default_value = "group:example-analyst-group@google.com")]
        member: String,
        #[arg(long, default_value = VIEWER_ROLE)]
        role: String,
    },

    /// Print the IAM policy of a table or view
    ViewTableAccess {
        dataset_id: String,
        resource_id: String,
    },

    /// List the regional disks that belong to a consistency group
    ListConsistencyGroup {
        group_name: String,
        /// Region (defaults to the config file)
        #[arg(long)]
        region: Option<String>,
    },

    /// Start asynchronous replication from a primary disk to a secondary disk
    StartReplication {
        /// Secondary disk
        disk_name: String,
        primary_disk_name: String,
        primary_zone: String,
        /// Zone of the secondary disk (defaults to the config file)
        #[arg(long)]
        zone: Option<String>,
    },

    /// Create a workflow and wait until it is ACTIVE
    CreateWorkflow {
        workflow_id: String,
        /// Workflow source (YAML or JSON)
        source: PathBuf,
        #[arg(long)]
        location: Option<String>,
    },

    /// Execute a workflow and wait for its result
    ExecuteWorkflow {
        workflow_id: String,
        #[arg(long)]
        location: Option<String>,
        /// Execution argument as a JSON string
        #[arg(long)]
        argument: Option<String>,
        /// Give up waiting after this many seconds (defaults to the config file)
        #[arg(long)]
        timeout_secs: Option<u64>,
        /// Abort the execution poller when the deadline elapses
        #[arg(long)]
        abort_on_deadline: bool,
    },

    /// Delete a workflow
    DeleteWorkflow {
        workflow_id: String,
        #[arg(long)]
        location: Option<String>,
    },
}

fn parse_role(value: &str) -> Result<AccessRole, String> {
    if value.is_empty() {
        return Err("role must not be empty".to_string());
    }
    Ok(AccessRole::parse(value))
}

fn parse_entity_type(value: &str) -> Result<EntityType, String> {
    EntityType::parse(value).ok_or_else(|| format!("unknown entity type: {}", value))
}

impl Args {
    /// 設定ファイルを読み込み、`--project` で上書きする
    ///
    /// 設定ファイルが読めなくても `--project` があればデフォルト設定で続行する
    pub fn load_config(&self) -> Result<Config> {
        match (Config::load(&self.config), &self.project) {
            (Ok(mut config), Some(project)) => {
                config.project_id = project.clone();
                Ok(config)
            }
            (Ok(config), None) => Ok(config),
            (Err(e), Some(project)) => {
                debug!("Using defaults for project {}: {:#}", project, e);
                Ok(Config::for_project(project.clone()))
            }
            (Err(e), None) => Err(e),
        }
    }
}
