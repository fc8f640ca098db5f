//! Snippet Runner
//!
//! 設定からクライアントを組み立て、サブコマンドに対応するユースケースを実行

use std::io::{self, Write};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use log::info;

use crate::adapter::auth::{create_bigquery_client, load_credentials};
use crate::adapter::config::Config;
use crate::adapter::repositories::{
    BigQueryAccessRepository, CloudWorkflowsRepository, ComputeDiskRepository,
};
use crate::application::dto::access_change::{AccessGrant, MemberChange};
use crate::application::dto::execution_options::ExecutionOptions;
use crate::application::use_cases::create_workflow::CreateWorkflowUseCase;
use crate::application::use_cases::delete_workflow::DeleteWorkflowUseCase;
use crate::application::use_cases::execute_workflow::ExecuteWorkflowUseCase;
use crate::application::use_cases::grant_dataset_access::GrantDatasetAccessUseCase;
use crate::application::use_cases::grant_table_access::GrantTableAccessUseCase;
use crate::application::use_cases::list_consistency_group::ListConsistencyGroupUseCase;
use crate::application::use_cases::revoke_dataset_access::RevokeDatasetAccessUseCase;
use crate::application::use_cases::revoke_table_access::RevokeTableAccessUseCase;
use crate::application::use_cases::start_replication::StartReplicationUseCase;
use crate::application::use_cases::view_dataset_access::ViewDatasetAccessUseCase;
use crate::application::use_cases::view_table_access::ViewTableAccessUseCase;
use crate::domain::services::deadline::{run_with_deadline, OnDeadline};

use super::cli::Command;

/// サブコマンドの実行
pub struct SnippetRunner {
    config: Config,
}

impl SnippetRunner {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    fn project(&self) -> &str {
        &self.config.project_id
    }

    fn location<'a>(&'a self, location: &'a Option<String>) -> &'a str {
        location.as_deref().unwrap_or(&self.config.location)
    }

    fn execution_deadline(&self, timeout_secs: Option<u64>) -> Duration {
        timeout_secs
            .map(Duration::from_secs)
            .unwrap_or_else(|| self.config.execution_timeout())
    }

    fn key_path(&self) -> Option<&str> {
        self.config.service_account_key_path.as_deref()
    }

    async fn bigquery(&self) -> Result<Arc<BigQueryAccessRepository>> {
        let (client, _) = create_bigquery_client(self.key_path()).await?;
        Ok(Arc::new(BigQueryAccessRepository::new(client)))
    }

    async fn compute(&self) -> Result<Arc<ComputeDiskRepository>> {
        let credentials = load_credentials(self.key_path())?;
        Ok(Arc::new(ComputeDiskRepository::connect(credentials).await?))
    }

    async fn workflows(&self) -> Result<Arc<CloudWorkflowsRepository>> {
        let credentials = load_credentials(self.key_path())?;
        Ok(Arc::new(CloudWorkflowsRepository::connect(credentials).await?))
    }

    /// サブコマンドを実行し、結果を標準出力に書き出す
    #[cfg_attr(coverage_nightly, coverage(off))]
    pub async fn run(&self, command: Command) -> Result<()> {
        info!("Project: {}", self.project());
        let mut out = io::stdout();

        match command {
            Command::GrantDatasetAccess {
                dataset_id,
                role,
                entity_type,
                entity,
            } => {
                let grant = AccessGrant::new(role, entity_type, entity);
                GrantDatasetAccessUseCase::new(self.bigquery().await?)
                    .execute(&mut out, self.project(), &dataset_id, &grant)
                    .await?;
            }
            Command::RevokeDatasetAccess { dataset_id, entity } => {
                RevokeDatasetAccessUseCase::new(self.bigquery().await?)
                    .execute(&mut out, self.project(), &dataset_id, &entity)
                    .await?;
            }
            Command::ViewDatasetAccess { dataset_id } => {
                ViewDatasetAccessUseCase::new(self.bigquery().await?)
                    .execute(&mut out, self.project(), &dataset_id)
                    .await?;
            }
            Command::GrantTableAccess {
                dataset_id,
                resource_id,
                member,
                role,
            } => {
                let change = MemberChange::new(member, role);
                GrantTableAccessUseCase::new(self.bigquery().await?)
                    .execute(&mut out, self.project(), &dataset_id, &resource_id, &change)
                    .await?;
            }
            Command::RevokeTableAccess {
                dataset_id,
                resource_id,
                member,
                role,
            } => {
                let change = MemberChange::new(member, role);
                RevokeTableAccessUseCase::new(self.bigquery().await?)
                    .execute(&mut out, self.project(), &dataset_id, &resource_id, &change)
                    .await?;
            }
            Command::ViewTableAccess {
                dataset_id,
                resource_id,
            } => {
                ViewTableAccessUseCase::new(self.bigquery().await?)
                    .execute(&mut out, self.project(), &dataset_id, &resource_id)
                    .await?;
            }
            Command::ListConsistencyGroup { group_name, region } => {
                let region = region.as_deref().unwrap_or(&self.config.region);
                ListConsistencyGroupUseCase::new(self.compute().await?)
                    .execute(&mut out, self.project(), region, &group_name)
                    .await?;
            }
            Command::StartReplication {
                disk_name,
                primary_disk_name,
                primary_zone,
                zone,
            } => {
                let zone = zone.as_deref().unwrap_or(&self.config.zone);
                StartReplicationUseCase::new(self.compute().await?)
                    .execute(
                        &mut out,
                        self.project(),
                        zone,
                        &disk_name,
                        &primary_disk_name,
                        &primary_zone,
                    )
                    .await?;
            }
            Command::CreateWorkflow {
                workflow_id,
                source,
                location,
            } => {
                let source_contents = std::fs::read_to_string(&source)
                    .with_context(|| format!("Failed to read workflow source {}", source.display()))?;
                CreateWorkflowUseCase::new(self.workflows().await?)
                    .execute(
                        &mut out,
                        self.project(),
                        self.location(&location),
                        &workflow_id,
                        &source_contents,
                        self.config.workflow_poll_settings(),
                    )
                    .await?;
            }
            Command::ExecuteWorkflow {
                workflow_id,
                location,
                argument,
                timeout_secs,
                abort_on_deadline,
            } => {
                let deadline = self.execution_deadline(timeout_secs);
                let on_deadline = if abort_on_deadline {
                    OnDeadline::Abort
                } else {
                    OnDeadline::Detach
                };
                let options = ExecutionOptions {
                    argument,
                    ..ExecutionOptions::default()
                };
                let use_case = ExecuteWorkflowUseCase::new(self.workflows().await?);
                let project_id = self.project().to_string();
                let location_id = self.location(&location).to_string();

                run_with_deadline(
                    deadline,
                    async move {
                        let mut out = io::stdout();
                        use_case
                            .execute(&mut out, &project_id, &workflow_id, &location_id, &options)
                            .await
                    },
                    on_deadline,
                )
                .await?;
            }
            Command::DeleteWorkflow {
                workflow_id,
                location,
            } => {
                DeleteWorkflowUseCase::new(self.workflows().await?)
                    .execute(
                        &mut out,
                        self.project(),
                        self.location(&location),
                        &workflow_id,
                    )
                    .await?;
            }
        }

        out.flush().context("Failed to flush output")?;
        Ok(())
    }
}
