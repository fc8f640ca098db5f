//! BigQuery Access Repository Implementation
//!
//! データセットACL・テーブルIAMポリシー・リソース作成の BigQuery 実装

use anyhow::{Context, Result};
use async_trait::async_trait;
use google_cloud_bigquery::client::Client;
use google_cloud_bigquery::http::dataset::{Dataset, DatasetReference};
use google_cloud_bigquery::http::table::get_iam_policy::GetIamPolicyRequest;
use google_cloud_bigquery::http::table::list::ListTablesRequest;
use google_cloud_bigquery::http::table::set_iam_policy::SetIamPolicyRequest;
use google_cloud_bigquery::http::table::{
    Table, TableFieldMode, TableFieldSchema, TableFieldType, TableSchema, ViewDefinition,
};
use google_cloud_bigquery::http::types::Policy;
use log::{debug, info};
use serde_json::{json, Value};

use crate::adapter::bigquery::models::{
    access_to_value, dataset_access_from_value, policy_from_value, policy_to_value,
};
use crate::domain::entities::access::{AccessEntry, DatasetAccess};
use crate::domain::entities::iam_policy::IamPolicy;
use crate::domain::error::SnippetError;
use crate::domain::repositories::bigquery_repository::{
    BigQueryProvisioner, DatasetAccessRepository, TableIamRepository,
};

/// BigQuery リポジトリ
pub struct BigQueryAccessRepository {
    client: Client,
}

impl BigQueryAccessRepository {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    async fn fetch_dataset(&self, project_id: &str, dataset_id: &str) -> Result<Dataset> {
        self.client
            .dataset()
            .get(project_id, dataset_id)
            .await
            .with_context(|| format!("Failed to get dataset {}.{}", project_id, dataset_id))
    }
}

/// 一覧のテーブルIDを削除順に並べる（ビューが先）
fn deletion_order(overviews: &[Value]) -> Vec<String> {
    let mut tables: Vec<(String, bool)> = overviews
        .iter()
        .filter_map(|overview| {
            let table_id = overview["tableReference"]["tableId"].as_str()?;
            Some((table_id.to_string(), overview["type"] == "VIEW"))
        })
        .collect();
    tables.sort_by_key(|(_, view)| !*view);
    tables.into_iter().map(|(table_id, _)| table_id).collect()
}

fn dataset_metadata(project_id: &str, dataset_id: &str) -> Dataset {
    Dataset {
        dataset_reference: DatasetReference {
            project_id: project_id.to_string(),
            dataset_id: dataset_id.to_string(),
        },
        ..Default::default()
    }
}

fn table_metadata(project_id: &str, dataset_id: &str, table_id: &str) -> Table {
    let mut table = Table::default();
    table.table_reference.project_id = project_id.to_string();
    table.table_reference.dataset_id = dataset_id.to_string();
    table.table_reference.table_id = table_id.to_string();
    table
}

/// 必須の INTEGER 列 `id` だけを持つスキーマ
fn id_schema() -> TableSchema {
    TableSchema {
        fields: vec![TableFieldSchema {
            name: "id".to_string(),
            data_type: TableFieldType::Integer,
            mode: Some(TableFieldMode::Required),
            ..Default::default()
        }],
    }
}

fn view_definition(query: &str) -> Result<ViewDefinition> {
    serde_json::from_value(json!({ "query": query, "useLegacySql": false }))
        .context("Failed to build view definition")
}

#[cfg_attr(coverage_nightly, coverage(off))]
#[async_trait]
impl DatasetAccessRepository for BigQueryAccessRepository {
    async fn get_access(&self, project_id: &str, dataset_id: &str) -> Result<DatasetAccess> {
        let dataset = self.fetch_dataset(project_id, dataset_id).await?;
        let value = serde_json::to_value(&dataset).context("Failed to serialize dataset")?;
        dataset_access_from_value(dataset_id, value)
    }

    async fn update_access(
        &self,
        project_id: &str,
        dataset_id: &str,
        entries: Vec<AccessEntry>,
        etag: &str,
    ) -> Result<DatasetAccess> {
        // patch は If-Match を送らないため、直前に読み直して etag を比較する
        let mut dataset = self.fetch_dataset(project_id, dataset_id).await?;
        let current = dataset_access_from_value(
            dataset_id,
            serde_json::to_value(&dataset).context("Failed to serialize dataset")?,
        )?;
        if current.etag != etag {
            return Err(SnippetError::ConcurrentModification {
                resource: format!("dataset {}", dataset_id),
                expected: etag.to_string(),
            }
            .into());
        }

        dataset.access = serde_json::from_value(access_to_value(&entries)?)
            .context("Failed to build dataset access list")?;
        debug!("Patching {} access entries on {}", entries.len(), dataset_id);

        let updated = self
            .client
            .dataset()
            .patch(&dataset)
            .await
            .with_context(|| format!("Failed to update dataset {}.{}", project_id, dataset_id))?;

        let value = serde_json::to_value(&updated).context("Failed to serialize dataset")?;
        dataset_access_from_value(dataset_id, value)
    }
}

#[cfg_attr(coverage_nightly, coverage(off))]
#[async_trait]
impl TableIamRepository for BigQueryAccessRepository {
    async fn get_policy(
        &self,
        project_id: &str,
        dataset_id: &str,
        table_id: &str,
    ) -> Result<IamPolicy> {
        let request: GetIamPolicyRequest =
            serde_json::from_value(json!({ "options": { "requestedPolicyVersion": 1 } }))
                .context("Failed to build getIamPolicy request")?;

        let policy = self
            .client
            .table()
            .get_iam_policy(project_id, dataset_id, table_id, &request)
            .await
            .with_context(|| format!("Failed to get IAM policy of {}", table_id))?;

        policy_from_value(serde_json::to_value(&policy).context("Failed to serialize policy")?)
    }

    async fn set_policy(
        &self,
        project_id: &str,
        dataset_id: &str,
        table_id: &str,
        policy: IamPolicy,
    ) -> Result<IamPolicy> {
        let policy: Policy = serde_json::from_value(policy_to_value(&policy)?)
            .context("Failed to build IAM policy")?;
        let request: SetIamPolicyRequest = serde_json::from_value(json!({ "policy": policy }))
            .context("Failed to build setIamPolicy request")?;

        let updated = self
            .client
            .table()
            .set_iam_policy(project_id, dataset_id, table_id, &request)
            .await
            .with_context(|| format!("Failed to set IAM policy of {}", table_id))?;

        policy_from_value(serde_json::to_value(&updated).context("Failed to serialize policy")?)
    }
}

#[cfg_attr(coverage_nightly, coverage(off))]
#[async_trait]
impl BigQueryProvisioner for BigQueryAccessRepository {
    async fn create_dataset(&self, project_id: &str, dataset_id: &str) -> Result<()> {
        self.client
            .dataset()
            .create(&dataset_metadata(project_id, dataset_id))
            .await
            .with_context(|| format!("Failed to create dataset {}", dataset_id))?;
        info!("Created dataset {}.{}", project_id, dataset_id);
        Ok(())
    }

    async fn create_table(
        &self,
        project_id: &str,
        dataset_id: &str,
        table_id: &str,
        with_id_column: bool,
    ) -> Result<()> {
        let mut table = table_metadata(project_id, dataset_id, table_id);
        if with_id_column {
            table.schema = Some(id_schema());
        }

        self.client
            .table()
            .create(&table)
            .await
            .with_context(|| format!("Failed to create table {}", table_id))?;
        info!("Created table {}.{}.{}", project_id, dataset_id, table_id);
        Ok(())
    }

    async fn create_view(
        &self,
        project_id: &str,
        dataset_id: &str,
        view_id: &str,
        query: &str,
    ) -> Result<()> {
        let mut table = table_metadata(project_id, dataset_id, view_id);
        table.view = Some(view_definition(query)?);

        self.client
            .table()
            .create(&table)
            .await
            .with_context(|| format!("Failed to create view {}", view_id))?;
        info!("Created view {}.{}.{}", project_id, dataset_id, view_id);
        Ok(())
    }

    async fn delete_dataset(&self, project_id: &str, dataset_id: &str) -> Result<()> {
        let overviews = self
            .client
            .table()
            .list(project_id, dataset_id, &ListTablesRequest::default())
            .await
            .with_context(|| format!("Failed to list tables in {}", dataset_id))?;
        let overviews = overviews
            .iter()
            .map(serde_json::to_value)
            .collect::<Result<Vec<_>, _>>()
            .context("Failed to serialize table list")?;

        let tables = deletion_order(&overviews);
        debug!("Deleting {} tables in {}", tables.len(), dataset_id);
        for table_id in &tables {
            self.client
                .table()
                .delete(project_id, dataset_id, table_id)
                .await
                .with_context(|| format!("Failed to delete table {}", table_id))?;
        }

        self.client
            .dataset()
            .delete(project_id, dataset_id)
            .await
            .with_context(|| format!("Failed to delete dataset {}", dataset_id))?;
        info!("Deleted dataset {}.{}", project_id, dataset_id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_metadata_reference() {
        let value = serde_json::to_value(table_metadata("p", "ds", "t")).unwrap();
        assert_eq!(value["tableReference"]["projectId"], "p");
        assert_eq!(value["tableReference"]["datasetId"], "ds");
        assert_eq!(value["tableReference"]["tableId"], "t");
    }

    #[test]
    fn test_view_definition() {
        let view = view_definition("SELECT 1").unwrap();
        let value = serde_json::to_value(view).unwrap();
        assert_eq!(value["query"], "SELECT 1");
    }

    #[test]
    fn test_deletion_order_views_first() {
        let overviews = vec![
            json!({"tableReference": {"projectId": "p", "datasetId": "ds", "tableId": "source_table"}, "type": "TABLE"}),
            json!({"tableReference": {"projectId": "p", "datasetId": "ds", "tableId": "analyst_view"}, "type": "VIEW"}),
            json!({"tableReference": {"projectId": "p", "datasetId": "ds", "tableId": "other_table"}, "type": "TABLE"}),
        ];

        assert_eq!(
            deletion_order(&overviews),
            vec!["analyst_view", "source_table", "other_table"]
        );
    }

    #[test]
    fn test_deletion_order_skips_entries_without_id() {
        let overviews = vec![json!({"type": "TABLE"})];
        assert!(deletion_order(&overviews).is_empty());
    }
}
