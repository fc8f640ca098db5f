//! # Use Cases
//!
//! アプリケーションのビジネスフロー（ユースケース）
//!
//! ## BigQuery
//!
//! - **GrantDatasetAccessUseCase** / **RevokeDatasetAccessUseCase** / **ViewDatasetAccessUseCase**
//! - **GrantTableAccessUseCase** / **RevokeTableAccessUseCase** / **ViewTableAccessUseCase**
//!
//! ## Compute Engine
//!
//! - **ListConsistencyGroupUseCase**: 整合性グループのディスク一覧
//! - **StartReplicationUseCase**: 非同期レプリケーションの開始
//!
//! ## Workflows
//!
//! - **CreateWorkflowUseCase**: 作成と ACTIVE までのポーリング
//! - **ExecuteWorkflowUseCase**: 実行と結果の取得
//! - **DeleteWorkflowUseCase**: 削除

pub mod create_workflow;
pub mod delete_workflow;
pub mod execute_workflow;
pub mod grant_dataset_access;
pub mod grant_table_access;
pub mod list_consistency_group;
pub mod report;
pub mod revoke_dataset_access;
pub mod revoke_table_access;
pub mod start_replication;
pub mod view_dataset_access;
pub mod view_table_access;
