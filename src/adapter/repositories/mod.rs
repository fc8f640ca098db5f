//! Repository Implementations
//!
//! Domain層のRepository traitを Google Cloud SDK で実装

pub mod bigquery_access_repository;
pub mod compute_disk_repository;
pub mod workflows_repository;

pub use bigquery_access_repository::BigQueryAccessRepository;
pub use compute_disk_repository::ComputeDiskRepository;
pub use workflows_repository::CloudWorkflowsRepository;
