//! # Domain Repositories
//!
//! Repository trait（インターフェース）定義
//!
//! ## 特徴
//!
//! - Domain層では実装を持たない（traitの定義のみ）
//! - Adapter層で Google Cloud SDK を使った実装を提供
//! - テストでは mockall のモックやインメモリ実装に差し替える

pub mod bigquery_repository;
pub mod disk_repository;
pub mod workflow_repository;
