//! Adapter Layer
//!
//! 外部システム（BigQuery, Compute Engine, Workflows, 設定ファイル）との統合

pub mod auth;
pub mod bigquery;
pub mod compute;
pub mod config;
pub mod repositories;
pub mod workflows;
