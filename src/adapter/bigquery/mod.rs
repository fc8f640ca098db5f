//! BigQuery Adapter Modules
//!
//! BigQuery統合のためのアダプターモジュール

pub mod models;
