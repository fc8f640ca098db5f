//! # gcsnip
//!
//! Google Cloud（BigQuery / Compute Engine / Workflows）の小さな操作を集めたツール
//!
//! このプロジェクトはクリーンアーキテクチャを採用しており、以下の4層で構成されています：
//!
//! - **Domain層**: エンティティ、Repository trait、ポーリングや期限付き実行（外部依存なし）
//! - **Application層**: 操作ごとのユースケース
//! - **Adapter層**: Google Cloud SDK を使った Repository 実装、認証、設定
//! - **Driver層**: CLI、依存性注入

// coverage_nightly cfg が設定されている場合のみ coverage_attribute を有効化
// カバレッジ計測時に外部サービス依存コードを除外するために使用
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

// Domain層（純粋なビジネスロジック）
pub mod domain;

// Application層（ユースケース）
pub mod application;

// Adapter層（Infrastructure）
pub mod adapter;

// Driver層（Presentation）
pub mod driver;
