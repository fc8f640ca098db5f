//! # Domain Layer
//!
//! このモジュールはビジネスの核心的なルールとエンティティを定義します。
//!
//! ## 特徴
//!
//! - Google Cloud SDK の型に依存しない
//! - クラウドAPIについては Repository trait を通してのみ知る
//!
//! ## 構成要素
//!
//! - **entities**: ACL、IAMポリシー、ディスク、ワークフロー
//! - **repositories**: Repository trait（インターフェース定義のみ）
//! - **services**: ポーリング、バックオフ、期限付き実行
//! - **error**: ドメインエラー

pub mod entities;
pub mod error;
pub mod repositories;
pub mod services;
