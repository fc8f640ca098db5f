//! # Domain Entities
//!
//! ビジネスエンティティとバリューオブジェクトを定義するモジュール
//!
//! ## エンティティ
//!
//! - **DatasetAccess / AccessEntry**: データセットのACL
//! - **IamPolicy**: テーブル/ビューのIAMポリシー
//! - **DiskSummary**: Compute Engine ディスク
//! - **WorkflowExecution**: ワークフローの実行

pub mod access;
pub mod disk;
pub mod iam_policy;
pub mod workflow;
