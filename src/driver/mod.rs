//! # Driver Layer (Presentation)
//!
//! CLIやその他の外部インターフェースを提供
//!
//! ## 特徴
//!
//! - Use Caseを呼び出して操作を起動
//! - 依存性注入（DI）を行い、全てを組み立てる
//! - ユーザーとのインターフェース
//!
//! ## 構成要素
//!
//! - **cli**: CLI引数のパース
//! - **runner**: サブコマンドごとのクライアント構築とユースケース実行

pub mod cli;
pub mod runner;

pub use cli::{Args, Command};
pub use runner::SnippetRunner;
