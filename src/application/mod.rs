//! # Application Layer
//!
//! アプリケーション固有のビジネスフロー（ユースケース）
//!
//! ## 特徴
//!
//! - 1つの操作につき1つのユースケース
//! - Repository traitに依存（SDKの実装には依存しない）
//! - 結果は人が読める形で出力先（`std::io::Write`）に書き出す
//!
//! ## 構成要素
//!
//! - **dto**: Data Transfer Object
//! - **use_cases**: ユースケース

pub mod dto;
pub mod use_cases;
