//! # Execution Options DTO
//!
//! ワークフロー実行のオプション

use crate::domain::services::backoff::Backoff;

/// ワークフロー実行オプション
#[derive(Debug, Clone, Default)]
pub struct ExecutionOptions {
    /// 実行に渡す引数（JSON文字列）
    pub argument: Option<String>,
    /// 結果待ちのバックオフ
    pub backoff: Backoff,
}

impl ExecutionOptions {
    /// 引数付きの実行オプション
    ///
    /// ```
    /// use gcsnip::application::dto::execution_options::ExecutionOptions;
    ///
    /// let options = ExecutionOptions::with_argument(r#"{"searchTerm":"Cloud"}"#);
    /// assert_eq!(options.argument.as_deref(), Some(r#"{"searchTerm":"Cloud"}"#));
    /// ```
    pub fn with_argument(argument: impl Into<String>) -> Self {
        Self {
            argument: Some(argument.into()),
            ..Self::default()
        }
    }
}
