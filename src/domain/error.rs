//! # Domain Errors
//!
//! このクレート自身が発生させるエラー（SDKのエラーは anyhow でそのまま伝播）

use std::time::Duration;

use thiserror::Error;

/// スニペット実行時のエラー
#[derive(Debug, Error)]
pub enum SnippetError {
    /// 待機期限を超過した
    #[error("deadline exceeded after {0:?}")]
    DeadlineExceeded(Duration),

    /// 読み込み後にリソースが変更された（etag不一致）
    #[error("{resource} was modified concurrently (etag {expected} is stale)")]
    ConcurrentModification { resource: String, expected: String },

    /// 引数が不正
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// バックグラウンドタスクが結果を返さずに終了した
    #[error("background task ended without a result")]
    TaskAborted,
}

impl SnippetError {
    /// 期限超過エラーかどうか
    pub fn is_deadline_exceeded(&self) -> bool {
        matches!(self, SnippetError::DeadlineExceeded(_))
    }
}

/// anyhow::Error の中に期限超過が含まれているか確認
pub fn is_deadline_exceeded(error: &anyhow::Error) -> bool {
    error
        .chain()
        .filter_map(|cause| cause.downcast_ref::<SnippetError>())
        .any(SnippetError::is_deadline_exceeded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;

    #[test]
    fn test_deadline_exceeded_display() {
        let err = SnippetError::DeadlineExceeded(Duration::from_secs(5));
        assert_eq!(err.to_string(), "deadline exceeded after 5s");
    }

    #[test]
    fn test_is_deadline_exceeded_through_context() {
        let result: Result<(), SnippetError> =
            Err(SnippetError::DeadlineExceeded(Duration::from_millis(10)));
        let err = result.context("executeWorkflow").unwrap_err();
        assert!(is_deadline_exceeded(&err));
    }

    #[test]
    fn test_other_errors_are_not_deadline() {
        let err = anyhow::Error::from(SnippetError::InvalidArgument("empty".to_string()));
        assert!(!is_deadline_exceeded(&err));
        assert!(!is_deadline_exceeded(&anyhow::anyhow!("503 Service Unavailable")));
    }

    #[test]
    fn test_concurrent_modification_display() {
        let err = SnippetError::ConcurrentModification {
            resource: "dataset my_dataset".to_string(),
            expected: "abc".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "dataset my_dataset was modified concurrently (etag abc is stale)"
        );
    }
}
