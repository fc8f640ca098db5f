//! # Deadline Race
//!
//! ブロックする処理を別タスクで実行し、タイマーと競争させる

use std::future::Future;
use std::time::Duration;

use anyhow::Result;
use log::warn;
use tokio::sync::oneshot;
use tokio::time::sleep;

use crate::domain::error::SnippetError;

/// 期限切れ時にバックグラウンドタスクをどう扱うか
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OnDeadline {
    /// タスクは完了まで走り続ける（呼び出し側は待つのをやめるだけ）
    #[default]
    Detach,
    /// タスクを中断する
    Abort,
}

/// `task` を1つの補助タスクとして起動し、`deadline` と競争させる
///
/// 結果は1件分の容量を持つチャネルで受け取る。タスクが先に終われば
/// その結果（Ok/Err どちらも）を返し、期限が先なら
/// `SnippetError::DeadlineExceeded` を返す。
pub async fn run_with_deadline<T, Fut>(
    deadline: Duration,
    task: Fut,
    on_deadline: OnDeadline,
) -> Result<T>
where
    T: Send + 'static,
    Fut: Future<Output = Result<T>> + Send + 'static,
{
    let (tx, rx) = oneshot::channel();

    let handle = tokio::spawn(async move {
        // 受信側が既に諦めている場合、送信は失敗するだけ
        let _ = tx.send(task.await);
    });

    tokio::select! {
        received = rx => match received {
            Ok(result) => result,
            // パニック等で送信されずに終了した
            Err(_) => Err(SnippetError::TaskAborted.into()),
        },
        _ = sleep(deadline) => {
            match on_deadline {
                OnDeadline::Detach => warn!(
                    "Deadline of {:?} elapsed; the background task keeps running until it completes",
                    deadline
                ),
                OnDeadline::Abort => {
                    handle.abort();
                    warn!("Deadline of {:?} elapsed; background task aborted", deadline);
                }
            }
            Err(SnippetError::DeadlineExceeded(deadline).into())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::error::is_deadline_exceeded;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;

    #[tokio::test]
    async fn test_task_finishes_first_ok() {
        let result = run_with_deadline(
            Duration::from_secs(5),
            async { Ok("Execution results: 42".to_string()) },
            OnDeadline::Detach,
        )
        .await;

        assert_eq!(result.unwrap(), "Execution results: 42");
    }

    #[tokio::test]
    async fn test_task_finishes_first_err_is_surfaced() {
        let result: Result<()> = run_with_deadline(
            Duration::from_secs(5),
            async { Err(anyhow::anyhow!("executeWorkflow failed")) },
            OnDeadline::Detach,
        )
        .await;

        let err = result.unwrap_err();
        assert!(!is_deadline_exceeded(&err));
        assert_eq!(err.to_string(), "executeWorkflow failed");
    }

    #[tokio::test]
    async fn test_deadline_first() {
        let result: Result<()> = run_with_deadline(
            Duration::from_millis(20),
            async {
                sleep(Duration::from_secs(10)).await;
                Ok(())
            },
            OnDeadline::Detach,
        )
        .await;

        assert!(is_deadline_exceeded(&result.unwrap_err()));
    }

    #[tokio::test]
    async fn test_deadline_first_ignores_later_success() {
        let finished = Arc::new(AtomicBool::new(false));
        let finished_clone = finished.clone();

        let result = run_with_deadline(
            Duration::from_millis(20),
            async move {
                sleep(Duration::from_millis(100)).await;
                finished_clone.store(true, Ordering::SeqCst);
                Ok(())
            },
            OnDeadline::Detach,
        )
        .await;

        assert!(is_deadline_exceeded(&result.unwrap_err()));

        // 切り離されたタスクは期限後も完了まで走る
        sleep(Duration::from_millis(300)).await;
        assert!(finished.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn test_abort_stops_task() {
        let finished = Arc::new(AtomicBool::new(false));
        let finished_clone = finished.clone();

        let result = run_with_deadline(
            Duration::from_millis(20),
            async move {
                sleep(Duration::from_millis(100)).await;
                finished_clone.store(true, Ordering::SeqCst);
                Ok(())
            },
            OnDeadline::Abort,
        )
        .await;

        assert!(is_deadline_exceeded(&result.unwrap_err()));

        sleep(Duration::from_millis(300)).await;
        assert!(!finished.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn test_panicking_task_reports_aborted() {
        let result: Result<()> = run_with_deadline(
            Duration::from_secs(5),
            async { panic!("boom") },
            OnDeadline::Detach,
        )
        .await;

        let err = result.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<SnippetError>(),
            Some(SnippetError::TaskAborted)
        ));
    }
}
