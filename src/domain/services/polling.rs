//! # Polling Service
//!
//! リソースが目的の状態になるまで一定間隔で取得を繰り返す

use std::fmt::Debug;
use std::future::Future;
use std::time::Duration;

use anyhow::Result;
use log::debug;
use tokio::time::{sleep, timeout};

use crate::domain::error::SnippetError;

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(1);
pub const DEFAULT_POLL_TIMEOUT: Duration = Duration::from_secs(5 * 60);

/// ポーリング設定
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollSettings {
    /// 不一致時の待機間隔
    pub interval: Duration,
    /// ポーリング全体の期限
    pub timeout: Duration,
}

impl Default for PollSettings {
    fn default() -> Self {
        Self {
            interval: DEFAULT_POLL_INTERVAL,
            timeout: DEFAULT_POLL_TIMEOUT,
        }
    }
}

/// `fetch` の結果が `target` と等しくなるまでポーリングする
///
/// 不一致なら `interval` 待ってから再取得する。期限は実行中の `fetch` にも
/// 適用され、超過すると `SnippetError::DeadlineExceeded` を返す。
/// `fetch` のエラーはリトライせずにそのまま返す。
pub async fn poll_until<T, F, Fut>(mut fetch: F, target: T, settings: PollSettings) -> Result<T>
where
    T: PartialEq + Debug,
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let polling = async {
        let mut attempt: u32 = 0;
        loop {
            attempt += 1;
            let current = fetch().await?;
            if current == target {
                debug!("Reached {:?} after {} attempts", current, attempt);
                return Ok(current);
            }
            debug!(
                "State is {:?}, waiting for {:?} (attempt {}), retrying in {:?}",
                current, target, attempt, settings.interval
            );
            sleep(settings.interval).await;
        }
    };

    match timeout(settings.timeout, polling).await {
        Ok(result) => result,
        Err(_) => Err(SnippetError::DeadlineExceeded(settings.timeout).into()),
    }
}
