//! # Backoff
//!
//! 実行結果を待つ間の指数バックオフ

use std::time::Duration;

pub const INITIAL_DELAY_MS: u64 = 1000;
pub const MAX_DELAY_MS: u64 = 32000;

/// 指数バックオフ設定
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Backoff {
    pub initial: Duration,
    pub max: Duration,
}

impl Default for Backoff {
    fn default() -> Self {
        Self {
            initial: Duration::from_millis(INITIAL_DELAY_MS),
            max: Duration::from_millis(MAX_DELAY_MS),
        }
    }
}

impl Backoff {
    /// `attempt` 回目（1始まり）の待機時間
    ///
    /// 初回は `initial`、以降は倍々で増え `max` で頭打ち
    pub fn delay(&self, attempt: u32) -> Duration {
        let factor = 1u32.checked_shl(attempt.saturating_sub(1)).unwrap_or(u32::MAX);
        self.initial
            .checked_mul(factor)
            .map_or(self.max, |delay| delay.min(self.max))
    }
}
