//! # Domain Services
//!
//! 外部APIの呼び出しを包む制御フロー
//!
//! - **polling**: 目的の状態になるまでのポーリング
//! - **backoff**: 指数バックオフ
//! - **deadline**: 補助タスクとタイマーの競争

pub mod backoff;
pub mod deadline;
pub mod polling;
