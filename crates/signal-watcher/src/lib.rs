//! 종목 감시 데몬.
//!
//! 이 crate는 감시 종목을 주기적으로 평가해 알림을 전송하는 바이너리를
//! 제공합니다:
//! - 모드별 진입/청산 신호 감시
//! - 보유 포지션 손절가/목표가 감시
//! - 수급 회복 신호 감시
//!
//! 동일 알림은 쿨다운 동안 재전송하지 않으며, 상태는 JSON 파일로 유지되어
//! 재시작에도 쿨다운이 이어집니다.

pub mod alert_state;
pub mod config;
pub mod error;
pub mod evaluate;

pub use alert_state::AlertState;
pub use config::{Position, WatcherConfig};
pub use error::{Result, WatcherError};
pub use evaluate::{run_cycle, WatchStats};
