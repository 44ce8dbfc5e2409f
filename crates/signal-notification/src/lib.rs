//! # Signal Notification
//!
//! 신호 알림 서비스.
//!
//! 지원 채널:
//! - Telegram (Bot API)
//! - 범용 웹훅 (Slack/Discord 호환)
//!
//! 전송기는 `NotificationSender` trait으로 추상화되고,
//! `NotificationManager`가 활성화된 채널 전체에 알림을 뿌립니다.
//! 채널 설정이 없으면 전송기는 비활성 상태로 남고 전송은 조용히
//! 건너뜁니다.

pub mod telegram;
pub mod types;
pub mod webhook;

pub use telegram::*;
pub use types::*;
pub use webhook::*;
