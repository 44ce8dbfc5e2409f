//! 에러 타입 정의.

use thiserror::Error;

/// Watcher 에러 타입
#[derive(Debug, Error)]
pub enum WatcherError {
    /// 설정 에러
    #[error("설정 오류: {0}")]
    Config(String),

    /// 데이터 수집 에러
    #[error("데이터 수집 오류: {0}")]
    Data(#[from] signal_data::DataError),

    /// 알림 전송 에러
    #[error("알림 전송 오류: {0}")]
    Notification(#[from] signal_notification::NotificationError),

    /// 알림 상태 파일 I/O 에러
    #[error("상태 파일 오류: {0}")]
    Io(#[from] std::io::Error),

    /// 상태 파일 직렬화 에러
    #[error("상태 파일 직렬화 오류: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result 타입 별칭
pub type Result<T> = std::result::Result<T, WatcherError>;
