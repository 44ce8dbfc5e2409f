//! 알림 타입 및 trait 정의.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// 알림 우선순위 레벨.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertPriority {
    /// 낮은 우선순위 (정보성)
    Low,
    /// 일반 우선순위 (일반 업데이트)
    Normal,
    /// 높은 우선순위 (중요 이벤트)
    High,
    /// 긴급 우선순위 (즉시 대응 필요)
    Critical,
}

impl Default for AlertPriority {
    fn default() -> Self {
        Self::Normal
    }
}

/// 알림 이벤트 타입.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AlertEvent {
    /// 매수 진입 조건 충족
    EntrySignal {
        symbol: String,
        name: Option<String>,
        mode: String,
        price: Decimal,
        reasons: Vec<String>,
        stop_loss_price: Option<Decimal>,
    },
    /// 청산 경고 (과열, 지지선 이탈 등)
    ExitWarning {
        symbol: String,
        name: Option<String>,
        mode: String,
        price: Decimal,
        reasons: Vec<String>,
    },
    /// 현재가가 권장 매수 구간에 진입
    BuyZoneEntered {
        symbol: String,
        name: Option<String>,
        current_price: Decimal,
        low: Decimal,
        high: Decimal,
        reason: String,
    },
    /// 보유 종목 손절가 접근/도달
    StopLossTriggered {
        symbol: String,
        name: Option<String>,
        current_price: Decimal,
        stop_price: Decimal,
        buy_price: Decimal,
        quantity: u32,
        loss_pct: Decimal,
    },
    /// 보유 종목 목표가 도달
    TakeProfitReached {
        symbol: String,
        name: Option<String>,
        current_price: Decimal,
        target_price: Decimal,
        buy_price: Decimal,
        quantity: u32,
        profit_pct: Decimal,
    },
    /// 수급 회복 신호 감지
    RecoveryDetected {
        symbol: String,
        name: Option<String>,
        message: String,
    },
    /// 시스템 오류
    SystemError { message: String },
    /// 사용자 정의 알림
    Custom { title: String, message: String },
}

impl AlertEvent {
    /// 쿨다운 상태 저장용 이벤트 키.
    pub fn kind_key(&self) -> &'static str {
        match self {
            AlertEvent::EntrySignal { .. } => "entry",
            AlertEvent::ExitWarning { .. } => "exit_warning",
            AlertEvent::BuyZoneEntered { .. } => "buy_zone",
            AlertEvent::StopLossTriggered { .. } => "stop_loss",
            AlertEvent::TakeProfitReached { .. } => "take_profit",
            AlertEvent::RecoveryDetected { .. } => "recovery",
            AlertEvent::SystemError { .. } => "system_error",
            AlertEvent::Custom { .. } => "custom",
        }
    }

    /// 이벤트가 참조하는 종목 코드. 시스템 이벤트는 `None`.
    pub fn symbol(&self) -> Option<&str> {
        match self {
            AlertEvent::EntrySignal { symbol, .. }
            | AlertEvent::ExitWarning { symbol, .. }
            | AlertEvent::BuyZoneEntered { symbol, .. }
            | AlertEvent::StopLossTriggered { symbol, .. }
            | AlertEvent::TakeProfitReached { symbol, .. }
            | AlertEvent::RecoveryDetected { symbol, .. } => Some(symbol),
            AlertEvent::SystemError { .. } | AlertEvent::Custom { .. } => None,
        }
    }
}

/// 알림 메시지.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Alert {
    /// 알림 이벤트
    pub event: AlertEvent,
    /// 우선순위 레벨
    pub priority: AlertPriority,
    /// 타임스탬프
    pub timestamp: DateTime<Utc>,
}

impl Alert {
    /// 새 알림을 생성합니다.
    pub fn new(event: AlertEvent) -> Self {
        Self {
            event,
            priority: AlertPriority::Normal,
            timestamp: Utc::now(),
        }
    }

    /// 우선순위 레벨을 설정합니다.
    pub fn with_priority(mut self, priority: AlertPriority) -> Self {
        self.priority = priority;
        self
    }
}

/// 알림 작업용 Result 타입.
pub type NotificationResult<T> = Result<T, NotificationError>;

/// 알림 에러.
#[derive(Debug, thiserror::Error)]
pub enum NotificationError {
    #[error("알림 전송 실패: {0}")]
    SendFailed(String),

    #[error("잘못된 설정: {0}")]
    InvalidConfig(String),

    #[error("요청 한도 초과: {0}초 후 재시도")]
    RateLimited(u64),

    #[error("네트워크 에러: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("직렬화 에러: {0}")]
    SerializationError(#[from] serde_json::Error),
}

/// 알림 전송기 trait.
#[async_trait]
pub trait NotificationSender: Send + Sync {
    /// 알림을 전송합니다.
    async fn send(&self, alert: &Alert) -> NotificationResult<()>;

    /// 전송기가 활성화되어 있는지 확인합니다.
    fn is_enabled(&self) -> bool;

    /// 전송기 이름을 반환합니다.
    fn name(&self) -> &str;
}
