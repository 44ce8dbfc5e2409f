//! 텔레그램 알림 서비스.
//!
//! Telegram Bot API를 통해 신호 알림을 전송합니다.

use crate::types::{
    Alert, AlertEvent, AlertPriority, NotificationError, NotificationResult, NotificationSender,
};
use async_trait::async_trait;
use rust_decimal::Decimal;
use tracing::{debug, error, info, warn};

/// 텔레그램 알림 전송 설정.
#[derive(Debug, Clone)]
pub struct TelegramConfig {
    /// @BotFather에서 받은 봇 토큰
    pub bot_token: String,
    /// 메시지를 보낼 채팅 ID
    pub chat_id: String,
    /// 전송 활성화 여부
    pub enabled: bool,
    /// 파싱 모드 (HTML 또는 MarkdownV2)
    pub parse_mode: String,
}

impl TelegramConfig {
    /// 새 텔레그램 설정을 생성합니다.
    pub fn new(bot_token: String, chat_id: String) -> Self {
        Self {
            bot_token,
            chat_id,
            enabled: true,
            parse_mode: "HTML".to_string(),
        }
    }

    /// 환경 변수에서 설정을 생성합니다.
    pub fn from_env() -> Option<Self> {
        let bot_token = std::env::var("TELEGRAM_BOT_TOKEN").ok()?;
        let chat_id = std::env::var("TELEGRAM_CHAT_ID").ok()?;
        let enabled = std::env::var("TELEGRAM_ENABLED")
            .map(|v| v.to_lowercase() == "true")
            .unwrap_or(true);

        Some(Self {
            bot_token,
            chat_id,
            enabled,
            parse_mode: "HTML".to_string(),
        })
    }
}

/// 텔레그램 알림 전송기.
pub struct TelegramSender {
    config: TelegramConfig,
    client: reqwest::Client,
}

impl TelegramSender {
    /// 새 텔레그램 전송기를 생성합니다.
    pub fn new(config: TelegramConfig) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
        }
    }

    /// 환경 변수에서 전송기를 생성합니다.
    pub fn from_env() -> Option<Self> {
        TelegramConfig::from_env().map(Self::new)
    }

    /// 알림을 텔레그램 메시지로 포맷합니다.
    pub(crate) fn format_message(&self, alert: &Alert) -> String {
        let priority_emoji = match alert.priority {
            AlertPriority::Low => "ℹ️",
            AlertPriority::Normal => "📊",
            AlertPriority::High => "⚠️",
            AlertPriority::Critical => "🚨",
        };

        let content = match &alert.event {
            AlertEvent::EntrySignal {
                symbol,
                name,
                mode,
                price,
                reasons,
                stop_loss_price,
            } => {
                let stop_text = stop_loss_price
                    .map(|p| format!("\n손절가: {p}"))
                    .unwrap_or_default();
                format!(
                    "🟢 <b>매수 신호</b> ({mode})\n\n\
                     종목: {} <code>{symbol}</code>\n\
                     현재가: {price}{stop_text}\n\
                     근거: {}",
                    display_name(name, symbol),
                    reasons.join(", ")
                )
            }

            AlertEvent::ExitWarning {
                symbol,
                name,
                mode,
                price,
                reasons,
            } => {
                format!(
                    "🔴 <b>청산 경고</b> ({mode})\n\n\
                     종목: {} <code>{symbol}</code>\n\
                     현재가: {price}\n\
                     근거: {}",
                    display_name(name, symbol),
                    reasons.join(", ")
                )
            }

            AlertEvent::BuyZoneEntered {
                symbol,
                name,
                current_price,
                low,
                high,
                reason,
            } => {
                format!(
                    "📥 <b>매수 구간 진입</b>\n\n\
                     종목: {} <code>{symbol}</code>\n\
                     현재가: {current_price}\n\
                     구간: {low} ~ {high}\n\
                     근거: {reason}",
                    display_name(name, symbol)
                )
            }

            AlertEvent::StopLossTriggered {
                symbol,
                name,
                current_price,
                stop_price,
                buy_price,
                quantity,
                loss_pct,
            } => {
                let pnl = (current_price - buy_price) * Decimal::from(*quantity);
                format!(
                    "🛑 <b>손절가 도달</b>\n\n\
                     종목: {} <code>{symbol}</code>\n\
                     현재가: {current_price}\n\
                     손절가: {stop_price}\n\
                     매수가: {buy_price} ({quantity}주)\n\
                     평가손익: {pnl}\n\
                     손실률: <b>{loss_pct}%</b>",
                    display_name(name, symbol)
                )
            }

            AlertEvent::TakeProfitReached {
                symbol,
                name,
                current_price,
                target_price,
                buy_price,
                quantity,
                profit_pct,
            } => {
                let sign = if *profit_pct >= Decimal::ZERO { "+" } else { "" };
                let pnl = (current_price - buy_price) * Decimal::from(*quantity);
                format!(
                    "🎯 <b>목표가 도달</b>\n\n\
                     종목: {} <code>{symbol}</code>\n\
                     현재가: {current_price}\n\
                     목표가: {target_price}\n\
                     매수가: {buy_price} ({quantity}주)\n\
                     평가손익: {sign}{pnl}\n\
                     수익률: <b>{sign}{profit_pct}%</b>",
                    display_name(name, symbol)
                )
            }

            AlertEvent::RecoveryDetected {
                symbol,
                name,
                message,
            } => {
                format!(
                    "🔔 <b>수급 회복 신호</b>\n\n\
                     종목: {} <code>{symbol}</code>\n\
                     내용: {message}",
                    display_name(name, symbol)
                )
            }

            AlertEvent::SystemError { message } => {
                format!("🚨 <b>시스템 오류</b>\n\n{message}")
            }

            AlertEvent::Custom { title, message } => {
                format!("{priority_emoji} <b>{title}</b>\n\n{message}")
            }
        };

        let timestamp = alert.timestamp.format("%Y-%m-%d %H:%M:%S UTC");
        format!("{content}\n\n<i>🕐 {timestamp}</i>")
    }

    /// 텔레그램에 원시 메시지를 전송합니다.
    async fn send_message(&self, text: &str) -> NotificationResult<()> {
        let url = format!(
            "https://api.telegram.org/bot{}/sendMessage",
            self.config.bot_token
        );

        let params = serde_json::json!({
            "chat_id": self.config.chat_id,
            "text": text,
            "parse_mode": self.config.parse_mode,
            "disable_web_page_preview": true,
        });

        debug!(
            "Sending Telegram message to chat_id: {}",
            self.config.chat_id
        );

        let response = self
            .client
            .post(&url)
            .json(&params)
            .send()
            .await
            .map_err(NotificationError::NetworkError)?;

        if response.status().is_success() {
            info!("Telegram notification sent successfully");
            Ok(())
        } else {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();

            // 요청 한도 제한 확인
            if status.as_u16() == 429 {
                warn!("Telegram rate limited");
                return Err(NotificationError::RateLimited(60));
            }

            error!("Failed to send Telegram message: {} - {}", status, body);
            Err(NotificationError::SendFailed(format!(
                "HTTP {}: {}",
                status, body
            )))
        }
    }
}

fn display_name<'a>(name: &'a Option<String>, symbol: &'a str) -> &'a str {
    name.as_deref().unwrap_or(symbol)
}

#[async_trait]
impl NotificationSender for TelegramSender {
    async fn send(&self, alert: &Alert) -> NotificationResult<()> {
        if !self.is_enabled() {
            debug!("Telegram notifications are disabled, skipping");
            return Ok(());
        }

        let message = self.format_message(alert);
        self.send_message(&message).await
    }

    fn is_enabled(&self) -> bool {
        self.config.enabled && !self.config.bot_token.is_empty() && !self.config.chat_id.is_empty()
    }

    fn name(&self) -> &str {
        "telegram"
    }
}

/// 여러 전송기를 관리하는 알림 관리자.
pub struct NotificationManager {
    senders: Vec<Box<dyn NotificationSender>>,
}

impl NotificationManager {
    /// 새 알림 관리자를 생성합니다.
    pub fn new() -> Self {
        Self {
            senders: Vec::new(),
        }
    }

    /// 알림 전송기를 추가합니다.
    pub fn add_sender<S: NotificationSender + 'static>(&mut self, sender: S) {
        self.senders.push(Box::new(sender));
    }

    /// 활성화된 전송기가 하나라도 있는지 확인합니다.
    pub fn has_enabled_sender(&self) -> bool {
        self.senders.iter().any(|s| s.is_enabled())
    }

    /// 활성화된 모든 전송기를 통해 알림을 전송합니다.
    pub async fn notify(&self, alert: &Alert) -> NotificationResult<()> {
        let mut last_error = None;

        for sender in &self.senders {
            if sender.is_enabled() {
                if let Err(e) = sender.send(alert).await {
                    error!("Failed to send notification via {}: {}", sender.name(), e);
                    last_error = Some(e);
                }
            }
        }

        if let Some(e) = last_error {
            // 모든 전송기가 실패한 경우에만 에러 반환
            if self.senders.iter().filter(|s| s.is_enabled()).count() == 1 {
                return Err(e);
            }
        }

        Ok(())
    }

    /// 시스템 오류 알림을 전송합니다.
    pub async fn notify_system_error(&self, message: &str) -> NotificationResult<()> {
        let alert = Alert::new(AlertEvent::SystemError {
            message: message.to_string(),
        })
        .with_priority(AlertPriority::Critical);

        self.notify(&alert).await
    }
}

impl Default for NotificationManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn sender() -> TelegramSender {
        let config = TelegramConfig::new("test_token".to_string(), "123456".to_string());
        TelegramSender::new(config)
    }

    #[test]
    fn test_format_entry_signal() {
        let alert = Alert::new(AlertEvent::EntrySignal {
            symbol: "005930".to_string(),
            name: Some("삼성전자".to_string()),
            mode: "스윙".to_string(),
            price: dec!(72800),
            reasons: vec!["MA20 지지 확인".to_string(), "MACD 골든크로스".to_string()],
            stop_loss_price: Some(dec!(69888)),
        });

        let message = sender().format_message(&alert);
        assert!(message.contains("매수 신호"));
        assert!(message.contains("삼성전자"));
        assert!(message.contains("005930"));
        assert!(message.contains("MACD 골든크로스"));
        assert!(message.contains("69888"));
    }

    #[test]
    fn test_format_stop_loss_without_name_falls_back_to_code() {
        let alert = Alert::new(AlertEvent::StopLossTriggered {
            symbol: "000660".to_string(),
            name: None,
            current_price: dec!(95000),
            stop_price: dec!(96000),
            buy_price: dec!(100000),
            quantity: 10,
            loss_pct: dec!(-5.00),
        });

        let message = sender().format_message(&alert);
        assert!(message.contains("손절가 도달"));
        assert!(message.contains("-5.00%"));
        // 보유 수량과 평가손익이 함께 표시됨
        assert!(message.contains("10주"));
        assert!(message.contains("-50000"));
        // 종목명이 없으면 코드가 두 번 나타남
        assert!(message.matches("000660").count() >= 2);
    }

    #[test]
    fn test_format_take_profit_positive_sign() {
        let alert = Alert::new(AlertEvent::TakeProfitReached {
            symbol: "005930".to_string(),
            name: Some("삼성전자".to_string()),
            current_price: dec!(77200),
            target_price: dec!(77168),
            buy_price: dec!(72800),
            quantity: 5,
            profit_pct: dec!(6.04),
        });

        let message = sender().format_message(&alert);
        assert!(message.contains("목표가 도달"));
        assert!(message.contains("+6.04%"));
        // 평가손익 = (77200 - 72800) * 5
        assert!(message.contains("+22000"));
    }

    #[test]
    fn test_disabled_without_credentials() {
        let mut config = TelegramConfig::new(String::new(), String::new());
        config.enabled = true;
        let sender = TelegramSender::new(config);
        assert!(!sender.is_enabled());
    }

    #[test]
    fn test_event_kind_keys() {
        let event = AlertEvent::EntrySignal {
            symbol: "005930".to_string(),
            name: None,
            mode: "단타".to_string(),
            price: dec!(72800),
            reasons: vec![],
            stop_loss_price: None,
        };
        assert_eq!(event.kind_key(), "entry");
        assert_eq!(event.symbol(), Some("005930"));

        let error = AlertEvent::SystemError {
            message: "테스트".to_string(),
        };
        assert_eq!(error.kind_key(), "system_error");
        assert_eq!(error.symbol(), None);
    }
}
