//! 범용 웹훅 알림 서비스.
//!
//! 설정된 URL로 `{"text": "..."}` JSON을 POST합니다. Slack/Discord 호환
//! 웹훅과 사내 수신기에 사용할 수 있습니다.

use crate::types::{
    Alert, AlertEvent, NotificationError, NotificationResult, NotificationSender,
};
use async_trait::async_trait;
use tracing::{debug, error, info};

/// 웹훅 알림 전송기.
pub struct WebhookSender {
    url: String,
    client: reqwest::Client,
}

impl WebhookSender {
    /// 새 웹훅 전송기를 생성합니다.
    pub fn new(url: String) -> Self {
        Self {
            url,
            client: reqwest::Client::new(),
        }
    }

    /// `WEBHOOK_URL` 환경 변수에서 전송기를 생성합니다.
    pub fn from_env() -> Option<Self> {
        std::env::var("WEBHOOK_URL").ok().map(Self::new)
    }

    /// 알림을 플레인 텍스트로 포맷합니다. 웹훅은 HTML 마크업을 쓰지 않습니다.
    pub(crate) fn format_message(&self, alert: &Alert) -> String {
        let body = match &alert.event {
            AlertEvent::EntrySignal {
                symbol,
                name,
                mode,
                price,
                reasons,
                stop_loss_price,
            } => {
                let stop_text = stop_loss_price
                    .map(|p| format!(" / 손절가 {p}"))
                    .unwrap_or_default();
                format!(
                    "[매수 신호/{mode}] {} ({symbol}) 현재가 {price}{stop_text} - {}",
                    name.as_deref().unwrap_or(symbol),
                    reasons.join(", ")
                )
            }
            AlertEvent::ExitWarning {
                symbol,
                name,
                mode,
                price,
                reasons,
            } => format!(
                "[청산 경고/{mode}] {} ({symbol}) 현재가 {price} - {}",
                name.as_deref().unwrap_or(symbol),
                reasons.join(", ")
            ),
            AlertEvent::BuyZoneEntered {
                symbol,
                name,
                current_price,
                low,
                high,
                reason,
            } => format!(
                "[매수 구간 진입] {} ({symbol}) 현재가 {current_price}, 구간 {low}~{high} - {reason}",
                name.as_deref().unwrap_or(symbol)
            ),
            AlertEvent::StopLossTriggered {
                symbol,
                name,
                current_price,
                stop_price,
                loss_pct,
                ..
            } => format!(
                "[손절가 도달] {} ({symbol}) 현재가 {current_price}, 손절가 {stop_price}, 손실률 {loss_pct}%",
                name.as_deref().unwrap_or(symbol)
            ),
            AlertEvent::TakeProfitReached {
                symbol,
                name,
                current_price,
                target_price,
                profit_pct,
                ..
            } => format!(
                "[목표가 도달] {} ({symbol}) 현재가 {current_price}, 목표가 {target_price}, 수익률 {profit_pct}%",
                name.as_deref().unwrap_or(symbol)
            ),
            AlertEvent::RecoveryDetected {
                symbol,
                name,
                message,
            } => format!(
                "[수급 회복] {} ({symbol}) {message}",
                name.as_deref().unwrap_or(symbol)
            ),
            AlertEvent::SystemError { message } => format!("[시스템 오류] {message}"),
            AlertEvent::Custom { title, message } => format!("[{title}] {message}"),
        };

        format!("{} ({})", body, alert.timestamp.format("%Y-%m-%d %H:%M UTC"))
    }
}

#[async_trait]
impl NotificationSender for WebhookSender {
    async fn send(&self, alert: &Alert) -> NotificationResult<()> {
        if !self.is_enabled() {
            debug!("Webhook URL not configured, skipping");
            return Ok(());
        }

        let payload = serde_json::json!({ "text": self.format_message(alert) });
        let response = self
            .client
            .post(&self.url)
            .json(&payload)
            .send()
            .await
            .map_err(NotificationError::NetworkError)?;

        if response.status().is_success() {
            info!("Webhook notification sent successfully");
            Ok(())
        } else {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            error!("Failed to send webhook: {} - {}", status, body);
            Err(NotificationError::SendFailed(format!(
                "HTTP {}: {}",
                status, body
            )))
        }
    }

    fn is_enabled(&self) -> bool {
        !self.url.is_empty()
    }

    fn name(&self) -> &str {
        "webhook"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_format_plain_text_without_markup() {
        let sender = WebhookSender::new("https://example.com/hook".to_string());
        let alert = Alert::new(AlertEvent::ExitWarning {
            symbol: "005930".to_string(),
            name: Some("삼성전자".to_string()),
            mode: "스윙".to_string(),
            price: dec!(72800),
            reasons: vec!["RSI 과열".to_string()],
        });

        let message = sender.format_message(&alert);
        assert!(message.contains("[청산 경고/스윙]"));
        assert!(message.contains("RSI 과열"));
        assert!(!message.contains("<b>"));
    }

    #[test]
    fn test_disabled_without_url() {
        let sender = WebhookSender::new(String::new());
        assert!(!sender.is_enabled());
    }
}
