//! 환경변수 기반 설정 모듈.

use crate::error::{Result, WatcherError};
use rust_decimal::Decimal;
use signal_core::SignalMode;
use std::path::PathBuf;
use std::time::Duration;

/// 보유 포지션. `POSITIONS` 환경변수의 `CODE=매수가@수량` 항목 하나
/// (수량 생략 시 1주).
#[derive(Debug, Clone, PartialEq)]
pub struct Position {
    /// 종목 코드
    pub code: String,
    /// 평균 매수가
    pub buy_price: Decimal,
    /// 보유 수량
    pub quantity: u32,
}

impl Position {
    /// `"005930=72800@10"` 또는 `"005930=72800"` 형식을 파싱합니다.
    pub fn parse(text: &str) -> Result<Self> {
        let (code, rest) = text.split_once('=').ok_or_else(|| {
            WatcherError::Config(format!("포지션 형식 오류 (CODE=매수가[@수량]): {text}"))
        })?;
        let (price, quantity) = match rest.split_once('@') {
            Some((price, quantity)) => (price, Some(quantity)),
            None => (rest, None),
        };

        let buy_price: Decimal = price
            .trim()
            .parse()
            .map_err(|_| WatcherError::Config(format!("매수가 파싱 실패: {price}")))?;
        if buy_price <= Decimal::ZERO {
            return Err(WatcherError::Config(format!(
                "매수가는 양수여야 합니다: {price}"
            )));
        }
        let quantity: u32 = match quantity {
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|_| WatcherError::Config(format!("수량 파싱 실패: {raw}")))?,
            None => 1,
        };

        Ok(Self {
            code: code.trim().to_string(),
            buy_price,
            quantity,
        })
    }
}

/// Watcher 전체 설정
#[derive(Debug, Clone)]
pub struct WatcherConfig {
    /// 감시 대상 종목 코드 (필수)
    pub stock_codes: Vec<String>,
    /// 보유 포지션 (손절/익절 감시 대상)
    pub positions: Vec<Position>,
    /// 기본 신호 분류 모드 (daytrade/swing/longterm)
    pub mode: SignalMode,
    /// 종목별 모드 오버라이드 (`SIGNAL_MODE_<코드>` 환경변수)
    pub mode_overrides: std::collections::HashMap<String, SignalMode>,
    /// 점검 주기 (초 단위)
    pub check_interval_seconds: u64,
    /// 동일 알림 재전송 쿨다운 (분 단위)
    pub alert_cooldown_minutes: u64,
    /// 매수 구간 진입 판정 허용 오차 (%)
    pub entry_tolerance_pct: Decimal,
    /// 손절가 접근 판정 허용 오차 (%)
    pub stop_loss_tolerance_pct: Decimal,
    /// 목표가 접근 판정 허용 오차 (%)
    pub take_profit_tolerance_pct: Decimal,
    /// 알림 상태 파일 경로
    pub alert_state_path: PathBuf,
    /// 1회 실행 후 종료
    pub run_once: bool,
    /// 종목당 조회할 일봉 수
    pub history_limit: usize,
}

impl WatcherConfig {
    /// 환경변수에서 설정 로드
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let stock_codes: Vec<String> = std::env::var("STOCK_CODES")
            .map_err(|_| {
                WatcherError::Config("STOCK_CODES 환경변수가 설정되지 않았습니다".to_string())
            })?
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        if stock_codes.is_empty() {
            return Err(WatcherError::Config(
                "STOCK_CODES에 최소 1개 종목이 필요합니다".to_string(),
            ));
        }

        let positions = match std::env::var("POSITIONS") {
            Ok(raw) => raw
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(Position::parse)
                .collect::<Result<Vec<_>>>()?,
            Err(_) => Vec::new(),
        };

        let mode = std::env::var("SIGNAL_MODE")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(SignalMode::Swing);

        // 종목별 모드 오버라이드 (예: SIGNAL_MODE_005930=daytrade)
        let mode_overrides = stock_codes
            .iter()
            .filter_map(|code| {
                std::env::var(format!("SIGNAL_MODE_{code}"))
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .map(|mode| (code.clone(), mode))
            })
            .collect();

        Ok(Self {
            stock_codes,
            positions,
            mode,
            mode_overrides,
            check_interval_seconds: env_var_parse("CHECK_INTERVAL_SECONDS", 1800),
            alert_cooldown_minutes: env_var_parse("ALERT_COOLDOWN_MINUTES", 60),
            entry_tolerance_pct: env_var_parse("ENTRY_TOLERANCE_PCT", Decimal::ONE),
            stop_loss_tolerance_pct: env_var_parse("STOP_LOSS_TOLERANCE_PCT", Decimal::ONE),
            take_profit_tolerance_pct: env_var_parse("TAKE_PROFIT_TOLERANCE_PCT", Decimal::ONE),
            alert_state_path: std::env::var("ALERT_STATE_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("alert_state.json")),
            run_once: env_var_bool("RUN_ONCE", false),
            history_limit: env_var_parse("HISTORY_LIMIT", 130),
        })
    }

    /// 점검 주기를 Duration으로 반환
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.check_interval_seconds)
    }

    /// 알림 쿨다운을 Duration으로 반환
    pub fn cooldown(&self) -> Duration {
        Duration::from_secs(self.alert_cooldown_minutes * 60)
    }

    /// 종목 코드의 보유 포지션을 찾습니다.
    pub fn position_for(&self, code: &str) -> Option<&Position> {
        self.positions.iter().find(|p| p.code == code)
    }

    /// 종목에 적용할 분석 모드 (오버라이드 우선).
    pub fn mode_for(&self, code: &str) -> SignalMode {
        self.mode_overrides.get(code).copied().unwrap_or(self.mode)
    }
}

/// 환경변수에서 값을 파싱 (실패 시 기본값 사용)
fn env_var_parse<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

/// 환경변수에서 bool 값 파싱
fn env_var_bool(key: &str, default: bool) -> bool {
    std::env::var(key)
        .map(|v| v == "true" || v == "1")
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_parse_position() {
        let position = Position::parse("005930=72800@10").unwrap();
        assert_eq!(position.code, "005930");
        assert_eq!(position.buy_price, dec!(72800));
        assert_eq!(position.quantity, 10);
    }

    #[test]
    fn test_parse_position_with_spaces() {
        let position = Position::parse(" 000660 = 95000.5 @ 5 ").unwrap();
        assert_eq!(position.code, "000660");
        assert_eq!(position.buy_price, dec!(95000.5));
        assert_eq!(position.quantity, 5);
    }

    #[test]
    fn test_parse_position_without_quantity() {
        let position = Position::parse("005930=72800").unwrap();
        assert_eq!(position.buy_price, dec!(72800));
        assert_eq!(position.quantity, 1);
    }

    #[test]
    fn test_parse_position_rejects_bad_format() {
        assert!(Position::parse("005930").is_err());
        assert!(Position::parse("005930=abc@10").is_err());
        assert!(Position::parse("005930=-100@10").is_err());
        assert!(Position::parse("005930=72800@x").is_err());
    }
}
