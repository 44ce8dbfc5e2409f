//! 종목별 평가 파이프라인.
//!
//! 한 사이클마다 감시 종목 전체를 평가하고 조건을 만족한 알림을
//! 생성합니다. 한 종목의 수집/평가 실패는 기록만 하고 다음 종목으로
//! 넘어갑니다.

use crate::alert_state::AlertState;
use crate::config::{Position, WatcherConfig};
use crate::error::Result;
use chrono::Utc;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use signal_analytics::{
    analyze_investor_pattern, compute_indicators, detect_recovery_signal, IndicatorConfig,
    PriceContext,
};
use signal_core::{PatternType, SignalStatus, Symbol};
use signal_data::ProviderSet;
use signal_notification::{Alert, AlertEvent, AlertPriority, NotificationManager};
use signal_risk::{buy_ranges, stop_loss, take_profits, RiskConfig};
use signal_strategy::{classify, StrategyConfig, StrategySnapshot};
use std::time::Instant;
use tracing::{error, info, warn};

/// 수급 패턴 분석에 사용할 최근 일수.
const PATTERN_DAYS: usize = 5;

/// 사이클 통계.
#[derive(Debug, Default)]
pub struct WatchStats {
    /// 평가한 종목 수
    pub total: usize,
    /// 전송한 알림 수
    pub alerts_sent: usize,
    /// 쿨다운으로 건너뛴 알림 수
    pub suppressed: usize,
    /// 평가 실패 종목 수
    pub errors: usize,
    /// 소요 시간
    pub elapsed: std::time::Duration,
}

impl WatchStats {
    /// 통계 요약 로그 출력
    pub fn log_summary(&self) {
        info!(
            total = self.total,
            alerts_sent = self.alerts_sent,
            suppressed = self.suppressed,
            errors = self.errors,
            elapsed = format!("{:.1}s", self.elapsed.as_secs_f64()),
            "사이클 완료"
        );
    }
}

/// 감시 종목 전체를 한 번 평가하고 알림을 전송합니다.
pub async fn run_cycle(
    config: &WatcherConfig,
    notifier: &NotificationManager,
    state: &mut AlertState,
) -> WatchStats {
    let started = Instant::now();
    let mut stats = WatchStats::default();

    for code in &config.stock_codes {
        stats.total += 1;

        let alerts = match evaluate_symbol(code, config).await {
            Ok(alerts) => alerts,
            Err(e) => {
                error!(code, error = %e, "종목 평가 실패");
                stats.errors += 1;
                continue;
            }
        };

        for alert in alerts {
            let state_code = alert.event.symbol().unwrap_or("SYSTEM").to_string();
            let kind = alert.event.kind_key();
            let now = Utc::now();

            if !state.should_notify(&state_code, kind, now) {
                stats.suppressed += 1;
                continue;
            }

            match notifier.notify(&alert).await {
                Ok(()) => {
                    state.mark_sent(&state_code, kind, now);
                    stats.alerts_sent += 1;
                }
                Err(e) => {
                    error!(code = state_code, kind, error = %e, "알림 전송 실패");
                    stats.errors += 1;
                }
            }
        }
    }

    if let Err(e) = state.save() {
        error!(error = %e, "알림 상태 저장 실패");
    }

    stats.elapsed = started.elapsed();
    stats
}

/// 한 종목을 평가하고 조건을 만족한 알림 목록을 반환합니다.
async fn evaluate_symbol(code: &str, config: &WatcherConfig) -> Result<Vec<Alert>> {
    let symbol = Symbol::parse(code);
    let providers = ProviderSet::for_symbol(&symbol)?;

    let series = providers
        .price
        .daily_prices(&symbol, config.history_limit)
        .await?;
    let name = match providers.price.stock_name(&symbol).await {
        Ok(name) => name,
        Err(e) => {
            warn!(code, error = %e, "종목명 조회 실패, 코드로 대체");
            None
        }
    };

    let rows = compute_indicators(&series, &IndicatorConfig::default());
    let latest_row = rows.last();
    let current_price = latest_row.map(|r| r.close()).unwrap_or_default();
    let ma20 = latest_row.and_then(|r| r.ma20);
    let rsi = latest_row.and_then(|r| r.rsi14);

    let mode = config.mode_for(&symbol.code);

    // 장기 모드만 펀더멘털이 필요하고, 실패해도 분류기는 관망으로 처리
    let fundamentals = if mode == signal_core::SignalMode::Longterm {
        match &providers.fundamentals {
            Some(provider) => match provider.fundamentals(&symbol).await {
                Ok(f) => Some(f),
                Err(e) => {
                    warn!(code, error = %e, "펀더멘털 조회 실패");
                    None
                }
            },
            None => None,
        }
    } else {
        None
    };

    let snapshot = StrategySnapshot {
        symbol: symbol.clone(),
        name: name.clone(),
        rows: &rows,
        fundamentals,
    };
    let signal = classify(mode, &snapshot, &StrategyConfig::default());

    let mut alerts = Vec::new();

    if signal.entry_signal && signal.status == SignalStatus::EntryReady {
        alerts.push(
            Alert::new(AlertEvent::EntrySignal {
                symbol: symbol.code.clone(),
                name: name.clone(),
                mode: signal.mode.to_string(),
                price: current_price,
                reasons: signal.reasons.clone(),
                stop_loss_price: signal.stop_loss_price,
            })
            .with_priority(AlertPriority::High),
        );
    }
    if signal.exit_signal {
        alerts.push(
            Alert::new(AlertEvent::ExitWarning {
                symbol: symbol.code.clone(),
                name: name.clone(),
                mode: signal.mode.to_string(),
                price: current_price,
                reasons: signal.reasons.clone(),
            })
            .with_priority(AlertPriority::High),
        );
    }

    // 수급 패턴: 국내 종목만 가능, 없으면 패턴 불명으로 리스크 계산
    let mut pattern_type = PatternType::Unclear;
    if let Some(flow_provider) = &providers.flow {
        match flow_provider.investor_flows(&symbol).await {
            Ok(flows) => {
                let price_context = ma20.map(|ma20| PriceContext {
                    close: current_price,
                    ma20,
                });
                let pattern = analyze_investor_pattern(&flows, price_context, PATTERN_DAYS);
                if pattern.data_available {
                    pattern_type = pattern.pattern_type;
                }

                // 회복 신호는 이탈 패턴에서 반전될 때만 의미가 있음
                if pattern_type == PatternType::RealBreakdown {
                    let recovery = detect_recovery_signal(&flows);
                    if recovery.has_signal {
                        alerts.push(Alert::new(AlertEvent::RecoveryDetected {
                            symbol: symbol.code.clone(),
                            name: name.clone(),
                            message: recovery.message,
                        }));
                    }
                }
            }
            Err(e) => {
                warn!(code, error = %e, "수급 데이터 조회 실패");
            }
        }
    }

    // 권장 매수 구간 진입 감시
    let buy_plan = buy_ranges(pattern_type, &rows, current_price, &RiskConfig::default());
    if let Some(range) = &buy_plan.first {
        if in_buy_zone(current_price, range.low, range.high, config.entry_tolerance_pct) {
            alerts.push(Alert::new(AlertEvent::BuyZoneEntered {
                symbol: symbol.code.clone(),
                name: name.clone(),
                current_price,
                low: range.low,
                high: range.high,
                reason: range.reason.clone(),
            }));
        }
    }

    if let Some(position) = config.position_for(&symbol.code) {
        alerts.extend(position_alerts(
            position,
            &name,
            current_price,
            ma20,
            rsi,
            pattern_type,
            config,
        ));
    }

    Ok(alerts)
}

/// 보유 포지션의 손절/익절 조건을 평가합니다.
fn position_alerts(
    position: &Position,
    name: &Option<String>,
    current_price: Decimal,
    ma20: Option<Decimal>,
    rsi: Option<Decimal>,
    pattern: PatternType,
    config: &WatcherConfig,
) -> Vec<Alert> {
    let mut alerts = Vec::new();
    let risk_config = RiskConfig::default();

    let stop_plan = stop_loss(pattern, ma20, position.buy_price);
    if stop_loss_breached(current_price, stop_plan.price, config.stop_loss_tolerance_pct) {
        alerts.push(
            Alert::new(AlertEvent::StopLossTriggered {
                symbol: position.code.clone(),
                name: name.clone(),
                current_price,
                stop_price: stop_plan.price,
                buy_price: position.buy_price,
                quantity: position.quantity,
                loss_pct: change_pct(position.buy_price, current_price),
            })
            .with_priority(AlertPriority::Critical),
        );
    }

    let profit_plan = take_profits(pattern, rsi, position.buy_price, &risk_config);
    if take_profit_reached(
        current_price,
        profit_plan.first,
        config.take_profit_tolerance_pct,
    ) {
        alerts.push(
            Alert::new(AlertEvent::TakeProfitReached {
                symbol: position.code.clone(),
                name: name.clone(),
                current_price,
                target_price: profit_plan.first,
                buy_price: position.buy_price,
                quantity: position.quantity,
                profit_pct: change_pct(position.buy_price, current_price),
            })
            .with_priority(AlertPriority::High),
        );
    }

    alerts
}

/// 현재가가 매수 구간(허용 오차 포함) 안에 들어왔는지 판정합니다.
fn in_buy_zone(current: Decimal, low: Decimal, high: Decimal, tolerance_pct: Decimal) -> bool {
    let low = low * (dec!(100) - tolerance_pct) / dec!(100);
    let high = high * (dec!(100) + tolerance_pct) / dec!(100);
    current >= low && current <= high
}

/// 현재가가 손절가(허용 오차 포함) 이하로 내려왔는지 판정합니다.
fn stop_loss_breached(current: Decimal, stop: Decimal, tolerance_pct: Decimal) -> bool {
    current <= stop * (dec!(100) + tolerance_pct) / dec!(100)
}

/// 현재가가 목표가(허용 오차 포함) 이상으로 올라왔는지 판정합니다.
fn take_profit_reached(current: Decimal, target: Decimal, tolerance_pct: Decimal) -> bool {
    current >= target * (dec!(100) - tolerance_pct) / dec!(100)
}

/// 매수가 대비 등락률 (%).
fn change_pct(buy_price: Decimal, current: Decimal) -> Decimal {
    if buy_price.is_zero() {
        return Decimal::ZERO;
    }
    ((current - buy_price) / buy_price * dec!(100)).round_dp(2)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn config_with_position() -> WatcherConfig {
        WatcherConfig {
            stock_codes: vec!["005930".to_string()],
            positions: vec![Position {
                code: "005930".to_string(),
                buy_price: dec!(100000),
                quantity: 10,
            }],
            mode: signal_core::SignalMode::Swing,
            mode_overrides: std::collections::HashMap::new(),
            check_interval_seconds: 1800,
            alert_cooldown_minutes: 60,
            entry_tolerance_pct: dec!(1),
            stop_loss_tolerance_pct: dec!(1),
            take_profit_tolerance_pct: dec!(1),
            alert_state_path: PathBuf::from("alert_state.json"),
            run_once: true,
            history_limit: 130,
        }
    }

    #[test]
    fn test_stop_loss_breach_with_tolerance() {
        // 허용 오차 1%면 손절가의 101%까지 접근 알림
        assert!(stop_loss_breached(dec!(9690), dec!(9600), dec!(1)));
        assert!(stop_loss_breached(dec!(9600), dec!(9600), dec!(1)));
        assert!(!stop_loss_breached(dec!(9800), dec!(9600), dec!(1)));
    }

    #[test]
    fn test_take_profit_reach_with_tolerance() {
        assert!(take_profit_reached(dec!(10500), dec!(10600), dec!(1)));
        assert!(!take_profit_reached(dec!(10400), dec!(10600), dec!(1)));
    }

    #[test]
    fn test_buy_zone_with_tolerance() {
        // 구간 [9700, 9900), 허용 오차 1% → [9603, 9999]
        assert!(in_buy_zone(dec!(9800), dec!(9700), dec!(9900), dec!(1)));
        assert!(in_buy_zone(dec!(9650), dec!(9700), dec!(9900), dec!(1)));
        assert!(!in_buy_zone(dec!(10100), dec!(9700), dec!(9900), dec!(1)));
        assert!(!in_buy_zone(dec!(9500), dec!(9700), dec!(9900), dec!(1)));
    }

    #[test]
    fn test_position_stop_loss_alert() {
        let config = config_with_position();
        let position = &config.positions[0];

        // 패턴 불명 + MA20 없음이면 손절가는 매수가 기준 97%
        let alerts = position_alerts(
            position,
            &None,
            dec!(96500),
            None,
            Some(dec!(40)),
            PatternType::Unclear,
            &config,
        );

        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].event.kind_key(), "stop_loss");
        assert_eq!(alerts[0].priority, AlertPriority::Critical);
        match &alerts[0].event {
            AlertEvent::StopLossTriggered {
                loss_pct, quantity, ..
            } => {
                assert_eq!(*loss_pct, dec!(-3.50));
                // 보유 수량이 알림에 그대로 실린다
                assert_eq!(*quantity, 10);
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[test]
    fn test_position_take_profit_alert() {
        let config = config_with_position();
        let position = &config.positions[0];

        // 패턴 불명이면 1차 익절가는 매수가의 105%
        let alerts = position_alerts(
            position,
            &None,
            dec!(105200),
            Some(dec!(100000)),
            Some(dec!(55)),
            PatternType::Unclear,
            &config,
        );

        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].event.kind_key(), "take_profit");
        match &alerts[0].event {
            AlertEvent::TakeProfitReached {
                target_price,
                profit_pct,
                quantity,
                ..
            } => {
                assert_eq!(*target_price, dec!(105000.00));
                assert_eq!(*profit_pct, dec!(5.20));
                assert_eq!(*quantity, 10);
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[test]
    fn test_position_quiet_in_normal_range() {
        let config = config_with_position();
        let position = &config.positions[0];

        let alerts = position_alerts(
            position,
            &None,
            dec!(101000),
            Some(dec!(100000)),
            Some(dec!(50)),
            PatternType::Unclear,
            &config,
        );
        assert!(alerts.is_empty());
    }
}
