//! 스윙 분류기 시나리오 테스트.
//!
//! 합성 일봉 시계열을 지표 엔진에 통과시킨 뒤 분류 결과를 검증합니다.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use signal_analytics::{compute_indicators, IndicatorConfig};
use signal_core::{DailyBar, PriceSeries, SignalMode, SignalStatus, Symbol};
use signal_strategy::{classify, StrategyConfig, StrategySnapshot};

fn bar(day: u64, close: Decimal) -> DailyBar {
    let date = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap() + chrono::Days::new(day);
    DailyBar::new(
        date,
        close,
        close + dec!(50),
        close - dec!(50),
        close,
        1_000_000,
    )
}

fn series(closes: &[Decimal]) -> PriceSeries {
    PriceSeries::new(
        closes
            .iter()
            .enumerate()
            .map(|(i, &c)| bar(i as u64, c))
            .collect(),
    )
}

/// 횡보 후 하락, 이어서 완만한 회복이 진행 중인 100일 시계열.
///
/// 마지막 날 기준: 종가가 MA20 바로 위, MA20 상승 전환, MACD가 시그널
/// 위로 회복, RSI는 눌림 구간(40대 중반).
fn pullback_recovery_series() -> PriceSeries {
    let mut closes = vec![dec!(10000); 70];
    for i in 1..=10u32 {
        closes.push(dec!(10000) - dec!(80) * Decimal::from(i));
    }
    for i in 1..=20u32 {
        closes.push(dec!(9200) + dec!(10) * Decimal::from(i));
    }
    assert_eq!(closes.len(), 100);
    series(&closes)
}

#[test]
fn test_pullback_recovery_triggers_swing_entry() {
    let prices = pullback_recovery_series();
    let rows = compute_indicators(&prices, &IndicatorConfig::default());

    let latest = rows.last().unwrap();
    let rsi = latest.rsi14.unwrap();
    assert!(rsi >= dec!(40) && rsi <= dec!(50), "RSI {}", rsi);
    assert!(latest.close() >= latest.ma20.unwrap());

    let snapshot = StrategySnapshot {
        symbol: Symbol::parse("005930"),
        name: Some("삼성전자".to_string()),
        rows: &rows,
        fundamentals: None,
    };
    let signal = classify(SignalMode::Swing, &snapshot, &StrategyConfig::default());

    assert!(signal.entry_signal);
    assert!(!signal.exit_signal);
    assert_eq!(signal.status, SignalStatus::EntryReady);
    assert!(signal.reasons.contains(&"MACD 골든크로스".to_string()));
    assert!(signal.reasons.contains(&"MA20 지지 확인".to_string()));
    // 손절가는 현재가의 96%
    assert_eq!(signal.stop_loss_price, Some(dec!(9024)));
}

#[test]
fn test_flat_then_crash_triggers_swing_exit() {
    // 50일 횡보 후 하루 -10% 급락
    let mut closes = vec![dec!(10000); 50];
    closes.push(dec!(9000));
    let prices = series(&closes);
    let rows = compute_indicators(&prices, &IndicatorConfig::default());

    let latest = rows.last().unwrap();
    // 급락으로 RSI가 급격히 떨어진다
    assert!(latest.rsi14.unwrap() < dec!(30));

    let snapshot = StrategySnapshot {
        symbol: Symbol::parse("005930"),
        name: None,
        rows: &rows,
        fundamentals: None,
    };
    let signal = classify(SignalMode::Swing, &snapshot, &StrategyConfig::default());

    assert!(signal.exit_signal);
    assert_eq!(signal.status, SignalStatus::ExitWarning);
    assert_eq!(signal.reasons, vec!["MA20 하향 이탈".to_string()]);
}

#[test]
fn test_short_history_abstains() {
    let closes = vec![dec!(10000); 10];
    let prices = series(&closes);
    let rows = compute_indicators(&prices, &IndicatorConfig::default());

    let snapshot = StrategySnapshot {
        symbol: Symbol::parse("005930"),
        name: None,
        rows: &rows,
        fundamentals: None,
    };
    let signal = classify(SignalMode::Swing, &snapshot, &StrategyConfig::default());

    assert!(!signal.entry_signal);
    assert!(!signal.exit_signal);
    assert_eq!(signal.status, SignalStatus::Watch);
    assert_eq!(signal.status_text, "지표 데이터 부족");
}
