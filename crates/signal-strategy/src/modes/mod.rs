//! 모드별 분류기와 공통 헬퍼.

pub mod daytrade;
pub mod longterm;
pub mod swing;

use crate::config::StrategyConfig;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use signal_core::{
    ClassifiedSignal, Fundamentals, IndicatorRow, SignalMode, SignalStatus, Symbol,
};
use tracing::debug;

/// 분류기 입력 스냅샷.
///
/// `rows`는 날짜 오름차순 지표 행이며, 마지막 행이 최신입니다.
/// 펀더멘털은 장기 모드에서만 사용되고 없으면 해당 조건을 건너뜁니다.
#[derive(Debug, Clone)]
pub struct StrategySnapshot<'a> {
    /// 종목
    pub symbol: Symbol,
    /// 종목명 (있는 경우)
    pub name: Option<String>,
    /// 지표 행 (날짜 오름차순)
    pub rows: &'a [IndicatorRow],
    /// 외부에서 공급된 펀더멘털
    pub fundamentals: Option<Fundamentals>,
}

/// 모드에 해당하는 분류기를 호출합니다.
pub fn classify(
    mode: SignalMode,
    snapshot: &StrategySnapshot<'_>,
    config: &StrategyConfig,
) -> ClassifiedSignal {
    let signal = match mode {
        SignalMode::Daytrade => daytrade::classify(snapshot, &config.daytrade),
        SignalMode::Swing => swing::classify(snapshot, &config.swing),
        SignalMode::Longterm => longterm::classify(snapshot, &config.longterm),
    };
    debug!(
        symbol = %signal.symbol,
        mode = %signal.mode,
        status = %signal.status,
        reason = %signal.reason_text(),
        "신호 분류 완료"
    );
    signal
}

/// `anchor` 대비 `price`가 허용 범위(%) 안에 있는지 확인합니다.
pub(crate) fn near_pct(price: Decimal, anchor: Decimal, tolerance_pct: Decimal) -> bool {
    if anchor <= Decimal::ZERO {
        return false;
    }
    (price - anchor).abs() / anchor * dec!(100) <= tolerance_pct
}

/// 이동평균 기울기 (최신 값 - `lookback`봉 전 값).
///
/// 두 시점 중 하나라도 값이 없으면 `None`.
pub(crate) fn ma_slope(
    rows: &[IndicatorRow],
    column: fn(&IndicatorRow) -> Option<Decimal>,
    lookback: usize,
) -> Option<Decimal> {
    if rows.len() <= lookback {
        return None;
    }
    let latest = column(rows.last()?)?;
    let earlier = column(&rows[rows.len() - 1 - lookback])?;
    Some(latest - earlier)
}

/// 현재가 기준 손절가를 계산합니다.
pub(crate) fn stop_loss_price(price: Decimal, stop_loss_pct: Decimal) -> Decimal {
    price * (dec!(100) - stop_loss_pct) / dec!(100)
}

/// 필수 지표가 비어 있을 때의 보류 신호를 생성합니다.
pub(crate) fn abstain(
    mode: SignalMode,
    snapshot: &StrategySnapshot<'_>,
    stop_loss_pct: Decimal,
) -> ClassifiedSignal {
    ClassifiedSignal {
        mode,
        symbol: snapshot.symbol.clone(),
        name: snapshot.name.clone(),
        entry_signal: false,
        exit_signal: false,
        status: SignalStatus::Watch,
        status_text: "지표 데이터 부족".to_string(),
        reasons: Vec::new(),
        recommendation: "데이터 확보 후 재분석 필요".to_string(),
        stop_loss_pct,
        stop_loss_price: None,
    }
}

#[cfg(test)]
pub(crate) mod testutil {
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use signal_core::{DailyBar, IndicatorRow, MarketKind, Symbol};

    pub fn symbol() -> Symbol {
        Symbol {
            code: "005930".to_string(),
            market: MarketKind::KrStock,
        }
    }

    pub fn row(day: u64, close: Decimal) -> IndicatorRow {
        let date = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap() + chrono::Days::new(day);
        IndicatorRow::bare(DailyBar::new(
            date,
            close,
            close + dec!(100),
            close - dec!(100),
            close,
            1_000_000,
        ))
    }
}
