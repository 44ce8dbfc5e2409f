//! MACD (Moving Average Convergence Divergence) 롤링 계산.
//!
//! 입력은 종가 시계열입니다. MACD 선은 장기 EMA가 정의되는 시점부터,
//! 시그널/히스토그램은 시그널 EMA 창까지 채워진 시점부터 정의됩니다.

use super::moving_average::ema_series;
use rust_decimal::Decimal;

/// 한 시점의 MACD 값 묶음.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MacdPoint {
    /// MACD 선 (단기 EMA - 장기 EMA)
    pub macd: Decimal,
    /// 시그널 선 (MACD의 EMA), 창이 차기 전에는 None
    pub signal: Option<Decimal>,
    /// 히스토그램 (MACD - 시그널)
    pub histogram: Option<Decimal>,
}

/// MACD 롤링 계산.
///
/// # Arguments
/// * `closes` - 종가 데이터 (날짜 오름차순)
/// * `fast` - 단기 EMA 기간 (일반적으로 12)
/// * `slow` - 장기 EMA 기간 (일반적으로 26)
/// * `signal` - 시그널 EMA 기간 (일반적으로 9)
///
/// # Returns
/// 입력과 같은 길이의 벡터. MACD 선은 `slow - 1` 인덱스부터,
/// 시그널과 히스토그램은 `slow + signal - 2` 인덱스부터 채워집니다.
pub fn macd_series(
    closes: &[Decimal],
    fast: usize,
    slow: usize,
    signal: usize,
) -> Vec<Option<MacdPoint>> {
    let mut result = vec![None; closes.len()];
    if fast == 0 || slow == 0 || signal == 0 || closes.len() < slow {
        return result;
    }

    let fast_ema = ema_series(closes, fast);
    let slow_ema = ema_series(closes, slow);

    // MACD 선: 장기 EMA가 정의되는 slow-1 인덱스부터
    let macd_line: Vec<Decimal> = (slow - 1..closes.len())
        .map(|i| {
            let f = fast_ema[i].unwrap_or(Decimal::ZERO);
            let s = slow_ema[i].unwrap_or(Decimal::ZERO);
            f - s
        })
        .collect();

    let signal_line = ema_series(&macd_line, signal);

    for (offset, &macd) in macd_line.iter().enumerate() {
        let i = slow - 1 + offset;
        let sig = signal_line[offset];
        result[i] = Some(MacdPoint {
            macd,
            signal: sig,
            histogram: sig.map(|s| macd - s),
        });
    }

    result
}
