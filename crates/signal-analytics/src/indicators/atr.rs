//! ATR (Average True Range) 롤링 계산.

use rust_decimal::Decimal;

/// ATR 롤링 계산.
///
/// TR = max(고가-저가, |고가-전일종가|, |저가-전일종가|).
/// ATR은 TR의 직전 `period`개 단순 평균입니다 (Wilder 평활이 아님).
///
/// # Returns
/// 입력과 같은 길이의 벡터. TR은 전일 종가가 필요하므로 두 번째 일봉부터
/// 정의되고, ATR은 `period` 인덱스부터 채워집니다.
pub fn atr_series(
    highs: &[Decimal],
    lows: &[Decimal],
    closes: &[Decimal],
    period: usize,
) -> Vec<Option<Decimal>> {
    let len = closes.len();
    let mut result = vec![None; len];
    if period == 0 || len < period + 1 || highs.len() != len || lows.len() != len {
        return result;
    }

    let mut true_ranges = Vec::with_capacity(len - 1);
    for i in 1..len {
        let hl = highs[i] - lows[i];
        let hc = (highs[i] - closes[i - 1]).abs();
        let lc = (lows[i] - closes[i - 1]).abs();
        true_ranges.push(hl.max(hc).max(lc));
    }

    let divisor = Decimal::from(period as u64);
    let mut rolling_sum: Decimal = true_ranges[..period].iter().sum();
    result[period] = Some(rolling_sum / divisor);

    for i in (period + 1)..len {
        // true_ranges[i-1]이 i번째 일봉의 TR
        rolling_sum += true_ranges[i - 1] - true_ranges[i - 1 - period];
        result[i] = Some(rolling_sum / divisor);
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_atr_constant_range() {
        // 고가-저가가 항상 100이고 갭이 없으면 ATR은 100
        let closes = vec![dec!(1000); 20];
        let highs = vec![dec!(1050); 20];
        let lows = vec![dec!(950); 20];

        let atr = atr_series(&highs, &lows, &closes, 14);
        assert!(atr[13].is_none());
        assert_eq!(atr[14], Some(dec!(100)));
        assert_eq!(atr[19], Some(dec!(100)));
    }

    #[test]
    fn test_atr_gap_uses_prev_close() {
        // 전일 종가 1000 → 당일 저가 1200 갭 상승이면 TR은 |저가-전일종가|가 아니라
        // |고가-전일종가| = 300이 지배한다
        let closes = vec![dec!(1000), dec!(1250)];
        let highs = vec![dec!(1010), dec!(1300)];
        let lows = vec![dec!(990), dec!(1200)];

        let atr = atr_series(&highs, &lows, &closes, 1);
        assert_eq!(atr[1], Some(dec!(300)));
    }

    #[test]
    fn test_atr_insufficient_history() {
        let closes = vec![dec!(1000); 10];
        let highs = vec![dec!(1050); 10];
        let lows = vec![dec!(950); 10];
        assert!(atr_series(&highs, &lows, &closes, 14).iter().all(Option::is_none));
    }
}
