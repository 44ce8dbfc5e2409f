//! RSI (Relative Strength Index) 롤링 계산.

use rust_decimal::Decimal;

/// Wilder 방식 RSI 롤링 계산.
///
/// 첫 값은 처음 `period`개 변화분의 단순 평균으로 시드하고, 이후
/// `α = 1/period` 지수 평활로 평균 상승/하락폭을 갱신합니다.
///
/// 엣지 케이스:
/// - 평균 하락폭과 평균 상승폭이 모두 0이면(무변동 구간) 50을 반환합니다.
/// - 평균 하락폭만 0이면 100으로 포화합니다.
///
/// # Returns
/// 입력과 같은 길이의 벡터. 처음 `period`개 원소는 `None`.
pub fn rsi_series(closes: &[Decimal], period: usize) -> Vec<Option<Decimal>> {
    let mut result = vec![None; closes.len()];
    if period == 0 || closes.len() < period + 1 {
        return result;
    }

    let divisor = Decimal::from(period as u64);
    let retain = Decimal::from(period as u64 - 1);
    let hundred = Decimal::from(100);

    let mut avg_gain = Decimal::ZERO;
    let mut avg_loss = Decimal::ZERO;
    for i in 1..=period {
        let change = closes[i] - closes[i - 1];
        if change > Decimal::ZERO {
            avg_gain += change;
        } else {
            avg_loss += change.abs();
        }
    }
    avg_gain /= divisor;
    avg_loss /= divisor;
    result[period] = Some(rsi_value(avg_gain, avg_loss, hundred));

    for i in (period + 1)..closes.len() {
        let change = closes[i] - closes[i - 1];
        if change > Decimal::ZERO {
            avg_gain = (avg_gain * retain + change) / divisor;
            avg_loss = (avg_loss * retain) / divisor;
        } else {
            avg_gain = (avg_gain * retain) / divisor;
            avg_loss = (avg_loss * retain + change.abs()) / divisor;
        }
        result[i] = Some(rsi_value(avg_gain, avg_loss, hundred));
    }

    result
}

fn rsi_value(avg_gain: Decimal, avg_loss: Decimal, hundred: Decimal) -> Decimal {
    if avg_loss.is_zero() {
        // 무변동 구간은 방향성 없음, 상승만 있으면 포화
        if avg_gain.is_zero() {
            return Decimal::from(50);
        }
        return hundred;
    }
    let rs = avg_gain / avg_loss;
    hundred - (hundred / (Decimal::ONE + rs))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_rsi_warmup_is_none() {
        let closes: Vec<Decimal> = (0..20).map(|i| Decimal::from(100 + i)).collect();
        let rsi = rsi_series(&closes, 14);
        assert!(rsi[..14].iter().all(Option::is_none));
        assert!(rsi[14].is_some());
    }

    #[test]
    fn test_rsi_all_gains_saturates_at_100() {
        let closes: Vec<Decimal> = (0..30).map(|i| Decimal::from(100 + i * 10)).collect();
        let rsi = rsi_series(&closes, 14);
        assert_eq!(rsi.last().unwrap().unwrap(), dec!(100));
    }

    #[test]
    fn test_rsi_constant_series_is_50() {
        let closes = vec![dec!(70000); 40];
        let rsi = rsi_series(&closes, 14);
        assert_eq!(rsi.last().unwrap().unwrap(), dec!(50));
    }

    #[test]
    fn test_rsi_all_losses_is_0() {
        let closes: Vec<Decimal> = (0..30).map(|i| Decimal::from(10_000 - i * 100)).collect();
        let rsi = rsi_series(&closes, 14);
        assert_eq!(rsi.last().unwrap().unwrap(), Decimal::ZERO);
    }

    proptest! {
        /// RSI는 정의된 구간에서 항상 0~100 범위 안이어야 한다.
        #[test]
        fn prop_rsi_bounded(closes in prop::collection::vec(100i64..1_000_000, 15..80)) {
            let decimals: Vec<Decimal> = closes.iter().map(|&v| Decimal::from(v)).collect();
            for value in rsi_series(&decimals, 14).into_iter().flatten() {
                prop_assert!(value >= Decimal::ZERO);
                prop_assert!(value <= Decimal::from(100));
            }
        }
    }
}
