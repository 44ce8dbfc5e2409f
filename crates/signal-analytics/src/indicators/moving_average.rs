//! 단순/지수 이동평균 롤링 계산.

use rust_decimal::Decimal;

/// SMA (Simple Moving Average) 롤링 계산.
///
/// # Arguments
/// * `values` - 가격 데이터 (날짜 오름차순)
/// * `window` - 이동평균 창
///
/// # Returns
/// 입력과 같은 길이의 벡터. 처음 `window - 1`개 원소는 `None`.
pub fn sma_series(values: &[Decimal], window: usize) -> Vec<Option<Decimal>> {
    let mut result = vec![None; values.len()];
    if window == 0 || values.len() < window {
        return result;
    }

    let divisor = Decimal::from(window as u64);
    let mut rolling_sum: Decimal = values[..window].iter().sum();
    result[window - 1] = Some(rolling_sum / divisor);

    for i in window..values.len() {
        rolling_sum += values[i] - values[i - window];
        result[i] = Some(rolling_sum / divisor);
    }

    result
}

/// EMA (Exponential Moving Average) 롤링 계산.
///
/// 첫 값은 처음 `period`개의 단순 평균으로 시드하고, 이후
/// `multiplier = 2 / (period + 1)`로 평활합니다.
pub fn ema_series(values: &[Decimal], period: usize) -> Vec<Option<Decimal>> {
    let mut result = vec![None; values.len()];
    if period == 0 || values.len() < period {
        return result;
    }

    let multiplier = Decimal::from(2) / Decimal::from(period as u64 + 1);
    let seed: Decimal = values[..period].iter().sum::<Decimal>() / Decimal::from(period as u64);
    let mut ema = seed;
    result[period - 1] = Some(ema);

    for i in period..values.len() {
        ema = (values[i] - ema) * multiplier + ema;
        result[i] = Some(ema);
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_sma_matches_naive_mean() {
        let values = vec![dec!(10), dec!(20), dec!(30), dec!(40), dec!(50)];
        let sma = sma_series(&values, 3);

        assert_eq!(sma[0], None);
        assert_eq!(sma[1], None);
        assert_eq!(sma[2], Some(dec!(20)));
        assert_eq!(sma[3], Some(dec!(30)));
        assert_eq!(sma[4], Some(dec!(40)));
    }

    #[test]
    fn test_sma_short_input() {
        let values = vec![dec!(10), dec!(20)];
        assert!(sma_series(&values, 5).iter().all(Option::is_none));
    }

    #[test]
    fn test_ema_constant_series() {
        let values = vec![dec!(100); 10];
        let ema = ema_series(&values, 5);
        assert_eq!(ema[9], Some(dec!(100)));
    }

    proptest! {
        /// SMA는 정확히 직전 window개 값의 산술 평균과 일치해야 한다.
        #[test]
        fn prop_sma_equals_trailing_mean(values in prop::collection::vec(1i64..1_000_000, 1..80), window in 1usize..30) {
            let decimals: Vec<Decimal> = values.iter().map(|&v| Decimal::from(v)).collect();
            let sma = sma_series(&decimals, window);

            for (i, slot) in sma.iter().enumerate() {
                if i + 1 < window {
                    prop_assert!(slot.is_none());
                } else {
                    let naive: Decimal = decimals[i + 1 - window..=i].iter().sum::<Decimal>()
                        / Decimal::from(window as u64);
                    prop_assert_eq!(slot.unwrap(), naive);
                }
            }
        }
    }
}
