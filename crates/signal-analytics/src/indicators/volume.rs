//! 거래량 비율 롤링 계산.

use rust_decimal::Decimal;

/// 거래량 비율 롤링 계산.
///
/// 당일 거래량 ÷ 직전 `window`일 평균 거래량. 분모에 당일은 포함하지
/// 않으므로 급증한 당일 거래량이 기준선을 희석하지 않습니다.
///
/// # Returns
/// 입력과 같은 길이의 벡터. 직전 `window`일이 확보되는 `window` 인덱스부터
/// 채워지며, 기준 평균이 0이면 `None`.
pub fn volume_ratio_series(volumes: &[u64], window: usize) -> Vec<Option<Decimal>> {
    let mut result = vec![None; volumes.len()];
    if window == 0 || volumes.len() <= window {
        return result;
    }

    let divisor = Decimal::from(window as u64);
    let mut rolling_sum: u128 = volumes[..window].iter().map(|&v| u128::from(v)).sum();

    for i in window..volumes.len() {
        let baseline = Decimal::from(rolling_sum) / divisor;
        if !baseline.is_zero() {
            result[i] = Some(Decimal::from(volumes[i]) / baseline);
        }
        rolling_sum += u128::from(volumes[i]);
        rolling_sum -= u128::from(volumes[i - window]);
    }

    result
}
