//! 공용 기술적 지표 계산.
//!
//! 모든 함수는 시계열 전체에 대한 롤링 값을 `Vec<Option<Decimal>>`로
//! 반환합니다. 창이 채워지기 전 구간은 `None`이며, 에러가 아닙니다.

mod atr;
mod macd;
mod moving_average;
mod rsi;
mod volume;

pub use atr::atr_series;
pub use macd::{macd_series, MacdPoint};
pub use moving_average::{ema_series, sma_series};
pub use rsi::rsi_series;
pub use volume::volume_ratio_series;

use rust_decimal::Decimal;
use signal_core::{IndicatorRow, PriceSeries};

/// 지표 계산 설정.
///
/// 원본 스크립트의 모듈 전역 상수 대신 명시적으로 주입되는 설정입니다.
#[derive(Debug, Clone)]
pub struct IndicatorConfig {
    /// 이동평균 창 (기본: 5/20/60/120)
    pub ma_windows: [usize; 4],
    /// RSI 기간 (기본: 14)
    pub rsi_period: usize,
    /// MACD 단기 EMA 기간 (기본: 12)
    pub macd_fast: usize,
    /// MACD 장기 EMA 기간 (기본: 26)
    pub macd_slow: usize,
    /// MACD 시그널 EMA 기간 (기본: 9)
    pub macd_signal: usize,
    /// ATR 기간 (기본: 14)
    pub atr_period: usize,
    /// 거래량 비율 기준 창. 당일을 제외한 직전 N일 평균을 분모로 사용합니다.
    pub volume_window: usize,
}

impl Default for IndicatorConfig {
    fn default() -> Self {
        Self {
            ma_windows: [5, 20, 60, 120],
            rsi_period: 14,
            macd_fast: 12,
            macd_slow: 26,
            macd_signal: 9,
            atr_period: 14,
            volume_window: 20,
        }
    }
}

/// 일봉 시계열에 지표 컬럼을 추가합니다.
///
/// 입력 시계열과 같은 길이의 `IndicatorRow` 벡터를 반환합니다. 순수 함수로,
/// 같은 입력에 두 번 호출해도 결과가 동일합니다.
pub fn compute_indicators(series: &PriceSeries, config: &IndicatorConfig) -> Vec<IndicatorRow> {
    let closes = series.closes();
    let highs = series.highs();
    let lows = series.lows();
    let volumes = series.volumes();

    let ma_columns: Vec<Vec<Option<Decimal>>> = config
        .ma_windows
        .iter()
        .map(|&w| sma_series(&closes, w))
        .collect();
    let rsi = rsi_series(&closes, config.rsi_period);
    let macd = macd_series(
        &closes,
        config.macd_fast,
        config.macd_slow,
        config.macd_signal,
    );
    let atr = atr_series(&highs, &lows, &closes, config.atr_period);
    let vol_ratio = volume_ratio_series(&volumes, config.volume_window);

    series
        .bars()
        .iter()
        .enumerate()
        .map(|(i, bar)| {
            let mut row = IndicatorRow::bare(bar.clone());
            row.ma5 = ma_columns[0][i];
            row.ma20 = ma_columns[1][i];
            row.ma60 = ma_columns[2][i];
            row.ma120 = ma_columns[3][i];
            row.rsi14 = rsi[i];
            if let Some(point) = &macd[i] {
                row.macd = Some(point.macd);
                row.macd_signal = point.signal;
                row.macd_histogram = point.histogram;
            }
            row.atr14 = atr[i];
            row.volume_ratio = vol_ratio[i];
            row
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;
    use signal_core::DailyBar;

    fn series_of_closes(closes: &[i64]) -> PriceSeries {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let bars = closes
            .iter()
            .enumerate()
            .map(|(i, &c)| {
                let close = Decimal::from(c);
                DailyBar::new(
                    start + chrono::Days::new(i as u64),
                    close,
                    close + dec!(50),
                    close - dec!(50),
                    close,
                    100_000,
                )
            })
            .collect();
        PriceSeries::new(bars)
    }

    #[test]
    fn test_constant_series_has_no_directional_bias() {
        let series = series_of_closes(&[50_000; 60]);
        let rows = compute_indicators(&series, &IndicatorConfig::default());
        let last = rows.last().unwrap();

        assert_eq!(last.rsi14, Some(dec!(50)));
        assert_eq!(last.macd, Some(Decimal::ZERO));
        assert_eq!(last.macd_signal, Some(Decimal::ZERO));
        assert_eq!(last.macd_histogram, Some(Decimal::ZERO));
        assert_eq!(last.ma20, Some(dec!(50000)));
    }

    #[test]
    fn test_warmup_rows_are_none() {
        let series = series_of_closes(&[50_000; 30]);
        let rows = compute_indicators(&series, &IndicatorConfig::default());

        // MA20은 20번째 행부터 정의
        assert!(rows[18].ma20.is_none());
        assert!(rows[19].ma20.is_some());
        // MA120은 30개 일봉으로는 정의되지 않음
        assert!(rows.iter().all(|r| r.ma120.is_none()));
        // 거래량 비율은 직전 20일이 필요하므로 21번째 행부터 정의
        assert!(rows[19].volume_ratio.is_none());
        assert!(rows[20].volume_ratio.is_some());
    }

    #[test]
    fn test_engine_is_idempotent() {
        let closes: Vec<i64> = (0..80).map(|i| 10_000 + i * 37 % 500).collect();
        let series = series_of_closes(&closes);
        let config = IndicatorConfig::default();

        let first = compute_indicators(&series, &config);
        let second = compute_indicators(&series, &config);

        for (a, b) in first.iter().zip(second.iter()) {
            assert_eq!(a.rsi14, b.rsi14);
            assert_eq!(a.macd, b.macd);
            assert_eq!(a.ma20, b.ma20);
            assert_eq!(a.atr14, b.atr14);
            assert_eq!(a.volume_ratio, b.volume_ratio);
        }
    }
}
