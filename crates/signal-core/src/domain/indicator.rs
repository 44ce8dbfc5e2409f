//! 지표가 추가된 일봉 행.
//!
//! 롤링 지표는 창이 채워지기 전까지 `None`이며, 분류기는 `None` 지표를
//! "데이터 부족"으로 취급하고 판단을 보류해야 합니다. 숫자 기본값으로
//! 대체하지 않습니다.

use crate::domain::price::DailyBar;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// 지표 컬럼이 추가된 일봉 행.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndicatorRow {
    /// 원본 일봉
    pub bar: DailyBar,
    /// 5일 이동평균
    pub ma5: Option<Decimal>,
    /// 20일 이동평균
    pub ma20: Option<Decimal>,
    /// 60일 이동평균
    pub ma60: Option<Decimal>,
    /// 120일 이동평균
    pub ma120: Option<Decimal>,
    /// RSI(14), Wilder 평활
    pub rsi14: Option<Decimal>,
    /// MACD 선 (EMA12 - EMA26, 종가 기준)
    pub macd: Option<Decimal>,
    /// MACD 시그널 선 (MACD의 EMA9)
    pub macd_signal: Option<Decimal>,
    /// MACD 히스토그램 (MACD - 시그널)
    pub macd_histogram: Option<Decimal>,
    /// ATR(14), TR의 14일 단순 평균
    pub atr14: Option<Decimal>,
    /// 거래량 비율 (당일 거래량 ÷ 직전 20일 평균 거래량)
    pub volume_ratio: Option<Decimal>,
}

impl IndicatorRow {
    /// 지표가 모두 비어 있는 행을 생성합니다.
    pub fn bare(bar: DailyBar) -> Self {
        Self {
            bar,
            ma5: None,
            ma20: None,
            ma60: None,
            ma120: None,
            rsi14: None,
            macd: None,
            macd_signal: None,
            macd_histogram: None,
            atr14: None,
            volume_ratio: None,
        }
    }

    /// 종가를 반환합니다.
    pub fn close(&self) -> Decimal {
        self.bar.close
    }

    /// 창 길이 `w`의 이동평균 컬럼을 반환합니다 (5/20/60/120만 지원).
    pub fn ma(&self, window: usize) -> Option<Decimal> {
        match window {
            5 => self.ma5,
            20 => self.ma20,
            60 => self.ma60,
            120 => self.ma120,
            _ => None,
        }
    }
}
