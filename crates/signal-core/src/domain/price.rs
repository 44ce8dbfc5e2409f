//! 일봉(OHLCV) 시계열 타입.
//!
//! 이 모듈은 가격 데이터 관련 타입을 정의합니다:
//! - `DailyBar` - 하루치 OHLCV 레코드
//! - `PriceSeries` - 날짜 오름차순으로 정렬된 일봉 시퀀스

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// 하루치 OHLCV 레코드.
///
/// 불변식: `low <= open, close <= high`, 모든 가격은 양수, 거래량은 0 이상.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyBar {
    /// 거래일
    pub date: NaiveDate,
    /// 시가
    pub open: Decimal,
    /// 고가
    pub high: Decimal,
    /// 저가
    pub low: Decimal,
    /// 종가
    pub close: Decimal,
    /// 거래량
    pub volume: u64,
}

impl DailyBar {
    /// 새 일봉을 생성합니다.
    pub fn new(
        date: NaiveDate,
        open: Decimal,
        high: Decimal,
        low: Decimal,
        close: Decimal,
        volume: u64,
    ) -> Self {
        Self {
            date,
            open,
            high,
            low,
            close,
            volume,
        }
    }

    /// OHLC 불변식을 만족하는지 확인합니다.
    pub fn is_valid(&self) -> bool {
        self.low > Decimal::ZERO
            && self.low <= self.open
            && self.low <= self.close
            && self.open <= self.high
            && self.close <= self.high
    }

    /// 양봉(종가 > 시가)인지 확인합니다.
    pub fn is_bullish(&self) -> bool {
        self.close > self.open
    }

    /// 캔들 범위(고가 - 저가)를 반환합니다.
    pub fn range(&self) -> Decimal {
        self.high - self.low
    }
}

/// 날짜 오름차순으로 정렬된 일봉 시퀀스.
///
/// 생성 시점에 정렬과 중복 제거(먼저 들어온 일봉 유지)가 수행되며,
/// 이후로는 변경되지 않습니다. 지표 계산은 이 시퀀스를 읽기만 합니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceSeries {
    bars: Vec<DailyBar>,
}

impl PriceSeries {
    /// 일봉 목록에서 시계열을 생성합니다.
    ///
    /// 입력 순서와 무관하게 날짜 오름차순으로 정렬하고, 같은 날짜가
    /// 여러 번 나오면 먼저 들어온 일봉을 유지합니다.
    pub fn new(bars: Vec<DailyBar>) -> Self {
        let mut seen = std::collections::HashSet::new();
        let mut deduped: Vec<DailyBar> = bars
            .into_iter()
            .filter(|bar| seen.insert(bar.date))
            .collect();
        deduped.sort_by_key(|bar| bar.date);
        Self { bars: deduped }
    }

    /// 일봉 슬라이스를 반환합니다.
    pub fn bars(&self) -> &[DailyBar] {
        &self.bars
    }

    /// 일봉 개수를 반환합니다.
    pub fn len(&self) -> usize {
        self.bars.len()
    }

    /// 비어 있는지 확인합니다.
    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    /// 가장 최근 일봉을 반환합니다.
    pub fn latest(&self) -> Option<&DailyBar> {
        self.bars.last()
    }

    /// 종가 벡터를 반환합니다.
    pub fn closes(&self) -> Vec<Decimal> {
        self.bars.iter().map(|b| b.close).collect()
    }

    /// 고가 벡터를 반환합니다.
    pub fn highs(&self) -> Vec<Decimal> {
        self.bars.iter().map(|b| b.high).collect()
    }

    /// 저가 벡터를 반환합니다.
    pub fn lows(&self) -> Vec<Decimal> {
        self.bars.iter().map(|b| b.low).collect()
    }

    /// 거래량 벡터를 반환합니다.
    pub fn volumes(&self) -> Vec<u64> {
        self.bars.iter().map(|b| b.volume).collect()
    }
}
