//! Yahoo Finance Provider.
//!
//! 미국 주식 일봉을 조회합니다. 국내 주식도 `.KS`/`.KQ` 접미사로 조회할
//! 수 있지만 수급/펀더멘털은 제공하지 않습니다.

use crate::error::DataError;
use crate::provider::PriceProvider;
use async_trait::async_trait;
use chrono::DateTime;
use rust_decimal::Decimal;
use signal_core::{DailyBar, PriceSeries, Symbol};
use tracing::debug;
use yahoo_finance_api as yahoo;

/// Yahoo Finance 일봉 Provider.
pub struct YahooProvider {
    connector: yahoo::YahooConnector,
}

impl YahooProvider {
    /// 커넥터를 생성합니다.
    pub fn new() -> Result<Self, DataError> {
        let connector =
            yahoo::YahooConnector::new().map_err(|e| DataError::Yahoo(e.to_string()))?;
        Ok(Self { connector })
    }

    /// `limit`개 일봉을 덮을 조회 범위를 계산합니다.
    ///
    /// 거래일과 달력일 차이를 고려해 넉넉하게 잡습니다.
    fn range_for_limit(limit: usize) -> &'static str {
        match limit {
            0..=20 => "1mo",
            21..=60 => "3mo",
            61..=120 => "6mo",
            121..=250 => "1y",
            _ => "2y",
        }
    }
}

#[async_trait]
impl PriceProvider for YahooProvider {
    async fn daily_prices(&self, symbol: &Symbol, limit: usize) -> Result<PriceSeries, DataError> {
        let ticker = symbol.yahoo_symbol(false);
        let range = Self::range_for_limit(limit);

        let response = self
            .connector
            .get_quote_range(&ticker, "1d", range)
            .await
            .map_err(|e| DataError::Yahoo(e.to_string()))?;
        let quotes = response
            .quotes()
            .map_err(|e| DataError::Yahoo(e.to_string()))?;

        let mut bars = Vec::with_capacity(quotes.len());
        for quote in &quotes {
            let Some(date) =
                DateTime::from_timestamp(quote.timestamp as i64, 0).map(|dt| dt.date_naive())
            else {
                continue;
            };
            let parsed = (
                Decimal::from_f64_retain(quote.open),
                Decimal::from_f64_retain(quote.high),
                Decimal::from_f64_retain(quote.low),
                Decimal::from_f64_retain(quote.close),
            );
            let (Some(open), Some(high), Some(low), Some(close)) = parsed else {
                continue;
            };

            let bar = DailyBar::new(date, open, high, low, close, quote.volume);
            if bar.is_valid() {
                bars.push(bar);
            }
        }

        if bars.is_empty() {
            return Err(DataError::NoData {
                symbol: symbol.code.clone(),
            });
        }

        let series = PriceSeries::new(bars);
        let all = series.bars();
        let trimmed = if all.len() > limit {
            PriceSeries::new(all[all.len() - limit..].to_vec())
        } else {
            series
        };
        debug!(symbol = %symbol, bars = trimmed.len(), range, "Yahoo 일봉 수집");
        Ok(trimmed)
    }
}
