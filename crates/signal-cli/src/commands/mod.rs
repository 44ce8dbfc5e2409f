//! CLI 명령어 모듈.

pub mod analyze;
pub mod pattern;
pub mod targets;

use anyhow::{Context, Result};
use signal_analytics::{compute_indicators, IndicatorConfig};
use signal_core::{IndicatorRow, PriceSeries, Symbol};
use signal_data::ProviderSet;
use tracing::warn;

/// 명령어 공통으로 필요한 시세 데이터.
pub(crate) struct MarketData {
    pub symbol: Symbol,
    pub name: Option<String>,
    pub series: PriceSeries,
    pub rows: Vec<IndicatorRow>,
    pub providers: ProviderSet,
}

impl MarketData {
    /// 종목명이 없으면 코드를 반환합니다.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.symbol.code)
    }
}

/// 일봉과 지표를 조회합니다.
pub(crate) async fn load_market_data(code: &str, limit: usize) -> Result<MarketData> {
    let symbol = Symbol::parse(code);
    let providers = ProviderSet::for_symbol(&symbol)?;

    let series = providers
        .price
        .daily_prices(&symbol, limit)
        .await
        .with_context(|| format!("{code} 일봉 조회 실패"))?;
    let name = match providers.price.stock_name(&symbol).await {
        Ok(name) => name,
        Err(e) => {
            warn!(code, error = %e, "종목명 조회 실패");
            None
        }
    };

    let rows = compute_indicators(&series, &IndicatorConfig::default());

    Ok(MarketData {
        symbol,
        name,
        series,
        rows,
        providers,
    })
}
