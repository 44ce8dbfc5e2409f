//! 데이터 Provider 모듈.
//!
//! ## 네이버 증권
//! - `NaverProvider`: 국내 주식 크롤러
//! - 일봉(`item/sise_day.naver`), 외국인/기관 수급(`item/frgn.naver`),
//!   펀더멘털(`item/main.naver`)
//!
//! ## Yahoo Finance
//! - `YahooProvider`: 미국 주식 일봉 (국내 주식도 `.KS`/`.KQ` 접미사로 지원)

pub mod naver;
pub mod yahoo;

use crate::error::DataError;
use async_trait::async_trait;
use signal_core::{Fundamentals, InvestorFlow, PriceSeries, Symbol};
use std::sync::Arc;

pub use naver::NaverProvider;
pub use yahoo::YahooProvider;

/// 일봉 시계열 Provider.
#[async_trait]
pub trait PriceProvider: Send + Sync {
    /// 최근 `limit`개 일봉을 조회합니다.
    async fn daily_prices(&self, symbol: &Symbol, limit: usize) -> Result<PriceSeries, DataError>;

    /// 종목명을 조회합니다. 소스가 제공하지 않으면 `None`.
    async fn stock_name(&self, _symbol: &Symbol) -> Result<Option<String>, DataError> {
        Ok(None)
    }
}

/// 외국인/기관 수급 Provider.
#[async_trait]
pub trait FlowProvider: Send + Sync {
    /// 최근 수급 데이터를 날짜 오름차순으로 조회합니다.
    async fn investor_flows(&self, symbol: &Symbol) -> Result<Vec<InvestorFlow>, DataError>;
}

/// 펀더멘털 Provider.
#[async_trait]
pub trait FundamentalProvider: Send + Sync {
    /// PER/ROE/EPS를 조회합니다. 없는 값은 `None`으로 남습니다.
    async fn fundamentals(&self, symbol: &Symbol) -> Result<Fundamentals, DataError>;
}

/// 종목에 사용할 Provider 묶음.
///
/// 가격 Provider는 필수이고 수급/펀더멘털은 소스가 지원할 때만 채워집니다.
/// 호출자는 `Option` 여부로 기능 지원을 판단합니다. 전역 가용성 플래그는
/// 두지 않습니다.
#[derive(Clone)]
pub struct ProviderSet {
    /// 일봉 Provider (필수)
    pub price: Arc<dyn PriceProvider>,
    /// 수급 Provider (국내 주식만)
    pub flow: Option<Arc<dyn FlowProvider>>,
    /// 펀더멘털 Provider (국내 주식만)
    pub fundamentals: Option<Arc<dyn FundamentalProvider>>,
}

impl ProviderSet {
    /// 종목의 시장에 맞는 Provider 묶음을 구성합니다.
    ///
    /// 국내 주식은 네이버 증권(가격/수급/펀더멘털), 미국 주식은
    /// Yahoo Finance(가격만)를 사용합니다.
    pub fn for_symbol(symbol: &Symbol) -> Result<Self, DataError> {
        if symbol.is_us() {
            let yahoo = Arc::new(YahooProvider::new()?);
            Ok(Self {
                price: yahoo,
                flow: None,
                fundamentals: None,
            })
        } else {
            let naver = Arc::new(NaverProvider::new());
            Ok(Self {
                price: naver.clone(),
                flow: Some(naver.clone()),
                fundamentals: Some(naver),
            })
        }
    }
}
