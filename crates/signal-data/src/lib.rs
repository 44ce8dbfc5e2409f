//! # Signal Data
//!
//! 가격/수급/펀더멘털 데이터 Provider를 제공합니다.
//!
//! - 국내 주식: 네이버 증권 크롤링 (일봉, 외국인/기관 수급, 펀더멘털)
//! - 미국 주식: Yahoo Finance API (일봉)
//!
//! 조회 실패는 재시도 가능 여부로 분류만 하고 이 계층에서 재시도하지
//! 않습니다. 깨진 행은 건너뛰고, 데이터가 아예 없으면 `NoData`로
//! 보고합니다.

pub mod error;
pub mod provider;

pub use error::DataError;
pub use provider::{
    FlowProvider, FundamentalProvider, NaverProvider, PriceProvider, ProviderSet, YahooProvider,
};
