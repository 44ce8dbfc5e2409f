//! 종목 코드 및 시장 구분.
//!
//! 이 모듈은 종목 식별 관련 타입을 정의합니다:
//! - `MarketKind` - 시장 구분 (국내/미국)
//! - `Symbol` - 종목 코드와 시장 구분의 조합

use serde::{Deserialize, Serialize};
use std::fmt;

/// 시장 구분.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarketKind {
    /// 한국 주식 (코스피/코스닥, 6자리 숫자 코드)
    KrStock,
    /// 미국 주식 (알파벳 티커)
    UsStock,
}

impl fmt::Display for MarketKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MarketKind::KrStock => write!(f, "kr_stock"),
            MarketKind::UsStock => write!(f, "us_stock"),
        }
    }
}

/// 분석 대상 종목.
///
/// 한국 주식은 6자리 숫자 코드("005930"), 미국 주식은 알파벳 티커("AAPL")를
/// 사용합니다. 시장 구분은 코드 형태에서 유추할 수 있습니다.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Symbol {
    /// 종목 코드 또는 티커
    pub code: String,
    /// 시장 구분
    pub market: MarketKind,
}

impl Symbol {
    /// 새 종목을 생성합니다.
    pub fn new(code: impl Into<String>, market: MarketKind) -> Self {
        Self {
            code: code.into().to_uppercase(),
            market,
        }
    }

    /// 코드 형태에서 시장을 유추하여 종목을 생성합니다.
    ///
    /// 숫자로만 구성된 코드는 국내 주식, 그 외는 미국 주식으로 판별합니다.
    pub fn parse(code: &str) -> Self {
        let trimmed = code.trim();
        let market = if trimmed.chars().all(|c| c.is_ascii_digit()) && !trimmed.is_empty() {
            MarketKind::KrStock
        } else {
            MarketKind::UsStock
        };
        Self::new(trimmed, market)
    }

    /// 미국 주식 여부.
    pub fn is_us(&self) -> bool {
        self.market == MarketKind::UsStock
    }

    /// Yahoo Finance 조회용 심볼을 반환합니다.
    ///
    /// 국내 주식은 거래소 접미사가 필요합니다 (코스피 `.KS`, 코스닥 `.KQ`).
    pub fn yahoo_symbol(&self, is_kosdaq: bool) -> String {
        match self.market {
            MarketKind::KrStock => {
                let suffix = if is_kosdaq { ".KQ" } else { ".KS" };
                format!("{}{}", self.code, suffix)
            }
            MarketKind::UsStock => self.code.clone(),
        }
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_kr_code() {
        let symbol = Symbol::parse("005930");
        assert_eq!(symbol.market, MarketKind::KrStock);
        assert!(!symbol.is_us());
        assert_eq!(symbol.yahoo_symbol(false), "005930.KS");
        assert_eq!(symbol.yahoo_symbol(true), "005930.KQ");
    }

    #[test]
    fn test_parse_us_ticker() {
        let symbol = Symbol::parse("aapl");
        assert_eq!(symbol.code, "AAPL");
        assert_eq!(symbol.market, MarketKind::UsStock);
        assert_eq!(symbol.yahoo_symbol(false), "AAPL");
    }
}
