//! 네이버 증권 크롤러.
//!
//! 국내(KR) 주식의 일봉, 외국인/기관 수급, 펀더멘털을 수집합니다.
//! 네이버 증권 페이지는 euc-kr 인코딩이므로 `text_with_charset`으로
//! 디코딩합니다.
//!
//! ## 데이터 소스
//! - `/item/sise_day.naver`: 일봉 (페이지당 10행, 최신순)
//! - `/item/frgn.naver`: 외국인/기관 순매매
//! - `/item/main.naver`: 종목명, PER, EPS, ROE
//!
//! 파싱은 fetch와 분리된 순수 함수로 두어 저장된 HTML로 단위 테스트할 수
//! 있게 합니다. 깨진 행은 건너뜁니다.

use crate::error::DataError;
use crate::provider::{FlowProvider, FundamentalProvider, PriceProvider};
use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::Client;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use scraper::{Html, Selector};
use signal_core::{DailyBar, Fundamentals, InvestorFlow, PriceSeries, Symbol};
use std::time::Duration;
use tracing::{debug, warn};

/// 일봉 페이지당 행 수.
const ROWS_PER_PAGE: usize = 10;

/// 네이버 증권 크롤러.
pub struct NaverProvider {
    client: Client,
    /// 요청 간 딜레이 (기본: 300ms)
    request_delay: Duration,
}

impl NaverProvider {
    /// 기본 설정으로 생성합니다.
    pub fn new() -> Self {
        Self::with_delay(Duration::from_millis(300))
    }

    /// 커스텀 딜레이로 생성합니다.
    pub fn with_delay(request_delay: Duration) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent("Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36")
            .build()
            .unwrap_or_default();

        Self {
            client,
            request_delay,
        }
    }

    /// euc-kr 페이지를 받아 UTF-8 문자열로 디코딩합니다.
    async fn fetch_page(&self, url: &str) -> Result<String, DataError> {
        let response = self.client.get(url).send().await?;
        if response.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(DataError::RateLimited);
        }
        Ok(response.text_with_charset("euc-kr").await?)
    }

    fn ensure_kr(symbol: &Symbol) -> Result<(), DataError> {
        if symbol.is_us() {
            return Err(DataError::UnsupportedMarket(symbol.code.clone()));
        }
        Ok(())
    }
}

impl Default for NaverProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PriceProvider for NaverProvider {
    async fn daily_prices(&self, symbol: &Symbol, limit: usize) -> Result<PriceSeries, DataError> {
        Self::ensure_kr(symbol)?;

        let pages = limit.div_ceil(ROWS_PER_PAGE).max(1);
        let mut bars = Vec::with_capacity(limit);

        for page in 1..=pages {
            if page > 1 {
                tokio::time::sleep(self.request_delay).await;
            }
            let url = format!(
                "https://finance.naver.com/item/sise_day.naver?code={}&page={}",
                symbol.code, page
            );
            let html = self.fetch_page(&url).await?;
            let page_bars = parse_daily_price_page(&html);
            if page_bars.is_empty() {
                // 이력 끝에 도달
                break;
            }
            bars.extend(page_bars);
        }

        if bars.is_empty() {
            return Err(DataError::NoData {
                symbol: symbol.code.clone(),
            });
        }

        // 정렬/중복 제거 후 최근 limit개만 유지
        let series = PriceSeries::new(bars);
        let all = series.bars();
        let trimmed = if all.len() > limit {
            PriceSeries::new(all[all.len() - limit..].to_vec())
        } else {
            series
        };
        debug!(symbol = %symbol, bars = trimmed.len(), "네이버 일봉 수집");
        Ok(trimmed)
    }

    async fn stock_name(&self, symbol: &Symbol) -> Result<Option<String>, DataError> {
        Self::ensure_kr(symbol)?;
        let url = format!(
            "https://finance.naver.com/item/main.naver?code={}",
            symbol.code
        );
        let html = self.fetch_page(&url).await?;
        Ok(parse_stock_name(&html))
    }
}

#[async_trait]
impl FlowProvider for NaverProvider {
    async fn investor_flows(&self, symbol: &Symbol) -> Result<Vec<InvestorFlow>, DataError> {
        Self::ensure_kr(symbol)?;
        let url = format!(
            "https://finance.naver.com/item/frgn.naver?code={}",
            symbol.code
        );
        let html = self.fetch_page(&url).await?;
        let flows = parse_investor_flow_page(&html);
        if flows.is_empty() {
            warn!(symbol = %symbol, "외국인/기관 수급 데이터 없음");
        }
        Ok(flows)
    }
}

#[async_trait]
impl FundamentalProvider for NaverProvider {
    async fn fundamentals(&self, symbol: &Symbol) -> Result<Fundamentals, DataError> {
        Self::ensure_kr(symbol)?;
        let url = format!(
            "https://finance.naver.com/item/main.naver?code={}",
            symbol.code
        );
        let html = self.fetch_page(&url).await?;
        Ok(parse_fundamental_page(&html))
    }
}

/// 일봉 페이지를 파싱합니다.
///
/// 컬럼 구조: 날짜(0), 종가(1), 전일비(2), 시가(3), 고가(4), 저가(5),
/// 거래량(6). 날짜가 없는 구분선 행과 깨진 행은 건너뜁니다.
pub fn parse_daily_price_page(html: &str) -> Vec<DailyBar> {
    let document = Html::parse_document(html);
    let Ok(row_selector) = Selector::parse("table.type2 tr") else {
        return Vec::new();
    };
    let Ok(cell_selector) = Selector::parse("td") else {
        return Vec::new();
    };

    let mut bars = Vec::new();
    for row in document.select(&row_selector) {
        let cells: Vec<String> = row
            .select(&cell_selector)
            .map(|td| td.text().collect::<String>().trim().to_string())
            .collect();
        if cells.len() < 7 {
            continue;
        }
        let Some(date) = parse_naver_date(&cells[0]) else {
            continue;
        };
        let parsed = (
            parse_korean_number(&cells[1]),
            parse_korean_number(&cells[3]),
            parse_korean_number(&cells[4]),
            parse_korean_number(&cells[5]),
            parse_korean_number(&cells[6]).and_then(|v| v.to_u64()),
        );
        let (Some(close), Some(open), Some(high), Some(low), Some(volume)) = parsed else {
            continue;
        };

        let bar = DailyBar::new(date, open, high, low, close, volume);
        if bar.is_valid() {
            bars.push(bar);
        }
    }
    bars
}

/// 외국인/기관 수급 페이지를 파싱합니다.
///
/// 컬럼 구조: 날짜(0), 종가(1), 전일비(2), 등락률(3), 거래량(4),
/// 기관 순매매량(5), 외국인 순매매량(6). 결과는 날짜 오름차순입니다.
pub fn parse_investor_flow_page(html: &str) -> Vec<InvestorFlow> {
    let document = Html::parse_document(html);
    let Ok(table_selector) = Selector::parse("table.type2") else {
        return Vec::new();
    };
    let Ok(row_selector) = Selector::parse("tr") else {
        return Vec::new();
    };
    let Ok(cell_selector) = Selector::parse("td") else {
        return Vec::new();
    };

    // 여러 type2 테이블 중 수급 테이블 선택
    let table = document.select(&table_selector).find(|t| {
        let text = t.text().collect::<String>();
        text.contains("외국인") && text.contains("기관") && text.contains("순매매")
    });
    let Some(table) = table else {
        return Vec::new();
    };

    let mut flows = Vec::new();
    for row in table.select(&row_selector) {
        let cells: Vec<String> = row
            .select(&cell_selector)
            .map(|td| td.text().collect::<String>().trim().to_string())
            .collect();
        if cells.len() < 7 {
            continue;
        }
        let Some(date) = parse_naver_date(&cells[0]) else {
            continue;
        };
        let parsed = (
            parse_korean_number(&cells[4]).and_then(|v| v.to_u64()),
            parse_korean_number(&cells[5]),
            parse_korean_number(&cells[6]),
        );
        let (Some(volume), Some(institution_net), Some(foreign_net)) = parsed else {
            continue;
        };
        flows.push(InvestorFlow::new(date, foreign_net, institution_net, volume));
    }

    flows.sort_by_key(|flow| flow.date);
    flows
}

/// main 페이지에서 PER/EPS/ROE를 파싱합니다.
///
/// PER과 EPS는 `<em id="_per">`, `<em id="_eps">`로 제공되고, ROE는
/// 동종업종비교 테이블의 "ROE" 행에서 추출합니다.
pub fn parse_fundamental_page(html: &str) -> Fundamentals {
    let document = Html::parse_document(html);
    Fundamentals {
        per: extract_value_by_id(&document, "_per"),
        roe: extract_roe(&document),
        eps: extract_value_by_id(&document, "_eps"),
    }
}

/// main 페이지에서 종목명을 파싱합니다.
pub fn parse_stock_name(html: &str) -> Option<String> {
    let document = Html::parse_document(html);
    let selector = Selector::parse("div.wrap_company h2 a").ok()?;
    document
        .select(&selector)
        .next()
        .map(|el| el.text().collect::<String>().trim().to_string())
        .filter(|name| !name.is_empty())
}

fn extract_value_by_id(document: &Html, id: &str) -> Option<Decimal> {
    let selector = Selector::parse(&format!("em#{}", id)).ok()?;
    document.select(&selector).next().and_then(|el| {
        let text = el.text().collect::<String>();
        parse_korean_number(&text)
    })
}

/// "ROE"가 포함되고 "동일업종"이 아닌 행의 첫 숫자 td를 찾습니다.
fn extract_roe(document: &Html) -> Option<Decimal> {
    let row_selector = Selector::parse("tr").ok()?;
    let cell_selector = Selector::parse("td").ok()?;

    for row in document.select(&row_selector) {
        let text = row.text().collect::<String>();
        if text.contains("ROE") && !text.contains("동일업종") {
            for td in row.select(&cell_selector) {
                let td_text = td.text().collect::<String>();
                if let Some(value) = parse_korean_number(td_text.trim()) {
                    return Some(value);
                }
            }
        }
    }
    None
}

/// "2024.03.15" 형식의 날짜를 파싱합니다.
fn parse_naver_date(text: &str) -> Option<NaiveDate> {
    if !text.contains('.') || text.len() < 8 {
        return None;
    }
    NaiveDate::parse_from_str(text, "%Y.%m.%d").ok()
}

/// 쉼표/단위가 섞인 숫자 텍스트를 파싱합니다 ("1,234,567" → 1234567).
fn parse_korean_number(text: &str) -> Option<Decimal> {
    let cleaned: String = text
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect();

    if cleaned.is_empty() || cleaned == "-" {
        return None;
    }

    cleaned.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    const DAILY_PAGE: &str = r#"
    <html><body>
    <table class="type2">
      <tr><th>날짜</th><th>종가</th><th>전일비</th><th>시가</th><th>고가</th><th>저가</th><th>거래량</th></tr>
      <tr><td colspan="7" class="gray"></td></tr>
      <tr>
        <td><span>2024.03.15</span></td>
        <td><span>72,800</span></td>
        <td><span>상승 900</span></td>
        <td><span>72,000</span></td>
        <td><span>73,100</span></td>
        <td><span>71,800</span></td>
        <td><span>13,258,250</span></td>
      </tr>
      <tr>
        <td><span>2024.03.14</span></td>
        <td><span>71,900</span></td>
        <td><span>하락 300</span></td>
        <td><span>72,100</span></td>
        <td><span>72,400</span></td>
        <td><span>71,500</span></td>
        <td><span>10,110,420</span></td>
      </tr>
      <tr>
        <td><span>깨진행</span></td>
        <td><span>-</span></td>
        <td><span>-</span></td>
        <td><span>-</span></td>
        <td><span>-</span></td>
        <td><span>-</span></td>
        <td><span>-</span></td>
      </tr>
    </table>
    </body></html>
    "#;

    const FLOW_PAGE: &str = r#"
    <html><body>
    <table class="type2">
      <tr><th colspan="9">외국인 기관 순매매 거래량</th></tr>
      <tr><th>날짜</th><th>종가</th><th>전일비</th><th>등락률</th><th>거래량</th><th>기관</th><th>외국인</th><th>보유주수</th><th>보유율</th></tr>
      <tr><td colspan="9"></td></tr>
      <tr>
        <td>2024.03.15</td><td>72,800</td><td>900</td><td>+1.25%</td>
        <td>13,258,250</td><td>350,000</td><td>-1,200,000</td>
        <td>3,000,000,000</td><td>50.2%</td>
      </tr>
      <tr>
        <td>2024.03.14</td><td>71,900</td><td>300</td><td>-0.41%</td>
        <td>10,110,420</td><td>-120,000</td><td>800,000</td>
        <td>3,001,200,000</td><td>50.3%</td>
      </tr>
    </table>
    </body></html>
    "#;

    const MAIN_PAGE: &str = r#"
    <html><body>
    <div class="wrap_company"><h2><a href="/item/main.naver?code=005930">삼성전자</a></h2></div>
    <table>
      <tr><th>PER</th><td><em id="_per">12.34</em>배</td></tr>
      <tr><th>EPS</th><td><em id="_eps">5,900</em>원</td></tr>
    </table>
    <table class="tb_type1">
      <tr><th>동일업종 PER</th><td>15.20배</td></tr>
      <tr><th>ROE(지배주주)</th><td>17.07</td><td>12.50</td></tr>
    </table>
    </body></html>
    "#;

    #[test]
    fn test_parse_daily_prices_skips_broken_rows() {
        let bars = parse_daily_price_page(DAILY_PAGE);
        assert_eq!(bars.len(), 2);

        let first = &bars[0];
        assert_eq!(first.date, "2024-03-15".parse().unwrap());
        assert_eq!(first.close, dec!(72800));
        assert_eq!(first.open, dec!(72000));
        assert_eq!(first.high, dec!(73100));
        assert_eq!(first.low, dec!(71800));
        assert_eq!(first.volume, 13_258_250);
    }

    #[test]
    fn test_parse_investor_flows_sorted_ascending() {
        let flows = parse_investor_flow_page(FLOW_PAGE);
        assert_eq!(flows.len(), 2);

        // 페이지는 최신순이지만 결과는 날짜 오름차순
        assert_eq!(flows[0].date, "2024-03-14".parse().unwrap());
        assert_eq!(flows[1].date, "2024-03-15".parse().unwrap());

        let latest = &flows[1];
        assert_eq!(latest.foreign_net, dec!(-1200000));
        assert_eq!(latest.institution_net, dec!(350000));
        assert_eq!(latest.individual_net, dec!(850000));
        assert_eq!(latest.volume, 13_258_250);
    }

    #[test]
    fn test_parse_fundamentals() {
        let fundamentals = parse_fundamental_page(MAIN_PAGE);
        assert_eq!(fundamentals.per, Some(dec!(12.34)));
        assert_eq!(fundamentals.eps, Some(dec!(5900)));
        assert_eq!(fundamentals.roe, Some(dec!(17.07)));
    }

    #[test]
    fn test_parse_stock_name() {
        assert_eq!(parse_stock_name(MAIN_PAGE), Some("삼성전자".to_string()));
        assert_eq!(parse_stock_name("<html><body></body></html>"), None);
    }

    #[test]
    fn test_parse_korean_number() {
        assert_eq!(
            parse_korean_number("1,234,567"),
            Some(Decimal::from(1_234_567))
        );
        assert_eq!(parse_korean_number("-100"), Some(Decimal::from(-100)));
        assert_eq!(parse_korean_number("12.34배"), Some(dec!(12.34)));
        assert_eq!(parse_korean_number(""), None);
        assert_eq!(parse_korean_number("-"), None);
    }

    #[test]
    fn test_empty_page_yields_no_rows() {
        assert!(parse_daily_price_page("<html></html>").is_empty());
        assert!(parse_investor_flow_page("<html></html>").is_empty());
    }
}
