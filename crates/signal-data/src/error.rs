//! 데이터 수집 에러.

use thiserror::Error;

/// 데이터 Provider 에러.
#[derive(Debug, Error)]
pub enum DataError {
    /// HTTP 요청 실패
    #[error("HTTP 요청 실패: {0}")]
    Http(#[from] reqwest::Error),

    /// Yahoo Finance API 오류
    #[error("Yahoo Finance API 오류: {0}")]
    Yahoo(String),

    /// HTML/응답 파싱 실패
    #[error("응답 파싱 실패: {0}")]
    Parse(String),

    /// 데이터 없음
    #[error("데이터 없음: {symbol}")]
    NoData { symbol: String },

    /// Rate limit 초과
    #[error("Rate limit 초과")]
    RateLimited,

    /// 지원하지 않는 시장
    #[error("지원하지 않는 시장: {0}")]
    UnsupportedMarket(String),
}

impl DataError {
    /// 재시도해 볼 만한 일시적 오류인지 판단합니다.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            DataError::Http(_) | DataError::Yahoo(_) | DataError::RateLimited
        )
    }
}

impl From<DataError> for signal_core::SignalError {
    fn from(err: DataError) -> Self {
        match err {
            DataError::Parse(msg) => signal_core::SignalError::Parse(msg),
            DataError::NoData { symbol } => signal_core::SignalError::NoData(symbol),
            other => signal_core::SignalError::Fetch(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transient_classification() {
        assert!(DataError::RateLimited.is_transient());
        assert!(!DataError::Parse("깨진 테이블".to_string()).is_transient());
        assert!(!DataError::NoData {
            symbol: "005930".to_string()
        }
        .is_transient());
    }
}
