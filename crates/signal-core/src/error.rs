//! 신호 분석 시스템의 에러 타입.

use thiserror::Error;

/// 분석 파이프라인 공통 에러.
#[derive(Debug, Error)]
pub enum SignalError {
    /// 설정 에러 (필수 환경변수 누락 등)
    #[error("설정 에러: {0}")]
    Config(String),

    /// 외부 소스 조회 실패 (네트워크/타임아웃)
    #[error("조회 실패: {0}")]
    Fetch(String),

    /// 응답 파싱 실패 (HTML 구조 변경 등)
    #[error("파싱 실패: {0}")]
    Parse(String),

    /// 해당 종목의 데이터 없음
    #[error("데이터 없음: {0}")]
    NoData(String),

    /// 지표 계산에 필요한 이력 부족
    #[error("이력 부족: {0}")]
    InsufficientHistory(String),

    /// 전략/분류기 에러
    #[error("전략 에러: {0}")]
    Strategy(String),

    /// 알림 전송 에러
    #[error("알림 에러: {0}")]
    Notification(String),

    /// 직렬화 에러
    #[error("직렬화 에러: {0}")]
    Serialization(String),

    /// 파일 입출력 에러
    #[error("입출력 에러: {0}")]
    Io(String),

    /// 잘못된 입력
    #[error("잘못된 입력: {0}")]
    InvalidInput(String),
}

/// 분석 작업을 위한 Result 타입.
pub type SignalResult<T> = Result<T, SignalError>;

impl SignalError {
    /// 일시적 장애(재시도 가능)인지 확인합니다.
    ///
    /// 현재 파이프라인은 재시도하지 않고 종목 단위로 건너뛰지만,
    /// 호출자가 "데이터 없음"과 구분할 수 있도록 분류는 유지합니다.
    pub fn is_transient(&self) -> bool {
        matches!(self, SignalError::Fetch(_))
    }

    /// 데이터 부재로 취급해야 하는 에러인지 확인합니다.
    ///
    /// 이 경우 다운스트림은 기본값을 채우지 말고 분류를 보류해야 합니다.
    pub fn is_abstention(&self) -> bool {
        matches!(
            self,
            SignalError::NoData(_) | SignalError::InsufficientHistory(_)
        )
    }
}

impl From<serde_json::Error> for SignalError {
    fn from(err: serde_json::Error) -> Self {
        SignalError::Serialization(err.to_string())
    }
}

impl From<std::io::Error> for SignalError {
    fn from(err: std::io::Error) -> Self {
        SignalError::Io(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transient_classification() {
        let fetch_err = SignalError::Fetch("timeout".to_string());
        assert!(fetch_err.is_transient());

        let config_err = SignalError::Config("missing".to_string());
        assert!(!config_err.is_transient());
    }

    #[test]
    fn test_abstention_classification() {
        let no_data = SignalError::NoData("005930".to_string());
        assert!(no_data.is_abstention());

        let short = SignalError::InsufficientHistory("MA120".to_string());
        assert!(short.is_abstention());

        let parse_err = SignalError::Parse("bad row".to_string());
        assert!(!parse_err.is_abstention());
    }
}
