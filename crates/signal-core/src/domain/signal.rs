//! 분류기가 생성하는 매매 신호.
//!
//! 이 모듈은 신호 관련 타입을 정의합니다:
//! - `SignalMode` - 분석 모드 (단타/스윙/장기)
//! - `SignalStatus` - 신호 상태 버킷
//! - `ClassifiedSignal` - 분류 결과 엔티티

use crate::types::Symbol;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// 분석 모드.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalMode {
    /// 단타 (MA5 눌림 + 거래량 급증)
    Daytrade,
    /// 스윙 (MA20 지지 + MACD)
    Swing,
    /// 장기 (MA60 추세 + 펀더멘털)
    Longterm,
}

impl fmt::Display for SignalMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SignalMode::Daytrade => write!(f, "daytrade"),
            SignalMode::Swing => write!(f, "swing"),
            SignalMode::Longterm => write!(f, "longterm"),
        }
    }
}

impl std::str::FromStr for SignalMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "daytrade" | "day" => Ok(Self::Daytrade),
            "swing" => Ok(Self::Swing),
            "longterm" | "long" => Ok(Self::Longterm),
            _ => Err(format!("Unknown signal mode: {}", s)),
        }
    }
}

/// 신호 상태 버킷.
///
/// 진입과 청산 조건이 동시에 참이면 청산이 우선합니다. 어느 쪽도 아니면
/// 수집된 부분 근거와 함께 `Watch`로 떨어집니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalStatus {
    /// 진입 후보
    EntryReady,
    /// 청산/경고
    ExitWarning,
    /// 관망 (신호 불충분 또는 데이터 부족)
    Watch,
}

impl fmt::Display for SignalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SignalStatus::EntryReady => write!(f, "entry_ready"),
            SignalStatus::ExitWarning => write!(f, "exit_warning"),
            SignalStatus::Watch => write!(f, "watch"),
        }
    }
}

/// 분류기가 생성한 매매 신호.
///
/// 매 분석 호출마다 최신 지표 행과 짧은 룩백 구간에서 새로 계산되며,
/// 호출 간에 병합되거나 저장되지 않습니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifiedSignal {
    /// 분석 모드
    pub mode: SignalMode,
    /// 종목
    pub symbol: Symbol,
    /// 종목명 (있는 경우)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// 진입 조건 충족 여부
    pub entry_signal: bool,
    /// 청산 조건 충족 여부
    pub exit_signal: bool,
    /// 상태 버킷
    pub status: SignalStatus,
    /// 사람이 읽는 상태 문구 (모드별 한국어 문구)
    pub status_text: String,
    /// 발동한 조건 라벨 (평가 순서 유지)
    pub reasons: Vec<String>,
    /// 대응 권고 문구
    pub recommendation: String,
    /// 손절 비율 (%)
    pub stop_loss_pct: Decimal,
    /// 손절가 (현재가 기준)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop_loss_price: Option<Decimal>,
}

impl ClassifiedSignal {
    /// 발동 근거를 쉼표로 이어붙인 문자열을 반환합니다.
    pub fn reason_text(&self) -> String {
        if self.reasons.is_empty() {
            self.status_text.clone()
        } else {
            self.reasons.join(", ")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_from_str() {
        assert_eq!("swing".parse::<SignalMode>().unwrap(), SignalMode::Swing);
        assert_eq!("DAY".parse::<SignalMode>().unwrap(), SignalMode::Daytrade);
        assert_eq!("long".parse::<SignalMode>().unwrap(), SignalMode::Longterm);
        assert!("scalp".parse::<SignalMode>().is_err());
    }
}
