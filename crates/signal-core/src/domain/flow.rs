//! 외국인/기관 수급 데이터 및 패턴 분류.
//!
//! 이 모듈은 수급 분석 관련 타입을 정의합니다:
//! - `InvestorFlow` - 하루치 외국인/기관 순매수 레코드
//! - `PatternType` - 수급 패턴 분류 (물량 털기 / 진짜 이탈 / 상승 신호 / 불명확)
//! - `PatternInfo` - 패턴 분석 결과

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// 하루치 외국인/기관 순매수 레코드.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvestorFlow {
    /// 거래일
    pub date: NaiveDate,
    /// 외국인 순매수 (주)
    pub foreign_net: Decimal,
    /// 기관 순매수 (주)
    pub institution_net: Decimal,
    /// 개인 순매수 = -(외국인 + 기관)
    pub individual_net: Decimal,
    /// 거래량
    pub volume: u64,
}

impl InvestorFlow {
    /// 외국인/기관 순매수에서 개인 순매수를 유도하여 생성합니다.
    pub fn new(
        date: NaiveDate,
        foreign_net: Decimal,
        institution_net: Decimal,
        volume: u64,
    ) -> Self {
        Self {
            date,
            foreign_net,
            institution_net,
            individual_net: -(foreign_net + institution_net),
            volume,
        }
    }
}

/// 주체별 매매 추세.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlowTrend {
    /// 순매수
    Buying,
    /// 순매도
    Selling,
    /// 중립
    Neutral,
}

impl fmt::Display for FlowTrend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FlowTrend::Buying => write!(f, "매수"),
            FlowTrend::Selling => write!(f, "매도"),
            FlowTrend::Neutral => write!(f, "중립"),
        }
    }
}

/// 거래량 추세 (전일 대비 ±10% 기준).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VolumeTrend {
    /// 증가 (+10% 초과)
    Rising,
    /// 감소 (-10% 미만)
    Falling,
    /// 유지
    Steady,
}

impl fmt::Display for VolumeTrend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VolumeTrend::Rising => write!(f, "증가"),
            VolumeTrend::Falling => write!(f, "감소"),
            VolumeTrend::Steady => write!(f, "유지"),
        }
    }
}

/// 가격 추세 (현재가 vs MA20).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriceTrend {
    /// MA20 위
    Rising,
    /// MA20 아래
    Falling,
}

impl fmt::Display for PriceTrend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PriceTrend::Rising => write!(f, "상승"),
            PriceTrend::Falling => write!(f, "하락"),
        }
    }
}

/// 수급 패턴 분류.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternType {
    /// 물량 털기 (외국인 매도를 기관이 받아내는 조정)
    Shakeout,
    /// 진짜 이탈 (양 주체 동반 매도)
    RealBreakdown,
    /// 상승 신호 (양 주체 동반 매수)
    UptrendSignal,
    /// 불명확
    Unclear,
}

impl fmt::Display for PatternType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PatternType::Shakeout => write!(f, "물량_털기"),
            PatternType::RealBreakdown => write!(f, "진짜_이탈"),
            PatternType::UptrendSignal => write!(f, "상승_신호"),
            PatternType::Unclear => write!(f, "불명확"),
        }
    }
}

/// 수급 패턴 분석 결과.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatternInfo {
    /// 패턴 분류
    pub pattern_type: PatternType,
    /// 신뢰도 (0-100, 휴리스틱 점수이며 확률이 아님)
    pub confidence: u8,
    /// 외국인 추세
    pub foreign_trend: FlowTrend,
    /// 기관 추세
    pub institution_trend: FlowTrend,
    /// 최근 N일 외국인 평균 순매수
    pub foreign_avg: Decimal,
    /// 최근 N일 기관 평균 순매수
    pub institution_avg: Decimal,
    /// 거래량 추세
    pub volume_trend: VolumeTrend,
    /// 가격 추세 (MA20 기준, 데이터 없으면 None)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_trend: Option<PriceTrend>,
    /// 판단 근거 문구
    pub reason: String,
    /// 수급 데이터 존재 여부
    pub data_available: bool,
}

impl PatternInfo {
    /// 수급 데이터가 없을 때의 결과를 생성합니다.
    pub fn unavailable() -> Self {
        Self {
            pattern_type: PatternType::Unclear,
            confidence: 0,
            foreign_trend: FlowTrend::Neutral,
            institution_trend: FlowTrend::Neutral,
            foreign_avg: Decimal::ZERO,
            institution_avg: Decimal::ZERO,
            volume_trend: VolumeTrend::Steady,
            price_trend: None,
            reason: "외국인/기관 매매 데이터를 가져올 수 없습니다. 네이버 증권 페이지에서 수급 데이터를 확인하세요.".to_string(),
            data_available: false,
        }
    }
}

/// 회복 신호 감지 결과.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecoverySignal {
    /// 회복 신호 존재 여부
    pub has_signal: bool,
    /// 신호 유형
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recovery_type: Option<RecoveryType>,
    /// 안내 문구
    pub message: String,
}

/// 회복 신호 유형.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecoveryType {
    /// 외국인 매수 전환
    ForeignBuy,
    /// 거래량 급증 (+30% 이상)
    VolumeSurge,
    /// 둘 다
    Both,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_individual_net_derivation() {
        let flow = InvestorFlow::new(
            "2024-01-02".parse().unwrap(),
            dec!(-120000),
            dec!(80000),
            1_500_000,
        );
        assert_eq!(flow.individual_net, dec!(40000));
    }

    #[test]
    fn test_pattern_type_display() {
        assert_eq!(PatternType::Shakeout.to_string(), "물량_털기");
        assert_eq!(PatternType::RealBreakdown.to_string(), "진짜_이탈");
        assert_eq!(PatternType::UptrendSignal.to_string(), "상승_신호");
        assert_eq!(PatternType::Unclear.to_string(), "불명확");
    }
}
