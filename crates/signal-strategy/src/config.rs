//! 분류기 임계값 설정.
//!
//! 모든 임계값은 설정 구조체로 주입됩니다. 기본값은 각 모드의 관행적인
//! 매매 기준을 따릅니다.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// 단타 모드 설정.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DaytradeConfig {
    /// MA5 근접 허용 범위 (%)
    pub ma_tolerance_pct: Decimal,
    /// 진입에 필요한 최소 거래량 비율
    pub volume_ratio_min: Decimal,
    /// 진입 RSI 하한
    pub rsi_entry_low: Decimal,
    /// 진입 RSI 상한
    pub rsi_entry_high: Decimal,
    /// 청산 RSI (과열 기준)
    pub rsi_exit: Decimal,
    /// 손절 비율 (%, 현재가 기준)
    pub stop_loss_pct: Decimal,
}

impl Default for DaytradeConfig {
    fn default() -> Self {
        Self {
            ma_tolerance_pct: dec!(1.2),
            volume_ratio_min: dec!(2.0),
            rsi_entry_low: dec!(35),
            rsi_entry_high: dec!(45),
            rsi_exit: dec!(70),
            stop_loss_pct: dec!(2.0),
        }
    }
}

/// 스윙 모드 설정.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SwingConfig {
    /// MA20 근접 허용 범위 (%)
    pub ma_tolerance_pct: Decimal,
    /// MA20 기울기 룩백 (일봉 수)
    pub slope_lookback: usize,
    /// 진입 RSI 하한
    pub rsi_entry_low: Decimal,
    /// 진입 RSI 상한
    pub rsi_entry_high: Decimal,
    /// 거래량 비율 참고 기준 (진입 필수 조건은 아님)
    pub volume_ratio_min: Decimal,
    /// 청산 RSI (과열 기준)
    pub rsi_exit: Decimal,
    /// 손절 비율 (%, 현재가 기준)
    pub stop_loss_pct: Decimal,
}

impl Default for SwingConfig {
    fn default() -> Self {
        Self {
            ma_tolerance_pct: dec!(2.0),
            slope_lookback: 3,
            rsi_entry_low: dec!(40),
            rsi_entry_high: dec!(50),
            volume_ratio_min: dec!(1.2),
            rsi_exit: dec!(70),
            stop_loss_pct: dec!(4.0),
        }
    }
}

/// 장기 모드 설정.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LongtermConfig {
    /// MA60 기울기 룩백 (일봉 수)
    pub slope_lookback: usize,
    /// 진입 PER 상한 (0 < PER < 상한)
    pub per_max: Decimal,
    /// 진입 ROE 하한 (%)
    pub roe_entry_min: Decimal,
    /// 청산 ROE 기준 (%, 미만이면 경고)
    pub roe_exit_max: Decimal,
    /// MA60 하향 이탈 청산 계수
    pub ma60_exit_ratio: Decimal,
    /// 손절 비율 (%, 현재가 기준)
    pub stop_loss_pct: Decimal,
}

impl Default for LongtermConfig {
    fn default() -> Self {
        Self {
            slope_lookback: 3,
            per_max: dec!(15),
            roe_entry_min: dec!(8),
            roe_exit_max: dec!(5),
            ma60_exit_ratio: dec!(0.97),
            stop_loss_pct: dec!(10.0),
        }
    }
}

/// 세 모드의 설정 묶음.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StrategyConfig {
    /// 단타 설정
    pub daytrade: DaytradeConfig,
    /// 스윙 설정
    pub swing: SwingConfig,
    /// 장기 설정
    pub longterm: LongtermConfig,
}
