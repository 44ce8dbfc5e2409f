//! 가격 목표 계산 설정.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// 가격 목표 계산기 설정.
///
/// 패턴별 매수/익절 계수는 고정 결정표이며, 여기에는 과열 판단 기준과
/// 도달 일수 추정 파라미터만 둡니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RiskConfig {
    /// RSI 과열 기준 (익절 타이트닝, 과열 판단)
    pub rsi_overheat: Decimal,
    /// MA20 대비 과열 비율 (현재가 / MA20)
    pub ma20_overheat_ratio: Decimal,
    /// 도달 일수 추정에 쓰는 일일 변화율 하한
    pub min_daily_change: Decimal,
    /// 도달 일수 상한
    pub max_days: u32,
    /// 도달 일수 추정용 룩백 (일봉 수)
    pub change_lookback: usize,
}

impl Default for RiskConfig {
    fn default() -> Self {
        Self {
            rsi_overheat: dec!(70),
            ma20_overheat_ratio: dec!(1.15),
            min_daily_change: dec!(0.003),
            max_days: 30,
            change_lookback: 10,
        }
    }
}
