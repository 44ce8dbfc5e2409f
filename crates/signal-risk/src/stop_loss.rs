//! 손절가 및 리스크/리워드 계산.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use signal_core::PatternType;

/// 손절 계획.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StopLossPlan {
    /// 손절가
    pub price: Decimal,
    /// 매수가 대비 손실률 (%, 음수)
    pub loss_pct: Decimal,
    /// 손절 기준 근거
    pub reason: String,
}

/// 패턴별 손절가를 계산합니다.
///
/// - 물량 털기 / 상승 신호: MA20 × 0.97 (지지선 이탈 기준)
/// - 진짜 이탈: 매수가 × 0.95 (빠른 손절)
/// - 불명확: min(MA20 × 0.97, 매수가 × 0.97) (보수적)
///
/// MA20이 없으면 매수가를 기준으로 대체합니다.
pub fn stop_loss(pattern: PatternType, ma20: Option<Decimal>, buy_price: Decimal) -> StopLossPlan {
    let ma20 = ma20.unwrap_or(buy_price);

    let (price, reason) = match pattern {
        PatternType::Shakeout | PatternType::UptrendSignal => {
            (ma20 * dec!(0.97), "MA20 이탈 시 손절 (3% 하락)")
        }
        PatternType::RealBreakdown => (
            buy_price * dec!(0.95),
            "하락 패턴이므로 빠른 손절 (5% 하락)",
        ),
        PatternType::Unclear => (
            (ma20 * dec!(0.97)).min(buy_price * dec!(0.97)),
            "보수적 손절 (3% 하락 또는 MA20 이탈)",
        ),
    };

    let loss_pct = if buy_price > Decimal::ZERO {
        ((price - buy_price) / buy_price * dec!(100)).round_dp(2)
    } else {
        Decimal::ZERO
    };

    StopLossPlan {
        price,
        loss_pct,
        reason: reason.to_string(),
    }
}

/// 리스크/리워드 비율을 계산합니다.
///
/// (익절가 - 매수가) / (매수가 - 손절가). 리스크가 0 이하이면 0.
pub fn risk_reward_ratio(buy_price: Decimal, take_profit: Decimal, stop: Decimal) -> Decimal {
    let reward = take_profit - buy_price;
    let risk = buy_price - stop;
    if risk <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    (reward / risk).round_dp(2)
}
