//! 매수 구간 및 익절가 계산.

use crate::config::RiskConfig;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use signal_core::{IndicatorRow, PatternType};
use tracing::debug;

/// 매수 구간 (`[low, high)` 밴드).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuyRange {
    /// 구간 하단
    pub low: Decimal,
    /// 구간 상단 (현재가 이하로 클램프됨)
    pub high: Decimal,
    /// 도달 예상 일수
    pub days: u32,
    /// 구간 선정 근거
    pub reason: String,
}

/// 매수 계획 (1차/2차 구간).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuyPlan {
    /// 1차 매수 구간 (공격적)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first: Option<BuyRange>,
    /// 2차 매수 구간 (보수적)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub second: Option<BuyRange>,
    /// 전략 요약 문구
    pub strategy: String,
}

/// 익절 계획.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TakeProfitPlan {
    /// 1차 익절가
    pub first: Decimal,
    /// 2차 익절가
    pub second: Decimal,
    /// 익절 기준 근거
    pub reason: String,
}

/// 패턴별 매수 구간을 계산합니다.
///
/// 매수 구간 상단은 항상 현재가 이하로 클램프되고, 하단은 상단 이하로
/// 클램프됩니다. 진짜 이탈 패턴은 매수 구간을 만들지 않습니다.
pub fn buy_ranges(
    pattern: PatternType,
    rows: &[IndicatorRow],
    current_price: Decimal,
    config: &RiskConfig,
) -> BuyPlan {
    let latest = rows.last();
    let ma5 = latest
        .and_then(|r| r.ma5)
        .unwrap_or(current_price);
    let ma20 = latest
        .and_then(|r| r.ma20)
        .unwrap_or(current_price);

    let plan = match pattern {
        PatternType::Shakeout => BuyPlan {
            first: Some(band(
                ma5 * dec!(0.99),
                ma5,
                rows,
                current_price,
                config,
                "MA5 근처 눌림 구간 (1차 매수)",
            )),
            second: Some(band(
                ma20 * dec!(0.985),
                ma20,
                rows,
                current_price,
                config,
                "MA20 근처 눌림 구간 (2차 매수)",
            )),
            strategy: "물량 털기 패턴: 단기 조정 후 상승 가능성이 높으므로 눌림 구간에서 매수 추천"
                .to_string(),
        },
        PatternType::UptrendSignal => {
            let mut first = band(
                current_price * dec!(0.98),
                current_price,
                rows,
                current_price,
                config,
                "현재가 근처 (1차 매수)",
            );
            first.days = 1;
            BuyPlan {
                first: Some(first),
                second: Some(band(
                    ma5 * dec!(0.97),
                    ma5,
                    rows,
                    current_price,
                    config,
                    "MA5 근처 (2차 매수)",
                )),
                strategy: "상승 신호: 외국인과 기관이 동시 매수 중이므로 적극 매수 추천"
                    .to_string(),
            }
        }
        PatternType::RealBreakdown => BuyPlan {
            first: None,
            second: None,
            strategy: "진짜 이탈 패턴: 매수 비추천, 관망 권장".to_string(),
        },
        PatternType::Unclear => BuyPlan {
            first: Some(band(
                ma20 * dec!(0.97),
                ma20,
                rows,
                current_price,
                config,
                "MA20 근처 보수적 매수 (1차)",
            )),
            second: Some(band(
                ma20 * dec!(0.95),
                ma20 * dec!(0.97),
                rows,
                current_price,
                config,
                "MA20 아래 보수적 매수 (2차)",
            )),
            strategy: "불명확한 패턴: 보수적 접근 권장".to_string(),
        },
    };

    debug!(pattern = %pattern, current = %current_price, "매수 구간 계산");
    plan
}

/// 클램프된 매수 밴드를 만듭니다.
fn band(
    low: Decimal,
    high: Decimal,
    rows: &[IndicatorRow],
    current_price: Decimal,
    config: &RiskConfig,
    reason: &str,
) -> BuyRange {
    // "지금보다 싸게 산다" 계약: 상단은 현재가를 넘지 않는다
    let high = high.min(current_price);
    let low = low.min(high);
    BuyRange {
        low,
        high,
        days: estimate_days_to_price(rows, low, current_price, config),
        reason: reason.to_string(),
    }
}

/// 목표가 도달 예상 일수를 추정합니다.
///
/// 최근 `change_lookback`일 일일 변화율의 절대 평균으로 목표까지 필요한
/// 변화율을 나눕니다. 데이터가 5일 미만이면 기본값 3을 반환하고, 결과는
/// `1..=max_days`로 클램프됩니다.
pub fn estimate_days_to_price(
    rows: &[IndicatorRow],
    target_price: Decimal,
    current_price: Decimal,
    config: &RiskConfig,
) -> u32 {
    if rows.len() < 5 || current_price <= Decimal::ZERO {
        return 3;
    }

    let start = rows.len().saturating_sub(config.change_lookback);
    let recent = &rows[start..];
    let mut change_sum = Decimal::ZERO;
    let mut change_count = 0u32;
    for pair in recent.windows(2) {
        let prev = pair[0].close();
        if prev > Decimal::ZERO {
            change_sum += ((pair[1].close() - prev) / prev).abs();
            change_count += 1;
        }
    }
    if change_count == 0 {
        return 3;
    }

    let avg_daily_change = (change_sum / Decimal::from(change_count)).max(config.min_daily_change);
    let price_diff_pct = ((target_price - current_price) / current_price).abs();
    if price_diff_pct.is_zero() {
        return 0;
    }

    let estimated = (price_diff_pct / avg_daily_change)
        .trunc()
        .to_u32()
        .unwrap_or(u32::MAX);
    estimated.clamp(1, config.max_days)
}

/// 패턴별 익절가를 계산합니다.
///
/// RSI가 과열 기준을 넘으면 패턴과 무관하게 더 보수적인 익절가로
/// 조정합니다.
pub fn take_profits(
    pattern: PatternType,
    rsi: Option<Decimal>,
    buy_price: Decimal,
    config: &RiskConfig,
) -> TakeProfitPlan {
    let (first, second, reason) = match pattern {
        PatternType::Shakeout | PatternType::UptrendSignal => (
            buy_price * dec!(1.06),
            buy_price * dec!(1.13),
            "상승 패턴이므로 공격적 익절 추천",
        ),
        PatternType::RealBreakdown => (
            buy_price * dec!(1.03),
            buy_price * dec!(1.05),
            "하락 패턴이므로 빠른 익절 추천",
        ),
        PatternType::Unclear => (
            buy_price * dec!(1.05),
            buy_price * dec!(1.10),
            "불명확한 패턴이므로 보수적 익절 추천",
        ),
    };

    if rsi.is_some_and(|r| r > config.rsi_overheat) {
        return TakeProfitPlan {
            first: buy_price * dec!(1.04),
            second: buy_price * dec!(1.08),
            reason: format!("{} (RSI 과열 구간)", reason),
        };
    }

    TakeProfitPlan {
        first,
        second,
        reason: reason.to_string(),
    }
}
