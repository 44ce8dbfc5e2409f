//! 과열 구간 판단.

use crate::config::RiskConfig;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// 과열 판단 결과.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OverheatAssessment {
    /// 과열 여부
    pub is_overheated: bool,
    /// 판단에 사용한 RSI (없으면 중립값 50)
    pub rsi: Decimal,
    /// 현재가 / MA20 비율 (%, MA20이 없으면 100)
    pub price_vs_ma: Decimal,
    /// 대응 권고 문구
    pub recommendation: String,
}

/// RSI와 MA20 대비 가격으로 과열 구간을 판단합니다.
///
/// RSI가 과열 기준을 넘거나 현재가가 MA20 대비 과열 비율을 넘으면
/// 과열로 판단합니다. 지표가 없으면 중립값으로 대체합니다.
pub fn assess_overheating(
    rsi: Option<Decimal>,
    current_price: Decimal,
    ma20: Option<Decimal>,
    config: &RiskConfig,
) -> OverheatAssessment {
    let rsi = rsi.unwrap_or(dec!(50));
    let price_vs_ma = match ma20 {
        Some(ma20) if ma20 > Decimal::ZERO => (current_price / ma20 * dec!(100)).round_dp(2),
        _ => dec!(100),
    };

    let ma_threshold = config.ma20_overheat_ratio * dec!(100);
    let (is_overheated, recommendation) = if rsi > config.rsi_overheat {
        (
            true,
            format!("RSI {:.1}로 과열 구간입니다. 익절 고려하세요.", rsi),
        )
    } else if price_vs_ma > ma_threshold {
        (
            true,
            format!(
                "현재가가 MA20 대비 {:.1}% 높습니다. 익절 고려하세요.",
                price_vs_ma - dec!(100)
            ),
        )
    } else if rsi > dec!(60) {
        (
            false,
            format!("RSI {:.1}로 상승 중입니다. 익절 준비하세요.", rsi),
        )
    } else {
        (false, "과열 구간이 아닙니다.".to_string())
    };

    OverheatAssessment {
        is_overheated,
        rsi,
        price_vs_ma,
        recommendation,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overheated_by_rsi() {
        let result = assess_overheating(
            Some(dec!(75)),
            dec!(10000),
            Some(dec!(9800)),
            &RiskConfig::default(),
        );
        assert!(result.is_overheated);
        assert!(result.recommendation.contains("과열 구간"));
    }

    #[test]
    fn test_overheated_by_price_extension() {
        // RSI는 정상이지만 현재가가 MA20보다 20% 높다
        let result = assess_overheating(
            Some(dec!(65)),
            dec!(12000),
            Some(dec!(10000)),
            &RiskConfig::default(),
        );
        assert!(result.is_overheated);
        assert_eq!(result.price_vs_ma, dec!(120));
    }

    #[test]
    fn test_rising_but_not_overheated() {
        let result = assess_overheating(
            Some(dec!(65)),
            dec!(10000),
            Some(dec!(9900)),
            &RiskConfig::default(),
        );
        assert!(!result.is_overheated);
        assert!(result.recommendation.contains("익절 준비"));
    }

    #[test]
    fn test_missing_indicators_use_neutral_defaults() {
        let result = assess_overheating(None, dec!(10000), None, &RiskConfig::default());
        assert!(!result.is_overheated);
        assert_eq!(result.rsi, dec!(50));
        assert_eq!(result.price_vs_ma, dec!(100));
    }
}
