//! 외국인/기관 수급 패턴 감지.
//!
//! 물량 털기 vs 진짜 이탈을 고정 결정표로 판단합니다. 통계 모델이 아니라
//! 조회표 분류기이며, 신뢰도는 50~85 범위의 휴리스틱 점수입니다.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use signal_core::{
    FlowTrend, InvestorFlow, PatternInfo, PatternType, PriceTrend, RecoverySignal, RecoveryType,
    VolumeTrend,
};

/// 가격 맥락 (최신 종가와 MA20).
///
/// MA20이 아직 정의되지 않은 짧은 시계열에서는 생략하고, 이 경우
/// 가격 추세 조건은 평가하지 않습니다.
#[derive(Debug, Clone, Copy)]
pub struct PriceContext {
    /// 최신 종가
    pub close: Decimal,
    /// 20일 이동평균
    pub ma20: Decimal,
}

impl PriceContext {
    /// MA20 대비 가격 추세를 반환합니다.
    fn trend(&self) -> PriceTrend {
        if self.close > self.ma20 {
            PriceTrend::Rising
        } else {
            PriceTrend::Falling
        }
    }
}

fn flow_trend(avg: Decimal) -> FlowTrend {
    if avg > Decimal::ZERO {
        FlowTrend::Buying
    } else if avg < Decimal::ZERO {
        FlowTrend::Selling
    } else {
        FlowTrend::Neutral
    }
}

fn volume_trend(flows: &[InvestorFlow]) -> VolumeTrend {
    if flows.len() < 2 {
        return VolumeTrend::Steady;
    }
    let prev = flows[flows.len() - 2].volume;
    let last = flows[flows.len() - 1].volume;
    if prev == 0 {
        return VolumeTrend::Steady;
    }
    let change_pct =
        (Decimal::from(last) - Decimal::from(prev)) / Decimal::from(prev) * dec!(100);
    if change_pct > dec!(10) {
        VolumeTrend::Rising
    } else if change_pct < dec!(-10) {
        VolumeTrend::Falling
    } else {
        VolumeTrend::Steady
    }
}

/// 외국인/기관 매매 패턴 분석.
///
/// 최근 `days`일의 수급 데이터와 가격 맥락을 고정 결정표에 적용하여
/// 패턴과 신뢰도를 반환합니다.
pub fn analyze_investor_pattern(
    flows: &[InvestorFlow],
    price: Option<PriceContext>,
    days: usize,
) -> PatternInfo {
    if flows.is_empty() {
        return PatternInfo::unavailable();
    }

    let recent = if flows.len() > days {
        &flows[flows.len() - days..]
    } else {
        flows
    };
    let count = Decimal::from(recent.len() as u64);
    let foreign_avg =
        recent.iter().map(|f| f.foreign_net).sum::<Decimal>() / count;
    let institution_avg =
        recent.iter().map(|f| f.institution_net).sum::<Decimal>() / count;

    let foreign = flow_trend(foreign_avg);
    let institution = flow_trend(institution_avg);
    let volume = volume_trend(recent);
    let price_trend = price.map(|p| p.trend());

    // 고정 결정표. 우선순위가 높은 규칙부터 평가한다.
    let (pattern_type, confidence, reason): (PatternType, u8, String) = if foreign
        == FlowTrend::Selling
        && institution == FlowTrend::Buying
        && matches!(volume, VolumeTrend::Steady | VolumeTrend::Rising)
        && price_trend == Some(PriceTrend::Rising)
    {
        (
            PatternType::Shakeout,
            75,
            format!(
                "외국인 매도 중이지만 기관이 매수하고 있고, 거래량이 {}하며 가격이 20일선 위에 있어 물량 털기 가능성이 높습니다.",
                volume
            ),
        )
    } else if foreign == FlowTrend::Selling
        && institution == FlowTrend::Selling
        && volume == VolumeTrend::Falling
    {
        (
            PatternType::RealBreakdown,
            80,
            "외국인과 기관이 모두 매도하고 있고, 거래량이 감소하여 진짜 이탈 가능성이 높습니다."
                .to_string(),
        )
    } else if foreign == FlowTrend::Buying && institution == FlowTrend::Buying {
        (
            PatternType::UptrendSignal,
            85,
            "외국인과 기관이 동시에 매수하고 있어 상승 신호입니다.".to_string(),
        )
    } else if foreign == FlowTrend::Selling
        && matches!(institution, FlowTrend::Buying | FlowTrend::Neutral)
    {
        if volume == VolumeTrend::Steady && price_trend == Some(PriceTrend::Rising) {
            (
                PatternType::Shakeout,
                65,
                "외국인만 매도 중이지만 기관은 매수/중립이고, 거래량과 가격이 유지되어 물량 털기 가능성이 있습니다."
                    .to_string(),
            )
        } else {
            (
                PatternType::Unclear,
                50,
                "외국인 매도 중이지만 기관은 매수/중립입니다. 추가 관찰이 필요합니다.".to_string(),
            )
        }
    } else if institution == FlowTrend::Selling
        && matches!(foreign, FlowTrend::Buying | FlowTrend::Neutral)
    {
        (
            PatternType::Unclear,
            55,
            "기관만 매도 중입니다. 외국인 동향을 주시하세요.".to_string(),
        )
    } else {
        (
            PatternType::Unclear,
            50,
            "명확한 패턴이 감지되지 않았습니다.".to_string(),
        )
    };

    PatternInfo {
        pattern_type,
        confidence,
        foreign_trend: foreign,
        institution_trend: institution,
        foreign_avg,
        institution_avg,
        volume_trend: volume,
        price_trend,
        reason,
        data_available: true,
    }
}

/// 회복 신호 감지.
///
/// 진짜 이탈로 분류되었던 종목이 재매수 후보로 돌아오는 조건:
/// - 외국인이 하루라도 순매수로 전환
/// - 거래량이 전일 대비 +30% 이상
pub fn detect_recovery_signal(flows: &[InvestorFlow]) -> RecoverySignal {
    if flows.is_empty() {
        return RecoverySignal {
            has_signal: false,
            recovery_type: None,
            message: String::new(),
        };
    }

    let foreign_turned = flows
        .last()
        .map(|f| f.foreign_net > Decimal::ZERO)
        .unwrap_or(false);

    let volume_surged = if flows.len() >= 2 {
        let prev = flows[flows.len() - 2].volume;
        let last = flows[flows.len() - 1].volume;
        prev > 0
            && (Decimal::from(last) - Decimal::from(prev)) / Decimal::from(prev) * dec!(100)
                >= dec!(30)
    } else {
        false
    };

    let (recovery_type, message) = match (foreign_turned, volume_surged) {
        (true, true) => (
            Some(RecoveryType::Both),
            "외국인 매수 전환 + 거래량 급증: 재매수 후보로 전환".to_string(),
        ),
        (true, false) => (
            Some(RecoveryType::ForeignBuy),
            "외국인 매수 전환: 재매수 후보로 전환".to_string(),
        ),
        (false, true) => (
            Some(RecoveryType::VolumeSurge),
            "거래량 급증 (+30% 이상): 재매수 후보로 전환".to_string(),
        ),
        (false, false) => (None, String::new()),
    };

    RecoverySignal {
        has_signal: recovery_type.is_some(),
        recovery_type,
        message,
    }
}

/// 패턴 강도 점수 (0-100).
///
/// 기본 50점에서 외국인/기관 동향 일치도, 거래량 변화, MA20 대비 가격
/// 위치를 가감합니다.
pub fn pattern_strength(flows: &[InvestorFlow], price: Option<PriceContext>) -> u8 {
    if flows.is_empty() {
        return 0;
    }

    let mut score: i32 = 50;
    let recent = if flows.len() > 5 {
        &flows[flows.len() - 5..]
    } else {
        flows
    };

    // 최근 5일 중 3일 이상 순매수면 일관된 매수로 본다
    let foreign_consistent = recent
        .iter()
        .filter(|f| f.foreign_net > Decimal::ZERO)
        .count()
        >= 3;
    let institution_consistent = recent
        .iter()
        .filter(|f| f.institution_net > Decimal::ZERO)
        .count()
        >= 3;

    if foreign_consistent && institution_consistent {
        score += 20;
    } else if !foreign_consistent && !institution_consistent {
        score -= 20;
    }

    if recent.len() >= 2 {
        let prev = recent[recent.len() - 2].volume;
        let last = recent[recent.len() - 1].volume;
        if prev > 0 {
            let ratio = Decimal::from(last) / Decimal::from(prev);
            if ratio > dec!(1.2) {
                score += 10;
            } else if ratio < dec!(0.8) {
                score -= 10;
            }
        }
    }

    if let Some(ctx) = price {
        if ctx.close > ctx.ma20 * dec!(1.05) {
            score += 10;
        } else if ctx.close < ctx.ma20 * dec!(0.95) {
            score -= 10;
        }
    }

    score.clamp(0, 100) as u8
}
