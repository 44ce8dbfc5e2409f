//! 장기 모드 분류기.
//!
//! MA60 위 추세 유지 + 펀더멘털 2개 이상 충족을 진입 후보로 봅니다.
//! 청산은 MA60 하향 이탈, EPS 적자 전환, ROE 저하입니다. 펀더멘털이
//! 없으면 해당 조건은 평가하지 않습니다.

use super::{abstain, ma_slope, stop_loss_price, StrategySnapshot};
use crate::config::LongtermConfig;
use rust_decimal::Decimal;
use signal_core::{ClassifiedSignal, SignalMode, SignalStatus};

/// 장기 신호를 분류합니다.
pub fn classify(snapshot: &StrategySnapshot<'_>, config: &LongtermConfig) -> ClassifiedSignal {
    let Some(latest) = snapshot.rows.last() else {
        return abstain(SignalMode::Longterm, snapshot, config.stop_loss_pct);
    };
    let Some(ma60) = latest.ma60 else {
        return abstain(SignalMode::Longterm, snapshot, config.stop_loss_pct);
    };
    let price = latest.close();
    let fundamentals = snapshot.fundamentals.clone().unwrap_or_default();

    let mut reasons = Vec::new();

    // 기울기 룩백이 확보되지 않은 구간은 조건 불충족으로 취급
    let slope_ok = ma_slope(snapshot.rows, |r| r.ma60, config.slope_lookback)
        .is_some_and(|slope| slope >= Decimal::ZERO);
    let trend_ok = price >= ma60 && slope_ok;
    if trend_ok {
        reasons.push("MA60 위에서 추세 유지".to_string());
    }

    let mut fundamental_reasons = Vec::new();
    if let Some(per) = fundamentals.per {
        if per > Decimal::ZERO && per < config.per_max {
            fundamental_reasons.push(format!("PER {:.1}", per));
        }
    }
    if let Some(roe) = fundamentals.roe {
        if roe > config.roe_entry_min {
            fundamental_reasons.push(format!("ROE {:.1}%", roe));
        }
    }
    if let Some(eps) = fundamentals.eps {
        if eps > Decimal::ZERO {
            fundamental_reasons.push(format!("EPS {:.2}", eps));
        }
    }
    let fundamentals_ok = fundamental_reasons.len() >= 2;
    reasons.extend(fundamental_reasons);

    let entry_signal = trend_ok && fundamentals_ok;

    let mut exit_reasons = Vec::new();
    if price < ma60 * config.ma60_exit_ratio {
        exit_reasons.push("MA60 하향 이탈".to_string());
    }
    if fundamentals.eps.is_some_and(|eps| eps <= Decimal::ZERO) {
        exit_reasons.push("EPS 적자 전환".to_string());
    }
    if fundamentals.roe.is_some_and(|roe| roe < config.roe_exit_max) {
        exit_reasons.push("ROE 저하".to_string());
    }
    let exit_signal = !exit_reasons.is_empty();

    let (status, status_text, recommendation, reasons) = if exit_signal {
        (
            SignalStatus::ExitWarning,
            "가치 경고 신호",
            "재무 및 추세 재점검 필요",
            exit_reasons,
        )
    } else if entry_signal {
        (
            SignalStatus::EntryReady,
            "저평가 구간",
            "장기 분할매수 적합",
            reasons,
        )
    } else {
        (
            SignalStatus::Watch,
            "가치 중립",
            "기존 보유 유지, 추가 지표 모니터링",
            reasons,
        )
    };

    ClassifiedSignal {
        mode: SignalMode::Longterm,
        symbol: snapshot.symbol.clone(),
        name: snapshot.name.clone(),
        entry_signal,
        exit_signal,
        status,
        status_text: status_text.to_string(),
        reasons,
        recommendation: recommendation.to_string(),
        stop_loss_pct: config.stop_loss_pct,
        stop_loss_price: Some(stop_loss_price(price, config.stop_loss_pct)),
    }
}

#[cfg(test)]
mod tests {
    use super::super::testutil::{row, symbol};
    use super::*;
    use rust_decimal_macros::dec;
    use signal_core::{Fundamentals, IndicatorRow};

    fn rows_above_ma60() -> Vec<IndicatorRow> {
        let mut rows: Vec<IndicatorRow> = (0..4).map(|i| row(i, dec!(50000))).collect();
        for (i, r) in rows.iter_mut().enumerate() {
            r.ma60 = Some(Decimal::from(48000 + i as i64 * 100));
        }
        rows
    }

    fn classify_rows(
        rows: &[IndicatorRow],
        fundamentals: Option<Fundamentals>,
    ) -> ClassifiedSignal {
        let snapshot = StrategySnapshot {
            symbol: symbol(),
            name: None,
            rows,
            fundamentals,
        };
        classify(&snapshot, &LongtermConfig::default())
    }

    #[test]
    fn test_entry_needs_two_fundamental_criteria() {
        let rows = rows_above_ma60();
        let cheap = Fundamentals {
            per: Some(dec!(9.5)),
            roe: Some(dec!(12)),
            eps: None,
        };
        let signal = classify_rows(&rows, Some(cheap));

        assert!(signal.entry_signal);
        assert_eq!(signal.status, SignalStatus::EntryReady);
        assert!(signal.reasons.contains(&"MA60 위에서 추세 유지".to_string()));
        assert!(signal.reasons.contains(&"PER 9.5".to_string()));
        // 손절가는 현재가 -10%
        assert_eq!(signal.stop_loss_price, Some(dec!(45000)));
    }

    #[test]
    fn test_one_criterion_is_not_enough() {
        let rows = rows_above_ma60();
        let partial = Fundamentals {
            per: Some(dec!(9.5)),
            roe: None,
            eps: None,
        };
        let signal = classify_rows(&rows, Some(partial));

        assert!(!signal.entry_signal);
        assert_eq!(signal.status, SignalStatus::Watch);
    }

    #[test]
    fn test_exit_on_eps_deficit() {
        let rows = rows_above_ma60();
        let deficit = Fundamentals {
            per: None,
            roe: Some(dec!(10)),
            eps: Some(dec!(-120)),
        };
        let signal = classify_rows(&rows, Some(deficit));

        assert!(signal.exit_signal);
        assert_eq!(signal.reasons, vec!["EPS 적자 전환".to_string()]);
    }

    #[test]
    fn test_exit_on_ma60_breakdown() {
        let mut rows = rows_above_ma60();
        rows.last_mut().unwrap().ma60 = Some(dec!(52000));
        // 50000 < 52000 * 0.97 = 50440
        let signal = classify_rows(&rows, None);

        assert!(signal.exit_signal);
        assert_eq!(signal.reasons, vec!["MA60 하향 이탈".to_string()]);
    }

    #[test]
    fn test_missing_fundamentals_skips_value_checks() {
        let rows = rows_above_ma60();
        let signal = classify_rows(&rows, None);

        assert!(!signal.entry_signal);
        assert!(!signal.exit_signal);
        assert_eq!(signal.status, SignalStatus::Watch);
        assert!(signal.reasons.contains(&"MA60 위에서 추세 유지".to_string()));
    }

    #[test]
    fn test_slope_needs_lookback_window() {
        // 행이 룩백보다 짧으면 추세 조건은 불충족으로 취급된다
        let rows = rows_above_ma60();
        let cheap = Fundamentals {
            per: Some(dec!(9.5)),
            roe: Some(dec!(12)),
            eps: None,
        };
        let signal = classify_rows(&rows[3..], Some(cheap));

        assert!(!signal.entry_signal);
        assert_eq!(signal.status, SignalStatus::Watch);
        assert!(!signal.reasons.contains(&"MA60 위에서 추세 유지".to_string()));
    }

    #[test]
    fn test_abstains_without_ma60() {
        let rows: Vec<IndicatorRow> = vec![row(0, dec!(50000))];
        let signal = classify_rows(&rows, None);
        assert_eq!(signal.status_text, "지표 데이터 부족");
    }
}
