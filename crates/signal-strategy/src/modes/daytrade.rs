//! 단타 모드 분류기.
//!
//! MA5 근처 눌림 + 거래량 급증 + RSI 눌림 구간을 진입 후보로 봅니다.
//! 청산은 RSI 과열 또는 MA5 하향 이탈입니다.

use super::{abstain, near_pct, stop_loss_price, StrategySnapshot};
use crate::config::DaytradeConfig;
use signal_core::{ClassifiedSignal, SignalMode, SignalStatus};

/// 단타 신호를 분류합니다.
pub fn classify(snapshot: &StrategySnapshot<'_>, config: &DaytradeConfig) -> ClassifiedSignal {
    let Some(latest) = snapshot.rows.last() else {
        return abstain(SignalMode::Daytrade, snapshot, config.stop_loss_pct);
    };
    let (Some(ma5), Some(rsi), Some(volume_ratio)) =
        (latest.ma5, latest.rsi14, latest.volume_ratio)
    else {
        return abstain(SignalMode::Daytrade, snapshot, config.stop_loss_pct);
    };
    let price = latest.close();

    let mut reasons = Vec::new();

    let near_ma5 = near_pct(price, ma5, config.ma_tolerance_pct);
    if near_ma5 {
        reasons.push("MA5 근처 눌림".to_string());
    }

    let volume_ok = volume_ratio >= config.volume_ratio_min;
    if volume_ok {
        reasons.push(format!("거래량 {:.1}배", volume_ratio));
    }

    let rsi_ok = rsi >= config.rsi_entry_low && rsi <= config.rsi_entry_high;
    if rsi_ok {
        reasons.push(format!("RSI {:.1}", rsi));
    }

    let entry_signal = near_ma5 && volume_ok && rsi_ok;

    let mut exit_reasons = Vec::new();
    if rsi >= config.rsi_exit {
        exit_reasons.push("RSI 과열".to_string());
    }
    if price < ma5 {
        exit_reasons.push("MA5 하향 이탈".to_string());
    }
    let exit_signal = !exit_reasons.is_empty();

    let (status, status_text, recommendation, reasons) = if exit_signal {
        (
            SignalStatus::ExitWarning,
            "단타 매도 타이밍 임박",
            "익절 또는 일부 청산 권장",
            exit_reasons,
        )
    } else if entry_signal {
        (
            SignalStatus::EntryReady,
            "단타 매수 후보",
            "눌림 직후 단기 반등 노리기",
            reasons,
        )
    } else {
        (
            SignalStatus::Watch,
            "단타 관망 구간",
            "명확한 신호 대기",
            reasons,
        )
    };

    ClassifiedSignal {
        mode: SignalMode::Daytrade,
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
