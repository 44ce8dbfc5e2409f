//! 스윙 모드 분류기.
//!
//! MA20 지지 + 상승 기울기 + MACD 골든크로스 + RSI 눌림 구간을 진입
//! 후보로 봅니다. 거래량 비율은 참고 근거로만 기록하고 진입 필수 조건에는
//! 넣지 않습니다. 청산은 RSI 과열 또는 MA20 하향 이탈입니다.

use super::{abstain, ma_slope, near_pct, stop_loss_price, StrategySnapshot};
use crate::config::SwingConfig;
use rust_decimal::Decimal;
use signal_core::{ClassifiedSignal, SignalMode, SignalStatus};

/// 스윙 신호를 분류합니다.
pub fn classify(snapshot: &StrategySnapshot<'_>, config: &SwingConfig) -> ClassifiedSignal {
    let Some(latest) = snapshot.rows.last() else {
        return abstain(SignalMode::Swing, snapshot, config.stop_loss_pct);
    };
    let (Some(ma20), Some(rsi), Some(macd), Some(macd_signal)) =
        (latest.ma20, latest.rsi14, latest.macd, latest.macd_signal)
    else {
        return abstain(SignalMode::Swing, snapshot, config.stop_loss_pct);
    };
    let price = latest.close();

    let mut reasons = Vec::new();

    let near_ma20 = near_pct(price, ma20, config.ma_tolerance_pct);
    if near_ma20 {
        reasons.push("MA20 지지 확인".to_string());
    }

    // 기울기 룩백이 확보되지 않은 구간은 조건 불충족으로 취급
    let slope_positive = ma_slope(snapshot.rows, |r| r.ma20, config.slope_lookback)
        .is_some_and(|slope| slope > Decimal::ZERO);
    if slope_positive {
        reasons.push("MA20 상승 기울기 유지".to_string());
    }

    let macd_bullish = macd > macd_signal;
    if macd_bullish {
        reasons.push("MACD 골든크로스".to_string());
    }

    let rsi_ok = rsi >= config.rsi_entry_low && rsi <= config.rsi_entry_high;
    if rsi_ok {
        reasons.push(format!("RSI {:.1}", rsi));
    }

    if let Some(volume_ratio) = latest.volume_ratio {
        if volume_ratio >= config.volume_ratio_min {
            reasons.push(format!("거래량 {:.1}배", volume_ratio));
        }
    }

    let entry_signal = near_ma20 && slope_positive && macd_bullish && rsi_ok;

    let mut exit_reasons = Vec::new();
    if rsi >= config.rsi_exit {
        exit_reasons.push("RSI 과열".to_string());
    }
    if price < ma20 {
        exit_reasons.push("MA20 하향 이탈".to_string());
    }
    let exit_signal = !exit_reasons.is_empty();

    let (status, status_text, recommendation, reasons) = if exit_signal {
        (
            SignalStatus::ExitWarning,
            "스윙 청산 신호 감지",
            "익절 또는 비중 축소 검토",
            exit_reasons,
        )
    } else if entry_signal {
        (
            SignalStatus::EntryReady,
            "스윙 진입 유효",
            "MA20 지지 확인 후 분할 매수 대응",
            reasons,
        )
    } else {
        (
            SignalStatus::Watch,
            "추세 지속 중, 보유 권장",
            "추세 유지 시 보유, 추가 눌림 시 분할 매수 고려",
            reasons,
        )
    };

    ClassifiedSignal {
        mode: SignalMode::Swing,
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
