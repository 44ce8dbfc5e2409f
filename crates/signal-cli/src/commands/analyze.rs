//! 종목 신호 분석 명령어.

use crate::commands::load_market_data;
use anyhow::{bail, Result};
use signal_core::{SignalMode, SignalStatus};
use signal_strategy::{classify, StrategyConfig, StrategySnapshot};
use tracing::warn;

/// analyze 명령어 설정.
pub struct AnalyzeConfig {
    /// 종목 코드/심볼
    pub symbol: String,
    /// 분석 모드
    pub mode: SignalMode,
    /// 조회할 일봉 수
    pub limit: usize,
    /// JSON 출력 여부
    pub json: bool,
}

/// 종목을 분석하고 결과를 출력합니다.
pub async fn run(config: AnalyzeConfig) -> Result<()> {
    if config.limit == 0 {
        bail!("조회할 일봉 수는 1 이상이어야 합니다");
    }

    let data = load_market_data(&config.symbol, config.limit).await?;

    // 장기 모드만 펀더멘털 사용
    let fundamentals = if config.mode == SignalMode::Longterm {
        match &data.providers.fundamentals {
            Some(provider) => match provider.fundamentals(&data.symbol).await {
                Ok(f) => Some(f),
                Err(e) => {
                    warn!(error = %e, "펀더멘털 조회 실패");
                    None
                }
            },
            None => None,
        }
    } else {
        None
    };

    let snapshot = StrategySnapshot {
        symbol: data.symbol.clone(),
        name: data.name.clone(),
        rows: &data.rows,
        fundamentals,
    };
    let signal = classify(config.mode, &snapshot, &StrategyConfig::default());

    let latest = data.series.latest();
    let current_price = latest.map(|bar| bar.close).unwrap_or_default();
    let as_of = latest.map(|bar| bar.date.to_string()).unwrap_or_default();

    if config.json {
        let payload = serde_json::json!({
            "signal": signal,
            "current_price": current_price,
            "as_of": as_of,
        });
        println!("{}", serde_json::to_string_pretty(&payload)?);
        return Ok(());
    }

    println!(
        "=== 신호 분석: {} ({}) ===",
        data.display_name(),
        data.symbol.code
    );
    println!("모드: {}", signal.mode);
    println!("기준일: {as_of}");
    println!("현재가: {current_price}");
    println!();
    println!("상태: {} - {}", signal.status, signal.status_text);
    if !signal.reasons.is_empty() {
        println!("근거: {}", signal.reason_text());
    }
    println!("권고: {}", signal.recommendation);
    match signal.stop_loss_price {
        Some(stop) => println!("손절가: {stop} (-{}%)", signal.stop_loss_pct),
        None => println!("손절가: 산출 불가 (지표 데이터 부족)"),
    }

    if signal.status == SignalStatus::ExitWarning {
        println!();
        println!("⚠️  청산 조건이 감지되었습니다. 보유 중이라면 대응을 검토하세요.");
    }

    Ok(())
}
