//! 외국인/기관 수급 패턴 분석 명령어.

use crate::commands::load_market_data;
use anyhow::{bail, Result};
use signal_analytics::{
    analyze_investor_pattern, detect_recovery_signal, pattern_strength, PriceContext,
};

/// pattern 명령어 설정.
pub struct PatternConfig {
    /// 종목 코드
    pub symbol: String,
    /// 분석할 최근 일수
    pub days: usize,
    /// 조회할 일봉 수
    pub limit: usize,
    /// JSON 출력 여부
    pub json: bool,
}

/// 수급 패턴을 분석하고 결과를 출력합니다.
pub async fn run(config: PatternConfig) -> Result<()> {
    if config.days == 0 {
        bail!("분석 일수는 1 이상이어야 합니다");
    }

    let data = load_market_data(&config.symbol, config.limit).await?;
    let Some(flow_provider) = &data.providers.flow else {
        bail!("수급 패턴 분석은 국내 종목만 지원합니다: {}", config.symbol);
    };

    let flows = flow_provider.investor_flows(&data.symbol).await?;

    let price_context = data.rows.last().and_then(|row| {
        row.ma20.map(|ma20| PriceContext {
            close: row.close(),
            ma20,
        })
    });
    let pattern = analyze_investor_pattern(&flows, price_context, config.days);
    let recovery = detect_recovery_signal(&flows);
    let strength = pattern_strength(&flows, price_context);

    if config.json {
        let payload = serde_json::json!({
            "symbol": data.symbol.code,
            "name": data.name,
            "pattern": pattern,
            "recovery": recovery,
            "strength": strength,
        });
        println!("{}", serde_json::to_string_pretty(&payload)?);
        return Ok(());
    }

    println!(
        "=== 수급 패턴: {} ({}) ===",
        data.display_name(),
        data.symbol.code
    );

    if !pattern.data_available {
        println!("수급 데이터가 없어 패턴을 판단할 수 없습니다.");
        return Ok(());
    }

    println!("패턴: {} (신뢰도 {}점)", pattern.pattern_type, pattern.confidence);
    println!("판단: {}", pattern.reason);
    println!();
    println!(
        "외국인: {} (평균 {}주)",
        pattern.foreign_trend, pattern.foreign_avg
    );
    println!(
        "기관:   {} (평균 {}주)",
        pattern.institution_trend, pattern.institution_avg
    );
    println!("거래량: {}", pattern.volume_trend);
    if let Some(price_trend) = pattern.price_trend {
        println!("가격:   {}", price_trend);
    }
    println!();
    println!("수급 강도: {strength}/100");
    if recovery.has_signal {
        println!("회복 신호: {}", recovery.message);
    }

    Ok(())
}
