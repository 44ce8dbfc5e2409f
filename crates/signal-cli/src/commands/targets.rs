//! 매수 구간/손절가/익절가 산출 명령어.

use crate::commands::load_market_data;
use anyhow::{bail, Result};
use rust_decimal::Decimal;
use signal_analytics::{analyze_investor_pattern, PriceContext};
use signal_core::PatternType;
use signal_risk::{
    assess_overheating, buy_ranges, risk_reward_ratio, stop_loss, take_profits, RiskConfig,
};
use tracing::warn;

/// 수급 패턴 분석에 사용할 최근 일수.
const PATTERN_DAYS: usize = 5;

/// targets 명령어 설정.
pub struct TargetsConfig {
    /// 종목 코드/심볼
    pub symbol: String,
    /// 매수가 (미지정 시 현재가 기준)
    pub buy_price: Option<Decimal>,
    /// 조회할 일봉 수
    pub limit: usize,
    /// JSON 출력 여부
    pub json: bool,
}

/// 리스크 지표를 산출하고 출력합니다.
pub async fn run(config: TargetsConfig) -> Result<()> {
    if let Some(buy_price) = config.buy_price {
        if buy_price <= Decimal::ZERO {
            bail!("매수가는 양수여야 합니다: {buy_price}");
        }
    }

    let data = load_market_data(&config.symbol, config.limit).await?;
    let latest_row = data.rows.last();
    let current_price = latest_row.map(|r| r.close()).unwrap_or_default();
    if current_price.is_zero() {
        bail!("현재가를 확인할 수 없습니다: {}", config.symbol);
    }
    let ma20 = latest_row.and_then(|r| r.ma20);
    let rsi = latest_row.and_then(|r| r.rsi14);
    let buy_price = config.buy_price.unwrap_or(current_price);

    // 수급 패턴: 조회 불가 시 패턴 불명으로 산출
    let mut pattern_type = PatternType::Unclear;
    if let Some(flow_provider) = &data.providers.flow {
        match flow_provider.investor_flows(&data.symbol).await {
            Ok(flows) => {
                let price_context = ma20.map(|ma20| PriceContext {
                    close: current_price,
                    ma20,
                });
                let pattern = analyze_investor_pattern(&flows, price_context, PATTERN_DAYS);
                if pattern.data_available {
                    pattern_type = pattern.pattern_type;
                }
            }
            Err(e) => warn!(error = %e, "수급 데이터 조회 실패, 패턴 불명으로 계산"),
        }
    }

    let risk_config = RiskConfig::default();
    let buy_plan = buy_ranges(pattern_type, &data.rows, current_price, &risk_config);
    let stop_plan = stop_loss(pattern_type, ma20, buy_price);
    let profit_plan = take_profits(pattern_type, rsi, buy_price, &risk_config);
    let overheat = assess_overheating(rsi, current_price, ma20, &risk_config);
    let ratio = risk_reward_ratio(buy_price, profit_plan.first, stop_plan.price);

    if config.json {
        let payload = serde_json::json!({
            "symbol": data.symbol.code,
            "name": data.name,
            "current_price": current_price,
            "buy_price": buy_price,
            "pattern": pattern_type,
            "buy_plan": buy_plan,
            "stop_loss": stop_plan,
            "take_profit": profit_plan,
            "overheat": overheat,
            "risk_reward_ratio": ratio,
        });
        println!("{}", serde_json::to_string_pretty(&payload)?);
        return Ok(());
    }

    println!(
        "=== 리스크 산출: {} ({}) ===",
        data.display_name(),
        data.symbol.code
    );
    println!("현재가: {current_price} / 기준 매수가: {buy_price}");
    println!("수급 패턴: {pattern_type}");
    println!();

    println!("[매수 구간] {}", buy_plan.strategy);
    match &buy_plan.first {
        Some(first) => {
            println!(
                "  1차: {} ~ {} (예상 {}일, {})",
                first.low, first.high, first.days, first.reason
            );
            if let Some(second) = &buy_plan.second {
                println!(
                    "  2차: {} ~ {} (예상 {}일, {})",
                    second.low, second.high, second.days, second.reason
                );
            }
        }
        None => println!("  신규 매수 구간 없음"),
    }
    println!();

    println!("[손절] {} ({}%)", stop_plan.price, stop_plan.loss_pct);
    println!("  {}", stop_plan.reason);
    println!();

    println!("[익절] 1차 {} / 2차 {}", profit_plan.first, profit_plan.second);
    println!("  {}", profit_plan.reason);
    println!();

    println!("손익비: {ratio}");
    println!(
        "과열 진단: RSI {} / MA20 대비 {}% - {}",
        overheat.rsi, overheat.price_vs_ma, overheat.recommendation
    );

    Ok(())
}
