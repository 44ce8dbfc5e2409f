//! Standalone watcher daemon CLI.

use clap::Parser;
use signal_notification::{NotificationManager, TelegramSender, WebhookSender};
use signal_watcher::{evaluate, AlertState, WatcherConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "signal-watcher")]
#[command(about = "Stock signal watcher daemon", long_about = None)]
#[command(version)]
struct Cli {
    /// 1회 실행 후 종료 (RUN_ONCE 환경변수보다 우선)
    #[arg(long)]
    once: bool,

    /// 로그 레벨 (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // 로깅 초기화
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("signal_watcher={}", cli.log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Signal Watcher 시작");

    // 설정 로드 (STOCK_CODES 미설정 시 즉시 종료)
    let config = WatcherConfig::from_env()?;
    tracing::info!(
        stocks = config.stock_codes.len(),
        positions = config.positions.len(),
        mode = %config.mode,
        interval_seconds = config.check_interval_seconds,
        "설정 로드 완료"
    );

    // 알림 채널 구성
    let mut notifier = NotificationManager::new();
    match TelegramSender::from_env() {
        Some(sender) => notifier.add_sender(sender),
        None => tracing::warn!("TELEGRAM_BOT_TOKEN/TELEGRAM_CHAT_ID 미설정, 텔레그램 비활성"),
    }
    if let Some(sender) = WebhookSender::from_env() {
        notifier.add_sender(sender);
    }
    if !notifier.has_enabled_sender() {
        tracing::warn!("활성화된 알림 채널이 없습니다. 평가 결과는 로그로만 남습니다");
    }

    let mut state = AlertState::load(&config.alert_state_path, config.cooldown());

    if cli.once || config.run_once {
        let stats = evaluate::run_cycle(&config, &notifier, &mut state).await;
        stats.log_summary();
        tracing::info!("Signal Watcher 종료 (1회 실행)");
        return Ok(());
    }

    let mut config = config;
    let mut interval = tokio::time::interval(config.interval());
    interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("종료 신호 수신, 데몬 종료 중...");
                break;
            }
            _ = interval.tick() => {
                // 사이클마다 설정을 다시 읽어 재시작 없이 반영
                match WatcherConfig::from_env() {
                    Ok(reloaded) => {
                        if reloaded.check_interval_seconds != config.check_interval_seconds {
                            interval = tokio::time::interval(reloaded.interval());
                            interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
                            interval.reset();
                        }
                        if reloaded.alert_state_path != *state.path() {
                            state = AlertState::load(&reloaded.alert_state_path, reloaded.cooldown());
                        } else {
                            state.set_cooldown(reloaded.cooldown());
                        }
                        config = reloaded;
                    }
                    Err(e) => tracing::error!(error = %e, "설정 재로드 실패, 기존 설정 유지"),
                }

                tracing::info!("=== 감시 사이클 시작 ===");
                let stats = evaluate::run_cycle(&config, &notifier, &mut state).await;
                stats.log_summary();
                tracing::info!(
                    "=== 사이클 완료, 다음 실행: {}초 후 ===",
                    config.check_interval_seconds
                );
            }
        }
    }

    tracing::info!("Signal Watcher 종료");
    Ok(())
}
