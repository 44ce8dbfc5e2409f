//! 주식 신호 분석 CLI.
//!
//! # 사용 예시
//!
//! ```bash
//! # 삼성전자 스윙 신호 분석
//! signal analyze -s 005930 -m swing
//!
//! # 외국인/기관 수급 패턴 분석
//! signal pattern -s 005930 --days 5
//!
//! # 매수 구간/손절가/익절가 산출 (보유 매수가 기준)
//! signal targets -s 005930 --buy-price 72800
//!
//! # JSON 출력
//! signal analyze -s 005930 -m longterm --json
//! ```

use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use signal_core::SignalMode;

mod commands;

use commands::analyze::{self, AnalyzeConfig};
use commands::pattern::{self, PatternConfig};
use commands::targets::{self, TargetsConfig};

#[derive(Parser)]
#[command(name = "signal")]
#[command(about = "Stock signal analysis CLI - 네이버/Yahoo 기반 신호 분석", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// 모드별 진입/청산 신호 분석
    Analyze {
        /// 종목 코드/심볼 (예: 005930, AAPL)
        #[arg(short, long)]
        symbol: String,

        /// 분석 모드 (daytrade, swing, longterm)
        #[arg(short, long, default_value = "swing")]
        mode: String,

        /// 조회할 일봉 수
        #[arg(long, default_value = "130")]
        limit: usize,

        /// JSON 형식으로 출력
        #[arg(long)]
        json: bool,
    },

    /// 외국인/기관 수급 패턴 분석 (국내 종목 전용)
    Pattern {
        /// 종목 코드 (예: 005930)
        #[arg(short, long)]
        symbol: String,

        /// 분석할 최근 일수
        #[arg(short, long, default_value = "5")]
        days: usize,

        /// 조회할 일봉 수
        #[arg(long, default_value = "130")]
        limit: usize,

        /// JSON 형식으로 출력
        #[arg(long)]
        json: bool,
    },

    /// 매수 구간/손절가/익절가 산출
    Targets {
        /// 종목 코드/심볼 (예: 005930)
        #[arg(short, long)]
        symbol: String,

        /// 매수가 (미지정 시 현재가 기준)
        #[arg(short, long)]
        buy_price: Option<Decimal>,

        /// 조회할 일봉 수
        #[arg(long, default_value = "130")]
        limit: usize,

        /// JSON 형식으로 출력
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    signal_core::init_logging_from_env().map_err(|e| anyhow::anyhow!("로깅 초기화 실패: {e}"))?;

    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze {
            symbol,
            mode,
            limit,
            json,
        } => {
            let mode: SignalMode = mode
                .parse()
                .map_err(|_| anyhow::anyhow!("지원하지 않는 모드: {mode}"))?;
            analyze::run(AnalyzeConfig {
                symbol,
                mode,
                limit,
                json,
            })
            .await
        }
        Commands::Pattern {
            symbol,
            days,
            limit,
            json,
        } => {
            pattern::run(PatternConfig {
                symbol,
                days,
                limit,
                json,
            })
            .await
        }
        Commands::Targets {
            symbol,
            buy_price,
            limit,
            json,
        } => {
            targets::run(TargetsConfig {
                symbol,
                buy_price,
                limit,
                json,
            })
            .await
        }
    }
}
