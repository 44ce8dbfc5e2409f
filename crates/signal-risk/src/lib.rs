//! 패턴 기반 가격 목표 계산기.
//!
//! 수급 패턴 분류 결과와 현재가를 입력받아 매수 구간, 손절가, 익절가를
//! 계산합니다. 모든 계산은 순수 함수이며, "지금보다 싸게 산다" 계약을
//! 지키기 위해 매수 구간 상단은 항상 현재가 이하로 클램프됩니다.

pub mod config;
pub mod overheat;
pub mod stop_loss;
pub mod targets;

pub use config::RiskConfig;
pub use overheat::{assess_overheating, OverheatAssessment};
pub use stop_loss::{risk_reward_ratio, stop_loss, StopLossPlan};
pub use targets::{buy_ranges, take_profits, BuyPlan, BuyRange, TakeProfitPlan};
