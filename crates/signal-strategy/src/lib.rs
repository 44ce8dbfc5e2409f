//! 모드별 매매 신호 분류기.
//!
//! 단타/스윙/장기 세 가지 분석 모드를 제공합니다. 각 분류기는 최신 지표
//! 행과 짧은 룩백 구간을 입력받아 `ClassifiedSignal`을 생성하는 순수
//! 함수이며, 호출 간 상태를 유지하지 않습니다.
//!
//! 공통 규칙:
//! - 진입과 청산 조건이 동시에 참이면 항상 청산이 우선합니다.
//! - 필수 지표가 `None`이면 판단을 보류하고 `Watch`로 떨어집니다.
//!   숫자 기본값으로 대체하지 않습니다.

pub mod config;
pub mod modes;

pub use config::{DaytradeConfig, LongtermConfig, StrategyConfig, SwingConfig};
pub use modes::{classify, StrategySnapshot};
