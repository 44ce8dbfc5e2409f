//! # Signal Core
//!
//! 주식 신호 분석 도구의 핵심 도메인 모델 및 타입을 제공합니다.
//!
//! 이 크레이트는 분석 파이프라인 전반에서 사용되는 기본 타입을 제공합니다:
//! - 일봉(OHLCV) 시계열 및 지표 행
//! - 매매 신호 및 분석 모드
//! - 외국인/기관 수급 데이터와 패턴 분류
//! - 종목 코드 및 시장 구분
//! - 에러 타입
//! - 로깅 인프라

pub mod domain;
pub mod error;
pub mod logging;
pub mod types;

pub use domain::*;
pub use error::*;
pub use logging::*;
pub use types::*;
