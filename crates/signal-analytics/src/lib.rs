//! 기술적 지표 엔진 및 수급 패턴 감지기.
//!
//! 이 crate는 다음 기능을 제공합니다:
//! - OHLCV 시계열에 지표 컬럼을 추가하는 순수 함수 (`compute_indicators`)
//! - 이동평균/RSI/MACD/ATR/거래량 비율의 롤링 계산
//! - 외국인/기관 수급 패턴 분류 (물량 털기 vs 진짜 이탈)
//!
//! 모든 계산은 입력에만 의존하는 순수 함수이며, 같은 입력에 대해 항상
//! 같은 출력을 냅니다.

pub mod indicators;
pub mod pattern;

pub use indicators::{compute_indicators, IndicatorConfig};
pub use pattern::{analyze_investor_pattern, detect_recovery_signal, pattern_strength, PriceContext};
