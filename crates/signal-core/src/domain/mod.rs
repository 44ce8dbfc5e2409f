//! 분석 파이프라인의 도메인 모델.

pub mod flow;
pub mod fundamental;
pub mod indicator;
pub mod price;
pub mod signal;

pub use flow::*;
pub use fundamental::*;
pub use indicator::*;
pub use price::*;
pub use signal::*;
