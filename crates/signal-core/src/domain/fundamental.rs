//! 외부에서 공급되는 펀더멘털 지표.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// 장기 모드 분류에 사용되는 펀더멘털 지표.
///
/// 모든 필드는 선택이며, 없는 값은 해당 조건을 평가하지 않습니다.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Fundamentals {
    /// PER (주가수익비율)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub per: Option<Decimal>,
    /// ROE (자기자본이익률, %)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub roe: Option<Decimal>,
    /// EPS (주당순이익)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub eps: Option<Decimal>,
}

impl Fundamentals {
    /// 모든 지표가 비어 있는지 확인합니다.
    pub fn is_empty(&self) -> bool {
        self.per.is_none() && self.roe.is_none() && self.eps.is_none()
    }
}
