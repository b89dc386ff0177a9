use serde::Serialize;

use super::MONTHS_PER_YEAR;

/// 할인 회수기간 탐색 상한 (50년).
pub const DISCOUNTED_HORIZON_MONTHS: u32 = 50 * MONTHS_PER_YEAR as u32;

/// 회수기간 계산 오류.
#[derive(Debug, Clone, PartialEq)]
pub enum PaybackError {
    /// 입력값이 잘못된 경우
    InvalidParameter(&'static str),
}

impl std::fmt::Display for PaybackError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PaybackError::InvalidParameter(msg) => write!(f, "입력 오류: {msg}"),
        }
    }
}

impl std::error::Error for PaybackError {}

/// 회수기간 계산 입력.
#[derive(Debug, Clone)]
pub struct PaybackInput {
    /// 월별 발전량 [kWh], 12개
    pub monthly_generation_kwh: Vec<f64>,
    /// 월별 소비량 [kWh], 12개
    pub monthly_consumption_kwh: Vec<f64>,
    /// 전력 요금 [통화/kWh]
    pub tariff_per_kwh: f64,
    /// 총 투자비 [통화]
    pub investment: f64,
    /// 연 할인율(소수). 0이면 할인 회수기간을 계산하지 않는다.
    pub annual_discount_rate: f64,
}

/// 할인 회수기간 상태.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum DiscountedPayback {
    /// 할인율이 0이라 계산하지 않음
    NotRequested,
    /// 연간 절감액이 0 이하라 회수 불가
    NotViable,
    /// 해당 개월 수에 투자비를 회수함
    Resolved { months: u32 },
    /// 상한(600개월) 안에 회수하지 못함
    ExceedsHorizon,
}

impl DiscountedPayback {
    /// 회수된 경우 연 단위 기간을 반환한다.
    pub fn years(&self) -> Option<f64> {
        match self {
            DiscountedPayback::Resolved { months } => Some(*months as f64 / MONTHS_PER_YEAR as f64),
            _ => None,
        }
    }
}

/// 회수기간 계산 결과.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaybackResult {
    /// 월별 절감액 [통화], 12개
    pub monthly_savings: Vec<f64>,
    pub average_monthly_savings: f64,
    pub annual_savings: f64,
    /// 단순 회수기간 [년]. 회수 불가 시 `f64::INFINITY`.
    pub simple_payback_years: f64,
    pub discounted_payback: DiscountedPayback,
}

impl PaybackResult {
    /// 단순 회수기간이 유한한지 여부.
    pub fn is_viable(&self) -> bool {
        self.simple_payback_years.is_finite()
    }
}

/// m번째 달 절감액의 현재가치. 월 할인율은 연 할인율 / 12 (명목 분할)이다.
pub fn present_value_of_month(saving: f64, annual_discount_rate: f64, month: u32) -> f64 {
    let monthly_rate = annual_discount_rate / MONTHS_PER_YEAR as f64;
    saving / (1.0 + monthly_rate).powi(month as i32)
}

/// 발전량/소비량/요금/투자비로 월 절감액과 단순·할인 회수기간을 계산한다.
///
/// 절감액은 자가소비분(발전량과 소비량 중 작은 값)에만 요금을 적용하며, 잉여 송전분은
/// 수익으로 보지 않는다.
pub fn compute_payback(input: PaybackInput) -> Result<PaybackResult, PaybackError> {
    validate(&input)?;

    let monthly_savings: Vec<f64> = input
        .monthly_generation_kwh
        .iter()
        .zip(&input.monthly_consumption_kwh)
        .map(|(generation, consumption)| generation.min(*consumption) * input.tariff_per_kwh)
        .collect();
    let annual_savings: f64 = monthly_savings.iter().sum();
    let average_monthly_savings = annual_savings / MONTHS_PER_YEAR as f64;

    let simple_payback_years = if annual_savings > 0.0 {
        input.investment / annual_savings
    } else {
        f64::INFINITY
    };

    let discounted_payback = if input.annual_discount_rate <= 0.0 {
        DiscountedPayback::NotRequested
    } else if annual_savings <= 0.0 {
        DiscountedPayback::NotViable
    } else {
        discounted_payback(&monthly_savings, input.investment, input.annual_discount_rate)
    };

    tracing::debug!(
        annual_savings,
        simple_payback_years,
        ?discounted_payback,
        "payback computed"
    );

    Ok(PaybackResult {
        monthly_savings,
        average_monthly_savings,
        annual_savings,
        simple_payback_years,
        discounted_payback,
    })
}

/// 12개월 절감 패턴을 반복하며 월 단위로 할인 현금흐름을 누적한다.
fn discounted_payback(monthly_savings: &[f64], investment: f64, annual_rate: f64) -> DiscountedPayback {
    if investment <= 0.0 {
        return DiscountedPayback::Resolved { months: 0 };
    }
    let mut accumulated = 0.0;
    for month in 1..=DISCOUNTED_HORIZON_MONTHS {
        let saving = monthly_savings[(month as usize - 1) % MONTHS_PER_YEAR];
        accumulated += present_value_of_month(saving, annual_rate, month);
        if accumulated >= investment {
            return DiscountedPayback::Resolved { months: month };
        }
    }
    DiscountedPayback::ExceedsHorizon
}

fn validate(input: &PaybackInput) -> Result<(), PaybackError> {
    if input.monthly_generation_kwh.len() != MONTHS_PER_YEAR
        || input.monthly_consumption_kwh.len() != MONTHS_PER_YEAR
    {
        return Err(PaybackError::InvalidParameter(
            "월별 발전량과 소비량은 각각 12개여야 합니다.",
        ));
    }
    let non_negative = |v: &f64| v.is_finite() && *v >= 0.0;
    if !input.monthly_generation_kwh.iter().all(non_negative)
        || !input.monthly_consumption_kwh.iter().all(non_negative)
    {
        return Err(PaybackError::InvalidParameter(
            "월별 발전량과 소비량은 0 이상이어야 합니다.",
        ));
    }
    if !non_negative(&input.tariff_per_kwh) {
        return Err(PaybackError::InvalidParameter(
            "전력 요금은 0 이상이어야 합니다.",
        ));
    }
    if !non_negative(&input.investment) {
        return Err(PaybackError::InvalidParameter(
            "투자비는 0 이상이어야 합니다.",
        ));
    }
    if !non_negative(&input.annual_discount_rate) {
        return Err(PaybackError::InvalidParameter(
            "할인율은 0 이상이어야 합니다.",
        ));
    }
    Ok(())
}
