use serde::Serialize;

/// 장기 수익 추정에 쓰는 기본 기간 (모듈 기대 수명).
pub const LONG_HORIZON_YEARS: u32 = 25;

/// 장기 누적 절감/순이익 추정 결과. 할인하지 않은 정액 추정이다.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SavingsProjection {
    pub years: u32,
    /// 기간 총 절감액
    pub total_savings: f64,
    /// 총 절감액 - 투자비
    pub net_profit: f64,
    /// 연도별 누적 순현금흐름 (1년차부터, 투자비 차감 후)
    pub cumulative_net: Vec<f64>,
}

impl SavingsProjection {
    /// 누적 순현금흐름이 처음으로 0 이상이 되는 연차. 없으면 None.
    pub fn break_even_year(&self) -> Option<u32> {
        self.cumulative_net
            .iter()
            .position(|v| *v >= 0.0)
            .map(|idx| idx as u32 + 1)
    }
}

/// 연간 절감액이 매년 같다고 보고 `years` 동안의 누적 절감과 순이익을 계산한다.
pub fn project_savings(annual_savings: f64, investment: f64, years: u32) -> SavingsProjection {
    let cumulative_net = (1..=years)
        .map(|year| annual_savings * year as f64 - investment)
        .collect();
    let total_savings = annual_savings * years as f64;
    SavingsProjection {
        years,
        total_savings,
        net_profit: total_savings - investment,
        cumulative_net,
    }
}
