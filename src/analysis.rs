//! 용량 산정 → (선택) 회수기간 → 수지/장기 추정까지 한 번에 실행하는 계산 파이프라인.

use serde::Serialize;

use crate::solar::projection::{project_savings, SavingsProjection, LONG_HORIZON_YEARS};
use crate::solar::{
    compute_payback, energy_balance, size_system, AnnualBalance, LossFactors, PaybackError,
    PaybackInput, PaybackResult, SizingError, SizingInput, SizingResult,
};

/// 경제성 분석 입력.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EconomicInput {
    /// 총 투자비 [통화]
    pub investment: f64,
    /// 전력 요금 [통화/kWh]
    pub tariff_per_kwh: f64,
    /// 연 할인율(소수)
    pub annual_discount_rate: f64,
}

/// 분석 전체 입력.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisInput {
    pub monthly_consumption_kwh: Vec<f64>,
    pub module_power_wp: f64,
    pub irradiance_kwh_m2_day: f64,
    pub losses: LossFactors,
    /// `None`이면 회수기간을 계산하지 않는다.
    pub economics: Option<EconomicInput>,
}

/// 경제성 분석 결과.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EconomicsOutcome {
    pub payback: PaybackResult,
    pub projection: SavingsProjection,
}

/// 분석 결과. 보고서 출력의 원천 데이터이다.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Analysis {
    pub input: AnalysisInput,
    pub sizing: SizingResult,
    pub balance: AnnualBalance,
    pub economics: Option<EconomicsOutcome>,
}

/// 분석 중 발생 가능한 오류.
#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisError {
    Sizing(SizingError),
    Payback(PaybackError),
}

impl std::fmt::Display for AnalysisError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AnalysisError::Sizing(e) => write!(f, "용량 산정 오류: {e}"),
            AnalysisError::Payback(e) => write!(f, "회수기간 계산 오류: {e}"),
        }
    }
}

impl std::error::Error for AnalysisError {}

impl From<SizingError> for AnalysisError {
    fn from(value: SizingError) -> Self {
        AnalysisError::Sizing(value)
    }
}

impl From<PaybackError> for AnalysisError {
    fn from(value: PaybackError) -> Self {
        AnalysisError::Payback(value)
    }
}

/// 입력 전체를 검증/계산한다. 어느 단계든 실패하면 부분 결과 없이 오류를 돌려준다.
pub fn analyze(input: AnalysisInput) -> Result<Analysis, AnalysisError> {
    let sizing = size_system(SizingInput {
        monthly_consumption_kwh: input.monthly_consumption_kwh.clone(),
        module_power_wp: input.module_power_wp,
        irradiance_kwh_m2_day: input.irradiance_kwh_m2_day,
        losses: input.losses,
    })?;
    let balance = energy_balance(&input.monthly_consumption_kwh, &sizing.monthly_generation_kwh);

    let economics = match &input.economics {
        Some(econ) => {
            let payback = compute_payback(PaybackInput {
                monthly_generation_kwh: sizing.monthly_generation_kwh.clone(),
                monthly_consumption_kwh: input.monthly_consumption_kwh.clone(),
                tariff_per_kwh: econ.tariff_per_kwh,
                investment: econ.investment,
                annual_discount_rate: econ.annual_discount_rate,
            })?;
            let projection =
                project_savings(payback.annual_savings, econ.investment, LONG_HORIZON_YEARS);
            Some(EconomicsOutcome {
                payback,
                projection,
            })
        }
        None => None,
    };

    Ok(Analysis {
        input,
        sizing,
        balance,
        economics,
    })
}
