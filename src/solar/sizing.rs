use serde::{Deserialize, Serialize};

use super::MONTHS_PER_YEAR;

/// 월 발전량 환산에 쓰는 고정 일수. 달력 일수가 아닌 30일 관례를 따른다.
pub const DAYS_PER_MONTH: f64 = 30.0;

/// 인버터 용량 = 어레이 용량 × 이 비율. 과대 설계를 피하기 위한 고정 정책값.
pub const INVERTER_SIZING_RATIO: f64 = 0.85;

/// 비교 시나리오에서 산정 모듈 수 위로 더 보여줄 모듈 수.
pub const SCENARIO_EXTRA_MODULES: u32 = 2;

/// 설비 용량 산정 중 발생 가능한 오류.
#[derive(Debug, Clone, PartialEq)]
pub enum SizingError {
    /// 입력값이 허용 범위를 벗어난 경우
    InvalidParameter(&'static str),
    /// 모듈당 월 발전량이 0 이하라 모듈 수를 산정할 수 없음
    DegenerateSizing { per_module_monthly_kwh: f64 },
}

impl std::fmt::Display for SizingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SizingError::InvalidParameter(msg) => write!(f, "입력 오류: {msg}"),
            SizingError::DegenerateSizing {
                per_module_monthly_kwh,
            } => write!(
                f,
                "모듈당 월 발전량이 {per_module_monthly_kwh:.3} kWh 이므로 모듈 수를 산정할 수 없습니다."
            ),
        }
    }
}

impl std::error::Error for SizingError {}

/// 발전 손실/효율 계수. 각 값은 (0, 1] 범위여야 한다.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LossFactors {
    /// 온도에 의한 출력 저하
    pub temperature: f64,
    /// 음영에 의한 출력 저하
    pub shading: f64,
    /// 배선/변환 손실
    pub conversion: f64,
    /// 인버터 효율
    pub inverter_efficiency: f64,
}

impl Default for LossFactors {
    fn default() -> Self {
        Self {
            temperature: 0.85,
            shading: 0.95,
            conversion: 0.92,
            inverter_efficiency: 0.96,
        }
    }
}

impl LossFactors {
    /// 네 계수의 곱(성능 계수, PR)을 반환한다.
    pub fn performance_factor(&self) -> f64 {
        self.temperature * self.shading * self.conversion * self.inverter_efficiency
    }

    fn validate(&self) -> Result<(), SizingError> {
        let in_range = |v: f64| v.is_finite() && v > 0.0 && v <= 1.0;
        if !in_range(self.temperature) {
            return Err(SizingError::InvalidParameter(
                "온도 손실 계수는 0 초과 1 이하이어야 합니다.",
            ));
        }
        if !in_range(self.shading) {
            return Err(SizingError::InvalidParameter(
                "음영 손실 계수는 0 초과 1 이하이어야 합니다.",
            ));
        }
        if !in_range(self.conversion) {
            return Err(SizingError::InvalidParameter(
                "변환 손실 계수는 0 초과 1 이하이어야 합니다.",
            ));
        }
        if !in_range(self.inverter_efficiency) {
            return Err(SizingError::InvalidParameter(
                "인버터 효율은 0 초과 1 이하이어야 합니다.",
            ));
        }
        Ok(())
    }
}

/// 용량 산정 입력.
#[derive(Debug, Clone)]
pub struct SizingInput {
    /// 월별 소비전력량 [kWh], 1월부터 12월까지 12개
    pub monthly_consumption_kwh: Vec<f64>,
    /// 모듈 정격 출력 [Wp]
    pub module_power_wp: f64,
    /// 일사량 [kWh/m²/day]. 12개월 모두에 동일하게 적용한다.
    pub irradiance_kwh_m2_day: f64,
    pub losses: LossFactors,
}

/// 용량 산정 결과.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SizingResult {
    /// 필요 모듈 수 (0이면 설비 불필요)
    pub module_count: u32,
    /// 산정에 쓴 모듈 정격 출력 [Wp]
    pub module_power_wp: f64,
    /// 어레이 총 용량 [Wp]
    pub total_power_wp: f64,
    /// 권장 인버터 용량 [W]
    pub inverter_power_w: f64,
    /// 평균 일 소비량 [kWh/day]
    pub average_daily_consumption_kwh: f64,
    /// 평균 월 소비량 [kWh/month] (설계 목표)
    pub average_monthly_consumption_kwh: f64,
    /// 모듈 1장의 일 발전량 [kWh/day]
    pub per_module_daily_kwh: f64,
    /// 모듈 1장의 월 발전량 [kWh/month]
    pub per_module_monthly_kwh: f64,
    /// 월별 예상 발전량 [kWh], 12개
    pub monthly_generation_kwh: Vec<f64>,
    /// 성능 계수 (손실 계수의 곱)
    pub performance_factor: f64,
}

impl SizingResult {
    /// 연간 예상 발전량 [kWh].
    pub fn annual_generation_kwh(&self) -> f64 {
        self.monthly_generation_kwh.iter().sum()
    }

    /// 모듈이 필요 없는 경우(소비량 0) true.
    pub fn no_system_needed(&self) -> bool {
        self.module_count == 0
    }

    /// 산정 모듈 수 n부터 n + extra까지의 비교 시나리오.
    pub fn scenarios(&self, extra: u32) -> Vec<SizingScenario> {
        (0..=extra)
            .map(|k| {
                let module_count = self.module_count + k;
                SizingScenario {
                    module_count,
                    total_power_wp: module_count as f64 * self.module_power_wp,
                    monthly_generation_kwh: module_count as f64 * self.per_module_monthly_kwh,
                }
            })
            .collect()
    }
}

/// 모듈 수별 비교 시나리오 한 줄.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SizingScenario {
    pub module_count: u32,
    /// 어레이 총 용량 [Wp]
    pub total_power_wp: f64,
    /// 평균 월 발전량 [kWh/month]
    pub monthly_generation_kwh: f64,
}

/// 월 소비량과 모듈/일사 조건으로 필요 모듈 수와 인버터 용량을 산정한다.
///
/// 일사량이 12개월에 동일하게 적용되므로 월별 매칭이 아니라 평균 월 소비량을 목표로
/// 모듈 수를 정한다.
pub fn size_system(input: SizingInput) -> Result<SizingResult, SizingError> {
    validate_consumption(&input.monthly_consumption_kwh)?;
    if !input.module_power_wp.is_finite() || input.module_power_wp <= 0.0 {
        return Err(SizingError::InvalidParameter(
            "모듈 출력은 0보다 커야 합니다.",
        ));
    }
    if !input.irradiance_kwh_m2_day.is_finite() || input.irradiance_kwh_m2_day < 0.0 {
        return Err(SizingError::InvalidParameter(
            "일사량은 0 이상이어야 합니다.",
        ));
    }
    input.losses.validate()?;

    let average_monthly = input.monthly_consumption_kwh.iter().sum::<f64>() / MONTHS_PER_YEAR as f64;
    let average_daily = average_monthly / DAYS_PER_MONTH;
    let performance_factor = input.losses.performance_factor();

    let per_module_daily =
        (input.module_power_wp / 1000.0) * input.irradiance_kwh_m2_day * performance_factor;
    let per_module_monthly = per_module_daily * DAYS_PER_MONTH;
    if per_module_monthly <= 0.0 {
        return Err(SizingError::DegenerateSizing {
            per_module_monthly_kwh: per_module_monthly,
        });
    }

    let module_count = (average_monthly / per_module_monthly).ceil().max(0.0) as u32;
    let total_power_wp = module_count as f64 * input.module_power_wp;
    let inverter_power_w = total_power_wp * INVERTER_SIZING_RATIO;
    let monthly_generation = vec![per_module_monthly * module_count as f64; MONTHS_PER_YEAR];

    tracing::debug!(
        module_count,
        performance_factor,
        per_module_monthly_kwh = per_module_monthly,
        average_monthly_kwh = average_monthly,
        "system sized"
    );

    Ok(SizingResult {
        module_count,
        module_power_wp: input.module_power_wp,
        total_power_wp,
        inverter_power_w,
        average_daily_consumption_kwh: average_daily,
        average_monthly_consumption_kwh: average_monthly,
        per_module_daily_kwh: per_module_daily,
        per_module_monthly_kwh: per_module_monthly,
        monthly_generation_kwh: monthly_generation,
        performance_factor,
    })
}

fn validate_consumption(values: &[f64]) -> Result<(), SizingError> {
    if values.len() != MONTHS_PER_YEAR {
        return Err(SizingError::InvalidParameter(
            "월별 소비량은 정확히 12개여야 합니다.",
        ));
    }
    if values.iter().any(|v| !v.is_finite() || *v < 0.0) {
        return Err(SizingError::InvalidParameter(
            "월별 소비량은 0 이상의 유한한 값이어야 합니다.",
        ));
    }
    Ok(())
}
