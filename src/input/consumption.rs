use serde::{Deserialize, Serialize};

use crate::solar::MONTHS_PER_YEAR;

/// 월별 소비량 구성 오류.
#[derive(Debug, Clone, PartialEq)]
pub enum ConsumptionError {
    /// 12개가 아님
    WrongLength(usize),
    /// 음수 또는 유한하지 않은 값 (월 index)
    InvalidValue(usize),
    /// 0..12 밖의 월 index
    MonthOutOfRange(usize),
}

impl std::fmt::Display for ConsumptionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConsumptionError::WrongLength(n) => {
                write!(f, "월별 소비량은 12개여야 합니다 (입력 {n}개).")
            }
            ConsumptionError::InvalidValue(idx) => {
                write!(f, "{}월 소비량이 올바르지 않습니다.", idx + 1)
            }
            ConsumptionError::MonthOutOfRange(idx) => {
                write!(f, "월 index {idx}는 0~11 범위를 벗어났습니다.")
            }
        }
    }
}

impl std::error::Error for ConsumptionError {}

/// 1월~12월 소비량 [kWh]. 항상 12개의 0 이상 값을 가진다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<f64>", into = "Vec<f64>")]
pub struct MonthlyConsumption([f64; MONTHS_PER_YEAR]);

impl MonthlyConsumption {
    /// 정확히 12개의 값으로 생성한다.
    pub fn new(values: &[f64]) -> Result<Self, ConsumptionError> {
        if values.len() != MONTHS_PER_YEAR {
            return Err(ConsumptionError::WrongLength(values.len()));
        }
        let mut months = [0.0; MONTHS_PER_YEAR];
        for (idx, v) in values.iter().enumerate() {
            if !v.is_finite() || *v < 0.0 {
                return Err(ConsumptionError::InvalidValue(idx));
            }
            months[idx] = *v;
        }
        Ok(Self(months))
    }

    /// 부족한 달은 0으로 채우고 12개를 넘는 값은 버린다.
    pub fn from_padded(values: &[f64]) -> Result<Self, ConsumptionError> {
        let mut padded: Vec<f64> = values.iter().copied().take(MONTHS_PER_YEAR).collect();
        padded.resize(MONTHS_PER_YEAR, 0.0);
        Self::new(&padded)
    }

    /// 모든 달을 같은 값으로 채운다.
    pub fn uniform(value: f64) -> Result<Self, ConsumptionError> {
        Self::new(&[value; MONTHS_PER_YEAR])
    }

    pub fn values(&self) -> &[f64] {
        &self.0
    }

    pub fn to_vec(&self) -> Vec<f64> {
        self.0.to_vec()
    }

    /// 특정 달(0 = 1월) 값을 바꾼다.
    pub fn set(&mut self, month_index: usize, value: f64) -> Result<(), ConsumptionError> {
        if month_index >= MONTHS_PER_YEAR {
            return Err(ConsumptionError::MonthOutOfRange(month_index));
        }
        if !value.is_finite() || value < 0.0 {
            return Err(ConsumptionError::InvalidValue(month_index));
        }
        self.0[month_index] = value;
        Ok(())
    }

    pub fn total(&self) -> f64 {
        self.0.iter().sum()
    }

    pub fn average(&self) -> f64 {
        self.total() / MONTHS_PER_YEAR as f64
    }
}

impl Default for MonthlyConsumption {
    /// 입력 전 기본값: 매월 300 kWh.
    fn default() -> Self {
        Self([300.0; MONTHS_PER_YEAR])
    }
}

impl TryFrom<Vec<f64>> for MonthlyConsumption {
    type Error = ConsumptionError;

    fn try_from(value: Vec<f64>) -> Result<Self, Self::Error> {
        Self::new(&value)
    }
}

impl From<MonthlyConsumption> for Vec<f64> {
    fn from(value: MonthlyConsumption) -> Self {
        value.to_vec()
    }
}
