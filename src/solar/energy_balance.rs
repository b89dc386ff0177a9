use serde::Serialize;

use super::{MONTHS_PER_YEAR, MONTH_LABELS};

/// 한 달의 소비/발전 수지.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyBalance {
    /// 0 = 1월
    pub month_index: usize,
    pub label: &'static str,
    pub consumption_kwh: f64,
    pub generation_kwh: f64,
    /// 발전량 - 소비량. 음수면 부족분.
    pub balance_kwh: f64,
    /// 발전량 / 소비량 × 100. 소비량이 0이면 0.
    pub coverage_percent: f64,
}

impl MonthlyBalance {
    /// 잉여 발전량 (부족한 달은 0).
    pub fn surplus_kwh(&self) -> f64 {
        self.balance_kwh.max(0.0)
    }

    /// 부족분 (음수, 잉여인 달은 0).
    pub fn deficit_kwh(&self) -> f64 {
        self.balance_kwh.min(0.0)
    }
}

/// 연간 수지 요약.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnnualBalance {
    pub months: Vec<MonthlyBalance>,
    pub total_consumption_kwh: f64,
    pub total_generation_kwh: f64,
    pub balance_kwh: f64,
    /// 월별 충당률의 단순 평균 [%]
    pub average_coverage_percent: f64,
}

impl AnnualBalance {
    /// 잉여가 발생한 달의 수.
    pub fn surplus_months(&self) -> usize {
        self.months.iter().filter(|m| m.balance_kwh > 0.0).count()
    }

    /// 부족분이 발생한 달의 수.
    pub fn deficit_months(&self) -> usize {
        self.months.iter().filter(|m| m.balance_kwh < 0.0).count()
    }
}

/// 월별 소비량과 발전량으로 월/연간 수지를 만든다. 길이가 다르면 짧은 쪽에 맞춘다.
pub fn energy_balance(consumption_kwh: &[f64], generation_kwh: &[f64]) -> AnnualBalance {
    let months: Vec<MonthlyBalance> = consumption_kwh
        .iter()
        .zip(generation_kwh)
        .take(MONTHS_PER_YEAR)
        .enumerate()
        .map(|(idx, (&consumption, &generation))| MonthlyBalance {
            month_index: idx,
            label: MONTH_LABELS[idx],
            consumption_kwh: consumption,
            generation_kwh: generation,
            balance_kwh: generation - consumption,
            coverage_percent: coverage_percent(generation, consumption),
        })
        .collect();

    let total_consumption_kwh: f64 = months.iter().map(|m| m.consumption_kwh).sum();
    let total_generation_kwh: f64 = months.iter().map(|m| m.generation_kwh).sum();
    let average_coverage_percent = if months.is_empty() {
        0.0
    } else {
        months.iter().map(|m| m.coverage_percent).sum::<f64>() / months.len() as f64
    };

    AnnualBalance {
        total_consumption_kwh,
        total_generation_kwh,
        balance_kwh: total_generation_kwh - total_consumption_kwh,
        average_coverage_percent,
        months,
    }
}

fn coverage_percent(generation: f64, consumption: f64) -> f64 {
    if consumption > 0.0 {
        generation / consumption * 100.0
    } else {
        0.0
    }
}
