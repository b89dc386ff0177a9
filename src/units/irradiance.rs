use serde::{Deserialize, Serialize};

/// 일 일사량 단위. 내부 기준은 kWh/m²/day (= 피크 일조시간)이다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IrradianceUnit {
    KwhPerSquareMeterDay,
    WhPerSquareMeterDay,
    MjPerSquareMeterDay,
}

fn to_kwh_m2_day(value: f64, unit: IrradianceUnit) -> f64 {
    match unit {
        IrradianceUnit::KwhPerSquareMeterDay => value,
        IrradianceUnit::WhPerSquareMeterDay => value / 1000.0,
        IrradianceUnit::MjPerSquareMeterDay => value / 3.6,
    }
}

fn from_kwh_m2_day(value: f64, unit: IrradianceUnit) -> f64 {
    match unit {
        IrradianceUnit::KwhPerSquareMeterDay => value,
        IrradianceUnit::WhPerSquareMeterDay => value * 1000.0,
        IrradianceUnit::MjPerSquareMeterDay => value * 3.6,
    }
}

/// 일사량을 변환한다.
pub fn convert_irradiance(value: f64, from: IrradianceUnit, to: IrradianceUnit) -> f64 {
    from_kwh_m2_day(to_kwh_m2_day(value, from), to)
}
