use serde::{Deserialize, Serialize};

/// 전력량 단위. 내부 기준은 kWh이다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnergyUnit {
    WattHour,
    KilowattHour,
    MegawattHour,
    Megajoule,
}

fn to_kwh(value: f64, unit: EnergyUnit) -> f64 {
    match unit {
        EnergyUnit::WattHour => value / 1000.0,
        EnergyUnit::KilowattHour => value,
        EnergyUnit::MegawattHour => value * 1000.0,
        EnergyUnit::Megajoule => value / 3.6,
    }
}

fn from_kwh(value: f64, unit: EnergyUnit) -> f64 {
    match unit {
        EnergyUnit::WattHour => value * 1000.0,
        EnergyUnit::KilowattHour => value,
        EnergyUnit::MegawattHour => value / 1000.0,
        EnergyUnit::Megajoule => value * 3.6,
    }
}

impl EnergyUnit {
    pub fn symbol(&self) -> &'static str {
        match self {
            EnergyUnit::WattHour => "Wh",
            EnergyUnit::KilowattHour => "kWh",
            EnergyUnit::MegawattHour => "MWh",
            EnergyUnit::Megajoule => "MJ",
        }
    }
}

/// 전력량을 변환한다.
pub fn convert_energy(value: f64, from: EnergyUnit, to: EnergyUnit) -> f64 {
    from_kwh(to_kwh(value, from), to)
}
