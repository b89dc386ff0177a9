use serde::{Deserialize, Serialize};

/// 전력(설비 용량) 단위. 내부 기준은 W(Wp)이다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerUnit {
    Watt,
    Kilowatt,
    Megawatt,
}

impl PowerUnit {
    fn factor(&self) -> f64 {
        match self {
            PowerUnit::Watt => 1.0,
            PowerUnit::Kilowatt => 1_000.0,
            PowerUnit::Megawatt => 1_000_000.0,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            PowerUnit::Watt => "W",
            PowerUnit::Kilowatt => "kW",
            PowerUnit::Megawatt => "MW",
        }
    }
}

/// 전력을 변환한다.
pub fn convert_power(value: f64, from: PowerUnit, to: PowerUnit) -> f64 {
    value * from.factor() / to.factor()
}
