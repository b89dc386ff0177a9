use crate::quantity::QuantityKind;
use crate::units::*;

/// 단위 변환 시 발생 가능한 오류.
#[derive(Debug)]
pub enum ConversionError {
    /// 알 수 없는 단위 문자열
    UnknownUnit(String),
}

impl std::fmt::Display for ConversionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConversionError::UnknownUnit(u) => write!(f, "알 수 없는 단위: {u}"),
        }
    }
}

impl std::error::Error for ConversionError {}

/// 문자열로 전달된 단위명을 enum으로 변환한 뒤 지정된 단위로 환산한다.
///
/// 단위 문자열 예시는 `kWh`, `MJ`, `kW`, `kWh/m2/day`, `MJ/m2/day` 등을 사용할 수 있다.
pub fn convert(
    kind: QuantityKind,
    value: f64,
    from_unit_str: &str,
    to_unit_str: &str,
) -> Result<f64, ConversionError> {
    match kind {
        QuantityKind::Energy => {
            let from = parse_energy_unit(from_unit_str)?;
            let to = parse_energy_unit(to_unit_str)?;
            Ok(convert_energy(value, from, to))
        }
        QuantityKind::Power => {
            let from = parse_power_unit(from_unit_str)?;
            let to = parse_power_unit(to_unit_str)?;
            Ok(convert_power(value, from, to))
        }
        QuantityKind::Irradiance => {
            let from = parse_irradiance_unit(from_unit_str)?;
            let to = parse_irradiance_unit(to_unit_str)?;
            Ok(convert_irradiance(value, from, to))
        }
    }
}

/// 일사량 값을 엔진 기준 단위(kWh/m²/day)로 환산한다.
pub fn irradiance_to_kwh_m2_day(value: f64, unit_str: &str) -> Result<f64, ConversionError> {
    let from = parse_irradiance_unit(unit_str)?;
    Ok(convert_irradiance(
        value,
        from,
        IrradianceUnit::KwhPerSquareMeterDay,
    ))
}

pub fn parse_energy_unit(s: &str) -> Result<EnergyUnit, ConversionError> {
    match s.trim().to_lowercase().as_str() {
        "wh" => Ok(EnergyUnit::WattHour),
        "kwh" => Ok(EnergyUnit::KilowattHour),
        "mwh" => Ok(EnergyUnit::MegawattHour),
        "mj" | "megajoule" => Ok(EnergyUnit::Megajoule),
        _ => Err(ConversionError::UnknownUnit(s.to_string())),
    }
}

pub fn parse_power_unit(s: &str) -> Result<PowerUnit, ConversionError> {
    match s.trim().to_lowercase().as_str() {
        "w" | "wp" | "watt" => Ok(PowerUnit::Watt),
        "kw" | "kwp" | "kilowatt" => Ok(PowerUnit::Kilowatt),
        "mw" | "mwp" | "megawatt" => Ok(PowerUnit::Megawatt),
        _ => Err(ConversionError::UnknownUnit(s.to_string())),
    }
}

pub fn parse_irradiance_unit(s: &str) -> Result<IrradianceUnit, ConversionError> {
    let normalized = s.trim().to_lowercase().replace('²', "2").replace(['^', ' '], "");
    match normalized.as_str() {
        "kwh/m2/day" | "kwh/m2/d" | "kwh/m2" | "psh" | "h" => {
            Ok(IrradianceUnit::KwhPerSquareMeterDay)
        }
        "wh/m2/day" | "wh/m2/d" | "wh/m2" => Ok(IrradianceUnit::WhPerSquareMeterDay),
        "mj/m2/day" | "mj/m2/d" | "mj/m2" => Ok(IrradianceUnit::MjPerSquareMeterDay),
        _ => Err(ConversionError::UnknownUnit(s.to_string())),
    }
}
