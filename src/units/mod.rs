//! 단위 정의 및 변환 모듈 모음.

pub mod energy;
pub mod irradiance;
pub mod power;

pub use energy::{convert_energy, EnergyUnit};
pub use irradiance::{convert_irradiance, IrradianceUnit};
pub use power::{convert_power, PowerUnit};
