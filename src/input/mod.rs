//! 엔진에 넘기기 전 월별 소비량을 수집/정리하는 입력 계층.

pub mod consumption;
pub mod csv_import;

pub use consumption::{ConsumptionError, MonthlyConsumption};
pub use csv_import::{import_consumption, import_consumption_from_reader, write_template, ImportError, ImportOutcome};
