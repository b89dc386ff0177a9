use std::fs;
use std::io::Read;
use std::path::Path;

use super::consumption::{ConsumptionError, MonthlyConsumption};
use crate::solar::MONTHS_PER_YEAR;

/// 월 소비량으로 받아들이는 상한 [kWh] (이 값 미만만 허용).
pub const MAX_MONTHLY_KWH: f64 = 10_000.0;

/// 소비량 열을 식별하는 헤더 부분 문자열 (consumo / consumption 등).
const CONSUMPTION_HEADER_HINT: &str = "consum";

/// 템플릿 파일의 헤더와 예시 값.
pub const TEMPLATE_HEADER: &str = "Consumo_Mensal_kWh";
pub const TEMPLATE_VALUES: [f64; MONTHS_PER_YEAR] = [
    350.0, 380.0, 320.0, 300.0, 280.0, 250.0, 240.0, 260.0, 290.0, 320.0, 340.0, 360.0,
];

/// CSV 가져오기 오류.
#[derive(Debug)]
pub enum ImportError {
    /// 파일 입출력 오류
    Io(std::io::Error),
    /// CSV 구문 오류
    Csv(csv::Error),
    /// 열이 하나도 없음
    NoColumns,
    /// 소비량 열에 유효한 값이 없음
    NoValues { column: String },
    /// 소비량 열이 없고 첫 열의 유효값이 12개 미만
    NotEnoughValues { column: String, found: usize },
    /// 정리된 값으로 월별 소비량을 만들 수 없음
    Consumption(ConsumptionError),
}

impl std::fmt::Display for ImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ImportError::Io(e) => write!(f, "파일 입출력 오류: {e}"),
            ImportError::Csv(e) => write!(f, "CSV 파싱 오류: {e}"),
            ImportError::NoColumns => write!(f, "CSV에 열이 없습니다."),
            ImportError::NoValues { column } => {
                write!(f, "'{column}' 열에 유효한 소비량이 없습니다.")
            }
            ImportError::NotEnoughValues { column, found } => write!(
                f,
                "'{column}' 열의 유효값이 {found}개입니다. 소비량 열 이름이 없으면 12개 이상 필요합니다."
            ),
            ImportError::Consumption(e) => write!(f, "소비량 오류: {e}"),
        }
    }
}

impl std::error::Error for ImportError {}

impl From<std::io::Error> for ImportError {
    fn from(value: std::io::Error) -> Self {
        ImportError::Io(value)
    }
}

impl From<csv::Error> for ImportError {
    fn from(value: csv::Error) -> Self {
        ImportError::Csv(value)
    }
}

impl From<ConsumptionError> for ImportError {
    fn from(value: ConsumptionError) -> Self {
        ImportError::Consumption(value)
    }
}

/// 가져오기 결과.
#[derive(Debug, Clone)]
pub struct ImportOutcome {
    pub consumption: MonthlyConsumption,
    /// 값을 읽어온 열 이름
    pub column: String,
    /// 필터링 후 남은 유효값 수 (12 초과분 포함)
    pub valid_values: usize,
    /// 0으로 채운 달 수
    pub padded_months: usize,
}

/// CSV 파일에서 월별 소비량을 읽는다.
pub fn import_consumption(path: &Path) -> Result<ImportOutcome, ImportError> {
    let file = fs::File::open(path)?;
    let outcome = import_consumption_from_reader(file)?;
    tracing::info!(
        path = %path.display(),
        column = %outcome.column,
        valid_values = outcome.valid_values,
        padded_months = outcome.padded_months,
        "consumption imported"
    );
    Ok(outcome)
}

/// 임의의 reader에서 CSV를 읽는다. 첫 행은 헤더로 취급한다.
///
/// 헤더에 `consum`이 들어간 첫 열을 소비량 열로 쓰고, 없으면 첫 열을 쓴다. 숫자가 아니거나
/// `[0, 10000)` 범위를 벗어난 값은 버린다.
pub fn import_consumption_from_reader<R: Read>(reader: R) -> Result<ImportOutcome, ImportError> {
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    if headers.is_empty() {
        return Err(ImportError::NoColumns);
    }
    let named = headers
        .iter()
        .position(|h| h.to_lowercase().contains(CONSUMPTION_HEADER_HINT));
    let column_idx = named.unwrap_or(0);
    let column = headers.get(column_idx).unwrap_or_default().to_string();

    let mut values = Vec::new();
    for record in rdr.records() {
        let record = record?;
        if let Some(v) = record.get(column_idx).and_then(parse_monthly_value) {
            values.push(v);
        }
    }

    if named.is_some() {
        if values.is_empty() {
            return Err(ImportError::NoValues { column });
        }
    } else if values.len() < MONTHS_PER_YEAR {
        return Err(ImportError::NotEnoughValues {
            column,
            found: values.len(),
        });
    }

    let padded_months = MONTHS_PER_YEAR.saturating_sub(values.len());
    if padded_months > 0 {
        tracing::warn!(padded_months, "consumption column shorter than 12 months; padding with zeros");
    }
    let consumption = MonthlyConsumption::from_padded(&values)?;
    Ok(ImportOutcome {
        consumption,
        column,
        valid_values: values.len(),
        padded_months,
    })
}

fn parse_monthly_value(raw: &str) -> Option<f64> {
    let v = raw.trim().parse::<f64>().ok()?;
    (v.is_finite() && (0.0..MAX_MONTHLY_KWH).contains(&v)).then_some(v)
}

/// 소비량 입력용 단일 열 템플릿 CSV를 쓴다.
pub fn write_template(path: &Path) -> Result<(), ImportError> {
    let mut wtr = csv::Writer::from_path(path)?;
    wtr.write_record([TEMPLATE_HEADER])?;
    for v in TEMPLATE_VALUES {
        wtr.write_record([format!("{v}")])?;
    }
    wtr.flush()?;
    Ok(())
}
