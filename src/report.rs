//! 분석 결과를 사람이 읽는 텍스트 보고서 또는 TOML 파일로 내보낸다.

use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use crate::analysis::Analysis;
use crate::i18n::{keys, Translator};
use crate::solar::{DiscountedPayback, MONTH_LABELS, SCENARIO_EXTRA_MODULES};
use crate::units::{convert_energy, convert_power, EnergyUnit, PowerUnit};

/// 보고서 출력 오류.
#[derive(Debug)]
pub enum ReportError {
    /// 파일 입출력 오류
    Io(std::io::Error),
    /// TOML 직렬화 오류
    Serialize(toml::ser::Error),
}

impl std::fmt::Display for ReportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReportError::Io(e) => write!(f, "파일 입출력 오류: {e}"),
            ReportError::Serialize(e) => write!(f, "보고서 직렬화 오류: {e}"),
        }
    }
}

impl std::error::Error for ReportError {}

impl From<std::io::Error> for ReportError {
    fn from(value: std::io::Error) -> Self {
        ReportError::Io(value)
    }
}

impl From<toml::ser::Error> for ReportError {
    fn from(value: toml::ser::Error) -> Self {
        ReportError::Serialize(value)
    }
}

/// 보고서 파일 형식.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    Text,
    Toml,
}

impl ReportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ReportFormat::Text => "txt",
            ReportFormat::Toml => "toml",
        }
    }
}

/// 텍스트 보고서의 표시 단위.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayUnits {
    pub energy: EnergyUnit,
    pub power: PowerUnit,
}

impl Default for DisplayUnits {
    fn default() -> Self {
        Self {
            energy: EnergyUnit::KilowattHour,
            power: PowerUnit::Watt,
        }
    }
}

/// 보고서 디렉터리 안의 기본 파일 경로.
pub fn default_report_path(dir: &str, format: ReportFormat) -> PathBuf {
    Path::new(dir).join(format!("solar_report.{}", format.extension()))
}

/// 텍스트 보고서를 만든다.
pub fn render_text(analysis: &Analysis, tr: &Translator, units: DisplayUnits) -> String {
    let energy = |kwh: f64| convert_energy(kwh, EnergyUnit::KilowattHour, units.energy);
    let power = |w: f64| convert_power(w, PowerUnit::Watt, units.power);
    let e_sym = units.energy.symbol();
    let p_sym = units.power.symbol();

    let mut out = String::new();
    let _ = writeln!(out, "=== {} ===", tr.t(keys::REPORT_TITLE));

    let input = &analysis.input;
    let sizing = &analysis.sizing;
    section(&mut out, tr.t(keys::REPORT_SECTION_INPUTS));
    row(&mut out, tr.t(keys::REPORT_MODULE_POWER), format!("{:.0} Wp", input.module_power_wp));
    row(
        &mut out,
        tr.t(keys::REPORT_IRRADIANCE),
        format!("{:.2} kWh/m²/day", input.irradiance_kwh_m2_day),
    );
    row(
        &mut out,
        tr.t(keys::REPORT_PERFORMANCE_FACTOR),
        format!("{:.4}", sizing.performance_factor),
    );

    section(&mut out, tr.t(keys::REPORT_SECTION_SIZING));
    if sizing.no_system_needed() {
        let _ = writeln!(out, "  {}", tr.t(keys::REPORT_NO_SYSTEM));
    }
    row(&mut out, tr.t(keys::REPORT_MODULE_COUNT), sizing.module_count.to_string());
    row(
        &mut out,
        tr.t(keys::REPORT_TOTAL_POWER),
        format!("{:.2} {p_sym}p", power(sizing.total_power_wp)),
    );
    row(
        &mut out,
        tr.t(keys::REPORT_INVERTER_POWER),
        format!("{:.2} {p_sym}", power(sizing.inverter_power_w)),
    );
    row(
        &mut out,
        tr.t(keys::REPORT_AVG_DAILY),
        format!("{:.2} {e_sym}/day", energy(sizing.average_daily_consumption_kwh)),
    );

    if !sizing.no_system_needed() {
        section(&mut out, tr.t(keys::REPORT_SECTION_SCENARIOS));
        table_header(&mut out, tr.t(keys::REPORT_SCENARIO_HEADER), 10, 20);
        let _ = writeln!(out);
        for scenario in sizing.scenarios(SCENARIO_EXTRA_MODULES) {
            let _ = writeln!(
                out,
                "  {:<10}{:>20.0}{:>20.1}",
                scenario.module_count, scenario.total_power_wp, scenario.monthly_generation_kwh
            );
        }
    }

    section(&mut out, tr.t(keys::REPORT_SECTION_MONTHLY));
    table_header(&mut out, tr.t(keys::REPORT_TABLE_HEADER), 6, 14);
    let _ = writeln!(out, "  [{e_sym}]");
    for month in &analysis.balance.months {
        let _ = writeln!(
            out,
            "  {:<6}{:>14.1}{:>14.1}{:>14.1}{:>14.1}",
            month.label,
            energy(month.consumption_kwh),
            energy(month.generation_kwh),
            energy(month.balance_kwh),
            month.coverage_percent
        );
    }

    let balance = &analysis.balance;
    section(&mut out, tr.t(keys::REPORT_SECTION_ANNUAL));
    row(
        &mut out,
        tr.t(keys::REPORT_TOTAL_CONSUMPTION),
        format!("{:.1} {e_sym}", energy(balance.total_consumption_kwh)),
    );
    row(
        &mut out,
        tr.t(keys::REPORT_TOTAL_GENERATION),
        format!("{:.1} {e_sym}", energy(balance.total_generation_kwh)),
    );
    row(
        &mut out,
        tr.t(keys::REPORT_ANNUAL_BALANCE),
        format!("{:.1} {e_sym}", energy(balance.balance_kwh)),
    );
    row(
        &mut out,
        tr.t(keys::REPORT_AVG_COVERAGE),
        format!("{:.1}%", balance.average_coverage_percent),
    );

    if let (Some(econ_in), Some(econ)) = (&input.economics, &analysis.economics) {
        let years = tr.t(keys::REPORT_YEARS);
        let payback = &econ.payback;
        section(&mut out, tr.t(keys::REPORT_SECTION_ECONOMICS));
        row(&mut out, tr.t(keys::REPORT_INVESTMENT), money(econ_in.investment));
        row(&mut out, tr.t(keys::REPORT_TARIFF), format!("{:.4}", econ_in.tariff_per_kwh));
        row(
            &mut out,
            tr.t(keys::REPORT_DISCOUNT_RATE),
            format!("{:.2}%", econ_in.annual_discount_rate * 100.0),
        );
        row(
            &mut out,
            tr.t(keys::REPORT_MONTHLY_SAVINGS),
            money(payback.average_monthly_savings),
        );
        row(&mut out, tr.t(keys::REPORT_ANNUAL_SAVINGS), money(payback.annual_savings));
        let simple = if payback.is_viable() {
            format!("{:.2} {years}", payback.simple_payback_years)
        } else {
            tr.t(keys::REPORT_NOT_VIABLE).to_string()
        };
        row(&mut out, tr.t(keys::REPORT_SIMPLE_PAYBACK), simple);
        let discounted = match payback.discounted_payback {
            DiscountedPayback::NotRequested => tr.t(keys::REPORT_DISCOUNT_NOT_REQUESTED).to_string(),
            DiscountedPayback::NotViable => tr.t(keys::REPORT_NOT_VIABLE).to_string(),
            DiscountedPayback::ExceedsHorizon => tr.t(keys::REPORT_DISCOUNT_EXCEEDS).to_string(),
            DiscountedPayback::Resolved { months } => {
                format!("{:.2} {years} ({months} m)", months as f64 / 12.0)
            }
        };
        row(&mut out, tr.t(keys::REPORT_DISCOUNTED_PAYBACK), discounted);

        let horizon = [("years", econ.projection.years.to_string())];
        row(
            &mut out,
            &tr.tf(keys::REPORT_LONG_TOTAL, &horizon),
            money(econ.projection.total_savings),
        );
        row(
            &mut out,
            &tr.tf(keys::REPORT_LONG_NET, &horizon),
            money(econ.projection.net_profit),
        );

        section(&mut out, tr.t(keys::REPORT_SECTION_MONTHLY_SAVINGS));
        table_header(&mut out, tr.t(keys::REPORT_SAVINGS_HEADER), 6, 14);
        let _ = writeln!(out);
        for (label, saving) in MONTH_LABELS.iter().zip(&payback.monthly_savings) {
            let _ = writeln!(out, "  {label:<6}{saving:>14.2}");
        }
    }
    out
}

/// 분석 결과 전체를 TOML 문자열로 직렬화한다.
pub fn to_toml(analysis: &Analysis) -> Result<String, ReportError> {
    Ok(toml::to_string_pretty(analysis)?)
}

/// 보고서를 파일로 저장한다. 상위 디렉터리가 없으면 만든다.
pub fn save_report(
    analysis: &Analysis,
    path: &Path,
    format: ReportFormat,
    tr: &Translator,
    units: DisplayUnits,
) -> Result<(), ReportError> {
    let content = match format {
        ReportFormat::Text => render_text(analysis, tr, units),
        ReportFormat::Toml => to_toml(analysis)?,
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, content)?;
    tracing::info!(path = %path.display(), ?format, "report saved");
    Ok(())
}

fn section(out: &mut String, title: &str) {
    let _ = writeln!(out, "\n[{title}]");
}

/// `a|b|c` 형태의 헤더를 첫 열은 왼쪽, 나머지는 오른쪽 정렬로 쓴다. 줄바꿈은 호출자가 한다.
fn table_header(out: &mut String, header: &str, first_width: usize, width: usize) {
    for (idx, col) in header.split('|').enumerate() {
        if idx == 0 {
            let _ = write!(out, "  {col:<first_width$}");
        } else {
            let _ = write!(out, "{col:>width$}");
        }
    }
}

fn row(out: &mut String, label: &str, value: String) {
    let _ = writeln!(out, "  {label:<32} {value}");
}

fn money(v: f64) -> String {
    format!("{v:.2}")
}
