use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::analysis::Analysis;
use crate::app::{AppContext, AppError, Session};
use crate::conversion;
use crate::i18n::{keys, Translator};
use crate::input::{self, ImportOutcome};
use crate::quantity::QuantityKind;
use crate::report::{self, ReportFormat};
use crate::solar::{DiscountedPayback, MONTH_LABELS};
use crate::units::{EnergyUnit, PowerUnit};

/// 메인 메뉴 선택지를 표현한다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Consumption,
    CsvImport,
    CsvTemplate,
    SystemParameters,
    Economics,
    Calculate,
    Export,
    UnitConversion,
    Settings,
    Exit,
}

/// 메인 메뉴를 표시하고 선택값을 반환한다.
pub fn main_menu(tr: &Translator) -> Result<MenuChoice, AppError> {
    println!("{}", tr.t(keys::MAIN_MENU_TITLE));
    for key in [
        keys::MAIN_MENU_CONSUMPTION,
        keys::MAIN_MENU_CSV_IMPORT,
        keys::MAIN_MENU_CSV_TEMPLATE,
        keys::MAIN_MENU_SYSTEM,
        keys::MAIN_MENU_ECONOMICS,
        keys::MAIN_MENU_CALCULATE,
        keys::MAIN_MENU_EXPORT,
        keys::MAIN_MENU_UNIT_CONVERSION,
        keys::MAIN_MENU_SETTINGS,
        keys::MAIN_MENU_EXIT,
    ] {
        println!("{}", tr.t(key));
    }
    loop {
        let sel = read_line(tr.t(keys::PROMPT_MENU_SELECT))?;
        match sel.trim() {
            "1" => return Ok(MenuChoice::Consumption),
            "2" => return Ok(MenuChoice::CsvImport),
            "3" => return Ok(MenuChoice::CsvTemplate),
            "4" => return Ok(MenuChoice::SystemParameters),
            "5" => return Ok(MenuChoice::Economics),
            "6" => return Ok(MenuChoice::Calculate),
            "7" => return Ok(MenuChoice::Export),
            "8" => return Ok(MenuChoice::UnitConversion),
            "9" => return Ok(MenuChoice::Settings),
            "0" => return Ok(MenuChoice::Exit),
            _ => println!("{}", tr.t(keys::INVALID_SELECTION_RETRY)),
        }
    }
}

/// 월별 소비량을 한 달씩 입력받는다. 엔터는 현재 값 유지.
pub fn handle_consumption(tr: &Translator, session: &mut Session) -> Result<(), AppError> {
    println!("{}", tr.t(keys::CONSUMPTION_HEADING));
    println!("{}", tr.t(keys::CONSUMPTION_HELP));
    for (idx, label) in MONTH_LABELS.iter().enumerate() {
        let current = session.consumption.values()[idx];
        let prompt = tr.tf(
            keys::CONSUMPTION_PROMPT_MONTH,
            &[("month", label.to_string()), ("value", format!("{current}"))],
        );
        let value = loop {
            let v = read_f64_or(tr, &prompt, current)?;
            if v >= 0.0 {
                break v;
            }
            println!("{}", tr.t(keys::CONSUMPTION_NEGATIVE));
        };
        session.consumption.set(idx, value)?;
    }
    session.last_analysis = None;
    println!(
        "{}",
        tr.tf(
            keys::CONSUMPTION_UPDATED,
            &[("average", format!("{:.1}", session.consumption.average()))]
        )
    );
    Ok(())
}

/// CSV 파일에서 소비량을 불러온다.
pub fn handle_csv_import(tr: &Translator, session: &mut Session) -> Result<(), AppError> {
    let path = read_line(tr.t(keys::CSV_PROMPT_PATH))?;
    let outcome = input::import_consumption(Path::new(path.trim()))?;
    apply_import(tr, session, outcome);
    Ok(())
}

/// 가져온 소비량을 세션에 반영하고 요약을 출력한다.
pub fn apply_import(tr: &Translator, session: &mut Session, outcome: ImportOutcome) {
    println!(
        "{}",
        tr.tf(
            keys::CSV_IMPORTED,
            &[
                ("column", outcome.column.clone()),
                ("count", outcome.valid_values.to_string())
            ]
        )
    );
    if outcome.padded_months > 0 {
        println!(
            "{}",
            tr.tf(keys::CSV_PADDED, &[("count", outcome.padded_months.to_string())])
        );
    }
    session.consumption = outcome.consumption;
    session.last_analysis = None;
}

/// 소비량 CSV 템플릿을 저장한다.
pub fn handle_csv_template(tr: &Translator) -> Result<(), AppError> {
    let path = read_line(tr.t(keys::CSV_TEMPLATE_PROMPT_PATH))?;
    let path = match path.trim() {
        "" => PathBuf::from("modelo_consumo_mensal.csv"),
        p => PathBuf::from(p),
    };
    input::write_template(&path)?;
    println!("{} {}", tr.t(keys::CSV_TEMPLATE_SAVED), path.display());
    Ok(())
}

/// 모듈 출력, 일사량, 손실 계수를 입력받는다.
pub fn handle_system_parameters(tr: &Translator, session: &mut Session) -> Result<(), AppError> {
    println!("{}", tr.t(keys::SYSTEM_HEADING));
    println!("{}", tr.t(keys::SYSTEM_HELP));
    let module_power_wp = read_f64_or(
        tr,
        &with_value(tr, keys::PROMPT_MODULE_POWER, session.module_power_wp),
        session.module_power_wp,
    )?;
    let irradiance = read_f64_or(
        tr,
        &with_value(tr, keys::PROMPT_IRRADIANCE, session.irradiance_kwh_m2_day),
        session.irradiance_kwh_m2_day,
    )?;
    let unit = read_line(tr.t(keys::PROMPT_IRRADIANCE_UNIT))?;

    let mut losses = session.losses;
    losses.temperature = read_f64_or(
        tr,
        &with_value(tr, keys::PROMPT_LOSS_TEMPERATURE, losses.temperature),
        losses.temperature,
    )?;
    losses.shading = read_f64_or(
        tr,
        &with_value(tr, keys::PROMPT_LOSS_SHADING, losses.shading),
        losses.shading,
    )?;
    losses.conversion = read_f64_or(
        tr,
        &with_value(tr, keys::PROMPT_LOSS_CONVERSION, losses.conversion),
        losses.conversion,
    )?;
    losses.inverter_efficiency = read_f64_or(
        tr,
        &with_value(tr, keys::PROMPT_INVERTER_EFFICIENCY, losses.inverter_efficiency),
        losses.inverter_efficiency,
    )?;
    session.set_system_parameters(module_power_wp, irradiance, &unit, losses)
}

/// 회수기간 계산 여부와 투자비/요금/할인율을 입력받는다.
pub fn handle_economics(tr: &Translator, session: &mut Session) -> Result<(), AppError> {
    println!("{}", tr.t(keys::ECONOMICS_HEADING));
    let enable = read_line(tr.t(keys::ECONOMICS_PROMPT_ENABLE))?;
    session.payback_enabled = matches!(
        enable.trim().to_lowercase().as_str(),
        "y" | "yes" | "s" | "sim" | "예" | "ㅇ"
    );
    session.last_analysis = None;
    if !session.payback_enabled {
        println!("{}", tr.t(keys::ECONOMICS_DISABLED));
        return Ok(());
    }
    session.investment = loop {
        let v = read_f64_or(
            tr,
            &with_value(tr, keys::PROMPT_INVESTMENT, session.investment),
            session.investment,
        )?;
        if v >= 0.0 {
            break v;
        }
        println!("{}", tr.t(keys::INVALID_SELECTION_RETRY));
    };
    session.tariff_per_kwh = loop {
        let v = read_f64_or(
            tr,
            &with_value(tr, keys::PROMPT_TARIFF, session.tariff_per_kwh),
            session.tariff_per_kwh,
        )?;
        if v >= 0.0 {
            break v;
        }
        println!("{}", tr.t(keys::INVALID_SELECTION_RETRY));
    };
    session.discount_rate_percent = loop {
        let v = read_f64_or(
            tr,
            &with_value(tr, keys::PROMPT_DISCOUNT_RATE, session.discount_rate_percent),
            session.discount_rate_percent,
        )?;
        if (0.0..=20.0).contains(&v) {
            break v;
        }
        println!("{}", tr.t(keys::DISCOUNT_RATE_RANGE));
    };
    Ok(())
}

/// 현재 입력으로 계산하고 결과 보고서를 화면에 출력한다.
pub fn handle_calculate(ctx: &AppContext, session: &mut Session) -> Result<(), AppError> {
    match session.calculate() {
        Ok(analysis) => {
            println!("{}", report::render_text(analysis, &ctx.tr, ctx.display_units()));
            Ok(())
        }
        Err(err) => {
            println!("{}", ctx.tr.t(keys::CALC_BLOCKED));
            Err(err)
        }
    }
}

/// 마지막 계산 결과를 파일로 저장한다.
pub fn handle_export(ctx: &AppContext, session: &Session) -> Result<(), AppError> {
    let Some(analysis) = session.last_analysis.as_ref() else {
        println!("{}", ctx.tr.t(keys::EXPORT_NOT_CALCULATED));
        return Ok(());
    };
    let sel = read_line(ctx.tr.t(keys::EXPORT_PROMPT_FORMAT))?;
    let format = match sel.trim() {
        "2" => ReportFormat::Toml,
        _ => ReportFormat::Text,
    };
    let default = report::default_report_path(&ctx.config.report_dir, format);
    let path = read_line(&ctx.tr.tf(
        keys::EXPORT_PROMPT_PATH,
        &[("default", default.display().to_string())],
    ))?;
    let path = match path.trim() {
        "" => default,
        p => PathBuf::from(p),
    };
    report::save_report(analysis, &path, format, &ctx.tr, ctx.display_units())?;
    println!("{} {}", ctx.tr.t(keys::EXPORT_SAVED), path.display());
    Ok(())
}

/// 단위 변환 메뉴를 처리한다.
pub fn handle_unit_conversion(tr: &Translator) -> Result<(), AppError> {
    println!("{}", tr.t(keys::UNIT_CONVERSION_HEADING));
    println!("{}", tr.t(keys::UNIT_CONVERSION_OPTIONS));
    let kind = loop {
        let sel = read_line(tr.t(keys::PROMPT_SELECT))?;
        if let Some(kind) = sel.trim().parse::<u32>().ok().and_then(map_quantity) {
            break kind;
        }
        println!("{}", tr.t(keys::UNIT_CONVERSION_UNSUPPORTED));
    };
    let value = read_f64(tr, tr.t(keys::UNIT_CONVERSION_PROMPT_VALUE))?;
    let from_unit = read_line(tr.t(keys::UNIT_CONVERSION_PROMPT_FROM_UNIT))?;
    let to_unit = read_line(tr.t(keys::UNIT_CONVERSION_PROMPT_TO_UNIT))?;
    let result = conversion::convert(kind, value, from_unit.trim(), to_unit.trim())?;
    println!(
        "{} {result} {}",
        tr.t(keys::UNIT_CONVERSION_RESULT),
        to_unit.trim()
    );
    Ok(())
}

fn map_quantity(n: u32) -> Option<QuantityKind> {
    match n {
        1 => Some(QuantityKind::Energy),
        2 => Some(QuantityKind::Power),
        3 => Some(QuantityKind::Irradiance),
        _ => None,
    }
}

/// 설정 메뉴를 처리한다. 언어와 보고서 표시 단위를 바꾼다.
pub fn handle_settings(ctx: &mut AppContext) -> Result<(), AppError> {
    let tr = &ctx.tr;
    println!("{}", tr.t(keys::SETTINGS_HEADING));
    println!(
        "{} {} ({})",
        tr.t(keys::SETTINGS_CURRENT_LANGUAGE),
        ctx.config.language,
        tr.language_code()
    );

    println!("{}", tr.t(keys::SETTINGS_LANGUAGE_OPTIONS));
    let sel = read_line(tr.t(keys::SETTINGS_PROMPT_CHANGE))?;
    let language = match sel.trim() {
        "" => None,
        "1" => Some("auto"),
        "2" => Some("ko"),
        "3" => Some("en-us"),
        "4" => Some("pt-br"),
        _ => {
            println!("{}", tr.t(keys::SETTINGS_INVALID));
            None
        }
    };

    println!("{}", tr.t(keys::SETTINGS_ENERGY_UNIT_OPTIONS));
    let sel = read_line(tr.t(keys::SETTINGS_PROMPT_CHANGE))?;
    let energy_unit = match sel.trim() {
        "" => None,
        "1" => Some(EnergyUnit::KilowattHour),
        "2" => Some(EnergyUnit::MegawattHour),
        "3" => Some(EnergyUnit::Megajoule),
        _ => {
            println!("{}", tr.t(keys::SETTINGS_INVALID));
            None
        }
    };

    println!("{}", tr.t(keys::SETTINGS_POWER_UNIT_OPTIONS));
    let sel = read_line(tr.t(keys::SETTINGS_PROMPT_CHANGE))?;
    let power_unit = match sel.trim() {
        "" => None,
        "1" => Some(PowerUnit::Watt),
        "2" => Some(PowerUnit::Kilowatt),
        _ => {
            println!("{}", tr.t(keys::SETTINGS_INVALID));
            None
        }
    };

    if let Some(unit) = energy_unit {
        ctx.config.energy_unit = unit;
    }
    if let Some(unit) = power_unit {
        ctx.config.power_unit = unit;
    }
    if let Some(lang) = language {
        ctx.config.language = lang.to_string();
        ctx.reload_translator();
    }
    println!("{}", ctx.tr.t(keys::SETTINGS_SAVED));
    Ok(())
}

/// 계산 결과 요약 한 줄. 비대화형 실행 로그에도 쓴다.
pub fn summary_line(analysis: &Analysis) -> String {
    let mut line = format!(
        "modules={} array={:.0}Wp inverter={:.0}W",
        analysis.sizing.module_count, analysis.sizing.total_power_wp, analysis.sizing.inverter_power_w
    );
    if let Some(econ) = &analysis.economics {
        line.push_str(&format!(
            " annual_savings={:.2} simple_payback={:.2}y",
            econ.payback.annual_savings, econ.payback.simple_payback_years
        ));
        if let DiscountedPayback::Resolved { months } = econ.payback.discounted_payback {
            line.push_str(&format!(" discounted_payback={months}m"));
        }
    }
    line
}

fn with_value(tr: &Translator, key: &str, value: f64) -> String {
    tr.tf(key, &[("value", format!("{value}"))])
}

fn read_line(prompt: &str) -> Result<String, AppError> {
    print!("{prompt}");
    io::stdout().flush().map_err(AppError::Io)?;
    let mut buf = String::new();
    let n = io::stdin().read_line(&mut buf).map_err(AppError::Io)?;
    if n == 0 {
        return Err(AppError::Io(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            "stdin closed",
        )));
    }
    Ok(buf)
}

fn read_f64(tr: &Translator, prompt: &str) -> Result<f64, AppError> {
    loop {
        let s = read_line(prompt)?;
        match s.trim().parse::<f64>() {
            Ok(v) if v.is_finite() => return Ok(v),
            _ => println!("{}", tr.t(keys::ERROR_INVALID_NUMBER)),
        }
    }
}

/// 빈 입력이면 `current`를 돌려준다.
fn read_f64_or(tr: &Translator, prompt: &str, current: f64) -> Result<f64, AppError> {
    loop {
        let s = read_line(prompt)?;
        let s = s.trim();
        if s.is_empty() {
            return Ok(current);
        }
        match s.parse::<f64>() {
            Ok(v) if v.is_finite() => return Ok(v),
            _ => println!("{}", tr.t(keys::ERROR_INVALID_NUMBER)),
        }
    }
}
