use std::path::PathBuf;

use crate::analysis::{self, Analysis, AnalysisInput, EconomicInput};
use crate::config::Config;
use crate::conversion;
use crate::i18n::{self, Translator};
use crate::input::{ConsumptionError, ImportError, MonthlyConsumption};
use crate::report::{DisplayUnits, ReportError};
use crate::solar::LossFactors;
use crate::ui_cli;
use crate::ui_cli::MenuChoice;

/// 애플리케이션 실행 중 발생 가능한 오류를 표현한다.
#[derive(Debug)]
pub enum AppError {
    /// 파일 입출력 오류
    Io(std::io::Error),
    /// 설정 저장/로드 오류
    Config(crate::config::ConfigError),
    /// 단위 변환 오류
    Conversion(conversion::ConversionError),
    /// 용량 산정/회수기간 계산 오류
    Analysis(analysis::AnalysisError),
    /// CSV 가져오기 오류
    Import(ImportError),
    /// 월별 소비량 오류
    Consumption(ConsumptionError),
    /// 보고서 출력 오류
    Report(ReportError),
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::Io(e) => write!(f, "입출력 오류: {e}"),
            AppError::Config(e) => write!(f, "설정 오류: {e}"),
            AppError::Conversion(e) => write!(f, "단위 변환 오류: {e}"),
            AppError::Analysis(e) => write!(f, "{e}"),
            AppError::Import(e) => write!(f, "CSV 가져오기 오류: {e}"),
            AppError::Consumption(e) => write!(f, "{e}"),
            AppError::Report(e) => write!(f, "보고서 오류: {e}"),
        }
    }
}

impl std::error::Error for AppError {}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        AppError::Io(value)
    }
}

impl From<crate::config::ConfigError> for AppError {
    fn from(value: crate::config::ConfigError) -> Self {
        AppError::Config(value)
    }
}

impl From<conversion::ConversionError> for AppError {
    fn from(value: conversion::ConversionError) -> Self {
        AppError::Conversion(value)
    }
}

impl From<analysis::AnalysisError> for AppError {
    fn from(value: analysis::AnalysisError) -> Self {
        AppError::Analysis(value)
    }
}

impl From<ImportError> for AppError {
    fn from(value: ImportError) -> Self {
        AppError::Import(value)
    }
}

impl From<ConsumptionError> for AppError {
    fn from(value: ConsumptionError) -> Self {
        AppError::Consumption(value)
    }
}

impl From<ReportError> for AppError {
    fn from(value: ReportError) -> Self {
        AppError::Report(value)
    }
}

/// 한 세션 동안 유지되는 입력 상태. 계산마다 여기서 불변 입력 구조체를 만든다.
#[derive(Debug, Clone)]
pub struct Session {
    pub consumption: MonthlyConsumption,
    pub module_power_wp: f64,
    pub irradiance_kwh_m2_day: f64,
    pub losses: LossFactors,
    pub payback_enabled: bool,
    pub investment: f64,
    pub tariff_per_kwh: f64,
    pub discount_rate_percent: f64,
    /// 마지막으로 성공한 계산 결과
    pub last_analysis: Option<Analysis>,
}

impl Session {
    /// 설정의 초기값으로 세션을 만든다.
    pub fn from_config(cfg: &Config) -> Self {
        Self {
            consumption: MonthlyConsumption::default(),
            module_power_wp: cfg.module_power_wp,
            irradiance_kwh_m2_day: cfg.irradiance_kwh_m2_day,
            losses: cfg.loss_factors,
            payback_enabled: false,
            investment: 0.0,
            tariff_per_kwh: cfg.tariff_per_kwh,
            discount_rate_percent: cfg.discount_rate_percent,
            last_analysis: None,
        }
    }

    pub fn analysis_input(&self) -> AnalysisInput {
        AnalysisInput {
            monthly_consumption_kwh: self.consumption.to_vec(),
            module_power_wp: self.module_power_wp,
            irradiance_kwh_m2_day: self.irradiance_kwh_m2_day,
            losses: self.losses,
            economics: self.payback_enabled.then(|| EconomicInput {
                investment: self.investment,
                tariff_per_kwh: self.tariff_per_kwh,
                annual_discount_rate: self.discount_rate_percent / 100.0,
            }),
        }
    }

    /// 모듈 출력/일사량/손실 계수를 한 번에 바꾼다. 빈 단위 문자열은 kWh/m²/day로 본다.
    ///
    /// 단위 변환이 실패하면 세션은 그대로 둔다. 성공하면 이전 계산 결과를 지운다.
    pub fn set_system_parameters(
        &mut self,
        module_power_wp: f64,
        irradiance: f64,
        irradiance_unit: &str,
        losses: LossFactors,
    ) -> Result<(), AppError> {
        let irradiance_kwh_m2_day = match irradiance_unit.trim() {
            "" => irradiance,
            unit => conversion::irradiance_to_kwh_m2_day(irradiance, unit)?,
        };
        self.module_power_wp = module_power_wp;
        self.irradiance_kwh_m2_day = irradiance_kwh_m2_day;
        self.losses = losses;
        self.last_analysis = None;
        Ok(())
    }

    /// 현재 입력으로 계산하고 성공하면 결과를 보관한다. 실패 시 이전 결과는 지운다.
    pub fn calculate(&mut self) -> Result<&Analysis, AppError> {
        self.last_analysis = None;
        let result = analysis::analyze(self.analysis_input())?;
        Ok(self.last_analysis.insert(result))
    }
}

/// 런타임에 필요한 설정/번역기/설정 파일 경로 묶음.
pub struct AppContext {
    pub config: Config,
    pub config_path: PathBuf,
    pub tr: Translator,
}

impl AppContext {
    pub fn new(config: Config, config_path: PathBuf, lang_code: &str) -> Self {
        let tr = Translator::new_with_pack(lang_code, config.language_pack_dir.as_deref());
        Self {
            config,
            config_path,
            tr,
        }
    }

    pub fn display_units(&self) -> DisplayUnits {
        DisplayUnits {
            energy: self.config.energy_unit,
            power: self.config.power_unit,
        }
    }

    /// 설정 언어가 바뀐 뒤 번역기를 다시 만든다.
    pub fn reload_translator(&mut self) {
        let lang = i18n::resolve_language(&self.config.language, None);
        self.tr = Translator::new_with_pack(&lang, self.config.language_pack_dir.as_deref());
    }

    pub fn save_config(&self) -> Result<(), AppError> {
        self.config.save_to(&self.config_path)?;
        Ok(())
    }
}

/// CLI 애플리케이션의 메인 루프를 실행한다.
///
/// 개별 메뉴에서 발생한 계산/입력 오류는 화면에 출력하고 루프를 이어간다.
pub fn run(ctx: &mut AppContext, session: &mut Session) -> Result<(), AppError> {
    loop {
        let outcome = match ui_cli::main_menu(&ctx.tr)? {
            MenuChoice::Consumption => ui_cli::handle_consumption(&ctx.tr, session),
            MenuChoice::CsvImport => ui_cli::handle_csv_import(&ctx.tr, session),
            MenuChoice::CsvTemplate => ui_cli::handle_csv_template(&ctx.tr),
            MenuChoice::SystemParameters => ui_cli::handle_system_parameters(&ctx.tr, session),
            MenuChoice::Economics => ui_cli::handle_economics(&ctx.tr, session),
            MenuChoice::Calculate => ui_cli::handle_calculate(ctx, session),
            MenuChoice::Export => ui_cli::handle_export(ctx, session),
            MenuChoice::UnitConversion => ui_cli::handle_unit_conversion(&ctx.tr),
            MenuChoice::Settings => ui_cli::handle_settings(ctx).and_then(|_| ctx.save_config()),
            MenuChoice::Exit => {
                ctx.save_config()?;
                println!("{}", ctx.tr.t(i18n::keys::APP_EXIT));
                break;
            }
        };
        if let Err(err) = outcome {
            if let AppError::Io(_) = err {
                return Err(err);
            }
            tracing::warn!(error = %err, "menu action failed");
            println!("{}: {err}", ctx.tr.t(i18n::keys::ERROR_PREFIX));
        }
    }
    Ok(())
}
