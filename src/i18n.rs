use std::collections::HashMap;
use std::fs;
use std::path::Path;
use sys_locale::get_locale;

/// 문자열 키를 모아두는 네임스페이스.
pub mod keys {
    pub const ERROR_PREFIX: &str = "general.error_prefix";
    pub const APP_EXIT: &str = "general.app_exit";

    pub const MAIN_MENU_TITLE: &str = "main_menu.title";
    pub const MAIN_MENU_CONSUMPTION: &str = "main_menu.consumption";
    pub const MAIN_MENU_CSV_IMPORT: &str = "main_menu.csv_import";
    pub const MAIN_MENU_CSV_TEMPLATE: &str = "main_menu.csv_template";
    pub const MAIN_MENU_SYSTEM: &str = "main_menu.system";
    pub const MAIN_MENU_ECONOMICS: &str = "main_menu.economics";
    pub const MAIN_MENU_CALCULATE: &str = "main_menu.calculate";
    pub const MAIN_MENU_EXPORT: &str = "main_menu.export";
    pub const MAIN_MENU_UNIT_CONVERSION: &str = "main_menu.unit_conversion";
    pub const MAIN_MENU_SETTINGS: &str = "main_menu.settings";
    pub const MAIN_MENU_EXIT: &str = "main_menu.exit";
    pub const PROMPT_MENU_SELECT: &str = "prompt.menu_select";
    pub const PROMPT_SELECT: &str = "prompt.select";
    pub const INVALID_SELECTION_RETRY: &str = "error.invalid_selection_retry";
    pub const ERROR_INVALID_NUMBER: &str = "error.invalid_number";

    pub const CONSUMPTION_HEADING: &str = "consumption.heading";
    pub const CONSUMPTION_HELP: &str = "consumption.help";
    pub const CONSUMPTION_PROMPT_MONTH: &str = "consumption.prompt_month";
    pub const CONSUMPTION_NEGATIVE: &str = "consumption.negative";
    pub const CONSUMPTION_UPDATED: &str = "consumption.updated";

    pub const CSV_PROMPT_PATH: &str = "csv.prompt_path";
    pub const CSV_IMPORTED: &str = "csv.imported";
    pub const CSV_PADDED: &str = "csv.padded";
    pub const CSV_TEMPLATE_PROMPT_PATH: &str = "csv.template_prompt_path";
    pub const CSV_TEMPLATE_SAVED: &str = "csv.template_saved";

    pub const SYSTEM_HEADING: &str = "system.heading";
    pub const SYSTEM_HELP: &str = "system.help";
    pub const PROMPT_MODULE_POWER: &str = "system.prompt_module_power";
    pub const PROMPT_IRRADIANCE: &str = "system.prompt_irradiance";
    pub const PROMPT_IRRADIANCE_UNIT: &str = "system.prompt_irradiance_unit";
    pub const PROMPT_LOSS_TEMPERATURE: &str = "system.prompt_loss_temperature";
    pub const PROMPT_LOSS_SHADING: &str = "system.prompt_loss_shading";
    pub const PROMPT_LOSS_CONVERSION: &str = "system.prompt_loss_conversion";
    pub const PROMPT_INVERTER_EFFICIENCY: &str = "system.prompt_inverter_efficiency";

    pub const ECONOMICS_HEADING: &str = "economics.heading";
    pub const ECONOMICS_PROMPT_ENABLE: &str = "economics.prompt_enable";
    pub const ECONOMICS_DISABLED: &str = "economics.disabled";
    pub const PROMPT_INVESTMENT: &str = "economics.prompt_investment";
    pub const PROMPT_TARIFF: &str = "economics.prompt_tariff";
    pub const PROMPT_DISCOUNT_RATE: &str = "economics.prompt_discount_rate";
    pub const DISCOUNT_RATE_RANGE: &str = "economics.discount_rate_range";

    pub const CALC_BLOCKED: &str = "calc.blocked";
    pub const EXPORT_NOT_CALCULATED: &str = "export.not_calculated";
    pub const EXPORT_PROMPT_FORMAT: &str = "export.prompt_format";
    pub const EXPORT_PROMPT_PATH: &str = "export.prompt_path";
    pub const EXPORT_SAVED: &str = "export.saved";

    pub const REPORT_TITLE: &str = "report.title";
    pub const REPORT_SECTION_INPUTS: &str = "report.section_inputs";
    pub const REPORT_SECTION_SIZING: &str = "report.section_sizing";
    pub const REPORT_SECTION_MONTHLY: &str = "report.section_monthly";
    pub const REPORT_SECTION_ANNUAL: &str = "report.section_annual";
    pub const REPORT_SECTION_ECONOMICS: &str = "report.section_economics";
    pub const REPORT_MODULE_POWER: &str = "report.module_power";
    pub const REPORT_IRRADIANCE: &str = "report.irradiance";
    pub const REPORT_PERFORMANCE_FACTOR: &str = "report.performance_factor";
    pub const REPORT_MODULE_COUNT: &str = "report.module_count";
    pub const REPORT_TOTAL_POWER: &str = "report.total_power";
    pub const REPORT_INVERTER_POWER: &str = "report.inverter_power";
    pub const REPORT_AVG_DAILY: &str = "report.avg_daily";
    pub const REPORT_NO_SYSTEM: &str = "report.no_system";
    pub const REPORT_TABLE_HEADER: &str = "report.table_header";
    pub const REPORT_TOTAL_CONSUMPTION: &str = "report.total_consumption";
    pub const REPORT_TOTAL_GENERATION: &str = "report.total_generation";
    pub const REPORT_ANNUAL_BALANCE: &str = "report.annual_balance";
    pub const REPORT_AVG_COVERAGE: &str = "report.avg_coverage";
    pub const REPORT_INVESTMENT: &str = "report.investment";
    pub const REPORT_TARIFF: &str = "report.tariff";
    pub const REPORT_DISCOUNT_RATE: &str = "report.discount_rate";
    pub const REPORT_MONTHLY_SAVINGS: &str = "report.monthly_savings";
    pub const REPORT_ANNUAL_SAVINGS: &str = "report.annual_savings";
    pub const REPORT_SIMPLE_PAYBACK: &str = "report.simple_payback";
    pub const REPORT_DISCOUNTED_PAYBACK: &str = "report.discounted_payback";
    pub const REPORT_NOT_VIABLE: &str = "report.not_viable";
    pub const REPORT_DISCOUNT_NOT_REQUESTED: &str = "report.discount_not_requested";
    pub const REPORT_DISCOUNT_EXCEEDS: &str = "report.discount_exceeds";
    pub const REPORT_LONG_TOTAL: &str = "report.long_total";
    pub const REPORT_LONG_NET: &str = "report.long_net";
    pub const REPORT_YEARS: &str = "report.years";
    pub const REPORT_SECTION_SCENARIOS: &str = "report.section_scenarios";
    pub const REPORT_SCENARIO_HEADER: &str = "report.scenario_header";
    pub const REPORT_SECTION_MONTHLY_SAVINGS: &str = "report.section_monthly_savings";
    pub const REPORT_SAVINGS_HEADER: &str = "report.savings_header";

    pub const UNIT_CONVERSION_HEADING: &str = "unit_conversion.heading";
    pub const UNIT_CONVERSION_OPTIONS: &str = "unit_conversion.options";
    pub const UNIT_CONVERSION_PROMPT_VALUE: &str = "unit_conversion.prompt_value";
    pub const UNIT_CONVERSION_PROMPT_FROM_UNIT: &str = "unit_conversion.prompt_from_unit";
    pub const UNIT_CONVERSION_PROMPT_TO_UNIT: &str = "unit_conversion.prompt_to_unit";
    pub const UNIT_CONVERSION_RESULT: &str = "unit_conversion.result";
    pub const UNIT_CONVERSION_UNSUPPORTED: &str = "unit_conversion.unsupported";

    pub const SETTINGS_HEADING: &str = "settings.heading";
    pub const SETTINGS_CURRENT_LANGUAGE: &str = "settings.current_language";
    pub const SETTINGS_LANGUAGE_OPTIONS: &str = "settings.language_options";
    pub const SETTINGS_ENERGY_UNIT_OPTIONS: &str = "settings.energy_unit_options";
    pub const SETTINGS_POWER_UNIT_OPTIONS: &str = "settings.power_unit_options";
    pub const SETTINGS_PROMPT_CHANGE: &str = "settings.prompt_change";
    pub const SETTINGS_INVALID: &str = "settings.invalid";
    pub const SETTINGS_SAVED: &str = "settings.saved";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    Ko,
    En,
    Pt,
}

impl Language {
    fn from_code(code: &str) -> Self {
        let c = code.to_lowercase();
        if c.starts_with("en") {
            Language::En
        } else if c.starts_with("pt") {
            Language::Pt
        } else {
            Language::Ko
        }
    }

    pub fn as_code(&self) -> &'static str {
        match self {
            Language::Ko => "ko",
            Language::En => "en",
            Language::Pt => "pt",
        }
    }
}

/// 런타임 언어 번들을 제공한다.
#[derive(Debug, Clone)]
pub struct Translator {
    lang: Language,
    overrides: Option<HashMap<String, String>>,
}

impl Translator {
    /// 언어 코드(ko/en/pt)에 따라 번역기를 생성한다. 알 수 없는 코드는 ko로 폴백한다.
    pub fn new(lang_code: &str) -> Self {
        Self {
            lang: Language::from_code(lang_code),
            overrides: None,
        }
    }

    /// 언어 코드 + 언어팩 디렉터리(locales/ 등)를 받아서 번역기를 생성한다.
    /// 디렉터리가 없거나 파일이 없으면 내장 문자열만 사용한다.
    pub fn new_with_pack(lang_code: &str, pack_dir: Option<&str>) -> Self {
        let overrides = pack_dir
            .and_then(|dir| load_overrides(dir, lang_code))
            .or_else(|| load_overrides("locales", lang_code))
            .or_else(|| built_in_pack(lang_code));
        Self {
            lang: Language::from_code(lang_code),
            overrides,
        }
    }

    pub fn language(&self) -> Language {
        self.lang
    }

    pub fn language_code(&self) -> &'static str {
        self.lang.as_code()
    }

    /// 번역을 가져온다. 언어팩 → 내장 문자열 순이며, 영어/포르투갈어 번역이 없으면 한국어로 폴백한다.
    pub fn t<'a>(&'a self, key: &str) -> &'a str {
        if let Some(v) = self.overrides.as_ref().and_then(|m| m.get(key)) {
            return v.as_str();
        }
        match self.lang {
            Language::En | Language::Pt => en(key).unwrap_or_else(|| ko(key)),
            Language::Ko => ko(key),
        }
    }

    /// `{name}` 자리표시자를 채운 번역을 돌려준다.
    pub fn tf(&self, key: &str, vars: &[(&str, String)]) -> String {
        fill_template(self.t(key), vars)
    }
}

/// 템플릿의 `{name}`을 값으로 치환한다.
pub fn fill_template(template: &str, vars: &[(&str, String)]) -> String {
    let mut out = template.to_string();
    for (name, value) in vars {
        out = out.replace(&format!("{{{name}}}"), value);
    }
    out
}

/// CLI 플래그/설정/시스템 순으로 언어 코드를 결정한다.
pub fn resolve_language(cli_arg: &str, config_lang: Option<&str>) -> String {
    normalize_lang(cli_arg)
        .or_else(|| config_lang.and_then(normalize_lang))
        .or_else(detect_system_language)
        .unwrap_or_else(|| "en-us".to_string())
}

fn normalize_lang(code: &str) -> Option<String> {
    let c = code.trim().to_lowercase();
    match c.as_str() {
        "ko" | "ko-kr" => Some("ko".into()),
        "en" | "en-us" | "en-uk" => Some("en-us".into()),
        "pt" | "pt-br" => Some("pt-br".into()),
        "auto" | "" => None,
        other if other.starts_with("ko") => Some("ko".into()),
        other if other.starts_with("en") => Some("en-us".into()),
        other if other.starts_with("pt") => Some("pt-br".into()),
        _ => None,
    }
}

fn normalize_locale_string(loc: &str) -> Option<String> {
    let lang = loc
        .split(['.', '_', '-'])
        .next()
        .unwrap_or_default()
        .to_lowercase();
    match lang.as_str() {
        "ko" => Some("ko".into()),
        "en" => Some("en-us".into()),
        "pt" => Some("pt-br".into()),
        _ => None,
    }
}

/// 시스템 로케일에서 언어를 추정한다.
pub fn detect_system_language() -> Option<String> {
    if let Some(lang) = get_locale().as_deref().and_then(normalize_locale_string) {
        return Some(lang);
    }
    ["LANG", "LC_ALL"]
        .iter()
        .filter_map(|var| std::env::var(var).ok())
        .find_map(|v| normalize_locale_string(&v))
}

/// TOML 기반 언어팩을 로드한다. 형식: key = "value" 로 구성된 플랫 맵 또는 [섹션] 테이블.
fn load_overrides(dir: &str, lang: &str) -> Option<HashMap<String, String>> {
    let try_load = |code: &str| -> Option<HashMap<String, String>> {
        let path = Path::new(dir).join(format!("{code}.toml"));
        let content = fs::read_to_string(path).ok()?;
        parse_toml_to_map(&content)
    };

    // 1) full code (e.g., pt-br)
    if let Some(map) = try_load(lang) {
        return Some(map);
    }
    // 2) base code (e.g., pt)
    if let Some((base, _)) = lang.split_once(['-', '_']) {
        if let Some(map) = try_load(base) {
            return Some(map);
        }
    }
    None
}

/// 중첩 테이블을 `a.b` 형태의 평탄한 키로 펼친다.
pub fn parse_toml_to_map(src: &str) -> Option<HashMap<String, String>> {
    let value: toml::Value = toml::from_str(src).ok()?;
    let table = value.as_table()?;
    let mut map = HashMap::new();

    fn walk(prefix: &str, val: &toml::Value, out: &mut HashMap<String, String>) {
        match val {
            toml::Value::String(s) => {
                out.insert(prefix.to_string(), s.to_string());
            }
            toml::Value::Table(t) => {
                for (k, v) in t {
                    let key = if prefix.is_empty() {
                        k.clone()
                    } else {
                        format!("{prefix}.{k}")
                    };
                    walk(&key, v, out);
                }
            }
            _ => {}
        }
    }

    for (k, v) in table {
        walk(k, v, &mut map);
    }

    if map.is_empty() {
        None
    } else {
        Some(map)
    }
}

/// 내장 언어팩(파일이 없어도 동작하도록 빌드 시 포함).
fn built_in_pack(lang: &str) -> Option<HashMap<String, String>> {
    match lang.to_lowercase().as_str() {
        "pt-br" | "pt" => parse_toml_to_map(include_str!("../locales/pt-br.toml")),
        _ => None,
    }
}

fn ko(key: &str) -> &'static str {
    use keys::*;
    match key {
        ERROR_PREFIX => "오류",
        APP_EXIT => "프로그램을 종료합니다.",
        MAIN_MENU_TITLE => "\n=== Solar Sizing Toolbox ===",
        MAIN_MENU_CONSUMPTION => "1) 월별 소비량 입력",
        MAIN_MENU_CSV_IMPORT => "2) CSV에서 소비량 불러오기",
        MAIN_MENU_CSV_TEMPLATE => "3) CSV 템플릿 저장",
        MAIN_MENU_SYSTEM => "4) 시스템 파라미터",
        MAIN_MENU_ECONOMICS => "5) 경제성 분석 (회수기간)",
        MAIN_MENU_CALCULATE => "6) 용량 산정 실행",
        MAIN_MENU_EXPORT => "7) 보고서 내보내기",
        MAIN_MENU_UNIT_CONVERSION => "8) 단위 변환기",
        MAIN_MENU_SETTINGS => "9) 설정",
        MAIN_MENU_EXIT => "0) 종료",
        PROMPT_MENU_SELECT => "메뉴 선택: ",
        PROMPT_SELECT => "선택: ",
        INVALID_SELECTION_RETRY => "잘못된 입력입니다. 다시 선택하세요.",
        ERROR_INVALID_NUMBER => "숫자를 입력하세요.",
        CONSUMPTION_HEADING => "\n-- 월별 소비량 [kWh] --",
        CONSUMPTION_HELP => "도움말: 엔터를 누르면 현재 값을 유지합니다.",
        CONSUMPTION_PROMPT_MONTH => "{month} (현재 {value}): ",
        CONSUMPTION_NEGATIVE => "소비량은 0 이상이어야 합니다.",
        CONSUMPTION_UPDATED => "월별 소비량이 갱신되었습니다. 월평균 {average} kWh",
        CSV_PROMPT_PATH => "CSV 파일 경로: ",
        CSV_IMPORTED => "'{column}' 열에서 유효값 {count}개를 불러왔습니다.",
        CSV_PADDED => "{count}개월은 0으로 채웠습니다.",
        CSV_TEMPLATE_PROMPT_PATH => "저장할 경로 (엔터 시 modelo_consumo_mensal.csv): ",
        CSV_TEMPLATE_SAVED => "템플릿을 저장했습니다:",
        SYSTEM_HEADING => "\n-- 시스템 파라미터 --",
        SYSTEM_HELP => "도움말: 엔터를 누르면 현재 값을 유지합니다. 손실 계수는 0 초과 1 이하.",
        PROMPT_MODULE_POWER => "모듈 출력 [Wp] (현재 {value}): ",
        PROMPT_IRRADIANCE => "일사량 값 (현재 {value} kWh/m²/day): ",
        PROMPT_IRRADIANCE_UNIT => "일사량 단위 (kWh/m2/day, Wh/m2/day, MJ/m2/day, 엔터=kWh/m2/day): ",
        PROMPT_LOSS_TEMPERATURE => "온도 손실 계수 (현재 {value}): ",
        PROMPT_LOSS_SHADING => "음영 손실 계수 (현재 {value}): ",
        PROMPT_LOSS_CONVERSION => "변환 손실 계수 (현재 {value}): ",
        PROMPT_INVERTER_EFFICIENCY => "인버터 효율 (현재 {value}): ",
        ECONOMICS_HEADING => "\n-- 경제성 분석 --",
        ECONOMICS_PROMPT_ENABLE => "회수기간을 계산할까요? (y/n): ",
        ECONOMICS_DISABLED => "회수기간 계산을 끕니다.",
        PROMPT_INVESTMENT => "총 투자비 (현재 {value}): ",
        PROMPT_TARIFF => "전력 요금 [/kWh] (현재 {value}): ",
        PROMPT_DISCOUNT_RATE => "연 할인율 [%] (0~20, 0이면 할인 회수기간 생략, 현재 {value}): ",
        DISCOUNT_RATE_RANGE => "할인율은 0~20% 범위여야 합니다.",
        CALC_BLOCKED => "입력값이 올바르지 않아 계산하지 않았습니다:",
        EXPORT_NOT_CALCULATED => "먼저 용량 산정을 실행하세요.",
        EXPORT_PROMPT_FORMAT => "형식 선택 (1=텍스트, 2=TOML): ",
        EXPORT_PROMPT_PATH => "저장 경로 (엔터 시 {default}): ",
        EXPORT_SAVED => "보고서를 저장했습니다:",
        REPORT_TITLE => "태양광 발전 설비 용량 산정 보고서",
        REPORT_SECTION_INPUTS => "입력 파라미터",
        REPORT_SECTION_SIZING => "용량 산정 결과",
        REPORT_SECTION_MONTHLY => "월별 수지",
        REPORT_SECTION_ANNUAL => "연간 요약",
        REPORT_SECTION_ECONOMICS => "경제성 분석",
        REPORT_MODULE_POWER => "모듈 출력",
        REPORT_IRRADIANCE => "일사량",
        REPORT_PERFORMANCE_FACTOR => "성능 계수",
        REPORT_MODULE_COUNT => "모듈 수",
        REPORT_TOTAL_POWER => "어레이 용량",
        REPORT_INVERTER_POWER => "권장 인버터 용량",
        REPORT_AVG_DAILY => "평균 일 소비량",
        REPORT_NO_SYSTEM => "소비량이 0이므로 설비가 필요하지 않습니다.",
        REPORT_TABLE_HEADER => "월|소비|발전|수지|충당률(%)",
        REPORT_TOTAL_CONSUMPTION => "연간 소비량",
        REPORT_TOTAL_GENERATION => "연간 발전량",
        REPORT_ANNUAL_BALANCE => "연간 수지",
        REPORT_AVG_COVERAGE => "평균 충당률",
        REPORT_INVESTMENT => "총 투자비",
        REPORT_TARIFF => "전력 요금 (/kWh)",
        REPORT_DISCOUNT_RATE => "연 할인율",
        REPORT_MONTHLY_SAVINGS => "월평균 절감액",
        REPORT_ANNUAL_SAVINGS => "연간 절감액",
        REPORT_SIMPLE_PAYBACK => "단순 회수기간",
        REPORT_DISCOUNTED_PAYBACK => "할인 회수기간",
        REPORT_NOT_VIABLE => "회수 불가 (절감액 없음)",
        REPORT_DISCOUNT_NOT_REQUESTED => "계산 안 함 (할인율 0)",
        REPORT_DISCOUNT_EXCEEDS => "50년 내 회수 불가",
        REPORT_LONG_TOTAL => "{years}년 누적 절감액",
        REPORT_LONG_NET => "{years}년 순이익",
        REPORT_YEARS => "년",
        REPORT_SECTION_SCENARIOS => "모듈 수별 시나리오",
        REPORT_SCENARIO_HEADER => "모듈 수|총 용량(Wp)|월평균 발전(kWh)",
        REPORT_SECTION_MONTHLY_SAVINGS => "월별 예상 절감액",
        REPORT_SAVINGS_HEADER => "월|절감액",
        UNIT_CONVERSION_HEADING => "\n-- 단위 변환 --",
        UNIT_CONVERSION_OPTIONS => "1) 전력량  2) 전력  3) 일사량",
        UNIT_CONVERSION_PROMPT_VALUE => "값 입력: ",
        UNIT_CONVERSION_PROMPT_FROM_UNIT => "입력 단위(ex: kWh, kW, MJ/m2/day): ",
        UNIT_CONVERSION_PROMPT_TO_UNIT => "변환 단위(ex: MJ, W, kWh/m2/day): ",
        UNIT_CONVERSION_RESULT => "변환 결과:",
        UNIT_CONVERSION_UNSUPPORTED => "지원하지 않는 번호입니다.",
        SETTINGS_HEADING => "\n-- 설정 --",
        SETTINGS_CURRENT_LANGUAGE => "현재 언어:",
        SETTINGS_LANGUAGE_OPTIONS => "언어: 1) auto  2) 한국어  3) English  4) Português",
        SETTINGS_ENERGY_UNIT_OPTIONS => "보고서 전력량 단위: 1) kWh  2) MWh  3) MJ",
        SETTINGS_POWER_UNIT_OPTIONS => "보고서 용량 단위: 1) W  2) kW",
        SETTINGS_PROMPT_CHANGE => "변경할 번호(취소하려면 엔터): ",
        SETTINGS_INVALID => "잘못된 입력이므로 변경하지 않습니다.",
        SETTINGS_SAVED => "설정이 저장되었습니다.",
        _ => "[missing translation]",
    }
}

fn en(key: &str) -> Option<&'static str> {
    use keys::*;
    Some(match key {
        ERROR_PREFIX => "Error",
        APP_EXIT => "Exiting application.",
        MAIN_MENU_TITLE => "\n=== Solar Sizing Toolbox ===",
        MAIN_MENU_CONSUMPTION => "1) Monthly consumption",
        MAIN_MENU_CSV_IMPORT => "2) Import consumption from CSV",
        MAIN_MENU_CSV_TEMPLATE => "3) Save CSV template",
        MAIN_MENU_SYSTEM => "4) System parameters",
        MAIN_MENU_ECONOMICS => "5) Economic analysis (payback)",
        MAIN_MENU_CALCULATE => "6) Run sizing",
        MAIN_MENU_EXPORT => "7) Export report",
        MAIN_MENU_UNIT_CONVERSION => "8) Unit converter",
        MAIN_MENU_SETTINGS => "9) Settings",
        MAIN_MENU_EXIT => "0) Exit",
        PROMPT_MENU_SELECT => "Select menu: ",
        PROMPT_SELECT => "Select: ",
        INVALID_SELECTION_RETRY => "Invalid input. Please try again.",
        ERROR_INVALID_NUMBER => "Please enter a number.",
        CONSUMPTION_HEADING => "\n-- Monthly consumption [kWh] --",
        CONSUMPTION_HELP => "Help: press enter to keep the current value.",
        CONSUMPTION_PROMPT_MONTH => "{month} (current {value}): ",
        CONSUMPTION_NEGATIVE => "Consumption must be zero or positive.",
        CONSUMPTION_UPDATED => "Monthly consumption updated. Monthly average {average} kWh",
        CSV_PROMPT_PATH => "CSV file path: ",
        CSV_IMPORTED => "Loaded {count} valid values from column '{column}'.",
        CSV_PADDED => "{count} month(s) padded with zero.",
        CSV_TEMPLATE_PROMPT_PATH => "Save to (enter for modelo_consumo_mensal.csv): ",
        CSV_TEMPLATE_SAVED => "Template saved:",
        SYSTEM_HEADING => "\n-- System parameters --",
        SYSTEM_HELP => "Help: press enter to keep the current value. Loss factors must be in (0, 1].",
        PROMPT_MODULE_POWER => "Module power [Wp] (current {value}): ",
        PROMPT_IRRADIANCE => "Irradiance value (current {value} kWh/m²/day): ",
        PROMPT_IRRADIANCE_UNIT => "Irradiance unit (kWh/m2/day, Wh/m2/day, MJ/m2/day, enter=kWh/m2/day): ",
        PROMPT_LOSS_TEMPERATURE => "Temperature loss factor (current {value}): ",
        PROMPT_LOSS_SHADING => "Shading loss factor (current {value}): ",
        PROMPT_LOSS_CONVERSION => "Conversion loss factor (current {value}): ",
        PROMPT_INVERTER_EFFICIENCY => "Inverter efficiency (current {value}): ",
        ECONOMICS_HEADING => "\n-- Economic analysis --",
        ECONOMICS_PROMPT_ENABLE => "Compute payback? (y/n): ",
        ECONOMICS_DISABLED => "Payback calculation disabled.",
        PROMPT_INVESTMENT => "Total investment (current {value}): ",
        PROMPT_TARIFF => "Energy tariff [/kWh] (current {value}): ",
        PROMPT_DISCOUNT_RATE => "Annual discount rate [%] (0-20, 0 skips discounted payback, current {value}): ",
        DISCOUNT_RATE_RANGE => "Discount rate must be within 0-20%.",
        CALC_BLOCKED => "Calculation skipped because of invalid input:",
        EXPORT_NOT_CALCULATED => "Run the sizing first.",
        EXPORT_PROMPT_FORMAT => "Format (1=text, 2=TOML): ",
        EXPORT_PROMPT_PATH => "Save to (enter for {default}): ",
        EXPORT_SAVED => "Report saved:",
        REPORT_TITLE => "Photovoltaic System Sizing Report",
        REPORT_SECTION_INPUTS => "Input parameters",
        REPORT_SECTION_SIZING => "Sizing results",
        REPORT_SECTION_MONTHLY => "Monthly balance",
        REPORT_SECTION_ANNUAL => "Annual summary",
        REPORT_SECTION_ECONOMICS => "Economic analysis",
        REPORT_MODULE_POWER => "Module power",
        REPORT_IRRADIANCE => "Irradiance",
        REPORT_PERFORMANCE_FACTOR => "Performance factor",
        REPORT_MODULE_COUNT => "Modules",
        REPORT_TOTAL_POWER => "Array power",
        REPORT_INVERTER_POWER => "Recommended inverter",
        REPORT_AVG_DAILY => "Average daily consumption",
        REPORT_NO_SYSTEM => "Consumption is zero; no system is needed.",
        REPORT_TABLE_HEADER => "Month|Consumption|Generation|Balance|Coverage(%)",
        REPORT_TOTAL_CONSUMPTION => "Annual consumption",
        REPORT_TOTAL_GENERATION => "Annual generation",
        REPORT_ANNUAL_BALANCE => "Annual balance",
        REPORT_AVG_COVERAGE => "Average coverage",
        REPORT_INVESTMENT => "Total investment",
        REPORT_TARIFF => "Energy tariff (/kWh)",
        REPORT_DISCOUNT_RATE => "Annual discount rate",
        REPORT_MONTHLY_SAVINGS => "Average monthly savings",
        REPORT_ANNUAL_SAVINGS => "Annual savings",
        REPORT_SIMPLE_PAYBACK => "Simple payback",
        REPORT_DISCOUNTED_PAYBACK => "Discounted payback",
        REPORT_NOT_VIABLE => "Not viable (no savings)",
        REPORT_DISCOUNT_NOT_REQUESTED => "Not computed (discount rate 0)",
        REPORT_DISCOUNT_EXCEEDS => "Not recovered within 50 years",
        REPORT_LONG_TOTAL => "Savings over {years} years",
        REPORT_LONG_NET => "Net profit ({years} years)",
        REPORT_YEARS => "years",
        REPORT_SECTION_SCENARIOS => "Module count scenarios",
        REPORT_SCENARIO_HEADER => "Modules|Total (Wp)|Avg gen (kWh/mo)",
        REPORT_SECTION_MONTHLY_SAVINGS => "Estimated monthly savings",
        REPORT_SAVINGS_HEADER => "Month|Savings",
        UNIT_CONVERSION_HEADING => "\n-- Unit Conversion --",
        UNIT_CONVERSION_OPTIONS => "1) Energy  2) Power  3) Irradiance",
        UNIT_CONVERSION_PROMPT_VALUE => "Value: ",
        UNIT_CONVERSION_PROMPT_FROM_UNIT => "From unit (ex: kWh, kW, MJ/m2/day): ",
        UNIT_CONVERSION_PROMPT_TO_UNIT => "To unit (ex: MJ, W, kWh/m2/day): ",
        UNIT_CONVERSION_RESULT => "Result:",
        UNIT_CONVERSION_UNSUPPORTED => "Unsupported selection.",
        SETTINGS_HEADING => "\n-- Settings --",
        SETTINGS_CURRENT_LANGUAGE => "Current language:",
        SETTINGS_LANGUAGE_OPTIONS => "Language: 1) auto  2) 한국어  3) English  4) Português",
        SETTINGS_ENERGY_UNIT_OPTIONS => "Report energy unit: 1) kWh  2) MWh  3) MJ",
        SETTINGS_POWER_UNIT_OPTIONS => "Report power unit: 1) W  2) kW",
        SETTINGS_PROMPT_CHANGE => "Enter number to change (enter to cancel): ",
        SETTINGS_INVALID => "Invalid input; unchanged.",
        SETTINGS_SAVED => "Settings saved.",
        _ => return None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn built_in_portuguese_pack_overrides_menu() {
        let tr = Translator::new_with_pack("pt-br", Some("does-not-exist"));
        assert_eq!(tr.language(), Language::Pt);
        assert_ne!(tr.t(keys::MAIN_MENU_CALCULATE), en(keys::MAIN_MENU_CALCULATE).unwrap());
    }

    #[test]
    fn fill_template_replaces_all_placeholders() {
        let s = fill_template("{a} + {a} = {b}", &[("a", "1".into()), ("b", "2".into())]);
        assert_eq!(s, "1 + 1 = 2");
    }

    #[test]
    fn nested_tables_flatten_to_dotted_keys() {
        let map = parse_toml_to_map("[report]\ntitle = \"X\"\n").unwrap();
        assert_eq!(map.get("report.title").map(String::as_str), Some("X"));
    }

    #[test]
    fn unknown_language_falls_back_to_korean() {
        let tr = Translator::new("xx");
        assert_eq!(tr.t(keys::ERROR_PREFIX), "오류");
    }
}
