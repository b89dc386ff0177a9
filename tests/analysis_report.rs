use solar_sizing_toolbox::{
    analysis::{analyze, AnalysisInput, EconomicInput},
    config::{self, Config},
    i18n::Translator,
    report::{self, DisplayUnits, ReportFormat},
    solar::{energy_balance, project_savings, DiscountedPayback, LossFactors},
    units::{EnergyUnit, PowerUnit},
};

fn assert_close(actual: f64, expected: f64, tol: f64) {
    assert!(
        (actual - expected).abs() <= tol,
        "expected {expected}, got {actual} (tol {tol})"
    );
}

fn sample_input(economics: Option<EconomicInput>) -> AnalysisInput {
    AnalysisInput {
        monthly_consumption_kwh: vec![
            350.0, 380.0, 320.0, 300.0, 280.0, 250.0, 240.0, 260.0, 290.0, 320.0, 340.0, 360.0,
        ],
        module_power_wp: 400.0,
        irradiance_kwh_m2_day: 4.5,
        losses: LossFactors::default(),
        economics,
    }
}

fn temp_dir(name: &str) -> std::path::PathBuf {
    std::env::temp_dir().join(format!("solar_sizing_{}_{name}", std::process::id()))
}

#[test]
fn balance_coverage_and_totals() {
    let balance = energy_balance(&[200.0, 0.0, 400.0], &[300.0, 50.0, 300.0]);
    assert_eq!(balance.months.len(), 3);
    assert_close(balance.months[0].coverage_percent, 150.0, 1e-9);
    assert_close(balance.months[1].coverage_percent, 0.0, 0.0);
    assert_close(balance.months[2].balance_kwh, -100.0, 1e-9);
    assert_close(balance.months[2].deficit_kwh(), -100.0, 1e-9);
    assert_close(balance.months[0].surplus_kwh(), 100.0, 1e-9);
    assert_eq!(balance.surplus_months(), 2);
    assert_eq!(balance.deficit_months(), 1);
    assert_close(balance.balance_kwh, 50.0, 1e-9);
    assert_eq!(balance.months[1].label, "Feb");
}

#[test]
fn projection_accumulates_linearly() {
    let p = project_savings(2340.0, 15_000.0, 25);
    assert_close(p.total_savings, 58_500.0, 1e-9);
    assert_close(p.net_profit, 43_500.0, 1e-9);
    assert_eq!(p.cumulative_net.len(), 25);
    assert_close(p.cumulative_net[0], -12_660.0, 1e-9);
    assert_eq!(p.break_even_year(), Some(7));
    assert_eq!(project_savings(0.0, 100.0, 25).break_even_year(), None);
}

#[test]
fn analysis_without_economics() {
    let a = analyze(sample_input(None)).expect("analysis");
    assert_eq!(a.sizing.module_count, 8);
    assert_eq!(a.balance.months.len(), 12);
    assert!(a.economics.is_none());
    assert_close(
        a.balance.total_generation_kwh,
        a.sizing.annual_generation_kwh(),
        1e-9,
    );
}

#[test]
fn analysis_with_economics_runs_payback_and_projection() {
    let a = analyze(sample_input(Some(EconomicInput {
        investment: 15_000.0,
        tariff_per_kwh: 0.65,
        annual_discount_rate: 0.08,
    })))
    .expect("analysis");
    let econ = a.economics.as_ref().expect("economics");
    assert!(econ.payback.is_viable());
    assert!(matches!(
        econ.payback.discounted_payback,
        DiscountedPayback::Resolved { .. }
    ));
    assert_eq!(econ.projection.years, 25);
    assert_close(
        econ.projection.total_savings,
        econ.payback.annual_savings * 25.0,
        1e-6,
    );
}

#[test]
fn invalid_input_produces_no_analysis() {
    let mut input = sample_input(None);
    input.irradiance_kwh_m2_day = 0.0;
    assert!(analyze(input).is_err());
}

#[test]
fn text_report_lists_every_month() {
    let a = analyze(sample_input(Some(EconomicInput {
        investment: 15_000.0,
        tariff_per_kwh: 0.65,
        annual_discount_rate: 0.0,
    })))
    .expect("analysis");
    let tr = Translator::new("en-us");
    let text = report::render_text(&a, &tr, DisplayUnits::default());
    for label in solar_sizing_toolbox::solar::MONTH_LABELS {
        assert!(text.contains(label), "missing month {label}");
    }
    assert!(text.contains("3200.00 Wp"));
    assert!(text.contains("2720.00 W"));

    let kw = report::render_text(
        &a,
        &tr,
        DisplayUnits {
            energy: EnergyUnit::MegawattHour,
            power: PowerUnit::Kilowatt,
        },
    );
    assert!(kw.contains("3.20 kWp"));
}

#[test]
fn reports_are_saved_in_both_formats() {
    let a = analyze(sample_input(None)).expect("analysis");
    let dir = temp_dir("reports");
    let tr = Translator::new("ko");

    let toml_path = report::default_report_path(&dir.to_string_lossy(), ReportFormat::Toml);
    report::save_report(&a, &toml_path, ReportFormat::Toml, &tr, DisplayUnits::default())
        .expect("save toml");
    let content = std::fs::read_to_string(&toml_path).expect("read toml");
    assert!(content.contains("module_count = 8"));

    let txt_path = report::default_report_path(&dir.to_string_lossy(), ReportFormat::Text);
    assert!(txt_path.ends_with("solar_report.txt"));
    report::save_report(&a, &txt_path, ReportFormat::Text, &tr, DisplayUnits::default())
        .expect("save text");
    assert!(txt_path.exists());
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn config_round_trip_and_defaults() {
    let dir = temp_dir("config");
    std::fs::create_dir_all(&dir).expect("mkdir");
    let path = dir.join("config.toml");

    let created = config::load_or_default_at(&path).expect("create default");
    assert_eq!(created, Config::default());
    assert!(path.exists());

    let mut cfg = created;
    cfg.language = "pt-br".into();
    cfg.module_power_wp = 600.0;
    cfg.loss_factors.shading = 0.9;
    cfg.energy_unit = EnergyUnit::Megajoule;
    cfg.save_to(&path).expect("save");
    let loaded = config::load_or_default_at(&path).expect("reload");
    assert_eq!(loaded, cfg);

    std::fs::write(&path, "module_power_wp = 450.0\n").expect("partial");
    let partial = config::load_or_default_at(&path).expect("partial load");
    assert_eq!(partial.module_power_wp, 450.0);
    assert_eq!(partial.loss_factors, LossFactors::default());
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn text_report_lists_scenarios_and_monthly_savings() {
    let tr = Translator::new("en-us");
    let without = analyze(sample_input(None)).expect("analysis");
    let with = analyze(sample_input(Some(EconomicInput {
        investment: 15_000.0,
        tariff_per_kwh: 0.65,
        annual_discount_rate: 0.08,
    })))
    .expect("analysis");
    let plain = report::render_text(&without, &tr, DisplayUnits::default());
    let text = report::render_text(&with, &tr, DisplayUnits::default());

    assert!(text.contains("Module count scenarios"));
    for scenario in with.sizing.scenarios(2) {
        assert!(text.contains(&format!("{:.0}", scenario.total_power_wp)));
    }
    assert!(text.contains("4000"));

    assert!(text.contains("Estimated monthly savings"));
    assert!(!plain.contains("Estimated monthly savings"));
    let savings = &with.economics.as_ref().expect("economics").payback.monthly_savings;
    for (label, saving) in solar_sizing_toolbox::solar::MONTH_LABELS.iter().zip(savings) {
        assert_eq!(
            text.matches(label).count(),
            plain.matches(label).count() + 1,
            "month {label} should appear once more in the savings table"
        );
        assert!(text.contains(&format!("{saving:.2}")));
    }
}

#[test]
fn toml_export_keeps_infinite_payback_and_tagged_state() {
    let a = analyze(sample_input(Some(EconomicInput {
        investment: 15_000.0,
        tariff_per_kwh: 0.0,
        annual_discount_rate: 0.05,
    })))
    .expect("analysis");
    let econ = a.economics.as_ref().expect("economics");
    assert!(econ.payback.simple_payback_years.is_infinite());
    assert_eq!(econ.payback.discounted_payback, DiscountedPayback::NotViable);

    let toml = report::to_toml(&a).expect("toml");
    assert!(toml.contains("simple_payback_years = inf"), "{toml}");
    assert!(toml.contains("state = \"not_viable\""), "{toml}");
    assert!(toml.contains("module_count = 8"));
}
