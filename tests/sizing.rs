use solar_sizing_toolbox::solar::{
    size_system, LossFactors, SizingError, SizingInput, SCENARIO_EXTRA_MODULES,
};

const SAMPLE_CONSUMPTION: [f64; 12] = [
    350.0, 380.0, 320.0, 300.0, 280.0, 250.0, 240.0, 260.0, 290.0, 320.0, 340.0, 360.0,
];

fn assert_close(actual: f64, expected: f64, tol: f64) {
    assert!(
        (actual - expected).abs() <= tol,
        "expected {expected}, got {actual} (tol {tol})"
    );
}

fn input(consumption: &[f64], module_power_wp: f64, irradiance: f64) -> SizingInput {
    SizingInput {
        monthly_consumption_kwh: consumption.to_vec(),
        module_power_wp,
        irradiance_kwh_m2_day: irradiance,
        losses: LossFactors::default(),
    }
}

#[test]
fn sample_household_needs_eight_modules() {
    let res = size_system(input(&SAMPLE_CONSUMPTION, 400.0, 4.5)).expect("sizing");
    assert_close(res.performance_factor, 0.713184, 1e-9);
    assert_close(res.per_module_daily_kwh, 1.2837312, 1e-9);
    assert_close(res.per_module_monthly_kwh, 38.511936, 1e-9);
    assert_close(res.average_monthly_consumption_kwh, 307.5, 1e-9);
    assert_close(res.average_daily_consumption_kwh, 10.25, 1e-9);
    assert_eq!(res.module_count, 8);
    assert_close(res.total_power_wp, 3200.0, 1e-9);
    assert_close(res.inverter_power_w, 2720.0, 1e-9);
}

#[test]
fn generation_is_twelve_equal_months() {
    let res = size_system(input(&SAMPLE_CONSUMPTION, 550.0, 5.2)).expect("sizing");
    assert_eq!(res.monthly_generation_kwh.len(), 12);
    let first = res.monthly_generation_kwh[0];
    assert!(res.monthly_generation_kwh.iter().all(|g| *g == first));
    assert_close(
        res.annual_generation_kwh(),
        first * 12.0,
        1e-9,
    );
}

#[test]
fn module_count_is_minimal() {
    for (wp, irr) in [(300.0, 3.0), (400.0, 4.5), (550.0, 6.1), (670.0, 2.2)] {
        let res = size_system(input(&SAMPLE_CONSUMPTION, wp, irr)).expect("sizing");
        let m = res.module_count as f64;
        let target = res.average_monthly_consumption_kwh;
        assert!(m * res.per_module_monthly_kwh >= target);
        assert!((m - 1.0) * res.per_module_monthly_kwh < target);
    }
}

#[test]
fn performance_factor_is_product_of_losses() {
    let losses = LossFactors {
        temperature: 0.9,
        shading: 1.0,
        conversion: 0.8,
        inverter_efficiency: 0.5,
    };
    assert_close(losses.performance_factor(), 0.36, 1e-12);
    let res = size_system(SizingInput {
        losses,
        ..input(&SAMPLE_CONSUMPTION, 400.0, 4.5)
    })
    .expect("sizing");
    assert_close(res.performance_factor, 0.36, 1e-12);
}

#[test]
fn zero_consumption_needs_no_system() {
    let res = size_system(input(&[0.0; 12], 400.0, 4.5)).expect("sizing");
    assert_eq!(res.module_count, 0);
    assert!(res.no_system_needed());
    assert_close(res.total_power_wp, 0.0, 0.0);
    assert!(res.monthly_generation_kwh.iter().all(|g| *g == 0.0));
}

#[test]
fn zero_irradiance_is_degenerate() {
    let err = size_system(input(&SAMPLE_CONSUMPTION, 400.0, 0.0)).unwrap_err();
    assert!(matches!(err, SizingError::DegenerateSizing { .. }));
}

#[test]
fn rejects_invalid_parameters() {
    let cases = [
        input(&SAMPLE_CONSUMPTION[..11], 400.0, 4.5),
        input(&[-1.0; 12], 400.0, 4.5),
        input(&[f64::NAN; 12], 400.0, 4.5),
        input(&SAMPLE_CONSUMPTION, 0.0, 4.5),
        input(&SAMPLE_CONSUMPTION, 400.0, -1.0),
        SizingInput {
            losses: LossFactors {
                shading: 0.0,
                ..LossFactors::default()
            },
            ..input(&SAMPLE_CONSUMPTION, 400.0, 4.5)
        },
        SizingInput {
            losses: LossFactors {
                inverter_efficiency: 1.2,
                ..LossFactors::default()
            },
            ..input(&SAMPLE_CONSUMPTION, 400.0, 4.5)
        },
    ];
    for case in cases {
        let err = size_system(case).unwrap_err();
        assert!(matches!(err, SizingError::InvalidParameter(_)), "{err:?}");
    }
}

#[test]
fn scenarios_step_up_from_sized_count() {
    let res = size_system(input(&SAMPLE_CONSUMPTION, 400.0, 4.5)).expect("sizing");
    let scenarios = res.scenarios(SCENARIO_EXTRA_MODULES);
    assert_eq!(scenarios.len(), 3);
    for (k, scenario) in scenarios.iter().enumerate() {
        let count = res.module_count + k as u32;
        assert_eq!(scenario.module_count, count);
        assert_close(scenario.total_power_wp, count as f64 * 400.0, 1e-9);
        assert_close(
            scenario.monthly_generation_kwh,
            count as f64 * res.per_module_monthly_kwh,
            1e-9,
        );
    }
    // 첫 줄은 산정 결과 자체와 같다
    assert_close(scenarios[0].total_power_wp, res.total_power_wp, 1e-9);
    assert_close(scenarios[2].monthly_generation_kwh, 10.0 * 38.511936, 1e-9);
}
