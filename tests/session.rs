use solar_sizing_toolbox::{
    app::{AppError, Session},
    config::Config,
    solar::LossFactors,
};

fn assert_close(actual: f64, expected: f64, tol: f64) {
    assert!(
        (actual - expected).abs() <= tol,
        "expected {expected}, got {actual} (tol {tol})"
    );
}

#[test]
fn unknown_irradiance_unit_leaves_session_untouched() {
    let mut session = Session::from_config(&Config::default());
    session.calculate().expect("calculate");
    let before_power = session.module_power_wp;
    let before_irradiance = session.irradiance_kwh_m2_day;

    let losses = LossFactors {
        shading: 0.5,
        ..LossFactors::default()
    };
    let err = session
        .set_system_parameters(700.0, 5.0, "furlongs", losses)
        .unwrap_err();
    assert!(matches!(err, AppError::Conversion(_)));
    assert_eq!(session.module_power_wp, before_power);
    assert_eq!(session.irradiance_kwh_m2_day, before_irradiance);
    assert_eq!(session.losses, LossFactors::default());
    // 입력이 바뀌지 않았으므로 이전 결과는 여전히 유효하다
    assert_eq!(
        session.last_analysis.as_ref().map(|a| a.input.module_power_wp),
        Some(before_power)
    );
}

#[test]
fn system_parameters_convert_unit_and_clear_result() {
    let mut session = Session::from_config(&Config::default());
    session.calculate().expect("calculate");

    session
        .set_system_parameters(600.0, 18.0, "MJ/m2/day", LossFactors::default())
        .expect("set");
    assert_close(session.module_power_wp, 600.0, 0.0);
    assert_close(session.irradiance_kwh_m2_day, 5.0, 1e-12);
    assert!(session.last_analysis.is_none());

    session
        .set_system_parameters(600.0, 4.2, "", LossFactors::default())
        .expect("set");
    assert_close(session.irradiance_kwh_m2_day, 4.2, 0.0);
}
