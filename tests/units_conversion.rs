use solar_sizing_toolbox::{
    conversion::{self, ConversionError},
    quantity::QuantityKind,
    units::{convert_energy, convert_power, EnergyUnit, PowerUnit},
};

fn assert_close(actual: f64, expected: f64, tol: f64) {
    assert!(
        (actual - expected).abs() <= tol,
        "expected {expected}, got {actual} (tol {tol})"
    );
}

#[test]
fn energy_units() {
    assert_close(
        convert_energy(1.0, EnergyUnit::KilowattHour, EnergyUnit::Megajoule),
        3.6,
        1e-12,
    );
    assert_close(
        convert_energy(2500.0, EnergyUnit::KilowattHour, EnergyUnit::MegawattHour),
        2.5,
        1e-12,
    );
    let v = conversion::convert(QuantityKind::Energy, 1500.0, "Wh", "kWh").expect("energy");
    assert_close(v, 1.5, 1e-12);
}

#[test]
fn power_units() {
    assert_close(
        convert_power(3200.0, PowerUnit::Watt, PowerUnit::Kilowatt),
        3.2,
        1e-12,
    );
    let v = conversion::convert(QuantityKind::Power, 2.72, "kWp", "W").expect("power");
    assert_close(v, 2720.0, 1e-9);
}

#[test]
fn irradiance_unit_spellings() {
    for unit in ["kWh/m2/day", "kWh/m²/day", "kwh/m^2/d", "PSH"] {
        let v = conversion::irradiance_to_kwh_m2_day(4.5, unit).expect(unit);
        assert_close(v, 4.5, 1e-12);
    }
    let v = conversion::irradiance_to_kwh_m2_day(18.0, "MJ/m2/day").expect("mj");
    assert_close(v, 5.0, 1e-12);
    let v = conversion::irradiance_to_kwh_m2_day(5200.0, "Wh/m²/day").expect("wh");
    assert_close(v, 5.2, 1e-12);
}

#[test]
fn unknown_unit_is_rejected() {
    assert!(matches!(
        conversion::convert(QuantityKind::Energy, 1.0, "kcal", "kWh"),
        Err(ConversionError::UnknownUnit(u)) if u == "kcal"
    ));
    assert!(conversion::irradiance_to_kwh_m2_day(1.0, "W/m2").is_err());
}
