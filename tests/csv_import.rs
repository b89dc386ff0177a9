use std::path::PathBuf;

use solar_sizing_toolbox::input::{
    import_consumption, import_consumption_from_reader, write_template, ConsumptionError,
    ImportError, MonthlyConsumption,
};

fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("solar_sizing_{}_{name}", std::process::id()))
}

#[test]
fn picks_consumption_column_by_header() {
    let csv = "Mes,Consumo_kWh,Obs\n\
               jan,350,a\nfev,380,b\nmar,320,\nabr,300,\nmai,280,\njun,250,\n\
               jul,240,\nago,260,\nset,290,\nout,320,\nnov,340,\ndez,360,\n";
    let out = import_consumption_from_reader(csv.as_bytes()).expect("import");
    assert_eq!(out.column, "Consumo_kWh");
    assert_eq!(out.valid_values, 12);
    assert_eq!(out.padded_months, 0);
    assert_eq!(out.consumption.values()[0], 350.0);
    assert_eq!(out.consumption.values()[11], 360.0);
}

#[test]
fn header_match_is_case_insensitive() {
    let csv = "month,Monthly CONSUMPTION\n1,100\n2,200\n";
    let out = import_consumption_from_reader(csv.as_bytes()).expect("import");
    assert_eq!(out.column, "Monthly CONSUMPTION");
    assert_eq!(out.valid_values, 2);
}

#[test]
fn drops_non_numeric_and_out_of_range_values() {
    let csv = "consumo\n100\nabc\n-5\n10000\n9999.5\n\n200\n";
    let out = import_consumption_from_reader(csv.as_bytes()).expect("import");
    assert_eq!(out.valid_values, 3);
    assert_eq!(&out.consumption.values()[..3], &[100.0, 9999.5, 200.0]);
}

#[test]
fn short_named_column_is_zero_padded() {
    let csv = "consumption\n100\n200\n300\n";
    let out = import_consumption_from_reader(csv.as_bytes()).expect("import");
    assert_eq!(out.padded_months, 9);
    assert_eq!(out.consumption.total(), 600.0);
    assert!(out.consumption.values()[3..].iter().all(|v| *v == 0.0));
}

#[test]
fn extra_values_are_truncated() {
    let rows: String = (1..=15).map(|v| format!("{}\n", v * 10)).collect();
    let csv = format!("consumo\n{rows}");
    let out = import_consumption_from_reader(csv.as_bytes()).expect("import");
    assert_eq!(out.valid_values, 15);
    assert_eq!(out.consumption.values()[11], 120.0);
}

#[test]
fn unnamed_first_column_needs_twelve_values() {
    let csv = "valor\n1\n2\n3\n";
    match import_consumption_from_reader(csv.as_bytes()) {
        Err(ImportError::NotEnoughValues { column, found }) => {
            assert_eq!(column, "valor");
            assert_eq!(found, 3);
        }
        other => panic!("unexpected: {other:?}"),
    }

    let rows: String = (1..=12).map(|v| format!("{v}\n")).collect();
    let csv = format!("valor\n{rows}");
    let out = import_consumption_from_reader(csv.as_bytes()).expect("import");
    assert_eq!(out.column, "valor");
    assert_eq!(out.consumption.total(), 78.0);
}

#[test]
fn named_column_without_values_is_an_error() {
    let csv = "consumo\nx\ny\n";
    assert!(matches!(
        import_consumption_from_reader(csv.as_bytes()),
        Err(ImportError::NoValues { .. })
    ));
}

#[test]
fn template_round_trips_through_import() {
    let path = temp_path("template.csv");
    write_template(&path).expect("write template");
    let out = import_consumption(&path).expect("import template");
    assert_eq!(out.column, "Consumo_Mensal_kWh");
    assert_eq!(out.padded_months, 0);
    assert_eq!(out.consumption.total(), 3690.0);
    let _ = std::fs::remove_file(&path);
}

#[test]
fn missing_file_is_io_error() {
    let path = temp_path("does_not_exist.csv");
    assert!(matches!(import_consumption(&path), Err(ImportError::Io(_))));
}

#[test]
fn monthly_consumption_validates_values() {
    assert!(MonthlyConsumption::new(&[1.0; 11]).is_err());
    assert!(MonthlyConsumption::uniform(-1.0).is_err());
    let mut c = MonthlyConsumption::default();
    assert_eq!(c.average(), 300.0);
    c.set(0, 420.0).expect("set");
    assert!(c.set(1, f64::INFINITY).is_err());
    assert_eq!(c.set(12, 1.0), Err(ConsumptionError::MonthOutOfRange(12)));
    assert_eq!(c.values()[0], 420.0);
}
