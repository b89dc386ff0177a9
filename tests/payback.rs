use solar_sizing_toolbox::solar::{
    compute_payback, present_value_of_month, DiscountedPayback, PaybackError, PaybackInput,
    DISCOUNTED_HORIZON_MONTHS,
};

fn assert_close(actual: f64, expected: f64, tol: f64) {
    assert!(
        (actual - expected).abs() <= tol,
        "expected {expected}, got {actual} (tol {tol})"
    );
}

fn flat(generation: f64, consumption: f64, investment: f64, rate: f64) -> PaybackInput {
    PaybackInput {
        monthly_generation_kwh: vec![generation; 12],
        monthly_consumption_kwh: vec![consumption; 12],
        tariff_per_kwh: 0.65,
        investment,
        annual_discount_rate: rate,
    }
}

#[test]
fn balanced_household_simple_payback() {
    let res = compute_payback(flat(300.0, 300.0, 15_000.0, 0.0)).expect("payback");
    assert_close(res.annual_savings, 2340.0, 1e-9);
    assert_close(res.average_monthly_savings, 195.0, 1e-9);
    assert_close(res.simple_payback_years, 15_000.0 / 2340.0, 1e-12);
    assert_close(res.simple_payback_years, 6.41, 0.005);
    assert!(res.is_viable());
}

#[test]
fn zero_discount_rate_is_not_requested() {
    let res = compute_payback(flat(300.0, 300.0, 15_000.0, 0.0)).expect("payback");
    assert_eq!(res.discounted_payback, DiscountedPayback::NotRequested);
    assert_eq!(res.discounted_payback.years(), None);
}

#[test]
fn zero_investment_pays_back_immediately() {
    let res = compute_payback(flat(300.0, 300.0, 0.0, 0.08)).expect("payback");
    assert_close(res.simple_payback_years, 0.0, 0.0);
    assert_eq!(
        res.discounted_payback,
        DiscountedPayback::Resolved { months: 0 }
    );
}

#[test]
fn savings_capped_by_self_consumption() {
    let input = PaybackInput {
        monthly_generation_kwh: vec![
            100.0, 400.0, 250.0, 0.0, 300.0, 310.0, 50.0, 500.0, 290.0, 280.0, 600.0, 10.0,
        ],
        monthly_consumption_kwh: vec![300.0; 12],
        tariff_per_kwh: 0.8,
        investment: 10_000.0,
        annual_discount_rate: 0.05,
    };
    let res = compute_payback(input.clone()).expect("payback");
    for i in 0..12 {
        let saving = res.monthly_savings[i];
        assert!(saving <= input.tariff_per_kwh * input.monthly_consumption_kwh[i] + 1e-9);
        assert!(saving <= input.tariff_per_kwh * input.monthly_generation_kwh[i] + 1e-9);
    }
    assert_close(res.monthly_savings[1], 240.0, 1e-9);
    assert_close(res.monthly_savings[3], 0.0, 0.0);
}

#[test]
fn no_savings_is_not_viable() {
    let res = compute_payback(flat(0.0, 300.0, 15_000.0, 0.06)).expect("payback");
    assert!(res.simple_payback_years.is_infinite());
    assert!(!res.is_viable());
    assert_eq!(res.discounted_payback, DiscountedPayback::NotViable);
}

#[test]
fn discounted_payback_crosses_investment_at_returned_month() {
    let input = PaybackInput {
        monthly_generation_kwh: vec![
            280.0, 300.0, 320.0, 330.0, 340.0, 350.0, 350.0, 340.0, 320.0, 300.0, 280.0, 270.0,
        ],
        monthly_consumption_kwh: vec![310.0; 12],
        tariff_per_kwh: 0.65,
        investment: 15_000.0,
        annual_discount_rate: 0.08,
    };
    let res = compute_payback(input.clone()).expect("payback");
    let DiscountedPayback::Resolved { months } = res.discounted_payback else {
        panic!("expected resolved, got {:?}", res.discounted_payback);
    };
    let discounted_sum = |n: u32| -> f64 {
        (1..=n)
            .map(|m| present_value_of_month(res.monthly_savings[(m as usize - 1) % 12], 0.08, m))
            .sum()
    };
    assert!(discounted_sum(months) >= input.investment);
    assert!(discounted_sum(months - 1) < input.investment);
    // 할인 회수기간은 단순 회수기간보다 길다
    assert!(months as f64 / 12.0 > res.simple_payback_years);
    assert_close(
        res.discounted_payback.years().expect("years"),
        months as f64 / 12.0,
        1e-12,
    );
}

#[test]
fn discounted_payback_beyond_horizon() {
    // 월 절감 0.65, 투자비 15000: 단순 회수기간은 약 1923년
    let res = compute_payback(flat(1.0, 1.0, 15_000.0, 0.05)).expect("payback");
    assert!(res.simple_payback_years > 1000.0);
    assert_eq!(res.discounted_payback, DiscountedPayback::ExceedsHorizon);
    assert_eq!(DISCOUNTED_HORIZON_MONTHS, 600);
}

#[test]
fn present_value_discounts_monthly() {
    assert_close(present_value_of_month(100.0, 0.0, 12), 100.0, 1e-12);
    assert_close(
        present_value_of_month(100.0, 0.12, 1),
        100.0 / 1.01,
        1e-12,
    );
    assert_close(
        present_value_of_month(100.0, 0.12, 12),
        100.0 / 1.01f64.powi(12),
        1e-12,
    );
}

#[test]
fn rejects_malformed_input() {
    let mut short = flat(300.0, 300.0, 1000.0, 0.0);
    short.monthly_generation_kwh.pop();
    let negative_tariff = PaybackInput {
        tariff_per_kwh: -0.1,
        ..flat(300.0, 300.0, 1000.0, 0.0)
    };
    let negative_rate = flat(300.0, 300.0, 1000.0, -0.01);
    let negative_investment = flat(300.0, 300.0, -1.0, 0.0);
    for case in [short, negative_tariff, negative_rate, negative_investment] {
        assert!(matches!(
            compute_payback(case),
            Err(PaybackError::InvalidParameter(_))
        ));
    }
}

#[test]
fn recovery_in_last_horizon_month_is_resolved() {
    let rate = 0.06;
    let full_horizon: f64 = (1..=DISCOUNTED_HORIZON_MONTHS)
        .map(|m| present_value_of_month(100.0, rate, m))
        .sum();
    let input = PaybackInput {
        monthly_generation_kwh: vec![100.0; 12],
        monthly_consumption_kwh: vec![100.0; 12],
        tariff_per_kwh: 1.0,
        investment: full_horizon - 1e-6,
        annual_discount_rate: rate,
    };
    let res = compute_payback(input).expect("payback");
    assert_eq!(
        res.discounted_payback,
        DiscountedPayback::Resolved {
            months: DISCOUNTED_HORIZON_MONTHS
        }
    );

    let just_beyond = PaybackInput {
        investment: full_horizon + 1.0,
        ..flat(100.0, 100.0, 0.0, rate)
    };
    // 월 절감액 65로는 상한 안에 회수하지 못한다
    assert_eq!(
        compute_payback(just_beyond).expect("payback").discounted_payback,
        DiscountedPayback::ExceedsHorizon
    );
}
