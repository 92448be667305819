use mizan::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

#[test]
fn test_salary_5000_breakdown() {
    let inputs = PeriodInputs::new().income(IncomeDetails::new().basic_salary(5000));
    let res = compute_period(&inputs);

    assert_eq!(res.gross_income, dec!(5000));
    assert_eq!(res.epf, dec!(550));
    assert_eq!(res.socso, dec!(19.75));
    assert_eq!(res.eis, dec!(7.90));

    let deductions = StatutoryDeductions::resolve(res.gross_income, &inputs.deductions, &FinanceConfig::default());
    assert_eq!(deductions.taxable_income, dec!(4450));

    // 60,000 assessable against a 24,000 Nisab
    assert_eq!(res.zakat_details.status, ZakatStatus::Eligible);
    assert_eq!(res.zakat_details.eligible_amount, dec!(60000));
    assert_eq!(res.zakat_details.amount_due, dec!(125));
}

#[test]
fn test_contribution_ceilings() {
    let at = |salary: i32| compute_period(&PeriodInputs::new().income(IncomeDetails::new().basic_salary(salary)));

    // EIS caps only above 4000; SOCSO is still 0.5% below its 5000 ceiling
    let four = at(4000);
    assert_eq!(four.eis, dec!(8.00));
    assert_eq!(four.socso, dec!(20.00));

    let over = at(4001);
    assert_eq!(over.eis, dec!(7.90));
}

#[test]
fn test_gross_is_exact_sum_of_income_fields() {
    let income = IncomeDetails::new()
        .basic_salary(dec!(4200.10))
        .fixed_allowance(300)
        .variable_allowance(dec!(125.45))
        .overtime("80.5")
        .bonus(1000)
        .other_income(0)
        .gift(50);
    let res = compute_period(&PeriodInputs::new().income(income));
    assert_eq!(res.gross_income, dec!(5756.05));
    assert_eq!(res.epf, res.gross_income * dec!(0.11));
}

#[test]
fn test_malformed_inputs_default_to_zero() {
    let income = IncomeDetails::new().basic_salary("3,000").bonus(f64::NAN).fixed_allowance(500);
    assert_eq!(income.gross(), dec!(500));
}

#[test]
fn test_payslip_overrides() {
    let inputs = PeriodInputs::new()
        .income(IncomeDetails::new().basic_salary(10000))
        .deductions(DeductionOverrides::new().pcb(800).zakat(150));
    let res = compute_period(&inputs);

    assert_eq!(res.pcb, dec!(800));
    assert_eq!(res.zakat, dec!(150));
    assert_eq!(res.epf, dec!(1100));
    assert_eq!(res.total_deductions, dec!(1100) + dec!(19.75) + dec!(7.90) + dec!(800) + dec!(150));
}

#[test]
fn test_emergency_status_is_monotonic() {
    let expenses = ExpenseDetails::new().housing(1000).food(500);
    let statuses: Vec<EmergencyStatus> = [0, 2999, 4500, 8999, 9000, 50000]
        .into_iter()
        .map(|savings| {
            let inputs = PeriodInputs::new()
                .expenses(expenses)
                .assets(AssetDetails::new().savings(savings));
            compute_period(&inputs).emergency_fund.current_status
        })
        .collect();

    assert_eq!(
        statuses,
        vec![
            EmergencyStatus::Critical,
            EmergencyStatus::Critical,
            EmergencyStatus::Warning,
            EmergencyStatus::Warning,
            EmergencyStatus::Safe,
            EmergencyStatus::Safe,
        ]
    );
    assert!(statuses.windows(2).all(|w| w[0] <= w[1]));
}

#[test]
fn test_health_grades() {
    // 4422.35 net, spending leaves roughly 25%
    let excellent = compute_period(
        &PeriodInputs::new()
            .income(IncomeDetails::new().basic_salary(5000))
            .expenses(ExpenseDetails::new().housing(2000).food(1300)),
    );
    let health = compute_health(&excellent);
    assert_eq!(health.status, HealthStatus::Excellent);
    assert_eq!(health.score, 90);

    // 663.35 left of 4422.35 is about 15%
    let good = compute_period(
        &PeriodInputs::new()
            .income(IncomeDetails::new().basic_salary(5000))
            .expenses(ExpenseDetails::new().housing(2000).food(1759)),
    );
    let health = compute_health(&good);
    assert_eq!(health.status, HealthStatus::Good);
    assert_eq!(health.score, 75);
    assert!(health.savings_ratio > dec!(14.99) && health.savings_ratio < dec!(15.01));

    let fair = compute_period(
        &PeriodInputs::new()
            .income(IncomeDetails::new().basic_salary(5000))
            .expenses(ExpenseDetails::new().housing(2000).food(2200)),
    );
    let health = compute_health(&fair);
    assert_eq!(health.status, HealthStatus::Fair);
    assert_eq!(health.score, 50);
    assert!(health.savings_ratio > Decimal::ZERO);
}

#[test]
fn test_custom_config_changes_nisab() {
    let config = FinanceConfig::builder().income_nisab(100000).build().unwrap();
    let inputs = PeriodInputs::new().income(IncomeDetails::new().basic_salary(5000));
    let res = compute_period_with(&inputs, &config);
    assert_eq!(res.zakat_details.status, ZakatStatus::NotEligible);
    assert_eq!(res.zakat_details.amount_due, Decimal::ZERO);
}

#[test]
fn test_trace_serialization() {
    let res = compute_period(&PeriodInputs::new().income(IncomeDetails::new().basic_salary(5000)));
    let json = serde_json::to_string(&res.zakat_details.calculation_trace).unwrap();

    assert!(json.contains(r#""operation":"initial""#));
    assert!(json.contains(r#""operation":"subtract""#));
    assert!(json.contains(r#""operation":"rate""#));
    assert!(json.contains(r#""amount":"60000""#));

    let text = res.zakat_details.explain();
    assert!(text.contains("Zakat on Income"));
}
