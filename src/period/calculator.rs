use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::FinanceConfig;
use crate::period::deductions::{DeductionOverrides, StatutoryDeductions};
use crate::period::emergency::{calculate_emergency_fund, EmergencyFundDetails};
use crate::period::expenses::{AssetDetails, ExpenseDetails};
use crate::period::health::{calculate_financial_health, FinancialHealth};
use crate::period::income::IncomeDetails;
use crate::period::zakat::{calculate_income_zakat, ZakatDetails};

/// Everything entered for one month. Collected and validated by the UI layer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct PeriodInputs {
    pub income: IncomeDetails,
    pub deductions: DeductionOverrides,
    pub expenses: ExpenseDetails,
    pub assets: AssetDetails,
}

impl PeriodInputs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn income(mut self, income: IncomeDetails) -> Self {
        self.income = income;
        self
    }

    pub fn deductions(mut self, deductions: DeductionOverrides) -> Self {
        self.deductions = deductions;
        self
    }

    pub fn expenses(mut self, expenses: ExpenseDetails) -> Self {
        self.expenses = expenses;
        self
    }

    pub fn assets(mut self, assets: AssetDetails) -> Self {
        self.assets = assets;
        self
    }
}

/// Derived figures for one month. Never persisted as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CalculationResult {
    pub gross_income: Decimal,
    pub epf: Decimal,
    pub socso: Decimal,
    pub eis: Decimal,
    pub pcb: Decimal,
    /// Zakat deducted through payroll (the override), not the computed liability.
    pub zakat: Decimal,
    pub total_deductions: Decimal,
    pub net_salary: Decimal,
    pub total_expenses: Decimal,
    /// Net salary minus every expense category.
    pub balance: Decimal,
    pub zakat_details: ZakatDetails,
    pub emergency_fund: EmergencyFundDetails,
}

/// Computes one month with the default (Malaysian) configuration.
pub fn compute_period(inputs: &PeriodInputs) -> CalculationResult {
    compute_period_with(inputs, &FinanceConfig::default())
}

pub fn compute_period_with(inputs: &PeriodInputs, config: &FinanceConfig) -> CalculationResult {
    let gross_income = inputs.income.gross();
    let deductions = StatutoryDeductions::resolve(gross_income, &inputs.deductions, config);
    let zakat_details = calculate_income_zakat(gross_income, &inputs.expenses, config);
    let emergency_fund = calculate_emergency_fund(&inputs.expenses, &inputs.assets, config);

    let total_deductions = deductions.total();
    let net_salary = gross_income - total_deductions;
    let total_expenses = inputs.expenses.total();
    let balance = net_salary - total_expenses;

    tracing::debug!(
        %gross_income,
        %total_deductions,
        %balance,
        zakat_status = %zakat_details.status,
        "computed period"
    );

    CalculationResult {
        gross_income,
        epf: deductions.epf,
        socso: deductions.socso,
        eis: deductions.eis,
        pcb: deductions.pcb,
        zakat: deductions.zakat,
        total_deductions,
        net_salary,
        total_expenses,
        balance,
        zakat_details,
        emergency_fund,
    }
}

pub fn compute_health(result: &CalculationResult) -> FinancialHealth {
    calculate_financial_health(result, &FinanceConfig::default())
}

pub fn compute_health_with(result: &CalculationResult, config: &FinanceConfig) -> FinancialHealth {
    calculate_financial_health(result, config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::period::emergency::EmergencyStatus;
    use crate::period::health::HealthStatus;
    use crate::period::zakat::ZakatStatus;
    use rust_decimal_macros::dec;

    #[test]
    fn test_basic_salary_only() {
        let inputs = PeriodInputs::new().income(IncomeDetails::new().basic_salary(5000));
        let res = compute_period(&inputs);

        assert_eq!(res.gross_income, dec!(5000));
        assert_eq!(res.epf, dec!(550));
        assert_eq!(res.socso, dec!(19.75));
        assert_eq!(res.eis, dec!(7.90));
        assert_eq!(res.pcb, Decimal::ZERO);
        assert_eq!(res.total_deductions, dec!(577.65));
        assert_eq!(res.net_salary, dec!(4422.35));
        assert_eq!(res.total_expenses, Decimal::ZERO);
        assert_eq!(res.balance, dec!(4422.35));
        assert_eq!(res.zakat_details.status, ZakatStatus::Eligible);
        assert_eq!(res.zakat_details.amount_due, dec!(125));
        assert_eq!(res.emergency_fund.current_status, EmergencyStatus::Critical);
    }

    #[test]
    fn test_computed_zakat_is_not_deducted() {
        let inputs = PeriodInputs::new().income(IncomeDetails::new().basic_salary(8000));
        let res = compute_period(&inputs);
        assert!(res.zakat_details.amount_due > Decimal::ZERO);
        assert_eq!(res.zakat, Decimal::ZERO);
        assert_eq!(res.total_deductions, res.epf + res.socso + res.eis + res.pcb);
    }

    #[test]
    fn test_overspending_is_poor_health() {
        let inputs = PeriodInputs::new()
            .income(IncomeDetails::new().basic_salary(3000))
            .expenses(ExpenseDetails::new().housing(2000).food(900));
        let res = compute_period(&inputs);
        assert!(res.balance < Decimal::ZERO);

        let health = compute_health(&res);
        assert_eq!(health.status, HealthStatus::Poor);
        assert_eq!(health.score, 30);
        assert_eq!(health.comments, vec!["Warning: Expenses exceed income. Review your spending.".to_string()]);
    }

    #[test]
    fn test_empty_inputs_are_finite() {
        let res = compute_period(&PeriodInputs::default());
        assert_eq!(res.net_salary, Decimal::ZERO);
        assert_eq!(res.emergency_fund.essential_expenses, dec!(1500));
        assert_eq!(res.emergency_fund.months_covered, Decimal::ZERO);

        let health = compute_health(&res);
        assert_eq!(health.status, HealthStatus::Poor);
        assert_eq!(health.savings_ratio, Decimal::ZERO);
    }
}
