//! # Zakat on Professional Income (Zakat al-Mustafad)
//!
//! Uses the *Net* method: basic living needs (*Had al-Kifayah*) are deducted from the
//! annualised gross income before comparing with the yearly Nisab. The annual liability
//! is spread over twelve monthly instalments.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::config::FinanceConfig;
use crate::period::expenses::ExpenseDetails;
use crate::types::{explain_trace, CalculationStep};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, schemars::JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum ZakatStatus {
    Eligible,
    NotEligible,
}

/// Income Zakat for one month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ZakatDetails {
    /// Annual assessable income when eligible, zero otherwise.
    pub eligible_amount: Decimal,
    /// Monthly instalment (annual Zakat / 12).
    pub amount_due: Decimal,
    pub status: ZakatStatus,
    pub nisab_threshold: Decimal,
    pub calculation_trace: Vec<CalculationStep>,
}

impl ZakatDetails {
    pub fn is_eligible(&self) -> bool {
        self.status == ZakatStatus::Eligible
    }

    pub fn explain(&self) -> String {
        let mut text = explain_trace("Zakat on Income", &self.calculation_trace);
        text.push_str(&format!("Status: {}\n", self.status));
        if self.is_eligible() {
            text.push_str(&format!("Monthly Amount Due: {:.2}\n", self.amount_due));
        }
        text
    }
}

pub fn calculate_income_zakat(monthly_gross: Decimal, expenses: &ExpenseDetails, config: &FinanceConfig) -> ZakatDetails {
    let twelve = Decimal::from(12);
    let annual_income = monthly_gross * twelve;
    let basic_needs = expenses.basic_needs() * twelve;
    let assessable = (annual_income - basic_needs).max(Decimal::ZERO);
    let nisab = config.income_nisab_yearly;

    let mut trace = vec![
        CalculationStep::initial("Annual Gross Income", annual_income),
        CalculationStep::subtract("Annual Basic Needs", basic_needs),
        CalculationStep::result("Assessable Income", assessable),
        CalculationStep::compare("Yearly Nisab", nisab),
    ];

    if assessable > nisab {
        let yearly = assessable * config.zakat_rate;
        let monthly = yearly / twelve;
        trace.push(CalculationStep::rate("Zakat Rate", config.zakat_rate));
        trace.push(CalculationStep::result("Yearly Zakat", yearly));
        trace.push(CalculationStep::result("Monthly Instalment", monthly));

        ZakatDetails {
            eligible_amount: assessable,
            amount_due: monthly,
            status: ZakatStatus::Eligible,
            nisab_threshold: nisab,
            calculation_trace: trace,
        }
    } else {
        trace.push(CalculationStep::info("Assessable income does not exceed Nisab - No Zakat Due"));

        ZakatDetails {
            eligible_amount: Decimal::ZERO,
            amount_due: Decimal::ZERO,
            status: ZakatStatus::NotEligible,
            nisab_threshold: nisab,
            calculation_trace: trace,
        }
    }
}
