//! # Zakat on Accumulated Wealth
//!
//! Wealth held for a full lunar year (*Haul*) above the savings Nisab owes 2.5%.
//! The record history stands in for the Haul: one record per month, so the Haul
//! is met once enough months have been tracked.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::config::FinanceConfig;
use crate::types::{explain_trace, CalculationStep};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, schemars::JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum WealthZakatEligibility {
    Eligible,
    BelowNisab,
    HaulNotMet,
}

impl WealthZakatEligibility {
    /// Short label shown next to the amount.
    pub fn message(&self) -> &'static str {
        match self {
            WealthZakatEligibility::Eligible => "Eligible",
            WealthZakatEligibility::BelowNisab => "Not Eligible (Below Nisab)",
            WealthZakatEligibility::HaulNotMet => "Not Eligible (< 1 Year)",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct WealthZakat {
    pub eligibility: WealthZakatEligibility,
    pub amount_due: Decimal,
    pub net_worth: Decimal,
    pub nisab_threshold: Decimal,
    pub months_tracked: usize,
    pub calculation_trace: Vec<CalculationStep>,
}

impl WealthZakat {
    pub fn is_eligible(&self) -> bool {
        self.eligibility == WealthZakatEligibility::Eligible
    }

    pub fn message(&self) -> &'static str {
        self.eligibility.message()
    }

    pub fn explain(&self) -> String {
        let mut text = explain_trace("Zakat on Wealth", &self.calculation_trace);
        text.push_str(&format!("Status: {}\n", self.message()));
        if self.is_eligible() {
            text.push_str(&format!("Amount Due: {:.2}\n", self.amount_due));
        }
        text
    }
}

/// Nisab is checked before Haul: a small net worth is `BelowNisab` however long it was tracked.
pub fn assess_wealth_zakat(net_worth: Decimal, months_tracked: usize, config: &FinanceConfig) -> WealthZakat {
    let nisab = config.savings_nisab;
    let mut trace = vec![
        CalculationStep::initial("Net Worth", net_worth),
        CalculationStep::compare("Savings Nisab", nisab),
    ];

    let eligibility = if net_worth < nisab {
        trace.push(CalculationStep::info("Net worth is below Nisab"));
        WealthZakatEligibility::BelowNisab
    } else if months_tracked < config.haul_months {
        trace.push(CalculationStep::info(format!(
            "Only {} of {} months tracked - Haul not met",
            months_tracked, config.haul_months
        )));
        WealthZakatEligibility::HaulNotMet
    } else {
        WealthZakatEligibility::Eligible
    };

    let amount_due = if eligibility == WealthZakatEligibility::Eligible {
        let due = net_worth * config.zakat_rate;
        trace.push(CalculationStep::rate("Zakat Rate", config.zakat_rate));
        trace.push(CalculationStep::result("Zakat Due", due));
        due
    } else {
        Decimal::ZERO
    };

    WealthZakat {
        eligibility,
        amount_due,
        net_worth,
        nisab_threshold: nisab,
        months_tracked,
        calculation_trace: trace,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_below_nisab_wins_over_haul() {
        let z = assess_wealth_zakat(dec!(24999.99), 40, &FinanceConfig::default());
        assert_eq!(z.eligibility, WealthZakatEligibility::BelowNisab);
        assert_eq!(z.amount_due, Decimal::ZERO);
        assert_eq!(z.message(), "Not Eligible (Below Nisab)");
    }

    #[test]
    fn test_haul_not_met() {
        let z = assess_wealth_zakat(dec!(60000), 5, &FinanceConfig::default());
        assert_eq!(z.eligibility, WealthZakatEligibility::HaulNotMet);
        assert_eq!(z.amount_due, Decimal::ZERO);
    }

    #[test]
    fn test_exactly_nisab_after_a_year_is_eligible() {
        let z = assess_wealth_zakat(dec!(25000), 12, &FinanceConfig::default());
        assert!(z.is_eligible());
        assert_eq!(z.amount_due, dec!(625));
        assert!(z.explain().contains("Amount Due: 625.00"));
    }

    #[test]
    fn test_custom_haul() {
        let config = FinanceConfig::default().with_haul_months(3);
        let z = assess_wealth_zakat(dec!(30000), 3, &config);
        assert!(z.is_eligible());
    }
}
