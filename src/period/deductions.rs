//! Malaysian statutory payroll deductions.
//!
//! - **EPF**: employee retirement contribution, a flat percentage of gross.
//! - **SOCSO / EIS**: social security and employment insurance, a small percentage
//!   replaced by a flat amount from a wage ceiling.
//! - **PCB**: monthly tax deduction, estimated from annualised chargeable income.
//!
//! Every figure can be overridden by the caller (e.g. copied off a real payslip).

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::FinanceConfig;
use crate::inputs::IntoAmount;

/// Deductions supplied by the caller. `None` means "compute it".
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct DeductionOverrides {
    pub epf: Option<Decimal>,
    pub socso: Option<Decimal>,
    pub eis: Option<Decimal>,
    pub pcb: Option<Decimal>,
    /// Zakat already deducted through payroll. Never computed; absent means zero.
    pub zakat: Option<Decimal>,
}

impl DeductionOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn epf(mut self, val: impl IntoAmount) -> Self {
        self.epf = val.into_amount().ok();
        self
    }

    pub fn socso(mut self, val: impl IntoAmount) -> Self {
        self.socso = val.into_amount().ok();
        self
    }

    pub fn eis(mut self, val: impl IntoAmount) -> Self {
        self.eis = val.into_amount().ok();
        self
    }

    pub fn pcb(mut self, val: impl IntoAmount) -> Self {
        self.pcb = val.into_amount().ok();
        self
    }

    pub fn zakat(mut self, val: impl IntoAmount) -> Self {
        self.zakat = val.into_amount().ok();
        self
    }
}

/// The resolved deductions for one month.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct StatutoryDeductions {
    pub epf: Decimal,
    pub socso: Decimal,
    pub eis: Decimal,
    pub pcb: Decimal,
    pub zakat: Decimal,
    /// Gross minus EPF: the monthly base PCB is estimated on.
    pub taxable_income: Decimal,
}

impl StatutoryDeductions {
    pub fn resolve(gross: Decimal, overrides: &DeductionOverrides, config: &FinanceConfig) -> Self {
        let epf = overrides.epf.unwrap_or_else(|| calculate_epf(gross, config));
        let socso = overrides.socso.unwrap_or_else(|| config.socso.apply(gross));
        let eis = overrides.eis.unwrap_or_else(|| config.eis.apply(gross));

        let taxable_income = gross - epf;
        let pcb = overrides.pcb.unwrap_or_else(|| calculate_pcb(taxable_income, config));

        Self {
            epf,
            socso,
            eis,
            pcb,
            zakat: overrides.zakat.unwrap_or_default(),
            taxable_income,
        }
    }

    pub fn total(&self) -> Decimal {
        self.epf + self.socso + self.eis + self.pcb + self.zakat
    }
}

pub fn calculate_epf(gross: Decimal, config: &FinanceConfig) -> Decimal {
    gross * config.epf_rate
}

/// Monthly PCB estimate.
///
/// Annualises the monthly taxable income, subtracts the individual relief and applies
/// the configured marginal brackets from the top down. Income below the lowest
/// configured bracket is untaxed.
pub fn calculate_pcb(monthly_taxable: Decimal, config: &FinanceConfig) -> Decimal {
    let annual = monthly_taxable * Decimal::from(12);
    let mut chargeable = (annual - config.pcb_relief).max(Decimal::ZERO);

    let mut tax = Decimal::ZERO;
    for bracket in &config.pcb_brackets {
        if chargeable > bracket.threshold {
            tax += (chargeable - bracket.threshold) * bracket.rate;
            chargeable = bracket.threshold;
        }
    }

    tax / Decimal::from(12)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_epf_is_eleven_percent() {
        let config = FinanceConfig::default();
        assert_eq!(calculate_epf(dec!(5000), &config), dec!(550));
        assert_eq!(calculate_epf(dec!(3333.33), &config), dec!(366.6663));
    }

    #[test]
    fn test_pcb_below_lowest_bracket_is_zero() {
        // 4450 * 12 - 9000 = 44,400 < 50,000
        assert_eq!(calculate_pcb(dec!(4450), &FinanceConfig::default()), Decimal::ZERO);
    }

    #[test]
    fn test_pcb_piecewise_brackets() {
        let config = FinanceConfig::default();
        // 10,000 * 12 - 9,000 = 111,000
        // (111,000 - 100,000) * 0.25 = 2,750
        // (100,000 - 70,000) * 0.21 = 6,300
        // (70,000 - 50,000) * 0.11 = 2,200
        // 11,250 / 12 = 937.5
        assert_eq!(calculate_pcb(dec!(10000), &config), dec!(937.5));

        // 5,500 * 12 - 9,000 = 57,000 -> (57,000 - 50,000) * 0.11 = 770 -> 64.1666...
        let pcb = calculate_pcb(dec!(5500), &config);
        assert_eq!(pcb.round_dp(2), dec!(64.17));
    }

    #[test]
    fn test_pcb_negative_taxable_is_zero() {
        assert_eq!(calculate_pcb(dec!(-100), &FinanceConfig::default()), Decimal::ZERO);
    }

    #[test]
    fn test_overrides_take_precedence() {
        let config = FinanceConfig::default();
        let overrides = DeductionOverrides::new().epf(400).pcb(0).zakat(50);
        let d = StatutoryDeductions::resolve(dec!(5000), &overrides, &config);

        assert_eq!(d.epf, dec!(400));
        assert_eq!(d.taxable_income, dec!(4600));
        assert_eq!(d.pcb, Decimal::ZERO);
        assert_eq!(d.socso, dec!(19.75));
        assert_eq!(d.eis, dec!(7.90));
        assert_eq!(d.zakat, dec!(50));
        assert_eq!(d.total(), dec!(477.65));
    }

    #[test]
    fn test_zakat_deduction_defaults_to_zero() {
        let d = StatutoryDeductions::resolve(dec!(3000), &DeductionOverrides::default(), &FinanceConfig::default());
        assert_eq!(d.zakat, Decimal::ZERO);
        assert_eq!(d.socso, dec!(15));
        assert_eq!(d.eis, dec!(6));
    }
}
