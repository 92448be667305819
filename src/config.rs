use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;

use crate::inputs::IntoAmount;
use crate::types::MizanError;

/// One marginal PCB bracket: income above `threshold` is taxed at `rate`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct TaxBracket {
    pub threshold: Decimal,
    pub rate: Decimal,
}

impl TaxBracket {
    pub const fn new(threshold: Decimal, rate: Decimal) -> Self {
        Self { threshold, rate }
    }
}

/// A flat percentage replaced by a fixed amount past a wage ceiling (SOCSO, EIS).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CappedContribution {
    pub rate: Decimal,
    /// Gross income past which the flat `cap` applies.
    pub ceiling: Decimal,
    pub cap: Decimal,
    /// Whether a gross of exactly `ceiling` already pays the cap.
    #[serde(default)]
    pub inclusive_ceiling: bool,
}

impl CappedContribution {
    fn capped(&self, gross: Decimal) -> bool {
        if self.inclusive_ceiling {
            gross >= self.ceiling
        } else {
            gross > self.ceiling
        }
    }

    pub fn apply(&self, gross: Decimal) -> Decimal {
        if self.capped(gross) {
            self.cap
        } else {
            gross * self.rate
        }
    }
}

/// Every rate, threshold and window used by the period calculator and the history
/// aggregator.
///
/// `Default` carries the Malaysian figures the calculator was built around.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct FinanceConfig {
    pub epf_rate: Decimal,
    pub socso: CappedContribution,
    pub eis: CappedContribution,

    /// Individual relief deducted from annual chargeable income before PCB.
    pub pcb_relief: Decimal,
    /// Marginal brackets, highest threshold first. Lower brackets are intentionally absent.
    pub pcb_brackets: Vec<TaxBracket>,

    /// Yearly Nisab for Zakat on income (approximate gold-based figure).
    pub income_nisab_yearly: Decimal,
    /// Nisab for Zakat on accumulated savings (roughly 85g of gold).
    pub savings_nisab: Decimal,
    pub zakat_rate: Decimal,
    /// Months of tracked history that count as one Haul.
    pub haul_months: usize,

    /// Essential monthly expenses assumed when none were entered.
    pub essential_expense_floor: Decimal,
    pub emergency_safe_months: Decimal,
    pub emergency_warning_months: Decimal,

    /// Savings ratio (percent) thresholds for the health score.
    pub health_excellent_ratio: Decimal,
    pub health_good_ratio: Decimal,

    /// Records summed when approximating net worth one year ago.
    pub net_worth_trend_window: usize,
    /// Records averaged for the monthly savings trend.
    pub savings_trend_window: usize,
}

impl Default for FinanceConfig {
    fn default() -> Self {
        FinanceConfig {
            epf_rate: dec!(0.11),
            socso: CappedContribution {
                rate: dec!(0.005),
                ceiling: dec!(5000),
                cap: dec!(19.75),
                inclusive_ceiling: true,
            },
            eis: CappedContribution {
                rate: dec!(0.002),
                ceiling: dec!(4000),
                cap: dec!(7.90),
                inclusive_ceiling: false,
            },
            pcb_relief: dec!(9000),
            pcb_brackets: vec![
                TaxBracket::new(dec!(100000), dec!(0.25)),
                TaxBracket::new(dec!(70000), dec!(0.21)),
                TaxBracket::new(dec!(50000), dec!(0.11)),
            ],
            income_nisab_yearly: dec!(24000),
            savings_nisab: dec!(25000),
            zakat_rate: dec!(0.025),
            haul_months: 12,
            essential_expense_floor: dec!(1500),
            emergency_safe_months: dec!(6),
            emergency_warning_months: dec!(3),
            health_excellent_ratio: dec!(20),
            health_good_ratio: dec!(10),
            net_worth_trend_window: 12,
            savings_trend_window: 6,
        }
    }
}

impl std::str::FromStr for FinanceConfig {
    type Err = MizanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let config: FinanceConfig = serde_json::from_str(s)
            .map_err(|e| MizanError::Configuration(format!("Failed to parse config JSON: {}", e)))?;
        config.validate()?;
        Ok(config)
    }
}

fn rate_in_unit_range(name: &str, rate: Decimal) -> Result<(), MizanError> {
    if rate < Decimal::ZERO || rate > Decimal::ONE {
        return Err(MizanError::Configuration(format!("{} must be between 0 and 1, got {}", name, rate)));
    }
    Ok(())
}

fn non_negative(name: &str, value: Decimal) -> Result<(), MizanError> {
    if value < Decimal::ZERO {
        return Err(MizanError::Configuration(format!("{} must be non-negative, got {}", name, value)));
    }
    Ok(())
}

impl FinanceConfig {
    pub fn builder() -> FinanceConfigBuilder {
        FinanceConfigBuilder::default()
    }

    /// Validates the configuration for logical consistency.
    pub fn validate(&self) -> Result<(), MizanError> {
        rate_in_unit_range("EPF rate", self.epf_rate)?;
        rate_in_unit_range("SOCSO rate", self.socso.rate)?;
        rate_in_unit_range("EIS rate", self.eis.rate)?;
        rate_in_unit_range("Zakat rate", self.zakat_rate)?;

        non_negative("SOCSO ceiling", self.socso.ceiling)?;
        non_negative("SOCSO cap", self.socso.cap)?;
        non_negative("EIS ceiling", self.eis.ceiling)?;
        non_negative("EIS cap", self.eis.cap)?;
        non_negative("PCB relief", self.pcb_relief)?;
        non_negative("Income Nisab", self.income_nisab_yearly)?;
        non_negative("Savings Nisab", self.savings_nisab)?;
        non_negative("Essential expense floor", self.essential_expense_floor)?;

        for bracket in &self.pcb_brackets {
            rate_in_unit_range("PCB bracket rate", bracket.rate)?;
            non_negative("PCB bracket threshold", bracket.threshold)?;
        }
        if self.pcb_brackets.windows(2).any(|w| w[0].threshold <= w[1].threshold) {
            return Err(MizanError::Configuration(
                "PCB brackets must be ordered by strictly descending threshold".to_string(),
            ));
        }

        // The floor is the divisor for emergency coverage when no essentials are entered.
        if self.essential_expense_floor.is_zero() {
            return Err(MizanError::Configuration("Essential expense floor must be > 0".to_string()));
        }

        if self.emergency_warning_months > self.emergency_safe_months {
            return Err(MizanError::Configuration(
                "Emergency warning months must not exceed safe months".to_string(),
            ));
        }
        if self.health_good_ratio > self.health_excellent_ratio {
            return Err(MizanError::Configuration(
                "Health 'good' ratio must not exceed the 'excellent' ratio".to_string(),
            ));
        }

        if self.haul_months == 0 || self.net_worth_trend_window == 0 || self.savings_trend_window == 0 {
            return Err(MizanError::Configuration(
                "Haul months and trend windows must be at least 1".to_string(),
            ));
        }

        Ok(())
    }

    /// Loads the defaults, overridden by any `MIZAN_*` environment variables that are set.
    ///
    /// Recognised: `MIZAN_INCOME_NISAB`, `MIZAN_SAVINGS_NISAB`, `MIZAN_EPF_RATE`,
    /// `MIZAN_ZAKAT_RATE`, `MIZAN_HAUL_MONTHS`.
    pub fn from_env() -> Result<Self, MizanError> {
        let mut config = Self::default();

        if let Some(v) = env_decimal("MIZAN_INCOME_NISAB")? {
            config.income_nisab_yearly = v;
        }
        if let Some(v) = env_decimal("MIZAN_SAVINGS_NISAB")? {
            config.savings_nisab = v;
        }
        if let Some(v) = env_decimal("MIZAN_EPF_RATE")? {
            config.epf_rate = v;
        }
        if let Some(v) = env_decimal("MIZAN_ZAKAT_RATE")? {
            config.zakat_rate = v;
        }
        if let Ok(raw) = env::var("MIZAN_HAUL_MONTHS") {
            config.haul_months = raw.trim().parse::<usize>()
                .map_err(|e| MizanError::Configuration(format!("Invalid MIZAN_HAUL_MONTHS '{}': {}", raw, e)))?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Attempts to load configuration from a JSON file. Missing keys take their defaults.
    pub fn try_from_json(path: &str) -> Result<Self, MizanError> {
        let content = fs::read_to_string(path)
            .map_err(|e| MizanError::Configuration(format!("Failed to read config file: {}", e)))?;
        content.parse()
    }

    // ========== Fluent Helper Methods ==========

    pub fn with_income_nisab(mut self, yearly: impl IntoAmount) -> Result<Self, MizanError> {
        self.income_nisab_yearly = yearly.into_amount()?;
        Ok(self)
    }

    pub fn with_savings_nisab(mut self, amount: impl IntoAmount) -> Result<Self, MizanError> {
        self.savings_nisab = amount.into_amount()?;
        Ok(self)
    }

    pub fn with_haul_months(mut self, months: usize) -> Self {
        self.haul_months = months;
        self
    }
}

fn env_decimal(key: &str) -> Result<Option<Decimal>, MizanError> {
    match env::var(key) {
        Ok(raw) => raw
            .as_str()
            .into_amount()
            .map(Some)
            .map_err(|e| MizanError::Configuration(format!("Invalid {} '{}': {}", key, raw, e))),
        Err(env::VarError::NotPresent) => Ok(None),
        Err(e) => {
            tracing::warn!("Ignoring unreadable {}: {}", key, e);
            Ok(None)
        }
    }
}

// ========== FinanceConfigBuilder ==========

#[derive(Default)]
pub struct FinanceConfigBuilder {
    epf_rate: Option<Decimal>,
    socso: Option<CappedContribution>,
    eis: Option<CappedContribution>,
    pcb_relief: Option<Decimal>,
    pcb_brackets: Option<Vec<TaxBracket>>,
    income_nisab_yearly: Option<Decimal>,
    savings_nisab: Option<Decimal>,
    zakat_rate: Option<Decimal>,
    haul_months: Option<usize>,
    essential_expense_floor: Option<Decimal>,
}

impl FinanceConfigBuilder {
    pub fn epf_rate(mut self, rate: impl IntoAmount) -> Self {
        if let Ok(r) = rate.into_amount() {
            self.epf_rate = Some(r);
        }
        self
    }

    pub fn socso(mut self, contribution: CappedContribution) -> Self {
        self.socso = Some(contribution);
        self
    }

    pub fn eis(mut self, contribution: CappedContribution) -> Self {
        self.eis = Some(contribution);
        self
    }

    pub fn pcb_relief(mut self, relief: impl IntoAmount) -> Self {
        if let Ok(r) = relief.into_amount() {
            self.pcb_relief = Some(r);
        }
        self
    }

    pub fn pcb_brackets(mut self, brackets: Vec<TaxBracket>) -> Self {
        self.pcb_brackets = Some(brackets);
        self
    }

    pub fn income_nisab(mut self, yearly: impl IntoAmount) -> Self {
        if let Ok(n) = yearly.into_amount() {
            self.income_nisab_yearly = Some(n);
        }
        self
    }

    pub fn savings_nisab(mut self, amount: impl IntoAmount) -> Self {
        if let Ok(n) = amount.into_amount() {
            self.savings_nisab = Some(n);
        }
        self
    }

    pub fn zakat_rate(mut self, rate: impl IntoAmount) -> Self {
        if let Ok(r) = rate.into_amount() {
            self.zakat_rate = Some(r);
        }
        self
    }

    pub fn haul_months(mut self, months: usize) -> Self {
        self.haul_months = Some(months);
        self
    }

    pub fn essential_expense_floor(mut self, floor: impl IntoAmount) -> Self {
        if let Ok(f) = floor.into_amount() {
            self.essential_expense_floor = Some(f);
        }
        self
    }

    pub fn build(self) -> Result<FinanceConfig, MizanError> {
        let defaults = FinanceConfig::default();
        let config = FinanceConfig {
            epf_rate: self.epf_rate.unwrap_or(defaults.epf_rate),
            socso: self.socso.unwrap_or(defaults.socso),
            eis: self.eis.unwrap_or(defaults.eis),
            pcb_relief: self.pcb_relief.unwrap_or(defaults.pcb_relief),
            pcb_brackets: self.pcb_brackets.unwrap_or(defaults.pcb_brackets),
            income_nisab_yearly: self.income_nisab_yearly.unwrap_or(defaults.income_nisab_yearly),
            savings_nisab: self.savings_nisab.unwrap_or(defaults.savings_nisab),
            zakat_rate: self.zakat_rate.unwrap_or(defaults.zakat_rate),
            haul_months: self.haul_months.unwrap_or(defaults.haul_months),
            essential_expense_floor: self
                .essential_expense_floor
                .unwrap_or(defaults.essential_expense_floor),
            ..defaults
        };

        config.validate()?;
        Ok(config)
    }
}
