use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::config::FinanceConfig;
use crate::period::expenses::{AssetDetails, ExpenseDetails};

/// Coverage band, ordered from worst to best.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Display, EnumString, schemars::JsonSchema)]
pub enum EmergencyStatus {
    Critical,
    Warning,
    Safe,
}

impl EmergencyStatus {
    pub fn from_months(months_covered: Decimal, config: &FinanceConfig) -> Self {
        if months_covered >= config.emergency_safe_months {
            EmergencyStatus::Safe
        } else if months_covered >= config.emergency_warning_months {
            EmergencyStatus::Warning
        } else {
            EmergencyStatus::Critical
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct EmergencyFundDetails {
    /// Monthly essentials, or the configured floor when none were entered.
    pub essential_expenses: Decimal,
    pub target3_months: Decimal,
    pub target6_months: Decimal,
    pub target12_months: Decimal,
    pub current_status: EmergencyStatus,
    pub months_covered: Decimal,
}

pub fn calculate_emergency_fund(expenses: &ExpenseDetails, assets: &AssetDetails, config: &FinanceConfig) -> EmergencyFundDetails {
    let essential = expenses.essentials();
    let monthly_essential = if essential.is_zero() {
        config.essential_expense_floor
    } else {
        essential
    };

    // Negative essentials can only come from negative inputs; they cover nothing.
    let months_covered = if monthly_essential > Decimal::ZERO {
        assets.savings / monthly_essential
    } else {
        Decimal::ZERO
    };

    EmergencyFundDetails {
        essential_expenses: monthly_essential,
        target3_months: monthly_essential * Decimal::from(3),
        target6_months: monthly_essential * Decimal::from(6),
        target12_months: monthly_essential * Decimal::from(12),
        current_status: EmergencyStatus::from_months(months_covered, config),
        months_covered,
    }
}
