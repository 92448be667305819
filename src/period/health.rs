use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::config::FinanceConfig;
use crate::period::calculator::CalculationResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, schemars::JsonSchema)]
pub enum HealthStatus {
    Excellent,
    Good,
    Fair,
    Poor,
}

impl HealthStatus {
    pub fn score(self) -> u8 {
        match self {
            HealthStatus::Excellent => 90,
            HealthStatus::Good => 75,
            HealthStatus::Fair => 50,
            HealthStatus::Poor => 30,
        }
    }

    pub fn comment(self) -> &'static str {
        match self {
            HealthStatus::Excellent => "Great savings rate! Mashallah.",
            HealthStatus::Good => "Good standardized savings.",
            HealthStatus::Fair => "You are saving, but try to increase to 10-20%.",
            HealthStatus::Poor => "Warning: Expenses exceed income. Review your spending.",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct FinancialHealth {
    pub status: HealthStatus,
    pub score: u8,
    /// Balance as a percentage of net salary.
    pub savings_ratio: Decimal,
    pub comments: Vec<String>,
}

/// Savings ratio in percent. A zero net salary yields zero rather than a non-finite ratio.
pub fn savings_ratio(balance: Decimal, net_salary: Decimal) -> Decimal {
    balance
        .checked_div(net_salary)
        .map(|r| r * Decimal::ONE_HUNDRED)
        .unwrap_or(Decimal::ZERO)
}

pub fn calculate_financial_health(result: &CalculationResult, config: &FinanceConfig) -> FinancialHealth {
    let ratio = savings_ratio(result.balance, result.net_salary);

    let status = if ratio >= config.health_excellent_ratio {
        HealthStatus::Excellent
    } else if ratio >= config.health_good_ratio {
        HealthStatus::Good
    } else if ratio > Decimal::ZERO {
        HealthStatus::Fair
    } else {
        HealthStatus::Poor
    };

    FinancialHealth {
        status,
        score: status.score(),
        savings_ratio: ratio,
        comments: vec![status.comment().to_string()],
    }
}
