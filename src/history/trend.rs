//! Year-over-year net worth growth and the savings-versus-average indicator.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use std::fmt;

use crate::config::FinanceConfig;
use crate::history::record::MonthlyRecord;
use crate::history::stats::mean;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, schemars::JsonSchema)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum SavingsTrend {
    OnTrack,
    BelowAverage { shortfall: Decimal },
}

impl fmt::Display for SavingsTrend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SavingsTrend::OnTrack => write!(f, "On Track"),
            SavingsTrend::BelowAverage { shortfall } => write!(
                f,
                "RM {} below avg",
                shortfall.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Trend {
    pub net_worth_one_year_ago: Decimal,
    /// Percentage growth; 100 when there is no positive prior figure to compare with.
    pub net_worth_growth_pct: Decimal,
    pub latest_savings: Decimal,
    pub average_savings: Decimal,
    pub savings_trend: SavingsTrend,
}

/// What a month added on top of the previous one for trend purposes: the stored
/// balance (zero when absent) plus the stored savings.
fn trend_contribution(record: &MonthlyRecord) -> Decimal {
    record.balance.unwrap_or_default() + record.savings_or_zero()
}

/// `None` for an empty history.
pub fn calculate_trend(records: &[MonthlyRecord], current_net_worth: Decimal, config: &FinanceConfig) -> Option<Trend> {
    let mut recent: Vec<&MonthlyRecord> = records.iter().collect();
    recent.sort_by_key(|r| Reverse(r.period()));
    let latest = trend_contribution(recent.first()?);

    let last_year: Decimal = recent
        .iter()
        .take(config.net_worth_trend_window)
        .map(|r| trend_contribution(r))
        .sum();
    let net_worth_one_year_ago = current_net_worth - last_year;

    let net_worth_growth_pct = if net_worth_one_year_ago > Decimal::ZERO {
        ((current_net_worth - net_worth_one_year_ago) / net_worth_one_year_ago) * Decimal::ONE_HUNDRED
    } else {
        Decimal::ONE_HUNDRED
    };

    let average_savings = mean(
        recent
            .iter()
            .take(config.savings_trend_window)
            .map(|r| trend_contribution(r)),
    );
    let savings_trend = if latest >= average_savings {
        SavingsTrend::OnTrack
    } else {
        SavingsTrend::BelowAverage {
            shortfall: average_savings - latest,
        }
    };

    Some(Trend {
        net_worth_one_year_ago,
        net_worth_growth_pct,
        latest_savings: latest,
        average_savings,
        savings_trend,
    })
}
