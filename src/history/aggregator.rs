//! Net worth reconstruction and the aggregate view over a user's history.
//!
//! Users only occasionally enter their absolute savings and gold holdings. Every
//! other month records flows. Net worth is rebuilt from the most recent month that
//! carries an absolute position (the *anchor*) plus every month's flow from the
//! anchor onwards:
//!
//! ```text
//! money = anchor.savings + Σ clean balance (anchor..=latest)
//! gold  = anchor.goldSavings + Σ investment (anchor..=latest)
//! ```
//!
//! All functions here expect records sorted oldest first.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::FinanceConfig;
use crate::history::month::YearMonth;
use crate::history::record::MonthlyRecord;
use crate::history::stats::average_monthly_savings;
use crate::history::trend::{calculate_trend, Trend};
use crate::history::zakat::{assess_wealth_zakat, WealthZakat};

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct NetWorth {
    pub total_money_savings: Decimal,
    pub total_gold_savings: Decimal,
    /// Always `total_money_savings + total_gold_savings`.
    pub net_worth: Decimal,
    /// The month the reconstruction started from; `None` for an empty history.
    pub anchor: Option<YearMonth>,
}

/// Index of the most recent record with an asset snapshot, or the oldest record
/// when none has one.
pub fn anchor_index(records: &[MonthlyRecord]) -> Option<usize> {
    if records.is_empty() {
        return None;
    }
    Some(records.iter().rposition(MonthlyRecord::has_asset_snapshot).unwrap_or(0))
}

pub fn reconstruct_net_worth(records: &[MonthlyRecord]) -> NetWorth {
    let Some(idx) = anchor_index(records) else {
        return NetWorth::default();
    };
    let anchor = &records[idx];

    let (money_flow, gold_flow) = records[idx..]
        .iter()
        .fold((Decimal::ZERO, Decimal::ZERO), |(money, gold), r| {
            (money + r.clean_balance(), gold + r.gold_flow())
        });

    let total_money_savings = anchor.savings_or_zero() + money_flow;
    let total_gold_savings = anchor.gold_savings_or_zero() + gold_flow;

    tracing::debug!(
        anchor = %anchor.period(),
        snapshot = anchor.has_asset_snapshot(),
        months_after_anchor = records.len() - idx - 1,
        %total_money_savings,
        %total_gold_savings,
        "reconstructed net worth"
    );

    NetWorth {
        total_money_savings,
        total_gold_savings,
        net_worth: total_money_savings + total_gold_savings,
        anchor: Some(anchor.period()),
    }
}

/// Net worth using only the records up to and including `target`.
pub fn net_worth_as_of(records: &[MonthlyRecord], target: YearMonth) -> NetWorth {
    let end = records.partition_point(|r| r.period() <= target);
    reconstruct_net_worth(&records[..end])
}

/// Everything the dashboard derives from a full history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct AggregateState {
    pub net_worth: Decimal,
    pub total_money_savings: Decimal,
    pub total_gold_savings: Decimal,
    pub anchor: Option<YearMonth>,
    pub record_count: usize,
    /// Mean clean monthly savings over the whole history.
    pub average_monthly_savings: Decimal,
    pub wealth_zakat: WealthZakat,
    pub trend: Option<Trend>,
}

pub fn aggregate_history(records: &[MonthlyRecord]) -> AggregateState {
    aggregate_history_with(records, &FinanceConfig::default())
}

pub fn aggregate_history_with(records: &[MonthlyRecord], config: &FinanceConfig) -> AggregateState {
    let worth = reconstruct_net_worth(records);
    let wealth_zakat = assess_wealth_zakat(worth.net_worth, records.len(), config);
    let trend = calculate_trend(records, worth.net_worth, config);

    AggregateState {
        net_worth: worth.net_worth,
        total_money_savings: worth.total_money_savings,
        total_gold_savings: worth.total_gold_savings,
        anchor: worth.anchor,
        record_count: records.len(),
        average_monthly_savings: average_monthly_savings(records),
        wealth_zakat,
        trend,
    }
}
