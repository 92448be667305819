//! Month-range series for charts and summaries.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::history::aggregator::{net_worth_as_of, NetWorth};
use crate::history::month::YearMonth;
use crate::history::record::MonthlyRecord;
use crate::history::stats::mean;

/// An inclusive span of months.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct MonthRange {
    pub start: YearMonth,
    pub end: YearMonth,
}

impl MonthRange {
    pub fn new(start: YearMonth, end: YearMonth) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, month: YearMonth) -> bool {
        self.start <= month && month <= self.end
    }

    pub fn months(&self) -> impl Iterator<Item = YearMonth> {
        self.start.through(self.end)
    }
}

/// Oldest recorded month through the later of the latest recorded month and `today`.
/// `None` for an empty history.
pub fn default_range(records: &[MonthlyRecord], today: NaiveDate) -> Option<MonthRange> {
    let start = records.iter().map(MonthlyRecord::period).min()?;
    let latest = records.iter().map(MonthlyRecord::period).max()?;
    Some(MonthRange::new(start, latest.max(YearMonth::from_date(today))))
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct RangeSummary {
    /// One label per month in the range, e.g. `Jan 2024`.
    pub labels: Vec<String>,
    pub income_series: Vec<Decimal>,
    pub expense_series: Vec<Decimal>,
    /// Mean clean savings over the months in range that have a record.
    pub average_savings: Decimal,
    pub months_with_data: usize,
    /// Every record inside the range, duplicates included.
    pub records: Vec<MonthlyRecord>,
    /// Net worth as of the last month of the range.
    pub net_worth: NetWorth,
}

/// Builds the series for `start..=end`. When two records share a month the first
/// one in `records` is charted.
pub fn filter_range(records: &[MonthlyRecord], start: YearMonth, end: YearMonth) -> RangeSummary {
    let range = MonthRange::new(start, end);

    let mut by_month: HashMap<YearMonth, &MonthlyRecord> = HashMap::new();
    for record in records {
        by_month.entry(record.period()).or_insert(record);
    }

    let mut labels = Vec::new();
    let mut income_series = Vec::new();
    let mut expense_series = Vec::new();
    let mut savings = Vec::new();

    for month in range.months() {
        labels.push(month.label());
        match by_month.get(&month) {
            Some(record) => {
                income_series.push(record.total_income);
                expense_series.push(record.total_expenses);
                savings.push(record.clean_balance());
            }
            None => {
                income_series.push(Decimal::ZERO);
                expense_series.push(Decimal::ZERO);
            }
        }
    }

    let months_with_data = savings.len();
    let in_range: Vec<MonthlyRecord> = records
        .iter()
        .filter(|r| range.contains(r.period()))
        .cloned()
        .collect();

    tracing::debug!(
        %start,
        %end,
        months = labels.len(),
        months_with_data,
        "built range series"
    );

    RangeSummary {
        labels,
        income_series,
        expense_series,
        average_savings: mean(savings),
        months_with_data,
        records: in_range,
        net_worth: net_worth_as_of(records, end),
    }
}
