use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::config::FinanceConfig;
use crate::history::aggregator::{aggregate_history_with, AggregateState};
use crate::history::month::YearMonth;
use crate::history::range::{default_range, filter_range, RangeSummary};
use crate::history::record::MonthlyRecord;
use crate::history::store::RecordStore;
use crate::period::calculator::{compute_period_with, PeriodInputs};
use crate::period::expenses::AssetDetails;

/// A user's records together with the aggregate derived from them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct History {
    pub records: Vec<MonthlyRecord>,
    pub aggregate: AggregateState,
}

/// Ties a [`RecordStore`] to the calculators. Every read refetches and
/// re-aggregates; nothing is cached between calls.
pub struct HistoryService<S> {
    store: S,
    config: FinanceConfig,
}

impl<S: RecordStore> HistoryService<S> {
    pub fn new(store: S) -> Self {
        Self::with_config(store, FinanceConfig::default())
    }

    pub fn with_config(store: S, config: FinanceConfig) -> Self {
        Self { store, config }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn config(&self) -> &FinanceConfig {
        &self.config
    }

    async fn sorted_history(&self, user_email: &str) -> Result<Vec<MonthlyRecord>, S::Error> {
        let mut records = self.store.fetch_history(user_email).await?;
        records.sort_by_key(MonthlyRecord::period);
        Ok(records)
    }

    pub async fn load(&self, user_email: &str) -> Result<History, S::Error> {
        let records = self.sorted_history(user_email).await?;
        let aggregate = aggregate_history_with(&records, &self.config);
        Ok(History { records, aggregate })
    }

    /// The user's record for `period`, if any. The first one wins when duplicated.
    pub async fn find_period(&self, user_email: &str, period: YearMonth) -> Result<Option<MonthlyRecord>, S::Error> {
        let records = self.sorted_history(user_email).await?;
        Ok(records.into_iter().find(|r| r.period() == period))
    }

    pub async fn range(&self, user_email: &str, start: YearMonth, end: YearMonth) -> Result<RangeSummary, S::Error> {
        let records = self.sorted_history(user_email).await?;
        Ok(filter_range(&records, start, end))
    }

    /// Range from the user's first month through the later of their last month and `today`.
    /// `None` when the user has no records.
    pub async fn default_range(&self, user_email: &str, today: NaiveDate) -> Result<Option<RangeSummary>, S::Error> {
        let records = self.sorted_history(user_email).await?;
        Ok(default_range(&records, today).map(|range| filter_range(&records, range.start, range.end)))
    }

    /// Computes the month and stores the result.
    pub async fn save(&self, user_email: &str, period: YearMonth, inputs: &PeriodInputs) -> Result<MonthlyRecord, S::Error> {
        let result = compute_period_with(inputs, &self.config);
        let record = MonthlyRecord::from_calculation(user_email, period, inputs, &result);
        self.store.save_record(record).await
    }

    /// Stores an absolute asset position for the month with no flows.
    pub async fn save_assets(&self, user_email: &str, period: YearMonth, assets: &AssetDetails) -> Result<MonthlyRecord, S::Error> {
        let record = MonthlyRecord::asset_snapshot(user_email, period, assets);
        self.store.save_record(record).await
    }

    pub async fn delete(&self, id: i64) -> Result<(), S::Error> {
        self.store.delete_record(id).await
    }
}
