//! Prelude module for Mizan
//!
//! Re-exports the commonly used structs, functions and types.
//!
//! # Usage
//!
//! ```rust
//! use mizan::prelude::*;
//! ```

// Core exports
pub use crate::config::{CappedContribution, FinanceConfig, FinanceConfigBuilder, TaxBracket};
pub use crate::inputs::IntoAmount;
pub use crate::types::{CalculationStep, MizanError, Operation};

// Monthly calculation
pub use crate::period::calculator::{
    compute_health, compute_health_with, compute_period, compute_period_with, CalculationResult, PeriodInputs,
};
pub use crate::period::deductions::{DeductionOverrides, StatutoryDeductions};
pub use crate::period::emergency::{EmergencyFundDetails, EmergencyStatus};
pub use crate::period::expenses::{AssetDetails, ExpenseDetails};
pub use crate::period::health::{FinancialHealth, HealthStatus};
pub use crate::period::income::IncomeDetails;
pub use crate::period::zakat::{ZakatDetails, ZakatStatus};

// History
pub use crate::history::aggregator::{
    aggregate_history, aggregate_history_with, net_worth_as_of, reconstruct_net_worth, AggregateState, NetWorth,
};
pub use crate::history::month::YearMonth;
pub use crate::history::range::{default_range, filter_range, MonthRange, RangeSummary};
pub use crate::history::record::MonthlyRecord;
pub use crate::history::stats::{income_zakat_for_year, lifetime_average_savings};
pub use crate::history::trend::{SavingsTrend, Trend};
pub use crate::history::zakat::{WealthZakat, WealthZakatEligibility};

#[cfg(feature = "async")]
pub use crate::history::service::{History, HistoryService};
#[cfg(feature = "async")]
pub use crate::history::store::{InMemoryRecordStore, RecordStore};

pub use crate::settings::{SettingsStore, Theme, User};
