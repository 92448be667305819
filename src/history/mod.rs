//! Saved months and everything derived from a user's full history: net worth,
//! Zakat on wealth, trends and month-range series.

pub mod aggregator;
pub mod month;
pub mod range;
pub mod record;
pub mod stats;
pub mod trend;
pub mod zakat;

#[cfg(feature = "async")]
pub mod service;
#[cfg(feature = "async")]
pub mod store;
