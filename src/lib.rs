//! # Mizan
//!
//! Personal-finance core for an Islamic-finance budgeting calculator.
//!
//! - [`period`]: one month of income, Malaysian statutory deductions (EPF, SOCSO, EIS, PCB),
//!   Zakat on income, emergency-fund coverage and a financial health grade.
//! - [`history`]: a user's saved months folded into net worth, Zakat on wealth,
//!   trends and month-range chart series.
//! - [`settings`]: observable theme and session state.
//!
//! ```rust
//! use mizan::prelude::*;
//! use rust_decimal_macros::dec;
//!
//! let inputs = PeriodInputs::new().income(IncomeDetails::new().basic_salary(5000));
//! let result = compute_period(&inputs);
//! assert_eq!(result.net_salary, dec!(4422.35));
//! ```

pub mod config;
pub mod history;
pub mod inputs;
pub mod macros;
pub mod period;
pub mod prelude;
pub mod settings;
pub mod types;

pub use config::FinanceConfig;
pub use history::aggregator::{aggregate_history, AggregateState};
pub use history::record::MonthlyRecord;
pub use period::calculator::{compute_period, CalculationResult, PeriodInputs};
pub use types::MizanError;
