//! One month of income, deductions, expenses and assets, and everything derived from it.

pub mod calculator;
pub mod deductions;
pub mod emergency;
pub mod expenses;
pub mod health;
pub mod income;
pub mod zakat;
