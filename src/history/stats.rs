//! Summary figures over a record history.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::history::record::MonthlyRecord;

/// Arithmetic mean; zero for an empty input.
pub(crate) fn mean(values: impl IntoIterator<Item = Decimal>) -> Decimal {
    let (sum, count) = values
        .into_iter()
        .fold((Decimal::ZERO, 0u64), |(sum, count), v| (sum + v, count + 1));
    sum.checked_div(Decimal::from(count)).unwrap_or_default()
}

/// Each record's cash left over, oldest first.
pub fn clean_monthly_savings(records: &[MonthlyRecord]) -> Vec<Decimal> {
    records.iter().map(MonthlyRecord::clean_balance).collect()
}

/// Mean monthly savings over the whole history, unrounded.
pub fn average_monthly_savings(records: &[MonthlyRecord]) -> Decimal {
    mean(records.iter().map(MonthlyRecord::clean_balance))
}

/// Mean monthly savings rounded to cents (half away from zero).
pub fn lifetime_average_savings(records: &[MonthlyRecord]) -> Decimal {
    average_monthly_savings(records).round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Income Zakat instalments recorded during `year`.
pub fn income_zakat_for_year(records: &[MonthlyRecord], year: i32) -> Decimal {
    records
        .iter()
        .filter(|r| r.year == year)
        .map(|r| r.zakat_monthly)
        .sum()
}
