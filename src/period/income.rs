use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

crate::amount_fields! {
    /// The seven additive income components of one month.
    #[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, schemars::JsonSchema)]
    #[serde(rename_all = "camelCase", default)]
    pub struct IncomeDetails {
        pub basic_salary,
        pub fixed_allowance,
        pub variable_allowance,
        pub overtime,
        pub bonus,
        pub other_income,
        pub gift,
    }
}

impl IncomeDetails {
    /// Gross monthly income: the exact sum of every component.
    pub fn gross(&self) -> Decimal {
        self.total()
    }
}
