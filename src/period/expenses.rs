use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

crate::amount_fields! {
    /// The ten monthly expense categories.
    #[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, schemars::JsonSchema)]
    #[serde(rename_all = "camelCase", default)]
    pub struct ExpenseDetails {
        pub housing,
        pub transport,
        pub food,
        /// Gold or other investment purchases; flows into gold savings in the history view.
        pub investment,
        pub donation,
        pub utilities,
        pub telecommunications,
        pub childcare,
        pub insurance,
        pub miscellaneous,
    }
}

impl ExpenseDetails {
    /// Monthly basic needs (Had al-Kifayah) exempted from income Zakat.
    pub fn basic_needs(&self) -> Decimal {
        self.housing + self.food + self.transport + self.utilities
    }

    /// Monthly essentials an emergency fund must cover. Excludes discretionary categories.
    pub fn essentials(&self) -> Decimal {
        self.housing + self.food + self.utilities + self.transport + self.childcare
    }
}

crate::amount_fields! {
    /// Asset snapshot entered by the user: liquid savings and gold holdings.
    #[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, schemars::JsonSchema)]
    #[serde(rename_all = "camelCase", default)]
    pub struct AssetDetails {
        pub savings,
        pub gold_savings,
    }
}

impl AssetDetails {
    /// True when either asset field carries a positive value.
    pub fn is_snapshot(&self) -> bool {
        self.savings > Decimal::ZERO || self.gold_savings > Decimal::ZERO
    }
}
