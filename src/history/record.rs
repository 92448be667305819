use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::history::month::YearMonth;
use crate::inputs::{amount_or_zero, IntoAmount};
use crate::period::calculator::{CalculationResult, PeriodInputs};
use crate::period::deductions::DeductionOverrides;
use crate::period::expenses::{AssetDetails, ExpenseDetails};
use crate::period::income::IncomeDetails;

/// One saved month for one user.
///
/// Records arrive from storage that is not always well-formed: missing, `null` or
/// unparsable amounts read as zero, and the three optional amounts read as absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct MonthlyRecord {
    pub id: Option<i64>,
    pub user_email: String,
    pub year: i32,
    pub month: u32,

    #[serde(deserialize_with = "lenient::amount")]
    pub basic_salary: Decimal,
    #[serde(deserialize_with = "lenient::amount")]
    pub fixed_allowance: Decimal,
    #[serde(deserialize_with = "lenient::amount")]
    pub variable_allowance: Decimal,
    #[serde(deserialize_with = "lenient::amount")]
    pub bonus: Decimal,
    #[serde(deserialize_with = "lenient::amount")]
    pub total_income: Decimal,

    #[serde(deserialize_with = "lenient::amount")]
    pub epf: Decimal,
    #[serde(deserialize_with = "lenient::amount")]
    pub pcb: Decimal,
    /// Income Zakat instalment computed for the month.
    #[serde(deserialize_with = "lenient::amount")]
    pub zakat_monthly: Decimal,
    #[serde(deserialize_with = "lenient::amount")]
    pub total_deductions: Decimal,

    #[serde(deserialize_with = "lenient::amount")]
    pub housing: Decimal,
    #[serde(deserialize_with = "lenient::amount")]
    pub transport: Decimal,
    #[serde(deserialize_with = "lenient::amount")]
    pub food: Decimal,
    #[serde(deserialize_with = "lenient::amount")]
    pub investment: Decimal,
    #[serde(deserialize_with = "lenient::amount")]
    pub donation: Decimal,
    #[serde(deserialize_with = "lenient::amount")]
    pub total_expenses: Decimal,

    /// Absolute cash held at month end, if the user entered it.
    #[serde(deserialize_with = "lenient::optional_amount")]
    pub savings: Option<Decimal>,
    /// Absolute gold holdings at month end, if the user entered it.
    #[serde(deserialize_with = "lenient::optional_amount")]
    pub gold_savings: Option<Decimal>,

    #[serde(deserialize_with = "lenient::amount")]
    pub net_salary: Decimal,
    #[serde(deserialize_with = "lenient::optional_amount")]
    pub balance: Option<Decimal>,

    pub created_at: Option<NaiveDateTime>,
}

impl MonthlyRecord {
    pub fn new(user_email: impl Into<String>, period: YearMonth) -> Self {
        Self {
            user_email: user_email.into(),
            year: period.year,
            month: period.month,
            ..Self::default()
        }
    }

    /// Builds the record persisted after a month is computed.
    pub fn from_calculation(
        user_email: impl Into<String>,
        period: YearMonth,
        inputs: &PeriodInputs,
        result: &CalculationResult,
    ) -> Self {
        Self {
            id: None,
            user_email: user_email.into(),
            year: period.year,
            month: period.month,
            basic_salary: inputs.income.basic_salary,
            fixed_allowance: inputs.income.fixed_allowance,
            variable_allowance: inputs.income.variable_allowance,
            bonus: inputs.income.bonus,
            total_income: result.gross_income,
            epf: result.epf,
            pcb: result.pcb,
            zakat_monthly: result.zakat_details.amount_due,
            total_deductions: result.total_deductions,
            housing: inputs.expenses.housing,
            transport: inputs.expenses.transport,
            food: inputs.expenses.food,
            investment: inputs.expenses.investment,
            donation: inputs.expenses.donation,
            total_expenses: result.total_expenses,
            savings: Some(inputs.assets.savings),
            gold_savings: Some(inputs.assets.gold_savings),
            net_salary: result.net_salary,
            balance: Some(result.balance),
            created_at: None,
        }
    }

    /// A month that only carries an absolute asset position (a starting point).
    /// Every flow is zero so it adds nothing on top of the snapshot.
    pub fn asset_snapshot(user_email: impl Into<String>, period: YearMonth, assets: &AssetDetails) -> Self {
        Self {
            savings: Some(assets.savings),
            gold_savings: Some(assets.gold_savings),
            balance: Some(Decimal::ZERO),
            ..Self::new(user_email, period)
        }
    }

    pub fn period(&self) -> YearMonth {
        YearMonth {
            year: self.year,
            month: self.month,
        }
    }

    /// True when the record carries a usable absolute asset position.
    pub fn has_asset_snapshot(&self) -> bool {
        self.savings_or_zero() > Decimal::ZERO || self.gold_savings_or_zero() > Decimal::ZERO
    }

    pub fn savings_or_zero(&self) -> Decimal {
        self.savings.unwrap_or_default()
    }

    pub fn gold_savings_or_zero(&self) -> Decimal {
        self.gold_savings.unwrap_or_default()
    }

    /// Cash left over in the month: the stored balance, or income minus expenses
    /// minus deductions for records saved without one.
    pub fn clean_balance(&self) -> Decimal {
        self.balance
            .unwrap_or(self.total_income - self.total_expenses - self.total_deductions)
    }

    /// Gold bought during the month.
    pub fn gold_flow(&self) -> Decimal {
        self.investment
    }

    pub fn id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }

    pub fn total_income(mut self, val: impl IntoAmount) -> Self {
        self.total_income = amount_or_zero(val);
        self
    }

    pub fn total_expenses(mut self, val: impl IntoAmount) -> Self {
        self.total_expenses = amount_or_zero(val);
        self
    }

    pub fn total_deductions(mut self, val: impl IntoAmount) -> Self {
        self.total_deductions = amount_or_zero(val);
        self
    }

    pub fn zakat_monthly(mut self, val: impl IntoAmount) -> Self {
        self.zakat_monthly = amount_or_zero(val);
        self
    }

    pub fn investment(mut self, val: impl IntoAmount) -> Self {
        self.investment = amount_or_zero(val);
        self
    }

    pub fn balance(mut self, val: impl IntoAmount) -> Self {
        self.balance = val.into_amount().ok();
        self
    }

    pub fn savings(mut self, val: impl IntoAmount) -> Self {
        self.savings = val.into_amount().ok();
        self
    }

    pub fn gold_savings(mut self, val: impl IntoAmount) -> Self {
        self.gold_savings = val.into_amount().ok();
        self
    }
}

impl PeriodInputs {
    /// Re-opens a saved month for editing. The stored PCB, EPF and Zakat become
    /// overrides so recomputing reproduces what was saved.
    pub fn from_record(record: &MonthlyRecord) -> Self {
        Self::from(record)
    }
}

impl From<&MonthlyRecord> for PeriodInputs {
    fn from(record: &MonthlyRecord) -> Self {
        let income = IncomeDetails {
            basic_salary: record.basic_salary,
            fixed_allowance: record.fixed_allowance,
            variable_allowance: record.variable_allowance,
            bonus: record.bonus,
            ..IncomeDetails::default()
        };
        let deductions = DeductionOverrides {
            epf: Some(record.epf),
            pcb: Some(record.pcb),
            zakat: Some(record.zakat_monthly),
            ..DeductionOverrides::default()
        };
        let expenses = ExpenseDetails {
            housing: record.housing,
            transport: record.transport,
            food: record.food,
            investment: record.investment,
            donation: record.donation,
            ..ExpenseDetails::default()
        };
        let assets = AssetDetails {
            savings: record.savings_or_zero(),
            gold_savings: record.gold_savings_or_zero(),
        };

        PeriodInputs {
            income,
            deductions,
            expenses,
            assets,
        }
    }
}

mod lenient {
    use rust_decimal::Decimal;
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    use crate::inputs::IntoAmount;

    pub fn amount<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(optional_amount(deserializer)?.unwrap_or_default())
    }

    pub fn optional_amount<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Option::<Value>::deserialize(deserializer)?;
        Ok(value.as_ref().and_then(to_decimal))
    }

    fn to_decimal(value: &Value) -> Option<Decimal> {
        let parsed = match value {
            Value::Number(n) => n.to_string().as_str().into_amount(),
            Value::String(s) => s.as_str().into_amount(),
            _ => return None,
        };
        match parsed {
            Ok(amount) => Some(amount),
            Err(e) => {
                tracing::warn!(%value, error = %e, "unreadable amount in stored record");
                None
            }
        }
    }
}
