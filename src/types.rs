use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The kind of arithmetic a [`CalculationStep`] records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub enum Operation {
    Initial,
    Add,
    Subtract,
    Multiply,
    Compare,
    Rate,
    Result,
    Info,
}

impl Operation {
    fn symbol(self) -> &'static str {
        match self {
            Operation::Add => "+",
            Operation::Subtract => "-",
            Operation::Multiply | Operation::Rate => "x",
            Operation::Result => "=",
            Operation::Compare => "?",
            Operation::Initial | Operation::Info => " ",
        }
    }
}

/// Represents a single step in a calculation.
///
/// Traces let the presentation layer show users how a Zakat figure was reached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CalculationStep {
    /// Human-readable description of what this step does.
    pub description: String,
    /// The value at this step (if applicable).
    pub amount: Option<Decimal>,
    pub operation: Operation,
}

impl CalculationStep {
    fn with(operation: Operation, description: impl Into<String>, amount: Option<Decimal>) -> Self {
        Self {
            description: description.into(),
            amount,
            operation,
        }
    }

    pub fn initial(description: impl Into<String>, amount: Decimal) -> Self {
        Self::with(Operation::Initial, description, Some(amount))
    }

    pub fn add(description: impl Into<String>, amount: Decimal) -> Self {
        Self::with(Operation::Add, description, Some(amount))
    }

    pub fn subtract(description: impl Into<String>, amount: Decimal) -> Self {
        Self::with(Operation::Subtract, description, Some(amount))
    }

    pub fn multiply(description: impl Into<String>, factor: Decimal) -> Self {
        Self::with(Operation::Multiply, description, Some(factor))
    }

    pub fn compare(description: impl Into<String>, amount: Decimal) -> Self {
        Self::with(Operation::Compare, description, Some(amount))
    }

    pub fn rate(description: impl Into<String>, rate: Decimal) -> Self {
        Self::with(Operation::Rate, description, Some(rate))
    }

    pub fn result(description: impl Into<String>, amount: Decimal) -> Self {
        Self::with(Operation::Result, description, Some(amount))
    }

    pub fn info(description: impl Into<String>) -> Self {
        Self::with(Operation::Info, description, None)
    }
}

/// Renders a trace as an aligned, human-readable table.
pub fn explain_trace(title: &str, trace: &[CalculationStep]) -> String {
    use std::fmt::Write;
    let mut output = String::new();

    let width = trace
        .iter()
        .map(|step| step.description.len())
        .max()
        .unwrap_or(20)
        .max(20);

    // Writing into a String cannot fail.
    let _ = writeln!(&mut output, "{}", title);
    let _ = writeln!(&mut output, "{:-<50}", "");
    for step in trace {
        match (step.operation, step.amount) {
            (Operation::Info, _) | (_, None) => {
                let _ = writeln!(&mut output, "  INFO: {}", step.description);
            }
            (Operation::Rate, Some(rate)) => {
                let _ = writeln!(
                    &mut output,
                    "  {:<width$} : {} {:>12.3}",
                    step.description,
                    step.operation.symbol(),
                    rate,
                    width = width
                );
            }
            (op, Some(amount)) => {
                let _ = writeln!(
                    &mut output,
                    "  {:<width$} : {} {:>12.2}",
                    step.description,
                    op.symbol(),
                    amount,
                    width = width
                );
            }
        }
    }
    let _ = writeln!(&mut output, "{:-<50}", "");
    output
}

/// Unified error type for the crate.
///
/// Calculations never fail; errors come from configuration, strict parsing and the
/// bundled in-memory record store.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MizanError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Invalid input for '{field}' ({value}): {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Record not found: {0}")]
    RecordNotFound(i64),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl MizanError {
    pub fn invalid_input(field: &str, value: impl ToString, reason: impl Into<String>) -> Self {
        MizanError::InvalidInput {
            field: field.to_string(),
            value: value.to_string(),
            reason: reason.into(),
        }
    }
}

impl From<serde_json::Error> for MizanError {
    fn from(e: serde_json::Error) -> Self {
        MizanError::Serialization(e.to_string())
    }
}
