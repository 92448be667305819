use rust_decimal::Decimal;
use std::str::FromStr;
use crate::types::MizanError;

/// Trait for converting various types into a money `Decimal`.
///
/// This lets callers pass `i32`, `f64`, `&str`, etc. directly into input builders
/// without wrapping them in `dec!()` or `Decimal::from()`. Builders treat a failed
/// conversion as a missing value, so a malformed field stays at zero.
pub trait IntoAmount {
    fn into_amount(self) -> Result<Decimal, MizanError>;
}

impl IntoAmount for Decimal {
    fn into_amount(self) -> Result<Decimal, MizanError> {
        Ok(self)
    }
}

impl IntoAmount for Option<Decimal> {
    fn into_amount(self) -> Result<Decimal, MizanError> {
        Ok(self.unwrap_or_default())
    }
}

macro_rules! impl_into_amount_int {
    ($($t:ty),*) => {
        $(
            impl IntoAmount for $t {
                fn into_amount(self) -> Result<Decimal, MizanError> {
                    Ok(Decimal::from(self))
                }
            }
        )*
    };
}

impl_into_amount_int!(i32, u32, i64, u64, isize, usize);

macro_rules! impl_into_amount_float {
    ($($t:ty),*) => {
        $(
            impl IntoAmount for $t {
                fn into_amount(self) -> Result<Decimal, MizanError> {
                    // Shortest round-trip text keeps 7.9 as 7.9 rather than its binary expansion.
                    Decimal::from_str(&self.to_string())
                        .or_else(|_| Decimal::from_scientific(&format!("{:e}", self)))
                        .map_err(|_| MizanError::invalid_input("amount", self, "not a finite number"))
                }
            }
        )*
    };
}

impl_into_amount_float!(f32, f64);

impl IntoAmount for &str {
    fn into_amount(self) -> Result<Decimal, MizanError> {
        let trimmed = self.trim();
        Decimal::from_str(trimmed)
            .or_else(|_| Decimal::from_scientific(trimmed))
            .map_err(|e| MizanError::invalid_input("amount", self, e.to_string()))
    }
}

impl IntoAmount for String {
    fn into_amount(self) -> Result<Decimal, MizanError> {
        self.as_str().into_amount()
    }
}

/// Converts leniently: anything that fails to convert becomes zero.
pub fn amount_or_zero(value: impl IntoAmount) -> Decimal {
    value.into_amount().unwrap_or_else(|e| {
        tracing::warn!("Ignoring malformed amount, using zero: {}", e);
        Decimal::ZERO
    })
}
