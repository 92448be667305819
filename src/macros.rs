//! Declarative macros for the monthly input structs.
//!
//! Income, expense and asset inputs are all flat bags of money fields that must
//! default to zero, accept loosely-typed values and be summed. `amount_fields!`
//! generates that boilerplate once.

/// Generates a struct of `Decimal` money fields with lenient setters.
///
/// This macro generates:
/// - The struct definition (every field is `rust_decimal::Decimal`)
/// - A `new()` constructor returning the all-zero value
/// - One setter per field, named after the field, accepting any
///   [`IntoAmount`](crate::inputs::IntoAmount); malformed values leave the field at zero
/// - `total()`, the sum of every field
///
/// # Usage
///
/// ```rust,ignore
/// amount_fields! {
///     /// Documentation for the struct
///     #[derive(Debug, Clone, Copy, Default, PartialEq)]
///     pub struct Allowances {
///         pub meal,
///         pub parking,
///     }
/// }
/// ```
#[macro_export]
macro_rules! amount_fields {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $(
                $(#[$field_meta:meta])*
                $field_vis:vis $field:ident
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        $vis struct $name {
            $(
                $(#[$field_meta])*
                $field_vis $field: rust_decimal::Decimal,
            )*
        }

        impl $name {
            /// Creates a new instance with every amount at zero.
            pub fn new() -> Self {
                Self::default()
            }

            $(
                #[doc = concat!("Sets `", stringify!($field), "`; malformed values become zero.")]
                pub fn $field(mut self, val: impl $crate::inputs::IntoAmount) -> Self {
                    self.$field = $crate::inputs::amount_or_zero(val);
                    self
                }
            )*

            /// Sum of every field.
            pub fn total(&self) -> rust_decimal::Decimal {
                rust_decimal::Decimal::ZERO $(+ self.$field)*
            }
        }
    };
}
