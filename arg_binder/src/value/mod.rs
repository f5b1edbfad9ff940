//! Conversion of raw argument strings into typed field values.

use std::path::PathBuf;

use crate::error::ConversionError;

/// Types that can be parsed from a single raw argument value.
///
/// ```
/// use arg_binder::FromArgument;
///
/// assert_eq!(i32::from_argument("-12"), Ok(-12));
/// assert_eq!(bool::from_argument("True"), Ok(true));
/// assert!(u8::from_argument("300").is_err());
/// ```
pub trait FromArgument: Sized {
    /// Parses `raw`.
    ///
    /// # Errors
    ///
    /// Returns a [`ConversionError`] describing why `raw` is not a valid
    /// value of this type.
    fn from_argument(raw: &str) -> Result<Self, ConversionError>;
}

impl FromArgument for String {
    fn from_argument(raw: &str) -> Result<Self, ConversionError> {
        Ok(raw.to_owned())
    }
}

impl FromArgument for PathBuf {
    fn from_argument(raw: &str) -> Result<Self, ConversionError> {
        Ok(Self::from(raw))
    }
}

/// Accepts `true` and `false` in any letter case.
impl FromArgument for bool {
    fn from_argument(raw: &str) -> Result<Self, ConversionError> {
        let trimmed = raw.trim();
        if trimmed.eq_ignore_ascii_case("true") {
            Ok(true)
        } else if trimmed.eq_ignore_ascii_case("false") {
            Ok(false)
        } else {
            Err(ConversionError::new(
                "bool",
                format!("'{raw}' is neither true nor false"),
            ))
        }
    }
}

impl FromArgument for char {
    fn from_argument(raw: &str) -> Result<Self, ConversionError> {
        raw.parse()
            .map_err(|err: std::char::ParseCharError| ConversionError::new("char", err.to_string()))
    }
}

/// An empty string converts to `None`.
impl<T: FromArgument> FromArgument for Option<T> {
    fn from_argument(raw: &str) -> Result<Self, ConversionError> {
        if raw.is_empty() {
            Ok(None)
        } else {
            T::from_argument(raw).map(Some)
        }
    }
}

macro_rules! from_str_argument {
    ($($ty:ty),* $(,)?) => {
        $(
            impl FromArgument for $ty {
                fn from_argument(raw: &str) -> Result<Self, ConversionError> {
                    raw.trim()
                        .parse::<$ty>()
                        .map_err(|err| ConversionError::new(stringify!($ty), err.to_string()))
                }
            }
        )*
    };
}

from_str_argument!(
    i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64,
);

#[cfg(test)]
mod tests;
