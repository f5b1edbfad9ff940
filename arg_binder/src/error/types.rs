//! Primary error enum for binding passes.

use std::fmt;

use thiserror::Error;

/// Errors that abort a binding pass.
///
/// Every variant is fatal. Assignments made by steps that completed before
/// the failure (for example the default seeding pass) are not rolled back.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum BindError {
    /// A manual argument received a different number of values than it declares.
    #[error("argument '{name}' expects {expected} value(s) but {supplied} were supplied")]
    ArityMismatch {
        /// Name the argument was invoked with.
        name: String,
        /// Number of values the handler requires.
        expected: usize,
        /// Number of values found after the argument name.
        supplied: usize,
    },

    /// A descriptor group's size does not match the number of supplied values.
    #[error("malformed argument '{name}': expected {expected} value(s), found {supplied}")]
    MalformedArgument {
        /// Name the argument was invoked with.
        name: String,
        /// Number of descriptors sharing the name.
        expected: usize,
        /// Number of values found after the argument name.
        supplied: usize,
    },

    /// The argument name matched neither a descriptor nor a manual handler.
    #[error("unrecognized argument '{name}'")]
    UnrecognizedArgument {
        /// The delimiter-stripped name as it appeared in the input.
        name: String,
    },

    /// One or more required arguments were never supplied.
    #[error("missing required arguments: {}", join(missing))]
    MissingRequiredArguments {
        /// Every required argument left unhandled, in declaration order.
        missing: Vec<MissingArgument>,
    },

    /// Manual argument names duplicate names already claimed by descriptors.
    #[error("manual arguments contain names already in use: {}", names.join(", "))]
    NameCollision {
        /// Every colliding name; long names are listed before short names.
        names: Vec<String>,
    },

    /// `invoke` was called after a successful binding pass.
    #[error("cannot invoke a context more than once")]
    DoubleInvocation,

    /// `invoke` was called before any tokens were parsed.
    #[error("must initialize the context before invoking it")]
    NotInitialized,

    /// A raw value could not be converted to the target field's type.
    #[error("invalid value \"{value}\" for field '{field}': {source}")]
    InvalidValueFormat {
        /// The raw token that failed to convert.
        value: String,
        /// Qualified name of the target field, such as `Settings::port`.
        field: String,
        /// Underlying conversion failure.
        #[source]
        source: ConversionError,
    },

    /// An empty input was supplied where a value is required.
    #[error("'{parameter}' must not be empty")]
    NullArgument {
        /// Name of the offending parameter.
        parameter: &'static str,
    },

    /// A value appeared before any argument name while stray values are rejected.
    #[error("value \"{value}\" appears before any argument name")]
    StrayValue {
        /// The offending raw token.
        value: String,
    },

    /// A descriptor addressed a field the target does not expose.
    #[error("target '{target}' has no bindable field '{field}'")]
    UnknownField {
        /// Type name of the target.
        target: String,
        /// Requested field name.
        field: String,
    },

    /// A registered target was already borrowed when the engine tried to write to it.
    #[error("target '{target}' is borrowed elsewhere and cannot be updated")]
    TargetBorrowed {
        /// Type name of the target.
        target: String,
    },
}

/// Failure converting a raw token into a typed value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("expected {expected}: {reason}")]
pub struct ConversionError {
    /// Human-readable name of the expected type.
    pub expected: &'static str,
    /// Explanation from the underlying parser.
    pub reason: String,
}

impl ConversionError {
    /// Creates a conversion error for `expected` with the given reason.
    #[must_use]
    pub fn new(expected: &'static str, reason: impl Into<String>) -> Self {
        Self {
            expected,
            reason: reason.into(),
        }
    }
}

/// Names of a required argument that was never supplied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingArgument {
    /// Short name of the argument.
    pub short_name: String,
    /// Long name of the argument.
    pub long_name: String,
}

impl fmt::Display for MissingArgument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.short_name, self.long_name)
    }
}

fn join(missing: &[MissingArgument]) -> String {
    missing
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

impl BindError {
    /// Builds an [`BindError::InvalidValueFormat`] for `value` destined for `field`.
    ///
    /// # Examples
    ///
    /// ```
    /// use arg_binder::{BindError, ConversionError};
    ///
    /// let err = BindError::invalid_value("abc", "Settings::port", ConversionError::new("u16", "bad digit"));
    /// assert!(matches!(err, BindError::InvalidValueFormat { .. }));
    /// ```
    #[must_use]
    pub fn invalid_value(
        value: impl Into<String>,
        field: impl Into<String>,
        source: ConversionError,
    ) -> Self {
        Self::InvalidValueFormat {
            value: value.into(),
            field: field.into(),
            source,
        }
    }

    /// Builds an [`BindError::UnknownField`] for `target` and `field`.
    #[must_use]
    pub fn unknown_field(target: impl Into<String>, field: impl Into<String>) -> Self {
        Self::UnknownField {
            target: target.into(),
            field: field.into(),
        }
    }
}
