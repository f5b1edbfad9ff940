//! Error types produced while parsing and binding command-line arguments.

mod types;

pub use types::{BindError, ConversionError, MissingArgument};

/// Result alias used throughout the crate.
pub type BindResult<T> = Result<T, BindError>;
