//! Objects whose fields receive values from descriptors.

use std::any::TypeId;

use crate::descriptor::{Descriptor, FieldId};
use crate::error::{BindError, BindResult};
use crate::value::FromArgument;

/// A type holding one or more fields addressed by descriptors.
///
/// Usually implemented with `#[derive(Arguments)]`; a hand-written
/// implementation looks like this:
///
/// ```
/// use arg_binder::{ArgumentTarget, BindError, BindResult, Descriptor, FieldId, convert};
///
/// #[derive(Default)]
/// struct Settings {
///     port: u16,
/// }
///
/// impl ArgumentTarget for Settings {
///     fn descriptors() -> Vec<Descriptor> {
///         vec![Descriptor::builder(FieldId::of::<Self>("port"), "Port", "p")
///             .default_value("8080")
///             .build()]
///     }
///
///     fn assign(&mut self, field: &str, raw: &str) -> BindResult<()> {
///         match field {
///             "port" => self.port = convert(raw, FieldId::of::<Self>("port"))?,
///             other => return Err(BindError::unknown_field(self.target_name(), other)),
///         }
///         Ok(())
///     }
/// }
///
/// let mut settings = Settings::default();
/// arg_binder::seed_defaults(&mut settings).unwrap();
/// assert_eq!(settings.port, 8080);
/// ```
pub trait ArgumentTarget: 'static {
    /// Descriptors for every bound field of this type.
    fn descriptors() -> Vec<Descriptor>
    where
        Self: Sized;

    /// Converts `raw` and stores it in `field`.
    ///
    /// # Errors
    ///
    /// Returns [`BindError::InvalidValueFormat`] when `raw` does not convert
    /// to the field's type, or [`BindError::UnknownField`] when `field` is
    /// not bindable.
    fn assign(&mut self, field: &str, raw: &str) -> BindResult<()>;

    /// Type identity compared against [`FieldId::owner`].
    fn target_type(&self) -> TypeId {
        TypeId::of::<Self>()
    }

    /// Type name used in diagnostics.
    fn target_name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

/// Converts `raw` for storage in `field`.
///
/// # Errors
///
/// Returns [`BindError::InvalidValueFormat`] naming `raw` and `field` when
/// conversion fails.
pub fn convert<T: FromArgument>(raw: &str, field: FieldId) -> BindResult<T> {
    T::from_argument(raw).map_err(|source| BindError::invalid_value(raw, field.to_string(), source))
}

/// Assigns every descriptor default of `T` to `target`.
///
/// Descriptors without a default leave their field untouched.
///
/// # Errors
///
/// Propagates the first failure from [`ArgumentTarget::assign`].
pub fn seed_defaults<T: ArgumentTarget>(target: &mut T) -> BindResult<()> {
    let owner = target.target_type();
    for descriptor in T::descriptors() {
        if descriptor.field().owner() != owner {
            continue;
        }
        if let Some(default) = descriptor.default_value() {
            target.assign(descriptor.field().field(), default)?;
        }
    }
    Ok(())
}
