//! Static declarations of argument slots bound to target fields.

use std::any::TypeId;
use std::fmt;

/// Shared surface of every argument the engine knows about.
///
/// Implemented by [`Descriptor`] and [`crate::ManualArgument`]; help renderers
/// consume it through [`crate::Context::arguments`].
pub trait Argument {
    /// The long name, for example `TimeoutLength`.
    fn long_name(&self) -> &str;
    /// The short name, for example `t`.
    fn short_name(&self) -> &str;
    /// A brief description of what the argument controls.
    fn description(&self) -> &str;
    /// An example of a valid value.
    fn example_value(&self) -> &str;
    /// Whether the binding pass fails when the argument is never supplied.
    fn is_required(&self) -> bool;

    /// Returns `true` when `name` equals the long or short name.
    fn answers_to(&self, name: &str) -> bool {
        self.long_name() == name || self.short_name() == name
    }
}

/// How a descriptor consumes the values following its name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArgumentKind {
    /// Takes no value; supplying the name sets the field to `true`.
    Flag,
    /// Takes exactly one value.
    Single,
    /// The zero-indexed slot within a group of descriptors sharing a name.
    ///
    /// Given `-point 1 2 3`, three descriptors named `point` at positions
    /// 0, 1 and 2 receive `1`, `2` and `3` respectively.
    Positional(usize),
}

impl ArgumentKind {
    /// Ordering key within a descriptor group; flags sort first.
    #[must_use]
    pub fn sort_key(self) -> i128 {
        match self {
            Self::Flag => -1,
            Self::Single => 0,
            Self::Positional(index) => i128::try_from(index).unwrap_or(i128::MAX),
        }
    }
}

/// Identifies the field a descriptor writes to.
///
/// A bound target declares a descriptor's field when the target's concrete
/// type is the field's owner.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct FieldId {
    owner: TypeId,
    owner_name: &'static str,
    field: &'static str,
}

impl FieldId {
    /// Identifies `field` on the type `T`.
    #[must_use]
    pub fn of<T: ?Sized + 'static>(field: &'static str) -> Self {
        Self {
            owner: TypeId::of::<T>(),
            owner_name: std::any::type_name::<T>(),
            field,
        }
    }

    /// Type identity of the owning type.
    #[must_use]
    pub const fn owner(&self) -> TypeId {
        self.owner
    }

    /// Fully qualified name of the owning type.
    #[must_use]
    pub const fn owner_name(&self) -> &'static str {
        self.owner_name
    }

    /// Field name on the owning type.
    #[must_use]
    pub const fn field(&self) -> &'static str {
        self.field
    }
}

impl fmt::Debug for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FieldId({self})")
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let short_owner = self.owner_name.rsplit("::").next().unwrap_or(self.owner_name);
        write!(f, "{short_owner}::{}", self.field)
    }
}

/// Declaration of one argument slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Descriptor {
    field: FieldId,
    long_name: String,
    short_name: String,
    default_value: Option<String>,
    example_value: String,
    description: String,
    kind: ArgumentKind,
    required: bool,
}

impl Descriptor {
    /// Starts a descriptor for `field` exposed as `long_name` and `short_name`.
    ///
    /// # Examples
    ///
    /// ```
    /// use arg_binder::{ArgumentKind, Descriptor, FieldId};
    ///
    /// struct Settings { port: u16 }
    ///
    /// let descriptor = Descriptor::builder(FieldId::of::<Settings>("port"), "Port", "p")
    ///     .default_value("8080")
    ///     .example("443")
    ///     .build();
    /// assert_eq!(descriptor.kind(), ArgumentKind::Single);
    /// ```
    #[must_use]
    pub fn builder(
        field: FieldId,
        long_name: impl Into<String>,
        short_name: impl Into<String>,
    ) -> DescriptorBuilder {
        DescriptorBuilder {
            inner: Self {
                field,
                long_name: long_name.into(),
                short_name: short_name.into(),
                default_value: None,
                example_value: String::new(),
                description: String::new(),
                kind: ArgumentKind::Single,
                required: false,
            },
        }
    }

    /// The field this descriptor writes.
    #[must_use]
    pub const fn field(&self) -> FieldId {
        self.field
    }

    /// The raw default assigned before any input is applied.
    #[must_use]
    pub fn default_value(&self) -> Option<&str> {
        self.default_value.as_deref()
    }

    /// How the descriptor consumes values.
    #[must_use]
    pub const fn kind(&self) -> ArgumentKind {
        self.kind
    }
}

impl Argument for Descriptor {
    fn long_name(&self) -> &str {
        &self.long_name
    }

    fn short_name(&self) -> &str {
        &self.short_name
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn example_value(&self) -> &str {
        &self.example_value
    }

    fn is_required(&self) -> bool {
        self.required
    }
}

/// Builder for [`Descriptor`].
#[derive(Debug, Clone)]
#[must_use]
pub struct DescriptorBuilder {
    inner: Descriptor,
}

impl DescriptorBuilder {
    /// Sets the raw default value, parsed like any supplied value.
    pub fn default_value(mut self, value: impl Into<String>) -> Self {
        self.inner.default_value = Some(value.into());
        self
    }

    /// Sets the example value shown in help output.
    pub fn example(mut self, value: impl Into<String>) -> Self {
        self.inner.example_value = value.into();
        self
    }

    /// Sets the description shown in help output.
    pub fn description(mut self, value: impl Into<String>) -> Self {
        self.inner.description = value.into();
        self
    }

    /// Sets the value-consumption kind.
    pub const fn kind(mut self, kind: ArgumentKind) -> Self {
        self.inner.kind = kind;
        self
    }

    /// Marks the descriptor as a value-less flag.
    pub const fn flag(self) -> Self {
        self.kind(ArgumentKind::Flag)
    }

    /// Marks the descriptor as slot `index` of a positional group.
    pub const fn position(self, index: usize) -> Self {
        self.kind(ArgumentKind::Positional(index))
    }

    /// Marks the descriptor as required.
    pub const fn required(mut self) -> Self {
        self.inner.required = true;
        self
    }

    /// Finishes the descriptor.
    #[must_use]
    pub fn build(self) -> Descriptor {
        self.inner
    }
}
