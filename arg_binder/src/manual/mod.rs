//! Runtime-declared arguments handled by callbacks instead of field bindings.

use std::fmt;

use tracing::debug;

use crate::descriptor::Argument;
use crate::error::{BindError, BindResult};
use crate::tree::Tree;

type SuppliedAction = Box<dyn FnMut(&[String])>;
type MissingAction = Box<dyn FnMut()>;

/// An argument whose values are delivered to a callback.
///
/// ```
/// use std::cell::Cell;
/// use std::rc::Rc;
/// use arg_binder::ManualArgument;
///
/// let seen = Rc::new(Cell::new(false));
/// let flag = Rc::clone(&seen);
/// let mut dry_run = ManualArgument::flag("DryRun", "n", move || flag.set(true))
///     .with_description("Print actions without executing them");
/// dry_run.invoke_supplied(&[]).unwrap();
/// assert!(seen.get());
/// ```
pub struct ManualArgument {
    long_name: String,
    short_name: String,
    description: String,
    example_value: String,
    value_count: usize,
    required: bool,
    on_supplied: SuppliedAction,
    on_missing: Option<MissingAction>,
    fired: bool,
    missing_reported: bool,
}

impl ManualArgument {
    /// Creates an argument that requires exactly `value_count` values.
    ///
    /// A count of zero makes it a flag-style argument.
    #[must_use]
    pub fn new<F>(
        long_name: impl Into<String>,
        short_name: impl Into<String>,
        value_count: usize,
        on_supplied: F,
    ) -> Self
    where
        F: FnMut(&[String]) + 'static,
    {
        Self {
            long_name: long_name.into(),
            short_name: short_name.into(),
            description: String::new(),
            example_value: String::new(),
            value_count,
            required: false,
            on_supplied: Box::new(on_supplied),
            on_missing: None,
            fired: false,
            missing_reported: false,
        }
    }

    /// Creates an argument that takes a single value.
    #[must_use]
    pub fn single<F>(long_name: impl Into<String>, short_name: impl Into<String>, mut on_value: F) -> Self
    where
        F: FnMut(&str) + 'static,
    {
        Self::new(long_name, short_name, 1, move |values: &[String]| {
            if let Some(value) = values.first() {
                on_value(value);
            }
        })
    }

    /// Creates a flag whose callback fires when the name is supplied.
    #[must_use]
    pub fn flag<F>(long_name: impl Into<String>, short_name: impl Into<String>, mut on_present: F) -> Self
    where
        F: FnMut() + 'static,
    {
        Self::new(long_name, short_name, 0, move |_: &[String]| on_present()).with_example("false")
    }

    /// Registers a callback run when the argument is absent from the input.
    #[must_use]
    pub fn on_missing<F>(mut self, on_missing: F) -> Self
    where
        F: FnMut() + 'static,
    {
        self.on_missing = Some(Box::new(on_missing));
        self
    }

    /// Sets the description shown in help output.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the example value shown in help output.
    #[must_use]
    pub fn with_example(mut self, example: impl Into<String>) -> Self {
        self.example_value = example.into();
        self
    }

    /// Marks the argument as required.
    #[must_use]
    pub const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Number of values the argument consumes.
    #[must_use]
    pub const fn value_count(&self) -> usize {
        self.value_count
    }

    /// Runs the supplied-callback with `values`.
    ///
    /// # Errors
    ///
    /// Returns [`BindError::ArityMismatch`] when `values` does not hold
    /// exactly [`Self::value_count`] entries.
    pub fn invoke_supplied(&mut self, values: &[String]) -> BindResult<()> {
        let name = self.long_name.clone();
        self.supply(&name, values)
    }

    /// Runs the missing-callback, if one was registered.
    pub fn invoke_missing(&mut self) {
        if let Some(action) = self.on_missing.as_mut() {
            action();
        }
    }

    fn supply(&mut self, invoked_as: &str, values: &[String]) -> BindResult<()> {
        if values.len() != self.value_count {
            return Err(BindError::ArityMismatch {
                name: invoked_as.to_owned(),
                expected: self.value_count,
                supplied: values.len(),
            });
        }
        (self.on_supplied)(values);
        Ok(())
    }
}

impl fmt::Debug for ManualArgument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ManualArgument")
            .field("long_name", &self.long_name)
            .field("short_name", &self.short_name)
            .field("value_count", &self.value_count)
            .field("required", &self.required)
            .field("has_missing_action", &self.on_missing.is_some())
            .field("fired", &self.fired)
            .finish_non_exhaustive()
    }
}

impl Argument for ManualArgument {
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

/// Outcome of reconciling manual arguments against a parsed tree.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
#[must_use]
pub struct ManualPass {
    /// Indices (into the group) of arguments whose supplied-callback ran.
    pub supplied: Vec<usize>,
    /// Indices (into [`Tree::invocations`]) of invocations no handler claimed.
    pub unhandled: Vec<usize>,
}

/// A collection of [`ManualArgument`]s reconciled together.
#[derive(Debug, Default)]
pub struct ManualArgumentGroup {
    arguments: Vec<ManualArgument>,
}

impl ManualArgumentGroup {
    /// Creates an empty group.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `argument` to the group.
    pub fn add(&mut self, argument: ManualArgument) {
        self.arguments.push(argument);
    }

    /// Builder-style [`Self::add`].
    #[must_use]
    pub fn with(mut self, argument: ManualArgument) -> Self {
        self.add(argument);
        self
    }

    /// The arguments in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &ManualArgument> {
        self.arguments.iter()
    }

    /// The argument at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&ManualArgument> {
        self.arguments.get(index)
    }

    /// Number of arguments in the group.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.arguments.len()
    }

    /// Returns `true` when the group holds no arguments.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.arguments.is_empty()
    }

    /// Matches each invocation in `tree` against the group's handlers.
    ///
    /// Each handler fires at most once, on the first invocation naming it;
    /// later invocations of the same name are reported as unhandled. Once
    /// every invocation has been examined, handlers that never matched run
    /// their missing-callback.
    ///
    /// Callbacks fire at most once over the group's lifetime. Invoking the
    /// group again still claims the same invocations and reports the same
    /// supplied handlers, but skips callbacks that already ran.
    ///
    /// # Errors
    ///
    /// Returns [`BindError::ArityMismatch`] as soon as a matched invocation
    /// carries the wrong number of values.
    pub fn invoke(&mut self, tree: &Tree<String>) -> BindResult<ManualPass> {
        let mut pool: Vec<usize> = (0..self.arguments.len()).collect();
        let mut pass = ManualPass::default();

        for (node_index, node) in tree.invocations().iter().enumerate() {
            let name = node.value();
            let matched = pool.iter().position(|&index| {
                self.arguments
                    .get(index)
                    .is_some_and(|argument| argument.answers_to(name))
            });
            let Some(slot) = matched else {
                pass.unhandled.push(node_index);
                continue;
            };
            let index = pool.remove(slot);
            let values: Vec<String> = node.children().iter().map(|c| c.value().clone()).collect();
            if let Some(argument) = self.arguments.get_mut(index) {
                if argument.fired {
                    debug!(argument = %name, "manual argument already fired");
                } else {
                    debug!(argument = %name, values = values.len(), "invoking manual argument");
                    argument.supply(name, &values)?;
                    argument.fired = true;
                }
                pass.supplied.push(index);
            }
        }

        for index in pool {
            if let Some(argument) = self.arguments.get_mut(index)
                && !argument.missing_reported
            {
                argument.invoke_missing();
                argument.missing_reported = true;
            }
        }
        Ok(pass)
    }
}

impl FromIterator<ManualArgument> for ManualArgumentGroup {
    fn from_iter<I: IntoIterator<Item = ManualArgument>>(iter: I) -> Self {
        Self {
            arguments: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests;
