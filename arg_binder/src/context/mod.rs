//! The binding engine.
//!
//! A [`Context`] parses tokens with [`Context::initialize`] and reconciles
//! them against descriptors and manual arguments with [`Context::invoke`].
//! A context performs exactly one successful binding pass; create another
//! context for an independent parse.
//!
//! Targets reach the pass either through the context's weak registry
//! ([`Context::register`]) or as an explicit list ([`Context::invoke_on`]).
//! Contexts hold [`Rc`] handles and are confined to a single thread.
//!
//! ```
//! use std::cell::RefCell;
//! use std::rc::Rc;
//! use arg_binder::{Arguments, Catalogue, Context, ManualArgumentGroup};
//!
//! #[derive(Arguments, Default)]
//! struct Server {
//!     #[argument(long = "Port", short = "p", default = "8080")]
//!     port: u16,
//!     #[argument(long = "Verbose", short = "v", flag, default = "false")]
//!     verbose: bool,
//! }
//!
//! let server = Rc::new(RefCell::new(Server::default()));
//! let mut context = Context::new(Catalogue::new().with::<Server>());
//! context.register(&server);
//! context.initialize(["-v"], ManualArgumentGroup::new())?;
//! context.invoke()?;
//!
//! assert_eq!(server.borrow().port, 8080);
//! assert!(server.borrow().verbose);
//! # Ok::<(), arg_binder::BindError>(())
//! ```

use std::any::TypeId;
use std::cell::RefCell;
use std::collections::HashSet;
use std::fmt;
use std::rc::{Rc, Weak};

use tracing::{debug, trace};

use crate::descriptor::{Argument, ArgumentKind, Descriptor};
use crate::discovery::{DescriptorSource, DiscoveryMode};
use crate::error::{BindError, BindResult, MissingArgument};
use crate::instances::{InstanceRegistry, TargetHandle};
use crate::manual::{ManualArgumentGroup, ManualPass};
use crate::options::ContextOptions;
use crate::parser::TokenParser;
use crate::registry::{DescriptorId, DescriptorRegistry};
use crate::target::ArgumentTarget;
use crate::tree::{Tree, TreeNode};

/// Boolean representation assigned to a supplied flag.
const FLAG_PRESENT: &str = "true";

/// Reported when an explicitly supplied target is borrowed before its type is known.
const UNNAMED_TARGET: &str = "<explicit target>";

type LiveTargets = [(TypeId, TargetHandle)];

/// Parses tokens and binds them onto registered targets.
pub struct Context {
    options: ContextOptions,
    source: Box<dyn DescriptorSource>,
    instances: InstanceRegistry,
    registry: DescriptorRegistry,
    manual: ManualArgumentGroup,
    parsed: Option<Tree<String>>,
    invoked: bool,
}

impl Context {
    /// Creates a context with default [`ContextOptions`].
    #[must_use]
    pub fn new(source: impl DescriptorSource + 'static) -> Self {
        Self::with_options(source, ContextOptions::default())
    }

    /// Creates a context with explicit options.
    #[must_use]
    pub fn with_options(source: impl DescriptorSource + 'static, options: ContextOptions) -> Self {
        Self {
            options,
            source: Box::new(source),
            instances: InstanceRegistry::new(),
            registry: DescriptorRegistry::new(),
            manual: ManualArgumentGroup::new(),
            parsed: None,
            invoked: false,
        }
    }

    /// The options this context was created with.
    #[must_use]
    pub const fn options(&self) -> &ContextOptions {
        &self.options
    }

    /// Returns `true` once tokens have been parsed and not yet consumed.
    #[must_use]
    pub const fn is_initialized(&self) -> bool {
        self.parsed.is_some()
    }

    /// Returns `true` after a successful binding pass.
    #[must_use]
    pub const fn is_invoked(&self) -> bool {
        self.invoked
    }

    /// Tracks `target` so the binding pass updates it.
    ///
    /// The context holds only a weak reference: dropping every caller-held
    /// [`Rc`] removes the target from subsequent passes.
    pub fn register<T: ArgumentTarget>(&mut self, target: &Rc<RefCell<T>>) {
        self.instances.register(target);
    }

    /// Tracks an already-downgraded target; a dead handle is ignored.
    pub fn register_weak<T: ArgumentTarget>(&mut self, target: Weak<RefCell<T>>) {
        self.instances.register_weak(target);
    }

    /// Parses `tokens` using the configured delimiters and help token.
    ///
    /// Returns `true` when the help token was present.
    ///
    /// # Errors
    ///
    /// See [`Context::initialize_with`].
    pub fn initialize<I, S>(&mut self, tokens: I, manual: ManualArgumentGroup) -> BindResult<bool>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let delimiters = self.options.delimiter_list().to_vec();
        let help_token = self.options.help().map(str::to_owned);
        self.initialize_with(tokens, delimiters.as_slice(), help_token.as_deref(), manual)
    }

    /// Parses `tokens` with explicit delimiters and help token.
    ///
    /// Every token equal to a delimiter followed by `help_token` is removed
    /// before parsing, so a help request never surfaces as an unrecognised
    /// argument. No binding happens here.
    ///
    /// Returns `true` when at least one help token was removed.
    ///
    /// # Errors
    ///
    /// Returns [`BindError::NullArgument`] for an empty delimiter or an empty
    /// help token, and [`BindError::StrayValue`] when a value precedes every
    /// argument name under [`crate::StrayValuePolicy::Reject`].
    pub fn initialize_with<I, S, D>(
        &mut self,
        tokens: I,
        delimiters: &[D],
        help_token: Option<&str>,
        manual: ManualArgumentGroup,
    ) -> BindResult<bool>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
        D: AsRef<str>,
    {
        if delimiters.iter().any(|delimiter| delimiter.as_ref().is_empty()) {
            return Err(BindError::NullArgument {
                parameter: "delimiters",
            });
        }
        if help_token.is_some_and(str::is_empty) {
            return Err(BindError::NullArgument {
                parameter: "help_token",
            });
        }

        let help_forms: Vec<String> = help_token
            .map(|help| {
                delimiters
                    .iter()
                    .map(|delimiter| format!("{}{help}", delimiter.as_ref()))
                    .collect()
            })
            .unwrap_or_default();
        let mut remaining: Vec<String> = tokens.into_iter().map(Into::into).collect();
        let supplied = remaining.len();
        remaining.retain(|token| !help_forms.contains(token));
        let help_requested = remaining.len() != supplied;

        let tree = TokenParser::new(self.options.label(), delimiters)
            .stray_values(self.options.stray_value_policy())
            .parse(remaining)?;

        debug!(
            help_requested,
            invocations = tree.invocations().len(),
            manual = manual.len(),
            "initialized argument context"
        );
        self.parsed = Some(tree);
        self.manual = manual;
        Ok(help_requested)
    }

    /// Runs the binding pass using the configured discovery mode.
    ///
    /// # Errors
    ///
    /// See [`Context::invoke_with_mode`].
    pub fn invoke(&mut self) -> BindResult<()> {
        self.invoke_with_mode(self.options.discovery_mode())
    }

    /// Runs the binding pass.
    ///
    /// In order: discovers descriptors for `mode`, rejects manual arguments
    /// whose names collide with descriptors, assigns every descriptor default,
    /// runs manual handlers, binds the remaining invocations to descriptors
    /// and finally checks that every required argument was supplied.
    ///
    /// A failure leaves earlier assignments in place.
    ///
    /// # Errors
    ///
    /// Returns [`BindError::DoubleInvocation`] after a successful pass,
    /// [`BindError::NotInitialized`] before [`Context::initialize`], and any
    /// of [`BindError::NameCollision`], [`BindError::ArityMismatch`],
    /// [`BindError::UnrecognizedArgument`], [`BindError::MalformedArgument`],
    /// [`BindError::InvalidValueFormat`] or
    /// [`BindError::MissingRequiredArguments`] raised by the pass itself.
    pub fn invoke_with_mode(&mut self, mode: DiscoveryMode) -> BindResult<()> {
        self.ensure_invocable()?;
        let targets = self.instances.live_entries();
        self.run(mode, &targets)
    }

    /// Runs the binding pass against `targets` instead of the registered
    /// targets, using the configured discovery mode.
    ///
    /// Registered targets are ignored for this pass; under
    /// [`DiscoveryMode::RegisteredTypesOnly`] discovery is limited to the
    /// types present in `targets`.
    ///
    /// # Errors
    ///
    /// As [`Context::invoke_with_mode`], plus [`BindError::TargetBorrowed`]
    /// when a target in `targets` is already mutably borrowed.
    pub fn invoke_on(&mut self, targets: &[TargetHandle]) -> BindResult<()> {
        self.ensure_invocable()?;
        let entries = targets
            .iter()
            .map(|target| -> BindResult<(TypeId, TargetHandle)> {
                let type_id = target
                    .try_borrow()
                    .map_err(|_| BindError::TargetBorrowed {
                        target: UNNAMED_TARGET.to_owned(),
                    })?
                    .target_type();
                Ok((type_id, Rc::clone(target)))
            })
            .collect::<BindResult<Vec<_>>>()?;
        self.run(self.options.discovery_mode(), &entries)
    }

    fn ensure_invocable(&self) -> BindResult<()> {
        if self.invoked {
            Err(BindError::DoubleInvocation)
        } else if self.parsed.is_none() {
            Err(BindError::NotInitialized)
        } else {
            Ok(())
        }
    }

    fn run(&mut self, mode: DiscoveryMode, targets: &LiveTargets) -> BindResult<()> {
        let tree = self.parsed.take().ok_or(BindError::NotInitialized)?;
        if let Err(err) = self.bind(&tree, mode, targets) {
            self.parsed = Some(tree);
            return Err(err);
        }
        self.invoked = true;
        Ok(())
    }

    /// Every descriptor and manual argument in scope, for help output.
    ///
    /// Before the binding pass this rediscovers descriptors using the
    /// configured mode and the currently live targets.
    pub fn arguments(&mut self) -> Vec<&dyn Argument> {
        if !self.invoked {
            let types = self.instances.live_types();
            self.discover(self.options.discovery_mode(), &types);
        }
        self.registry
            .all_values()
            .map(|(_, descriptor)| descriptor as &dyn Argument)
            .chain(self.manual.iter().map(|argument| argument as &dyn Argument))
            .collect()
    }

    /// Descriptors discovered for the most recent pass.
    #[must_use]
    pub const fn descriptors(&self) -> &DescriptorRegistry {
        &self.registry
    }

    fn discover(&mut self, mode: DiscoveryMode, types: &[TypeId]) {
        self.registry = self.source.discover(mode, types);
    }

    fn bind(
        &mut self,
        tree: &Tree<String>,
        mode: DiscoveryMode,
        targets: &LiveTargets,
    ) -> BindResult<()> {
        let mut types: Vec<TypeId> = Vec::new();
        for (type_id, _) in targets {
            if !types.contains(type_id) {
                types.push(*type_id);
            }
        }
        self.discover(mode, &types);
        self.check_collisions()?;
        self.seed_defaults(targets)?;

        let pass = self.manual.invoke(tree)?;
        let mut handled = HashSet::new();
        for index in &pass.unhandled {
            if let Some(node) = tree.invocations().get(*index) {
                self.bind_invocation(node, targets, &mut handled)?;
            }
        }
        self.check_required(&handled, &pass)
    }

    fn check_collisions(&self) -> BindResult<()> {
        let long_names = self.manual.iter().map(|argument| argument.long_name());
        let short_names = self
            .manual
            .iter()
            .filter(|argument| argument.short_name() != argument.long_name())
            .map(|argument| argument.short_name());
        let names: Vec<String> = long_names
            .chain(short_names)
            .filter(|name| self.registry.contains_key(name))
            .map(str::to_owned)
            .collect();
        if names.is_empty() {
            Ok(())
        } else {
            Err(BindError::NameCollision { names })
        }
    }

    fn seed_defaults(&self, targets: &LiveTargets) -> BindResult<()> {
        for (_, descriptor) in self.registry.all_values() {
            if let Some(default) = descriptor.default_value() {
                trace!(field = %descriptor.field(), default, "seeding default");
                write_field(descriptor, default, targets)?;
            }
        }
        Ok(())
    }

    fn bind_invocation(
        &self,
        node: &TreeNode<String>,
        targets: &LiveTargets,
        handled: &mut HashSet<DescriptorId>,
    ) -> BindResult<()> {
        let name = node.value();
        let group = self
            .registry
            .lookup(name)
            .ok_or_else(|| BindError::UnrecognizedArgument { name: name.clone() })?;
        let values = node.children();

        if let [(id, descriptor)] = group.as_slice()
            && descriptor.kind() == ArgumentKind::Flag
            && values.is_empty()
        {
            write_field(descriptor, FLAG_PRESENT, targets)?;
            handled.insert(*id);
            return Ok(());
        }

        if group.len() != values.len() {
            return Err(BindError::MalformedArgument {
                name: name.clone(),
                expected: group.len(),
                supplied: values.len(),
            });
        }
        for ((id, descriptor), value) in group.iter().zip(values) {
            write_field(descriptor, value.value(), targets)?;
            handled.insert(*id);
        }
        Ok(())
    }

    fn check_required(&self, handled: &HashSet<DescriptorId>, pass: &ManualPass) -> BindResult<()> {
        let descriptors = self
            .registry
            .all_values()
            .filter(|(id, descriptor)| descriptor.is_required() && !handled.contains(id))
            .map(|(_, descriptor)| descriptor as &dyn Argument);
        let manual = self
            .manual
            .iter()
            .enumerate()
            .filter(|(index, argument)| argument.is_required() && !pass.supplied.contains(index))
            .map(|(_, argument)| argument as &dyn Argument);
        let missing: Vec<MissingArgument> = descriptors
            .chain(manual)
            .map(|argument| MissingArgument {
                short_name: argument.short_name().to_owned(),
                long_name: argument.long_name().to_owned(),
            })
            .collect();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(BindError::MissingRequiredArguments { missing })
        }
    }
}

/// Writes `raw` to the descriptor's field on every target of the owning type.
fn write_field(descriptor: &Descriptor, raw: &str, targets: &LiveTargets) -> BindResult<()> {
    let field = descriptor.field();
    for (type_id, target) in targets {
        if *type_id != field.owner() {
            continue;
        }
        let mut borrowed = target.try_borrow_mut().map_err(|_| BindError::TargetBorrowed {
            target: field.owner_name().to_owned(),
        })?;
        borrowed.assign(field.field(), raw)?;
        debug!(field = %field, value = raw, "assigned argument value");
    }
    Ok(())
}

impl fmt::Debug for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Context")
            .field("options", &self.options)
            .field("registry", &self.registry)
            .field("manual", &self.manual)
            .field("parsed", &self.parsed)
            .field("invoked", &self.invoked)
            .finish_non_exhaustive()
    }
}
