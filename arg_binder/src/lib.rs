//! Binds command-line tokens onto the fields of registered targets.
//!
//! Target types declare their bindable fields with `#[derive(Arguments)]`
//! (see [`ArgumentTarget`]). A [`Context`] parses the raw tokens into a
//! tree of invocations, runs caller-supplied [`ManualArgument`] handlers,
//! then writes the remaining values onto every live target whose type
//! declares the matching field.
//!
//! ```
//! use std::cell::RefCell;
//! use std::rc::Rc;
//! use arg_binder::{Arguments, Catalogue, Context, ManualArgument, ManualArgumentGroup};
//!
//! #[derive(Arguments, Default)]
//! struct Login {
//!     #[argument(long = "Username", short = "u", required)]
//!     username: String,
//! }
//!
//! let login = Rc::new(RefCell::new(Login::default()));
//! let executed = Rc::new(RefCell::new(false));
//! let flag = Rc::clone(&executed);
//!
//! let mut context = Context::new(Catalogue::new().with::<Login>());
//! context.register(&login);
//! let manual = ManualArgumentGroup::new()
//!     .with(ManualArgument::flag("Execute", "e", move || *flag.borrow_mut() = true));
//! context.initialize(["-u", "alice", "-e"], manual)?;
//! context.invoke()?;
//!
//! assert_eq!(login.borrow().username, "alice");
//! assert!(*executed.borrow());
//! # Ok::<(), arg_binder::BindError>(())
//! ```

extern crate self as arg_binder;

pub use arg_binder_macros::Arguments;

mod context;
mod descriptor;
mod discovery;
mod error;
mod instances;
mod manual;
mod options;
pub mod parser;
mod registry;
mod target;
pub mod tree;
mod value;

pub use context::Context;
pub use descriptor::{Argument, ArgumentKind, Descriptor, DescriptorBuilder, FieldId};
pub use discovery::{Catalogue, DescriptorSource, DiscoveryMode};
pub use error::{BindError, BindResult, ConversionError, MissingArgument};
pub use instances::{InstanceRegistry, TargetHandle};
pub use manual::{ManualArgument, ManualArgumentGroup, ManualPass};
pub use options::ContextOptions;
pub use parser::{StrayValuePolicy, TokenParser};
pub use registry::{DescriptorId, DescriptorRegistry};
pub use target::{ArgumentTarget, convert, seed_defaults};
pub use tree::{Tree, TreeNode};
pub use value::FromArgument;
