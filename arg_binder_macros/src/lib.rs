//! Procedural macros for `arg_binder`.
//!
//! `#[derive(Arguments)]` implements `arg_binder::ArgumentTarget` for a
//! struct with named fields. Every field carrying an `#[argument(...)]`
//! attribute becomes a descriptor; fields without one are left alone.
//!
//! Recognised field keys:
//!
//! - `long = "Name"`: long name; defaults to the field name in kebab-case.
//! - `short = "n"`: short name; defaults to the long name.
//! - `default = ...`: raw default, a string, integer, float or boolean literal.
//! - `example = "..."` and `description = "..."`: help text. The description
//!   falls back to the field's doc comment.
//! - `position = N`: slot `N` of a positional group sharing one name.
//! - `flag`: value-less argument; supplying the name assigns `true`.
//! - `required`: the binding pass fails when the argument is never supplied.
//!
//! The struct-level `#[argument(crate = "path")]` key overrides the path used
//! to reach `arg_binder` from generated code.

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

mod derive;

/// Derive macro for `arg_binder::ArgumentTarget`.
#[proc_macro_derive(Arguments, attributes(argument))]
pub fn derive_arguments(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    derive::expand(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}
