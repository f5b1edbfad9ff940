//! Expansion of `#[derive(Arguments)]`.

use proc_macro2::TokenStream;
use syn::DeriveInput;

mod crate_path;
mod generate;
mod parse;

/// Parses `input` and renders the `ArgumentTarget` implementation.
pub(crate) fn expand(input: &DeriveInput) -> syn::Result<TokenStream> {
    let parsed = parse::parse_input(input)?;
    let krate = crate_path::resolve(parsed.crate_path.as_ref());
    Ok(generate::target_impl(&parsed, &krate))
}
