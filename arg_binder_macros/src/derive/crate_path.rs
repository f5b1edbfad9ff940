//! Path used by generated code to reach the runtime crate.

use proc_macro2::TokenStream;
use quote::quote;

/// Resolves the `#[argument(crate = "...")]` override, defaulting to
/// `::arg_binder`.
pub(crate) fn resolve(crate_path: Option<&syn::Path>) -> TokenStream {
    crate_path.map_or_else(|| quote! { ::arg_binder }, |path| quote! { #path })
}
