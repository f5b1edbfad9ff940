//! Literal parsing helpers for derive attributes.

use syn::{Lit, LitStr};

/// Parses a literal from a field attribute using `extractor`.
fn parse_lit<T, F>(meta: &syn::meta::ParseNestedMeta, key: &str, expected: &str, extractor: F) -> syn::Result<T>
where
    F: FnOnce(&Lit) -> Option<syn::Result<T>>,
{
    let literal = meta.value()?.parse::<Lit>()?;
    extractor(&literal)
        .unwrap_or_else(|| Err(syn::Error::new(literal.span(), format!("{key} must be a {expected}"))))
}

/// Parses a string literal.
pub(crate) fn lit_str(meta: &syn::meta::ParseNestedMeta, key: &str) -> syn::Result<LitStr> {
    parse_lit(meta, key, "string", |lit| match lit {
        Lit::Str(s) => Some(Ok(s.clone())),
        _ => None,
    })
}

/// Parses a non-negative integer literal.
pub(crate) fn lit_usize(meta: &syn::meta::ParseNestedMeta, key: &str) -> syn::Result<usize> {
    parse_lit(meta, key, "non-negative integer", |lit| match lit {
        Lit::Int(i) => Some(i.base10_parse::<usize>()),
        _ => None,
    })
}

/// Parses a string, integer, float, boolean or character literal as the raw
/// text the runtime converts.
pub(crate) fn lit_text(meta: &syn::meta::ParseNestedMeta, key: &str) -> syn::Result<String> {
    parse_lit(meta, key, "string, number, boolean or character", |lit| match lit {
        Lit::Str(s) => Some(Ok(s.value())),
        Lit::Int(i) => Some(Ok(i.base10_digits().to_owned())),
        Lit::Float(f) => Some(Ok(f.base10_digits().to_owned())),
        Lit::Bool(b) => Some(Ok(b.value.to_string())),
        Lit::Char(c) => Some(Ok(c.value().to_string())),
        _ => None,
    })
}
