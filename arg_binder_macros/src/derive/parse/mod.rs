//! Parsing of `#[argument(...)]` attributes.

use heck::ToKebabCase;
use syn::meta::ParseNestedMeta;
use syn::parenthesized;
use syn::{Attribute, Data, DeriveInput, Fields, Token};

mod docs;
mod literals;
#[cfg(test)]
mod tests;

use docs::doc_comment;
use literals::{lit_str, lit_text, lit_usize};

/// Struct-level settings.
#[derive(Default, Clone)]
pub(crate) struct StructAttrs {
    /// Overrides the path generated code uses to reach `arg_binder`.
    pub crate_path: Option<syn::Path>,
}

/// Field-level keys recognised inside `#[argument(...)]`.
#[derive(Default, Clone)]
pub(crate) struct FieldAttrs {
    pub long: Option<String>,
    pub short: Option<String>,
    pub default: Option<String>,
    pub example: Option<String>,
    pub description: Option<String>,
    pub position: Option<usize>,
    pub flag: bool,
    pub required: bool,
}

/// How a bound field consumes values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FieldKind {
    Single,
    Flag,
    Positional(usize),
}

/// One field carrying an `#[argument(...)]` attribute, with names resolved.
#[derive(Clone)]
pub(crate) struct BoundField {
    pub ident: syn::Ident,
    pub long: String,
    pub short: String,
    pub default: Option<String>,
    pub example: Option<String>,
    pub description: Option<String>,
    pub kind: FieldKind,
    pub required: bool,
}

/// Everything the generator needs from the derive input.
pub(crate) struct ParsedInput {
    pub ident: syn::Ident,
    pub generics: syn::Generics,
    pub fields: Vec<BoundField>,
    pub crate_path: Option<syn::Path>,
}

/// Iterate all `#[argument(...)]` attributes once and apply a callback.
fn parse_argument_attrs<F>(attrs: &[Attribute], mut f: F) -> syn::Result<bool>
where
    F: FnMut(&ParseNestedMeta) -> syn::Result<()>,
{
    let mut seen = false;
    for attr in attrs.iter().filter(|a| a.path().is_ident("argument")) {
        seen = true;
        if matches!(attr.meta, syn::Meta::Path(_)) {
            continue;
        }
        attr.parse_nested_meta(|meta| f(&meta))?;
    }
    Ok(seen)
}

/// Consumes an unrecognised key-value or list without recording it.
fn discard_unknown(meta: &ParseNestedMeta) -> syn::Result<()> {
    if meta.input.peek(Token![=]) {
        meta.value()?.parse::<proc_macro2::TokenStream>()?;
    } else if meta.input.peek(syn::token::Paren) {
        let content;
        parenthesized!(content in meta.input);
        content.parse::<proc_macro2::TokenStream>()?;
    }
    Ok(())
}

/// Extracts struct-level settings. Unknown keys are ignored.
pub(crate) fn parse_struct_attrs(attrs: &[Attribute]) -> syn::Result<StructAttrs> {
    let mut out = StructAttrs::default();
    parse_argument_attrs(attrs, |meta| {
        if meta.path.is_ident("crate") {
            let s = lit_str(meta, "crate")?;
            let path: syn::Path =
                syn::parse_str(&s.value()).map_err(|e| syn::Error::new(s.span(), e))?;
            out.crate_path = Some(path);
            Ok(())
        } else {
            discard_unknown(meta)
        }
    })?;
    Ok(out)
}

/// Extracts field-level keys, or `None` when the field is not bound.
///
/// Unlike struct attributes, unknown field keys are rejected so typos in
/// names such as `requird` surface at compile time.
pub(crate) fn parse_field_attrs(attrs: &[Attribute]) -> syn::Result<Option<FieldAttrs>> {
    let mut out = FieldAttrs::default();
    let seen = parse_argument_attrs(attrs, |meta| {
        match meta.path.get_ident().map(ToString::to_string).as_deref() {
            Some("long") => out.long = Some(lit_str(meta, "long")?.value()),
            Some("short") => out.short = Some(lit_str(meta, "short")?.value()),
            Some("default") => out.default = Some(lit_text(meta, "default")?),
            Some("example") => out.example = Some(lit_text(meta, "example")?),
            Some("description") => out.description = Some(lit_str(meta, "description")?.value()),
            Some("position") => out.position = Some(lit_usize(meta, "position")?),
            Some("flag") => out.flag = true,
            Some("required") => out.required = true,
            _ => return Err(meta.error("unrecognised argument key")),
        }
        Ok(())
    })?;
    Ok(seen.then_some(out))
}

fn resolve_field(field: &syn::Field, attrs: FieldAttrs) -> syn::Result<BoundField> {
    let Some(ident) = field.ident.clone() else {
        return Err(syn::Error::new_spanned(field, "Arguments requires named fields"));
    };
    let kind = match (attrs.flag, attrs.position) {
        (true, Some(_)) => {
            return Err(syn::Error::new_spanned(
                &ident,
                "`flag` and `position` cannot be combined",
            ));
        }
        (true, None) => FieldKind::Flag,
        (false, Some(index)) => FieldKind::Positional(index),
        (false, None) => FieldKind::Single,
    };
    let long = attrs
        .long
        .unwrap_or_else(|| ident.to_string().trim_start_matches("r#").to_kebab_case());
    if long.is_empty() {
        return Err(syn::Error::new_spanned(&ident, "long name must not be empty"));
    }
    let short = match attrs.short {
        Some(short) if short.is_empty() => {
            return Err(syn::Error::new_spanned(&ident, "short name must not be empty"));
        }
        Some(short) => short,
        None => long.clone(),
    };
    Ok(BoundField {
        description: attrs.description.or_else(|| doc_comment(&field.attrs)),
        ident,
        long,
        short,
        default: attrs.default,
        example: attrs.example,
        kind,
        required: attrs.required,
    })
}

/// Gathers the struct identifier, generics and bound fields in one pass.
pub(crate) fn parse_input(input: &DeriveInput) -> syn::Result<ParsedInput> {
    let struct_attrs = parse_struct_attrs(&input.attrs)?;
    let named = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(named) => &named.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    data.struct_token,
                    "Arguments requires named fields",
                ));
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                &input.ident,
                "Arguments can only be derived for structs",
            ));
        }
    };

    let mut fields = Vec::new();
    for field in named {
        if let Some(attrs) = parse_field_attrs(&field.attrs)? {
            fields.push(resolve_field(field, attrs)?);
        }
    }
    Ok(ParsedInput {
        ident: input.ident.clone(),
        generics: input.generics.clone(),
        fields,
        crate_path: struct_attrs.crate_path,
    })
}
