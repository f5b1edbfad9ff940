//! Token generation for the `ArgumentTarget` implementation.

use proc_macro2::TokenStream;
use quote::quote;

use super::parse::{BoundField, FieldKind, ParsedInput};

/// Builder chain producing one field's descriptor.
pub(crate) fn descriptor_tokens(field: &BoundField, krate: &TokenStream) -> TokenStream {
    let name = field.ident.to_string();
    let long = &field.long;
    let short = &field.short;
    let default = field
        .default
        .as_ref()
        .map(|value| quote! { .default_value(#value) });
    let example = field.example.as_ref().map(|value| quote! { .example(#value) });
    let description = field
        .description
        .as_ref()
        .map(|value| quote! { .description(#value) });
    let kind = match field.kind {
        FieldKind::Single => None,
        FieldKind::Flag => Some(quote! { .flag() }),
        FieldKind::Positional(index) => Some(quote! { .position(#index) }),
    };
    let required = field.required.then(|| quote! { .required() });
    quote! {
        #krate::Descriptor::builder(#krate::FieldId::of::<Self>(#name), #long, #short)
            #default #example #description #kind #required
            .build()
    }
}

/// Match arm converting `raw` into one field.
pub(crate) fn assign_arm(field: &BoundField, krate: &TokenStream) -> TokenStream {
    let ident = &field.ident;
    let name = ident.to_string();
    quote! {
        #name => {
            self.#ident = #krate::convert(raw, #krate::FieldId::of::<Self>(#name))?;
            ::core::result::Result::Ok(())
        }
    }
}

/// The complete `impl ArgumentTarget` block.
pub(crate) fn target_impl(input: &ParsedInput, krate: &TokenStream) -> TokenStream {
    let ident = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();
    let descriptors = input.fields.iter().map(|field| descriptor_tokens(field, krate));
    let arms = input.fields.iter().map(|field| assign_arm(field, krate));
    let raw = if input.fields.is_empty() {
        quote! { _raw }
    } else {
        quote! { raw }
    };
    quote! {
        impl #impl_generics #krate::ArgumentTarget for #ident #ty_generics #where_clause {
            fn descriptors() -> ::std::vec::Vec<#krate::Descriptor> {
                ::std::vec![#( #descriptors ),*]
            }

            fn assign(&mut self, field: &str, #raw: &str) -> #krate::BindResult<()> {
                match field {
                    #( #arms )*
                    other => ::core::result::Result::Err(#krate::BindError::unknown_field(
                        #krate::ArgumentTarget::target_name(self),
                        other,
                    )),
                }
            }
        }
    }
}
