//! Tests for `#[argument(...)]` parsing behaviour.

use anyhow::{Result, anyhow, ensure};
use rstest::rstest;
use syn::{DeriveInput, parse_quote};

use super::{FieldKind, parse_input};

#[rstest]
fn names_default_to_kebab_case_field_name() -> Result<()> {
    let input: DeriveInput = parse_quote! {
        struct Demo {
            #[argument]
            timeout_length: u32,
        }
    };
    let parsed = parse_input(&input).map_err(|err| anyhow!(err))?;
    let field = parsed
        .fields
        .first()
        .ok_or_else(|| anyhow!("missing field"))?;
    ensure!(field.long == "timeout-length", "long: {}", field.long);
    ensure!(field.short == field.long, "short: {}", field.short);
    ensure!(field.kind == FieldKind::Single, "kind: {:?}", field.kind);
    Ok(())
}

#[rstest]
fn unannotated_fields_are_skipped() -> Result<()> {
    let input: DeriveInput = parse_quote! {
        struct Demo {
            #[argument(long = "Host", short = "h", default = "localhost")]
            host: String,
            cache: Vec<u8>,
        }
    };
    let parsed = parse_input(&input).map_err(|err| anyhow!(err))?;
    ensure!(parsed.fields.len() == 1, "fields: {}", parsed.fields.len());
    let field = parsed
        .fields
        .first()
        .ok_or_else(|| anyhow!("missing field"))?;
    ensure!(
        field.default.as_deref() == Some("localhost"),
        "default: {:?}",
        field.default
    );
    Ok(())
}

#[rstest]
#[case::bool(parse_quote! { struct D { #[argument(default = true)] f: bool } }, "true")]
#[case::float(parse_quote! { struct D { #[argument(default = 1.5)] f: f64 } }, "1.5")]
#[case::char(parse_quote! { struct D { #[argument(default = 'x')] f: char } }, "x")]
fn default_accepts_non_string_literals(#[case] input: DeriveInput, #[case] expected: &str) -> Result<()> {
    let parsed = parse_input(&input).map_err(|err| anyhow!(err))?;
    let default = parsed
        .fields
        .first()
        .and_then(|field| field.default.clone())
        .ok_or_else(|| anyhow!("missing default"))?;
    ensure!(default == expected, "default: {default}");
    Ok(())
}

#[rstest]
#[case::flag_and_position(
    parse_quote! { struct D { #[argument(flag, position = 1)] f: bool } },
    "`flag` and `position` cannot be combined"
)]
#[case::unknown_key(
    parse_quote! { struct D { #[argument(requird)] f: bool } },
    "unrecognised argument key"
)]
#[case::string_position(
    parse_quote! { struct D { #[argument(position = "1")] f: u8 } },
    "position must be a non-negative integer"
)]
#[case::empty_short(
    parse_quote! { struct D { #[argument(short = "")] f: u8 } },
    "short name must not be empty"
)]
#[case::tuple_struct(parse_quote! { struct D(u8); }, "Arguments requires named fields")]
#[case::enum_input(parse_quote! { enum D { A } }, "Arguments can only be derived for structs")]
fn invalid_input_is_rejected(#[case] input: DeriveInput, #[case] message: &str) -> Result<()> {
    let Err(err) = parse_input(&input) else {
        return Err(anyhow!("expected an error containing {message}"));
    };
    ensure!(err.to_string() == message, "error: {err}");
    Ok(())
}
