//! Unit tests for raw value conversion.

use std::path::PathBuf;

use rstest::rstest;

use super::FromArgument;

#[rstest]
#[case("True", true)]
#[case("false", false)]
#[case(" TRUE ", true)]
fn parses_booleans_case_insensitively(#[case] raw: &str, #[case] expected: bool) {
    assert_eq!(bool::from_argument(raw), Ok(expected));
}

#[rstest]
#[case("yes")]
#[case("1")]
#[case("")]
fn rejects_non_boolean_words(#[case] raw: &str) {
    let err = bool::from_argument(raw).err();
    assert_eq!(err.map(|e| e.expected), Some("bool"));
}

#[rstest]
fn parses_numbers() {
    assert_eq!(i32::from_argument("8675309"), Ok(8_675_309));
    assert_eq!(u16::from_argument(" 443 "), Ok(443));
    assert_eq!(f64::from_argument("8675.309"), Ok(8675.309));
}

#[rstest]
fn number_errors_name_the_expected_type() {
    let err = u8::from_argument("256").err();
    assert_eq!(err.as_ref().map(|e| e.expected), Some("u8"));
    assert!(err.is_some_and(|e| !e.reason.is_empty()));
}

#[rstest]
fn strings_and_paths_are_taken_verbatim() {
    assert_eq!(
        String::from_argument(r"HELLO\world"),
        Ok(r"HELLO\world".to_owned())
    );
    assert_eq!(
        PathBuf::from_argument("/tmp/out"),
        Ok(PathBuf::from("/tmp/out"))
    );
}

#[rstest]
fn options_treat_empty_as_none() {
    assert_eq!(Option::<u32>::from_argument(""), Ok(None));
    assert_eq!(Option::<u32>::from_argument("7"), Ok(Some(7)));
    assert!(Option::<u32>::from_argument("x").is_err());
}

#[rstest]
fn chars_require_exactly_one_character() {
    assert_eq!(char::from_argument("y"), Ok('y'));
    assert!(char::from_argument("yes").is_err());
}
