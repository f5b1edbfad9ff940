//! Unit tests for token parsing.

use anyhow::{Result, ensure};
use rstest::rstest;

use super::{StrayValuePolicy, TokenParser, chop, parse_tokens};
use crate::error::BindError;
use crate::tree::{Tree, TreeNode};

fn shape(tree: &Tree<String>) -> Vec<(String, Vec<String>)> {
    tree.invocations()
        .iter()
        .map(|node| {
            let values = node.children().iter().map(|c| c.value().clone()).collect();
            (node.value().clone(), values)
        })
        .collect()
}

fn owned(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| (*v).to_owned()).collect()
}

#[rstest]
fn groups_values_under_preceding_name() {
    let tree = parse_tokens("Context", &["-"], ["-a", "1", "2", "-b", "3"]);
    assert_eq!(
        shape(&tree),
        [
            ("a".to_owned(), owned(&["1", "2"])),
            ("b".to_owned(), owned(&["3"])),
        ]
    );
    assert_eq!(tree.root().value(), "Context");
}

#[rstest]
fn keeps_every_invocation_in_order() {
    let tree = parse_tokens(
        "Context",
        &["-"],
        [
            "-this", "is", "a", "test", "-in", "which", "-I", "-supply", "-many", "arguments",
            "with", "-a", "valid", "-delimiter",
        ],
    );
    let names: Vec<_> = tree.invocations().iter().map(TreeNode::value).collect();
    assert_eq!(
        names,
        ["this", "in", "I", "supply", "many", "a", "delimiter"]
    );
    assert_eq!(shape(&tree).first().map(|(_, v)| v.clone()), Some(owned(&["is", "a", "test"])));
}

#[rstest]
#[case(&["-", "--"], "--name", Some("-name"))]
#[case(&["--", "-"], "--name", Some("name"))]
#[case(&["/", "-"], "-x", Some("x"))]
#[case(&["-"], "value", None)]
#[case(&["", "-"], "-x", Some("x"))]
fn chop_uses_declaration_order(
    #[case] delimiters: &[&str],
    #[case] token: &str,
    #[case] expected: Option<&str>,
) {
    assert_eq!(chop(token, delimiters), expected);
}

#[rstest]
fn attach_policy_places_leading_values_under_root() {
    let tree = parse_tokens("Context", &["-"], ["stray", "-a", "1"]);
    let names: Vec<_> = tree.invocations().iter().map(TreeNode::value).collect();
    assert_eq!(names, ["stray", "a"]);
}

#[rstest]
fn reject_policy_reports_first_leading_value() -> Result<()> {
    let parser = TokenParser::new("Context", &["-"]);
    let err = parser
        .parse(["first", "second", "-a"])
        .err()
        .ok_or_else(|| anyhow::anyhow!("expected stray value error"))?;
    ensure!(
        matches!(err, BindError::StrayValue { ref value } if value == "first"),
        "unexpected error: {err:?}"
    );
    Ok(())
}

#[rstest]
fn discard_policy_drops_leading_values() -> Result<()> {
    let parser = TokenParser::new("Context", &["-"]).stray_values(StrayValuePolicy::Discard);
    let tree = parser.parse(["noise", "-a", "1"])?;
    ensure!(
        shape(&tree) == [("a".to_owned(), owned(&["1"]))],
        "unexpected tree: {tree:?}"
    );
    Ok(())
}

#[rstest]
fn empty_input_yields_bare_root() -> Result<()> {
    let tree = TokenParser::new("Root", &["-"]).parse(Vec::<String>::new())?;
    ensure!(tree.invocations().is_empty(), "expected no invocations");
    ensure!(tree.root().value() == "Root", "root label lost");
    Ok(())
}
