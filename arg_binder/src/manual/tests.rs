//! Unit tests for manual argument reconciliation.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use anyhow::{Result, anyhow, ensure};
use rstest::rstest;

use super::{ManualArgument, ManualArgumentGroup};
use crate::descriptor::Argument;
use crate::error::BindError;
use crate::parser::parse_tokens;

fn recorder() -> (Rc<RefCell<Vec<String>>>, impl FnMut(&[String]) + 'static) {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    (seen, move |values: &[String]| sink.borrow_mut().extend_from_slice(values))
}

#[rstest]
fn delivers_values_in_order() -> Result<()> {
    let (seen, action) = recorder();
    let mut group = ManualArgumentGroup::new().with(ManualArgument::new("Names", "n", 3, action));
    let tree = parse_tokens("Context", &["-"], ["-n", "a", "b", "c"]);

    let pass = group.invoke(&tree)?;

    ensure!(*seen.borrow() == ["a", "b", "c"], "values: {:?}", seen.borrow());
    ensure!(pass.supplied == [0], "supplied: {:?}", pass.supplied);
    ensure!(pass.unhandled.is_empty(), "unhandled: {:?}", pass.unhandled);
    Ok(())
}

#[rstest]
fn arity_mismatch_names_the_invocation() -> Result<()> {
    let (_, action) = recorder();
    let mut group = ManualArgumentGroup::new().with(ManualArgument::new("Names", "n", 2, action));
    let tree = parse_tokens("Context", &["-"], ["-Names", "only-one"]);

    let err = group
        .invoke(&tree)
        .err()
        .ok_or_else(|| anyhow!("expected arity mismatch"))?;
    ensure!(
        matches!(
            err,
            BindError::ArityMismatch { ref name, expected: 2, supplied: 1 } if name == "Names"
        ),
        "unexpected error: {err:?}"
    );
    Ok(())
}

#[rstest]
fn handler_fires_only_on_first_occurrence() -> Result<()> {
    let (seen, action) = recorder();
    let mut group = ManualArgumentGroup::new().with(ManualArgument::new("Tag", "t", 1, action));
    let tree = parse_tokens("Context", &["-"], ["-t", "first", "-other", "-Tag", "second"]);

    let pass = group.invoke(&tree)?;

    ensure!(*seen.borrow() == ["first"], "values: {:?}", seen.borrow());
    ensure!(pass.unhandled == [1, 2], "unhandled: {:?}", pass.unhandled);
    Ok(())
}

#[rstest]
#[case(&["-q"], 1, 0)]
#[case(&[], 0, 1)]
fn missing_callback_runs_only_when_absent(
    #[case] tokens: &[&str],
    #[case] expected_present: u32,
    #[case] expected_missing: u32,
) -> Result<()> {
    let present = Rc::new(Cell::new(0_u32));
    let missing = Rc::new(Cell::new(0_u32));
    let (on_present, on_missing) = (Rc::clone(&present), Rc::clone(&missing));
    let mut group = ManualArgumentGroup::new().with(
        ManualArgument::flag("Quiet", "q", move || on_present.set(on_present.get() + 1))
            .on_missing(move || on_missing.set(on_missing.get() + 1)),
    );

    let pass = group.invoke(&parse_tokens("Context", &["-"], tokens.iter().copied()))?;

    ensure!(
        pass.supplied.is_empty() == (expected_present == 0),
        "supplied: {:?}",
        pass.supplied
    );
    ensure!(present.get() == expected_present, "present count {}", present.get());
    ensure!(missing.get() == expected_missing, "missing count {}", missing.get());
    Ok(())
}

#[rstest]
fn single_value_constructor_passes_the_value() -> Result<()> {
    let seen = Rc::new(RefCell::new(String::new()));
    let sink = Rc::clone(&seen);
    let mut argument = ManualArgument::single("User", "u", move |value| {
        sink.borrow_mut().push_str(value);
    });

    argument.invoke_supplied(&[r"DOMAIN\user".to_owned()])?;

    ensure!(seen.borrow().as_str() == r"DOMAIN\user", "value: {}", seen.borrow());
    ensure!(argument.value_count() == 1, "single takes one value");
    Ok(())
}

#[rstest]
fn flags_default_their_example_value() {
    let argument = ManualArgument::flag("Force", "f", || {}).with_description("Overwrite files");
    assert_eq!(argument.example_value(), "false");
    assert_eq!(argument.description(), "Overwrite files");
    assert_eq!(argument.value_count(), 0);
    assert!(!argument.is_required());
}

#[rstest]
fn callbacks_fire_once_across_repeated_passes() -> Result<()> {
    let fired = Rc::new(Cell::new(0_u32));
    let missing = Rc::new(Cell::new(0_u32));
    let (on_fired, on_missing) = (Rc::clone(&fired), Rc::clone(&missing));
    let mut group = ManualArgumentGroup::new()
        .with(ManualArgument::flag("Elevate", "e", move || on_fired.set(on_fired.get() + 1)))
        .with(
            ManualArgument::flag("Quiet", "q", || {})
                .on_missing(move || on_missing.set(on_missing.get() + 1)),
        );
    let tree = parse_tokens("Context", &["-"], ["-e"]);

    let first = group.invoke(&tree)?;
    let second = group.invoke(&tree)?;

    ensure!(first == second, "passes differ: {first:?} vs {second:?}");
    ensure!(second.supplied == [0], "supplied: {:?}", second.supplied);
    ensure!(fired.get() == 1, "supplied callback ran {} times", fired.get());
    ensure!(missing.get() == 1, "missing callback ran {} times", missing.get());
    Ok(())
}
