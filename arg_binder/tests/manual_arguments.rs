//! Manual arguments alongside derived descriptors.

use std::cell::RefCell;
use std::rc::Rc;

use anyhow::{Result, anyhow, ensure};
use arg_binder::{
    Arguments, BindError, Catalogue, Context, ManualArgument, ManualArgumentGroup,
};
use rstest::rstest;

#[derive(Arguments, Debug, Default)]
struct Job {
    #[argument(long = "Name", short = "n", default = "unnamed")]
    name: String,
    #[argument(long = "Retries", short = "r", default = "2")]
    retries: u32,
}

type Log = Rc<RefCell<Vec<String>>>;

fn log() -> Log {
    Rc::new(RefCell::new(Vec::new()))
}

fn recording(log: &Log, long: &str, short: &str, count: usize) -> ManualArgument {
    let sink = Rc::clone(log);
    let label = long.to_owned();
    ManualArgument::new(long, short, count, move |values: &[String]| {
        sink.borrow_mut().push(format!("{label}:{}", values.join(",")));
    })
}

fn context_with(job: &Rc<RefCell<Job>>) -> Context {
    let mut context = Context::new(Catalogue::new().with::<Job>());
    context.register(job);
    context
}

#[rstest]
fn manual_and_descriptor_arguments_share_one_input() -> Result<()> {
    let job = Rc::new(RefCell::new(Job::default()));
    let calls = log();
    let missing = Rc::new(RefCell::new(false));
    let missing_flag = Rc::clone(&missing);
    let manual = ManualArgumentGroup::new()
        .with(recording(&calls, "Tags", "t", 2))
        .with(
            recording(&calls, "Output", "o", 1)
                .on_missing(move || *missing_flag.borrow_mut() = true),
        );

    let mut context = context_with(&job);
    context.initialize(["-n", "nightly", "-t", "a", "b"], manual)?;
    context.invoke()?;

    ensure!(*calls.borrow() == ["Tags:a,b"], "calls: {:?}", calls.borrow());
    ensure!(*missing.borrow(), "unsupplied handler should report missing");
    let state = job.borrow();
    ensure!(state.name == "nightly" && state.retries == 2, "job: {state:?}");
    Ok(())
}

#[rstest]
fn repeated_manual_name_is_unrecognized_the_second_time() -> Result<()> {
    let job = Rc::new(RefCell::new(Job::default()));
    let calls = log();
    let manual = ManualArgumentGroup::new().with(recording(&calls, "Tags", "t", 1));

    let mut context = context_with(&job);
    context.initialize(["-t", "first", "-Tags", "second"], manual)?;
    let err = context
        .invoke()
        .err()
        .ok_or_else(|| anyhow!("second occurrence must not be handled"))?;

    ensure!(
        matches!(err, BindError::UnrecognizedArgument { ref name } if name == "Tags"),
        "unexpected error: {err:?}"
    );
    ensure!(*calls.borrow() == ["Tags:first"], "calls: {:?}", calls.borrow());
    Ok(())
}

#[rstest]
fn collision_fails_before_any_field_changes() -> Result<()> {
    let job = Rc::new(RefCell::new(Job {
        name: "original".to_owned(),
        retries: 7,
    }));
    let calls = log();
    let manual = ManualArgumentGroup::new()
        .with(recording(&calls, "Name", "x", 1))
        .with(recording(&calls, "Other", "r", 1));

    let mut context = context_with(&job);
    context.initialize(["-Name", "manual"], manual)?;
    let err = context
        .invoke()
        .err()
        .ok_or_else(|| anyhow!("expected a name collision"))?;

    let BindError::NameCollision { names } = &err else {
        return Err(anyhow!("unexpected error: {err:?}"));
    };
    ensure!(*names == ["Name", "r"], "names: {names:?}");
    ensure!(calls.borrow().is_empty(), "handlers must not run");
    let state = job.borrow();
    ensure!(state.name == "original" && state.retries == 7, "job mutated: {state:?}");
    Ok(())
}

#[rstest]
fn manual_arity_mismatch_is_reported() -> Result<()> {
    let job = Rc::new(RefCell::new(Job::default()));
    let calls = log();
    let manual = ManualArgumentGroup::new().with(recording(&calls, "Tags", "t", 2));

    let mut context = context_with(&job);
    context.initialize(["-t", "only"], manual)?;
    let err = context
        .invoke()
        .err()
        .ok_or_else(|| anyhow!("expected an arity mismatch"))?;
    ensure!(
        matches!(err, BindError::ArityMismatch { expected: 2, supplied: 1, .. }),
        "unexpected error: {err:?}"
    );
    Ok(())
}

#[rstest]
fn required_manual_argument_must_be_supplied() -> Result<()> {
    let job = Rc::new(RefCell::new(Job::default()));
    let manual = ManualArgumentGroup::new().with(ManualArgument::single("Token", "k", |_| {}).required());

    let mut context = context_with(&job);
    context.initialize(["-r", "1"], manual)?;
    let err = context
        .invoke()
        .err()
        .ok_or_else(|| anyhow!("expected missing required arguments"))?;
    ensure!(
        err.to_string() == "missing required arguments: k (Token)",
        "unexpected message: {err}"
    );
    Ok(())
}

#[rstest]
fn retrying_a_failed_pass_does_not_refire_handlers() -> Result<()> {
    let job = Rc::new(RefCell::new(Job::default()));
    let calls = log();
    let missing = Rc::new(RefCell::new(0_u32));
    let missing_count = Rc::clone(&missing);
    let manual = ManualArgumentGroup::new()
        .with(recording(&calls, "Elevate", "e", 0))
        .with(
            ManualArgument::single("Username", "u", |_| {})
                .required()
                .on_missing(move || *missing_count.borrow_mut() += 1),
        );

    let mut context = context_with(&job);
    context.initialize(["-e"], manual)?;
    for attempt in 1..=2 {
        let err = context
            .invoke()
            .err()
            .ok_or_else(|| anyhow!("attempt {attempt} should fail"))?;
        ensure!(
            matches!(err, BindError::MissingRequiredArguments { .. }),
            "attempt {attempt}: unexpected error: {err:?}"
        );
    }

    ensure!(*calls.borrow() == ["Elevate:"], "calls: {:?}", calls.borrow());
    ensure!(*missing.borrow() == 1, "missing callback ran {} times", missing.borrow());
    Ok(())
}
