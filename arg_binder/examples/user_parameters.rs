//! Binds a status code, a username and an execute flag.
//!
//! Run with explicit tokens, or without any to use a built-in sample:
//!
//! ```text
//! cargo run -p arg_binder --example user_parameters -- -s 3 -u 'CORP\alice' -e
//! cargo run -p arg_binder --example user_parameters -- -?
//! ```

use std::cell::RefCell;
use std::io::{self, Write};
use std::rc::Rc;

use arg_binder::{Arguments, Catalogue, Context, ManualArgumentGroup};

const SAMPLE: [&str; 5] = ["-s", "0", "-u", r"HELLO\world", "-e"];

#[derive(Arguments, Debug, Default, Clone, PartialEq, Eq)]
struct UserParameters {
    /// Status code to return with.
    #[argument(long = "StatusCode", short = "s", default = 1, example = "0")]
    status_code: i32,
    /// The username to use during execution.
    #[argument(long = "Username", short = "u", example = r"DOMAIN\username")]
    username: String,
    /// Whether execution should occur.
    #[argument(long = "Execute", short = "e", flag, default = false, example = "true")]
    execute: bool,
}

/// Result of parsing the command line.
enum Outcome {
    Help(Vec<String>),
    Bound(UserParameters),
}

fn parse(tokens: Vec<String>) -> Result<Outcome, String> {
    let parameters = Rc::new(RefCell::new(UserParameters::default()));
    let mut context = Context::new(Catalogue::new().with::<UserParameters>());
    context.register(&parameters);

    let help_requested = context
        .initialize_with(tokens, &["-"], Some("?"), ManualArgumentGroup::new())
        .map_err(|err| err.to_string())?;
    if help_requested {
        let lines = context
            .arguments()
            .iter()
            .map(|argument| {
                format!(
                    "  -{:<12} -{:<3} {} (e.g. {})",
                    argument.long_name(),
                    argument.short_name(),
                    argument.description(),
                    argument.example_value(),
                )
            })
            .collect();
        return Ok(Outcome::Help(lines));
    }

    context.invoke().map_err(|err| err.to_string())?;
    let bound = parameters.borrow().clone();
    Ok(Outcome::Bound(bound))
}

fn main() -> Result<(), String> {
    let mut tokens: Vec<String> = std::env::args().skip(1).collect();
    if tokens.is_empty() {
        tokens = SAMPLE.map(str::to_owned).to_vec();
    }

    let mut stdout = io::stdout().lock();
    let written = match parse(tokens)? {
        Outcome::Help(lines) => writeln!(stdout, "Arguments:\n{}", lines.join("\n")),
        Outcome::Bound(parameters) => writeln!(
            stdout,
            "{}, {}, {}",
            parameters.status_code, parameters.username, parameters.execute
        ),
    };
    written.map_err(|err| err.to_string())
}
