//! Converts a flat token stream into an argument [`Tree`].
//!
//! Every token that starts with one of the configured delimiters becomes a
//! new argument invocation directly beneath the root. Every other token is a
//! value and attaches beneath the most recent invocation.
//!
//! ```
//! use arg_binder::parser::parse_tokens;
//!
//! let tree = parse_tokens("Context", &["-"], ["-a", "1", "2", "-b", "3"]);
//! let names: Vec<_> = tree.invocations().iter().map(|n| n.value().as_str()).collect();
//! assert_eq!(names, ["a", "b"]);
//! ```

use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::{BindError, BindResult};
use crate::tree::{Tree, TreeNode};

/// How to treat value tokens that appear before any argument name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StrayValuePolicy {
    /// Attach the value beneath the root, alongside argument names.
    ///
    /// The binding engine then treats it like any other invocation, which
    /// usually surfaces as [`BindError::UnrecognizedArgument`].
    Attach,
    /// Drop the value and log a warning.
    Discard,
    /// Fail with [`BindError::StrayValue`].
    #[default]
    Reject,
}

/// Strips the first matching delimiter from `token`.
///
/// Delimiters are tried in declaration order and the first match wins, so
/// `["-", "--"]` turns `--name` into `-name`. Empty delimiters never match.
/// Returns `None` when no delimiter applies.
#[must_use]
pub fn chop<'t, D>(token: &'t str, delimiters: &[D]) -> Option<&'t str>
where
    D: AsRef<str>,
{
    delimiters.iter().find_map(|delimiter| {
        let prefix = delimiter.as_ref();
        if prefix.is_empty() {
            None
        } else {
            token.strip_prefix(prefix)
        }
    })
}

/// Parses `tokens`, attaching stray leading values beneath the root.
///
/// This never fails; malformed input is detected by the binding engine.
#[must_use]
pub fn parse_tokens<I, S, D>(root_label: &str, delimiters: &[D], tokens: I) -> Tree<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
    D: AsRef<str>,
{
    let (tree, _) = split_tokens(root_label, delimiters, tokens, true);
    tree
}

/// Token parser applying a [`StrayValuePolicy`].
#[derive(Debug, Clone)]
pub struct TokenParser<'d, D> {
    root_label: &'d str,
    delimiters: &'d [D],
    stray_values: StrayValuePolicy,
}

impl<'d, D> TokenParser<'d, D>
where
    D: AsRef<str>,
{
    /// Creates a parser labelling the root `root_label`.
    #[must_use]
    pub const fn new(root_label: &'d str, delimiters: &'d [D]) -> Self {
        Self {
            root_label,
            delimiters,
            stray_values: StrayValuePolicy::Reject,
        }
    }

    /// Sets the policy for values preceding the first argument name.
    #[must_use]
    pub const fn stray_values(mut self, policy: StrayValuePolicy) -> Self {
        self.stray_values = policy;
        self
    }

    /// Parses `tokens` into a tree.
    ///
    /// # Errors
    ///
    /// Returns [`BindError::StrayValue`] for the first leading value when the
    /// policy is [`StrayValuePolicy::Reject`].
    pub fn parse<I, S>(&self, tokens: I) -> BindResult<Tree<String>>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let attach = self.stray_values == StrayValuePolicy::Attach;
        let (tree, stray) = split_tokens(self.root_label, self.delimiters, tokens, attach);
        match (self.stray_values, stray.into_iter().next()) {
            (StrayValuePolicy::Reject, Some(value)) => Err(BindError::StrayValue { value }),
            (StrayValuePolicy::Discard, Some(value)) => {
                warn!(%value, "discarding value that precedes every argument name");
                Ok(tree)
            }
            _ => Ok(tree),
        }
    }
}

/// Builds the tree, returning any leading values that were not attached.
fn split_tokens<I, S, D>(
    root_label: &str,
    delimiters: &[D],
    tokens: I,
    attach_stray: bool,
) -> (Tree<String>, Vec<String>)
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
    D: AsRef<str>,
{
    let mut root = TreeNode::new(root_label.to_owned());
    let mut stray = Vec::new();
    let mut in_invocation = false;

    for token in tokens.into_iter().map(Into::<String>::into) {
        if let Some(name) = chop(&token, delimiters) {
            root.add(TreeNode::new(name.to_owned()));
            in_invocation = true;
            continue;
        }
        if in_invocation && let Some(current) = root.last_child_mut() {
            current.add(TreeNode::new(token));
        } else if attach_stray {
            root.add(TreeNode::new(token));
        } else {
            stray.push(token);
        }
    }

    debug!(
        invocations = root.children().len(),
        stray = stray.len(),
        "parsed argument tokens"
    );
    (Tree::new(root), stray)
}

#[cfg(test)]
mod tests;
