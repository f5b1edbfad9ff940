//! Settings controlling how a [`crate::Context`] parses and binds.
//!
//! Options can be built in code or deserialized from an application's own
//! configuration file:
//!
//! ```
//! use arg_binder::{ContextOptions, DiscoveryMode, StrayValuePolicy};
//!
//! let options = ContextOptions::new()
//!     .delimiters(["/", "-"])
//!     .help_token("?")
//!     .stray_values(StrayValuePolicy::Discard)
//!     .discovery(DiscoveryMode::Everything);
//! assert_eq!(options.delimiter_list(), ["/", "-"]);
//! ```

use serde::Deserialize;

use crate::discovery::DiscoveryMode;
use crate::parser::StrayValuePolicy;

/// Parsing and binding settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct ContextOptions {
    delimiters: Vec<String>,
    help_token: Option<String>,
    root_label: String,
    stray_values: StrayValuePolicy,
    discovery: DiscoveryMode,
}

impl Default for ContextOptions {
    fn default() -> Self {
        Self {
            delimiters: vec![String::from("--"), String::from("-")],
            help_token: None,
            root_label: String::from("Context"),
            stray_values: StrayValuePolicy::default(),
            discovery: DiscoveryMode::default(),
        }
    }
}

impl ContextOptions {
    /// Options with `--` and `-` as delimiters and no help token.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the delimiter set; earlier entries take precedence.
    #[must_use]
    pub fn delimiters<I, S>(mut self, delimiters: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.delimiters = delimiters.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the token that requests help when prefixed by a delimiter.
    #[must_use]
    pub fn help_token(mut self, token: impl Into<String>) -> Self {
        self.help_token = Some(token.into());
        self
    }

    /// Sets the label of the parsed tree's root.
    #[must_use]
    pub fn root_label(mut self, label: impl Into<String>) -> Self {
        self.root_label = label.into();
        self
    }

    /// Sets the policy for values preceding the first argument name.
    #[must_use]
    pub const fn stray_values(mut self, policy: StrayValuePolicy) -> Self {
        self.stray_values = policy;
        self
    }

    /// Sets which types contribute descriptors.
    #[must_use]
    pub const fn discovery(mut self, mode: DiscoveryMode) -> Self {
        self.discovery = mode;
        self
    }

    /// The configured delimiters in precedence order.
    #[must_use]
    pub fn delimiter_list(&self) -> &[String] {
        &self.delimiters
    }

    /// The configured help token.
    #[must_use]
    pub fn help(&self) -> Option<&str> {
        self.help_token.as_deref()
    }

    /// The configured root label.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.root_label
    }

    /// The configured stray value policy.
    #[must_use]
    pub const fn stray_value_policy(&self) -> StrayValuePolicy {
        self.stray_values
    }

    /// The configured discovery mode.
    #[must_use]
    pub const fn discovery_mode(&self) -> DiscoveryMode {
        self.discovery
    }
}
