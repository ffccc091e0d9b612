//! Data model for registered options and parsed results.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A registered option definition.
///
/// Name slots are explicit [`Option`]s rather than reserved sentinel values;
/// registration guarantees that at least one slot is populated and that no
/// two specs share a short or long name.
#[derive(Debug, Clone)]
pub(crate) struct OptSpec {
    /// Short form (e.g., `v` for `-v`). Any Unicode scalar is allowed.
    pub(crate) short: Option<char>,
    /// Long form without the leading dashes (e.g., `verbose` for `--verbose`).
    pub(crate) long: Option<String>,
    /// Whether the option requires exactly one argument value.
    pub(crate) takes_arg: bool,
}

impl OptSpec {
    pub(crate) fn new(short: Option<char>, long: Option<&str>, takes_arg: bool) -> Self {
        Self {
            short,
            long: long.map(String::from),
            takes_arg,
        }
    }

    pub(crate) fn matches_short(&self, c: char) -> bool {
        self.short == Some(c)
    }

    pub(crate) fn matches_long(&self, name: &str) -> bool {
        self.long.as_deref() == Some(name)
    }

    /// Returns the name reported for this option (long form preferred, falls
    /// back to the short character as a one-character string).
    pub(crate) fn reported_name(&self) -> String {
        self.long
            .clone()
            .or_else(|| self.short.map(|c| c.to_string()))
            .unwrap_or_default()
    }
}

/// A single parsed option occurrence, as returned by
/// [`Parser::next_opt`](crate::Parser::next_opt).
///
/// # Examples
///
/// ```
/// use optstep::Parser;
///
/// let mut parser = Parser::new();
/// parser.option(Some('b'), Some("bytes"));
/// parser.append_args(["-b25"]);
///
/// let opt = parser.next_opt().unwrap().unwrap();
/// assert_eq!(opt.name, "bytes");
/// assert_eq!(opt.arg, "25");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Opt {
    /// The resolved option name: the long form if the option has one,
    /// otherwise the short character as a one-character string.
    pub name: String,
    /// The option's argument, or empty for options that take none.
    pub arg: String,
}
