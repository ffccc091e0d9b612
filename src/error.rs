//! Parse errors returned by the stepping API.
//!
//! These cover only runtime input problems. Misconfiguration at registration
//! time (duplicate or missing option names) is a programmer error and panics
//! instead; see [`Parser::flag`](crate::Parser::flag).

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// An error encountered while parsing the argument list.
///
/// Every variant carries the offending option in display form, dashes
/// included (`-c` or `--name`), matching the lexical form that appeared in
/// the input. A failed call to [`Parser::next_opt`](crate::Parser::next_opt)
/// leaves the remaining arguments untouched, so the offending token can
/// still be inspected through
/// [`Parser::remaining`](crate::Parser::remaining).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ParseError {
    /// The input contains an option that was never registered.
    #[error("unrecognized option '{0}'")]
    UnrecognizedOption(String),
    /// An option requiring an argument appeared at the end of the input
    /// with nothing attached and no token following it.
    #[error("expected argument to '{0}'")]
    MissingArgument(String),
    /// A long option that takes no argument was given an inline `=` value.
    #[error("unexpected argument to '{0}'")]
    UnexpectedArgument(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            ParseError::UnrecognizedOption("--frobnicate".into()).to_string(),
            "unrecognized option '--frobnicate'"
        );
        assert_eq!(
            ParseError::MissingArgument("-b".into()).to_string(),
            "expected argument to '-b'"
        );
        assert_eq!(
            ParseError::UnexpectedArgument("--flag".into()).to_string(),
            "unexpected argument to '--flag'"
        );
    }
}
