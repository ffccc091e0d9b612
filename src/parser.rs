//! The incremental option-parsing state machine.
//!
//! [`Parser`] consumes options one at a time from the front of an owned
//! working copy of the argument list, mutating it in place. Each call to
//! [`Parser::next_opt`] removes (or, for clusters, rewrites) exactly the
//! tokens it consumed, so the remaining arguments are always exactly the
//! tokens not yet parsed. Once stepping stops, whatever is left in
//! [`Parser::remaining`] are the positional arguments.

use tracing::{debug, trace};

use crate::error::ParseError;
use crate::opt::{Opt, OptSpec};

/// What to do to the working argument list once a short option has been
/// recognized and its tokens accounted for.
enum ShortStep {
    Remove(usize),
    Rewrite(String),
}

/// A stateful POSIX/GNU command-line option parser.
///
/// A parser holds a registry of recognized options, an owned working copy of
/// the arguments still to be parsed, and a reordering flag. It is built in
/// three phases: register options ([`flag`](Parser::flag) /
/// [`option`](Parser::option)), ingest arguments
/// ([`append_args`](Parser::append_args) /
/// [`append_os_args`](Parser::append_os_args)), then step with
/// [`next_opt`](Parser::next_opt) until it returns `Ok(None)`.
///
/// Independent parsers share no state and may live on separate threads; a
/// single parser's methods take `&mut self` and need external
/// synchronization if one instance is shared.
///
/// # Examples
///
/// ```
/// use optstep::Parser;
///
/// let mut parser = Parser::new();
/// parser.flag(Some('v'), Some("verbose"));
/// parser.option(Some('o'), Some("output"));
/// parser.append_args(["-v", "--output=out.txt", "build", "target"]);
///
/// let mut seen = Vec::new();
/// while let Some(opt) = parser.next_opt()? {
///     seen.push((opt.name, opt.arg));
/// }
/// assert_eq!(seen, vec![
///     ("verbose".to_string(), String::new()),
///     ("output".to_string(), "out.txt".to_string()),
/// ]);
/// assert_eq!(parser.remaining(), ["build", "target"]);
/// # Ok::<(), optstep::ParseError>(())
/// ```
#[derive(Debug, Default)]
pub struct Parser {
    opts: Vec<OptSpec>,
    input: Vec<String>,
    reorder: bool,
}

impl Parser {
    /// Creates an empty parser with no registered options, no input, and
    /// reordering disabled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a flag (an option taking no argument).
    ///
    /// Pass `None` for an unwanted short or long name, but not for both.
    /// Long names are given without the leading dashes.
    ///
    /// # Panics
    ///
    /// Panics if both names are absent, if the long name is empty, or if
    /// either name is already registered. These are defects in the embedding
    /// program's option setup, not runtime input errors, so they are not
    /// reported through [`ParseError`].
    pub fn flag(&mut self, short: Option<char>, long: Option<&str>) {
        self.add_opt(short, long, false);
    }

    /// Registers an option with a required argument.
    ///
    /// The argument may be attached (`-b25`, `--bytes=25`) or given as the
    /// following token (`-b 25`, `--bytes 25`).
    ///
    /// # Panics
    ///
    /// Same conditions as [`flag`](Parser::flag).
    pub fn option(&mut self, short: Option<char>, long: Option<&str>) {
        self.add_opt(short, long, true);
    }

    fn add_opt(&mut self, short: Option<char>, long: Option<&str>, takes_arg: bool) {
        if short.is_none() && long.is_none() {
            panic!("option must define a short or long name");
        }
        if let Some(c) = short {
            if self.opts.iter().any(|opt| opt.matches_short(c)) {
                panic!("short option '-{c}' is already registered");
            }
        }
        if let Some(name) = long {
            if name.is_empty() {
                panic!("long option name cannot be empty");
            }
            if self.opts.iter().any(|opt| opt.matches_long(name)) {
                panic!("long option '--{name}' is already registered");
            }
        }
        self.opts.push(OptSpec::new(short, long, takes_arg));
    }

    /// Appends arguments to the input still to be parsed.
    ///
    /// May be called multiple times; calls are cumulative. The parser keeps
    /// its own copy, so later changes to the source collection do not affect
    /// it.
    pub fn append_args<I, S>(&mut self, args: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.input.extend(args.into_iter().map(Into::into));
    }

    /// Appends the arguments the current process was invoked with, excluding
    /// the program name. Equivalent to
    /// `append_args(std::env::args().skip(1))`.
    pub fn append_os_args(&mut self) {
        self.append_args(std::env::args().skip(1));
    }

    /// Enables or disables input reordering, GNU getopt style. Disabled by
    /// default.
    ///
    /// With reordering off, stepping stops at the first positional argument
    /// and everything from there on is left untouched. With reordering on,
    /// the parser searches past positionals for further options; consuming a
    /// found option moves it before the positionals it followed, but the
    /// relative order among positionals and among options never changes. The
    /// `--` terminator still ends option parsing either way.
    ///
    /// # Examples
    ///
    /// ```
    /// use optstep::Parser;
    ///
    /// let mut parser = Parser::new();
    /// parser.flag(Some('a'), None);
    /// parser.reorder_input(true);
    /// parser.append_args(["input.txt", "-a"]);
    ///
    /// let opt = parser.next_opt()?.unwrap();
    /// assert_eq!(opt.name, "a");
    /// assert_eq!(parser.next_opt()?, None);
    /// assert_eq!(parser.remaining(), ["input.txt"]);
    /// # Ok::<(), optstep::ParseError>(())
    /// ```
    pub fn reorder_input(&mut self, enabled: bool) {
        self.reorder = enabled;
    }

    /// Returns the arguments remaining to be parsed.
    ///
    /// Most commonly used to collect positional arguments once
    /// [`next_opt`](Parser::next_opt) has returned `Ok(None)`. The view
    /// reflects all consumption so far; call it again after further stepping
    /// to see the updated tail.
    pub fn remaining(&self) -> &[String] {
        &self.input
    }

    /// Parses the next option from the input.
    ///
    /// Returns `Ok(Some(opt))` for each option consumed, `Ok(None)` once no
    /// options are left (only positional arguments, or nothing at all), and
    /// `Err` for an unrecognized option or a missing/unexpected argument. A
    /// failing call leaves the input unmodified, so the offending token
    /// stays at the front of [`remaining`](Parser::remaining).
    ///
    /// The reported [`Opt::name`] is the long name when the matched option
    /// has one, otherwise the short character; [`Opt::arg`] is empty for
    /// flags.
    pub fn next_opt(&mut self) -> Result<Option<Opt>, ParseError> {
        let Some(idx) = self.next_option_index() else {
            return Ok(None);
        };

        if self.input[idx] == "--" {
            // Only a signal that option parsing is over; consume it.
            debug!(position = idx, "reached '--' terminator");
            self.input.remove(idx);
            return Ok(None);
        }

        let opt = if self.input[idx].starts_with("--") {
            self.next_long(idx)?
        } else {
            self.next_short(idx)?
        };
        trace!(name = %opt.name, arg = %opt.arg, "parsed option");
        Ok(Some(opt))
    }

    /// Finds the index of the next option-looking token, honoring the
    /// reordering flag. `None` means option parsing is over for now.
    fn next_option_index(&self) -> Option<usize> {
        let first = self.input.first()?;
        if is_option(first) {
            return Some(0);
        }
        if !self.reorder {
            return None;
        }
        let idx = self.input.iter().position(|arg| is_option(arg))?;
        trace!(skipped = idx, "reorder scan found an option past positionals");
        Some(idx)
    }

    /// Parses the long-form token at `idx`. The `--` terminator has already
    /// been ruled out by the caller.
    fn next_long(&mut self, idx: usize) -> Result<Opt, ParseError> {
        let (name, arg, consumed) = {
            let token = self.input[idx].as_str();
            let (name_text, inline) = match token[2..].split_once('=') {
                Some((name_text, value)) => (name_text, Some(value)),
                None => (&token[2..], None),
            };
            let spec = self
                .opts
                .iter()
                .find(|opt| opt.matches_long(name_text))
                .ok_or_else(|| ParseError::UnrecognizedOption(format!("--{name_text}")))?;
            let name = spec.long.as_deref().unwrap_or(name_text).to_string();

            if spec.takes_arg {
                if let Some(value) = inline {
                    (name, value.to_string(), 1)
                } else if idx + 1 == self.input.len() {
                    return Err(ParseError::MissingArgument(format!("--{name}")));
                } else {
                    // The following token is the argument even if it looks
                    // like an option or is the literal "--".
                    let value = self.input[idx + 1].clone();
                    (name, value, 2)
                }
            } else if inline.is_some() {
                return Err(ParseError::UnexpectedArgument(format!("--{name}")));
            } else {
                (name, String::new(), 1)
            }
        };
        self.input.drain(idx..idx + consumed);
        Ok(Opt { name, arg })
    }

    /// Parses the short-form token at `idx` (a single `-` followed by one or
    /// more characters).
    fn next_short(&mut self, idx: usize) -> Result<Opt, ParseError> {
        let (name, arg, step) = {
            let token = self.input[idx].as_str();
            let mut chars = token[1..].chars();
            let Some(short) = chars.next() else {
                return Err(ParseError::UnrecognizedOption(token.to_string()));
            };
            // Everything after the option character, dash not included.
            let trailing = chars.as_str();
            let spec = self
                .opts
                .iter()
                .find(|opt| opt.matches_short(short))
                .ok_or_else(|| ParseError::UnrecognizedOption(format!("-{short}")))?;
            let name = spec.reported_name();

            if spec.takes_arg {
                if !trailing.is_empty() {
                    (name, trailing.to_string(), ShortStep::Remove(1))
                } else if idx + 1 == self.input.len() {
                    return Err(ParseError::MissingArgument(format!("-{short}")));
                } else {
                    let value = self.input[idx + 1].clone();
                    (name, value, ShortStep::Remove(2))
                }
            } else if !trailing.is_empty() {
                // A cluster like "-abc": strip the consumed character and
                // leave the rest in place for the next call to re-scan.
                (name, String::new(), ShortStep::Rewrite(format!("-{trailing}")))
            } else {
                (name, String::new(), ShortStep::Remove(1))
            }
        };
        match step {
            ShortStep::Remove(count) => {
                self.input.drain(idx..idx + count);
            }
            ShortStep::Rewrite(rest) => self.input[idx] = rest,
        }
        Ok(Opt { name, arg })
    }
}

/// Whether the token looks like an option: at least two bytes long and
/// starting with `-`. The literal `--` qualifies too.
fn is_option(arg: &str) -> bool {
    arg.len() > 1 && arg.as_bytes()[0] == b'-'
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opt(name: &str, arg: &str) -> Opt {
        Opt {
            name: name.to_string(),
            arg: arg.to_string(),
        }
    }

    #[test]
    fn test_is_option_classification() {
        assert!(is_option("-a"));
        assert!(is_option("--"));
        assert!(is_option("--long"));
        assert!(!is_option("-"));
        assert!(!is_option("arg"));
        assert!(!is_option(""));
    }

    #[test]
    fn test_cluster_is_rewritten_in_place() {
        let mut parser = Parser::new();
        parser.flag(Some('a'), None);
        parser.flag(Some('b'), None);
        parser.append_args(["-ab", "file"]);

        assert_eq!(parser.next_opt(), Ok(Some(opt("a", ""))));
        assert_eq!(parser.remaining(), ["-b", "file"]);
        assert_eq!(parser.next_opt(), Ok(Some(opt("b", ""))));
        assert_eq!(parser.remaining(), ["file"]);
    }

    #[test]
    fn test_non_ascii_short_option() {
        let mut parser = Parser::new();
        parser.option(Some('ä'), None);
        parser.append_args(["-äfoo"]);

        assert_eq!(parser.next_opt(), Ok(Some(opt("ä", "foo"))));
        assert!(parser.remaining().is_empty());
    }

    #[test]
    fn test_failed_call_leaves_input_untouched() {
        let mut parser = Parser::new();
        parser.option(Some('b'), Some("bytes"));
        parser.append_args(["--nope", "x"]);

        assert_eq!(
            parser.next_opt(),
            Err(ParseError::UnrecognizedOption("--nope".to_string()))
        );
        assert_eq!(parser.remaining(), ["--nope", "x"]);
    }

    #[test]
    fn test_missing_argument_at_end_of_input() {
        let mut parser = Parser::new();
        parser.option(Some('b'), Some("bytes"));
        parser.append_args(["-b"]);

        assert_eq!(
            parser.next_opt(),
            Err(ParseError::MissingArgument("-b".to_string()))
        );
        assert_eq!(parser.remaining(), ["-b"]);

        let mut parser = Parser::new();
        parser.option(Some('b'), Some("bytes"));
        parser.append_args(["--bytes"]);

        assert_eq!(
            parser.next_opt(),
            Err(ParseError::MissingArgument("--bytes".to_string()))
        );
    }

    #[test]
    fn test_unexpected_inline_argument_on_flag() {
        let mut parser = Parser::new();
        parser.flag(None, Some("flag"));
        parser.append_args(["--flag=oops"]);

        assert_eq!(
            parser.next_opt(),
            Err(ParseError::UnexpectedArgument("--flag".to_string()))
        );
        assert_eq!(parser.remaining(), ["--flag=oops"]);
    }

    #[test]
    fn test_empty_inline_value_is_an_empty_argument() {
        let mut parser = Parser::new();
        parser.option(None, Some("bytes"));
        parser.append_args(["--bytes="]);

        assert_eq!(parser.next_opt(), Ok(Some(opt("bytes", ""))));
        assert!(parser.remaining().is_empty());
    }

    #[test]
    fn test_terminator_is_consumed_and_following_tokens_stay() {
        let mut parser = Parser::new();
        parser.flag(Some('a'), None);
        parser.append_args(["-a", "--", "-a"]);

        assert_eq!(parser.next_opt(), Ok(Some(opt("a", ""))));
        assert_eq!(parser.next_opt(), Ok(None));
        assert_eq!(parser.remaining(), ["-a"]);
    }

    #[test]
    fn test_ingestion_is_cumulative_and_defensive() {
        let mut source = vec!["-a".to_string()];
        let mut parser = Parser::new();
        parser.flag(Some('a'), None);
        parser.flag(Some('b'), None);
        parser.append_args(source.iter().cloned());
        source[0] = "-x".to_string();
        parser.append_args(["-b"]);

        assert_eq!(parser.next_opt(), Ok(Some(opt("a", ""))));
        assert_eq!(parser.next_opt(), Ok(Some(opt("b", ""))));
        assert_eq!(parser.next_opt(), Ok(None));
    }

    #[test]
    #[should_panic(expected = "short or long name")]
    fn test_nameless_registration_panics() {
        Parser::new().flag(None, None);
    }

    #[test]
    #[should_panic(expected = "'-a' is already registered")]
    fn test_duplicate_short_registration_panics() {
        let mut parser = Parser::new();
        parser.flag(Some('a'), None);
        parser.option(Some('a'), Some("alpha"));
    }

    #[test]
    #[should_panic(expected = "'--bytes' is already registered")]
    fn test_duplicate_long_registration_panics() {
        let mut parser = Parser::new();
        parser.option(Some('b'), Some("bytes"));
        parser.flag(None, Some("bytes"));
    }

    #[test]
    #[should_panic(expected = "cannot be empty")]
    fn test_empty_long_name_panics() {
        Parser::new().flag(None, Some(""));
    }
}
