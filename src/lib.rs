//! Incremental POSIX/GNU command-line option parsing.
//!
//! This crate implements getopt-style option parsing as a stepping state
//! machine rather than a one-shot matcher:
//!
//! - [`Parser`] — the stateful session: a registry of recognized options, an
//!   owned working copy of the arguments, and a reordering flag.
//! - [`Opt`] — one parsed option occurrence (resolved name plus argument).
//! - [`ParseError`] — runtime parse errors (unrecognized option,
//!   missing/unexpected argument).
//!
//! Supported syntax: short options (`-x`, including non-ASCII characters),
//! long options (`--name`), required arguments either attached (`-b25`,
//! `--bytes=25`) or as the following token, flag clustering (`-abc`), and the
//! `--` terminator. Optionally, the parser can reorder its input the way GNU
//! getopt does, finding options that come after positional arguments.
//!
//! Each call to [`Parser::next_opt`] consumes one option from the front of
//! the working copy, mutating it in place; `Ok(None)` signals that only
//! positional arguments are left, which the caller then collects from
//! [`Parser::remaining`]. Option-argument values are returned as raw strings
//! and never validated, and no help text is generated.
//!
//! # Example
//!
//! ```
//! use optstep::Parser;
//!
//! let mut parser = Parser::new();
//! parser.flag(Some('a'), Some("all"));
//! parser.option(Some('b'), Some("bytes"));
//!
//! parser.append_args(["-ab512", "--", "-literal", "file1"]);
//!
//! let mut opts = Vec::new();
//! while let Some(opt) = parser.next_opt()? {
//!     opts.push((opt.name, opt.arg));
//! }
//! assert_eq!(opts, vec![
//!     ("all".to_string(), String::new()),
//!     ("bytes".to_string(), "512".to_string()),
//! ]);
//! assert_eq!(parser.remaining(), ["-literal", "file1"]);
//! # Ok::<(), optstep::ParseError>(())
//! ```

mod error;
mod opt;
mod parser;

pub use error::ParseError;
pub use opt::Opt;
pub use parser::Parser;
