//! Error types for conversion operations

use std::fmt;

/// Errors that can occur while converting or migrating pages
///
/// Rename misses and malformed link fragments are not errors; those are handled
/// locally by returning the original text. Only the variants below abort a run.
#[derive(Debug, Clone, PartialEq)]
pub enum ConvertError {
    /// A grammar pattern failed to compile
    InvalidGrammar(String),
    /// A match did not carry exactly one rule group. This is a grammar
    /// construction defect, never an input problem.
    Dispatch {
        /// The full matched text
        matched: String,
        /// Every capture group that participated, as `(name, value)`
        captures: Vec<(String, String)>,
    },
    /// The regex engine gave up on a line (e.g. backtracking limit)
    Scan(String),
    /// A rename list line could not be parsed
    RenameList { line: usize, reason: String },
    /// The page store failed to list, read or write a page
    Store(String),
}

impl fmt::Display for ConvertError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConvertError::InvalidGrammar(msg) => write!(f, "Invalid grammar: {msg}"),
            ConvertError::Dispatch { matched, captures } => {
                write!(f, "Can't handle match '{matched}' (captures:")?;
                for (name, value) in captures {
                    write!(f, " {name}={value:?}")?;
                }
                write!(f, ")")
            }
            ConvertError::Scan(msg) => write!(f, "Scan error: {msg}"),
            ConvertError::RenameList { line, reason } => {
                write!(f, "Rename list line {line}: {reason}")
            }
            ConvertError::Store(msg) => write!(f, "Page store error: {msg}"),
        }
    }
}

impl std::error::Error for ConvertError {}

impl From<fancy_regex::Error> for ConvertError {
    fn from(err: fancy_regex::Error) -> Self {
        ConvertError::Scan(err.to_string())
    }
}
