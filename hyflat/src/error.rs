use std::ops::Range;

use strum::{EnumIs, EnumTryAs};
use thiserror::Error;

/// A single diagnostic produced while reading a nested literal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ParserError {
    pub message: String,
    /// Byte offsets into the source text.
    pub start: usize,
    pub end: usize,
}

impl ParserError {
    pub fn new(message: impl Into<String>, span: Range<usize>) -> Self {
        Self {
            message: message.into(),
            start: span.start,
            end: span.end,
        }
    }

    pub fn span(&self) -> Range<usize> {
        self.start..self.end
    }
}

impl std::fmt::Display for ParserError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} at {}..{}", self.message, self.start, self.end)
    }
}

#[derive(Debug, PartialEq, Eq, EnumIs, EnumTryAs, Error)]
pub enum Error {
    /// The tree nests deeper than the configured limit.
    #[error("Nesting depth {depth} exceeds the maximum allowed depth of {max}.")]
    DepthLimitExceeded { depth: usize, max: usize },

    /// Flattening would produce more leaves than the configured limit.
    #[error("Flattening produced more than the maximum allowed {max} leaves.")]
    LeafLimitExceeded { max: usize },

    /// The literal could not be read; every diagnostic is kept.
    #[error(
        "Failed to parse nested literal ({} error(s)): {}",
        .errors.len(),
        .errors.first().map(ToString::to_string).unwrap_or_default()
    )]
    ParserErrors { errors: Vec<ParserError> },

    /// The configuration document was rejected.
    #[error("Invalid flattening configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, Error>;
