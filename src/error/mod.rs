//! Error types for treeline.
//!
//! Parse failures follow a fixed two-category taxonomy (see [`ParseError`]):
//! either the input is not JSON at all, or a structural violation occurred
//! somewhere past the first byte. Everything else the binary can hit (I/O,
//! terminal) is folded into [`TreelineError`].

mod parse;

pub use parse::{ParseError, ParseErrorKind};

use thiserror::Error;

/// Unified error type for the application.
#[derive(Debug, Error)]
pub enum TreelineError {
    /// The input could not be parsed as JSON.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// Filesystem or terminal I/O failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl TreelineError {
    /// A short message suitable for showing to the user.
    pub fn user_message(&self) -> String {
        match self {
            TreelineError::Parse(e) => e.message.clone(),
            TreelineError::Io(e) => format!("Could not read the file: {}", e),
        }
    }
}

/// Result alias used throughout the crate.
pub type TreelineResult<T> = Result<T, TreelineError>;
