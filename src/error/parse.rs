//! Parse error taxonomy.

use thiserror::Error;

/// Classification of a parse failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// Malformed input detected at the very first byte: the file is not
    /// JSON at all.
    InvalidFile,
    /// A structural violation at a non-zero offset, or truncation at
    /// end-of-stream.
    Unexpected,
}

/// A classified parse failure with a human-readable message.
///
/// Produced by the flattener when the tokenizer reports a structural error;
/// tokenizer-level errors never escape past it in raw form.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{message}")]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub message: String,
}

impl ParseError {
    /// The fixed invalid-file error.
    pub fn invalid_file() -> Self {
        Self {
            kind: ParseErrorKind::InvalidFile,
            message: "Invalid file. Please load a valid JSON file".to_string(),
        }
    }

    /// A structural error with position detail.
    pub fn unexpected(message: impl Into<String>) -> Self {
        Self {
            kind: ParseErrorKind::Unexpected,
            message: message.into(),
        }
    }

    pub fn is_invalid_file(&self) -> bool {
        self.kind == ParseErrorKind::InvalidFile
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_file_message() {
        let err = ParseError::invalid_file();
        assert!(err.is_invalid_file());
        assert!(err.message.contains("valid JSON"));
    }

    #[test]
    fn test_unexpected_carries_message() {
        let err = ParseError::unexpected("Unexpected token \"x\" at line 1, column 3");
        assert_eq!(err.kind, ParseErrorKind::Unexpected);
        assert!(err.to_string().contains("column 3"));
    }
}
