//! Error types for the token codec and the translation pipeline around it.
//!
//! ## Error Categories
//!
//! - **Codec Errors**: a token sequence that does not decode back into a document
//!   ([`Error::MalformedSequence`]), or a chunk size of zero ([`Error::InvalidArgument`])
//! - **Shape Errors**: translated content that no longer lines up with the stripped
//!   structure ([`Error::ShapeMismatch`])
//! - **Input Errors**: missing or unreadable files, bad file lists, invalid JSON
//! - **Configuration Errors**: unparsable configuration or a missing API key
//!
//! The encoding direction never fails on a [`Document`](crate::Document); every other
//! stage reports invalid input loudly instead of producing a plausible but wrong result.
//!
//! ## Examples
//!
//! ```rust
//! use serde_tokseq::{decode, Error, Lexeme, Token, TokenSequence};
//!
//! let truncated = TokenSequence::from(vec![Token::Structural(Lexeme::ObjectOpen)]);
//! let result = decode(&truncated);
//! assert!(matches!(result, Err(Error::MalformedSequence(_))));
//! ```

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Represents all possible errors raised by this crate.
#[derive(Debug, Clone, Error)]
pub enum Error {
    /// IO error during reading
    #[error("IO error: {0}")]
    Io(String),

    /// A requested document path does not exist
    #[error("The provided JSON file path is not correct: {}", path.display())]
    FileNotFound { path: PathBuf },

    /// The configured file list has the wrong shape
    #[error("Invalid input type: {0}")]
    InputType(String),

    /// A file was read but is not a valid JSON document
    #[error("Invalid document in {}: {msg}", path.display())]
    InvalidDocument { path: PathBuf, msg: String },

    /// No API key in the configuration
    #[error("An API Key must be defined in the configuration file.")]
    MissingApiKey,

    /// Configuration text could not be parsed
    #[error("Configuration error: {0}")]
    Config(String),

    /// A token sequence (or separated form) that the tokenizer could not have produced
    #[error("Malformed token sequence: {0}")]
    MalformedSequence(String),

    /// An argument outside its documented domain
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Translated content whose length differs from the content that was sent
    #[error("Content shape mismatch: expected {expected} items, found {found}")]
    ShapeMismatch { expected: usize, found: usize },

    /// Unsupported type for document conversion
    #[error("Unsupported type: {0}")]
    UnsupportedType(String),

    /// Custom error
    #[error("Error: {0}")]
    Custom(String),
}

impl Error {
    /// Creates a malformed sequence error.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_tokseq::Error;
    ///
    /// let err = Error::malformed_sequence("unbalanced brackets");
    /// assert!(err.to_string().contains("unbalanced brackets"));
    /// ```
    pub fn malformed_sequence<T: fmt::Display>(msg: T) -> Self {
        Error::MalformedSequence(msg.to_string())
    }

    /// Creates an invalid argument error.
    pub fn invalid_argument(msg: &str) -> Self {
        Error::InvalidArgument(msg.to_string())
    }

    /// Creates a file-not-found error for `path`.
    pub fn file_not_found(path: impl Into<PathBuf>) -> Self {
        Error::FileNotFound { path: path.into() }
    }

    /// Creates an invalid document error for the file at `path`.
    pub fn invalid_document<T: fmt::Display>(path: impl Into<PathBuf>, msg: T) -> Self {
        Error::InvalidDocument {
            path: path.into(),
            msg: msg.to_string(),
        }
    }

    /// Creates a shape mismatch error.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_tokseq::Error;
    ///
    /// let err = Error::shape_mismatch(4, 3);
    /// assert!(err.to_string().contains("expected 4"));
    /// ```
    pub fn shape_mismatch(expected: usize, found: usize) -> Self {
        Error::ShapeMismatch { expected, found }
    }

    /// Creates an input type error.
    pub fn input_type(msg: &str) -> Self {
        Error::InputType(msg.to_string())
    }

    /// Creates a configuration error.
    pub fn config<T: fmt::Display>(msg: T) -> Self {
        Error::Config(msg.to_string())
    }

    /// Creates an unsupported type error for shapes a document cannot hold.
    pub fn unsupported_type(msg: &str) -> Self {
        Error::UnsupportedType(msg.to_string())
    }

    /// Creates a custom error with a display message.
    pub fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }

    /// Creates an I/O error.
    pub fn io(msg: &str) -> Self {
        Error::Io(msg.to_string())
    }
}

impl serde::ser::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

impl serde::de::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_not_found_message() {
        let err = Error::file_not_found("missing.json");
        let msg = err.to_string();
        assert!(msg.contains("not correct"));
        assert!(msg.contains("missing.json"));
    }

    #[test]
    fn test_missing_api_key_message() {
        assert_eq!(
            Error::MissingApiKey.to_string(),
            "An API Key must be defined in the configuration file."
        );
    }

    #[test]
    fn test_serde_custom() {
        let err = <Error as serde::de::Error>::custom("bad value");
        assert!(matches!(err, Error::Custom(ref m) if m == "bad value"));
    }
}
