//! Error handling for collision log conversion.
//!
//! Distinguishes missing input, malformed rows and unwritable output so the
//! CLI can report each with its own exit code.

use crate::constants::exit_codes;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConversionError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    #[error("Input file not found: {path}")]
    InputNotFound { path: PathBuf },

    #[error("Malformed row at line {line}: expected token {index}, found only {found} tokens")]
    MissingToken {
        line: usize,
        index: usize,
        found: usize,
    },

    #[error("Malformed row at line {line}: column '{column}' is not a number: '{token}'")]
    InvalidNumber {
        line: usize,
        column: String,
        token: String,
    },

    #[error(
        "Malformed row at line {line}: {tokens} tokens carry extended fields, but the first data row chose the basic layout (use --layout extended or --layout basic)"
    )]
    UnexpectedExtendedRow { line: usize, tokens: usize },

    #[error("Cannot write output file: {path}")]
    OutputNotWritable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Unexpected columns in {path}: {columns:?}")]
    SchemaMismatch { path: PathBuf, columns: Vec<String> },

    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

impl ConversionError {
    /// True for errors raised by a data row that could not be parsed
    pub fn is_malformed_row(&self) -> bool {
        matches!(
            self,
            ConversionError::MissingToken { .. }
                | ConversionError::InvalidNumber { .. }
                | ConversionError::UnexpectedExtendedRow { .. }
        )
    }

    /// Process exit code for this failure kind
    pub fn exit_code(&self) -> i32 {
        match self {
            ConversionError::InputNotFound { .. } => exit_codes::INPUT_NOT_FOUND,
            ConversionError::MissingToken { .. }
            | ConversionError::InvalidNumber { .. }
            | ConversionError::UnexpectedExtendedRow { .. } => exit_codes::MALFORMED_ROW,
            ConversionError::OutputNotWritable { .. } => exit_codes::OUTPUT_NOT_WRITABLE,
            ConversionError::Configuration { .. } => exit_codes::CONFIGURATION,
            _ => exit_codes::FAILURE,
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        ConversionError::Configuration {
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ConversionError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_row_kinds() {
        let missing = ConversionError::MissingToken {
            line: 3,
            index: 3,
            found: 2,
        };
        let invalid = ConversionError::InvalidNumber {
            line: 4,
            column: "time".to_string(),
            token: "abc".to_string(),
        };
        let extended = ConversionError::UnexpectedExtendedRow { line: 5, tokens: 18 };
        assert!(extended.is_malformed_row());
        assert_eq!(extended.exit_code(), exit_codes::MALFORMED_ROW);
        assert!(missing.is_malformed_row());
        assert!(invalid.is_malformed_row());
        assert_eq!(missing.exit_code(), exit_codes::MALFORMED_ROW);
        assert_eq!(invalid.exit_code(), exit_codes::MALFORMED_ROW);
    }

    #[test]
    fn test_exit_codes_by_kind() {
        let not_found = ConversionError::InputNotFound {
            path: PathBuf::from("missing.txt"),
        };
        let unwritable = ConversionError::OutputNotWritable {
            path: PathBuf::from("/nope/out.csv"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        let config = ConversionError::configuration("bad");
        let io: ConversionError =
            std::io::Error::new(std::io::ErrorKind::Other, "boom").into();

        assert_eq!(not_found.exit_code(), exit_codes::INPUT_NOT_FOUND);
        assert_eq!(unwritable.exit_code(), exit_codes::OUTPUT_NOT_WRITABLE);
        assert_eq!(config.exit_code(), exit_codes::CONFIGURATION);
        assert_eq!(io.exit_code(), exit_codes::FAILURE);
        assert!(!not_found.is_malformed_row());
    }

    #[test]
    fn test_messages_name_the_line() {
        let err = ConversionError::InvalidNumber {
            line: 7,
            column: "p2".to_string(),
            token: "x1".to_string(),
        };
        let message = err.to_string();
        assert!(message.contains("line 7"));
        assert!(message.contains("'p2'"));
        assert!(message.contains("'x1'"));
    }
}
