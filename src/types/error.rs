//! Error types for the payment action engine
//!
//! The decision engine itself never fails: invalid transaction logs and
//! malformed payment methods are reported as `NoAction` decisions. The errors
//! below cover everything around it.
//!
//! # Error Categories
//!
//! - **Money Errors**: amount strings or scales the converter cannot handle
//! - **File I/O Errors**: input file or catalog file missing or unreadable
//! - **Parse Errors**: a payment snapshot that is not valid JSON for the model
//! - **Catalog Errors**: a payment method catalog that is structurally unusable

use thiserror::Error;

/// Errors raised while converting between minor units and provider amounts
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoneyError {
    /// The provider amount is not a plain decimal number
    #[error("Invalid provider amount '{value}'")]
    InvalidAmount {
        /// The rejected amount string
        value: String,
    },

    /// The fraction digit count is beyond what the converter can scale
    #[error("Unsupported fraction digits {fraction_digits} (maximum {max})")]
    UnsupportedScale {
        /// Requested fraction digit count
        fraction_digits: u32,
        /// Largest supported fraction digit count
        max: u32,
    },

    /// The scaled amount does not fit a minor-unit integer
    #[error("Amount '{value}' overflows at {fraction_digits} fraction digits")]
    Overflow {
        /// The amount being converted
        value: String,
        /// Target fraction digit count
        fraction_digits: u32,
    },
}

impl MoneyError {
    /// Create an InvalidAmount error
    pub fn invalid_amount(value: &str) -> Self {
        MoneyError::InvalidAmount {
            value: value.to_string(),
        }
    }

    /// Create an Overflow error
    pub fn overflow(value: &str, fraction_digits: u32) -> Self {
        MoneyError::Overflow {
            value: value.to_string(),
            fraction_digits,
        }
    }
}

/// Main error type for everything surrounding the decision engine
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    /// File not found at the specified path
    ///
    /// Fatal for the input file and for an explicitly requested catalog.
    #[error("File not found: {path}")]
    FileNotFound {
        /// The path that was not found
        path: String,
    },

    /// I/O error occurred while reading or writing files
    #[error("I/O error: {message}")]
    IoError {
        /// Description of the I/O error
        message: String,
    },

    /// A payment snapshot could not be parsed
    ///
    /// Recoverable: the line is reported and processing continues.
    #[error("Payment parse error{}: {message}", line.map(|l| format!(" at line {}", l)).unwrap_or_default())]
    ParseError {
        /// Input line number (if available)
        line: Option<u64>,
        /// Description of the parsing error
        message: String,
    },

    /// The payment method catalog is unusable
    #[error("Invalid payment method catalog: {message}")]
    CatalogError {
        /// What is wrong with the catalog
        message: String,
    },

    /// Money conversion failed
    #[error(transparent)]
    Money(#[from] MoneyError),
}

impl From<std::io::Error> for EngineError {
    fn from(error: std::io::Error) -> Self {
        EngineError::IoError {
            message: error.to_string(),
        }
    }
}

impl From<serde_json::Error> for EngineError {
    fn from(error: serde_json::Error) -> Self {
        EngineError::ParseError {
            line: None,
            message: error.to_string(),
        }
    }
}

impl EngineError {
    /// Create a ParseError tied to an input line
    pub fn parse_error(line: u64, message: &str) -> Self {
        EngineError::ParseError {
            line: Some(line),
            message: message.to_string(),
        }
    }

    /// Create a CatalogError
    pub fn catalog_error(message: &str) -> Self {
        EngineError::CatalogError {
            message: message.to_string(),
        }
    }

    /// Attach a line number to a ParseError, leaving other errors untouched
    pub fn at_line(self, line: u64) -> Self {
        match self {
            EngineError::ParseError { message, .. } => EngineError::ParseError {
                line: Some(line),
                message,
            },
            other => other,
        }
    }
}
