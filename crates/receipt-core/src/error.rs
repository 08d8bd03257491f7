//! Error types for the receipt-core library.

use thiserror::Error;

/// Main error type for the receipt library.
#[derive(Error, Debug)]
pub enum ReceiptError {
    /// Payload too malformed to assemble any receipt.
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// The render surface failed while executing draw commands.
    #[error("render error: {0}")]
    Render(#[from] RenderError),

    /// Store profile error.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Structural failures of the payload tokenizer.
///
/// Missing or mistyped fields are never reported here; these variants only
/// cover input the extractor cannot walk at all.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// A quoted string was opened but never closed.
    #[error("unterminated string starting at byte {offset}")]
    UnterminatedString { offset: usize },

    /// Input ended in the middle of an escape sequence.
    #[error("dangling escape at byte {offset}")]
    DanglingEscape { offset: usize },

    /// Objects or arrays nested deeper than the tokenizer allows.
    #[error("nesting deeper than {depth} levels")]
    NestingTooDeep { depth: usize },
}

/// Errors raised by a render surface.
#[derive(Error, Debug)]
pub enum RenderError {
    /// The surface rejected a draw call.
    #[error("surface rejected {operation}: {reason}")]
    Surface { operation: &'static str, reason: String },

    /// The output device is not available.
    #[error("device unavailable: {0}")]
    Unavailable(String),

    /// I/O error while writing to the device.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors related to store profile handling.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Key is not a known profile setting.
    #[error("unknown profile key: {0}")]
    UnknownKey(String),

    /// Value could not be parsed for the given key.
    #[error("invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },
}

/// Result type for the receipt library.
pub type Result<T> = std::result::Result<T, ReceiptError>;
