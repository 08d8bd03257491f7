//! Receipt assembly from raw payload text.

mod assembler;

pub use assembler::ReceiptAssembler;

use crate::error::ParseError;
use crate::models::receipt::Receipt;

/// Result type for assembly operations.
pub type Result<T> = std::result::Result<T, ParseError>;

/// Trait for turning payload text into a receipt.
pub trait ReceiptParser {
    /// Assemble a receipt. Fails only on structurally degenerate input; no
    /// partial receipt is returned in that case.
    fn assemble(&self, text: &str) -> Result<Receipt>;
}
