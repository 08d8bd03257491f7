//! Tolerant field extraction from loosely structured payload text.
//!
//! Extraction runs in two passes: [`tokenizer`] splits the text into tokens,
//! [`document`] folds them into a loose tree that callers query through
//! [`Fields`] scopes. A missing or mistyped field is always `None`; only an
//! unterminated string, a dangling escape or runaway nesting is an error.

pub mod document;
pub mod scalars;
pub mod tokenizer;

pub use document::{Document, Fields, Value};
pub use scalars::{parse_bool, parse_decimal, parse_int, parse_timestamp};

use crate::error::ParseError;

/// Look up the first occurrence of `field` in `text`.
///
/// Returns `Ok(None)` when the key is absent or its value is not a scalar.
pub fn lookup(text: &str, field: &str) -> Result<Option<String>, ParseError> {
    let document = Document::parse(text)?;
    Ok(document
        .find(field)
        .and_then(Value::as_str)
        .map(str::to_string))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_escaped_quotes() {
        let text = r#"{"name":"A \"B\" C"}"#;
        assert_eq!(lookup(text, "name").unwrap(), Some(r#"A "B" C"#.to_string()));
    }

    #[test]
    fn test_lookup_first_occurrence() {
        let text = r#"{"customer":{"name":"Ann"},"items":[{"name":"Tea"}]}"#;
        assert_eq!(lookup(text, "name").unwrap(), Some("Ann".to_string()));
    }

    #[test]
    fn test_lookup_missing_and_bare_values() {
        let text = r#"{"quantity": 3, "customer": {"name": "Ann"}}"#;
        assert_eq!(lookup(text, "quantity").unwrap(), Some("3".to_string()));
        assert_eq!(lookup(text, "notes").unwrap(), None);
        assert_eq!(lookup(text, "customer").unwrap(), None);
    }

    #[test]
    fn test_lookup_structural_failure() {
        let err = lookup(r#"{"orderId":"12"#, "orderId").unwrap_err();
        assert!(matches!(err, ParseError::UnterminatedString { .. }));
    }
}
