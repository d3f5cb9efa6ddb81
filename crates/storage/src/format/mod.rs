//! On-disk line formats
//!
//! Both store files are comma-separated text with a header line:
//! - `card_row`: one row per issued card
//! - `sequence_row`: a single row holding the counter

pub mod card_row;
pub mod sequence_row;

pub use card_row::{decode_card, encode_card, CARD_FIELD_COUNT, CARD_HEADER};
pub use sequence_row::{decode_sequence, encode_sequence, SEQUENCE_FIELD_COUNT, SEQUENCE_HEADER};

/// Field separator for both formats
pub const FIELD_SEPARATOR: char = ',';

/// Why a stored row could not be decoded
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RowError {
    /// Wrong number of fields
    #[error("expected {expected} fields, found {found}")]
    FieldCount {
        /// Fields the format requires
        expected: usize,
        /// Fields present in the row
        found: usize,
    },

    /// Type column is not a known card type
    #[error("unknown card type '{0}'")]
    UnknownType(String),

    /// Amount column is not a decimal
    #[error("invalid amount '{0}'")]
    InvalidAmount(String),

    /// Integer column is not an unsigned integer
    #[error("invalid {field} '{value}'")]
    InvalidNumber {
        /// Column name
        field: &'static str,
        /// Offending text
        value: String,
    },

    /// Text field holds a separator or line break and cannot be stored
    #[error("{field} '{value}' must not contain commas or line breaks")]
    UnstorableText {
        /// Column name
        field: &'static str,
        /// Offending text
        value: String,
    },
}

/// Check that `value` can be written as a single field.
pub fn check_text_field(field: &'static str, value: &str) -> Result<(), RowError> {
    if value.contains([FIELD_SEPARATOR, '\n', '\r']) {
        return Err(RowError::UnstorableText {
            field,
            value: value.to_string(),
        });
    }
    Ok(())
}

/// Split a row, requiring exactly `expected` fields.
pub(crate) fn split_fields(line: &str, expected: usize) -> Result<Vec<&str>, RowError> {
    let parts: Vec<&str> = line.split(FIELD_SEPARATOR).collect();
    if parts.len() != expected {
        return Err(RowError::FieldCount {
            expected,
            found: parts.len(),
        });
    }
    Ok(parts)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_is_storable() {
        assert!(check_text_field("actor", "System").is_ok());
        assert!(check_text_field("actor", "batch job #2").is_ok());
    }

    #[test]
    fn separators_and_line_breaks_are_not() {
        for bad in ["gift,cards", "two\nlines", "cr\r"] {
            assert!(matches!(
                check_text_field("name", bad),
                Err(RowError::UnstorableText { field: "name", .. })
            ));
        }
    }

    #[test]
    fn split_requires_exact_count() {
        assert_eq!(split_fields("a,b,c", 3).unwrap(), vec!["a", "b", "c"]);
        assert!(split_fields("a,b,c,d", 3).is_err());
    }
}
