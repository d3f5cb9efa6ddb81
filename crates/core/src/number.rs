//! Card number formatting
//!
//! # Format
//!
//! ```text
//! +--------+-----------+------------------+
//! | prefix | type code | sequence value   |
//! | "55"   | 3 digits  | 9 digits         |
//! +--------+-----------+------------------+
//! ```
//!
//! Both numeric parts are zero-padded. Values wider than their slot are
//! rejected instead of being truncated.

use crate::error::{Error, Result};

/// Prefix shared by every issued card number
pub const CARD_PREFIX: &str = "55";

/// Width of the type code slot
pub const TYPE_CODE_WIDTH: usize = 3;

/// Width of the sequence slot
pub const SEQUENCE_WIDTH: usize = 9;

/// Largest type code that fits its slot
pub const MAX_TYPE_CODE: u16 = 999;

/// Largest sequence value that fits its slot
pub const MAX_SEQUENCE_VALUE: u64 = 999_999_999;

/// Maps `(sequence value, type code)` to a fixed-width card number
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardNumberFormatter {
    prefix: String,
}

impl CardNumberFormatter {
    /// Formatter with a custom prefix.
    ///
    /// # Errors
    ///
    /// `InvalidInput` if the prefix is empty or contains non-digits.
    pub fn with_prefix(prefix: impl Into<String>) -> Result<Self> {
        let prefix = prefix.into();
        if prefix.is_empty() || !prefix.bytes().all(|b| b.is_ascii_digit()) {
            return Err(Error::invalid_input(format!(
                "card prefix must be a non-empty digit string, got '{}'",
                prefix
            )));
        }
        Ok(CardNumberFormatter { prefix })
    }

    /// Prefix in use
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Total length of every number this formatter produces
    pub fn number_len(&self) -> usize {
        self.prefix.len() + TYPE_CODE_WIDTH + SEQUENCE_WIDTH
    }

    /// Format a card number.
    ///
    /// # Errors
    ///
    /// `InvalidInput` if `sequence_value` exceeds 9 digits or `type_code`
    /// exceeds 3 digits.
    pub fn format(&self, sequence_value: u64, type_code: u16) -> Result<String> {
        if sequence_value > MAX_SEQUENCE_VALUE {
            return Err(Error::invalid_input(format!(
                "sequence value {} does not fit in {} digits",
                sequence_value, SEQUENCE_WIDTH
            )));
        }
        if type_code > MAX_TYPE_CODE {
            return Err(Error::invalid_input(format!(
                "type code {} does not fit in {} digits",
                type_code, TYPE_CODE_WIDTH
            )));
        }
        Ok(format!(
            "{}{:03}{:09}",
            self.prefix, type_code, sequence_value
        ))
    }

    /// Split a number produced by [`format`](Self::format) back into
    /// `(type code, sequence value)`. `None` if it does not match the layout.
    pub fn parse(&self, number: &str) -> Option<(u16, u64)> {
        if number.len() != self.number_len() || !number.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        let rest = number.strip_prefix(self.prefix.as_str())?;
        let (code, seq) = rest.split_at(TYPE_CODE_WIDTH);
        Some((code.parse().ok()?, seq.parse().ok()?))
    }
}

impl Default for CardNumberFormatter {
    fn default() -> Self {
        CardNumberFormatter {
            prefix: CARD_PREFIX.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn formats_gift_number() {
        let f = CardNumberFormatter::default();
        assert_eq!(f.format(1000, 111).unwrap(), "55111000001000");
    }

    #[test]
    fn formats_zero_sequence() {
        let f = CardNumberFormatter::default();
        assert_eq!(f.format(0, 222).unwrap(), "55222000000000");
    }

    #[test]
    fn pads_small_type_code() {
        let f = CardNumberFormatter::default();
        assert_eq!(f.format(7, 5).unwrap(), "55005000000007");
    }

    #[test]
    fn accepts_widest_values() {
        let f = CardNumberFormatter::default();
        assert_eq!(
            f.format(MAX_SEQUENCE_VALUE, MAX_TYPE_CODE).unwrap(),
            "55999999999999"
        );
    }

    #[test]
    fn rejects_sequence_overflow() {
        let f = CardNumberFormatter::default();
        let err = f.format(MAX_SEQUENCE_VALUE + 1, 111).unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }

    #[test]
    fn rejects_type_code_overflow() {
        let f = CardNumberFormatter::default();
        assert!(matches!(
            f.format(1, 1000),
            Err(Error::InvalidInput(_))
        ));
    }

    #[test]
    fn custom_prefix() {
        let f = CardNumberFormatter::with_prefix("4").unwrap();
        assert_eq!(f.format(12, 111).unwrap(), "4111000000012");
        assert!(CardNumberFormatter::with_prefix("").is_err());
        assert!(CardNumberFormatter::with_prefix("5x").is_err());
    }

    #[test]
    fn parse_rejects_foreign_numbers() {
        let f = CardNumberFormatter::default();
        assert_eq!(f.parse("44111000001000"), None);
        assert_eq!(f.parse("5511100000100"), None);
        assert_eq!(f.parse("55111000a01000"), None);
    }

    proptest! {
        #[test]
        fn parse_inverts_format(seq in 0..=MAX_SEQUENCE_VALUE, code in 0..=MAX_TYPE_CODE) {
            let f = CardNumberFormatter::default();
            let number = f.format(seq, code).unwrap();
            prop_assert_eq!(number.len(), f.number_len());
            prop_assert_eq!(f.parse(&number), Some((code, seq)));
        }

        #[test]
        fn numbers_order_like_sequences(a in 0..MAX_SEQUENCE_VALUE, b in 0..MAX_SEQUENCE_VALUE) {
            let f = CardNumberFormatter::default();
            let na = f.format(a, 111).unwrap();
            let nb = f.format(b, 111).unwrap();
            prop_assert_eq!(a.cmp(&b), na.cmp(&nb));
        }
    }
}
