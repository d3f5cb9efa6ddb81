//! Card row format
//!
//! # Format
//!
//! ```text
//! Number,Type,Amount,CreatedDate,CreatedBy,UpdatedDate,UpdatedBy,ExtraInfo
//! 55111000001000,GIFT,100.00,2025-04-11T11:00:00,System,2025-04-11T11:00:00,System,100.00
//! 55222000001005,PREPAID,50,2025-04-11T11:00:00,System,2025-04-11T11:00:00,System,2026-01-01T00:00:00
//! 55222000001006,PREPAID,50,2025-04-11T11:00:00,System,2025-04-11T11:00:00,System,
//! ```
//!
//! `ExtraInfo` is the purchase amount for gift cards and the expiration (or
//! nothing) for prepaid cards.

use super::{split_fields, RowError};
use cardgen_core::timestamp::format_timestamp;
use cardgen_core::{Card, CardDetails, CardFactory, CardType, Reconstructed, StoredCardFields};
use rust_decimal::Decimal;
use std::str::FromStr;

/// Header line of the card file
pub const CARD_HEADER: &str = "Number,Type,Amount,CreatedDate,CreatedBy,UpdatedDate,UpdatedBy,ExtraInfo";

/// Number of fields in a card row
pub const CARD_FIELD_COUNT: usize = 8;

/// Render one card as a row (no trailing newline).
pub fn encode_card(card: &Card) -> String {
    let extra = match card.details() {
        CardDetails::Gift {
            original_purchase_amount,
        } => original_purchase_amount.to_string(),
        CardDetails::Prepaid { expiration } => {
            expiration.as_ref().map(format_timestamp).unwrap_or_default()
        }
    };
    format!(
        "{},{},{},{},{},{},{},{}",
        card.number(),
        card.card_type(),
        card.balance(),
        format_timestamp(&card.created_at()),
        card.created_by(),
        format_timestamp(&card.updated_at()),
        card.updated_by(),
        extra
    )
}

/// Decode one row.
///
/// Fails only when a mandatory field (field count, type, amount) is
/// unreadable. Malformed optional fields are handled by
/// [`CardFactory::reconstruct`] and counted in the result.
pub fn decode_card(line: &str) -> Result<Reconstructed, RowError> {
    let parts = split_fields(line, CARD_FIELD_COUNT)?;

    let card_type =
        CardType::from_str(parts[1]).map_err(|_| RowError::UnknownType(parts[1].to_string()))?;
    let balance = Decimal::from_str(parts[2].trim())
        .map_err(|_| RowError::InvalidAmount(parts[2].to_string()))?;

    Ok(CardFactory::reconstruct(
        card_type,
        StoredCardFields {
            number: parts[0],
            balance,
            created_at: parts[3],
            created_by: parts[4],
            updated_at: parts[5],
            updated_by: parts[6],
            extra: parts[7],
        },
    ))
}
