//! Card construction
//!
//! [`CardFactory::create`] builds a fresh card at issuance;
//! [`CardFactory::reconstruct`] rebuilds one from stored text fields.

use crate::card::{Card, CardDetails, CardType};
use crate::timestamp::{now, parse_timestamp};
use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use std::str::FromStr;
use tracing::warn;

/// Raw text fields of a stored card row, after the mandatory ones were parsed.
#[derive(Debug, Clone, Copy)]
pub struct StoredCardFields<'a> {
    /// Card number
    pub number: &'a str,
    /// Balance (mandatory, already validated)
    pub balance: Decimal,
    /// Creation timestamp text
    pub created_at: &'a str,
    /// Creating actor
    pub created_by: &'a str,
    /// Update timestamp text
    pub updated_at: &'a str,
    /// Updating actor
    pub updated_by: &'a str,
    /// Purchase amount (gift), expiration (prepaid) or empty
    pub extra: &'a str,
}

/// Result of [`CardFactory::reconstruct`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reconstructed {
    /// The rebuilt card
    pub card: Card,
    /// How many fields were malformed and replaced by a fallback
    pub fallbacks: usize,
}

/// Builds [`Card`] values of either type
pub struct CardFactory;

impl CardFactory {
    /// Build a card at issuance.
    ///
    /// Gift cards record `balance` as their original purchase amount and
    /// ignore `expiration`. The update fields mirror the creation fields.
    pub fn create(
        card_type: CardType,
        number: String,
        balance: Decimal,
        created_by: &str,
        created_at: NaiveDateTime,
        expiration: Option<NaiveDateTime>,
    ) -> Card {
        let details = match card_type {
            CardType::Gift => CardDetails::Gift {
                original_purchase_amount: balance,
            },
            CardType::Prepaid => CardDetails::Prepaid { expiration },
        };
        Card {
            number,
            balance,
            created_at,
            created_by: created_by.to_string(),
            updated_at: created_at,
            updated_by: created_by.to_string(),
            details,
        }
    }

    /// Rebuild a card from stored fields.
    ///
    /// Never fails. Unparsable timestamps fall back to the current time, an
    /// unparsable expiration becomes `None` and an unparsable purchase amount
    /// becomes zero; each fallback is counted in [`Reconstructed::fallbacks`].
    pub fn reconstruct(card_type: CardType, fields: StoredCardFields<'_>) -> Reconstructed {
        let mut fallbacks = 0;

        let mut timestamp_or_now = |text: &str, field: &str| {
            parse_timestamp(text).unwrap_or_else(|| {
                warn!(number = fields.number, field, value = text, "unparsable date, using current time");
                fallbacks += 1;
                now()
            })
        };
        let created_at = timestamp_or_now(fields.created_at, "created_at");
        let updated_at = timestamp_or_now(fields.updated_at, "updated_at");

        let extra = fields.extra.trim();
        let details = match card_type {
            CardType::Gift => {
                let original_purchase_amount = Decimal::from_str(extra).unwrap_or_else(|_| {
                    warn!(number = fields.number, value = extra, "unparsable purchase amount");
                    fallbacks += 1;
                    Decimal::ZERO
                });
                CardDetails::Gift {
                    original_purchase_amount,
                }
            }
            CardType::Prepaid => {
                let expiration = if extra.is_empty() {
                    None
                } else {
                    let parsed = parse_timestamp(extra);
                    if parsed.is_none() {
                        warn!(number = fields.number, value = extra, "unparsable expiration, dropping it");
                        fallbacks += 1;
                    }
                    parsed
                };
                CardDetails::Prepaid { expiration }
            }
        };

        Reconstructed {
            card: Card {
                number: fields.number.to_string(),
                balance: fields.balance,
                created_at,
                created_by: fields.created_by.to_string(),
                updated_at,
                updated_by: fields.updated_by.to_string(),
                details,
            },
            fallbacks,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 4, 11)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    fn fields<'a>(extra: &'a str, created: &'a str) -> StoredCardFields<'a> {
        StoredCardFields {
            number: "55111000001000",
            balance: Decimal::new(10000, 2),
            created_at: created,
            created_by: "System",
            updated_at: "2025-04-11T11:00:00",
            updated_by: "System",
            extra,
        }
    }

    #[test]
    fn gift_records_purchase_amount_and_ignores_expiration() {
        let card = CardFactory::create(
            CardType::Gift,
            "55111000000001".to_string(),
            Decimal::new(2500, 2),
            "System",
            at(9, 0),
            Some(at(10, 0)),
        );
        assert_eq!(card.card_type(), CardType::Gift);
        assert_eq!(card.original_purchase_amount(), Some(Decimal::new(2500, 2)));
        assert_eq!(card.expiration(), None);
        assert_eq!(card.updated_at(), card.created_at());
        assert_eq!(card.updated_by(), "System");
    }

    #[test]
    fn prepaid_keeps_optional_expiration() {
        let with = CardFactory::create(
            CardType::Prepaid,
            "55222000000001".to_string(),
            Decimal::ONE,
            "System",
            at(9, 0),
            Some(at(10, 0)),
        );
        let without = CardFactory::create(
            CardType::Prepaid,
            "55222000000002".to_string(),
            Decimal::ONE,
            "System",
            at(9, 0),
            None,
        );
        assert_eq!(with.expiration(), Some(at(10, 0)));
        assert_eq!(without.expiration(), None);
        assert_eq!(with.original_purchase_amount(), None);
    }

    #[test]
    fn reconstruct_clean_gift_row() {
        let rebuilt = CardFactory::reconstruct(CardType::Gift, fields("100.0", "2025-04-11T09:30:00"));
        assert_eq!(rebuilt.fallbacks, 0);
        assert_eq!(rebuilt.card.created_at(), at(9, 30));
        assert_eq!(rebuilt.card.original_purchase_amount(), Some(Decimal::new(1000, 1)));
    }

    #[test]
    fn reconstruct_counts_bad_dates() {
        let rebuilt = CardFactory::reconstruct(CardType::Gift, fields("100.0", "not-a-date"));
        assert_eq!(rebuilt.fallbacks, 1);
        assert_eq!(rebuilt.card.updated_at(), at(11, 0));
    }

    #[test]
    fn reconstruct_bad_gift_amount_is_zero() {
        let rebuilt = CardFactory::reconstruct(CardType::Gift, fields("abc", "2025-04-11T09:30:00"));
        assert_eq!(rebuilt.fallbacks, 1);
        assert_eq!(rebuilt.card.original_purchase_amount(), Some(Decimal::ZERO));
    }

    #[test]
    fn reconstruct_prepaid_expiration_variants() {
        let empty = CardFactory::reconstruct(CardType::Prepaid, fields("", "2025-04-11T09:30:00"));
        assert_eq!(empty.fallbacks, 0);
        assert_eq!(empty.card.expiration(), None);

        let valid = CardFactory::reconstruct(
            CardType::Prepaid,
            fields("2025-04-11T10:00", "2025-04-11T09:30:00"),
        );
        assert_eq!(valid.fallbacks, 0);
        assert_eq!(valid.card.expiration(), Some(at(10, 0)));

        let broken = CardFactory::reconstruct(CardType::Prepaid, fields("soon", "2025-04-11T09:30:00"));
        assert_eq!(broken.fallbacks, 1);
        assert_eq!(broken.card.expiration(), None);
    }
}
