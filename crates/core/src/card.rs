//! Card entities
//!
//! A [`Card`] is an immutable value: it is built once by the
//! [`CardFactory`](crate::factory::CardFactory), persisted once, and never
//! mutated. The type-specific part lives in [`CardDetails`], so the card type
//! is always derived from the variant and can never disagree with it.

use crate::error::Error;
use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Closed set of card types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CardType {
    /// Gift card; remembers its original purchase amount
    Gift,
    /// Prepaid card; may expire
    Prepaid,
}

impl CardType {
    /// Every card type, in menu order
    pub const ALL: [CardType; 2] = [CardType::Gift, CardType::Prepaid];

    /// 3-digit code embedded in the card number
    pub const fn type_code(self) -> u16 {
        match self {
            CardType::Gift => 111,
            CardType::Prepaid => 222,
        }
    }

    /// Stored textual form
    pub const fn as_str(self) -> &'static str {
        match self {
            CardType::Gift => "GIFT",
            CardType::Prepaid => "PREPAID",
        }
    }
}

impl fmt::Display for CardType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CardType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "GIFT" => Ok(CardType::Gift),
            "PREPAID" => Ok(CardType::Prepaid),
            other => Err(Error::invalid_input(format!("unknown card type '{}'", other))),
        }
    }
}

/// Type-specific card data
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CardDetails {
    /// Gift card extra field
    Gift {
        /// Amount paid at issuance (equal to the initial balance)
        original_purchase_amount: Decimal,
    },
    /// Prepaid card extra field
    Prepaid {
        /// Optional expiration timestamp
        expiration: Option<NaiveDateTime>,
    },
}

impl CardDetails {
    /// Card type of this variant
    pub fn card_type(&self) -> CardType {
        match self {
            CardDetails::Gift { .. } => CardType::Gift,
            CardDetails::Prepaid { .. } => CardType::Prepaid,
        }
    }
}

/// An issued card
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub(crate) number: String,
    pub(crate) balance: Decimal,
    pub(crate) created_at: NaiveDateTime,
    pub(crate) created_by: String,
    pub(crate) updated_at: NaiveDateTime,
    pub(crate) updated_by: String,
    pub(crate) details: CardDetails,
}

impl Card {
    /// Unique card number
    pub fn number(&self) -> &str {
        &self.number
    }

    /// Card type, derived from the details variant
    pub fn card_type(&self) -> CardType {
        self.details.card_type()
    }

    /// Current balance
    pub fn balance(&self) -> Decimal {
        self.balance
    }

    /// Creation timestamp
    pub fn created_at(&self) -> NaiveDateTime {
        self.created_at
    }

    /// Creating actor
    pub fn created_by(&self) -> &str {
        &self.created_by
    }

    /// Last update timestamp
    pub fn updated_at(&self) -> NaiveDateTime {
        self.updated_at
    }

    /// Last updating actor
    pub fn updated_by(&self) -> &str {
        &self.updated_by
    }

    /// Type-specific data
    pub fn details(&self) -> &CardDetails {
        &self.details
    }

    /// Original purchase amount, for gift cards
    pub fn original_purchase_amount(&self) -> Option<Decimal> {
        match self.details {
            CardDetails::Gift {
                original_purchase_amount,
            } => Some(original_purchase_amount),
            CardDetails::Prepaid { .. } => None,
        }
    }

    /// Expiration, for prepaid cards that have one
    pub fn expiration(&self) -> Option<NaiveDateTime> {
        match self.details {
            CardDetails::Prepaid { expiration } => expiration,
            CardDetails::Gift { .. } => None,
        }
    }
}
