//! Core types and traits for card issuance
//!
//! This crate defines the foundational types used throughout the system:
//! - Card, CardType, CardDetails: issued card entities
//! - SequenceRecord, SequenceRange: the persisted counter and a reserved block
//! - CardNumberFormatter: `(sequence, type code)` to fixed-width number
//! - CardFactory: card construction at issuance and from stored rows
//! - Error: Error type hierarchy
//! - Traits: CardStore, SequenceStore

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod card;
pub mod error;
pub mod factory;
pub mod number;
pub mod sequence;
pub mod timestamp;
pub mod traits;

pub use card::{Card, CardDetails, CardType};
pub use error::{Error, Result};
pub use factory::{CardFactory, Reconstructed, StoredCardFields};
pub use number::{CardNumberFormatter, CARD_PREFIX, MAX_SEQUENCE_VALUE, MAX_TYPE_CODE};
pub use sequence::{SequenceRange, SequenceRecord};
pub use traits::{CardReadReport, CardStore, SequenceStore};

/// Actor recorded on cards and sequence updates made by the system itself
pub const SYSTEM_ACTOR: &str = "System";
