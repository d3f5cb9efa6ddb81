//! Generator builder for explicit composition
//!
//! The builder requires both stores; nothing is defaulted silently.
//!
//! ```ignore
//! use cardgen_engine::CardGenerator;
//!
//! // 1. From config (file stores, or pass-through cards when persistence is off)
//! let generator = CardGenerator::from_config(&config)?;
//!
//! // 2. Explicit stores
//! let generator = CardGenerator::builder()
//!     .card_store(Arc::new(InMemoryCardStore::new()))
//!     .sequence_store(Arc::new(InMemorySequenceStore::new(record)))
//!     .build()?;
//! ```

use super::{CardGenConfig, CardGenerator};
use cardgen_core::{CardNumberFormatter, CardStore, Error, Result, SequenceStore, SYSTEM_ACTOR};
use cardgen_storage::format::check_text_field;
use cardgen_storage::{FileCardStore, FileSequenceStore, PassThroughCardStore};
use parking_lot::Mutex;
use std::sync::Arc;

/// Builder for [`CardGenerator`]
pub struct CardGeneratorBuilder {
    cards: Option<Arc<dyn CardStore>>,
    sequence: Option<Arc<dyn SequenceStore>>,
    formatter: CardNumberFormatter,
    actor: String,
}

impl CardGeneratorBuilder {
    /// Create new builder with defaults
    ///
    /// Defaults to the `"55"` card prefix and the `System` actor.
    pub fn new() -> Self {
        Self {
            cards: None,
            sequence: None,
            formatter: CardNumberFormatter::default(),
            actor: SYSTEM_ACTOR.to_string(),
        }
    }

    /// Builder with stores selected by `config`
    ///
    /// # Errors
    ///
    /// `Config` if the config fails validation.
    pub fn from_config(config: &CardGenConfig) -> Result<Self> {
        config.validate()?;
        let builder = Self::new()
            .sequence_store(Arc::new(FileSequenceStore::new(&config.sequence_file)))
            .actor(config.actor.clone());
        Ok(if config.persist_cards {
            builder.card_store(Arc::new(FileCardStore::new(&config.card_file)))
        } else {
            builder.card_store(Arc::new(PassThroughCardStore))
        })
    }

    /// Set the card store
    pub fn card_store<S: CardStore + 'static>(mut self, store: Arc<S>) -> Self {
        self.cards = Some(store);
        self
    }

    /// Set the sequence store
    pub fn sequence_store<S: SequenceStore + 'static>(mut self, store: Arc<S>) -> Self {
        self.sequence = Some(store);
        self
    }

    /// Set the actor recorded on cards and sequence updates
    pub fn actor(mut self, actor: impl Into<String>) -> Self {
        self.actor = actor.into();
        self
    }

    /// Use a custom number formatter
    pub fn formatter(mut self, formatter: CardNumberFormatter) -> Self {
        self.formatter = formatter;
        self
    }

    /// Build the generator
    ///
    /// # Errors
    ///
    /// `Config` if a store is missing, or the actor is empty or holds a
    /// comma or line break (it is written into every card and sequence row).
    pub fn build(self) -> Result<CardGenerator> {
        let cards = self
            .cards
            .ok_or_else(|| Error::config("CardGeneratorBuilder::build() requires a card store"))?;
        let sequence = self.sequence.ok_or_else(|| {
            Error::config("CardGeneratorBuilder::build() requires a sequence store")
        })?;
        if self.actor.trim().is_empty() {
            return Err(Error::config("actor must not be empty"));
        }
        check_text_field("actor", &self.actor).map_err(|e| Error::config(e.to_string()))?;
        Ok(CardGenerator {
            cards,
            sequence,
            formatter: self.formatter,
            actor: self.actor,
            run_lock: Mutex::new(()),
        })
    }
}

impl Default for CardGeneratorBuilder {
    fn default() -> Self {
        Self::new()
    }
}
