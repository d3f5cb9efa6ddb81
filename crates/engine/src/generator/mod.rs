//! Card generation engine
//!
//! A generation run walks through these phases:
//!
//! ```text
//! Idle -> SequenceReserved -> CardsBuilt -> CardsPersisted -> SequenceAdvanced -> Done
//! ```
//!
//! Any failure after validation ends the run as [`GenerationError`], which
//! records the last phase reached. The ordering is what keeps the counter
//! honest:
//!
//! - cards are written before the counter moves, so a failed write never
//!   leaves a gap in issued numbers
//! - a failed advance after a successful write is reported as
//!   [`Error::SequenceNotAdvanced`] and never retried
//!
//! Runs on one generator are serialized from the sequence read to the
//! sequence advance. There is no cross-process locking.

mod builder;
pub mod config;
pub mod registry;

pub use builder::CardGeneratorBuilder;
pub use config::{CardGenConfig, CONFIG_FILE_NAME};

use cardgen_core::timestamp::now;
use cardgen_core::{
    Card, CardFactory, CardNumberFormatter, CardStore, CardType, Error, SequenceRange,
    SequenceRecord, SequenceStore,
};
use chrono::NaiveDateTime;
use parking_lot::Mutex;
use rust_decimal::Decimal;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, error, info};

/// Phase of a generation run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationPhase {
    /// Nothing reserved yet
    Idle,
    /// Start value read and range computed
    SequenceReserved,
    /// Cards built in memory
    CardsBuilt,
    /// Cards accepted by the card store
    CardsPersisted,
    /// Counter advanced past the range
    SequenceAdvanced,
    /// Run complete
    Done,
}

impl fmt::Display for GenerationPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            GenerationPhase::Idle => "idle",
            GenerationPhase::SequenceReserved => "sequence-reserved",
            GenerationPhase::CardsBuilt => "cards-built",
            GenerationPhase::CardsPersisted => "cards-persisted",
            GenerationPhase::SequenceAdvanced => "sequence-advanced",
            GenerationPhase::Done => "done",
        };
        f.write_str(name)
    }
}

/// A failed generation run
#[derive(Debug, thiserror::Error)]
#[error("card generation failed after reaching {reached}: {source}")]
pub struct GenerationError {
    /// Last phase the run reached before failing.
    ///
    /// `Idle` covers every failure before a range exists, including a
    /// reservation that overflows the counter. `SequenceReserved` means a
    /// range was computed, so a failure there (such as numbers too wide for
    /// the card layout) happened while building cards.
    pub reached: GenerationPhase,
    /// Underlying cause
    #[source]
    pub source: Error,
}

impl GenerationError {
    fn new(reached: GenerationPhase, source: Error) -> Self {
        GenerationError { reached, source }
    }

    /// Underlying cause
    pub fn error(&self) -> &Error {
        &self.source
    }

    /// True if cards were durably written even though the run failed
    pub fn cards_committed(&self) -> bool {
        matches!(self.reached, GenerationPhase::CardsPersisted)
    }
}

/// Parameters of one generation run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    /// Number of cards, must be positive
    pub count: u64,
    /// Balance of each card, must be positive
    pub balance: Decimal,
    /// Type of every card in the batch
    pub card_type: CardType,
    /// Expiration for prepaid cards; ignored for gift cards
    pub expiration: Option<NaiveDateTime>,
}

impl GenerationRequest {
    /// Gift card request
    pub fn gift(count: u64, balance: Decimal) -> Self {
        GenerationRequest {
            count,
            balance,
            card_type: CardType::Gift,
            expiration: None,
        }
    }

    /// Prepaid card request
    pub fn prepaid(count: u64, balance: Decimal, expiration: Option<NaiveDateTime>) -> Self {
        GenerationRequest {
            count,
            balance,
            card_type: CardType::Prepaid,
            expiration,
        }
    }

    fn validate(&self) -> cardgen_core::Result<()> {
        if self.count == 0 {
            return Err(Error::invalid_input("card count must be positive"));
        }
        if self.balance <= Decimal::ZERO {
            return Err(Error::invalid_input(format!(
                "card balance must be positive, got {}",
                self.balance
            )));
        }
        Ok(())
    }
}

/// Successful run output
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedBatch {
    /// Issued cards, in sequence order
    pub cards: Vec<Card>,
    /// Sequence values consumed
    pub range: SequenceRange,
    /// Counter record after the advance
    pub record: SequenceRecord,
}

impl GeneratedBatch {
    /// Number of the first card
    pub fn first_number(&self) -> Option<&str> {
        self.cards.first().map(Card::number)
    }

    /// Number of the last card
    pub fn last_number(&self) -> Option<&str> {
        self.cards.last().map(Card::number)
    }
}

/// Card generation engine
///
/// Build one with [`CardGenerator::builder`] or, for the process-wide
/// instance behind a config, [`registry::open_shared`].
pub struct CardGenerator {
    cards: Arc<dyn CardStore>,
    sequence: Arc<dyn SequenceStore>,
    formatter: CardNumberFormatter,
    actor: String,
    run_lock: Mutex<()>,
}

impl fmt::Debug for CardGenerator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CardGenerator")
            .field("prefix", &self.formatter.prefix())
            .field("actor", &self.actor)
            .finish_non_exhaustive()
    }
}

impl CardGenerator {
    /// Start configuring a generator
    pub fn builder() -> CardGeneratorBuilder {
        CardGeneratorBuilder::new()
    }

    /// Generator with stores chosen by `config`
    ///
    /// # Errors
    ///
    /// `Config` if the config fails validation.
    pub fn from_config(config: &CardGenConfig) -> cardgen_core::Result<Self> {
        CardGeneratorBuilder::from_config(config)?.build()
    }

    /// The card store in use
    pub fn card_store(&self) -> &Arc<dyn CardStore> {
        &self.cards
    }

    /// The sequence store in use
    pub fn sequence_store(&self) -> &Arc<dyn SequenceStore> {
        &self.sequence
    }

    /// Actor recorded on issued cards
    pub fn actor(&self) -> &str {
        &self.actor
    }

    /// Generate, persist and commit one batch.
    ///
    /// # Errors
    ///
    /// - `InvalidInput` for a zero count, non-positive balance or a range
    ///   whose numbers would not fit the card number layout
    /// - `NotFound` if the sequence store has no record
    /// - a store error if the cards could not be written (counter untouched)
    /// - `SequenceNotAdvanced` if the cards were written but the counter was
    ///   not advanced
    pub fn generate(&self, request: &GenerationRequest) -> Result<GeneratedBatch, GenerationError> {
        use GenerationPhase::*;

        request
            .validate()
            .map_err(|e| GenerationError::new(Idle, e))?;

        let _run = self.run_lock.lock();

        let start = self
            .sequence
            .current_start()
            .map_err(|e| GenerationError::new(Idle, e))?;
        info!(start, "retrieved sequence");

        let range = SequenceRange::reserve(start, request.count)
            .map_err(|e| GenerationError::new(Idle, e))?;
        debug!(phase = %SequenceReserved, range = %range);

        let batch = self
            .build(&range, request)
            .map_err(|e| GenerationError::new(SequenceReserved, e))?;
        info!(
            count = request.count,
            card_type = %request.card_type,
            "generating cards"
        );
        debug!(phase = %CardsBuilt);

        let cards = self
            .cards
            .append_all(batch)
            .map_err(|e| GenerationError::new(CardsBuilt, e))?;
        debug!(phase = %CardsPersisted);

        let record = self
            .sequence
            .advance_to(range.next_start(), &self.actor)
            .map_err(|e| {
                GenerationError::new(
                    CardsPersisted,
                    Error::SequenceNotAdvanced {
                        range,
                        source: Box::new(e),
                    },
                )
            })?;
        debug!(phase = %SequenceAdvanced, next_start = record.start_sequence);

        info!(range = %range, count = cards.len(), "generated cards");
        debug!(phase = %Done);
        Ok(GeneratedBatch {
            cards,
            range,
            record,
        })
    }

    /// Consumer-facing entry point.
    ///
    /// Runs [`generate`](Self::generate) and collapses any failure to an
    /// empty vector after logging it.
    pub fn generate_cards(
        &self,
        count: u64,
        balance: Decimal,
        card_type: CardType,
        expiration: Option<NaiveDateTime>,
    ) -> Vec<Card> {
        let request = GenerationRequest {
            count,
            balance,
            card_type,
            expiration,
        };
        match self.generate(&request) {
            Ok(batch) => batch.cards,
            Err(e) => {
                error!(error = %e, committed = e.cards_committed(), "error generating cards");
                Vec::new()
            }
        }
    }

    /// Build the batch for `range`; pure apart from reading the clock.
    fn build(&self, range: &SequenceRange, request: &GenerationRequest) -> cardgen_core::Result<Vec<Card>> {
        let type_code = request.card_type.type_code();
        // The widest value decides whether the whole range fits.
        self.formatter.format(range.end(), type_code)?;

        let created_at = now();
        let mut cards = Vec::with_capacity(range.len() as usize);
        for value in range.values() {
            let number = self.formatter.format(value, type_code)?;
            debug!(number = %number, "generated card number");
            cards.push(CardFactory::create(
                request.card_type,
                number,
                request.balance,
                &self.actor,
                created_at,
                request.expiration,
            ));
        }
        Ok(cards)
    }
}
