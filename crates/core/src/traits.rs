//! Store traits
//!
//! The engine only talks to persistence through these two traits, so a file
//! backend, an in-memory backend and the persistence-disabled pass-through are
//! interchangeable.

use crate::card::Card;
use crate::error::Result;
use crate::sequence::SequenceRecord;

/// Outcome of a best-effort card read
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CardReadReport {
    /// Cards that could be rebuilt
    pub cards: Vec<Card>,
    /// Rows dropped because a mandatory field was unreadable
    pub skipped_rows: usize,
    /// Optional fields replaced by a fallback (dates set to now, etc.)
    pub fallback_fields: usize,
}

impl CardReadReport {
    /// True if every row was read without skipping or falling back
    pub fn is_clean(&self) -> bool {
        self.skipped_rows == 0 && self.fallback_fields == 0
    }
}

/// Append-only card persistence
///
/// # Contract
///
/// - `append_all` is additive: existing records are never touched
/// - a failed `append_all` returns an error; the caller must treat the batch
///   as not committed
/// - reads are best-effort: a malformed row is skipped, not fatal
pub trait CardStore: Send + Sync {
    /// Persist `cards` after any existing records; returns the same cards.
    fn append_all(&self, cards: Vec<Card>) -> Result<Vec<Card>>;

    /// Read every readable card with skip/fallback counts.
    fn read_all_with_report(&self) -> Result<CardReadReport>;

    /// Read every readable card.
    fn read_all(&self) -> Result<Vec<Card>> {
        self.read_all_with_report().map(|report| report.cards)
    }
}

/// Persistence of the single sequence counter
///
/// # Contract
///
/// - `current_start` fails with `NotFound` when no record exists; no default
///   is fabricated
/// - `advance_to` is a read-modify-write that only changes the start and the
///   modification fields
pub trait SequenceStore: Send + Sync {
    /// Current record, if any.
    fn load(&self) -> Result<Option<SequenceRecord>>;

    /// Advance the stored start to `new_start`; returns the written record.
    fn advance_to(&self, new_start: u64, modified_by: &str) -> Result<SequenceRecord>;

    /// Next sequence value to allocate.
    fn current_start(&self) -> Result<u64> {
        self.load()?
            .map(|record| record.start_sequence)
            .ok_or_else(|| crate::error::Error::not_found("no sequence record found"))
    }
}
