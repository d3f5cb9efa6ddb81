//! In-memory and pass-through stores
//!
//! `PassThroughCardStore` is the persistence-disabled mode: writes hand the
//! input back untouched and reads see nothing.

use cardgen_core::timestamp::now;
use cardgen_core::{Card, CardReadReport, CardStore, Error, Result, SequenceRecord, SequenceStore};
use parking_lot::{Mutex, RwLock};
use tracing::info;

/// Card store that keeps cards in a vector
#[derive(Debug, Default)]
pub struct InMemoryCardStore {
    cards: RwLock<Vec<Card>>,
}

impl InMemoryCardStore {
    /// Empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored cards
    pub fn len(&self) -> usize {
        self.cards.read().len()
    }

    /// True if nothing was stored yet
    pub fn is_empty(&self) -> bool {
        self.cards.read().is_empty()
    }
}

impl CardStore for InMemoryCardStore {
    fn append_all(&self, cards: Vec<Card>) -> Result<Vec<Card>> {
        self.cards.write().extend(cards.iter().cloned());
        Ok(cards)
    }

    fn read_all_with_report(&self) -> Result<CardReadReport> {
        Ok(CardReadReport {
            cards: self.cards.read().clone(),
            ..CardReadReport::default()
        })
    }
}

/// Card store used when persistence is disabled
#[derive(Debug, Default, Clone, Copy)]
pub struct PassThroughCardStore;

impl CardStore for PassThroughCardStore {
    fn append_all(&self, cards: Vec<Card>) -> Result<Vec<Card>> {
        info!(count = cards.len(), "card persistence disabled, skipping write");
        Ok(cards)
    }

    fn read_all_with_report(&self) -> Result<CardReadReport> {
        info!("card persistence disabled, skipping read");
        Ok(CardReadReport::default())
    }
}

/// Sequence store holding its record in memory
#[derive(Debug, Default)]
pub struct InMemorySequenceStore {
    record: Mutex<Option<SequenceRecord>>,
}

impl InMemorySequenceStore {
    /// Store seeded with `record`
    pub fn new(record: SequenceRecord) -> Self {
        InMemorySequenceStore {
            record: Mutex::new(Some(record)),
        }
    }

    /// Store with no record; `current_start` fails with `NotFound`
    pub fn empty() -> Self {
        Self::default()
    }
}

impl SequenceStore for InMemorySequenceStore {
    fn load(&self) -> Result<Option<SequenceRecord>> {
        Ok(self.record.lock().clone())
    }

    fn advance_to(&self, new_start: u64, modified_by: &str) -> Result<SequenceRecord> {
        let mut slot = self.record.lock();
        let current = slot
            .as_ref()
            .ok_or_else(|| Error::not_found("no sequence record to advance"))?;
        let updated = current.advanced(new_start, modified_by, now());
        *slot = Some(updated.clone());
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cardgen_core::{CardFactory, CardType};
    use rust_decimal::Decimal;

    fn card() -> Card {
        CardFactory::create(
            CardType::Prepaid,
            "55222000000001".to_string(),
            Decimal::TEN,
            "System",
            now(),
            None,
        )
    }

    #[test]
    fn pass_through_returns_input_and_reads_nothing() {
        let store = PassThroughCardStore;
        let written = store.append_all(vec![card(), card()]).unwrap();
        assert_eq!(written.len(), 2);
        assert!(store.read_all().unwrap().is_empty());
    }

    #[test]
    fn in_memory_cards_accumulate() {
        let store = InMemoryCardStore::new();
        store.append_all(vec![card()]).unwrap();
        store.append_all(vec![card()]).unwrap();
        assert_eq!(store.len(), 2);
        assert_eq!(store.read_all().unwrap().len(), 2);
    }

    #[test]
    fn empty_sequence_store_is_not_found() {
        let store = InMemorySequenceStore::empty();
        assert!(matches!(store.current_start(), Err(Error::NotFound(_))));
        assert!(store.advance_to(1, "System").is_err());
    }

    #[test]
    fn in_memory_advance_keeps_metadata() {
        let seed = SequenceRecord::new(1000, 5000, "seq", "admin", now());
        let store = InMemorySequenceStore::new(seed.clone());
        let updated = store.advance_to(1006, "System").unwrap();
        assert_eq!(updated.created_date, seed.created_date);
        assert_eq!(updated.sequence_name, "seq");
        assert_eq!(store.current_start().unwrap(), 1006);
    }
}
