//! Shared test utilities for the integration suite.

#![allow(dead_code)]

use std::sync::Arc;

use cardgen_storage::testing::{FaultyCardStore, FaultySequenceStore};
use cardgen::timestamp::now;
use cardgen::{
    CardGenConfig, CardGenerator, FileCardStore, FileSequenceStore, SequenceRecord,
    MAX_SEQUENCE_VALUE,
};
use tempfile::TempDir;

/// File-backed generator in its own temp directory
pub struct TestEnv {
    pub dir: TempDir,
    pub config: CardGenConfig,
}

impl TestEnv {
    /// Fresh directory with the sequence seeded at `start`
    pub fn seeded(start: u64) -> Self {
        let dir = TempDir::new().unwrap();
        let config = CardGenConfig::in_dir(dir.path());
        FileSequenceStore::new(&config.sequence_file)
            .initialize(SequenceRecord::new(
                start,
                MAX_SEQUENCE_VALUE,
                "card_sequence",
                "admin",
                now(),
            ))
            .unwrap();
        TestEnv { dir, config }
    }

    pub fn generator(&self) -> CardGenerator {
        CardGenerator::from_config(&self.config).unwrap()
    }

    /// Generator over fault-injecting wrappers of the file stores
    pub fn faulty_generator(
        &self,
    ) -> (
        CardGenerator,
        Arc<FaultyCardStore<FileCardStore>>,
        Arc<FaultySequenceStore<FileSequenceStore>>,
    ) {
        let cards = Arc::new(FaultyCardStore::new(FileCardStore::new(
            &self.config.card_file,
        )));
        let sequence = Arc::new(FaultySequenceStore::new(FileSequenceStore::new(
            &self.config.sequence_file,
        )));
        let generator = CardGenerator::builder()
            .card_store(cards.clone())
            .sequence_store(sequence.clone())
            .build()
            .unwrap();
        (generator, cards, sequence)
    }

    pub fn counter(&self) -> u64 {
        use cardgen::SequenceStore;
        FileSequenceStore::new(&self.config.sequence_file)
            .current_start()
            .unwrap()
    }

    pub fn stored_numbers(&self) -> Vec<String> {
        use cardgen::CardStore;
        FileCardStore::new(&self.config.card_file)
            .read_all()
            .unwrap()
            .into_iter()
            .map(|c| c.number().to_string())
            .collect()
    }
}

/// 9-digit sequence part of a card number
pub fn sequence_of(number: &str) -> u64 {
    number[5..].parse().unwrap()
}
