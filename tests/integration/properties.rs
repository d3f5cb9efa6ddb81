//! Numbering properties over random batch shapes
//!
//! Each case runs against real files in a fresh temp directory, so case
//! counts are kept small.

use crate::common::{sequence_of, TestEnv};
use cardgen::{CardGenerator, CardStore, CardType, GenerationRequest, InMemoryCardStore, InMemorySequenceStore, SequenceRecord};
use cardgen::timestamp::now;
use proptest::prelude::*;
use rust_decimal::Decimal;
use std::collections::HashSet;
use std::sync::Arc;

fn card_type() -> impl Strategy<Value = CardType> {
    prop_oneof![Just(CardType::Gift), Just(CardType::Prepaid)]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn batch_numbers_are_contiguous_and_well_formed(
        start in 0u64..900_000_000,
        count in 1u64..40,
        card_type in card_type(),
        cents in 1i64..10_000_000,
    ) {
        let env = TestEnv::seeded(start);
        let batch = env
            .generator()
            .generate(&GenerationRequest {
                count,
                balance: Decimal::new(cents, 2),
                card_type,
                expiration: None,
            })
            .unwrap();

        prop_assert_eq!(batch.cards.len() as u64, count);
        let prefix = format!("55{}", card_type.type_code());
        for (i, card) in batch.cards.iter().enumerate() {
            prop_assert_eq!(card.number().len(), 14);
            prop_assert!(card.number().starts_with(&prefix));
            prop_assert_eq!(sequence_of(card.number()), start + i as u64);
            prop_assert_eq!(card.balance(), Decimal::new(cents, 2));
        }
        prop_assert_eq!(env.counter(), start + count);
    }

    #[test]
    fn consecutive_batches_are_disjoint(
        start in 0u64..1_000_000,
        counts in prop::collection::vec(1u64..15, 1..6),
    ) {
        let env = TestEnv::seeded(start);
        let generator = env.generator();
        let mut seen = HashSet::new();
        let mut next = start;

        for count in &counts {
            let batch = generator
                .generate(&GenerationRequest::gift(*count, Decimal::ONE))
                .unwrap();
            prop_assert_eq!(batch.range.start(), next);
            for card in &batch.cards {
                prop_assert!(seen.insert(sequence_of(card.number())));
            }
            next += count;
        }

        let total: u64 = counts.iter().sum();
        prop_assert_eq!(seen.len() as u64, total);
        prop_assert_eq!(env.counter(), start + total);
    }

    #[test]
    fn stored_cards_equal_issued_cards(
        counts in prop::collection::vec((1u64..8, card_type(), 1i64..100_000), 1..4),
    ) {
        let env = TestEnv::seeded(1);
        let generator = env.generator();
        let expires = now();

        let mut issued = Vec::new();
        for (count, card_type, cents) in counts {
            let expiration = (card_type == CardType::Prepaid).then_some(expires);
            issued.extend(generator.generate_cards(count, Decimal::new(cents, 2), card_type, expiration));
        }

        let stored = generator.card_store().read_all().unwrap();
        prop_assert_eq!(stored, issued);
    }

    #[test]
    fn in_memory_and_file_stores_issue_same_numbers(
        start in 0u64..1_000_000,
        count in 1u64..20,
    ) {
        let env = TestEnv::seeded(start);
        let from_file = env.generator().generate_cards(count, Decimal::TEN, CardType::Gift, None);

        let memory = CardGenerator::builder()
            .card_store(Arc::new(InMemoryCardStore::new()))
            .sequence_store(Arc::new(InMemorySequenceStore::new(SequenceRecord::new(
                start, 999_999_999, "card_sequence", "admin", now(),
            ))))
            .build()
            .unwrap();
        let from_memory = memory.generate_cards(count, Decimal::TEN, CardType::Gift, None);

        let numbers = |cards: &[cardgen::Card]| cards.iter().map(|c| c.number().to_string()).collect::<Vec<_>>();
        prop_assert_eq!(numbers(&from_file), numbers(&from_memory));
    }
}
