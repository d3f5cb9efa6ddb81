//! Store failure orderings
//!
//! A failed card write must leave the counter untouched; a failed advance
//! after a successful write must surface as committed-but-not-advanced.

use crate::common::{sequence_of, TestEnv};
use cardgen::{CardType, Error, GenerationPhase, GenerationRequest, SequenceStore};
use cardgen_storage::testing::FaultPoint;
use rust_decimal::Decimal;

#[test]
fn failed_card_write_keeps_counter_and_next_run_reuses_range() {
    let env = TestEnv::seeded(500);
    let (generator, cards, _) = env.faulty_generator();

    cards.fail_appends(true);
    let err = generator
        .generate(&GenerationRequest::gift(4, Decimal::ONE))
        .unwrap_err();
    assert!(!err.cards_committed());
    assert!(err.error().is_store_failure());
    assert_eq!(env.counter(), 500);

    cards.fail_appends(false);
    let batch = generator
        .generate(&GenerationRequest::gift(4, Decimal::ONE))
        .unwrap();
    assert_eq!(batch.range.start(), 500);
    assert_eq!(env.counter(), 504);
}

#[test]
fn load_failure_writes_no_cards() {
    let env = TestEnv::seeded(10);
    let (generator, cards, sequence) = env.faulty_generator();
    sequence.set_fault(FaultPoint::LoadSequence, true);

    let result = generator.generate_cards(3, Decimal::ONE, CardType::Prepaid, None);

    assert!(result.is_empty());
    assert_eq!(cards.append_calls(), 0);
    assert!(!env.config.card_file.exists());
}

#[test]
fn advance_failure_reports_the_orphaned_range() {
    let env = TestEnv::seeded(70);
    let (generator, _, sequence) = env.faulty_generator();
    sequence.set_fault(FaultPoint::AdvanceSequence, true);

    let err = generator
        .generate(&GenerationRequest::gift(3, Decimal::ONE))
        .unwrap_err();

    assert!(err.cards_committed());
    assert_eq!(err.reached, GenerationPhase::CardsPersisted);
    match err.error() {
        Error::SequenceNotAdvanced { range, .. } => {
            assert_eq!((range.start(), range.end()), (70, 72));
        }
        other => panic!("unexpected error {other:?}"),
    }
    assert_eq!(sequence.advance_calls(), 1);
    assert_eq!(
        env.stored_numbers().iter().map(|n| sequence_of(n)).collect::<Vec<_>>(),
        vec![70, 71, 72]
    );
    assert_eq!(sequence.inner().current_start().unwrap(), 70);
}

#[test]
fn rejected_requests_touch_nothing() {
    let env = TestEnv::seeded(1);
    let (generator, cards, sequence) = env.faulty_generator();

    assert!(generator
        .generate(&GenerationRequest::gift(0, Decimal::ONE))
        .is_err());
    assert!(generator
        .generate(&GenerationRequest::gift(1, Decimal::ZERO))
        .is_err());
    assert!(generator
        .generate(&GenerationRequest::prepaid(1, Decimal::new(-5, 0), None))
        .is_err());

    assert_eq!(sequence.load_calls(), 0);
    assert_eq!(cards.append_calls(), 0);
    assert_eq!(env.counter(), 1);
}

#[test]
fn range_past_nine_digits_is_refused() {
    let env = TestEnv::seeded(999_999_998);
    let generator = env.generator();

    let err = generator
        .generate(&GenerationRequest::gift(5, Decimal::ONE))
        .unwrap_err();

    assert!(matches!(err.error(), Error::InvalidInput(_)));
    assert!(!env.config.card_file.exists());
    assert_eq!(env.counter(), 999_999_998);

    // The last two values are still usable
    let cards = generator.generate_cards(2, Decimal::ONE, CardType::Gift, None);
    assert_eq!(cards.len(), 2);
    assert_eq!(cards[1].number(), "55111999999999");
}
