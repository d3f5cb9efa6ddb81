//! Testing utilities for store failure handling
//!
//! - **Faults**: wrappers that fail a chosen store operation on demand
//!
//! # Example
//!
//! ```ignore
//! use cardgen_storage::testing::{FaultPoint, FaultyCardStore, FaultySequenceStore};
//!
//! let cards = FaultyCardStore::new(InMemoryCardStore::new());
//! cards.fail_appends(true);
//! // a generation run against `cards` must now leave the sequence untouched
//! ```

mod faults;

pub use faults::{FaultPoint, FaultyCardStore, FaultySequenceStore};
