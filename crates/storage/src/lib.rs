//! Storage layer for card issuance
//!
//! This crate implements the two store traits from `cardgen-core`:
//! - FileCardStore: append-only card file
//! - FileSequenceStore: single-record sequence file with atomic rewrites
//! - InMemoryCardStore, InMemorySequenceStore: embedded backends
//! - PassThroughCardStore: persistence-disabled mode
//! - format: the line formats of both files
//! - testing: fault-injecting wrappers

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod card_file;
pub mod format;
pub mod memory;
pub mod sequence_file;
pub mod testing;

pub use card_file::FileCardStore;
pub use memory::{InMemoryCardStore, InMemorySequenceStore, PassThroughCardStore};
pub use sequence_file::FileSequenceStore;
