//! Integration Tests
//!
//! Cross-crate tests through the `cardgen` facade:
//! - properties: numbering and range properties over random inputs
//! - failures: store failure orderings and what survives them

#[path = "../common/mod.rs"]
mod common;

mod failures;
mod properties;
