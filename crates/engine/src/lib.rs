//! Card generation engine
//!
//! This crate orchestrates the stores:
//! - CardGenerator: reserves a sequence range, builds and persists a batch,
//!   then advances the counter
//! - CardGeneratorBuilder: explicit composition of stores and actor
//! - CardGenConfig: `cardgen.toml` loading
//! - registry: one shared generator per sequence file
//!
//! The engine is the only component that knows the ordering between the card
//! store and the sequence store.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod generator;

pub use generator::registry::open_shared;
pub use generator::{
    CardGenConfig, CardGenerator, CardGeneratorBuilder, GeneratedBatch, GenerationError,
    GenerationPhase, GenerationRequest, CONFIG_FILE_NAME,
};
