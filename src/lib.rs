//! Cardgen - sequence-numbered gift and prepaid card issuance
//!
//! Cards carry a 14-digit number: the `55` prefix, a 3-digit type code and a
//! 9-digit value drawn from a persistent counter. A run reserves a contiguous
//! range of the counter, writes the cards, then advances the counter past the
//! range, so no number is ever issued twice.
//!
//! # Quick Start
//!
//! ```ignore
//! use cardgen::{CardGenConfig, CardGenerator, GenerationRequest};
//! use rust_decimal::Decimal;
//!
//! let config = CardGenConfig::from_file("cardgen.toml".as_ref())?;
//! let generator = CardGenerator::from_config(&config)?;
//!
//! let batch = generator.generate(&GenerationRequest::gift(10, Decimal::new(2500, 2)))?;
//! println!("{:?} - {:?}", batch.first_number(), batch.last_number());
//! ```

pub use cardgen_core::*;
pub use cardgen_engine::*;
pub use cardgen_storage::{
    FileCardStore, FileSequenceStore, InMemoryCardStore, InMemorySequenceStore,
    PassThroughCardStore,
};
