//! Sequence counter types
//!
//! A deployment has exactly one [`SequenceRecord`]. Its `start_sequence` is the
//! next value that will be handed to a card, so it is always one more than the
//! highest value allocated to a persisted card.

use crate::error::{Error, Result};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::RangeInclusive;

/// The single persisted counter record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SequenceRecord {
    /// Next sequence value to allocate
    pub start_sequence: u64,
    /// Upper bound of the configured block (stored metadata)
    pub end_sequence: u64,
    /// Human-readable counter name
    pub sequence_name: String,
    /// Actor that created the record
    pub created_by: String,
    /// When the record was created
    pub created_date: NaiveDateTime,
    /// Actor of the last advance
    pub modified_by: String,
    /// When the record was last advanced
    pub modified_date: NaiveDateTime,
}

impl SequenceRecord {
    /// Create a fresh record; modification metadata mirrors creation.
    pub fn new(
        start_sequence: u64,
        end_sequence: u64,
        sequence_name: impl Into<String>,
        created_by: impl Into<String>,
        created_date: NaiveDateTime,
    ) -> Self {
        let created_by = created_by.into();
        SequenceRecord {
            start_sequence,
            end_sequence,
            sequence_name: sequence_name.into(),
            modified_by: created_by.clone(),
            created_by,
            created_date,
            modified_date: created_date,
        }
    }

    /// Copy of this record with only the start and modification fields changed.
    pub fn advanced(&self, new_start: u64, modified_by: &str, at: NaiveDateTime) -> Self {
        SequenceRecord {
            start_sequence: new_start,
            modified_by: modified_by.to_string(),
            modified_date: at,
            ..self.clone()
        }
    }
}

/// Inclusive range of sequence values reserved for one batch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SequenceRange {
    start: u64,
    end: u64,
}

impl SequenceRange {
    /// Range `[start, end]`; `None` when `end < start`.
    pub fn new(start: u64, end: u64) -> Option<Self> {
        (end >= start).then_some(SequenceRange { start, end })
    }

    /// Reserve `count` consecutive values beginning at `start`.
    ///
    /// # Errors
    ///
    /// `InvalidInput` for a zero count or when `start + count` overflows.
    pub fn reserve(start: u64, count: u64) -> Result<Self> {
        if count == 0 {
            return Err(Error::invalid_input("card count must be positive"));
        }
        let end = start
            .checked_add(count - 1)
            .filter(|end| end.checked_add(1).is_some())
            .ok_or_else(|| {
                Error::invalid_input(format!(
                    "reserving {} values from {} overflows the sequence",
                    count, start
                ))
            })?;
        Ok(SequenceRange { start, end })
    }

    /// First value in the range
    pub fn start(&self) -> u64 {
        self.start
    }

    /// Last value in the range (inclusive)
    pub fn end(&self) -> u64 {
        self.end
    }

    /// Value the counter must hold once this range is committed
    pub fn next_start(&self) -> u64 {
        self.end + 1
    }

    /// Number of values in the range
    pub fn len(&self) -> u64 {
        self.end - self.start + 1
    }

    /// Always false; a range holds at least one value
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Iterate the values in order
    pub fn values(&self) -> RangeInclusive<u64> {
        self.start..=self.end
    }
}

impl fmt::Display for SequenceRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..={}", self.start, self.end)
    }
}
