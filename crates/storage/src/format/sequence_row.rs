//! Sequence row format
//!
//! # Format
//!
//! ```text
//! SEQUENCE_START,SEQUENCE_END,SEQUENCE_NAME,CREATED_BY,CREATED_DATE,MODIFIED_BY,MODIFIED_DATE
//! 1000,999999999,card_sequence,admin,2025-01-01T00:00:00,System,2025-04-11T11:00:00
//! ```

use super::{split_fields, RowError};
use cardgen_core::timestamp::{format_timestamp, now, parse_timestamp};
use cardgen_core::SequenceRecord;
use chrono::NaiveDateTime;
use tracing::warn;

/// Header line of the sequence file
pub const SEQUENCE_HEADER: &str =
    "SEQUENCE_START,SEQUENCE_END,SEQUENCE_NAME,CREATED_BY,CREATED_DATE,MODIFIED_BY,MODIFIED_DATE";

/// Number of fields in the sequence row
pub const SEQUENCE_FIELD_COUNT: usize = 7;

/// Render the record as a row (no trailing newline).
pub fn encode_sequence(record: &SequenceRecord) -> String {
    format!(
        "{},{},{},{},{},{},{}",
        record.start_sequence,
        record.end_sequence,
        record.sequence_name,
        record.created_by,
        format_timestamp(&record.created_date),
        record.modified_by,
        format_timestamp(&record.modified_date)
    )
}

/// Decode the record row. Fields are trimmed; unparsable dates fall back to
/// the current time.
pub fn decode_sequence(line: &str) -> Result<SequenceRecord, RowError> {
    let parts: Vec<&str> = split_fields(line, SEQUENCE_FIELD_COUNT)?
        .into_iter()
        .map(str::trim)
        .collect();

    Ok(SequenceRecord {
        start_sequence: parse_u64("SEQUENCE_START", parts[0])?,
        end_sequence: parse_u64("SEQUENCE_END", parts[1])?,
        sequence_name: parts[2].to_string(),
        created_by: parts[3].to_string(),
        created_date: date_or_now("CREATED_DATE", parts[4]),
        modified_by: parts[5].to_string(),
        modified_date: date_or_now("MODIFIED_DATE", parts[6]),
    })
}

fn parse_u64(field: &'static str, value: &str) -> Result<u64, RowError> {
    value.parse().map_err(|_| RowError::InvalidNumber {
        field,
        value: value.to_string(),
    })
}

fn date_or_now(field: &'static str, value: &str) -> NaiveDateTime {
    parse_timestamp(value).unwrap_or_else(|| {
        warn!(field, value, "unparsable sequence date, using current time");
        now()
    })
}
