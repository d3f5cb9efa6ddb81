//! Human-readable rendering of cards, reports and sequence records.

use cardgen_core::timestamp::format_timestamp;
use cardgen_core::{Card, CardDetails, CardReadReport, SequenceRecord};

use crate::prompt::EXPIRATION_FORMAT;

/// One line per card: number, type, balance, then the type-specific detail.
pub fn format_card(card: &Card) -> String {
    let detail = match card.details() {
        CardDetails::Gift {
            original_purchase_amount,
        } => format!("purchased {}", original_purchase_amount),
        CardDetails::Prepaid {
            expiration: Some(ts),
        } => format!("expires {}", ts.format(EXPIRATION_FORMAT)),
        CardDetails::Prepaid { expiration: None } => "no expiration".to_string(),
    };
    format!(
        "{}  {:<7}  {:>10}  {}  (created {} by {})",
        card.number(),
        card.card_type().as_str(),
        card.balance().to_string(),
        detail,
        format_timestamp(&card.created_at()),
        card.created_by()
    )
}

/// Summary line for a card file read.
pub fn format_report_summary(report: &CardReadReport) -> String {
    let mut line = format!("({} cards)", report.cards.len());
    if !report.is_clean() {
        line.push_str(&format!(
            " skipped {} rows, {} fields defaulted",
            report.skipped_rows, report.fallback_fields
        ));
    }
    line
}

/// Field-per-line view of the sequence record.
pub fn format_record(record: &SequenceRecord) -> String {
    [
        format!("name:        {}", record.sequence_name),
        format!("next value:  {}", record.start_sequence),
        format!("end value:   {}", record.end_sequence),
        format!(
            "created:     {} by {}",
            format_timestamp(&record.created_date),
            record.created_by
        ),
        format!(
            "modified:    {} by {}",
            format_timestamp(&record.modified_date),
            record.modified_by
        ),
    ]
    .join("\n")
}
