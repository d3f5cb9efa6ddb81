//! File-backed card store
//!
//! Cards are appended to a single text file (see [`crate::format::card_row`]).
//! A missing or empty file gets the header before its first row. Every append
//! is flushed and fsynced before it is reported as successful.
//!
//! A failed append is rolled back to the previous file length. A file left
//! ending mid-row by a crash gets its tail terminated before the next rows,
//! so the fragment is skipped on read and never swallows a new card.

use crate::format::{decode_card, encode_card, CARD_HEADER};
use cardgen_core::{Card, CardReadReport, CardStore, Error, Result};
use parking_lot::Mutex;
use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};

/// Append-only card file
#[derive(Debug)]
pub struct FileCardStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FileCardStore {
    /// Store backed by `path`; the file is created on first append.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileCardStore {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append `cards` through the writer `sink` builds around the file.
    ///
    /// On any failure the file is cut back to its length before the call.
    fn append_through<W, F>(&self, cards: &[Card], sink: F) -> Result<()>
    where
        W: Write,
        F: FnOnce(File) -> W,
    {
        let _guard = self.write_lock.lock();

        let mut file = OpenOptions::new()
            .create(true)
            .read(true)
            .append(true)
            .open(&self.path)?;
        let original_len = file.metadata()?.len();
        let torn_tail = original_len > 0 && !ends_with_newline(&mut file, original_len)?;
        if torn_tail {
            warn!(path = %self.path.display(), "card file ends mid-row, terminating it");
        }

        let written = write_rows(sink(file.try_clone()?), original_len == 0, torn_tail, cards)
            .and_then(|()| file.sync_all().map_err(Error::from));
        if let Err(e) = written {
            self.roll_back(&file, original_len);
            return Err(e);
        }
        Ok(())
    }

    fn roll_back(&self, file: &File, len: u64) {
        match file.set_len(len).and_then(|()| file.sync_all()) {
            Ok(()) => warn!(path = %self.path.display(), len, "rolled back failed card append"),
            Err(e) => error!(
                path = %self.path.display(),
                len,
                error = %e,
                "failed to roll back card append, file may hold a partial batch"
            ),
        }
    }
}

fn ends_with_newline(file: &mut File, len: u64) -> Result<bool> {
    let mut last = [0u8; 1];
    file.seek(SeekFrom::Start(len - 1))?;
    file.read_exact(&mut last)?;
    Ok(last[0] == b'\n')
}

fn write_rows<W: Write>(sink: W, header: bool, terminate_tail: bool, cards: &[Card]) -> Result<()> {
    let mut writer = BufWriter::new(sink);
    if terminate_tail {
        writeln!(writer)?;
    }
    if header {
        writeln!(writer, "{}", CARD_HEADER)?;
    }
    for card in cards {
        writeln!(writer, "{}", encode_card(card))?;
    }
    writer
        .into_inner()
        .map_err(|e| Error::store(format!("failed to flush card file: {}", e.error())))?;
    Ok(())
}

impl CardStore for FileCardStore {
    fn append_all(&self, cards: Vec<Card>) -> Result<Vec<Card>> {
        self.append_through(&cards, |file| file)?;
        info!(count = cards.len(), path = %self.path.display(), "wrote cards");
        Ok(cards)
    }

    fn read_all_with_report(&self) -> Result<CardReadReport> {
        if !self.path.exists() {
            warn!(path = %self.path.display(), "card file does not exist, no cards to read");
            return Ok(CardReadReport::default());
        }

        let content = fs::read_to_string(&self.path)?;
        let mut report = CardReadReport::default();
        let mut lines = content.lines().enumerate();

        if let Some((_, header)) = lines.next() {
            if header.trim_end_matches('\r') != CARD_HEADER {
                warn!(path = %self.path.display(), header, "unexpected card file header");
            }
        }

        for (index, raw) in lines {
            let line = raw.trim_end_matches('\r');
            if line.trim().is_empty() {
                continue;
            }
            match decode_card(line) {
                Ok(rebuilt) => {
                    report.fallback_fields += rebuilt.fallbacks;
                    report.cards.push(rebuilt.card);
                }
                Err(e) => {
                    let err = Error::parse(index + 1, e.to_string());
                    warn!(path = %self.path.display(), error = %err, "skipping card row");
                    report.skipped_rows += 1;
                }
            }
        }

        info!(
            count = report.cards.len(),
            skipped = report.skipped_rows,
            fallbacks = report.fallback_fields,
            "read cards"
        );
        Ok(report)
    }
}
