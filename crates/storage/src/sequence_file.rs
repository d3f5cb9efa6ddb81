//! File-backed sequence store
//!
//! The file holds a header line and a single record row. Rewrites are atomic
//! (write-fsync-rename), so a crash leaves either the old or the new record,
//! never a torn one.

use crate::format::{check_text_field, decode_sequence, encode_sequence, SEQUENCE_HEADER};
use cardgen_core::timestamp::now;
use cardgen_core::{Error, Result, SequenceRecord, SequenceStore};
use parking_lot::Mutex;
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Sequence record kept in a single file
#[derive(Debug)]
pub struct FileSequenceStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

/// Header and record as found on disk
struct SequenceFile {
    header: String,
    record: SequenceRecord,
}

impl FileSequenceStore {
    /// Store backed by `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileSequenceStore {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Seed the file with `record`.
    ///
    /// # Errors
    ///
    /// `InvalidInput` if a record already exists; it is never overwritten.
    /// `InvalidInput` also if a text field holds a comma or line break.
    pub fn initialize(&self, record: SequenceRecord) -> Result<SequenceRecord> {
        check_storable("SEQUENCE_NAME", &record.sequence_name)?;
        check_storable("CREATED_BY", &record.created_by)?;
        check_storable("MODIFIED_BY", &record.modified_by)?;

        let _guard = self.write_lock.lock();
        if let Some(existing) = self.read_file()? {
            return Err(Error::invalid_input(format!(
                "sequence '{}' already initialized at {}",
                existing.record.sequence_name, existing.record.start_sequence
            )));
        }
        self.persist(SEQUENCE_HEADER, &record)?;
        info!(start = record.start_sequence, name = %record.sequence_name, "initialized sequence");
        Ok(record)
    }

    fn read_file(&self) -> Result<Option<SequenceFile>> {
        if !self.path.exists() {
            warn!(path = %self.path.display(), "sequence file does not exist");
            return Ok(None);
        }

        let content = fs::read_to_string(&self.path)?;
        let mut lines = content.lines().map(|l| l.trim_end_matches('\r'));
        let (Some(header), Some(row)) = (lines.next(), lines.next()) else {
            warn!(path = %self.path.display(), "sequence file does not contain a record");
            return Ok(None);
        };

        let record = decode_sequence(row).map_err(|e| Error::parse(2, e.to_string()))?;
        Ok(Some(SequenceFile {
            header: header.to_string(),
            record,
        }))
    }

    /// Write header and record atomically (write-fsync-rename)
    fn persist(&self, header: &str, record: &SequenceRecord) -> Result<()> {
        let temp_path = self.path.with_extension("tmp");

        let mut file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(&temp_path)?;
        writeln!(file, "{}", header)?;
        writeln!(file, "{}", encode_sequence(record))?;
        file.sync_all()?;
        drop(file);

        fs::rename(&temp_path, &self.path)?;

        if let Some(parent) = self.path.parent() {
            if parent.exists() {
                let dir = File::open(parent)?;
                dir.sync_all()?;
            }
        }
        Ok(())
    }
}

fn check_storable(field: &'static str, value: &str) -> Result<()> {
    check_text_field(field, value).map_err(|e| Error::invalid_input(e.to_string()))
}

impl SequenceStore for FileSequenceStore {
    fn load(&self) -> Result<Option<SequenceRecord>> {
        Ok(self.read_file()?.map(|file| file.record))
    }

    fn advance_to(&self, new_start: u64, modified_by: &str) -> Result<SequenceRecord> {
        check_storable("MODIFIED_BY", modified_by)?;
        let _guard = self.write_lock.lock();
        let current = self
            .read_file()?
            .ok_or_else(|| Error::not_found("no sequence record to advance"))?;

        let updated = current.record.advanced(new_start, modified_by, now());
        let header = if current.header.is_empty() {
            SEQUENCE_HEADER
        } else {
            current.header.as_str()
        };
        self.persist(header, &updated)?;

        info!(
            from = current.record.start_sequence,
            to = new_start,
            "updated sequence record"
        );
        Ok(updated)
    }
}
