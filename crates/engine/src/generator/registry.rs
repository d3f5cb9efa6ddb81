//! Process-wide generator registry
//!
//! Ensures only one CardGenerator exists per sequence file. All runs in the
//! process that share a counter then go through the same run lock. Weak
//! references let a generator drop once nobody holds it.
//!
//! A sequence file is bound to the card store and actor it was first opened
//! with. Opening it again with a different card store or actor is a `Config`
//! error rather than a silent handoff of the first generator.

use once_cell::sync::Lazy;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Weak};
use tracing::{info, warn};

use super::{CardGenConfig, CardGenerator};
use cardgen_core::{Error, Result};

/// What a shared generator writes besides its sequence file
#[derive(Debug, Clone, PartialEq, Eq)]
struct StoreIdentity {
    /// Normalized card file, `None` when cards are passed through
    card_file: Option<PathBuf>,
    actor: String,
}

impl StoreIdentity {
    fn of(config: &CardGenConfig) -> Self {
        StoreIdentity {
            card_file: config
                .persist_cards
                .then(|| registry_key(&config.card_file)),
            actor: config.actor.clone(),
        }
    }

    fn describe(&self) -> String {
        match &self.card_file {
            Some(path) => format!("card file {} as '{}'", path.display(), self.actor),
            None => format!("pass-through cards as '{}'", self.actor),
        }
    }
}

struct SharedEntry {
    identity: StoreIdentity,
    generator: Weak<CardGenerator>,
}

/// Global registry of open generators (sequence path -> weak reference)
static SHARED_GENERATORS: Lazy<Mutex<HashMap<PathBuf, SharedEntry>>> =
    Lazy::new(|| Mutex::new(HashMap::new()));

/// Shared generator for `config`, created on first use.
///
/// Concurrent first calls for the same sequence file still create exactly one
/// instance. Later calls return it for as long as any handle is alive.
///
/// # Errors
///
/// `Config` if the config fails validation, or if a live generator for the
/// same sequence file uses a different card store or actor.
pub fn open_shared(config: &CardGenConfig) -> Result<Arc<CardGenerator>> {
    let key = registry_key(&config.sequence_file);
    let identity = StoreIdentity::of(config);
    let mut generators = SHARED_GENERATORS.lock();

    if let Some(entry) = generators.get(&key) {
        if let Some(existing) = entry.generator.upgrade() {
            if entry.identity != identity {
                warn!(
                    sequence_file = %key.display(),
                    open = %entry.identity.describe(),
                    requested = %identity.describe(),
                    "refusing to share generator"
                );
                return Err(Error::config(format!(
                    "sequence file {} is already open with {}, not {}",
                    key.display(),
                    entry.identity.describe(),
                    identity.describe()
                )));
            }
            return Ok(existing);
        }
    }

    let generator = Arc::new(CardGenerator::from_config(config)?);
    generators.retain(|_, entry| entry.generator.strong_count() > 0);
    generators.insert(
        key.clone(),
        SharedEntry {
            identity,
            generator: Arc::downgrade(&generator),
        },
    );
    info!(sequence_file = %key.display(), "opened shared card generator");
    Ok(generator)
}

/// Normalize a path so spellings of the same file share one entry.
fn registry_key(path: &Path) -> PathBuf {
    if let Ok(canonical) = path.canonicalize() {
        return canonical;
    }
    match (path.parent(), path.file_name()) {
        (Some(parent), Some(name)) => parent
            .canonicalize()
            .map(|dir| dir.join(name))
            .unwrap_or_else(|_| path.to_path_buf()),
        _ => path.to_path_buf(),
    }
}
