//! Fault-injecting store wrappers
//!
//! Each wrapper forwards to an inner store until a fault is armed, then fails
//! the chosen operation with a store error. Call counters let tests assert
//! which operations ran.

use cardgen_core::{Card, CardReadReport, CardStore, Error, Result, SequenceRecord, SequenceStore};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

/// Operation a fault can be armed on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaultPoint {
    /// `CardStore::append_all`
    AppendCards,
    /// `SequenceStore::load` (and therefore `current_start`)
    LoadSequence,
    /// `SequenceStore::advance_to`
    AdvanceSequence,
}

#[derive(Debug, Default)]
struct Fault {
    armed: AtomicBool,
    calls: AtomicUsize,
}

impl Fault {
    fn hit(&self, point: FaultPoint) -> Result<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.armed.load(Ordering::SeqCst) {
            return Err(Error::store(format!("injected fault at {:?}", point)));
        }
        Ok(())
    }
}

/// Card store wrapper that can fail appends
#[derive(Debug, Default)]
pub struct FaultyCardStore<S> {
    inner: S,
    append: Fault,
}

impl<S: CardStore> FaultyCardStore<S> {
    /// Wrap `inner` with no fault armed
    pub fn new(inner: S) -> Self {
        FaultyCardStore {
            inner,
            append: Fault::default(),
        }
    }

    /// Arm or disarm the append fault
    pub fn fail_appends(&self, fail: bool) {
        self.append.armed.store(fail, Ordering::SeqCst);
    }

    /// How many times `append_all` was called, failed calls included
    pub fn append_calls(&self) -> usize {
        self.append.calls.load(Ordering::SeqCst)
    }

    /// The wrapped store
    pub fn inner(&self) -> &S {
        &self.inner
    }
}

impl<S: CardStore> CardStore for FaultyCardStore<S> {
    fn append_all(&self, cards: Vec<Card>) -> Result<Vec<Card>> {
        self.append.hit(FaultPoint::AppendCards)?;
        self.inner.append_all(cards)
    }

    fn read_all_with_report(&self) -> Result<CardReadReport> {
        self.inner.read_all_with_report()
    }
}

/// Sequence store wrapper that can fail loads or advances
#[derive(Debug, Default)]
pub struct FaultySequenceStore<S> {
    inner: S,
    load: Fault,
    advance: Fault,
}

impl<S: SequenceStore> FaultySequenceStore<S> {
    /// Wrap `inner` with no fault armed
    pub fn new(inner: S) -> Self {
        FaultySequenceStore {
            inner,
            load: Fault::default(),
            advance: Fault::default(),
        }
    }

    /// Arm or disarm the fault at `point`. `AppendCards` is ignored.
    pub fn set_fault(&self, point: FaultPoint, fail: bool) {
        match point {
            FaultPoint::LoadSequence => self.load.armed.store(fail, Ordering::SeqCst),
            FaultPoint::AdvanceSequence => self.advance.armed.store(fail, Ordering::SeqCst),
            FaultPoint::AppendCards => {}
        }
    }

    /// How many times `load` was called
    pub fn load_calls(&self) -> usize {
        self.load.calls.load(Ordering::SeqCst)
    }

    /// How many times `advance_to` was called
    pub fn advance_calls(&self) -> usize {
        self.advance.calls.load(Ordering::SeqCst)
    }

    /// The wrapped store
    pub fn inner(&self) -> &S {
        &self.inner
    }
}

impl<S: SequenceStore> SequenceStore for FaultySequenceStore<S> {
    fn load(&self) -> Result<Option<SequenceRecord>> {
        self.load.hit(FaultPoint::LoadSequence)?;
        self.inner.load()
    }

    fn advance_to(&self, new_start: u64, modified_by: &str) -> Result<SequenceRecord> {
        self.advance.hit(FaultPoint::AdvanceSequence)?;
        self.inner.advance_to(new_start, modified_by)
    }
}
