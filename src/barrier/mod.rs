//! Barrier Module - Bulk Write-Barrier Recording
//!
//! After a write that may have stored object references into live heap
//! memory, the mutator must tell the collector's remembered-set tracking
//! which addresses to revisit on the next collection pass. This module
//! owns that notification path:
//!
//! - [`RememberedSet`] is the injected capability: anything that can
//!   absorb a "this range may now hold references" notification.
//! - [`CardTable`] is the default concrete recorder, one dirty byte per
//!   fixed-granularity card of tracked heap.
//! - A process-wide recorder slot serves the entry points used by
//!   generated code; the runtime installs its card table at startup.
//!
//! Coverage is conservative by contract: recording more than necessary is
//! safe and cheap, recording less is a silent heap-graph corruption that
//! surfaces, if at all, cycles later. Every notification must also be
//! ordered after the data stores it describes; the bulk entry points in
//! [`crate::bulk`] issue a release fence between the last data store and
//! the notification.

pub mod card_table;

pub use card_table::CardTable;

use parking_lot::RwLock;
use std::sync::Arc;

use crate::stats;

/// Remembered-set notification capability
///
/// The mutation layer treats the recorder as a black-box side effect: no
/// return value, no failure mode. Implementations must tolerate ranges
/// that lie partly or wholly outside the tracked heap (moves may target
/// non-heap destinations) and must cover every addressable unit of the
/// portion they do track.
///
/// # Thread Safety
/// `note_range` is called concurrently from every mutator thread without
/// external locking; implementations must be internally synchronized
/// (the card table uses relaxed atomic byte stores).
pub trait RememberedSet: Send + Sync {
    /// Record that `len` bytes starting at `start` may now contain
    /// references needing revisit.
    fn note_range(&self, start: usize, len: usize);
}

/// No-op recorder used until the runtime installs a real one
///
/// Also the correct choice for non-generational configurations where no
/// cross-region tracking exists.
#[derive(Debug, Default)]
pub struct NullRemembered;

impl RememberedSet for NullRemembered {
    #[inline]
    fn note_range(&self, _start: usize, _len: usize) {}
}

lazy_static::lazy_static! {
    static ref RECORDER: RwLock<Arc<dyn RememberedSet>> =
        RwLock::new(Arc::new(NullRemembered));
}

/// Install the process-wide write-barrier recorder
///
/// Called once at runtime initialization, before mutator threads start
/// issuing barriered writes. Replacing the recorder while mutators are
/// running loses no notifications that have already been delivered, but
/// notifications in flight may land in either recorder.
pub fn install_recorder(recorder: Arc<dyn RememberedSet>) {
    log::debug!("write-barrier recorder installed");
    *RECORDER.write() = recorder;
}

/// Get the currently installed recorder
pub fn installed_recorder() -> Arc<dyn RememberedSet> {
    RECORDER.read().clone()
}

/// Record a bulk write barrier over an address range
///
/// Standalone barrier flush for callers that perform their own raw stores
/// and need to notify the remembered set afterward. The caller is
/// responsible for ordering: its data stores must be complete (release-
/// fenced on weakly ordered targets) before this call.
///
/// A zero-length range performs no notification.
///
/// # Examples
///
/// ```rust
/// use gcmem::record_write_barrier;
///
/// let slot = Box::new(0usize);
/// let addr = &*slot as *const usize as usize;
/// // ... raw store into the slot elsewhere ...
/// record_write_barrier(addr, std::mem::size_of::<usize>());
/// ```
pub fn record_write_barrier(start: usize, len: usize) {
    if len == 0 {
        return;
    }

    log::trace!("write barrier: {:#x} +{}", start, len);
    RECORDER.read().note_range(start, len);
    stats::global().record_barrier(len);
}
