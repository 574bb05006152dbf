//! Mutation Statistics - Operation Counters
//!
//! Relaxed-atomic counters over the mutation entry points, used for
//! profiling and for asserting dispatch behavior in tests. Recording is a
//! handful of relaxed fetch-adds; the hot paths stay lock-free.

use std::sync::atomic::{AtomicU64, Ordering};

/// MemOpStats - point-in-time snapshot of mutation activity
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemOpStats {
    /// Fill operations completed
    pub fills: u64,
    /// Forward copies dispatched (directly or via move)
    pub copies_forward: u64,
    /// Backward copies dispatched via move
    pub copies_backward: u64,
    /// Overlap-analyzed moves
    pub moves: u64,
    /// Write barriers recorded
    pub barriers: u64,
    /// Total bytes written by fills and copies
    pub bytes_written: u64,
}

impl MemOpStats {
    /// Create an empty snapshot
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge counters from another snapshot
    #[inline]
    pub fn merge(&mut self, other: &MemOpStats) {
        self.fills += other.fills;
        self.copies_forward += other.copies_forward;
        self.copies_backward += other.copies_backward;
        self.moves += other.moves;
        self.barriers += other.barriers;
        self.bytes_written += other.bytes_written;
    }

    /// Total directional copies, regardless of how they were dispatched
    #[inline]
    pub fn total_copies(&self) -> u64 {
        self.copies_forward + self.copies_backward
    }
}

/// AtomicMemStats - thread-safe counter collector
pub struct AtomicMemStats {
    fills: AtomicU64,
    copies_forward: AtomicU64,
    copies_backward: AtomicU64,
    moves: AtomicU64,
    barriers: AtomicU64,
    bytes_written: AtomicU64,
}

impl AtomicMemStats {
    /// Create zeroed counters
    pub const fn new() -> Self {
        Self {
            fills: AtomicU64::new(0),
            copies_forward: AtomicU64::new(0),
            copies_backward: AtomicU64::new(0),
            moves: AtomicU64::new(0),
            barriers: AtomicU64::new(0),
            bytes_written: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn record_fill(&self, bytes: usize) {
        self.fills.fetch_add(1, Ordering::Relaxed);
        self.bytes_written.fetch_add(bytes as u64, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_copy_forward(&self, bytes: usize) {
        self.copies_forward.fetch_add(1, Ordering::Relaxed);
        self.bytes_written.fetch_add(bytes as u64, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_copy_backward(&self, bytes: usize) {
        self.copies_backward.fetch_add(1, Ordering::Relaxed);
        self.bytes_written.fetch_add(bytes as u64, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_move(&self) {
        self.moves.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_barrier(&self, _bytes: usize) {
        self.barriers.fetch_add(1, Ordering::Relaxed);
    }

    /// Get a consistent-enough snapshot for monitoring
    ///
    /// Individual counters are read relaxed; the snapshot is not a single
    /// atomic cut across all of them.
    pub fn snapshot(&self) -> MemOpStats {
        MemOpStats {
            fills: self.fills.load(Ordering::Relaxed),
            copies_forward: self.copies_forward.load(Ordering::Relaxed),
            copies_backward: self.copies_backward.load(Ordering::Relaxed),
            moves: self.moves.load(Ordering::Relaxed),
            barriers: self.barriers.load(Ordering::Relaxed),
            bytes_written: self.bytes_written.load(Ordering::Relaxed),
        }
    }

    /// Reset all counters to zero
    pub fn reset(&self) {
        self.fills.store(0, Ordering::Relaxed);
        self.copies_forward.store(0, Ordering::Relaxed);
        self.copies_backward.store(0, Ordering::Relaxed);
        self.moves.store(0, Ordering::Relaxed);
        self.barriers.store(0, Ordering::Relaxed);
        self.bytes_written.store(0, Ordering::Relaxed);
    }
}

impl Default for AtomicMemStats {
    fn default() -> Self {
        Self::new()
    }
}

static GLOBAL_STATS: AtomicMemStats = AtomicMemStats::new();

/// Process-wide mutation counters
pub fn global() -> &'static AtomicMemStats {
    &GLOBAL_STATS
}
