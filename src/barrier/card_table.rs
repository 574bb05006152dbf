//! Card Table - Default Remembered-Set Recorder
//!
//! One byte of table per fixed-size card of tracked heap. Dirtying a card
//! is a relaxed atomic byte store, so mutator threads record barriers
//! without locks and without ordering constraints among themselves; the
//! collector reads and clears the table at a point where mutators are
//! quiescent or via its own synchronization.
//!
//! Ranges outside the tracked span are ignored. Bulk moves may legally
//! target destinations off the collected heap (a stack buffer being
//! staged, for example); those writes need no remembered-set entry.

use crate::config::MemConfig;
use crate::error::{MemError, Result};
use crate::barrier::RememberedSet;
use std::sync::atomic::{AtomicU8, Ordering};

/// Card state: no potential references recorded.
pub const CARD_CLEAN: u8 = 0x00;
/// Card state: range may contain references needing revisit.
pub const CARD_DIRTY: u8 = 0xFF;

/// CardTable - byte-per-card dirty tracking over a heap span
///
/// # Examples
///
/// ```rust
/// use gcmem::{CardTable, MemConfig};
/// use gcmem::barrier::RememberedSet;
///
/// let heap = vec![0u8; 8192];
/// let base = heap.as_ptr() as usize;
/// let table = CardTable::new(base, heap.len(), &MemConfig::default()).unwrap();
///
/// table.note_range(base + 100, 16);
/// assert!(table.is_dirty(base + 100));
/// ```
pub struct CardTable {
    /// Lowest tracked address
    heap_base: usize,
    /// Tracked span in bytes
    heap_size: usize,
    /// Log2 of bytes covered per card
    card_shift: u32,
    /// One byte per card
    cards: Box<[AtomicU8]>,
}

impl CardTable {
    /// Create a card table covering `[heap_base, heap_base + heap_size)`
    ///
    /// # Arguments
    /// * `heap_base` - Lowest address of the tracked heap
    /// * `heap_size` - Tracked span in bytes
    /// * `config` - Supplies the card granularity
    ///
    /// # Returns
    /// - `Ok(CardTable)` - Table ready for use
    /// - `Err(MemError)` - Invalid configuration or degenerate span
    pub fn new(heap_base: usize, heap_size: usize, config: &MemConfig) -> Result<CardTable> {
        config.validate()?;

        if heap_size == 0 {
            return Err(MemError::Configuration(
                "card table over empty heap span".to_string(),
            ));
        }
        if heap_base.checked_add(heap_size).is_none() {
            return Err(MemError::RangeOverflow {
                start: heap_base,
                len: heap_size,
            });
        }

        let card_size = config.card_size();
        let card_count = (heap_size + card_size - 1) >> config.card_shift;
        let cards: Box<[AtomicU8]> = (0..card_count).map(|_| AtomicU8::new(CARD_CLEAN)).collect();

        log::debug!(
            "card table: {} cards of {} bytes over {:#x}..{:#x}",
            card_count,
            card_size,
            heap_base,
            heap_base + heap_size
        );

        Ok(CardTable {
            heap_base,
            heap_size,
            card_shift: config.card_shift,
            cards,
        })
    }

    /// Number of cards in the table.
    #[inline]
    pub fn card_count(&self) -> usize {
        self.cards.len()
    }

    /// Address span covered by card `index`.
    pub fn card_span(&self, index: usize) -> (usize, usize) {
        let start = self.heap_base + (index << self.card_shift);
        let len = (1usize << self.card_shift).min(self.heap_base + self.heap_size - start);
        (start, len)
    }

    /// Check whether the card covering `addr` is dirty.
    ///
    /// Addresses outside the tracked span report clean.
    pub fn is_dirty(&self, addr: usize) -> bool {
        if addr < self.heap_base || addr >= self.heap_base + self.heap_size {
            return false;
        }
        let index = (addr - self.heap_base) >> self.card_shift;
        self.cards[index].load(Ordering::Relaxed) != CARD_CLEAN
    }

    /// Indices of all dirty cards.
    ///
    /// Collector-side query; the mutator never reads the table.
    pub fn dirty_cards(&self) -> Vec<usize> {
        self.cards
            .iter()
            .enumerate()
            .filter(|(_, card)| card.load(Ordering::Relaxed) != CARD_CLEAN)
            .map(|(index, _)| index)
            .collect()
    }

    /// Reset every card to clean.
    ///
    /// Called by the collector after it has re-scanned the dirty set.
    pub fn clear_all(&self) {
        for card in self.cards.iter() {
            card.store(CARD_CLEAN, Ordering::Relaxed);
        }
    }
}

impl RememberedSet for CardTable {
    /// Dirty every card the range touches, clamped to the tracked span.
    fn note_range(&self, start: usize, len: usize) {
        if len == 0 {
            return;
        }

        let heap_end = self.heap_base + self.heap_size;
        let end = start.saturating_add(len);
        if end <= self.heap_base || start >= heap_end {
            return;
        }

        let clamped_start = start.max(self.heap_base);
        let clamped_end = end.min(heap_end);

        let first = (clamped_start - self.heap_base) >> self.card_shift;
        let last = (clamped_end - 1 - self.heap_base) >> self.card_shift;
        for card in &self.cards[first..=last] {
            card.store(CARD_DIRTY, Ordering::Relaxed);
        }
    }
}

impl std::fmt::Debug for CardTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CardTable")
            .field("heap_base", &format_args!("{:#x}", self.heap_base))
            .field("heap_size", &self.heap_size)
            .field("card_shift", &self.card_shift)
            .field("card_count", &self.cards.len())
            .finish()
    }
}
