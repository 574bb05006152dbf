//! Granular Fill - Torn-Word-Free Memory Clearing
//!
//! Fills a byte range while guaranteeing that every whole word-aligned
//! slot is written with a single word-wide store. The collector and other
//! mutator threads may read reference slots at any time; clearing them
//! byte-wise would let a concurrent reader observe a half-written value.
//!
//! The range is written in three zones:
//! 1. Lead: byte stores up to the first word boundary
//! 2. Middle: one atomic word store per whole word
//! 3. Trail: byte stores for the remainder below one word
//!
//! Edge bytes of an unaligned fill are never reference slots; only the
//! middle zone carries the atomicity guarantee, which is exactly the set
//! of addresses where a reference can legally live.

use crate::word::{replicate_byte, WORD_MASK, WORD_SIZE};
use std::sync::atomic::{AtomicUsize, Ordering};

/// Fill a byte range with a replicated byte value, word-atomically
///
/// Builds a word-sized pattern from `value` and writes the range in the
/// lead/middle/trail zoning described in the module docs. Returns the
/// destination pointer so call sites can chain it like a conventional
/// fill routine.
///
/// Filling with zero is the common case (clearing reference slots); a
/// zero fill needs no write barrier because a null reference requires no
/// remembered-set entry.
///
/// # Arguments
/// * `dest` - Start of the range
/// * `len` - Length in bytes
/// * `value` - Byte pattern to replicate
///
/// # Safety
///
/// - `dest` must be non-null and valid for writes of `len` bytes
/// - `dest + len` must not overflow the address space
/// - No other mutator thread may write the range during the call
///   (concurrent readers are fine; that is the point of this routine)
///
/// # Examples
///
/// ```rust
/// use gcmem::gc_safe_fill;
///
/// let mut slots = [usize::MAX; 4];
/// let len = std::mem::size_of_val(&slots);
/// unsafe {
///     gc_safe_fill(slots.as_mut_ptr() as *mut u8, len, 0);
/// }
/// assert_eq!(slots, [0usize; 4]);
/// ```
#[inline]
pub unsafe fn gc_safe_fill(dest: *mut u8, len: usize, value: u8) -> *mut u8 {
    debug_assert!(!dest.is_null(), "null range reached gc_safe_fill");

    let pattern = replicate_byte(value);
    let mut addr = dest as usize;
    let mut remaining = len;

    // Lead zone: bytes before the first word boundary.
    let misalign = addr & WORD_MASK;
    if misalign != 0 {
        let lead = (WORD_SIZE - misalign).min(remaining);
        for _ in 0..lead {
            *(addr as *mut u8) = value;
            addr += 1;
        }
        remaining -= lead;
    }

    // Middle zone: one word-wide store per slot. A concurrent reader of
    // any of these words sees either the old word or the new word, never
    // a byte-level mixture.
    while remaining >= WORD_SIZE {
        (*(addr as *const AtomicUsize)).store(pattern, Ordering::Relaxed);
        addr += WORD_SIZE;
        remaining -= WORD_SIZE;
    }

    // Trail zone: remainder below one word.
    while remaining > 0 {
        *(addr as *mut u8) = value;
        addr += 1;
        remaining -= 1;
    }

    dest
}

/// Zero a byte range, word-atomically
///
/// Thin specialization of [`gc_safe_fill`] for the dominant use:
/// clearing freshly allocated or vacated heap slots.
///
/// # Safety
///
/// Same contract as [`gc_safe_fill`].
#[inline]
pub unsafe fn gc_safe_zero(dest: *mut u8, len: usize) -> *mut u8 {
    gc_safe_fill(dest, len, 0)
}
