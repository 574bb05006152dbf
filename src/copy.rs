//! Directional Copy - Word-Granular Forward and Backward Copy
//!
//! Both routines copy `len` bytes from `src` to `dest`, differing only in
//! traversal order. When destination and source share word alignment, the
//! middle of the range moves one whole word per store, so a concurrent
//! reader of any destination word sees either the old word or the fully
//! formed new word.
//!
//! Direction matters only under overlap:
//! - Forward (low to high) is correct when `dest <= src` or the ranges are
//!   disjoint.
//! - Backward (high to low) is required when the destination starts inside
//!   the source range from above; copying forward there would overwrite
//!   source words before they are read.
//!
//! The overlap decision itself is [`CopyDirection::for_move`], a pure
//! function used by the bulk dispatcher and testable in isolation.

use crate::word::{WORD_MASK, WORD_SIZE};
use std::sync::atomic::{AtomicUsize, Ordering};

/// Traversal order for an overlap-aware copy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyDirection {
    /// Copy from the lowest address upward
    Forward,
    /// Copy from the highest address downward
    Backward,
}

impl CopyDirection {
    /// Decide the copy direction for a move-style copy
    ///
    /// Backward is chosen if and only if the destination begins strictly
    /// inside the source range from above (`src < dest < src + len`);
    /// every other placement, including identical ranges and disjoint
    /// ranges, copies forward.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use gcmem::CopyDirection;
    ///
    /// assert_eq!(CopyDirection::for_move(0x1000, 0x2000, 64), CopyDirection::Forward);
    /// assert_eq!(CopyDirection::for_move(0x2020, 0x2000, 64), CopyDirection::Backward);
    /// ```
    #[inline]
    pub fn for_move(dest: usize, src: usize, len: usize) -> CopyDirection {
        if dest <= src || src + len <= dest {
            CopyDirection::Forward
        } else {
            CopyDirection::Backward
        }
    }
}

/// Copy a byte range from low addresses to high, word-granularly
///
/// When `dest`, `src`, and `len` are word-aligned (the reference-bearing
/// case) the whole range moves word-at-a-time. Ranges that are co-aligned
/// but offset fall back to the lead/middle/trail zoning of the fill
/// routine; ranges whose misalignments differ are copied byte-wise and
/// carry no atomicity guarantee (legal only for non-reference data).
///
/// # Arguments
/// * `dest` - Destination start
/// * `src` - Source start
/// * `len` - Length in bytes
///
/// # Safety
///
/// - `dest` and `src` must be non-null; `dest` valid for writes and `src`
///   valid for reads of `len` bytes
/// - For reference-bearing copies, `dest`, `src`, and `len` must all be
///   word-aligned (caller contract; violating it is undefined behavior,
///   not a recoverable error)
/// - If the ranges overlap, `dest` must not start strictly inside the
///   source range from above; use [`copy_backward`] or the bulk
///   dispatcher for that case
#[inline]
pub unsafe fn copy_forward(dest: *mut u8, src: *const u8, len: usize) -> *mut u8 {
    debug_assert!(!dest.is_null(), "null destination reached copy_forward");
    debug_assert!(!src.is_null(), "null source reached copy_forward");

    let mut d = dest as usize;
    let mut s = src as usize;
    let mut remaining = len;

    if (d ^ s) & WORD_MASK == 0 {
        // Lead zone: bytes up to the shared word boundary.
        let misalign = d & WORD_MASK;
        if misalign != 0 {
            let lead = (WORD_SIZE - misalign).min(remaining);
            for _ in 0..lead {
                *(d as *mut u8) = *(s as *const u8);
                d += 1;
                s += 1;
            }
            remaining -= lead;
        }

        // Middle zone: fully-formed source words, one store each.
        while remaining >= WORD_SIZE {
            let word = (*(s as *const AtomicUsize)).load(Ordering::Relaxed);
            (*(d as *const AtomicUsize)).store(word, Ordering::Relaxed);
            d += WORD_SIZE;
            s += WORD_SIZE;
            remaining -= WORD_SIZE;
        }

        // Trail zone.
        while remaining > 0 {
            *(d as *mut u8) = *(s as *const u8);
            d += 1;
            s += 1;
            remaining -= 1;
        }
    } else {
        // Differing misalignments cannot preserve word atomicity.
        while remaining > 0 {
            *(d as *mut u8) = *(s as *const u8);
            d += 1;
            s += 1;
            remaining -= 1;
        }
    }

    dest
}

/// Copy a byte range from high addresses to low, word-granularly
///
/// Identical zoning and torn-word guarantee as [`copy_forward`], iterating
/// from the end of the range down. Required when the destination starts
/// inside the source range from above: the forward order would overwrite
/// source words before reading them.
///
/// # Safety
///
/// Same contract as [`copy_forward`], with the overlap condition mirrored:
/// if the ranges overlap, `src` must not start strictly inside the
/// destination range from above.
#[inline]
pub unsafe fn copy_backward(dest: *mut u8, src: *const u8, len: usize) -> *mut u8 {
    debug_assert!(!dest.is_null(), "null destination reached copy_backward");
    debug_assert!(!src.is_null(), "null source reached copy_backward");

    let mut d_end = dest as usize + len;
    let mut s_end = src as usize + len;
    let mut remaining = len;

    if ((dest as usize) ^ (src as usize)) & WORD_MASK == 0 {
        // Trail zone first: bytes above the last shared word boundary.
        let trail = (d_end & WORD_MASK).min(remaining);
        for _ in 0..trail {
            d_end -= 1;
            s_end -= 1;
            *(d_end as *mut u8) = *(s_end as *const u8);
        }
        remaining -= trail;

        // Middle zone, descending.
        while remaining >= WORD_SIZE {
            d_end -= WORD_SIZE;
            s_end -= WORD_SIZE;
            let word = (*(s_end as *const AtomicUsize)).load(Ordering::Relaxed);
            (*(d_end as *const AtomicUsize)).store(word, Ordering::Relaxed);
            remaining -= WORD_SIZE;
        }

        // Lead zone.
        while remaining > 0 {
            d_end -= 1;
            s_end -= 1;
            *(d_end as *mut u8) = *(s_end as *const u8);
            remaining -= 1;
        }
    } else {
        while remaining > 0 {
            d_end -= 1;
            s_end -= 1;
            *(d_end as *mut u8) = *(s_end as *const u8);
            remaining -= 1;
        }
    }

    dest
}
