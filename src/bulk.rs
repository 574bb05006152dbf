//! Bulk Move Dispatcher - Overlap-Aware Heap Moves With Barriers
//!
//! Composite entry points for heap-targeted bulk writes:
//!
//! - [`move_with_barrier`] is the general entry for arbitrary, possibly
//!   overlapping moves: it picks the copy direction, copies, then records
//!   the write barrier over the destination unconditionally.
//! - [`copy_with_barrier`] skips the overlap analysis for callers that
//!   guarantee disjoint ranges (straight struct/array assignment into the
//!   heap).
//!
//! Both exist in a `_using` form taking an explicit [`RememberedSet`], and
//! a plain form routed through the process-wide recorder installed at
//! runtime initialization.
//!
//! Ordering: a release fence sits between the last data store and the
//! barrier notification, so a collector that observes the remembered-set
//! update can rely on finding the fully written data behind it.

use crate::barrier::{self, RememberedSet};
use crate::copy::{copy_backward, copy_forward, CopyDirection};
use crate::stats;
use std::sync::atomic::{fence, Ordering};

/// Move a byte range with overlap analysis, then record a write barrier
///
/// Chooses forward or backward copy per [`CopyDirection::for_move`]; the
/// result equals "read all of source into a temporary, then write" for
/// every relative placement of the ranges. The destination range is then
/// reported to the installed remembered-set recorder unconditionally:
/// this entry point is reserved for heap-targeted moves where references
/// are always assumed possible.
///
/// The destination itself does not have to lie on the collected heap; the
/// recorder ignores untracked addresses.
///
/// # Safety
///
/// - `dest` and `src` must be non-null and valid for `len` bytes of
///   writes/reads respectively
/// - For reference-bearing moves, `dest`, `src`, and `len` must all be
///   word-aligned (caller contract)
///
/// # Examples
///
/// ```rust
/// use gcmem::move_with_barrier;
///
/// let mut buf = [1usize, 2, 3, 4, 0];
/// let word = std::mem::size_of::<usize>();
/// unsafe {
///     // Shift four words up by one slot, in place.
///     let base = buf.as_mut_ptr();
///     move_with_barrier(base.add(1) as *mut u8, base as *const u8, 4 * word);
/// }
/// assert_eq!(buf, [1, 1, 2, 3, 4]);
/// ```
#[inline]
pub unsafe fn move_with_barrier(dest: *mut u8, src: *const u8, len: usize) {
    let recorder = barrier::installed_recorder();
    move_with_barrier_using(recorder.as_ref(), dest, src, len);
}

/// [`move_with_barrier`] against an explicit recorder
///
/// # Safety
///
/// Same contract as [`move_with_barrier`].
pub unsafe fn move_with_barrier_using(
    recorder: &dyn RememberedSet,
    dest: *mut u8,
    src: *const u8,
    len: usize,
) {
    match CopyDirection::for_move(dest as usize, src as usize, len) {
        CopyDirection::Forward => {
            copy_forward(dest, src, len);
            stats::global().record_copy_forward(len);
        }
        CopyDirection::Backward => {
            copy_backward(dest, src, len);
            stats::global().record_copy_backward(len);
        }
    }
    stats::global().record_move();

    if len > 0 {
        fence(Ordering::Release);
        recorder.note_range(dest as usize, len);
        stats::global().record_barrier(len);
    }
}

/// Straight-line copy plus write barrier, no overlap analysis
///
/// For callers that already know their ranges are disjoint and want the
/// heap-targeted barrier without paying the direction branch.
///
/// # Safety
///
/// - Same contract as [`crate::copy_forward`]
/// - The ranges must not overlap with `dest` above `src`
#[inline]
pub unsafe fn copy_with_barrier(dest: *mut u8, src: *const u8, len: usize) {
    let recorder = barrier::installed_recorder();
    copy_with_barrier_using(recorder.as_ref(), dest, src, len);
}

/// [`copy_with_barrier`] against an explicit recorder
///
/// # Safety
///
/// Same contract as [`copy_with_barrier`].
pub unsafe fn copy_with_barrier_using(
    recorder: &dyn RememberedSet,
    dest: *mut u8,
    src: *const u8,
    len: usize,
) {
    copy_forward(dest, src, len);
    stats::global().record_copy_forward(len);

    if len > 0 {
        fence(Ordering::Release);
        recorder.note_range(dest as usize, len);
        stats::global().record_barrier(len);
    }
}
