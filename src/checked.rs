//! Checked Wrappers - Typed Precondition Validation
//!
//! The raw entry points defer null and alignment validation to the call
//! site: on the hot path of every heap write, a redundant check is pure
//! cost, and the boundary that can translate a hardware fault into a
//! managed error lives above this layer anyway.
//!
//! That contract makes defects hard to diagnose in tests and debug
//! builds, so this module wraps every entry point with explicit
//! validation that returns a typed [`MemError`] instead of tripping a
//! `debug_assert!` or faulting. Build configuration picks the surface:
//! runtime-internal callers use the raw functions, test harnesses and
//! debug scaffolding use these.
//!
//! The checked copy/move wrappers enforce the full reference-bearing
//! contract (word-aligned destination, source, and length). Non-reference
//! byte copies that legitimately run unaligned should call the raw
//! surface directly.

use crate::barrier::RememberedSet;
use crate::bulk;
use crate::copy;
use crate::error::{MemError, Result};
use crate::fill;
use crate::word::{is_word_aligned, WORD_SIZE};

fn check_range(start: usize, len: usize) -> Result<()> {
    if start == 0 {
        return Err(MemError::NullRange);
    }
    if start.checked_add(len).is_none() {
        return Err(MemError::RangeOverflow { start, len });
    }
    Ok(())
}

fn check_word_aligned(addr: usize) -> Result<()> {
    if !is_word_aligned(addr) {
        return Err(MemError::Misaligned {
            address: addr,
            alignment: WORD_SIZE,
        });
    }
    Ok(())
}

fn check_ref_copy(dest: usize, src: usize, len: usize) -> Result<()> {
    check_range(dest, len)?;
    check_range(src, len)?;
    check_word_aligned(dest)?;
    check_word_aligned(src)?;
    if len % WORD_SIZE != 0 {
        return Err(MemError::Misaligned {
            address: len,
            alignment: WORD_SIZE,
        });
    }
    Ok(())
}

/// Validated [`crate::gc_safe_fill`]
///
/// Rejects null destinations and address-space overflow. The fill itself
/// has no alignment precondition; unaligned edges are written byte-wise.
///
/// # Safety
///
/// Validation covers the checkable contract only; the caller still
/// vouches that `dest` points at `len` bytes it owns for the duration of
/// the call.
pub unsafe fn try_fill(dest: *mut u8, len: usize, value: u8) -> Result<*mut u8> {
    check_range(dest as usize, len)?;
    Ok(fill::gc_safe_fill(dest, len, value))
}

/// Validated [`crate::copy_forward`] for reference-bearing ranges
///
/// # Safety
///
/// As [`try_fill`]: ownership and overlap direction remain the caller's
/// contract.
pub unsafe fn try_copy_forward(dest: *mut u8, src: *const u8, len: usize) -> Result<*mut u8> {
    check_ref_copy(dest as usize, src as usize, len)?;
    Ok(copy::copy_forward(dest, src, len))
}

/// Validated [`crate::copy_backward`] for reference-bearing ranges
///
/// # Safety
///
/// As [`try_copy_forward`].
pub unsafe fn try_copy_backward(dest: *mut u8, src: *const u8, len: usize) -> Result<*mut u8> {
    check_ref_copy(dest as usize, src as usize, len)?;
    Ok(copy::copy_backward(dest, src, len))
}

/// Validated [`crate::move_with_barrier`] against an explicit recorder
///
/// # Safety
///
/// As [`try_copy_forward`]; overlap direction is handled here, so any
/// relative placement of the ranges is legal.
pub unsafe fn try_move_with_barrier(
    recorder: &dyn RememberedSet,
    dest: *mut u8,
    src: *const u8,
    len: usize,
) -> Result<()> {
    check_ref_copy(dest as usize, src as usize, len)?;
    bulk::move_with_barrier_using(recorder, dest, src, len);
    Ok(())
}

/// Validated [`crate::copy_with_barrier`] against an explicit recorder
///
/// # Safety
///
/// As [`try_copy_forward`]: the caller guarantees the ranges do not
/// overlap with `dest` above `src`.
pub unsafe fn try_copy_with_barrier(
    recorder: &dyn RememberedSet,
    dest: *mut u8,
    src: *const u8,
    len: usize,
) -> Result<()> {
    check_ref_copy(dest as usize, src as usize, len)?;
    bulk::copy_with_barrier_using(recorder, dest, src, len);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::barrier::NullRemembered;

    #[test]
    fn test_try_fill_rejects_null() {
        let result = unsafe { try_fill(std::ptr::null_mut(), 8, 0) };
        assert_eq!(result, Err(MemError::NullRange));
    }

    #[test]
    fn test_try_fill_rejects_overflow() {
        let result = unsafe { try_fill(usize::MAX as *mut u8, 16, 0) };
        assert!(matches!(result, Err(MemError::RangeOverflow { .. })));
    }

    #[test]
    fn test_try_fill_accepts_unaligned() {
        let mut buf = [0xFFu8; 32];
        // Offset 1 is fine for fill; only copies carry the alignment contract.
        let dest = unsafe { buf.as_mut_ptr().add(1) };
        let result = unsafe { try_fill(dest, 8, 0) };
        assert!(result.is_ok());
        assert_eq!(&buf[1..9], &[0u8; 8]);
    }

    #[test]
    fn test_try_copy_rejects_misaligned_pointer() {
        let src = [0usize; 4];
        let mut dst = [0usize; 4];

        let result = unsafe {
            try_copy_forward(
                (dst.as_mut_ptr() as *mut u8).add(1),
                src.as_ptr() as *const u8,
                WORD_SIZE,
            )
        };
        assert!(matches!(result, Err(MemError::Misaligned { .. })));
    }

    #[test]
    fn test_try_copy_rejects_misaligned_length() {
        let src = [0usize; 4];
        let mut dst = [0usize; 4];

        let result = unsafe {
            try_copy_forward(
                dst.as_mut_ptr() as *mut u8,
                src.as_ptr() as *const u8,
                WORD_SIZE + 1,
            )
        };
        assert_eq!(
            result,
            Err(MemError::Misaligned {
                address: WORD_SIZE + 1,
                alignment: WORD_SIZE
            })
        );
    }

    #[test]
    fn test_try_copy_forward_happy_path() {
        let src = [7usize; 4];
        let mut dst = [0usize; 4];

        let result = unsafe {
            try_copy_forward(
                dst.as_mut_ptr() as *mut u8,
                src.as_ptr() as *const u8,
                4 * WORD_SIZE,
            )
        };
        assert!(result.is_ok());
        assert_eq!(dst, src);
    }

    #[test]
    fn test_try_move_with_barrier_validates_both_ranges() {
        let mut dst = [0usize; 2];

        let result = unsafe {
            try_move_with_barrier(
                &NullRemembered,
                dst.as_mut_ptr() as *mut u8,
                std::ptr::null(),
                WORD_SIZE,
            )
        };
        assert_eq!(result, Err(MemError::NullRange));
    }

    #[test]
    fn test_try_copy_with_barrier_happy_path() {
        let src = [3usize; 2];
        let mut dst = [0usize; 2];

        let result = unsafe {
            try_copy_with_barrier(
                &NullRemembered,
                dst.as_mut_ptr() as *mut u8,
                src.as_ptr() as *const u8,
                2 * WORD_SIZE,
            )
        };
        assert!(result.is_ok());
        assert_eq!(dst, src);
    }
}
