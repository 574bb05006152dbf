//! Test Utilities for the Mutation-Safety Test Suite
//!
//! Word-aligned buffers and a recording remembered-set fake. The fake
//! captures every notified sub-range so tests can assert that the union
//! of notifications covers a destination range with no gaps.

#![allow(dead_code)]

use gcmem::barrier::RememberedSet;
use gcmem::WORD_SIZE;
use parking_lot::Mutex;

/// Word-backed byte buffer: base address is always word-aligned.
pub struct AlignedBuf {
    words: Vec<usize>,
}

impl AlignedBuf {
    /// Buffer of `words` words, every byte set to `seed`.
    pub fn filled(words: usize, seed: u8) -> Self {
        let pattern = (seed as usize) * (usize::MAX / 0xFF);
        Self {
            words: vec![pattern; words],
        }
    }

    /// Buffer whose words count upward from `start` (distinct content per slot).
    pub fn counting(words: usize, start: usize) -> Self {
        Self {
            words: (start..start + words).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.words.len() * WORD_SIZE
    }

    pub fn base(&self) -> usize {
        self.words.as_ptr() as usize
    }

    pub fn as_ptr(&self) -> *const u8 {
        self.words.as_ptr() as *const u8
    }

    pub fn as_mut_ptr(&mut self) -> *mut u8 {
        self.words.as_mut_ptr() as *mut u8
    }

    pub fn bytes(&self) -> &[u8] {
        unsafe { std::slice::from_raw_parts(self.as_ptr(), self.len()) }
    }

    pub fn bytes_mut(&mut self) -> &mut [u8] {
        let len = self.len();
        unsafe { std::slice::from_raw_parts_mut(self.as_mut_ptr(), len) }
    }

    pub fn words(&self) -> &[usize] {
        &self.words
    }
}

/// Remembered-set fake that records every notified sub-range.
#[derive(Default)]
pub struct RecordingRemembered {
    ranges: Mutex<Vec<(usize, usize)>>,
}

impl RecordingRemembered {
    pub fn new() -> Self {
        Self::default()
    }

    /// All notifications, in arrival order.
    pub fn ranges(&self) -> Vec<(usize, usize)> {
        self.ranges.lock().clone()
    }

    pub fn notification_count(&self) -> usize {
        self.ranges.lock().len()
    }

    /// Check that the union of notified ranges covers `[start, start + len)`
    /// with no gaps.
    pub fn covers(&self, start: usize, len: usize) -> bool {
        if len == 0 {
            return true;
        }

        let mut ranges = self.ranges.lock().clone();
        ranges.sort_unstable();

        let end = start + len;
        let mut cursor = start;
        for (r_start, r_len) in ranges {
            let r_end = r_start + r_len;
            if r_start > cursor {
                // Gap before this range.
                return false;
            }
            cursor = cursor.max(r_end);
            if cursor >= end {
                return true;
            }
        }
        cursor >= end
    }

    pub fn clear(&self) {
        self.ranges.lock().clear();
    }
}

impl RememberedSet for RecordingRemembered {
    fn note_range(&self, start: usize, len: usize) {
        self.ranges.lock().push((start, len));
    }
}
