//! Configuration Module - Mutation-Layer Tuning Parameters
//!
//! This layer is almost configuration-free by design: the word width is a
//! compile-time property of the target and the entry points hold no state.
//! The only tunable is the card granularity of the default remembered-set
//! recorder.

use crate::error::{MemError, Result};
use crate::word::WORD_SIZE;

/// Configuration for the mutation-safety layer
///
/// # Examples
///
/// ```rust
/// use gcmem::MemConfig;
///
/// // Default configuration: 512-byte cards
/// let config = MemConfig::default();
/// assert!(config.validate().is_ok());
///
/// // Coarser cards for very large heaps
/// let config = MemConfig { card_shift: 12 };
/// assert_eq!(config.card_size(), 4096);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemConfig {
    /// Log2 of the card size in bytes
    ///
    /// One remembered-set card covers `1 << card_shift` bytes of heap.
    /// Smaller cards give the collector a tighter re-scan set at the cost
    /// of a larger table.
    ///
    /// Recommended values:
    /// - Small heaps (< 256MB): 8-9
    /// - General purpose: 9-10
    /// - Very large heaps: 11-12
    ///
    /// Default: 9 (512-byte cards)
    pub card_shift: u32,
}

impl MemConfig {
    /// Card size in bytes implied by `card_shift`.
    #[inline]
    pub fn card_size(&self) -> usize {
        1usize << self.card_shift
    }

    /// Validate the configuration
    ///
    /// # Returns
    /// - `Ok(())` - Configuration is usable
    /// - `Err(MemError::Configuration)` - A parameter is out of range
    pub fn validate(&self) -> Result<()> {
        if self.card_shift < 4 || self.card_shift > 20 {
            return Err(MemError::Configuration(format!(
                "card_shift {} out of range (expected 4..=20)",
                self.card_shift
            )));
        }

        if self.card_size() < WORD_SIZE {
            return Err(MemError::Configuration(format!(
                "card size {} smaller than word size {}",
                self.card_size(),
                WORD_SIZE
            )));
        }

        Ok(())
    }
}

impl Default for MemConfig {
    fn default() -> Self {
        Self { card_shift: 9 }
    }
}
