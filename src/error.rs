//! Error Module - Mutation-Layer Error Types
//!
//! The unchecked entry points treat precondition violations as caller
//! defects: they assert in debug builds and are unchecked in release
//! builds. The checked wrappers in [`crate::checked`] surface the same
//! violations as typed errors so test harnesses and debug builds can
//! report defects without taking a hardware fault.

use thiserror::Error;

/// Error type for the checked mutation surface
///
/// # Examples
///
/// ```rust
/// use gcmem::error::MemError;
///
/// fn report(err: MemError) {
///     match err {
///         MemError::Misaligned { address, alignment } => {
///             eprintln!("misaligned: {:#x} (need {})", address, alignment);
///         }
///         _ => eprintln!("contract violation: {}", err),
///     }
/// }
/// ```
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MemError {
    /// Null destination or source range
    ///
    /// **When returned:** A checked entry point received a null pointer.
    ///
    /// **Recovery strategy:** None. Null validation belongs to the call
    /// boundary; reaching this layer with a null range is a runtime bug.
    #[error("Null range passed to heap mutation primitive")]
    NullRange,

    /// Address or length not word-aligned for a reference-bearing operation
    ///
    /// **When returned:** A checked copy/move received a destination,
    /// source, or length that is not a word multiple.
    ///
    /// **Recovery strategy:** Fix the caller. Unaligned data is only legal
    /// on the non-reference byte-copy paths.
    #[error("Misaligned operand: address {address:#x} is not aligned to {alignment} bytes")]
    Misaligned { address: usize, alignment: usize },

    /// Range end overflows the address space
    ///
    /// **When returned:** `start + len` does not fit in `usize`.
    ///
    /// **Recovery strategy:** Fix the caller; no valid memory range wraps
    /// the address space.
    #[error("Range overflow: start {start:#x} with length {len}")]
    RangeOverflow { start: usize, len: usize },

    /// Invalid configuration
    ///
    /// **When returned:** [`crate::config::MemConfig::validate`] rejected a
    /// parameter.
    ///
    /// **Recovery strategy:** Use defaults or correct the parameter.
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl MemError {
    /// Check if this error reports a caller contract violation
    ///
    /// Contract violations are programming errors in the surrounding
    /// runtime, not recoverable conditions.
    pub fn is_contract_violation(&self) -> bool {
        !matches!(self, MemError::Configuration(_))
    }
}

/// Result type alias for checked mutation operations
pub type Result<T> = std::result::Result<T, MemError>;
