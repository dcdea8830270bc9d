//! # Error — Sieve Error Taxonomy
//!
//! Four kinds per spec.md §7: `InvalidInput`, `UnsupportedMode`, `BufferFull`
//! (not an error — ordinary termination, so it has no variant here),
//! `InternalInvariant` (a programming-error backstop, enforced with
//! `debug_assert!` in the primitive layer rather than surfaced as a
//! recoverable `Err`, since a lane escaping `[0, 2^16)` means the crate
//! itself has a bug, not that the caller passed bad input).
//!
//! Implements `Display`/`std::error::Error` by hand rather than pulling in a
//! derive macro for a two-variant enum.

use std::fmt;

/// Errors from [`crate::state::State::init`] construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SieveError {
    /// Q is even, Q is zero, or Q exceeds a caller-configured bit-count
    /// ceiling.
    InvalidInput(String),
    /// The mode word names a disabled tier/prime-type combination (e.g. the
    /// `Fips186` prime type, whose driver semantics are deliberately
    /// undefined — see the Open Questions in spec.md §9).
    UnsupportedMode(String),
}

impl fmt::Display for SieveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SieveError::InvalidInput(msg) => write!(f, "invalid sieve input: {}", msg),
            SieveError::UnsupportedMode(msg) => write!(f, "unsupported sieve mode: {}", msg),
        }
    }
}

impl std::error::Error for SieveError {}

/// Result alias used throughout `tables`, `state`, and `bignum`.
pub type Result<T> = std::result::Result<T, SieveError>;
