//! # simd-sieve — SIMD-Friendly Trial-Division Sieve
//!
//! A small-prime trial-division filter for cryptographic prime candidate
//! search. Given a big candidate Q, this crate rejects it quickly if any of
//! a configurable set of small primes (up to 3456 of them) divides Q — or,
//! in twin/safe-prime mode, divides Q's paired candidate (Q+2 or 2Q+1).
//! Surviving candidates still need a real primality test (Miller–Rabin,
//! BPSW, or a Pocklington/BLS proof) downstream; this crate only implements
//! the cheap first filter.
//!
//! ## Module Organization
//!
//! - [`tables`] — builds the four parallel small-prime tables (`primes`,
//!   `inv`, `limit`, `m2r`) and the [`tables::Tier`] selector.
//! - [`primitives`] — 16-lane, branch-free `u16` operations the rest of the
//!   crate composes.
//! - [`block`] — 64-lane block primitives: the three divisibility testers
//!   (plain/twin/safe) and block-wide advance.
//! - [`bignum`] — a dependency-free big-endian reduction helper, for callers
//!   without their own bignum type.
//! - [`state`] — [`state::State`], the mode word, and the mod-6 wheel.
//! - [`drivers`] — [`drivers::SieveDriver`], which walks a state forward
//!   along the wheel and yields surviving candidates.
//! - [`error`] — [`error::SieveError`].
//!
//! ## Quick Start
//!
//! ```
//! use simd_sieve::drivers::{drive, SieveDriver};
//! use simd_sieve::state::{ModeWord, PrimeType, State};
//! use simd_sieve::tables::Tier;
//!
//! let tables = simd_sieve::build_tables();
//! let mode = ModeWord::new(PrimeType::Plain, Tier::S).unwrap();
//! let state = State::init(&[0x01, 0x09], &tables, mode).unwrap(); // Q = 265
//! let mut driver = SieveDriver::new(state, &tables);
//! let mut out = [0u64; 4];
//! let n = drive(&mut driver, &mut out, 4);
//! assert_eq!(n, 4);
//! ```

pub mod bignum;
pub mod block;
pub mod drivers;
pub mod error;
pub mod primitives;
pub mod state;
pub mod tables;

pub use error::{Result, SieveError};
pub use tables::{build_tables, Tables, Tier};
