//! # Tables — Small-Prime Table Generation
//!
//! Builds the four parallel, process-lifetime immutable arrays that every
//! other module in this crate reads from: `primes`, `inv`, `limit`, and
//! `m2r`. See the crate-level documentation for the identities each table
//! must satisfy.
//!
//! ## Algorithm: Wheel-30 Sieve
//!
//! Candidate primes are generated with a mod-30 wheel sieve of Eratosthenes
//! (tracks only integers coprime to {2, 3, 5}, 8 residues per 30 — 26.7% of
//! the memory of a naive bitmap), then filtered to drop 2 and 3 and take the
//! first `N_MAX` survivors. This is a startup-only cost; none of it runs on
//! the per-candidate hot path.
//!
//! ## Algorithm: Modular Inverse mod 2^16 via Hensel Lifting
//!
//! For odd `p`, `p^-1 mod 2^16` is found by Newton's method on `f(x) = p*x -
//! 1`, doubling the number of correct bits each iteration starting from the
//! trivial 1-bit inverse (`p` is odd, so `p * 1 ≡ 1 (mod 2)`). Four
//! iterations take 1 → 2 → 4 → 8 → 16 bits of precision.
//!
//! ## References
//!
//! - Granlund & Montgomery, "Division by Invariant Integers using
//!   Multiplication", PLDI 1994.
//! - Lemire, Kaiser & Kurz, "Faster Remainder by Direct Computation", 2019.

use std::fmt;

/// Number of small primes in the largest (L) tier.
pub const N_MAX: usize = 3456;

/// Tier sizes, smallest to largest. Each is a multiple of 64 (the block
/// width), and each is a prefix of the next — tier monotonicity (§8,
/// invariant 7) falls directly out of this nesting.
pub const TIER_S: usize = 576;
pub const TIER_M: usize = 1856;
pub const TIER_L: usize = N_MAX;

const _: () = assert!(TIER_S % 64 == 0);
const _: () = assert!(TIER_M % 64 == 0);
const _: () = assert!(TIER_L % 64 == 0);
const _: () = assert!(TIER_S < TIER_M && TIER_M < TIER_L);

/// Selects how many small primes a driver trial-divides against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tier {
    /// 576 primes — cheapest, lowest rejection rate.
    S,
    /// 1856 primes.
    M,
    /// 3456 primes — most expensive, highest rejection rate.
    L,
}

impl Tier {
    /// Number of small primes this tier trial-divides against.
    #[inline]
    pub const fn len(self) -> usize {
        match self {
            Tier::S => TIER_S,
            Tier::M => TIER_M,
            Tier::L => TIER_L,
        }
    }

    /// Number of 64-lane blocks covering this tier.
    #[inline]
    pub const fn blocks(self) -> usize {
        self.len() / 64
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tier::S => write!(f, "S(576)"),
            Tier::M => write!(f, "M(1856)"),
            Tier::L => write!(f, "L(3456)"),
        }
    }
}

/// The four parallel small-prime tables, each of length [`N_MAX`].
///
/// Immutable once built; safe to share across threads behind an `Arc` or as
/// a `'static` reference (typically built once at process start via
/// [`build_tables`]).
#[derive(Debug, Clone)]
pub struct Tables {
    /// `primes[i]` — the i-th odd prime starting at 5 (3 is excluded).
    pub primes: Vec<u16>,
    /// `inv[i] = primes[i]^-1 mod 2^16`.
    pub inv: Vec<u16>,
    /// `limit[i] = floor((2^16 - 1) / primes[i])`.
    pub limit: Vec<u16>,
    /// `m2r[i] = 2^16 - primes[i]` stored as its two's-complement negation,
    /// so that `v.wrapping_add(m2r[i])` computes `v - primes[i]` (mod 2^16)
    /// via the add path — one fold-back subtracts exactly one `primes[i]`
    /// and leaves `v mod primes[i]` unchanged.
    pub m2r: Vec<u16>,
}

impl Tables {
    /// Slice each table down to the prefix used by `tier`.
    #[inline]
    pub fn tier_slices(&self, tier: Tier) -> TableSlices<'_> {
        let n = tier.len();
        TableSlices {
            primes: &self.primes[..n],
            inv: &self.inv[..n],
            limit: &self.limit[..n],
            m2r: &self.m2r[..n],
        }
    }
}

/// Borrowed prefix of [`Tables`] sized to one [`Tier`].
#[derive(Debug, Clone, Copy)]
pub struct TableSlices<'a> {
    pub primes: &'a [u16],
    pub inv: &'a [u16],
    pub limit: &'a [u16],
    pub m2r: &'a [u16],
}

/// Build the small-prime tables. Idempotent: repeated calls produce
/// identical tables. Pure computation, no I/O, no global state — callers
/// typically call this once and share the result (e.g. via `OnceLock` or by
/// threading a `&Tables` through their own setup), since the library itself
/// keeps no process-wide singleton.
pub fn build_tables() -> Tables {
    let primes = generate_small_primes(N_MAX);
    debug_assert_eq!(primes.len(), N_MAX);
    debug_assert!(primes.iter().all(|&p| p >= 5), "table must exclude 2 and 3");

    let mut inv = Vec::with_capacity(N_MAX);
    let mut limit = Vec::with_capacity(N_MAX);
    let mut m2r = Vec::with_capacity(N_MAX);

    for &p in &primes {
        inv.push(mod_inverse_pow2_16(p));
        // floor((2^16 - 1) / p); plain integer division already truncates.
        limit.push(0xFFFFu16 / p);
        // p.wrapping_neg(): adding this with wrapping arithmetic subtracts
        // exactly one p, so it never disturbs v mod p.
        m2r.push(p.wrapping_neg());
    }

    Tables {
        primes,
        inv,
        limit,
        m2r,
    }
}

/// Modular inverse of odd `p` modulo 2^16, via Hensel lifting (Newton's
/// method on `f(x) = p*x - 1`). Doubles correct bits each iteration: 1 → 2 →
/// 4 → 8 → 16.
fn mod_inverse_pow2_16(p: u16) -> u16 {
    debug_assert!(p & 1 == 1, "modular inverse mod 2^16 requires odd p");
    let mut inv: u16 = 1; // correct mod 2^1, since p is odd.
    for _ in 0..4 {
        inv = inv.wrapping_mul(2u16.wrapping_sub(p.wrapping_mul(inv)));
    }
    debug_assert_eq!(p.wrapping_mul(inv), 1, "p * inv must be 1 mod 2^16");
    inv
}

/// Generate the first `count` odd primes starting at 5 (2 and 3 excluded),
/// via a mod-30 wheel sieve of Eratosthenes.
fn generate_small_primes(count: usize) -> Vec<u16> {
    if count == 0 {
        return Vec::new();
    }

    // Rough upper bound via the prime number theorem, generous enough that
    // a single sieve pass almost always suffices; we extend geometrically
    // on the rare miss instead of guessing tightly.
    let mut bound = estimate_nth_prime_bound(count + 2);
    loop {
        let primes = sieve_wheel30(bound);
        // Drop 2 and 3; keep the first `count` of what's left.
        let filtered: Vec<u16> = primes
            .into_iter()
            .filter(|&p| p > 3)
            .take(count)
            .map(|p| p as u16)
            .collect();
        if filtered.len() == count {
            return filtered;
        }
        bound = bound.saturating_mul(2);
    }
}

/// Upper bound for the n-th prime, from Rosser's theorem (n*(ln n + ln ln n)
/// for n >= 6, padded generously for small n).
fn estimate_nth_prime_bound(n: usize) -> u64 {
    if n < 6 {
        return 15;
    }
    let nf = n as f64;
    let bound = nf * (nf.ln() + nf.ln().ln()) * 1.2;
    bound.ceil() as u64 + 10
}

/// Sieve of Eratosthenes over a mod-30 wheel: tracks only the 8 residues
/// coprime to 30, packed one bit per residue per segment of 30 integers.
fn sieve_wheel30(limit: u64) -> Vec<u64> {
    if limit < 2 {
        return Vec::new();
    }
    if limit < 7 {
        return [2u64, 3, 5].into_iter().filter(|&p| p <= limit).collect();
    }

    const RESIDUES: [u8; 8] = [1, 7, 11, 13, 17, 19, 23, 29];
    const RES_TO_IDX: [u8; 30] = [
        255, 0, 255, 255, 255, 255, 255, 1, 255, 255, 255, 2, 255, 3, 255, 255, 255, 4, 255, 5,
        255, 255, 255, 6, 255, 255, 255, 255, 255, 7,
    ];

    let limit = limit as usize;
    let num_segments = limit / 30 + 1;
    let mut sieve = vec![0xFFu8; num_segments];

    let sqrt_limit = (limit as f64).sqrt() as usize + 1;
    for seg in 0..num_segments {
        for &ri in &RESIDUES {
            let n = seg * 30 + ri as usize;
            if n < 7 || n > sqrt_limit {
                continue;
            }
            let idx = RES_TO_IDX[ri as usize] as usize;
            if sieve[seg] & (1 << idx) == 0 {
                continue;
            }
            let mut m = n * n;
            while m <= limit {
                let ms = m / 30;
                let mr = m % 30;
                if RES_TO_IDX[mr] != 255 {
                    sieve[ms] &= !(1 << RES_TO_IDX[mr]);
                }
                m += n;
            }
        }
    }

    let mut primes = vec![2, 3, 5];
    for (seg, &byte) in sieve.iter().enumerate().take(num_segments) {
        if byte == 0 {
            continue;
        }
        for (bit_idx, &r) in RESIDUES.iter().enumerate() {
            if byte & (1 << bit_idx) != 0 {
                let n = seg * 30 + r as usize;
                if n > 5 && n <= limit {
                    primes.push(n as u64);
                }
            }
        }
    }
    primes
}
