//! # State — Residue State and Mode Word
//!
//! `State` is the mutable, caller-owned handle threaded through every
//! `drive` call: the vector of current remainders, an LSB mirror of the
//! candidate, a cumulative advance counter, `Q mod 6`, and the mode bitfield
//! that picks which driver and which table tier apply. See spec.md §3 for
//! the full invariant list.

use crate::bignum;
use crate::error::{Result, SieveError};
use crate::tables::{Tables, Tier};
use std::fmt;

/// `prime_type` bits of the mode word (spec.md §6).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimeType {
    /// Tests Q only.
    Plain = 0x01,
    /// Tests Q and Q+2 (twin prime candidates).
    Twin = 0x02,
    /// Tests Q and 2Q+1 (Sophie Germain / safe prime candidates).
    Safe = 0x04,
    /// Vector-increment (FIPS 186-style multi-limb stride) mode. The bit is
    /// defined; driver semantics are intentionally undefined — see Open
    /// Question 1 in spec.md §9. Constructing a `State` with this prime
    /// type always fails with `UnsupportedMode`.
    Fips186 = 0x08,
}

impl PrimeType {
    fn from_bits(bits: u16) -> Result<Self> {
        match bits {
            0x01 => Ok(PrimeType::Plain),
            0x02 => Ok(PrimeType::Twin),
            0x04 => Ok(PrimeType::Safe),
            0x08 => Ok(PrimeType::Fips186),
            other => Err(SieveError::UnsupportedMode(format!(
                "unknown prime_type bits: {:#06x}",
                other
            ))),
        }
    }
}

fn tier_from_bits(bits: u16) -> Result<Tier> {
    match bits {
        0x0100 => Ok(Tier::S),
        0x0200 => Ok(Tier::M),
        0x0300 => Ok(Tier::L),
        other => Err(SieveError::UnsupportedMode(format!(
            "unknown table_tier bits: {:#06x}",
            other
        ))),
    }
}

fn tier_bits(tier: Tier) -> u16 {
    match tier {
        Tier::S => 0x0100,
        Tier::M => 0x0200,
        Tier::L => 0x0300,
    }
}

/// The `{ prime_type, table_tier }` mode bitfield (spec.md §6). Invalid
/// combinations are rejected at `State` construction, never at `drive`
/// time — a mode word that somehow reaches `drive` is trusted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ModeWord {
    pub prime_type: PrimeType,
    pub tier: Tier,
}

impl ModeWord {
    pub fn new(prime_type: PrimeType, tier: Tier) -> Result<Self> {
        if prime_type == PrimeType::Fips186 {
            return Err(SieveError::UnsupportedMode(
                "Fips186 prime type has no defined driver semantics (Open Question 1, spec.md §9)"
                    .into(),
            ));
        }
        Ok(ModeWord { prime_type, tier })
    }

    /// Encode as the packed `u16` bitfield from spec.md §6.
    pub fn bits(self) -> u16 {
        self.prime_type as u16 | tier_bits(self.tier)
    }

    /// Decode from the packed `u16` bitfield.
    pub fn from_bits(bits: u16) -> Result<Self> {
        let prime_type = PrimeType::from_bits(bits & 0x00FF)?;
        let tier = tier_from_bits(bits & 0xFF00)?;
        ModeWord::new(prime_type, tier)
    }
}

impl fmt::Display for ModeWord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}/{}", self.prime_type, self.tier)
    }
}

/// Advance, in residues mod 6, to reach the next state whose mod6 is in
/// `{1, 5}` (the plain driver's two legal starting points), per spec.md
/// §4.5's table: `0->1, 1->0, 2->3, 3->2, 4->1, 5->0`.
///
/// Note the table's `1->0` and `5->0` entries mean "already a legal start,
/// advance by 0" — `mod6=1` lands on `AT_6K1`, `mod6=5` lands on `AT_6K5`,
/// neither needs to move.
pub(crate) fn plain_advance_table(mod6: u8) -> u8 {
    match mod6 {
        0 => 1,
        1 => 0,
        2 => 3,
        3 => 2,
        4 => 1,
        5 => 0,
        _ => unreachable!("mod6 must be in [0, 6)"),
    }
}

/// Advance, in residues mod 6, to reach `mod6 = 5` — the only legal starting
/// point for the twin and safe drivers. Per spec.md §4.5, twin/safe must
/// never visit a `6k+1` candidate: the paired value (`Q+2` for twin, `2Q+1`
/// for safe) is divisible by 3 whenever `Q ≡ 1 (mod 6)`, and 3 is excluded
/// from the small-prime tables, so `no_factor_twin`/`no_factor_safe` can
/// never catch it. `(11 - mod6) mod 6` is the distance from `mod6` to 5
/// going forward.
pub(crate) fn twin_safe_advance_table(mod6: u8) -> u8 {
    debug_assert!(mod6 < 6, "mod6 must be in [0, 6)");
    ((11 - mod6 as u16) % 6) as u8
}

/// The residue state threaded through driver calls. Owned by the caller;
/// mutated exclusively by `drive`/`SieveDriver::next_survivor`.
#[derive(Debug, Clone)]
pub struct State {
    /// Current remainders `r[i] = (candidate) mod primes[i]`, length
    /// `mode.tier.len()`.
    pub(crate) r: Vec<u16>,
    /// Low 64 bits of the current candidate. Wrap-around past 2^64 is not
    /// tracked (spec.md Non-goals / Open Question 2).
    pub lsb: u64,
    /// Cumulative scalar advance since `State::init`.
    pub offset: u64,
    /// Current candidate mod 6.
    pub mod6: u8,
    /// Stride mod 6 for vector-increment mode. Reserved; unused while
    /// `Fips186` has no driver.
    pub mod6_incr: u8,
    /// `{ prime_type, table_tier }`.
    pub mode: ModeWord,
    /// Diagnostic mirror of the original big number's hex text. The
    /// authoritative bignum lives with the caller; this field exists only
    /// so logs/error messages can name the search without re-deriving hex
    /// from `r`/`lsb`.
    pub q_hex: String,
}

impl State {
    /// Construct a `State` from a big-endian byte representation of Q,
    /// using this crate's built-in `bignum::mod_u16` reduction.
    ///
    /// Rejects even Q, per spec.md §4.6 step 3 (safe-prime mode additionally
    /// needs Q odd to make `2Q+1` meaningful, but evenness is rejected
    /// uniformly for every prime type — an even candidate can never be an
    /// odd prime regardless of which driver runs).
    pub fn init(q_be: &[u8], tables: &Tables, mode: ModeWord) -> Result<Self> {
        if q_be.is_empty() || q_be.iter().all(|&b| b == 0) {
            return Err(SieveError::InvalidInput("Q must be nonzero".into()));
        }
        if !bignum::is_odd(q_be) {
            return Err(SieveError::InvalidInput("Q must be odd".into()));
        }

        let slices = tables.tier_slices(mode.tier);
        let r: Vec<u16> = slices.primes.iter().map(|&p| bignum::mod_u16(q_be, p)).collect();

        Ok(State {
            r,
            lsb: bignum::low_u64(q_be),
            offset: 0,
            mod6: bignum::mod6(q_be),
            mod6_incr: 0,
            mode,
            q_hex: to_hex(q_be),
        })
    }

    /// Construct a `State` directly from precomputed residues, bypassing
    /// `bignum::mod_u16` — the seam for callers with their own bignum type
    /// (e.g. a `rug::Integer`) who can compute `Q mod p[i]` more cheaply
    /// than byte-at-a-time reduction, or who already have the residues from
    /// a prior computation.
    ///
    /// `residues.len()` must equal `mode.tier.len()`, and every
    /// `residues[i] < tables.tier_slices(mode.tier).primes[i]`.
    pub fn from_residues(
        residues: Vec<u16>,
        lsb: u64,
        mod6: u8,
        mode: ModeWord,
        tables: &Tables,
    ) -> Result<Self> {
        let slices = tables.tier_slices(mode.tier);
        if residues.len() != slices.primes.len() {
            return Err(SieveError::InvalidInput(format!(
                "expected {} residues for tier {}, got {}",
                slices.primes.len(),
                mode.tier,
                residues.len()
            )));
        }
        for (i, (&r, &p)) in residues.iter().zip(slices.primes.iter()).enumerate() {
            if r >= p {
                return Err(SieveError::InvalidInput(format!(
                    "residue[{}] = {} is not < primes[{}] = {}",
                    i, r, i, p
                )));
            }
        }
        if mod6 >= 6 {
            return Err(SieveError::InvalidInput(format!("mod6 = {} out of range", mod6)));
        }
        Ok(State {
            r: residues,
            lsb,
            offset: 0,
            mod6,
            mod6_incr: 0,
            mode,
            q_hex: format!("0x{:x}", lsb),
        })
    }

    /// Number of small primes this state's tier trial-divides against.
    #[inline]
    pub fn tier_len(&self) -> usize {
        self.r.len()
    }
}

fn to_hex(q_be: &[u8]) -> String {
    let mut s = String::with_capacity(2 + q_be.len() * 2);
    s.push_str("0x");
    for b in q_be {
        s.push_str(&format!("{:02x}", b));
    }
    s
}
