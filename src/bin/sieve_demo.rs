//! # sieve-demo — Illustrative CLI Wrapper
//!
//! Thin command-line front end over the `simd_sieve` library: parses a
//! candidate Q, builds a [`simd_sieve::state::State`], and prints the first
//! `--count` survivors of the requested prime type and tier. Not part of the
//! library's public contract — a real integration would drive the crate
//! from its own bignum type via `State::from_residues` rather than parsing
//! decimal/hex text on the command line.

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use rayon::prelude::*;
use simd_sieve::drivers::{drive, SieveDriver};
use simd_sieve::state::{ModeWord, PrimeType as LibPrimeType, State};
use simd_sieve::tables::{Tables, Tier as LibTier};
use std::path::PathBuf;
use tracing::info;

#[derive(Parser)]
#[command(name = "sieve-demo", about = "Trial-divide a candidate against the small-prime tables")]
struct Cli {
    /// Candidate Q, decimal or 0x-prefixed hex. Ignored if --batch is given.
    #[arg(long, default_value = "")]
    q: String,

    /// File of newline-separated candidates to sieve concurrently, one
    /// rayon task per candidate (spec.md §5's `par_drive_many`).
    #[arg(long)]
    batch: Option<PathBuf>,

    /// Which divisibility test to run
    #[arg(long, value_enum, default_value_t = PrimeTypeArg::Plain)]
    prime_type: PrimeTypeArg,

    /// Small-prime table size
    #[arg(long, value_enum, default_value_t = TierArg::S)]
    tier: TierArg,

    /// Number of survivors to print per candidate
    #[arg(long, default_value_t = 10)]
    count: usize,
}

/// Drive one `State` per input candidate across a rayon work-stealing pool,
/// returning each candidate's survivors in input order. The core library
/// stays thread-pool-free (spec.md §5); this is the fan-out layer spec.md
/// says belongs in the bin/example tier, not `simd_sieve` itself.
fn par_drive_many(
    q_bes: &[Vec<u8>],
    tables: &Tables,
    mode: ModeWord,
    count: usize,
) -> Vec<Result<Vec<u64>>> {
    q_bes
        .par_iter()
        .map(|q_be| {
            let state = State::init(q_be, tables, mode).context("invalid candidate")?;
            let mut driver = SieveDriver::new(state, tables);
            let mut out = vec![0u64; count];
            let n = drive(&mut driver, &mut out, count);
            out.truncate(n);
            Ok(out)
        })
        .collect()
}

#[derive(Copy, Clone, ValueEnum)]
enum PrimeTypeArg {
    Plain,
    Twin,
    Safe,
}

#[derive(Copy, Clone, ValueEnum)]
enum TierArg {
    S,
    M,
    L,
}

impl From<TierArg> for LibTier {
    fn from(t: TierArg) -> Self {
        match t {
            TierArg::S => LibTier::S,
            TierArg::M => LibTier::M,
            TierArg::L => LibTier::L,
        }
    }
}

impl From<PrimeTypeArg> for LibPrimeType {
    fn from(p: PrimeTypeArg) -> Self {
        match p {
            PrimeTypeArg::Plain => LibPrimeType::Plain,
            PrimeTypeArg::Twin => LibPrimeType::Twin,
            PrimeTypeArg::Safe => LibPrimeType::Safe,
        }
    }
}

/// Parse a decimal or `0x`-prefixed hex string into big-endian bytes.
fn parse_q(s: &str) -> Result<Vec<u8>> {
    if let Some(hex) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        let hex = if hex.len() % 2 == 1 { format!("0{}", hex) } else { hex.to_string() };
        return (0..hex.len())
            .step_by(2)
            .map(|i| u8::from_str_radix(&hex[i..i + 2], 16).context("invalid hex digit in --q"))
            .collect();
    }

    let mut digits: Vec<u8> = s
        .bytes()
        .map(|b| {
            b.is_ascii_digit()
                .then(|| b - b'0')
                .context("--q must be decimal or 0x-prefixed hex")
        })
        .collect::<Result<_>>()?;
    if digits.is_empty() {
        anyhow::bail!("--q must not be empty");
    }

    // Repeated divide-by-256 on the decimal digit string, collecting
    // little-endian output bytes, then reverse to big-endian.
    let mut out_le = Vec::new();
    while !(digits.len() == 1 && digits[0] == 0) {
        let mut rem: u32 = 0;
        let mut next_digits = Vec::with_capacity(digits.len());
        for &d in &digits {
            let acc = rem * 10 + d as u32;
            next_digits.push((acc / 256) as u8);
            rem = acc % 256;
        }
        // Drop leading zeros introduced by the division.
        let first_nonzero = next_digits.iter().position(|&d| d != 0).unwrap_or(next_digits.len());
        digits = next_digits[first_nonzero..].to_vec();
        out_le.push(rem as u8);
        if digits.is_empty() {
            digits = vec![0];
        }
    }
    if out_le.is_empty() {
        out_le.push(0);
    }
    out_le.reverse();
    Ok(out_le)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt().with_writer(std::io::stderr).with_target(false).init();

    let cli = Cli::parse();
    let tier: LibTier = cli.tier.into();
    let prime_type: LibPrimeType = cli.prime_type.into();
    let tables = simd_sieve::build_tables();
    let mode = ModeWord::new(prime_type, tier).context("unsupported mode")?;

    if let Some(path) = &cli.batch {
        let text = std::fs::read_to_string(path).context("reading --batch file")?;
        let q_bes: Vec<Vec<u8>> = text
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(parse_q)
            .collect::<Result<_>>()?;
        info!(candidates = q_bes.len(), cores = rayon::current_num_threads(), "starting batch sieve");
        for (q, result) in text.lines().filter(|l| !l.trim().is_empty()).zip(
            par_drive_many(&q_bes, &tables, mode, cli.count),
        ) {
            match result {
                Ok(survivors) => println!("{}: {:?}", q.trim(), survivors),
                Err(e) => println!("{}: error: {}", q.trim(), e),
            }
        }
        return Ok(());
    }

    let q_be = parse_q(&cli.q)?;
    let state = State::init(&q_be, &tables, mode).context("invalid candidate")?;

    info!(mode = %mode, q = %state.q_hex, "starting sieve");

    let mut driver = SieveDriver::new(state, &tables);
    let mut out = vec![0u64; cli.count];
    let n = drive(&mut driver, &mut out, cli.count);

    for &c in &out[..n] {
        println!("{}", c);
    }
    if n < cli.count {
        info!(found = n, requested = cli.count, "driver exhausted its skip bound early");
    }
    Ok(())
}
