use chrono::{Datelike, NaiveDate};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Deterministic seed for one (date, language, category) combination.
///
/// The same calendar day in the same context always replays the same deck
/// order; any field changing yields an unrelated seed.
pub fn daily_seed(lang: &str, category: &str, date: NaiveDate) -> u64 {
    let tag = format!(
        "{:04}{:02}{:02}-{}-{}",
        date.year(),
        date.month(),
        date.day(),
        lang,
        category
    );
    fnv1a(tag.as_bytes())
}

// FNV-1a, 64-bit.
fn fnv1a(bytes: &[u8]) -> u64 {
    let mut hash: u64 = 0xcbf2_9ce4_8422_2325;
    for &b in bytes {
        hash ^= b as u64;
        hash = hash.wrapping_mul(0x0000_0100_0000_01b3);
    }
    hash
}

/// RNG for one deck build: seeded when a seed is given, entropy otherwise.
pub fn rng_for_seed(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}
