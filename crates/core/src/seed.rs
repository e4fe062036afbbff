//! Seed derivation helpers.

use std::sync::atomic::{AtomicI64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

static SEED_UNIQUIFIER: AtomicI64 = AtomicI64::new(8_682_522_807_148_012);

const UNIQUIFIER_STEP: i64 = 1_181_783_497_276_652_981;

/// 32-bit polynomial hash of `text` (`hash = 31 * hash + unit` over UTF-16 code units).
///
/// Matches `String.hashCode()`, so seeds typed into a server config resolve to
/// the same generator on both sides.
pub fn string_seed(text: &str) -> i32 {
    text.encode_utf16()
        .fold(0i32, |hash, unit| hash.wrapping_mul(31).wrapping_add(i32::from(unit)))
}

/// Time-based seed that differs between calls made within the same clock tick.
pub fn time_seed() -> i64 {
    next_uniquifier() ^ clock_nanos()
}

/// Derive a seed for a named scope (a loot table, a structure) from a world seed.
pub fn scoped_seed(world_seed: i64, scope: &str) -> i64 {
    world_seed ^ i64::from(string_seed(scope))
}

fn next_uniquifier() -> i64 {
    let previous = SEED_UNIQUIFIER
        .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |current| {
            Some(current.wrapping_mul(UNIQUIFIER_STEP))
        })
        .unwrap_or_else(|current| current);
    previous.wrapping_mul(UNIQUIFIER_STEP)
}

fn clock_nanos() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_nanos() as i64)
        .unwrap_or_default()
}
