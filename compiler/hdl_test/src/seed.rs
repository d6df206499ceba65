use std::time::{SystemTime, UNIX_EPOCH};

/// Seed for the quickcheck generator.
///
/// An explicit seed is used as-is. Otherwise the seed mixes the process id
/// with the wall clock so repeated runs explore different inputs; the
/// chosen seed is printed in the report so a failure can be replayed.
pub fn resolve_seed(explicit: Option<u64>) -> u64 {
    if let Some(seed) = explicit {
        return seed;
    }
    let pid = u64::from(std::process::id());
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| elapsed.as_secs());
    let seed = pid.wrapping_mul(now);
    tracing::debug!(seed, pid, "derived quickcheck seed");
    seed
}
