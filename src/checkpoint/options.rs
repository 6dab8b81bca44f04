//! Multiple-choice option generation
//!
//! Uniform sampling without replacement over the full enabled set, not
//! just the current level, resampled on every question. The random
//! source is injected so tests can pin a seed and assert exact sets.

use rand::seq::SliceRandom;
use rand::Rng;

/// Every question shows exactly this many choices.
pub const OPTION_COUNT: usize = 4;

/// Draw `OPTION_COUNT` distinct symbols containing `answer`.
///
/// Precondition (documented, not handled): `enabled` holds at least
/// `OPTION_COUNT` distinct symbols including no duplicates. The settings
/// loader guarantees de-duplication; the caller guards the count.
pub fn pick_options<R: Rng>(enabled: &[String], answer: &str, rng: &mut R) -> Vec<String> {
    let mut pool: Vec<&String> = enabled.iter().filter(|s| s.as_str() != answer).collect();
    pool.shuffle(rng);

    let mut options: Vec<String> = pool
        .into_iter()
        .take(OPTION_COUNT - 1)
        .cloned()
        .collect();
    options.push(answer.to_string());
    options.shuffle(rng);
    options
}
