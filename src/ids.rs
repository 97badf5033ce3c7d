//! Human-readable identifier generators (`M-05`, `QC-0012`, …).
//!
//! Generators only propose candidates; the owning actor skips any candidate that
//! is already used in its collection.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// A generator yielding `{prefix}-{n}` with `n` zero-padded to `width` digits,
/// starting at `start`.
pub fn sequence(
    prefix: &'static str,
    width: usize,
    start: u64,
) -> impl FnMut() -> String + Send + 'static {
    let counter = Arc::new(AtomicU64::new(start.max(1)));
    move || {
        let n = counter.fetch_add(1, Ordering::SeqCst);
        format!("{prefix}-{n:0width$}")
    }
}

/// Where a [`sequence`] over `taken` should start: one past the largest
/// `{prefix}-{n}` in use, and never below `taken.len() + 1`.
///
/// Identifiers with another prefix or a non-numeric suffix are ignored.
pub fn next_number<'a>(prefix: &str, taken: impl IntoIterator<Item = &'a str>) -> u64 {
    let mut count = 0u64;
    let mut highest = 0u64;
    for id in taken {
        count += 1;
        let n = id
            .strip_prefix(prefix)
            .and_then(|rest| rest.strip_prefix('-'))
            .and_then(|digits| digits.parse::<u64>().ok());
        if let Some(n) = n {
            highest = highest.max(n);
        }
    }
    highest.max(count) + 1
}

/// First `{prefix}-{n}` (n counting from `taken.len() + 1`) not present in `taken`.
///
/// Used for identifiers scoped to a parent record (process steps, maintenance entries).
pub fn next_child_id<'a>(
    prefix: &str,
    width: usize,
    taken: impl IntoIterator<Item = &'a str> + Clone,
) -> String {
    let mut n = taken.clone().into_iter().count() + 1;
    loop {
        let candidate = format!("{prefix}-{n:0width$}");
        if !taken.clone().into_iter().any(|id| id == candidate) {
            return candidate;
        }
        n += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sequence_pads_and_counts() {
        let mut next = sequence("M", 2, 5);
        assert_eq!(next(), "M-05");
        assert_eq!(next(), "M-06");

        let mut wide = sequence("QC", 4, 0);
        assert_eq!(wide(), "QC-0001");
    }

    #[test]
    fn next_number_follows_the_highest_suffix() {
        let gap = ["M-66", "M-130", "M-70"];
        assert_eq!(next_number("M", gap.iter().copied()), 131);

        let dense = ["MAT-01", "MAT-02", "MAT-03"];
        assert_eq!(next_number("MAT", dense.iter().copied()), 4);

        // Renamed records still count towards the floor.
        let renamed = ["custom", "OP-2023-002", "OP-2022-009"];
        assert_eq!(next_number("OP-2023", renamed.iter().copied()), 4);

        assert_eq!(next_number("QC", std::iter::empty()), 1);
    }

    #[test]
    fn child_id_skips_used_values() {
        let steps = ["ST-01", "ST-03"];
        assert_eq!(next_child_id("ST", 2, steps.iter().copied()), "ST-04");

        let gap = ["ST-02"];
        assert_eq!(next_child_id("ST", 2, gap.iter().copied()), "ST-03");
        assert_eq!(next_child_id("ML", 2, std::iter::empty()), "ML-01");
    }
}
