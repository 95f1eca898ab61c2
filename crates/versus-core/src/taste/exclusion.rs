//! Remove ids a user opted out of.

use std::collections::HashSet;
use std::hash::Hash;

/// `candidates` minus `excluded`, order preserved.
pub fn exclude<T: Copy + Eq + Hash>(candidates: &[T], excluded: &[T]) -> Vec<T> {
    let excluded: HashSet<T> = excluded.iter().copied().collect();
    candidates
        .iter()
        .copied()
        .filter(|id| !excluded.contains(id))
        .collect()
}
