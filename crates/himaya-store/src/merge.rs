//! Merge reads from two sources of truth.
//!
//! Both replicas may hold overlapping sets of records; merged reads
//! concatenate and deduplicate. The dedup key is a parameter so every
//! merged read in the facade shares one implementation.

use std::collections::HashSet;
use std::hash::Hash;

/// Concatenate `sources` in order and drop items whose key was already
/// seen. The first occurrence wins; relative order is preserved.
pub fn merge_by_key<T, K, F>(sources: Vec<Vec<T>>, mut key: F) -> Vec<T>
where
    K: Eq + Hash,
    F: FnMut(&T) -> K,
{
    let mut seen = HashSet::new();
    let mut merged = Vec::new();
    for source in sources {
        for item in source {
            if seen.insert(key(&item)) {
                merged.push(item);
            }
        }
    }
    merged
}
