//! First-occurrence-wins deduplication.

use std::collections::HashSet;
use std::hash::Hash;

/// A record that declares which of its fields form its uniqueness key.
pub trait UniqueKey {
    type Key: Eq + Hash;

    fn unique_key(&self) -> Self::Key;
}

/// Drop every record whose key has already been seen.
///
/// The first record with a given key survives, and survivors keep their
/// original relative order.
pub fn unique_by<T, K, F>(records: Vec<T>, key: F) -> Vec<T>
where
    K: Eq + Hash,
    F: Fn(&T) -> K,
{
    let mut seen = HashSet::with_capacity(records.len());
    records
        .into_iter()
        .filter(|record| seen.insert(key(record)))
        .collect()
}

/// [`unique_by`] using the record's own [`UniqueKey`].
pub fn unique<T: UniqueKey>(records: Vec<T>) -> Vec<T> {
    unique_by(records, T::unique_key)
}
