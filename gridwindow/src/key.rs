#[cfg(not(feature = "std"))]
use alloc::collections::BTreeSet;
#[cfg(feature = "std")]
use std::collections::HashSet;

/// Bound for item identity keys used in keyed rendering.
#[cfg(feature = "std")]
pub trait GridKey: core::hash::Hash + Eq {}
#[cfg(feature = "std")]
impl<K: core::hash::Hash + Eq> GridKey for K {}

#[cfg(not(feature = "std"))]
pub trait GridKey: Ord {}
#[cfg(not(feature = "std"))]
impl<K: Ord> GridKey for K {}

#[cfg(feature = "std")]
type KeySet<'a, K> = HashSet<&'a K>;
#[cfg(not(feature = "std"))]
type KeySet<'a, K> = BTreeSet<&'a K>;

/// Returns the index of the first key that repeats an earlier one.
///
/// Keyed rendering assumes keys are unique; hosts can use this to detect bad input.
pub fn first_duplicate_key<K: GridKey>(keys: &[K]) -> Option<usize> {
    let mut seen = KeySet::<K>::new();
    keys.iter().position(|k| !seen.insert(k))
}
