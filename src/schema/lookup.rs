//! Id and name lookup primitives shared by the query methods.

use tracing::trace;

/// Finds the element whose `key` equals `index`.
///
/// Binary search assumes `collection` is sorted ascending by `key`. A miss
/// falls back to a linear scan, so an unsorted collection costs time but never
/// produces a false negative.
pub(crate) fn find_by_index<T>(collection: &[T], index: u32, key: impl Fn(&T) -> u32) -> Option<&T> {
    if let Ok(position) = collection.binary_search_by_key(&index, &key) {
        return collection.get(position);
    }

    trace!(
        index,
        len = collection.len(),
        "Binary search missed; scanning linearly"
    );
    collection.iter().find(|element| key(element) == index)
}

/// Case-insensitive equality against a needle lowercased with [`str::to_lowercase`].
///
/// Both sides go through the same context-aware lowering, so a word-final
/// capital sigma folds to the same letter on each side.
pub(crate) fn eq_lowercase(candidate: &str, needle_lower: &str) -> bool {
    candidate.to_lowercase() == needle_lower
}
