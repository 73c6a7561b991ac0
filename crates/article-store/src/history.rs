//! Length caps for the queue and history.

/// Trim `items` to its last `cap` entries, dropping the oldest first.
pub fn keep_most_recent<T>(items: &mut Vec<T>, cap: usize) {
    if items.len() > cap {
        let excess = items.len() - cap;
        items.drain(..excess);
    }
}

/// Append an item and trim to `cap`.
pub(crate) fn push_capped<T>(items: &mut Vec<T>, item: T, cap: usize) {
    items.push(item);
    keep_most_recent(items, cap);
}
