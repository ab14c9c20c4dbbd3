//! Shift-based insertion sort.

use std::cmp::Ordering;

/// Sort `items` in place using `Ord`
pub fn insertion_sort<T: Ord>(items: &mut [T]) {
    insertion_sort_by(items, T::cmp);
}

/// Sort `items` in place by the key `f` extracts
pub fn insertion_sort_by_key<T, K, F>(items: &mut [T], mut f: F)
where
    K: Ord,
    F: FnMut(&T) -> K,
{
    insertion_sort_by(items, |a, b| f(a).cmp(&f(b)));
}

/// Sort `items` in place with a comparator.
///
/// The key `items[i]` moves left past every element of the sorted prefix
/// that compares strictly greater, so equal elements keep their relative
/// order.
pub fn insertion_sort_by<T, F>(items: &mut [T], mut cmp: F)
where
    F: FnMut(&T, &T) -> Ordering,
{
    for i in 1..items.len() {
        let mut j = i;
        while j > 0 && cmp(&items[j - 1], &items[i]) == Ordering::Greater {
            j -= 1;
        }
        // Shift items[j..i] right by one and drop the key into the gap
        items[j..=i].rotate_right(1);
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
