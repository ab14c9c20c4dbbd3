//! Top-down merge sort.
//!
//! Each merge copies the two halves into temporary left/right buffers and
//! writes them back in order. The left run wins ties, which makes the sort
//! stable. Recursion depth is O(log n).

use std::cmp::Ordering;

/// Sort `items` in place using `Ord`
pub fn merge_sort<T: Ord + Clone>(items: &mut [T]) {
    merge_sort_by(items, T::cmp);
}

/// Sort `items` in place by the key `f` extracts
pub fn merge_sort_by_key<T, K, F>(items: &mut [T], mut f: F)
where
    T: Clone,
    K: Ord,
    F: FnMut(&T) -> K,
{
    merge_sort_by(items, |a, b| f(a).cmp(&f(b)));
}

/// Sort `items` in place with a comparator
pub fn merge_sort_by<T, F>(items: &mut [T], mut cmp: F)
where
    T: Clone,
    F: FnMut(&T, &T) -> Ordering,
{
    sort_range(items, &mut cmp);
}

fn sort_range<T, F>(items: &mut [T], cmp: &mut F)
where
    T: Clone,
    F: FnMut(&T, &T) -> Ordering,
{
    if items.len() < 2 {
        return;
    }

    let mid = (items.len() - 1) / 2 + 1;
    sort_range(&mut items[..mid], cmp);
    sort_range(&mut items[mid..], cmp);
    merge(items, mid, cmp);
}

/// Merge the sorted runs `items[..mid]` and `items[mid..]`
fn merge<T, F>(items: &mut [T], mid: usize, cmp: &mut F)
where
    T: Clone,
    F: FnMut(&T, &T) -> Ordering,
{
    let left = items[..mid].to_vec();
    let right = items[mid..].to_vec();

    let (mut i, mut j, mut k) = (0, 0, 0);
    while i < left.len() && j < right.len() {
        // Left run wins ties
        if cmp(&left[i], &right[j]) != Ordering::Greater {
            items[k] = left[i].clone();
            i += 1;
        } else {
            items[k] = right[j].clone();
            j += 1;
        }
        k += 1;
    }

    for value in &left[i..] {
        items[k] = value.clone();
        k += 1;
    }
    for value in &right[j..] {
        items[k] = value.clone();
        k += 1;
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
