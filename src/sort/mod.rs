//! Comparison sorts used to order inventory records.
//!
//! Both sorts take an explicit comparator, so callers pick the key at the
//! call site instead of the record type carrying a single ordering.
//!
//! | Sort | Stable | Best | Average / Worst | Extra space |
//! |------|--------|------|-----------------|-------------|
//! | [`insertion_sort_by`] | yes | O(n) | O(n²) | O(1) |
//! | [`merge_sort_by`] | yes | O(n log n) | O(n log n) | O(n) per merge |
//!
//! ## Example
//!
//! ```
//! use amis::sort::{insertion_sort, merge_sort_by_key};
//!
//! let mut names = vec!["Paracetamol", "Amoxicillin", "Ibuprofen"];
//! insertion_sort(&mut names);
//! assert_eq!(names, ["Amoxicillin", "Ibuprofen", "Paracetamol"]);
//!
//! let mut priced = vec![("A", 300), ("B", 100), ("C", 100)];
//! merge_sort_by_key(&mut priced, |&(_, price)| price);
//! assert_eq!(priced, [("B", 100), ("C", 100), ("A", 300)]);
//! ```

mod insertion;
mod merge;

pub use insertion::{insertion_sort, insertion_sort_by, insertion_sort_by_key};
pub use merge::{merge_sort, merge_sort_by, merge_sort_by_key};
