//! Splitting work into disjoint contiguous runs.

use std::ops::Range;

/// Splits `0..len` into at most `parts` contiguous, non-overlapping ranges
/// that together cover every index exactly once.
///
/// Lengths differ by at most one, with the longer runs first. Empty ranges
/// are never returned, so fewer than `parts` come back when `len < parts`.
/// `parts == 0` is treated as 1.
///
/// # Example
///
/// ```rust
/// use census_core::sync::partition;
///
/// assert_eq!(partition(10, 3), vec![0..4, 4..7, 7..10]);
/// assert_eq!(partition(2, 4), vec![0..1, 1..2]);
/// ```
#[must_use]
pub fn partition(len: usize, parts: usize) -> Vec<Range<usize>> {
    let parts = parts.max(1).min(len);
    if parts == 0 {
        return Vec::new();
    }

    let base = len / parts;
    let extra = len % parts;
    let mut ranges = Vec::with_capacity(parts);
    let mut start = 0;
    for part in 0..parts {
        let run = base + usize::from(part < extra);
        ranges.push(start..start + run);
        start += run;
    }
    ranges
}

/// Splits a slice into the disjoint runs given by [`partition`].
///
/// Each run can be moved into its own worker.
pub fn partition_mut<T>(items: &mut [T], parts: usize) -> Vec<&mut [T]> {
    let ranges = partition(items.len(), parts);
    let mut runs = Vec::with_capacity(ranges.len());
    let mut rest = items;
    for range in ranges {
        let (run, tail) = std::mem::take(&mut rest).split_at_mut(range.len());
        runs.push(run);
        rest = tail;
    }
    runs
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partition_covers_everything_once() {
        for len in 0..50 {
            for parts in 0..8 {
                let ranges = partition(len, parts);
                let mut expected = 0;
                for range in &ranges {
                    assert_eq!(range.start, expected);
                    assert!(!range.is_empty());
                    expected = range.end;
                }
                assert_eq!(expected, len);
                assert!(ranges.len() <= parts.max(1));
            }
        }
    }

    #[test]
    fn test_partition_balanced() {
        let lens: Vec<usize> = partition(1000, 3).iter().map(ExactSizeIterator::len).collect();
        assert_eq!(lens, vec![334, 333, 333]);
    }

    #[test]
    fn test_partition_halves() {
        assert_eq!(partition(1000, 2), vec![0..500, 500..1000]);
    }

    #[test]
    fn test_partition_mut() {
        let mut values: Vec<i32> = (0..7).collect();
        let runs = partition_mut(&mut values, 3);
        assert_eq!(runs.len(), 3);
        assert_eq!(runs[0], &[0, 1, 2]);
        assert_eq!(runs[1], &[3, 4]);
        assert_eq!(runs[2], &[5, 6]);

        for run in runs {
            for value in run.iter_mut() {
                *value *= 2;
            }
        }
        assert_eq!(values, vec![0, 2, 4, 6, 8, 10, 12]);
    }

    #[test]
    fn test_partition_mut_more_parts_than_items() {
        let mut values = [1, 2, 3];
        assert_eq!(partition_mut(&mut values, usize::MAX).len(), 3);
        assert_eq!(partition_mut(&mut values, 1 << 40).len(), 3);

        let mut empty: [i32; 0] = [];
        assert!(partition_mut(&mut empty, usize::MAX).is_empty());
    }
}
