use std::ops::Range;

/// splits the flat index space `0..total` into exactly `workers` contiguous ranges.
///
/// the first `total % workers` ranges carry one extra cell, so no two ranges differ
/// in length by more than one. when there are more workers than cells the trailing
/// ranges are empty.
pub fn partition(total: usize, workers: usize) -> Vec<Range<usize>> {
    debug_assert!(workers >= 1, "partition needs at least one worker");
    let workers = workers.max(1);
    let base = total / workers;
    let extra = total % workers;

    let mut start = 0;
    (0..workers)
        .map(|worker| {
            let len = base + usize::from(worker < extra);
            let range = start..start + len;
            start = range.end;
            range
        })
        .collect()
}

/// hands out one exclusive sub-slice per range.
///
/// `ranges` must be sorted, contiguous and start at zero, as produced by [`partition`].
pub fn split_mut<'a, T>(mut slice: &'a mut [T], ranges: &[Range<usize>]) -> Vec<&'a mut [T]> {
    let mut parts = Vec::with_capacity(ranges.len());
    for range in ranges {
        let (head, tail) = slice.split_at_mut(range.len());
        parts.push(head);
        slice = tail;
    }
    parts
}
