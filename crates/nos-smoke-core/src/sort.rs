//! In-place exchange sort.

/// Sorts `items` ascending with the classic adjacent-exchange (bubble) sort.
///
/// Each pass bubbles the largest remaining element to the end of the unsorted
/// prefix, so the scanned range shrinks by one per pass. Stops early once a
/// pass makes no swaps. Returns the number of swaps performed.
pub fn bubble_sort<T: PartialOrd>(items: &mut [T]) -> usize {
    let len = items.len();
    let mut swaps = 0;
    for pass in 0..len.saturating_sub(1) {
        let mut swapped = false;
        for j in 0..len - 1 - pass {
            if items[j] > items[j + 1] {
                items.swap(j, j + 1);
                swaps += 1;
                swapped = true;
            }
        }
        if !swapped {
            break;
        }
    }
    swaps
}

/// Returns true if `items` is in ascending order.
pub fn is_sorted_ascending<T: PartialOrd>(items: &[T]) -> bool {
    items.windows(2).all(|w| w[0] <= w[1])
}
