//! In-place quickselect over `i64` slices.

/// Return the value that would sit at index `k` if `values` were sorted ascending.
///
/// Reorders `values` in place. Iterative: stack use is constant even on sorted input.
///
/// # Panics
///
/// Panics if `k >= values.len()`.
pub fn quickselect(values: &mut [i64], k: usize) -> i64 {
    assert!(
        k < values.len(),
        "k ({k}) out of bounds for slice of length {}",
        values.len()
    );

    let mut low = 0usize;
    let mut high = values.len() - 1;
    while low < high {
        let p = partition(values, low, high);
        if p == k {
            return values[k];
        } else if k < p {
            high = p - 1;
        } else {
            low = p + 1;
        }
    }
    values[k]
}

/// Lomuto partition of `values[low..=high]` around `values[high]`.
///
/// Elements strictly less than the pivot end up left of the returned index; elements equal to or
/// greater than it end up right of it.
pub fn partition(values: &mut [i64], low: usize, high: usize) -> usize {
    let pivot = values[high];
    let mut i = low;
    for j in low..high {
        if values[j] < pivot {
            values.swap(i, j);
            i += 1;
        }
    }
    values.swap(i, high);
    i
}
