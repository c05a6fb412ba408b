//! Rank selection over extracted values.
//!
//! [`select_nth_smallest`] validates a 1-based rank against the values and runs
//! [`quickselect::quickselect`] on them. The function takes the `Vec` by value: the buffer is
//! reordered during partitioning, so callers that still need their ordering pass a clone.
//!
//! ## Example
//!
//! ```rust
//! use nth_min::selection::select_nth_smallest;
//! use nth_min::NthMinError;
//!
//! let values = vec![7, 2, 9, 4, 2];
//! assert_eq!(select_nth_smallest(values.clone(), 1).unwrap(), 2);
//! assert_eq!(select_nth_smallest(values.clone(), 3).unwrap(), 4);
//! assert!(matches!(
//!     select_nth_smallest(values, 6),
//!     Err(NthMinError::RankOutOfRange { rank: 6, len: 5 })
//! ));
//! ```

pub mod quickselect;

use crate::error::{NthMinError, NthMinResult};

/// Return the `rank`-th smallest value (1-based) of `values`.
///
/// Preconditions are checked in this order:
/// - `values` empty → [`NthMinError::EmptyInput`] (whatever the rank)
/// - `rank < 1` → [`NthMinError::InvalidRank`]
/// - `rank > values.len()` → [`NthMinError::RankOutOfRange`]
pub fn select_nth_smallest(mut values: Vec<i64>, rank: i64) -> NthMinResult<i64> {
    let k = zero_based_index(values.len(), rank)?;
    Ok(quickselect::quickselect(&mut values, k))
}

fn zero_based_index(len: usize, rank: i64) -> NthMinResult<usize> {
    if len == 0 {
        return Err(NthMinError::EmptyInput);
    }
    if rank < 1 {
        return Err(NthMinError::InvalidRank { rank });
    }
    match usize::try_from(rank) {
        Ok(r) if r <= len => Ok(r - 1),
        _ => Err(NthMinError::RankOutOfRange { rank, len }),
    }
}
