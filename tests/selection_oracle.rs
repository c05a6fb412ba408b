use nth_min::selection::select_nth_smallest;
use nth_min::ErrorKind;

// Deterministic xorshift so failures are reproducible.
struct XorShift(u64);

impl XorShift {
    fn next(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }

    fn values(&mut self, len: usize, spread: i64) -> Vec<i64> {
        (0..len)
            .map(|_| (self.next() % (2 * spread as u64 + 1)) as i64 - spread)
            .collect()
    }
}

fn permutations(values: &[i64]) -> Vec<Vec<i64>> {
    if values.len() <= 1 {
        return vec![values.to_vec()];
    }
    let mut out = Vec::new();
    for i in 0..values.len() {
        let mut rest = values.to_vec();
        let head = rest.remove(i);
        for mut tail in permutations(&rest) {
            tail.insert(0, head);
            out.push(tail);
        }
    }
    out
}

#[test]
fn matches_sort_and_index_on_random_inputs() {
    let mut rng = XorShift(0x9E37_79B9_7F4A_7C15);
    for len in 1..=64 {
        // Narrow spreads force many duplicates.
        for spread in [1, 5, 1_000_000] {
            let values = rng.values(len, spread);
            let mut sorted = values.clone();
            sorted.sort_unstable();
            for rank in 1..=len as i64 {
                let got = select_nth_smallest(values.clone(), rank).unwrap();
                assert_eq!(got, sorted[rank as usize - 1], "values={values:?} rank={rank}");
            }
        }
    }
}

#[test]
fn result_is_invariant_under_permutation() {
    let base = vec![4, -2, 4, 9, 0, -2];
    let mut sorted = base.clone();
    sorted.sort_unstable();
    for perm in permutations(&base) {
        for rank in 1..=base.len() as i64 {
            assert_eq!(
                select_nth_smallest(perm.clone(), rank).unwrap(),
                sorted[rank as usize - 1],
                "perm={perm:?} rank={rank}"
            );
        }
    }
}

#[test]
fn extreme_values_are_selected_exactly() {
    let values = vec![i64::MAX, 0, i64::MIN, -1, i64::MAX];
    assert_eq!(select_nth_smallest(values.clone(), 1).unwrap(), i64::MIN);
    assert_eq!(select_nth_smallest(values.clone(), 3).unwrap(), 0);
    assert_eq!(select_nth_smallest(values, 5).unwrap(), i64::MAX);
}

#[test]
fn out_of_bounds_ranks_never_return_a_value() {
    let mut rng = XorShift(42);
    for len in 1..=20 {
        let values = rng.values(len, 50);
        for rank in [i64::MIN, -1, 0] {
            let err = select_nth_smallest(values.clone(), rank).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidRank);
        }
        for rank in [len as i64 + 1, len as i64 + 100, i64::MAX] {
            let err = select_nth_smallest(values.clone(), rank).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::RankOutOfRange);
        }
    }
}

#[test]
fn empty_sequence_is_empty_input_for_any_rank() {
    for rank in [i64::MIN, 0, 1, 2, i64::MAX] {
        let err = select_nth_smallest(Vec::new(), rank).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::EmptyInput);
    }
}
