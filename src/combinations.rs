//! Canonical enumeration of k-element subsets of `0..len`.
//!
//! Subsets are produced as ascending index vectors in lexicographic order,
//! e.g. `len = 3, k = 2` yields `[0, 1]`, `[0, 2]`, `[1, 2]`. The empty subset
//! is a valid enumeration of its own: `k = 0` yields exactly one empty vector.

/// Iterator over the k-subsets of `0..len` in lexicographic order.
#[derive(Debug, Clone)]
pub struct Combinations {
    len: usize,
    indices: Vec<usize>,
    done: bool,
}

impl Combinations {
    /// Enumerate the `k`-subsets of `0..len`. Yields nothing when `k > len`.
    #[must_use]
    pub fn new(len: usize, k: usize) -> Self {
        Self {
            len,
            indices: (0..k).collect(),
            done: k > len,
        }
    }

    /// Move `indices` to the next subset, or mark the iterator exhausted.
    fn advance(&mut self) {
        let k = self.indices.len();
        // Rightmost slot that can still move right.
        let Some(pivot) = (0..k)
            .rev()
            .find(|&slot| self.indices.get(slot).is_some_and(|&i| i < slot + self.len - k))
        else {
            self.done = true;
            return;
        };
        let mut next = self.indices.get(pivot).map_or(0, |&i| i + 1);
        for slot in self.indices.iter_mut().skip(pivot) {
            *slot = next;
            next += 1;
        }
    }
}

impl Iterator for Combinations {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let current = self.indices.clone();
        self.advance();
        Some(current)
    }
}

/// Binomial coefficient `C(len, k)`, or `None` on overflow.
#[must_use]
pub fn binomial(len: usize, k: usize) -> Option<usize> {
    if k > len {
        return Some(0);
    }
    let k = k.min(len - k);
    let mut acc: usize = 1;
    for step in 0..k {
        // acc * (len - step) is divisible by (step + 1) at every step.
        acc = acc.checked_mul(len - step)?.checked_div(step + 1)?;
    }
    Some(acc)
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use proptest::prelude::*;
    use rstest::rstest;

    use super::*;

    #[rstest]
    fn three_choose_two_is_lexicographic() {
        let subsets: Vec<_> = Combinations::new(3, 2).collect();
        assert_eq!(subsets, vec![vec![0, 1], vec![0, 2], vec![1, 2]]);
    }

    #[rstest]
    #[case(0, 0)]
    #[case(4, 0)]
    fn choosing_nothing_yields_the_empty_subset(#[case] len: usize, #[case] k: usize) {
        let subsets: Vec<_> = Combinations::new(len, k).collect();
        assert_eq!(subsets, vec![Vec::<usize>::new()]);
    }

    #[rstest]
    fn choosing_too_many_yields_nothing() {
        assert_eq!(Combinations::new(2, 3).count(), 0);
    }

    #[rstest]
    fn choosing_everything_yields_one_subset() {
        let subsets: Vec<_> = Combinations::new(4, 4).collect();
        assert_eq!(subsets, vec![vec![0, 1, 2, 3]]);
    }

    #[rstest]
    #[case(5, 2, 10)]
    #[case(7, 3, 35)]
    #[case(8, 0, 1)]
    #[case(3, 5, 0)]
    #[case(40, 20, 137_846_528_820)]
    fn binomial_matches_known_values(#[case] len: usize, #[case] k: usize, #[case] want: usize) {
        assert_eq!(binomial(len, k), Some(want));
    }

    proptest! {
        #[test]
        fn enumeration_is_sorted_unique_and_complete(len in 0usize..10, k in 0usize..10) {
            let subsets: Vec<_> = Combinations::new(len, k).collect();
            prop_assert_eq!(Some(subsets.len()), binomial(len, k));
            prop_assert!(subsets.windows(2).all(|w| w.first() < w.last()));
            let unique: BTreeSet<_> = subsets.iter().collect();
            prop_assert_eq!(unique.len(), subsets.len());
            for subset in &subsets {
                prop_assert_eq!(subset.len(), k);
                prop_assert!(subset.windows(2).all(|w| w.first() < w.last()));
                prop_assert!(subset.iter().all(|&i| i < len));
            }
        }
    }
}
