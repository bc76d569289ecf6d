//! Distance engines against a reference Levenshtein.

use proptest::prelude::*;

use super::{name_strategy, names_strategy};
use toponym::{distance_batch, levenshtein, DistanceEngine, SequentialEngine};

proptest! {
    /// Char-based, unit-cost: same answer as strsim.
    #[test]
    fn prop_levenshtein_matches_reference(a in name_strategy(), b in name_strategy()) {
        prop_assert_eq!(levenshtein(&a, &b), strsim::levenshtein(&a, &b));
    }

    #[test]
    fn prop_levenshtein_is_symmetric(a in name_strategy(), b in name_strategy()) {
        prop_assert_eq!(levenshtein(&a, &b), levenshtein(&b, &a));
    }

    #[test]
    fn prop_levenshtein_is_bounded_by_longer_length(a in name_strategy(), b in name_strategy()) {
        let distance = levenshtein(&a, &b);
        let longer = a.chars().count().max(b.chars().count());
        let length_gap = a.chars().count().abs_diff(b.chars().count());
        prop_assert!(distance <= longer);
        prop_assert!(distance >= length_gap);
        prop_assert_eq!(distance == 0, a == b);
    }

    /// One distance per candidate, in order, each equal to the pairwise one.
    #[test]
    fn prop_batch_is_pairwise(query in name_strategy(), names in names_strategy()) {
        let candidates: Vec<&str> = names.iter().map(String::as_str).collect();
        let distances = distance_batch(&SequentialEngine, &query, &candidates).unwrap();
        prop_assert_eq!(distances.len(), candidates.len());
        for (candidate, distance) in candidates.iter().zip(&distances) {
            prop_assert_eq!(*distance, strsim::levenshtein(&query, candidate));
        }
    }

    /// Backends never disagree.
    #[cfg(feature = "parallel")]
    #[test]
    fn prop_parallel_matches_sequential(query in name_strategy(), names in names_strategy()) {
        let candidates: Vec<&str> = names.iter().map(String::as_str).collect();
        let parallel = toponym::ParallelEngine::with_min_chunk(2);
        prop_assert_eq!(
            parallel.distance_many(&query, &candidates).unwrap(),
            SequentialEngine.distance_many(&query, &candidates).unwrap()
        );
    }
}
