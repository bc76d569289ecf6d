//! Correction suggester properties.

use proptest::prelude::*;

use super::common::make_corpus;
use super::{name_strategy, names_strategy};
use toponym::{correct, levenshtein, CorrectionSettings, SequentialEngine};

proptest! {
    /// Under the ceiling, within the cap, nondecreasing, ties in corpus order.
    #[test]
    fn prop_suggestions_respect_settings(
        names in names_strategy(),
        query in name_strategy(),
        min_distance in 0usize..10,
        max_suggestions in 0usize..10,
    ) {
        let pairs: Vec<(&str, &str)> = names.iter().map(|n| (n.as_str(), "00")).collect();
        let corpus = make_corpus(&pairs);
        let settings = CorrectionSettings { min_distance, max_suggestions };

        let suggestions = correct(&corpus, &query, &SequentialEngine, settings).unwrap();
        prop_assert!(suggestions.len() <= max_suggestions);
        for suggestion in &suggestions {
            prop_assert!(suggestion.distance < min_distance);
            prop_assert_eq!(suggestion.distance, levenshtein(&query, &names[suggestion.index]));
        }
        for pair in suggestions.windows(2) {
            prop_assert!(
                (pair[0].distance, pair[0].index) < (pair[1].distance, pair[1].index)
            );
        }
    }

    /// Nothing left out that should have made the cut.
    #[test]
    fn prop_suggestions_are_the_best_ones(names in names_strategy(), query in name_strategy()) {
        let pairs: Vec<(&str, &str)> = names.iter().map(|n| (n.as_str(), "00")).collect();
        let corpus = make_corpus(&pairs);
        let settings = CorrectionSettings { min_distance: 6, max_suggestions: 5 };

        let mut expected: Vec<(usize, usize)> = names
            .iter()
            .enumerate()
            .map(|(index, name)| (levenshtein(&query, name), index))
            .filter(|(distance, _)| *distance < 6)
            .collect();
        expected.sort();
        expected.truncate(5);

        let actual: Vec<(usize, usize)> = correct(&corpus, &query, &SequentialEngine, settings)
            .unwrap()
            .into_iter()
            .map(|s| (s.distance, s.index))
            .collect();
        prop_assert_eq!(actual, expected);
    }
}
