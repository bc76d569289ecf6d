//! Filter matcher properties.

use proptest::prelude::*;

use super::common::make_corpus;
use super::{names_strategy, query_strategy};
use toponym::{filter, SearchType};

fn corpus(names: &[String]) -> toponym::Corpus {
    let pairs: Vec<(&str, &str)> = names.iter().map(|n| (n.as_str(), "00")).collect();
    make_corpus(&pairs)
}

proptest! {
    /// Indices come back ascending, without repeats, in bounds.
    #[test]
    fn prop_filter_indices_are_sorted(names in names_strategy(), query in query_strategy()) {
        let corpus = corpus(&names);
        for search_type in [SearchType::Contains, SearchType::Prefix, SearchType::Suffix] {
            let indices = filter(&corpus, &query, search_type);
            prop_assert!(indices.windows(2).all(|w| w[0] < w[1]));
            prop_assert!(indices.iter().all(|&i| i < corpus.len()));
        }
    }

    /// Prefix and suffix matches are contains matches.
    #[test]
    fn prop_prefix_and_suffix_imply_contains(names in names_strategy(), query in query_strategy()) {
        let corpus = corpus(&names);
        let contains = filter(&corpus, &query, SearchType::Contains);
        for search_type in [SearchType::Prefix, SearchType::Suffix] {
            for index in filter(&corpus, &query, search_type) {
                prop_assert!(contains.binary_search(&index).is_ok());
            }
        }
    }

    /// A record matches exactly when one of its three forms does.
    #[test]
    fn prop_filter_agrees_with_predicate(names in names_strategy(), query in "[A-Za-z]{1,3}") {
        let corpus = corpus(&names);
        for search_type in [SearchType::Contains, SearchType::Prefix, SearchType::Suffix] {
            let expected: Vec<usize> = (0..corpus.len())
                .filter(|&i| {
                    corpus
                        .representations(i)
                        .iter()
                        .any(|name| search_type.matches(name, &query))
                })
                .collect();
            prop_assert_eq!(filter(&corpus, &query, search_type), expected);
        }
    }

    /// Every name finds itself under every search type.
    #[test]
    fn prop_name_matches_itself(names in names_strategy().prop_filter("non-empty", |n| !n.is_empty())) {
        let corpus = corpus(&names);
        for (index, name) in names.iter().enumerate() {
            for search_type in [SearchType::Contains, SearchType::Prefix, SearchType::Suffix] {
                prop_assert!(filter(&corpus, name, search_type).contains(&index));
            }
        }
    }
}
