//! Filter matcher behavior over the three name forms.

use super::common::{french_corpus, make_corpus};
use toponym::{filter, SearchType};

fn matched(query: &str, search_type: SearchType) -> Vec<String> {
    let corpus = french_corpus();
    filter(&corpus, query, search_type)
        .into_iter()
        .map(|i| corpus.standard_names()[i].clone())
        .collect()
}

#[test]
fn test_prefix_not_substring() {
    let corpus = make_corpus(&[("Lyon", "69"), ("Villyon", "01")]);
    assert_eq!(filter(&corpus, "Lyo", SearchType::Prefix), vec![0]);
}

#[test]
fn test_prefix_is_ordinal() {
    // Lyon / Lyon / LYON: no form starts with lowercase "lyo"
    let corpus = make_corpus(&[("Lyon", "69"), ("Villyon", "01")]);
    assert!(filter(&corpus, "lyo", SearchType::Prefix).is_empty());
    assert_eq!(filter(&corpus, "Lyo", SearchType::Prefix), vec![0]);
    assert_eq!(filter(&corpus, "LYO", SearchType::Prefix), vec![0]);
}

#[test]
fn test_contains_uses_standard_form() {
    assert_eq!(
        matched("ill", SearchType::Contains),
        ["Marseille", "Villeurbanne", "Lille"]
    );
}

#[test]
fn test_uppercase_query_finds_mixed_case_names() {
    assert_eq!(matched("LY", SearchType::Prefix), ["Lyon"]);
    assert_eq!(matched("SEILLE", SearchType::Suffix), ["Marseille"]);
}

#[cfg(feature = "unicode-normalization")]
#[test]
fn test_unaccented_query_finds_accented_names() {
    assert_eq!(matched("Besancon", SearchType::Contains), ["Besançon"]);
    assert_eq!(matched("Saint-Etienne", SearchType::Prefix), ["Saint-Étienne"]);
    assert_eq!(matched("Sete", SearchType::Suffix), ["Sète"]);
}

#[test]
fn test_accented_query_still_matches_exactly() {
    assert_eq!(matched("Évian", SearchType::Prefix), ["Évian-les-Bains"]);
}

#[test]
fn test_suffix() {
    assert_eq!(matched("in", SearchType::Suffix), ["Pantin"]);
}

#[test]
fn test_empty_query_selects_everything_in_order() {
    let corpus = french_corpus();
    for search_type in [SearchType::Contains, SearchType::Prefix, SearchType::Suffix] {
        let all: Vec<usize> = (0..corpus.len()).collect();
        assert_eq!(filter(&corpus, "", search_type), all);
    }
}

#[test]
fn test_no_match() {
    assert!(matched("Xyz", SearchType::Contains).is_empty());
}
