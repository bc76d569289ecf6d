//! Distance engines agree with each other and with themselves.

use toponym::{build_engine, distance_batch, EngineKind, SequentialEngine};

#[test]
fn test_reference_example() {
    let candidates = ["paris", "pariis", "pariss"];
    for _ in 0..5 {
        assert_eq!(
            distance_batch(&SequentialEngine, "paris", &candidates).unwrap(),
            vec![0, 1, 1]
        );
    }
}

#[cfg(feature = "parallel")]
#[test]
fn test_every_backend_gives_the_same_answer() {
    let names: Vec<String> = (0..5000)
        .map(|i| format!("{}-sur-{}", ["Saint", "Sainte", "Bourg"][i % 3], i))
        .collect();
    let candidates: Vec<&str> = names.iter().map(String::as_str).collect();

    let sequential = build_engine(EngineKind::Sequential).unwrap();
    let parallel = build_engine(EngineKind::Parallel).unwrap();
    for query in ["Saint-sur-42", "", "Bourg", "Sainte-sur-4999"] {
        assert_eq!(
            distance_batch(sequential.as_ref(), query, &candidates).unwrap(),
            distance_batch(parallel.as_ref(), query, &candidates).unwrap(),
        );
    }
}

#[test]
fn test_char_level_distances() {
    // One substitution, not two byte edits
    assert_eq!(
        distance_batch(&SequentialEngine, "Besancon", &["Besançon"]).unwrap(),
        vec![1]
    );
}
