//! National exports on disk, loaded, toggled and searched.

use tempfile::TempDir;

use super::common::{names, write_export};
use toponym::{
    load_catalog, load_dataset, CorrectionSettings, DatasetError, DatasetSource, SearchRequest,
    SearchType, Searcher, SequentialEngine,
};

fn exports() -> TempDir {
    let dir = TempDir::new().unwrap();
    write_export(
        dir.path(),
        "communes/Communes_France.csv",
        "France",
        &[
            ("Besançon", "Besancon", "25"),
            ("Lyon", "Lyon", "69"),
            ("Saint-Étienne", "Saint-Etienne", "42"),
        ],
    );
    write_export(
        dir.path(),
        "communes/Communes_Suisse.csv",
        "Suisse",
        &[("Zürich", "Zurich", "ZH"), ("Genève", "Geneve", "GE")],
    );
    dir
}

fn sources() -> Vec<DatasetSource> {
    vec![
        DatasetSource::new("France", "communes/Communes_France.csv", true),
        DatasetSource::new("Germany", "communes/Communes_Allemagne.csv", false),
        DatasetSource::new("Switzerland", "communes/Communes_Suisse.csv", false),
    ]
}

fn searcher() -> Searcher {
    Searcher::new(std::sync::Arc::new(SequentialEngine), CorrectionSettings::default())
}

#[test]
fn test_unaccented_column_finds_accented_names() {
    let dir = exports();
    let catalog = load_catalog(&sources(), dir.path()).unwrap();
    let corpus = catalog.snapshot();

    let results = searcher()
        .search(&corpus, &SearchRequest::new("besancon").with_search_type(SearchType::Contains))
        .unwrap();
    assert!(results.is_empty(), "case still matters: {:?}", names(&results));

    let results = searcher().search(&corpus, &SearchRequest::new("Besancon")).unwrap();
    assert_eq!(names(&results), ["Besançon"]);

    let results = searcher().search(&corpus, &SearchRequest::new("TIENNE")).unwrap();
    assert_eq!(names(&results), ["Saint-Étienne"]);
}

#[test]
fn test_missing_export_loads_empty_and_stays_listed() {
    let dir = exports();
    let catalog = load_catalog(&sources(), dir.path()).unwrap();

    let status = catalog.status();
    assert_eq!(status.len(), 3);
    assert_eq!(status[1].name, "Germany");
    assert_eq!(status[1].records, 0);
    assert_eq!(status[2].records, 2);
}

#[test]
fn test_enabling_a_dataset_extends_the_corpus() {
    let dir = exports();
    let mut catalog = load_catalog(&sources(), dir.path()).unwrap();
    assert_eq!(catalog.snapshot().len(), 3);

    catalog.set_enabled("Switzerland", true).unwrap();
    let corpus = catalog.snapshot();
    assert_eq!(corpus.len(), 5);
    assert_eq!(corpus.countries()[3], "Suisse");

    let results = searcher()
        .search(&corpus, &SearchRequest::new("Zu").with_search_type(SearchType::Prefix))
        .unwrap();
    assert_eq!(names(&results), ["Zürich"]);
}

#[test]
fn test_malformed_export_is_an_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.csv");
    std::fs::write(&path, "Pays,dep_code\nFrance,69\n").unwrap();
    assert!(matches!(
        load_dataset("France", &path),
        Err(DatasetError::MissingColumn { .. })
    ));

    let sources = vec![DatasetSource::new("France", "broken.csv", true)];
    assert!(load_catalog(&sources, dir.path()).is_err());
}
