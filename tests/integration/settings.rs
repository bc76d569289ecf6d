//! Settings files driving a full session.

use std::fs;
use std::sync::Arc;

use tempfile::TempDir;

use super::common::{expect_committed, names, write_export};
use toponym::{
    load_catalog, ConfigError, EngineKind, QueryDispatcher, Searcher, Settings, SortKey,
};

fn write_settings(dir: &TempDir, json: &str) -> std::path::PathBuf {
    let path = dir.path().join("toponym.json");
    fs::write(&path, json).unwrap();
    path
}

#[test]
fn test_settings_file_drives_a_session() {
    let dir = TempDir::new().unwrap();
    write_export(
        dir.path(),
        "fr.csv",
        "France",
        &[
            ("Marseille", "Marseille", "13"),
            ("Marseillan", "Marseillan", "34"),
            ("Lyon", "Lyon", "69"),
        ],
    );
    let path = write_settings(
        &dir,
        r#"{
            "engine": { "min_distance": 4, "max_suggestions": 5, "results_per_page": 5, "backend": "sequential" },
            "datasets": [ { "name": "France", "path": "fr.csv", "enabled": true } ]
        }"#,
    );

    let settings = Settings::load(&path).unwrap();
    assert_eq!(settings.engine.backend, EngineKind::Sequential);

    let catalog = load_catalog(&settings.datasets, dir.path()).unwrap();
    let searcher = Searcher::from_config(&settings.engine).unwrap();
    assert_eq!(searcher.engine().name(), "sequential");

    let (mut dispatcher, events) =
        QueryDispatcher::new(searcher, catalog, settings.engine.results_per_page).unwrap();
    dispatcher.set_correction(true);
    dispatcher.set_sort_key(SortKey::Distance);
    let generation = dispatcher.set_query("Marseile").unwrap();

    // Ceiling of 4 keeps Marseille (1) and Marseillan (3), drops Lyon
    assert_eq!(expect_committed(&events, generation), 2);
    assert_eq!(names(dispatcher.view().results()), ["Marseille", "Marseillan"]);
    assert_eq!(dispatcher.view().pagination().page_size(), 5);
}

#[test]
fn test_bad_settings_are_rejected_before_anything_runs() {
    let dir = TempDir::new().unwrap();

    let path = write_settings(&dir, r#"{ "engine": { "results_per_page": 2 } }"#);
    assert!(matches!(
        Settings::load(&path),
        Err(ConfigError::PageSizeTooSmall { requested: 2, .. })
    ));

    let path = write_settings(&dir, r#"{ "engine": { "backend": "quantum" } }"#);
    assert!(matches!(Settings::load(&path), Err(ConfigError::Parse { .. })));
}

#[test]
fn test_page_size_too_small_for_dispatcher() {
    let searcher = Searcher::new(
        Arc::new(toponym::SequentialEngine),
        toponym::CorrectionSettings::default(),
    );
    assert!(matches!(
        QueryDispatcher::new(searcher, toponym::Catalog::new(), 4),
        Err(ConfigError::PageSizeTooSmall { requested: 4, min: 5 })
    ));
}
