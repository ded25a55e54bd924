use ghofig::catalog::{write_database, CatalogEntry};
use ghofig::store::{LookupStore, SEARCH_LIMIT};
use ghofig::StoreError;

fn entry(title: &str, description: &str) -> CatalogEntry {
    CatalogEntry {
        title: title.to_string(),
        description: description.to_string(),
    }
}

fn sample_catalog() -> Vec<CatalogEntry> {
    let mut entries = vec![
        entry("theme", "Pick a theme. Themes may set font colors too."),
        entry("font-size", "Font size in points."),
        entry("font-family", "The font families to use."),
        entry("background", "Background color for the window."),
        entry("keybind", "Bind a key. Use 100% of the width with `_` wildcards."),
        entry("adjust-cell-width", "Adjust cell width; may affect FONT rendering."),
    ];
    for index in 0..60 {
        entries.push(entry(
            &format!("window-option-{index:02}"),
            "Window tuning knob.",
        ));
    }
    entries
}

fn open_sample() -> (tempfile::TempDir, LookupStore) {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join("catalog.db");
    write_database(&path, &sample_catalog()).expect("write catalog");
    let store = LookupStore::open(&path).expect("open catalog");
    (dir, store)
}

fn titles(store: &LookupStore, query: &str) -> Vec<String> {
    store
        .search(query)
        .expect("search catalog")
        .into_iter()
        .map(|entry| entry.title)
        .collect()
}

#[test]
fn results_are_capped() {
    let (_dir, store) = open_sample();
    assert_eq!(store.count().expect("count"), 66);
    assert_eq!(titles(&store, "window").len(), SEARCH_LIMIT);
    assert_eq!(titles(&store, "").len(), SEARCH_LIMIT);
}

#[test]
fn title_matches_come_before_description_matches() {
    let (_dir, store) = open_sample();
    assert_eq!(
        titles(&store, "font"),
        vec!["font-family", "font-size", "adjust-cell-width", "theme"]
    );
}

#[test]
fn matching_ignores_ascii_case() {
    let (_dir, store) = open_sample();
    assert_eq!(titles(&store, "FONT"), titles(&store, "font"));
    assert_eq!(titles(&store, "Background"), vec!["background"]);
}

#[test]
fn empty_query_lists_alphabetically() {
    let (_dir, store) = open_sample();
    let all = titles(&store, "");
    let mut sorted = all.clone();
    sorted.sort();
    assert_eq!(all, sorted);
    assert_eq!(all.first().map(String::as_str), Some("adjust-cell-width"));
}

#[test]
fn like_wildcards_are_literal() {
    let (_dir, store) = open_sample();
    assert_eq!(titles(&store, "100%"), vec!["keybind"]);
    assert_eq!(titles(&store, "`_`"), vec!["keybind"]);
    assert!(titles(&store, "zzz-no-such-option").is_empty());
}

#[test]
fn lookup_by_id_round_trips_search_results() {
    let (_dir, store) = open_sample();
    let found = store.search("font-size").expect("search");
    let first = found.first().expect("font-size present");
    assert_eq!(store.get_by_id(first.id).expect("get by id"), *first);

    match store.get_by_id(9_999) {
        Err(StoreError::NotFound(id)) => assert_eq!(id, 9_999),
        other => panic!("expected NotFound, got {other:?}"),
    }
}

#[test]
fn opening_a_missing_catalog_fails_to_initialize() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let err = LookupStore::open(dir.path().join("absent.db")).expect_err("missing catalog");
    assert!(matches!(err, StoreError::Init(_)), "got {err:?}");
}
