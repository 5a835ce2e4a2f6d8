// File: crates/multiline-core/tests/loader.rs
// Purpose: Loading datasets from files, with retry exhaustion reported as a load error.

use std::path::PathBuf;

use multiline_core::{load_dataset, load_text, Error, LoaderOptions, Source, DEFAULT_LABEL};

fn fast_retries() -> LoaderOptions {
    LoaderOptions { max_attempts: 3, initial_backoff_ms: 1, max_backoff_ms: 2, timeout_ms: 1_000 }
}

#[test]
fn source_kind_is_detected() {
    assert_eq!(Source::parse("https://example.org/u.tsv"), Source::Url("https://example.org/u.tsv".into()));
    assert_eq!(Source::parse("HTTP://example.org/u.tsv"), Source::Url("HTTP://example.org/u.tsv".into()));
    assert_eq!(Source::parse("data/u.tsv"), Source::File(PathBuf::from("data/u.tsv")));
    assert_eq!(Source::parse("data/u.tsv").to_string(), "data/u.tsv");
}

#[test]
fn loads_dataset_from_file() {
    let dir = PathBuf::from("target/test_out/loader");
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("small.tsv");
    std::fs::write(&path, "name\t2000-01\t2000-02\nA, XY\t1\t2\n").unwrap();

    let ds = load_dataset(&Source::File(path), &fast_retries(), DEFAULT_LABEL).expect("dataset loads");
    assert_eq!(ds.len(), 2);
    assert_eq!(ds.series()[0].name(), "A XY");
}

#[test]
fn missing_file_exhausts_retries() {
    let source = Source::File(PathBuf::from("target/test_out/loader/does-not-exist.tsv"));
    let err = load_text(&source, &fast_retries()).unwrap_err();
    assert!(err.is_load_error());
    match err {
        Error::Load { attempts, location, .. } => {
            assert_eq!(attempts, 3);
            assert!(location.ends_with("does-not-exist.tsv"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn zero_attempts_still_tries_once() {
    let source = Source::File(PathBuf::from("target/test_out/loader/also-missing.tsv"));
    let opts = LoaderOptions { max_attempts: 0, ..fast_retries() };
    assert!(matches!(load_text(&source, &opts), Err(Error::Load { attempts: 1, .. })));
}

#[test]
fn unreachable_url_reports_every_attempt() {
    let source = Source::parse("http://127.0.0.1:9/unemployment.tsv");
    let opts = LoaderOptions { max_attempts: 2, ..fast_retries() };
    match load_text(&source, &opts).unwrap_err() {
        Error::Load { attempts, location, .. } => {
            assert_eq!(attempts, 2);
            assert_eq!(location, "http://127.0.0.1:9/unemployment.tsv");
        }
        other => panic!("unexpected error: {other}"),
    }
}
