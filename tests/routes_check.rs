//! Route check integration tests against real (temporary) filesystems

use dictumdl::routes;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Write a use-case config declaring the given keys
fn write_use_cases(dir: &Path, keys: &[&str]) -> std::path::PathBuf {
    let mut contents = String::from("[use_cases]\n");
    for key in keys {
        contents.push_str(&format!("{} = {{ title = \"{}\" }}\n", key, key));
    }
    let path = dir.join("use-cases.toml");
    fs::write(&path, contents).unwrap();
    path
}

/// Materialize page files for the given route names
fn write_pages(dir: &Path, names: &[&str]) {
    for name in names {
        fs::write(dir.join(format!("{}.astro", name)), "---\n---\n").unwrap();
    }
}

#[test]
fn clean_tree_reports_nothing() {
    let tmp = TempDir::new().unwrap();
    let pages = tmp.path().join("use-cases");
    fs::create_dir(&pages).unwrap();

    let config = write_use_cases(tmp.path(), &["meetings", "coding"]);
    write_pages(&pages, &["meetings", "coding"]);

    let report = routes::check(&config, &pages).unwrap();
    assert!(report.is_clean());
    assert!(report.missing_pages.is_empty());
    assert!(report.orphan_pages.is_empty());
}

#[test]
fn missing_page_is_reported() {
    let tmp = TempDir::new().unwrap();
    let pages = tmp.path().join("use-cases");
    fs::create_dir(&pages).unwrap();

    // Declared {a, b, c}, materialized {a, c} -> b is missing
    let config = write_use_cases(tmp.path(), &["a", "b", "c"]);
    write_pages(&pages, &["a", "c"]);

    let report = routes::check(&config, &pages).unwrap();
    assert_eq!(report.missing_pages, ["b"]);
    assert!(report.orphan_pages.is_empty());
    assert!(!report.is_clean());
}

#[test]
fn orphan_page_is_reported() {
    let tmp = TempDir::new().unwrap();
    let pages = tmp.path().join("use-cases");
    fs::create_dir(&pages).unwrap();

    let config = write_use_cases(tmp.path(), &["meetings"]);
    write_pages(&pages, &["meetings", "journaling"]);

    let report = routes::check(&config, &pages).unwrap();
    assert!(report.missing_pages.is_empty());
    assert_eq!(report.orphan_pages, ["journaling"]);
}

#[test]
fn scaffolding_entries_are_ignored() {
    let tmp = TempDir::new().unwrap();
    let pages = tmp.path().join("use-cases");
    fs::create_dir(&pages).unwrap();

    let config = write_use_cases(tmp.path(), &["meetings"]);
    write_pages(&pages, &["meetings", "_layout"]);
    fs::write(pages.join(".DS_Store"), "").unwrap();

    let report = routes::check(&config, &pages).unwrap();
    assert!(report.is_clean());
}

#[test]
fn directory_pages_count_as_routes() {
    let tmp = TempDir::new().unwrap();
    let pages = tmp.path().join("use-cases");
    fs::create_dir(&pages).unwrap();

    let config = write_use_cases(tmp.path(), &["meetings"]);
    fs::create_dir(pages.join("meetings")).unwrap();

    let report = routes::check(&config, &pages).unwrap();
    assert!(report.is_clean());
}

#[test]
fn missing_use_cases_table_is_an_error() {
    let tmp = TempDir::new().unwrap();
    let pages = tmp.path().join("use-cases");
    fs::create_dir(&pages).unwrap();

    let config = tmp.path().join("use-cases.toml");
    fs::write(&config, "[pages]\nfoo = 1\n").unwrap();

    let result = routes::check(&config, &pages);
    assert!(matches!(
        result,
        Err(dictumdl::error::RouteError::MissingTable { .. })
    ));
}

#[test]
fn missing_pages_dir_is_an_error() {
    let tmp = TempDir::new().unwrap();
    let config = write_use_cases(tmp.path(), &["meetings"]);

    let result = routes::check(&config, &tmp.path().join("nope"));
    assert!(matches!(
        result,
        Err(dictumdl::error::RouteError::PagesDir { .. })
    ));
}
