//! Use-case route consistency check
//!
//! The marketing site derives one static page per declared use case. The
//! declaration lives in a TOML map (use-case key -> page configuration)
//! while the pages themselves are files in the site tree, and nothing stops
//! the two drifting apart. This is a build-time check, not a runtime
//! component: a mismatch is a reportable finding for the developer, never a
//! thrown error.

use crate::error::RouteError;
use serde::Serialize;
use std::collections::HashSet;
use std::path::Path;

/// Outcome of a route check
#[derive(Debug, Clone, Serialize)]
pub struct RouteReport {
    /// Declared use-case keys with no materialized page.
    pub missing_pages: Vec<String>,
    /// Page files with no declared use-case key.
    pub orphan_pages: Vec<String>,
}

impl RouteReport {
    /// True when declarations and pages agree exactly.
    pub fn is_clean(&self) -> bool {
        self.missing_pages.is_empty() && self.orphan_pages.is_empty()
    }
}

/// Declared keys absent from the configured set.
///
/// Input order is preserved and duplicate declarations are collapsed before
/// comparison. Absence of a match is the expected, reportable case.
pub fn diff(declared: &[String], configured: &HashSet<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    declared
        .iter()
        .filter(|key| seen.insert(key.as_str()))
        .filter(|key| !configured.contains(key.as_str()))
        .cloned()
        .collect()
}

/// Run the route check against a use-case config file and a pages directory.
pub fn check(config_file: &Path, pages_dir: &Path) -> Result<RouteReport, RouteError> {
    let declared = declared_keys(config_file)?;
    let pages = page_names(pages_dir)?;

    let page_set: HashSet<String> = pages.iter().cloned().collect();
    let declared_set: HashSet<String> = declared.iter().cloned().collect();

    let report = RouteReport {
        missing_pages: diff(&declared, &page_set),
        orphan_pages: diff(&pages, &declared_set),
    };

    if report.is_clean() {
        tracing::debug!(
            "Route check clean: {} use cases, {} pages",
            declared.len(),
            pages.len()
        );
    } else {
        tracing::warn!(
            "Route check found {} missing and {} orphan pages",
            report.missing_pages.len(),
            report.orphan_pages.len()
        );
    }

    Ok(report)
}

/// Keys of the `[use_cases]` table, in file order. Values are page
/// configuration the site consumes; only key presence matters here.
fn declared_keys(config_file: &Path) -> Result<Vec<String>, RouteError> {
    let path = config_file.display().to_string();

    let contents = std::fs::read_to_string(config_file).map_err(|e| RouteError::ConfigRead {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    let value: toml::Value = toml::from_str(&contents).map_err(|e| RouteError::ConfigRead {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    let table = value
        .get("use_cases")
        .and_then(toml::Value::as_table)
        .ok_or(RouteError::MissingTable { path })?;

    Ok(table.keys().cloned().collect())
}

/// Names of materialized pages: file stems and directory names directly
/// under the pages dir. Hidden and underscore-prefixed entries are site
/// scaffolding, not routes.
fn page_names(pages_dir: &Path) -> Result<Vec<String>, RouteError> {
    let entries = std::fs::read_dir(pages_dir).map_err(|source| RouteError::PagesDir {
        path: pages_dir.display().to_string(),
        source,
    })?;

    let mut names: Vec<String> = entries
        .filter_map(|entry| entry.ok())
        .filter_map(|entry| {
            let path = entry.path();
            let name = if path.is_dir() {
                path.file_name()?.to_str()?.to_string()
            } else {
                path.file_stem()?.to_str()?.to_string()
            };
            if name.starts_with('.') || name.starts_with('_') {
                None
            } else {
                Some(name)
            }
        })
        .collect();

    // read_dir order is platform dependent
    names.sort();
    Ok(names)
}
