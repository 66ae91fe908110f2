//! Release catalog aggregation
//!
//! Pure, synchronous regrouping of an already-fetched release feed into the
//! views the download page renders: per-platform listings for one version,
//! and a latest-first version history. Everything here works over borrowed
//! records; nothing is mutated, cached, or persisted.
//!
//! Ordering is always by wall-clock `release_date`, never by comparing
//! version strings. That tolerates arbitrary versioning schemes, at the cost
//! of trusting the upstream feed to set release dates correctly.

use crate::release::{Platform, ReleaseRecord, VersionGroup};
use std::collections::BTreeMap;

/// Sentinel returned by [`latest_version`] for an empty feed. Callers must
/// treat it as "no known release"; it never appears in grouped record data.
pub const FALLBACK_VERSION: &str = "1.0.0";

/// Group records by platform.
///
/// The result always carries all three known platforms, each mapping to the
/// (possibly empty) records for it in feed order. Records with an unknown
/// platform are silently dropped: an artifact we cannot offer a download
/// button for is not worth surfacing to visitors.
pub fn group_by_platform(records: &[ReleaseRecord]) -> BTreeMap<Platform, Vec<&ReleaseRecord>> {
    let mut groups: BTreeMap<Platform, Vec<&ReleaseRecord>> =
        Platform::ALL.iter().map(|&p| (p, Vec::new())).collect();

    for record in records {
        match record.platform {
            Some(platform) => groups.entry(platform).or_default().push(record),
            None => tracing::debug!("Dropping record '{}' with unknown platform", record.id),
        }
    }

    groups
}

/// The version of the most recently released record.
///
/// Ties on `release_date` keep the first record encountered. An empty feed
/// yields [`FALLBACK_VERSION`].
pub fn latest_version(records: &[ReleaseRecord]) -> String {
    records
        .iter()
        .reduce(|best, r| if r.release_date > best.release_date { r } else { best })
        .map(|r| r.version.clone())
        .unwrap_or_else(|| FALLBACK_VERSION.to_string())
}

/// All records belonging to the latest version, in feed order.
///
/// Empty input yields empty output; the fallback sentinel never leaks into
/// record data.
pub fn latest_downloads(records: &[ReleaseRecord]) -> Vec<&ReleaseRecord> {
    if records.is_empty() {
        return Vec::new();
    }
    let latest = latest_version(records);
    records.iter().filter(|r| r.version == latest).collect()
}

/// Partition records into version groups, newest first.
///
/// Versions are compared by string equality only. Each group's
/// representative date is the maximum `release_date` among its members, and
/// groups are sorted descending by it (stable, so groups that tie keep
/// first-encounter order). Exactly one group is marked `is_latest` for a
/// non-empty feed.
pub fn group_by_version(records: &[ReleaseRecord]) -> Vec<VersionGroup<'_>> {
    let mut order: Vec<&str> = Vec::new();
    let mut downloads: BTreeMap<&str, Vec<&ReleaseRecord>> = BTreeMap::new();

    for record in records {
        let version = record.version.as_str();
        if !downloads.contains_key(version) {
            order.push(version);
        }
        downloads.entry(version).or_default().push(record);
    }

    let mut groups: Vec<VersionGroup<'_>> = order
        .into_iter()
        .map(|version| VersionGroup {
            version,
            downloads: downloads.remove(version).unwrap_or_default(),
            is_latest: false,
        })
        .collect();

    groups.sort_by(|a, b| {
        let date = |g: &VersionGroup<'_>| g.downloads.iter().map(|r| r.release_date).max();
        date(b).cmp(&date(a))
    });

    if let Some(first) = groups.first_mut() {
        first.is_latest = true;
    }

    groups
}
