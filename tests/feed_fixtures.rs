//! End-to-end catalog and selection tests over a recorded feed fixture
//!
//! The fixture mirrors what the release-metadata API actually serves,
//! including the awkward records: an unknown platform, a missing release
//! date, extra fields, and a free-form architecture label.

use dictumdl::catalog;
use dictumdl::detect::{self, DetectionSignals};
use dictumdl::feed;
use dictumdl::release::{Platform, ReleaseRecord};
use std::path::PathBuf;

/// Path to feed fixtures
fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

/// Load the recorded release feed
fn load_feed() -> Vec<ReleaseRecord> {
    feed::read_feed_file(&fixtures_dir().join("releases.json"))
        .expect("fixture feed should parse")
}

// ============================================================================
// Catalog aggregation
// ============================================================================

#[test]
fn fixture_latest_version_is_newest_by_date() {
    let records = load_feed();
    assert_eq!(catalog::latest_version(&records), "2.0.1");
}

#[test]
fn fixture_latest_downloads_are_complete() {
    let records = load_feed();
    let latest = catalog::latest_downloads(&records);

    assert_eq!(latest.len(), 3);
    assert!(latest.iter().all(|r| r.version == "2.0.1"));
}

#[test]
fn fixture_version_groups_partition_the_feed() {
    let records = load_feed();
    let groups = catalog::group_by_version(&records);

    let total: usize = groups.iter().map(|g| g.downloads.len()).sum();
    assert_eq!(total, records.len());

    let versions: Vec<&str> = groups.iter().map(|g| g.version).collect();
    assert_eq!(versions, ["2.0.1", "2.0.0", "1.9.0", "0.9.0"]);

    assert_eq!(groups.iter().filter(|g| g.is_latest).count(), 1);
    assert!(groups[0].is_latest);
}

#[test]
fn fixture_missing_date_sorts_last() {
    let records = load_feed();
    let groups = catalog::group_by_version(&records);

    // rel-legacy has no releaseDate and is pinned to the epoch.
    assert_eq!(groups.last().unwrap().version, "0.9.0");
}

#[test]
fn fixture_platform_groups_drop_unknown() {
    let records = load_feed();
    let groups = catalog::group_by_platform(&records);

    assert_eq!(groups.len(), 3);
    // rel-190-bsd is excluded everywhere.
    let total: usize = groups.values().map(Vec::len).sum();
    assert_eq!(total, records.len() - 1);
    assert_eq!(groups[&Platform::Linux].len(), 1);
}

// ============================================================================
// Smart-download selection against the fixture
// ============================================================================

const MAC_UA: &str =
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15 Safari/605.1.15";
const LINUX_UA: &str = "Mozilla/5.0 (X11; Linux x86_64) Gecko/20100101 Firefox/121.0";

fn pick(records: &[ReleaseRecord], ua: &str, hint: &str, renderer: Option<&str>) -> Option<String> {
    let detection = detect::detect(&DetectionSignals {
        user_agent: ua,
        platform_hint: hint,
        renderer,
    });

    if detection.needs_manual_choice() {
        return None;
    }

    let preference = vec!["arm64".to_string(), "x64".to_string()];
    let candidates =
        detect::order_by_arch_preference(catalog::latest_downloads(records), &preference);
    detect::select_best_download(&candidates, detection.platform, detection.architecture)
        .map(|r| r.id.clone())
}

#[test]
fn fixture_apple_silicon_gets_arm_build() {
    let records = load_feed();
    let picked = pick(&records, MAC_UA, "MacIntel", Some("Apple M2"));
    assert_eq!(picked.as_deref(), Some("rel-201-mac-arm"));
}

#[test]
fn fixture_mac_without_renderer_goes_manual() {
    let records = load_feed();
    assert_eq!(pick(&records, MAC_UA, "MacIntel", None), None);
}

#[test]
fn fixture_linux_gets_first_linux_candidate() {
    // The latest version has no Linux build, so select against the whole
    // platform grouping the download page renders.
    let records = load_feed();
    let detection = detect::detect(&DetectionSignals {
        user_agent: LINUX_UA,
        platform_hint: "Linux x86_64",
        renderer: None,
    });
    assert_eq!(detection.platform, Some(Platform::Linux));
    assert_eq!(detection.architecture, None);

    let groups = catalog::group_by_platform(&records);
    let linux: Vec<&ReleaseRecord> = groups[&Platform::Linux].clone();
    let picked = detect::select_best_download(&linux, detection.platform, detection.architecture);
    assert_eq!(picked.unwrap().id, "rel-190-linux");
}

#[test]
fn fixture_mac_intel_falls_through_to_preference_order() {
    // The feed labels the Intel build "Intel_x86_64", so a detected "x64"
    // never matches exactly and selection falls through to the ranked order.
    let records = load_feed();
    let picked = pick(&records, MAC_UA, "MacIntel", Some("AMD Radeon Pro 5500M"));
    assert_eq!(picked.as_deref(), Some("rel-201-mac-arm"));
}

#[test]
fn fixture_windows_pick_is_windows() {
    let records = load_feed();
    let picked = pick(
        &records,
        "Mozilla/5.0 (Windows NT 10.0; Win64; x64) Chrome/120.0",
        "Win32",
        None,
    );
    assert_eq!(picked.as_deref(), Some("rel-201-win"));
}

#[test]
fn empty_feed_yields_sentinel_and_empty_views() {
    let records: Vec<ReleaseRecord> = Vec::new();

    assert_eq!(catalog::latest_version(&records), "1.0.0");
    assert!(catalog::latest_downloads(&records).is_empty());
    assert!(catalog::group_by_version(&records).is_empty());

    let groups = catalog::group_by_platform(&records);
    assert_eq!(groups.len(), 3);
    assert!(groups.values().all(|v| v.is_empty()));
}
