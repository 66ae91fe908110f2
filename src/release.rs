//! Release feed data model
//!
//! A `ReleaseRecord` is one published installer artifact as served by the
//! release-metadata API. Parsing is deliberately lenient: the feed is an
//! external service we do not control, so a record with an unrecognized
//! platform or a broken timestamp must not take down the whole feed.
//! Unknown platforms parse to `None` and are dropped later by the catalog;
//! missing or unparseable release dates are pinned to the Unix epoch so they
//! can never win "latest".

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Installer target platform.
///
/// This is a closed enumeration; feed records outside it are treated as
/// unknown rather than rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Macos,
    Windows,
    Linux,
}

impl Platform {
    /// All known platforms, in display order.
    pub const ALL: [Platform; 3] = [Platform::Macos, Platform::Windows, Platform::Linux];

    /// Parse a feed platform value. Unknown values yield `None`.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "macos" => Some(Platform::Macos),
            "windows" => Some(Platform::Windows),
            "linux" => Some(Platform::Linux),
            _ => None,
        }
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Platform::Macos => write!(f, "macos"),
            Platform::Windows => write!(f, "windows"),
            Platform::Linux => write!(f, "linux"),
        }
    }
}

/// One published installer artifact.
///
/// Records are immutable once parsed; the catalog only regroups references
/// to them. Extra fields in the feed are ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReleaseRecord {
    /// Opaque unique identifier.
    pub id: String,

    /// Version label. Treated as an opaque grouping key; ordering always
    /// comes from `release_date`, never from parsing this string.
    pub version: String,

    /// Publication timestamp, used only for ordering. Missing or
    /// unparseable dates are pinned to the Unix epoch.
    #[serde(default = "epoch", deserialize_with = "de_release_date")]
    pub release_date: DateTime<Utc>,

    /// Target platform. Unknown feed values parse to `None` and are
    /// silently dropped from platform groupings.
    #[serde(default, deserialize_with = "de_platform")]
    pub platform: Option<Platform>,

    /// Free-form, platform-specific architecture label (e.g. "arm64",
    /// "x64", "Intel_x86_64"). Opaque; never validated.
    #[serde(default)]
    pub architecture: String,

    /// Artifact URL. Opaque.
    pub file_path: String,

    /// Human-readable size, display-only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_size_formatted: Option<String>,
}

/// Records of a single version, derived fresh on every request.
#[derive(Debug, Clone, Serialize)]
pub struct VersionGroup<'a> {
    pub version: &'a str,
    pub downloads: Vec<&'a ReleaseRecord>,
    pub is_latest: bool,
}

fn epoch() -> DateTime<Utc> {
    DateTime::<Utc>::UNIX_EPOCH
}

fn de_release_date<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.as_deref().map_or_else(epoch, parse_release_date))
}

/// Parse an ISO 8601 timestamp, accepting both full RFC 3339 and bare
/// `YYYY-MM-DD` dates. Anything else is pinned to the epoch.
fn parse_release_date(s: &str) -> DateTime<Utc> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return dt.with_timezone(&Utc);
    }
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        if let Some(dt) = date.and_hms_opt(0, 0, 0) {
            return dt.and_utc();
        }
    }
    tracing::warn!("Unparseable releaseDate '{}', treating as epoch", s);
    epoch()
}

fn de_platform<'de, D>(deserializer: D) -> Result<Option<Platform>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(Platform::parse))
}
