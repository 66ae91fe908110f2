//! Visitor platform detection and best-match download selection
//!
//! The download page's "smart" button has to guess what the visitor is
//! running from ambient browser strings: a user-agent, a platform hint
//! (`navigator.platform`), and optionally a WebGL renderer description.
//! These are best-effort signals with no cross-platform guarantees, so
//! detection is a pure function over literal strings: it can be unit-tested
//! without a browser, and every inconclusive path resolves to `None` rather
//! than an error, pushing the decision to the manual download listing.

use crate::release::{Platform, ReleaseRecord};
use serde::Serialize;

/// CPU architecture as far as the download page cares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Arch {
    Arm64,
    X64,
}

impl Arch {
    /// The feed's canonical label for this architecture.
    pub fn as_str(&self) -> &'static str {
        match self {
            Arch::Arm64 => "arm64",
            Arch::X64 => "x64",
        }
    }
}

impl std::fmt::Display for Arch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw browser environment signals, all opaque and vendor dependent.
#[derive(Debug, Clone, Copy)]
pub struct DetectionSignals<'a> {
    /// User-agent string.
    pub user_agent: &'a str,
    /// Platform hint (e.g. `navigator.platform`: "MacIntel", "Win32").
    pub platform_hint: &'a str,
    /// WebGL renderer description, when the probe succeeded.
    pub renderer: Option<&'a str>,
}

/// Best-effort guess at the visitor's environment. Ephemeral; recomputed
/// for every download attempt, never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Detection {
    pub platform: Option<Platform>,
    pub architecture: Option<Arch>,
}

impl Detection {
    /// Whether the caller should fall back to the manual download listing
    /// instead of auto-selecting.
    ///
    /// Unknown platform is obvious. macOS with an unknown architecture is
    /// also manual: shipping an Intel build to Apple silicon (or the
    /// reverse) is worse than one extra click.
    pub fn needs_manual_choice(&self) -> bool {
        match self.platform {
            None => true,
            Some(Platform::Macos) => self.architecture.is_none(),
            Some(_) => false,
        }
    }
}

/// Markers an Apple-silicon WebGL renderer string contains.
const APPLE_GPU_MARKERS: &[&str] = &["apple"];

/// Markers for discrete/desktop GPU vendors, which on macOS imply an Intel
/// machine. No ARM Mac ever shipped with these.
const DESKTOP_GPU_MARKERS: &[&str] = &["amd", "radeon", "intel", "nvidia", "geforce"];

/// Detect the visitor's platform and architecture from browser signals.
///
/// Deterministic: identical inputs always yield the identical result.
pub fn detect(signals: &DetectionSignals<'_>) -> Detection {
    let ua = signals.user_agent.to_ascii_lowercase();
    let hint = signals.platform_hint.to_ascii_lowercase();
    let mentions = |marker: &str| ua.contains(marker) || hint.contains(marker);

    let platform = if mentions("mac") {
        Some(Platform::Macos)
    } else if mentions("win") {
        Some(Platform::Windows)
    } else if mentions("linux") {
        Some(Platform::Linux)
    } else {
        None
    };

    let architecture = match platform {
        // Only the renderer string distinguishes Apple silicon from Intel;
        // the user-agent lies ("Intel Mac OS X" on M-series Safari).
        Some(Platform::Macos) => signals.renderer.and_then(detect_mac_arch),
        // No ARM-Windows detection; x64 installers run there under emulation.
        Some(Platform::Windows) => Some(Arch::X64),
        // Linux visitors pick their own package.
        Some(Platform::Linux) | None => None,
    };

    Detection {
        platform,
        architecture,
    }
}

fn detect_mac_arch(renderer: &str) -> Option<Arch> {
    let renderer = renderer.to_ascii_lowercase();
    if APPLE_GPU_MARKERS.iter().any(|m| renderer.contains(m)) {
        return Some(Arch::Arm64);
    }
    if DESKTOP_GPU_MARKERS.iter().any(|m| renderer.contains(m)) {
        return Some(Arch::X64);
    }
    None
}

/// Pick the single best download from a candidate set.
///
/// Returns `None` when the platform is unknown, the candidates are empty,
/// or nothing matches the platform — the caller then shows the manual
/// listing. A detected macOS architecture prefers an exact architecture
/// match and falls through to the first platform match otherwise. The
/// returned record always matches the requested platform.
pub fn select_best_download<'a>(
    candidates: &[&'a ReleaseRecord],
    platform: Option<Platform>,
    architecture: Option<Arch>,
) -> Option<&'a ReleaseRecord> {
    let platform = platform?;

    let matching: Vec<&'a ReleaseRecord> = candidates
        .iter()
        .copied()
        .filter(|r| r.platform == Some(platform))
        .collect();
    if matching.is_empty() {
        return None;
    }

    if platform == Platform::Macos {
        if let Some(arch) = architecture {
            if let Some(exact) = matching
                .iter()
                .find(|r| r.architecture.eq_ignore_ascii_case(arch.as_str()))
            {
                return Some(*exact);
            }
        }
    }

    matching.first().copied()
}

/// Stably order records by an explicit architecture preference list.
///
/// The feed's ordering is incidental, so callers that want "most preferred
/// first" rank candidates here before selection. Architectures not in the
/// list sort after all listed ones; ties keep their original order, so an
/// empty list is a no-op.
pub fn order_by_arch_preference<'a>(
    records: Vec<&'a ReleaseRecord>,
    preference: &[String],
) -> Vec<&'a ReleaseRecord> {
    let rank = |r: &ReleaseRecord| {
        preference
            .iter()
            .position(|p| p.eq_ignore_ascii_case(&r.architecture))
            .unwrap_or(preference.len())
    };

    let mut ordered = records;
    ordered.sort_by_key(|r| rank(r));
    ordered
}
