//! dictumdl: release catalog and smart-download selection for Dictum
//!
//! This library powers the download surface of the Dictum voice-dictation
//! product's website:
//! - Fetching the release-metadata feed (JSON array of installer artifacts)
//! - Grouping releases per version and per platform for the download page
//! - Guessing a visitor's platform/architecture from browser signals and
//!   picking the single best installer ("smart download")
//! - A build-time check that declared use-case routes match static pages
//!
//! # Architecture
//!
//! ```text
//!   release feed (HTTP/JSON) ──▶ feed ──▶ [ReleaseRecord]
//!                                             │
//!                        ┌────────────────────┼──────────────────┐
//!                        ▼                    ▼                  │
//!                 ┌────────────┐       ┌────────────┐            │
//!                 │  catalog   │       │   detect   │◀── browser signals
//!                 │ (grouping) │       │ (matching) │    (UA, hint, WebGL)
//!                 └────────────┘       └────────────┘
//!                        │                    │
//!                        ▼                    ▼
//!                 version/platform      one ReleaseRecord
//!                 listings              or manual fallback
//!
//!   use-cases.toml + pages dir ──▶ routes ──▶ mismatch report (build time)
//! ```
//!
//! All core logic is synchronous and pure over already-materialized data;
//! only `feed` touches the network, and nothing is cached or persisted.

pub mod catalog;
pub mod cli;
pub mod config;
pub mod detect;
pub mod error;
pub mod feed;
pub mod release;
pub mod routes;

pub use cli::{Cli, Commands};
pub use config::Config;
pub use detect::{detect, select_best_download, Detection, DetectionSignals};
pub use error::{DictumdlError, Result};
pub use release::{Platform, ReleaseRecord, VersionGroup};
