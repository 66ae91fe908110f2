// Command-line interface definitions for dictumdl
//
// This module is separate so it can be used by both the binary (main.rs)
// and build.rs for generating man pages.

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "dictumdl")]
#[command(author, version, about = "Release catalog and smart-download selection for Dictum")]
#[command(long_about = "
dictumdl powers the download surface of the Dictum voice-dictation product.
It fetches the release-metadata feed, aggregates installers per version and
platform, picks the best download for a visitor's browser signals, and
checks that every declared use-case route has a static page.

USAGE:
  dictumdl latest                 Show the latest version and its installers
  dictumdl versions               Show the full version history, newest first
  dictumdl pick --user-agent ...  Smart-download selection from browser signals
  dictumdl routes                 Check use-case routes against the pages dir
")]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<std::path::PathBuf>,

    /// Increase verbosity (-v = debug, -vv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (errors only)
    #[arg(short, long)]
    pub quiet: bool,

    /// Override the release feed endpoint URL
    #[arg(long, value_name = "URL")]
    pub feed: Option<String>,

    /// Read the release feed from a local JSON file instead of the network
    #[arg(long, value_name = "FILE")]
    pub feed_file: Option<std::path::PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the latest version and its installers (default)
    Latest {
        /// Output format: "text" (default) or "json"
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Show the full version history, newest first
    Versions {
        /// Output format: "text" (default) or "json"
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Pick the best download for a visitor's browser signals
    Pick {
        /// User-agent string
        #[arg(long, value_name = "UA", default_value = "")]
        user_agent: String,

        /// Platform hint (navigator.platform: "MacIntel", "Win32", ...)
        #[arg(long, value_name = "HINT", default_value = "")]
        platform_hint: String,

        /// WebGL renderer description, if the probe succeeded
        #[arg(long, value_name = "RENDERER")]
        renderer: Option<String>,

        /// Output format: "text" (default) or "json"
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Check declared use-case routes against materialized pages
    Routes {
        /// Directory of materialized use-case pages
        #[arg(long, value_name = "DIR")]
        pages_dir: Option<std::path::PathBuf>,

        /// TOML file with the [use_cases] declaration table
        #[arg(long, value_name = "FILE")]
        use_cases: Option<std::path::PathBuf>,

        /// Output format: "text" (default) or "json"
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Show current configuration
    Config,
}
