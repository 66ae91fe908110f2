//! dictumdl - release catalog and smart-download selection for Dictum
//!
//! Run `dictumdl latest` to show the newest installers, `dictumdl pick` to
//! simulate the download page's smart selection, and `dictumdl routes` as a
//! build-time check that use-case routes and pages agree.

use anyhow::Context;
use clap::Parser;
use dictumdl::catalog;
use dictumdl::cli::{Cli, Commands};
use dictumdl::config::{self, Config};
use dictumdl::detect::{self, DetectionSignals};
use dictumdl::feed::{self, FeedClient};
use dictumdl::release::ReleaseRecord;
use dictumdl::routes;
use serde_json::json;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.quiet {
        "error"
    } else {
        match cli.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(format!("dictumdl={},warn", log_level))),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    // Load configuration
    let mut config = config::load_config(cli.config.as_deref())?;

    // Apply CLI overrides
    if let Some(feed) = cli.feed {
        config.feed.endpoint = feed;
    }

    match cli.command.unwrap_or(Commands::Latest {
        format: "text".to_string(),
    }) {
        Commands::Latest { format } => {
            let records = load_records(cli.feed_file.as_ref(), &config)?;
            print_latest(&records, &format)?;
        }

        Commands::Versions { format } => {
            let records = load_records(cli.feed_file.as_ref(), &config)?;
            print_versions(&records, &format)?;
        }

        Commands::Pick {
            user_agent,
            platform_hint,
            renderer,
            format,
        } => {
            let records = load_records(cli.feed_file.as_ref(), &config)?;
            print_pick(
                &records,
                &config,
                &user_agent,
                &platform_hint,
                renderer.as_deref(),
                &format,
            )?;
        }

        Commands::Routes {
            pages_dir,
            use_cases,
            format,
        } => {
            let pages_dir = pages_dir.unwrap_or_else(|| config.routes.pages_dir.clone());
            let use_cases = use_cases.unwrap_or_else(|| config.routes.config_file.clone());
            let report = routes::check(&use_cases, &pages_dir)?;

            if format == "json" {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                for key in &report.missing_pages {
                    println!("missing page: {}", key);
                }
                for page in &report.orphan_pages {
                    println!("orphan page:  {}", page);
                }
                if report.is_clean() {
                    println!("Routes OK: every declared use case has a page.");
                }
            }

            // Build-time check: a mismatch fails CI without a stack trace.
            if !report.is_clean() {
                std::process::exit(1);
            }
        }

        Commands::Config => {
            println!("# Resolved configuration\n");
            println!("{}", toml::to_string_pretty(&config)?);
            if let Some(path) = Config::default_path() {
                println!("# Default config path: {}", path.display());
            }
        }
    }

    Ok(())
}

/// Materialize the release feed: local file if given, network otherwise.
fn load_records(feed_file: Option<&PathBuf>, config: &Config) -> anyhow::Result<Vec<ReleaseRecord>> {
    let records = match feed_file {
        Some(path) => feed::read_feed_file(path)
            .with_context(|| format!("reading feed file {}", path.display()))?,
        None => FeedClient::new(&config.feed)?.fetch()?,
    };
    Ok(records)
}

fn print_latest(records: &[ReleaseRecord], format: &str) -> anyhow::Result<()> {
    let version = catalog::latest_version(records);
    let downloads = catalog::latest_downloads(records);

    if format == "json" {
        println!(
            "{}",
            serde_json::to_string_pretty(&json!({
                "version": version,
                "known_release": !records.is_empty(),
                "downloads": downloads,
            }))?
        );
        return Ok(());
    }

    if records.is_empty() {
        println!("No releases in the feed.");
        return Ok(());
    }

    println!("Dictum {}\n", version);
    for record in downloads {
        println!(
            "  {:<8} {:<10} {} {}",
            record
                .platform
                .map(|p| p.to_string())
                .unwrap_or_else(|| "unknown".to_string()),
            record.architecture,
            record.file_path,
            record
                .file_size_formatted
                .as_deref()
                .map(|s| format!("({})", s))
                .unwrap_or_default()
        );
    }
    Ok(())
}

fn print_versions(records: &[ReleaseRecord], format: &str) -> anyhow::Result<()> {
    let groups = catalog::group_by_version(records);

    if format == "json" {
        println!("{}", serde_json::to_string_pretty(&groups)?);
        return Ok(());
    }

    if groups.is_empty() {
        println!("No releases in the feed.");
        return Ok(());
    }

    for group in &groups {
        let marker = if group.is_latest { " (latest)" } else { "" };
        println!("{}{}", group.version, marker);
        for record in &group.downloads {
            println!(
                "  {:<8} {:<10} {}",
                record
                    .platform
                    .map(|p| p.to_string())
                    .unwrap_or_else(|| "unknown".to_string()),
                record.architecture,
                record.release_date.format("%Y-%m-%d")
            );
        }
    }
    Ok(())
}

fn print_pick(
    records: &[ReleaseRecord],
    config: &Config,
    user_agent: &str,
    platform_hint: &str,
    renderer: Option<&str>,
    format: &str,
) -> anyhow::Result<()> {
    let detection = detect::detect(&DetectionSignals {
        user_agent,
        platform_hint,
        renderer,
    });

    // One consistent snapshot per decision: detection and selection both run
    // against the records loaded above.
    let candidates = detect::order_by_arch_preference(
        catalog::latest_downloads(records),
        &config.download.arch_preference,
    );

    let selected = if detection.needs_manual_choice() {
        None
    } else {
        detect::select_best_download(&candidates, detection.platform, detection.architecture)
    };

    if format == "json" {
        println!(
            "{}",
            serde_json::to_string_pretty(&json!({
                "detection": detection,
                "selected": selected,
                "manual": selected.is_none(),
            }))?
        );
        return Ok(());
    }

    match selected {
        Some(record) => {
            println!(
                "{} {} -> {}",
                record
                    .platform
                    .map(|p| p.to_string())
                    .unwrap_or_else(|| "unknown".to_string()),
                record.architecture,
                record.file_path
            );
        }
        None => {
            println!(
                "Detection inconclusive (platform: {}, architecture: {}).",
                detection
                    .platform
                    .map(|p| p.to_string())
                    .unwrap_or_else(|| "unknown".to_string()),
                detection
                    .architecture
                    .map(|a| a.to_string())
                    .unwrap_or_else(|| "unknown".to_string()),
            );
            println!("Fall back to the manual download listing (dictumdl latest).");
        }
    }
    Ok(())
}
