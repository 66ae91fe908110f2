//! Development tasks for dictumdl
//!
//! Usage:
//!   cargo xtask install     Install release binary to /usr/local/bin (requires sudo)
//!   cargo xtask uninstall   Remove binary from /usr/local/bin (requires sudo)
//!   cargo xtask dist        Build release binary for distribution
//!   cargo xtask man         Build with man-page generation enabled

use std::env;
use std::path::PathBuf;
use std::process::{Command, ExitCode};

fn main() -> ExitCode {
    let args: Vec<String> = env::args().skip(1).collect();

    if args.is_empty() {
        print_help();
        return ExitCode::SUCCESS;
    }

    let result = match args[0].as_str() {
        "install" => install(),
        "uninstall" => uninstall(),
        "dist" => dist(),
        "man" => man(),
        "help" | "--help" | "-h" => {
            print_help();
            Ok(())
        }
        cmd => {
            eprintln!("Unknown command: {}", cmd);
            print_help();
            Err(anyhow::anyhow!("Unknown command"))
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn print_help() {
    eprintln!(
        r#"
dictumdl development tasks

Usage: cargo xtask <COMMAND>

Commands:
  install    Build release binary and install to /usr/local/bin (requires sudo)
  uninstall  Remove dictumdl from /usr/local/bin (requires sudo)
  dist       Build optimized release binary for distribution
  man        Build with man-page generation enabled (pages land in OUT_DIR/man)

Examples:
  cargo xtask install     # Build and install
  cargo xtask dist        # Build binary for distribution
  cargo xtask uninstall   # Remove installed binary
"#
    );
}

/// Get the project root directory
fn project_root() -> PathBuf {
    let dir = env::var("CARGO_MANIFEST_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| env::current_dir().unwrap());

    // xtask is in a subdirectory, go up one level
    dir.parent().unwrap_or(&dir).to_path_buf()
}

fn build_release(root: &PathBuf) -> anyhow::Result<PathBuf> {
    let status = Command::new("cargo")
        .args(["build", "--release"])
        .current_dir(root)
        .status()?;

    if !status.success() {
        anyhow::bail!("Build failed");
    }

    let binary = root.join("target/release/dictumdl");
    if !binary.exists() {
        anyhow::bail!("Binary not found at {:?}", binary);
    }
    Ok(binary)
}

/// Build release binary and install to /usr/local/bin
fn install() -> anyhow::Result<()> {
    let root = project_root();

    println!("==> Building release binary...");
    let binary = build_release(&root)?;

    println!("==> Installing to /usr/local/bin/dictumdl...");

    let status = Command::new("sudo")
        .args([
            "install",
            "-Dm755",
            binary.to_str().unwrap(),
            "/usr/local/bin/dictumdl",
        ])
        .status()?;

    if !status.success() {
        anyhow::bail!("Install failed (sudo required)");
    }

    println!("==> Installed successfully!");
    println!();
    println!("Installed: /usr/local/bin/dictumdl");

    // Show version
    let _ = Command::new("/usr/local/bin/dictumdl")
        .arg("--version")
        .status();

    Ok(())
}

/// Remove dictumdl from /usr/local/bin
fn uninstall() -> anyhow::Result<()> {
    println!("==> Removing /usr/local/bin/dictumdl...");

    let status = Command::new("sudo")
        .args(["rm", "-f", "/usr/local/bin/dictumdl"])
        .status()?;

    if !status.success() {
        anyhow::bail!("Uninstall failed (sudo required)");
    }

    println!("==> Uninstalled successfully!");
    Ok(())
}

/// Build optimized release binary for distribution
fn dist() -> anyhow::Result<()> {
    let root = project_root();

    println!("==> Building distribution binary...");
    let binary = build_release(&root)?;

    println!("==> Built: {:?}", binary);

    // Show binary info
    let _ = Command::new("ls")
        .args(["-lh", binary.to_str().unwrap()])
        .status();

    let _ = Command::new(binary.to_str().unwrap())
        .arg("--version")
        .status();

    Ok(())
}

/// Build with man-page generation enabled
fn man() -> anyhow::Result<()> {
    let root = project_root();

    println!("==> Building with man-page generation...");
    let status = Command::new("cargo")
        .args(["build", "--release"])
        .env("DICTUMDL_GEN_MANPAGES", "1")
        .current_dir(&root)
        .status()?;

    if !status.success() {
        anyhow::bail!("Build failed");
    }

    println!("==> Man pages generated under target/release/build/*/out/man");
    Ok(())
}
