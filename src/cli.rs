//! Command-line interface definitions.
//!
//! Uses clap v4 with derive macros for argument parsing. The tool is a
//! single-purpose CI command, so there are no subcommands.

use std::path::PathBuf;

use clap::Parser;

use crate::packager::Format;
use crate::product::Product;

/// Debian, RPM and APK packaging for MinIO product releases
#[derive(Parser, Debug)]
#[command(name = "pkger")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Application name for the package
    #[arg(short = 'a', long, value_enum, default_value = "minio")]
    pub app_name: Product,

    /// Current release tag (RELEASE.<timestamp>, EDGE.<timestamp> or v<semver>)
    #[arg(short = 'r', long)]
    pub release: String,

    /// Packager implementations to use
    #[arg(
        short = 'p',
        long,
        value_enum,
        value_delimiter = ',',
        default_values_t = Format::ALL
    )]
    pub packager: Vec<Format>,

    /// Output directory (defaults to <app>-release)
    #[arg(short = 'd', long)]
    pub release_dir: Option<PathBuf>,

    /// Skip the convenience symlinks next to versioned artifacts
    #[arg(long)]
    pub no_symlink: bool,

    /// Increase verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long)]
    pub quiet: bool,
}
