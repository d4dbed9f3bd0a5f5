//! Release emission: drives the packaging config renderer and the format
//! backends over every target architecture, writes checksum sidecars and
//! convenience symlinks, and emits the downloads manifest.

use std::fs;
use std::io::Write as _;
use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};
use tempfile::NamedTempFile;
use tracing::{debug, info, warn};

use crate::cli::Cli;
use crate::downloads;
use crate::error::{PkgerError, Result};
use crate::packager::{self, Format};
use crate::pkgconf::{self, PackageConfig, TemplateContext};
use crate::product::Channel;
use crate::version;

/// Systemd unit template read from the working directory for server builds.
const UNIT_FILE: &str = "minio.service";

/// Run a full packaging pass for the product selected on the command line.
pub fn run(cli: &Cli) -> Result<()> {
    let product = cli.app_name;
    let channel = Channel::from_tag(&cli.release);
    let release_version = version::normalize(product, &cli.release)?;
    let release_dir = cli
        .release_dir
        .clone()
        .unwrap_or_else(|| PathBuf::from(product.release_dir_name()));

    // Keep the rewritten unit file alive until every packager has read it.
    let unit = if product.installs_unit() {
        Some(rewrite_unit_file(Path::new(UNIT_FILE))?)
    } else {
        None
    };

    for arch in product.linux_arches() {
        let arch_dir = release_dir.join(format!("linux-{arch}"));
        let binary_src = arch_dir.join(format!("{}.{}", product.binary_name(), cli.release));
        if !binary_src.exists() {
            warn!(
                "no {} binary at {}, skipping linux-{arch}",
                product.binary_name(),
                binary_src.display()
            );
            continue;
        }

        let ctx = TemplateContext {
            package: product.package_name().to_string(),
            arch: arch.to_string(),
            version: release_version.clone(),
            description: product.description().to_string(),
            binary_src,
            unit_src: unit.as_ref().map(|file| file.path().to_path_buf()),
        };
        let doc = pkgconf::render(&ctx);
        debug!("packaging config for linux-{arch}:\n{doc}");
        let config = PackageConfig::from_yaml_str(&doc)?;
        config.validate()?;

        for format in &cli.packager {
            emit_package(&config, *format, &arch_dir, !cli.no_symlink)?;
        }
    }

    let manifest = downloads::generate(product, &release_version, &cli.release, channel);
    fs::create_dir_all(&release_dir)?;
    let manifest_path = release_dir.join(format!("downloads-{}.json", product.flag_name()));
    fs::write(&manifest_path, serde_json::to_vec(&manifest)?)?;
    info!("wrote downloads manifest: {}", manifest_path.display());
    Ok(())
}

/// Build one artifact, then its checksum sidecar and convenience symlink.
fn emit_package(
    config: &PackageConfig,
    format: Format,
    arch_dir: &Path,
    symlink: bool,
) -> Result<()> {
    info!("using {format} packager...");
    let backend = packager::get(format);
    let file_name = backend.conventional_file_name(config);
    let target = arch_dir.join(&file_name);

    let mut artifact = Vec::new();
    backend.package(config, &mut artifact)?;
    let digest = Sha256::digest(&artifact);
    fs::write(&target, &artifact)?;

    let sidecar = arch_dir.join(format!("{file_name}.sha256sum"));
    fs::write(&sidecar, format!("{}  {}", hex::encode(digest), file_name))?;

    if symlink {
        link_unversioned(arch_dir, &file_name, config, format)?;
    }
    info!("created package: {}", target.display());
    Ok(())
}

/// Point `<package>.<ext>` at the versioned artifact so stable URLs keep
/// working across releases.
#[cfg(unix)]
fn link_unversioned(
    arch_dir: &Path,
    file_name: &str,
    config: &PackageConfig,
    format: Format,
) -> Result<()> {
    let link = arch_dir.join(format!("{}.{}", config.name, format.as_str()));
    if link.symlink_metadata().is_ok() {
        fs::remove_file(&link)?;
    }
    std::os::unix::fs::symlink(file_name, &link)?;
    Ok(())
}

#[cfg(not(unix))]
fn link_unversioned(
    _arch_dir: &Path,
    _file_name: &str,
    _config: &PackageConfig,
    _format: Format,
) -> Result<()> {
    Ok(())
}

/// Rewrite the unit file's `/usr/local` prefixes to `/usr`, where the
/// packages install the binary.
fn rewrite_unit_file(path: &Path) -> Result<NamedTempFile> {
    let original = fs::read_to_string(path)
        .map_err(|err| PkgerError::Config(format!("read {}: {err}", path.display())))?;
    let fixed = original.replace("/usr/local", "/usr");

    let mut file = NamedTempFile::new()?;
    file.write_all(fixed.as_bytes())?;
    file.flush()?;
    Ok(file)
}
