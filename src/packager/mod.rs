//! Package format backends.
//!
//! Each format implements [`Packager`]: a conventional artifact file name
//! plus an emitter that writes the finished package to any writer. The RPM
//! format is delegated wholesale to the `rpm` crate; DEB and APK delegate
//! their containers to the `ar`, `tar` and `flate2` crates and only fill in
//! the format's metadata records.

use std::collections::BTreeSet;
use std::fmt;
use std::io::Write;

use clap::ValueEnum;
use flate2::Compression;
use flate2::write::GzEncoder;

use crate::error::{PkgerError, Result};
use crate::pkgconf::PackageConfig;
use crate::product::Arch;

pub mod apk;
pub mod deb;
pub mod rpm;

/// Supported output package formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Deb,
    Rpm,
    Apk,
}

impl Format {
    pub const ALL: [Format; 3] = [Format::Deb, Format::Rpm, Format::Apk];

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Format::Deb => "deb",
            Format::Rpm => "rpm",
            Format::Apk => "apk",
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A package format backend.
pub trait Packager {
    /// Conventional artifact file name for this format.
    fn conventional_file_name(&self, config: &PackageConfig) -> String;

    /// Build the package from `config` and write it to `out`.
    fn package(&self, config: &PackageConfig, out: &mut dyn Write) -> Result<()>;
}

/// Look up the backend for a format.
#[must_use]
pub fn get(format: Format) -> Box<dyn Packager> {
    match format {
        Format::Deb => Box::new(deb::DebPackager),
        Format::Rpm => Box::new(rpm::RpmPackager),
        Format::Apk => Box::new(apk::ApkPackager),
    }
}

pub(crate) fn deb_arch(arch: &str) -> &str {
    match Arch::parse(arch) {
        Some(a) => a.deb_name(),
        None => arch,
    }
}

pub(crate) fn rpm_arch(arch: &str) -> &str {
    match Arch::parse(arch) {
        Some(a) => a.rpm_name(),
        None => arch,
    }
}

pub(crate) fn apk_arch(arch: &str) -> &str {
    match Arch::parse(arch) {
        Some(a) => a.apk_name(),
        None => arch,
    }
}

/// Permission bits for an installed path.
pub(crate) fn unix_mode(dst: &str) -> u32 {
    if dst.starts_with("/usr/bin/") {
        0o755
    } else {
        0o644
    }
}

/// A gzip-compressed tar payload plus its uncompressed size.
pub(crate) struct Tarball {
    pub bytes: Vec<u8>,
    pub size: u64,
}

/// Build the content tarball shared by the DEB and APK backends.
///
/// Entry paths are prefixed with `prefix` (`./` for DEB, empty for APK) and
/// parent directories are emitted ahead of their files in sorted order so
/// the output is deterministic.
pub(crate) fn content_tarball(config: &PackageConfig, prefix: &str) -> Result<Tarball> {
    let enc = GzEncoder::new(Vec::new(), Compression::default());
    let mut builder = tar::Builder::new(enc);
    let mut size = 0u64;

    let mut dirs = BTreeSet::new();
    for entry in &config.contents {
        for dir in parent_dirs(&entry.dst) {
            dirs.insert(dir);
        }
    }
    for dir in &dirs {
        let mut header = tar::Header::new_gnu();
        header.set_entry_type(tar::EntryType::Directory);
        header.set_size(0);
        header.set_mode(0o755);
        header.set_mtime(0);
        builder.append_data(&mut header, format!("{prefix}{dir}"), std::io::empty())?;
    }

    for entry in &config.contents {
        let bytes = std::fs::read(&entry.src).map_err(|err| {
            PkgerError::Config(format!("read {}: {err}", entry.src.display()))
        })?;
        size += bytes.len() as u64;

        let mut header = tar::Header::new_gnu();
        header.set_entry_type(tar::EntryType::Regular);
        header.set_size(bytes.len() as u64);
        header.set_mode(unix_mode(&entry.dst));
        header.set_mtime(0);
        builder.append_data(
            &mut header,
            format!("{prefix}{}", entry.dst.trim_start_matches('/')),
            bytes.as_slice(),
        )?;
    }

    let bytes = builder.into_inner()?.finish()?;
    Ok(Tarball { bytes, size })
}

fn parent_dirs(dst: &str) -> Vec<String> {
    let mut dirs = Vec::new();
    let mut parts: Vec<&str> = dst.trim_start_matches('/').split('/').collect();
    parts.pop();
    let mut acc = String::new();
    for part in parts {
        acc.push_str(part);
        acc.push('/');
        dirs.push(acc.clone());
    }
    dirs
}
