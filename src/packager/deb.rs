//! DEB backend: an `ar` container holding the control and data tarballs.

use std::fmt::Write as _;
use std::io::Write;

use super::{Packager, content_tarball, deb_arch};
use crate::error::Result;
use crate::pkgconf::PackageConfig;

pub struct DebPackager;

impl Packager for DebPackager {
    fn conventional_file_name(&self, config: &PackageConfig) -> String {
        format!(
            "{}_{}_{}.deb",
            config.name,
            config.version,
            deb_arch(&config.arch)
        )
    }

    fn package(&self, config: &PackageConfig, out: &mut dyn Write) -> Result<()> {
        let data = content_tarball(config, "./")?;
        let control = control_tarball(config, data.size.div_ceil(1024))?;

        let mut archive = ar::Builder::new(out);
        append_member(&mut archive, "debian-binary", b"2.0\n")?;
        append_member(&mut archive, "control.tar.gz", &control)?;
        append_member(&mut archive, "data.tar.gz", &data.bytes)?;
        Ok(())
    }
}

fn append_member<W: Write>(archive: &mut ar::Builder<W>, name: &str, bytes: &[u8]) -> Result<()> {
    let mut header = ar::Header::new(name.as_bytes().to_vec(), bytes.len() as u64);
    header.set_mode(0o644);
    archive.append(&header, bytes)?;
    Ok(())
}

fn control_tarball(config: &PackageConfig, installed_size_kib: u64) -> Result<Vec<u8>> {
    let control = control_file(config, installed_size_kib);

    let enc = flate2::write::GzEncoder::new(Vec::new(), flate2::Compression::default());
    let mut builder = tar::Builder::new(enc);
    let mut header = tar::Header::new_gnu();
    header.set_entry_type(tar::EntryType::Regular);
    header.set_size(control.len() as u64);
    header.set_mode(0o644);
    header.set_mtime(0);
    builder.append_data(&mut header, "./control", control.as_bytes())?;
    let bytes = builder.into_inner()?.finish()?;
    Ok(bytes)
}

fn control_file(config: &PackageConfig, installed_size_kib: u64) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Package: {}", config.name);
    let _ = writeln!(out, "Version: {}", config.version);
    let _ = writeln!(out, "Section: utils");
    let _ = writeln!(out, "Priority: optional");
    let _ = writeln!(out, "Architecture: {}", deb_arch(&config.arch));
    let _ = writeln!(out, "Maintainer: {}", config.maintainer);
    let _ = writeln!(out, "Installed-Size: {installed_size_kib}");
    let _ = writeln!(out, "Homepage: {}", config.homepage);
    let _ = writeln!(out, "Description: {}", fold_description(&config.description));
    out
}

/// Fold a multi-line description into control-file form: synopsis on the
/// field line, continuation lines indented by one space, blank lines as `.`.
fn fold_description(description: &str) -> String {
    let mut lines = description.lines();
    let mut out = lines.next().unwrap_or_default().trim().to_string();
    for line in lines {
        let line = line.trim();
        if line.is_empty() {
            out.push_str("\n .");
        } else {
            out.push_str("\n ");
            out.push_str(line);
        }
    }
    out
}
