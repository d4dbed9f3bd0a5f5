//! APK backend: gzip tar segments with a `.PKGINFO` control record.
//!
//! Emits an unsigned v2 package (control segment followed by the data
//! segment), installable with `apk add --allow-untrusted`.

use std::fmt::Write as _;
use std::io::Write;

use sha2::{Digest, Sha256};

use super::{Packager, apk_arch, content_tarball};
use crate::error::Result;
use crate::pkgconf::PackageConfig;

pub struct ApkPackager;

impl Packager for ApkPackager {
    fn conventional_file_name(&self, config: &PackageConfig) -> String {
        format!(
            "{}_{}_{}.apk",
            config.name,
            config.version,
            apk_arch(&config.arch)
        )
    }

    fn package(&self, config: &PackageConfig, out: &mut dyn Write) -> Result<()> {
        let data = content_tarball(config, "")?;
        let datahash = hex::encode(Sha256::digest(&data.bytes));
        let control = control_segment(config, data.size, &datahash)?;

        out.write_all(&control)?;
        out.write_all(&data.bytes)?;
        Ok(())
    }
}

fn control_segment(config: &PackageConfig, size: u64, datahash: &str) -> Result<Vec<u8>> {
    let info = pkginfo(config, size, datahash);

    let enc = flate2::write::GzEncoder::new(Vec::new(), flate2::Compression::default());
    let mut builder = tar::Builder::new(enc);
    let mut header = tar::Header::new_gnu();
    header.set_entry_type(tar::EntryType::Regular);
    header.set_size(info.len() as u64);
    header.set_mode(0o644);
    header.set_mtime(0);
    builder.append_data(&mut header, ".PKGINFO", info.as_bytes())?;
    let bytes = builder.into_inner()?.finish()?;
    Ok(bytes)
}

fn pkginfo(config: &PackageConfig, size: u64, datahash: &str) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "pkgname = {}", config.name);
    let _ = writeln!(out, "pkgver = {}", config.version);
    let _ = writeln!(out, "pkgdesc = {}", config.summary());
    let _ = writeln!(out, "url = {}", config.homepage);
    let _ = writeln!(out, "arch = {}", apk_arch(&config.arch));
    let _ = writeln!(out, "size = {size}");
    let _ = writeln!(out, "license = {}", config.license);
    let _ = writeln!(out, "maintainer = {}", config.maintainer);
    let _ = writeln!(out, "datahash = {datahash}");
    out
}
