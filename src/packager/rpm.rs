//! RPM backend, delegated to the `rpm` crate.

use std::io::Write;

use super::{Packager, rpm_arch, unix_mode};
use crate::error::{PkgerError, Result};
use crate::pkgconf::PackageConfig;

pub struct RpmPackager;

impl Packager for RpmPackager {
    fn conventional_file_name(&self, config: &PackageConfig) -> String {
        format!(
            "{}-{}.{}.rpm",
            config.name,
            config.version,
            rpm_arch(&config.arch)
        )
    }

    fn package(&self, config: &PackageConfig, mut out: &mut dyn Write) -> Result<()> {
        let mut builder = ::rpm::PackageBuilder::new(
            &config.name,
            &config.version,
            &config.license,
            rpm_arch(&config.arch),
            config.summary(),
        )
        .description(config.description.trim())
        .vendor(&config.vendor)
        .url(&config.homepage)
        .compression(::rpm::CompressionType::Gzip);

        for entry in &config.contents {
            let src = entry.src.to_string_lossy();
            let mode = 0o100_000 | unix_mode(&entry.dst);
            builder = builder
                .with_file(
                    src.as_ref(),
                    ::rpm::FileOptions::new(entry.dst.clone()).mode(mode as i32),
                )
                .map_err(|err| {
                    PkgerError::Packaging(format!("rpm file {}: {err}", entry.dst))
                })?;
        }

        let package = builder
            .build()
            .map_err(|err| PkgerError::Packaging(format!("rpm build: {err}")))?;
        package
            .write(&mut out)
            .map_err(|err| PkgerError::Packaging(format!("rpm write: {err}")))?;
        Ok(())
    }
}
