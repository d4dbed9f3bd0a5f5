//! Packaging config: a static YAML template rendered per product and
//! architecture, then parsed into a typed config the format backends consume.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{PkgerError, Result};

/// Static packaging config template; `{placeholder}` fields are substituted
/// by [`render`].
const CONFIG_TEMPLATE: &str = r#"name: "{name}"
arch: "{arch}"
platform: "{platform}"
version: "{version}"
maintainer: "MinIO Development <dev@min.io>"
description: |
  {description}
vendor: "MinIO, Inc."
homepage: "https://min.io"
license: "AGPLv3"
contents:
- src: {binary_src}
  dst: /usr/bin/{binary_dst}
"#;

/// Extra placement appended for products that install a systemd service.
const UNIT_SECTION: &str = r#"- src: {unit_src}
  dst: /etc/systemd/system/minio.service
"#;

/// Attributes substituted into [`CONFIG_TEMPLATE`].
#[derive(Debug, Clone)]
pub struct TemplateContext {
    pub package: String,
    pub arch: String,
    pub version: String,
    pub description: String,
    pub binary_src: PathBuf,
    pub unit_src: Option<PathBuf>,
}

/// Render the packaging config document for one architecture.
#[must_use]
pub fn render(ctx: &TemplateContext) -> String {
    let mut out = CONFIG_TEMPLATE
        .replace("{name}", &ctx.package)
        .replace("{arch}", &ctx.arch)
        .replace("{platform}", "linux")
        .replace("{version}", &ctx.version)
        .replace("{description}", &ctx.description)
        .replace("{binary_src}", &ctx.binary_src.display().to_string())
        .replace("{binary_dst}", &ctx.package);
    if let Some(unit) = &ctx.unit_src {
        out.push_str(&UNIT_SECTION.replace("{unit_src}", &unit.display().to_string()));
    }
    out
}

/// Parsed packaging config, the input to every format backend.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PackageConfig {
    pub name: String,
    pub arch: String,
    pub platform: String,
    pub version: String,
    pub maintainer: String,
    pub description: String,
    pub vendor: String,
    pub homepage: String,
    pub license: String,
    #[serde(default)]
    pub contents: Vec<ContentEntry>,
}

/// One file placement: source path on disk, destination path in the package.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ContentEntry {
    pub src: PathBuf,
    pub dst: String,
}

impl PackageConfig {
    pub fn from_yaml_str(input: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(input)?;
        Ok(config)
    }

    /// Reject configs a packager cannot act on.
    pub fn validate(&self) -> Result<()> {
        validate_required("name", &self.name)?;
        validate_required("arch", &self.arch)?;
        validate_required("version", &self.version)?;
        validate_required("maintainer", &self.maintainer)?;
        if self.contents.is_empty() {
            return Err(PkgerError::ValidationFailed(
                "contents must include at least one entry".to_string(),
            ));
        }
        for entry in &self.contents {
            if entry.src.as_os_str().is_empty() {
                return Err(PkgerError::ValidationFailed(format!(
                    "content src is required for {}",
                    entry.dst
                )));
            }
            if !entry.dst.starts_with('/') {
                return Err(PkgerError::ValidationFailed(format!(
                    "content dst must be absolute: {}",
                    entry.dst
                )));
            }
        }
        Ok(())
    }

    /// First line of the description, used where formats want a one-liner.
    #[must_use]
    pub fn summary(&self) -> &str {
        self.description.lines().next().unwrap_or_default()
    }
}

fn validate_required(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(PkgerError::ValidationFailed(format!(
            "{field} is required"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::product::Product;

    fn minio_context() -> TemplateContext {
        TemplateContext {
            package: "minio".to_string(),
            arch: "amd64".to_string(),
            version: "20250312000000.0.0".to_string(),
            description: Product::Minio.description().to_string(),
            binary_src: PathBuf::from(
                "minio-release/linux-amd64/minio.RELEASE.2025-03-12T00-00-00Z",
            ),
            unit_src: Some(PathBuf::from("/tmp/minio.service")),
        }
    }

    #[test]
    fn renders_parseable_config_with_unit() {
        let doc = render(&minio_context());
        let config = PackageConfig::from_yaml_str(&doc).unwrap();
        config.validate().unwrap();

        assert_eq!(config.name, "minio");
        assert_eq!(config.arch, "amd64");
        assert_eq!(config.platform, "linux");
        assert_eq!(config.version, "20250312000000.0.0");
        assert_eq!(config.vendor, "MinIO, Inc.");
        assert_eq!(config.contents.len(), 2);
        assert_eq!(config.contents[0].dst, "/usr/bin/minio");
        assert_eq!(config.contents[1].dst, "/etc/systemd/system/minio.service");
    }

    #[test]
    fn multiline_description_survives_the_round_trip() {
        let doc = render(&minio_context());
        let config = PackageConfig::from_yaml_str(&doc).unwrap();
        assert!(config.summary().starts_with("MinIO is a High Performance"));
        assert!(config.description.lines().count() > 1);
        // Block indentation is stripped by the YAML parser.
        assert!(config.description.contains("\nIt is API compatible"));
    }

    #[test]
    fn renders_without_unit_section() {
        let ctx = TemplateContext {
            package: "mcli".to_string(),
            arch: "arm64".to_string(),
            version: "20250312000000.0.0".to_string(),
            description: Product::Mc.description().to_string(),
            binary_src: PathBuf::from("mc-release/linux-arm64/mc.RELEASE.2025-03-12T00-00-00Z"),
            unit_src: None,
        };
        let config = PackageConfig::from_yaml_str(&render(&ctx)).unwrap();
        config.validate().unwrap();
        assert_eq!(config.contents.len(), 1);
        assert_eq!(config.contents[0].dst, "/usr/bin/mcli");
    }

    #[test]
    fn validate_rejects_empty_contents() {
        let mut config = PackageConfig::from_yaml_str(&render(&minio_context())).unwrap();
        config.contents.clear();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("at least one entry"), "{err}");
    }

    #[test]
    fn validate_rejects_relative_dst() {
        let mut config = PackageConfig::from_yaml_str(&render(&minio_context())).unwrap();
        config.contents[0].dst = "usr/bin/minio".to_string();
        assert!(config.validate().is_err());
    }
}
