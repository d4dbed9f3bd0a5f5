//! Release tag normalization.
//!
//! Two tag grammars exist: timestamp tags (`RELEASE.<ts>` / `EDGE.<ts>`,
//! optionally followed by hotfix fields) used by the object-store products,
//! and `v<semver>` tags used by warp. Both normalize to a version string the
//! package managers accept.

use chrono::NaiveDateTime;
use semver::Version;

use crate::error::{PkgerError, Result};
use crate::product::Product;

/// Timestamp layout inside a release tag.
const TAG_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H-%M-%SZ";

/// Compact layout emitted into package versions.
const COMPACT_TIMESTAMP_FORMAT: &str = "%Y%m%d%H%M%S";

/// Normalize a release tag for the given product.
pub fn normalize(product: Product, tag: &str) -> Result<String> {
    if product.uses_semver_tags() {
        normalize_semver_tag(tag)
    } else {
        normalize_release_tag(tag)
    }
}

/// Convert a timestamp tag into a package version.
///
/// `RELEASE.2025-03-12T00-00-00Z` becomes `20250312000000.0.0`; trailing
/// fields such as `hotfix.1` are carried over verbatim.
pub fn normalize_release_tag(tag: &str) -> Result<String> {
    let fields: Vec<&str> = tag.split('.').collect();
    if fields.len() < 2 {
        return Err(PkgerError::InvalidReleaseTag(format!(
            "expected RELEASE.<timestamp> or EDGE.<timestamp>, got {tag:?}"
        )));
    }
    if fields[0] != "RELEASE" && fields[0] != "EDGE" {
        return Err(PkgerError::InvalidReleaseTag(format!(
            "tag {tag:?} must start with RELEASE or EDGE"
        )));
    }

    let ts = NaiveDateTime::parse_from_str(fields[1], TAG_TIMESTAMP_FORMAT).map_err(|err| {
        PkgerError::InvalidReleaseTag(format!("bad timestamp {:?} in {tag:?}: {err}", fields[1]))
    })?;

    let mut version = format!("{}.0.0", ts.format(COMPACT_TIMESTAMP_FORMAT));
    if fields.len() > 2 {
        version.push('.');
        version.push_str(&fields[2..].join("."));
    }
    Ok(version)
}

/// Strip the `v` marker and validate the remainder as a semantic version.
pub fn normalize_semver_tag(tag: &str) -> Result<String> {
    let stripped = tag.strip_prefix('v').ok_or_else(|| {
        PkgerError::InvalidReleaseTag(format!("expected v<semver>, got {tag:?}"))
    })?;
    let version = Version::parse(stripped).map_err(|err| {
        PkgerError::InvalidReleaseTag(format!("bad semantic version {tag:?}: {err}"))
    })?;
    Ok(version.to_string())
}
