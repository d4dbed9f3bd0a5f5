//! Product and architecture enumerations.
//!
//! Every branch of the packaging and download-metadata logic keys off these
//! two enums, so the per-product facts (display names, package names, URL
//! roots, supported architectures) all live here.

use std::fmt;

use clap::ValueEnum;

/// Root of the public download host.
pub const DL_HOST: &str = "https://dl.min.io";

/// Distribution channel, selected by the release tag prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Channel {
    #[default]
    Stable,
    Edge,
}

impl Channel {
    /// Channel detection: `EDGE.<timestamp>` tags select the edge path.
    #[must_use]
    pub fn from_tag(tag: &str) -> Self {
        if tag.starts_with("EDGE.") {
            Channel::Edge
        } else {
            Channel::Stable
        }
    }

    /// URL path segment distinguishing the channel.
    #[must_use]
    pub const fn path_segment(&self) -> &'static str {
        match self {
            Channel::Stable => "release",
            Channel::Edge => "edge",
        }
    }
}

/// Products this tool can package.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Product {
    Minio,
    Mc,
    MinioEnterprise,
    McEnterprise,
    Sidekick,
    Warp,
}

impl Product {
    /// Name as passed on the command line and used in manifest file names.
    #[must_use]
    pub const fn flag_name(&self) -> &'static str {
        match self {
            Product::Minio => "minio",
            Product::Mc => "mc",
            Product::MinioEnterprise => "minio-enterprise",
            Product::McEnterprise => "mc-enterprise",
            Product::Sidekick => "sidekick",
            Product::Warp => "warp",
        }
    }

    /// Name of the prebuilt binary under `<release-dir>/linux-<arch>/`.
    #[must_use]
    pub const fn binary_name(&self) -> &'static str {
        match self {
            Product::Minio | Product::MinioEnterprise => "minio",
            Product::Mc | Product::McEnterprise => "mc",
            Product::Sidekick => "sidekick",
            Product::Warp => "warp",
        }
    }

    /// Package name used for artifacts and the installed binary.
    ///
    /// `mc` ships as `mcli` to avoid colliding with Midnight Commander.
    #[must_use]
    pub const fn package_name(&self) -> &'static str {
        match self {
            Product::Minio | Product::MinioEnterprise => "minio",
            Product::Mc | Product::McEnterprise => "mcli",
            Product::Sidekick => "sidekick",
            Product::Warp => "warp",
        }
    }

    /// Display name used as the product key in the downloads manifest.
    #[must_use]
    pub const fn display_name(&self) -> &'static str {
        match self {
            Product::Minio => "MinIO Server",
            Product::Mc => "MinIO Client",
            Product::MinioEnterprise => "AIStor Server",
            Product::McEnterprise => "AIStor Client",
            Product::Sidekick => "MinIO Sidekick",
            Product::Warp => "MinIO Warp",
        }
    }

    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Product::Minio => {
                "MinIO is a High Performance Object Storage released under AGPLv3.\n  It is API compatible with Amazon S3 cloud storage service. Use MinIO to build\n  high performance infrastructure for machine learning, analytics and application\n  data workloads."
            }
            Product::Mc => "MinIO Client for cloud storage and filesystems",
            Product::MinioEnterprise => {
                "AIStor Server is MinIO's enterprise object store for exascale\n  AI data infrastructure."
            }
            Product::McEnterprise => "AIStor Client for cloud storage and filesystems",
            Product::Sidekick => "High performance sidecar load balancer for MinIO clusters",
            Product::Warp => "S3 performance benchmark tool for MinIO deployments",
        }
    }

    /// Server products install a systemd unit alongside the binary.
    #[must_use]
    pub const fn installs_unit(&self) -> bool {
        matches!(self, Product::Minio | Product::MinioEnterprise)
    }

    /// Warp is tagged `v<semver>`; everything else uses timestamp tags.
    #[must_use]
    pub const fn uses_semver_tags(&self) -> bool {
        matches!(self, Product::Warp)
    }

    /// Default output directory, with any `-enterprise` suffix stripped so
    /// enterprise builds land next to their community counterparts.
    #[must_use]
    pub fn release_dir_name(&self) -> String {
        let base = self
            .flag_name()
            .strip_suffix("-enterprise")
            .unwrap_or(self.flag_name());
        format!("{base}-release")
    }

    /// Architectures packaged for Linux.
    #[must_use]
    pub const fn linux_arches(&self) -> &'static [Arch] {
        match self {
            Product::Minio | Product::Mc | Product::MinioEnterprise | Product::McEnterprise => {
                &Arch::ALL
            }
            Product::Sidekick | Product::Warp => &[Arch::Amd64, Arch::Arm64],
        }
    }

    /// Root download URL for this product on the given channel.
    ///
    /// Only the enterprise products publish an edge path; the channel is
    /// ignored everywhere else.
    #[must_use]
    pub fn download_root(&self, channel: Channel) -> String {
        match self {
            Product::Minio => format!("{DL_HOST}/server/minio/release"),
            Product::Mc => format!("{DL_HOST}/client/mc/release"),
            Product::MinioEnterprise => {
                format!("{DL_HOST}/aistor/minio/{}", channel.path_segment())
            }
            Product::McEnterprise => format!("{DL_HOST}/aistor/mc/{}", channel.path_segment()),
            Product::Sidekick => format!("{DL_HOST}/aistor/sidekick/release"),
            Product::Warp => format!("{DL_HOST}/aistor/warp/release"),
        }
    }
}

impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.flag_name())
    }
}

/// Target architectures, named as the build pipeline names them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Arch {
    Amd64,
    Arm64,
    S390x,
    Ppc64le,
}

impl Arch {
    pub const ALL: [Arch; 4] = [Arch::Amd64, Arch::Arm64, Arch::S390x, Arch::Ppc64le];

    #[must_use]
    pub fn parse(input: &str) -> Option<Self> {
        match input {
            "amd64" => Some(Arch::Amd64),
            "arm64" => Some(Arch::Arm64),
            "s390x" => Some(Arch::S390x),
            "ppc64le" => Some(Arch::Ppc64le),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Arch::Amd64 => "amd64",
            Arch::Arm64 => "arm64",
            Arch::S390x => "s390x",
            Arch::Ppc64le => "ppc64le",
        }
    }

    /// Debian architecture alias.
    #[must_use]
    pub const fn deb_name(&self) -> &'static str {
        match self {
            Arch::Amd64 => "amd64",
            Arch::Arm64 => "arm64",
            Arch::S390x => "s390x",
            Arch::Ppc64le => "ppc64el",
        }
    }

    /// RPM architecture alias.
    #[must_use]
    pub const fn rpm_name(&self) -> &'static str {
        match self {
            Arch::Amd64 => "x86_64",
            Arch::Arm64 => "aarch64",
            Arch::S390x => "s390x",
            Arch::Ppc64le => "ppc64le",
        }
    }

    /// Alpine architecture alias.
    #[must_use]
    pub const fn apk_name(&self) -> &'static str {
        match self {
            Arch::Amd64 => "x86_64",
            Arch::Arm64 => "aarch64",
            Arch::S390x => "s390x",
            Arch::Ppc64le => "ppc64le",
        }
    }
}

impl fmt::Display for Arch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
