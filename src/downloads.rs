//! Downloads manifest generation.
//!
//! Builds the nested platform → product → architecture mapping of download
//! URLs and install instructions that is published next to each release as
//! `downloads-<app>.json`. Everything here is string interpolation over the
//! product enumeration; the branching mirrors how each product is actually
//! distributed.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::product::{Arch, Channel, Product};

/// One downloadable artifact: install instructions, checksum URL, download URL.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct DlInfo {
    pub text: String,
    #[serde(rename = "cksum")]
    pub checksum: String,
    pub download: String,
}

/// Install info for one product on one architecture.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct DownloadEntry {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(rename = "Binary", skip_serializing_if = "Option::is_none")]
    pub bin: Option<DlInfo>,
    #[serde(rename = "RPM", skip_serializing_if = "Option::is_none")]
    pub rpm: Option<DlInfo>,
    #[serde(rename = "DEB", skip_serializing_if = "Option::is_none")]
    pub deb: Option<DlInfo>,
    #[serde(rename = "Homebrew", skip_serializing_if = "Option::is_none")]
    pub homebrew: Option<DlInfo>,
    #[serde(rename = "Podman", skip_serializing_if = "Option::is_none")]
    pub podman: Option<DlInfo>,
}

/// product display name → architecture → entry.
pub type PlatformMap = BTreeMap<String, BTreeMap<String, DownloadEntry>>;

/// The per-platform manifest. Platforms a product does not ship for stay
/// `None` and serialize as `null`.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct DownloadsManifest {
    #[serde(rename = "Kubernetes")]
    pub kubernetes: Option<PlatformMap>,
    #[serde(rename = "Docker")]
    pub docker: Option<PlatformMap>,
    #[serde(rename = "Linux")]
    pub linux: Option<PlatformMap>,
    #[serde(rename = "macOS")]
    pub macos: Option<PlatformMap>,
    #[serde(rename = "Windows")]
    pub windows: Option<PlatformMap>,
}

/// Enterprise manifests nest the platform maps under a subscription name.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct EnterpriseManifest {
    #[serde(rename = "Subscriptions")]
    pub subscriptions: BTreeMap<String, DownloadsManifest>,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum Manifest {
    Community(DownloadsManifest),
    Enterprise(EnterpriseManifest),
}

/// Generate the downloads manifest for a product release.
#[must_use]
pub fn generate(product: Product, version: &str, release_tag: &str, channel: Channel) -> Manifest {
    match product {
        Product::Minio | Product::Mc => Manifest::Community(community(product, version)),
        Product::MinioEnterprise | Product::McEnterprise => {
            Manifest::Enterprise(enterprise(product, version, release_tag, channel))
        }
        Product::Sidekick => Manifest::Community(sidekick(version, release_tag)),
        Product::Warp => Manifest::Community(warp(version, release_tag)),
    }
}

fn entry_map(product: Product) -> PlatformMap {
    let mut map = PlatformMap::new();
    map.insert(product.display_name().to_string(), BTreeMap::new());
    map
}

fn dl(download: String, text: String) -> DlInfo {
    DlInfo {
        checksum: format!("{download}.sha256sum"),
        download,
        text,
    }
}

fn community(product: Product, version: &str) -> DownloadsManifest {
    let root = product.download_root(Channel::Stable);
    let display = product.display_name();
    let pkg = product.package_name();
    let binary = product.binary_name();

    let mut kubernetes = entry_map(product);
    let mut docker = entry_map(product);
    let mut linux = entry_map(product);
    let mut macos = entry_map(product);
    let mut windows = entry_map(product);

    for arch in product.linux_arches() {
        let kube_text = match product {
            Product::Minio => "kubectl krew install minio\nkubectl minio init\nkubectl minio tenant create tenant1 --servers 4 --volumes 16 --capacity 16Ti".to_string(),
            _ => "kubectl run my-mc -i --tty --image minio/mc:latest --command -- bash\n[root@my-mc /]# mc alias set myminio/ https://minio.default.svc.cluster.local MY-USER MY-PASSWORD\n[root@my-mc /]# mc ls myminio/mybucket".to_string(),
        };
        let docker_text = match product {
            Product::Minio => "podman run -p 9000:9000 -p 9001:9001 minio/minio server /data --console-address \":9001\"".to_string(),
            _ => "podman run --name my-mc --hostname my-mc -it --entrypoint /bin/bash --rm minio/mc\n[root@my-mc /]# mc alias set myminio/ https://my-minio-service MY-USER MY-PASSWORD\n[root@my-mc /]# mc ls myminio/mybucket".to_string(),
        };
        if let Some(entries) = kubernetes.get_mut(display) {
            entries.insert(
                arch.to_string(),
                DownloadEntry {
                    text: Some(kube_text),
                    ..Default::default()
                },
            );
        }
        if let Some(entries) = docker.get_mut(display) {
            entries.insert(
                arch.to_string(),
                DownloadEntry {
                    text: Some(docker_text),
                    ..Default::default()
                },
            );
        }

        let bin_url = format!("{root}/linux-{arch}/{binary}");
        let bin_text = match product {
            Product::Minio => format!(
                "wget {bin_url}\nchmod +x {binary}\nMINIO_ROOT_USER=admin MINIO_ROOT_PASSWORD=password ./{binary} server /mnt/data --console-address \":9001\""
            ),
            _ => format!(
                "wget {bin_url}\nchmod +x {binary}\nmc alias set myminio/ http://MINIO-SERVER MYUSER MYPASSWORD"
            ),
        };

        let rpm_url = format!(
            "{root}/linux-{arch}/{pkg}-{version}.{}.rpm",
            arch.rpm_name()
        );
        let rpm_text = match product {
            Product::Minio => format!(
                "dnf install {rpm_url}\nMINIO_ROOT_USER=admin MINIO_ROOT_PASSWORD=password minio server /mnt/data --console-address \":9001\""
            ),
            _ => format!("dnf install {rpm_url}\nmcli alias set myminio/ http://MINIO-SERVER MYUSER MYPASSWORD"),
        };

        let deb_file = format!("{pkg}_{version}_{}.deb", arch.deb_name());
        let deb_url = format!("{root}/linux-{arch}/{deb_file}");
        let deb_text = match product {
            Product::Minio => format!(
                "wget {deb_url}\ndpkg -i {deb_file}\nMINIO_ROOT_USER=admin MINIO_ROOT_PASSWORD=password minio server /mnt/data --console-address \":9001\""
            ),
            _ => format!(
                "wget {deb_url}\ndpkg -i {deb_file}\nmcli alias set myminio/ http://MINIO-SERVER MYUSER MYPASSWORD"
            ),
        };

        if let Some(entries) = linux.get_mut(display) {
            entries.insert(
                arch.to_string(),
                DownloadEntry {
                    bin: Some(dl(bin_url, bin_text)),
                    rpm: Some(dl(rpm_url, rpm_text)),
                    deb: Some(dl(deb_url, deb_text)),
                    ..Default::default()
                },
            );
        }
    }

    for arch in [Arch::Amd64, Arch::Arm64] {
        let bin_url = format!("{root}/darwin-{arch}/{binary}");
        let brew_text = match product {
            Product::Minio => "brew install minio/stable/minio\nMINIO_ROOT_USER=admin MINIO_ROOT_PASSWORD=password minio server /mnt/data --console-address \":9001\"".to_string(),
            _ => "brew install minio/stable/mc\nmc alias set myminio/ http://MINIO-SERVER MYUSER MYPASSWORD".to_string(),
        };
        let bin_text = match product {
            Product::Minio => format!(
                "curl --progress-bar -O {bin_url}\nchmod +x {binary}\nMINIO_ROOT_USER=admin MINIO_ROOT_PASSWORD=password ./{binary} server /mnt/data --console-address \":9001\""
            ),
            _ => format!(
                "curl --progress-bar -O {bin_url}\nchmod +x {binary}\nmc alias set myminio/ http://MINIO-SERVER MYUSER MYPASSWORD"
            ),
        };
        if let Some(entries) = macos.get_mut(display) {
            entries.insert(
                arch.to_string(),
                DownloadEntry {
                    homebrew: Some(dl(bin_url.clone(), brew_text)),
                    bin: Some(dl(bin_url, bin_text)),
                    ..Default::default()
                },
            );
        }
    }

    let bin_url = format!("{root}/windows-amd64/{binary}.exe");
    let win_text = match product {
        Product::Minio => format!(
            "PS> Invoke-WebRequest -Uri \"{bin_url}\" -OutFile \"C:\\minio.exe\"\nPS> setx MINIO_ROOT_USER admin\nPS> setx MINIO_ROOT_PASSWORD password\nPS> C:\\minio.exe server F:\\Data --console-address \":9001\""
        ),
        _ => format!(
            "PS> Invoke-WebRequest -Uri \"{bin_url}\" -OutFile \"C:\\mc.exe\"\nC:\\mc.exe alias set myminio/ http://MINIO-SERVER MYUSER MYPASSWORD"
        ),
    };
    if let Some(entries) = windows.get_mut(display) {
        entries.insert(
            Arch::Amd64.to_string(),
            DownloadEntry {
                bin: Some(dl(bin_url, win_text)),
                ..Default::default()
            },
        );
    }

    DownloadsManifest {
        kubernetes: Some(kubernetes),
        docker: Some(docker),
        linux: Some(linux),
        macos: Some(macos),
        windows: Some(windows),
    }
}

fn enterprise(
    product: Product,
    version: &str,
    release_tag: &str,
    channel: Channel,
) -> EnterpriseManifest {
    let root = product.download_root(channel);
    let display = product.display_name();
    let pkg = product.package_name();
    let binary = product.binary_name();
    let image = format!("quay.io/minio/aistor/{binary}:{release_tag}");

    let mut kubernetes = entry_map(product);
    let mut docker = entry_map(product);
    let mut linux = entry_map(product);

    for arch in product.linux_arches() {
        let kube_text = match product {
            Product::MinioEnterprise => format!(
                "helm repo add minio https://helm.min.io\nhelm install aistor minio/aistor --set image=\"{image}\""
            ),
            _ => format!(
                "kubectl run my-mc -i --tty --image {image} --command -- bash\n[root@my-mc /]# mc alias set myminio/ https://minio.default.svc.cluster.local MY-USER MY-PASSWORD\n[root@my-mc /]# mc ls myminio/mybucket"
            ),
        };
        let podman_text = match product {
            Product::MinioEnterprise => format!(
                "podman run -p 9000:9000 -p 9001:9001 {image} server /data --console-address \":9001\""
            ),
            _ => format!(
                "podman run --name my-mc --hostname my-mc -it --entrypoint /bin/bash --rm {image}"
            ),
        };
        if let Some(entries) = kubernetes.get_mut(display) {
            entries.insert(
                arch.to_string(),
                DownloadEntry {
                    text: Some(kube_text),
                    ..Default::default()
                },
            );
        }
        if let Some(entries) = docker.get_mut(display) {
            entries.insert(
                arch.to_string(),
                DownloadEntry {
                    podman: Some(DlInfo {
                        text: podman_text,
                        checksum: String::new(),
                        download: image.clone(),
                    }),
                    ..Default::default()
                },
            );
        }

        let bin_url = format!("{root}/linux-{arch}/{binary}");
        let bin_text = match product {
            Product::MinioEnterprise => format!(
                "wget {bin_url}\nchmod +x {binary}\nMINIO_LICENSE=license.key ./{binary} server /mnt/data --console-address \":9001\""
            ),
            _ => format!(
                "wget {bin_url}\nchmod +x {binary}\nmc alias set myminio/ http://AISTOR-SERVER MYUSER MYPASSWORD"
            ),
        };

        let rpm_url = format!(
            "{root}/linux-{arch}/{pkg}-{version}.{}.rpm",
            arch.rpm_name()
        );
        let rpm_text = match product {
            Product::MinioEnterprise => format!(
                "dnf install {rpm_url}\nMINIO_LICENSE=license.key minio server /mnt/data --console-address \":9001\""
            ),
            _ => format!("dnf install {rpm_url}\nmcli alias set myminio/ http://AISTOR-SERVER MYUSER MYPASSWORD"),
        };

        let deb_file = format!("{pkg}_{version}_{}.deb", arch.deb_name());
        let deb_url = format!("{root}/linux-{arch}/{deb_file}");
        let deb_text = match product {
            Product::MinioEnterprise => format!(
                "wget {deb_url}\ndpkg -i {deb_file}\nMINIO_LICENSE=license.key minio server /mnt/data --console-address \":9001\""
            ),
            _ => format!(
                "wget {deb_url}\ndpkg -i {deb_file}\nmcli alias set myminio/ http://AISTOR-SERVER MYUSER MYPASSWORD"
            ),
        };

        if let Some(entries) = linux.get_mut(display) {
            entries.insert(
                arch.to_string(),
                DownloadEntry {
                    bin: Some(dl(bin_url, bin_text)),
                    rpm: Some(dl(rpm_url, rpm_text)),
                    deb: Some(dl(deb_url, deb_text)),
                    ..Default::default()
                },
            );
        }
    }

    let manifest = DownloadsManifest {
        kubernetes: Some(kubernetes),
        docker: Some(docker),
        linux: Some(linux),
        macos: None,
        windows: None,
    };

    let mut subscriptions = BTreeMap::new();
    subscriptions.insert("Enterprise".to_string(), manifest);
    EnterpriseManifest { subscriptions }
}

fn sidekick(version: &str, release_tag: &str) -> DownloadsManifest {
    let product = Product::Sidekick;
    let root = product.download_root(Channel::Stable);
    let display = product.display_name();
    let pkg = product.package_name();
    let image = format!("quay.io/minio/sidekick:{release_tag}");

    let mut docker = entry_map(product);
    let mut linux = entry_map(product);
    let mut windows = entry_map(product);

    for arch in product.linux_arches() {
        if let Some(entries) = docker.get_mut(display) {
            entries.insert(
                arch.to_string(),
                DownloadEntry {
                    podman: Some(DlInfo {
                        text: format!(
                            "podman run {image} --health-path=/v1/health --address :8080 http://minio{{1...4}}:9000"
                        ),
                        checksum: String::new(),
                        download: image.clone(),
                    }),
                    ..Default::default()
                },
            );
        }

        let bin_url = format!("{root}/linux-{arch}/sidekick");
        let bin_text = format!(
            "wget {bin_url}\nchmod +x sidekick\n./sidekick --health-path=/v1/health --address :8080 http://minio{{1...4}}:9000"
        );
        let rpm_url = format!(
            "{root}/linux-{arch}/{pkg}-{version}.{}.rpm",
            arch.rpm_name()
        );
        let rpm_text = format!(
            "dnf install {rpm_url}\nsidekick --health-path=/v1/health --address :8080 http://minio{{1...4}}:9000"
        );
        let deb_file = format!("{pkg}_{version}_{}.deb", arch.deb_name());
        let deb_url = format!("{root}/linux-{arch}/{deb_file}");
        let deb_text = format!(
            "wget {deb_url}\ndpkg -i {deb_file}\nsidekick --health-path=/v1/health --address :8080 http://minio{{1...4}}:9000"
        );

        if let Some(entries) = linux.get_mut(display) {
            entries.insert(
                arch.to_string(),
                DownloadEntry {
                    bin: Some(dl(bin_url, bin_text)),
                    rpm: Some(dl(rpm_url, rpm_text)),
                    deb: Some(dl(deb_url, deb_text)),
                    ..Default::default()
                },
            );
        }
    }

    let bin_url = format!("{root}/windows-amd64/sidekick.exe");
    if let Some(entries) = windows.get_mut(display) {
        entries.insert(
            Arch::Amd64.to_string(),
            DownloadEntry {
                bin: Some(dl(
                    bin_url.clone(),
                    format!(
                        "PS> Invoke-WebRequest -Uri \"{bin_url}\" -OutFile \"C:\\sidekick.exe\"\nPS> C:\\sidekick.exe --health-path=/v1/health --address :8080 http://minio{{1...4}}:9000"
                    ),
                )),
                ..Default::default()
            },
        );
    }

    DownloadsManifest {
        kubernetes: None,
        docker: Some(docker),
        linux: Some(linux),
        macos: None,
        windows: Some(windows),
    }
}

fn warp(version: &str, release_tag: &str) -> DownloadsManifest {
    let product = Product::Warp;
    let root = product.download_root(Channel::Stable);
    let display = product.display_name();
    let pkg = product.package_name();
    let image = format!("quay.io/minio/warp:{release_tag}");

    let mut docker = entry_map(product);
    let mut linux = entry_map(product);
    let mut macos = entry_map(product);
    let mut windows = entry_map(product);

    for arch in product.linux_arches() {
        if let Some(entries) = docker.get_mut(display) {
            entries.insert(
                arch.to_string(),
                DownloadEntry {
                    podman: Some(DlInfo {
                        text: format!(
                            "podman run {image} mixed --host minio:9000 --access-key MYUSER --secret-key MYPASSWORD"
                        ),
                        checksum: String::new(),
                        download: image.clone(),
                    }),
                    ..Default::default()
                },
            );
        }

        let bin_url = format!("{root}/linux-{arch}/warp");
        let bin_text = format!(
            "wget {bin_url}\nchmod +x warp\n./warp mixed --host minio:9000 --access-key MYUSER --secret-key MYPASSWORD"
        );
        let rpm_url = format!(
            "{root}/linux-{arch}/{pkg}-{version}.{}.rpm",
            arch.rpm_name()
        );
        let rpm_text = format!(
            "dnf install {rpm_url}\nwarp mixed --host minio:9000 --access-key MYUSER --secret-key MYPASSWORD"
        );
        let deb_file = format!("{pkg}_{version}_{}.deb", arch.deb_name());
        let deb_url = format!("{root}/linux-{arch}/{deb_file}");
        let deb_text = format!(
            "wget {deb_url}\ndpkg -i {deb_file}\nwarp mixed --host minio:9000 --access-key MYUSER --secret-key MYPASSWORD"
        );

        if let Some(entries) = linux.get_mut(display) {
            entries.insert(
                arch.to_string(),
                DownloadEntry {
                    bin: Some(dl(bin_url, bin_text)),
                    rpm: Some(dl(rpm_url, rpm_text)),
                    deb: Some(dl(deb_url, deb_text)),
                    ..Default::default()
                },
            );
        }
    }

    let bin_url = format!("{root}/darwin-arm64/warp");
    if let Some(entries) = macos.get_mut(display) {
        entries.insert(
            Arch::Arm64.to_string(),
            DownloadEntry {
                bin: Some(dl(
                    bin_url.clone(),
                    format!(
                        "curl --progress-bar -O {bin_url}\nchmod +x warp\n./warp mixed --host minio:9000 --access-key MYUSER --secret-key MYPASSWORD"
                    ),
                )),
                ..Default::default()
            },
        );
    }

    let bin_url = format!("{root}/windows-amd64/warp.exe");
    if let Some(entries) = windows.get_mut(display) {
        entries.insert(
            Arch::Amd64.to_string(),
            DownloadEntry {
                bin: Some(dl(
                    bin_url.clone(),
                    format!(
                        "PS> Invoke-WebRequest -Uri \"{bin_url}\" -OutFile \"C:\\warp.exe\"\nPS> C:\\warp.exe mixed --host minio:9000 --access-key MYUSER --secret-key MYPASSWORD"
                    ),
                )),
                ..Default::default()
            },
        );
    }

    DownloadsManifest {
        kubernetes: None,
        docker: Some(docker),
        linux: Some(linux),
        macos: Some(macos),
        windows: Some(windows),
    }
}
