use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use tempfile::tempdir;

const RELEASE_TAG: &str = "RELEASE.2025-03-12T00-00-00Z";
const RELEASE_VERSION: &str = "20250312000000.0.0";

const UNIT_FILE: &str = "[Unit]\nDescription=MinIO\n\n[Service]\nExecStart=/usr/local/bin/minio server $MINIO_OPTS\n";

fn pkger() -> Command {
    Command::cargo_bin("pkger").unwrap()
}

/// Lay out a fake prebuilt binary the way the build pipeline does.
fn stage_binary(root: &std::path::Path, release_dir: &str, binary: &str, tag: &str, arch: &str) {
    let dir = root.join(release_dir).join(format!("linux-{arch}"));
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(
        dir.join(format!("{binary}.{tag}")),
        b"#!/bin/sh\necho fake binary\n",
    )
    .unwrap();
}

#[test]
fn test_cli_help() {
    pkger()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage:"));
}

#[test]
fn test_cli_version() {
    pkger()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_release_flag_is_required() {
    pkger().assert().failure();
}

#[test]
fn test_invalid_release_tag_fails() {
    let dir = tempdir().unwrap();
    pkger()
        .current_dir(dir.path())
        .args(["-a", "mc", "-r", "2025-03-12T00-00-00Z"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid release tag"));
}

#[test]
fn test_minio_requires_unit_file() {
    let dir = tempdir().unwrap();
    stage_binary(dir.path(), "minio-release", "minio", RELEASE_TAG, "amd64");
    pkger()
        .current_dir(dir.path())
        .args(["-r", RELEASE_TAG])
        .assert()
        .failure()
        .stderr(predicate::str::contains("minio.service"));
}

#[test]
fn test_minio_full_run_emits_packages_checksums_and_manifest() {
    let dir = tempdir().unwrap();
    std::fs::write(dir.path().join("minio.service"), UNIT_FILE).unwrap();
    stage_binary(dir.path(), "minio-release", "minio", RELEASE_TAG, "amd64");

    pkger()
        .current_dir(dir.path())
        .args(["-a", "minio", "-r", RELEASE_TAG, "-p", "deb,rpm,apk"])
        .assert()
        .success();

    let arch_dir = dir.path().join("minio-release").join("linux-amd64");
    let deb = arch_dir.join(format!("minio_{RELEASE_VERSION}_amd64.deb"));
    let rpm = arch_dir.join(format!("minio-{RELEASE_VERSION}.x86_64.rpm"));
    let apk = arch_dir.join(format!("minio_{RELEASE_VERSION}_x86_64.apk"));
    assert!(deb.exists());
    assert!(rpm.exists());
    assert!(apk.exists());

    // Checksum sidecar: "<hex>  <filename>"
    let sidecar =
        std::fs::read_to_string(arch_dir.join(format!("minio_{RELEASE_VERSION}_amd64.deb.sha256sum")))
            .unwrap();
    let (digest, file_name) = sidecar.split_once("  ").unwrap();
    assert_eq!(digest.len(), 64);
    assert!(digest.chars().all(|c| c.is_ascii_hexdigit()));
    assert_eq!(file_name, format!("minio_{RELEASE_VERSION}_amd64.deb"));

    // Convenience symlinks point at the versioned artifacts.
    #[cfg(unix)]
    {
        let link = std::fs::read_link(arch_dir.join("minio.deb")).unwrap();
        assert_eq!(link, std::path::PathBuf::from(format!("minio_{RELEASE_VERSION}_amd64.deb")));
        assert!(arch_dir.join("minio.rpm").exists());
        assert!(arch_dir.join("minio.apk").exists());
    }

    // Architectures without a staged binary are skipped, not failed.
    assert!(!dir.path().join("minio-release/linux-arm64").exists());

    let manifest: Value = serde_json::from_slice(
        &std::fs::read(dir.path().join("minio-release/downloads-minio.json")).unwrap(),
    )
    .unwrap();
    assert_eq!(
        manifest["Linux"]["MinIO Server"]["amd64"]["Binary"]["download"],
        "https://dl.min.io/server/minio/release/linux-amd64/minio"
    );
    assert_eq!(
        manifest["Linux"]["MinIO Server"]["amd64"]["DEB"]["download"],
        format!("https://dl.min.io/server/minio/release/linux-amd64/minio_{RELEASE_VERSION}_amd64.deb")
    );
    // The manifest covers every published architecture, staged or not.
    assert!(manifest["Linux"]["MinIO Server"]["ppc64le"].is_object());
    assert!(manifest["macOS"]["MinIO Server"]["arm64"]["Homebrew"].is_object());
}

#[test]
fn test_mc_packages_use_mcli_name() {
    let dir = tempdir().unwrap();
    stage_binary(dir.path(), "mc-release", "mc", RELEASE_TAG, "arm64");

    pkger()
        .current_dir(dir.path())
        .args(["-a", "mc", "-r", RELEASE_TAG, "-p", "deb"])
        .assert()
        .success();

    let arch_dir = dir.path().join("mc-release").join("linux-arm64");
    assert!(arch_dir.join(format!("mcli_{RELEASE_VERSION}_arm64.deb")).exists());

    let manifest: Value = serde_json::from_slice(
        &std::fs::read(dir.path().join("mc-release/downloads-mc.json")).unwrap(),
    )
    .unwrap();
    let rpm_url = manifest["Linux"]["MinIO Client"]["amd64"]["RPM"]["download"]
        .as_str()
        .unwrap();
    assert!(rpm_url.contains("mcli-"), "{rpm_url}");
}

#[test]
fn test_warp_semver_release() {
    let dir = tempdir().unwrap();
    stage_binary(dir.path(), "warp-release", "warp", "v0.4.3", "amd64");

    pkger()
        .current_dir(dir.path())
        .args(["-a", "warp", "-r", "v0.4.3", "-p", "deb,rpm"])
        .assert()
        .success();

    let arch_dir = dir.path().join("warp-release").join("linux-amd64");
    assert!(arch_dir.join("warp_0.4.3_amd64.deb").exists());
    assert!(arch_dir.join("warp-0.4.3.x86_64.rpm").exists());

    let manifest: Value = serde_json::from_slice(
        &std::fs::read(dir.path().join("warp-release/downloads-warp.json")).unwrap(),
    )
    .unwrap();
    assert!(manifest["Kubernetes"].is_null());
    assert!(manifest["macOS"]["MinIO Warp"]["arm64"].is_object());
    let rpm_url = manifest["Linux"]["MinIO Warp"]["amd64"]["RPM"]["download"]
        .as_str()
        .unwrap();
    assert!(!rpm_url.contains("v0.4.3"), "{rpm_url}");
}

#[test]
fn test_warp_rejects_timestamp_tags() {
    let dir = tempdir().unwrap();
    pkger()
        .current_dir(dir.path())
        .args(["-a", "warp", "-r", RELEASE_TAG])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid release tag"));
}

#[test]
fn test_enterprise_edge_manifest() {
    let dir = tempdir().unwrap();
    std::fs::write(dir.path().join("minio.service"), UNIT_FILE).unwrap();
    // No binaries staged: every architecture is skipped but the manifest is
    // still written.
    pkger()
        .current_dir(dir.path())
        .args(["-a", "minio-enterprise", "-r", "EDGE.2025-10-10T05-28-23Z"])
        .assert()
        .success();

    let manifest: Value = serde_json::from_slice(
        &std::fs::read(
            dir.path()
                .join("minio-release/downloads-minio-enterprise.json"),
        )
        .unwrap(),
    )
    .unwrap();
    let enterprise = &manifest["Subscriptions"]["Enterprise"];
    let bin_url = enterprise["Linux"]["AIStor Server"]["amd64"]["Binary"]["download"]
        .as_str()
        .unwrap();
    assert!(
        bin_url.starts_with("https://dl.min.io/aistor/minio/edge/"),
        "{bin_url}"
    );
    let podman_text = enterprise["Docker"]["AIStor Server"]["amd64"]["Podman"]["text"]
        .as_str()
        .unwrap();
    assert!(podman_text.contains("EDGE.2025-10-10T05-28-23Z"), "{podman_text}");
    assert!(!podman_text.contains(":latest"), "{podman_text}");
}

#[test]
fn test_hotfix_tag_version_carries_suffix() {
    let dir = tempdir().unwrap();
    let tag = "RELEASE.2025-03-12T00-00-00Z.hotfix.1";
    stage_binary(dir.path(), "mc-release", "mc", tag, "amd64");

    pkger()
        .current_dir(dir.path())
        .args(["-a", "mc", "-r", tag, "-p", "apk"])
        .assert()
        .success();

    assert!(
        dir.path()
            .join("mc-release/linux-amd64")
            .join(format!("mcli_{RELEASE_VERSION}.hotfix.1_x86_64.apk"))
            .exists()
    );
}

#[cfg(unix)]
#[test]
fn test_no_symlink_flag() {
    let dir = tempdir().unwrap();
    stage_binary(dir.path(), "sidekick-release", "sidekick", RELEASE_TAG, "amd64");

    pkger()
        .current_dir(dir.path())
        .args(["-a", "sidekick", "-r", RELEASE_TAG, "-p", "deb", "--no-symlink"])
        .assert()
        .success();

    let arch_dir = dir.path().join("sidekick-release").join("linux-amd64");
    assert!(arch_dir.join(format!("sidekick_{RELEASE_VERSION}_amd64.deb")).exists());
    assert!(!arch_dir.join("sidekick.deb").exists());
}
