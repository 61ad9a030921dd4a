use kndeploy_core::{BuildStrategy, KndeployConfig};
use std::path::PathBuf;
use tempfile::TempDir;

#[test]
fn load_returns_defaults_when_no_config_file() {
    let tmp = TempDir::new().unwrap();
    let config = KndeployConfig::load(tmp.path()).unwrap();

    assert_eq!(config.tools.docker, "docker");
    assert_eq!(config.tools.pack, "pack");
    assert_eq!(config.tools.kubectl, "kubectl");
    assert_eq!(config.build.strategy, BuildStrategy::Auto);
    assert_eq!(
        config.build.builder_image,
        "paketobuildpacks/builder-jammy-base"
    );
    assert!(config.cluster.context.is_none());
    assert!(config.cluster.namespace.is_none());
    assert!(config.log.file.is_none());
}

#[test]
fn load_parses_full_config() {
    let tmp = TempDir::new().unwrap();
    let toml = r#"
[tools]
docker = "podman"
pack = "/opt/bin/pack"
kubectl = "oc"

[build]
strategy = "pack"
builder_image = "gcr.io/buildpacks/builder:v1"

[cluster]
context = "kind-dev"
namespace = "apps"

[log]
file = ".kndeploy/transcript.log"
"#;
    std::fs::write(tmp.path().join("kndeploy.toml"), toml).unwrap();

    let config = KndeployConfig::load(tmp.path()).unwrap();

    assert_eq!(config.tools.docker, "podman");
    assert_eq!(config.tools.pack, "/opt/bin/pack");
    assert_eq!(config.tools.kubectl, "oc");
    assert_eq!(config.build.strategy, BuildStrategy::Pack);
    assert_eq!(config.build.builder_image, "gcr.io/buildpacks/builder:v1");
    assert_eq!(config.cluster.context.as_deref(), Some("kind-dev"));
    assert_eq!(config.cluster.namespace.as_deref(), Some("apps"));
    assert_eq!(
        config.log.file,
        Some(PathBuf::from(".kndeploy/transcript.log"))
    );
}

#[test]
fn load_partial_config_fills_defaults() {
    let tmp = TempDir::new().unwrap();
    let toml = r#"
[build]
strategy = "docker"
"#;
    std::fs::write(tmp.path().join("kndeploy.toml"), toml).unwrap();

    let config = KndeployConfig::load(tmp.path()).unwrap();

    assert_eq!(config.build.strategy, BuildStrategy::Docker);
    assert_eq!(
        config.build.builder_image,
        "paketobuildpacks/builder-jammy-base"
    );
    assert_eq!(config.tools.docker, "docker");
    assert_eq!(config.tools.kubectl, "kubectl");
}

#[test]
fn load_empty_file_gives_defaults() {
    let tmp = TempDir::new().unwrap();
    std::fs::write(tmp.path().join("kndeploy.toml"), "").unwrap();

    let config = KndeployConfig::load(tmp.path()).unwrap();
    assert_eq!(config.build.strategy, BuildStrategy::Auto);
}

#[test]
fn load_rejects_unknown_strategy() {
    let tmp = TempDir::new().unwrap();
    std::fs::write(
        tmp.path().join("kndeploy.toml"),
        "[build]\nstrategy = \"kaniko\"\n",
    )
    .unwrap();

    let err = KndeployConfig::load(tmp.path()).unwrap_err();
    assert!(err.to_string().contains("failed to parse config"));
}

#[test]
fn load_rejects_invalid_toml() {
    let tmp = TempDir::new().unwrap();
    std::fs::write(tmp.path().join("kndeploy.toml"), "[tools\ndocker =").unwrap();

    let result = KndeployConfig::load(tmp.path());
    assert!(matches!(
        result,
        Err(kndeploy_core::Error::ConfigParse { .. })
    ));
}

// ── Strategy resolution ──

#[test]
fn auto_strategy_uses_pack_on_aarch64() {
    assert_eq!(BuildStrategy::Auto.resolve("aarch64"), BuildStrategy::Pack);
}

#[test]
fn auto_strategy_uses_docker_elsewhere() {
    assert_eq!(BuildStrategy::Auto.resolve("x86_64"), BuildStrategy::Docker);
    assert_eq!(BuildStrategy::Auto.resolve("riscv64"), BuildStrategy::Docker);
}

#[test]
fn explicit_strategy_ignores_architecture() {
    assert_eq!(BuildStrategy::Docker.resolve("aarch64"), BuildStrategy::Docker);
    assert_eq!(BuildStrategy::Pack.resolve("x86_64"), BuildStrategy::Pack);
}
