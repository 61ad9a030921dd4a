use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::path::Path;
use tempfile::TempDir;

fn kndeploy() -> assert_cmd::Command {
    cargo_bin_cmd!("kndeploy")
}

/// Project dir whose tools are stand-ins: `true` always succeeds, `false`
/// always fails.
fn project_with_tools(docker: &str, kubectl: &str) -> TempDir {
    let tmp = TempDir::new().unwrap();
    std::fs::write(
        tmp.path().join("kndeploy.toml"),
        format!(
            "[tools]\ndocker = \"{docker}\"\nkubectl = \"{kubectl}\"\n\n[build]\nstrategy = \"docker\"\n"
        ),
    )
    .unwrap();
    std::fs::write(tmp.path().join("app.py"), "print('hi')\n").unwrap();
    tmp
}

fn deploy_in(dir: &Path) -> assert_cmd::Command {
    let mut cmd = kndeploy();
    cmd.current_dir(dir)
        .args(["deploy", "--registry", "reg", "--image", "img"]);
    cmd
}

// ── Help / Version ──

#[test]
fn shows_help() {
    kndeploy()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Knative service"));
}

#[test]
fn shows_version() {
    kndeploy()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("kndeploy"));
}

// ── Ping ──

#[test]
fn ping_always_succeeds() {
    let tmp = TempDir::new().unwrap();
    // A broken config must not matter.
    std::fs::write(tmp.path().join("kndeploy.toml"), "not = [valid").unwrap();

    kndeploy()
        .current_dir(tmp.path())
        .env_remove("RUST_LOG")
        .arg("ping")
        .assert()
        .success()
        .stdout(predicate::str::contains("kndeploy is up"))
        .stderr(predicate::str::contains("kndeploy is up"));
}

// ── New ──

#[test]
fn new_scaffolds_sample_app() {
    let tmp = TempDir::new().unwrap();

    kndeploy()
        .current_dir(tmp.path())
        .args(["new", "sentiment"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created project"));

    assert!(tmp.path().join("sentiment/app.py").exists());
    assert!(tmp.path().join("sentiment/requirements.txt").exists());
}

#[test]
fn new_fails_if_directory_exists() {
    let tmp = TempDir::new().unwrap();
    std::fs::create_dir(tmp.path().join("existing")).unwrap();

    kndeploy()
        .current_dir(tmp.path())
        .args(["new", "existing"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

// ── Deploy: input ──

#[test]
fn deploy_empty_registry_prompt_aborts_before_writing() {
    let tmp = project_with_tools("true", "true");

    kndeploy()
        .current_dir(tmp.path())
        .arg("deploy")
        .write_stdin("\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("registry name is required"));

    assert!(!tmp.path().join("Dockerfile").exists());
}

#[test]
fn deploy_blank_image_flag_aborts_before_writing() {
    let tmp = project_with_tools("true", "true");

    kndeploy()
        .current_dir(tmp.path())
        .args(["deploy", "--registry", "reg", "--image", "   "])
        .assert()
        .failure()
        .stderr(predicate::str::contains("image name is required"));

    assert!(!tmp.path().join("Dockerfile").exists());
}

#[test]
fn deploy_reads_names_from_prompts() {
    let tmp = project_with_tools("true", "true");

    kndeploy()
        .current_dir(tmp.path())
        .arg("deploy")
        .write_stdin("reg\nimg\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Deployed service: img-service"));
}

// ── Deploy: pipeline ──

#[test]
fn deploy_without_project_root_fails() {
    let tmp = TempDir::new().unwrap();

    kndeploy()
        .current_dir(tmp.path())
        .args([
            "deploy",
            "--project-dir",
            "missing",
            "--registry",
            "reg",
            "--image",
            "img",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no project root"));

    assert!(!tmp.path().join("missing").exists());
}

#[test]
fn deploy_success_writes_both_artifacts() {
    let tmp = project_with_tools("true", "true");

    deploy_in(tmp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Deployed service: img-service"));

    let dockerfile = std::fs::read_to_string(tmp.path().join("Dockerfile")).unwrap();
    assert!(dockerfile.starts_with("FROM python:3.8-slim\n"));
    let manifest = std::fs::read_to_string(tmp.path().join("img-service.yaml")).unwrap();
    assert!(manifest.contains("image: reg/img"));
}

#[test]
fn deploy_build_failure_stops_before_manifest() {
    let tmp = project_with_tools("false", "true");

    deploy_in(tmp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("build failed"));

    assert!(tmp.path().join("Dockerfile").exists());
    assert!(!tmp.path().join("img-service.yaml").exists());
}

#[test]
fn deploy_apply_failure_keeps_artifacts() {
    let tmp = project_with_tools("true", "false");

    deploy_in(tmp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("apply failed"));

    assert!(tmp.path().join("Dockerfile").exists());
    assert!(tmp.path().join("img-service.yaml").exists());
}

#[test]
fn deploy_with_missing_tool_names_it() {
    let tmp = project_with_tools("kndeploy-no-such-docker", "true");

    deploy_in(tmp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("kndeploy-no-such-docker"));
}

#[test]
fn deploy_appends_transcript_file() {
    let tmp = project_with_tools("true", "false");
    let config = std::fs::read_to_string(tmp.path().join("kndeploy.toml")).unwrap();
    std::fs::write(
        tmp.path().join("kndeploy.toml"),
        format!("{config}\n[log]\nfile = \"logs/transcript.log\"\n"),
    )
    .unwrap();

    deploy_in(tmp.path()).assert().failure();

    let transcript = std::fs::read_to_string(tmp.path().join("logs/transcript.log")).unwrap();
    assert!(transcript.contains("$ true build -t reg/img ."));
    assert!(transcript.contains("$ true push reg/img"));
    assert!(transcript.contains("$ false apply -f"));
    assert!(transcript.contains("error: apply failed"));
}

// ── Describe / List / Delete ──

#[test]
fn describe_empty_name_aborts() {
    let tmp = project_with_tools("true", "true");

    kndeploy()
        .current_dir(tmp.path())
        .arg("describe")
        .write_stdin("   \n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("service name is required"));
}

#[test]
fn describe_query_failure_is_reported() {
    let tmp = project_with_tools("true", "false");

    kndeploy()
        .current_dir(tmp.path())
        .args(["describe", "img-service"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("service query failed"));
}

#[test]
fn list_query_failure_is_reported() {
    let tmp = project_with_tools("true", "false");

    kndeploy()
        .current_dir(tmp.path())
        .arg("list")
        .assert()
        .failure()
        .stderr(predicate::str::contains("service query failed"));
}

#[test]
fn delete_failure_is_reported() {
    let tmp = project_with_tools("true", "false");

    kndeploy()
        .current_dir(tmp.path())
        .args(["delete", "img-service"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("service deletion failed"));
}

#[test]
fn delete_success() {
    let tmp = project_with_tools("true", "true");

    kndeploy()
        .current_dir(tmp.path())
        .args(["delete", "img-service"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted service 'img-service'"));
}
