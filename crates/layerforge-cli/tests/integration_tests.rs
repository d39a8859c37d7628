//! End-to-end tests for the `layerforge` binary.

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use tempfile::TempDir;

/// Binary isolated from the user's config, `.env` and log settings.
fn layerforge(dir: &Path) -> Command {
    let mut cmd = cargo_bin_cmd!("layerforge");
    cmd.current_dir(dir)
        .env("HOME", dir)
        .env("XDG_CONFIG_HOME", dir.join(".config"))
        .env_remove("NO_COLOR")
        .env_remove("RUST_LOG")
        .arg("--no-color");
    cmd
}

fn component_dirs(root: &Path) -> Vec<std::path::PathBuf> {
    match fs::read_dir(root) {
        Ok(entries) => entries.filter_map(Result::ok).map(|e| e.path()).collect(),
        Err(_) => Vec::new(),
    }
}

#[test]
fn help_lists_commands() {
    let temp = TempDir::new().unwrap();
    layerforge(temp.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("create"))
        .stdout(predicate::str::contains("classify"))
        .stdout(predicate::str::contains("layers"));
}

#[test]
fn version_flag() {
    let temp = TempDir::new().unwrap();
    layerforge(temp.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn quiet_and_verbose_conflict() {
    let temp = TempDir::new().unwrap();
    layerforge(temp.path())
        .args(["--quiet", "--verbose", "layers"])
        .assert()
        .code(2);
}

#[test]
fn layers_lists_the_registry() {
    let temp = TempDir::new().unwrap();
    layerforge(temp.path())
        .arg("layers")
        .assert()
        .success()
        .stdout(predicate::str::contains("atom"))
        .stdout(predicate::str::contains("repositories"));
}

#[test]
fn templates_filter_by_layer() {
    let temp = TempDir::new().unwrap();
    layerforge(temp.path())
        .args(["templates", "--layer", "atoms"])
        .assert()
        .success()
        .stdout(predicate::str::contains("atom-basic"))
        .stdout(predicate::str::contains("molecule-basic").not());
}

#[test]
fn classify_simple_button() {
    let temp = TempDir::new().unwrap();
    layerforge(temp.path())
        .args(["classify", "um botão simples com ícone"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Atom"));
}

#[test]
fn classify_json_is_machine_readable() {
    let temp = TempDir::new().unwrap();
    let assert = layerforge(temp.path())
        .args(["--output-format", "json", "classify", "um botão simples com ícone"])
        .assert()
        .success();

    let value: serde_json::Value = serde_json::from_slice(&assert.get_output().stdout).unwrap();
    assert_eq!(value["classification"]["primary"]["layer"], "atom");
    assert!(value["naming"]["primary"].is_string());
}

#[test]
fn create_dry_run_writes_nothing() {
    let temp = TempDir::new().unwrap();
    layerforge(temp.path())
        .args(["create", "um botão simples com ícone", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Dry run"));

    assert!(!temp.path().join("src").exists());
}

#[test]
fn create_writes_component_files() {
    let temp = TempDir::new().unwrap();
    layerforge(temp.path())
        .args(["create", "um botão simples com ícone", "-o", "out"])
        .assert()
        .success()
        .stdout(predicate::str::contains("created"));

    let dirs = component_dirs(&temp.path().join("out").join("atoms"));
    assert_eq!(dirs.len(), 1, "{dirs:?}");
    assert!(dirs[0].join("index.ts").is_file());
}

#[test]
fn second_create_reports_existing_component() {
    let temp = TempDir::new().unwrap();
    let args = ["create", "modal de confirmação reutilizável", "-o", "out"];
    layerforge(temp.path()).args(args).assert().success();

    layerforge(temp.path())
        .args(args)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn blank_description_is_a_user_error() {
    let temp = TempDir::new().unwrap();
    layerforge(temp.path())
        .args(["create", "   ", "--dry-run"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Error:"));
}

#[test]
fn create_json_reports_written_files() {
    let temp = TempDir::new().unwrap();
    let assert = layerforge(temp.path())
        .args([
            "--output-format",
            "json",
            "create",
            "utilitario para formatar moeda",
            "-o",
            "out",
        ])
        .assert()
        .success();

    let value: serde_json::Value = serde_json::from_slice(&assert.get_output().stdout).unwrap();
    assert_eq!(value["success"], true);
    assert!(!value["writtenFiles"].as_array().unwrap().is_empty());
}

#[test]
fn environment_sets_output_dir() {
    let temp = TempDir::new().unwrap();
    layerforge(temp.path())
        .env("LAYERFORGE__GENERATION__OUTPUT_DIR", "app")
        .args(["create", "um botão simples com ícone"])
        .assert()
        .success();

    assert_eq!(component_dirs(&temp.path().join("app").join("atoms")).len(), 1);
}

#[test]
fn config_file_sets_naming_prefix() {
    let temp = TempDir::new().unwrap();
    fs::write(
        temp.path().join(".layerforge.toml"),
        "[naming]\nprefix = \"wallet\"\n",
    )
    .unwrap();

    layerforge(temp.path())
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("prefix = \"wallet\""));
}

#[test]
fn missing_config_file_exits_with_four() {
    let temp = TempDir::new().unwrap();
    layerforge(temp.path())
        .args(["--config", "nope.toml", "layers"])
        .assert()
        .code(4);
}

#[test]
fn batch_isolates_failures() {
    let temp = TempDir::new().unwrap();
    layerforge(temp.path())
        .args(["batch", "um botão simples com ícone", "   ", "--dry-run"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("1 of 2 components failed"));
}

#[test]
fn batch_reads_description_file() {
    let temp = TempDir::new().unwrap();
    fs::write(
        temp.path().join("components.txt"),
        "# ui\num botão simples com ícone\nmodal de confirmação reutilizável\n",
    )
    .unwrap();

    layerforge(temp.path())
        .args(["batch", "--file", "components.txt", "-o", "out"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2 created, 0 failed"));

    assert_eq!(component_dirs(&temp.path().join("out").join("atoms")).len(), 1);
    assert_eq!(component_dirs(&temp.path().join("out").join("molecules")).len(), 1);
}

#[test]
fn completions_use_binary_name() {
    let temp = TempDir::new().unwrap();
    layerforge(temp.path())
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("layerforge"));
}

#[test]
fn config_path_is_printed() {
    let temp = TempDir::new().unwrap();
    layerforge(temp.path())
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config.toml"));
}
