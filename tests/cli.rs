//! Tests for the registry validator command-line interface

use std::{
    fs,
    path::Path,
    process::{Command, Output},
    str,
};
use tempfile::TempDir;

/// Path to the validator executable
const EXE_PATH: &str = env!("CARGO_BIN_EXE_chainreg");

/// Run the `chainreg` CLI command with the given arguments
fn run(current_dir: &Path, envs: &[(&str, &str)], args: &[&str]) -> Output {
    Command::new(EXE_PATH)
        .current_dir(current_dir)
        .envs(envs.iter().copied())
        .args(args)
        .output()
        .unwrap()
}

#[test]
fn version_prints_package_version() {
    let dir = TempDir::new().unwrap();
    let result = run(dir.path(), &[], &["version"]);

    assert!(result.status.success());
    let stdout = str::from_utf8(&result.stdout).unwrap().trim().to_owned();
    assert_eq!(stdout, option_env!("CARGO_PKG_VERSION").unwrap_or("unknown"));
}

#[test]
fn empty_registry_validates_cleanly() {
    let registry = TempDir::new().unwrap();
    fs::create_dir_all(registry.path().join("cosmos")).unwrap();

    let outputs = registry.path().join("outputs.txt");
    let result = run(
        registry.path(),
        &[("GITHUB_OUTPUT", outputs.to_str().unwrap())],
        &["validate"],
    );

    assert!(result.status.success());
    let recorded = fs::read_to_string(&outputs).unwrap();
    assert!(recorded.contains("hasError=false"));
}

#[test]
fn failing_registry_exits_nonzero_and_records_outputs() {
    let registry = TempDir::new().unwrap();
    let cosmos = registry.path().join("cosmos");
    fs::create_dir_all(&cosmos).unwrap();
    fs::write(cosmos.join("README.md"), "not a descriptor").unwrap();

    let outputs = registry.path().join("outputs.txt");
    let result = run(
        registry.path(),
        &[("GITHUB_OUTPUT", outputs.to_str().unwrap())],
        &["validate"],
    );

    assert!(!result.status.success());

    let stderr = str::from_utf8(&result.stderr).unwrap();
    assert!(stderr.contains("error on cosmos/README.md"));

    let recorded = fs::read_to_string(&outputs).unwrap();
    assert!(recorded.contains("hasError=true"));
    assert!(recorded.contains("errorMessage=cosmos/README.md:"));
}

#[test]
fn registry_root_comes_from_config_file() {
    let registry = TempDir::new().unwrap();
    let cosmos = registry.path().join("registry/cosmos");
    fs::create_dir_all(&cosmos).unwrap();
    fs::write(cosmos.join("stray.yaml"), "also not a descriptor").unwrap();

    let config_path = registry.path().join("chainreg.toml");
    fs::write(
        &config_path,
        format!(
            "[registry]\nroot = \"{}\"\n",
            registry.path().join("registry").display()
        ),
    )
    .unwrap();

    let result = run(
        registry.path(),
        &[],
        &["validate", "-c", config_path.to_str().unwrap()],
    );

    assert!(!result.status.success());
    let stderr = str::from_utf8(&result.stderr).unwrap();
    assert!(stderr.contains("cosmos/stray.yaml"));
}
