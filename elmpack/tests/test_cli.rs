// Allow deprecated APIs (assert_cmd::cargo_bin is deprecated but still works)
#![allow(deprecated)]

use assert_cmd::prelude::*; // Add methods on commands
use predicates::prelude::*; // Used for writing assertions
use rstest::rstest;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command; // Run programs
use tempfile::{tempdir, TempDir};

fn fixture_path(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("elmpack-rs")
        .join("tests")
        .join("fixtures")
        .join(name)
}

/// Lays out a project directory the way the build expects it:
/// `build-generated/` with the metadata and Elm output, `public/` with the starter.
fn project_dir(bundle: &str) -> Result<TempDir, Box<dyn std::error::Error>> {
    let temp = tempdir()?;
    let generated = temp.path().join("build-generated");
    let public = temp.path().join("public");
    fs::create_dir_all(&generated)?;
    fs::create_dir_all(&public)?;
    fs::copy(
        fixture_path("GENERATED-meta.js"),
        generated.join("GENERATED-meta.js"),
    )?;
    fs::write(generated.join("Allocator.js"), bundle)?;
    fs::copy(
        fixture_path("allocator-starter.js"),
        public.join("allocator-starter.js"),
    )?;
    Ok(temp)
}

fn allocator_bundle() -> String {
    fs::read_to_string(fixture_path("Allocator.js")).unwrap()
}

#[test]
fn test_cli_writes_minified_script() -> Result<(), Box<dyn std::error::Error>> {
    let temp = project_dir(&allocator_bundle())?;

    Command::cargo_bin("elmpack")?
        .current_dir(temp.path())
        .arg("Allocator")
        .arg("2.4.0")
        .arg("release build")
        .arg("Allocator.js")
        .arg("allocator-starter.js")
        .arg("allocator.min.js")
        .assert()
        .success();

    let output = fs::read_to_string(temp.path().join("build-generated").join("allocator.min.js"))?;
    assert!(output.starts_with("/***\n *\n *  Allocator v.2.4.0\n *\n *  release build\n"));
    assert!(output.contains("Copyright (c) 2025"));
    assert!(output.contains("allocator-app"));
    Ok(())
}

#[test]
fn test_cli_without_copyright() -> Result<(), Box<dyn std::error::Error>> {
    let temp = project_dir(&allocator_bundle())?;

    Command::cargo_bin("elmpack")?
        .current_dir(temp.path())
        .args([
            "Allocator",
            "2.4.0",
            "release build",
            "Allocator.js",
            "allocator-starter.js",
            "allocator.min.js",
            "--no-copyright",
        ])
        .assert()
        .success();

    let output = fs::read_to_string(temp.path().join("build-generated").join("allocator.min.js"))?;
    assert!(output.contains("Allocator v2.4.0"));
    assert!(!output.contains("Copyright"));
    Ok(())
}

#[test]
fn test_cli_custom_directories() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempdir()?;
    let generated = temp.path().join("generated");
    let web = temp.path().join("web");
    fs::create_dir_all(&generated)?;
    fs::create_dir_all(&web)?;
    fs::write(generated.join("meta.js"), "var allocator = { meta: {} }")?;
    fs::write(generated.join("Main.js"), "(function(scope){scope.Elm = { Main: {} };}(this));")?;
    fs::write(web.join("start.js"), "console.log(Elm.Main, allocator.meta);")?;

    Command::cargo_bin("elmpack")?
        .current_dir(temp.path())
        .args(["Main", "1.0", "info", "Main.js", "start.js", "main.min.js"])
        .arg("--generated-dir")
        .arg(&generated)
        .arg("--public-dir")
        .arg(&web)
        .arg("--meta-file")
        .arg("meta.js")
        .arg("--global-object")
        .arg("globalThis")
        .assert()
        .success();

    let output = fs::read_to_string(generated.join("main.min.js"))?;
    assert!(output.contains("globalThis"));
    Ok(())
}

#[rstest]
#[case::malformed_bundle("(function(scope){ var a = 1;", "Malformed bundle shape")]
#[case::syntax_error("(function(scope){ var = ; }(this));", "SyntaxError")]
#[case::newer_syntax("(function(scope){ scope.Elm = a ?? b; }(this));", "Unsupported syntax")]
fn test_cli_fails_without_output(
    #[case] bundle: &str,
    #[case] message: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let temp = project_dir(bundle)?;

    Command::cargo_bin("elmpack")?
        .current_dir(temp.path())
        .args([
            "Allocator",
            "2.4.0",
            "release build",
            "Allocator.js",
            "allocator-starter.js",
            "allocator.min.js",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains(message));

    assert!(!temp
        .path()
        .join("build-generated")
        .join("allocator.min.js")
        .exists());
    Ok(())
}

#[test]
fn test_cli_missing_starter() -> Result<(), Box<dyn std::error::Error>> {
    let temp = project_dir(&allocator_bundle())?;

    Command::cargo_bin("elmpack")?
        .current_dir(temp.path())
        .args([
            "Allocator",
            "2.4.0",
            "release build",
            "Allocator.js",
            "missing-starter.js",
            "allocator.min.js",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read input file"));

    Ok(())
}
