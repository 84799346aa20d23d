use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use tempfile::TempDir;

fn create_gallery(root: &Path) -> PathBuf {
    fs::create_dir_all(root.join("glsl")).unwrap();
    fs::write(
        root.join("glsl/rings.glsl"),
        "void main(){vec2 p=(FC.xy*2.-r)/r.y;o=vec4(length(p)-t);}",
    )
    .unwrap();
    fs::write(
        root.join("glsl/plasma.glsl"),
        "void mainImage(out vec4 c, in vec2 p){c=vec4(sin(iTime));}",
    )
    .unwrap();

    let manifest = root.join("gallery.toml");
    fs::write(
        &manifest,
        r#"
title = "Fixture"

[[shader]]
name = "Rings"
source = "glsl/rings.glsl"

[[shader]]
name = "Plasma"
source = "glsl/plasma.glsl"
"#,
    )
    .unwrap();
    manifest
}

#[test]
fn list_prints_entries_with_dialects() {
    let root = TempDir::new().unwrap();
    let manifest = create_gallery(root.path());

    let output = Command::new(env!("CARGO_BIN_EXE_shadergallery"))
        .env_remove("SHADERGALLERY_MANIFEST")
        .arg("list")
        .arg("--manifest")
        .arg(&manifest)
        .output()
        .expect("failed to run shadergallery list");

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines[0], "Fixture");
    assert!(lines[1].contains("legacy") && lines[1].ends_with("Rings"));
    assert!(lines[2].contains("standard") && lines[2].ends_with("Plasma"));
}

#[test]
fn list_reads_manifest_from_environment() {
    let root = TempDir::new().unwrap();
    let manifest = create_gallery(root.path());

    let output = Command::new(env!("CARGO_BIN_EXE_shadergallery"))
        .env("SHADERGALLERY_MANIFEST", &manifest)
        .arg("list")
        .output()
        .expect("failed to run shadergallery list");

    assert!(output.status.success());
    assert!(String::from_utf8(output.stdout).unwrap().contains("Plasma"));
}

#[test]
fn list_fails_when_a_source_is_missing() {
    let root = TempDir::new().unwrap();
    let manifest = create_gallery(root.path());
    fs::remove_file(root.path().join("glsl/plasma.glsl")).unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_shadergallery"))
        .env_remove("SHADERGALLERY_MANIFEST")
        .args(["list", "--manifest"])
        .arg(&manifest)
        .output()
        .expect("failed to run shadergallery list");

    assert!(!output.status.success());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("plasma.glsl"));
}

#[test]
fn bundled_gallery_lists_every_entry() {
    let manifest = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../shaders/gallery.toml");

    let output = Command::new(env!("CARGO_BIN_EXE_shadergallery"))
        .env_remove("SHADERGALLERY_MANIFEST")
        .arg("list")
        .arg("--manifest")
        .arg(&manifest)
        .output()
        .expect("failed to run shadergallery list");

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 7);
    assert!(stdout.contains("Psychedelic Fractal"));
    assert!(stdout.contains("Accretion"));

    let plasma: Vec<&&str> = lines.iter().filter(|line| line.ends_with("Plasma")).collect();
    assert_eq!(plasma.len(), 2);
    assert!(plasma[0].contains("standard"));
    assert!(plasma[1].contains("legacy"));
}
