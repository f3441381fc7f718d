//! Structural tests for layer boundary enforcement.
//!
//! These tests scan source files to verify that the domain and application
//! layers stay free of infrastructure and presentation imports.

use std::path::{Path, PathBuf};

/// Collect all `.rs` files under a directory recursively.
fn collect_rs_files(dir: &Path) -> Vec<PathBuf> {
    let mut files = Vec::new();
    if let Ok(entries) = std::fs::read_dir(dir) {
        for entry in entries.flatten() {
            let path = entry.path();
            if path.is_dir() {
                files.extend(collect_rs_files(&path));
            } else if path.extension().and_then(|e| e.to_str()) == Some("rs") {
                files.push(path);
            }
        }
    }
    files
}

/// Read a file and strip comment lines to avoid false positives.
fn read_non_comment_lines(path: &Path) -> Vec<String> {
    let Ok(content) = std::fs::read_to_string(path) else {
        return Vec::new();
    };
    content
        .lines()
        .filter(|l| {
            let trimmed = l.trim();
            !trimmed.starts_with("//") && !trimmed.starts_with("/*") && !trimmed.starts_with('*')
        })
        .map(String::from)
        .collect()
}

fn violations_in(layer: &str, forbidden: &[&str]) -> Vec<String> {
    let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("src").join(layer);
    let files = collect_rs_files(&dir);
    assert!(!files.is_empty(), "no sources found under src/{layer}");

    let mut violations = Vec::new();
    for file in files {
        let rel = file
            .strip_prefix(env!("CARGO_MANIFEST_DIR"))
            .unwrap_or(&file)
            .display()
            .to_string();
        for (i, line) in read_non_comment_lines(&file).iter().enumerate() {
            for needle in forbidden {
                if line.contains(needle) {
                    violations.push(format!("{rel}:{}: `{needle}` in: {line}", i + 1));
                }
            }
        }
    }
    violations
}

#[test]
fn domain_has_no_io_or_outer_layer_imports() {
    let violations = violations_in(
        "domain",
        &[
            "crate::infra",
            "crate::application",
            "crate::output",
            "crate::cli",
            "tokio",
            "reqwest",
            "std::env",
        ],
    );
    assert!(violations.is_empty(), "{}", violations.join("\n"));
}

#[test]
fn application_does_not_depend_on_infra_or_output() {
    let violations = violations_in(
        "application",
        &["crate::infra", "crate::output", "crate::cli", "reqwest"],
    );
    assert!(violations.is_empty(), "{}", violations.join("\n"));
}

#[test]
fn infra_does_not_depend_on_presentation() {
    let violations = violations_in("infra", &["crate::output", "crate::cli", "println!"]);
    assert!(violations.is_empty(), "{}", violations.join("\n"));
}
