//! Common test utilities and fixtures for integration tests.

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Path to the compiled codepacker binary.
pub fn codepacker_bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_codepacker"))
}

/// Creates a temporary directory for test fixtures.
pub fn create_temp_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp directory")
}

/// Creates a mock project structure under `root`.
pub fn create_mock_project(root: &Path, files: &[(&str, &str)]) -> PathBuf {
    for (path, content) in files {
        let file_path = root.join(path);
        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directories");
        }
        std::fs::write(&file_path, content).expect("Failed to write file");
    }

    root.to_path_buf()
}

/// Marks `dir` as a repository root.
pub fn init_repo_marker(dir: &Path) {
    std::fs::create_dir_all(dir.join(".git")).expect("Failed to create .git directory");
}

/// A small git-style project with build output and dependencies to skip.
pub fn rust_project_files() -> Vec<(&'static str, &'static str)> {
    vec![
        (
            "Cargo.toml",
            r#"[package]
name = "test-project"
version = "0.1.0"
edition = "2021"
"#,
        ),
        (
            "src/main.rs",
            r#"fn main() {
    println!("Hello, world!");
}
"#,
        ),
        ("src/lib.rs", "pub fn greet() -> &'static str {\n    \"Hello!\"\n}\n"),
        ("README.md", "# test-project\n"),
        ("target/debug/build.rs", "// build output\n"),
        ("scripts/setup.sh", "#!/bin/sh\necho setup\n"),
        ("debug.log", "noise\n"),
        (".gitignore", "# build noise\n*.log\n\n"),
    ]
}

/// Normalize OS separators so expected output can be written with `/`.
pub fn slashes(text: &str) -> String {
    text.replace('\\', "/")
}
