//! Tests for ignore rule discovery and matching against real directory trees.

mod common;

use codepacker::packer::{DefaultExcludes, IgnoreLoader, IgnoreRules};
use codepacker::utils::error::PackError;
use common::{create_mock_project, create_temp_dir, init_repo_marker};
use std::fs;
use std::path::Path;

#[test]
fn test_ascent_stops_at_repository_root() {
    let temp_dir = create_temp_dir();
    let a = temp_dir.path().join("a");
    let b = a.join("b");
    init_repo_marker(&a);
    create_mock_project(&b, &[(".gitignore", "*.log\n")]);

    let rules = IgnoreLoader::new().load(&b).expect("load should succeed");

    assert_eq!(rules.base_dir(), a.as_path());
    assert_eq!(rules.patterns(), ["*.log"]);
}

#[test]
fn test_ascent_collects_child_then_parent_patterns() {
    let temp_dir = create_temp_dir();
    let repo = temp_dir.path().join("repo");
    init_repo_marker(&repo);
    create_mock_project(
        &repo,
        &[
            (".gitignore", "*.tmp\n"),
            ("pkg/.gitignore", "*.log\n"),
            ("pkg/inner/.gitignore", "# only comments\n\n"),
        ],
    );

    let rules = IgnoreLoader::new()
        .load(&repo.join("pkg/inner"))
        .expect("load should succeed");

    assert_eq!(rules.base_dir(), repo.as_path());
    assert_eq!(rules.patterns(), ["*.log", "*.tmp"]);
}

#[test]
fn test_ignore_file_above_repository_root_is_not_read() {
    let temp_dir = create_temp_dir();
    let outer = temp_dir.path().join("outer");
    let repo = outer.join("repo");
    create_mock_project(&outer, &[(".gitignore", "*.rs\n")]);
    init_repo_marker(&repo);

    let rules = IgnoreLoader::new().load(&repo).expect("load should succeed");
    assert!(rules.patterns().is_empty());
}

#[test]
fn test_comment_and_blank_lines_skipped() {
    let temp_dir = create_temp_dir();
    let repo = temp_dir.path().join("repo");
    init_repo_marker(&repo);
    create_mock_project(&repo, &[(".gitignore", "# comment\n\n*.tmp\n")]);

    let rules = IgnoreLoader::new().load(&repo).expect("load should succeed");
    assert_eq!(rules.patterns(), ["*.tmp"]);
}

#[test]
fn test_repository_marker_may_be_a_file() {
    // git worktrees and submodules use a `.git` file
    let temp_dir = create_temp_dir();
    let repo = temp_dir.path().join("worktree");
    create_mock_project(&repo, &[(".git", "gitdir: /elsewhere\n"), ("src/x.rs", "")]);

    let rules = IgnoreLoader::new()
        .load(&repo.join("src"))
        .expect("load should succeed");
    assert_eq!(rules.base_dir(), repo.as_path());
}

#[test]
fn test_no_marker_uses_start_directory() {
    let temp_dir = create_temp_dir();
    let start = temp_dir.path().join("plain/project");
    fs::create_dir_all(&start).expect("mkdir");

    let rules = IgnoreLoader::new().load(&start).expect("load should succeed");

    assert_eq!(rules.base_dir(), start.as_path());
    assert!(
        rules.patterns().is_empty(),
        "no ignore files expected, got {:?}",
        rules.patterns()
    );
}

#[test]
fn test_custom_file_and_marker_names() {
    let temp_dir = create_temp_dir();
    let repo = temp_dir.path().join("repo");
    fs::create_dir_all(repo.join(".hg")).expect("mkdir");
    create_mock_project(
        &repo,
        &[(".packignore", "*.bak\n"), (".gitignore", "*.rs\n"), ("sub/x", "")],
    );

    let rules = IgnoreLoader::new()
        .with_file_name(".packignore")
        .with_repo_marker(".hg")
        .load(&repo.join("sub"))
        .expect("load should succeed");

    assert_eq!(rules.base_dir(), repo.as_path());
    assert_eq!(rules.patterns(), ["*.bak"]);
}

#[test]
fn test_unreadable_ignore_file_fails_load() {
    let temp_dir = create_temp_dir();
    let repo = temp_dir.path().join("repo");
    init_repo_marker(&repo);
    // A directory where the ignore file should be cannot be read as text.
    fs::create_dir_all(repo.join(".gitignore")).expect("mkdir");

    let err = IgnoreLoader::new()
        .load(&repo)
        .expect_err("load should fail");
    assert!(
        matches!(&err, PackError::IgnoreFile { path, .. } if *path == repo.join(".gitignore")),
        "unexpected error: {err:?}"
    );
}

#[test]
fn test_non_utf8_ignore_file_still_loads() {
    let temp_dir = create_temp_dir();
    let repo = temp_dir.path().join("repo");
    init_repo_marker(&repo);
    create_mock_project(&repo, &[("src/x.rs", "")]);
    fs::write(repo.join(".gitignore"), b"# r\xe9sum\xe9 drafts\n*.log\n").expect("write");

    let rules = IgnoreLoader::new().load(&repo).expect("load should succeed");

    assert_eq!(rules.patterns(), ["*.log"]);
    assert!(rules.should_ignore(&repo.join("debug.log")));
    assert!(rules.should_ignore(&repo.join("node_modules")));
}

#[test]
fn test_partial_load_keeps_patterns_read_before_failure() {
    let temp_dir = create_temp_dir();
    let repo = temp_dir.path().join("repo");
    let sub = repo.join("sub");
    init_repo_marker(&repo);
    fs::create_dir_all(repo.join(".gitignore")).expect("mkdir");
    create_mock_project(&sub, &[(".gitignore", "*.log\n")]);

    let outcome = IgnoreLoader::new().load_partial(&sub);

    assert!(matches!(outcome.error, Some(PackError::IgnoreFile { .. })));
    assert_eq!(outcome.rules.patterns(), ["*.log"]);
    assert_eq!(outcome.rules.base_dir(), sub.as_path());
    // Built-in excludes still apply to the partial rules.
    assert!(outcome.rules.should_ignore(&sub.join("node_modules")));
    assert!(outcome.rules.should_ignore(&sub.join("today.log")));
}

#[test]
fn test_default_excludes_win_over_patterns() {
    let temp_dir = create_temp_dir();
    let repo = temp_dir.path().join("repo");
    init_repo_marker(&repo);
    create_mock_project(&repo, &[(".gitignore", "*.log\n")]);
    let rules = IgnoreLoader::new().load(&repo).expect("load should succeed");

    for rel in [
        "node_modules",
        "web/node_modules/react/index.js",
        "vendor/lib.go",
        "target/debug/app",
        ".git/config",
        ".idea/workspace.xml",
        "py/__pycache__/mod.pyc",
        "a/b/c/.mypy_cache",
    ] {
        assert!(rules.should_ignore(&repo.join(rel)), "{rel} should be ignored");
    }
    for rel in ["src/mybin.rs", "src/main.rs", "builder/x.go", "node_module/x.js"] {
        assert!(!rules.should_ignore(&repo.join(rel)), "{rel} should be kept");
    }
}

#[test]
fn test_paths_outside_base_are_kept() {
    let temp_dir = create_temp_dir();
    let repo = temp_dir.path().join("repo");
    init_repo_marker(&repo);
    create_mock_project(&repo, &[(".gitignore", "*\n")]);
    let rules = IgnoreLoader::new().load(&repo).expect("load should succeed");

    assert!(!rules.should_ignore(&temp_dir.path().join("sibling/node_modules")));
    assert!(!rules.should_ignore(Path::new("/definitely/elsewhere.rs")));
    assert!(rules.should_ignore(&repo.join("anything.rs")));
}

#[test]
fn test_single_star_stays_in_one_directory() {
    let rules = IgnoreRules::new(Path::new("/r").to_path_buf(), vec!["*.md".to_string()]);
    assert!(rules.should_ignore(Path::new("/r/README.md")));
    assert!(!rules.should_ignore(Path::new("/r/docs/README.md")));
}

#[test]
fn test_double_star_node_modules() {
    let rules = IgnoreRules::new(
        Path::new("/r").to_path_buf(),
        vec!["**/node_modules".to_string()],
    );
    assert!(rules.should_ignore(Path::new("/r/a/b/node_modules/x.js")));
    assert!(!rules.should_ignore(Path::new("/r/a/b/node_module/x.js")));

    // Without the built-in set the degraded `*/node_modules` form only
    // matches one leading directory.
    let rules = rules.with_default_excludes(DefaultExcludes::none());
    assert!(rules.should_ignore(Path::new("/r/web/node_modules")));
    assert!(!rules.should_ignore(Path::new("/r/a/b/node_modules")));
}

#[test]
fn test_should_ignore_repeatable() {
    let rules = IgnoreRules::new(
        Path::new("/r").to_path_buf(),
        vec!["*.log".to_string(), "[".to_string()],
    );
    let paths = ["/r/x.log", "/r/src/x.log", "/r/[", "/r/dist"];
    let first: Vec<bool> = paths.iter().map(|p| rules.should_ignore(Path::new(p))).collect();
    let second: Vec<bool> = paths.iter().map(|p| rules.should_ignore(Path::new(p))).collect();
    assert_eq!(first, second);
    assert_eq!(first, [true, false, false, true]);
}

#[test]
fn test_backslash_escapes_match_literally() {
    let rules = IgnoreRules::new(
        Path::new("/r").to_path_buf(),
        vec![r"docs/\#draft.md".to_string(), r"gen/out\*.rs".to_string()],
    );
    assert!(rules.should_ignore(Path::new("/r/docs/#draft.md")));
    assert!(rules.should_ignore(Path::new("/r/gen/out*.rs")));
    assert!(!rules.should_ignore(Path::new("/r/gen/out1.rs")));
    assert!(!rules.should_ignore(Path::new("/r/gen/sub/out*.rs")));
}

#[test]
fn test_negated_class_against_full_path() {
    let rules = IgnoreRules::new(
        Path::new("/r").to_path_buf(),
        vec!["logs/run[^0-9].txt".to_string(), "tmp/x[!a-c]".to_string()],
    );
    assert!(rules.should_ignore(Path::new("/r/logs/runx.txt")));
    assert!(!rules.should_ignore(Path::new("/r/logs/run7.txt")));
    assert!(!rules.should_ignore(Path::new("/r/runx.txt")));
    assert!(rules.should_ignore(Path::new("/r/tmp/xz")));
    assert!(!rules.should_ignore(Path::new("/r/tmp/xb")));
}
