// Copyright (c) 2025-2026 the codepacker contributors
// SPDX-License-Identifier: Apache-2.0

//! Ignore rules: discovery of ignore files and the per-path ignore decision.
//!
//! Loading ascends from the input directory toward the repository root
//! (the first ancestor holding a `.git` entry), collecting the patterns of
//! every `.gitignore` on the way. The directory where the ascent stopped is
//! the base all queried paths are made relative to.
//!
//! Matching uses shell-glob semantics on the relative path: `*` and `?` never
//! cross a `/`. A pattern containing `**` additionally gets a degraded check
//! where `**` becomes `*` and each path component is tested on its own. This
//! is not recursive-glob support and is kept that way on purpose, since it
//! decides which files end up in the output.

use crate::packer::excludes::DefaultExcludes;
use crate::utils::error::PackError;
use globset::{GlobBuilder, GlobMatcher};
use std::borrow::Cow;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Component, Path, PathBuf};

pub const DEFAULT_IGNORE_FILE: &str = ".gitignore";
pub const DEFAULT_REPO_MARKER: &str = ".git";

/// Discovers ignore files while ascending from a start directory.
#[derive(Debug, Clone)]
pub struct IgnoreLoader {
    file_name: String,
    repo_marker: String,
}

/// Result of [`IgnoreLoader::load_partial`].
///
/// `rules` holds everything read before `error` occurred. When `error` is set
/// the repository root was not reached, so `rules` is based at the start
/// directory.
#[derive(Debug)]
pub struct LoadOutcome {
    pub rules: IgnoreRules,
    pub error: Option<PackError>,
}

impl IgnoreLoader {
    pub fn new() -> Self {
        Self {
            file_name: DEFAULT_IGNORE_FILE.to_string(),
            repo_marker: DEFAULT_REPO_MARKER.to_string(),
        }
    }

    pub fn with_file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = file_name.into();
        self
    }

    pub fn with_repo_marker(mut self, repo_marker: impl Into<String>) -> Self {
        self.repo_marker = repo_marker.into();
        self
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn repo_marker(&self) -> &str {
        &self.repo_marker
    }

    /// Load the rules for `start`, failing on the first unreadable ignore file.
    pub fn load(&self, start: &Path) -> Result<IgnoreRules, PackError> {
        let outcome = self.load_partial(start);
        match outcome.error {
            Some(error) => Err(error),
            None => Ok(outcome.rules),
        }
    }

    /// Load the rules for `start`, keeping whatever was read before a failure.
    pub fn load_partial(&self, start: &Path) -> LoadOutcome {
        let start_dir = match std::path::absolute(start) {
            Ok(path) => clean_path(&path),
            Err(error) => {
                return LoadOutcome {
                    rules: IgnoreRules::new(start.to_path_buf(), Vec::new()),
                    error: Some(PackError::FileSystem(error)),
                };
            }
        };

        let mut patterns = Vec::new();
        let mut current: &Path = &start_dir;
        loop {
            let ignore_path = current.join(&self.file_name);
            match read_patterns(&ignore_path) {
                Ok(Some(found)) => {
                    tracing::debug!(
                        file = %ignore_path.display(),
                        count = found.len(),
                        "Loaded ignore patterns"
                    );
                    patterns.extend(found);
                }
                Ok(None) => {}
                Err(error) => {
                    return LoadOutcome {
                        rules: IgnoreRules::new(start_dir.clone(), patterns),
                        error: Some(error),
                    };
                }
            }

            if current.join(&self.repo_marker).exists() {
                tracing::debug!(root = %current.display(), "Found repository root");
                return LoadOutcome {
                    rules: IgnoreRules::new(current.to_path_buf(), patterns),
                    error: None,
                };
            }

            match current.parent() {
                Some(parent) => current = parent,
                None => break,
            }
        }

        tracing::debug!(
            start = %start_dir.display(),
            "No repository root found; using start directory as base"
        );
        LoadOutcome {
            rules: IgnoreRules::new(start_dir, patterns),
            error: None,
        }
    }
}

impl Default for IgnoreLoader {
    fn default() -> Self {
        Self::new()
    }
}

/// Read one ignore file. `Ok(None)` when it does not exist.
fn read_patterns(path: &Path) -> Result<Option<Vec<String>>, PackError> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(error) if error.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(PackError::IgnoreFile {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    let mut reader = BufReader::new(file);
    let mut patterns = Vec::new();
    let mut buf = Vec::new();
    loop {
        buf.clear();
        let read = reader
            .read_until(b'\n', &mut buf)
            .map_err(|source| PackError::IgnoreFile {
                path: path.to_path_buf(),
                source,
            })?;
        if read == 0 {
            break;
        }
        // Invalid UTF-8 is replaced, not rejected.
        let line = String::from_utf8_lossy(&buf);
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        patterns.push(line.to_string());
    }
    Ok(Some(patterns))
}

/// Nearest ancestor of `start` (inclusive) that contains `marker`.
pub fn find_repo_root(start: &Path, marker: &str) -> Option<PathBuf> {
    let start = clean_path(&std::path::absolute(start).ok()?);
    let mut current: &Path = &start;
    loop {
        if current.join(marker).exists() {
            return Some(current.to_path_buf());
        }
        current = current.parent()?;
    }
}

/// Lexically normalize a path: drop `.` components and resolve `..` against
/// the preceding component. Symlinks are not consulted.
pub(crate) fn clean_path(path: &Path) -> PathBuf {
    let mut cleaned = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !cleaned.pop() {
                    cleaned.push(component);
                }
            }
            Component::Prefix(_) | Component::RootDir | Component::Normal(_) => {
                cleaned.push(component);
            }
        }
    }
    cleaned
}

#[derive(Debug, Clone)]
struct CompiledPattern {
    /// Matches the full relative path. `None` when the pattern is not a valid
    /// glob; such a pattern never matches.
    matcher: Option<GlobMatcher>,
    /// Set only when the raw pattern contains `**`: the pattern with `**`
    /// replaced by `*`, tested against single components.
    component_matcher: Option<GlobMatcher>,
}

impl CompiledPattern {
    fn new(pattern: &str) -> Self {
        let matcher = compile_glob(pattern);
        let component_matcher = if pattern.contains("**") {
            compile_glob(&pattern.replace("**", "*"))
        } else {
            None
        };
        Self {
            matcher,
            component_matcher,
        }
    }
}

fn compile_glob(pattern: &str) -> Option<GlobMatcher> {
    let glob = to_posix_glob(pattern);
    match GlobBuilder::new(&glob)
        .literal_separator(true)
        .backslash_escape(true)
        .build()
    {
        Ok(glob) => Some(glob.compile_matcher()),
        Err(error) => {
            tracing::warn!(pattern, error = %error, "Malformed ignore pattern never matches");
            None
        }
    }
}

/// Rewrite an ignore pattern into the equivalent `globset` syntax.
///
/// Runs of `*` collapse to one `*` (with `*` unable to cross `/`, `**` means
/// the same as `*`), and braces are escaped because they are literal here.
fn to_posix_glob(pattern: &str) -> String {
    let mut out = String::with_capacity(pattern.len());
    let mut chars = pattern.chars();
    let mut in_class = false;
    let mut prev_star = false;

    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                out.push(c);
                if let Some(escaped) = chars.next() {
                    out.push(escaped);
                }
            }
            '*' if !in_class => {
                if !prev_star {
                    out.push('*');
                }
                prev_star = true;
                continue;
            }
            '[' if !in_class => {
                in_class = true;
                out.push(c);
            }
            ']' if in_class => {
                in_class = false;
                out.push(c);
            }
            '{' | '}' if !in_class => {
                out.push('\\');
                out.push(c);
            }
            _ => out.push(c),
        }
        prev_star = false;
    }
    out
}

/// Ignore patterns anchored at a base directory, plus the built-in excludes.
///
/// Immutable after construction; queries take `&self` only.
#[derive(Debug, Clone)]
pub struct IgnoreRules {
    patterns: Vec<String>,
    compiled: Vec<CompiledPattern>,
    base_dir: PathBuf,
    default_excludes: DefaultExcludes,
}

impl IgnoreRules {
    pub fn new(base_dir: PathBuf, patterns: Vec<String>) -> Self {
        let compiled = patterns
            .iter()
            .map(String::as_str)
            .map(CompiledPattern::new)
            .collect();
        Self {
            patterns,
            compiled,
            base_dir,
            default_excludes: DefaultExcludes::standard(),
        }
    }

    /// Rules that ignore nothing at all, not even the built-in excludes.
    pub fn unfiltered(base_dir: PathBuf) -> Self {
        Self::new(base_dir, Vec::new()).with_default_excludes(DefaultExcludes::none())
    }

    /// Append patterns after the loaded ones.
    pub fn with_extra_patterns<I, S>(mut self, extra: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for pattern in extra {
            let pattern = pattern.into();
            self.compiled.push(CompiledPattern::new(&pattern));
            self.patterns.push(pattern);
        }
        self
    }

    pub fn with_default_excludes(mut self, default_excludes: DefaultExcludes) -> Self {
        self.default_excludes = default_excludes;
        self
    }

    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    pub fn default_excludes(&self) -> &DefaultExcludes {
        &self.default_excludes
    }

    /// Whether `path` must be left out of the pack.
    ///
    /// A `true` for a directory means its whole subtree is skipped. Paths that
    /// cannot be expressed relative to the base directory are never ignored.
    pub fn should_ignore(&self, path: &Path) -> bool {
        let cleaned = clean_path(path);
        let Ok(rel_path) = cleaned.strip_prefix(&self.base_dir) else {
            return false;
        };
        // The base itself is never ignored, so a `.*` line cannot prune a
        // walk that starts at the repository root.
        if rel_path.as_os_str().is_empty() {
            return false;
        }

        let components: Vec<Cow<'_, str>> = rel_path
            .components()
            .map(|component| component.as_os_str().to_string_lossy())
            .collect();

        if components
            .iter()
            .any(|component| self.default_excludes.contains(component))
        {
            return true;
        }

        self.compiled.iter().any(|pattern| {
            if pattern
                .matcher
                .as_ref()
                .is_some_and(|matcher| matcher.is_match(rel_path))
            {
                return true;
            }
            pattern.component_matcher.as_ref().is_some_and(|matcher| {
                components
                    .iter()
                    .any(|component| matcher.is_match(&**component))
            })
        })
    }
}
