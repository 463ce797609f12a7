// Copyright (c) 2025-2026 the codepacker contributors
// SPDX-License-Identifier: Apache-2.0

use crate::packer::comments::{CommentStyle, CommentTable};
use crate::packer::gitignore::IgnoreRules;
use crate::utils::error::PackError;
use ignore::WalkBuilder;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Represents a code file selected for packing.
#[derive(Debug, Clone)]
pub struct FileEntry {
    /// Absolute path to the file
    pub path: PathBuf,
    /// Path relative to the input directory
    pub relative_path: PathBuf,
    /// Size of the file in bytes at scan time
    pub size: u64,
    /// Comment delimiters used for the file header
    pub comment: CommentStyle,
}

/// Why entries were left out during a scan.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanStats {
    /// Files and directories matched by the ignore rules (a directory counts once)
    pub ignored: usize,
    /// Files without a known comment style
    pub not_code: usize,
    /// Symbolic links, never followed
    pub symlinks: usize,
}

#[derive(Debug, Clone, Default)]
pub struct ScanResult {
    pub files: Vec<FileEntry>,
    pub stats: ScanStats,
}

/// Walks the input directory and selects the files to pack.
///
/// Ignored directories are pruned, not just hidden: nothing below them is
/// visited.
pub struct FileWalker {
    root: PathBuf,
    rules: Arc<IgnoreRules>,
    comments: CommentTable,
    skip: Option<PathBuf>,
}

impl FileWalker {
    pub fn new<P: AsRef<Path>>(root: P, rules: Arc<IgnoreRules>, comments: CommentTable) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            rules,
            comments,
            skip: None,
        }
    }

    /// Never select `path`. Used for the output file.
    pub fn skip_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.skip = Some(path.as_ref().to_path_buf());
        self
    }

    pub fn scan(&self) -> Result<ScanResult, PackError> {
        let mut result = ScanResult::default();

        if self.rules.should_ignore(&self.root) {
            tracing::debug!("Skipping (ignored): {}", self.root.display());
            result.stats.ignored = 1;
            return Ok(result);
        }

        let ignored = Arc::new(AtomicUsize::new(0));
        let filter_rules = Arc::clone(&self.rules);
        let filter_ignored = Arc::clone(&ignored);

        // The walker's own .gitignore/hidden handling is off; our rules decide.
        let walker = WalkBuilder::new(&self.root)
            .standard_filters(false)
            .follow_links(false)
            .sort_by_file_name(|a, b| a.cmp(b))
            .filter_entry(move |entry| {
                if filter_rules.should_ignore(entry.path()) {
                    tracing::debug!("Skipping (ignored): {}", entry.path().display());
                    filter_ignored.fetch_add(1, Ordering::Relaxed);
                    return false;
                }
                true
            })
            .build();

        for entry in walker {
            let entry = entry.map_err(|e| PackError::Walk(e.to_string()))?;
            let path = entry.path();

            if entry.path_is_symlink() {
                tracing::debug!("Skipping (symlink): {}", path.display());
                result.stats.symlinks += 1;
                continue;
            }

            if !entry.file_type().is_some_and(|ft| ft.is_file()) {
                continue;
            }

            if self.skip.as_deref() == Some(path) {
                tracing::debug!("Skipping (output file): {}", path.display());
                continue;
            }

            let Some(comment) = self.comments.style_for(path) else {
                tracing::debug!("Skipping (not a code file): {}", path.display());
                result.stats.not_code += 1;
                continue;
            };

            let relative_path = path
                .strip_prefix(&self.root)
                .map_err(|e| PackError::Walk(format!("{}: {}", path.display(), e)))?
                .to_path_buf();
            let size = entry.metadata().map(|m| m.len()).unwrap_or(0);

            result.files.push(FileEntry {
                path: path.to_path_buf(),
                relative_path,
                size,
                comment,
            });
        }

        result.stats.ignored = ignored.load(Ordering::Relaxed);
        tracing::info!(
            files = result.files.len(),
            ignored = result.stats.ignored,
            not_code = result.stats.not_code,
            "Scanned {}",
            self.root.display()
        );
        Ok(result)
    }
}
