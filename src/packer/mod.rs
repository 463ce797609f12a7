// Copyright (c) 2025-2026 the codepacker contributors
// SPDX-License-Identifier: Apache-2.0

pub mod comments;
pub mod excludes;
pub mod gitignore;
pub mod output;
pub mod walker;

use std::path::PathBuf;

/// Outcome of a complete run, shown in the final summary.
#[derive(Debug, Clone, Default)]
pub struct PackSummary {
    /// Where the packed document was (or would be) written
    pub output_path: PathBuf,
    /// Files written to the output
    pub files_packed: usize,
    /// Bytes written to the output, headers included
    pub bytes_written: u64,
    /// Entries pruned by ignore rules or built-in excludes
    pub ignored: usize,
    /// Files without a known comment style
    pub not_code: usize,
    /// Files that could not be read
    pub unreadable: usize,
    /// Symbolic links skipped
    pub symlinks: usize,
    /// Nothing was written
    pub dry_run: bool,
}

pub use comments::{CommentStyle, CommentTable};
pub use excludes::DefaultExcludes;
pub use gitignore::{IgnoreLoader, IgnoreRules, LoadOutcome};
pub use walker::{FileEntry, FileWalker, ScanResult};
