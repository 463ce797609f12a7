// Copyright (c) 2025-2026 the codepacker contributors
// SPDX-License-Identifier: Apache-2.0

//! Built-in directory and file names that are never packed.
//!
//! A name is matched against each individual path component with exact,
//! case-sensitive equality. `mybin` is not excluded by `bin`.

use std::collections::BTreeSet;

/// Names excluded even when no ignore file mentions them.
pub const STANDARD_EXCLUDES: [&str; 13] = [
    "node_modules",
    "vendor",
    "build",
    "dist",
    "target",
    "bin",
    "obj",
    ".git",
    ".idea",
    ".vscode",
    "__pycache__",
    ".pytest_cache",
    ".mypy_cache",
];

/// Set of path component names excluded regardless of ignore patterns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefaultExcludes {
    names: BTreeSet<String>,
}

impl DefaultExcludes {
    /// The fixed set from [`STANDARD_EXCLUDES`].
    pub fn standard() -> Self {
        Self::from_names(STANDARD_EXCLUDES)
    }

    /// An empty set; only loaded patterns decide.
    pub fn none() -> Self {
        Self {
            names: BTreeSet::new(),
        }
    }

    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    pub fn contains(&self, component: &str) -> bool {
        self.names.contains(component)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl Default for DefaultExcludes {
    fn default() -> Self {
        Self::standard()
    }
}
