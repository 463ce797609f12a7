// Copyright (c) 2025-2026 the codepacker contributors
// SPDX-License-Identifier: Apache-2.0

//! Extension to comment-syntax lookup used for file headers.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// Opening and closing comment delimiters for one language.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentStyle {
    /// Opening/starting comment symbol
    pub prepend: String,
    /// Closing comment symbol, empty for line comments
    #[serde(default)]
    pub append: String,
}

impl CommentStyle {
    pub fn new(prepend: &str, append: &str) -> Self {
        Self {
            prepend: prepend.to_string(),
            append: append.to_string(),
        }
    }

    pub fn line(prepend: &str) -> Self {
        Self::new(prepend, "")
    }
}

/// Built-in comment style for an extension (without the leading dot).
pub fn builtin_style(ext: &str) -> Option<CommentStyle> {
    let style = match ext {
        // C and C-like languages
        "c" | "h" | "cpp" | "hpp" | "cc" | "hh" | "cxx" | "cs" => CommentStyle::line("//"),

        // Web development
        "js" | "jsx" | "ts" | "tsx" | "php" | "scss" | "less" => CommentStyle::line("//"),
        "css" => CommentStyle::new("/*", "*/"),

        // System/Shell scripting
        "sh" | "bash" | "zsh" | "fish" | "ksh" | "ps1" | "psm1" => CommentStyle::line("#"),

        // Modern languages
        "go" | "rs" | "dart" | "swift" | "kt" | "scala" => CommentStyle::line("//"),

        // Traditional languages
        "java" | "groovy" => CommentStyle::line("//"),
        "rb" | "py" | "pl" | "pm" | "tcl" => CommentStyle::line("#"),
        "lua" => CommentStyle::line("--"),

        // Configuration and markup
        "yaml" | "yml" | "toml" | "conf" => CommentStyle::line("#"),
        "ini" => CommentStyle::line(";"),
        "xml" | "html" => CommentStyle::new("<!--", "-->"),

        // Database
        "sql" | "psql" | "mysql" => CommentStyle::line("--"),

        // Other
        "r" | "jl" | "ex" | "exs" => CommentStyle::line("#"),
        "fs" | "fsx" | "v" | "vh" => CommentStyle::line("//"),
        "f90" | "f95" | "f" => CommentStyle::line("!"),
        "elm" | "hs" | "lhs" | "vhd" => CommentStyle::line("--"),
        "erl" | "hrl" => CommentStyle::line("%"),
        "ml" | "mli" => CommentStyle::new("(*", "*)"),

        _ => return None,
    };
    Some(style)
}

/// Built-in table plus user overrides from configuration.
#[derive(Debug, Clone, Default)]
pub struct CommentTable {
    overrides: HashMap<String, CommentStyle>,
}

impl CommentTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace entries. Keys may be given with or without the leading dot.
    pub fn with_overrides<I>(mut self, overrides: I) -> Self
    where
        I: IntoIterator<Item = (String, CommentStyle)>,
    {
        for (ext, style) in overrides {
            let ext = ext.trim_start_matches('.').to_string();
            self.overrides.insert(ext, style);
        }
        self
    }

    /// Comment style for `path`, or `None` when it is not a code file.
    ///
    /// Lookup uses the final extension and is case-sensitive.
    pub fn style_for(&self, path: &Path) -> Option<CommentStyle> {
        let ext = path.extension()?.to_str()?;
        self.overrides
            .get(ext)
            .cloned()
            .or_else(|| builtin_style(ext))
    }
}
