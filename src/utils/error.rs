// Copyright (c) 2025-2026 the codepacker contributors
// SPDX-License-Identifier: Apache-2.0

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PackError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("File system error: {0}")]
    FileSystem(#[from] std::io::Error),

    #[error("Failed to read ignore file {}: {source}", path.display())]
    IgnoreFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Output file already exists: {}", path.display())]
    OutputExists { path: PathBuf },

    #[error("Error walking directory: {0}")]
    Walk(String),

    #[error("Validation error: {message}\nSuggestion: {suggestion}")]
    ValidationError { message: String, suggestion: String },
}

impl PackError {
    pub fn invalid_file_name(setting: &str, value: &str) -> Self {
        PackError::ValidationError {
            message: format!("Invalid {}: '{}'", setting, value),
            suggestion: format!(
                "The {} must be a plain file name such as '.gitignore', without path separators",
                setting
            ),
        }
    }

    pub fn missing_input_dir(path: &std::path::Path) -> Self {
        PackError::ValidationError {
            message: format!("Input directory does not exist: {}", path.display()),
            suggestion: "Pass an existing directory with --indir".to_string(),
        }
    }

    /// Hint shown under the error message, if there is one.
    fn suggestion(&self) -> Option<&str> {
        match self {
            PackError::OutputExists { .. } => Some("Use --force to overwrite it"),
            PackError::IgnoreFile { .. } => Some(
                "Fix the file permissions, or set ignore.on_error = \"unfiltered\" to pack without ignore rules",
            ),
            PackError::Config(_) => Some("Check codepacker.toml and CODEPACKER_* environment variables"),
            PackError::FileSystem(_) | PackError::Walk(_) | PackError::ValidationError { .. } => {
                None
            }
        }
    }
}

/// Render an error for the terminal.
///
/// Validation errors already carry their suggestion in the message. In verbose
/// mode the `source` chain is appended.
pub fn format_error(error: &PackError, verbose: bool) -> String {
    let mut out = format!("\n\u{26a0} Error: {}", error);

    if let Some(suggestion) = error.suggestion() {
        out.push_str("\nSuggestion: ");
        out.push_str(suggestion);
    }

    if verbose {
        let mut source = std::error::Error::source(error);
        while let Some(cause) = source {
            out.push_str("\nCaused by: ");
            out.push_str(&cause.to_string());
            source = cause.source();
        }
    }

    out
}
