// Copyright (c) 2025-2026 the codepacker contributors
// SPDX-License-Identifier: Apache-2.0

//! Configuration management using the `config` crate for hierarchical discovery and merging.
//!
//! ## Configuration Sources (in precedence order, highest to lowest):
//! 1. **CLI flags** - merged last by [`merge_config`]
//! 2. **Environment variables** - `CODEPACKER_<SECTION>__<KEY>`, e.g. `CODEPACKER_IGNORE__ON_ERROR=abort`
//! 3. **Config files** - lowest precedence
//!
//! ## Config File Discovery (in merge order, later overrides earlier):
//! 1. `~/.config/codepacker/config.toml` (user config directory)
//! 2. `codepacker.toml` at the repository root of the input directory
//! 3. `./codepacker.toml` in the current directory
//! 4. Explicit `--config` path
//!
//! ## Usage:
//! ```no_run
//! use codepacker::cli::{args, config};
//!
//! let args = args::parse();
//! let loaded = config::load(&args)?;
//! let merged = config::merge_config(&args, loaded)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use crate::cli::args::{Args, DEFAULT_CONFIG_FILE};
use crate::packer::comments::{CommentStyle, CommentTable};
use crate::packer::excludes::DefaultExcludes;
use crate::packer::gitignore::{DEFAULT_IGNORE_FILE, DEFAULT_REPO_MARKER, IgnoreLoader, find_repo_root};
use crate::utils::error::PackError;
use crate::{IgnoreSettings, MergedConfig};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// What the pipeline does when an ignore file exists but cannot be read.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum IgnoreErrorPolicy {
    /// Warn and pack without ignore files or default excludes; extra patterns still apply
    #[default]
    Unfiltered,
    /// Warn and use the patterns read before the failure
    Partial,
    /// Fail the run
    Abort,
}

/// Root configuration structure loaded from config files.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub ignore: IgnoreConfig,
    /// Extra or replacement comment styles keyed by extension
    #[serde(default)]
    pub comments: HashMap<String, CommentStyle>,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct GeneralConfig {
    pub outfile: Option<PathBuf>,
    #[serde(default)]
    pub force: bool,
    #[serde(default)]
    pub verbose: u8,
}

/// Ignore file discovery and matching settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IgnoreConfig {
    #[serde(default = "default_file_name")]
    pub file_name: String,
    #[serde(default = "default_repo_marker")]
    pub repo_marker: String,
    /// Replaces the built-in exclude set when present
    pub default_excludes: Option<Vec<String>>,
    #[serde(default)]
    pub extra_patterns: Vec<String>,
    #[serde(default)]
    pub on_error: IgnoreErrorPolicy,
}

fn default_file_name() -> String {
    DEFAULT_IGNORE_FILE.to_string()
}

fn default_repo_marker() -> String {
    DEFAULT_REPO_MARKER.to_string()
}

impl Default for IgnoreConfig {
    fn default() -> Self {
        Self {
            file_name: default_file_name(),
            repo_marker: default_repo_marker(),
            default_excludes: None,
            extra_patterns: Vec::new(),
            on_error: IgnoreErrorPolicy::default(),
        }
    }
}

fn discover_config_paths(args: &Args) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();

    // User config (lowest precedence)
    if let Some(user_config) = get_user_config_path() {
        paths.push(user_config);
    }

    // Repository root config
    if let Some(repo_root) = find_repo_root(&args.indir, DEFAULT_REPO_MARKER) {
        let repo_config = repo_root.join(DEFAULT_CONFIG_FILE);
        if repo_config.exists() {
            paths.push(repo_config);
        }
    }

    // Current directory config
    let current_dir_config = PathBuf::from(DEFAULT_CONFIG_FILE);
    if current_dir_config.exists() {
        paths.push(current_dir_config);
    }

    // Explicit --config path (highest precedence)
    if args.config != Path::new(DEFAULT_CONFIG_FILE) {
        if !args.config.exists() {
            return Err(PackError::Config(format!(
                "Config file not found: {}",
                args.config.display()
            ))
            .into());
        }
        paths.push(args.config.clone());
    }

    Ok(paths)
}

fn get_user_config_path() -> Option<PathBuf> {
    dirs::config_dir()
        .map(|config_dir| config_dir.join("codepacker").join("config.toml"))
        .filter(|path| path.exists())
}

/// Load configuration from discovered config files and environment variables.
pub fn load(args: &Args) -> Result<Config> {
    let mut builder = config::Config::builder();

    for config_path in discover_config_paths(args)? {
        tracing::debug!(file = %config_path.display(), "Adding config source");
        builder = builder.add_source(config::File::from(config_path));
    }

    builder = builder.add_source(
        config::Environment::with_prefix("CODEPACKER")
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true),
    );

    let settings = builder.build().context("Failed to build configuration")?;

    settings
        .try_deserialize()
        .context("Failed to deserialize configuration")
}

/// Ignore-file and marker names must be single path components.
fn validate_file_name(setting: &str, value: &str) -> Result<(), PackError> {
    let mut components = Path::new(value).components();
    let is_plain = matches!(
        (components.next(), components.next()),
        (Some(std::path::Component::Normal(_)), None)
    );
    if is_plain {
        Ok(())
    } else {
        Err(PackError::invalid_file_name(setting, value))
    }
}

/// Merge CLI arguments over the loaded configuration.
pub fn merge_config(args: &Args, config: Config) -> Result<MergedConfig, PackError> {
    validate_file_name("ignore file name", &config.ignore.file_name)?;
    validate_file_name("repository marker", &config.ignore.repo_marker)?;

    let default_excludes = if args.no_default_excludes {
        DefaultExcludes::none()
    } else {
        config
            .ignore
            .default_excludes
            .map(DefaultExcludes::from_names)
            .unwrap_or_default()
    };

    let mut extra_patterns = config.ignore.extra_patterns;
    extra_patterns.extend(args.exclude.iter().cloned());

    let verbose = if args.verbose > 0 {
        args.verbose
    } else {
        config.general.verbose
    };

    Ok(MergedConfig {
        indir: args.indir.clone(),
        outfile: args.outfile.clone().or(config.general.outfile),
        force: args.force || config.general.force,
        dry_run: args.dry_run,
        verbose,
        quiet: args.quiet,
        ignore: IgnoreSettings {
            loader: IgnoreLoader::new()
                .with_file_name(config.ignore.file_name)
                .with_repo_marker(config.ignore.repo_marker),
            default_excludes,
            extra_patterns,
            on_error: args.on_ignore_error.unwrap_or(config.ignore.on_error),
        },
        comments: CommentTable::new().with_overrides(config.comments),
    })
}
