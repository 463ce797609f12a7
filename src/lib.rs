// Copyright (c) 2025-2026 the codepacker contributors
// SPDX-License-Identifier: Apache-2.0

//! # codepacker
//!
//! Packs every recognized source file under a directory into a single text
//! document. Each file is preceded by a comment header, written in the file's
//! own comment syntax, that carries its path:
//!
//! ```text
//! // project/src/main.rs
//! fn main() {}
//! ```
//!
//! ## Pipeline
//!
//! 1. **Ignore rules** - `.gitignore` files are collected from the input
//!    directory up to the repository root ([`packer::gitignore`])
//! 2. **Scanning** - the input directory is walked, ignored subtrees pruned and
//!    non-code files dropped ([`packer::walker`])
//! 3. **Writing** - header + content blocks go to the output file
//!    ([`packer::output`])
//! 4. **Summary** - counts are printed unless `--quiet`
//!
//! Configuration follows hierarchical precedence (see [`cli::config`]):
//! user config, repository `codepacker.toml`, `./codepacker.toml`, explicit
//! `--config`, `CODEPACKER_*` environment variables, then CLI flags.

pub mod cli;
pub mod packer;
pub mod utils;

use anyhow::{Context, Result};
use cli::config::IgnoreErrorPolicy;
use packer::output::{PackWriter, ensure_writable, input_dir_name, pack_codebase, resolve_output_path};
use packer::gitignore::clean_path;
use packer::{CommentTable, DefaultExcludes, FileWalker, IgnoreLoader, IgnoreRules, PackSummary};
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use utils::error::PackError;

/// Final resolved configuration after merging all sources (CLI, env, config files).
#[derive(Debug, Clone)]
pub struct MergedConfig {
    /// Directory to pack, as given
    pub indir: PathBuf,
    /// Output file, relative to the current directory (optional)
    pub outfile: Option<PathBuf>,
    /// Overwrite an existing output file
    pub force: bool,
    /// List files only, write nothing
    pub dry_run: bool,
    /// Verbosity level (0-3)
    pub verbose: u8,
    /// Quiet mode (suppress all non-error output)
    pub quiet: bool,
    /// Ignore rule settings
    pub ignore: IgnoreSettings,
    /// Extension to comment syntax table
    pub comments: CommentTable,
}

/// How ignore rules are loaded and extended.
#[derive(Debug, Clone)]
pub struct IgnoreSettings {
    pub loader: IgnoreLoader,
    pub default_excludes: DefaultExcludes,
    /// Appended after the patterns read from ignore files
    pub extra_patterns: Vec<String>,
    pub on_error: IgnoreErrorPolicy,
}

/// Install the stderr tracing subscriber. `RUST_LOG` wins over `verbose`.
pub fn init_logging(verbose: u8, quiet: bool) {
    let level = match (quiet, verbose) {
        (true, _) => "error",
        (false, 0) => "warn",
        (false, 1) => "info",
        (false, 2) => "debug",
        (false, _) => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    if tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .try_init()
        .is_err()
    {
        tracing::debug!("Logging already initialized");
    }
}

/// Build the ignore rules for `indir`, applying the configured failure policy.
pub fn build_ignore_rules(indir: &Path, settings: &IgnoreSettings) -> Result<IgnoreRules, PackError> {
    let outcome = settings.loader.load_partial(indir);

    let rules = match outcome.error {
        None => outcome.rules,
        Some(error) => match settings.on_error {
            IgnoreErrorPolicy::Abort => return Err(error),
            IgnoreErrorPolicy::Partial => {
                tracing::warn!(
                    "Error loading ignore rules: {}; continuing with {} patterns read so far",
                    error,
                    outcome.rules.patterns().len()
                );
                outcome.rules
            }
            IgnoreErrorPolicy::Unfiltered => {
                tracing::warn!(
                    "Error loading ignore rules: {}; packing without ignore files or default excludes",
                    error
                );
                return Ok(IgnoreRules::unfiltered(indir.to_path_buf())
                    .with_extra_patterns(settings.extra_patterns.iter().cloned()));
            }
        },
    };

    Ok(rules
        .with_default_excludes(settings.default_excludes.clone())
        .with_extra_patterns(settings.extra_patterns.iter().cloned()))
}

/// Run the pack pipeline.
pub fn run(config: &MergedConfig) -> Result<PackSummary> {
    tracing::info!("codepacker v{} starting", env!("CARGO_PKG_VERSION"));

    let indir = std::path::absolute(&config.indir)
        .map(|path| clean_path(&path))
        .with_context(|| format!("Failed to resolve input directory {}", config.indir.display()))?;
    if !indir.is_dir() {
        return Err(PackError::missing_input_dir(&indir).into());
    }

    let cwd = std::env::current_dir().context("Failed to get current directory")?;
    let output_path = clean_path(&resolve_output_path(&cwd, &indir, config.outfile.as_deref()));
    tracing::info!("Input directory: {}", indir.display());
    tracing::info!("Output file: {}", output_path.display());

    if !config.dry_run {
        ensure_writable(&output_path, config.force)?;
    }

    let rules = build_ignore_rules(&indir, &config.ignore)?;
    tracing::debug!(
        base = %rules.base_dir().display(),
        patterns = rules.patterns().len(),
        "Ignore rules ready"
    );

    let scan = FileWalker::new(&indir, Arc::new(rules), config.comments.clone())
        .skip_path(&output_path)
        .scan()?;

    let mut summary = PackSummary {
        output_path,
        ignored: scan.stats.ignored,
        not_code: scan.stats.not_code,
        symlinks: scan.stats.symlinks,
        dry_run: config.dry_run,
        ..PackSummary::default()
    };

    if config.dry_run {
        summary.files_packed = scan.files.len();
        summary.bytes_written = scan.files.iter().map(|f| f.size).sum();
        utils::dry_run::display_dry_run(&scan.files, &summary, config.quiet)?;
        return Ok(summary);
    }

    let file = File::create(&summary.output_path).with_context(|| {
        format!("Failed to create output file {}", summary.output_path.display())
    })?;
    let mut writer = PackWriter::new(BufWriter::new(file), input_dir_name(&indir));
    pack_codebase(&scan.files, &mut writer)
        .with_context(|| format!("Failed to write {}", summary.output_path.display()))?;
    let (stats, _) = writer.finish()?;

    summary.files_packed = stats.packed;
    summary.bytes_written = stats.bytes_written;
    summary.unreadable = stats.unreadable;

    tracing::info!(
        files = summary.files_packed,
        bytes = summary.bytes_written,
        "Pack completed"
    );
    utils::summary::display_summary(&summary, config.quiet)?;

    Ok(summary)
}
