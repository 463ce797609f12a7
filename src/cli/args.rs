// Copyright (c) 2025-2026 the codepacker contributors
// SPDX-License-Identifier: Apache-2.0

use crate::cli::config::IgnoreErrorPolicy;
use clap::Parser;
use std::path::PathBuf;

const EXAMPLES: &str = "Examples:
  codepacker --indir ./myproject --outfile output.txt -v
  codepacker --indir /path/to/code/project --force

Walks the input directory, keeps files whose extension has a known comment
syntax, and concatenates them into one file, each preceded by a comment
header with its path. .gitignore rules up to the repository root apply.";

/// CLI argument parsing with environment variable support.
///
/// Environment variables follow the pattern `CODEPACKER_*` and are overridden by CLI flags.
/// Example: `CODEPACKER_INDIR=src` is overridden by `--indir lib`.
#[derive(Parser, Debug)]
#[command(name = "codepacker")]
#[command(about = "Concatenate source code files with comment headers, honoring .gitignore")]
#[command(version)]
#[command(after_help = EXAMPLES)]
pub struct Args {
    /// Input directory to process
    #[arg(short, long, default_value = ".", env = "CODEPACKER_INDIR")]
    pub indir: PathBuf,

    /// Output file path, relative to the current directory [default: <indir name>.txt]
    #[arg(short, long, env = "CODEPACKER_OUTFILE")]
    pub outfile: Option<PathBuf>,

    /// Overwrite the output file if it exists
    #[arg(short, long, env = "CODEPACKER_FORCE")]
    pub force: bool,

    /// Config file path
    #[arg(short, long, default_value = DEFAULT_CONFIG_FILE, env = "CODEPACKER_CONFIG")]
    pub config: PathBuf,

    /// Additional ignore pattern (repeatable)
    #[arg(long, value_name = "GLOB")]
    pub exclude: Vec<String>,

    /// Do not apply the built-in excludes (node_modules, target, .git, ...)
    #[arg(long)]
    pub no_default_excludes: bool,

    /// What to do when an ignore file cannot be read
    #[arg(long, value_enum, value_name = "POLICY")]
    pub on_ignore_error: Option<IgnoreErrorPolicy>,

    /// List the files that would be packed without writing anything
    #[arg(long, env = "CODEPACKER_DRY_RUN")]
    pub dry_run: bool,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress non-essential output
    #[arg(short, long)]
    pub quiet: bool,
}

pub const DEFAULT_CONFIG_FILE: &str = "codepacker.toml";

pub fn parse() -> Args {
    Args::parse()
}
