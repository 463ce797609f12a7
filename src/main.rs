// Copyright (c) 2025-2026 the codepacker contributors
// SPDX-License-Identifier: Apache-2.0

use anyhow::Result;
use codepacker::utils::error::{PackError, format_error};
use codepacker::{cli, run};

fn main() {
    // Determine verbose mode early for error formatting (before config is parsed)
    let verbose = std::env::args().any(|arg| arg == "-v" || arg.starts_with("-vv"));

    if let Err(e) = run_main() {
        display_error(&e, verbose);
        std::process::exit(1);
    }
}

/// Display an error with contextual formatting.
///
/// Tries to downcast to `PackError` for rich formatting, falls back to
/// anyhow's error chain display for other errors.
fn display_error(error: &anyhow::Error, verbose: bool) {
    if let Some(pack_error) = error.downcast_ref::<PackError>() {
        eprintln!("{}", format_error(pack_error, verbose));
    } else {
        eprintln!("\n\u{26a0} Error: {}", error);

        let causes: Vec<_> = error.chain().skip(1).collect();
        if !causes.is_empty() {
            eprintln!("\nCaused by:");
            for (i, cause) in causes.iter().enumerate() {
                let prefix = if i == causes.len() - 1 {
                    "\u{2514}\u{2500}"
                } else {
                    "\u{251c}\u{2500}"
                };
                eprintln!("{} {}", prefix, cause);
            }
        }
    }
}

fn run_main() -> Result<()> {
    let args = cli::args::parse();

    // Load config from files + env vars, then let explicit CLI flags win
    let config = cli::config::load(&args)?;
    let merged_config = cli::config::merge_config(&args, config)?;

    codepacker::init_logging(merged_config.verbose, merged_config.quiet);

    run(&merged_config)?;
    Ok(())
}
