// Copyright (c) 2025-2026 the codepacker contributors
// SPDX-License-Identifier: Apache-2.0

//! Success summary display for completed pack runs.

use crate::packer::PackSummary;
use crate::utils::formatting::{format_number, format_size};
use anyhow::Result;
use console::{Term, style};
use std::io::Write;

/// Display a success summary after the output file is written.
///
/// # Arguments
///
/// * `summary` - Counts gathered during the run
/// * `quiet` - If true, suppresses output entirely
///
/// # Errors
///
/// Returns an error if writing to the terminal fails.
pub fn display_summary(summary: &PackSummary, quiet: bool) -> Result<()> {
    if quiet {
        return Ok(());
    }

    let mut term = Term::stdout();
    write_summary(&mut term, summary)
}

fn write_summary<W: Write>(out: &mut W, summary: &PackSummary) -> Result<()> {
    writeln!(out)?;
    writeln!(
        out,
        "{} {}",
        style("\u{2713}").green().bold(),
        style("Source files packed").bold()
    )?;

    writeln!(out)?;
    writeln!(
        out,
        "{} Output: {} ({})",
        style("\u{251c}\u{2500}").dim(),
        summary.output_path.display(),
        format_size(summary.bytes_written)
    )?;
    writeln!(
        out,
        "{} Files packed: {}",
        style("\u{251c}\u{2500}").dim(),
        format_number(summary.files_packed as u64)
    )?;
    writeln!(
        out,
        "{} Skipped: {} ignored, {} not code, {} symlinks, {} unreadable",
        style("\u{2514}\u{2500}").dim(),
        format_number(summary.ignored as u64),
        format_number(summary.not_code as u64),
        format_number(summary.symlinks as u64),
        format_number(summary.unreadable as u64)
    )?;
    writeln!(out)?;

    Ok(())
}
