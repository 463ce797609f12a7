// Copyright (c) 2025-2026 the codepacker contributors
// SPDX-License-Identifier: Apache-2.0

//! Dry-run mode display: which files would be packed, nothing written.

use crate::packer::{FileEntry, PackSummary};
use crate::utils::formatting::{format_number, format_size};
use anyhow::Result;
use console::{Term, style};
use std::io::Write;

/// Display the files a real run would pack, in output order.
///
/// # Errors
///
/// Returns an error if writing to the terminal fails.
pub fn display_dry_run(files: &[FileEntry], summary: &PackSummary, quiet: bool) -> Result<()> {
    if quiet {
        return Ok(());
    }

    let mut term = Term::stdout();
    write_dry_run(&mut term, files, summary)
}

fn write_dry_run<W: Write>(out: &mut W, files: &[FileEntry], summary: &PackSummary) -> Result<()> {
    writeln!(out)?;
    writeln!(
        out,
        "{} - nothing will be written to {}",
        style("Dry Run").yellow().bold(),
        summary.output_path.display()
    )?;
    writeln!(out)?;
    writeln!(out, "{}:", style("Files to be packed").bold())?;

    for (i, file) in files.iter().enumerate() {
        let prefix = if i + 1 == files.len() {
            "\u{2514}\u{2500}"
        } else {
            "\u{251c}\u{2500}"
        };
        writeln!(
            out,
            "{} {} ({})",
            style(prefix).dim(),
            file.relative_path.display(),
            format_size(file.size)
        )?;
    }

    writeln!(out)?;
    writeln!(
        out,
        "{} files, {} of source; {} ignored, {} not code",
        format_number(files.len() as u64),
        format_size(summary.bytes_written),
        format_number(summary.ignored as u64),
        format_number(summary.not_code as u64)
    )?;

    Ok(())
}
