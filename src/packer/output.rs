// Copyright (c) 2025-2026 the codepacker contributors
// SPDX-License-Identifier: Apache-2.0

use crate::packer::comments::CommentStyle;
use crate::packer::walker::FileEntry;
use crate::utils::error::PackError;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Name used in headers and for the default output file.
pub fn input_dir_name(indir: &Path) -> String {
    indir
        .file_name()
        .map_or_else(|| "root".to_string(), |name| name.to_string_lossy().into_owned())
}

/// Output file location: `outfile` under `cwd`, or `<input dir name>.txt`.
pub fn resolve_output_path(cwd: &Path, indir: &Path, outfile: Option<&Path>) -> PathBuf {
    match outfile {
        Some(outfile) => cwd.join(outfile),
        None => cwd.join(format!("{}.txt", input_dir_name(indir))),
    }
}

/// Refuse to clobber an existing output file unless `force` is set.
pub fn ensure_writable(path: &Path, force: bool) -> Result<(), PackError> {
    if !force && path.exists() {
        return Err(PackError::OutputExists {
            path: path.to_path_buf(),
        });
    }
    Ok(())
}

/// `<prepend> <dir name>/<relative path> <append>\n`
///
/// Both spaces are always written, even for line comments with no `append`.
pub fn format_header(dir_name: &str, relative_path: &Path, comment: &CommentStyle) -> String {
    format!(
        "{} {} {}\n",
        comment.prepend,
        Path::new(dir_name).join(relative_path).display(),
        comment.append
    )
}

/// Totals for one pack run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PackStats {
    pub packed: usize,
    pub unreadable: usize,
    pub bytes_written: u64,
}

/// Writes header + content blocks to the output.
pub struct PackWriter<W: Write> {
    inner: W,
    dir_name: String,
    stats: PackStats,
}

impl<W: Write> PackWriter<W> {
    pub fn new(inner: W, dir_name: impl Into<String>) -> Self {
        Self {
            inner,
            dir_name: dir_name.into(),
            stats: PackStats::default(),
        }
    }

    pub fn write_file(
        &mut self,
        relative_path: &Path,
        comment: &CommentStyle,
        content: &[u8],
    ) -> Result<(), PackError> {
        let header = format_header(&self.dir_name, relative_path, comment);
        self.inner.write_all(header.as_bytes())?;
        self.inner.write_all(content)?;
        self.inner.write_all(b"\n\n")?;

        let written = header.len() + content.len() + 2;
        self.stats.bytes_written += written as u64;
        self.stats.packed += 1;
        Ok(())
    }

    pub fn stats(&self) -> PackStats {
        self.stats
    }

    /// Flush and hand back the inner writer.
    pub fn finish(mut self) -> Result<(PackStats, W), PackError> {
        self.inner.flush()?;
        Ok((self.stats, self.inner))
    }
}

/// Write every file in `files` in order. Unreadable files are skipped.
pub fn pack_codebase<W: Write>(
    files: &[FileEntry],
    writer: &mut PackWriter<W>,
) -> Result<(), PackError> {
    for file in files {
        let content = match std::fs::read(&file.path) {
            Ok(content) => content,
            Err(e) => {
                tracing::warn!("Skipping (unreadable): {}: {}", file.path.display(), e);
                writer.stats.unreadable += 1;
                continue;
            }
        };

        tracing::debug!("Processing: {}", file.path.display());
        writer.write_file(&file.relative_path, &file.comment, &content)?;
    }
    Ok(())
}
