//! Writing rendered files to storage.

use std::{
    io::Write,
    path::{Path, PathBuf},
};

use eyre::{Result, WrapErr};
use tempfile::NamedTempFile;
use tracing::{debug, info};

use crate::render::RenderedFile;

/// Result of writing one file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteResult {
    /// File was written.
    Written,
    /// File already had the rendered content.
    Unchanged,
    /// Dry run: nothing was touched.
    Skipped,
}

/// Statistics from a write operation.
#[derive(Debug, Default)]
pub struct WriteStats {
    pub written: usize,
    pub unchanged: usize,
    pub skipped: usize,
    pub written_paths: Vec<String>,
    pub skipped_paths: Vec<String>,
}

impl WriteStats {
    /// Total number of files processed.
    pub fn total(&self) -> usize {
        self.written + self.unchanged + self.skipped
    }
}

/// Writes rendered files under an output directory.
///
/// Runs after the pipeline completes. In dry-run mode nothing is written
/// and every file is reported as skipped.
#[derive(Debug, Clone)]
pub struct OutputWriter {
    base: PathBuf,
    dry_run: bool,
}

impl OutputWriter {
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self {
            base: base.into(),
            dry_run: false,
        }
    }

    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn base(&self) -> &Path {
        &self.base
    }

    /// Write one file, creating parent directories.
    pub fn write(&self, file: &RenderedFile) -> Result<WriteResult> {
        match self.stage(file)? {
            Some(staged) => {
                staged.commit()?;
                Ok(WriteResult::Written)
            }
            None if self.dry_run => Ok(WriteResult::Skipped),
            None => Ok(WriteResult::Unchanged),
        }
    }

    /// Write all files in order.
    ///
    /// Every changed file is staged as a temporary file next to its target
    /// before any target is replaced, so a failure while staging leaves the
    /// output directory as it was (apart from created directories).
    pub fn write_all(&self, files: &[RenderedFile]) -> Result<WriteStats> {
        let mut stats = WriteStats::default();
        let mut staged = Vec::new();
        for file in files {
            match self.stage(file)? {
                Some(pending) => staged.push(pending),
                None if self.dry_run => {
                    stats.skipped += 1;
                    stats.skipped_paths.push(file.path.clone());
                }
                None => stats.unchanged += 1,
            }
        }
        for pending in staged {
            stats.written_paths.push(pending.relative.clone());
            pending.commit()?;
            stats.written += 1;
        }

        info!(
            written = stats.written,
            unchanged = stats.unchanged,
            skipped = stats.skipped,
            "output complete"
        );
        Ok(stats)
    }

    /// Stage `file` unless this is a dry run or the target already holds
    /// the rendered content.
    fn stage(&self, file: &RenderedFile) -> Result<Option<Staged>> {
        if self.dry_run {
            debug!(path = %file.path, "dry run, not writing");
            return Ok(None);
        }
        let path = self.base.join(&file.path);
        if std::fs::read_to_string(&path).is_ok_and(|existing| existing == file.content) {
            debug!(path = %path.display(), "unchanged");
            return Ok(None);
        }

        let parent = path.parent().unwrap_or(self.base.as_path());
        std::fs::create_dir_all(parent)
            .wrap_err_with(|| format!("failed to create {}", parent.display()))?;
        let mut temp = NamedTempFile::new_in(parent)
            .wrap_err_with(|| format!("failed to stage {}", path.display()))?;
        temp.write_all(file.content.as_bytes())
            .wrap_err_with(|| format!("failed to stage {}", path.display()))?;
        Ok(Some(Staged {
            relative: file.path.clone(),
            path,
            temp,
        }))
    }
}

/// A rendered file waiting in a temporary file beside its target.
struct Staged {
    relative: String,
    path: PathBuf,
    temp: NamedTempFile,
}

impl Staged {
    fn commit(self) -> Result<()> {
        let Staged { path, temp, .. } = self;
        temp.persist(&path)
            .wrap_err_with(|| format!("failed to write {}", path.display()))?;
        debug!(path = %path.display(), "written");
        Ok(())
    }
}
