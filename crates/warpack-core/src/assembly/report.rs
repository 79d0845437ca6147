//! Archive assembly reporting.

use std::path::PathBuf;
use std::time::Duration;

/// Report of a successful archive build.
///
/// # Examples
///
/// ```
/// use warpack_core::assembly::BuildReport;
///
/// let mut report = BuildReport::default();
/// report.files_added = 3;
/// report.add_warning("duplicate entry skipped: WEB-INF/classes/a.clj");
///
/// assert!(report.has_warnings());
/// ```
#[derive(Debug, Clone, Default)]
pub struct BuildReport {
    /// Path of the written archive.
    pub output_path: PathBuf,

    /// Entry names in the order they were written, manifest and
    /// descriptor included.
    pub entries: Vec<String>,

    /// Number of files copied from source trees and library jars.
    pub files_added: usize,

    /// Number of files left out by exclusion rules.
    pub files_skipped: usize,

    /// Number of files dropped because an earlier entry had the same name.
    pub duplicates_skipped: usize,

    /// Total uncompressed bytes written into entries.
    pub bytes_written: u64,

    /// Size of the finished archive on disk.
    pub archive_size: u64,

    /// Duration of the build.
    pub duration: Duration,

    /// Warnings generated during the build.
    pub warnings: Vec<String>,
}

impl BuildReport {
    /// Creates a new empty report.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a warning message to the report.
    pub fn add_warning(&mut self, msg: impl Into<String>) {
        self.warnings.push(msg.into());
    }

    /// Returns whether any warnings were generated.
    #[must_use]
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Total number of entries in the archive.
    #[must_use]
    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }

    /// Returns the compression ratio (uncompressed / archive size).
    ///
    /// Returns 0.0 if either size is 0.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn compression_ratio(&self) -> f64 {
        if self.archive_size == 0 || self.bytes_written == 0 {
            return 0.0;
        }
        self.bytes_written as f64 / self.archive_size as f64
    }
}
