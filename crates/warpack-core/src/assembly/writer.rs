//! WAR archive writer.
//!
//! Assembly is a straight line: open the output, write the manifest, write
//! the descriptor, then each source tree in a fixed order, then close. Any
//! failure aborts the whole build. The archive is staged in a temporary file
//! next to its destination and only renamed into place once the container
//! has been finished, so a failed build never leaves a truncated archive at
//! the target path.

use crate::BuildConfig;
use crate::Result;
use crate::WarError;
use crate::assembly::filters::should_skip;
use crate::assembly::paths::CLASSES_PREFIX;
use crate::assembly::paths::DESCRIPTOR_PATH;
use crate::assembly::paths::LIB_PREFIX;
use crate::assembly::paths::MANIFEST_PATH;
use crate::assembly::paths::ROOT_PREFIX;
use crate::assembly::paths::map_path;
use crate::assembly::report::BuildReport;
use crate::assembly::walker::SourceTree;
use crate::config::ArchiveKind;
use std::collections::HashSet;
use std::fs;
use std::fs::File;
use std::io::Read;
use std::io::Seek;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;
use std::time::Instant;
use tracing::debug;
use tracing::info;
use tracing::trace;
use tracing::warn;
use zip::CompressionMethod;
use zip::DateTime;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

const COPY_BUFFER_SIZE: usize = 64 * 1024;

/// Writes a WAR archive for a resolved [`BuildConfig`].
///
/// # Examples
///
/// ```no_run
/// use warpack_core::BuildConfig;
/// use warpack_core::assembly::WarWriter;
///
/// let config = BuildConfig::new("myapp", "0.1.0", "myapp.core/handler", ".")?;
/// let report = WarWriter::new(&config).write("<web-app/>")?;
/// println!("wrote {} entries", report.entry_count());
/// # Ok::<(), warpack_core::WarError>(())
/// ```
#[derive(Debug)]
pub struct WarWriter<'a> {
    config: &'a BuildConfig,
}

impl<'a> WarWriter<'a> {
    /// Creates a writer for the given configuration.
    #[must_use]
    pub fn new(config: &'a BuildConfig) -> Self {
        Self { config }
    }

    /// Source trees in the order they are written: compiled output, sources
    /// and resources under `WEB-INF/classes/`, then static resources at the
    /// archive root.
    #[must_use]
    pub fn source_trees(&self) -> Vec<SourceTree> {
        let config = self.config;
        std::iter::once(&config.compile_path)
            .chain(&config.source_paths)
            .chain(&config.resource_paths)
            .map(|root| SourceTree::new(root, CLASSES_PREFIX))
            .chain(std::iter::once(SourceTree::new(
                &config.war_resources_path,
                ROOT_PREFIX,
            )))
            .collect()
    }

    /// Writes the archive with `descriptor` as its `WEB-INF/web.xml`.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - the target directory cannot be created
    /// - any source file cannot be read
    /// - a library jar is missing
    /// - the archive cannot be written or moved into place
    pub fn write(&self, descriptor: &str) -> Result<BuildReport> {
        let start = Instant::now();
        let config = self.config;
        let output = config.archive_path();

        fs::create_dir_all(&config.target_dir).map_err(|source| WarError::TargetDir {
            path: config.target_dir.clone(),
            source,
        })?;
        info!(path = %output.display(), "writing archive");

        let mut staging = tempfile::Builder::new()
            .prefix(".warpack-")
            .suffix(".tmp")
            .tempfile_in(&config.target_dir)?;
        let mut report = BuildReport::new();
        // A tree may contain the target directory; never archive our own output.
        let own_files = [staging.path().to_path_buf(), output.clone()];

        {
            let mut sink = EntrySink::new(staging.as_file_mut(), &mut report);
            sink.add_bytes(MANIFEST_PATH, config.manifest.render().as_bytes())?;
            sink.add_bytes(DESCRIPTOR_PATH, descriptor.as_bytes())?;

            for tree in self.source_trees() {
                self.write_tree(&mut sink, &tree, &own_files)?;
            }
            if config.kind == ArchiveKind::Uberwar {
                self.write_libraries(&mut sink)?;
            }

            sink.finish()?;
        }

        staging.as_file().sync_all()?;
        let file = staging.persist(&output).map_err(|e| WarError::Io(e.error))?;

        report.archive_size = file.metadata()?.len();
        report.output_path = output;
        report.duration = start.elapsed();
        info!(
            entries = report.entry_count(),
            skipped = report.files_skipped,
            "archive complete"
        );

        Ok(report)
    }

    fn write_tree<W: Write + Seek>(
        &self,
        sink: &mut EntrySink<'_, W>,
        tree: &SourceTree,
        own_files: &[PathBuf],
    ) -> Result<()> {
        if !tree.exists() {
            debug!(
                root = %tree.root.display(),
                "source tree missing or not a directory, nothing to add"
            );
            return Ok(());
        }
        debug!(root = %tree.root.display(), mount = tree.mount, "adding source tree");

        for file in tree.files() {
            let file = file?;
            if own_files.contains(&file.path) {
                trace!(path = %file.path.display(), "skipping archive output");
                continue;
            }
            if should_skip(&file.path, &file.archive_path, &self.config.exclusions) {
                trace!(path = %file.archive_path, "excluded");
                sink.report.files_skipped += 1;
                continue;
            }
            sink.add_file(&file.archive_path, &file.path)?;
        }

        Ok(())
    }

    fn write_libraries<W: Write + Seek>(&self, sink: &mut EntrySink<'_, W>) -> Result<()> {
        for jar in &self.config.library_jars {
            let parent = jar.parent().unwrap_or_else(|| Path::new(""));
            let archive_path = map_path(parent, LIB_PREFIX, jar)?;
            if should_skip(jar, &archive_path, &self.config.exclusions) {
                trace!(path = %archive_path, "excluded");
                sink.report.files_skipped += 1;
                continue;
            }
            sink.add_file(&archive_path, jar)?;
        }
        Ok(())
    }
}

/// Streams entries into the container and records them in the report.
struct EntrySink<'r, W: Write + Seek> {
    zip: ZipWriter<W>,
    options: SimpleFileOptions,
    seen: HashSet<String>,
    report: &'r mut BuildReport,
    buffer: Vec<u8>,
}

impl<'r, W: Write + Seek> EntrySink<'r, W> {
    fn new(writer: W, report: &'r mut BuildReport) -> Self {
        // Fixed timestamps keep archives byte-identical across builds.
        let options = SimpleFileOptions::default()
            .compression_method(CompressionMethod::Deflated)
            .last_modified_time(DateTime::default())
            .unix_permissions(0o644);

        Self {
            zip: ZipWriter::new(writer),
            options,
            seen: HashSet::new(),
            report,
            buffer: vec![0u8; COPY_BUFFER_SIZE],
        }
    }

    /// First writer of a name wins; later ones are dropped with a warning.
    fn claim(&mut self, name: &str) -> bool {
        if self.seen.insert(name.to_string()) {
            return true;
        }
        warn!(path = name, "duplicate archive entry skipped");
        self.report.duplicates_skipped += 1;
        self.report
            .add_warning(format!("duplicate entry skipped: {name}"));
        false
    }

    fn add_bytes(&mut self, name: &str, data: &[u8]) -> Result<()> {
        if !self.claim(name) {
            return Ok(());
        }
        self.zip.start_file(name, self.options)?;
        self.zip.write_all(data)?;

        self.report.bytes_written += data.len() as u64;
        self.report.entries.push(name.to_string());
        trace!(path = name, "added entry");
        Ok(())
    }

    fn add_file(&mut self, name: &str, path: &Path) -> Result<()> {
        if !self.claim(name) {
            return Ok(());
        }
        let mut file = File::open(path)?;
        self.zip.start_file(name, self.options)?;

        let mut bytes_written = 0u64;
        loop {
            let bytes_read = file.read(&mut self.buffer)?;
            if bytes_read == 0 {
                break;
            }
            self.zip.write_all(&self.buffer[..bytes_read])?;
            bytes_written += bytes_read as u64;
        }

        self.report.files_added += 1;
        self.report.bytes_written += bytes_written;
        self.report.entries.push(name.to_string());
        trace!(path = name, bytes = bytes_written, "added file");
        Ok(())
    }

    fn finish(self) -> Result<()> {
        let mut writer = self.zip.finish()?;
        writer.flush()?;
        Ok(())
    }
}
