//! Directory tree walking for archive assembly.
//!
//! Each source tree is a filesystem root plus the archive prefix its files
//! are mounted under. Walking yields regular files only, in file-name order,
//! so the same tree always produces the same entry sequence.

use crate::Result;
use crate::WarError;
use crate::assembly::paths::map_path;
use std::path::Path;
use std::path::PathBuf;
use walkdir::WalkDir;

/// A filesystem tree mounted at a fixed archive prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceTree {
    /// Directory walked on disk.
    pub root: PathBuf,
    /// Archive prefix, empty or ending in `/`.
    pub mount: &'static str,
}

/// A regular file found while walking a [`SourceTree`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeFile {
    /// Full filesystem path.
    pub path: PathBuf,
    /// Archive entry name.
    pub archive_path: String,
}

impl SourceTree {
    /// Creates a tree rooted at `root` and mounted at `mount`.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>, mount: &'static str) -> Self {
        Self {
            root: root.into(),
            mount,
        }
    }

    /// Whether the root is a directory on disk. A missing root, or one that
    /// is a plain file, contributes no files.
    #[must_use]
    pub fn exists(&self) -> bool {
        self.root.is_dir()
    }

    /// Returns an iterator over every regular file in the tree.
    ///
    /// Directories produce no items, and neither does the root itself.
    /// Symlinks are followed, so a link to a file is archived as that file's
    /// content.
    ///
    /// # Errors
    ///
    /// Items may error if:
    /// - a directory cannot be read
    /// - a symlink loop is detected
    /// - a path is not valid UTF-8
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use warpack_core::assembly::paths::CLASSES_PREFIX;
    /// use warpack_core::assembly::walker::SourceTree;
    ///
    /// let tree = SourceTree::new("target/classes", CLASSES_PREFIX);
    /// for file in tree.files() {
    ///     println!("{}", file?.archive_path);
    /// }
    /// # Ok::<(), warpack_core::WarError>(())
    /// ```
    pub fn files(&self) -> impl Iterator<Item = Result<TreeFile>> + '_ {
        let walker = self.exists().then(|| {
            WalkDir::new(&self.root)
                .min_depth(1)
                .follow_links(true)
                .sort_by_file_name()
                .into_iter()
        });

        walker.into_iter().flatten().filter_map(move |entry| match entry {
            Ok(entry) if entry.file_type().is_file() => Some(self.tree_file(entry.path())),
            Ok(_) => None,
            Err(e) => Some(Err(walk_error(&e))),
        })
    }

    fn tree_file(&self, path: &Path) -> Result<TreeFile> {
        Ok(TreeFile {
            archive_path: map_path(&self.root, self.mount, path)?,
            path: path.to_path_buf(),
        })
    }
}

fn walk_error(err: &walkdir::Error) -> WarError {
    let path = err
        .path()
        .map_or_else(String::new, |p| format!(" at {}", p.display()));
    WarError::Io(std::io::Error::other(format!("walkdir error{path}: {err}")))
}
