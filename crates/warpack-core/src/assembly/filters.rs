//! Exclusion rules for archive assembly.
//!
//! A file is left out of the archive if its base name follows the editor
//! lock-file (`#foo`, `.#foo`) or backup-file (`foo~`) conventions, or if its
//! archive path matches any user-supplied pattern. Rules never look at file
//! contents.

use crate::Result;
use crate::WarError;
use regex::Regex;
use std::path::Path;

/// Patterns used when a project does not set `war-exclusions`: any path
/// component starting with a dot.
pub const DEFAULT_WAR_EXCLUSIONS: &[&str] = &[r"(^|/)\."];

/// Compiled user-supplied exclusion patterns.
///
/// Patterns are regular expressions searched (not anchored) within the
/// archive-relative path. Order is irrelevant: a path is excluded if any
/// pattern matches.
///
/// # Examples
///
/// ```
/// use warpack_core::assembly::filters::ExclusionRules;
///
/// let rules = ExclusionRules::new(&[r"\.bak$", "^WEB-INF/classes/dev/"])?;
/// assert!(rules.matches("WEB-INF/classes/config.bak"));
/// assert!(rules.matches("WEB-INF/classes/dev/seed.sql"));
/// assert!(!rules.matches("index.html"));
/// # Ok::<(), warpack_core::WarError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct ExclusionRules {
    patterns: Vec<Regex>,
}

impl ExclusionRules {
    /// Compiles a set of patterns.
    ///
    /// # Errors
    ///
    /// Returns [`WarError::InvalidPattern`] for the first pattern that is not
    /// a valid regular expression.
    pub fn new<S: AsRef<str>>(patterns: &[S]) -> Result<Self> {
        let patterns = patterns
            .iter()
            .map(|p| {
                let pattern = p.as_ref();
                Regex::new(pattern).map_err(|source| WarError::InvalidPattern {
                    pattern: pattern.to_string(),
                    source,
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { patterns })
    }

    /// Rules that exclude nothing.
    #[must_use]
    pub fn none() -> Self {
        Self::default()
    }

    /// Returns `true` if any pattern matches `archive_path`.
    #[must_use]
    pub fn matches(&self, archive_path: &str) -> bool {
        self.patterns.iter().any(|re| re.is_match(archive_path))
    }

    /// The source text of each pattern.
    pub fn patterns(&self) -> impl Iterator<Item = &str> {
        self.patterns.iter().map(Regex::as_str)
    }

    /// Number of patterns.
    #[must_use]
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    /// Whether there are no patterns.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

/// Decides whether a file is omitted from the archive.
///
/// # Examples
///
/// ```
/// use warpack_core::assembly::filters::ExclusionRules;
/// use warpack_core::assembly::filters::should_skip;
/// use std::path::Path;
///
/// let rules = ExclusionRules::none();
/// assert!(should_skip(Path::new("src/.#core.clj"), "WEB-INF/classes/.#core.clj", &rules));
/// assert!(should_skip(Path::new("src/core.clj~"), "WEB-INF/classes/core.clj~", &rules));
/// assert!(!should_skip(Path::new("src/core.clj"), "WEB-INF/classes/core.clj", &rules));
/// ```
#[must_use]
pub fn should_skip(source_file: &Path, archive_path: &str, rules: &ExclusionRules) -> bool {
    let base_name = source_file
        .file_name()
        .map(|n| n.to_string_lossy())
        .unwrap_or_default();

    is_editor_lock(&base_name) || is_backup(&base_name) || rules.matches(archive_path)
}

/// Emacs-style lock and autosave names: an optional `.` followed by `#`.
#[must_use]
pub fn is_editor_lock(base_name: &str) -> bool {
    base_name
        .strip_prefix('.')
        .unwrap_or(base_name)
        .starts_with('#')
}

/// Backup names ending in `~`.
#[must_use]
pub fn is_backup(base_name: &str) -> bool {
    base_name.ends_with('~')
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_is_editor_lock() {
        assert!(is_editor_lock(".#lock"));
        assert!(is_editor_lock("#lock"));
        assert!(is_editor_lock("#core.clj#"));
        assert!(!is_editor_lock("..#lock"));
        assert!(!is_editor_lock("lock#"));
        assert!(!is_editor_lock(".lock"));
        assert!(!is_editor_lock(""));
    }

    #[test]
    fn test_is_backup() {
        assert!(is_backup("core.clj~"));
        assert!(is_backup("~"));
        assert!(!is_backup("~core.clj"));
    }

    #[test]
    fn test_should_skip_lock_files_regardless_of_rules() {
        let rules = ExclusionRules::none();
        assert!(should_skip(Path::new("/p/src/.#lock"), ".#lock", &rules));
        assert!(should_skip(Path::new("/p/src/#lock"), "#lock", &rules));
    }

    #[test]
    fn test_should_skip_checks_base_name_only() {
        let rules = ExclusionRules::none();
        // A lock-looking directory does not exclude its children.
        assert!(!should_skip(
            Path::new("/p/#dir/file.txt"),
            "#dir/file.txt",
            &rules
        ));
    }

    #[test]
    fn test_should_skip_user_pattern_against_archive_path() {
        let rules = ExclusionRules::new(&["^WEB-INF/classes/secret/"]).unwrap();
        assert!(should_skip(
            Path::new("/p/resources/secret/key.pem"),
            "WEB-INF/classes/secret/key.pem",
            &rules
        ));
        // The same file mounted elsewhere is kept.
        assert!(!should_skip(
            Path::new("/p/resources/secret/key.pem"),
            "secret/key.pem",
            &rules
        ));
    }

    #[test]
    fn test_should_skip_normal_files() {
        let rules = ExclusionRules::new(DEFAULT_WAR_EXCLUSIONS).unwrap();
        assert!(!should_skip(
            Path::new("/p/target/classes/myapp/core.class"),
            "WEB-INF/classes/myapp/core.class",
            &rules
        ));
        assert!(!should_skip(Path::new("/p/index.html"), "index.html", &rules));
    }

    #[test]
    fn test_default_exclusions() {
        let rules = ExclusionRules::new(DEFAULT_WAR_EXCLUSIONS).unwrap();
        assert!(rules.matches(".hidden"));
        assert!(rules.matches("css/.sass-cache/x"));
        assert!(!rules.matches("css/site.css"));
    }

    #[test]
    fn test_rules_accessors() {
        let rules = ExclusionRules::new(&["a", "b+"]).unwrap();
        assert_eq!(rules.len(), 2);
        assert!(!rules.is_empty());
        assert_eq!(rules.patterns().collect::<Vec<_>>(), vec!["a", "b+"]);
        assert!(ExclusionRules::none().is_empty());
    }

    #[test]
    fn test_invalid_pattern() {
        let err = ExclusionRules::new(&["ok", "[bad"]).unwrap_err();
        assert!(matches!(err, WarError::InvalidPattern { ref pattern, .. } if pattern == "[bad"));
    }
}
