//! Error types for WAR assembly operations.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using `WarError`.
pub type Result<T> = std::result::Result<T, WarError>;

/// Errors that can occur while building a web archive.
#[derive(Error, Debug)]
pub enum WarError {
    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The archive container rejected an operation.
    #[error("archive error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// The project file could not be parsed.
    #[error("invalid project file: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// Configuration is incomplete or inconsistent.
    #[error("invalid configuration: {reason}")]
    Config {
        /// What is wrong with the configuration.
        reason: String,
    },

    /// A user-supplied exclusion pattern is not a valid regular expression.
    #[error("invalid exclusion pattern '{pattern}': {source}")]
    InvalidPattern {
        /// The offending pattern.
        pattern: String,
        /// Underlying regex error.
        #[source]
        source: regex::Error,
    },

    /// The upstream compile step failed; assembly never started.
    #[error("compilation failed: {reason}")]
    CompileFailed {
        /// Reason reported by the compiler service.
        reason: String,
    },

    /// The deployment descriptor could not be produced.
    #[error("cannot build deployment descriptor: {reason}")]
    Descriptor {
        /// Reason for the failure.
        reason: String,
    },

    /// The output directory could not be created.
    #[error("cannot create target directory {path}: {source}")]
    TargetDir {
        /// Directory that could not be created.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A walked file does not live under the tree root it was found in.
    #[error("path {path} is not under source root {root}")]
    PathOutsideRoot {
        /// The file path.
        path: PathBuf,
        /// The tree root.
        root: PathBuf,
    },

    /// Archive entry names must be valid UTF-8.
    #[error("path is not valid UTF-8: {path}")]
    NonUtf8Path {
        /// The offending path.
        path: PathBuf,
    },
}

impl WarError {
    /// Returns `true` if this error was caused by the project configuration
    /// rather than by the filesystem or the compile step.
    ///
    /// # Examples
    ///
    /// ```
    /// use warpack_core::WarError;
    ///
    /// let err = WarError::Config {
    ///     reason: "missing handler".to_string(),
    /// };
    /// assert!(err.is_config_error());
    ///
    /// let err = WarError::CompileFailed {
    ///     reason: "exit status 1".to_string(),
    /// };
    /// assert!(!err.is_config_error());
    /// ```
    #[must_use]
    pub const fn is_config_error(&self) -> bool {
        matches!(
            self,
            Self::ConfigParse(_) | Self::Config { .. } | Self::InvalidPattern { .. }
        )
    }

    /// Returns a context string for this error, if available.
    ///
    /// # Examples
    ///
    /// ```
    /// use warpack_core::WarError;
    ///
    /// let err = WarError::Descriptor {
    ///     reason: "empty tag".to_string(),
    /// };
    /// assert_eq!(err.context(), Some("empty tag"));
    /// ```
    #[must_use]
    pub fn context(&self) -> Option<&str> {
        match self {
            Self::Config { reason }
            | Self::CompileFailed { reason }
            | Self::Descriptor { reason } => Some(reason),
            Self::InvalidPattern { pattern, .. } => Some(pattern),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = WarError::Config {
            reason: "ring.handler is required".into(),
        };
        assert_eq!(
            err.to_string(),
            "invalid configuration: ring.handler is required"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: WarError = io_err.into();
        assert!(matches!(err, WarError::Io(_)));
        assert!(!err.is_config_error());
    }

    #[test]
    fn test_target_dir_error_display() {
        let err = WarError::TargetDir {
            path: PathBuf::from("/readonly/target"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        let display = err.to_string();
        assert!(display.contains("/readonly/target"));
        assert!(display.contains("denied"));
    }

    #[test]
    fn test_invalid_pattern_keeps_source() {
        use std::error::Error;

        let source = regex::Regex::new("(").unwrap_err();
        let err = WarError::InvalidPattern {
            pattern: "(".into(),
            source,
        };
        assert!(err.is_config_error());
        assert!(err.source().is_some());
        assert_eq!(err.context(), Some("("));
    }

    #[test]
    fn test_context() {
        let err = WarError::CompileFailed {
            reason: "exit status 2".into(),
        };
        assert_eq!(err.context(), Some("exit status 2"));

        let err = WarError::NonUtf8Path {
            path: PathBuf::from("x"),
        };
        assert_eq!(err.context(), None);
    }
}
