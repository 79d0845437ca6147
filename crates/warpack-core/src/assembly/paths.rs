//! Archive path computation.

use crate::Result;
use crate::WarError;
use std::path::Component;
use std::path::Path;

/// Mount prefix for trees placed at the archive root.
pub const ROOT_PREFIX: &str = "";

/// Mount prefix for compiled output, sources and resources.
pub const CLASSES_PREFIX: &str = "WEB-INF/classes/";

/// Mount prefix for bundled dependency jars.
pub const LIB_PREFIX: &str = "WEB-INF/lib/";

/// Entry name of the manifest.
pub const MANIFEST_PATH: &str = "META-INF/MANIFEST.MF";

/// Entry name of the deployment descriptor.
pub const DESCRIPTOR_PATH: &str = "WEB-INF/web.xml";

/// Computes the archive path of `file` found under `source_root`.
///
/// The path relative to the root is joined with `/` regardless of the host
/// separator and appended to `mount_prefix`.
///
/// # Errors
///
/// Returns an error if:
/// - `file` is not under `source_root`
/// - a path component is not valid UTF-8
///
/// # Examples
///
/// ```
/// use warpack_core::assembly::paths::CLASSES_PREFIX;
/// use warpack_core::assembly::paths::map_path;
/// use std::path::Path;
///
/// let path = map_path(
///     Path::new("/proj/target/classes"),
///     CLASSES_PREFIX,
///     Path::new("/proj/target/classes/myapp/core.class"),
/// )?;
/// assert_eq!(path, "WEB-INF/classes/myapp/core.class");
/// # Ok::<(), warpack_core::WarError>(())
/// ```
pub fn map_path(source_root: &Path, mount_prefix: &str, file: &Path) -> Result<String> {
    let relative = file
        .strip_prefix(source_root)
        .map_err(|_| WarError::PathOutsideRoot {
            path: file.to_path_buf(),
            root: source_root.to_path_buf(),
        })?;

    let mut archive_path = String::from(mount_prefix);
    let mut first = true;
    for component in relative.components() {
        let Component::Normal(part) = component else {
            continue;
        };
        let part = part.to_str().ok_or_else(|| WarError::NonUtf8Path {
            path: file.to_path_buf(),
        })?;
        if !first {
            archive_path.push('/');
        }
        archive_path.push_str(part);
        first = false;
    }

    Ok(archive_path)
}
