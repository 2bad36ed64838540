//! Test plan validation: runs before anything is spawned.

use std::ffi::OsStr;
use std::fs;
use std::path::{self, PathBuf};

use tracing::debug;

use crate::error::OrchestratorError;

/// JMeter test plan extension, compared case-sensitively.
pub const TEST_PLAN_EXTENSION: &str = "jmx";

/// Resolve `test_file` to an absolute, symlink-free path and check that it is
/// an existing `.jmx` file.
///
/// Relative paths are resolved against the current directory, since the
/// engine may be started elsewhere. The extension is checked on the resolved
/// target, so a `.jmx` symlink pointing at another kind of file is rejected.
pub fn resolve_test_plan(test_file: &str) -> Result<PathBuf, OrchestratorError> {
    if test_file.trim().is_empty() {
        return Err(OrchestratorError::TestFileNotFound(test_file.to_string()));
    }

    let absolute = path::absolute(test_file)
        .map_err(|_| OrchestratorError::TestFileNotFound(test_file.to_string()))?;

    // exists() follows symlinks, so dangling links count as missing
    if !absolute.exists() {
        return Err(OrchestratorError::TestFileNotFound(test_file.to_string()));
    }

    let resolved = fs::canonicalize(&absolute)
        .map_err(|_| OrchestratorError::TestFileNotFound(test_file.to_string()))?;

    if resolved.extension().and_then(OsStr::to_str) != Some(TEST_PLAN_EXTENSION) {
        return Err(OrchestratorError::InvalidExtension(test_file.to_string()));
    }

    if !resolved.is_file() {
        return Err(OrchestratorError::NotAFile(test_file.to_string()));
    }

    if resolved.to_str().is_none() {
        return Err(OrchestratorError::NonUtf8Path(test_file.to_string()));
    }

    let resolved = strip_verbatim(resolved);
    debug!(path = %resolved.display(), "test plan accepted");
    Ok(resolved)
}

/// Drop the `\\?\` prefix Windows `canonicalize` adds, which Java does not
/// accept after `-t`. Other paths pass through unchanged.
fn strip_verbatim(path: PathBuf) -> PathBuf {
    match path.to_str() {
        Some(s) if s.starts_with(r"\\?\UNC\") => PathBuf::from(format!(r"\\{}", &s[8..])),
        Some(s) if s.starts_with(r"\\?\") => PathBuf::from(&s[4..]),
        _ => path,
    }
}
