//! Utility functions for file operations and path manipulation

use crate::error::PersistenceError;
use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};

/// Directory that will contain `path`
///
/// A bare file name resolves to the current directory.
pub fn parent_dir(path: &Path) -> PathBuf {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

/// File name component of an output path
///
/// Paths such as `/` or `out/..` have none and cannot be written to.
pub fn output_file_name(path: &Path) -> Result<&OsStr, PersistenceError> {
    path.file_name().ok_or_else(|| PersistenceError::InvalidPath {
        path: path.to_path_buf(),
        reason: "output path has no file name".to_string(),
    })
}

/// Unique temporary sibling of `path`
///
/// The name embeds the process id and a random token so concurrent runs
/// writing into the same directory never collide:
/// `badge.svg` → `.badge.svg.tmp.4242.9f3c0a1b2d4e5f60`.
///
/// # Examples
///
/// ```
/// use badge_dl::utils::temp_path_for;
/// use std::path::Path;
///
/// let temp = temp_path_for(Path::new("out/badge.svg")).unwrap();
/// assert_eq!(temp.parent(), Some(Path::new("out")));
/// assert!(temp.file_name().unwrap().to_str().unwrap().starts_with(".badge.svg.tmp."));
/// ```
pub fn temp_path_for(path: &Path) -> Result<PathBuf, PersistenceError> {
    let file_name = output_file_name(path)?;

    let token: u64 = rand::random();
    let mut temp_name = OsString::from(".");
    temp_name.push(file_name);
    temp_name.push(format!(".tmp.{}.{:016x}", std::process::id(), token));
    Ok(parent_dir(path).join(temp_name))
}

/// Check whether the current process may create files in `dir`
pub fn is_dir_writable(dir: &Path) -> bool {
    #[cfg(unix)]
    {
        use std::ffi::CString;
        use std::os::unix::ffi::OsStrExt;

        let Ok(c_path) = CString::new(dir.as_os_str().as_bytes()) else {
            return false;
        };

        // SAFETY: c_path is a valid, null-terminated C string that outlives the call,
        // and access() only reads it.
        unsafe { libc::access(c_path.as_ptr(), libc::W_OK | libc::X_OK) == 0 }
    }

    #[cfg(not(unix))]
    {
        std::fs::metadata(dir)
            .map(|m| m.is_dir() && !m.permissions().readonly())
            .unwrap_or(false)
    }
}
