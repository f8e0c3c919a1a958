//! Atomic badge persistence.
//!
//! Content is written to a uniquely named sibling of the output path and
//! renamed over it, so readers only ever see the old file or the complete
//! new one.

use std::path::Path;

use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{debug, warn};

use crate::config::PersistenceConfig;
use crate::error::PersistenceError;
use crate::utils::{is_dir_writable, parent_dir, temp_path_for};

/// Write `content` to `path` via temp file and rename
///
/// Missing parent directories are created. The parent must be writable even
/// when it already existed. On failure the temporary file is removed and
/// `path` is left untouched.
pub(crate) async fn write_atomic(
    path: &Path,
    content: &[u8],
    config: &PersistenceConfig,
) -> Result<(), PersistenceError> {
    let temp_path = temp_path_for(path)?;
    let dir = parent_dir(path);

    ensure_dir(&dir, config.dir_mode).await?;
    if !is_dir_writable(&dir) {
        return Err(PersistenceError::NotWritable { path: dir });
    }

    write_temp(&temp_path, content, config.file_mode).await?;

    debug!(?temp_path, ?path, "moving badge into place");
    if let Err(source) = fs::rename(&temp_path, path).await {
        remove_temp(&temp_path).await;
        return Err(PersistenceError::Rename {
            temp_path,
            dest_path: path.to_path_buf(),
            source,
        });
    }

    Ok(())
}

/// Create `dir` and its ancestors unless it already exists
#[cfg_attr(not(unix), allow(unused_variables))]
async fn ensure_dir(dir: &Path, mode: u32) -> Result<(), PersistenceError> {
    if fs::metadata(dir).await.map(|m| m.is_dir()).unwrap_or(false) {
        return Ok(());
    }

    let mut builder = fs::DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    builder.mode(mode);

    builder
        .create(dir)
        .await
        .map_err(|source| PersistenceError::CreateDirectory {
            path: dir.to_path_buf(),
            source,
        })?;

    // DirBuilder::mode is filtered through the umask
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        if let Err(e) = fs::set_permissions(dir, std::fs::Permissions::from_mode(mode)).await {
            warn!(?dir, error = %e, "could not set directory permissions");
        }
    }

    debug!(?dir, "created output directory");
    Ok(())
}

/// Write and flush the temporary file, then apply the final file mode
#[cfg_attr(not(unix), allow(unused_variables))]
async fn write_temp(temp_path: &Path, content: &[u8], mode: u32) -> Result<(), PersistenceError> {
    let result: std::io::Result<()> = async {
        let mut file = fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(temp_path)
            .await?;
        file.write_all(content).await?;
        file.sync_all().await?;
        drop(file);

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(temp_path, std::fs::Permissions::from_mode(mode)).await?;
        }

        Ok(())
    }
    .await;

    if let Err(source) = result {
        remove_temp(temp_path).await;
        return Err(PersistenceError::WriteTemp {
            path: temp_path.to_path_buf(),
            source,
        });
    }

    Ok(())
}

async fn remove_temp(temp_path: &Path) {
    match fs::remove_file(temp_path).await {
        Ok(()) => debug!(?temp_path, "removed temporary file"),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => warn!(?temp_path, error = %e, "could not remove temporary file"),
    }
}
