//! The only place the generator writes to disk
//!
//! Files are written only when absent and directories are created
//! unconditionally, so re-running against a half-generated project fills
//! in what is missing and leaves the rest alone.

use anyhow::{Context, Result};
use std::io;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;

/// What [`write_if_absent`] did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteOutcome {
    Written(PathBuf),
    /// A file (or anything else) already occupied the path
    Skipped(PathBuf),
}

impl WriteOutcome {
    pub fn path(&self) -> &Path {
        match self {
            WriteOutcome::Written(path) | WriteOutcome::Skipped(path) => path,
        }
    }

    pub fn was_written(&self) -> bool {
        matches!(self, WriteOutcome::Written(_))
    }
}

/// Write `content` to `root/relative` unless something already exists there
///
/// Bytes are written verbatim. The parent directory must already exist.
pub async fn write_if_absent(root: &Path, relative: &Path, content: &[u8]) -> Result<WriteOutcome> {
    let path = root.join(relative);

    let mut file = match fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&path)
        .await
    {
        Ok(file) => file,
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
            tracing::debug!(path = %path.display(), "exists, skipped");
            return Ok(WriteOutcome::Skipped(path));
        }
        Err(e) => {
            return Err(e).with_context(|| format!("Failed to create file: {}", path.display()))
        }
    };

    file.write_all(content)
        .await
        .with_context(|| format!("Failed to write file: {}", path.display()))?;
    file.flush()
        .await
        .with_context(|| format!("Failed to write file: {}", path.display()))?;

    tracing::debug!(path = %path.display(), bytes = content.len(), "written");
    Ok(WriteOutcome::Written(path))
}

/// Create each `root/relative` directory with its parents
pub async fn ensure_dirs(root: &Path, relatives: &[&str]) -> Result<()> {
    for relative in relatives {
        let dir = root.join(relative);
        fs::create_dir_all(&dir)
            .await
            .with_context(|| format!("Failed to create directory: {}", dir.display()))?;
        tracing::debug!(path = %dir.display(), "directory ensured");
    }
    Ok(())
}

/// Mark a file executable for everyone (no-op where there is no mode bit)
pub async fn set_executable(path: &Path) -> Result<()> {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mut perms = fs::metadata(path)
            .await
            .with_context(|| format!("Failed to read metadata: {}", path.display()))?
            .permissions();
        perms.set_mode(perms.mode() | 0o755);
        fs::set_permissions(path, perms)
            .await
            .with_context(|| format!("Failed to mark executable: {}", path.display()))?;
    }
    #[cfg(not(unix))]
    let _ = path;

    Ok(())
}
