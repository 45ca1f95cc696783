use anyhow::{Context, Result};
use std::fs::{self, File};
use std::io::Write;
#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

/// Ensure the parent directory of `path` exists.
pub fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).context("Failed to create credential file directory")?;
        }
    }
    Ok(())
}

/// Create `path` as an empty file readable only by the owner, unless it already exists.
pub fn touch_secure(path: &Path) -> Result<()> {
    if path.exists() {
        return Ok(());
    }
    ensure_parent(path)?;
    File::create(path).context("Failed to create credential file")?;
    #[cfg(unix)]
    set_perm_0600(path);
    Ok(())
}

/// Atomically write `bytes` to `path` with secure permissions (0600 on Unix).
pub fn atomic_write_secure(path: &Path, bytes: &[u8]) -> Result<()> {
    let tmp_path = tmp_path_for(path);
    {
        let mut tmp =
            File::create(&tmp_path).context("Failed to create temporary credential file")?;
        tmp.write_all(bytes)?;
        let _ = tmp.sync_data();
    }

    #[cfg(unix)]
    set_perm_0600(&tmp_path);

    fs::rename(&tmp_path, path).context("Failed to replace credential file")?;
    Ok(())
}

#[cfg(unix)]
fn set_perm_0600(path: &Path) {
    if let Ok(meta) = fs::metadata(path) {
        let mut perm = meta.permissions();
        perm.set_mode(0o600);
        let _ = fs::set_permissions(path, perm);
    }
}

fn tmp_path_for(path: &Path) -> PathBuf {
    PathBuf::from(format!("{}.tmp", path.display()))
}

fn backup_path(path: &Path, n: usize) -> PathBuf {
    PathBuf::from(format!("{}.{n}", path.display()))
}

/// Rotate backups and write atomically, keeping up to `n` backups.
/// Backups are named `<file>.1`, `<file>.2`, ..., `<file>.N`. With `n == 0` the file is
/// simply replaced.
pub fn write_with_backups_n(path: &Path, bytes: &[u8], n: usize) -> Result<()> {
    ensure_parent(path)?;

    if n > 0 {
        let oldest = backup_path(path, n);
        let _ = fs::remove_file(&oldest);

        // n-1 -> n, ..., 1 -> 2
        for i in (1..n).rev() {
            let src = backup_path(path, i);
            let dst = backup_path(path, i + 1);
            if src.exists() {
                let _ = fs::rename(&src, &dst);
            }
        }

        if path.exists() {
            let first = backup_path(path, 1);
            fs::copy(path, &first).context("Failed to back up credential file")?;
            #[cfg(unix)]
            set_perm_0600(&first);
        }
    }

    atomic_write_secure(path, bytes)
}
