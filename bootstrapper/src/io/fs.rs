//! Filesystem helpers shared by the stages.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::debug;

use crate::error::BootstrapError;

/// Create `path` (and parents) if missing; reuse it otherwise.
pub fn ensure_dir(path: &Path) -> Result<()> {
    fs::create_dir_all(path).with_context(|| format!("create directory {}", path.display()))
}

/// Create `path` if missing and return its canonical absolute form.
pub fn ensure_dir_canonical(path: &Path) -> Result<PathBuf> {
    ensure_dir(path)?;
    canonical(path)
}

pub fn canonical(path: &Path) -> Result<PathBuf> {
    fs::canonicalize(path).with_context(|| format!("resolve {}", path.display()))
}

/// Replace `path` wholesale with `contents` (temp file + rename).
///
/// Never merges with or appends to an existing file.
pub fn write_replacing(path: &Path, contents: &str) -> Result<(), BootstrapError> {
    let config_write = |source: std::io::Error| BootstrapError::ConfigWrite {
        path: path.to_path_buf(),
        source,
    };
    let mut tmp_name = path.file_name().unwrap_or_default().to_os_string();
    tmp_name.push(".tmp");
    let tmp_path = path.with_file_name(tmp_name);
    fs::write(&tmp_path, contents).map_err(config_write)?;
    if let Err(err) = fs::rename(&tmp_path, path) {
        // best effort
        let _ = fs::remove_file(&tmp_path);
        return Err(config_write(err));
    }
    debug!(path = %path.display(), "wrote file");
    Ok(())
}

/// Remove a directory tree if it exists.
pub fn remove_dir_if_present(path: &Path) -> Result<()> {
    if !path.exists() {
        return Ok(());
    }
    debug!(path = %path.display(), "removing directory");
    fs::remove_dir_all(path).with_context(|| format!("remove {}", path.display()))
}

/// Read the permission mode of `path` and rewrite it with `update` applied.
///
/// Returns the mode now on disk. Writes nothing when `update` changes no bits.
#[cfg(unix)]
pub fn update_mode(path: &Path, update: impl FnOnce(u32) -> u32) -> Result<u32> {
    use std::os::unix::fs::PermissionsExt;

    let meta = fs::metadata(path).with_context(|| format!("stat {}", path.display()))?;
    let mut perms = meta.permissions();
    let mode = perms.mode();
    let wanted = update(mode);
    if wanted != mode {
        perms.set_mode(wanted);
        fs::set_permissions(path, perms)
            .with_context(|| format!("set permissions on {}", path.display()))?;
        debug!(
            path = %path.display(),
            from = %format!("{mode:o}"),
            to = %format!("{wanted:o}"),
            "updated mode"
        );
    }
    Ok(wanted)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_replacing_overwrites_instead_of_appending() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("re.user.yml");
        fs::write(&path, "old: 1\nstale: 2\nextra: 3\n").expect("seed");

        write_replacing(&path, "new: 1\n").expect("write");
        assert_eq!(fs::read_to_string(&path).expect("read"), "new: 1\n");
        assert!(!temp.path().join("re.user.yml.tmp").exists());
    }

    #[test]
    fn write_into_missing_directory_is_config_write_error() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("missing").join("re.user.yml");
        let err = write_replacing(&path, "x: 1\n").unwrap_err();
        assert!(matches!(err, BootstrapError::ConfigWrite { .. }));
    }

    #[test]
    fn failed_replace_leaves_no_temp_file() {
        let temp = tempfile::tempdir().expect("tempdir");
        // a non-empty directory in the way makes the rename fail after the temp write
        let path = temp.path().join("re.user.yml");
        fs::create_dir(&path).expect("mkdir");
        fs::write(path.join("occupied"), "").expect("seed");

        let err = write_replacing(&path, "x: 1\n").unwrap_err();
        assert!(matches!(err, BootstrapError::ConfigWrite { .. }));
        assert!(!temp.path().join("re.user.yml.tmp").exists());
        assert!(path.join("occupied").exists());
    }

    #[test]
    fn ensure_dir_reuses_existing() {
        let temp = tempfile::tempdir().expect("tempdir");
        let dir = temp.path().join("out");
        ensure_dir(&dir).expect("create");
        fs::write(dir.join("keep"), "").expect("write");
        ensure_dir(&dir).expect("reuse");
        assert!(dir.join("keep").exists());
    }

    #[test]
    fn remove_dir_if_present_tolerates_missing() {
        let temp = tempfile::tempdir().expect("tempdir");
        remove_dir_if_present(&temp.path().join("nope")).expect("noop");
    }

    #[cfg(unix)]
    #[test]
    fn update_mode_applies_transform() {
        use std::os::unix::fs::PermissionsExt;

        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("tool");
        fs::write(&path, "").expect("write");
        fs::set_permissions(&path, fs::Permissions::from_mode(0o644)).expect("chmod");

        let mode = update_mode(&path, |m| m | 0o100).expect("update");
        assert_eq!(mode & 0o777, 0o744);
        let on_disk = fs::metadata(&path).expect("stat").permissions().mode();
        assert_eq!(on_disk & 0o777, 0o744);
    }
}
