//! Directory skeleton, links and the fake su shim
//!
//! Each primitive succeeds silently when the target is already in the
//! desired state, so the builders can be re-run over an existing sandbox.

use std::fs::{self, OpenOptions};
use std::io::ErrorKind;
use std::os::unix::fs::{symlink, PermissionsExt};
use std::path::Path;

use tracing::trace;

use crate::error::{AptVenvError, Result};
use crate::paths::{EnvPaths, DATA_SUBDIRS, FAKE_SU_LINKS, TRUSTED_LINKS};
use crate::templates::FAKE_SU;

/// Create a directory and its parents, no error if present
pub fn ensure_dir(path: &Path) -> Result<()> {
    fs::create_dir_all(path)?;
    Ok(())
}

/// Create `link` pointing at `target` unless that exact link already exists
pub fn ensure_symlink(target: &Path, link: &Path) -> Result<()> {
    match fs::read_link(link) {
        Ok(existing) if existing == target => {
            trace!("link {} already present", link.display());
            return Ok(());
        }
        Err(e) if e.kind() == ErrorKind::NotFound => {}
        // another link, or not a link at all
        _ => {
            return Err(AptVenvError::SymlinkConflict {
                link: link.to_path_buf(),
                expected: target.to_path_buf(),
            })
        }
    }

    trace!("linking {} -> {}", link.display(), target.display());
    symlink(target, link)?;
    Ok(())
}

/// Point `link` at `target`, replacing a previous link or file at that path
pub fn replace_symlink(target: &Path, link: &Path) -> Result<()> {
    match fs::symlink_metadata(link) {
        Ok(meta) if meta.is_dir() => {
            return Err(AptVenvError::SymlinkConflict {
                link: link.to_path_buf(),
                expected: target.to_path_buf(),
            })
        }
        Ok(_) => fs::remove_file(link)?,
        Err(e) if e.kind() == ErrorKind::NotFound => {}
        Err(e) => return Err(e.into()),
    }

    trace!("linking {} -> {}", link.display(), target.display());
    symlink(target, link)?;
    Ok(())
}

/// Create an empty file if absent, never truncating an existing one
pub fn ensure_file(path: &Path) -> Result<()> {
    OpenOptions::new().create(true).append(true).open(path)?;
    Ok(())
}

/// Add the owner execute bit to the current mode
pub fn make_executable(path: &Path) -> Result<()> {
    let mut permissions = fs::metadata(path)?.permissions();
    permissions.set_mode(permissions.mode() | 0o100);
    fs::set_permissions(path, permissions)?;
    Ok(())
}

/// Write `content`, replacing whatever the file held before
pub fn write_file(path: &Path, content: &str) -> Result<()> {
    trace!("writing {}", path.display());
    fs::write(path, content)?;
    Ok(())
}

/// Base directories, apt's state tree, trusted keys and the dpkg status file
pub fn create_base(paths: &EnvPaths) -> Result<()> {
    ensure_dir(&paths.config_path)?;
    ensure_dir(&paths.cache_path)?;

    for dir in DATA_SUBDIRS {
        ensure_dir(&paths.in_data(dir))?;
    }

    for link in TRUSTED_LINKS {
        ensure_symlink(&Path::new("/").join(link), &paths.in_data(link))?;
    }

    ensure_file(&paths.dpkg_status())
}

/// `bin/` with the fake su shim and its sudo/su aliases
pub fn create_bin(paths: &EnvPaths) -> Result<()> {
    let bin_dir = paths.bin_dir();
    ensure_dir(&bin_dir)?;

    let fake_su = paths.fake_su();
    write_file(&fake_su, FAKE_SU)?;
    make_executable(&fake_su)?;

    for name in FAKE_SU_LINKS {
        ensure_symlink(&fake_su, &bin_dir.join(name))?;
    }
    Ok(())
}
