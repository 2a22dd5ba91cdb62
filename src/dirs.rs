use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Result};

/// Creates `path` and its missing parents.
pub fn ensure_dir_exists(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)?;
    }
    Ok(())
}

fn home_dir() -> Result<PathBuf> {
    match std::env::var_os("HOME") {
        Some(dir) if !dir.is_empty() => Ok(PathBuf::from(dir)),
        _ => bail!("HOME is not set, please pass the config and data dirs explicitly"),
    }
}

/// `/etc/authclient` for root, `~/.config/authclient` otherwise.
pub fn config_dir() -> Result<PathBuf> {
    if is_root() {
        return Ok(PathBuf::from("/etc/authclient"));
    }
    Ok(home_dir()?.join(".config").join("authclient"))
}

/// Where the cookie jar lives: `/var/lib/authclient` for root,
/// `~/.local/share/authclient` otherwise.
pub fn data_dir() -> Result<PathBuf> {
    if is_root() {
        return Ok(PathBuf::from("/var/lib/authclient"));
    }
    Ok(home_dir()?.join(".local").join("share").join("authclient"))
}

#[cfg(unix)]
fn is_root() -> bool {
    unsafe { libc::geteuid() == 0 }
}

#[cfg(not(unix))]
fn is_root() -> bool {
    false
}
