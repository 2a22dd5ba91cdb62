use std::io::{self, Read, Seek, SeekFrom, Write};

use anyhow::{Context, Result};
use file_lock::{FileLock, FileOptions};

/// Reads the whole file under a shared lock. A missing file reads as `None`.
pub fn read_file_lock(path: &str) -> Result<Option<Vec<u8>>> {
    let mut lock = match FileLock::lock(path, true, FileOptions::new().read(true)) {
        Ok(lock) => lock,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(err) => return Err(err).with_context(|| format!("lock file '{path}'")),
    };

    let mut data = Vec::new();
    lock.file.read_to_end(&mut data)?;
    Ok(Some(data))
}

/// Read-modify-write under one exclusive lock, so no other writer can slip in between.
/// `update` gets the current content (empty for a new file) and returns the new
/// content, or `None` to leave the file untouched.
pub fn update_file_lock<F>(path: &str, update: F) -> Result<()>
where
    F: FnOnce(&[u8]) -> Result<Option<Vec<u8>>>,
{
    let opts = FileOptions::new().read(true).write(true).create(true);
    let mut lock =
        FileLock::lock(path, true, opts).with_context(|| format!("lock file '{path}'"))?;

    let mut current = Vec::new();
    lock.file.read_to_end(&mut current)?;

    let data = match update(&current)? {
        Some(data) => data,
        None => return Ok(()),
    };

    lock.file.set_len(0)?;
    lock.file.seek(SeekFrom::Start(0))?;
    lock.file.write_all(&data)?;
    Ok(())
}
