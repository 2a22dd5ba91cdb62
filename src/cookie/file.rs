use std::collections::BTreeMap;

use anyhow::{Context, Result};
use log::{debug, warn};

use crate::filelock::{read_file_lock, update_file_lock};

use super::CookieStore;

/// Cookie jar persisted as a JSON object on disk, so that a login performed by one
/// process is visible to the next one. Every access goes through a file lock.
pub struct FileCookieStore {
    path: String,
}

impl FileCookieStore {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }

    fn read(&self) -> Result<BTreeMap<String, String>> {
        let data = read_file_lock(&self.path)?.unwrap_or_default();
        Ok(self.parse(&data))
    }

    fn parse(&self, data: &[u8]) -> BTreeMap<String, String> {
        if data.is_empty() {
            return BTreeMap::new();
        }
        match serde_json::from_slice(data) {
            Ok(cookies) => cookies,
            Err(_) => {
                warn!(
                    "Cookie file '{}' has invalid data, we will ignore it",
                    self.path
                );
                BTreeMap::new()
            }
        }
    }

    /// Applies `change` to the stored cookies while holding the file lock. The file is
    /// rewritten only when `change` returns true.
    fn update<F>(&self, change: F) -> Result<()>
    where
        F: FnOnce(&mut BTreeMap<String, String>) -> bool,
    {
        update_file_lock(&self.path, |data| {
            let mut cookies = self.parse(data);
            if !change(&mut cookies) {
                return Ok(None);
            }
            Ok(Some(serde_json::to_vec(&cookies)?))
        })
        .with_context(|| format!("update cookie file '{}'", self.path))
    }

    fn read_or_empty(&self) -> BTreeMap<String, String> {
        match self.read() {
            Ok(cookies) => cookies,
            Err(err) => {
                warn!("Read cookie file '{}' failed: {err:#}", self.path);
                BTreeMap::new()
            }
        }
    }
}

impl CookieStore for FileCookieStore {
    fn get(&self, name: &str) -> Option<String> {
        self.read_or_empty().remove(name)
    }

    fn set(&self, name: &str, value: &str) -> Result<()> {
        debug!("Save cookie '{name}' to '{}'", self.path);
        self.update(|cookies| {
            cookies.insert(name.to_string(), value.to_string());
            true
        })
    }

    fn remove(&self, name: &str) -> Result<()> {
        self.update(|cookies| {
            let removed = cookies.remove(name).is_some();
            if removed {
                debug!("Remove cookie '{name}' from '{}'", self.path);
            }
            removed
        })
    }

    fn all(&self) -> Vec<(String, String)> {
        self.read_or_empty().into_iter().collect()
    }
}
