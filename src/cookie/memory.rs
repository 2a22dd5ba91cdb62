use std::collections::BTreeMap;
use std::sync::RwLock;

use anyhow::{bail, Result};

use super::CookieStore;

/// Process-local cookie jar. Lost on exit.
#[derive(Debug, Default)]
pub struct MemoryCookieStore {
    cookies: RwLock<BTreeMap<String, String>>,
}

impl MemoryCookieStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_cookie(self, name: &str, value: &str) -> Self {
        if let Ok(mut cookies) = self.cookies.write() {
            cookies.insert(name.to_string(), value.to_string());
        }
        self
    }
}

impl CookieStore for MemoryCookieStore {
    fn get(&self, name: &str) -> Option<String> {
        let cookies = self.cookies.read().ok()?;
        cookies.get(name).cloned()
    }

    fn set(&self, name: &str, value: &str) -> Result<()> {
        let mut cookies = match self.cookies.write() {
            Ok(cookies) => cookies,
            Err(_) => bail!("cookie store lock poisoned"),
        };
        cookies.insert(name.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, name: &str) -> Result<()> {
        let mut cookies = match self.cookies.write() {
            Ok(cookies) => cookies,
            Err(_) => bail!("cookie store lock poisoned"),
        };
        cookies.remove(name);
        Ok(())
    }

    fn all(&self) -> Vec<(String, String)> {
        match self.cookies.read() {
            Ok(cookies) => cookies
                .iter()
                .map(|(name, value)| (name.clone(), value.clone()))
                .collect(),
            Err(_) => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store() {
        let store = MemoryCookieStore::new().with_cookie("AuthToken", "abc");
        assert_eq!(store.get("AuthToken"), Some(String::from("abc")));
        assert_eq!(store.get("Other"), None);

        store.set("AuthToken", "def").unwrap();
        store.set("lang", "en").unwrap();
        assert_eq!(
            store.all(),
            vec![
                (String::from("AuthToken"), String::from("def")),
                (String::from("lang"), String::from("en")),
            ]
        );

        store.remove("AuthToken").unwrap();
        store.remove("missing").unwrap();
        assert_eq!(store.get("AuthToken"), None);
        assert_eq!(store.all().len(), 1);
    }
}
