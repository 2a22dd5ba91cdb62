use anyhow::{bail, Result};
use reqwest::Url;
use serde::{Deserialize, Serialize};

use crate::config::{expandenv, CommonConfig, PathSet};

use super::{AUTH_API_BASE_URL, AUTH_COOKIE_NAME};

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ClientConfig {
    #[serde(default = "ClientConfig::default_base_url")]
    pub base_url: String,

    #[serde(default = "ClientConfig::default_cookie_name")]
    pub cookie_name: String,

    #[serde(default = "ClientConfig::default_cookie_path")]
    pub cookie_path: String,
}

impl CommonConfig for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: Self::default_base_url(),
            cookie_name: Self::default_cookie_name(),
            cookie_path: Self::default_cookie_path(),
        }
    }

    fn complete(&mut self, ps: &PathSet) -> Result<()> {
        self.base_url = expandenv("base_url", &self.base_url)?;
        let base_url = self.base_url.trim_end_matches('/');
        if base_url.is_empty() {
            bail!("base_url cannot be empty");
        }
        let parsed = match Url::parse(base_url) {
            Ok(url) => url,
            Err(_) => bail!("invalid base_url '{base_url}'"),
        };
        match parsed.scheme() {
            "http" | "https" => {}
            _ => bail!(
                "invalid base_url scheme, expect 'http' or 'https', not '{}'",
                parsed.scheme()
            ),
        }
        self.base_url = base_url.to_string();

        self.cookie_name = expandenv("cookie_name", &self.cookie_name)?;
        if self.cookie_name.is_empty() {
            bail!("cookie_name cannot be empty");
        }

        self.cookie_path = expandenv("cookie_path", &self.cookie_path)?;
        if self.cookie_path.is_empty() {
            let path = ps.data_path.join("cookies.json");
            self.cookie_path = format!("{}", path.display());
        }

        Ok(())
    }
}

impl ClientConfig {
    pub fn default_base_url() -> String {
        String::from(AUTH_API_BASE_URL)
    }

    pub fn default_cookie_name() -> String {
        String::from(AUTH_COOKIE_NAME)
    }

    pub fn default_cookie_path() -> String {
        String::new()
    }
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::PathBuf;

    use super::*;

    fn test_path_set(name: &str) -> (PathSet, PathBuf) {
        let base = PathBuf::from(format!("_test_client_config_{name}"));
        let ps = PathSet::new(Some(base.join("config")), Some(base.join("data"))).unwrap();
        (ps, base)
    }

    #[test]
    fn test_defaults() {
        let (ps, base) = test_path_set("defaults");
        let cfg: ClientConfig = ps.load_config("client", ClientConfig::default).unwrap();
        assert_eq!(cfg.base_url, "http://localhost:5255/api/auth");
        assert_eq!(cfg.cookie_name, "AuthToken");
        assert_eq!(
            PathBuf::from(&cfg.cookie_path),
            base.join("data").join("cookies.json")
        );
        fs::remove_dir_all(base).unwrap();
    }

    #[test]
    fn test_load_from_file() {
        let (ps, base) = test_path_set("file");
        fs::write(
            ps.config_path.join("client.toml"),
            "base_url = \"https://auth.example.com/api/auth/\"\ncookie_name = \"sid\"\n",
        )
        .unwrap();

        let cfg: ClientConfig = ps.load_config("client", ClientConfig::default).unwrap();
        assert_eq!(cfg.base_url, "https://auth.example.com/api/auth");
        assert_eq!(cfg.cookie_name, "sid");
        fs::remove_dir_all(base).unwrap();
    }

    #[test]
    fn test_invalid() {
        let (ps, base) = test_path_set("invalid");
        let cases = [
            "base_url = \"ftp://auth.example.com\"\n",
            "base_url = \"not a url\"\n",
            "base_url = \"\"\n",
            "cookie_name = \"\"\n",
        ];
        for case in cases {
            fs::write(ps.config_path.join("client.toml"), case).unwrap();
            let result: Result<ClientConfig> = ps.load_config("client", ClientConfig::default);
            assert!(result.is_err(), "{case}");
        }
        fs::remove_dir_all(base).unwrap();
    }
}
