pub mod file;
pub mod memory;

use anyhow::Result;
use cookie::time::{Duration, OffsetDateTime};
use cookie::Cookie;
use log::warn;

/// Key-value cookie storage shared between the transport (which fills it from
/// `Set-Cookie` headers) and the auth client (which reads the login cookie).
pub trait CookieStore: Send + Sync {
    /// Returns the value of the named cookie, or `None` when absent.
    fn get(&self, name: &str) -> Option<String>;

    fn set(&self, name: &str, value: &str) -> Result<()>;

    fn remove(&self, name: &str) -> Result<()>;

    /// All cookies, sorted by name.
    fn all(&self) -> Vec<(String, String)>;

    /// Value for the `Cookie` request header, `None` when the store is empty.
    fn header_value(&self) -> Option<String> {
        let cookies = self.all();
        if cookies.is_empty() {
            return None;
        }
        let pairs: Vec<String> = cookies
            .into_iter()
            .map(|(name, value)| Cookie::new(name, value).stripped().to_string())
            .collect();
        Some(pairs.join("; "))
    }

    /// Applies one `Set-Cookie` header value to the store.
    fn apply_set_cookie(&self, header: &str) -> Result<()> {
        let cookie = match Cookie::parse(header) {
            Ok(cookie) => cookie,
            Err(err) => {
                warn!("Ignore invalid Set-Cookie header from server: {err}");
                return Ok(());
            }
        };
        if is_removal(&cookie, OffsetDateTime::now_utc()) {
            return self.remove(cookie.name());
        }
        self.set(cookie.name(), cookie.value_trimmed())
    }
}

/// A `Set-Cookie` deletes the cookie when its value is empty, its `Max-Age` is zero or
/// negative, or its `Expires` is not after `now`.
pub fn is_removal(cookie: &Cookie<'_>, now: OffsetDateTime) -> bool {
    if cookie.value_trimmed().is_empty() {
        return true;
    }
    if let Some(max_age) = cookie.max_age() {
        return max_age <= Duration::ZERO;
    }
    match cookie.expires_datetime() {
        Some(expires) => expires <= now,
        None => false,
    }
}
