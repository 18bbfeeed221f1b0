//! Flash messages carried across a redirect.
//!
//! Messages are stored client-side in the `channel_flash` cookie as a
//! URL-encoded JSON list. The next rendered page reads them and clears the
//! cookie, so each message is shown once.

use axum::http::{header, HeaderMap, HeaderValue};
use serde::{Deserialize, Serialize};
use tracing::warn;

pub const FLASH_COOKIE: &str = "channel_flash";

/// Bootstrap alert flavour of a flash message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlashKind {
    Success,
    Info,
    Warning,
    Danger,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlashMessage {
    pub kind: FlashKind,
    pub message: String,
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct FlashBag {
    messages: Vec<FlashMessage>,
}

impl FlashBag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads pending messages from the request's `Cookie` headers.
    ///
    /// A malformed cookie is logged and treated as empty.
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let Some(raw) = find_cookie(headers, FLASH_COOKIE) else {
            return Self::new();
        };

        let decoded = match urlencoding::decode(&raw) {
            Ok(decoded) => decoded.into_owned(),
            Err(e) => {
                warn!(error = %e, "Discarding undecodable flash cookie");
                return Self::new();
            }
        };

        match serde_json::from_str::<Vec<FlashMessage>>(&decoded) {
            Ok(messages) => Self { messages },
            Err(e) => {
                warn!(error = %e, "Discarding malformed flash cookie");
                Self::new()
            }
        }
    }

    /// Whether the request carries a flash cookie at all, readable or not.
    pub fn is_present(headers: &HeaderMap) -> bool {
        find_cookie(headers, FLASH_COOKIE).is_some()
    }

    pub fn add(&mut self, kind: FlashKind, message: impl Into<String>) {
        self.messages.push(FlashMessage {
            kind,
            message: message.into(),
        });
    }

    pub fn success(&mut self, message: impl Into<String>) {
        self.add(FlashKind::Success, message);
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn messages(&self) -> &[FlashMessage] {
        &self.messages
    }

    pub fn into_messages(self) -> Vec<FlashMessage> {
        self.messages
    }

    /// `Set-Cookie` value storing the pending messages, or `None` when empty.
    pub fn to_cookie(&self) -> Option<HeaderValue> {
        if self.messages.is_empty() {
            return None;
        }

        let json = match serde_json::to_string(&self.messages) {
            Ok(json) => json,
            Err(e) => {
                warn!(error = %e, "Failed to serialize flash messages");
                return None;
            }
        };

        let cookie = format!(
            "{}={}; Path=/; HttpOnly; SameSite=Lax",
            FLASH_COOKIE,
            urlencoding::encode(&json)
        );
        HeaderValue::from_str(&cookie).ok()
    }

    /// `Set-Cookie` value that deletes the flash cookie.
    pub fn clear_cookie() -> HeaderValue {
        HeaderValue::from_static("channel_flash=; Path=/; Max-Age=0; HttpOnly; SameSite=Lax")
    }
}

/// Finds a cookie value by name across all `Cookie` headers.
fn find_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers_with_cookie(cookie: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_str(cookie).unwrap());
        headers
    }

    /// Turns a `Set-Cookie` value into the `Cookie` header a browser would send back.
    fn echo(set_cookie: &HeaderValue) -> String {
        set_cookie
            .to_str()
            .unwrap()
            .split(';')
            .next()
            .unwrap()
            .to_string()
    }

    #[test]
    fn test_cookie_round_trip() {
        let mut bag = FlashBag::new();
        bag.success("The config news is saved");

        let set_cookie = bag.to_cookie().expect("cookie expected");
        let headers = headers_with_cookie(&echo(&set_cookie));

        let restored = FlashBag::from_headers(&headers);
        assert_eq!(restored, bag);
        assert_eq!(restored.messages()[0].kind, FlashKind::Success);
    }

    #[test]
    fn test_empty_bag_has_no_cookie() {
        assert!(FlashBag::new().to_cookie().is_none());
    }

    #[test]
    fn test_missing_cookie_is_empty() {
        let headers = headers_with_cookie("session=abc; theme=dark");
        assert!(FlashBag::from_headers(&headers).is_empty());
        assert!(FlashBag::from_headers(&HeaderMap::new()).is_empty());
    }

    #[test]
    fn test_malformed_cookie_is_empty() {
        let headers = headers_with_cookie("channel_flash=not-json");
        assert!(FlashBag::from_headers(&headers).is_empty());
        assert!(FlashBag::is_present(&headers));
    }

    #[test]
    fn test_is_present() {
        assert!(FlashBag::is_present(&headers_with_cookie("a=1; channel_flash=")));
        assert!(!FlashBag::is_present(&headers_with_cookie("session=abc")));
        assert!(!FlashBag::is_present(&HeaderMap::new()));
    }

    #[test]
    fn test_cookie_among_others() {
        let mut bag = FlashBag::new();
        bag.add(FlashKind::Info, "hello; world");
        let cookie = format!("a=1; {}; b=2", echo(&bag.to_cookie().unwrap()));

        let restored = FlashBag::from_headers(&headers_with_cookie(&cookie));
        assert_eq!(restored.messages()[0].message, "hello; world");
    }

    #[test]
    fn test_clear_cookie_expires() {
        let value = FlashBag::clear_cookie();
        assert!(value.to_str().unwrap().contains("Max-Age=0"));
    }
}
