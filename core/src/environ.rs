//! The gateway environment handed over by the hosting server.
//!
//! # Design
//! Keys follow the CGI / WSGI naming convention: a handful of unprefixed
//! variables (`REQUEST_METHOD`, `PATH_INFO`, ...) and every other request
//! header under `HTTP_<NAME>`. Values are kept as owned strings and the body
//! as `Bytes`, so an `Environ` is plain data the host can build however it
//! likes.

use std::collections::BTreeMap;

use bytes::Bytes;

pub const REQUEST_METHOD: &str = "REQUEST_METHOD";
pub const PATH_INFO: &str = "PATH_INFO";
pub const QUERY_STRING: &str = "QUERY_STRING";
pub const CONTENT_TYPE: &str = "CONTENT_TYPE";
pub const CONTENT_LENGTH: &str = "CONTENT_LENGTH";
pub const SERVER_PROTOCOL: &str = "SERVER_PROTOCOL";
pub const HTTP_ACCEPT: &str = "HTTP_ACCEPT";
pub const HTTP_ACCEPT_ENCODING: &str = "HTTP_ACCEPT_ENCODING";
pub const HTTP_ACCEPT_LANGUAGE: &str = "HTTP_ACCEPT_LANGUAGE";
pub const HTTP_COOKIE: &str = "HTTP_COOKIE";
pub const HTTP_USER_AGENT: &str = "HTTP_USER_AGENT";

/// Opaque key/value environment for a single request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Environ {
    vars: BTreeMap<String, String>,
    input: Bytes,
}

impl Environ {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style setter.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    /// Attach the request body.
    pub fn with_input(mut self, input: impl Into<Bytes>) -> Self {
        self.input = input.into();
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.vars.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(String::as_str)
    }

    pub fn input(&self) -> &Bytes {
        &self.input
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.vars.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K, V> FromIterator<(K, V)> for Environ
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let vars = iter
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self {
            vars,
            input: Bytes::new(),
        }
    }
}

/// Environment key for a request header.
///
/// `Content-Type` and `Content-Length` map to their unprefixed variables;
/// everything else becomes `HTTP_` plus the upper-cased name with `-`
/// replaced by `_`.
pub fn header_key(name: &str) -> String {
    let key = name.replace('-', "_").to_ascii_uppercase();
    match key.as_str() {
        CONTENT_TYPE | CONTENT_LENGTH => key,
        _ => format!("HTTP_{key}"),
    }
}
