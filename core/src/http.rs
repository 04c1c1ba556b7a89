//! HTTP vocabulary shared by requests, responses and routers.
//!
//! # Design
//! The status table is deliberately small: it only lists the codes this
//! crate's own responses and routers produce. It is not a general registry;
//! handlers that need other codes get `Error::UnsupportedStatus` at
//! serialization time.

use std::fmt;

/// HTTP request method.
///
/// Variants are declared in the canonical order used when listing allowed
/// methods, and `Ord` follows that order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Method {
    Get,
    Head,
    Post,
    Put,
    Patch,
    Delete,
    Connect,
    Options,
    Trace,
}

impl Method {
    /// Every method, in declaration order.
    pub const ALL: [Method; 9] = [
        Method::Get,
        Method::Head,
        Method::Post,
        Method::Put,
        Method::Patch,
        Method::Delete,
        Method::Connect,
        Method::Options,
        Method::Trace,
    ];

    /// Parse a method name, ignoring ASCII case. Unknown verbs yield `None`.
    pub fn parse(method: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|m| m.as_str().eq_ignore_ascii_case(method))
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Head => "HEAD",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
            Method::Connect => "CONNECT",
            Method::Options => "OPTIONS",
            Method::Trace => "TRACE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub const OK: u16 = 200;
pub const TEMPORARY_REDIRECT: u16 = 307;
pub const PERMANENT_REDIRECT: u16 = 308;
pub const NOT_FOUND: u16 = 404;

/// Canonical reason phrase for a supported status code.
pub fn reason_phrase(status: u16) -> Option<&'static str> {
    match status {
        OK => Some("OK"),
        TEMPORARY_REDIRECT => Some("Temporary Redirect"),
        PERMANENT_REDIRECT => Some("Permanent Redirect"),
        NOT_FOUND => Some("Not Found"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_ignores_case() {
        assert_eq!(Method::parse("get"), Some(Method::Get));
        assert_eq!(Method::parse("Delete"), Some(Method::Delete));
        assert_eq!(Method::parse("OPTIONS"), Some(Method::Options));
    }

    #[test]
    fn parse_rejects_unknown_verbs() {
        assert_eq!(Method::parse("BREW"), None);
        assert_eq!(Method::parse(""), None);
    }

    #[test]
    fn ordering_follows_declaration_order() {
        let mut methods = vec![Method::Post, Method::Trace, Method::Get, Method::Options];
        methods.sort();
        assert_eq!(methods, vec![Method::Get, Method::Post, Method::Options, Method::Trace]);
    }

    #[test]
    fn reason_phrases_cover_the_table_only() {
        assert_eq!(reason_phrase(200), Some("OK"));
        assert_eq!(reason_phrase(307), Some("Temporary Redirect"));
        assert_eq!(reason_phrase(308), Some("Permanent Redirect"));
        assert_eq!(reason_phrase(404), Some("Not Found"));
        assert_eq!(reason_phrase(500), None);
    }
}
