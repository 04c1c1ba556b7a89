//! Normalization of a gateway environment into a `Request`.
//!
//! # Design
//! Construction never fails. Malformed client input degrades to a safe
//! default (empty parameters, empty cookies, zero length) and the reason is
//! kept in `errors()` so the gateway can log it. Every field is private and
//! read through accessors; the routing cursor lives in `routing::Routed`,
//! not here, so `path` cannot change after construction.

use bytes::Bytes;

use crate::cookie::Cookies;
use crate::environ::{self, Environ};
use crate::error::InputError;
use crate::http::Method;
use crate::query::QueryParams;

/// A parsed, read-only view of one incoming request.
#[derive(Debug, Clone)]
pub struct Request {
    environ: Environ,
    method: Option<String>,
    path: String,
    query: Option<String>,
    get: QueryParams,
    parameters: QueryParams,
    cookies: Cookies,
    content_length: u64,
    content_type: Option<String>,
    accept: Option<String>,
    accept_encoding: Option<String>,
    accept_language: Option<String>,
    user_agent: Option<String>,
    errors: Vec<InputError>,
}

impl Request {
    pub fn new(environ: Environ) -> Self {
        let mut errors = Vec::new();

        let owned = |key: &str| environ.get(key).map(str::to_string);

        let method = environ
            .get(environ::REQUEST_METHOD)
            .map(str::to_ascii_uppercase);
        let path = owned(environ::PATH_INFO).unwrap_or_default();
        let query = owned(environ::QUERY_STRING);

        let content_length = parse_content_length(environ.get(environ::CONTENT_LENGTH))
            .unwrap_or_else(|e| {
                errors.push(e);
                0
            });

        let cookies = match environ.get(environ::HTTP_COOKIE) {
            Some(header) => Cookies::parse(header).unwrap_or_else(|reason| {
                errors.push(InputError::Cookie {
                    header: header.to_string(),
                    reason,
                });
                Cookies::new()
            }),
            None => Cookies::new(),
        };

        let get = match query.as_deref() {
            Some(raw) => QueryParams::parse(raw).unwrap_or_else(|reason| {
                errors.push(InputError::Query {
                    query: raw.to_string(),
                    reason,
                });
                QueryParams::new()
            }),
            None => QueryParams::new(),
        };

        let parameters = match method.as_deref() {
            Some("GET") => get.clone(),
            _ => QueryParams::new(),
        };

        let content_type = owned(environ::CONTENT_TYPE);
        let accept = owned(environ::HTTP_ACCEPT);
        let accept_encoding = owned(environ::HTTP_ACCEPT_ENCODING);
        let accept_language = owned(environ::HTTP_ACCEPT_LANGUAGE);
        let user_agent = owned(environ::HTTP_USER_AGENT);

        Self {
            environ,
            method,
            path,
            query,
            get,
            parameters,
            cookies,
            content_length,
            content_type,
            accept,
            accept_encoding,
            accept_language,
            user_agent,
            errors,
        }
    }

    /// The raw environment, unchanged.
    pub fn environ(&self) -> &Environ {
        &self.environ
    }

    /// Upper-cased request method, if the environment carried one.
    pub fn method(&self) -> Option<&str> {
        self.method.as_deref()
    }

    /// The method as a known verb; `None` when absent or unrecognized.
    pub fn known_method(&self) -> Option<Method> {
        self.method.as_deref().and_then(Method::parse)
    }

    /// Full request path as received.
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn query(&self) -> Option<&str> {
        self.query.as_deref()
    }

    /// Parameters parsed from the query string.
    pub fn get(&self) -> &QueryParams {
        &self.get
    }

    /// Request parameters: the query parameters for `GET`, empty otherwise.
    pub fn parameters(&self) -> &QueryParams {
        &self.parameters
    }

    pub fn cookies(&self) -> &Cookies {
        &self.cookies
    }

    pub fn content_length(&self) -> u64 {
        self.content_length
    }

    /// Request body.
    pub fn content(&self) -> &Bytes {
        self.environ.input()
    }

    pub fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }

    pub fn accept(&self) -> Option<&str> {
        self.accept.as_deref()
    }

    pub fn accept_encoding(&self) -> Option<&str> {
        self.accept_encoding.as_deref()
    }

    pub fn accept_language(&self) -> Option<&str> {
        self.accept_language.as_deref()
    }

    pub fn user_agent(&self) -> Option<&str> {
        self.user_agent.as_deref()
    }

    /// Input problems recovered during construction, in the order found.
    pub fn errors(&self) -> &[InputError] {
        &self.errors
    }
}

impl From<Environ> for Request {
    fn from(environ: Environ) -> Self {
        Self::new(environ)
    }
}

fn parse_content_length(raw: Option<&str>) -> Result<u64, InputError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(0),
        Some(value) => value
            .parse()
            .map_err(|_| InputError::ContentLength(value.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::environ::*;

    fn request(pairs: &[(&str, &str)]) -> Request {
        Request::new(pairs.iter().copied().collect())
    }

    #[test]
    fn extracts_method_and_path() {
        let req = request(&[(REQUEST_METHOD, "post"), (PATH_INFO, "/items/7")]);
        assert_eq!(req.method(), Some("POST"));
        assert_eq!(req.known_method(), Some(Method::Post));
        assert_eq!(req.path(), "/items/7");
        assert!(req.errors().is_empty());
    }

    #[test]
    fn missing_fields_are_absent() {
        let req = request(&[]);
        assert_eq!(req.method(), None);
        assert_eq!(req.path(), "");
        assert_eq!(req.query(), None);
        assert_eq!(req.accept(), None);
        assert_eq!(req.user_agent(), None);
        assert_eq!(req.content_length(), 0);
        assert!(req.get().is_empty());
        assert!(req.cookies().is_empty());
        assert!(req.errors().is_empty());
    }

    #[test]
    fn get_parameters_follow_query() {
        let req = request(&[(REQUEST_METHOD, "GET"), (QUERY_STRING, "foo=bar&baz=qux")]);
        assert_eq!(req.get().first("foo"), Some("bar"));
        assert_eq!(req.parameters().first("baz"), Some("qux"));
    }

    #[test]
    fn non_get_parameters_are_empty() {
        let req = request(&[(REQUEST_METHOD, "POST"), (QUERY_STRING, "foo=bar")]);
        assert_eq!(req.get().first("foo"), Some("bar"));
        assert!(req.parameters().is_empty());
    }

    #[test]
    fn malformed_query_yields_empty_mapping_and_note() {
        let req = request(&[(REQUEST_METHOD, "GET"), (QUERY_STRING, "a=1&b=%G0")]);
        assert!(req.get().is_empty());
        assert!(req.parameters().is_empty());
        assert_eq!(req.errors().len(), 1);
        assert!(matches!(req.errors()[0], InputError::Query { .. }));
    }

    #[test]
    fn content_length_normalizes() {
        assert_eq!(request(&[(CONTENT_LENGTH, "42")]).content_length(), 42);
        assert_eq!(request(&[(CONTENT_LENGTH, "")]).content_length(), 0);

        let bad = request(&[(CONTENT_LENGTH, "abc")]);
        assert_eq!(bad.content_length(), 0);
        assert_eq!(bad.errors(), [InputError::ContentLength("abc".to_string())]);

        let negative = request(&[(CONTENT_LENGTH, "-5")]);
        assert_eq!(negative.content_length(), 0);
        assert_eq!(negative.errors().len(), 1);
    }

    #[test]
    fn cookies_parse_and_degrade() {
        let req = request(&[(HTTP_COOKIE, "sid=xyz; lang=en")]);
        assert_eq!(req.cookies().get("sid"), Some("xyz"));

        let bad = request(&[(HTTP_COOKIE, "sid=xyz; garbage")]);
        assert!(bad.cookies().is_empty());
        assert!(matches!(bad.errors()[0], InputError::Cookie { .. }));
    }

    #[test]
    fn headers_of_interest_pass_through() {
        let req = request(&[
            (HTTP_ACCEPT, "text/html"),
            (HTTP_ACCEPT_ENCODING, "gzip"),
            (HTTP_ACCEPT_LANGUAGE, "en-US"),
            (CONTENT_TYPE, "application/json"),
            (HTTP_USER_AGENT, "curl/8.5.0"),
        ]);
        assert_eq!(req.accept(), Some("text/html"));
        assert_eq!(req.accept_encoding(), Some("gzip"));
        assert_eq!(req.accept_language(), Some("en-US"));
        assert_eq!(req.content_type(), Some("application/json"));
        assert_eq!(req.user_agent(), Some("curl/8.5.0"));
    }

    #[test]
    fn environ_and_body_are_kept() {
        let env = Environ::new()
            .with(PATH_INFO, "/upload")
            .with("HTTP_X_TRACE", "t-1")
            .with_input(&b"payload"[..]);
        let req = Request::new(env.clone());
        assert_eq!(req.environ(), &env);
        assert_eq!(req.content().as_ref(), b"payload");
        assert_eq!(req.environ().get("HTTP_X_TRACE"), Some("t-1"));
    }

    #[test]
    fn unknown_method_is_kept_as_string() {
        let req = request(&[(REQUEST_METHOD, "brew")]);
        assert_eq!(req.method(), Some("BREW"));
        assert_eq!(req.known_method(), None);
    }
}
