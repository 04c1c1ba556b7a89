//! Typed response values.
//!
//! # Design
//! Every variant exposes the same three capabilities through `Respond`:
//! a numeric status, a header list and a body. Text, HTML and JSON responses
//! wrap a `TypedResponse` with a fixed content type, so callers cannot
//! supply one. Optional settings (status, extra headers) go through
//! `ResponseOptions`; anything else is a compile error.
//!
//! `Response` is the closed set handlers return. It delegates to the
//! wrapped variant.

use bytes::Bytes;
use serde::Serialize;
use serde_json::Value;

use crate::error::Error;
use crate::http;

pub const TEXT_PLAIN: &str = "text/plain";
pub const TEXT_HTML: &str = "text/html";
pub const APPLICATION_JSON: &str = "application/json";

static EMPTY_BODY: Content = Content::Bytes(Bytes::from_static(b""));

/// A response body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Content {
    Bytes(Bytes),
    Text(String),
    /// Body chunks already produced by the handler, emitted in order.
    Chunks(Vec<Bytes>),
}

impl Content {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Content::Text(text) => Some(text),
            _ => None,
        }
    }
}

impl From<String> for Content {
    fn from(text: String) -> Self {
        Content::Text(text)
    }
}

impl From<&str> for Content {
    fn from(text: &str) -> Self {
        Content::Text(text.to_string())
    }
}

impl From<Bytes> for Content {
    fn from(bytes: Bytes) -> Self {
        Content::Bytes(bytes)
    }
}

impl From<Vec<u8>> for Content {
    fn from(bytes: Vec<u8>) -> Self {
        Content::Bytes(bytes.into())
    }
}

impl From<&'static [u8]> for Content {
    fn from(bytes: &'static [u8]) -> Self {
        Content::Bytes(Bytes::from_static(bytes))
    }
}

impl From<Vec<Bytes>> for Content {
    fn from(chunks: Vec<Bytes>) -> Self {
        Content::Chunks(chunks)
    }
}

/// The capability set shared by all response variants.
pub trait Respond {
    fn status(&self) -> u16;
    fn headers(&self) -> Vec<(String, String)>;
    fn content(&self) -> &Content;
}

/// Optional settings for content-carrying responses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseOptions {
    pub status: u16,
    pub extra_headers: Vec<(String, String)>,
}

impl Default for ResponseOptions {
    fn default() -> Self {
        Self {
            status: http::OK,
            extra_headers: Vec::new(),
        }
    }
}

// ---------------------------------------------------------------------------
// Content-carrying variants
// ---------------------------------------------------------------------------

/// A response with an explicit content type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypedResponse {
    content: Content,
    content_type: String,
    status: u16,
    extra_headers: Vec<(String, String)>,
}

impl TypedResponse {
    pub fn new(content: impl Into<Content>, content_type: impl Into<String>) -> Self {
        Self::with_options(content, content_type, ResponseOptions::default())
    }

    pub fn with_options(
        content: impl Into<Content>,
        content_type: impl Into<String>,
        options: ResponseOptions,
    ) -> Self {
        Self {
            content: content.into(),
            content_type: content_type.into(),
            status: options.status,
            extra_headers: options.extra_headers,
        }
    }

    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    pub fn extra_headers(&self) -> &[(String, String)] {
        &self.extra_headers
    }
}

impl Respond for TypedResponse {
    fn status(&self) -> u16 {
        self.status
    }

    /// `Content-Type` first, then the extra headers in order.
    fn headers(&self) -> Vec<(String, String)> {
        let mut headers = Vec::with_capacity(1 + self.extra_headers.len());
        headers.push(("Content-Type".to_string(), self.content_type.clone()));
        headers.extend(self.extra_headers.iter().cloned());
        headers
    }

    fn content(&self) -> &Content {
        &self.content
    }
}

/// Declares a fixed-content-type wrapper around `TypedResponse`.
macro_rules! fixed_type_response {
    ($(#[$doc:meta])* $name:ident, $content_type:expr) => {
        $(#[$doc])*
        #[derive(Debug, Clone, PartialEq, Eq)]
        pub struct $name(TypedResponse);

        impl $name {
            pub fn new(content: impl Into<Content>) -> Self {
                Self::with_options(content, ResponseOptions::default())
            }

            pub fn with_options(content: impl Into<Content>, options: ResponseOptions) -> Self {
                Self(TypedResponse::with_options(content, $content_type, options))
            }

            pub fn content_type(&self) -> &str {
                self.0.content_type()
            }

            pub fn extra_headers(&self) -> &[(String, String)] {
                self.0.extra_headers()
            }
        }

        impl Respond for $name {
            fn status(&self) -> u16 {
                self.0.status()
            }

            fn headers(&self) -> Vec<(String, String)> {
                self.0.headers()
            }

            fn content(&self) -> &Content {
                self.0.content()
            }
        }
    };
}

fixed_type_response!(
    /// A `text/plain` response.
    TextResponse,
    TEXT_PLAIN
);

fixed_type_response!(
    /// A `text/html` response.
    HtmlResponse,
    TEXT_HTML
);

/// An `application/json` response. Keeps the value it was built from next to
/// its serialized text.
#[derive(Debug, Clone, PartialEq)]
pub struct JsonResponse {
    value: Value,
    inner: TypedResponse,
}

impl JsonResponse {
    pub fn new<T: Serialize + ?Sized>(value: &T) -> Result<Self, Error> {
        Self::with_options(value, ResponseOptions::default())
    }

    pub fn with_options<T: Serialize + ?Sized>(
        value: &T,
        options: ResponseOptions,
    ) -> Result<Self, Error> {
        let text = serde_json::to_string(value)?;
        let value = serde_json::to_value(value)?;
        Ok(Self {
            value,
            inner: TypedResponse::with_options(text, APPLICATION_JSON, options),
        })
    }

    /// The value the response was built from.
    pub fn content_json(&self) -> &Value {
        &self.value
    }

    pub fn content_type(&self) -> &str {
        self.inner.content_type()
    }
}

impl Respond for JsonResponse {
    fn status(&self) -> u16 {
        self.inner.status()
    }

    fn headers(&self) -> Vec<(String, String)> {
        self.inner.headers()
    }

    fn content(&self) -> &Content {
        self.inner.content()
    }
}

// ---------------------------------------------------------------------------
// Redirect
// ---------------------------------------------------------------------------

/// A redirect to `location`. Permanent unless stated otherwise.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedirectResponse {
    location: String,
    permanent: bool,
}

impl RedirectResponse {
    pub fn new(location: impl Into<String>) -> Self {
        Self {
            location: location.into(),
            permanent: true,
        }
    }

    pub fn permanent(mut self, permanent: bool) -> Self {
        self.permanent = permanent;
        self
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn is_permanent(&self) -> bool {
        self.permanent
    }
}

impl Respond for RedirectResponse {
    fn status(&self) -> u16 {
        if self.permanent {
            http::PERMANENT_REDIRECT
        } else {
            http::TEMPORARY_REDIRECT
        }
    }

    fn headers(&self) -> Vec<(String, String)> {
        vec![("Location".to_string(), self.location.clone())]
    }

    fn content(&self) -> &Content {
        &EMPTY_BODY
    }
}

// ---------------------------------------------------------------------------
// Closed set
// ---------------------------------------------------------------------------

/// Any response a handler can return.
#[derive(Debug, Clone, PartialEq)]
pub enum Response {
    Typed(TypedResponse),
    Text(TextResponse),
    Html(HtmlResponse),
    Json(JsonResponse),
    Redirect(RedirectResponse),
}

impl Response {
    pub fn typed(content: impl Into<Content>, content_type: impl Into<String>) -> Self {
        Response::Typed(TypedResponse::new(content, content_type))
    }

    pub fn text(content: impl Into<Content>) -> Self {
        Response::Text(TextResponse::new(content))
    }

    pub fn html(content: impl Into<Content>) -> Self {
        Response::Html(HtmlResponse::new(content))
    }

    pub fn json<T: Serialize + ?Sized>(value: &T) -> Result<Self, Error> {
        JsonResponse::new(value).map(Response::Json)
    }

    pub fn redirect(location: impl Into<String>) -> Self {
        Response::Redirect(RedirectResponse::new(location))
    }

    fn inner(&self) -> &dyn Respond {
        match self {
            Response::Typed(r) => r,
            Response::Text(r) => r,
            Response::Html(r) => r,
            Response::Json(r) => r,
            Response::Redirect(r) => r,
        }
    }
}

impl Respond for Response {
    fn status(&self) -> u16 {
        self.inner().status()
    }

    fn headers(&self) -> Vec<(String, String)> {
        self.inner().headers()
    }

    fn content(&self) -> &Content {
        self.inner().content()
    }
}

impl From<TypedResponse> for Response {
    fn from(r: TypedResponse) -> Self {
        Response::Typed(r)
    }
}

impl From<TextResponse> for Response {
    fn from(r: TextResponse) -> Self {
        Response::Text(r)
    }
}

impl From<HtmlResponse> for Response {
    fn from(r: HtmlResponse) -> Self {
        Response::Html(r)
    }
}

impl From<JsonResponse> for Response {
    fn from(r: JsonResponse) -> Self {
        Response::Json(r)
    }
}

impl From<RedirectResponse> for Response {
    fn from(r: RedirectResponse) -> Self {
        Response::Redirect(r)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn header(name: &str, value: &str) -> (String, String) {
        (name.to_string(), value.to_string())
    }

    #[test]
    fn typed_response_defaults() {
        let response = TypedResponse::new("Hello, world\n", "text/plain");
        assert_eq!(response.status(), 200);
        assert_eq!(response.content(), &Content::Text("Hello, world\n".to_string()));
        assert_eq!(response.headers(), vec![header("Content-Type", "text/plain")]);
        assert!(response.extra_headers().is_empty());
    }

    #[test]
    fn typed_response_options() {
        let response = TypedResponse::with_options(
            b"a,b\n".to_vec(),
            "text/csv",
            ResponseOptions {
                status: 404,
                extra_headers: vec![header("Cache-Control", "no-store")],
            },
        );
        assert_eq!(response.status(), 404);
        assert_eq!(
            response.headers(),
            vec![header("Content-Type", "text/csv"), header("Cache-Control", "no-store")]
        );
    }

    #[test]
    fn fixed_content_types() {
        assert_eq!(TextResponse::new("hi").content_type(), "text/plain");
        assert_eq!(
            HtmlResponse::new("<html><body>Hello, world</body></html>").content_type(),
            "text/html"
        );
        assert_eq!(JsonResponse::new(&1).unwrap().content_type(), "application/json");
    }

    #[test]
    fn fixed_type_keeps_options() {
        let response = HtmlResponse::with_options(
            "<p>gone</p>",
            ResponseOptions {
                status: 404,
                ..Default::default()
            },
        );
        assert_eq!(response.status(), 404);
        assert_eq!(response.headers()[0], header("Content-Type", "text/html"));
    }

    #[test]
    fn json_keeps_value_and_text() {
        let value = json!({ "foo": "bar", "baz": 42 });
        let response = JsonResponse::new(&value).unwrap();
        assert_eq!(response.content_json(), &value);
        assert_eq!(
            response.content().as_text(),
            Some(serde_json::to_string(&value).unwrap().as_str())
        );
    }

    #[test]
    fn json_accepts_serializable_structs() {
        #[derive(Serialize)]
        struct Point {
            x: i32,
            y: i32,
        }
        let response = JsonResponse::new(&Point { x: 1, y: -2 }).unwrap();
        assert_eq!(response.content().as_text(), Some(r#"{"x":1,"y":-2}"#));
        assert_eq!(response.content_json(), &json!({ "x": 1, "y": -2 }));
    }

    #[test]
    fn json_rejects_unserializable_values() {
        let mut map = std::collections::BTreeMap::new();
        map.insert(vec![1u8], "non-string key");
        assert!(matches!(JsonResponse::new(&map), Err(Error::Json(_))));
    }

    #[test]
    fn redirect_defaults_to_permanent() {
        let response = RedirectResponse::new("/location");
        assert_eq!(response.location(), "/location");
        assert!(response.is_permanent());
        assert_eq!(response.status(), 308);
    }

    #[test]
    fn temporary_redirect_status() {
        assert_eq!(RedirectResponse::new("/location").permanent(false).status(), 307);
        assert_eq!(RedirectResponse::new("/location").permanent(true).status(), 308);
    }

    #[test]
    fn redirect_headers_and_content() {
        let response = RedirectResponse::new("/location");
        assert_eq!(response.headers(), vec![header("Location", "/location")]);
        assert_eq!(response.content(), &Content::Bytes(Bytes::new()));
    }

    #[test]
    fn response_enum_delegates() {
        let response: Response = RedirectResponse::new("/next").permanent(false).into();
        assert_eq!(response.status(), 307);
        assert_eq!(response.headers(), vec![header("Location", "/next")]);

        let response = Response::text("plain");
        assert_eq!(response.headers(), vec![header("Content-Type", "text/plain")]);
        assert_eq!(response.content().as_text(), Some("plain"));
    }
}
