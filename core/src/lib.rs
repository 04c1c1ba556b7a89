//! A minimal request/response layer over a CGI-style gateway environment.
//!
//! # Overview
//! The hosting server hands over a key/value `Environ` per request and
//! writes back a status line, headers and body chunks. In between, this
//! crate normalizes the environment into a read-only `Request`, lets a
//! handler pick a typed `Response`, and serializes it into a `WireResponse`.
//!
//! # Design
//! - No I/O, no threads, no state across requests. The host owns all of it.
//! - Malformed client input never fails a request; it degrades to defaults
//!   and is recorded on the request (`Request::errors`).
//! - Handler bugs (unsupported status, unserializable JSON) are returned as
//!   `Error`.
//! - Routing is two combinators, `MethodRouter` and `SubpathRouter`, that are
//!   themselves handlers.

pub mod app;
pub mod cookie;
pub mod environ;
pub mod error;
pub mod http;
pub mod query;
pub mod request;
pub mod response;
pub mod routing;
pub mod wire;

pub use app::{App, AppConfig};
pub use cookie::Cookies;
pub use environ::Environ;
pub use error::{Error, InputError};
pub use http::Method;
pub use query::QueryParams;
pub use request::Request;
pub use response::{
    Content, HtmlResponse, JsonResponse, RedirectResponse, Respond, Response, ResponseOptions,
    TextResponse, TypedResponse,
};
pub use routing::{handler_fn, Handler, MethodRouter, Routed, SubpathRouter};
pub use wire::{content_chunks, headers, status_line, WireResponse};
