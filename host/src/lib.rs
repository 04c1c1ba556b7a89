//! axum host for `fwx-core` gateway applications.
//!
//! # Design
//! The host owns everything the core does not: sockets, the tokio runtime
//! and body buffering. Per request it builds a CGI-style `Environ`, hands it
//! to `App::call` and writes the resulting wire triple back. Every path and
//! method reaches the gateway; routing is left to the core's combinators.

pub mod config;
pub mod demo;

use axum::{
    body::Body,
    extract::{Request, State},
    http::{header, request::Parts, HeaderName, StatusCode},
    response::{IntoResponse, Response},
    Router,
};
use bytes::Bytes;
use fwx_core::environ::{self, Environ};
use fwx_core::{App, WireResponse};
use percent_encoding::percent_decode_str;
use tokio::net::TcpListener;

pub use config::Settings;

/// Largest request body the host buffers before calling the gateway.
pub const MAX_BODY_BYTES: usize = 2 * 1024 * 1024;

pub fn app(gateway: App) -> Router {
    Router::new().fallback(serve_gateway).with_state(gateway)
}

pub async fn run(listener: TcpListener, gateway: App) -> Result<(), std::io::Error> {
    let addr = listener.local_addr()?;
    tracing::info!(address = %addr, "fwx host listening");
    axum::serve(listener, app(gateway)).await
}

async fn serve_gateway(State(gateway): State<App>, request: Request) -> Response {
    let (parts, body) = request.into_parts();
    let body = match axum::body::to_bytes(body, MAX_BODY_BYTES).await {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::warn!(error = %e, "failed to read request body");
            return (StatusCode::BAD_REQUEST, "unreadable request body").into_response();
        }
    };

    let environ = environ_from_parts(&parts, body);
    match gateway.call(environ) {
        Ok(wire) => emit(wire),
        Err(e) => {
            tracing::error!(error = %e, path = parts.uri.path(), "gateway failed");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

/// Build the gateway environment for an HTTP request.
///
/// Repeated headers are joined with `, `, except `Cookie`, which uses `; `.
pub fn environ_from_parts(parts: &Parts, body: Bytes) -> Environ {
    let path = percent_decode_str(parts.uri.path()).decode_utf8_lossy();

    let mut env = Environ::new()
        .with(environ::REQUEST_METHOD, parts.method.as_str())
        .with(environ::PATH_INFO, path)
        .with(environ::QUERY_STRING, parts.uri.query().unwrap_or(""))
        .with(environ::SERVER_PROTOCOL, format!("{:?}", parts.version))
        .with_input(body);

    for name in parts.headers.keys() {
        env.insert(environ::header_key(name.as_str()), joined_header(parts, name));
    }
    env
}

fn joined_header(parts: &Parts, name: &HeaderName) -> String {
    let separator = if *name == header::COOKIE { "; " } else { ", " };
    parts
        .headers
        .get_all(name)
        .iter()
        .map(|value| String::from_utf8_lossy(value.as_bytes()))
        .collect::<Vec<_>>()
        .join(separator)
}

/// Turn a wire triple into an HTTP response.
fn emit(wire: WireResponse) -> Response {
    let Some(status) = wire.status_code().and_then(|code| StatusCode::from_u16(code).ok()) else {
        tracing::error!(status = %wire.status, "malformed status line");
        return StatusCode::INTERNAL_SERVER_ERROR.into_response();
    };

    let mut builder = axum::http::Response::builder().status(status);
    for (name, value) in &wire.headers {
        builder = builder.header(name.as_str(), value.as_str());
    }

    builder
        .body(Body::from(wire.body_bytes()))
        .unwrap_or_else(|e| {
            tracing::error!(error = %e, "invalid response header");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        })
}
