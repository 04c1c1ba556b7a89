//! Gateway adapter: environment in, wire triple out.
//!
//! # Design
//! `App` owns the root handler and the response configuration. Each call is
//! independent: it normalizes the environment, runs the handler on the root
//! cursor and serializes the result. Nothing is kept between calls, so one
//! `App` can be shared by every worker thread of the host.

use std::sync::Arc;

use serde::Deserialize;

use crate::environ::Environ;
use crate::error::Error;
use crate::request::Request;
use crate::routing::{Handler, Routed};
use crate::wire::WireResponse;

/// Response configuration applied by the gateway.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Append `X-Content-Type-Options: nosniff` to responses that declare a
    /// `Content-Type`.
    pub nosniff: bool,
}

/// A handler bound to the gateway interface.
#[derive(Clone)]
pub struct App {
    handler: Arc<dyn Handler>,
    config: AppConfig,
}

impl App {
    pub fn new(handler: impl Handler + 'static) -> Self {
        Self::with_config(handler, AppConfig::default())
    }

    pub fn with_config(handler: impl Handler + 'static, config: AppConfig) -> Self {
        Self {
            handler: Arc::new(handler),
            config,
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Handle one request.
    ///
    /// Malformed client input never fails the call. An `Err` means the
    /// handler produced a response that cannot be serialized.
    pub fn call(&self, environ: Environ) -> Result<WireResponse, Error> {
        let request = Request::new(environ);
        for note in request.errors() {
            tracing::warn!(path = request.path(), "{note}");
        }

        let response = self.handler.handle(Routed::new(&request));
        let mut wire = WireResponse::from_response(&response).map_err(|e| {
            tracing::error!(
                method = ?request.method(),
                path = request.path(),
                error = %e,
                "handler returned an unserializable response"
            );
            e
        })?;

        if self.config.nosniff && wire.header("Content-Type").is_some() {
            wire.headers
                .push(("X-Content-Type-Options".to_string(), "nosniff".to_string()));
        }

        tracing::debug!(
            method = ?request.method(),
            path = request.path(),
            status = %wire.status,
            "request handled"
        );
        Ok(wire)
    }
}

impl std::fmt::Debug for App {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("App")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
