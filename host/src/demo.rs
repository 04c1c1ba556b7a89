//! The demonstration handler tree served by the `fwx-host` binary.

use fwx_core::{handler_fn, MethodRouter, Response, SubpathRouter};
use serde_json::json;

/// `/` greets, `/hello/<name>` greets by name, `/echo` reflects the query
/// as JSON (GET) or the body length (POST), `/old` redirects to `/`.
pub fn routes() -> SubpathRouter {
    let echo = MethodRouter::new()
        .get(handler_fn(|r| {
            let query: serde_json::Map<String, serde_json::Value> = r
                .request()
                .get()
                .iter()
                .map(|(name, values)| (name.to_string(), json!(values)))
                .collect();
            Response::json(&query).unwrap_or_else(|_| Response::text(""))
        }))
        .post(handler_fn(|r| {
            Response::text(format!("received {} bytes\n", r.request().content().len()))
        }));

    SubpathRouter::new()
        .route("", handler_fn(|_| Response::text("Hello, world\n")))
        .route(
            "hello",
            handler_fn(|r| match r.subpath() {
                "" => Response::text("Hello, world\n"),
                name => Response::text(format!("Hello, {name}\n")),
            }),
        )
        .route("echo", echo)
        .route("old", handler_fn(|_| Response::redirect("/")))
}
