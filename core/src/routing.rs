//! Handlers and the two routing combinators.
//!
//! # Design
//! A handler sees a `Routed` view: the immutable `Request` plus the part of
//! the path not yet consumed by sub-path routing. `SubpathRouter` never
//! mutates the view it received; it builds a narrower one for the nested
//! call. `path()` therefore always reports the full request path, and a
//! sibling branch can never observe another branch's cursor.
//!
//! Both routers are themselves handlers, so they nest freely.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::Arc;

use crate::http::{self, Method};
use crate::request::Request;
use crate::response::{Response, ResponseOptions, TextResponse};

/// A request paired with its routing cursor.
#[derive(Debug, Clone, Copy)]
pub struct Routed<'r> {
    request: &'r Request,
    subpath: &'r str,
}

impl<'r> Routed<'r> {
    /// Root view: the cursor is the path without its leading `/`.
    pub fn new(request: &'r Request) -> Self {
        let path = request.path();
        Self {
            request,
            subpath: path.strip_prefix('/').unwrap_or(path),
        }
    }

    pub fn request(&self) -> &'r Request {
        self.request
    }

    /// Full request path, unaffected by routing.
    pub fn path(&self) -> &'r str {
        self.request.path()
    }

    /// The unconsumed remainder of the path.
    pub fn subpath(&self) -> &'r str {
        self.subpath
    }

    fn descend(&self, subpath: &'r str) -> Self {
        Self {
            request: self.request,
            subpath,
        }
    }
}

/// Something that turns a routed request into a response.
pub trait Handler: Send + Sync {
    fn handle(&self, routed: Routed<'_>) -> Response;
}

impl<F> Handler for F
where
    F: Fn(Routed<'_>) -> Response + Send + Sync,
{
    fn handle(&self, routed: Routed<'_>) -> Response {
        self(routed)
    }
}

/// Pins a closure to the `Handler` signature so its argument type is
/// inferred without an annotation.
pub fn handler_fn<F>(f: F) -> F
where
    F: Fn(Routed<'_>) -> Response + Send + Sync,
{
    f
}

pub type SharedHandler = Arc<dyn Handler>;

fn share(handler: impl Handler + 'static) -> SharedHandler {
    Arc::new(handler)
}

// ---------------------------------------------------------------------------
// Method router
// ---------------------------------------------------------------------------

/// Empty `text/plain` 200 response used when no method handler matches.
pub fn default_method_not_allowed(_: Routed<'_>) -> Response {
    Response::text("")
}

/// Dispatches on the request method.
///
/// Without an explicit `OPTIONS` handler, `OPTIONS` requests are answered
/// with the declared methods joined by `,` in declaration order.
#[derive(Clone)]
pub struct MethodRouter {
    handlers: BTreeMap<Method, SharedHandler>,
    method_not_allowed: SharedHandler,
}

impl MethodRouter {
    pub fn new() -> Self {
        Self {
            handlers: BTreeMap::new(),
            method_not_allowed: share(default_method_not_allowed),
        }
    }

    /// Registers `handler` for `method`, replacing any earlier one.
    pub fn on(mut self, method: Method, handler: impl Handler + 'static) -> Self {
        self.handlers.insert(method, share(handler));
        self
    }

    pub fn get(self, handler: impl Handler + 'static) -> Self {
        self.on(Method::Get, handler)
    }

    pub fn head(self, handler: impl Handler + 'static) -> Self {
        self.on(Method::Head, handler)
    }

    pub fn post(self, handler: impl Handler + 'static) -> Self {
        self.on(Method::Post, handler)
    }

    pub fn put(self, handler: impl Handler + 'static) -> Self {
        self.on(Method::Put, handler)
    }

    pub fn patch(self, handler: impl Handler + 'static) -> Self {
        self.on(Method::Patch, handler)
    }

    pub fn delete(self, handler: impl Handler + 'static) -> Self {
        self.on(Method::Delete, handler)
    }

    pub fn options(self, handler: impl Handler + 'static) -> Self {
        self.on(Method::Options, handler)
    }

    /// Replaces the fallback for unmatched methods.
    pub fn method_not_allowed(mut self, handler: impl Handler + 'static) -> Self {
        self.method_not_allowed = share(handler);
        self
    }

    /// Declared methods in declaration order.
    pub fn allowed(&self) -> impl Iterator<Item = Method> + '_ {
        self.handlers.keys().copied()
    }

    fn allow_list(&self) -> String {
        self.allowed()
            .map(|m| m.as_str())
            .collect::<Vec<_>>()
            .join(",")
    }
}

impl Default for MethodRouter {
    fn default() -> Self {
        Self::new()
    }
}

impl Handler for MethodRouter {
    fn handle(&self, routed: Routed<'_>) -> Response {
        let method = routed.request().known_method();
        match method.and_then(|m| self.handlers.get(&m)) {
            Some(handler) => handler.handle(routed),
            None if method == Some(Method::Options) => Response::text(self.allow_list()),
            None => {
                tracing::debug!(method = ?routed.request().method(), "no handler for method");
                self.method_not_allowed.handle(routed)
            }
        }
    }
}

impl fmt::Debug for MethodRouter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MethodRouter")
            .field("methods", &self.allow_list())
            .finish_non_exhaustive()
    }
}

// ---------------------------------------------------------------------------
// Sub-path router
// ---------------------------------------------------------------------------

/// Empty `text/plain` 404 response used when no segment matches.
pub fn default_not_found(_: Routed<'_>) -> Response {
    TextResponse::with_options(
        "",
        ResponseOptions {
            status: http::NOT_FOUND,
            ..Default::default()
        },
    )
    .into()
}

/// Dispatches on the next path segment.
///
/// The cursor is split on its first `/`. The segment before it is looked up
/// verbatim; on a hit the matched handler sees the remainder as its cursor.
#[derive(Clone)]
pub struct SubpathRouter {
    routes: HashMap<String, SharedHandler>,
    not_found: SharedHandler,
}

impl SubpathRouter {
    pub fn new() -> Self {
        Self {
            routes: HashMap::new(),
            not_found: share(default_not_found),
        }
    }

    pub fn route(mut self, segment: impl Into<String>, handler: impl Handler + 'static) -> Self {
        self.routes.insert(segment.into(), share(handler));
        self
    }

    pub fn not_found(mut self, handler: impl Handler + 'static) -> Self {
        self.not_found = share(handler);
        self
    }
}

impl Default for SubpathRouter {
    fn default() -> Self {
        Self::new()
    }
}

impl Handler for SubpathRouter {
    fn handle(&self, routed: Routed<'_>) -> Response {
        let (segment, rest) = routed.subpath().split_once('/').unwrap_or((routed.subpath(), ""));
        match self.routes.get(segment) {
            Some(handler) => handler.handle(routed.descend(rest)),
            None => {
                tracing::debug!(segment, path = routed.path(), "no route for segment");
                self.not_found.handle(routed)
            }
        }
    }
}

impl fmt::Debug for SubpathRouter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut segments: Vec<_> = self.routes.keys().collect();
        segments.sort();
        f.debug_struct("SubpathRouter")
            .field("segments", &segments)
            .finish_non_exhaustive()
    }
}
