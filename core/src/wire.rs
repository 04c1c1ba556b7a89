//! Normalization of responses into the wire triple the host emits.
//!
//! # Design
//! `status_line`, `headers` and `content_chunks` are pure functions over any
//! `Respond` value. `WireResponse` bundles their output as plain owned data,
//! so the host never needs to know which response variant produced it.

use bytes::Bytes;

use crate::error::Error;
use crate::http;
use crate::response::{Content, Respond};

/// `"<code> <reason phrase>"` for the response status.
pub fn status_line<R: Respond + ?Sized>(response: &R) -> Result<String, Error> {
    let status = response.status();
    let reason = http::reason_phrase(status).ok_or(Error::UnsupportedStatus(status))?;
    Ok(format!("{status} {reason}"))
}

/// The header list the response declares, in order.
pub fn headers<R: Respond + ?Sized>(response: &R) -> Vec<(String, String)> {
    response.headers()
}

/// The body as a sequence of byte chunks.
pub fn content_chunks<R: Respond + ?Sized>(response: &R) -> Vec<Bytes> {
    match response.content() {
        Content::Bytes(bytes) => vec![bytes.clone()],
        Content::Text(text) => vec![Bytes::copy_from_slice(text.as_bytes())],
        Content::Chunks(chunks) => chunks.clone(),
    }
}

/// Status line, headers and body chunks, ready to be written by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WireResponse {
    pub status: String,
    pub headers: Vec<(String, String)>,
    pub body: Vec<Bytes>,
}

impl WireResponse {
    pub fn from_response<R: Respond + ?Sized>(response: &R) -> Result<Self, Error> {
        Ok(Self {
            status: status_line(response)?,
            headers: headers(response),
            body: content_chunks(response),
        })
    }

    /// Numeric code from the status line.
    pub fn status_code(&self) -> Option<u16> {
        self.status.split(' ').next()?.parse().ok()
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// All chunks joined into one buffer.
    pub fn body_bytes(&self) -> Bytes {
        match self.body.as_slice() {
            [single] => single.clone(),
            chunks => chunks.concat().into(),
        }
    }
}
