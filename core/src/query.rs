//! Query-string parsing into ordered multi-valued parameters.
//!
//! # Design
//! Parsing is all-or-nothing. `QueryParams::parse` returns an error for the
//! whole string as soon as one segment is malformed, and the request turns
//! that error into an empty mapping. A partially parsed mapping is never
//! exposed.
//!
//! Segment rules: pairs are `&`-separated, a pair needs an `=`, `+` means a
//! space, `%XX` escapes are decoded and must yield UTF-8, and pairs with an
//! empty value are dropped.

use std::borrow::Cow;
use std::collections::BTreeMap;

use percent_encoding::percent_decode;

/// Query parameters: each name maps to its values in encounter order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    params: BTreeMap<String, Vec<String>>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a raw query string. The error carries a human-readable reason.
    pub fn parse(query: &str) -> Result<Self, String> {
        let mut params: BTreeMap<String, Vec<String>> = BTreeMap::new();

        for segment in query.split('&') {
            if segment.is_empty() {
                continue;
            }
            let Some((name, value)) = segment.split_once('=') else {
                continue;
            };
            let value = decode_component(value)?;
            if value.is_empty() {
                continue;
            }
            let name = decode_component(name)?;
            params.entry(name).or_default().push(value);
        }

        Ok(Self { params })
    }

    /// All values for `name`, in encounter order.
    pub fn get(&self, name: &str) -> Option<&[String]> {
        self.params.get(name).map(Vec::as_slice)
    }

    /// The first value for `name`.
    pub fn first(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(|values| values.first()).map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.params.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.params.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }
}

fn decode_component(raw: &str) -> Result<String, String> {
    check_escapes(raw)?;
    let spaced: Cow<'_, str> = if raw.contains('+') {
        Cow::Owned(raw.replace('+', " "))
    } else {
        Cow::Borrowed(raw)
    };
    percent_decode(spaced.as_bytes())
        .decode_utf8()
        .map(Cow::into_owned)
        .map_err(|e| format!("decoded bytes are not UTF-8 ({e})"))
}

/// Every `%` must introduce two hex digits.
fn check_escapes(raw: &str) -> Result<(), String> {
    let bytes = raw.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let valid = bytes.len() > i + 2
                && bytes[i + 1].is_ascii_hexdigit()
                && bytes[i + 2].is_ascii_hexdigit();
            if !valid {
                return Err(format!("invalid percent escape at byte {i}"));
            }
            i += 3;
        } else {
            i += 1;
        }
    }
    Ok(())
}
