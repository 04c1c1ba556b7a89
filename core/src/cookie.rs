//! Cookie header parsing.
//!
//! Grammar: `name=value` pairs separated by `;`, surrounding whitespace
//! ignored. Names are HTTP tokens. A value wrapped in double quotes has the
//! quotes removed. Any pair that breaks the grammar invalidates the whole
//! header.

use std::collections::BTreeMap;

/// Parsed request cookies.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cookies {
    values: BTreeMap<String, String>,
}

impl Cookies {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a raw `Cookie` header value.
    pub fn parse(header: &str) -> Result<Self, String> {
        let mut values = BTreeMap::new();

        for pair in header.split(';') {
            let pair = pair.trim();
            if pair.is_empty() {
                continue;
            }
            let (name, value) = pair
                .split_once('=')
                .ok_or_else(|| format!("cookie {pair:?} has no value"))?;
            let name = name.trim();
            if name.is_empty() || !name.bytes().all(is_token_byte) {
                return Err(format!("invalid cookie name {name:?}"));
            }
            let value = unquote(value.trim())?;
            values.insert(name.to_string(), value.to_string());
        }

        Ok(Self { values })
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

fn unquote(value: &str) -> Result<&str, String> {
    match value.strip_prefix('"') {
        Some(rest) => rest
            .strip_suffix('"')
            .filter(|inner| !inner.contains('"'))
            .ok_or_else(|| format!("unterminated quoted value {value:?}")),
        None if value.contains('"') => Err(format!("stray quote in value {value:?}")),
        None => Ok(value),
    }
}

// RFC 7230 tchar
fn is_token_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b"!#$%&'*+-.^_`|~".contains(&b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_multiple_pairs() {
        let cookies = Cookies::parse("session=abc123; theme=dark").unwrap();
        assert_eq!(cookies.get("session"), Some("abc123"));
        assert_eq!(cookies.get("theme"), Some("dark"));
        assert_eq!(cookies.len(), 2);
    }

    #[test]
    fn strips_quotes_and_whitespace() {
        let cookies = Cookies::parse(r#"  name = "quoted value" ;;lang=en  "#).unwrap();
        assert_eq!(cookies.get("name"), Some("quoted value"));
        assert_eq!(cookies.get("lang"), Some("en"));
    }

    #[test]
    fn empty_value_is_allowed() {
        let cookies = Cookies::parse("flag=").unwrap();
        assert_eq!(cookies.get("flag"), Some(""));
    }

    #[test]
    fn blank_header_is_empty() {
        assert!(Cookies::parse("").unwrap().is_empty());
        assert!(Cookies::parse(" ; ").unwrap().is_empty());
    }

    #[test]
    fn pair_without_equals_is_rejected() {
        assert!(Cookies::parse("good=1; broken").is_err());
    }

    #[test]
    fn invalid_name_is_rejected() {
        assert!(Cookies::parse("bad name=1").is_err());
        assert!(Cookies::parse("=1").is_err());
    }

    #[test]
    fn unbalanced_quotes_are_rejected() {
        assert!(Cookies::parse(r#"a="open"#).is_err());
        assert!(Cookies::parse(r#"a=mid"dle"#).is_err());
    }
}
