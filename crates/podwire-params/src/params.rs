//! Encoded wire parameters.

use std::fmt;

use indexmap::IndexMap;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use url::form_urlencoded;

/// Ordered wire key to encoded value mapping.
///
/// Keys keep the order they were first appended in, which for encoder output
/// is the schema's declaration order. A key maps to more than one value only
/// for sequences declared with repeated encoding.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParameterSet {
    entries: IndexMap<String, Vec<String>>,
}

impl ParameterSet {
    /// Empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `value` under `key`, after any values already there.
    pub fn append(&mut self, key: &str, value: String) {
        match self.entries.get_mut(key) {
            Some(values) => values.push(value),
            None => {
                self.entries.insert(key.to_string(), vec![value]);
            },
        }
    }

    /// First value for `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).and_then(|values| values.first()).map(String::as_str)
    }

    /// All values for `key`, empty if absent.
    pub fn get_all(&self, key: &str) -> &[String] {
        self.entries.get(key).map(Vec::as_slice).unwrap_or_default()
    }

    /// Whether `key` is present.
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Keys in order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// `(key, value)` pairs in wire order, repeated keys expanded.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .flat_map(|(key, values)| values.iter().map(move |value| (key.as_str(), value.as_str())))
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if no parameter is set.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Render as an `application/x-www-form-urlencoded` query string.
    pub fn to_query_string(&self) -> String {
        form_urlencoded::Serializer::new(String::new()).extend_pairs(self.iter()).finish()
    }
}

impl fmt::Display for ParameterSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_query_string())
    }
}

/// RFC 3986 unreserved characters stay as they are in a path segment.
const PATH_SEGMENT: &AsciiSet =
    &NON_ALPHANUMERIC.remove(b'-').remove(b'.').remove(b'_').remove(b'~');

/// Percent-escape `text` for use as one URL path segment.
pub fn escape_component(text: &str) -> String {
    utf8_percent_encode(text, PATH_SEGMENT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_keys_keep_first_position() {
        let mut params = ParameterSet::new();
        params.append("ps_args", "pid".into());
        params.append("all", "true".into());
        params.append("ps_args", "user".into());

        assert_eq!(params.len(), 2);
        assert_eq!(params.get_all("ps_args"), ["pid", "user"]);
        assert_eq!(params.to_query_string(), "ps_args=pid&ps_args=user&all=true");
    }

    #[test]
    fn query_values_are_form_encoded() {
        let mut params = ParameterSet::new();
        params.append("name", "my pod".into());
        params.append("labels", r#"{"a":"b&c=d"}"#.into());

        assert_eq!(params.to_query_string(), "name=my+pod&labels=%7B%22a%22%3A%22b%26c%3Dd%22%7D");
    }

    #[test]
    fn escapes_reserved_bytes() {
        assert_eq!(escape_component("a b&c=d"), "a%20b%26c%3Dd");
        assert_eq!(escape_component("[\"x\"]"), "%5B%22x%22%5D");
        assert_eq!(escape_component("caf\u{e9}"), "caf%C3%A9");
        assert_eq!(escape_component("keep-._~"), "keep-._~");
    }

    #[test]
    fn absent_key_has_no_values() {
        let params = ParameterSet::new();
        assert_eq!(params.get("name"), None);
        assert!(params.get_all("name").is_empty());
        assert_eq!(params.to_string(), "");
    }
}
