//! Ordered query string parameters.
//!
//! Parameters keep insertion order and may repeat, so the rendered query
//! string is stable for a given sequence of `add` calls.

use std::fmt;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryStringParameters {
    params: Vec<(String, String)>,
}

impl QueryStringParameters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, name: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.params.push((name.into(), value.into()));
        self
    }

    pub fn add_all(&mut self, other: QueryStringParameters) -> &mut Self {
        self.params.extend(other.params);
        self
    }

    /// The first value added under `name`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.params.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// `name=value` pairs joined with `&`, both sides percent-encoded.
    pub fn to_query_string(&self) -> String {
        self.params
            .iter()
            .map(|(n, v)| format!("{}={}", urlencoding::encode(n), urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&")
    }
}

impl fmt::Display for QueryStringParameters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_query_string())
    }
}
