//! The string-to-string form of a URL query string.

use std::collections::btree_map;
use std::collections::BTreeMap;
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Query-string key/value pairs, one value per key.
///
/// Keys are kept sorted, so serialization is deterministic. Parsing a query
/// string with a repeated key keeps the last occurrence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawParams {
    entries: BTreeMap<String, String>,
}

impl RawParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses `application/x-www-form-urlencoded` text; a leading `?` is
    /// ignored.
    pub fn parse(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        form_urlencoded::parse(query.as_bytes())
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect()
    }

    pub fn to_query_string(&self) -> String {
        form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.entries.iter())
            .finish()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.entries.insert(key.into(), value.into())
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.entries.remove(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for RawParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl IntoIterator for RawParams {
    type Item = (String, String);
    type IntoIter = btree_map::IntoIter<String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl FromStr for RawParams {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl fmt::Display for RawParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_query_string())
    }
}

/// Splits an href into its path and query parameters. A fragment is dropped.
pub fn split_href(href: &str) -> (&str, RawParams) {
    let href = href.split_once('#').map_or(href, |(before, _)| before);
    match href.split_once('?') {
        Some((path, query)) => (path, RawParams::parse(query)),
        None => (href, RawParams::new()),
    }
}

/// Joins a path and query parameters; an empty query leaves no `?`.
pub fn join_href(path: &str, params: &RawParams) -> String {
    if params.is_empty() {
        path.to_string()
    } else {
        format!("{path}?{}", params.to_query_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_last_duplicate_wins() {
        let p = RawParams::parse("?a=1&b=2&a=3");
        assert_eq!(p.get("a"), Some("3"));
        assert_eq!(p.get("b"), Some("2"));
        assert_eq!(p.len(), 2);
    }

    #[test]
    fn percent_and_plus_decoding() {
        let p = RawParams::parse("q=hello+world&c=books%2Cclothing");
        assert_eq!(p.get("q"), Some("hello world"));
        assert_eq!(p.get("c"), Some("books,clothing"));
    }

    #[test]
    fn serializes_sorted_and_escaped() {
        let p: RawParams = [("sort", "desc"), ("categories", r#"["a b"]"#)]
            .into_iter()
            .collect();
        assert_eq!(
            p.to_query_string(),
            "categories=%5B%22a+b%22%5D&sort=desc"
        );
        assert_eq!(RawParams::parse(&p.to_string()), p);
    }

    #[test]
    fn key_without_value_is_empty_string() {
        let p = RawParams::parse("instock&page=2");
        assert_eq!(p.get("instock"), Some(""));
    }

    #[test]
    fn href_split_and_join() {
        let (path, params) = split_href("/products?page=3&sort=desc#top");
        assert_eq!(path, "/products");
        assert_eq!(params.get("page"), Some("3"));
        assert_eq!(join_href(path, &params), "/products?page=3&sort=desc");
        assert_eq!(join_href("/products", &RawParams::new()), "/products");
        assert_eq!(split_href("/plain").1, RawParams::new());
    }
}
