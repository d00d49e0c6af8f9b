//! Ordered query-string multimap.

use std::fmt;

use url::form_urlencoded;

/// Query parameters in URL order.
///
/// Parsing and serialization follow `application/x-www-form-urlencoded`
/// rules. Setting a key keeps its original position so that unrelated
/// parameters are preserved exactly as they were.
///
/// # Example
///
/// ```
/// use backoffice_table::params::SearchParams;
///
/// let mut params = SearchParams::parse("?foo=bar&page=2");
/// params.set("page", "3");
/// assert_eq!(params.to_string(), "foo=bar&page=3");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchParams {
    pairs: Vec<(String, String)>,
}

impl SearchParams {
    /// Creates an empty parameter set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a query string. A leading `?` is ignored.
    pub fn parse(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        Self {
            pairs: form_urlencoded::parse(query.as_bytes())
                .map(|(k, v)| (k.into_owned(), v.into_owned()))
                .collect(),
        }
    }

    /// Returns the first value for a key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Returns every value for a key.
    pub fn get_all(&self, key: &str) -> Vec<&str> {
        self.pairs
            .iter()
            .filter(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
            .collect()
    }

    /// Returns `true` if the key is present.
    pub fn contains(&self, key: &str) -> bool {
        self.pairs.iter().any(|(k, _)| k == key)
    }

    /// Sets a key to a single value.
    ///
    /// The first occurrence is updated in place and later duplicates are
    /// dropped. A missing key is appended.
    pub fn set(&mut self, key: &str, value: impl Into<String>) {
        let value = value.into();
        match self.pairs.iter().position(|(k, _)| k == key) {
            Some(first) => {
                self.pairs[first].1 = value;
                let mut index = 0;
                self.pairs.retain(|(k, _)| {
                    let keep = index <= first || k != key;
                    index += 1;
                    keep
                });
            }
            None => self.pairs.push((key.to_string(), value)),
        }
    }

    /// Removes every occurrence of a key. Returns `true` if any was present.
    pub fn remove(&mut self, key: &str) -> bool {
        let before = self.pairs.len();
        self.pairs.retain(|(k, _)| k != key);
        self.pairs.len() != before
    }

    /// Iterates over the pairs in order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Returns the number of pairs.
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Returns `true` if there are no pairs.
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Serializes to a query string without the leading `?`.
    pub fn to_query_string(&self) -> String {
        form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.pairs.iter())
            .finish()
    }
}

impl fmt::Display for SearchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_query_string())
    }
}

impl<K, V> FromIterator<(K, V)> for SearchParams
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            pairs: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_strips_question_mark() {
        let params = SearchParams::parse("?a=1&b=two%20words");
        assert_eq!(params.get("a"), Some("1"));
        assert_eq!(params.get("b"), Some("two words"));
        assert_eq!(params.len(), 2);
    }

    #[test]
    fn test_parse_empty() {
        assert!(SearchParams::parse("").is_empty());
        assert!(SearchParams::parse("?").is_empty());
    }

    #[test]
    fn test_set_keeps_position() {
        let mut params = SearchParams::parse("page=2&foo=bar");
        params.set("page", "5");
        assert_eq!(params.to_string(), "page=5&foo=bar");
    }

    #[test]
    fn test_set_collapses_duplicates() {
        let mut params = SearchParams::parse("tag=a&page=1&tag=b&tag=c");
        params.set("tag", "z");
        assert_eq!(params.to_string(), "tag=z&page=1");
    }

    #[test]
    fn test_set_appends_missing_key() {
        let mut params = SearchParams::parse("foo=bar");
        params.set("page", "3");
        assert_eq!(params.to_string(), "foo=bar&page=3");
    }

    #[test]
    fn test_remove() {
        let mut params = SearchParams::parse("a=1&b=2&a=3");
        assert!(params.remove("a"));
        assert!(!params.remove("a"));
        assert_eq!(params.to_string(), "b=2");
    }

    #[test]
    fn test_get_all() {
        let params = SearchParams::parse("tag=a&x=1&tag=b");
        assert_eq!(params.get_all("tag"), vec!["a", "b"]);
    }

    #[test]
    fn test_encoding_of_json_values() {
        let mut params = SearchParams::new();
        params.set("sort", r#"[{"columnId":"name"}]"#);
        let encoded = params.to_string();
        assert!(!encoded.contains('"'));
        assert_eq!(
            SearchParams::parse(&encoded).get("sort"),
            Some(r#"[{"columnId":"name"}]"#)
        );
    }
}
