//! Query parameter types

use serde::{Deserialize, Serialize};

/// An ordered collection of query parameters.
///
/// Keys may repeat: list filters are serialized as repeated
/// parameters (`seasons=SPRING&seasons=WINTER`), which is the form
/// the service API expects.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    /// Creates an empty parameter collection.
    #[must_use]
    pub const fn new() -> Self {
        Self { pairs: Vec::new() }
    }

    /// Appends a key-value pair. Repeated keys are preserved in order.
    pub fn append(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.pairs.push((key.into(), value.into()));
    }

    /// Appends one pair per value under the same key.
    pub fn append_all<I, V>(&mut self, key: &str, values: I)
    where
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        for value in values {
            self.pairs.push((key.to_string(), value.into()));
        }
    }

    /// Returns the pairs in insertion order.
    #[must_use]
    pub fn pairs(&self) -> &[(String, String)] {
        &self.pairs
    }

    /// Returns the number of pairs.
    #[must_use]
    #[allow(clippy::missing_const_for_fn)] // Vec::len is not const in stable
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Returns true if there are no pairs.
    #[must_use]
    #[allow(clippy::missing_const_for_fn)] // Vec::is_empty is not const in stable
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

impl FromIterator<(String, String)> for QueryParams {
    fn from_iter<T: IntoIterator<Item = (String, String)>>(iter: T) -> Self {
        Self {
            pairs: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_append_preserves_order() {
        let mut params = QueryParams::new();
        params.append("page", "1");
        params.append("size", "20");

        assert_eq!(
            params.pairs(),
            &[
                ("page".to_string(), "1".to_string()),
                ("size".to_string(), "20".to_string()),
            ]
        );
    }

    #[test]
    fn test_repeated_keys() {
        let mut params = QueryParams::new();
        params.append_all("seasons", ["SPRING", "WINTER"]);

        assert_eq!(params.len(), 2);
        assert_eq!(params.pairs()[0].0, "seasons");
        assert_eq!(params.pairs()[1].0, "seasons");
    }
}
