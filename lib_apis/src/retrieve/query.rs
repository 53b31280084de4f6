//! # Query Parameter Builder
//!
//! REST endpoints take their arguments as query-string pairs. `QueryParams`
//! keeps them in insertion order and lets callers pass lists, numbers and
//! flags without stringifying them by hand: list values are comma-joined.

use std::fmt;

/// A single query-string value.
///
/// Constructed through `From` so call sites can pass `&str`, numbers, flags
/// or lists directly. Lists become comma-separated strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamValue(String);

impl ParamValue {
    /// The rendered value.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the value with every space removed (`"a, b"` → `"a,b"`).
    pub fn without_spaces(self) -> Self {
        ParamValue(self.0.replace(' ', ""))
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Joins `values` into one comma-separated string.
pub fn comma_separated<I, T>(values: I) -> String
where
    I: IntoIterator<Item = T>,
    T: AsRef<str>,
{
    values
        .into_iter()
        .map(|v| v.as_ref().to_owned())
        .collect::<Vec<_>>()
        .join(",")
}

impl From<&str> for ParamValue {
    fn from(v: &str) -> Self {
        ParamValue(v.to_owned())
    }
}

impl From<String> for ParamValue {
    fn from(v: String) -> Self {
        ParamValue(v)
    }
}

impl From<&String> for ParamValue {
    fn from(v: &String) -> Self {
        ParamValue(v.clone())
    }
}

impl From<bool> for ParamValue {
    fn from(v: bool) -> Self {
        ParamValue(v.to_string())
    }
}

macro_rules! param_value_from_display {
    ($($t:ty),*) => {
        $(impl From<$t> for ParamValue {
            fn from(v: $t) -> Self {
                ParamValue(v.to_string())
            }
        })*
    };
}

param_value_from_display!(u8, u16, u32, u64, usize, i32, i64, f64);

impl<T: AsRef<str>> From<Vec<T>> for ParamValue {
    fn from(v: Vec<T>) -> Self {
        ParamValue(comma_separated(v))
    }
}

impl<T: AsRef<str>> From<&[T]> for ParamValue {
    fn from(v: &[T]) -> Self {
        ParamValue(comma_separated(v))
    }
}

impl<T: AsRef<str>, const N: usize> From<[T; N]> for ParamValue {
    fn from(v: [T; N]) -> Self {
        ParamValue(comma_separated(v))
    }
}

/// Insertion-ordered query parameters with replace-on-duplicate semantics.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    /// An empty parameter set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`QueryParams::insert`].
    pub fn with(mut self, key: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Sets `key` to `value`, replacing an existing entry in place.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<ParamValue>) {
        let key = key.into();
        let value = value.into().0;
        match self.pairs.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.pairs.push((key, value)),
        }
    }

    /// The value stored under `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Iterates over the pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of pairs.
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// `true` when no pair has been inserted.
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Appends every pair to `url`'s query string (percent-encoded).
    pub fn apply_to(&self, url: &mut url::Url) {
        if self.is_empty() {
            return;
        }
        let mut query = url.query_pairs_mut();
        for (k, v) in self.iter() {
            query.append_pair(k, v);
        }
    }
}

impl<K, V> FromIterator<(K, V)> for QueryParams
where
    K: Into<String>,
    V: Into<ParamValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = QueryParams::new();
        for (k, v) in iter {
            params.insert(k, v);
        }
        params
    }
}
