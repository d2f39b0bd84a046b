//! DateMap - calendar date to evaluation date table

use indexmap::IndexMap;

/// Length of a `YYYYMMDD` date string
pub const DATE_LEN: usize = 8;

/// Check that a value is exactly eight ASCII digits (`YYYYMMDD`)
///
/// No calendar validation is done: `20251399` passes.
pub fn is_date_string(value: &str) -> bool {
    value.len() == DATE_LEN && value.bytes().all(|b| b.is_ascii_digit())
}

/// Ordered mapping of `YYYYMMDD` keys to `YYYYMMDD` values
///
/// Only well-formed pairs are ever stored. Iteration follows insertion order;
/// re-inserting a key replaces its value in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DateMap {
    entries: IndexMap<String, String>,
}

impl DateMap {
    /// Create an empty map
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a pair if both sides are date strings
    ///
    /// Returns `false` (and leaves the map untouched) for malformed pairs.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> bool {
        let key = key.into();
        let value = value.into();
        if !is_date_string(&key) || !is_date_string(&value) {
            return false;
        }
        self.entries.insert(key, value);
        true
    }

    /// Look up the evaluation date for a calendar date
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate pairs in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for DateMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = DateMap::new();
        for (key, value) in iter {
            map.insert(key, value);
        }
        map
    }
}
