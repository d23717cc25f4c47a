use std::collections::BTreeMap;

/// Header collection with case-insensitive names.
///
/// HTTP header names are case-insensitive, so names are normalized to ASCII
/// lowercase once, at insertion, and lookups normalize the same way. The
/// display name of the most recent insertion is kept for serialization.
/// Iteration is ordered by normalized name, which keeps serialized output
/// stable.
#[derive(Debug, Clone, Default)]
pub struct Headers {
    // normalized name -> (display name, value)
    map: BTreeMap<String, (String, String)>,
}

impl Headers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a header. A later insert with the same name (in any case)
    /// overwrites the earlier value.
    pub fn insert(&mut self, name: &str, value: impl Into<String>) {
        self.map
            .insert(name.to_ascii_lowercase(), (name.to_string(), value.into()));
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.map
            .get(&name.to_ascii_lowercase())
            .map(|(_, value)| value.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.map.contains_key(&name.to_ascii_lowercase())
    }

    pub fn remove(&mut self, name: &str) -> Option<String> {
        self.map
            .remove(&name.to_ascii_lowercase())
            .map(|(_, value)| value)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Iterates over `(display name, value)` pairs in normalized-name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.map
            .values()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }
}
