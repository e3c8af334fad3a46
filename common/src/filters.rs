use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Visibility toggles keyed by node type tag.
///
/// A missing key means visible; only an explicit `false` hides.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Filters(BTreeMap<String, bool>);

impl Filters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_visible(&self, type_tag: &str) -> bool {
        self.0.get(type_tag) != Some(&false)
    }

    pub fn set(&mut self, type_tag: impl Into<String>, visible: bool) {
        self.0.insert(type_tag.into(), visible);
    }

    /// Flip the flag for a tag; an absent tag is visible so it becomes hidden.
    pub fn toggle(&mut self, type_tag: &str) {
        let visible = self.is_visible(type_tag);
        self.0.insert(type_tag.to_string(), !visible);
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, bool)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

impl<K: Into<String>> FromIterator<(K, bool)> for Filters {
    fn from_iter<T: IntoIterator<Item = (K, bool)>>(iter: T) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}
