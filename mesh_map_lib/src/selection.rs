//! Selection codec.
//!
//! A selection travels through the route as a single `-` joined string. Ids
//! containing `-` cannot be represented.

use common::network::NodeId;
use indexmap::IndexSet;
use itertools::Itertools;
use std::fmt;
use std::hash::{Hash, Hasher};

pub const SEPARATOR: char = '-';

/// Ordered, deduplicated set of selected node ids.
#[derive(Debug, Clone, Default)]
pub struct Selection {
    ids: IndexSet<NodeId>,
}

// Order matters: it drives titles and detail panel order.
impl PartialEq for Selection {
    fn eq(&self, other: &Self) -> bool {
        self.ids.iter().eq(other.ids.iter())
    }
}

impl Eq for Selection {}

impl Hash for Selection {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.ids.len().hash(state);
        for id in &self.ids {
            id.hash(state);
        }
    }
}

impl Selection {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Decode the route parameter. Never fails: absent, empty or malformed
    /// segments simply contribute nothing.
    pub fn parse(param: Option<&str>) -> Self {
        let Some(param) = param else {
            return Self::empty();
        };
        param
            .split(SEPARATOR)
            .filter(|segment| !segment.is_empty())
            .map(NodeId::from)
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn contains(&self, id: &NodeId) -> bool {
        self.ids.contains(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &NodeId> {
        self.ids.iter()
    }

    /// Add or remove `id`, returning the result in sorted order.
    pub fn toggled(&self, id: &NodeId) -> Self {
        let ids = if self.contains(id) {
            self.ids.iter().filter(|&other| other != id).cloned().collect()
        } else {
            self.ids.iter().chain(std::iter::once(id)).cloned().collect()
        };
        Self::sorted(ids)
    }

    /// Route form of this selection.
    pub fn encode(&self) -> String {
        encode(self.ids.iter())
    }

    fn sorted(ids: Vec<NodeId>) -> Self {
        ids.into_iter().sorted().collect()
    }
}

impl FromIterator<NodeId> for Selection {
    fn from_iter<T: IntoIterator<Item = NodeId>>(iter: T) -> Self {
        Self {
            ids: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Selection {
    type Item = &'a NodeId;
    type IntoIter = indexmap::set::Iter<'a, NodeId>;

    fn into_iter(self) -> Self::IntoIter {
        self.ids.iter()
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.ids.iter().join(&SEPARATOR.to_string()))
    }
}

/// Deduplicate, sort lexicographically and join with `-`.
pub fn encode<'a, I>(ids: I) -> String
where
    I: IntoIterator<Item = &'a NodeId>,
{
    ids.into_iter()
        .map(NodeId::as_str)
        .sorted()
        .dedup()
        .join(&SEPARATOR.to_string())
}
