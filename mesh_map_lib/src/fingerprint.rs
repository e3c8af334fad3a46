//! Content fingerprints for the three inputs that gate recomputation:
//! the network snapshot, the selection and the filters.

use crate::selection::Selection;
use common::filters::Filters;
use common::network::Network;
use serde::Serialize;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

pub fn fingerprint<T: Hash + ?Sized>(value: &T) -> u64 {
    let mut hasher = DefaultHasher::new();
    value.hash(&mut hasher);
    hasher.finish()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct InputStamp {
    pub nodes: u64,
    pub selection: u64,
    pub filters: u64,
}

impl InputStamp {
    pub fn of(network: &Network, selection: &Selection, filters: &Filters) -> Self {
        Self {
            nodes: fingerprint(network),
            selection: fingerprint(selection),
            filters: fingerprint(filters),
        }
    }

    pub fn diff(&self, prev: &InputStamp) -> InputDiff {
        InputDiff {
            nodes_changed: self.nodes != prev.nodes,
            selection_changed: self.selection != prev.selection,
            filters_changed: self.filters != prev.filters,
        }
    }
}

/// Which inputs differ between two renders.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct InputDiff {
    pub nodes_changed: bool,
    pub selection_changed: bool,
    pub filters_changed: bool,
}

impl InputDiff {
    pub const UNCHANGED: InputDiff = InputDiff {
        nodes_changed: false,
        selection_changed: false,
        filters_changed: false,
    };

    pub fn any(&self) -> bool {
        self.nodes_changed || self.selection_changed || self.filters_changed
    }
}
