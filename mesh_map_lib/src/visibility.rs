//! Selection-driven visibility resolution.
//!
//! A pass first computes a complete [`VisibilityPlan`] for every mounted
//! marker and line, and only then is the plan pushed to the handles in one
//! batch (see [`crate::registry::HandleRegistry::apply`]).

use crate::selection::Selection;
use common::network::{LinkKey, Network, Node, NodeId};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Rendering instruction for a marker or a line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Visibility {
    #[default]
    Default,
    Dim,
    Secondary,
    Highlight,
}

/// Which emphasis rules matched an entity during a pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Emphasis {
    pub dim: bool,
    pub secondary: bool,
    pub highlight: bool,
}

/// highlight > secondary > dim > default.
pub fn resolve(emphasis: Emphasis) -> Visibility {
    if emphasis.highlight {
        Visibility::Highlight
    } else if emphasis.secondary {
        Visibility::Secondary
    } else if emphasis.dim {
        Visibility::Dim
    } else {
        Visibility::Default
    }
}

/// Whether the link half of a pass runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkPass {
    Apply,
    /// Filter-only transitions leave line emphasis untouched.
    Skip,
}

/// Identities that currently have a live handle.
#[derive(Debug, Default)]
pub struct Mounted<'a> {
    nodes: HashSet<&'a NodeId>,
    links: HashSet<&'a LinkKey>,
}

impl<'a> Mounted<'a> {
    pub fn new<N, L>(nodes: N, links: L) -> Self
    where
        N: IntoIterator<Item = &'a NodeId>,
        L: IntoIterator<Item = &'a LinkKey>,
    {
        Self {
            nodes: nodes.into_iter().collect(),
            links: links.into_iter().collect(),
        }
    }

    pub fn has_node(&self, id: &NodeId) -> bool {
        self.nodes.contains(id)
    }

    pub fn has_link(&self, key: &LinkKey) -> bool {
        self.links.contains(key)
    }
}

/// Target state per handle for one pass. Handles absent from the plan are
/// left as they are.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VisibilityPlan {
    pub nodes: HashMap<NodeId, Visibility>,
    pub links: HashMap<LinkKey, Visibility>,
}

impl VisibilityPlan {
    /// Everything back to [`Visibility::Default`].
    pub fn reset(mounted: &Mounted<'_>) -> Self {
        Self {
            nodes: mounted
                .nodes
                .iter()
                .map(|&id| (id.clone(), Visibility::Default))
                .collect(),
            links: mounted
                .links
                .iter()
                .map(|&key| (key.clone(), Visibility::Default))
                .collect(),
        }
    }

    pub fn node(&self, id: &NodeId) -> Option<Visibility> {
        self.nodes.get(id).copied()
    }

    pub fn link(&self, key: &LinkKey) -> Option<Visibility> {
        self.links.get(key).copied()
    }

    pub fn summary(&self) -> PlanSummary {
        let mut summary = PlanSummary::default();
        for state in self.nodes.values().chain(self.links.values()) {
            match state {
                Visibility::Default => summary.default += 1,
                Visibility::Dim => summary.dim += 1,
                Visibility::Secondary => summary.secondary += 1,
                Visibility::Highlight => summary.highlight += 1,
            }
        }
        summary
    }
}

/// Count of handles per state, for logs and reports.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PlanSummary {
    pub default: usize,
    pub dim: usize,
    pub secondary: usize,
    pub highlight: usize,
}

/// Outcome of a non-empty pass.
#[derive(Debug)]
pub struct Resolution<'n> {
    pub plan: VisibilityPlan,
    /// Selected nodes that resolved to a live handle, in selection order.
    pub selected: Vec<&'n Node>,
}

/// Compute the emphasis of every mounted marker and line for a non-empty
/// selection.
///
/// Selected ids without a node in the snapshot or without a live marker are
/// dropped. Returns `None` when nothing resolves, in which case the caller
/// waits for the next transition.
pub fn resolve_plan<'n>(
    network: &'n Network,
    selection: &Selection,
    mounted: &Mounted<'_>,
    link_pass: LinkPass,
) -> Option<Resolution<'n>> {
    let selected: Vec<&Node> = selection
        .iter()
        .filter(|id| mounted.has_node(id))
        .filter_map(|id| network.node(id.as_str()))
        .collect();
    if selected.is_empty() {
        return None;
    }

    // While nothing installed is selected, installed nodes stay legible as landmarks.
    let active_is_selected = selected.iter().any(|node| node.status.is_installed());

    let highlighted: HashSet<&NodeId> = selected.iter().map(|node| &node.id).collect();
    let connected: HashSet<&NodeId> = selected
        .iter()
        .flat_map(|node| node.connected_nodes.iter())
        .collect();

    let nodes = mounted
        .nodes
        .iter()
        .map(|&id| {
            let installed = network
                .node(id.as_str())
                .is_some_and(|node| node.status.is_installed());
            let emphasis = Emphasis {
                dim: active_is_selected || !installed,
                secondary: connected.contains(id),
                highlight: highlighted.contains(id),
            };
            (id.clone(), resolve(emphasis))
        })
        .collect();

    let links = match link_pass {
        LinkPass::Skip => HashMap::new(),
        LinkPass::Apply => {
            let incident: HashSet<&LinkKey> = selected
                .iter()
                .flat_map(|node| node.links.iter())
                .collect();
            mounted
                .links
                .iter()
                .map(|&key| {
                    let emphasis = Emphasis {
                        dim: true,
                        secondary: false,
                        highlight: incident.contains(key),
                    };
                    (key.clone(), resolve(emphasis))
                })
                .collect()
        }
    };

    Some(Resolution {
        plan: VisibilityPlan { nodes, links },
        selected,
    })
}
