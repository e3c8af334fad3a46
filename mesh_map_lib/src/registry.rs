//! Live marker and line handles, keyed by node id and link identity.

use crate::visibility::{Mounted, Visibility, VisibilityPlan};
use common::error::ViewResult;
use common::network::{LinkKey, Network, NodeId};
use serde::Serialize;
use std::collections::HashMap;

/// Presentation contract of a rendered marker or line.
pub trait VisibilityHandle {
    fn set_visibility(&mut self, state: Visibility) -> ViewResult<()>;
}

/// Result of applying one plan.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BatchOutcome {
    pub applied: usize,
    pub failed: usize,
}

#[derive(Default)]
pub struct HandleRegistry {
    markers: HashMap<NodeId, Box<dyn VisibilityHandle>>,
    lines: HashMap<LinkKey, Box<dyn VisibilityHandle>>,
}

impl HandleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a marker; a remount replaces the previous handle.
    pub fn mount_marker(&mut self, id: NodeId, handle: Box<dyn VisibilityHandle>) {
        self.markers.insert(id, handle);
    }

    pub fn unmount_marker(&mut self, id: &NodeId) -> bool {
        self.markers.remove(id).is_some()
    }

    pub fn mount_line(&mut self, key: LinkKey, handle: Box<dyn VisibilityHandle>) {
        self.lines.insert(key, handle);
    }

    pub fn unmount_line(&mut self, key: &LinkKey) -> bool {
        self.lines.remove(key).is_some()
    }

    pub fn marker_count(&self) -> usize {
        self.markers.len()
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn clear(&mut self) {
        self.markers.clear();
        self.lines.clear();
    }

    pub fn mounted(&self) -> Mounted<'_> {
        Mounted::new(self.markers.keys(), self.lines.keys())
    }

    /// Whether every node and link of the snapshot has a live handle.
    pub fn covers(&self, network: &Network) -> bool {
        network
            .nodes()
            .iter()
            .all(|node| self.markers.contains_key(&node.id))
            && network
                .links()
                .iter()
                .all(|link| self.lines.contains_key(&link.key()))
    }

    /// Push a whole plan to the handles in one go.
    ///
    /// A failing handle is logged and counted; the rest of the batch still
    /// applies.
    pub fn apply(&mut self, plan: &VisibilityPlan) -> BatchOutcome {
        let mut outcome = BatchOutcome::default();

        for (id, state) in plan.nodes.iter() {
            let Some(handle) = self.markers.get_mut(id) else {
                continue;
            };
            match handle.set_visibility(*state) {
                Ok(()) => outcome.applied += 1,
                Err(e) => {
                    tracing::warn!(node = %id, error = %e, "marker visibility update failed");
                    outcome.failed += 1;
                }
            }
        }

        for (key, state) in plan.links.iter() {
            let Some(handle) = self.lines.get_mut(key) else {
                continue;
            };
            match handle.set_visibility(*state) {
                Ok(()) => outcome.applied += 1,
                Err(e) => {
                    tracing::warn!(link = %key, error = %e, "line visibility update failed");
                    outcome.failed += 1;
                }
            }
        }

        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::handles::RecordingHandle;
    use crate::test_helpers::util::{mk_link, mk_network, mk_node};
    use common::network::NodeStatus;

    #[test]
    fn apply_reaches_mounted_handles_only() {
        let mut registry = HandleRegistry::new();
        let a = RecordingHandle::default();
        registry.mount_marker(NodeId::from("a"), Box::new(a.clone()));

        let mut plan = VisibilityPlan::default();
        plan.nodes.insert(NodeId::from("a"), Visibility::Highlight);
        plan.nodes.insert(NodeId::from("ghost"), Visibility::Dim);

        let outcome = registry.apply(&plan);
        assert_eq!(outcome, BatchOutcome { applied: 1, failed: 0 });
        assert_eq!(a.current(), Some(Visibility::Highlight));
    }

    #[test]
    fn failing_handle_does_not_abort_batch() {
        let mut registry = HandleRegistry::new();
        let ok = RecordingHandle::default();
        registry.mount_marker(NodeId::from("ok"), Box::new(ok.clone()));
        registry.mount_marker(NodeId::from("bad"), Box::new(RecordingHandle::failing()));
        let line = RecordingHandle::default();
        registry.mount_line(LinkKey::new("ok", "bad", "active"), Box::new(line.clone()));

        let mut plan = VisibilityPlan::default();
        plan.nodes.insert(NodeId::from("ok"), Visibility::Dim);
        plan.nodes.insert(NodeId::from("bad"), Visibility::Dim);
        plan.links
            .insert(LinkKey::new("ok", "bad", "active"), Visibility::Highlight);

        let outcome = registry.apply(&plan);
        assert_eq!(outcome, BatchOutcome { applied: 2, failed: 1 });
        assert_eq!(ok.current(), Some(Visibility::Dim));
        assert_eq!(line.current(), Some(Visibility::Highlight));
    }

    #[test]
    fn unmount_drops_handle() {
        let mut registry = HandleRegistry::new();
        registry.mount_marker(NodeId::from("a"), Box::new(RecordingHandle::default()));
        assert!(registry.unmount_marker(&NodeId::from("a")));
        assert!(!registry.unmount_marker(&NodeId::from("a")));
        assert_eq!(registry.marker_count(), 0);
    }

    #[test]
    fn covers_requires_every_entity() {
        let network = mk_network(
            vec![
                mk_node("a", 0.0, 0.0, NodeStatus::Installed, &[], &[]),
                mk_node("b", 1.0, 1.0, NodeStatus::Installed, &[], &[]),
            ],
            vec![mk_link("a", "b", "active")],
        );
        let mut registry = HandleRegistry::new();
        registry.mount_marker(NodeId::from("a"), Box::new(RecordingHandle::default()));
        registry.mount_marker(NodeId::from("b"), Box::new(RecordingHandle::default()));
        assert!(!registry.covers(&network));

        registry.mount_line(LinkKey::new("a", "b", "active"), Box::new(RecordingHandle::default()));
        assert!(registry.covers(&network));
    }
}
