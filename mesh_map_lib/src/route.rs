//! Route matching and the navigation collaborator.

use crate::selection::Selection;
use common::error::ViewResult;
use common::network::NodeId;
use serde::Serialize;
use std::cell::RefCell;

pub const ROOT_ROUTE: &str = "/";
const NODES_PREFIX: &str = "/nodes/";
const PANORAMAS_SEGMENT: &str = "panoramas";

/// Parameters extracted from a map route.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteMatch {
    /// Raw `-` joined node parameter, present only when the node route is active.
    pub node_param: Option<String>,
    /// Panorama id when the gallery route is active.
    pub panorama: Option<String>,
}

impl RouteMatch {
    /// Match `/nodes/:nodeId` and `/nodes/:nodeId/panoramas/:panoId`.
    /// Anything else, including `/nodes/` with an empty parameter, is inactive.
    pub fn from_path(path: &str) -> Self {
        let Some(rest) = path.strip_prefix(NODES_PREFIX) else {
            return Self::default();
        };
        let mut segments = rest.trim_end_matches('/').split('/');
        let Some(node_param) = segments.next().filter(|s| !s.is_empty()) else {
            return Self::default();
        };
        let panorama = match (segments.next(), segments.next()) {
            (Some(PANORAMAS_SEGMENT), Some(pano)) if !pano.is_empty() => Some(pano.to_string()),
            _ => None,
        };
        Self {
            node_param: Some(node_param.to_string()),
            panorama,
        }
    }

    pub fn is_active(&self) -> bool {
        self.node_param.is_some()
    }

    pub fn selection(&self) -> Selection {
        Selection::parse(self.node_param.as_deref())
    }
}

/// Route designating `selection`; an empty selection is the root route.
pub fn node_route(selection: &Selection) -> String {
    if selection.is_empty() {
        ROOT_ROUTE.to_string()
    } else {
        format!("{NODES_PREFIX}{}", selection.encode())
    }
}

pub fn single_node_route(id: &NodeId) -> String {
    format!("{NODES_PREFIX}{id}")
}

/// Navigation collaborator. Implementations are expected to be cheap to
/// share between the controller and its shortcut listener.
pub trait Router {
    /// Navigate, adding a history entry.
    fn push(&self, path: &str) -> ViewResult<()>;
    /// Navigate without adding a history entry.
    fn replace(&self, path: &str) -> ViewResult<()>;
    fn current(&self) -> String;
}

/// A navigation decided by the controller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "path", rename_all = "snake_case")]
pub enum Navigation {
    Push(String),
    Replace(String),
}

impl Navigation {
    pub fn path(&self) -> &str {
        match self {
            Self::Push(path) | Self::Replace(path) => path,
        }
    }

    pub fn apply(&self, router: &dyn Router) -> ViewResult<()> {
        match self {
            Self::Push(path) => router.push(path),
            Self::Replace(path) => router.replace(path),
        }
    }
}

/// In-memory history stack for single-threaded hosts and tests.
#[derive(Debug)]
pub struct MemoryHistory {
    entries: RefCell<Vec<String>>,
}

impl MemoryHistory {
    pub fn new(initial: impl Into<String>) -> Self {
        Self {
            entries: RefCell::new(vec![initial.into()]),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }

    pub fn entries(&self) -> Vec<String> {
        self.entries.borrow().clone()
    }
}

impl Default for MemoryHistory {
    fn default() -> Self {
        Self::new(ROOT_ROUTE)
    }
}

impl Router for MemoryHistory {
    fn push(&self, path: &str) -> ViewResult<()> {
        tracing::debug!(path, "history push");
        self.entries.borrow_mut().push(path.to_string());
        Ok(())
    }

    fn replace(&self, path: &str) -> ViewResult<()> {
        tracing::debug!(path, "history replace");
        let mut entries = self.entries.borrow_mut();
        match entries.last_mut() {
            Some(last) => *last = path.to_string(),
            None => entries.push(path.to_string()),
        }
        Ok(())
    }

    fn current(&self) -> String {
        self.entries
            .borrow()
            .last()
            .cloned()
            .unwrap_or_else(|| ROOT_ROUTE.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_is_inactive() {
        let m = RouteMatch::from_path("/");
        assert!(!m.is_active());
        assert!(m.selection().is_empty());
    }

    #[test]
    fn node_route_matches() {
        let m = RouteMatch::from_path("/nodes/227-312");
        assert_eq!(m.node_param.as_deref(), Some("227-312"));
        assert_eq!(m.panorama, None);
        assert_eq!(m.selection().len(), 2);
    }

    #[test]
    fn empty_node_param_is_inactive() {
        assert!(!RouteMatch::from_path("/nodes/").is_active());
        assert!(!RouteMatch::from_path("/nodes").is_active());
    }

    #[test]
    fn gallery_route_matches() {
        let m = RouteMatch::from_path("/nodes/227/panoramas/3");
        assert_eq!(m.node_param.as_deref(), Some("227"));
        assert_eq!(m.panorama.as_deref(), Some("3"));
    }

    #[test]
    fn unrelated_suffix_has_no_panorama() {
        let m = RouteMatch::from_path("/nodes/227/details");
        assert!(m.is_active());
        assert_eq!(m.panorama, None);
    }

    #[test]
    fn empty_selection_routes_to_root() {
        assert_eq!(node_route(&Selection::empty()), "/");
        assert_eq!(node_route(&Selection::parse(Some("b-a"))), "/nodes/a-b");
    }

    #[test]
    fn history_push_and_replace() {
        let history = MemoryHistory::default();
        history.push("/nodes/1").unwrap();
        assert_eq!(history.len(), 2);
        history.replace("/nodes/1-2").unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history.current(), "/nodes/1-2");
        assert_eq!(history.entries(), vec!["/", "/nodes/1-2"]);
    }

    #[test]
    fn navigation_applies_to_router() {
        let history = MemoryHistory::default();
        Navigation::Push("/nodes/9".to_string())
            .apply(&history)
            .unwrap();
        Navigation::Replace("/".to_string()).apply(&history).unwrap();
        assert_eq!(history.entries(), vec!["/", "/"]);
    }
}
