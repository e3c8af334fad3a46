//! Mesh network snapshot: nodes, links and kiosks as delivered by the node
//! database, plus the typed identities used to address their map handles.

use crate::error::{NetworkError, NetworkResult};
use crate::geo::LngLat;
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::collections::HashMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::path::Path;

/// Identifier of a mesh node.
///
/// The database hands out numeric ids, but routes and handle registries work
/// with their string form, and ordering is lexicographic on that form.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "RawNodeId", into = "String")]
pub struct NodeId(String);

#[derive(Deserialize)]
#[serde(untagged)]
enum RawNodeId {
    Number(u64),
    Text(String),
}

impl From<RawNodeId> for NodeId {
    fn from(raw: RawNodeId) -> Self {
        match raw {
            RawNodeId::Number(n) => Self(n.to_string()),
            RawNodeId::Text(s) => Self(s),
        }
    }
}

impl NodeId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for NodeId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for NodeId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<NodeId> for String {
    fn from(id: NodeId) -> Self {
        id.0
    }
}

impl Borrow<str> for NodeId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Installation status of a node.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum NodeStatus {
    Installed,
    Other(String),
}

impl NodeStatus {
    pub const INSTALLED: &'static str = "Installed";

    pub fn is_installed(&self) -> bool {
        matches!(self, Self::Installed)
    }
}

impl Default for NodeStatus {
    fn default() -> Self {
        Self::Other(String::new())
    }
}

impl From<String> for NodeStatus {
    fn from(status: String) -> Self {
        if status == Self::INSTALLED {
            Self::Installed
        } else {
            Self::Other(status)
        }
    }
}

impl From<NodeStatus> for String {
    fn from(status: NodeStatus) -> Self {
        match status {
            NodeStatus::Installed => NodeStatus::INSTALLED.to_string(),
            NodeStatus::Other(s) => s,
        }
    }
}

/// Identity of a link line on the map.
///
/// Endpoints are ordered and the status is part of the identity, so
/// `(a, b, active)` and `(b, a, active)` address different lines.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct LinkKey {
    pub from: NodeId,
    pub to: NodeId,
    #[serde(default)]
    pub status: String,
}

impl LinkKey {
    pub fn new(from: impl Into<NodeId>, to: impl Into<NodeId>, status: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            status: status.into(),
        }
    }
}

impl fmt::Display for LinkKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{} {}", self.from, self.to, self.status)
    }
}

#[derive(Debug, Clone, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    pub id: NodeId,
    pub coordinates: LngLat,
    #[serde(rename = "type", default)]
    pub node_type: String,
    #[serde(default)]
    pub status: NodeStatus,
    #[serde(default)]
    pub connected_nodes: Vec<NodeId>,
    /// Incident links, by identity.
    #[serde(default)]
    pub links: Vec<LinkKey>,
}

/// Denormalized summary of a link endpoint, used for filter evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LinkEndpoint {
    #[serde(rename = "type", default)]
    pub node_type: String,
}

#[derive(Debug, Clone, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Link {
    pub from: NodeId,
    pub to: NodeId,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub from_node: Option<LinkEndpoint>,
    #[serde(default)]
    pub to_node: Option<LinkEndpoint>,
}

impl Link {
    pub fn key(&self) -> LinkKey {
        LinkKey {
            from: self.from.clone(),
            to: self.to.clone(),
            status: self.status.clone(),
        }
    }

    /// Type tags of the resolved endpoints.
    pub fn endpoint_types(&self) -> impl Iterator<Item = &str> {
        self.from_node
            .iter()
            .chain(self.to_node.iter())
            .map(|e| e.node_type.as_str())
    }
}

/// A decorative kiosk marker. Kiosks never take part in selection.
#[derive(Debug, Clone, PartialEq, Hash, Serialize, Deserialize)]
pub struct Kiosk {
    pub id: String,
    pub coordinates: LngLat,
}

#[derive(Deserialize)]
struct Snapshot {
    #[serde(default)]
    nodes: Vec<Node>,
    #[serde(default)]
    links: Vec<Link>,
    #[serde(default)]
    kiosks: Vec<Kiosk>,
}

/// Immutable network snapshot for one render cycle.
#[derive(Debug, Clone, Default)]
pub struct Network {
    nodes: Vec<Node>,
    links: Vec<Link>,
    kiosks: Vec<Kiosk>,
    index: HashMap<NodeId, usize>,
}

impl Network {
    /// Build a snapshot, indexing nodes and filling missing link endpoint
    /// summaries from the node index.
    pub fn new(nodes: Vec<Node>, mut links: Vec<Link>, kiosks: Vec<Kiosk>) -> NetworkResult<Self> {
        let mut index = HashMap::with_capacity(nodes.len());
        for (pos, node) in nodes.iter().enumerate() {
            if index.insert(node.id.clone(), pos).is_some() {
                return Err(NetworkError::DuplicateNode(node.id.to_string()));
            }
        }

        let endpoint = |id: &NodeId| {
            index.get(id).map(|&pos| LinkEndpoint {
                node_type: nodes[pos].node_type.clone(),
            })
        };
        for link in links.iter_mut() {
            if link.from_node.is_none() {
                link.from_node = endpoint(&link.from);
            }
            if link.to_node.is_none() {
                link.to_node = endpoint(&link.to);
            }
        }

        Ok(Self {
            nodes,
            links,
            kiosks,
            index,
        })
    }

    pub fn from_json_str(json: &str) -> NetworkResult<Self> {
        let snapshot: Snapshot = serde_json::from_str(json)?;
        Self::new(snapshot.nodes, snapshot.links, snapshot.kiosks)
    }

    pub fn from_path(path: impl AsRef<Path>) -> NetworkResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| NetworkError::ReadError {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    pub fn node(&self, id: &str) -> Option<&Node> {
        self.index.get(id).map(|&pos| &self.nodes[pos])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn links(&self) -> &[Link] {
        &self.links
    }

    pub fn kiosks(&self) -> &[Kiosk] {
        &self.kiosks
    }
}

impl Hash for Network {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.nodes.hash(state);
        self.links.hash(state);
        self.kiosks.hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SNAPSHOT: &str = r#"{
        "nodes": [
            {"id": 227, "coordinates": [-73.98, 40.71], "type": "supernode", "status": "Installed",
             "connectedNodes": [312], "links": [{"from": 227, "to": 312, "status": "active"}]},
            {"id": 312, "coordinates": [-73.95, 40.69], "type": "node", "status": "Potential"}
        ],
        "links": [{"from": 227, "to": 312, "status": "active"}],
        "kiosks": [{"id": "k1", "coordinates": [-73.96, 40.70]}]
    }"#;

    #[test]
    fn parses_snapshot() {
        let network = Network::from_json_str(SNAPSHOT).unwrap();
        assert_eq!(network.nodes().len(), 2);
        assert_eq!(network.kiosks().len(), 1);

        let hub = network.node("227").unwrap();
        assert!(hub.status.is_installed());
        assert_eq!(hub.connected_nodes, vec![NodeId::from("312")]);
        assert_eq!(hub.links, vec![LinkKey::new("227", "312", "active")]);

        let other = network.node("312").unwrap();
        assert_eq!(other.status, NodeStatus::Other("Potential".to_string()));
        assert!(other.links.is_empty());
    }

    #[test]
    fn fills_missing_endpoints() {
        let network = Network::from_json_str(SNAPSHOT).unwrap();
        let link = &network.links()[0];
        let types: Vec<&str> = link.endpoint_types().collect();
        assert_eq!(types, vec!["supernode", "node"]);
    }

    #[test]
    fn unknown_endpoint_has_no_type() {
        let json = r#"{"links": [{"from": "a", "to": "b", "status": "active"}]}"#;
        let network = Network::from_json_str(json).unwrap();
        assert_eq!(network.links()[0].endpoint_types().count(), 0);
    }

    #[test]
    fn duplicate_node_rejected() {
        let json = r#"{"nodes": [
            {"id": 1, "coordinates": [0, 0]},
            {"id": "1", "coordinates": [1, 1]}
        ]}"#;
        let err = Network::from_json_str(json).unwrap_err();
        assert!(matches!(err, NetworkError::DuplicateNode(id) if id == "1"));
    }

    #[test]
    fn link_key_identity_is_directed() {
        let ab = LinkKey::new("a", "b", "active");
        let ba = LinkKey::new("b", "a", "active");
        let ab_dead = LinkKey::new("a", "b", "dead");
        assert_ne!(ab, ba);
        assert_ne!(ab, ab_dead);
        assert_eq!(ab.to_string(), "a-b active");
    }

    #[test]
    fn node_id_order_is_lexicographic() {
        let mut ids = vec![NodeId::from("227"), NodeId::from("1000"), NodeId::from("3")];
        ids.sort();
        assert_eq!(ids, vec![NodeId::from("1000"), NodeId::from("227"), NodeId::from("3")]);
    }

    #[test]
    fn from_path_missing_file() {
        let err = Network::from_path("/nonexistent/nodes.json").unwrap_err();
        assert!(matches!(err, NetworkError::ReadError { .. }));
    }

    #[test]
    fn from_path_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("network.json");
        std::fs::write(&path, SNAPSHOT).unwrap();
        let network = Network::from_path(&path).unwrap();
        assert!(network.contains("312"));
    }
}
