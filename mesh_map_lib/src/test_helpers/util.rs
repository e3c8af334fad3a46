use crate::controller::ViewProps;
use crate::route::RouteMatch;
use common::filters::Filters;
use common::geo::LngLat;
use common::network::{Link, LinkKey, Network, Node, NodeId, NodeStatus};
use std::rc::Rc;

/// Build a node of type `node` with the given neighbours and incident links.
pub fn mk_node(
    id: &str,
    lng: f64,
    lat: f64,
    status: NodeStatus,
    connected: &[&str],
    links: &[(&str, &str, &str)],
) -> Node {
    Node {
        id: NodeId::from(id),
        coordinates: LngLat::new(lng, lat),
        node_type: "node".to_string(),
        status,
        connected_nodes: connected.iter().map(|c| NodeId::from(*c)).collect(),
        links: links
            .iter()
            .map(|(from, to, status)| LinkKey::new(*from, *to, *status))
            .collect(),
    }
}

/// Link without denormalized endpoints; [`Network::new`] fills them in.
pub fn mk_link(from: &str, to: &str, status: &str) -> Link {
    Link {
        from: NodeId::from(from),
        to: NodeId::from(to),
        status: status.to_string(),
        from_node: None,
        to_node: None,
    }
}

pub fn mk_network(nodes: Vec<Node>, links: Vec<Link>) -> Network {
    Network::new(nodes, links, vec![]).expect("test network must not contain duplicate ids")
}

/// Props for `path` with default filters and a 1000px wide viewport.
pub fn mk_props(network: &Rc<Network>, path: &str) -> ViewProps {
    ViewProps {
        network: Rc::clone(network),
        route: RouteMatch::from_path(path),
        filters: Filters::new(),
        viewport_width: 1000.0,
    }
}
