//! What the map draws for the current inputs: which markers and lines are
//! shown after filtering, the document title, and the panels a selection
//! opens.

use crate::route::RouteMatch;
use crate::selection::Selection;
use common::filters::Filters;
use common::geo::LngLat;
use common::network::{LinkKey, Network, NodeId};
use itertools::Itertools;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarkerRender {
    pub id: NodeId,
    pub position: LngLat,
    pub visible: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineRender {
    pub key: LinkKey,
    pub visible: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KioskRender {
    pub id: String,
    pub position: LngLat,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GalleryPanel {
    pub node_param: String,
    pub panorama: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderPlan {
    pub markers: Vec<MarkerRender>,
    pub lines: Vec<LineRender>,
    pub kiosks: Vec<KioskRender>,
    pub title: String,
    /// One node detail panel per selected id, in route order.
    pub detail_panels: Vec<NodeId>,
    pub gallery: Option<GalleryPanel>,
}

/// A filtered-out node stays visible while it is selected. Lines have no
/// such override: a line is hidden as soon as either endpoint type is.
pub fn render_plan(
    network: &Network,
    route: &RouteMatch,
    filters: &Filters,
    title_suffix: &str,
) -> RenderPlan {
    let selection = route.selection();

    let markers = network
        .nodes()
        .iter()
        .map(|node| MarkerRender {
            id: node.id.clone(),
            position: node.coordinates,
            visible: filters.is_visible(&node.node_type) || selection.contains(&node.id),
        })
        .collect();

    let lines = network
        .links()
        .iter()
        .map(|link| LineRender {
            key: link.key(),
            visible: link.endpoint_types().all(|t| filters.is_visible(t)),
        })
        .collect();

    let kiosks = network
        .kiosks()
        .iter()
        .map(|kiosk| KioskRender {
            id: kiosk.id.clone(),
            position: kiosk.coordinates,
        })
        .collect();

    let gallery = match (&route.node_param, &route.panorama) {
        (Some(node_param), Some(panorama)) => Some(GalleryPanel {
            node_param: node_param.clone(),
            panorama: panorama.clone(),
        }),
        _ => None,
    };

    RenderPlan {
        markers,
        lines,
        kiosks,
        title: document_title(&selection, title_suffix),
        detail_panels: selection.iter().cloned().collect(),
        gallery,
    }
}

pub fn document_title(selection: &Selection, suffix: &str) -> String {
    if selection.is_empty() {
        suffix.to_string()
    } else {
        format!("{} - {suffix}", selection.iter().join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::util::{mk_link, mk_network, mk_node};
    use common::network::{Kiosk, NodeStatus};

    fn network() -> Network {
        let mut hub = mk_node("1", 0.0, 0.0, NodeStatus::Installed, &["2"], &[]);
        hub.node_type = "hub".into();
        let mut potential = mk_node("2", 1.0, 1.0, NodeStatus::Other("Potential".into()), &[], &[]);
        potential.node_type = "potential".into();
        Network::new(
            vec![hub, potential],
            vec![mk_link("1", "2", "active")],
            vec![Kiosk {
                id: "k".into(),
                coordinates: LngLat::new(0.5, 0.5),
            }],
        )
        .unwrap()
    }

    fn visible(plan: &RenderPlan, id: &str) -> bool {
        plan.markers
            .iter()
            .find(|m| m.id.as_str() == id)
            .map(|m| m.visible)
            .unwrap()
    }

    #[test]
    fn filter_hides_unselected_node() {
        let filters: Filters = [("potential", false)].into_iter().collect();
        let plan = render_plan(&network(), &RouteMatch::from_path("/"), &filters, "Map");
        assert!(visible(&plan, "1"));
        assert!(!visible(&plan, "2"));
        assert!(!plan.lines[0].visible);
        assert_eq!(plan.kiosks.len(), 1);
    }

    #[test]
    fn selection_overrides_filter() {
        let filters: Filters = [("potential", false)].into_iter().collect();
        let plan = render_plan(
            &network(),
            &RouteMatch::from_path("/nodes/2"),
            &filters,
            "Map",
        );
        assert!(visible(&plan, "2"));
        // lines do not get the override
        assert!(!plan.lines[0].visible);
    }

    #[test]
    fn title_and_panels_follow_route_order() {
        let plan = render_plan(
            &network(),
            &RouteMatch::from_path("/nodes/2-1"),
            &Filters::new(),
            "Map - NYC Mesh",
        );
        assert_eq!(plan.title, "2, 1 - Map - NYC Mesh");
        assert_eq!(plan.detail_panels, vec![NodeId::from("2"), NodeId::from("1")]);
        assert!(plan.gallery.is_none());
    }

    #[test]
    fn stale_ids_still_get_a_panel() {
        let plan = render_plan(
            &network(),
            &RouteMatch::from_path("/nodes/9"),
            &Filters::new(),
            "Map",
        );
        assert_eq!(plan.detail_panels, vec![NodeId::from("9")]);
    }

    #[test]
    fn gallery_route_opens_gallery() {
        let plan = render_plan(
            &network(),
            &RouteMatch::from_path("/nodes/1/panoramas/4"),
            &Filters::new(),
            "Map",
        );
        assert_eq!(
            plan.gallery,
            Some(GalleryPanel {
                node_param: "1".into(),
                panorama: "4".into(),
            })
        );
    }

    #[test]
    fn no_selection_title_is_suffix() {
        let network = mk_network(vec![], vec![]);
        let plan = render_plan(&network, &RouteMatch::default(), &Filters::new(), "Map");
        assert_eq!(plan.title, "Map");
        assert!(plan.detail_panels.is_empty());
    }
}
