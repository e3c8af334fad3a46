//! Drives one headless map view through a scripted event sequence.

use crate::probe::{Board, ProbeHandle, ProbeMap};
use crate::script::ScriptEvent;
use common::filters::Filters;
use common::geo::LngLat;
use common::network::{Network, NodeId};
use mesh_map_lib::config::MapViewConfig;
use mesh_map_lib::controller::{SelectionController, Transition, ViewProps};
use mesh_map_lib::route::{MemoryHistory, RouteMatch, Router};
use mesh_map_lib::shortcuts::{InputSurface, Key, KeyEvent};
use mesh_map_lib::viewport::{CameraCommand, InitialView};
use mesh_map_lib::visibility::Visibility;
use serde::Serialize;
use std::collections::BTreeMap;
use std::rc::Rc;
use tracing::{debug, info, warn};

/// State of the view after one event.
#[derive(Debug, Serialize)]
pub struct StepReport {
    pub step: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event: Option<ScriptEvent>,
    pub route: String,
    pub transition: Option<Transition>,
    /// Only on the mount step.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub initial_view: Option<InitialView>,
    pub camera: Vec<CameraCommand>,
    /// Center of the last camera command of this step.
    pub camera_target: Option<LngLat>,
    pub multi_select: bool,
    pub markers: BTreeMap<String, Visibility>,
    pub lines: BTreeMap<String, Visibility>,
    pub title: Option<String>,
}

pub struct Driver {
    controller: SelectionController,
    history: Rc<MemoryHistory>,
    surface: Rc<InputSurface>,
    map: ProbeMap,
    network: Rc<Network>,
    filters: Filters,
    viewport_width: f64,
    markers: Board,
    lines: Board,
    step: usize,
}

impl Driver {
    pub fn new(config: MapViewConfig, network: Network, route: &str) -> Self {
        let history = Rc::new(MemoryHistory::new(route));
        let map = ProbeMap::default();
        let viewport_width = config.viewport_width;
        let controller = SelectionController::new(config, history.clone(), Box::new(map.clone()));
        Self {
            controller,
            history,
            surface: Rc::new(InputSurface::new()),
            map,
            network: Rc::new(network),
            filters: Filters::new(),
            viewport_width,
            markers: Board::default(),
            lines: Board::default(),
            step: 0,
        }
    }

    /// Mount the view and every marker and line of the snapshot.
    pub fn mount(&mut self) -> StepReport {
        let props = self.props();
        let mut transition = self.controller.mount(&self.surface, props);

        for node in self.network.nodes() {
            let handle = ProbeHandle::new(node.id.to_string(), &self.markers);
            if let Some(t) = self.controller.mount_marker(node.id.clone(), Box::new(handle)) {
                transition = Some(t);
            }
        }
        for link in self.network.links() {
            let key = link.key();
            let handle = ProbeHandle::new(key.to_string(), &self.lines);
            if let Some(t) = self.controller.mount_line(key, Box::new(handle)) {
                transition = Some(t);
            }
        }
        if transition.is_none() {
            transition = self.controller.handles_ready();
        }

        info!(
            nodes = self.network.nodes().len(),
            links = self.network.links().len(),
            route = %self.history.current(),
            "map view mounted"
        );
        let mut report = self.report(None, transition);
        report.initial_view = Some(self.controller.initial_view());
        report
    }

    pub fn handle(&mut self, event: ScriptEvent) -> StepReport {
        self.step += 1;
        debug!(step = self.step, ?event, "event");

        match &event {
            ScriptEvent::KeyDown { code } => self.surface.dispatch(KeyEvent::Down(Key::from_code(*code))),
            ScriptEvent::KeyUp { code } => self.surface.dispatch(KeyEvent::Up(Key::from_code(*code))),
            ScriptEvent::ClickNode { id } => {
                let id = NodeId::from(id.as_str());
                if !self.network.contains(id.as_str()) {
                    warn!(node = %id, "click on a node missing from the snapshot");
                }
                self.controller.click_node(&id);
            }
            ScriptEvent::ClickMap => {
                self.controller.click_map();
            }
            ScriptEvent::Navigate { path } => {
                if let Err(e) = self.history.push(path) {
                    warn!(path, error = %e, "navigation failed");
                }
            }
            ScriptEvent::SetFilter { node_type, visible } => {
                self.filters.set(node_type.as_str(), *visible);
            }
            ScriptEvent::Resize { width } => self.viewport_width = *width,
        }

        let props = self.props();
        let transition = self.controller.update(props);
        self.report(Some(event), Some(transition))
    }

    pub fn run(&mut self, events: Vec<ScriptEvent>) -> Vec<StepReport> {
        let mut reports = vec![self.mount()];
        reports.extend(events.into_iter().map(|event| self.handle(event)));
        self.controller.teardown();
        reports
    }

    fn props(&self) -> ViewProps {
        ViewProps {
            network: Rc::clone(&self.network),
            route: RouteMatch::from_path(&self.history.current()),
            filters: self.filters.clone(),
            viewport_width: self.viewport_width,
        }
    }

    fn report(&self, event: Option<ScriptEvent>, transition: Option<Transition>) -> StepReport {
        let camera = self.map.drain();
        StepReport {
            step: self.step,
            event,
            route: self.history.current(),
            transition,
            initial_view: None,
            camera_target: camera.last().map(CameraCommand::target),
            camera,
            multi_select: self.controller.is_multi_select_armed(),
            markers: self.markers.borrow().clone(),
            lines: self.lines.borrow().clone(),
            title: self.controller.render_plan().map(|plan| plan.title),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::network::{Link, Node, NodeStatus};

    fn node(id: &str, lng: f64, status: NodeStatus, connected: &[&str]) -> Node {
        Node {
            id: NodeId::from(id),
            coordinates: LngLat::new(lng, 40.7),
            node_type: "node".into(),
            status,
            connected_nodes: connected.iter().map(|c| NodeId::from(*c)).collect(),
            links: vec![],
        }
    }

    fn driver(route: &str) -> Driver {
        mesh_map_lib::init_test_tracing();
        let network = Network::new(
            vec![
                node("1", -74.0, NodeStatus::Installed, &["2"]),
                node("2", -73.9, NodeStatus::Installed, &["1"]),
            ],
            vec![Link {
                from: NodeId::from("1"),
                to: NodeId::from("2"),
                status: "active".into(),
                from_node: None,
                to_node: None,
            }],
            vec![],
        )
        .unwrap();
        Driver::new(MapViewConfig::default(), network, route)
    }

    #[test]
    fn mount_applies_route_selection() {
        let mut driver = driver("/nodes/1");
        let report = driver.mount();
        assert!(matches!(report.transition, Some(Transition::Applied { .. })));
        assert_eq!(report.markers["1"], Visibility::Highlight);
        assert_eq!(report.markers["2"], Visibility::Secondary);
        assert_eq!(report.camera.len(), 1);
        assert_eq!(report.camera_target, Some(LngLat::new(-74.0, 40.7)));
        assert_eq!(report.title.as_deref(), Some("1 - Map - NYC Mesh"));
        assert_eq!(
            report.initial_view,
            Some(InitialView {
                center: LngLat::new(-73.9595798, 40.7031809),
                zoom: 13,
            })
        );
    }

    #[test]
    fn meta_click_script() {
        let mut driver = driver("/nodes/1");
        let reports = driver.run(vec![
            ScriptEvent::KeyDown { code: 91 },
            ScriptEvent::ClickNode { id: "2".into() },
            ScriptEvent::KeyUp { code: 91 },
            ScriptEvent::KeyDown { code: 27 },
        ]);
        assert_eq!(reports.len(), 5);
        assert!(reports[1].initial_view.is_none());
        assert!(reports[4].camera_target.is_none());
        assert!(reports[1].multi_select);
        assert_eq!(reports[2].route, "/nodes/1-2");
        assert!(!reports[3].multi_select);
        assert_eq!(reports[4].route, "/");
        assert!(matches!(reports[4].transition, Some(Transition::Reset { .. })));
        assert_eq!(reports[4].markers["2"], Visibility::Default);
    }
}
