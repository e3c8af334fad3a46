//! Camera decisions following a selection pass.

use crate::fingerprint::InputDiff;
use common::error::ViewResult;
use common::geo::{GeoBounds, LngLat};
use common::network::Node;
use serde::Serialize;

/// Camera primitives of the external map widget.
pub trait MapWidget {
    fn pan_to(&mut self, center: LngLat) -> ViewResult<()>;
    fn fit_bounds(&mut self, bounds: GeoBounds, padding: f64) -> ViewResult<()>;
    fn pan_to_bounds(&mut self, bounds: GeoBounds, padding: f64) -> ViewResult<()>;
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum CameraCommand {
    PanTo { center: LngLat },
    FitBounds { bounds: GeoBounds, padding: f64 },
    PanToBounds { bounds: GeoBounds, padding: f64 },
}

impl CameraCommand {
    /// Point the camera ends up centered on.
    pub fn target(&self) -> LngLat {
        match *self {
            Self::PanTo { center } => center,
            Self::FitBounds { bounds, .. } | Self::PanToBounds { bounds, .. } => bounds.center(),
        }
    }

    pub fn issue(&self, map: &mut dyn MapWidget) -> ViewResult<()> {
        match *self {
            Self::PanTo { center } => map.pan_to(center),
            Self::FitBounds { bounds, padding } => map.fit_bounds(bounds, padding),
            Self::PanToBounds { bounds, padding } => map.pan_to_bounds(bounds, padding),
        }
    }
}

/// Where the map opens before any selection moves the camera.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct InitialView {
    pub center: LngLat,
    pub zoom: u8,
}

/// Viewport dimensions relevant to camera padding.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub padding_divisor: f64,
}

impl Viewport {
    pub fn padding(&self) -> f64 {
        self.width / self.padding_divisor
    }
}

/// Decide the camera command for the nodes a pass resolved.
///
/// Filter changes never move the camera. A single node is panned to and
/// never fitted. Several nodes are framed: fitted only when neither the
/// selection nor the snapshot changed, panned into view otherwise.
pub fn plan_camera(selected: &[&Node], diff: &InputDiff, viewport: Viewport) -> Option<CameraCommand> {
    if diff.filters_changed {
        return None;
    }

    match selected {
        [] => None,
        [node] => Some(CameraCommand::PanTo {
            center: node.coordinates,
        }),
        nodes => {
            let bounds = GeoBounds::enclosing(nodes.iter().map(|node| node.coordinates))?;
            let padding = viewport.padding();
            let fit = !diff.selection_changed && !diff.nodes_changed;
            Some(if fit {
                CameraCommand::FitBounds { bounds, padding }
            } else {
                CameraCommand::PanToBounds { bounds, padding }
            })
        }
    }
}
