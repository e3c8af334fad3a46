//! Headless stand-ins for the rendered markers, lines and map widget. They
//! record what the view asked for so the driver can report it.

use common::error::ViewResult;
use common::geo::{GeoBounds, LngLat};
use mesh_map_lib::registry::VisibilityHandle;
use mesh_map_lib::viewport::{CameraCommand, MapWidget};
use mesh_map_lib::visibility::Visibility;
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

/// Last state written to each handle, keyed by a display label.
pub type Board = Rc<RefCell<BTreeMap<String, Visibility>>>;

pub struct ProbeHandle {
    label: String,
    board: Board,
}

impl ProbeHandle {
    /// Starts at [`Visibility::Default`] like a freshly rendered marker.
    pub fn new(label: impl Into<String>, board: &Board) -> Self {
        let label = label.into();
        board.borrow_mut().insert(label.clone(), Visibility::Default);
        Self {
            label,
            board: Rc::clone(board),
        }
    }
}

impl VisibilityHandle for ProbeHandle {
    fn set_visibility(&mut self, state: Visibility) -> ViewResult<()> {
        self.board.borrow_mut().insert(self.label.clone(), state);
        Ok(())
    }
}

#[derive(Clone, Default)]
pub struct ProbeMap {
    issued: Rc<RefCell<Vec<CameraCommand>>>,
}

impl ProbeMap {
    /// Commands issued since the last call.
    pub fn drain(&self) -> Vec<CameraCommand> {
        self.issued.borrow_mut().drain(..).collect()
    }
}

impl MapWidget for ProbeMap {
    fn pan_to(&mut self, center: LngLat) -> ViewResult<()> {
        self.issued.borrow_mut().push(CameraCommand::PanTo { center });
        Ok(())
    }

    fn fit_bounds(&mut self, bounds: GeoBounds, padding: f64) -> ViewResult<()> {
        self.issued
            .borrow_mut()
            .push(CameraCommand::FitBounds { bounds, padding });
        Ok(())
    }

    fn pan_to_bounds(&mut self, bounds: GeoBounds, padding: f64) -> ViewResult<()> {
        self.issued
            .borrow_mut()
            .push(CameraCommand::PanToBounds { bounds, padding });
        Ok(())
    }
}
