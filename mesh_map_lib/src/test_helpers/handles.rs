use crate::registry::VisibilityHandle;
use crate::viewport::{CameraCommand, MapWidget};
use crate::visibility::Visibility;
use common::error::{ViewError, ViewResult};
use common::geo::{GeoBounds, LngLat};
use std::cell::RefCell;
use std::rc::Rc;

/// Marker/line handle that records every state it is given. Clones share
/// the same log so a test can keep one while the registry owns another.
#[derive(Clone, Default)]
pub struct RecordingHandle {
    log: Rc<RefCell<Vec<Visibility>>>,
    fail: bool,
}

impl RecordingHandle {
    /// A handle whose widget is gone: every update fails.
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }

    pub fn current(&self) -> Option<Visibility> {
        self.log.borrow().last().copied()
    }

    pub fn history(&self) -> Vec<Visibility> {
        self.log.borrow().clone()
    }

    pub fn update_count(&self) -> usize {
        self.log.borrow().len()
    }
}

impl VisibilityHandle for RecordingHandle {
    fn set_visibility(&mut self, state: Visibility) -> ViewResult<()> {
        if self.fail {
            return Err(ViewError::MarkerDetached("recording".to_string()));
        }
        self.log.borrow_mut().push(state);
        Ok(())
    }
}

/// Map widget that records camera commands.
#[derive(Clone, Default)]
pub struct RecordingMap {
    log: Rc<RefCell<Vec<CameraCommand>>>,
    fail: bool,
}

impl RecordingMap {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }

    pub fn commands(&self) -> Vec<CameraCommand> {
        self.log.borrow().clone()
    }

    fn record(&mut self, command: CameraCommand) -> ViewResult<()> {
        if self.fail {
            return Err(ViewError::CameraRejected("map not loaded".to_string()));
        }
        self.log.borrow_mut().push(command);
        Ok(())
    }
}

impl MapWidget for RecordingMap {
    fn pan_to(&mut self, center: LngLat) -> ViewResult<()> {
        self.record(CameraCommand::PanTo { center })
    }

    fn fit_bounds(&mut self, bounds: GeoBounds, padding: f64) -> ViewResult<()> {
        self.record(CameraCommand::FitBounds { bounds, padding })
    }

    fn pan_to_bounds(&mut self, bounds: GeoBounds, padding: f64) -> ViewResult<()> {
        self.record(CameraCommand::PanToBounds { bounds, padding })
    }
}
