//! Top-level selection controller.
//!
//! Owns the handle registry, the shortcut subscription and the camera
//! collaborator, and turns every relevant input change into one batched
//! visibility pass followed by at most one camera command.

use crate::config::MapViewConfig;
use crate::fingerprint::{InputDiff, InputStamp};
use crate::registry::{BatchOutcome, HandleRegistry, VisibilityHandle};
use crate::render::{render_plan, RenderPlan};
use crate::route::{node_route, single_node_route, Navigation, RouteMatch, Router, ROOT_ROUTE};
use crate::selection::Selection;
use crate::shortcuts::{register_global_shortcuts, InputSurface, ShortcutSubscription};
use crate::viewport::{plan_camera, CameraCommand, InitialView, MapWidget, Viewport};
use crate::visibility::{resolve_plan, LinkPass, PlanSummary, VisibilityPlan};
use common::filters::Filters;
use common::network::{LinkKey, Network, NodeId};
use serde::Serialize;
use std::cell::Cell;
use std::rc::Rc;
use tracing::{debug, error, warn};

/// Inputs of one render.
#[derive(Debug, Clone)]
pub struct ViewProps {
    pub network: Rc<Network>,
    pub route: RouteMatch,
    pub filters: Filters,
    pub viewport_width: f64,
}

/// What an input change did.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "transition", rename_all = "snake_case")]
pub enum Transition {
    /// Inputs identical to the previous render.
    Unchanged,
    /// Neither the previous nor the new route designates a node.
    Idle,
    /// Selection cleared: every handle back to default, camera untouched.
    Reset { outcome: BatchOutcome },
    /// No selected node has a live marker yet.
    AwaitingHandles,
    Applied {
        selected: usize,
        summary: PlanSummary,
        outcome: BatchOutcome,
        links_updated: bool,
        camera: Option<CameraCommand>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PassKind {
    Initial,
    Update,
}

struct Current {
    props: ViewProps,
    selection: Selection,
    stamp: InputStamp,
}

impl Current {
    fn new(props: ViewProps) -> Self {
        let selection = props.route.selection();
        let stamp = InputStamp::of(&props.network, &selection, &props.filters);
        Self {
            props,
            selection,
            stamp,
        }
    }
}

pub struct SelectionController {
    config: MapViewConfig,
    router: Rc<dyn Router>,
    map: Box<dyn MapWidget>,
    registry: HandleRegistry,
    multi_select: Rc<Cell<bool>>,
    subscription: Option<ShortcutSubscription>,
    current: Option<Current>,
    pending_initial: bool,
}

impl SelectionController {
    pub fn new(config: MapViewConfig, router: Rc<dyn Router>, map: Box<dyn MapWidget>) -> Self {
        Self {
            config,
            router,
            map,
            registry: HandleRegistry::new(),
            multi_select: Rc::new(Cell::new(false)),
            subscription: None,
            current: None,
            pending_initial: false,
        }
    }

    /// Attach to the host: register global shortcuts and record the first
    /// props. A route selection is applied once the handles are ready.
    pub fn mount(&mut self, surface: &Rc<InputSurface>, props: ViewProps) -> Option<Transition> {
        if let Some(mut previous) = self.subscription.take() {
            previous.release();
        }
        self.subscription = Some(register_global_shortcuts(
            surface,
            Rc::clone(&self.multi_select),
            Rc::clone(&self.router),
        ));
        self.adopt_initial(props)
    }

    pub fn is_mounted(&self) -> bool {
        self.subscription
            .as_ref()
            .is_some_and(ShortcutSubscription::is_active)
    }

    /// Detach from the host. Releases the shortcut listener and drops
    /// every handle.
    pub fn teardown(&mut self) {
        if let Some(mut subscription) = self.subscription.take() {
            subscription.release();
        }
        self.registry.clear();
        self.current = None;
        self.pending_initial = false;
        self.multi_select.set(false);
        debug!("selection controller torn down");
    }

    pub fn mount_marker(
        &mut self,
        id: NodeId,
        handle: Box<dyn VisibilityHandle>,
    ) -> Option<Transition> {
        self.registry.mount_marker(id, handle);
        self.try_initial_pass()
    }

    pub fn unmount_marker(&mut self, id: &NodeId) {
        self.registry.unmount_marker(id);
    }

    pub fn mount_line(&mut self, key: LinkKey, handle: Box<dyn VisibilityHandle>) -> Option<Transition> {
        self.registry.mount_line(key, handle);
        self.try_initial_pass()
    }

    pub fn unmount_line(&mut self, key: &LinkKey) {
        self.registry.unmount_line(key);
    }

    /// Explicit readiness signal for hosts that never mount some entities.
    /// Runs the pending initial pass, if any.
    pub fn handles_ready(&mut self) -> Option<Transition> {
        if !self.pending_initial {
            return None;
        }
        Some(self.initial_pass())
    }

    /// React to new props. Recomputes only when the snapshot, the selection
    /// or the filters differ from the previous render.
    pub fn update(&mut self, props: ViewProps) -> Transition {
        let next = Current::new(props);
        let Some(prev) = self.current.as_ref() else {
            let initial = self.adopt_initial(next.props);
            return initial.unwrap_or(if self.pending_initial {
                Transition::AwaitingHandles
            } else {
                Transition::Idle
            });
        };

        let diff = next.stamp.diff(&prev.stamp);
        let prev_selected = !prev.selection.is_empty();
        self.current = Some(next);
        if !diff.any() {
            return Transition::Unchanged;
        }

        let transition = self.run_current(prev_selected, diff, PassKind::Update);
        // A filter-only pass skips links and camera, so it cannot stand in
        // for the initial pass.
        if matches!(
            transition,
            Transition::Applied {
                links_updated: true,
                ..
            } | Transition::Reset { .. }
                | Transition::Idle
        ) {
            self.pending_initial = false;
        }
        transition
    }

    /// Plain click selects only `id`. With multi-select armed and a
    /// selection present, `id` is toggled in place without a new history
    /// entry.
    pub fn click_node(&mut self, id: &NodeId) -> Navigation {
        let selection = self.selection();
        let navigation = match selection {
            Some(selection) if self.multi_select.get() && !selection.is_empty() => {
                Navigation::Replace(node_route(&selection.toggled(id)))
            }
            _ => Navigation::Push(single_node_route(id)),
        };
        self.navigate(&navigation);
        navigation
    }

    /// Clicking the map background clears the selection.
    pub fn click_map(&mut self) -> Navigation {
        let navigation = Navigation::Push(ROOT_ROUTE.to_string());
        self.navigate(&navigation);
        navigation
    }

    pub fn selection(&self) -> Option<&Selection> {
        self.current.as_ref().map(|c| &c.selection)
    }

    pub fn is_multi_select_armed(&self) -> bool {
        self.multi_select.get()
    }

    pub fn is_initial_pass_pending(&self) -> bool {
        self.pending_initial
    }

    pub fn registry(&self) -> &HandleRegistry {
        &self.registry
    }

    pub fn config(&self) -> &MapViewConfig {
        &self.config
    }

    pub fn initial_view(&self) -> InitialView {
        self.config.initial_view()
    }

    pub fn render_plan(&self) -> Option<RenderPlan> {
        self.current.as_ref().map(|c| {
            render_plan(
                &c.props.network,
                &c.props.route,
                &c.props.filters,
                &self.config.title_suffix,
            )
        })
    }

    fn navigate(&self, navigation: &Navigation) {
        if let Err(e) = navigation.apply(self.router.as_ref()) {
            warn!(path = navigation.path(), error = %e, "navigation failed");
        }
    }

    fn adopt_initial(&mut self, props: ViewProps) -> Option<Transition> {
        let current = Current::new(props);
        self.pending_initial = !current.selection.is_empty();
        self.current = Some(current);
        self.try_initial_pass()
    }

    fn try_initial_pass(&mut self) -> Option<Transition> {
        let covered = self
            .current
            .as_ref()
            .is_some_and(|c| self.registry.covers(&c.props.network));
        if self.pending_initial && covered {
            Some(self.initial_pass())
        } else {
            None
        }
    }

    /// First application of the route selection. Compares the props with
    /// themselves, so a multi-node selection is fitted.
    fn initial_pass(&mut self) -> Transition {
        self.pending_initial = false;
        debug!("applying initial selection");
        // pending is only ever set for a non-empty selection
        self.run_current(true, InputDiff::UNCHANGED, PassKind::Initial)
    }

    /// `prev_selected` is whether the previous render designated any node;
    /// it decides between a reset and an idle transition when the new
    /// selection is empty.
    fn run_current(&mut self, prev_selected: bool, diff: InputDiff, kind: PassKind) -> Transition {
        let Some(current) = self.current.as_ref() else {
            return Transition::Idle;
        };
        let viewport = self.config.viewport(current.props.viewport_width);
        run_pass(
            &mut self.registry,
            &mut *self.map,
            viewport,
            current,
            prev_selected,
            diff,
            kind,
        )
    }
}

fn run_pass(
    registry: &mut HandleRegistry,
    map: &mut dyn MapWidget,
    viewport: Viewport,
    next: &Current,
    prev_selected: bool,
    diff: InputDiff,
    kind: PassKind,
) -> Transition {
    if next.selection.is_empty() {
        if !prev_selected {
            return Transition::Idle;
        }
        let plan = VisibilityPlan::reset(&registry.mounted());
        let outcome = registry.apply(&plan);
        debug!(applied = outcome.applied, "selection cleared");
        return Transition::Reset { outcome };
    }

    let link_pass = if diff.filters_changed {
        LinkPass::Skip
    } else {
        LinkPass::Apply
    };
    let Some(resolution) = resolve_plan(
        &next.props.network,
        &next.selection,
        &registry.mounted(),
        link_pass,
    ) else {
        debug!(selection = %next.selection, "no selected marker mounted yet");
        return Transition::AwaitingHandles;
    };

    let summary = resolution.plan.summary();
    let outcome = registry.apply(&resolution.plan);

    let camera = plan_camera(&resolution.selected, &diff, viewport).and_then(|command| {
        match command.issue(map) {
            Ok(()) => Some(command),
            Err(e) => {
                match kind {
                    PassKind::Initial => error!(error = %e, "initial selection pass failed"),
                    PassKind::Update => warn!(error = %e, "camera command failed"),
                }
                None
            }
        }
    });

    debug!(
        selection = %next.selection,
        selected = resolution.selected.len(),
        highlight = summary.highlight,
        secondary = summary.secondary,
        dim = summary.dim,
        failed = outcome.failed,
        links_updated = link_pass == LinkPass::Apply,
        target = ?camera.as_ref().map(CameraCommand::target),
        "selection applied"
    );

    Transition::Applied {
        selected: resolution.selected.len(),
        summary,
        outcome,
        links_updated: link_pass == LinkPass::Apply,
        camera,
    }
}
