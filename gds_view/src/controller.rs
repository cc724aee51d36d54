// Copyright 2025 the GDS Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Selection state and the authority over the view matrix.

use glam::{Mat4, Vec3};
use kurbo::{Point, Vec2};

use gds_diagram::{ColorId, Diagram, NodeId};

use crate::camera::{CameraRig, translation_of, with_translation};
use crate::error::ViewError;
use crate::input::{InputConfig, InteractionFlags, PanDirection, pick_point};
use crate::transition::{CameraTransition, TickOutcome, TransitionConfig};

/// How a selection change reaches the view.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum RunMode {
    /// Glide to the node over a timed transition (viewer).
    #[default]
    Animated,
    /// Jump to the node immediately (editor).
    Direct,
}

/// Result of [`SelectionController::select_node`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SelectOutcome {
    /// The node was already selected; nothing changed.
    Unchanged,
    /// A transition toward the node started (or restarted mid-flight).
    TransitionStarted,
    /// The view jumped to the node and the selection settled.
    Settled(NodeId),
}

/// Result of [`SelectionController::finish_pick`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PickOutcome {
    /// The click landed on the background, or on nothing the diagram knows.
    Background,
    /// The click landed on a node and it was selected.
    Selected(SelectOutcome),
    /// No pick was pending, or a transition owns the view; nothing changed.
    Ignored,
}

/// Owns the selected node and the view matrix.
///
/// The controller is `Idle` or `Transitioning`. While a transition runs it is
/// the only writer of the view: wheel, arrow-key, and click input are rejected
/// until [`SelectionController::tick`] reports [`TickOutcome::Settled`].
#[derive(Clone, Debug)]
pub struct SelectionController {
    mode: RunMode,
    rig: CameraRig,
    transition_config: TransitionConfig,
    input_config: InputConfig,
    flags: InteractionFlags,
    selected: Option<NodeId>,
    /// The view as the user left it; every frame starts from here.
    user_view: Mat4,
    transition: Option<CameraTransition>,
    pending_zoom: Option<f64>,
    pending_pan: Option<Vec2>,
    pick_point: Option<Point>,
    needs_initial_view: bool,
}

impl Default for SelectionController {
    fn default() -> Self {
        Self::new(RunMode::default())
    }
}

impl SelectionController {
    /// Create a controller with the default rig, timing, and input scaling.
    pub fn new(mode: RunMode) -> Self {
        Self::with_config(
            mode,
            CameraRig::default(),
            TransitionConfig::default(),
            InputConfig::default(),
        )
    }

    /// Create a controller with explicit configuration.
    pub fn with_config(
        mode: RunMode,
        rig: CameraRig,
        transition_config: TransitionConfig,
        input_config: InputConfig,
    ) -> Self {
        Self {
            mode,
            rig,
            transition_config,
            input_config,
            flags: InteractionFlags::empty(),
            selected: None,
            user_view: rig.base_view(),
            transition: None,
            pending_zoom: None,
            pending_pan: None,
            pick_point: None,
            needs_initial_view: true,
        }
    }

    /// The run mode.
    pub fn mode(&self) -> RunMode {
        self.mode
    }

    /// The camera rig.
    pub fn rig(&self) -> &CameraRig {
        &self.rig
    }

    /// Transition timing; hosts schedule ticks every `tick_interval`.
    pub fn transition_config(&self) -> &TransitionConfig {
        &self.transition_config
    }

    /// The selected node, if any.
    pub fn selected(&self) -> Option<NodeId> {
        self.selected
    }

    /// The current view matrix, without pending user input applied.
    pub fn view(&self) -> Mat4 {
        self.user_view
    }

    /// What the controller is busy with.
    pub fn flags(&self) -> InteractionFlags {
        self.flags
    }

    /// Returns true while a transition owns the view.
    pub fn is_transitioning(&self) -> bool {
        self.flags.contains(InteractionFlags::TRANSITIONING)
    }

    /// Where the pending pick should sample, in bottom-left-origin pixels.
    pub fn pick_point(&self) -> Option<Point> {
        self.pick_point
    }

    /// Forget the selection and the view, as after the diagram is cleared.
    ///
    /// The next [`SelectionController::frame_view`] centers on the root again.
    pub fn reset(&mut self) {
        self.flags = InteractionFlags::empty();
        self.selected = None;
        self.user_view = self.rig.base_view();
        self.transition = None;
        self.pending_zoom = None;
        self.pending_pan = None;
        self.pick_point = None;
        self.needs_initial_view = true;
    }

    /// Select `node` and bring it to the center of the view.
    ///
    /// Selecting the node that is already selected does nothing. In
    /// [`RunMode::Animated`] a transition starts from the current view; if one
    /// is already running it is restarted toward the new node with a fresh
    /// stride. In [`RunMode::Direct`] the view jumps and the selection settles
    /// immediately.
    ///
    /// A pick in progress is cancelled.
    pub fn select_node(
        &mut self,
        diagram: &Diagram,
        node: NodeId,
    ) -> Result<SelectOutcome, ViewError> {
        if self.selected == Some(node) {
            return Ok(SelectOutcome::Unchanged);
        }
        let destination = self.destination_for(diagram, node)?;
        if self.flags.contains(InteractionFlags::PICKING) {
            tracing::debug!(?node, "pending pick cancelled by selection");
            self.flags.remove(InteractionFlags::PICKING);
            self.pick_point = None;
        }
        self.selected = Some(node);
        match self.mode {
            RunMode::Animated => {
                let from = translation_of(&self.user_view);
                let next = CameraTransition::new(node, from, destination);
                match self.transition.replace(next) {
                    Some(previous) => tracing::debug!(
                        from = ?previous.target(),
                        to = ?node,
                        "transition restarted"
                    ),
                    None => tracing::debug!(?node, "transition started"),
                }
                self.flags.insert(InteractionFlags::TRANSITIONING);
                Ok(SelectOutcome::TransitionStarted)
            }
            RunMode::Direct => {
                self.jump_to(node, destination);
                Ok(SelectOutcome::Settled(node))
            }
        }
    }

    /// Select `node` in a rebuilt diagram without animating or reporting it.
    ///
    /// Used when the host rebuilt the diagram while handling a settled
    /// selection and names the node that should be selected now.
    pub fn replace_selection(&mut self, diagram: &Diagram, node: NodeId) -> Result<(), ViewError> {
        let destination = self.destination_for(diagram, node)?;
        self.jump_to(node, destination);
        Ok(())
    }

    /// Forget a selection or transition whose node is no longer in `diagram`.
    ///
    /// Returns `true` if the controller was reset; the next
    /// [`SelectionController::frame_view`] centers on the root again.
    pub fn drop_stale(&mut self, diagram: &Diagram) -> bool {
        let dead = |node: Option<NodeId>| node.is_some_and(|n| !diagram.is_alive(n));
        let target = self.transition.as_ref().map(CameraTransition::target);
        if !dead(self.selected) && !dead(target) {
            return false;
        }
        tracing::debug!(selected = ?self.selected, ?target, "selection left the diagram, view reset");
        self.reset();
        true
    }

    /// Advance the running transition by one step.
    pub fn tick(&mut self) -> TickOutcome {
        let Some(transition) = self.transition.as_mut() else {
            return TickOutcome::Idle;
        };
        if transition.advance(&self.transition_config) {
            let node = transition.target();
            self.user_view = transition.destination();
            self.transition = None;
            self.flags.remove(InteractionFlags::TRANSITIONING);
            tracing::debug!(?node, "transition settled");
            TickOutcome::Settled(node)
        } else {
            self.user_view = with_translation(self.user_view, transition.current());
            TickOutcome::Moving
        }
    }

    /// Queue a zoom from a wheel delta. Returns `false` if input is gated.
    pub fn on_wheel(&mut self, delta: f64) -> bool {
        if !self.accepts_input("wheel") {
            return false;
        }
        *self.pending_zoom.get_or_insert(0.0) += self.input_config.zoom_for_wheel(delta);
        true
    }

    /// Queue a pan from an arrow key. Returns `false` if input is gated.
    pub fn on_key(&mut self, direction: PanDirection) -> bool {
        if !self.accepts_input("key") {
            return false;
        }
        *self.pending_pan.get_or_insert(Vec2::ZERO) += direction.offset(self.input_config.pan_step);
        true
    }

    /// Start a pick at a top-left-origin window position.
    ///
    /// Returns `false` if input is gated. Otherwise the host renders the
    /// picking pass, samples the pixel at [`SelectionController::pick_point`],
    /// and hands it to [`SelectionController::finish_pick`].
    pub fn begin_pick(&mut self, position: Point, surface_height: f64) -> bool {
        if !self.accepts_input("click") {
            return false;
        }
        self.pick_point = Some(pick_point(position, surface_height));
        self.flags.insert(InteractionFlags::PICKING);
        true
    }

    /// Complete a pick with the sampled pixel color.
    ///
    /// Returns [`PickOutcome::Ignored`] unless a pick started by
    /// [`SelectionController::begin_pick`] is still pending and no transition
    /// is running.
    pub fn finish_pick(
        &mut self,
        diagram: &Diagram,
        sampled: ColorId,
    ) -> Result<PickOutcome, ViewError> {
        let pending = self.flags.contains(InteractionFlags::PICKING);
        self.flags.remove(InteractionFlags::PICKING);
        self.pick_point = None;
        if !pending || self.is_transitioning() {
            tracing::debug!(pending, flags = ?self.flags, "pick result ignored");
            return Ok(PickOutcome::Ignored);
        }
        match diagram.resolve_color(sampled) {
            None => Ok(PickOutcome::Background),
            Some(node) => Ok(PickOutcome::Selected(self.select_node(diagram, node)?)),
        }
    }

    /// The view to draw this frame with.
    ///
    /// On the first frame after a reset, or after the selected node left the
    /// diagram, the view centers on the root, which becomes the selection. Later frames apply queued zoom, then queued pan,
    /// to the view the user left, each exactly once.
    pub fn frame_view(&mut self, diagram: &Diagram) -> Result<Mat4, ViewError> {
        let root = diagram.root().ok_or(ViewError::EmptyDiagram)?;
        self.drop_stale(diagram);
        if self.needs_initial_view {
            self.user_view = self.destination_for(diagram, root)?;
            self.selected = Some(root);
            self.needs_initial_view = false;
            return Ok(self.user_view);
        }
        if let Some(zoom) = self.pending_zoom.take() {
            self.user_view *= Mat4::from_translation(Vec3::new(0.0, 0.0, -to_f32(zoom)));
        }
        if let Some(pan) = self.pending_pan.take() {
            self.user_view *= Mat4::from_translation(Vec3::new(to_f32(pan.x), to_f32(pan.y), 0.0));
        }
        Ok(self.user_view)
    }

    fn destination_for(&self, diagram: &Diagram, node: NodeId) -> Result<Mat4, ViewError> {
        if diagram.is_empty() {
            return Err(ViewError::EmptyDiagram);
        }
        if !diagram.is_laid_out() {
            return Err(ViewError::NotLaidOut);
        }
        let displacement = diagram
            .displacement(node)
            .ok_or(ViewError::StaleNode(node))?;
        Ok(self.rig.centered_on(displacement))
    }

    fn jump_to(&mut self, node: NodeId, destination: Mat4) {
        self.transition = None;
        self.flags.remove(InteractionFlags::TRANSITIONING);
        self.selected = Some(node);
        self.user_view = destination;
    }

    fn accepts_input(&self, input: &'static str) -> bool {
        if self.flags.is_empty() {
            return true;
        }
        tracing::trace!(input, flags = ?self.flags, "input ignored while busy");
        false
    }
}

#[allow(
    clippy::cast_possible_truncation,
    reason = "view offsets are small and the view matrix is single precision."
)]
fn to_f32(value: f64) -> f32 {
    value as f32
}
