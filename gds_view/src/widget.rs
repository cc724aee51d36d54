// Copyright 2025 the GDS Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The diagram widget: a [`Diagram`] plus its [`SelectionController`], wired
//! to a host window through [`DiagramHost`].

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

use glam::Mat4;
use kurbo::{Line, Point, Size};

use gds_diagram::{ColorId, Diagram, Displacement, LayoutSummary, NodeId};

use crate::camera::model_matrix;
use crate::controller::{PickOutcome, RunMode, SelectOutcome, SelectionController};
use crate::error::ViewError;
use crate::input::PanDirection;
use crate::transition::TickOutcome;

/// The window that owns a [`DiagramWidget`].
///
/// Editor and viewer windows implement this the same way; the widget never
/// needs to know which one it talks to.
pub trait DiagramHost {
    /// The selection settled on `node`: a transition finished, a direct
    /// selection was made, or a click picked it.
    ///
    /// The host may rebuild `diagram` here (for example after swapping two
    /// blocks' content). If it does, it returns the node that should be
    /// selected in the rebuilt diagram, and the widget adopts it without
    /// reporting it again.
    fn selection_settled(&mut self, diagram: &mut Diagram, node: NodeId) -> Option<NodeId>;

    /// The widget finished its first paint and a render requested earlier
    /// through [`DiagramWidget::request_render`] can go ahead.
    fn ready_to_render(&mut self) {}
}

/// One node as the renderer should draw it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DrawItem {
    /// The node.
    pub node: NodeId,
    /// Its layout displacement.
    pub displacement: Displacement,
    /// Model matrix placing its block.
    pub model: Mat4,
    /// Color to draw it with in the picking pass.
    pub color: ColorId,
    /// Whether it gets the selected treatment.
    pub selected: bool,
}

/// Everything a renderer needs to draw (or pick) one frame.
#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    /// View matrix.
    pub view: Mat4,
    /// Projection matrix for the current surface size.
    pub projection: Mat4,
    /// Nodes in draw order.
    pub items: Vec<DrawItem>,
    /// Parent/child connection segments, in displacement space.
    pub lines: Vec<Line>,
    /// Overlay text naming the selected block.
    pub caption: Option<String>,
}

/// A diagram view bound to a host window.
#[derive(Debug)]
pub struct DiagramWidget {
    diagram: Diagram,
    controller: SelectionController,
    surface: Option<Size>,
    /// Set after the first paint.
    ready: bool,
    render_requested: bool,
}

impl DiagramWidget {
    /// Create an empty widget.
    pub fn new(mode: RunMode) -> Self {
        Self::with_controller(SelectionController::new(mode))
    }

    /// Create an empty widget around a configured controller.
    pub fn with_controller(controller: SelectionController) -> Self {
        Self {
            diagram: Diagram::new(),
            controller,
            surface: None,
            ready: false,
            render_requested: false,
        }
    }

    /// The diagram.
    pub fn diagram(&self) -> &Diagram {
        &self.diagram
    }

    /// The diagram, for building. Call [`DiagramWidget::compute_layout`] when done.
    ///
    /// If the selected node does not survive the edit, the next tick or paint
    /// drops the selection and centers on the root.
    pub fn diagram_mut(&mut self) -> &mut Diagram {
        &mut self.diagram
    }

    /// The selection controller.
    pub fn controller(&self) -> &SelectionController {
        &self.controller
    }

    /// The selected node.
    pub fn selected(&self) -> Option<NodeId> {
        self.controller.selected()
    }

    /// Drop all nodes and the selection; nothing but the background is drawn
    /// until a new tree is laid out.
    pub fn clear(&mut self) {
        self.diagram.clear();
        self.controller.reset();
    }

    /// Lay out the diagram.
    pub fn compute_layout(&mut self) -> Result<LayoutSummary, ViewError> {
        Ok(self.diagram.compute_layout()?)
    }

    /// Record the surface size in pixels.
    pub fn resize(&mut self, size: Size) {
        self.surface = Some(size);
    }

    /// Returns true once the widget has painted at least once.
    pub fn is_ready(&self) -> bool {
        self.ready
    }

    /// Ask to render data. Returns `true` if the widget is ready now;
    /// otherwise the host's [`DiagramHost::ready_to_render`] is called after
    /// the first paint.
    pub fn request_render(&mut self) -> bool {
        if self.ready {
            return true;
        }
        tracing::debug!("widget not ready, render deferred");
        self.render_requested = true;
        false
    }

    /// Select a node, reporting it to `host` if the selection settles right away.
    pub fn select<H: DiagramHost + ?Sized>(
        &mut self,
        host: &mut H,
        node: NodeId,
    ) -> Result<SelectOutcome, ViewError> {
        let outcome = self.controller.select_node(&self.diagram, node)?;
        if let SelectOutcome::Settled(settled) = outcome {
            self.settle(host, settled)?;
        }
        Ok(outcome)
    }

    /// Advance a running transition. Hosts call this every
    /// [`TransitionConfig::tick_interval`](crate::TransitionConfig::tick_interval)
    /// while [`SelectionController::is_transitioning`] is true.
    pub fn tick<H: DiagramHost + ?Sized>(&mut self, host: &mut H) -> Result<TickOutcome, ViewError> {
        self.controller.drop_stale(&self.diagram);
        let outcome = self.controller.tick();
        if let TickOutcome::Settled(node) = outcome {
            self.settle(host, node)?;
        }
        Ok(outcome)
    }

    /// Mouse wheel input. Returns `false` if ignored.
    pub fn on_wheel(&mut self, delta: f64) -> bool {
        self.controller.on_wheel(delta)
    }

    /// Arrow key input. Returns `false` if ignored.
    pub fn on_key(&mut self, direction: PanDirection) -> bool {
        self.controller.on_key(direction)
    }

    /// Left button press at a top-left-origin window position.
    ///
    /// Returns `false` if ignored. Otherwise the host draws the picking pass
    /// and calls [`DiagramWidget::finish_pick`] with the sampled color.
    pub fn on_mouse_press(&mut self, position: Point) -> bool {
        let Some(size) = self.surface else {
            return false;
        };
        self.controller.begin_pick(position, size.height)
    }

    /// Complete a pick started by [`DiagramWidget::on_mouse_press`].
    pub fn finish_pick<H: DiagramHost + ?Sized>(
        &mut self,
        host: &mut H,
        sampled: ColorId,
    ) -> Result<PickOutcome, ViewError> {
        let outcome = self.controller.finish_pick(&self.diagram, sampled)?;
        if let PickOutcome::Selected(SelectOutcome::Settled(node)) = outcome {
            self.settle(host, node)?;
        }
        Ok(outcome)
    }

    /// Build the frame to draw.
    ///
    /// Returns `Ok(None)` while there is no laid-out data: only the
    /// background is drawn. The first call marks the widget ready and runs any
    /// deferred render on `host`.
    pub fn paint<H: DiagramHost + ?Sized>(
        &mut self,
        host: &mut H,
    ) -> Result<Option<Frame>, ViewError> {
        let frame = if self.diagram.is_laid_out() && !self.diagram.is_empty() {
            Some(self.build_frame()?)
        } else {
            None
        };
        if !self.ready {
            self.ready = true;
            tracing::debug!("widget ready to paint data");
            if core::mem::take(&mut self.render_requested) {
                host.ready_to_render();
            }
        }
        Ok(frame)
    }

    fn build_frame(&mut self) -> Result<Frame, ViewError> {
        let view = self.controller.frame_view(&self.diagram)?;
        let selected = self.controller.selected();
        let aspect = self.surface.map_or(1.0, aspect_ratio);
        let items = self
            .diagram
            .registry()
            .iter()
            .filter_map(|&node| {
                let displacement = self.diagram.displacement(node)?;
                Some(DrawItem {
                    node,
                    displacement,
                    model: model_matrix(displacement),
                    color: self.diagram.color(node)?,
                    selected: selected == Some(node),
                })
            })
            .collect();
        let caption = selected
            .and_then(|node| self.diagram.label(node))
            .map(|label| format!("Current Block: {label}"));
        Ok(Frame {
            view,
            projection: self.controller.rig().projection(aspect),
            items,
            lines: self.diagram.connection_lines().collect(),
            caption,
        })
    }

    fn settle<H: DiagramHost + ?Sized>(&mut self, host: &mut H, node: NodeId) -> Result<(), ViewError> {
        match host.selection_settled(&mut self.diagram, node) {
            Some(replacement) => {
                tracing::debug!(?node, ?replacement, "host replaced the selection");
                self.controller.replace_selection(&self.diagram, replacement)?;
            }
            None => {
                self.controller.drop_stale(&self.diagram);
            }
        }
        Ok(())
    }
}

#[allow(
    clippy::cast_possible_truncation,
    reason = "surface sizes fit comfortably in f32."
)]
fn aspect_ratio(size: Size) -> f32 {
    if size.height > 0.0 {
        (size.width / size.height) as f32
    } else {
        1.0
    }
}
