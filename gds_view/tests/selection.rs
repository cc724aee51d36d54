// Copyright 2025 the GDS Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use gds_diagram::{ColorId, Diagram, NodeId};
use gds_view::{
    DiagramHost, DiagramWidget, InteractionFlags, PanDirection, PickOutcome, RunMode,
    SelectOutcome, SelectionController, TickOutcome, ViewError, translation_of,
};
use kurbo::{Point, Size};

/// root -> [a, b, c]; leaves at 10, 20, 30, root at 20.
fn fan() -> (Diagram, NodeId, [NodeId; 3]) {
    let mut diagram = Diagram::new();
    let root = diagram.insert(None, "root").unwrap();
    let a = diagram.insert(Some(root), "a").unwrap();
    let b = diagram.insert(Some(root), "b").unwrap();
    let c = diagram.insert(Some(root), "c").unwrap();
    diagram.compute_layout().unwrap();
    (diagram, root, [a, b, c])
}

#[derive(Default)]
struct RecordingHost {
    settled: Vec<NodeId>,
    ready_calls: usize,
}

impl DiagramHost for RecordingHost {
    fn selection_settled(&mut self, _: &mut Diagram, node: NodeId) -> Option<NodeId> {
        self.settled.push(node);
        None
    }

    fn ready_to_render(&mut self) {
        self.ready_calls += 1;
    }
}

#[test]
fn animated_selection_converges_without_overshoot() {
    let (diagram, _, [a, _, c]) = fan();
    let mut controller = SelectionController::new(RunMode::Animated);
    controller.frame_view(&diagram).unwrap();
    controller.select_node(&diagram, a).unwrap();
    while controller.tick() != TickOutcome::Settled(a) {}

    let start = translation_of(&controller.view());
    let goal = translation_of(&controller.rig().centered_on(diagram.displacement(c).unwrap()));
    let epsilon = controller.transition_config().epsilon;
    assert_eq!(
        controller.select_node(&diagram, c),
        Ok(SelectOutcome::TransitionStarted)
    );

    let mut ticks = 0;
    loop {
        ticks += 1;
        let outcome = controller.tick();
        let now = translation_of(&controller.view());
        for axis in 0..3 {
            let (s, g, n) = (start[axis], goal[axis], now[axis]);
            let overshoot = if g >= s { n - g } else { g - n };
            assert!(overshoot <= epsilon, "axis {axis} overshot at tick {ticks}");
        }
        if outcome == TickOutcome::Settled(c) {
            break;
        }
        assert_eq!(outcome, TickOutcome::Moving);
        assert!(ticks < 41, "transition must settle within 41 ticks");
    }
    assert_eq!(translation_of(&controller.view()), goal, "snapped on arrival");
    assert!(!controller.is_transitioning());
}

#[test]
fn reselecting_is_a_no_op() {
    let (diagram, _, [a, _, _]) = fan();
    for mode in [RunMode::Animated, RunMode::Direct] {
        let mut controller = SelectionController::new(mode);
        controller.frame_view(&diagram).unwrap();
        controller.select_node(&diagram, a).unwrap();
        let view = controller.view();
        let flags = controller.flags();
        assert_eq!(
            controller.select_node(&diagram, a),
            Ok(SelectOutcome::Unchanged),
            "{mode:?}"
        );
        assert_eq!(controller.view(), view, "{mode:?}");
        assert_eq!(controller.flags(), flags, "{mode:?}");
    }
}

#[test]
fn new_selection_restarts_mid_flight() {
    let (diagram, _, [a, _, c]) = fan();
    let mut controller = SelectionController::new(RunMode::Animated);
    controller.frame_view(&diagram).unwrap();
    controller.select_node(&diagram, a).unwrap();
    for _ in 0..10 {
        assert_eq!(controller.tick(), TickOutcome::Moving);
    }
    controller.select_node(&diagram, c).unwrap();
    assert_eq!(controller.selected(), Some(c));

    let mut settled = None;
    for _ in 0..41 {
        if let TickOutcome::Settled(node) = controller.tick() {
            settled = Some(node);
            break;
        }
    }
    assert_eq!(settled, Some(c), "only the newest target settles");
    assert_eq!(controller.tick(), TickOutcome::Idle);
}

#[test]
fn input_is_gated_while_transitioning() {
    let (diagram, _, [a, _, _]) = fan();
    let mut controller = SelectionController::new(RunMode::Animated);
    controller.frame_view(&diagram).unwrap();
    controller.select_node(&diagram, a).unwrap();
    assert!(controller.flags().contains(InteractionFlags::TRANSITIONING));

    assert!(!controller.on_wheel(120.0));
    assert!(!controller.on_key(PanDirection::Left));
    assert!(!controller.begin_pick(Point::new(1.0, 1.0), 100.0));

    while controller.tick() != TickOutcome::Settled(a) {}
    assert!(controller.on_wheel(120.0), "input returns once settled");
}

#[test]
fn clicks_are_gated_while_picking() {
    let (diagram, _, [a, _, _]) = fan();
    let mut controller = SelectionController::new(RunMode::Direct);
    controller.frame_view(&diagram).unwrap();

    assert!(controller.begin_pick(Point::new(5.0, 40.0), 100.0));
    assert_eq!(controller.pick_point(), Some(Point::new(5.0, 60.0)));
    assert!(!controller.begin_pick(Point::new(6.0, 40.0), 100.0));
    assert!(!controller.on_key(PanDirection::Up));

    let outcome = controller.finish_pick(&diagram, diagram.color(a).unwrap());
    assert_eq!(outcome, Ok(PickOutcome::Selected(SelectOutcome::Settled(a))));
    assert!(controller.flags().is_empty());
    assert_eq!(controller.pick_point(), None);
}

#[test]
fn background_pick_keeps_selection() {
    let (diagram, root, _) = fan();
    let mut controller = SelectionController::new(RunMode::Animated);
    controller.frame_view(&diagram).unwrap();
    assert!(controller.begin_pick(Point::new(0.0, 0.0), 10.0));
    let background = diagram.picking_config().background;
    assert_eq!(
        controller.finish_pick(&diagram, background),
        Ok(PickOutcome::Background)
    );
    assert!(controller.begin_pick(Point::new(0.0, 0.0), 10.0));
    assert_eq!(
        controller.finish_pick(&diagram, ColorId(200, 200, 200)),
        Ok(PickOutcome::Background),
        "stale samples are treated as background"
    );
    assert_eq!(controller.selected(), Some(root));
    assert!(!controller.is_transitioning());
}

#[test]
fn selection_cancels_a_pending_pick() {
    let (diagram, _, [a, _, c]) = fan();
    let mut controller = SelectionController::new(RunMode::Animated);
    controller.frame_view(&diagram).unwrap();
    assert!(controller.begin_pick(Point::new(5.0, 5.0), 10.0));

    controller.select_node(&diagram, a).unwrap();
    assert!(!controller.flags().contains(InteractionFlags::PICKING), "pick cancelled");
    assert_eq!(controller.pick_point(), None);
    assert_eq!(controller.tick(), TickOutcome::Moving);

    assert_eq!(
        controller.finish_pick(&diagram, diagram.color(c).unwrap()),
        Ok(PickOutcome::Ignored),
        "late pick result cannot redirect the transition"
    );
    assert_eq!(controller.selected(), Some(a));
    while controller.tick() != TickOutcome::Settled(a) {}
}

#[test]
fn unsolicited_pick_is_ignored_while_transitioning() {
    let (diagram, _, [a, b, _]) = fan();
    let mut controller = SelectionController::new(RunMode::Animated);
    controller.frame_view(&diagram).unwrap();
    controller.select_node(&diagram, a).unwrap();
    controller.tick();

    assert_eq!(
        controller.finish_pick(&diagram, diagram.color(b).unwrap()),
        Ok(PickOutcome::Ignored)
    );
    assert_eq!(controller.selected(), Some(a));
    assert!(controller.is_transitioning(), "the transition keeps the view");
}

#[test]
fn selection_needs_a_laid_out_diagram() {
    let mut diagram = Diagram::new();
    let root = diagram.insert(None, "root").unwrap();
    let mut controller = SelectionController::default();
    assert_eq!(
        controller.select_node(&diagram, root),
        Err(ViewError::NotLaidOut)
    );
    diagram.clear();
    assert_eq!(
        controller.select_node(&diagram, root),
        Err(ViewError::EmptyDiagram)
    );
}

#[test]
fn widget_reports_settled_selection_in_both_modes() {
    for mode in [RunMode::Animated, RunMode::Direct] {
        let mut host = RecordingHost::default();
        let mut widget = DiagramWidget::new(mode);
        let (diagram, _, [_, b, _]) = fan();
        *widget.diagram_mut() = diagram;
        widget.paint(&mut host).unwrap();

        widget.select(&mut host, b).unwrap();
        while widget.tick(&mut host).unwrap() != TickOutcome::Idle {}
        assert_eq!(host.settled, [b], "{mode:?}");
    }
}

#[test]
fn widget_frame_describes_the_scene() {
    let mut host = RecordingHost::default();
    let mut widget = DiagramWidget::new(RunMode::Direct);
    assert_eq!(widget.paint(&mut host), Ok(None), "nothing laid out yet");

    let (diagram, root, leaves) = fan();
    *widget.diagram_mut() = diagram;
    widget.resize(Size::new(800.0, 600.0));
    let frame = widget.paint(&mut host).unwrap().unwrap();

    assert_eq!(frame.items.len(), 4);
    assert_eq!(frame.lines.len(), 3);
    assert_eq!(frame.caption.as_deref(), Some("Current Block: root"));
    let selected: Vec<NodeId> = frame.items.iter().filter(|i| i.selected).map(|i| i.node).collect();
    assert_eq!(selected, [root]);
    assert_eq!(frame.items.last().map(|i| i.node), Some(root), "post-order draw");
    for leaf in leaves {
        assert!(frame.items.iter().any(|i| i.node == leaf));
    }

    widget.clear();
    assert_eq!(widget.paint(&mut host), Ok(None), "cleared widgets draw only background");
    assert_eq!(widget.selected(), None);
}

#[test]
fn deferred_render_runs_after_first_paint() {
    let mut host = RecordingHost::default();
    let mut widget = DiagramWidget::new(RunMode::Animated);
    assert!(!widget.request_render());
    assert_eq!(host.ready_calls, 0);

    widget.paint(&mut host).unwrap();
    assert_eq!(host.ready_calls, 1);
    assert!(widget.request_render(), "ready after first paint");
    widget.paint(&mut host).unwrap();
    assert_eq!(host.ready_calls, 1, "deferred render runs once");
}

#[test]
fn mouse_press_needs_a_surface() {
    let mut widget = DiagramWidget::new(RunMode::Direct);
    assert!(!widget.on_mouse_press(Point::new(1.0, 1.0)));
    widget.resize(Size::new(100.0, 50.0));
    assert!(widget.on_mouse_press(Point::new(1.0, 1.0)));
    assert_eq!(widget.controller().pick_point(), Some(Point::new(1.0, 49.0)));
}

/// A host that rebuilds the diagram when a selection settles.
struct SwappingHost;

impl DiagramHost for SwappingHost {
    fn selection_settled(&mut self, diagram: &mut Diagram, node: NodeId) -> Option<NodeId> {
        let label = diagram.label(node)?.to_owned();
        diagram.clear();
        let root = diagram.insert(None, "root").unwrap();
        diagram.insert(Some(root), "x").unwrap();
        let moved = diagram.insert(Some(root), label).unwrap();
        diagram.compute_layout().unwrap();
        Some(moved)
    }
}

#[test]
fn host_can_replace_the_selection() {
    let mut widget = DiagramWidget::new(RunMode::Direct);
    let (diagram, _, [a, _, _]) = fan();
    *widget.diagram_mut() = diagram;
    widget.paint(&mut SwappingHost).unwrap();

    widget.select(&mut SwappingHost, a).unwrap();
    let selected = widget.selected().unwrap();
    assert_ne!(selected, a, "old handles are stale after the rebuild");
    assert_eq!(widget.diagram().label(selected), Some("a"));
    assert_eq!(widget.diagram().displacement(selected).unwrap().x, 20);
}

/// A host that rebuilds the diagram on settle but names no replacement.
struct RebuildingHost;

impl DiagramHost for RebuildingHost {
    fn selection_settled(&mut self, diagram: &mut Diagram, _: NodeId) -> Option<NodeId> {
        diagram.clear();
        let root = diagram.insert(None, "fresh").unwrap();
        diagram.insert(Some(root), "leaf").unwrap();
        diagram.compute_layout().unwrap();
        None
    }
}

#[test]
fn rebuild_without_replacement_recenters_on_root() {
    let mut widget = DiagramWidget::new(RunMode::Direct);
    let (diagram, _, [a, _, _]) = fan();
    *widget.diagram_mut() = diagram;
    widget.paint(&mut RebuildingHost).unwrap();

    widget.select(&mut RebuildingHost, a).unwrap();
    assert_eq!(widget.selected(), None, "dead selection dropped");

    let frame = widget.paint(&mut RebuildingHost).unwrap().unwrap();
    let root = widget.diagram().root().unwrap();
    assert_eq!(widget.selected(), Some(root));
    assert_eq!(frame.caption.as_deref(), Some("Current Block: fresh"));
    assert!(frame.items.iter().any(|i| i.selected && i.node == root), "root drawn selected");
}

#[test]
fn rebuild_during_transition_never_settles_on_dead_node() {
    let mut host = RecordingHost::default();
    let mut widget = DiagramWidget::new(RunMode::Animated);
    let (diagram, _, [a, _, _]) = fan();
    *widget.diagram_mut() = diagram;
    widget.paint(&mut host).unwrap();
    widget.select(&mut host, a).unwrap();
    assert_eq!(widget.tick(&mut host), Ok(TickOutcome::Moving));

    let rebuilt = widget.diagram_mut();
    rebuilt.clear();
    let root = rebuilt.insert(None, "root").unwrap();
    rebuilt.insert(Some(root), "only").unwrap();
    rebuilt.compute_layout().unwrap();

    assert_eq!(widget.tick(&mut host), Ok(TickOutcome::Idle), "transition dropped");
    assert!(host.settled.is_empty(), "nothing reported");
    assert!(!widget.controller().is_transitioning());
    widget.paint(&mut host).unwrap();
    assert_eq!(widget.selected(), Some(root));
}
