// Copyright 2025 the GDS Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use gds_diagram::{ColorId, Diagram, LayoutConfig, PickingConfig};

#[test]
fn first_node_gets_black_and_colors_count_up() {
    let mut diagram = Diagram::new();
    let root = diagram.insert(None, "root").unwrap();
    let a = diagram.insert(Some(root), "a").unwrap();
    assert_eq!(diagram.color(root), Some(ColorId(0, 0, 0)));
    assert_eq!(diagram.color(a), Some(ColorId(1, 0, 0)));
}

#[test]
fn background_is_never_issued() {
    // Put the background where the third node's color would land.
    let config = PickingConfig {
        background: ColorId(2, 0, 0),
    };
    let mut diagram = Diagram::with_config(LayoutConfig::default(), config);
    let root = diagram.insert(None, "root").unwrap();
    diagram.insert(Some(root), "a").unwrap();
    let b = diagram.insert(Some(root), "b").unwrap();
    assert_eq!(diagram.color(b), Some(ColorId(3, 0, 0)));
    assert_eq!(diagram.resolve_color(ColorId(2, 0, 0)), None);
}

#[test]
fn unknown_color_resolves_to_nothing() {
    let mut diagram = Diagram::new();
    diagram.insert(None, "root").unwrap();
    diagram.compute_layout().unwrap();
    assert_eq!(diagram.resolve_color(ColorId(9, 9, 9)), None);
}

#[test]
fn colors_survive_relayout() {
    let mut diagram = Diagram::new();
    let root = diagram.insert(None, "root").unwrap();
    let a = diagram.insert(Some(root), "a").unwrap();
    diagram.compute_layout().unwrap();
    let before = (diagram.color(root), diagram.color(a));
    diagram.insert(Some(root), "b").unwrap();
    diagram.compute_layout().unwrap();
    assert_eq!((diagram.color(root), diagram.color(a)), before);
}

#[test]
fn clear_restarts_the_color_sequence() {
    let mut diagram = Diagram::new();
    let root = diagram.insert(None, "root").unwrap();
    for label in ["a", "b", "c"] {
        diagram.insert(Some(root), label).unwrap();
    }
    let first: Vec<ColorId> = diagram.pick_table().map(|(_, c)| c).collect();

    diagram.clear();
    let root = diagram.insert(None, "root").unwrap();
    for label in ["a", "b", "c"] {
        diagram.insert(Some(root), label).unwrap();
    }
    let second: Vec<ColorId> = diagram.pick_table().map(|(_, c)| c).collect();
    assert_eq!(first, second, "allocator restarts from its initial counter");
}

#[test]
fn stale_pick_after_removal_misses() {
    let mut diagram = Diagram::new();
    let root = diagram.insert(None, "root").unwrap();
    let a = diagram.insert(Some(root), "a").unwrap();
    let stale = diagram.color(a).unwrap();
    diagram.remove(a).unwrap();
    assert_eq!(diagram.resolve_color(stale), None);
}
