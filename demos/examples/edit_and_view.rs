// Copyright 2025 the GDS Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Headless editor and viewer session over a temporary documentation directory.
//!
//! This example shows how to combine:
//! - `gds_document` to build and persist a general level and one intermediate level,
//! - `gds_view` to select blocks, animate the camera, and pick by color,
//! - `gds_demos::DocumentHost` to map settled nodes back to blocks.
//!
//! Run:
//! - `RUST_LOG=debug cargo run -p gds_demos --example edit_and_view`

use std::error::Error;

use gds_demos::{DocumentHost, init_tracing};
use gds_document::{CodeAssociation, DeletePolicy, DocumentStore, LineHighlights, Session};
use gds_view::{DiagramWidget, PanDirection, PickOutcome, RunMode, TickOutcome};
use kurbo::{Point, Size};

const PARSER_SOURCE: &str = "pub fn parse(input: &str) -> Ast {\n    let tokens = lex(input);\n    build(tokens)\n}\n";

fn main() -> Result<(), Box<dyn Error>> {
    init_tracing();
    let dir = tempfile::tempdir()?;

    // Editor: write the general level and detail one of its blocks.
    let mut session = Session::open(DocumentStore::new(dir.path()))?;
    let doc = session.document_mut();
    let system = doc.add_root("Compiler")?;
    let front = doc.add_child(system, Some("Front end"))?;
    let back = doc.add_child(system, Some("Back end"))?;
    let scratch = doc.add_child(front, None)?;
    doc.get_mut(back).ok_or("back end block")?.user_index = 2;
    doc.get_mut(front).ok_or("front end block")?.user_index = 1;
    doc.get_mut(front).ok_or("front end block")?.code = Some(CodeAssociation {
        file: "src/parse.rs".into(),
        highlights: LineHighlights::capture(&[1, 2], PARSER_SOURCE),
    });
    session.select(scratch)?;
    session.remove_selected(DeletePolicy::WithChildren)?;

    session.select(front)?;
    session.descend()?;
    let doc = session.document_mut();
    let lexer_root = doc.add_root("Parser")?;
    doc.add_child(lexer_root, Some("Lexer"))?;
    doc.add_child(lexer_root, None)?;
    session.ascend()?;
    session.save()?;

    // The file moved on since the highlights were captured.
    let edited = format!("use crate::ast::Ast;\n\n{PARSER_SOURCE}");
    if let Some(highlights) = session
        .document()
        .get(front)
        .and_then(|block| block.code.as_ref())
        .and_then(|code| code.highlights.as_ref())
    {
        match highlights.resolve(&edited) {
            Ok(moved) => tracing::info!(lines = ?moved.lines(), "highlights followed the edit"),
            Err(err) => tracing::warn!(%err, "documentation might be corrupted"),
        }
    }

    // Viewer: walk the general level with animated transitions.
    let mut host = DocumentHost::new(Session::open(DocumentStore::new(dir.path()))?);
    let mut widget = DiagramWidget::new(RunMode::Animated);
    host.rebuild(&mut widget)?;
    widget.resize(Size::new(800.0, 600.0));
    if let Some(frame) = widget.paint(&mut host)? {
        tracing::info!(items = frame.items.len(), caption = ?frame.caption, "first frame");
    }
    host.session_mut().selection_settled(system)?;

    while let Some(next) = host.session_mut().walk_next() {
        let node = host.binding().node(next).ok_or("walk left the diagram")?;
        widget.select(&mut host, node)?;
        let mut ticks = 0;
        while widget.controller().is_transitioning() {
            if widget.on_wheel(120.0) {
                return Err("zoom accepted during a transition".into());
            }
            if let TickOutcome::Settled(_) = widget.tick(&mut host)? {
                tracing::info!(ticks, "transition settled");
            }
            ticks += 1;
        }
    }

    // Zoom and pan, then click the selected block's pick color.
    widget.on_wheel(-240.0);
    widget.on_key(PanDirection::Left);
    widget.paint(&mut host)?;
    if widget.on_mouse_press(Point::new(400.0, 300.0)) {
        let color = host
            .selected_node()
            .and_then(|node| widget.diagram().color(node))
            .ok_or("selected block has a color")?;
        match widget.finish_pick(&mut host, color)? {
            PickOutcome::Background => tracing::info!("clicked the background"),
            PickOutcome::Selected(outcome) => tracing::info!(?outcome, "clicked a block"),
            PickOutcome::Ignored => tracing::info!("click arrived while busy"),
        }
    }

    // Back into the editor persona: swap two blocks by clicking.
    host.arm_swap()?;
    let target = host.binding().node(front).ok_or("front end node")?;
    widget.select(&mut host, target)?;
    while widget.controller().is_transitioning() {
        widget.tick(&mut host)?;
    }
    let swapped = host.session().document().get(front).ok_or("front end block")?;
    tracing::info!(label = %swapped.label, "content after swap");
    host.session().save()?;
    Ok(())
}
