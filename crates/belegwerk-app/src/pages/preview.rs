// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Preview page — drag the outline corners onto the receipt.
//
// The editor draws into a `DrawList`, which is turned into SVG here. Pointer
// events (mouse and touch alike) are forwarded to the editor, and every
// edited outline goes straight to the workflow controller.

use belegwerk_core::geometry::DisplayPoint;
use belegwerk_editor::{
    ContourEditor, DrawCommand, DrawList, PointerEvent as EditorPointer, PointerPhase,
};
use belegwerk_workflow::WorkflowController;
use dioxus::prelude::*;

use crate::services::app_services::AppServices;

/// Width assumed until the container reports its real size.
const INITIAL_WIDTH: f64 = 688.0;

#[component]
pub fn Preview() -> Element {
    let svc = use_context::<AppServices>();
    let mut workflow = use_context::<Signal<WorkflowController>>();
    let pick_radius = svc.config().pick_radius;

    let mut editor = use_signal(move || {
        let ctrl = workflow.peek();
        let state = ctrl.state();
        let image = state
            .captured_image()
            .ok_or_else(|| "No photo has been captured.".to_string())?;
        ContourEditor::for_image(image, INITIAL_WIDTH, state.chosen_contour().copied())
            .map(|e| e.with_pick_radius(pick_radius))
            .map_err(|e| belegwerk_core::human_errors::humanize_error(&e).message)
    });

    let image_src = workflow
        .read()
        .state()
        .captured_image()
        .map(|p| p.as_str().to_string())
        .unwrap_or_default();

    let drawing = match &*editor.read() {
        Ok(ed) => {
            let mut list = DrawList::new();
            if let Some(image) = workflow.read().state().captured_image() {
                ed.render(&mut list, image);
            }
            Ok(list)
        }
        Err(message) => Err(message.clone()),
    };

    rsx! {
        div { style: "background: white; border-radius: 12px; box-shadow: 0 1px 4px rgba(0,0,0,0.1); overflow: hidden;",
            div { style: "padding: 16px; background: #eef2ff; border-bottom: 1px solid #e0e7ff;",
                h2 { style: "margin: 0;", "Adjust the outline" }
                p { style: "margin: 4px 0 0; color: #4b5563;",
                    "Drag the green corners onto the corners of the receipt."
                }
            }

            div {
                style: "background: black; padding: 16px;",
                onresize: move |evt| {
                    if let Ok(size) = evt.data().get_content_box_size()
                        && size.width > 0.0
                        && let Ok(ed) = &mut *editor.write()
                    {
                        ed.set_container_width(size.width);
                    }
                },
                match drawing {
                    Ok(list) => rsx! {
                        svg {
                            width: "{list.width()}",
                            height: "{list.height()}",
                            style: "display: block; margin: 0 auto; touch-action: none; cursor: move; user-select: none;",
                            onpointerdown: move |evt| dispatch(editor, workflow, PointerPhase::Down, &evt),
                            onpointermove: move |evt| dispatch(editor, workflow, PointerPhase::Move, &evt),
                            onpointerup: move |evt| dispatch(editor, workflow, PointerPhase::Up, &evt),
                            onpointerleave: move |evt| dispatch(editor, workflow, PointerPhase::Leave, &evt),
                            onpointercancel: move |evt| dispatch(editor, workflow, PointerPhase::Cancel, &evt),
                            for (i, command) in list.commands().iter().enumerate() {
                                {draw(i, command, &image_src)}
                            }
                        }
                    },
                    Err(message) => rsx! {
                        p { style: "color: #fca5a5; text-align: center;", "{message}" }
                    },
                }
            }

            div { style: "padding: 16px; display: flex; flex-direction: column; gap: 8px;",
                button {
                    style: "width: 100%; padding: 16px; border-radius: 12px; border: none; background: #4f46e5; color: white; font-size: 18px;",
                    disabled: editor.read().is_err(),
                    onclick: move |_| {
                        if let Err(e) = workflow.write().confirm_contour() {
                            tracing::debug!(error = %e, "confirm rejected");
                        }
                    },
                    "Next"
                }
                button {
                    style: "width: 100%; padding: 12px; border-radius: 12px; border: 1px solid #d1d5db; background: #f3f4f6;",
                    onclick: move |_| {
                        if let Err(e) = workflow.write().cancel() {
                            tracing::debug!(error = %e, "cancel rejected");
                        }
                    },
                    "Cancel"
                }
            }
        }
    }
}

/// Feed one pointer sample to the editor and forward any edited outline.
fn dispatch(
    mut editor: Signal<Result<ContourEditor, String>>,
    mut workflow: Signal<WorkflowController>,
    phase: PointerPhase,
    evt: &PointerData,
) {
    let at = evt.element_coordinates();
    let event = EditorPointer {
        phase,
        position: DisplayPoint::new(at.x, at.y),
        pointer_id: evt.pointer_id(),
        is_primary: evt.is_primary(),
    };
    let edited = match &mut *editor.write() {
        Ok(ed) => ed.handle_pointer(event),
        Err(_) => None,
    };
    if let Some(contour) = edited
        && let Err(e) = workflow.write().update_contour(contour)
    {
        tracing::warn!(error = %e, "outline edit rejected");
    }
}

/// One recorded drawing command as an SVG element.
fn draw(key: usize, command: &DrawCommand, image_src: &str) -> Element {
    match command {
        DrawCommand::Image { width, height } => rsx! {
            image {
                key: "{key}",
                href: "{image_src}",
                width: "{width}",
                height: "{height}",
                preserve_aspect_ratio: "none",
            }
        },
        DrawCommand::Polygon {
            points,
            color,
            line_width,
        } => {
            let points = points
                .iter()
                .map(|p| format!("{},{}", p.x, p.y))
                .collect::<Vec<_>>()
                .join(" ");
            rsx! {
                polygon {
                    key: "{key}",
                    points: "{points}",
                    fill: "none",
                    stroke: "{color.to_css()}",
                    stroke_width: "{line_width}",
                    stroke_linejoin: "round",
                }
            }
        }
        DrawCommand::Circle {
            center,
            radius,
            color,
        } => rsx! {
            circle {
                key: "{key}",
                cx: "{center.x}",
                cy: "{center.y}",
                r: "{radius}",
                fill: "{color.to_css()}",
            }
        },
        DrawCommand::Text { text, at, color } => rsx! {
            text {
                key: "{key}",
                x: "{at.x}",
                y: "{at.y}",
                fill: "{color.to_css()}",
                font_size: "12",
                font_weight: "bold",
                text_anchor: "middle",
                dominant_baseline: "central",
                "{text}"
            }
        },
    }
}
