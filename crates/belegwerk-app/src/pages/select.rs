// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Select page — several receipts were detected; pick one.

use belegwerk_workflow::WorkflowController;
use dioxus::prelude::*;

#[component]
pub fn Select() -> Element {
    let mut workflow = use_context::<Signal<WorkflowController>>();
    let mut selected = use_signal(|| 0usize);

    let (preview, areas) = {
        let ctrl = workflow.read();
        let state = ctrl.state();
        (
            state.preview_image().map(|p| p.as_str().to_string()),
            state
                .candidates()
                .iter()
                .map(|c| c.area().round() as u64)
                .collect::<Vec<_>>(),
        )
    };
    let count = areas.len();

    rsx! {
        div { style: "background: white; border-radius: 12px; box-shadow: 0 1px 4px rgba(0,0,0,0.1); overflow: hidden;",
            div { style: "padding: 16px; background: #ecfdf5; border-bottom: 1px solid #d1fae5;",
                h2 { style: "margin: 0;", "{count} receipts detected" }
                p { style: "margin: 4px 0 0; color: #4b5563;", "Choose the one to process." }
            }

            if let Some(src) = preview {
                div { style: "background: black; padding: 16px;",
                    img { src: "{src}", style: "width: 100%; height: auto; border-radius: 4px;" }
                }
            }

            div { style: "padding: 16px; display: flex; flex-direction: column; gap: 8px;",
                for (index, area) in areas.into_iter().enumerate() {
                    {
                        let active = *selected.read() == index;
                        let border = if active { "#4f46e5" } else { "#e5e7eb" };
                        let background = if active { "#eef2ff" } else { "white" };
                        let number = index + 1;
                        rsx! {
                            button {
                                key: "{index}",
                                style: "display: flex; align-items: center; gap: 12px; padding: 12px; border-radius: 8px; border: 2px solid {border}; background: {background}; text-align: left;",
                                onclick: move |_| selected.set(index),
                                span { style: "width: 32px; height: 32px; border-radius: 50%; display: inline-flex; align-items: center; justify-content: center; background: {border}; font-weight: bold;",
                                    "{number}"
                                }
                                span {
                                    strong { "Receipt {number}" }
                                    br {}
                                    small { style: "color: #6b7280;", "Area: {area} px\u{00B2}" }
                                }
                            }
                        }
                    }
                }

                button {
                    style: "width: 100%; padding: 16px; border-radius: 12px; border: none; background: #4f46e5; color: white; font-size: 18px; margin-top: 8px;",
                    onclick: move |_| {
                        let index = *selected.read();
                        if let Err(e) = workflow.write().select_candidate(index) {
                            tracing::debug!(error = %e, "selection rejected");
                        }
                    },
                    "Use receipt {selected.read().saturating_add(1)}"
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
