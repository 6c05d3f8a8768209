// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Confirm page — review the processed receipt and name the upload.

use belegwerk_core::types::suggested_filename;
use belegwerk_workflow::WorkflowController;
use dioxus::prelude::*;

use crate::services::actions;
use crate::services::app_services::AppServices;

#[component]
pub fn Confirm() -> Element {
    let svc = use_context::<AppServices>();
    let mut workflow = use_context::<Signal<WorkflowController>>();
    let prefix = svc.config().filename_prefix.clone();
    // A name typed before a failed upload wins over a fresh suggestion.
    let mut filename = use_signal(move || match workflow.peek().state().filename() {
        Some(name) => name.to_string(),
        None => suggested_filename(&prefix, &chrono::Local::now()),
    });

    let (processed, signed_in) = {
        let ctrl = workflow.read();
        let state = ctrl.state();
        (
            state.processed_image().map(|p| p.as_str().to_string()),
            state.authenticated(),
        )
    };
    let blank = filename.read().trim().is_empty();

    rsx! {
        div { style: "background: white; border-radius: 12px; box-shadow: 0 1px 4px rgba(0,0,0,0.1); overflow: hidden;",
            div { style: "padding: 16px; background: #ecfdf5; border-bottom: 1px solid #d1fae5;",
                h2 { style: "margin: 0;", "Ready to upload" }
                p { style: "margin: 4px 0 0; color: #4b5563;",
                    "Check the result and pick a file name."
                }
            }

            if let Some(src) = processed {
                div { style: "background: #f3f4f6; padding: 16px;",
                    img { src: "{src}", style: "width: 100%; height: auto; border-radius: 4px; box-shadow: 0 1px 4px rgba(0,0,0,0.2);" }
                }
            }

            div { style: "padding: 16px; display: flex; flex-direction: column; gap: 8px;",
                label { style: "display: block; font-weight: 600;",
                    "File name"
                    input {
                        r#type: "text",
                        value: "{filename}",
                        placeholder: "receipt.jpg",
                        style: "display: block; width: 100%; box-sizing: border-box; margin-top: 4px; padding: 10px; border-radius: 8px; border: 1px solid #d1d5db; font-size: 16px;",
                        oninput: move |evt| filename.set(evt.value()),
                    }
                }
                if !signed_in {
                    p { style: "margin: 0; color: #b45309; font-size: 14px;",
                        "Connect storage before uploading."
                    }
                }

                button {
                    style: "width: 100%; padding: 16px; border-radius: 12px; border: none; background: #16a34a; color: white; font-size: 18px; margin-top: 8px;",
                    disabled: blank,
                    onclick: {
                        let svc = svc.clone();
                        move |_| actions::submit_upload(svc.clone(), workflow, filename.read().clone())
                    },
                    "\u{2601} Upload"
                }
                button {
                    style: "width: 100%; padding: 12px; border-radius: 12px; border: 1px solid #d1d5db; background: #f3f4f6;",
                    onclick: move |_| {
                        if let Err(e) = workflow.write().back() {
                            tracing::debug!(error = %e, "back rejected");
                        }
                    },
                    "Back"
                }
                button {
                    style: "width: 100%; padding: 12px; border-radius: 12px; border: none; background: none; color: #6b7280;",
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
