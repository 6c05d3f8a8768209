// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Complete page — the upload went through.

use belegwerk_workflow::{Step, WorkflowController};
use dioxus::prelude::*;

#[component]
pub fn Complete() -> Element {
    let mut workflow = use_context::<Signal<WorkflowController>>();

    let (filename, link) = {
        let ctrl = workflow.read();
        let state = ctrl.state();
        let filename = match state.step() {
            Step::Complete { filename, .. } => filename.clone(),
            _ => String::new(),
        };
        let link = state.upload_receipt().and_then(|r| r.link.clone());
        (filename, link)
    };

    rsx! {
        div { style: "background: white; border-radius: 12px; box-shadow: 0 1px 4px rgba(0,0,0,0.1); padding: 32px; text-align: center;",
            div { style: "font-size: 48px; margin-bottom: 12px;", "\u{2705}" }
            h2 { style: "margin-top: 0;", "Uploaded" }
            p { style: "color: #4b5563;", "Saved as " strong { "{filename}" } }

            if let Some(link) = link {
                a {
                    href: "{link}",
                    target: "_blank",
                    style: "display: inline-block; margin: 8px 0 16px; color: #4f46e5;",
                    "Open in storage"
                }
            }

            button {
                style: "width: 100%; padding: 16px; border-radius: 12px; border: none; background: #4f46e5; color: white; font-size: 18px;",
                onclick: move |_| workflow.write().start_over(),
                "Scan another receipt"
            }
        }
    }
}
