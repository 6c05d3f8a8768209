// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>

use belegwerk_workflow::WorkflowController;
use dioxus::prelude::*;

use crate::services::actions;
use crate::services::app_services::AppServices;
use crate::state::Connection;

/// Shown while the image service cannot be reached.
#[component]
pub fn ConnectionError(reason: String) -> Element {
    let svc = use_context::<AppServices>();
    let workflow = use_context::<Signal<WorkflowController>>();
    let connection = use_context::<Signal<Connection>>();
    let api = svc.config().api_base_url.clone();
    let config_path = svc.config_path().display().to_string();

    rsx! {
        div { style: "background: white; border-radius: 12px; box-shadow: 0 1px 4px rgba(0,0,0,0.1); padding: 32px; text-align: center;",
            div { style: "font-size: 48px; margin-bottom: 12px;", "\u{26A0}" }
            h2 { style: "margin-top: 0;", "Can't reach the image service" }
            p { style: "color: #b91c1c;", "{reason}" }
            p { style: "color: #4b5563; font-size: 14px;",
                "Service address: "
                code { "{api}" }
            }
            p { style: "color: #6b7280; font-size: 13px;",
                "Change it in "
                code { "{config_path}" }
                " or with BELEGWERK_API_URL."
            }
            button {
                style: "width: 100%; padding: 16px; border-radius: 12px; border: none; background: #4f46e5; color: white; font-size: 18px;",
                onclick: move |_| {
                    spawn(actions::check_connection(svc.clone(), workflow, connection));
                },
                "Retry"
            }
        }
    }
}
