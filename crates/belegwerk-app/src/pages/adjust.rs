// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Adjust page — brightness, contrast and denoise before processing.

use belegwerk_core::Adjustments;
use belegwerk_workflow::WorkflowController;
use dioxus::prelude::*;

use crate::services::actions;
use crate::services::app_services::AppServices;

#[component]
pub fn Adjust() -> Element {
    let svc = use_context::<AppServices>();
    let mut workflow = use_context::<Signal<WorkflowController>>();

    // Start from whatever was last submitted (after "back"), else defaults.
    let initial = use_hook(move || {
        workflow
            .peek()
            .state()
            .adjustments()
            .copied()
            .unwrap_or_default()
    });
    let mut brightness = use_signal(|| initial.brightness);
    let mut contrast = use_signal(|| initial.contrast);
    let mut denoise = use_signal(|| initial.denoise);

    let image_src = workflow
        .read()
        .state()
        .captured_image()
        .map(|p| p.as_str().to_string())
        .unwrap_or_default();

    let b = *brightness.read();
    let c = *contrast.read();
    let sign = if b > 0 { "+" } else { "" };
    let filter = format!("brightness({}) contrast({c})", 1.0 + f64::from(b) / 100.0);
    let (b_min, b_max) = (
        *Adjustments::BRIGHTNESS.start(),
        *Adjustments::BRIGHTNESS.end(),
    );
    let (c_min, c_max) = (*Adjustments::CONTRAST.start(), *Adjustments::CONTRAST.end());

    rsx! {
        div { style: "background: white; border-radius: 12px; box-shadow: 0 1px 4px rgba(0,0,0,0.1); overflow: hidden;",
            div { style: "padding: 16px; background: #eef2ff; border-bottom: 1px solid #e0e7ff;",
                h2 { style: "margin: 0;", "Correct the image" }
                p { style: "margin: 4px 0 0; color: #4b5563;",
                    "Tune brightness and contrast so the receipt is easy to read."
                }
            }

            div { style: "padding: 16px; display: flex; flex-direction: column; gap: 20px;",
                div { style: "background: #f3f4f6; border-radius: 8px; padding: 16px;",
                    img { src: "{image_src}", style: "width: 100%; height: auto; border-radius: 4px; filter: {filter};" }
                }

                label { style: "display: block;",
                    "Brightness: {sign}{b}"
                    input {
                        r#type: "range",
                        min: "{b_min}",
                        max: "{b_max}",
                        step: "1",
                        value: "{b}",
                        style: "width: 100%;",
                        oninput: move |evt| {
                            if let Ok(v) = evt.value().parse::<i32>() {
                                brightness.set(v.clamp(b_min, b_max));
                            }
                        },
                    }
                }

                label { style: "display: block;",
                    "Contrast: {c:.1}"
                    input {
                        r#type: "range",
                        min: "{c_min}",
                        max: "{c_max}",
                        step: "{Adjustments::CONTRAST_STEP}",
                        value: "{c}",
                        style: "width: 100%;",
                        oninput: move |evt| {
                            if let Ok(v) = evt.value().parse::<f64>() {
                                contrast.set(v.clamp(c_min, c_max));
                            }
                        },
                    }
                }

                label { style: "display: flex; align-items: center; gap: 8px;",
                    input {
                        r#type: "checkbox",
                        checked: *denoise.read(),
                        onchange: move |evt| denoise.set(evt.checked()),
                    }
                    "Reduce noise"
                }

                button {
                    style: "align-self: flex-start; padding: 8px 12px; border-radius: 8px; border: 1px solid #d1d5db; background: white; font-size: 14px;",
                    onclick: move |_| {
                        let defaults = Adjustments::default();
                        brightness.set(defaults.brightness);
                        contrast.set(defaults.contrast);
                        denoise.set(defaults.denoise);
                    },
                    "Reset"
                }

                button {
                    style: "width: 100%; padding: 16px; border-radius: 12px; border: none; background: #4f46e5; color: white; font-size: 18px;",
                    onclick: {
                        let svc = svc.clone();
                        move |_| {
                            let adjustments = Adjustments {
                                brightness: *brightness.read(),
                                contrast: *contrast.read(),
                                denoise: *denoise.read(),
                            };
                            actions::submit_adjustments(svc.clone(), workflow, adjustments);
                        }
                    },
                    "Apply"
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
            }
        }
    }
}
