// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Capture page — take a photo with the camera or pick an image file.
//
// The camera session lives in a signal owned by this page, so leaving the
// page for any reason drops the session and releases the device.

use belegwerk_bridge::{CameraSession, CaptureSource};
use belegwerk_workflow::WorkflowController;
use dioxus::prelude::*;

use crate::services::actions;
use crate::services::app_services::AppServices;

#[component]
pub fn Capture() -> Element {
    let svc = use_context::<AppServices>();
    let mut workflow = use_context::<Signal<WorkflowController>>();
    let mut camera = use_signal(|| Option::<CameraSession>::None);
    let camera_active = camera.read().is_some();
    let resolution = camera.read().as_ref().and_then(CameraSession::resolution);

    rsx! {
        div {
            if camera_active {
                div { style: "background: white; border-radius: 12px; box-shadow: 0 1px 4px rgba(0,0,0,0.1); padding: 24px; text-align: center;",
                    h2 { style: "margin-top: 0;", "Camera ready" }
                    if let Some((width, height)) = resolution {
                        p { style: "color: #666;", "{width} \u{00D7} {height}" }
                    }
                    button {
                        style: "width: 100%; padding: 16px; border-radius: 12px; border: none; background: #4f46e5; color: white; font-size: 18px; margin-bottom: 8px;",
                        onclick: {
                            let svc = svc.clone();
                            move |_| {
                                let Some(session) = camera.write().take() else {
                                    return;
                                };
                                match CaptureSource::LiveCamera(session).acquire() {
                                    Ok(image) => actions::submit_photo(svc.clone(), workflow, image),
                                    Err(e) => workflow.write().report(&e),
                                }
                            }
                        },
                        "\u{1F4F8} Take photo"
                    }
                    button {
                        style: "width: 100%; padding: 12px; border-radius: 12px; border: 1px solid #d1d5db; background: #f3f4f6;",
                        onclick: move |_| {
                            if let Some(session) = camera.write().take() {
                                session.cancel();
                            }
                        },
                        "Cancel"
                    }
                }
            } else {
                div { style: "background: white; border-radius: 12px; box-shadow: 0 1px 4px rgba(0,0,0,0.1); padding: 32px; text-align: center;",
                    div { style: "font-size: 48px; margin-bottom: 12px;", "\u{1F9FE}" }
                    h2 { style: "margin-top: 0;", "Photograph a receipt" }
                    p { style: "color: #666;", "Take a photo of a receipt or choose an image file." }

                    button {
                        style: "width: 100%; padding: 16px; border-radius: 12px; border: none; background: #4f46e5; color: white; font-size: 18px; margin-bottom: 8px;",
                        onclick: {
                            let svc = svc.clone();
                            move |_| {
                                workflow.write().clear_error();
                                match CameraSession::start(
                                    svc.bridge(),
                                    &svc.camera_constraints(),
                                    svc.config().jpeg_quality,
                                ) {
                                    Ok(session) => camera.set(Some(session)),
                                    Err(e) => workflow.write().report(&e),
                                }
                            }
                        },
                        "\u{1F4F7} Start camera"
                    }

                    button {
                        style: "width: 100%; padding: 16px; border-radius: 12px; border: 1px solid #d1d5db; background: #f3f4f6; font-size: 18px;",
                        onclick: {
                            let svc = svc.clone();
                            move |_| {
                                let Some(path) = rfd::FileDialog::new()
                                    .add_filter("Images", &["jpg", "jpeg", "png", "webp", "bmp", "tif", "tiff"])
                                    .pick_file()
                                else {
                                    return;
                                };
                                match CaptureSource::File(path).acquire() {
                                    Ok(image) => actions::submit_photo(svc.clone(), workflow, image),
                                    Err(e) => workflow.write().report(&e),
                                }
                            }
                        },
                        "\u{1F4C1} Choose file"
                    }
                }

                div { style: "margin-top: 16px; padding: 16px; border-radius: 8px; border: 1px solid #bfdbfe; background: #eff6ff; color: #1e40af; font-size: 14px;",
                    strong { "Tips" }
                    ul { style: "margin: 8px 0 0; padding-left: 20px;",
                        li { "Keep the whole receipt in the frame." }
                        li { "Good light improves detection." }
                        li { "Lay the receipt as flat as you can." }
                    }
                }
            }
        }
    }
}
