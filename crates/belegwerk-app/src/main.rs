// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Belegwerk — Receipt capture, outline correction and cloud upload
//
// Entry point. Initialises logging and backend services, provides the
// workflow controller as context, and renders the view for the active step.

mod pages;
mod services;
mod state;

use belegwerk_core::human_errors::humanize_error;
use belegwerk_remote::RemoteImageService;
use belegwerk_workflow::{StepKind, WorkflowController};
use dioxus::prelude::*;

use pages::adjust::Adjust;
use pages::capture::Capture;
use pages::complete::Complete;
use pages::confirm::Confirm;
use pages::connection_error::ConnectionError;
use pages::preview::Preview;
use pages::select::Select;

use services::actions;
use services::app_services::AppServices;
use state::Connection;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    tracing::info!("Belegwerk starting");

    dioxus::launch(app);
}

/// Root component.
fn app() -> Element {
    let services = use_hook(|| {
        AppServices::init().map_err(|e| {
            tracing::error!(error = %e, "app services failed to initialise");
            humanize_error(&e)
        })
    });

    let svc = match services {
        Ok(svc) => svc,
        Err(human) => {
            return rsx! {
                div { style: "padding: 32px; font-family: system-ui, -apple-system, sans-serif;",
                    h1 { "Belegwerk can't start" }
                    p { "{human.message}" }
                    p { style: "color: #666;", "{human.suggestion}" }
                }
            };
        }
    };

    use_context_provider(|| svc.clone());
    let workflow = use_context_provider(|| Signal::new(WorkflowController::new()));
    let connection = use_context_provider(|| Signal::new(Connection::default()));

    {
        let svc = svc.clone();
        use_hook(move || {
            spawn(actions::check_connection(svc, workflow, connection));
        });
    }

    rsx! {
        div { class: "app-container",
            style: "display: flex; flex-direction: column; min-height: 100vh; font-family: system-ui, -apple-system, sans-serif; background: #f9fafb;",
            Header {}
            main { style: "width: 100%; max-width: 720px; margin: 0 auto; padding: 16px; box-sizing: border-box;",
                match &*connection.read() {
                    Connection::Checking => rsx! {
                        p { style: "text-align: center; color: #666; margin: 48px 0;", "Connecting to the image service..." }
                    },
                    Connection::Offline(reason) => rsx! {
                        ConnectionError { reason: reason.clone() }
                    },
                    Connection::Online => rsx! {
                        ErrorBanner {}
                        StepView {}
                    },
                }
            }
        }
    }
}

/// Title bar with the storage sign-in prompt.
#[component]
fn Header() -> Element {
    let workflow = use_context::<Signal<WorkflowController>>();
    let connection = use_context::<Signal<Connection>>();
    let show_auth = {
        let ctrl = workflow.read();
        !ctrl.state().authenticated()
            && ctrl.step() == StepKind::Capture
            && *connection.read() == Connection::Online
    };

    rsx! {
        header { style: "background: #4f46e5; color: white; padding: 16px; box-shadow: 0 2px 6px rgba(0,0,0,0.15);",
            div { style: "max-width: 720px; margin: 0 auto; display: flex; align-items: center; justify-content: space-between; gap: 12px;",
                h1 { style: "margin: 0; font-size: 20px;", "Belegwerk" }
                if show_auth {
                    AuthPrompt {}
                }
            }
        }
    }
}

/// "Connect storage" — fetch the authorization URL, then let the user
/// re-check once they have signed in.
#[component]
fn AuthPrompt() -> Element {
    let svc = use_context::<AppServices>();
    let mut workflow = use_context::<Signal<WorkflowController>>();
    let mut auth_url = use_signal(|| Option::<String>::None);
    let mut loading = use_signal(|| false);

    rsx! {
        div { style: "display: flex; align-items: center; gap: 8px;",
            if let Some(url) = auth_url.read().clone() {
                a { href: "{url}", target: "_blank",
                    style: "color: white; font-size: 14px;",
                    "Open sign-in page"
                }
                button {
                    style: "padding: 8px 12px; border-radius: 8px; border: none; background: white; color: #4f46e5; font-size: 14px;",
                    disabled: *loading.read(),
                    onclick: {
                        let svc = svc.clone();
                        move |_| {
                            let svc = svc.clone();
                            loading.set(true);
                            spawn(async move {
                                actions::refresh_auth(svc, workflow).await;
                                loading.set(false);
                            });
                        }
                    },
                    "I've signed in"
                }
            } else {
                button {
                    style: "padding: 8px 12px; border-radius: 8px; border: none; background: white; color: #4f46e5; font-size: 14px;",
                    disabled: *loading.read(),
                    onclick: {
                        let svc = svc.clone();
                        move |_| {
                            let svc = svc.clone();
                            loading.set(true);
                            spawn(async move {
                                match svc.remote().auth_url().await {
                                    Ok(url) => {
                                        tracing::info!("authorization url received");
                                        auth_url.set(Some(url));
                                    }
                                    Err(e) => workflow.write().report(&e),
                                }
                                loading.set(false);
                            });
                        }
                    },
                    if *loading.read() { "Working..." } else { "Connect storage" }
                }
            }
        }
    }
}

/// The single error slot.
#[component]
fn ErrorBanner() -> Element {
    let mut workflow = use_context::<Signal<WorkflowController>>();
    let message = workflow.read().state().error().map(str::to_string);

    rsx! {
        if let Some(message) = message {
            div { style: "display: flex; justify-content: space-between; align-items: center; gap: 12px; margin-bottom: 16px; padding: 12px 16px; border-radius: 8px; border: 1px solid #fecaca; background: #fef2f2; color: #b91c1c;",
                span { "{message}" }
                button {
                    style: "border: none; background: none; color: #b91c1c; font-size: 18px;",
                    onclick: move |_| workflow.write().clear_error(),
                    "\u{00D7}"
                }
            }
        }
    }
}

/// View for the active step.
#[component]
fn StepView() -> Element {
    let workflow = use_context::<Signal<WorkflowController>>();
    let (step, busy) = {
        let ctrl = workflow.read();
        (ctrl.step(), ctrl.is_busy())
    };

    if busy && step != StepKind::Uploading {
        return rsx! {
            Busy { label: "Working..." }
        };
    }

    match step {
        StepKind::Capture => rsx! { Capture {} },
        StepKind::Select => rsx! { Select {} },
        StepKind::Preview => rsx! { Preview {} },
        StepKind::Adjust => rsx! { Adjust {} },
        StepKind::Confirm => rsx! { Confirm {} },
        StepKind::Uploading => rsx! { Busy { label: "Uploading..." } },
        StepKind::Complete => rsx! { Complete {} },
    }
}

#[component]
fn Busy(label: &'static str) -> Element {
    rsx! {
        div { style: "text-align: center; padding: 48px 0; color: #4b5563;",
            div { style: "font-size: 32px; margin-bottom: 12px;", "\u{231B}" }
            p { "{label}" }
        }
    }
}
