// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Remote calls driven from the UI.
//
// The controller signal is only written before and after each await, never
// held across one: `begin_*` runs synchronously in the event handler, the
// request runs in a spawned task, and `finish_*` applies the outcome.

use belegwerk_core::human_errors::humanize_error;
use belegwerk_core::{Adjustments, ImagePayload};
use belegwerk_remote::RemoteImageService;
use belegwerk_workflow::WorkflowController;
use dioxus::prelude::*;
use tracing::{debug, info};

use super::app_services::AppServices;
use crate::state::Connection;

/// Send a captured photo for detection.
pub fn submit_photo(svc: AppServices, mut workflow: Signal<WorkflowController>, image: ImagePayload) {
    let begun = workflow.write().begin_detect(image);
    let job = match begun {
        Ok(job) => job,
        Err(e) => {
            debug!(error = %e, "detection not started");
            return;
        }
    };
    spawn(async move {
        let outcome = svc.remote().detect_contours(&job.image).await;
        if let Err(e) = workflow.write().finish_detect(job.ticket, outcome) {
            debug!(error = %e, "detection finished with error");
        }
    });
}

/// Send the photo and outline for processing with `adjustments`.
pub fn submit_adjustments(
    svc: AppServices,
    mut workflow: Signal<WorkflowController>,
    adjustments: Adjustments,
) {
    let begun = workflow.write().begin_process(adjustments);
    let job = match begun {
        Ok(job) => job,
        Err(e) => {
            debug!(error = %e, "processing not started");
            return;
        }
    };
    spawn(async move {
        let outcome = svc
            .remote()
            .process_image(&job.image, &job.contour, &job.adjustments)
            .await;
        if let Err(e) = workflow.write().finish_process(job.ticket, outcome) {
            debug!(error = %e, "processing finished with error");
        }
    });
}

/// Upload the processed image as `filename`.
pub fn submit_upload(svc: AppServices, mut workflow: Signal<WorkflowController>, filename: String) {
    let begun = workflow.write().begin_upload(&filename);
    let job = match begun {
        Ok(job) => job,
        Err(e) => {
            debug!(error = %e, "upload not started");
            return;
        }
    };
    spawn(async move {
        let outcome = svc
            .remote()
            .upload_image(&job.processed, &job.filename)
            .await;
        if let Err(e) = workflow.write().finish_upload(job.ticket, outcome) {
            debug!(error = %e, "upload finished with error");
        }
    });
}

/// Re-probe the sign-in status.
pub async fn refresh_auth(svc: AppServices, mut workflow: Signal<WorkflowController>) {
    let authenticated = svc.remote().auth_status().await;
    workflow.write().set_authenticated(authenticated);
}

/// Probe the image service; when it answers, also refresh the sign-in status.
pub async fn check_connection(
    svc: AppServices,
    workflow: Signal<WorkflowController>,
    mut connection: Signal<Connection>,
) {
    connection.set(Connection::Checking);
    match svc.remote().health().await {
        Ok(()) => {
            info!("image service reachable");
            connection.set(Connection::Online);
            refresh_auth(svc, workflow).await;
        }
        Err(e) => {
            tracing::warn!(error = %e, "image service unreachable");
            connection.set(Connection::Offline(humanize_error(&e).message));
        }
    }
}
