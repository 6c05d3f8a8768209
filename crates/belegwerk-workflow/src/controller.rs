// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// The step state machine.
//
// Remote calls are split in two phases so the UI never holds the controller
// across an await: `begin_*` validates, records a pending ticket and returns
// the inputs for the call; `finish_*` applies the outcome only if the ticket
// is still the pending one. At most one request is pending at a time.

use belegwerk_core::error::{BelegwerkError, Result};
use belegwerk_core::human_errors::humanize_error;
use belegwerk_core::types::validate_filename;
use belegwerk_core::{Adjustments, Contour, Detection, ImagePayload, UploadReceipt};
use belegwerk_remote::RemoteImageService;
use tracing::{debug, info, warn};

use crate::state::{Step, StepKind, WorkflowState};

/// Identifies one in-flight remote request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RequestKind {
    Detect,
    Process,
    Upload,
}

#[derive(Debug, Clone, Copy)]
struct Pending {
    ticket: Ticket,
    kind: RequestKind,
}

/// Inputs for `RemoteImageService::detect_contours`.
#[derive(Debug, Clone)]
pub struct DetectJob {
    pub ticket: Ticket,
    pub image: ImagePayload,
}

/// Inputs for `RemoteImageService::process_image`.
#[derive(Debug, Clone)]
pub struct ProcessJob {
    pub ticket: Ticket,
    pub image: ImagePayload,
    pub contour: Contour,
    pub adjustments: Adjustments,
}

/// Inputs for `RemoteImageService::upload_image`.
#[derive(Debug, Clone)]
pub struct UploadJob {
    pub ticket: Ticket,
    pub processed: ImagePayload,
    pub filename: String,
}

/// Owns the [`WorkflowState`] and is the only thing that changes it.
#[derive(Debug, Clone, Default)]
pub struct WorkflowController {
    state: WorkflowState,
    pending: Option<Pending>,
    next_ticket: u64,
}

impl WorkflowController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &WorkflowState {
        &self.state
    }

    pub fn step(&self) -> StepKind {
        self.state.kind()
    }

    /// A remote request is outstanding; triggering controls should be disabled.
    pub fn is_busy(&self) -> bool {
        self.pending.is_some()
    }

    // -- Capture & detection ----------------------------------------------

    /// Submit a freshly captured photo for detection.
    pub fn begin_detect(&mut self, image: ImagePayload) -> Result<DetectJob> {
        self.ensure_idle()?;
        if self.state.kind() != StepKind::Capture {
            return Err(self.reject("capture a photo"));
        }
        self.state.error = None;
        self.state.detecting = Some(image.clone());
        let ticket = self.issue(RequestKind::Detect);
        info!(bytes = image.len(), "detecting receipts");
        Ok(DetectJob { ticket, image })
    }

    /// Apply a detection outcome: one candidate goes straight to preview,
    /// several go to select, failure stays on capture with the error shown.
    pub fn finish_detect(&mut self, ticket: Ticket, outcome: Result<Detection>) -> Result<()> {
        self.settle(ticket, RequestKind::Detect)?;
        let image = self
            .state
            .detecting
            .take()
            .ok_or(BelegwerkError::StaleResponse)?;

        let detection = match outcome {
            Ok(detection) if detection.candidates.is_empty() => {
                let err = BelegwerkError::InvalidResponse("no receipts detected".into());
                self.fail(&err);
                return Err(err);
            }
            Ok(detection) => detection,
            Err(err) => {
                self.fail(&err);
                return Err(err);
            }
        };

        let next = match detection.candidates.as_slice() {
            [only] => Step::Preview {
                image,
                contour: only.contour,
            },
            _ => Step::Select {
                image,
                candidates: detection.candidates,
                preview: detection.preview,
            },
        };
        self.enter(StepKind::Capture, next);
        Ok(())
    }

    /// Pick candidate `index` of a multi-receipt detection.
    pub fn select_candidate(&mut self, index: usize) -> Result<()> {
        self.ensure_idle()?;
        let (image, chosen, count) = match &self.state.step {
            Step::Select {
                image, candidates, ..
            } => (
                image.clone(),
                candidates.get(index).map(|c| c.contour),
                candidates.len(),
            ),
            _ => return Err(self.reject("select a receipt")),
        };
        let Some(contour) = chosen else {
            let err = BelegwerkError::CandidateOutOfRange { index, count };
            self.fail(&err);
            return Err(err);
        };
        self.state.error = None;
        debug!(index, count, "candidate selected");
        self.enter(StepKind::Select, Step::Preview { image, contour });
        Ok(())
    }

    // -- Outline ----------------------------------------------------------

    /// Replace the outline with an edited one. Does not change the step.
    pub fn update_contour(&mut self, contour: Contour) -> Result<()> {
        self.ensure_idle()?;
        if let Step::Preview {
            contour: current, ..
        } = &mut self.state.step
        {
            *current = contour;
            return Ok(());
        }
        Err(self.reject("edit the outline"))
    }

    /// Accept the outline and move on to tonal adjustments.
    pub fn confirm_contour(&mut self) -> Result<()> {
        self.ensure_idle()?;
        match std::mem::take(&mut self.state.step) {
            Step::Preview { image, contour } => {
                self.state.error = None;
                self.enter(
                    StepKind::Preview,
                    Step::Adjust {
                        image,
                        contour,
                        adjustments: Adjustments::default(),
                    },
                );
                Ok(())
            }
            other => self.restore(other, "confirm the outline"),
        }
    }

    // -- Processing -------------------------------------------------------

    /// Submit the photo, outline and `adjustments` for processing.
    pub fn begin_process(&mut self, adjustments: Adjustments) -> Result<ProcessJob> {
        self.ensure_idle()?;
        if self.state.kind() != StepKind::Adjust {
            return Err(self.reject("process the image"));
        }
        if let Err(err) = adjustments.validate() {
            self.fail(&err);
            return Err(err);
        }
        let (image, contour) = match &mut self.state.step {
            Step::Adjust {
                image,
                contour,
                adjustments: stored,
            } => {
                *stored = adjustments;
                (image.clone(), *contour)
            }
            _ => return Err(self.reject("process the image")),
        };

        self.state.error = None;
        let ticket = self.issue(RequestKind::Process);
        info!(?adjustments, "processing image");
        Ok(ProcessJob {
            ticket,
            image,
            contour,
            adjustments,
        })
    }

    /// Apply a processing outcome. Failure stays on adjust with everything
    /// already entered kept.
    pub fn finish_process(&mut self, ticket: Ticket, outcome: Result<ImagePayload>) -> Result<()> {
        self.settle(ticket, RequestKind::Process)?;
        let processed = match outcome {
            Ok(processed) => processed,
            Err(err) => {
                self.fail(&err);
                return Err(err);
            }
        };
        match std::mem::take(&mut self.state.step) {
            Step::Adjust {
                image,
                contour,
                adjustments,
            } => {
                self.enter(
                    StepKind::Adjust,
                    Step::Confirm {
                        image,
                        contour,
                        adjustments,
                        processed,
                        filename: None,
                    },
                );
                Ok(())
            }
            other => {
                self.state.step = other;
                Err(BelegwerkError::StaleResponse)
            }
        }
    }

    // -- Upload -----------------------------------------------------------

    /// Start uploading the processed image as `filename`.
    ///
    /// A blank name or a missing sign-in is rejected here, without a remote
    /// call and without leaving the confirm step.
    pub fn begin_upload(&mut self, filename: &str) -> Result<UploadJob> {
        self.ensure_idle()?;
        if self.state.kind() != StepKind::Confirm {
            return Err(self.reject("upload"));
        }
        let filename = match validate_filename(filename) {
            Ok(name) => name.to_string(),
            Err(err) => {
                self.fail(&err);
                return Err(err);
            }
        };
        if !self.state.authenticated {
            let err = BelegwerkError::NotAuthenticated;
            self.fail(&err);
            return Err(err);
        }

        let (image, contour, adjustments, processed) = match std::mem::take(&mut self.state.step) {
            Step::Confirm {
                image,
                contour,
                adjustments,
                processed,
                ..
            } => (image, contour, adjustments, processed),
            other => return self.restore(other, "upload"),
        };
        self.state.error = None;
        let job = UploadJob {
            ticket: self.issue(RequestKind::Upload),
            processed: processed.clone(),
            filename: filename.clone(),
        };
        self.enter(
            StepKind::Confirm,
            Step::Uploading {
                image,
                contour,
                adjustments,
                processed,
                filename,
            },
        );
        Ok(job)
    }

    /// Apply an upload outcome. Failure returns to confirm so the upload can
    /// be attempted again.
    pub fn finish_upload(&mut self, ticket: Ticket, outcome: Result<UploadReceipt>) -> Result<()> {
        self.settle(ticket, RequestKind::Upload)?;
        let (image, contour, adjustments, processed, filename) =
            match std::mem::take(&mut self.state.step) {
                Step::Uploading {
                    image,
                    contour,
                    adjustments,
                    processed,
                    filename,
                } => (image, contour, adjustments, processed, filename),
                other => return self.restore(other, "finish the upload"),
            };
        match outcome {
            Ok(receipt) => {
                info!(%filename, "upload complete");
                self.enter(
                    StepKind::Uploading,
                    Step::Complete {
                        processed,
                        filename,
                        receipt,
                    },
                );
                Ok(())
            }
            Err(err) => {
                self.enter(
                    StepKind::Uploading,
                    Step::Confirm {
                        image,
                        contour,
                        adjustments,
                        processed,
                        filename: Some(filename),
                    },
                );
                self.fail(&err);
                Err(err)
            }
        }
    }

    // -- Navigation -------------------------------------------------------

    /// adjust -> preview, confirm -> adjust.
    pub fn back(&mut self) -> Result<()> {
        self.ensure_idle()?;
        match std::mem::take(&mut self.state.step) {
            Step::Adjust { image, contour, .. } => {
                self.state.error = None;
                self.enter(StepKind::Adjust, Step::Preview { image, contour });
                Ok(())
            }
            Step::Confirm {
                image,
                contour,
                adjustments,
                ..
            } => {
                self.state.error = None;
                self.enter(
                    StepKind::Confirm,
                    Step::Adjust {
                        image,
                        contour,
                        adjustments,
                    },
                );
                Ok(())
            }
            other => self.restore(other, "go back"),
        }
    }

    /// Abandon the current receipt from select, preview or confirm.
    pub fn cancel(&mut self) -> Result<()> {
        self.ensure_idle()?;
        match self.state.kind() {
            StepKind::Select | StepKind::Preview | StepKind::Confirm => {
                self.reset();
                Ok(())
            }
            _ => Err(self.reject("cancel")),
        }
    }

    /// Back to an empty capture step from anywhere. A request still in flight
    /// is orphaned; its response will be rejected as stale.
    pub fn start_over(&mut self) {
        if let Some(pending) = self.pending {
            debug!(ticket = ?pending.ticket, "dropping in-flight request");
        }
        self.reset();
    }

    // -- Auth & error slot ------------------------------------------------

    pub fn set_authenticated(&mut self, authenticated: bool) {
        if self.state.authenticated != authenticated {
            info!(authenticated, "auth status changed");
        }
        self.state.authenticated = authenticated;
    }

    /// Show a message in the error slot, replacing any previous one.
    pub fn set_error(&mut self, message: impl Into<String>) {
        self.state.error = Some(message.into());
    }

    /// Show the user-facing form of `err`.
    pub fn report(&mut self, err: &BelegwerkError) {
        self.fail(err);
    }

    pub fn clear_error(&mut self) {
        self.state.error = None;
    }

    // -- Drivers ----------------------------------------------------------

    /// Detect receipts in `image` and route to select or preview.
    pub async fn capture<S: RemoteImageService>(
        &mut self,
        service: &S,
        image: ImagePayload,
    ) -> Result<()> {
        let job = self.begin_detect(image)?;
        let outcome = service.detect_contours(&job.image).await;
        self.finish_detect(job.ticket, outcome)
    }

    /// Process with `adjustments` and move to confirm.
    pub async fn process<S: RemoteImageService>(
        &mut self,
        service: &S,
        adjustments: Adjustments,
    ) -> Result<()> {
        let job = self.begin_process(adjustments)?;
        let outcome = service
            .process_image(&job.image, &job.contour, &job.adjustments)
            .await;
        self.finish_process(job.ticket, outcome)
    }

    /// Upload as `filename` and move to complete.
    pub async fn upload<S: RemoteImageService>(
        &mut self,
        service: &S,
        filename: &str,
    ) -> Result<()> {
        let job = self.begin_upload(filename)?;
        let outcome = service.upload_image(&job.processed, &job.filename).await;
        self.finish_upload(job.ticket, outcome)
    }

    /// Re-probe the sign-in status. Never fails.
    pub async fn refresh_auth<S: RemoteImageService>(&mut self, service: &S) -> bool {
        let authenticated = service.auth_status().await;
        self.set_authenticated(authenticated);
        authenticated
    }

    // -- Internals --------------------------------------------------------

    fn ensure_idle(&self) -> Result<()> {
        match self.pending {
            Some(pending) => {
                warn!(ticket = ?pending.ticket, "request already in flight");
                Err(BelegwerkError::RequestPending)
            }
            None => Ok(()),
        }
    }

    fn issue(&mut self, kind: RequestKind) -> Ticket {
        self.next_ticket += 1;
        let ticket = Ticket(self.next_ticket);
        self.pending = Some(Pending { ticket, kind });
        ticket
    }

    /// Clear the pending request if `ticket` is it.
    fn settle(&mut self, ticket: Ticket, kind: RequestKind) -> Result<()> {
        match self.pending {
            Some(pending) if pending.ticket == ticket && pending.kind == kind => {
                self.pending = None;
                Ok(())
            }
            _ => {
                warn!(?ticket, ?kind, "ignoring stale response");
                Err(BelegwerkError::StaleResponse)
            }
        }
    }

    fn enter(&mut self, from: StepKind, next: Step) {
        let to = next.kind();
        self.state.step = next;
        info!(%from, %to, "step changed");
    }

    /// Put back a step taken for matching and report the action as invalid.
    fn restore<T>(&mut self, step: Step, action: &'static str) -> Result<T> {
        self.state.step = step;
        Err(self.reject(action))
    }

    fn reject(&self, action: &'static str) -> BelegwerkError {
        let step = self.state.kind().name();
        warn!(step, action, "action not allowed");
        BelegwerkError::InvalidTransition { step, action }
    }

    fn fail(&mut self, err: &BelegwerkError) {
        warn!(step = %self.state.kind(), error = %err, "workflow error");
        self.state.error = Some(humanize_error(err).message);
    }

    fn reset(&mut self) {
        let from = self.state.kind();
        self.pending = None;
        self.state = WorkflowState {
            authenticated: self.state.authenticated,
            ..WorkflowState::default()
        };
        info!(%from, "workflow reset");
    }
}
