// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// belegwerk-workflow — The receipt workflow as an explicit state machine:
// capture, select, preview, adjust, confirm, uploading, complete.

pub mod controller;
pub mod state;

pub use controller::{DetectJob, ProcessJob, Ticket, UploadJob, WorkflowController};
pub use state::{Step, StepKind, WorkflowState};
