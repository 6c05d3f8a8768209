// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// UI-only state shared through context. The receipt workflow itself lives in
// `Signal<WorkflowController>`.

/// Reachability of the image service, from the startup health probe.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Connection {
    #[default]
    Checking,
    Online,
    /// Unreachable, with a user-facing reason.
    Offline(String),
}
