// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>

pub mod adjust;
pub mod capture;
pub mod complete;
pub mod confirm;
pub mod connection_error;
pub mod preview;
pub mod select;
