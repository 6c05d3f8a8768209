// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Belegwerk — Core types, coordinate geometry, and error definitions shared
// across all crates.

pub mod config;
pub mod error;
pub mod geometry;
pub mod human_errors;
pub mod payload;
pub mod types;

pub use config::AppConfig;
pub use error::BelegwerkError;
pub use payload::ImagePayload;
pub use types::*;
