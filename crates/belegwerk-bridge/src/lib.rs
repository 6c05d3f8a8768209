// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>

//! Belegwerk — capture sources.
//!
//! Defines the native camera abstraction, a scoped camera session that is
//! released on every exit path, and file selection. Both capture strategies
//! produce the same [`belegwerk_core::ImagePayload`], so nothing downstream
//! cares how the photo was taken.

pub mod capture;
pub mod stub;
pub mod traits;

pub use capture::{CameraSession, CaptureSource, read_image_file};
pub use traits::{CameraConstraints, CameraDevice, NativeCamera, PlatformBridge};

/// Retrieves the bridge implementation for the running platform.
///
/// Desktop builds have no native camera SDK wired in and get the stub, whose
/// camera reports `PlatformUnavailable`; file selection works everywhere.
pub fn platform_bridge() -> Box<dyn PlatformBridge> {
    Box::new(stub::StubBridge)
}
