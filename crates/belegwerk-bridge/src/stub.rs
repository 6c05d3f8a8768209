// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Stub bridge for desktop/CI builds where native camera APIs are unavailable.

use belegwerk_core::error::{BelegwerkError, Result};

use crate::traits::*;

/// No-op bridge returned on platforms without a camera integration.
pub struct StubBridge;

impl PlatformBridge for StubBridge {
    fn platform_name(&self) -> &str {
        "Desktop (stub)"
    }
}

impl NativeCamera for StubBridge {
    fn open_camera(&self, _constraints: &CameraConstraints) -> Result<Box<dyn CameraDevice>> {
        tracing::warn!("NativeCamera::open_camera called on stub bridge");
        Err(BelegwerkError::PlatformUnavailable)
    }
}
