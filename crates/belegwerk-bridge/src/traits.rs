// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Platform-agnostic trait definitions for native capture capabilities.

use belegwerk_core::AppConfig;
use belegwerk_core::config::CameraFacing;
use belegwerk_core::error::Result;
use image::RgbImage;

/// Unified bridge that groups all native capabilities.
pub trait PlatformBridge: NativeCamera {
    /// Human-readable platform name (e.g. "iOS 17", "Desktop (stub)").
    fn platform_name(&self) -> &str;
}

/// What to ask the camera for. Devices grant what they can; the requested
/// size is a target, not a guarantee.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CameraConstraints {
    pub facing: CameraFacing,
    pub ideal_width: u32,
    pub ideal_height: u32,
}

impl CameraConstraints {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            facing: config.camera_facing,
            ideal_width: config.camera_ideal_width,
            ideal_height: config.camera_ideal_height,
        }
    }
}

impl Default for CameraConstraints {
    fn default() -> Self {
        Self::from_config(&AppConfig::default())
    }
}

/// Open camera devices.
pub trait NativeCamera {
    /// Acquire the camera. Fails with `CameraPermissionDenied`,
    /// `CameraUnavailable`, or `PlatformUnavailable`; nothing is held open
    /// on failure.
    fn open_camera(&self, constraints: &CameraConstraints) -> Result<Box<dyn CameraDevice>>;
}

/// A live, exclusively owned camera stream.
///
/// Holding one keeps the hardware busy (and its indicator lit), so callers
/// go through [`crate::CameraSession`], which guarantees `stop` runs.
pub trait CameraDevice: Send {
    /// Resolution actually granted by the device.
    fn resolution(&self) -> (u32, u32);

    /// Grab the current frame.
    fn grab_frame(&mut self) -> Result<RgbImage>;

    /// Stop every track and release the hardware. Must be idempotent.
    fn stop(&mut self);
}
