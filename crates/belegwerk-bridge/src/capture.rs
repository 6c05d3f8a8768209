// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Capture sources — live camera snapshots and file selection, both producing
// an `ImagePayload`.

use std::io::Cursor;
use std::path::{Path, PathBuf};

use belegwerk_core::ImagePayload;
use belegwerk_core::error::{BelegwerkError, Result};
use image::codecs::jpeg::JpegEncoder;
use image::{ImageFormat, ImageReader, RgbImage};
use tracing::{debug, info, instrument, warn};

use crate::traits::{CameraConstraints, CameraDevice, NativeCamera};

// -- Camera -------------------------------------------------------------------

/// A camera held open between "start camera" and "take photo" / "cancel".
///
/// The device is released exactly once: after a snapshot, on cancel, or when
/// the session is dropped for any other reason (including errors).
pub struct CameraSession {
    device: Option<Box<dyn CameraDevice>>,
    jpeg_quality: u8,
}

impl CameraSession {
    /// Acquire the camera. On failure nothing is left open and the error is
    /// returned for the user to act on.
    #[instrument(skip(camera))]
    pub fn start(
        camera: &dyn NativeCamera,
        constraints: &CameraConstraints,
        jpeg_quality: u8,
    ) -> Result<Self> {
        let device = camera.open_camera(constraints).inspect_err(|e| {
            warn!(error = %e, "camera acquisition failed");
        })?;
        let (width, height) = device.resolution();
        info!(width, height, "camera started");
        Ok(Self {
            device: Some(device),
            jpeg_quality: jpeg_quality.clamp(1, 100),
        })
    }

    /// Resolution the device granted, `None` once released.
    pub fn resolution(&self) -> Option<(u32, u32)> {
        self.device.as_ref().map(|d| d.resolution())
    }

    /// Take one frame, encode it as JPEG, and release the camera.
    pub fn snapshot(mut self) -> Result<ImagePayload> {
        let device = self
            .device
            .as_mut()
            .ok_or_else(|| BelegwerkError::CameraUnavailable("camera already released".into()))?;
        let frame = device.grab_frame()?;
        self.release();

        let bytes = encode_jpeg(&frame, self.jpeg_quality)?;
        info!(
            width = frame.width(),
            height = frame.height(),
            bytes = bytes.len(),
            "camera snapshot taken"
        );
        Ok(ImagePayload::from_encoded_as(&bytes, ImageFormat::Jpeg))
    }

    /// Give up without taking a photo.
    pub fn cancel(mut self) {
        debug!("camera session cancelled");
        self.release();
    }

    fn release(&mut self) {
        if let Some(mut device) = self.device.take() {
            device.stop();
            info!("camera released");
        }
    }
}

impl Drop for CameraSession {
    fn drop(&mut self) {
        self.release();
    }
}

fn encode_jpeg(frame: &RgbImage, quality: u8) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    JpegEncoder::new_with_quality(&mut out, quality)
        .encode_image(frame)
        .map_err(|err| BelegwerkError::ImageDecode(format!("failed to encode frame: {err}")))?;
    Ok(out)
}

// -- File selection -----------------------------------------------------------

/// Read a user-chosen image file fully into memory as a payload.
///
/// The header is decoded up front so that a non-image file fails here, at
/// capture time, rather than at detection.
#[instrument(skip_all, fields(path = %path.display()))]
pub fn read_image_file(path: &Path) -> Result<ImagePayload> {
    let bytes = std::fs::read(path)
        .map_err(|e| BelegwerkError::FileRead(format!("{}: {e}", path.display())))?;

    let (width, height) = ImageReader::new(Cursor::new(&bytes))
        .with_guessed_format()?
        .into_dimensions()
        .map_err(|err| BelegwerkError::ImageDecode(format!("{}: {err}", path.display())))?;

    let payload = ImagePayload::from_encoded(&bytes)?;
    info!(width, height, bytes = bytes.len(), "image file loaded");
    Ok(payload)
}

// -- Strategy -----------------------------------------------------------------

/// How a photo is obtained. Either way the result is the same payload shape.
pub enum CaptureSource {
    /// Snapshot the running camera session.
    LiveCamera(CameraSession),
    /// Load a file the user picked.
    File(PathBuf),
}

impl CaptureSource {
    /// Produce the image. Consumes the source so a camera is always released.
    pub fn acquire(self) -> Result<ImagePayload> {
        match self {
            Self::LiveCamera(session) => session.snapshot(),
            Self::File(path) => read_image_file(&path),
        }
    }
}
