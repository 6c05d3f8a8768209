// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Transport-agnostic contract of the remote image service.

use std::future::Future;

use belegwerk_core::error::Result;
use belegwerk_core::{Adjustments, Contour, Detection, ImagePayload, UploadReceipt};

/// Operations the workflow consumes but does not implement.
///
/// Every fallible call resolves to either a value or a `BelegwerkError`
/// carrying a user-facing message.
pub trait RemoteImageService {
    /// Find receipt outlines in `image`.
    ///
    /// On success the candidate list is non-empty and ordered largest area
    /// first; `preview` shows every outline drawn over the photo.
    fn detect_contours(&self, image: &ImagePayload)
    -> impl Future<Output = Result<Detection>> + Send;

    /// Crop `image` to `contour`, apply `adjustments`, return the result.
    fn process_image(
        &self,
        image: &ImagePayload,
        contour: &Contour,
        adjustments: &Adjustments,
    ) -> impl Future<Output = Result<ImagePayload>> + Send;

    /// Store the processed image under `filename`. Requires authorization.
    fn upload_image(
        &self,
        image: &ImagePayload,
        filename: &str,
    ) -> impl Future<Output = Result<UploadReceipt>> + Send;

    /// Best-effort probe: any failure reads as "not authenticated".
    fn auth_status(&self) -> impl Future<Output = bool> + Send;

    /// URL of the external authorization flow.
    fn auth_url(&self) -> impl Future<Output = Result<String>> + Send;

    /// Reachability check.
    fn health(&self) -> impl Future<Output = Result<()>> + Send;
}
