// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// JSON request/response bodies of the image service HTTP API, and their
// conversion into domain types.

use belegwerk_core::error::{BelegwerkError, Result};
use belegwerk_core::{Contour, Detection, ImagePayload, ReceiptCandidate, UploadReceipt};
use serde::{Deserialize, Serialize};
use tracing::warn;

pub const DETECT_FALLBACK: &str = "Contour detection failed";
pub const PROCESS_FALLBACK: &str = "Image processing failed";
pub const UPLOAD_FALLBACK: &str = "Upload failed";
pub const AUTH_FALLBACK: &str = "Authorization failed";
pub const HEALTH_FALLBACK: &str = "Image service is not healthy";

// -- Requests -----------------------------------------------------------------

/// `POST /detect-contour`.
#[derive(Debug, Serialize)]
pub struct DetectRequest<'a> {
    pub image: &'a str,
}

/// `POST /process-image`.
#[derive(Debug, Serialize)]
pub struct ProcessRequest<'a> {
    pub image: &'a str,
    pub contour: Vec<[f64; 2]>,
    pub brightness: i32,
    pub contrast: f64,
    pub denoise: bool,
}

/// `POST /upload-to-drive`.
#[derive(Debug, Serialize)]
pub struct UploadRequest<'a> {
    pub image: &'a str,
    pub filename: &'a str,
}

// -- Responses ----------------------------------------------------------------

/// Body of any non-2xx reply.
#[derive(Debug, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct WireReceipt {
    pub contour: Vec<[f64; 2]>,
    #[serde(default)]
    pub area: Option<f64>,
}

/// Reply to `POST /detect-contour`.
///
/// Current servers send `receipts` + `count`; older ones a single `contour`.
#[derive(Debug, Deserialize)]
pub struct DetectResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub receipts: Option<Vec<WireReceipt>>,
    #[serde(default)]
    pub count: Option<usize>,
    #[serde(default)]
    pub contour: Option<Vec<[f64; 2]>>,
    #[serde(default)]
    pub preview: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl DetectResponse {
    /// Validate and convert. Candidates come back sorted by descending area
    /// (stable, so equal areas keep server order).
    pub fn into_detection(self) -> Result<Detection> {
        if !self.success {
            return Err(remote_failure("detect", self.error, DETECT_FALLBACK));
        }

        let mut candidates = match (self.receipts, self.contour) {
            (Some(receipts), _) if !receipts.is_empty() => receipts
                .into_iter()
                .map(|r| {
                    let contour = Contour::try_from(r.contour)?;
                    let area = r.area.unwrap_or_else(|| contour.area());
                    Ok(ReceiptCandidate::new(contour, area))
                })
                .collect::<Result<Vec<_>>>()?,
            (_, Some(pairs)) => {
                let contour = Contour::try_from(pairs)?;
                vec![ReceiptCandidate::new(contour, contour.area())]
            }
            _ => return Err(remote_failure("detect", self.error, DETECT_FALLBACK)),
        };

        if let Some(count) = self.count
            && count != candidates.len()
        {
            warn!(count, received = candidates.len(), "detect count disagrees with receipts");
        }

        candidates.sort_by(|a, b| b.area().total_cmp(&a.area()));

        let preview = self
            .preview
            .filter(|p| !p.is_empty())
            .ok_or_else(|| BelegwerkError::InvalidResponse("detection reply has no preview".into()))?;

        Ok(Detection {
            candidates,
            preview: ImagePayload::from_data_uri(preview),
        })
    }
}

/// Reply to `POST /process-image`.
#[derive(Debug, Deserialize)]
pub struct ProcessResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub processed_image: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl ProcessResponse {
    pub fn into_image(self) -> Result<ImagePayload> {
        match (self.success, self.processed_image) {
            (true, Some(image)) if !image.is_empty() => Ok(ImagePayload::from_data_uri(image)),
            (_, _) => Err(remote_failure("process", self.error, PROCESS_FALLBACK)),
        }
    }
}

/// Reply to `POST /upload-to-drive`.
#[derive(Debug, Deserialize)]
pub struct UploadResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub file_id: Option<String>,
    #[serde(default)]
    pub web_view_link: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl UploadResponse {
    pub fn into_receipt(self) -> Result<UploadReceipt> {
        if !self.success {
            return Err(remote_failure("upload", self.error, UPLOAD_FALLBACK));
        }
        Ok(UploadReceipt {
            file_id: self.file_id,
            link: self.web_view_link,
        })
    }
}

/// Reply to `GET /auth/status`.
#[derive(Debug, Deserialize)]
pub struct AuthStatusResponse {
    #[serde(default)]
    pub authenticated: bool,
}

/// Reply to `GET /auth/url`.
#[derive(Debug, Deserialize)]
pub struct AuthUrlResponse {
    pub auth_url: String,
}

/// Reply to `GET /health`.
#[derive(Debug, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
}

impl HealthResponse {
    pub fn into_result(self) -> Result<()> {
        if self.status.eq_ignore_ascii_case("ok") {
            Ok(())
        } else {
            Err(remote_failure("health", self.message, HEALTH_FALLBACK))
        }
    }
}

/// Remote failure carrying the server's message, or `fallback` without one.
pub fn remote_failure(
    operation: &'static str,
    message: Option<String>,
    fallback: &str,
) -> BelegwerkError {
    let message = message
        .map(|m| m.trim().to_string())
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| fallback.to_string());
    BelegwerkError::remote(operation, message)
}
