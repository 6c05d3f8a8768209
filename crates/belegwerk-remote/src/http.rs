// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// HTTP/JSON implementation of the remote image service.

use std::time::Duration;

use belegwerk_core::error::{BelegwerkError, Result};
use belegwerk_core::{AppConfig, Adjustments, Contour, Detection, ImagePayload, UploadReceipt};
use reqwest::{Client, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, info, instrument, warn};

use crate::service::RemoteImageService;
use crate::wire::{
    self, AuthStatusResponse, AuthUrlResponse, DetectRequest, DetectResponse, ErrorBody,
    HealthResponse, ProcessRequest, ProcessResponse, UploadRequest, UploadResponse,
};

/// Client for the image service rooted at `base_url` (e.g. `http://host:5000/api`).
#[derive(Debug, Clone)]
pub struct HttpImageService {
    client: Client,
    base_url: String,
}

impl HttpImageService {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("belegwerk/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()
            .map_err(|e| BelegwerkError::Transport(format!("failed to build HTTP client: {e}")))?;
        let base_url = base_url.into().trim_end_matches('/').to_string();
        info!(%base_url, "image service client ready");
        Ok(Self { client, base_url })
    }

    pub fn from_config(config: &AppConfig) -> Result<Self> {
        Self::new(
            config.api_base_url.clone(),
            Duration::from_secs(config.request_timeout_secs),
        )
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn post_json<B, R>(
        &self,
        path: &str,
        operation: &'static str,
        fallback: &str,
        body: &B,
    ) -> Result<R>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let response = self
            .client
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .map_err(transport)?;
        read_json(response, operation, fallback).await
    }

    async fn get_json<R: DeserializeOwned>(
        &self,
        path: &str,
        operation: &'static str,
        fallback: &str,
    ) -> Result<R> {
        let response = self
            .client
            .get(self.url(path))
            .send()
            .await
            .map_err(transport)?;
        read_json(response, operation, fallback).await
    }
}

fn transport(err: reqwest::Error) -> BelegwerkError {
    warn!(error = %err, "image service unreachable");
    BelegwerkError::Transport(err.to_string())
}

/// Decode a 2xx body as `R`; anything else becomes a remote failure with the
/// server's `error` field when it sent one.
async fn read_json<R: DeserializeOwned>(
    response: Response,
    operation: &'static str,
    fallback: &str,
) -> Result<R> {
    let status = response.status();
    if !status.is_success() {
        let text = response.text().await.unwrap_or_default();
        let body: ErrorBody = serde_json::from_str(&text).unwrap_or_default();
        warn!(operation, %status, "image service returned an error");
        return Err(wire::remote_failure(operation, body.error, fallback));
    }
    response
        .json::<R>()
        .await
        .map_err(|e| BelegwerkError::InvalidResponse(format!("{operation}: {e}")))
}

impl RemoteImageService for HttpImageService {
    #[instrument(skip_all, fields(image = ?image))]
    async fn detect_contours(&self, image: &ImagePayload) -> Result<Detection> {
        let body = DetectRequest {
            image: image.as_str(),
        };
        let reply: DetectResponse = self
            .post_json("detect-contour", "detect", wire::DETECT_FALLBACK, &body)
            .await?;
        let detection = reply.into_detection()?;
        info!(candidates = detection.candidates.len(), "contours detected");
        Ok(detection)
    }

    #[instrument(skip_all, fields(adjustments = ?adjustments))]
    async fn process_image(
        &self,
        image: &ImagePayload,
        contour: &Contour,
        adjustments: &Adjustments,
    ) -> Result<ImagePayload> {
        adjustments.validate()?;
        let body = ProcessRequest {
            image: image.as_str(),
            contour: contour.to_pairs(),
            brightness: adjustments.brightness,
            contrast: adjustments.contrast,
            denoise: adjustments.denoise,
        };
        let reply: ProcessResponse = self
            .post_json("process-image", "process", wire::PROCESS_FALLBACK, &body)
            .await?;
        let processed = reply.into_image()?;
        info!(bytes = processed.len(), "image processed");
        Ok(processed)
    }

    #[instrument(skip(self, image))]
    async fn upload_image(&self, image: &ImagePayload, filename: &str) -> Result<UploadReceipt> {
        let body = UploadRequest {
            image: image.as_str(),
            filename,
        };
        let reply: UploadResponse = self
            .post_json("upload-to-drive", "upload", wire::UPLOAD_FALLBACK, &body)
            .await?;
        let receipt = reply.into_receipt()?;
        info!(file_id = ?receipt.file_id, "image uploaded");
        Ok(receipt)
    }

    #[instrument(skip(self))]
    async fn auth_status(&self) -> bool {
        match self
            .get_json::<AuthStatusResponse>("auth/status", "auth status", wire::AUTH_FALLBACK)
            .await
        {
            Ok(reply) => {
                debug!(authenticated = reply.authenticated, "auth status");
                reply.authenticated
            }
            Err(err) => {
                debug!(error = %err, "auth status unknown, treating as signed out");
                false
            }
        }
    }

    #[instrument(skip(self))]
    async fn auth_url(&self) -> Result<String> {
        let reply: AuthUrlResponse = self
            .get_json("auth/url", "authorization", wire::AUTH_FALLBACK)
            .await?;
        Ok(reply.auth_url)
    }

    #[instrument(skip(self))]
    async fn health(&self) -> Result<()> {
        let reply: HealthResponse = self
            .get_json("health", "health", wire::HEALTH_FALLBACK)
            .await?;
        reply.into_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Nothing listens on the discard port locally.
    const UNREACHABLE: &str = "http://127.0.0.1:9/api";

    fn service(base: &str) -> HttpImageService {
        HttpImageService::new(base, Duration::from_secs(2)).unwrap()
    }

    #[test]
    fn url_joining_ignores_slashes() {
        let svc = service("http://localhost:5000/api/");
        assert_eq!(svc.base_url(), "http://localhost:5000/api");
        assert_eq!(
            svc.url("detect-contour"),
            "http://localhost:5000/api/detect-contour"
        );
        assert_eq!(svc.url("/auth/status"), "http://localhost:5000/api/auth/status");
    }

    #[test]
    fn built_from_config() {
        let svc = HttpImageService::from_config(&AppConfig::default()).unwrap();
        assert_eq!(svc.base_url(), "http://localhost:5000/api");
    }

    #[tokio::test]
    async fn auth_status_degrades_to_false() {
        assert!(!service(UNREACHABLE).auth_status().await);
    }

    #[tokio::test]
    async fn unreachable_health_is_transport_error() {
        let result = service(UNREACHABLE).health().await;
        assert!(matches!(result, Err(BelegwerkError::Transport(_))));
    }

    #[tokio::test]
    async fn invalid_adjustments_never_hit_the_network() {
        let contour = Contour::try_from(vec![[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]]).unwrap();
        let bad = Adjustments {
            brightness: 80,
            ..Adjustments::default()
        };
        let result = service(UNREACHABLE)
            .process_image(&ImagePayload::from_data_uri("AAAA"), &contour, &bad)
            .await;
        assert!(matches!(result, Err(BelegwerkError::InvalidAdjustment(_))));
    }
}
