// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Application configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::Result;

/// Environment variable overriding [`AppConfig::api_base_url`].
pub const API_URL_ENV: &str = "BELEGWERK_API_URL";

/// Which physical camera to prefer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CameraFacing {
    /// Rear ("environment") camera, the one pointed at documents.
    Rear,
    Front,
}

/// Persistent application settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Base URL of the remote image service, e.g. `http://localhost:5000/api`.
    pub api_base_url: String,
    /// Per-request timeout for the image service.
    pub request_timeout_secs: u64,
    /// Contour handle pick radius in display pixels.
    pub pick_radius: f64,
    /// Requested camera width; the device may grant less.
    pub camera_ideal_width: u32,
    /// Requested camera height; the device may grant less.
    pub camera_ideal_height: u32,
    pub camera_facing: CameraFacing,
    /// JPEG quality (1-100) for camera snapshots.
    pub jpeg_quality: u8,
    /// Prefix of the suggested upload filename.
    pub filename_prefix: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:5000/api".into(),
            request_timeout_secs: 60,
            pick_radius: 30.0,
            camera_ideal_width: 1920,
            camera_ideal_height: 1080,
            camera_facing: CameraFacing::Rear,
            jpeg_quality: 90,
            filename_prefix: "receipt".into(),
        }
    }
}

impl AppConfig {
    /// Load settings from a JSON file, falling back to defaults when the file
    /// is missing or unreadable.
    pub fn load_or_default(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(data) => match serde_json::from_str(&data) {
                Ok(config) => {
                    debug!(path = %path.display(), "config loaded");
                    config
                }
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "config unreadable, using defaults");
                    Self::default()
                }
            },
            Err(e) => {
                debug!(path = %path.display(), error = %e, "no config file, using defaults");
                Self::default()
            }
        }
    }

    /// Write settings as pretty JSON.
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Apply the `BELEGWERK_API_URL` override, if set and non-empty.
    pub fn with_env_overrides(self) -> Self {
        let url = std::env::var(API_URL_ENV).ok();
        self.with_api_url_override(url)
    }

    fn with_api_url_override(mut self, url: Option<String>) -> Self {
        if let Some(url) = url.map(|u| u.trim().to_string()).filter(|u| !u.is_empty()) {
            debug!(url = %url, "api base url overridden from environment");
            self.api_base_url = url;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_capture_targets() {
        let config = AppConfig::default();
        assert_eq!((config.camera_ideal_width, config.camera_ideal_height), (1920, 1080));
        assert_eq!(config.pick_radius, 30.0);
        assert_eq!(config.camera_facing, CameraFacing::Rear);
    }

    #[test]
    fn save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        let config = AppConfig {
            api_base_url: "https://receipts.example/api".into(),
            jpeg_quality: 75,
            ..Default::default()
        };
        config.save(&path).unwrap();
        assert_eq!(AppConfig::load_or_default(&path), config);
    }

    #[test]
    fn missing_or_corrupt_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.json");
        assert_eq!(AppConfig::load_or_default(&missing), AppConfig::default());

        let corrupt = dir.path().join("bad.json");
        std::fs::write(&corrupt, "{ not json").unwrap();
        assert_eq!(AppConfig::load_or_default(&corrupt), AppConfig::default());
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{ "pick_radius": 44.0 }"#).unwrap();
        let config = AppConfig::load_or_default(&path);
        assert_eq!(config.pick_radius, 44.0);
        assert_eq!(config.request_timeout_secs, 60);
    }

    #[test]
    fn blank_override_is_ignored() {
        let config = AppConfig::default().with_api_url_override(Some("  ".into()));
        assert_eq!(config.api_base_url, AppConfig::default().api_base_url);

        let config = AppConfig::default().with_api_url_override(Some("http://h/api".into()));
        assert_eq!(config.api_base_url, "http://h/api");
    }
}
