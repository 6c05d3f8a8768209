// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Central service layer — loads configuration, builds the image service
// client and the platform bridge, and hands them to the Dioxus UI.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use belegwerk_bridge::{CameraConstraints, PlatformBridge, platform_bridge};
use belegwerk_core::AppConfig;
use belegwerk_core::error::Result;
use belegwerk_remote::HttpImageService;
use tracing::{info, warn};

use super::data_dir;

const CONFIG_FILE: &str = "config.json";

/// Shared application services accessible from all components via
/// `use_context::<AppServices>()`. Cheap to clone.
#[derive(Clone)]
pub struct AppServices {
    remote: HttpImageService,
    bridge: Arc<dyn PlatformBridge>,
    config: Arc<AppConfig>,
    data_dir: PathBuf,
}

impl AppServices {
    /// Initialise all services. Call once at app startup.
    pub fn init() -> Result<Self> {
        let dir = data_dir::data_dir();
        info!(path = %dir.display(), "initialising app services");

        let config = load_config(&dir);
        let remote = HttpImageService::from_config(&config)?;
        let bridge: Arc<dyn PlatformBridge> = Arc::from(platform_bridge());
        info!(
            platform = bridge.platform_name(),
            api = %config.api_base_url,
            "app services initialised"
        );

        Ok(Self {
            remote,
            bridge,
            config: Arc::new(config),
            data_dir: dir,
        })
    }

    pub fn remote(&self) -> &HttpImageService {
        &self.remote
    }

    pub fn bridge(&self) -> &dyn PlatformBridge {
        self.bridge.as_ref()
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn camera_constraints(&self) -> CameraConstraints {
        CameraConstraints::from_config(&self.config)
    }

    /// Where the settings file lives, shown when the service is unreachable.
    pub fn config_path(&self) -> PathBuf {
        self.data_dir.join(CONFIG_FILE)
    }
}

/// Load `config.json`, writing the defaults out on first run so they can be
/// edited by hand. The environment override is applied last and never saved.
fn load_config(dir: &Path) -> AppConfig {
    let path = dir.join(CONFIG_FILE);
    let config = AppConfig::load_or_default(&path);
    if !path.exists()
        && let Err(e) = config.save(&path)
    {
        warn!(path = %path.display(), error = %e, "could not write default config");
    }
    config.with_env_overrides()
}
