// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// belegwerk-remote — Contract and HTTP client for the remote image service
// that detects receipt outlines, corrects photos, and uploads them to cloud
// storage.

pub mod http;
pub mod service;
pub mod wire;

pub use http::HttpImageService;
pub use service::RemoteImageService;
