// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for Belegwerk.

use thiserror::Error;

/// Top-level error type for all Belegwerk operations.
#[derive(Debug, Error)]
pub enum BelegwerkError {
    // -- Device errors --
    #[error("camera unavailable: {0}")]
    CameraUnavailable(String),

    #[error("camera permission denied")]
    CameraPermissionDenied,

    #[error("failed to read image file: {0}")]
    FileRead(String),

    #[error("image decoding failed: {0}")]
    ImageDecode(String),

    #[error("feature not available on this platform")]
    PlatformUnavailable,

    // -- Remote service errors --
    #[error("{operation} failed: {message}")]
    Remote {
        operation: &'static str,
        message: String,
    },

    #[error("could not reach the image service: {0}")]
    Transport(String),

    #[error("unexpected response from the image service: {0}")]
    InvalidResponse(String),

    // -- Validation errors --
    #[error("a contour needs exactly 4 points, got {0}")]
    InvalidContour(usize),

    #[error("invalid adjustment: {0}")]
    InvalidAdjustment(String),

    #[error("file name is empty")]
    EmptyFilename,

    #[error("not authenticated")]
    NotAuthenticated,

    #[error("candidate {index} out of range ({count} detected)")]
    CandidateOutOfRange { index: usize, count: usize },

    // -- Workflow errors --
    #[error("cannot {action} while in step {step}")]
    InvalidTransition {
        step: &'static str,
        action: &'static str,
    },

    #[error("another request is still in flight")]
    RequestPending,

    #[error("response belongs to a request that is no longer current")]
    StaleResponse,

    // -- Storage / persistence --
    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl BelegwerkError {
    /// Shorthand for a failure reported by the remote image service.
    pub fn remote(operation: &'static str, message: impl Into<String>) -> Self {
        Self::Remote {
            operation,
            message: message.into(),
        }
    }
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, BelegwerkError>;
