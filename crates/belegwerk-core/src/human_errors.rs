// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Human-readable error messages.
//
// Every technical error is mapped to plain English with a clear suggestion.
// Severity drives how the UI presents it.

use crate::error::BelegwerkError;

/// Severity of an error from the user's perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Network blip or service hiccup — trying again may work.
    Transient,
    /// User must do something (grant permission, enter a name, sign in).
    ActionRequired,
    /// Retrying the same input will not help.
    Permanent,
}

/// A human-readable error with plain English message and actionable suggestion.
#[derive(Debug, Clone)]
pub struct HumanError {
    /// Plain English summary (shown in the error slot).
    pub message: String,
    /// What the user should try.
    pub suggestion: String,
    /// Whether repeating the same action can succeed.
    pub retriable: bool,
    pub severity: Severity,
}

impl HumanError {
    fn new(message: impl Into<String>, suggestion: impl Into<String>, severity: Severity) -> Self {
        Self {
            message: message.into(),
            suggestion: suggestion.into(),
            retriable: severity == Severity::Transient,
            severity,
        }
    }
}

/// Convert a `BelegwerkError` into a `HumanError` for the error slot.
pub fn humanize_error(err: &BelegwerkError) -> HumanError {
    match err {
        // -- Device errors --
        BelegwerkError::CameraUnavailable(_) => HumanError::new(
            "The camera couldn't be started.",
            "Check that no other app is using the camera, or choose a photo from a file instead.",
            Severity::ActionRequired,
        ),

        BelegwerkError::CameraPermissionDenied => HumanError::new(
            "Camera access was denied.",
            "Allow camera access in your system settings, then try again.",
            Severity::ActionRequired,
        ),

        BelegwerkError::FileRead(_) | BelegwerkError::Io(_) => HumanError::new(
            "The file couldn't be read.",
            "It may have been moved or deleted. Try choosing the file again.",
            Severity::ActionRequired,
        ),

        BelegwerkError::ImageDecode(_) => HumanError::new(
            "There's a problem with this image.",
            "The image may be damaged or in an unusual format. Try a JPEG or PNG photo.",
            Severity::Permanent,
        ),

        BelegwerkError::PlatformUnavailable => HumanError::new(
            "The camera isn't available on this device.",
            "Choose a photo from a file instead.",
            Severity::Permanent,
        ),

        // -- Remote errors: the service already speaks to the user --
        BelegwerkError::Remote { message, .. } => HumanError::new(
            message.clone(),
            "Please try again.",
            Severity::Transient,
        ),

        BelegwerkError::Transport(_) => HumanError::new(
            "The image service couldn't be reached.",
            "Check your internet connection and that the service is running, then try again.",
            Severity::Transient,
        ),

        BelegwerkError::InvalidResponse(_) | BelegwerkError::Serialization(_) => HumanError::new(
            "The image service sent an unexpected reply.",
            "Try again. If this keeps happening, please report it.",
            Severity::Transient,
        ),

        // -- Validation errors --
        BelegwerkError::InvalidContour(_) => HumanError::new(
            "The receipt outline needs exactly four corners.",
            "Take the photo again so all four corners are visible.",
            Severity::ActionRequired,
        ),

        BelegwerkError::InvalidAdjustment(detail) => HumanError::new(
            "Those adjustment values are out of range.",
            format!("Use the sliders to pick a value. ({detail})"),
            Severity::ActionRequired,
        ),

        BelegwerkError::EmptyFilename => HumanError::new(
            "Please enter a file name.",
            "Type a name for the file, for example receipt_20240101_1234.jpg.",
            Severity::ActionRequired,
        ),

        BelegwerkError::NotAuthenticated => HumanError::new(
            "Not authenticated with cloud storage.",
            "Connect your storage account first, then upload again.",
            Severity::ActionRequired,
        ),

        BelegwerkError::CandidateOutOfRange { .. } => HumanError::new(
            "That receipt isn't in the list.",
            "Pick one of the detected receipts.",
            Severity::ActionRequired,
        ),

        // -- Workflow errors --
        BelegwerkError::InvalidTransition { .. } => HumanError::new(
            "That action isn't possible right now.",
            "Finish the current step first.",
            Severity::ActionRequired,
        ),

        BelegwerkError::RequestPending => HumanError::new(
            "Still working on the previous request.",
            "Wait for it to finish, then try again.",
            Severity::Transient,
        ),

        BelegwerkError::StaleResponse => HumanError::new(
            "A late reply was ignored.",
            "Nothing to do.",
            Severity::Transient,
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remote_message_passes_through() {
        let err = BelegwerkError::remote("process", "Contour is outside the image");
        let human = humanize_error(&err);
        assert_eq!(human.message, "Contour is outside the image");
        assert!(human.retriable);
    }

    #[test]
    fn not_authenticated_is_action_required() {
        let human = humanize_error(&BelegwerkError::NotAuthenticated);
        assert_eq!(human.severity, Severity::ActionRequired);
        assert!(human.message.to_lowercase().contains("not authenticated"));
        assert!(!human.retriable);
    }

    #[test]
    fn transport_is_transient() {
        let human = humanize_error(&BelegwerkError::Transport("connection refused".into()));
        assert_eq!(human.severity, Severity::Transient);
    }

    #[test]
    fn broken_image_is_permanent() {
        let human = humanize_error(&BelegwerkError::ImageDecode("truncated".into()));
        assert_eq!(human.severity, Severity::Permanent);
    }
}
