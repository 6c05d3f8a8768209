// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Workflow state: one tagged variant per step, each carrying only the data
// that step needs.

use belegwerk_core::{Adjustments, Contour, ImagePayload, ReceiptCandidate, UploadReceipt};

/// Discriminant of [`Step`], for logging, errors, and UI dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StepKind {
    Capture,
    Select,
    Preview,
    Adjust,
    Confirm,
    Uploading,
    Complete,
}

impl StepKind {
    pub fn name(self) -> &'static str {
        match self {
            Self::Capture => "capture",
            Self::Select => "select",
            Self::Preview => "preview",
            Self::Adjust => "adjust",
            Self::Confirm => "confirm",
            Self::Uploading => "uploading",
            Self::Complete => "complete",
        }
    }
}

impl std::fmt::Display for StepKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// The active step and its data.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Step {
    /// Waiting for a photo.
    #[default]
    Capture,
    /// Several receipts were found; the user picks one.
    Select {
        image: ImagePayload,
        candidates: Vec<ReceiptCandidate>,
        /// Photo annotated with every outline.
        preview: ImagePayload,
    },
    /// The user refines the outline over the photo.
    Preview {
        image: ImagePayload,
        contour: Contour,
    },
    /// Tonal adjustments before processing.
    Adjust {
        image: ImagePayload,
        contour: Contour,
        adjustments: Adjustments,
    },
    /// Processed image shown; waiting for a filename and upload.
    Confirm {
        image: ImagePayload,
        contour: Contour,
        adjustments: Adjustments,
        processed: ImagePayload,
        /// Name from a failed upload attempt, offered again on retry.
        filename: Option<String>,
    },
    Uploading {
        image: ImagePayload,
        contour: Contour,
        adjustments: Adjustments,
        processed: ImagePayload,
        filename: String,
    },
    Complete {
        processed: ImagePayload,
        filename: String,
        receipt: UploadReceipt,
    },
}

impl Step {
    pub fn kind(&self) -> StepKind {
        match self {
            Self::Capture => StepKind::Capture,
            Self::Select { .. } => StepKind::Select,
            Self::Preview { .. } => StepKind::Preview,
            Self::Adjust { .. } => StepKind::Adjust,
            Self::Confirm { .. } => StepKind::Confirm,
            Self::Uploading { .. } => StepKind::Uploading,
            Self::Complete { .. } => StepKind::Complete,
        }
    }
}

/// Everything the UI renders from. Owned by the controller.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct WorkflowState {
    pub(crate) step: Step,
    pub(crate) authenticated: bool,
    pub(crate) error: Option<String>,
    /// Photo submitted for detection while still on the capture step.
    pub(crate) detecting: Option<ImagePayload>,
}

impl WorkflowState {
    pub fn step(&self) -> &Step {
        &self.step
    }

    pub fn kind(&self) -> StepKind {
        self.step.kind()
    }

    pub fn authenticated(&self) -> bool {
        self.authenticated
    }

    /// Current user-facing error, if any.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// The photo being worked on, if one has been captured.
    pub fn captured_image(&self) -> Option<&ImagePayload> {
        match &self.step {
            Step::Capture => self.detecting.as_ref(),
            Step::Select { image, .. }
            | Step::Preview { image, .. }
            | Step::Adjust { image, .. }
            | Step::Confirm { image, .. }
            | Step::Uploading { image, .. } => Some(image),
            Step::Complete { .. } => None,
        }
    }

    /// Detected candidates; only populated while selecting.
    pub fn candidates(&self) -> &[ReceiptCandidate] {
        match &self.step {
            Step::Select { candidates, .. } => candidates,
            _ => &[],
        }
    }

    pub fn chosen_contour(&self) -> Option<&Contour> {
        match &self.step {
            Step::Preview { contour, .. }
            | Step::Adjust { contour, .. }
            | Step::Confirm { contour, .. }
            | Step::Uploading { contour, .. } => Some(contour),
            _ => None,
        }
    }

    /// Annotated detection overlay; only populated while selecting.
    pub fn preview_image(&self) -> Option<&ImagePayload> {
        match &self.step {
            Step::Select { preview, .. } => Some(preview),
            _ => None,
        }
    }

    pub fn processed_image(&self) -> Option<&ImagePayload> {
        match &self.step {
            Step::Confirm { processed, .. }
            | Step::Uploading { processed, .. }
            | Step::Complete { processed, .. } => Some(processed),
            _ => None,
        }
    }

    pub fn adjustments(&self) -> Option<&Adjustments> {
        match &self.step {
            Step::Adjust { adjustments, .. }
            | Step::Confirm { adjustments, .. }
            | Step::Uploading { adjustments, .. } => Some(adjustments),
            _ => None,
        }
    }

    /// Upload filename: the one in flight or stored, or on confirm the name
    /// of an attempt that failed.
    pub fn filename(&self) -> Option<&str> {
        match &self.step {
            Step::Confirm { filename, .. } => filename.as_deref(),
            Step::Uploading { filename, .. } | Step::Complete { filename, .. } => Some(filename),
            _ => None,
        }
    }

    pub fn upload_receipt(&self) -> Option<&UploadReceipt> {
        match &self.step {
            Step::Complete { receipt, .. } => Some(receipt),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use belegwerk_core::Point;

    fn contour() -> Contour {
        Contour::new([
            Point::new(0.0, 0.0),
            Point::new(4.0, 0.0),
            Point::new(4.0, 3.0),
            Point::new(0.0, 3.0),
        ])
    }

    #[test]
    fn initial_state_is_empty() {
        let state = WorkflowState::default();
        assert_eq!(state.kind(), StepKind::Capture);
        assert!(state.captured_image().is_none());
        assert!(state.candidates().is_empty());
        assert!(state.chosen_contour().is_none());
        assert!(state.processed_image().is_none());
        assert!(state.error().is_none());
        assert!(!state.authenticated());
    }

    #[test]
    fn accessors_follow_the_step() {
        let image = ImagePayload::from_data_uri("data:image/jpeg;base64,AAAA");
        let state = WorkflowState {
            step: Step::Adjust {
                image: image.clone(),
                contour: contour(),
                adjustments: Adjustments::default(),
            },
            ..WorkflowState::default()
        };
        assert_eq!(state.captured_image(), Some(&image));
        assert_eq!(state.chosen_contour(), Some(&contour()));
        assert!(state.processed_image().is_none());
        assert!(state.preview_image().is_none());
    }

    #[test]
    fn step_names() {
        assert_eq!(StepKind::Uploading.to_string(), "uploading");
        assert_eq!(Step::Capture.kind().name(), "capture");
    }
}
