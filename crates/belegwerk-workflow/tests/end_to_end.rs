// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Full receipt flow against an in-memory image service.

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use belegwerk_core::error::{BelegwerkError, Result};
use belegwerk_core::{
    Adjustments, Contour, Detection, ImagePayload, Point, ReceiptCandidate, UploadReceipt,
};
use belegwerk_remote::RemoteImageService;
use belegwerk_workflow::{StepKind, WorkflowController, WorkflowState};

/// Records what the workflow sent and answers from canned data.
#[derive(Default)]
struct FakeService {
    contours: Vec<Contour>,
    fail_process: bool,
    authenticated: bool,
    processed: Mutex<Vec<(Contour, Adjustments)>>,
    uploads: Mutex<Vec<String>>,
    calls: AtomicUsize,
}

impl FakeService {
    fn with_contours(contours: Vec<Contour>) -> Self {
        Self {
            contours,
            authenticated: true,
            ..Self::default()
        }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl RemoteImageService for FakeService {
    async fn detect_contours(&self, _image: &ImagePayload) -> Result<Detection> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.contours.is_empty() {
            return Err(BelegwerkError::remote("detect", "No receipt found"));
        }
        Ok(Detection {
            candidates: self
                .contours
                .iter()
                .map(|c| ReceiptCandidate::new(*c, c.area()))
                .collect(),
            preview: ImagePayload::from_data_uri("data:image/jpeg;base64,PREVIEW"),
        })
    }

    async fn process_image(
        &self,
        _image: &ImagePayload,
        contour: &Contour,
        adjustments: &Adjustments,
    ) -> Result<ImagePayload> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_process {
            return Err(BelegwerkError::remote("process", "Processing failed"));
        }
        self.processed
            .lock()
            .unwrap()
            .push((*contour, *adjustments));
        Ok(ImagePayload::from_data_uri("data:image/jpeg;base64,PROCESSED"))
    }

    async fn upload_image(&self, _image: &ImagePayload, filename: &str) -> Result<UploadReceipt> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.uploads.lock().unwrap().push(filename.to_string());
        Ok(UploadReceipt {
            file_id: Some("file-1".into()),
            link: Some("https://drive.example/file-1".into()),
        })
    }

    async fn auth_status(&self) -> bool {
        self.authenticated
    }

    async fn auth_url(&self) -> Result<String> {
        Ok("https://accounts.example/authorize".into())
    }

    async fn health(&self) -> Result<()> {
        Ok(())
    }
}

fn photo() -> ImagePayload {
    ImagePayload::from_data_uri("data:image/jpeg;base64,/9j/PHOTO")
}

fn receipt_contour() -> Contour {
    Contour::try_from(vec![[10.0, 10.0], [100.0, 10.0], [100.0, 200.0], [10.0, 200.0]]).unwrap()
}

fn square(side: f64) -> Contour {
    Contour::new([
        Point::new(0.0, 0.0),
        Point::new(side, 0.0),
        Point::new(side, side),
        Point::new(0.0, side),
    ])
}

#[tokio::test]
async fn capture_to_complete() {
    let service = FakeService::with_contours(vec![receipt_contour()]);
    let mut ctrl = WorkflowController::new();

    assert!(ctrl.refresh_auth(&service).await);

    ctrl.capture(&service, photo()).await.unwrap();
    assert_eq!(ctrl.step(), StepKind::Preview);
    assert_eq!(ctrl.state().chosen_contour(), Some(&receipt_contour()));

    ctrl.confirm_contour().unwrap();
    assert_eq!(ctrl.step(), StepKind::Adjust);

    let adjustments = Adjustments::new(10, 1.2, true).unwrap();
    ctrl.process(&service, adjustments).await.unwrap();
    assert_eq!(ctrl.step(), StepKind::Confirm);
    assert_eq!(
        service.processed.lock().unwrap().as_slice(),
        &[(receipt_contour(), adjustments)]
    );

    ctrl.upload(&service, "receipt_test.jpg").await.unwrap();
    assert_eq!(ctrl.step(), StepKind::Complete);
    assert_eq!(
        service.uploads.lock().unwrap().as_slice(),
        ["receipt_test.jpg".to_string()]
    );
    let receipt = ctrl.state().upload_receipt().unwrap();
    assert_eq!(receipt.link.as_deref(), Some("https://drive.example/file-1"));
    assert!(ctrl.state().error().is_none());

    ctrl.start_over();
    assert_eq!(ctrl.step(), StepKind::Capture);
    assert!(ctrl.state().processed_image().is_none());
    assert!(ctrl.state().upload_receipt().is_none());
    assert!(ctrl.state().authenticated());
    assert_eq!(without_sign_in(&ctrl), WorkflowState::default());
}

#[tokio::test]
async fn three_receipts_then_pick_the_middle_one() {
    let contours = vec![square(300.0), square(200.0), square(100.0)];
    let service = FakeService::with_contours(contours.clone());
    let mut ctrl = WorkflowController::new();

    ctrl.capture(&service, photo()).await.unwrap();
    assert_eq!(ctrl.step(), StepKind::Select);
    assert_eq!(ctrl.state().candidates().len(), 3);

    ctrl.select_candidate(1).unwrap();
    assert_eq!(ctrl.state().chosen_contour(), Some(&contours[1]));
}

#[tokio::test]
async fn dragged_outline_is_what_gets_processed() {
    let service = FakeService::with_contours(vec![receipt_contour()]);
    let mut ctrl = WorkflowController::new();
    ctrl.capture(&service, photo()).await.unwrap();

    let edited = receipt_contour()
        .with_vertex(0, Point::new(5.0, 8.0))
        .unwrap();
    ctrl.update_contour(edited).unwrap();
    ctrl.confirm_contour().unwrap();
    ctrl.process(&service, Adjustments::default()).await.unwrap();

    let sent = service.processed.lock().unwrap();
    assert_eq!(sent[0].0, edited);
}

#[tokio::test]
async fn detection_failure_surfaces_and_allows_retry() {
    let service = FakeService::default();
    let mut ctrl = WorkflowController::new();

    assert!(ctrl.capture(&service, photo()).await.is_err());
    assert_eq!(ctrl.step(), StepKind::Capture);
    assert_eq!(ctrl.state().error(), Some("No receipt found"));

    let service = FakeService::with_contours(vec![receipt_contour()]);
    ctrl.capture(&service, photo()).await.unwrap();
    assert_eq!(ctrl.step(), StepKind::Preview);
    assert!(ctrl.state().error().is_none());
}

#[tokio::test]
async fn process_failure_stays_on_adjust() {
    let service = FakeService {
        fail_process: true,
        ..FakeService::with_contours(vec![receipt_contour()])
    };
    let mut ctrl = WorkflowController::new();
    ctrl.capture(&service, photo()).await.unwrap();
    ctrl.confirm_contour().unwrap();

    assert!(ctrl.process(&service, Adjustments::default()).await.is_err());
    assert_eq!(ctrl.step(), StepKind::Adjust);
    assert_eq!(ctrl.state().chosen_contour(), Some(&receipt_contour()));
    assert_eq!(ctrl.state().captured_image(), Some(&photo()));
    assert!(!ctrl.is_busy());
}

#[tokio::test]
async fn upload_while_signed_out_makes_no_call() {
    let service = FakeService {
        authenticated: false,
        ..FakeService::with_contours(vec![receipt_contour()])
    };
    let mut ctrl = WorkflowController::new();
    assert!(!ctrl.refresh_auth(&service).await);
    ctrl.capture(&service, photo()).await.unwrap();
    ctrl.confirm_contour().unwrap();
    ctrl.process(&service, Adjustments::default()).await.unwrap();
    let calls_before = service.calls();

    let err = ctrl.upload(&service, "receipt_test.jpg").await.unwrap_err();
    assert!(matches!(err, BelegwerkError::NotAuthenticated));
    assert_eq!(service.calls(), calls_before);
    assert_eq!(ctrl.step(), StepKind::Confirm);
    assert!(service.uploads.lock().unwrap().is_empty());
}

/// The state with the sign-in flag cleared; start over keeps sign-in.
fn without_sign_in(ctrl: &WorkflowController) -> WorkflowState {
    let mut ctrl = ctrl.clone();
    ctrl.set_authenticated(false);
    ctrl.state().clone()
}

/// Drive a fresh controller to `stop_at`, leaving an error in the slot.
async fn controller_at(stop_at: StepKind) -> WorkflowController {
    let contours = if stop_at == StepKind::Select {
        vec![square(300.0), receipt_contour()]
    } else {
        vec![receipt_contour()]
    };
    let service = FakeService::with_contours(contours);
    let mut ctrl = WorkflowController::new();
    ctrl.refresh_auth(&service).await;
    ctrl.capture(&service, photo()).await.unwrap();
    if stop_at == StepKind::Select {
        ctrl.set_error("left over");
        return ctrl;
    }
    if stop_at != StepKind::Preview {
        ctrl.confirm_contour().unwrap();
    }
    if matches!(
        stop_at,
        StepKind::Confirm | StepKind::Uploading | StepKind::Complete
    ) {
        ctrl.process(&service, Adjustments::default()).await.unwrap();
    }
    if stop_at == StepKind::Complete {
        ctrl.upload(&service, "receipt_test.jpg").await.unwrap();
    }
    ctrl.set_error("left over");
    ctrl
}

#[tokio::test]
async fn start_over_from_every_step_resets_state() {
    for stop_at in [
        StepKind::Select,
        StepKind::Preview,
        StepKind::Adjust,
        StepKind::Confirm,
        StepKind::Complete,
    ] {
        let mut ctrl = controller_at(stop_at).await;
        assert_eq!(ctrl.step(), stop_at);
        assert_eq!(ctrl.state().error(), Some("left over"));

        ctrl.start_over();
        assert!(ctrl.state().authenticated(), "sign-in kept from {stop_at}");
        assert_eq!(without_sign_in(&ctrl), WorkflowState::default(), "from {stop_at}");
        assert!(!ctrl.is_busy());
    }
}

#[tokio::test]
async fn start_over_while_uploading_orphans_the_request() {
    let mut ctrl = controller_at(StepKind::Confirm).await;
    let job = ctrl.begin_upload("receipt_test.jpg").unwrap();
    assert_eq!(ctrl.step(), StepKind::Uploading);
    assert!(ctrl.is_busy());

    ctrl.start_over();
    assert_eq!(without_sign_in(&ctrl), WorkflowState::default());
    assert!(!ctrl.is_busy());

    let late = ctrl.finish_upload(job.ticket, Ok(UploadReceipt::default()));
    assert!(matches!(late, Err(BelegwerkError::StaleResponse)));
    assert_eq!(without_sign_in(&ctrl), WorkflowState::default());
}
