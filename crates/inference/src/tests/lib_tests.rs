use super::*;
use shared::error::{ApiError, ErrorCode};

const PNG_SIGNATURE_URI: &str = "data:image/png;base64,iVBORw0KGgo=";

fn request(mode: Mode, garment: Option<&str>) -> SubmitRequest {
    SubmitRequest {
        model: Some(ModelImage::new("lebron.png")),
        garment: garment.map(ImageRef::from),
        mode,
        condition: GarmentCondition::Upper,
    }
}

fn relay(backend: Arc<dyn TryOnBackend>, timeout: Duration) -> SubmitRelay {
    SubmitRelay::new(backend, timeout, DEFAULT_MAX_IMAGE_BYTES)
}

struct SlowBackend;

#[async_trait]
impl TryOnBackend for SlowBackend {
    fn name(&self) -> &'static str {
        "slow"
    }

    async fn run(&self, _job: &TryOnJob) -> Result<ImageRef, InferenceError> {
        tokio::time::sleep(Duration::from_millis(500)).await;
        Ok(ImageRef::from("late.png"))
    }
}

struct RejectingBackend;

#[async_trait]
impl TryOnBackend for RejectingBackend {
    fn name(&self) -> &'static str {
        "rejecting"
    }

    async fn run(&self, _job: &TryOnJob) -> Result<ImageRef, InferenceError> {
        Err(InferenceError::Rejected("no person detected".into()))
    }
}

#[test]
fn try_on_job_requires_model_and_garment() {
    let mut req = request(Mode::TryOn, Some("warriors23.jpg"));
    req.model = None;
    let err = TryOnJob::from_request(req, DEFAULT_MAX_IMAGE_BYTES).expect_err("should fail");
    assert_eq!(err.code(), ErrorCode::InputInvalid);

    let err = TryOnJob::from_request(request(Mode::TryOn, None), DEFAULT_MAX_IMAGE_BYTES)
        .expect_err("should fail");
    assert_eq!(err.code(), ErrorCode::InputInvalid);
}

#[test]
fn try_off_job_drops_garment() {
    let job = TryOnJob::from_request(
        request(Mode::TryOff, Some("warriors23.jpg")),
        DEFAULT_MAX_IMAGE_BYTES,
    )
    .expect("job");
    assert_eq!(job.mode, Mode::TryOff);
    assert!(job.garment.is_none());
}

#[test]
fn data_uri_images_are_checked() {
    let mut req = request(Mode::TryOff, None);
    req.model = Some(ModelImage::new(PNG_SIGNATURE_URI));
    assert!(TryOnJob::from_request(req.clone(), DEFAULT_MAX_IMAGE_BYTES).is_ok());

    let err = TryOnJob::from_request(req, 4).expect_err("too large");
    assert!(err.to_string().contains("exceeds 4 bytes"));

    let mut bad = request(Mode::TryOff, None);
    bad.model = Some(ModelImage::new("data:image/png;base64,***"));
    assert!(TryOnJob::from_request(bad, DEFAULT_MAX_IMAGE_BYTES).is_err());

    let mut not_image = request(Mode::TryOff, None);
    not_image.model = Some(ModelImage::new("data:text/plain;base64,aGVsbG8="));
    assert!(TryOnJob::from_request(not_image, DEFAULT_MAX_IMAGE_BYTES).is_err());
}

#[test]
fn unbounded_image_limit_accepts_data_uri() {
    let mut req = request(Mode::TryOn, Some(PNG_SIGNATURE_URI));
    req.model = Some(ModelImage::new(PNG_SIGNATURE_URI));
    let job = TryOnJob::from_request(req, usize::MAX).expect("job");
    assert_eq!(job.garment, Some(ImageRef::from(PNG_SIGNATURE_URI)));
}

#[test]
fn mask_layers_are_validated() {
    let mut req = request(Mode::TryOff, None);
    req.model = Some(ModelImage {
        background: ImageRef::from("lebron.png"),
        layers: vec![ImageRef::from("  ")],
    });
    let err = TryOnJob::from_request(req, DEFAULT_MAX_IMAGE_BYTES).expect_err("blank layer");
    assert!(err.to_string().contains("mask layer"));
}

#[tokio::test]
async fn placeholder_returns_configured_image() {
    let relay = relay(
        Arc::new(PlaceholderBackend::new("thumbs-up.jpg")),
        Duration::from_secs(1),
    );
    let response = relay
        .submit(request(Mode::TryOn, Some("warriors23.jpg")))
        .await
        .expect("submit");
    assert_eq!(response.output, ImageRef::from("thumbs-up.jpg"));
    assert_eq!(relay.backend_name(), "placeholder");
}

#[tokio::test]
async fn slow_backend_is_reported_unavailable() {
    let relay = relay(Arc::new(SlowBackend), Duration::from_millis(20));
    let err = relay
        .submit(request(Mode::TryOff, None))
        .await
        .expect_err("should time out");
    assert_eq!(err.code(), ErrorCode::InferenceUnavailable);
}

#[tokio::test]
async fn backend_rejection_maps_to_api_error() {
    let relay = relay(Arc::new(RejectingBackend), Duration::from_secs(1));
    let err = relay
        .submit(request(Mode::TryOff, None))
        .await
        .expect_err("should be rejected");
    let api: ApiError = err.into();
    assert_eq!(api.code, ErrorCode::InferenceRejected);
    assert!(api.message.contains("no person detected"));
}
