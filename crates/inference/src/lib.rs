use std::{sync::Arc, time::Duration};

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use chrono::Utc;
use shared::{
    domain::{GarmentCondition, ImageRef, Mode, ModelImage},
    error::InferenceError,
    protocol::{SubmitRequest, SubmitResponse},
};
use tracing::{info, warn};
use uuid::Uuid;

pub const DEFAULT_MAX_IMAGE_BYTES: usize = 8 * 1024 * 1024;

/// A validated submit: the model image is present, a try-on job carries a
/// garment and a try-off job never does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TryOnJob {
    pub model: ModelImage,
    pub garment: Option<ImageRef>,
    pub mode: Mode,
    pub condition: GarmentCondition,
}

impl TryOnJob {
    pub fn from_request(req: SubmitRequest, max_image_bytes: usize) -> Result<Self, InferenceError> {
        let model = req
            .model
            .ok_or_else(|| InferenceError::InputInvalid("model image is required".into()))?;
        check_image(&model.background, "model image", max_image_bytes)?;
        for layer in &model.layers {
            check_image(layer, "mask layer", max_image_bytes)?;
        }

        let garment = match req.mode {
            Mode::TryOn => {
                let garment = req.garment.ok_or_else(|| {
                    InferenceError::InputInvalid("garment image is required for try-on".into())
                })?;
                check_image(&garment, "garment image", max_image_bytes)?;
                Some(garment)
            }
            Mode::TryOff => None,
        };

        Ok(Self {
            model,
            garment,
            mode: req.mode,
            condition: req.condition,
        })
    }
}

fn check_image(image: &ImageRef, what: &str, max_image_bytes: usize) -> Result<(), InferenceError> {
    if image.as_str().trim().is_empty() {
        return Err(InferenceError::InputInvalid(format!("{what} reference is empty")));
    }
    if !image.is_data_uri() {
        return Ok(());
    }

    let (meta, payload) = image
        .as_str()
        .trim_start_matches("data:")
        .split_once(',')
        .ok_or_else(|| InferenceError::InputInvalid(format!("{what} is a malformed data URI")))?;
    if !meta.starts_with("image/") {
        return Err(InferenceError::InputInvalid(format!("{what} is not an image")));
    }
    if !meta.ends_with(";base64") {
        return Err(InferenceError::InputInvalid(format!(
            "{what} must be base64 encoded"
        )));
    }
    // Decoded size is at most 3/4 of the encoded length; reject early before decoding.
    if payload.len() / 4 * 3 > max_image_bytes.saturating_add(2) {
        return Err(InferenceError::InputInvalid(format!(
            "{what} exceeds {max_image_bytes} bytes"
        )));
    }
    let bytes = STANDARD
        .decode(payload)
        .map_err(|_| InferenceError::InputInvalid(format!("{what} has invalid base64 data")))?;
    if bytes.is_empty() {
        return Err(InferenceError::InputInvalid(format!("{what} is empty")));
    }
    if bytes.len() > max_image_bytes {
        return Err(InferenceError::InputInvalid(format!(
            "{what} exceeds {max_image_bytes} bytes"
        )));
    }
    Ok(())
}

#[async_trait]
pub trait TryOnBackend: Send + Sync {
    fn name(&self) -> &'static str;
    async fn run(&self, job: &TryOnJob) -> Result<ImageRef, InferenceError>;
}

/// Stands in for the model: every valid job yields the same image.
#[derive(Debug, Clone)]
pub struct PlaceholderBackend {
    output: ImageRef,
}

impl PlaceholderBackend {
    pub fn new(output: impl Into<ImageRef>) -> Self {
        Self {
            output: output.into(),
        }
    }
}

#[async_trait]
impl TryOnBackend for PlaceholderBackend {
    fn name(&self) -> &'static str {
        "placeholder"
    }

    async fn run(&self, _job: &TryOnJob) -> Result<ImageRef, InferenceError> {
        Ok(self.output.clone())
    }
}

#[derive(Clone)]
pub struct SubmitRelay {
    backend: Arc<dyn TryOnBackend>,
    timeout: Duration,
    max_image_bytes: usize,
}

impl SubmitRelay {
    pub fn new(backend: Arc<dyn TryOnBackend>, timeout: Duration, max_image_bytes: usize) -> Self {
        Self {
            backend,
            timeout,
            max_image_bytes,
        }
    }

    pub fn backend_name(&self) -> &'static str {
        self.backend.name()
    }

    pub async fn submit(&self, req: SubmitRequest) -> Result<SubmitResponse, InferenceError> {
        let request_id = Uuid::new_v4();
        let result = self.run_job(req).await;
        match result {
            Ok(output) => {
                info!(%request_id, backend = self.backend.name(), "submit completed");
                Ok(SubmitResponse {
                    request_id,
                    output,
                    completed_at: Utc::now(),
                })
            }
            Err(error) => {
                warn!(%request_id, backend = self.backend.name(), %error, "submit failed");
                Err(error)
            }
        }
    }

    async fn run_job(&self, req: SubmitRequest) -> Result<ImageRef, InferenceError> {
        let job = TryOnJob::from_request(req, self.max_image_bytes)?;
        tokio::time::timeout(self.timeout, self.backend.run(&job))
            .await
            .map_err(|_| {
                InferenceError::Unavailable(format!(
                    "no result within {} ms",
                    self.timeout.as_millis()
                ))
            })?
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
