use std::{net::SocketAddr, path::Path as FsPath, sync::Arc};

use anyhow::Context;
use axum::{
    extract::{DefaultBodyLimit, Path, State},
    http::StatusCode,
    response::Html,
    routing::{get, post},
    Json, Router,
};
use inference::{PlaceholderBackend, SubmitRelay};
use shared::{
    error::{ApiError, ErrorCode},
    protocol::{
        CorrectionUpdate, DemoLayout, GarmentChangedRequest, ModeUpdate, ModelChangedRequest,
        PresetSelection, SubmitRequest, SubmitResponse, ToggleChangedRequest, TryOffPreset,
        TryOnPreset,
    },
};
use tower_http::{limit::RequestBodyLimitLayer, services::ServeDir};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod app_state;
mod config;
mod layout;

use app_state::AppState;
use config::{load_settings, Settings};
use layout::{build_layout, EXAMPLES_ROUTE, INDEX_HTML};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let settings = load_settings();
    if !FsPath::new(&settings.example_dir).is_dir() {
        warn!(
            example_dir = %settings.example_dir,
            "example image directory not found; example thumbnails will not load"
        );
    }

    let state = app_state_from(&settings);
    info!(backend = state.relay.backend_name(), "submit relay ready");
    let app = build_router(Arc::new(state));

    let addr: SocketAddr = settings
        .server_bind
        .parse()
        .with_context(|| format!("invalid bind address '{}'", settings.server_bind))?;
    info!(%addr, "demo listening");
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    axum::serve(listener, app).await?;
    Ok(())
}

fn app_state_from(settings: &Settings) -> AppState {
    let backend = Arc::new(PlaceholderBackend::new(settings.placeholder_output.as_str()));
    AppState {
        layout: build_layout(settings),
        relay: SubmitRelay::new(backend, settings.submit_timeout(), settings.max_image_bytes),
        example_dir: settings.example_dir.clone(),
        body_limit: settings.request_body_limit(),
    }
}

fn build_router(state: Arc<AppState>) -> Router {
    let examples = ServeDir::new(&state.example_dir);
    let body_limit = state.body_limit;
    Router::new()
        .route("/", get(index))
        .route("/healthz", get(healthz))
        .route("/layout", get(http_layout))
        .route("/events/toggle", post(toggle_changed))
        .route("/events/garment", post(garment_changed))
        .route("/events/model", post(model_changed))
        .route("/presets/try-on/:index", post(try_on_preset))
        .route("/presets/try-off/:index", post(try_off_preset))
        .route("/submit", post(submit))
        .nest_service(EXAMPLES_ROUTE, examples)
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(body_limit))
        .with_state(state)
}

async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

async fn healthz() -> &'static str {
    "ok"
}

async fn http_layout(State(state): State<Arc<AppState>>) -> Json<DemoLayout> {
    Json(state.layout.clone())
}

async fn toggle_changed(Json(req): Json<ToggleChangedRequest>) -> Json<ModeUpdate> {
    Json(mode_state::on_toggle_changed(req.value))
}

async fn garment_changed(Json(req): Json<GarmentChangedRequest>) -> Json<CorrectionUpdate> {
    Json(mode_state::on_garment_input_changed(
        req.garment.as_ref(),
        req.model.as_ref(),
        req.toggle,
    ))
}

async fn model_changed(Json(req): Json<ModelChangedRequest>) -> Json<CorrectionUpdate> {
    Json(mode_state::on_model_input_changed(
        req.model.as_ref(),
        req.garment.as_ref(),
        req.toggle,
    ))
}

async fn try_on_preset(
    State(state): State<Arc<AppState>>,
    Path(index): Path<usize>,
) -> Result<Json<PresetSelection<TryOnPreset>>, (StatusCode, Json<ApiError>)> {
    let preset = state
        .layout
        .try_on_presets
        .get(index)
        .cloned()
        .ok_or_else(|| preset_not_found("try-on", index))?;
    let update = mode_state::select_try_on_preset(&preset);
    Ok(Json(PresetSelection { preset, update }))
}

async fn try_off_preset(
    State(state): State<Arc<AppState>>,
    Path(index): Path<usize>,
) -> Result<Json<PresetSelection<TryOffPreset>>, (StatusCode, Json<ApiError>)> {
    let preset = state
        .layout
        .try_off_presets
        .get(index)
        .cloned()
        .ok_or_else(|| preset_not_found("try-off", index))?;
    let update = mode_state::select_try_off_preset(&preset);
    Ok(Json(PresetSelection { preset, update }))
}

async fn submit(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SubmitRequest>,
) -> Result<Json<SubmitResponse>, (StatusCode, Json<ApiError>)> {
    let response = state.relay.submit(req).await.map_err(|e| {
        let error = ApiError::from(e);
        (status_for(error.code), Json(error))
    })?;
    Ok(Json(response))
}

fn preset_not_found(kind: &str, index: usize) -> (StatusCode, Json<ApiError>) {
    (
        StatusCode::NOT_FOUND,
        Json(ApiError::new(
            ErrorCode::NotFound,
            format!("no {kind} preset at index {index}"),
        )),
    )
}

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InputInvalid => StatusCode::BAD_REQUEST,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::InferenceRejected => StatusCode::UNPROCESSABLE_ENTITY,
        ErrorCode::InferenceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
    }
}

#[cfg(test)]
#[path = "tests/main_tests.rs"]
mod tests;
