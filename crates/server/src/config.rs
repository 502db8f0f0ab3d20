use std::{collections::HashMap, fs, path::Path, time::Duration};

use inference::DEFAULT_MAX_IMAGE_BYTES;
use serde::Deserialize;
use tracing::warn;

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct Settings {
    pub server_bind: String,
    pub title: String,
    pub example_dir: String,
    pub placeholder_output: String,
    pub submit_timeout_ms: u64,
    pub max_image_bytes: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server_bind: "127.0.0.1:7860".into(),
            title: "Garment Try-on / Try-off".into(),
            example_dir: "./example_images".into(),
            placeholder_output: "https://media.istockphoto.com/id/157030584/vector/thumb-up-emoticon.jpg?s=612x612&w=0&k=20&c=GGl4NM_6_BzvJxLSl7uCDF4Vlo_zHGZVmmqOBIewgKg=".into(),
            submit_timeout_ms: 30_000,
            max_image_bytes: DEFAULT_MAX_IMAGE_BYTES,
        }
    }
}

impl Settings {
    pub fn submit_timeout(&self) -> Duration {
        Duration::from_millis(self.submit_timeout_ms)
    }

    /// A submit carries the model image, its mask layers and the garment,
    /// all base64 encoded.
    pub fn request_body_limit(&self) -> usize {
        self.max_image_bytes.saturating_mul(4)
    }
}

pub fn load_settings() -> Settings {
    load_settings_from(Path::new("server.toml"), |key| std::env::var(key).ok())
}

pub fn load_settings_from(
    config_path: &Path,
    env: impl Fn(&str) -> Option<String>,
) -> Settings {
    let mut settings = Settings::default();

    if let Ok(raw) = fs::read_to_string(config_path) {
        apply_file_overrides(&mut settings, &raw);
    }
    apply_env_overrides(&mut settings, env);

    settings
}

pub(crate) fn apply_file_overrides(settings: &mut Settings, raw: &str) {
    let file_cfg = match toml::from_str::<HashMap<String, String>>(raw) {
        Ok(cfg) => cfg,
        Err(error) => {
            warn!(%error, "ignoring unreadable server.toml");
            return;
        }
    };

    if let Some(v) = file_cfg.get("bind_addr") {
        settings.server_bind = v.clone();
    }
    if let Some(v) = file_cfg.get("title") {
        settings.title = v.clone();
    }
    if let Some(v) = file_cfg.get("example_dir") {
        settings.example_dir = v.clone();
    }
    if let Some(v) = file_cfg.get("placeholder_output") {
        settings.placeholder_output = v.clone();
    }
    if let Some(v) = file_cfg.get("submit_timeout_ms") {
        set_parsed(&mut settings.submit_timeout_ms, "submit_timeout_ms", v);
    }
    if let Some(v) = file_cfg.get("max_image_bytes") {
        set_parsed(&mut settings.max_image_bytes, "max_image_bytes", v);
    }
}

pub(crate) fn apply_env_overrides(settings: &mut Settings, env: impl Fn(&str) -> Option<String>) {
    if let Some(v) = env("SERVER_BIND") {
        settings.server_bind = v;
    }
    if let Some(v) = env("APP__BIND_ADDR") {
        settings.server_bind = v;
    }
    if let Some(v) = env("APP__TITLE") {
        settings.title = v;
    }
    if let Some(v) = env("APP__EXAMPLE_DIR") {
        settings.example_dir = v;
    }
    if let Some(v) = env("APP__PLACEHOLDER_OUTPUT") {
        settings.placeholder_output = v;
    }
    if let Some(v) = env("APP__SUBMIT_TIMEOUT_MS") {
        set_parsed(&mut settings.submit_timeout_ms, "APP__SUBMIT_TIMEOUT_MS", &v);
    }
    if let Some(v) = env("APP__MAX_IMAGE_BYTES") {
        set_parsed(&mut settings.max_image_bytes, "APP__MAX_IMAGE_BYTES", &v);
    }
}

fn set_parsed<T: std::str::FromStr>(target: &mut T, key: &str, raw: &str) {
    match raw.trim().parse::<T>() {
        Ok(parsed) => *target = parsed,
        Err(_) => warn!(key, value = raw, "ignoring non-numeric setting"),
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
