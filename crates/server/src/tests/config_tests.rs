use super::*;

use std::{
    env,
    time::{SystemTime, UNIX_EPOCH},
};

fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| map.get(key).cloned()
}

#[test]
fn defaults_apply_without_file_or_env() {
    let settings = load_settings_from(Path::new("/nonexistent/server.toml"), env_from(&[]));
    assert_eq!(settings, Settings::default());
    assert_eq!(settings.submit_timeout(), Duration::from_secs(30));
}

#[test]
fn env_overrides_file_which_overrides_defaults() {
    let suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock")
        .as_nanos();
    let temp_root = env::temp_dir().join(format!("tryon_demo_config_test_{suffix}"));
    fs::create_dir_all(&temp_root).expect("temp root");
    let path = temp_root.join("server.toml");
    fs::write(
        &path,
        "bind_addr = \"0.0.0.0:9000\"\nexample_dir = \"/srv/examples\"\nsubmit_timeout_ms = \"500\"\n",
    )
    .expect("write config");

    let settings = load_settings_from(&path, env_from(&[("APP__BIND_ADDR", "127.0.0.1:9100")]));
    assert_eq!(settings.server_bind, "127.0.0.1:9100");
    assert_eq!(settings.example_dir, "/srv/examples");
    assert_eq!(settings.submit_timeout_ms, 500);

    fs::remove_dir_all(temp_root).expect("cleanup");
}

#[test]
fn app_prefixed_bind_wins_over_plain_bind() {
    let mut settings = Settings::default();
    apply_env_overrides(
        &mut settings,
        env_from(&[("SERVER_BIND", "a:1"), ("APP__BIND_ADDR", "b:2")]),
    );
    assert_eq!(settings.server_bind, "b:2");
}

#[test]
fn invalid_numbers_are_ignored() {
    let mut settings = Settings::default();
    apply_env_overrides(
        &mut settings,
        env_from(&[("APP__SUBMIT_TIMEOUT_MS", "soon"), ("APP__MAX_IMAGE_BYTES", "1024")]),
    );
    assert_eq!(settings.submit_timeout_ms, Settings::default().submit_timeout_ms);
    assert_eq!(settings.max_image_bytes, 1024);
    assert_eq!(settings.request_body_limit(), 4096);
}

#[test]
fn malformed_file_leaves_settings_untouched() {
    let mut settings = Settings::default();
    apply_file_overrides(&mut settings, "this is not toml = [");
    assert_eq!(settings, Settings::default());
}
