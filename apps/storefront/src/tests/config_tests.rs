use super::{load_settings_with, normalize_base_url, Settings};

use std::{
    collections::HashMap,
    env, fs,
    path::PathBuf,
    time::{SystemTime, UNIX_EPOCH},
};

fn temp_config(name: &str, contents: &str) -> PathBuf {
    let suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock")
        .as_nanos();
    let dir = env::temp_dir().join(format!("storefront_config_{name}_{suffix}"));
    fs::create_dir_all(&dir).expect("temp dir");
    let path = dir.join("storefront.toml");
    fs::write(&path, contents).expect("write config");
    path
}

fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let vars: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| vars.get(key).cloned()
}

#[test]
fn defaults_apply_without_file_or_env() {
    let settings = load_settings_with(&PathBuf::from("/nonexistent/storefront.toml"), env_from(&[]));
    assert_eq!(settings, Settings::default());
}

#[test]
fn file_values_override_defaults() {
    let path = temp_config("file", "base_url = \"https://shop.example/api\"\nauth_token = \"abc\"\n");

    let settings = load_settings_with(&path, env_from(&[]));

    assert_eq!(settings.base_url, "https://shop.example/api");
    assert_eq!(settings.auth_token.as_deref(), Some("abc"));
    fs::remove_dir_all(path.parent().expect("parent")).expect("cleanup");
}

#[test]
fn env_overrides_file_and_app_prefix_wins() {
    let path = temp_config("env", "base_url = \"https://file.example\"\n");

    let settings = load_settings_with(
        &path,
        env_from(&[
            ("STOREFRONT_BASE_URL", "https://env.example"),
            ("APP__BASE_URL", "https://app.example"),
            ("STOREFRONT_TOKEN", "from-env"),
        ]),
    );

    assert_eq!(settings.base_url, "https://app.example");
    assert_eq!(settings.auth_token.as_deref(), Some("from-env"));
    fs::remove_dir_all(path.parent().expect("parent")).expect("cleanup");
}

#[test]
fn blank_token_means_signed_out() {
    let settings = load_settings_with(
        &PathBuf::from("/nonexistent/storefront.toml"),
        env_from(&[("STOREFRONT_TOKEN", "   ")]),
    );
    assert_eq!(settings.auth_token, None);
}

#[test]
fn malformed_file_is_ignored() {
    let path = temp_config("malformed", "this is = = not toml");

    let settings = load_settings_with(&path, env_from(&[]));

    assert_eq!(settings, Settings::default());
    fs::remove_dir_all(path.parent().expect("parent")).expect("cleanup");
}

#[test]
fn normalizes_trailing_slashes() {
    assert_eq!(
        normalize_base_url("http://localhost:8080/").expect("url"),
        "http://localhost:8080"
    );
    assert_eq!(
        normalize_base_url("  ").expect("url"),
        Settings::default().base_url
    );
}

#[test]
fn rejects_non_http_base_url() {
    assert!(normalize_base_url("ftp://shop.example").is_err());
    assert!(normalize_base_url("shop.example").is_err());
}
