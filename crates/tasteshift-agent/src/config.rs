//! Agent configuration loading from file and environment variables.

use serde::Deserialize;
use tasteshift_reconciler::HostLayout;
use tasteshift_types::{AssetBase, ThemeId};
use tasteshift_voice::RemoteSpeechConfig;
use thiserror::Error;

/// Top-level agent configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub content: ContentConfig,

    #[serde(default)]
    pub enforcement: EnforcementConfig,

    #[serde(default)]
    pub voice: VoiceConfig,

    #[serde(default)]
    pub lookup: LookupConfig,

    /// Base URL of the packaged pictures, clips and icons.
    #[serde(default)]
    pub assets: AssetBase,

    #[serde(default)]
    pub store: StoreConfig,

    /// Host page markers. Only needed when the host renames something.
    #[serde(default)]
    pub layout: HostLayout,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g. "info", "tasteshift_reconciler=debug,info").
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default)]
    pub json: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContentConfig {
    /// Theme used when no preference has been stored yet.
    #[serde(default)]
    pub default_theme: ThemeId,

    /// Optional TOML file layered over the built-in catalog.
    #[serde(default)]
    pub catalog_path: Option<String>,
}

/// Timing of the three reconciliation triggers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct EnforcementConfig {
    /// Interval of the periodic full pass.
    #[serde(default = "default_full_pass_ms")]
    pub full_pass_ms: u64,

    /// Minimum spacing between fast-path repairs.
    #[serde(default = "default_fast_spacing_ms")]
    pub fast_spacing_ms: u64,

    /// Frame tick driving the fast path.
    #[serde(default = "default_frame_ms")]
    pub frame_ms: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VoiceConfig {
    /// Upper bound on a remote synthesis call before the local clip plays.
    #[serde(default = "default_remote_timeout_ms")]
    pub remote_timeout_ms: u64,

    /// Speech credential used when none has been stored.
    #[serde(default)]
    pub api_key: Option<String>,

    #[serde(default)]
    pub remote: RemoteSpeechConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LookupConfig {
    #[serde(default = "default_lookup_url")]
    pub backend_url: String,

    #[serde(default = "default_lookup_timeout_ms")]
    pub timeout_ms: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    /// Path to the SQLite preference database.
    #[serde(default = "default_db_path")]
    pub path: String,

    #[serde(default = "default_busy_timeout_ms")]
    pub busy_timeout_ms: u64,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_full_pass_ms() -> u64 {
    2_000
}

fn default_fast_spacing_ms() -> u64 {
    100
}

fn default_frame_ms() -> u64 {
    16
}

fn default_remote_timeout_ms() -> u64 {
    10_000
}

fn default_lookup_url() -> String {
    tasteshift_lookup::DEFAULT_BACKEND_URL.to_string()
}

fn default_lookup_timeout_ms() -> u64 {
    15_000
}

fn default_db_path() -> String {
    "tasteshift.db".to_string()
}

fn default_busy_timeout_ms() -> u64 {
    2_000
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

impl Default for EnforcementConfig {
    fn default() -> Self {
        Self {
            full_pass_ms: default_full_pass_ms(),
            fast_spacing_ms: default_fast_spacing_ms(),
            frame_ms: default_frame_ms(),
        }
    }
}

impl Default for VoiceConfig {
    fn default() -> Self {
        Self {
            remote_timeout_ms: default_remote_timeout_ms(),
            api_key: None,
            remote: RemoteSpeechConfig::default(),
        }
    }
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            backend_url: default_lookup_url(),
            timeout_ms: default_lookup_timeout_ms(),
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
            busy_timeout_ms: default_busy_timeout_ms(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Loads configuration from a TOML file, falling back to defaults when the
/// file does not exist.
///
/// Environment variable overrides:
/// - `TASTESHIFT_LOG_LEVEL` overrides `logging.level`
/// - `TASTESHIFT_LOG_JSON` overrides `logging.json` ("true" or "1")
/// - `TASTESHIFT_THEME` overrides `content.default_theme`
/// - `TASTESHIFT_SPEECH_API_KEY` overrides `voice.api_key`
/// - `TASTESHIFT_LOOKUP_URL` overrides `lookup.backend_url`
/// - `TASTESHIFT_DB_PATH` overrides `store.path`
pub fn load_config(path: Option<&str>) -> Result<Config, ConfigError> {
    let mut config = match path {
        Some(p) => match std::fs::read_to_string(p) {
            Ok(contents) => toml::from_str(&contents)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!(path = p, "config file not found, using defaults");
                Config::default()
            }
            Err(e) => return Err(ConfigError::FileRead(e)),
        },
        None => Config::default(),
    };
    apply_env(&mut config, |name| std::env::var(name).ok());
    Ok(config)
}

fn apply_env(config: &mut Config, var: impl Fn(&str) -> Option<String>) {
    if let Some(level) = var("TASTESHIFT_LOG_LEVEL") {
        config.logging.level = level;
    }
    if let Some(json) = var("TASTESHIFT_LOG_JSON") {
        config.logging.json = json == "true" || json == "1";
    }
    if let Some(theme) = var("TASTESHIFT_THEME") {
        match theme.parse() {
            Ok(theme) => config.content.default_theme = theme,
            Err(e) => tracing::warn!(error = %e, "ignoring TASTESHIFT_THEME"),
        }
    }
    if let Some(key) = var("TASTESHIFT_SPEECH_API_KEY").filter(|k| !k.trim().is_empty()) {
        config.voice.api_key = Some(key);
    }
    if let Some(url) = var("TASTESHIFT_LOOKUP_URL") {
        config.lookup.backend_url = url;
    }
    if let Some(path) = var("TASTESHIFT_DB_PATH") {
        config.store.path = path;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");
        let loaded = load_config(path.to_str()).expect("missing file is not an error");
        assert_eq!(loaded.enforcement, EnforcementConfig::default());
        assert_eq!(loaded.enforcement.full_pass_ms, 2_000);
        assert_eq!(loaded.voice.remote_timeout_ms, 10_000);
        assert_eq!(loaded.lookup.timeout_ms, 15_000);
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let config: Config = toml::from_str(
            r#"
            [content]
            default_theme = "bronx"

            [enforcement]
            frame_ms = 33

            [voice.remote]
            base_url = "http://tts.test"

            [layout]
            toppings_title = "Finish It"
            "#,
        )
        .unwrap();
        assert_eq!(config.content.default_theme, ThemeId::Bronx);
        assert_eq!(config.enforcement.frame_ms, 33);
        assert_eq!(config.enforcement.fast_spacing_ms, 100);
        assert_eq!(config.voice.remote.base_url, "http://tts.test");
        assert_eq!(config.voice.remote.model_id, "eleven_monolingual_v1");
        assert_eq!(config.layout.toppings_title, "Finish It");
        assert_eq!(config.layout.card_class, "meal-builder-item-selector-card-container");
    }

    #[test]
    fn env_overrides_apply() {
        let env: HashMap<&str, &str> = [
            ("TASTESHIFT_LOG_JSON", "1"),
            ("TASTESHIFT_THEME", "jamaican"),
            ("TASTESHIFT_SPEECH_API_KEY", "sk-env"),
            ("TASTESHIFT_LOOKUP_URL", "http://lookup.test"),
            ("TASTESHIFT_DB_PATH", "/tmp/prefs.db"),
        ]
        .into_iter()
        .collect();
        let mut config = Config::default();
        apply_env(&mut config, |name| env.get(name).map(|v| v.to_string()));

        assert!(config.logging.json);
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.content.default_theme, ThemeId::Jamaican);
        assert_eq!(config.voice.api_key.as_deref(), Some("sk-env"));
        assert_eq!(config.lookup.backend_url, "http://lookup.test");
        assert_eq!(config.store.path, "/tmp/prefs.db");
    }

    #[test]
    fn unknown_theme_in_env_is_ignored() {
        let mut config = Config::default();
        apply_env(&mut config, |name| {
            (name == "TASTESHIFT_THEME").then(|| "klingon".to_string())
        });
        assert_eq!(config.content.default_theme, ThemeId::Italian);
    }

    #[test]
    fn unreadable_toml_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[enforcement\nfull_pass_ms = 1").unwrap();
        let err = load_config(path.to_str()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
