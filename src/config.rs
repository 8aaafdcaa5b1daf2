use std::fmt;
use std::path::{Path, PathBuf};

use thiserror::Error;
use zeroize::Zeroizing;

/// Application-level constants
pub const APP_NAME: &str = "Clinic Intake";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Transcript export, rewritten on every extraction.
pub const TRANSCRIPT_EXPORT_FILE: &str = "conversation.json";
/// Doctor-facing report, rewritten on every extraction.
pub const REPORT_FILE: &str = "clinic_chatbot_report.pdf";

pub const API_KEY_ENV: &str = "OPENAI_API_KEY";
pub const BASE_URL_ENV: &str = "OPENAI_BASE_URL";
pub const MODEL_ENV: &str = "CLINIC_INTAKE_MODEL";

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";

/// Log filter used when `RUST_LOG` is unset.
pub fn default_log_filter() -> &'static str {
    "clinic_intake_lib=info,clinic_intake=info"
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{0} is not set; export it or add it to .env")]
    MissingApiKey(&'static str),

    #[error("Invalid value for {name}: {reason}")]
    InvalidValue { name: &'static str, reason: String },
}

/// Remote completion endpoint settings. Read once at start-up and handed to
/// the gateway constructor.
#[derive(Clone)]
pub struct GatewayConfig {
    pub api_key: Zeroizing<String>,
    pub base_url: String,
    pub model: String,
}

impl GatewayConfig {
    /// Build from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup(API_KEY_ENV)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .ok_or(ConfigError::MissingApiKey(API_KEY_ENV))?;

        let base_url = match lookup(BASE_URL_ENV).filter(|v| !v.trim().is_empty()) {
            Some(url) => validate_base_url(BASE_URL_ENV, &url)?,
            None => DEFAULT_BASE_URL.to_string(),
        };

        let model = lookup(MODEL_ENV)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_MODEL.to_string());

        Ok(Self {
            api_key: Zeroizing::new(api_key),
            base_url,
            model,
        })
    }

    /// Apply command-line overrides on top of the environment values.
    pub fn with_overrides(
        mut self,
        model: Option<String>,
        base_url: Option<String>,
    ) -> Result<Self, ConfigError> {
        if let Some(model) = model.filter(|m| !m.trim().is_empty()) {
            self.model = model.trim().to_string();
        }
        if let Some(url) = base_url {
            self.base_url = validate_base_url("--base-url", &url)?;
        }
        Ok(self)
    }
}

impl fmt::Debug for GatewayConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GatewayConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .finish()
    }
}

fn validate_base_url(name: &'static str, url: &str) -> Result<String, ConfigError> {
    let trimmed = url.trim().trim_end_matches('/');
    if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
        return Err(ConfigError::InvalidValue {
            name,
            reason: format!("expected an http(s) URL, got {trimmed:?}"),
        });
    }
    Ok(trimmed.to_string())
}

/// Where the two extraction artifacts are written.
#[derive(Debug, Clone)]
pub struct OutputPaths {
    dir: PathBuf,
}

impl OutputPaths {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn transcript_export(&self) -> PathBuf {
        self.dir.join(TRANSCRIPT_EXPORT_FILE)
    }

    pub fn report(&self) -> PathBuf {
        self.dir.join(REPORT_FILE)
    }
}

impl Default for OutputPaths {
    fn default() -> Self {
        Self::new(".")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn missing_api_key_is_an_error() {
        let err = GatewayConfig::from_lookup(lookup_from(&[])).unwrap_err();
        assert!(matches!(err, ConfigError::MissingApiKey(API_KEY_ENV)));
    }

    #[test]
    fn blank_api_key_is_an_error() {
        let err = GatewayConfig::from_lookup(lookup_from(&[(API_KEY_ENV, "   ")])).unwrap_err();
        assert!(matches!(err, ConfigError::MissingApiKey(_)));
    }

    #[test]
    fn defaults_apply_when_only_key_is_set() {
        let config = GatewayConfig::from_lookup(lookup_from(&[(API_KEY_ENV, "sk-test")])).unwrap();
        assert_eq!(config.api_key.as_str(), "sk-test");
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.model, DEFAULT_MODEL);
    }

    #[test]
    fn base_url_trailing_slash_trimmed() {
        let config = GatewayConfig::from_lookup(lookup_from(&[
            (API_KEY_ENV, "sk-test"),
            (BASE_URL_ENV, "http://localhost:8080/v1/"),
            (MODEL_ENV, "gpt-4o-mini"),
        ]))
        .unwrap();
        assert_eq!(config.base_url, "http://localhost:8080/v1");
        assert_eq!(config.model, "gpt-4o-mini");
    }

    #[test]
    fn non_http_base_url_rejected() {
        let err = GatewayConfig::from_lookup(lookup_from(&[
            (API_KEY_ENV, "sk-test"),
            (BASE_URL_ENV, "ftp://example.com"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { name: BASE_URL_ENV, .. }));
    }

    #[test]
    fn overrides_replace_env_values() {
        let config = GatewayConfig::from_lookup(lookup_from(&[(API_KEY_ENV, "sk-test")]))
            .unwrap()
            .with_overrides(Some("gpt-4o".into()), Some("https://proxy.local/v1/".into()))
            .unwrap();
        assert_eq!(config.model, "gpt-4o");
        assert_eq!(config.base_url, "https://proxy.local/v1");
    }

    #[test]
    fn debug_output_redacts_api_key() {
        let config = GatewayConfig::from_lookup(lookup_from(&[(API_KEY_ENV, "sk-secret")])).unwrap();
        let debug = format!("{config:?}");
        assert!(!debug.contains("sk-secret"));
        assert!(debug.contains("<redacted>"));
    }

    #[test]
    fn output_paths_use_fixed_names() {
        let paths = OutputPaths::new("/tmp/out");
        assert!(paths.transcript_export().ends_with("conversation.json"));
        assert!(paths.report().ends_with("clinic_chatbot_report.pdf"));
        assert_eq!(paths.dir(), Path::new("/tmp/out"));
    }

    #[test]
    fn app_version_matches_cargo() {
        assert_eq!(APP_VERSION, "0.1.0");
    }
}
