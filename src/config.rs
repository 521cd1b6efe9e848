use std::path::PathBuf;

/// Application-level constants
pub const APP_NAME: &str = "MedConsult";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Doctor roster, relative to the working directory.
pub const ROSTER_FILE: &str = "doctors.csv";

/// Diagnostic log, appended to on every run.
pub const LOG_FILE: &str = "medical_consultation.log";

/// Number of doctors recommended per consultation turn.
pub const DEFAULT_TOP_N: usize = 5;

pub const DEFAULT_GEMINI_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-1.5-flash";
pub const DEFAULT_OLLAMA_URL: &str = "http://localhost:11434";
pub const DEFAULT_OLLAMA_MODEL: &str = "medgemma:latest";

/// Tracing filter used when `RUST_LOG` is unset.
pub fn default_log_filter() -> String {
    "medconsult=info,medconsult_lib=info".to_string()
}

/// Path of the roster file in the working directory.
pub fn roster_path() -> PathBuf {
    PathBuf::from(ROSTER_FILE)
}

/// Directory reports are written to.
pub fn report_dir() -> PathBuf {
    std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
}

/// Which generative-model service answers assessment requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelBackend {
    /// Hosted Gemini `generateContent` API.
    Gemini,
    /// Local Ollama instance.
    Ollama,
}

impl ModelBackend {
    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "gemini" | "google" => Some(Self::Gemini),
            "ollama" | "local" => Some(Self::Ollama),
            _ => None,
        }
    }
}

impl std::fmt::Display for ModelBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Gemini => write!(f, "gemini"),
            Self::Ollama => write!(f, "ollama"),
        }
    }
}

/// Generative-model settings, supplied out of band through the environment
/// (or a `.env` file loaded at startup).
#[derive(Debug, Clone)]
pub struct ModelConfig {
    pub backend: ModelBackend,
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
    /// `None` means the request may block indefinitely.
    pub timeout_secs: Option<u64>,
}

impl ModelConfig {
    /// Read model settings from process environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from an arbitrary key lookup.
    ///
    /// Empty values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let backend = match get("MEDCONSULT_MODEL_BACKEND") {
            Some(raw) => ModelBackend::parse(&raw).unwrap_or_else(|| {
                tracing::warn!(value = %raw, "Unknown model backend, using gemini");
                ModelBackend::Gemini
            }),
            None => ModelBackend::Gemini,
        };

        let (default_url, default_model) = match backend {
            ModelBackend::Gemini => (DEFAULT_GEMINI_URL, DEFAULT_GEMINI_MODEL),
            ModelBackend::Ollama => (DEFAULT_OLLAMA_URL, DEFAULT_OLLAMA_MODEL),
        };

        let timeout_secs = get("MEDCONSULT_MODEL_TIMEOUT_SECS").and_then(|raw| match raw.parse::<u64>() {
            Ok(0) => None,
            Ok(secs) => Some(secs),
            Err(_) => {
                tracing::warn!(value = %raw, "Ignoring invalid model timeout");
                None
            }
        });

        Self {
            backend,
            api_key: get("GEMINI_API_KEY").or_else(|| get("GOOGLE_API_KEY")),
            model: get("MEDCONSULT_MODEL").unwrap_or_else(|| default_model.to_string()),
            base_url: get("MEDCONSULT_MODEL_URL").unwrap_or_else(|| default_url.to_string()),
            timeout_secs,
        }
    }

    /// Whether the configured backend has what it needs to send requests.
    pub fn has_credentials(&self) -> bool {
        match self.backend {
            ModelBackend::Gemini => self.api_key.is_some(),
            ModelBackend::Ollama => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_from(pairs: &[(&str, &str)]) -> ModelConfig {
        let env: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ModelConfig::from_lookup(|key| env.get(key).cloned())
    }

    #[test]
    fn defaults_to_gemini_without_timeout() {
        let config = config_from(&[]);
        assert_eq!(config.backend, ModelBackend::Gemini);
        assert_eq!(config.model, DEFAULT_GEMINI_MODEL);
        assert_eq!(config.base_url, DEFAULT_GEMINI_URL);
        assert_eq!(config.timeout_secs, None);
        assert!(!config.has_credentials());
    }

    #[test]
    fn gemini_key_falls_back_to_google_key() {
        let config = config_from(&[("GOOGLE_API_KEY", "abc")]);
        assert_eq!(config.api_key.as_deref(), Some("abc"));
        assert!(config.has_credentials());

        let config = config_from(&[("GOOGLE_API_KEY", "abc"), ("GEMINI_API_KEY", "xyz")]);
        assert_eq!(config.api_key.as_deref(), Some("xyz"));
    }

    #[test]
    fn ollama_backend_uses_local_defaults() {
        let config = config_from(&[("MEDCONSULT_MODEL_BACKEND", "Ollama")]);
        assert_eq!(config.backend, ModelBackend::Ollama);
        assert_eq!(config.base_url, DEFAULT_OLLAMA_URL);
        assert_eq!(config.model, DEFAULT_OLLAMA_MODEL);
        assert!(config.has_credentials());
    }

    #[test]
    fn explicit_model_and_timeout() {
        let config = config_from(&[
            ("MEDCONSULT_MODEL", "gemini-pro"),
            ("MEDCONSULT_MODEL_TIMEOUT_SECS", "90"),
        ]);
        assert_eq!(config.model, "gemini-pro");
        assert_eq!(config.timeout_secs, Some(90));
    }

    #[test]
    fn zero_or_invalid_timeout_means_none() {
        assert_eq!(config_from(&[("MEDCONSULT_MODEL_TIMEOUT_SECS", "0")]).timeout_secs, None);
        assert_eq!(config_from(&[("MEDCONSULT_MODEL_TIMEOUT_SECS", "soon")]).timeout_secs, None);
    }

    #[test]
    fn blank_values_are_unset() {
        let config = config_from(&[("GEMINI_API_KEY", "  "), ("MEDCONSULT_MODEL", "")]);
        assert!(config.api_key.is_none());
        assert_eq!(config.model, DEFAULT_GEMINI_MODEL);
    }

    #[test]
    fn unknown_backend_falls_back_to_gemini() {
        let config = config_from(&[("MEDCONSULT_MODEL_BACKEND", "openai")]);
        assert_eq!(config.backend, ModelBackend::Gemini);
    }

    #[test]
    fn app_name_is_medconsult() {
        assert_eq!(APP_NAME, "MedConsult");
    }

    #[test]
    fn app_version_matches_cargo() {
        assert_eq!(APP_VERSION, "0.1.0");
    }
}
