use crate::config::{ModelBackend, ModelConfig};

use super::gemini::GeminiClient;
use super::ollama::OllamaClient;
use super::AssessmentError;

/// A text-generation service.
pub trait LlmClient {
    fn generate(&self, prompt: &str) -> Result<String, AssessmentError>;

    /// Human-readable identity for logs, e.g. `gemini/gemini-1.5-flash`.
    fn describe(&self) -> String;
}

/// Build the client selected by configuration.
pub fn build_client(config: &ModelConfig) -> Result<Box<dyn LlmClient>, AssessmentError> {
    let client: Box<dyn LlmClient> = match config.backend {
        ModelBackend::Gemini => {
            let api_key = config
                .api_key
                .as_deref()
                .ok_or_else(|| AssessmentError::MissingApiKey(config.backend.to_string()))?;
            Box::new(GeminiClient::new(
                &config.base_url,
                api_key,
                &config.model,
                config.timeout_secs,
            )?)
        }
        ModelBackend::Ollama => Box::new(OllamaClient::new(
            &config.base_url,
            &config.model,
            config.timeout_secs,
        )?),
    };
    tracing::info!(model = %client.describe(), "Model client ready");
    Ok(client)
}

/// Build the blocking HTTP client shared by both backends.
///
/// No timeout is applied unless one was configured.
pub(crate) fn http_client(timeout_secs: Option<u64>) -> Result<reqwest::blocking::Client, AssessmentError> {
    let mut builder = reqwest::blocking::Client::builder()
        .connect_timeout(std::time::Duration::from_secs(10))
        .timeout(None);
    if let Some(secs) = timeout_secs {
        builder = builder.timeout(std::time::Duration::from_secs(secs));
    }
    builder
        .build()
        .map_err(|e| AssessmentError::HttpClient(e.to_string()))
}

/// Map a transport failure to the matching error variant.
pub(crate) fn map_send_error(e: reqwest::Error, base_url: &str, timeout_secs: Option<u64>) -> AssessmentError {
    if e.is_connect() {
        AssessmentError::Connection(base_url.to_string())
    } else if e.is_timeout() {
        AssessmentError::HttpClient(format!(
            "Request timed out after {}s",
            timeout_secs.unwrap_or_default()
        ))
    } else {
        AssessmentError::HttpClient(e.to_string())
    }
}

/// Mock LLM client for testing. Returns a configured response or failure.
pub struct MockLlmClient {
    response: Result<String, String>,
    calls: std::cell::RefCell<Vec<String>>,
}

impl MockLlmClient {
    pub fn new(response: &str) -> Self {
        Self {
            response: Ok(response.to_string()),
            calls: Default::default(),
        }
    }

    /// A client whose every request fails with an HTTP error.
    pub fn failing(message: &str) -> Self {
        Self {
            response: Err(message.to_string()),
            calls: Default::default(),
        }
    }

    /// Prompts received so far, oldest first.
    pub fn prompts(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }
}

impl LlmClient for MockLlmClient {
    fn generate(&self, prompt: &str) -> Result<String, AssessmentError> {
        self.calls.borrow_mut().push(prompt.to_string());
        self.response
            .clone()
            .map_err(AssessmentError::HttpClient)
    }

    fn describe(&self) -> String {
        "mock".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(backend: ModelBackend, api_key: Option<&str>) -> ModelConfig {
        ModelConfig {
            backend,
            api_key: api_key.map(str::to_string),
            model: "test-model".into(),
            base_url: "http://localhost:9".into(),
            timeout_secs: None,
        }
    }

    #[test]
    fn mock_client_returns_configured_response() {
        let client = MockLlmClient::new("test response");
        assert_eq!(client.generate("prompt").unwrap(), "test response");
        assert_eq!(client.prompts(), vec!["prompt".to_string()]);
    }

    #[test]
    fn failing_mock_returns_error() {
        let client = MockLlmClient::failing("boom");
        let err = client.generate("prompt").unwrap_err();
        assert!(err.to_string().contains("boom"));
    }

    #[test]
    fn gemini_without_key_is_rejected() {
        let err = build_client(&config(ModelBackend::Gemini, None)).err().unwrap();
        assert!(matches!(err, AssessmentError::MissingApiKey(_)));
    }

    #[test]
    fn gemini_with_key_builds() {
        let client = build_client(&config(ModelBackend::Gemini, Some("k"))).unwrap();
        assert_eq!(client.describe(), "gemini/test-model");
    }

    #[test]
    fn ollama_needs_no_key() {
        let client = build_client(&config(ModelBackend::Ollama, None)).unwrap();
        assert_eq!(client.describe(), "ollama/test-model");
    }
}
