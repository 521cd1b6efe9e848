use serde::{Deserialize, Serialize};

use super::client::{http_client, map_send_error, LlmClient};
use super::AssessmentError;

/// Ollama HTTP client for local LLM inference.
pub struct OllamaClient {
    base_url: String,
    model: String,
    client: reqwest::blocking::Client,
    timeout_secs: Option<u64>,
}

impl OllamaClient {
    pub fn new(base_url: &str, model: &str, timeout_secs: Option<u64>) -> Result<Self, AssessmentError> {
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
            client: http_client(timeout_secs)?,
            timeout_secs,
        })
    }
}

/// Request body for Ollama /api/generate
#[derive(Serialize)]
struct OllamaGenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
}

/// Response body from Ollama /api/generate
#[derive(Deserialize)]
struct OllamaGenerateResponse {
    response: String,
}

impl LlmClient for OllamaClient {
    fn generate(&self, prompt: &str) -> Result<String, AssessmentError> {
        let url = format!("{}/api/generate", self.base_url);
        let body = OllamaGenerateRequest {
            model: &self.model,
            prompt,
            stream: false,
        };

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .map_err(|e| map_send_error(e, &self.base_url, self.timeout_secs))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(AssessmentError::Service {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: OllamaGenerateResponse = response
            .json()
            .map_err(|e| AssessmentError::ResponseParsing(e.to_string()))?;

        if parsed.response.trim().is_empty() {
            return Err(AssessmentError::EmptyResponse);
        }
        Ok(parsed.response)
    }

    fn describe(&self) -> String {
        format!("ollama/{}", self.model)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ollama_client_trims_trailing_slash() {
        let client = OllamaClient::new("http://localhost:11434/", "medgemma", None).unwrap();
        assert_eq!(client.base_url, "http://localhost:11434");
        assert_eq!(client.timeout_secs, None);
    }

    #[test]
    fn request_disables_streaming() {
        let body = OllamaGenerateRequest {
            model: "medgemma",
            prompt: "p",
            stream: false,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["stream"], false);
        assert_eq!(json["model"], "medgemma");
    }

    #[test]
    fn connection_refused_maps_to_connection_error() {
        let client = OllamaClient::new("http://127.0.0.1:9", "medgemma", Some(2)).unwrap();
        let err = client.generate("hi").unwrap_err();
        assert!(matches!(
            err,
            AssessmentError::Connection(_) | AssessmentError::HttpClient(_)
        ));
    }
}
