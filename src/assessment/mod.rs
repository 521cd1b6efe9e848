//! Assessment requests to a generative-language model.
//!
//! The model is an opaque `prompt -> text` boundary behind [`LlmClient`].
//! Failures never reach the session: they are logged and replaced with a
//! fixed message.

pub mod client;
pub mod gemini;
pub mod ollama;
pub mod prompt;
pub mod requester;

pub use client::*;
pub use gemini::*;
pub use ollama::*;
pub use prompt::*;
pub use requester::*;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AssessmentError {
    #[error("Cannot reach model service at {0}")]
    Connection(String),

    #[error("Model service returned error (status {status}): {body}")]
    Service { status: u16, body: String },

    #[error("HTTP client error: {0}")]
    HttpClient(String),

    #[error("Response parsing error: {0}")]
    ResponseParsing(String),

    #[error("Model returned an empty response")]
    EmptyResponse,

    #[error("Missing API key for {0} (set GEMINI_API_KEY)")]
    MissingApiKey(String),
}
