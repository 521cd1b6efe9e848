use crate::models::{AssessmentResult, ConsultationState, MatchResult};

use super::client::LlmClient;
use super::prompt::build_assessment_prompt;

/// Shown instead of an assessment when the model call fails.
pub const ASSESSMENT_FALLBACK: &str = "I apologize, but I'm unable to generate an assessment at this time. \
Please consult with one of the recommended doctors directly, or try again later.";

/// Ask the model for a narrative assessment.
///
/// Never fails: a model error is logged and the fallback text returned with
/// the same matches.
pub fn request_assessment(
    client: &dyn LlmClient,
    state: &ConsultationState,
    matches: MatchResult,
) -> AssessmentResult {
    let prompt = build_assessment_prompt(state, &matches);
    tracing::info!(
        model = %client.describe(),
        doctors = matches.len(),
        prompt_chars = prompt.len(),
        "Requesting assessment"
    );

    let text = match client.generate(&prompt) {
        Ok(text) => text,
        Err(e) => {
            tracing::error!(error = %e, "Assessment request failed");
            ASSESSMENT_FALLBACK.to_string()
        }
    };

    AssessmentResult { text, matches }
}
