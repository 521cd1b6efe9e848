/// Phrases that signal a possible medical emergency.
///
/// Any occurrence, in any casing, bypasses doctor matching and the model call.
pub const EMERGENCY_PHRASES: &[&str] = &[
    "chest pain",
    "difficulty breathing",
    "severe bleeding",
    "loss of consciousness",
    "sudden numbness",
    "slurred speech",
];

/// Directive shown to the patient (and written into the report) instead of an
/// assessment when an emergency phrase is detected.
pub const EMERGENCY_DIRECTIVE: &str = "EMERGENCY: Your symptoms may indicate a medical emergency. \
Please call emergency services (911) or go to the nearest emergency room immediately.";

/// True when the symptom text contains any emergency phrase.
pub fn is_emergency(symptoms: &str) -> bool {
    let lower = symptoms.to_lowercase();
    EMERGENCY_PHRASES.iter().any(|p| lower.contains(p))
}

/// Which emergency phrases occur in the symptom text, in list order.
pub fn matched_phrases(symptoms: &str) -> Vec<&'static str> {
    let lower = symptoms.to_lowercase();
    EMERGENCY_PHRASES
        .iter()
        .copied()
        .filter(|p| lower.contains(p))
        .collect()
}
