use super::doctor::DoctorRecord;

/// Placeholder used when the patient leaves allergies or medications blank.
pub const NONE_REPORTED: &str = "None";

/// What the patient told us during the current session.
///
/// Allergies and medications persist across follow-up turns; symptoms are
/// replaced on every follow-up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsultationState {
    pub symptoms: String,
    pub allergies: String,
    pub medications: String,
}

impl ConsultationState {
    pub fn new(symptoms: &str) -> Self {
        Self {
            symptoms: symptoms.to_string(),
            allergies: NONE_REPORTED.to_string(),
            medications: NONE_REPORTED.to_string(),
        }
    }

    pub fn with_allergies(mut self, allergies: &str) -> Self {
        self.allergies = or_none(allergies);
        self
    }

    pub fn with_medications(mut self, medications: &str) -> Self {
        self.medications = or_none(medications);
        self
    }

    /// Append extra free text to the symptom description.
    pub fn append_details(&mut self, details: &str) {
        let details = details.trim();
        if details.is_empty() {
            return;
        }
        self.symptoms.push_str(". ");
        self.symptoms.push_str(details);
    }

    /// Follow-up turn: the new description fully replaces the old one.
    pub fn replace_symptoms(&mut self, symptoms: &str) {
        self.symptoms = symptoms.trim().to_string();
    }
}

fn or_none(value: &str) -> String {
    let value = value.trim();
    if value.is_empty() {
        NONE_REPORTED.to_string()
    } else {
        value.to_string()
    }
}

/// A roster entry paired with its transient relevance score.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredDoctor {
    pub doctor: DoctorRecord,
    pub score: f64,
}

/// Ranked doctors, best first, already truncated to the requested size.
pub type MatchResult = Vec<ScoredDoctor>;

/// Narrative assessment plus the ranking it was generated against.
#[derive(Debug, Clone)]
pub struct AssessmentResult {
    pub text: String,
    pub matches: MatchResult,
}
