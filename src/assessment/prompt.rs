use crate::models::{ConsultationState, ScoredDoctor};

/// Instruction appended to every assessment prompt.
pub const ASSESSMENT_INSTRUCTIONS: &str = "Please provide a structured response with the following four sections:
1. Possible Conditions: the most likely conditions that could explain these symptoms.
2. Severity Assessment: classify the situation as Mild, Moderate, or Severe and explain why.
3. Recommended Next Steps: what the patient should do now, including self-care and when to seek care.
4. Doctor Recommendations: which of the listed doctors is most appropriate and why.

Keep the language clear and patient-friendly. This is not a diagnosis; remind the patient to consult a healthcare professional.";

/// Build the assessment prompt from the patient's answers and the ranked doctors.
pub fn build_assessment_prompt(state: &ConsultationState, matches: &[ScoredDoctor]) -> String {
    let mut prompt = String::new();

    prompt.push_str("You are a medical assistant helping a patient understand their symptoms.\n\n");
    prompt.push_str("Patient Information:\n");
    prompt.push_str(&format!("- Symptoms: {}\n", state.symptoms));
    prompt.push_str(&format!("- Allergies: {}\n", state.allergies));
    prompt.push_str(&format!("- Current Medications: {}\n\n", state.medications));

    prompt.push_str("Available Doctors:\n");
    if matches.is_empty() {
        prompt.push_str("No matching doctors found.\n");
    }
    for (i, scored) in matches.iter().enumerate() {
        let d = &scored.doctor;
        prompt.push_str(&format!(
            "{}. {} - {} ({}), {} experience, rating {}, contact: {}\n",
            i + 1,
            d.name,
            d.specialization,
            d.location,
            d.experience,
            d.rating,
            d.contact
        ));
    }
    prompt.push('\n');
    prompt.push_str(ASSESSMENT_INSTRUCTIONS);

    prompt
}
