//! Doctor matching. Ranks the roster against free-text symptoms.
//!
//! Score per doctor:
//! - 3.0 for every table keyword found in the symptoms, for each specialty key
//!   contained in the doctor's specialization
//! - `min(years / 2, 5.0)` experience bonus
//! - the rating itself
//!
//! Unparsable experience or rating contributes nothing.

use crate::models::{DoctorRecord, MatchResult, ScoredDoctor};

use super::specialties::SPECIALTY_TABLE;

pub const KEYWORD_WEIGHT: f64 = 3.0;
pub const EXPERIENCE_CAP: f64 = 5.0;

/// Relevance of one doctor for the given symptoms.
pub fn score_doctor(symptoms: &str, doctor: &DoctorRecord) -> f64 {
    let symptoms = symptoms.to_lowercase();
    let specialization = doctor.specialization.to_lowercase();

    let keyword_score: f64 = SPECIALTY_TABLE
        .iter()
        .filter(|entry| specialization.contains(entry.key))
        .map(|entry| {
            let hits = entry
                .keywords
                .iter()
                .filter(|kw| symptoms.contains(*kw))
                .count();
            hits as f64 * KEYWORD_WEIGHT
        })
        .sum();

    let experience_score = match doctor.experience_years() {
        Some(years) => (years as f64 / 2.0).min(EXPERIENCE_CAP),
        None => {
            tracing::debug!(doctor = %doctor.name, value = %doctor.experience, "Unparsable experience");
            0.0
        }
    };

    let rating_score = match doctor.rating_value() {
        Some(rating) => rating,
        None => {
            tracing::debug!(doctor = %doctor.name, value = %doctor.rating, "Unparsable rating");
            0.0
        }
    };

    keyword_score + experience_score + rating_score
}

/// Best `top_n` doctors for the symptoms, highest score first.
///
/// Ties keep roster order. `top_n` below 1 is treated as 1.
pub fn rank_doctors(symptoms: &str, roster: &[DoctorRecord], top_n: usize) -> MatchResult {
    if roster.is_empty() {
        tracing::warn!("Doctor roster is empty, no doctors to match");
        return Vec::new();
    }
    let top_n = top_n.max(1);

    let mut scored: Vec<ScoredDoctor> = roster
        .iter()
        .map(|doctor| ScoredDoctor {
            doctor: doctor.clone(),
            score: score_doctor(symptoms, doctor),
        })
        .collect();

    // Vec::sort_by is stable.
    scored.sort_by(|a, b| b.score.total_cmp(&a.score));
    scored.truncate(top_n);

    tracing::debug!(
        matched = scored.len(),
        best = scored.first().map(|s| s.doctor.name.as_str()).unwrap_or(""),
        "Ranked doctors"
    );
    scored
}
