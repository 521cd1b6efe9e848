use chrono::{DateTime, Local};

use crate::models::{ConsultationState, ScoredDoctor};

pub const REPORT_TITLE: &str = "Medical Consultation Report";
pub const NO_DOCTORS_LINE: &str = "No doctors found matching the criteria.";
pub const NOT_PROVIDED: &str = "Not provided";
pub const DOCTOR_COLUMNS: [&str; 4] = ["Name", "Specialization", "Location", "Contact"];
pub const REPORT_DISCLAIMER: &str = "Disclaimer: This report is generated by an automated assistant for \
informational purposes only. It is not a medical diagnosis and does not replace professional medical \
advice. Always consult a qualified healthcare provider about your symptoms.";

/// One renderable element of the report, in reading order.
#[derive(Debug, Clone, PartialEq)]
pub enum ReportBlock {
    Title(String),
    Heading(String),
    /// Single line, never wrapped.
    Line(String),
    /// Free text, word-wrapped by the renderer.
    Paragraph(String),
    Table(DoctorTable),
    Disclaimer(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct DoctorTable {
    pub columns: [&'static str; 4],
    pub rows: Vec<[String; 4]>,
}

/// Finished content tree, ready for rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportDocument {
    pub generated_at: DateTime<Local>,
    pub blocks: Vec<ReportBlock>,
}

impl ReportDocument {
    pub fn tables(&self) -> impl Iterator<Item = &DoctorTable> {
        self.blocks.iter().filter_map(|b| match b {
            ReportBlock::Table(t) => Some(t),
            _ => None,
        })
    }
}

/// Assemble the report content for one consultation turn.
pub fn compose_report(
    state: &ConsultationState,
    assessment: &str,
    matches: &[ScoredDoctor],
    generated_at: DateTime<Local>,
) -> ReportDocument {
    let mut blocks = vec![
        ReportBlock::Title(REPORT_TITLE.to_string()),
        ReportBlock::Line(format!(
            "Generated on: {}",
            generated_at.format("%Y-%m-%d %H:%M:%S")
        )),
        ReportBlock::Heading("Patient Information".to_string()),
        ReportBlock::Paragraph(format!("Symptoms: {}", or_placeholder(&state.symptoms))),
        ReportBlock::Paragraph(format!("Allergies: {}", or_placeholder(&state.allergies))),
        ReportBlock::Paragraph(format!("Current Medications: {}", or_placeholder(&state.medications))),
        ReportBlock::Heading("Assessment".to_string()),
    ];

    blocks.extend(
        assessment
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(|line| ReportBlock::Paragraph(line.to_string())),
    );

    blocks.push(ReportBlock::Heading("Recommended Doctors".to_string()));
    if matches.is_empty() {
        blocks.push(ReportBlock::Line(NO_DOCTORS_LINE.to_string()));
    } else {
        let rows = matches
            .iter()
            .map(|s| {
                let d = &s.doctor;
                [
                    d.name.clone(),
                    d.specialization.clone(),
                    d.location.clone(),
                    d.contact.clone(),
                ]
            })
            .collect();
        blocks.push(ReportBlock::Table(DoctorTable {
            columns: DOCTOR_COLUMNS,
            rows,
        }));
    }

    blocks.push(ReportBlock::Disclaimer(REPORT_DISCLAIMER.to_string()));

    ReportDocument { generated_at, blocks }
}

fn or_placeholder(value: &str) -> &str {
    if value.trim().is_empty() {
        NOT_PROVIDED
    } else {
        value
    }
}
