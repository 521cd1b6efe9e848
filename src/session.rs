//! Interactive consultation session.
//!
//! ```text
//! CollectingInitialInfo -> Assessing -> AwaitingContinueDecision -> Terminated
//!                              ^                 |
//!                              |               "yes"
//!                              |                 v
//!                              +------- CollectingFollowUp
//! ```
//!
//! Generic over input and output so a whole session can be scripted in tests.

use std::io::{BufRead, Write};
use std::path::PathBuf;

use chrono::Local;
use thiserror::Error;

use crate::assessment::{request_assessment, LlmClient};
use crate::intelligence::{is_emergency, matched_phrases, rank_doctors, EMERGENCY_DIRECTIVE};
use crate::models::{ConsultationState, DoctorRecord, MatchResult};
use crate::report::{generate_report, ReportSink};

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Input closed before the consultation finished")]
    InputClosed,

    #[error("Console I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    CollectingInitialInfo,
    Assessing,
    AwaitingContinueDecision,
    CollectingFollowUp,
    Terminated,
}

/// Collaborators a consultation turn needs.
pub struct TurnContext<'a> {
    pub roster: &'a [DoctorRecord],
    pub client: &'a dyn LlmClient,
    pub sink: &'a dyn ReportSink,
    pub top_n: usize,
}

/// What one consultation turn produced.
#[derive(Debug, Clone)]
pub struct TurnOutcome {
    pub emergency: bool,
    pub assessment: String,
    pub matches: MatchResult,
    pub report: Option<PathBuf>,
}

/// Run the Assessing step for the current symptoms.
///
/// An emergency skips matching and the model call; a report is still written,
/// with no doctors and the emergency directive as its assessment.
pub fn run_turn(ctx: &TurnContext<'_>, state: &ConsultationState) -> TurnOutcome {
    if is_emergency(&state.symptoms) {
        tracing::warn!(
            phrases = ?matched_phrases(&state.symptoms),
            "Emergency phrase detected, skipping assessment"
        );
        let report = generate_report(ctx.sink, state, EMERGENCY_DIRECTIVE, &[], Local::now());
        return TurnOutcome {
            emergency: true,
            assessment: EMERGENCY_DIRECTIVE.to_string(),
            matches: Vec::new(),
            report,
        };
    }

    let matches = rank_doctors(&state.symptoms, ctx.roster, ctx.top_n);
    let result = request_assessment(ctx.client, state, matches);
    let report = generate_report(ctx.sink, state, &result.text, &result.matches, Local::now());

    TurnOutcome {
        emergency: false,
        assessment: result.text,
        matches: result.matches,
        report,
    }
}

/// Totals for a finished session.
#[derive(Debug, Clone, Default)]
pub struct SessionSummary {
    pub turns: usize,
    pub reports: Vec<PathBuf>,
}

pub struct Session<'a, R, W> {
    input: R,
    output: W,
    ctx: TurnContext<'a>,
    state: SessionState,
    consultation: Option<ConsultationState>,
    summary: SessionSummary,
}

impl<'a, R: BufRead, W: Write> Session<'a, R, W> {
    pub fn new(input: R, output: W, ctx: TurnContext<'a>) -> Self {
        Self {
            input,
            output,
            ctx,
            state: SessionState::CollectingInitialInfo,
            consultation: None,
            summary: SessionSummary::default(),
        }
    }

    /// Drive the session until the patient stops.
    pub fn run(mut self) -> Result<SessionSummary, SessionError> {
        writeln!(self.output, "=== {} - Symptom Consultation ===", crate::config::APP_NAME)?;
        writeln!(
            self.output,
            "This assistant does not replace a doctor. In an emergency, call your local emergency number."
        )?;

        loop {
            self.state = match self.state {
                SessionState::CollectingInitialInfo => self.collect_initial_info()?,
                SessionState::Assessing => self.assess()?,
                SessionState::AwaitingContinueDecision => self.ask_to_continue()?,
                SessionState::CollectingFollowUp => self.collect_follow_up()?,
                SessionState::Terminated => {
                    writeln!(self.output, "\nThank you for using {}. Take care!", crate::config::APP_NAME)?;
                    tracing::info!(turns = self.summary.turns, "Session finished");
                    return Ok(self.summary);
                }
            };
        }
    }

    fn collect_initial_info(&mut self) -> Result<SessionState, SessionError> {
        let symptoms = self.prompt_required(
            "\nPlease describe your symptoms: ",
            "Symptoms cannot be empty. Please describe what you are experiencing.",
        )?;
        let allergies = self.prompt("Do you have any known allergies? (press Enter for none): ")?;
        let medications = self.prompt("Are you taking any medications? (press Enter for none): ")?;
        let details = self.prompt(
            "Anything else we should know, such as duration or severity? (press Enter to skip): ",
        )?;

        let mut consultation = ConsultationState::new(&symptoms)
            .with_allergies(&allergies)
            .with_medications(&medications);
        consultation.append_details(&details);
        self.consultation = Some(consultation);

        Ok(SessionState::Assessing)
    }

    fn assess(&mut self) -> Result<SessionState, SessionError> {
        let Some(consultation) = self.consultation.as_ref() else {
            tracing::error!("Assessment requested without patient information");
            return Ok(SessionState::CollectingInitialInfo);
        };

        self.summary.turns += 1;
        tracing::info!(
            turn = self.summary.turns,
            symptom_chars = consultation.symptoms.len(),
            "Starting consultation turn"
        );
        writeln!(self.output, "\nAnalyzing your symptoms...")?;

        let outcome = run_turn(&self.ctx, consultation);

        if outcome.emergency {
            writeln!(self.output, "\n!!! {} !!!", outcome.assessment)?;
        } else {
            writeln!(self.output, "\nRecommended doctors:")?;
            if outcome.matches.is_empty() {
                writeln!(self.output, "  No doctors found matching the criteria.")?;
            }
            for (i, scored) in outcome.matches.iter().enumerate() {
                let d = &scored.doctor;
                writeln!(
                    self.output,
                    "  {}. {} ({}) - {}, {} - rating {} - {} [score {:.1}]",
                    i + 1,
                    d.name,
                    d.specialization,
                    d.location,
                    d.experience,
                    d.rating,
                    d.contact,
                    scored.score
                )?;
            }
            writeln!(self.output, "\nAssessment:\n{}", outcome.assessment.trim_end())?;
        }

        match &outcome.report {
            Some(path) => {
                writeln!(self.output, "\nReport saved to: {}", path.display())?;
                self.summary.reports.push(path.clone());
            }
            None => writeln!(
                self.output,
                "\nThe PDF report could not be generated. See {} for details.",
                crate::config::LOG_FILE
            )?,
        }

        Ok(SessionState::AwaitingContinueDecision)
    }

    fn ask_to_continue(&mut self) -> Result<SessionState, SessionError> {
        let answer = self.prompt("\nWould you like to describe new or changed symptoms? (yes/no): ")?;
        if is_yes(&answer) {
            Ok(SessionState::CollectingFollowUp)
        } else {
            Ok(SessionState::Terminated)
        }
    }

    fn collect_follow_up(&mut self) -> Result<SessionState, SessionError> {
        let symptoms = self.prompt_required(
            "Please describe your current symptoms: ",
            "Symptoms cannot be empty.",
        )?;
        match self.consultation.as_mut() {
            Some(consultation) => consultation.replace_symptoms(&symptoms),
            None => self.consultation = Some(ConsultationState::new(&symptoms)),
        }
        Ok(SessionState::Assessing)
    }

    /// Ask until a non-empty answer is given.
    fn prompt_required(&mut self, question: &str, on_empty: &str) -> Result<String, SessionError> {
        loop {
            let answer = self.prompt(question)?;
            if !answer.is_empty() {
                return Ok(answer);
            }
            writeln!(self.output, "{on_empty}")?;
        }
    }

    fn prompt(&mut self, question: &str) -> Result<String, SessionError> {
        write!(self.output, "{question}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(SessionError::InputClosed);
        }
        Ok(line.trim().to_string())
    }
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "yes" | "y")
}
