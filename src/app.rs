//! Startup wiring: configuration, roster, model client, then the session.

use std::io::{self, BufRead, Write};

use thiserror::Error;

use crate::assessment::{build_client, AssessmentError, LlmClient};
use crate::config::{self, ModelConfig};
use crate::models::DoctorRecord;
use crate::report::FileReportSink;
use crate::roster::{load_or_seed, CsvRosterStore, RosterError};
use crate::session::{Session, SessionError, SessionSummary, TurnContext};

/// Failures that prevent a consultation from starting.
#[derive(Error, Debug)]
pub enum InitError {
    #[error("Cannot load doctor roster: {0}")]
    Roster(#[from] RosterError),

    #[error("Cannot set up model client: {0}")]
    Model(#[from] AssessmentError),
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Init(#[from] InitError),

    #[error(transparent)]
    Session(#[from] SessionError),
}

impl AppError {
    /// End of input counts as the patient leaving, like an interrupt.
    pub fn is_interrupt(&self) -> bool {
        matches!(self, Self::Session(SessionError::InputClosed))
    }
}

/// Everything a session needs, loaded once per process.
pub struct AppContext {
    pub roster: Vec<DoctorRecord>,
    pub client: Box<dyn LlmClient>,
    pub sink: FileReportSink,
}

pub fn initialize(model: &ModelConfig) -> Result<AppContext, InitError> {
    let store = CsvRosterStore::new(config::roster_path());
    let roster = load_or_seed(&store)?;
    let client = build_client(model)?;
    let sink = FileReportSink::new(config::report_dir());

    tracing::info!(
        doctors = roster.len(),
        reports = %sink.dir().display(),
        "Initialization complete"
    );
    Ok(AppContext { roster, client, sink })
}

/// Run a session against the given console handles.
pub fn run_session<R: BufRead, W: Write>(
    ctx: &AppContext,
    input: R,
    output: W,
) -> Result<SessionSummary, SessionError> {
    let turn_ctx = TurnContext {
        roster: &ctx.roster,
        client: ctx.client.as_ref(),
        sink: &ctx.sink,
        top_n: config::DEFAULT_TOP_N,
    };
    Session::new(input, output, turn_ctx).run()
}

/// Blocking entry point for the interactive consultation on stdin/stdout.
pub fn run_interactive() -> Result<SessionSummary, AppError> {
    let model = ModelConfig::from_env();
    tracing::info!(
        backend = %model.backend,
        model = %model.model,
        timeout_secs = ?model.timeout_secs,
        "Starting {} v{}",
        config::APP_NAME,
        config::APP_VERSION
    );

    let ctx = initialize(&model)?;
    let stdin = io::stdin();
    let summary = run_session(&ctx, stdin.lock(), io::stdout())?;
    Ok(summary)
}
