//! Command-line surface.
//!
//! `-h/--help` and `-v/--version` are handled here instead of by clap so the
//! help output can be the installation guide.

use std::path::Path;

use clap::Parser;

use crate::config::{self, ModelBackend, ModelConfig};

#[derive(Parser, Debug)]
#[command(name = "medconsult")]
#[command(about = "Symptom consultation assistant", long_about = None)]
#[command(disable_help_flag = true, disable_version_flag = true)]
pub struct Cli {
    /// Print the installation guide and exit
    #[arg(short = 'h', long = "help")]
    pub help: bool,

    /// Print the version and exit
    #[arg(short = 'v', long = "version")]
    pub version: bool,

    /// Report whether the required dependencies are available and exit
    #[arg(long = "check-deps")]
    pub check_deps: bool,
}

pub fn version_string() -> String {
    format!("{} v{}", config::APP_NAME, config::APP_VERSION)
}

pub fn install_guide() -> String {
    format!(
        r#"{name} v{version} - symptom consultation assistant

USAGE:
    medconsult                 Start an interactive consultation
    medconsult --check-deps    Check that dependencies are available
    medconsult -v, --version   Print the version
    medconsult -h, --help      Print this guide

INSTALLATION:
    1. Build and install the binary:
           cargo install --path .
    2. Configure the model service (environment or a .env file in the
       working directory):
           GEMINI_API_KEY=<your key>            hosted Gemini (default)
       or, for a local Ollama instance:
           MEDCONSULT_MODEL_BACKEND=ollama
           MEDCONSULT_MODEL=medgemma:latest
       Optional:
           MEDCONSULT_MODEL_URL=<base url>
           MEDCONSULT_MODEL_TIMEOUT_SECS=<seconds>   (default: no timeout)
           RUST_LOG=medconsult=debug
    3. Run `medconsult --check-deps` to verify the setup.

FILES (working directory):
    {roster}    doctor roster, created on first run
    {log}       diagnostic log
    medical_report_<YYYYMMDD>_<HHMMSS>.pdf   one report per consultation turn

This tool does not provide medical diagnoses. In an emergency, call your
local emergency number.
"#,
        name = config::APP_NAME,
        version = config::APP_VERSION,
        roster = config::ROSTER_FILE,
        log = config::LOG_FILE,
    )
}

/// Presence of one runtime dependency.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyStatus {
    pub name: &'static str,
    pub present: bool,
    pub detail: String,
}

/// Check the model credentials, the roster file and the report directory.
pub fn check_dependencies(model: &ModelConfig, roster: &Path, report_dir: &Path) -> Vec<DependencyStatus> {
    let credentials_detail = match model.backend {
        ModelBackend::Gemini if model.has_credentials() => "GEMINI_API_KEY is set".to_string(),
        ModelBackend::Gemini => "set GEMINI_API_KEY (or GOOGLE_API_KEY)".to_string(),
        ModelBackend::Ollama => format!("local Ollama at {}", model.base_url),
    };

    let roster_present = roster.is_file();
    let roster_detail = if roster_present {
        roster.display().to_string()
    } else {
        format!("{} (will be created on first run)", roster.display())
    };

    let dir_writable = std::fs::metadata(report_dir)
        .map(|m| m.is_dir() && !m.permissions().readonly())
        .unwrap_or(false);

    vec![
        DependencyStatus {
            name: "Model credentials",
            present: model.has_credentials(),
            detail: format!("{}: {}", model.backend, credentials_detail),
        },
        DependencyStatus {
            name: "Doctor roster",
            present: roster_present,
            detail: roster_detail,
        },
        DependencyStatus {
            name: "Report directory",
            present: dir_writable,
            detail: report_dir.display().to_string(),
        },
    ]
}

pub fn format_dependency_report(statuses: &[DependencyStatus]) -> String {
    let mut out = String::from("Checking dependencies...\n");
    for s in statuses {
        let mark = if s.present { "[found]  " } else { "[missing]" };
        out.push_str(&format!("  {} {:<18} {}\n", mark, s.name, s.detail));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model(backend: ModelBackend, key: Option<&str>) -> ModelConfig {
        ModelConfig {
            backend,
            api_key: key.map(str::to_string),
            model: "m".into(),
            base_url: "http://localhost:11434".into(),
            timeout_secs: None,
        }
    }

    #[test]
    fn parses_flags() {
        let cli = Cli::try_parse_from(["medconsult", "--check-deps"]).unwrap();
        assert!(cli.check_deps && !cli.help && !cli.version);

        let cli = Cli::try_parse_from(["medconsult", "-h"]).unwrap();
        assert!(cli.help);

        let cli = Cli::try_parse_from(["medconsult", "--version"]).unwrap();
        assert!(cli.version);

        let cli = Cli::try_parse_from(["medconsult"]).unwrap();
        assert!(!cli.help && !cli.version && !cli.check_deps);
    }

    #[test]
    fn unknown_flag_is_rejected() {
        let err = Cli::try_parse_from(["medconsult", "--frobnicate"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::UnknownArgument);
        // Reported on stderr, which main maps to a failure exit code.
        assert!(err.use_stderr());
    }

    #[test]
    fn guide_mentions_configuration() {
        let guide = install_guide();
        assert!(guide.contains("GEMINI_API_KEY"));
        assert!(guide.contains("--check-deps"));
        assert!(guide.contains(config::ROSTER_FILE));
    }

    #[test]
    fn version_string_has_version() {
        assert_eq!(version_string(), format!("MedConsult v{}", config::APP_VERSION));
    }

    #[test]
    fn reports_three_dependencies() {
        let tmp = tempfile::tempdir().unwrap();
        let roster = tmp.path().join("doctors.csv");

        let statuses = check_dependencies(&model(ModelBackend::Gemini, None), &roster, tmp.path());
        assert_eq!(statuses.len(), 3);
        assert!(!statuses[0].present);
        assert!(!statuses[1].present);
        assert!(statuses[2].present);

        std::fs::write(&roster, "Name,Specialization,Location,Experience,Rating,Contact\n").unwrap();
        let statuses = check_dependencies(&model(ModelBackend::Gemini, Some("k")), &roster, tmp.path());
        assert!(statuses.iter().all(|s| s.present));
    }

    #[test]
    fn missing_report_dir_is_absent() {
        let tmp = tempfile::tempdir().unwrap();
        let statuses = check_dependencies(
            &model(ModelBackend::Ollama, None),
            &tmp.path().join("doctors.csv"),
            &tmp.path().join("nope"),
        );
        assert!(statuses[0].present);
        assert!(!statuses[2].present);
    }

    #[test]
    fn report_lists_each_dependency() {
        let statuses = vec![
            DependencyStatus { name: "A", present: true, detail: "ok".into() },
            DependencyStatus { name: "B", present: false, detail: "gone".into() },
        ];
        let text = format_dependency_report(&statuses);
        assert!(text.contains("[found]   A"));
        assert!(text.contains("[missing] B"));
    }
}
