use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};

use super::document::compose_report;
use super::pdf::render_pdf;
use super::ReportError;
use crate::models::{ConsultationState, ScoredDoctor};

const MAX_NAME_ATTEMPTS: u32 = 100;

/// Destination for finished reports.
pub trait ReportSink {
    /// Store the report under `filename`, returning where it ended up.
    fn write(&self, filename: &str, bytes: &[u8]) -> Result<PathBuf, ReportError>;
}

/// Writes reports into a directory, never replacing an existing file.
pub struct FileReportSink {
    dir: PathBuf,
}

impl FileReportSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl ReportSink for FileReportSink {
    fn write(&self, filename: &str, bytes: &[u8]) -> Result<PathBuf, ReportError> {
        let (stem, ext) = match filename.rsplit_once('.') {
            Some((stem, ext)) => (stem, format!(".{ext}")),
            None => (filename, String::new()),
        };

        // Two turns within the same second would otherwise collide.
        for attempt in 0..MAX_NAME_ATTEMPTS {
            let name = if attempt == 0 {
                filename.to_string()
            } else {
                format!("{stem}_{attempt}{ext}")
            };
            let path = self.dir.join(&name);

            let mut file = match OpenOptions::new().write(true).create_new(true).open(&path) {
                Ok(file) => file,
                Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => continue,
                Err(source) => {
                    return Err(ReportError::Write {
                        path: path.display().to_string(),
                        source,
                    })
                }
            };
            let written = file.write_all(bytes).and_then(|_| file.sync_all());
            drop(file);
            discard_on_failure(&path, written)?;

            return std::path::absolute(&path).map_err(|source| ReportError::Write {
                path: path.display().to_string(),
                source,
            });
        }

        Err(ReportError::NameExhausted(filename.to_string()))
    }
}

/// Remove a report file whose contents did not make it to disk.
fn discard_on_failure(path: &Path, written: std::io::Result<()>) -> Result<(), ReportError> {
    let Err(source) = written else {
        return Ok(());
    };
    if let Err(e) = std::fs::remove_file(path) {
        tracing::warn!(path = %path.display(), error = %e, "Cannot remove partial report");
    }
    Err(ReportError::Write {
        path: path.display().to_string(),
        source,
    })
}

/// `medical_report_<YYYYMMDD>_<HHMMSS>.pdf`
pub fn report_filename(at: &DateTime<Local>) -> String {
    format!("medical_report_{}.pdf", at.format("%Y%m%d_%H%M%S"))
}

/// Compose, render and store the report for one turn.
///
/// Returns the stored path, or `None` after logging the failure.
pub fn generate_report(
    sink: &dyn ReportSink,
    state: &ConsultationState,
    assessment: &str,
    matches: &[ScoredDoctor],
    now: DateTime<Local>,
) -> Option<PathBuf> {
    let document = compose_report(state, assessment, matches, now);

    let result = render_pdf(&document).and_then(|bytes| sink.write(&report_filename(&now), &bytes));
    match result {
        Ok(path) => {
            tracing::info!(path = %path.display(), "Report written");
            Some(path)
        }
        Err(e) => {
            tracing::error!(error = %e, "Report generation failed");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn fixed_time() -> DateTime<Local> {
        Local.with_ymd_and_hms(2026, 1, 5, 7, 8, 9).unwrap()
    }

    struct BrokenSink;

    impl ReportSink for BrokenSink {
        fn write(&self, filename: &str, _bytes: &[u8]) -> Result<PathBuf, ReportError> {
            Err(ReportError::Write {
                path: filename.to_string(),
                source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only"),
            })
        }
    }

    #[test]
    fn filename_uses_second_precision_timestamp() {
        assert_eq!(report_filename(&fixed_time()), "medical_report_20260105_070809.pdf");
    }

    #[test]
    fn writes_absolute_path_with_content() {
        let tmp = tempfile::tempdir().unwrap();
        let sink = FileReportSink::new(tmp.path());

        let path = sink.write("report.pdf", b"%PDF-1.3 test").unwrap();
        assert!(path.is_absolute());
        assert_eq!(std::fs::read(&path).unwrap(), b"%PDF-1.3 test");
    }

    #[test]
    fn never_overwrites_existing_report() {
        let tmp = tempfile::tempdir().unwrap();
        let sink = FileReportSink::new(tmp.path());

        let first = sink.write("medical_report_x.pdf", b"first").unwrap();
        let second = sink.write("medical_report_x.pdf", b"second").unwrap();

        assert_ne!(first, second);
        assert!(second.ends_with("medical_report_x_1.pdf"));
        assert_eq!(std::fs::read(&first).unwrap(), b"first");
        assert_eq!(std::fs::read(&second).unwrap(), b"second");
    }

    #[test]
    fn missing_directory_is_a_write_error() {
        let tmp = tempfile::tempdir().unwrap();
        let sink = FileReportSink::new(tmp.path().join("missing"));
        let err = sink.write("r.pdf", b"x").unwrap_err();
        assert!(matches!(err, ReportError::Write { .. }));
    }

    #[test]
    fn failed_write_leaves_no_partial_file() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("medical_report_partial.pdf");
        std::fs::write(&path, b"%PDF-1.3 trunc").unwrap();

        let err = discard_on_failure(
            &path,
            Err(std::io::Error::new(std::io::ErrorKind::Other, "disk full")),
        )
        .unwrap_err();

        assert!(matches!(err, ReportError::Write { .. }));
        assert!(!path.exists());
    }

    #[test]
    fn successful_write_is_kept() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("medical_report_ok.pdf");
        std::fs::write(&path, b"%PDF-1.3").unwrap();

        discard_on_failure(&path, Ok(())).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn generate_report_returns_path() {
        let tmp = tempfile::tempdir().unwrap();
        let sink = FileReportSink::new(tmp.path());
        let state = ConsultationState::new("cough");

        let path = generate_report(&sink, &state, "Rest.", &[], fixed_time()).unwrap();
        assert!(path.ends_with("medical_report_20260105_070809.pdf"));
        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(&bytes[0..4], b"%PDF");
    }

    #[test]
    fn generate_report_swallows_sink_failure() {
        let state = ConsultationState::new("cough");
        assert!(generate_report(&BrokenSink, &state, "Rest.", &[], fixed_time()).is_none());
    }
}
