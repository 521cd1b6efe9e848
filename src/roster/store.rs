use std::fs;
use std::path::{Path, PathBuf};

use super::csv::{format_line, parse_line};
use super::seed::seed_roster;
use super::RosterError;
use crate::models::DoctorRecord;

/// Column order of the roster file.
pub const ROSTER_COLUMNS: [&str; 6] = [
    "Name",
    "Specialization",
    "Location",
    "Experience",
    "Rating",
    "Contact",
];

/// Where the roster lives.
pub trait RosterStore {
    /// Read the full roster. Returns `RosterError::NotFound` when nothing has
    /// been stored yet.
    fn load(&self) -> Result<Vec<DoctorRecord>, RosterError>;

    /// Persist a roster, replacing anything stored before.
    fn seed(&self, doctors: &[DoctorRecord]) -> Result<(), RosterError>;
}

/// Roster kept as a CSV file on disk.
pub struct CsvRosterStore {
    path: PathBuf,
}

impl CsvRosterStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RosterStore for CsvRosterStore {
    fn load(&self) -> Result<Vec<DoctorRecord>, RosterError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(RosterError::NotFound(self.path.clone()));
            }
            Err(e) => return Err(e.into()),
        };
        parse_roster(&content)
    }

    fn seed(&self, doctors: &[DoctorRecord]) -> Result<(), RosterError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, format_roster(doctors))?;
        Ok(())
    }
}

/// Load the roster, seeding it on first run.
///
/// Only a missing roster triggers seeding; every other failure is returned.
pub fn load_or_seed(store: &dyn RosterStore) -> Result<Vec<DoctorRecord>, RosterError> {
    match store.load() {
        Ok(doctors) => {
            tracing::info!(count = doctors.len(), "Loaded doctor roster");
            Ok(doctors)
        }
        Err(RosterError::NotFound(path)) => {
            tracing::info!(path = %path.display(), "Roster not found, writing seed roster");
            let doctors = seed_roster();
            store.seed(&doctors)?;
            Ok(doctors)
        }
        Err(e) => Err(e),
    }
}

/// Parse roster CSV text (header row required).
pub fn parse_roster(content: &str) -> Result<Vec<DoctorRecord>, RosterError> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let mut lines = content.lines().enumerate();

    let header = loop {
        match lines.next() {
            Some((_, line)) if line.trim().is_empty() => continue,
            Some((_, line)) => break line,
            None => return Err(RosterError::MissingHeader),
        }
    };

    let header_fields = parse_line(header).ok_or(RosterError::MissingHeader)?;
    let matches_schema = header_fields.len() == ROSTER_COLUMNS.len()
        && header_fields
            .iter()
            .zip(ROSTER_COLUMNS)
            .all(|(found, expected)| found.trim().eq_ignore_ascii_case(expected));
    if !matches_schema {
        return Err(RosterError::InvalidHeader {
            expected: ROSTER_COLUMNS.join(","),
            found: header.to_string(),
        });
    }

    let mut doctors = Vec::new();
    for (idx, line) in lines {
        if line.trim().is_empty() {
            continue;
        }
        let line_no = idx + 1;
        let fields = parse_line(line).ok_or_else(|| RosterError::MalformedRow {
            line: line_no,
            reason: "unterminated quoted field".into(),
        })?;
        if fields.len() != ROSTER_COLUMNS.len() {
            return Err(RosterError::MalformedRow {
                line: line_no,
                reason: format!(
                    "expected {} columns, found {}",
                    ROSTER_COLUMNS.len(),
                    fields.len()
                ),
            });
        }
        doctors.push(DoctorRecord {
            name: fields[0].clone(),
            specialization: fields[1].clone(),
            location: fields[2].clone(),
            experience: fields[3].clone(),
            rating: fields[4].clone(),
            contact: fields[5].clone(),
        });
    }

    Ok(doctors)
}

/// Render a roster as CSV text with header row.
pub fn format_roster(doctors: &[DoctorRecord]) -> String {
    let mut out = format_line(&ROSTER_COLUMNS);
    out.push('\n');
    for d in doctors {
        out.push_str(&format_line(&[
            &d.name,
            &d.specialization,
            &d.location,
            &d.experience,
            &d.rating,
            &d.contact,
        ]));
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_run_seeds_and_persists() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("doctors.csv");
        let store = CsvRosterStore::new(&path);

        let doctors = load_or_seed(&store).unwrap();
        assert_eq!(doctors.len(), 8);
        assert!(path.exists());
    }

    #[test]
    fn seeded_roster_reloads_identically() {
        let tmp = tempfile::tempdir().unwrap();
        let store = CsvRosterStore::new(tmp.path().join("doctors.csv"));

        let seeded = load_or_seed(&store).unwrap();
        let first_bytes = std::fs::read(store.path()).unwrap();

        let reloaded = load_or_seed(&store).unwrap();
        assert_eq!(seeded, reloaded);
        assert_eq!(reloaded, seed_roster());
        assert_eq!(std::fs::read(store.path()).unwrap(), first_bytes);
    }

    #[test]
    fn existing_roster_is_not_overwritten() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("doctors.csv");
        std::fs::write(
            &path,
            "Name,Specialization,Location,Experience,Rating,Contact\n\
             Dr. Solo,Urology,Austin,3 years,4.0,solo@clinic.org\n",
        )
        .unwrap();

        let doctors = load_or_seed(&CsvRosterStore::new(&path)).unwrap();
        assert_eq!(doctors.len(), 1);
        assert_eq!(doctors[0].name, "Dr. Solo");
        assert_eq!(doctors[0].specialization, "Urology");
    }

    #[test]
    fn bad_header_is_fatal() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("doctors.csv");
        std::fs::write(&path, "Doctor,Field\nDr. X,Cardiology\n").unwrap();

        let err = load_or_seed(&CsvRosterStore::new(&path)).unwrap_err();
        assert!(matches!(err, RosterError::InvalidHeader { .. }));
    }

    #[test]
    fn empty_file_is_missing_header() {
        let err = parse_roster("").unwrap_err();
        assert!(matches!(err, RosterError::MissingHeader));
    }

    #[test]
    fn wrong_column_count_reports_line() {
        let content = "Name,Specialization,Location,Experience,Rating,Contact\n\
                       Dr. A,Cardiology,Boston,5 years,4.1,a@x.org\n\
                       Dr. B,Neurology\n";
        match parse_roster(content).unwrap_err() {
            RosterError::MalformedRow { line, .. } => assert_eq!(line, 3),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn unparsable_numbers_are_kept_verbatim() {
        let content = "Name,Specialization,Location,Experience,Rating,Contact\n\
                       Dr. A,Cardiology,Boston,a decade,great,a@x.org\n";
        let doctors = parse_roster(content).unwrap();
        assert_eq!(doctors[0].experience, "a decade");
        assert_eq!(doctors[0].rating, "great");
    }

    #[test]
    fn quoted_fields_round_trip() {
        let doctors = vec![DoctorRecord::new(
            "Dr. Lee, MD",
            "ENT",
            "Portland, OR",
            "9 years",
            "4.2",
            "\"front desk\" 555-0100",
        )];
        let parsed = parse_roster(&format_roster(&doctors)).unwrap();
        assert_eq!(parsed, doctors);
    }

    #[test]
    fn blank_lines_and_bom_are_ignored() {
        let content = "\u{feff}Name,Specialization,Location,Experience,Rating,Contact\n\n\
                       Dr. A,Cardiology,Boston,5 years,4.1,a@x.org\n\n";
        assert_eq!(parse_roster(content).unwrap().len(), 1);
    }

    #[test]
    fn directory_path_is_an_io_error() {
        let tmp = tempfile::tempdir().unwrap();
        let err = CsvRosterStore::new(tmp.path()).load().unwrap_err();
        assert!(matches!(err, RosterError::Io(_)));
    }
}
