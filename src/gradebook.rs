//! Gradebook loading.
//!
//! Reads the outcome-mastery export into one [`StudentRow`] per student and
//! turns those rows into [`StudentReport`]s.

use std::fs::File;
use std::io::{ErrorKind, Read};
use std::path::{Path, PathBuf};

use tracing::info;

use crate::analyzers::aggregate::build_report;
use crate::analyzers::types::{OutcomeRating, StudentIdentity, StudentReport};
use crate::config::GradebookConfig;
use crate::error::{GradeError, Result};

pub const NAME_COLUMN: &str = "Student name";
pub const ID_COLUMN: &str = "Student ID";
pub const SIS_ID_COLUMN: &str = "Student SIS ID";

/// Columns with this suffix hold the mastery threshold of an outcome, not a rating.
pub const MASTERY_POINTS_SUFFIX: &str = "mastery points";

/// Directory input filenames are resolved against unless overridden.
pub const DEFAULT_INPUT_DIR: &str = "outcome_reports";

#[derive(Debug, Clone, PartialEq)]
pub struct StudentRow {
    pub identity: StudentIdentity,
    pub outcomes: Vec<OutcomeRating>,
}

#[derive(Debug, Clone)]
pub struct Gradebook {
    config: GradebookConfig,
    students: Vec<StudentRow>,
}

impl Gradebook {
    /// Loads a gradebook export from `path`.
    ///
    /// # Errors
    ///
    /// Returns [`GradeError::InputNotFound`] if the file does not exist or
    /// cannot be read, or a parsing error if its contents are malformed.
    pub fn load(path: &Path, config: GradebookConfig) -> Result<Self> {
        let file = File::open(path).map_err(|e| open_error(path, e))?;

        let gradebook = Self::from_reader(file, config)?;
        info!(
            path = %path.display(),
            students = gradebook.students.len(),
            "Gradebook loaded"
        );
        Ok(gradebook)
    }

    /// Reads a gradebook export from any CSV source.
    pub fn from_reader<R: Read>(reader: R, config: GradebookConfig) -> Result<Self> {
        let mut rdr = csv::Reader::from_reader(reader);
        let headers = rdr.headers()?.clone();

        let column = |name: &str| {
            headers
                .iter()
                .position(|h| h == name)
                .ok_or_else(|| GradeError::MissingColumn {
                    name: name.to_string(),
                })
        };
        let name_idx = column(NAME_COLUMN)?;
        let id_idx = column(ID_COLUMN)?;
        let sis_idx = column(SIS_ID_COLUMN)?;

        let outcome_columns: Vec<(usize, &str)> = headers
            .iter()
            .enumerate()
            .filter(|(i, _)| ![name_idx, id_idx, sis_idx].contains(i))
            .filter(|(_, h)| !h.ends_with(MASTERY_POINTS_SUFFIX))
            .collect();

        let mut students = Vec::new();
        for result in rdr.records() {
            let record = result?;
            let field = |idx: usize| record.get(idx).unwrap_or_default().to_string();

            let identity = StudentIdentity {
                name: field(name_idx),
                id: field(id_idx),
                user_id: field(sis_idx),
            };

            let outcomes = outcome_columns
                .iter()
                .map(|&(idx, header)| {
                    let cell = record.get(idx).unwrap_or_default();
                    parse_rating(cell)
                        .map(|rating| OutcomeRating::new(header, rating))
                        .ok_or_else(|| GradeError::MalformedRating {
                            student: identity.name.clone(),
                            header: header.to_string(),
                            value: cell.to_string(),
                        })
                })
                .collect::<Result<Vec<_>>>()?;

            students.push(StudentRow { identity, outcomes });
        }

        Ok(Self { config, students })
    }

    pub fn students(&self) -> &[StudentRow] {
        &self.students
    }

    /// Builds one report per student, in input order.
    ///
    /// # Errors
    ///
    /// Fails on the first student whose outcomes cannot be graded; no partial
    /// report list is returned.
    pub fn reports(&self) -> Result<Vec<StudentReport>> {
        self.students
            .iter()
            .map(|row| build_report(&row.identity, &row.outcomes, &self.config))
            .collect()
    }
}

/// Missing and unreadable inputs are both reported as [`GradeError::InputNotFound`].
fn open_error(path: &Path, err: std::io::Error) -> GradeError {
    match err.kind() {
        ErrorKind::NotFound | ErrorKind::PermissionDenied => GradeError::InputNotFound {
            path: path.to_path_buf(),
        },
        _ => GradeError::Io(err),
    }
}

/// Resolves an input filename against the input directory.
pub fn resolve_input(input_dir: &Path, filename: &str) -> PathBuf {
    input_dir.join(filename)
}

/// Parses one rating cell. Blank and NaN cells are unrated (`Some(None)`);
/// anything else that is not a number is rejected (`None`).
fn parse_rating(cell: &str) -> Option<Option<f64>> {
    let cell = cell.trim();
    if cell.is_empty() {
        return Some(None);
    }
    let value: f64 = cell.parse().ok()?;
    Some(if value.is_nan() { None } else { Some(value) })
}
