//! Error types for gradebook loading and grade computation.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GradeError {
    #[error("Input gradebook not found or unreadable at path: {path}")]
    InputNotFound { path: PathBuf },

    #[error("Malformed outcome code {header:?}: {reason}")]
    MalformedCode { header: String, reason: String },

    #[error("Malformed rating {value:?} for student {student} in column {header:?}")]
    MalformedRating {
        student: String,
        header: String,
        value: String,
    },

    #[error("Required column {name:?} missing from gradebook")]
    MissingColumn { name: String },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl GradeError {
    pub(crate) fn malformed_code(header: &str, reason: impl Into<String>) -> Self {
        GradeError::MalformedCode {
            header: header.to_string(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, GradeError>;
