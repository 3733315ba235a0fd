//! Grading configuration.
//!
//! [`GradebookConfig`] is built once (from CLI flags or defaults) and passed by
//! reference to everything that needs it.

use clap::ValueEnum;
use serde::Serialize;

/// How outcomes are first sorted before the final grade is decided.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Method {
    /// Merge practice/test ratings per skill and count skill categories.
    #[default]
    Outcome,
    /// Blend the practice and test category percentages.
    #[value(name = "assignment_type", alias = "assignment-type")]
    AssignmentType,
}

/// Shape of the metadata wrapped around each outcome code in a column header.
///
/// The export writes headers like `Course > 1.5-T- Reading result`: everything
/// up to the last `separator` is context, and the trailing `suffix_len`
/// characters are a units marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderFormat {
    pub separator: char,
    pub suffix_len: usize,
}

impl Default for HeaderFormat {
    fn default() -> Self {
        Self {
            separator: '>',
            suffix_len: 7,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GradebookConfig {
    pub practice_code: String,
    pub test_code: String,
    pub method: Method,
    pub header: HeaderFormat,
}

impl Default for GradebookConfig {
    fn default() -> Self {
        Self {
            practice_code: "-P-".to_string(),
            test_code: "-T-".to_string(),
            method: Method::default(),
            header: HeaderFormat::default(),
        }
    }
}

impl GradebookConfig {
    pub fn with_method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    /// Marker letter of the practice code (`P` for `-P-`).
    pub fn practice_letter(&self) -> &str {
        self.practice_code.trim_matches('-')
    }

    /// Marker letter of the test code (`T` for `-T-`).
    pub fn test_letter(&self) -> &str {
        self.test_code.trim_matches('-')
    }

    pub fn is_practice(&self, header: &str) -> bool {
        header.contains(&self.practice_code)
    }

    pub fn is_test(&self, header: &str) -> bool {
        header.contains(&self.test_code)
    }
}
