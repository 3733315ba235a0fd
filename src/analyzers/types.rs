//! Data types used by the grading pipeline.

use serde::Serialize;

use crate::analyzers::grade::{Emrn, FinalGrade};

/// Who a report belongs to, copied verbatim from the gradebook row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StudentIdentity {
    pub name: String,
    pub id: String,
    pub user_id: String,
}

/// One rated (or unrated) outcome column of a student's row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutcomeRating {
    pub header: String,
    pub rating: Option<f64>,
}

impl OutcomeRating {
    pub fn new(header: impl Into<String>, rating: Option<f64>) -> Self {
        Self {
            header: header.into(),
            rating,
        }
    }

    /// A rating is valid when present and not NaN. Negative values are valid
    /// but never categorized.
    pub fn is_valid(&self) -> bool {
        self.rating.is_some_and(|v| !v.is_nan())
    }
}

/// Occurrence counts per category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CategoryTally {
    pub e: usize,
    pub m: usize,
    pub r: usize,
    pub n: usize,
}

impl CategoryTally {
    pub fn add(&mut self, category: Emrn) {
        *self.slot(category) += 1;
    }

    pub fn get(&self, category: Emrn) -> usize {
        match category {
            Emrn::E => self.e,
            Emrn::M => self.m,
            Emrn::R => self.r,
            Emrn::N => self.n,
        }
    }

    fn slot(&mut self, category: Emrn) -> &mut usize {
        match category {
            Emrn::E => &mut self.e,
            Emrn::M => &mut self.m,
            Emrn::R => &mut self.r,
            Emrn::N => &mut self.n,
        }
    }
}

impl FromIterator<Emrn> for CategoryTally {
    fn from_iter<I: IntoIterator<Item = Emrn>>(iter: I) -> Self {
        let mut tally = CategoryTally::default();
        for category in iter {
            tally.add(category);
        }
        tally
    }
}

/// A real value per category: percentages, blended percentages, or skill counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct EmrnValues {
    pub e: f64,
    pub m: f64,
    pub r: f64,
    pub n: f64,
}

impl EmrnValues {
    pub fn from_fn(mut f: impl FnMut(Emrn) -> f64) -> Self {
        Self {
            e: f(Emrn::E),
            m: f(Emrn::M),
            r: f(Emrn::R),
            n: f(Emrn::N),
        }
    }

    pub fn get(&self, category: Emrn) -> f64 {
        match category {
            Emrn::E => self.e,
            Emrn::M => self.m,
            Emrn::R => self.r,
            Emrn::N => self.n,
        }
    }
}

impl From<CategoryTally> for EmrnValues {
    fn from(tally: CategoryTally) -> Self {
        EmrnValues::from_fn(|c| tally.get(c) as f64)
    }
}

/// One row of the summary grade report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StudentReport {
    #[serde(rename = "Student")]
    pub name: String,
    #[serde(rename = "ID")]
    pub id: String,
    #[serde(rename = "SIS User ID")]
    pub user_id: String,
    #[serde(rename = "SIS Login ID")]
    pub login_id: String,
    #[serde(rename = "Section")]
    pub section: String,
    #[serde(rename = "Expected Final Grade")]
    pub final_grade: FinalGrade,

    #[serde(rename = "Practice % of Es so far")]
    pub practice_e: f64,
    #[serde(rename = "Practice % of Ms so far")]
    pub practice_m: f64,
    #[serde(rename = "Practice % of Rs so far")]
    pub practice_r: f64,
    #[serde(rename = "Practice % of Ns so far")]
    pub practice_n: f64,

    #[serde(rename = "Test % of Es so far")]
    pub test_e: f64,
    #[serde(rename = "Test % of Ms so far")]
    pub test_m: f64,
    #[serde(rename = "Test % of Rs so far")]
    pub test_r: f64,
    #[serde(rename = "Test % of Ns so far")]
    pub test_n: f64,

    /// The `{E, M, R, N}` values the final grade was decided from.
    #[serde(skip)]
    pub grade_basis: EmrnValues,
}

impl StudentReport {
    pub fn practice_percentages(&self) -> EmrnValues {
        EmrnValues {
            e: self.practice_e,
            m: self.practice_m,
            r: self.practice_r,
            n: self.practice_n,
        }
    }

    pub fn test_percentages(&self) -> EmrnValues {
        EmrnValues {
            e: self.test_e,
            m: self.test_m,
            r: self.test_r,
            n: self.test_n,
        }
    }
}

/// Column order of the report CSV.
pub const REPORT_COLUMNS: [&str; 14] = [
    "Student",
    "ID",
    "SIS User ID",
    "SIS Login ID",
    "Section",
    "Expected Final Grade",
    "Practice % of Es so far",
    "Practice % of Ms so far",
    "Practice % of Rs so far",
    "Practice % of Ns so far",
    "Test % of Es so far",
    "Test % of Ms so far",
    "Test % of Rs so far",
    "Test % of Ns so far",
];
