use std::fmt;

use serde::Serialize;

use crate::analyzers::types::EmrnValues;

/// Qualitative mastery category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Emrn {
    /// Exceeds
    E,
    /// Meets
    M,
    /// Revisit
    R,
    /// Not yet
    N,
}

/// Converts a rating on the 0–4 mastery scale into a category.
///
/// | Range            | Category |
/// |------------------|----------|
/// | >= 2.6           | E        |
/// | >= 1.6           | M        |
/// | >= 1.0           | R        |
/// | >= 0.0           | N        |
/// | < 0.0, unrated   | none     |
pub fn categorize(rating: Option<f64>) -> Option<Emrn> {
    match rating? {
        v if v >= 2.6 => Some(Emrn::E),
        v if v >= 1.6 => Some(Emrn::M),
        v if v >= 1.0 => Some(Emrn::R),
        v if v >= 0.0 => Some(Emrn::N),
        // negative or NaN
        _ => None,
    }
}

/// Expected final grade label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FinalGrade {
    #[serde(rename = "NR")]
    NotReady,
    #[serde(rename = "95")]
    Ninety5,
    #[serde(rename = "85")]
    Eighty5,
    #[serde(rename = "75")]
    Seventy5,
    #[serde(rename = "65")]
    Sixty5,
}

impl FinalGrade {
    pub fn as_str(&self) -> &'static str {
        match self {
            FinalGrade::NotReady => "NR",
            FinalGrade::Ninety5 => "95",
            FinalGrade::Eighty5 => "85",
            FinalGrade::Seventy5 => "75",
            FinalGrade::Sixty5 => "65",
        }
    }
}

impl fmt::Display for FinalGrade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Decides the final grade from the skill-level `{E, M, R, N}` values.
/// Rules are checked top to bottom and the first match wins.
///
/// | Rule                        | Grade |
/// |-----------------------------|-------|
/// | N > 0.05                    | NR    |
/// | E >= 0.15 and E + M >= 0.90 | 95    |
/// | E >= 0.02 and E + M >= 0.79 | 85    |
/// | M >= 0.65                   | 75    |
/// | otherwise                   | 65    |
pub fn final_grade(values: &EmrnValues) -> FinalGrade {
    let (e, m, n) = (values.e, values.m, values.n);
    match () {
        _ if n > 0.05 => FinalGrade::NotReady,
        _ if e >= 0.15 && e + m >= 0.90 => FinalGrade::Ninety5,
        _ if e >= 0.02 && e + m >= 0.79 => FinalGrade::Eighty5,
        _ if m >= 0.65 => FinalGrade::Seventy5,
        _ => FinalGrade::Sixty5,
    }
}
