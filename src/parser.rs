//! Outcome code parser.
//!
//! Column headers of the mastery export carry a composite code of the form
//! `<number>-<marker>-<description>`, usually wrapped in course context and a
//! units suffix. [`parse_header`] peels the wrapper off and [`parse_code`]
//! splits the code itself.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::config::{GradebookConfig, HeaderFormat};
use crate::error::{GradeError, Result};

/// Numeric skill identifier shared by the practice and test measurement of
/// the same outcome.
///
/// Always finite. Ordered with [`f64::total_cmp`] so it can key a map.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct SkillId(f64);

impl SkillId {
    pub fn new(value: f64) -> Self {
        // -0.0 and 0.0 name the same skill
        Self(if value == 0.0 { 0.0 } else { value })
    }

    pub fn value(self) -> f64 {
        self.0
    }
}

impl PartialEq for SkillId {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for SkillId {}

impl PartialOrd for SkillId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SkillId {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl fmt::Display for SkillId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Category {
    Practice,
    Test,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutcomeCode {
    pub skill_id: SkillId,
    pub category: Category,
    pub description: String,
}

/// Parses a raw column header into an [`OutcomeCode`].
///
/// Keeps only the text after the last [`HeaderFormat::separator`], drops the
/// trailing [`HeaderFormat::suffix_len`] characters, then applies
/// [`parse_code`].
///
/// # Errors
///
/// Returns [`GradeError::MalformedCode`] when what remains is not a valid code.
pub fn parse_header(raw: &str, config: &GradebookConfig) -> Result<OutcomeCode> {
    let code = strip_wrapper(raw, &config.header);
    parse_code(code, config).map_err(|err| match err {
        // report the header as it appears in the file
        GradeError::MalformedCode { reason, .. } => GradeError::malformed_code(raw, reason),
        other => other,
    })
}

/// Parses a bare `<number>-<marker>-<description>` code.
///
/// # Errors
///
/// Returns [`GradeError::MalformedCode`] if there are fewer than three
/// `-`-separated segments, the number is not a finite float, or the marker is
/// neither the practice nor the test letter.
pub fn parse_code(code: &str, config: &GradebookConfig) -> Result<OutcomeCode> {
    let parts: Vec<&str> = code.split('-').collect();
    if parts.len() < 3 {
        return Err(GradeError::malformed_code(
            code,
            format!("expected 3 '-'-separated segments, found {}", parts.len()),
        ));
    }

    let number: f64 = parts[0].trim().parse().map_err(|_| {
        GradeError::malformed_code(code, format!("{:?} is not a number", parts[0].trim()))
    })?;
    if !number.is_finite() {
        return Err(GradeError::malformed_code(code, "skill number is not finite"));
    }

    let marker = parts[1].trim();
    let category = if marker == config.practice_letter() {
        Category::Practice
    } else if marker == config.test_letter() {
        Category::Test
    } else {
        return Err(GradeError::malformed_code(
            code,
            format!("unknown category marker {marker:?}"),
        ));
    };

    let description = parts[2..]
        .join("-")
        .trim_matches(|c: char| c.is_whitespace() || c == '-')
        .to_string();

    Ok(OutcomeCode {
        skill_id: SkillId::new(number),
        category,
        description,
    })
}

impl FromStr for OutcomeCode {
    type Err = GradeError;

    /// Parses a bare code using the default practice/test markers.
    fn from_str(s: &str) -> Result<Self> {
        parse_code(s, &GradebookConfig::default())
    }
}

fn strip_wrapper<'a>(raw: &'a str, format: &HeaderFormat) -> &'a str {
    let tail = raw.rsplit(format.separator).next().unwrap_or(raw);
    let keep = tail.chars().count().saturating_sub(format.suffix_len);
    match tail.char_indices().nth(keep) {
        Some((idx, _)) => &tail[..idx],
        None => tail,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bare_code() {
        let code: OutcomeCode = "1.5-T-Reading Comprehension".parse().unwrap();
        assert_eq!(code.skill_id.value(), 1.5);
        assert_eq!(code.category, Category::Test);
        assert_eq!(code.description, "Reading Comprehension");
    }

    #[test]
    fn test_parse_header_strips_context_and_suffix() {
        let config = GradebookConfig::default();
        let code = parse_header("course>1.5-T-Reading Comprehension-suffix7", &config).unwrap();
        assert_eq!(code.skill_id.value(), 1.5);
        assert_eq!(code.category, Category::Test);
        assert_eq!(code.description, "Reading Comprehension");
    }

    #[test]
    fn test_parse_header_export_format() {
        let config = GradebookConfig::default();
        let code = parse_header("Algebra I > 3-P- Linear Equations result", &config).unwrap();
        assert_eq!(code.skill_id.value(), 3.0);
        assert_eq!(code.category, Category::Practice);
        assert_eq!(code.description, "Linear Equations");
    }

    #[test]
    fn test_description_may_contain_dashes() {
        let code: OutcomeCode = "2-P-Multi-step problems".parse().unwrap();
        assert_eq!(code.description, "Multi-step problems");
    }

    #[test]
    fn test_parse_rejects_non_numeric_skill() {
        let result: Result<OutcomeCode> = "notanumber-P-desc".parse();
        assert!(matches!(result, Err(GradeError::MalformedCode { .. })));
    }

    #[test]
    fn test_parse_rejects_too_few_segments() {
        let result: Result<OutcomeCode> = "1-P".parse();
        assert!(matches!(result, Err(GradeError::MalformedCode { .. })));
    }

    #[test]
    fn test_parse_rejects_unknown_marker() {
        let result: Result<OutcomeCode> = "1-X-desc".parse();
        assert!(matches!(result, Err(GradeError::MalformedCode { .. })));
    }

    #[test]
    fn test_parse_header_error_names_raw_header() {
        let config = GradebookConfig::default();
        let err = parse_header("course>abc-P-Thing result", &config).unwrap_err();
        match err {
            GradeError::MalformedCode { header, .. } => {
                assert_eq!(header, "course>abc-P-Thing result")
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_custom_markers() {
        let config = GradebookConfig {
            practice_code: "-HW-".to_string(),
            test_code: "-EX-".to_string(),
            ..Default::default()
        };
        let code = parse_code("4-EX-Unit test", &config).unwrap();
        assert_eq!(code.category, Category::Test);
    }

    #[test]
    fn test_skill_ids_compare_numerically() {
        assert_eq!(SkillId::new(1.0), "1.0-P-x".parse::<OutcomeCode>().unwrap().skill_id);
        assert_eq!(SkillId::new(-0.0), SkillId::new(0.0));
        assert!(SkillId::new(1.5) < SkillId::new(2.0));
    }

    #[test]
    fn test_strip_wrapper_is_char_based() {
        let format = HeaderFormat {
            separator: '>',
            suffix_len: 2,
        };
        assert_eq!(strip_wrapper("a>1-P-café!!", &format), "1-P-café");
        assert_eq!(strip_wrapper("x", &format), "");
    }
}
