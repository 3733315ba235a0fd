use std::collections::BTreeMap;

use tracing::{debug, warn};

use crate::analyzers::grade::{Emrn, categorize, final_grade};
use crate::analyzers::types::{
    CategoryTally, EmrnValues, OutcomeRating, StudentIdentity, StudentReport,
};
use crate::analyzers::utility::{percentage, weighted_average};
use crate::config::{GradebookConfig, Method};
use crate::error::Result;
use crate::parser::{Category, SkillId, parse_header};

/// Practice and test rating recorded for one skill.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SkillPair {
    pub practice: Option<f64>,
    pub test: Option<f64>,
}

impl SkillPair {
    /// Weighted average when both ratings exist, otherwise whichever one does.
    pub fn merged(&self) -> Option<f64> {
        let practice = self.practice.filter(|v| !v.is_nan());
        let test = self.test.filter(|v| !v.is_nan());
        match (practice, test) {
            (Some(p), Some(t)) => Some(weighted_average(p, t)),
            (Some(p), None) => Some(p),
            (None, Some(t)) => Some(t),
            (None, None) => None,
        }
    }
}

/// Groups ratings by skill id, pairing each practice rating with its test
/// counterpart.
///
/// When the same (skill, category) appears more than once the later column
/// overwrites the earlier one, unrated or not.
///
/// # Errors
///
/// Propagates [`crate::error::GradeError::MalformedCode`] from the parser.
pub fn match_skills(
    outcomes: &[OutcomeRating],
    config: &GradebookConfig,
) -> Result<BTreeMap<SkillId, SkillPair>> {
    let mut skills: BTreeMap<SkillId, SkillPair> = BTreeMap::new();

    for outcome in outcomes {
        let code = parse_header(&outcome.header, config)?;
        let pair = skills.entry(code.skill_id).or_default();
        match code.category {
            Category::Practice => pair.practice = outcome.rating,
            Category::Test => pair.test = outcome.rating,
        }
    }

    Ok(skills)
}

/// Builds the summary report for one student.
///
/// Practice and test percentages are taken over every valid rating whose
/// header carries the respective marker. The final grade is decided from
/// per-skill category counts ([`Method::Outcome`]) or from the
/// `0.6 * test% + 0.4 * practice%` blend ([`Method::AssignmentType`]).
///
/// # Errors
///
/// Returns [`crate::error::GradeError::MalformedCode`] if a header cannot be
/// parsed; only the outcome method parses headers.
#[tracing::instrument(skip_all, fields(student = %identity.name, method = ?config.method))]
pub fn build_report(
    identity: &StudentIdentity,
    outcomes: &[OutcomeRating],
    config: &GradebookConfig,
) -> Result<StudentReport> {
    let practice_total = outcomes
        .iter()
        .filter(|o| o.is_valid() && config.is_practice(&o.header))
        .count();
    let test_total = outcomes
        .iter()
        .filter(|o| o.is_valid() && config.is_test(&o.header))
        .count();

    if practice_total + test_total == 0 {
        warn!("Student has no rated outcomes");
    }

    let categorized: Vec<(&str, Emrn)> = outcomes
        .iter()
        .filter_map(|o| categorize(o.rating).map(|c| (o.header.as_str(), c)))
        .collect();

    let practice_tally: CategoryTally = categorized
        .iter()
        .filter(|(header, _)| config.is_practice(header))
        .map(|(_, c)| *c)
        .collect();
    let test_tally: CategoryTally = categorized
        .iter()
        .filter(|(header, _)| config.is_test(header))
        .map(|(_, c)| *c)
        .collect();

    let practice = EmrnValues::from_fn(|c| percentage(practice_tally.get(c), practice_total));
    let test = EmrnValues::from_fn(|c| percentage(test_tally.get(c), test_total));

    let grade_basis = match config.method {
        Method::Outcome => EmrnValues::from(skill_tally(outcomes, config)?),
        Method::AssignmentType => {
            EmrnValues::from_fn(|c| weighted_average(practice.get(c), test.get(c)))
        }
    };
    let final_grade = final_grade(&grade_basis);

    debug!(
        practice_total,
        test_total,
        ?grade_basis,
        %final_grade,
        "Student graded"
    );

    Ok(StudentReport {
        name: identity.name.clone(),
        id: identity.id.clone(),
        user_id: identity.user_id.clone(),
        login_id: String::new(),
        section: String::new(),
        final_grade,
        practice_e: practice.e,
        practice_m: practice.m,
        practice_r: practice.r,
        practice_n: practice.n,
        test_e: test.e,
        test_m: test.m,
        test_r: test.r,
        test_n: test.n,
        grade_basis,
    })
}

/// Counts merged skill scores per category.
fn skill_tally(outcomes: &[OutcomeRating], config: &GradebookConfig) -> Result<CategoryTally> {
    let skills = match_skills(outcomes, config)?;

    let mut tally = CategoryTally::default();
    for (skill_id, pair) in &skills {
        let merged = pair.merged();
        let category = categorize(merged);
        debug!(skill = %skill_id, ?merged, ?category, "Skill categorized");
        if let Some(category) = category {
            tally.add(category);
        }
    }

    Ok(tally)
}
