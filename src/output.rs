//! Output formatting and persistence for grade reports.
//!
//! Supports pretty-printing, JSON serialization, and CSV export.

use anyhow::Result;
use chrono::NaiveDate;
use csv::WriterBuilder;
use std::fs::File;
use std::path::Path;
use tracing::{debug, info};

use crate::analyzers::types::{REPORT_COLUMNS, StudentReport};

/// Logs a report using Rust's debug pretty-print format.
pub fn print_pretty(report: &StudentReport) {
    debug!("{:#?}", report);
}

/// Logs a report as pretty-printed JSON.
pub fn print_json(report: &StudentReport) -> Result<()> {
    info!("{}", serde_json::to_string_pretty(report)?);
    Ok(())
}

/// Default report filename for a run on `date`, e.g. `2026-10-18_report.csv`.
pub fn report_filename(date: NaiveDate) -> String {
    format!("{}_report.csv", date.format("%Y-%m-%d"))
}

/// Writes all reports to a CSV file at `path`, replacing any existing file.
///
/// The header row is always written, even when there are no reports.
pub fn write_reports(path: &Path, reports: &[StudentReport]) -> Result<()> {
    debug!(path = %path.display(), rows = reports.len(), "Writing report CSV");

    let file = File::create(path)?;
    let mut writer = WriterBuilder::new()
        .has_headers(false) // header row written explicitly below
        .from_writer(file);

    writer.write_record(REPORT_COLUMNS)?;
    for report in reports {
        writer.serialize(report)?;
    }
    writer.flush()?;

    info!(path = %path.display(), rows = reports.len(), "Report written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzers::grade::FinalGrade;
    use crate::analyzers::types::EmrnValues;
    use std::env;
    use std::fs;

    fn temp_path(name: &str) -> std::path::PathBuf {
        env::temp_dir().join(name)
    }

    fn sample_report() -> StudentReport {
        StudentReport {
            name: "Avery Lee".to_string(),
            id: "1001".to_string(),
            user_id: "S-1001".to_string(),
            login_id: String::new(),
            section: String::new(),
            final_grade: FinalGrade::Eighty5,
            practice_e: 50.0,
            practice_m: 25.0,
            practice_r: 25.0,
            practice_n: 0.0,
            test_e: 33.3,
            test_m: 66.7,
            test_r: 0.0,
            test_n: 0.0,
            grade_basis: EmrnValues::default(),
        }
    }

    #[test]
    fn test_print_pretty_does_not_panic() {
        print_pretty(&sample_report());
    }

    #[test]
    fn test_print_json_does_not_panic() {
        print_json(&sample_report()).unwrap();
    }

    #[test]
    fn test_report_filename() {
        let date = NaiveDate::from_ymd_opt(2026, 10, 18).unwrap();
        assert_eq!(report_filename(date), "2026-10-18_report.csv");
    }

    #[test]
    fn test_write_reports_header_and_rows() {
        let path = temp_path("outcome_rater_test_rows.csv");
        let _ = fs::remove_file(&path);

        write_reports(&path, &[sample_report(), sample_report()]).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<_> = content.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], REPORT_COLUMNS.join(","));
        assert_eq!(
            lines[1],
            "Avery Lee,1001,S-1001,,,85,50.0,25.0,25.0,0.0,33.3,66.7,0.0,0.0"
        );

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_write_reports_empty_still_has_header() {
        let path = temp_path("outcome_rater_test_empty.csv");
        let _ = fs::remove_file(&path);

        write_reports(&path, &[]).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().count(), 1);
        assert!(content.starts_with("Student,ID,SIS User ID"));

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_write_reports_overwrites() {
        let path = temp_path("outcome_rater_test_overwrite.csv");
        let _ = fs::remove_file(&path);

        write_reports(&path, &[sample_report(), sample_report()]).unwrap();
        write_reports(&path, &[sample_report()]).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().count(), 2);

        fs::remove_file(&path).unwrap();
    }
}
