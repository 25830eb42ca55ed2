//! Plain-text GPA report.

use std::io::Write;

use crate::core::format::{format_credit_total, format_decimal, format_gpa};
use crate::core::ledger::{compute_gpa, total_credits, GpaLedger};
use crate::domain::model::CourseRecord;
use crate::domain::ports::LedgerStore;
use crate::utils::error::{Result, SuiteError};

pub const UNSAVED_LABEL: &str = "Current Semester (Unsaved)";

const RULE_WIDTH: usize = 50;

fn rule(out: &mut impl Write, c: char) -> std::io::Result<()> {
    writeln!(out, "{}", c.to_string().repeat(RULE_WIDTH))
}

fn write_section(out: &mut impl Write, title: &str, courses: &[CourseRecord]) -> std::io::Result<()> {
    rule(out, '-')?;
    writeln!(out, "{}", title)?;
    rule(out, '-')?;
    writeln!(out, "Semester GPA: {}", format_gpa(compute_gpa(courses)))?;
    writeln!(out, "Credits: {}", format_credit_total(total_credits(courses)))?;
    writeln!(out)?;

    for course in courses {
        writeln!(out, "  {}", course.name())?;
        writeln!(
            out,
            "    Credits: {}, Grade: {}, Points: {}",
            format_decimal(course.credits()),
            course.grade(),
            format_decimal(course.grade_points())
        )?;
    }
    Ok(())
}

impl<S: LedgerStore> GpaLedger<S> {
    /// Writes the report: cumulative header, archived semesters in order, then
    /// the in-progress courses. Refuses when there is nothing to report.
    pub fn export_report(&self, sink: &mut impl Write) -> Result<()> {
        let state = self.state();
        if state.is_empty() {
            return Err(SuiteError::validation("No data to export"));
        }

        rule(sink, '=')?;
        writeln!(sink, "GPA REPORT")?;
        rule(sink, '=')?;
        writeln!(sink)?;

        writeln!(sink, "Cumulative GPA: {}", format_gpa(self.cumulative_gpa()))?;
        writeln!(
            sink,
            "Total Credits: {}",
            format_credit_total(self.cumulative_credits())
        )?;
        writeln!(sink)?;

        for semester in &state.archived_semesters {
            write_section(sink, &format!("Semester: {}", semester.name()), semester.courses())?;
            writeln!(sink)?;
        }

        if !state.in_progress.is_empty() {
            write_section(sink, UNSAVED_LABEL, &state.in_progress)?;
        }

        sink.flush()?;
        Ok(())
    }

    /// Convenience for callers that want the report as a string.
    pub fn render_report(&self) -> Result<String> {
        let mut buffer = Vec::new();
        self.export_report(&mut buffer)?;
        Ok(String::from_utf8_lossy(&buffer).into_owned())
    }

    pub fn export_report_to_path(&self, path: &std::path::Path) -> Result<()> {
        let text = self.render_report()?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, text)?;
        tracing::info!("📄 Report exported to {}", path.display());
        Ok(())
    }
}
