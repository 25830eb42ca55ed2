use std::io::Write;

use crate::config::GpaCommand;
use crate::core::format::{format_credit_total, format_decimal, format_gpa};
use crate::core::ledger::{GpaLedger, GpaStanding};
use crate::domain::model::Grade;
use crate::domain::ports::LedgerStore;
use crate::utils::error::{Result, SuiteError};
use crate::utils::validation::parse_credits;

/// Listed positions start at 1; the ledger counts from 0.
fn to_index(position: usize, what: &str) -> Result<usize> {
    position
        .checked_sub(1)
        .ok_or_else(|| SuiteError::validation(format!("{} numbers start at 1", what)))
}

fn write_summary<S: LedgerStore>(ledger: &GpaLedger<S>, out: &mut impl Write) -> Result<()> {
    let summary = ledger.summary();
    writeln!(
        out,
        "Current Semester GPA: {} ({})",
        format_gpa(summary.semester_gpa),
        GpaStanding::of(summary.semester_gpa).label()
    )?;
    writeln!(
        out,
        "Cumulative GPA: {} ({})",
        format_gpa(summary.cumulative_gpa),
        GpaStanding::of(summary.cumulative_gpa).label()
    )?;
    writeln!(out, "Total Credits: {}", format_credit_total(summary.total_credits))?;
    Ok(())
}

fn write_course_list<S: LedgerStore>(ledger: &GpaLedger<S>, out: &mut impl Write) -> Result<()> {
    if ledger.in_progress().is_empty() {
        writeln!(out, "No courses added yet")?;
        return Ok(());
    }
    writeln!(out, "{:>3}  {:<30} {:>7} {:>5} {:>6}", "#", "Course", "Credits", "Grade", "Points")?;
    for (i, course) in ledger.in_progress().iter().enumerate() {
        writeln!(
            out,
            "{:>3}  {:<30} {:>7} {:>5} {:>6.1}",
            i + 1,
            course.name(),
            format_decimal(course.credits()),
            course.grade().letter(),
            course.grade_points()
        )?;
    }
    Ok(())
}

fn write_history<S: LedgerStore>(ledger: &GpaLedger<S>, out: &mut impl Write) -> Result<()> {
    if ledger.semesters().is_empty() {
        writeln!(out, "No saved semesters yet")?;
        return Ok(());
    }
    for (i, (semester, summary)) in ledger
        .semesters()
        .iter()
        .zip(ledger.semester_summaries())
        .enumerate()
    {
        writeln!(
            out,
            "{}. {}  GPA: {}  Credits: {}",
            i + 1,
            summary.name,
            format_gpa(summary.gpa),
            format_credit_total(summary.credits)
        )?;
        for course in semester.courses() {
            writeln!(
                out,
                "  • {} - {} credits - Grade: {}",
                course.name(),
                format_decimal(course.credits()),
                course.grade()
            )?;
        }
    }
    Ok(())
}

/// Runs one GPA sub-command. Each invocation is its own process, so course
/// edits are saved here; archive and semester deletion save themselves.
pub fn run_gpa_command<S: LedgerStore>(
    ledger: &mut GpaLedger<S>,
    command: &GpaCommand,
    out: &mut impl Write,
) -> Result<()> {
    match command {
        GpaCommand::Add {
            name,
            credits,
            grade,
        } => {
            let credits = parse_credits(credits)?;
            let grade: Grade = grade.parse()?;
            let course = ledger.add_course(name, credits, grade)?;
            writeln!(
                out,
                "Added {} ({} credits, {})",
                course.name(),
                format_decimal(course.credits()),
                course.grade()
            )?;
            ledger.save()?;
            write_summary(ledger, out)?;
        }
        GpaCommand::Remove { index } => {
            let position = to_index(*index, "Course")?;
            if !ledger.delete_course(position).applied() {
                return Err(SuiteError::validation(format!(
                    "No course #{} in the current semester",
                    index
                )));
            }
            ledger.save()?;
            writeln!(out, "Removed course #{}", index)?;
            write_summary(ledger, out)?;
        }
        GpaCommand::List => write_course_list(ledger, out)?,
        GpaCommand::Summary => write_summary(ledger, out)?,
        GpaCommand::Archive { name } => {
            ledger.archive_semester(name)?;
            writeln!(out, "Semester '{}' saved!", name.trim())?;
            write_summary(ledger, out)?;
        }
        GpaCommand::History => write_history(ledger, out)?,
        GpaCommand::DropSemester { index } => {
            let position = to_index(*index, "Semester")?;
            let name = ledger
                .semesters()
                .get(position)
                .map(|s| s.name().to_string());
            match (name, ledger.delete_semester(position)?.applied()) {
                (Some(name), true) => writeln!(out, "Semester '{}' deleted", name)?,
                _ => {
                    return Err(SuiteError::validation(format!(
                        "No saved semester #{}",
                        index
                    )))
                }
            }
        }
        GpaCommand::Clear { yes } => {
            let count = ledger.in_progress().len();
            if count > 0 && !yes {
                return Err(SuiteError::validation(format!(
                    "Clear all {} current courses? Re-run with --yes to confirm",
                    count
                )));
            }
            if ledger.clear_in_progress().applied() {
                ledger.save()?;
                writeln!(out, "Cleared {} courses", count)?;
            } else {
                writeln!(out, "No courses to clear")?;
            }
        }
        GpaCommand::Export { path } => {
            ledger.export_report_to_path(path)?;
            writeln!(out, "Report exported to {}", path.display())?;
        }
        GpaCommand::Grades => {
            for grade in Grade::ALL {
                writeln!(out, "{:<3} {:.1}", grade.letter(), grade.points())?;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::storage::MemoryStore;

    fn run(ledger: &mut GpaLedger<MemoryStore>, command: GpaCommand) -> Result<String> {
        let mut out = Vec::new();
        run_gpa_command(ledger, &command, &mut out)?;
        Ok(String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_add_saves_and_prints_summary() {
        let mut ledger = GpaLedger::new(MemoryStore::default());
        let text = run(
            &mut ledger,
            GpaCommand::Add {
                name: "Calculus".to_string(),
                credits: "4".to_string(),
                grade: "b+".to_string(),
            },
        )
        .unwrap();

        assert!(text.contains("Added Calculus (4.0 credits, B+)"));
        assert!(text.contains("Current Semester GPA: 3.30 (good)"));
        assert_eq!(ledger.store().save_count(), 1);
    }

    #[test]
    fn test_remove_uses_one_based_positions() {
        let mut ledger = GpaLedger::new(MemoryStore::default());
        ledger.add_course("A", 3.0, Grade::A).unwrap();

        assert!(run(&mut ledger, GpaCommand::Remove { index: 0 }).is_err());
        assert!(run(&mut ledger, GpaCommand::Remove { index: 2 }).is_err());
        run(&mut ledger, GpaCommand::Remove { index: 1 }).unwrap();
        assert!(ledger.in_progress().is_empty());
    }

    #[test]
    fn test_clear_requires_confirmation() {
        let mut ledger = GpaLedger::new(MemoryStore::default());
        ledger.add_course("A", 3.0, Grade::A).unwrap();

        assert!(run(&mut ledger, GpaCommand::Clear { yes: false }).is_err());
        assert_eq!(ledger.in_progress().len(), 1);

        let text = run(&mut ledger, GpaCommand::Clear { yes: true }).unwrap();
        assert_eq!(text, "Cleared 1 courses\n");
    }

    #[test]
    fn test_grades_lists_full_scale() {
        let mut ledger = GpaLedger::new(MemoryStore::default());
        let text = run(&mut ledger, GpaCommand::Grades).unwrap();
        assert_eq!(text.lines().count(), 11);
        assert!(text.starts_with("A   4.0\n"));
        assert!(text.ends_with("F   0.0\n"));
    }
}
