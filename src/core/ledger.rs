use crate::domain::model::{CourseRecord, Effect, Grade, LedgerState, Semester};
use crate::domain::ports::LedgerStore;
use crate::utils::error::{Result, SuiteError};
use crate::utils::validation::require_name;

/// Credit-weighted average of grade points. Empty input, or input with no
/// credits, is defined as 0.0.
pub fn compute_gpa<'a, I>(records: I) -> f64
where
    I: IntoIterator<Item = &'a CourseRecord>,
{
    let (points, credits) = records
        .into_iter()
        .fold((0.0, 0.0), |(points, credits), course| {
            (points + course.quality_points(), credits + course.credits())
        });
    if credits > 0.0 {
        points / credits
    } else {
        0.0
    }
}

pub fn total_credits<'a, I>(records: I) -> f64
where
    I: IntoIterator<Item = &'a CourseRecord>,
{
    records.into_iter().map(CourseRecord::credits).sum()
}

/// Colour band the GPA panels use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GpaStanding {
    Excellent,
    Good,
    Fair,
    Warning,
    Poor,
}

impl GpaStanding {
    pub fn of(gpa: f64) -> Self {
        if gpa >= 3.5 {
            GpaStanding::Excellent
        } else if gpa >= 3.0 {
            GpaStanding::Good
        } else if gpa >= 2.5 {
            GpaStanding::Fair
        } else if gpa >= 2.0 {
            GpaStanding::Warning
        } else {
            GpaStanding::Poor
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            GpaStanding::Excellent => "excellent",
            GpaStanding::Good => "good",
            GpaStanding::Fair => "fair",
            GpaStanding::Warning => "warning",
            GpaStanding::Poor => "poor",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SemesterSummary {
    pub name: String,
    pub gpa: f64,
    pub credits: f64,
    pub course_count: usize,
}

impl SemesterSummary {
    fn of(name: &str, courses: &[CourseRecord]) -> Self {
        Self {
            name: name.to_string(),
            gpa: compute_gpa(courses),
            credits: total_credits(courses),
            course_count: courses.len(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LedgerSummary {
    pub semester_gpa: f64,
    pub cumulative_gpa: f64,
    pub total_credits: f64,
}

/// Archived semesters plus the semester being entered, backed by a store.
///
/// Archive and semester deletion persist immediately; course edits only live
/// in memory until the next `save`.
pub struct GpaLedger<S: LedgerStore> {
    state: LedgerState,
    store: S,
}

impl<S: LedgerStore> GpaLedger<S> {
    /// Empty ledger; nothing is read from the store.
    pub fn new(store: S) -> Self {
        Self {
            state: LedgerState::default(),
            store,
        }
    }

    /// Loads from the store, falling back to an empty ledger when the stored
    /// data cannot be read.
    pub fn open(store: S) -> Self {
        let mut ledger = Self::new(store);
        if let Err(e) = ledger.load() {
            tracing::warn!("⚠️ Starting with an empty ledger: {}", e);
        }
        ledger
    }

    pub fn state(&self) -> &LedgerState {
        &self.state
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn in_progress(&self) -> &[CourseRecord] {
        &self.state.in_progress
    }

    pub fn semesters(&self) -> &[Semester] {
        &self.state.archived_semesters
    }

    pub fn add_course(&mut self, name: &str, credits: f64, grade: Grade) -> Result<&CourseRecord> {
        let course = CourseRecord::new(name, credits, grade)?;
        tracing::debug!(
            "adding course '{}' ({} credits, {})",
            course.name(),
            course.credits(),
            course.grade()
        );
        self.state.in_progress.push(course);
        Ok(&self.state.in_progress[self.state.in_progress.len() - 1])
    }

    pub fn delete_course(&mut self, index: usize) -> Effect {
        if index < self.state.in_progress.len() {
            let removed = self.state.in_progress.remove(index);
            tracing::debug!("removed course '{}'", removed.name());
            Effect::Applied
        } else {
            Effect::Ignored
        }
    }

    pub fn current_semester_gpa(&self) -> f64 {
        compute_gpa(&self.state.in_progress)
    }

    pub fn cumulative_gpa(&self) -> f64 {
        compute_gpa(self.state.all_courses())
    }

    pub fn cumulative_credits(&self) -> f64 {
        total_credits(self.state.all_courses())
    }

    pub fn summary(&self) -> LedgerSummary {
        LedgerSummary {
            semester_gpa: self.current_semester_gpa(),
            cumulative_gpa: self.cumulative_gpa(),
            total_credits: self.cumulative_credits(),
        }
    }

    pub fn semester_summaries(&self) -> Vec<SemesterSummary> {
        self.state
            .archived_semesters
            .iter()
            .map(|s| SemesterSummary::of(s.name(), s.courses()))
            .collect()
    }

    pub fn in_progress_summary(&self) -> SemesterSummary {
        SemesterSummary::of(crate::core::report::UNSAVED_LABEL, &self.state.in_progress)
    }

    /// Moves the in-progress courses into a new named semester and saves.
    ///
    /// If saving fails the archive has still happened in memory; the error is
    /// returned so the caller can report it.
    pub fn archive_semester(&mut self, name: &str) -> Result<()> {
        if self.state.in_progress.is_empty() {
            return Err(SuiteError::validation("No courses to save"));
        }
        let name = require_name("semester", name)?;

        let courses = std::mem::take(&mut self.state.in_progress);
        tracing::info!("💾 Archiving semester '{}' with {} courses", name, courses.len());
        self.state
            .archived_semesters
            .push(Semester::new(name.to_string(), courses));
        self.save()
    }

    pub fn delete_semester(&mut self, index: usize) -> Result<Effect> {
        if index >= self.state.archived_semesters.len() {
            return Ok(Effect::Ignored);
        }
        let removed = self.state.archived_semesters.remove(index);
        tracing::info!("🗑️ Deleted semester '{}'", removed.name());
        self.save()?;
        Ok(Effect::Applied)
    }

    /// Confirmation, if any, is the caller's business.
    pub fn clear_in_progress(&mut self) -> Effect {
        if self.state.in_progress.is_empty() {
            return Effect::Ignored;
        }
        self.state.in_progress.clear();
        Effect::Applied
    }

    pub fn save(&self) -> Result<()> {
        self.store.save(&self.state)
    }

    /// Replaces the in-memory state with the stored one. A missing store keeps
    /// the ledger empty; unreadable data leaves the current state untouched.
    pub fn load(&mut self) -> Result<()> {
        match self.store.load()? {
            Some(state) => {
                tracing::debug!(
                    "loaded {} semesters and {} in-progress courses from {}",
                    state.archived_semesters.len(),
                    state.in_progress.len(),
                    self.store.describe()
                );
                self.state = state;
            }
            None => {
                tracing::debug!("no saved ledger at {}", self.store.describe());
                self.state = LedgerState::default();
            }
        }
        Ok(())
    }
}
