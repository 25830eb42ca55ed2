use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::utils::error::{Result, SuiteError};
use crate::utils::validation::{require_name, require_positive_credits};

/// Whether a state-changing call actually changed anything.
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    Applied,
    Ignored,
}

impl Effect {
    pub fn applied(self) -> bool {
        self == Effect::Applied
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AngleMode {
    #[default]
    Degrees,
    Radians,
}

impl AngleMode {
    pub fn label(self) -> &'static str {
        match self {
            AngleMode::Degrees => "degrees",
            AngleMode::Radians => "radians",
        }
    }
}

impl FromStr for AngleMode {
    type Err = SuiteError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "deg" | "degree" | "degrees" => Ok(AngleMode::Degrees),
            "rad" | "radian" | "radians" => Ok(AngleMode::Radians),
            other => Err(SuiteError::InvalidConfigValueError {
                field: "angle_mode".to_string(),
                value: other.to_string(),
                reason: "Valid values: degrees, radians".to_string(),
            }),
        }
    }
}

/// Letter grades on the 4.0 scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Grade {
    #[serde(rename = "A")]
    A,
    #[serde(rename = "A-")]
    AMinus,
    #[serde(rename = "B+")]
    BPlus,
    #[serde(rename = "B")]
    B,
    #[serde(rename = "B-")]
    BMinus,
    #[serde(rename = "C+")]
    CPlus,
    #[serde(rename = "C")]
    C,
    #[serde(rename = "C-")]
    CMinus,
    #[serde(rename = "D+")]
    DPlus,
    #[serde(rename = "D")]
    D,
    #[serde(rename = "F")]
    F,
}

impl Grade {
    pub const ALL: [Grade; 11] = [
        Grade::A,
        Grade::AMinus,
        Grade::BPlus,
        Grade::B,
        Grade::BMinus,
        Grade::CPlus,
        Grade::C,
        Grade::CMinus,
        Grade::DPlus,
        Grade::D,
        Grade::F,
    ];

    pub fn points(self) -> f64 {
        match self {
            Grade::A => 4.0,
            Grade::AMinus => 3.7,
            Grade::BPlus => 3.3,
            Grade::B => 3.0,
            Grade::BMinus => 2.7,
            Grade::CPlus => 2.3,
            Grade::C => 2.0,
            Grade::CMinus => 1.7,
            Grade::DPlus => 1.3,
            Grade::D => 1.0,
            Grade::F => 0.0,
        }
    }

    pub fn letter(self) -> &'static str {
        match self {
            Grade::A => "A",
            Grade::AMinus => "A-",
            Grade::BPlus => "B+",
            Grade::B => "B",
            Grade::BMinus => "B-",
            Grade::CPlus => "C+",
            Grade::C => "C",
            Grade::CMinus => "C-",
            Grade::DPlus => "D+",
            Grade::D => "D",
            Grade::F => "F",
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.letter())
    }
}

impl FromStr for Grade {
    type Err = SuiteError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_ascii_uppercase();
        Grade::ALL
            .into_iter()
            .find(|g| g.letter() == wanted)
            .ok_or_else(|| {
                SuiteError::validation(format!(
                    "Unknown grade '{}'. Valid grades: {}",
                    s.trim(),
                    Grade::ALL.map(Grade::letter).join(", ")
                ))
            })
    }
}

/// A single graded course. Fields are read-only once constructed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawCourse")]
pub struct CourseRecord {
    name: String,
    credits: f64,
    grade: Grade,
    points: f64,
}

impl CourseRecord {
    pub fn new(name: &str, credits: f64, grade: Grade) -> Result<Self> {
        let name = require_name("course", name)?;
        let credits = require_positive_credits(credits)?;
        Ok(Self {
            name: name.to_string(),
            credits,
            grade,
            points: grade.points(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn credits(&self) -> f64 {
        self.credits
    }

    pub fn grade(&self) -> Grade {
        self.grade
    }

    pub fn grade_points(&self) -> f64 {
        self.points
    }

    pub fn quality_points(&self) -> f64 {
        self.credits * self.points
    }
}

/// Course as stored on disk. `points` is recomputed from `grade` on load.
#[derive(Deserialize)]
struct RawCourse {
    name: String,
    credits: f64,
    grade: Grade,
}

impl TryFrom<RawCourse> for CourseRecord {
    type Error = SuiteError;

    fn try_from(raw: RawCourse) -> Result<Self> {
        CourseRecord::new(&raw.name, raw.credits, raw.grade)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Semester {
    name: String,
    courses: Vec<CourseRecord>,
}

impl Semester {
    pub(crate) fn new(name: String, courses: Vec<CourseRecord>) -> Self {
        Self { name, courses }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn courses(&self) -> &[CourseRecord] {
        &self.courses
    }
}

/// Everything the GPA ledger persists. Older files may omit either list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LedgerState {
    #[serde(rename = "semesters", default)]
    pub archived_semesters: Vec<Semester>,
    #[serde(rename = "current_courses", default)]
    pub in_progress: Vec<CourseRecord>,
}

impl LedgerState {
    pub fn is_empty(&self) -> bool {
        self.archived_semesters.is_empty() && self.in_progress.is_empty()
    }

    /// Archived courses in archival order, followed by the in-progress ones.
    pub fn all_courses(&self) -> impl Iterator<Item = &CourseRecord> {
        self.archived_semesters
            .iter()
            .flat_map(|s| s.courses.iter())
            .chain(self.in_progress.iter())
    }
}
