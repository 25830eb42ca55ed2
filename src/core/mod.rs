pub mod calculator;
pub mod format;
pub mod keypad;
pub mod ledger;
pub mod report;

pub use crate::domain::model::{AngleMode, CourseRecord, Effect, Grade, LedgerState, Semester};
pub use crate::domain::ports::{ConfigProvider, LedgerStore};
pub use crate::utils::error::Result;
