pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::{CliConfig, Command, GpaCommand};

pub use adapters::storage::{JsonFileStore, MemoryStore};
pub use config::AppSettings;
pub use crate::core::calculator::{BinaryOperator, CalculatorEngine, Constant, UnaryFunction};
pub use crate::core::keypad::CalculatorAction;
pub use crate::core::ledger::{compute_gpa, GpaLedger};
pub use domain::model::{AngleMode, CourseRecord, Effect, Grade, LedgerState, Semester};
pub use utils::error::{Result, SuiteError};
