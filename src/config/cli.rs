use crate::domain::model::AngleMode;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "calc-suite")]
#[command(about = "Scientific calculator and GPA tracker")]
pub struct CliConfig {
    /// Path to TOML settings file (defaults to ./calc-suite.toml when present)
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// GPA data file, overrides the settings file
    #[arg(long, global = true)]
    pub data_file: Option<String>,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Scientific calculator
    Calc(CalcArgs),
    /// GPA tracker
    #[command(subcommand)]
    Gpa(GpaCommand),
}

#[derive(Debug, Clone, Args)]
pub struct CalcArgs {
    /// Key sequence to evaluate, e.g. "7*8=" or "2 sqrt"; omit for an interactive session
    #[arg(long, allow_hyphen_values = true)]
    pub keys: Option<String>,

    /// degrees or radians
    #[arg(long)]
    pub angle_mode: Option<AngleMode>,
}

#[derive(Debug, Clone, Subcommand)]
pub enum GpaCommand {
    /// Add a course to the current semester
    Add {
        name: String,
        #[arg(allow_hyphen_values = true)]
        credits: String,
        grade: String,
    },
    /// Remove a course from the current semester (1-based, as listed)
    Remove { index: usize },
    /// List the current semester's courses
    List,
    /// Show semester GPA, cumulative GPA and total credits
    Summary,
    /// Save the current semester under a name
    Archive { name: String },
    /// Show archived semesters
    History,
    /// Delete an archived semester (1-based, as listed)
    DropSemester { index: usize },
    /// Remove every course from the current semester
    Clear {
        #[arg(long)]
        yes: bool,
    },
    /// Write a plain-text report
    Export { path: PathBuf },
    /// Show the grade scale
    Grades,
}
