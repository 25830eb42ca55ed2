#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli::{CalcArgs, CliConfig, Command, GpaCommand};

use crate::domain::model::AngleMode;
use crate::domain::ports::ConfigProvider;
use crate::utils::error::{Result, SuiteError};
use crate::utils::validation::{validate_path, Validate};
use std::path::Path;
use toml_config::TomlConfig;

pub const DEFAULT_CONFIG_FILE: &str = "calc-suite.toml";
pub const DEFAULT_DATA_FILE: &str = "gpa_data.json";

/// Settings after merging flags, the TOML file and built-in defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct AppSettings {
    pub data_file: String,
    pub angle_mode: AngleMode,
    pub json_logging: bool,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            data_file: DEFAULT_DATA_FILE.to_string(),
            angle_mode: AngleMode::default(),
            json_logging: false,
        }
    }
}

impl AppSettings {
    pub fn from_toml(config: &TomlConfig) -> Result<Self> {
        config.validate()?;
        let defaults = Self::default();
        Ok(Self {
            data_file: config.gpa.data_file.clone().unwrap_or(defaults.data_file),
            angle_mode: config.angle_mode()?.unwrap_or(defaults.angle_mode),
            json_logging: config.logging.format.as_deref() == Some("json"),
        })
    }

    /// Reads the settings file. An explicit path must exist; the default one
    /// is optional.
    pub fn load(config_path: Option<&str>) -> Result<Self> {
        match config_path {
            Some(path) => {
                if !Path::new(path).exists() {
                    return Err(SuiteError::ConfigError {
                        message: format!("config file '{}' not found", path),
                    });
                }
                Self::from_toml(&TomlConfig::from_file(path)?)
            }
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
                Self::from_toml(&TomlConfig::from_file(DEFAULT_CONFIG_FILE)?)
            }
            None => Ok(Self::default()),
        }
    }

    pub fn with_overrides(mut self, data_file: Option<&str>, angle_mode: Option<AngleMode>) -> Self {
        if let Some(data_file) = data_file {
            self.data_file = data_file.to_string();
        }
        if let Some(mode) = angle_mode {
            self.angle_mode = mode;
        }
        self
    }

    #[cfg(feature = "cli")]
    pub fn resolve(cli: &CliConfig) -> Result<Self> {
        let angle_mode = match &cli.command {
            Command::Calc(args) => args.angle_mode,
            Command::Gpa(_) => None,
        };
        let settings = Self::load(cli.config.as_deref())?
            .with_overrides(cli.data_file.as_deref(), angle_mode);
        settings.validate()?;
        Ok(settings)
    }
}

impl Validate for AppSettings {
    fn validate(&self) -> Result<()> {
        validate_path("data_file", &self.data_file)
    }
}

impl ConfigProvider for AppSettings {
    fn data_file(&self) -> &str {
        &self.data_file
    }

    fn angle_mode(&self) -> AngleMode {
        self.angle_mode
    }

    fn json_logging(&self) -> bool {
        self.json_logging
    }
}
