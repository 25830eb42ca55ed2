use crate::domain::model::AngleMode;
use crate::utils::error::{Result, SuiteError};
use crate::utils::validation::{validate_one_of, validate_path, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const LOG_FORMATS: [&str; 2] = ["compact", "json"];

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub calculator: CalculatorSection,
    #[serde(default)]
    pub gpa: GpaSection,
    #[serde(default)]
    pub logging: LoggingSection,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CalculatorSection {
    pub angle_mode: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GpaSection {
    pub data_file: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingSection {
    pub format: Option<String>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(SuiteError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| SuiteError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${GPA_DATA_FILE})，未設定的保留原字串
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| SuiteError::ConfigError {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn angle_mode(&self) -> Result<Option<AngleMode>> {
        self.calculator
            .angle_mode
            .as_deref()
            .map(|mode| mode.parse::<AngleMode>())
            .transpose()
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        if let Some(data_file) = &self.gpa.data_file {
            validate_path("gpa.data_file", data_file)?;
        }
        if let Some(format) = &self.logging.format {
            validate_one_of("logging.format", format, &LOG_FORMATS)?;
        }
        self.angle_mode()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_full_config() {
        let toml_content = r#"
[calculator]
angle_mode = "radians"

[gpa]
data_file = "records/gpa.json"

[logging]
format = "json"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.angle_mode().unwrap(), Some(AngleMode::Radians));
        assert_eq!(config.gpa.data_file.as_deref(), Some("records/gpa.json"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_every_section_is_optional() {
        let config = TomlConfig::from_toml_str("").unwrap();
        assert!(config.gpa.data_file.is_none());
        assert_eq!(config.angle_mode().unwrap(), None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("CALC_SUITE_TEST_DATA_FILE", "/tmp/from-env.json");

        let toml_content = r#"
[gpa]
data_file = "${CALC_SUITE_TEST_DATA_FILE}"
"#;
        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.gpa.data_file.as_deref(), Some("/tmp/from-env.json"));

        std::env::remove_var("CALC_SUITE_TEST_DATA_FILE");
    }

    #[test]
    fn test_unset_env_var_is_kept() {
        let toml_content = r#"
[gpa]
data_file = "${CALC_SUITE_SURELY_UNSET_VAR}"
"#;
        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(
            config.gpa.data_file.as_deref(),
            Some("${CALC_SUITE_SURELY_UNSET_VAR}")
        );
    }

    #[test]
    fn test_config_validation() {
        let bad_format = TomlConfig::from_toml_str("[logging]\nformat = \"xml\"\n").unwrap();
        assert!(bad_format.validate().is_err());

        let bad_mode = TomlConfig::from_toml_str("[calculator]\nangle_mode = \"grad\"\n").unwrap();
        assert!(bad_mode.validate().is_err());

        let bad_path = TomlConfig::from_toml_str("[gpa]\ndata_file = \"\"\n").unwrap();
        assert!(bad_path.validate().is_err());
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[calculator]\nangle_mode = \"deg\"\n")
            .unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.angle_mode().unwrap(), Some(AngleMode::Degrees));
    }
}
