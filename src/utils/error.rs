use thiserror::Error;

#[derive(Error, Debug)]
pub enum SuiteError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Validation error: {message}")]
    ValidationError { message: String },

    #[error("Persistence error ({path}): {message}")]
    PersistenceError { path: String, message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Storage,
    Configuration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl SuiteError {
    pub fn validation(message: impl Into<String>) -> Self {
        SuiteError::ValidationError {
            message: message.into(),
        }
    }

    pub fn persistence(path: impl Into<String>, message: impl Into<String>) -> Self {
        SuiteError::PersistenceError {
            path: path.into(),
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            SuiteError::ValidationError { .. } => ErrorCategory::Input,
            SuiteError::IoError(_)
            | SuiteError::SerializationError(_)
            | SuiteError::PersistenceError { .. } => ErrorCategory::Storage,
            SuiteError::ConfigError { .. }
            | SuiteError::ConfigValidationError { .. }
            | SuiteError::InvalidConfigValueError { .. }
            | SuiteError::MissingConfigError { .. } => ErrorCategory::Configuration,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            // 使用者輸入錯誤: 狀態未變更，重新輸入即可
            ErrorCategory::Input => ErrorSeverity::High,
            ErrorCategory::Storage => ErrorSeverity::Medium,
            ErrorCategory::Configuration => ErrorSeverity::Critical,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            SuiteError::ValidationError { message } => message.clone(),
            SuiteError::PersistenceError { path, .. } => {
                format!("Could not read or write GPA data at {}", path)
            }
            SuiteError::IoError(e) => format!("File operation failed: {}", e),
            SuiteError::SerializationError(_) => "GPA data could not be encoded".to_string(),
            SuiteError::MissingConfigError { field } => {
                format!("Missing configuration value: {}", field)
            }
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Input => "Check the course name, credits and grade, then try again",
            ErrorCategory::Storage => {
                "Check that the data file path is writable and contains valid JSON"
            }
            ErrorCategory::Configuration => {
                "Check the --config file and command line flags for typos"
            }
        }
    }

    /// Process exit code matching the error severity.
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }
}

pub type Result<T> = std::result::Result<T, SuiteError>;
