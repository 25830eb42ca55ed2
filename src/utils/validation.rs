use crate::utils::error::{Result, SuiteError};

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.trim().is_empty() {
        return Err(SuiteError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(SuiteError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_one_of(field_name: &str, value: &str, allowed: &[&str]) -> Result<()> {
    if allowed.contains(&value) {
        return Ok(());
    }
    Err(SuiteError::InvalidConfigValueError {
        field: field_name.to_string(),
        value: value.to_string(),
        reason: format!("Valid values: {}", allowed.join(", ")),
    })
}

/// Trimmed, non-empty name for a course or semester.
pub fn require_name<'a>(what: &str, value: &'a str) -> Result<&'a str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(SuiteError::validation(format!("Please enter a {} name", what)));
    }
    Ok(trimmed)
}

/// Credits must be a finite number strictly greater than zero.
pub fn require_positive_credits(credits: f64) -> Result<f64> {
    if credits.is_finite() && credits > 0.0 {
        Ok(credits)
    } else {
        Err(SuiteError::validation(
            "Please enter a valid number of credits",
        ))
    }
}

/// 解析表單中的學分字串
pub fn parse_credits(input: &str) -> Result<f64> {
    let credits = input
        .trim()
        .parse::<f64>()
        .map_err(|_| SuiteError::validation("Please enter a valid number of credits"))?;
    require_positive_credits(credits)
}
