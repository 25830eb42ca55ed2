//! Canonical text form of calculator numbers.
//!
//! Whatever `format_number` produces is parsed again by the next operation,
//! so results only survive to 10 decimal places.

const FRACTION_DIGITS: usize = 10;

/// Integral values print without a decimal point; everything else prints with
/// up to 10 fractional digits, trailing zeros and a dangling `.` removed.
pub fn format_number(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }

    let text = if value.fract() == 0.0 {
        format!("{:.0}", value)
    } else {
        let fixed = format!("{:.*}", FRACTION_DIGITS, value);
        fixed.trim_end_matches('0').trim_end_matches('.').to_string()
    };

    // -0.00000000001 rounds to "-0"
    if text == "-0" {
        "0".to_string()
    } else {
        text
    }
}

/// Parses an operand string. Error tokens and partial entries such as `-`
/// yield `None`.
pub fn parse_operand(text: &str) -> Option<f64> {
    text.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

/// Two decimal places, as GPA values are shown everywhere.
pub fn format_gpa(gpa: f64) -> String {
    format!("{:.2}", gpa)
}

/// Credit totals are shown truncated to a whole number.
pub fn format_credit_total(credits: f64) -> String {
    (credits.trunc() as i64).to_string()
}

/// Shortest round-trip form that always keeps a fractional part (`3.0`, `0.1`).
pub fn format_decimal(value: f64) -> String {
    format!("{:?}", value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integral_values_have_no_point() {
        assert_eq!(format_number(56.0), "56");
        assert_eq!(format_number(-3.0), "-3");
        assert_eq!(format_number(120.0), "120");
        assert_eq!(format_number(1e20), "100000000000000000000");
    }

    #[test]
    fn test_fraction_is_capped_at_ten_digits() {
        assert_eq!(format_number(1.0 / 3.0), "0.3333333333");
        assert_eq!(format_number(2.0 / 3.0), "0.6666666667");
        assert_eq!(format_number(std::f64::consts::PI), "3.1415926536");
        assert_eq!(format_number(0.5), "0.5");
    }

    #[test]
    fn test_rounding_to_integer_drops_point() {
        assert_eq!(format_number(0.1 + 0.2), "0.3");
        assert_eq!(format_number(2.99999999999999), "3");
    }

    #[test]
    fn test_negative_zero() {
        assert_eq!(format_number(-0.0), "0");
        assert_eq!(format_number(-0.00000000001), "0");
    }

    #[test]
    fn test_parse_operand() {
        assert_eq!(parse_operand("12.5"), Some(12.5));
        assert_eq!(parse_operand("0."), Some(0.0));
        assert_eq!(parse_operand("-"), None);
        assert_eq!(parse_operand("Error"), None);
        assert_eq!(parse_operand("Error: Div by 0"), None);
        assert_eq!(parse_operand("inf"), None);
    }

    #[test]
    fn test_gpa_and_credit_formatting() {
        assert_eq!(format_gpa(3.5), "3.50");
        assert_eq!(format_gpa(10.0 / 3.0), "3.33");
        assert_eq!(format_credit_total(7.5), "7");
        assert_eq!(format_decimal(3.0), "3.0");
        assert_eq!(format_decimal(3.7), "3.7");
    }
}
