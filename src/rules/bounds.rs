//! Numeric range and string length rules

use serde_json::Value;

use crate::attribute::ValidationAttribute;

/// Rule constraining numeric values to an inclusive range
///
/// Null is valid; non-numeric values are not.
#[derive(Debug, Clone)]
pub struct Range {
    min: f64,
    max: f64,
    template: String,
}

impl Range {
    /// Create a rule accepting values in `[min, max]`
    pub fn new(min: f64, max: f64) -> Self {
        Self {
            min,
            max,
            template: format!("the field {{name}} must be between {min} and {max}"),
        }
    }

    /// The inclusive lower bound
    pub fn min(&self) -> f64 {
        self.min
    }

    /// The inclusive upper bound
    pub fn max(&self) -> f64 {
        self.max
    }
}

impl ValidationAttribute for Range {
    fn name(&self) -> &str {
        "range"
    }

    fn is_valid(&self, value: &Value) -> bool {
        match value {
            Value::Null => true,
            _ => match value.as_f64() {
                Some(n) => n >= self.min && n <= self.max,
                None => false,
            },
        }
    }

    fn error_template(&self) -> &str {
        &self.template
    }
}

/// Rule constraining string length (in characters) to an inclusive range
///
/// Null is valid; non-strings are not.
#[derive(Debug, Clone)]
pub struct StringLength {
    min: usize,
    max: usize,
    template: String,
}

impl StringLength {
    /// Create a rule with a maximum length and no minimum
    pub fn new(max: usize) -> Self {
        Self {
            min: 0,
            max,
            template: format!("the field {{name}} must be a string with a maximum length of {max}"),
        }
    }

    /// Require a minimum length as well
    pub fn with_min(mut self, min: usize) -> Self {
        self.min = min;
        self.template = format!(
            "the field {{name}} must be a string with a minimum length of {min} and a maximum length of {}",
            self.max
        );
        self
    }
}

impl ValidationAttribute for StringLength {
    fn name(&self) -> &str {
        "string_length"
    }

    fn is_valid(&self, value: &Value) -> bool {
        match value {
            Value::Null => true,
            Value::String(s) => {
                let len = s.chars().count();
                len >= self.min && len <= self.max
            }
            _ => false,
        }
    }

    fn error_template(&self) -> &str {
        &self.template
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_range_bounds_inclusive() {
        let rule = Range::new(1.0, 10.0);
        assert!(rule.is_valid(&json!(1)));
        assert!(rule.is_valid(&json!(10)));
        assert!(rule.is_valid(&json!(5.5)));
        assert!(!rule.is_valid(&json!(0)));
        assert!(!rule.is_valid(&json!(10.001)));
    }

    #[test]
    fn test_range_null_valid_non_numeric_invalid() {
        let rule = Range::new(0.0, 1.0);
        assert!(rule.is_valid(&Value::Null));
        assert!(!rule.is_valid(&json!("0.5")));
        assert!(!rule.is_valid(&json!(true)));
    }

    #[test]
    fn test_range_error_message_includes_bounds() {
        let rule = Range::new(18.0, 120.0);
        let msg = rule.format_error("Age");
        assert_eq!(msg, "the field Age must be between 18 and 120");
    }

    #[test]
    fn test_string_length_max_only() {
        let rule = StringLength::new(5);
        assert!(rule.is_valid(&json!("")));
        assert!(rule.is_valid(&json!("abcde")));
        assert!(!rule.is_valid(&json!("abcdef")));
    }

    #[test]
    fn test_string_length_with_min() {
        let rule = StringLength::new(5).with_min(2);
        assert!(!rule.is_valid(&json!("a")));
        assert!(rule.is_valid(&json!("ab")));
    }

    #[test]
    fn test_string_length_counts_characters_not_bytes() {
        let rule = StringLength::new(3);
        assert!(rule.is_valid(&json!("äöü")));
    }

    #[test]
    fn test_string_length_null_valid_non_string_invalid() {
        let rule = StringLength::new(3);
        assert!(rule.is_valid(&Value::Null));
        assert!(!rule.is_valid(&json!(123)));
    }
}
