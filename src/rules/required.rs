//! Required-value rule

use serde_json::Value;

use crate::attribute::ValidationAttribute;

/// Rule rejecting null values and, by default, empty strings
#[derive(Debug, Clone, Default)]
pub struct Required {
    allow_empty_strings: bool,
}

impl Required {
    /// Create the rule with empty strings rejected
    pub fn new() -> Self {
        Self::default()
    }

    /// Accept empty or whitespace-only strings
    pub fn allow_empty_strings(mut self, allow: bool) -> Self {
        self.allow_empty_strings = allow;
        self
    }
}

impl ValidationAttribute for Required {
    fn name(&self) -> &str {
        "required"
    }

    fn is_valid(&self, value: &Value) -> bool {
        match value {
            Value::Null => false,
            Value::String(s) => self.allow_empty_strings || !s.trim().is_empty(),
            _ => true,
        }
    }

    fn error_template(&self) -> &str {
        "the {name} field is required"
    }
}
