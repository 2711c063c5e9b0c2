//! E-mail address rule

use serde_json::Value;

use crate::attribute::ValidationAttribute;

/// Rule accepting strings that contain exactly one `@`, neither first nor
/// last
///
/// Deliberately regex-free: the check mirrors the annotation catalogue this
/// rule was ported from, trading strictness for predictability. Null is
/// valid; non-strings are not.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmailAddress;

impl ValidationAttribute for EmailAddress {
    fn name(&self) -> &str {
        "email"
    }

    fn is_valid(&self, value: &Value) -> bool {
        let s = match value {
            Value::Null => return true,
            Value::String(s) => s,
            _ => return false,
        };

        let mut found = false;
        for (i, c) in s.char_indices() {
            if c == '@' {
                if found || i == 0 || i == s.len() - c.len_utf8() {
                    return false;
                }
                found = true;
            }
        }
        found
    }

    fn error_template(&self) -> &str {
        "the {name} field is not a valid e-mail address"
    }
}
