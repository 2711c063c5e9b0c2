//! URL rule

use serde_json::Value;

use crate::attribute::ValidationAttribute;

const SCHEMES: [&str; 3] = ["http://", "https://", "ftp://"];

/// Rule accepting strings with an `http://`, `https://` or `ftp://` prefix,
/// case-insensitive
///
/// Null is valid; non-strings are not.
#[derive(Debug, Clone, Copy, Default)]
pub struct Url;

fn has_scheme(s: &str, scheme: &str) -> bool {
    s.len() >= scheme.len() && s.as_bytes()[..scheme.len()].eq_ignore_ascii_case(scheme.as_bytes())
}

impl ValidationAttribute for Url {
    fn name(&self) -> &str {
        "url"
    }

    fn is_valid(&self, value: &Value) -> bool {
        match value {
            Value::Null => true,
            Value::String(s) => SCHEMES.iter().any(|scheme| has_scheme(s, scheme)),
            _ => false,
        }
    }

    fn error_template(&self) -> &str {
        "the {name} field is not a valid fully-qualified http, https, or ftp URL"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_accepted_schemes() {
        assert!(Url.is_valid(&json!("http://example.com")));
        assert!(Url.is_valid(&json!("https://example.com")));
        assert!(Url.is_valid(&json!("ftp://example.com/file")));
    }

    #[test]
    fn test_scheme_case_insensitive() {
        assert!(Url.is_valid(&json!("HTTPS://example.com")));
        assert!(Url.is_valid(&json!("HtTp://example.com")));
    }

    #[test]
    fn test_rejected_values() {
        assert!(!Url.is_valid(&json!("example.com")));
        assert!(!Url.is_valid(&json!("file:///etc/passwd")));
        assert!(!Url.is_valid(&json!("http:/example.com")));
        assert!(!Url.is_valid(&json!("")));
        assert!(!Url.is_valid(&json!(80)));
    }

    #[test]
    fn test_null_valid() {
        assert!(Url.is_valid(&Value::Null));
    }
}
