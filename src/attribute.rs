//! Rule and display descriptors
//!
//! This module defines the capability contract concrete validation rules
//! implement, the display metadata attached to types and properties, and the
//! immutable attribute set that groups both for a single type or property.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Capability contract for validation rule descriptors
///
/// A rule is a reusable, pure predicate over a value plus an error-message
/// template. Rules never mutate the value and hold no per-validation state,
/// so a single instance can be shared across types and threads.
///
/// By convention every rule except `Required` treats null as valid;
/// required-ness is a separate concern composed alongside other rules.
pub trait ValidationAttribute: Send + Sync {
    /// Short identifier for this rule (e.g. "email", "range")
    fn name(&self) -> &str;

    /// Test whether the value satisfies this rule
    fn is_valid(&self, value: &Value) -> bool;

    /// Error-message template; `{name}` expands to the property display name
    fn error_template(&self) -> &str;

    /// Expand the error template for the given display name
    fn format_error(&self, display_name: &str) -> String {
        self.error_template().replace("{name}", display_name)
    }
}

impl fmt::Debug for dyn ValidationAttribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidationAttribute")
            .field("name", &self.name())
            .finish()
    }
}

/// Display metadata for a type or property
///
/// Carries human-facing presentation hints only; it has no say in whether a
/// value is valid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayAttribute {
    /// Human-readable label
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Abbreviated label for narrow layouts
    #[serde(skip_serializing_if = "Option::is_none")]
    pub short_label: Option<String>,
    /// Longer description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Relative ordering hint
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<i32>,
}

impl DisplayAttribute {
    /// Create an empty display attribute
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the label
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Set the short label
    pub fn with_short_label(mut self, short_label: impl Into<String>) -> Self {
        self.short_label = Some(short_label.into());
        self
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the ordering hint
    pub fn with_order(mut self, order: i32) -> Self {
        self.order = Some(order);
        self
    }

    /// The label, or the given fallback when none is set
    pub fn label_or<'a>(&'a self, fallback: &'a str) -> &'a str {
        self.label.as_deref().unwrap_or(fallback)
    }
}

/// Immutable, ordered set of rule descriptors plus at most one display
/// descriptor, attached to a type or to a single property
///
/// Built once when the owning record is created; never mutated afterwards.
#[derive(Clone)]
pub struct AttributeSet {
    rules: Vec<Arc<dyn ValidationAttribute>>,
    display: Option<DisplayAttribute>,
}

impl AttributeSet {
    /// Create an attribute set from rules and an optional display descriptor
    pub fn new(rules: Vec<Arc<dyn ValidationAttribute>>, display: Option<DisplayAttribute>) -> Self {
        Self { rules, display }
    }

    /// Create an empty attribute set
    pub fn empty() -> Self {
        Self {
            rules: Vec::new(),
            display: None,
        }
    }

    /// The rule descriptors, in declaration order
    pub fn rules(&self) -> &[Arc<dyn ValidationAttribute>] {
        &self.rules
    }

    /// The display descriptor, if one was declared
    pub fn display(&self) -> Option<&DisplayAttribute> {
        self.display.as_ref()
    }

    /// Whether the set carries neither rules nor display metadata
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty() && self.display.is_none()
    }
}

impl fmt::Debug for AttributeSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AttributeSet")
            .field(
                "rules",
                &self.rules.iter().map(|r| r.name().to_string()).collect::<Vec<_>>(),
            )
            .field("display", &self.display)
            .finish()
    }
}
