//! Validation context passed into every store query
//!
//! A context names the declaring type, optionally a single member of that
//! type, and optionally a live object instance to extract values from.

use serde_json::Value;

use crate::metadata::TypeHandle;

/// Context for store queries
///
/// The declaring type is always required. The member name is required for
/// property-level operations, and the instance is required for value
/// extraction; operations report [`StoreError::MissingMemberName`] or
/// [`StoreError::MissingInstance`] when the component they need is absent.
///
/// [`StoreError::MissingMemberName`]: crate::StoreError::MissingMemberName
/// [`StoreError::MissingInstance`]: crate::StoreError::MissingInstance
#[derive(Debug, Clone)]
pub struct ValidationContext {
    declaring_type: TypeHandle,
    member_name: Option<String>,
    instance: Option<Value>,
}

impl ValidationContext {
    /// Create a context for the given declaring type
    pub fn new(declaring_type: impl Into<TypeHandle>) -> Self {
        Self {
            declaring_type: declaring_type.into(),
            member_name: None,
            instance: None,
        }
    }

    /// Target a single member of the declaring type
    pub fn with_member(mut self, member_name: impl Into<String>) -> Self {
        self.member_name = Some(member_name.into());
        self
    }

    /// Attach the object instance values are extracted from
    pub fn with_instance(mut self, instance: Value) -> Self {
        self.instance = Some(instance);
        self
    }

    /// The declaring type of this context
    pub fn declaring_type(&self) -> TypeHandle {
        self.declaring_type
    }

    /// The targeted member name, if any
    pub fn member_name(&self) -> Option<&str> {
        self.member_name.as_deref()
    }

    /// The attached instance, if any
    pub fn instance(&self) -> Option<&Value> {
        self.instance.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_context_builder() {
        let ctx = ValidationContext::new("Person")
            .with_member("Name")
            .with_instance(json!({"Name": "ada"}));

        assert_eq!(ctx.declaring_type().name(), "Person");
        assert_eq!(ctx.member_name(), Some("Name"));
        assert_eq!(ctx.instance().unwrap()["Name"], json!("ada"));
    }

    #[test]
    fn test_context_defaults_to_type_level() {
        let ctx = ValidationContext::new("Person");
        assert!(ctx.member_name().is_none());
        assert!(ctx.instance().is_none());
    }
}
