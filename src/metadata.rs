//! Explicit metadata registration model
//!
//! Replaces reflective attribute discovery: concrete models declare their
//! validation rules, display hints and property shapes through the builders
//! in this module, and the resulting [`MetadataRegistry`] is handed to the
//! store at startup. Type identity is a [`TypeHandle`], an interned static
//! type name.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::attribute::{DisplayAttribute, ValidationAttribute};
use crate::error::ValueReadError;

/// Opaque handle identifying a registered type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TypeHandle(&'static str);

impl TypeHandle {
    /// Create a handle from a static type name
    pub const fn new(name: &'static str) -> Self {
        TypeHandle(name)
    }

    /// The type name this handle was created from
    pub fn name(&self) -> &'static str {
        self.0
    }
}

impl From<&'static str> for TypeHandle {
    fn from(name: &'static str) -> Self {
        TypeHandle(name)
    }
}

impl fmt::Display for TypeHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// Shape classification of a property's declared type
///
/// The shape decides whether the graph extractor recurses into the
/// property's value and, when it does, which registered type drives the
/// nested walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyShape {
    /// Scalar or otherwise opaque value; emitted, never recursed
    Scalar,
    /// Opaque sequence (raw array); emitted, never recursed
    Array,
    /// Keyed collection; emitted, entries are not recursed
    Dictionary,
    /// Sequence of objects; each element is recursed with this type
    ObjectList(TypeHandle),
    /// Nested object; recursed with its declared type
    Object(TypeHandle),
}

/// Fallible custom reader for a property's current value
///
/// Readers return `Ok(None)` when the value is absent and `Err` when the
/// access itself failed. Failures are recovered by the extractor: logged
/// once and recorded as null.
pub type ValueReader = dyn Fn(&Value) -> std::result::Result<Option<Value>, ValueReadError> + Send + Sync;

/// Declared metadata for a single property
pub struct PropertyMetadata {
    name: String,
    declared_type: TypeHandle,
    shape: PropertyShape,
    rules: Vec<Arc<dyn ValidationAttribute>>,
    display: Option<DisplayAttribute>,
    reader: Option<Arc<ValueReader>>,
}

impl PropertyMetadata {
    fn with_shape(
        name: impl Into<String>,
        declared_type: impl Into<TypeHandle>,
        shape: PropertyShape,
    ) -> Self {
        Self {
            name: name.into(),
            declared_type: declared_type.into(),
            shape,
            rules: Vec::new(),
            display: None,
            reader: None,
        }
    }

    /// Declare a scalar (non-recursed) property
    pub fn scalar(name: impl Into<String>, declared_type: impl Into<TypeHandle>) -> Self {
        Self::with_shape(name, declared_type, PropertyShape::Scalar)
    }

    /// Declare an opaque sequence property
    pub fn array(name: impl Into<String>, declared_type: impl Into<TypeHandle>) -> Self {
        Self::with_shape(name, declared_type, PropertyShape::Array)
    }

    /// Declare a keyed-collection property
    pub fn dictionary(name: impl Into<String>, declared_type: impl Into<TypeHandle>) -> Self {
        Self::with_shape(name, declared_type, PropertyShape::Dictionary)
    }

    /// Declare a nested-object property, recursed with its declared type
    pub fn object(name: impl Into<String>, declared_type: impl Into<TypeHandle>) -> Self {
        let declared_type = declared_type.into();
        Self::with_shape(name, declared_type, PropertyShape::Object(declared_type))
    }

    /// Declare a sequence-of-objects property, recursed per element with the
    /// given element type
    pub fn object_list(
        name: impl Into<String>,
        declared_type: impl Into<TypeHandle>,
        element_type: impl Into<TypeHandle>,
    ) -> Self {
        Self::with_shape(
            name,
            declared_type,
            PropertyShape::ObjectList(element_type.into()),
        )
    }

    /// Attach a validation rule
    pub fn with_rule(mut self, rule: impl ValidationAttribute + 'static) -> Self {
        self.rules.push(Arc::new(rule));
        self
    }

    /// Attach an already-shared validation rule
    pub fn with_rule_arc(mut self, rule: Arc<dyn ValidationAttribute>) -> Self {
        self.rules.push(rule);
        self
    }

    /// Attach the display descriptor (at most one per property)
    pub fn with_display(mut self, display: DisplayAttribute) -> Self {
        self.display = Some(display);
        self
    }

    /// Attach a custom value reader replacing field lookup by name
    pub fn with_reader<F>(mut self, reader: F) -> Self
    where
        F: Fn(&Value) -> std::result::Result<Option<Value>, ValueReadError> + Send + Sync + 'static,
    {
        self.reader = Some(Arc::new(reader));
        self
    }

    /// The property name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The declared type of the property
    pub fn declared_type(&self) -> TypeHandle {
        self.declared_type
    }

    /// The shape classification of the declared type
    pub fn shape(&self) -> PropertyShape {
        self.shape
    }

    pub(crate) fn rules(&self) -> &[Arc<dyn ValidationAttribute>] {
        &self.rules
    }

    pub(crate) fn display(&self) -> Option<&DisplayAttribute> {
        self.display.as_ref()
    }

    pub(crate) fn reader(&self) -> Option<&Arc<ValueReader>> {
        self.reader.as_ref()
    }
}

impl fmt::Debug for PropertyMetadata {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PropertyMetadata")
            .field("name", &self.name)
            .field("declared_type", &self.declared_type)
            .field("shape", &self.shape)
            .field("rules", &self.rules.len())
            .finish()
    }
}

/// Declared metadata for a type: its own attributes plus its properties in
/// declaration order
pub struct TypeMetadata {
    handle: TypeHandle,
    rules: Vec<Arc<dyn ValidationAttribute>>,
    display: Option<DisplayAttribute>,
    properties: Vec<PropertyMetadata>,
}

impl TypeMetadata {
    /// Start declaring metadata for a type
    pub fn new(handle: impl Into<TypeHandle>) -> Self {
        Self {
            handle: handle.into(),
            rules: Vec::new(),
            display: None,
            properties: Vec::new(),
        }
    }

    /// Attach a type-level validation rule
    pub fn with_rule(mut self, rule: impl ValidationAttribute + 'static) -> Self {
        self.rules.push(Arc::new(rule));
        self
    }

    /// Attach an already-shared type-level validation rule
    pub fn with_rule_arc(mut self, rule: Arc<dyn ValidationAttribute>) -> Self {
        self.rules.push(rule);
        self
    }

    /// Attach the type-level display descriptor
    pub fn with_display(mut self, display: DisplayAttribute) -> Self {
        self.display = Some(display);
        self
    }

    /// Declare a property; declaration order is preserved by the extractor
    pub fn with_property(mut self, property: PropertyMetadata) -> Self {
        if self.properties.iter().any(|p| p.name == property.name) {
            tracing::warn!(
                type_name = self.handle.name(),
                property = property.name.as_str(),
                "replacing previously declared property"
            );
            self.properties.retain(|p| p.name != property.name);
        }
        self.properties.push(property);
        self
    }

    /// The handle this metadata is registered under
    pub fn handle(&self) -> TypeHandle {
        self.handle
    }

    pub(crate) fn rules(&self) -> &[Arc<dyn ValidationAttribute>] {
        &self.rules
    }

    pub(crate) fn display(&self) -> Option<&DisplayAttribute> {
        self.display.as_ref()
    }

    pub(crate) fn properties(&self) -> &[PropertyMetadata] {
        &self.properties
    }
}

impl fmt::Debug for TypeMetadata {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeMetadata")
            .field("handle", &self.handle)
            .field("rules", &self.rules.len())
            .field("properties", &self.properties)
            .finish()
    }
}

/// Registry of declared type metadata, consumed by the store
#[derive(Debug, Default)]
pub struct MetadataRegistry {
    types: HashMap<TypeHandle, Arc<TypeMetadata>>,
}

impl MetadataRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register type metadata; re-registering a handle replaces the previous
    /// entry
    pub fn register(&mut self, metadata: TypeMetadata) -> &mut Self {
        let handle = metadata.handle();
        if self.types.insert(handle, Arc::new(metadata)).is_some() {
            tracing::warn!(type_name = handle.name(), "replacing registered type metadata");
        }
        self
    }

    /// Look up metadata for a handle
    pub fn get(&self, handle: TypeHandle) -> Option<Arc<TypeMetadata>> {
        self.types.get(&handle).cloned()
    }

    /// Whether the handle has registered metadata
    pub fn contains(&self, handle: TypeHandle) -> bool {
        self.types.contains_key(&handle)
    }

    /// Number of registered types
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Whether the registry is empty
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::Required;

    #[test]
    fn test_type_handle_identity() {
        let a = TypeHandle::new("Person");
        let b: TypeHandle = "Person".into();
        assert_eq!(a, b);
        assert_eq!(a.to_string(), "Person");
    }

    #[test]
    fn test_property_constructors_classify_shape() {
        assert_eq!(
            PropertyMetadata::scalar("Name", "string").shape(),
            PropertyShape::Scalar
        );
        assert_eq!(
            PropertyMetadata::array("Tags", "Vec<string>").shape(),
            PropertyShape::Array
        );
        assert_eq!(
            PropertyMetadata::dictionary("Extra", "Map<string,string>").shape(),
            PropertyShape::Dictionary
        );
        assert_eq!(
            PropertyMetadata::object("Home", "Address").shape(),
            PropertyShape::Object(TypeHandle::new("Address"))
        );
        assert_eq!(
            PropertyMetadata::object_list("Emails", "Vec<EmailEntry>", "EmailEntry").shape(),
            PropertyShape::ObjectList(TypeHandle::new("EmailEntry"))
        );
    }

    #[test]
    fn test_object_declared_type_matches_recursion_target() {
        let prop = PropertyMetadata::object("Home", "Address");
        assert_eq!(prop.declared_type(), TypeHandle::new("Address"));
        assert_eq!(prop.shape(), PropertyShape::Object(prop.declared_type()));
    }

    #[test]
    fn test_duplicate_property_replaces_previous() {
        let meta = TypeMetadata::new("Person")
            .with_property(PropertyMetadata::scalar("Name", "string"))
            .with_property(PropertyMetadata::scalar("Name", "string").with_rule(Required::new()));

        assert_eq!(meta.properties().len(), 1);
        assert_eq!(meta.properties()[0].rules().len(), 1);
    }

    #[test]
    fn test_registry_register_and_get() {
        let mut registry = MetadataRegistry::new();
        registry.register(TypeMetadata::new("Person"));

        assert!(registry.contains(TypeHandle::new("Person")));
        assert!(!registry.contains(TypeHandle::new("Address")));
        assert_eq!(registry.len(), 1);
        assert_eq!(
            registry.get(TypeHandle::new("Person")).unwrap().handle(),
            TypeHandle::new("Person")
        );
    }

    #[test]
    fn test_registry_reregistration_replaces() {
        let mut registry = MetadataRegistry::new();
        registry.register(TypeMetadata::new("Person"));
        registry.register(
            TypeMetadata::new("Person").with_property(PropertyMetadata::scalar("Name", "string")),
        );

        assert_eq!(registry.len(), 1);
        let meta = registry.get(TypeHandle::new("Person")).unwrap();
        assert_eq!(meta.properties().len(), 1);
    }
}
