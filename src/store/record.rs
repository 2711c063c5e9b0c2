//! Cached metadata records
//!
//! A [`TypeRecord`] is the per-type cache entry owned by the store; it holds
//! the type-level attribute set and a lazily built table of
//! [`PropertyRecord`]s. Records are immutable once built and shared behind
//! `Arc`, so repeated queries for the same type always observe the same
//! metadata.

use std::fmt;
use std::sync::{Arc, OnceLock};

use indexmap::IndexMap;
use serde_json::Value;

use crate::attribute::AttributeSet;
use crate::error::{Result, StoreError};
use crate::metadata::{PropertyShape, TypeHandle, TypeMetadata, ValueReader};

/// Cached metadata for one property of a type
///
/// Created once per (type, property) when the owning type's property table
/// is first resolved; never mutated after creation.
pub struct PropertyRecord {
    name: String,
    declared_type: TypeHandle,
    shape: PropertyShape,
    attributes: AttributeSet,
    reader: Option<Arc<ValueReader>>,
}

impl PropertyRecord {
    fn new(metadata: &crate::metadata::PropertyMetadata) -> Self {
        Self {
            name: metadata.name().to_string(),
            declared_type: metadata.declared_type(),
            shape: metadata.shape(),
            attributes: AttributeSet::new(metadata.rules().to_vec(), metadata.display().cloned()),
            reader: metadata.reader().cloned(),
        }
    }

    /// The property name, unique within its owning type record
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The declared type of the property
    pub fn declared_type(&self) -> TypeHandle {
        self.declared_type
    }

    /// The shape classification driving extractor recursion
    pub fn shape(&self) -> PropertyShape {
        self.shape
    }

    /// The property's attribute set
    pub fn attributes(&self) -> &AttributeSet {
        &self.attributes
    }

    /// Read the property's current value off an instance
    ///
    /// This is the single fallible read of the extraction path: a custom
    /// reader failure is logged once and recorded as null, and a missing
    /// field reads as null. It never fails the traversal.
    pub(crate) fn read_value(&self, instance: &Value) -> Value {
        if let Some(reader) = &self.reader {
            return match reader(instance) {
                Ok(Some(value)) => value,
                Ok(None) => Value::Null,
                Err(err) => {
                    tracing::warn!(
                        property = self.name.as_str(),
                        error = %err,
                        "property value read failed, recording null"
                    );
                    Value::Null
                }
            };
        }

        match instance {
            Value::Object(map) => map.get(&self.name).cloned().unwrap_or(Value::Null),
            Value::Null => Value::Null,
            other => {
                tracing::debug!(
                    property = self.name.as_str(),
                    value_kind = value_kind(other),
                    "instance is not an object, reading property as null"
                );
                Value::Null
            }
        }
    }
}

impl fmt::Debug for PropertyRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PropertyRecord")
            .field("name", &self.name)
            .field("declared_type", &self.declared_type)
            .field("shape", &self.shape)
            .field("attributes", &self.attributes)
            .finish()
    }
}

/// Cached metadata for one type
///
/// The property table is built at most once, under the record's own guard,
/// so concurrent first-time resolution for the same type runs the build
/// exactly once while different types resolve independently in parallel.
pub struct TypeRecord {
    metadata: Arc<TypeMetadata>,
    attributes: AttributeSet,
    properties: OnceLock<IndexMap<String, Arc<PropertyRecord>>>,
}

impl TypeRecord {
    pub(crate) fn new(metadata: Arc<TypeMetadata>) -> Self {
        let attributes = AttributeSet::new(metadata.rules().to_vec(), metadata.display().cloned());
        Self {
            metadata,
            attributes,
            properties: OnceLock::new(),
        }
    }

    /// The handle this record is cached under
    pub fn handle(&self) -> TypeHandle {
        self.metadata.handle()
    }

    /// The type-level attribute set
    pub fn attributes(&self) -> &AttributeSet {
        &self.attributes
    }

    /// The property table, keyed by name in declaration order
    pub(crate) fn properties(&self) -> &IndexMap<String, Arc<PropertyRecord>> {
        self.properties.get_or_init(|| {
            self.metadata
                .properties()
                .iter()
                .map(|p| (p.name().to_string(), Arc::new(PropertyRecord::new(p))))
                .collect()
        })
    }

    /// Resolve a property by member name
    pub(crate) fn property(&self, member: &str) -> Result<Arc<PropertyRecord>> {
        self.properties()
            .get(member)
            .cloned()
            .ok_or_else(|| StoreError::unknown_member(self.handle().name(), member))
    }

    /// Whether the member name resolves to a property of this type
    pub(crate) fn has_property(&self, member: &str) -> bool {
        self.properties().contains_key(member)
    }
}

impl fmt::Debug for TypeRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeRecord")
            .field("handle", &self.handle())
            .field("attributes", &self.attributes)
            .field("resolved", &self.properties.get().is_some())
            .finish()
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
