//! Attribute store: type cache and query facade
//!
//! The store is an explicit service instance (no global state) that caches
//! one [`TypeRecord`] per registered type and answers the metadata queries a
//! validation orchestrator needs: type and property rules, display
//! descriptors, property types, and the flattened (property, value) table
//! for a live instance.

mod extract;
mod record;

pub use extract::ExtractedValue;
pub use record::{PropertyRecord, TypeRecord};

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::attribute::{DisplayAttribute, ValidationAttribute};
use crate::context::ValidationContext;
use crate::error::{Result, StoreError};
use crate::metadata::{MetadataRegistry, TypeHandle};

/// Default bound on extraction recursion depth
pub const DEFAULT_MAX_DEPTH: usize = 32;

/// Cache of validation and display metadata, keyed by type
///
/// Construct one store per process (or per test) from a populated
/// [`MetadataRegistry`] and share it by reference. Record creation is
/// idempotent under concurrent access: exactly one record is ever published
/// per type, and entries live for the life of the store.
pub struct AttributeStore {
    registry: MetadataRegistry,
    records: Mutex<HashMap<TypeHandle, Arc<TypeRecord>>>,
    max_depth: usize,
}

impl AttributeStore {
    /// Create a store over the given registry
    pub fn new(registry: MetadataRegistry) -> Self {
        Self {
            registry,
            records: Mutex::new(HashMap::new()),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Override the extraction depth bound
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// The registry this store was built from
    pub fn registry(&self) -> &MetadataRegistry {
        &self.registry
    }

    /// Retrieve or create the cached record for a type
    ///
    /// The lock is held only for the map read and the insert; record
    /// construction happens outside it. When two threads race on the first
    /// request for a type, the first insert wins and both observe the same
    /// record.
    pub(crate) fn type_record(&self, handle: TypeHandle) -> Result<Arc<TypeRecord>> {
        {
            let records = self.lock_records()?;
            if let Some(record) = records.get(&handle) {
                return Ok(Arc::clone(record));
            }
        }

        let metadata = self
            .registry
            .get(handle)
            .ok_or(StoreError::UnknownType(handle))?;
        let record = Arc::new(TypeRecord::new(metadata));

        let mut records = self.lock_records()?;
        Ok(Arc::clone(records.entry(handle).or_insert(record)))
    }

    fn lock_records(&self) -> Result<std::sync::MutexGuard<'_, HashMap<TypeHandle, Arc<TypeRecord>>>> {
        self.records
            .lock()
            .map_err(|e| StoreError::LockPoisoned(e.to_string()))
    }

    fn property_record(&self, ctx: &ValidationContext) -> Result<Arc<PropertyRecord>> {
        let member = ctx.member_name().ok_or(StoreError::MissingMemberName)?;
        let record = self.type_record(ctx.declaring_type())?;
        record.property(member)
    }

    /// Type-level validation rules for the context's declaring type
    pub fn type_rules(&self, ctx: &ValidationContext) -> Result<Vec<Arc<dyn ValidationAttribute>>> {
        let record = self.type_record(ctx.declaring_type())?;
        Ok(record.attributes().rules().to_vec())
    }

    /// Type-level display descriptor, if one was declared
    pub fn type_display(&self, ctx: &ValidationContext) -> Result<Option<DisplayAttribute>> {
        let record = self.type_record(ctx.declaring_type())?;
        Ok(record.attributes().display().cloned())
    }

    /// Validation rules for the context's member
    pub fn property_rules(&self, ctx: &ValidationContext) -> Result<Vec<Arc<dyn ValidationAttribute>>> {
        let property = self.property_record(ctx)?;
        Ok(property.attributes().rules().to_vec())
    }

    /// Display descriptor for the context's member, if one was declared
    pub fn property_display(&self, ctx: &ValidationContext) -> Result<Option<DisplayAttribute>> {
        let property = self.property_record(ctx)?;
        Ok(property.attributes().display().cloned())
    }

    /// Declared type of the context's member
    pub fn property_type(&self, ctx: &ValidationContext) -> Result<TypeHandle> {
        let property = self.property_record(ctx)?;
        Ok(property.declared_type())
    }

    /// Whether the context's member name resolves to a registered property
    pub fn is_known_property(&self, ctx: &ValidationContext) -> Result<bool> {
        let member = ctx.member_name().ok_or(StoreError::MissingMemberName)?;
        let record = self.type_record(ctx.declaring_type())?;
        Ok(record.has_property(member))
    }

    /// Flattened (property record, value) table for the context's instance
    ///
    /// Covers the declaring type's own properties plus those of every nested
    /// object and object-list element reachable from the instance, depth
    /// first in declaration order. The table is rebuilt on every call; it
    /// depends on the instance, not on the type alone.
    pub fn all_values(&self, ctx: &ValidationContext) -> Result<Vec<ExtractedValue>> {
        let instance = ctx.instance().ok_or(StoreError::MissingInstance)?;
        extract::extract(self, ctx.declaring_type(), instance, self.max_depth)
    }
}

impl std::fmt::Debug for AttributeStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let cached = self.lock_records().map(|r| r.len()).unwrap_or(0);
        f.debug_struct("AttributeStore")
            .field("registered", &self.registry.len())
            .field("cached", &cached)
            .field("max_depth", &self.max_depth)
            .finish()
    }
}
