//! Recursive graph extraction
//!
//! Flattens an object instance into an ordered sequence of
//! (property record, current value) pairs: the root type's own properties in
//! declaration order, with each recursable property's nested pairs appended
//! immediately after that property's own pair, depth-first.

use std::sync::Arc;

use serde_json::Value;

use crate::error::{Result, StoreError};
use crate::metadata::{PropertyShape, TypeHandle};
use crate::store::record::{PropertyRecord, TypeRecord};
use crate::store::AttributeStore;

/// One entry of the extracted value table
///
/// Property names repeat when the same name appears on different nested
/// types; entry identity is the (record, owning value) pair, not the name.
#[derive(Debug, Clone)]
pub struct ExtractedValue {
    /// The property this value was read for
    pub property: Arc<PropertyRecord>,
    /// The value read off the instance (null when absent or unreadable)
    pub value: Value,
}

/// Extract the flattened value table for an instance of the given type
///
/// The root type must be registered; nested types without metadata are
/// skipped with a warning so one unregistered branch cannot abort the rest
/// of the walk. Recursion stops at `max_depth` nested levels, which bounds
/// traversal of cyclic declared-type graphs.
pub(crate) fn extract(
    store: &AttributeStore,
    handle: TypeHandle,
    instance: &Value,
    max_depth: usize,
) -> Result<Vec<ExtractedValue>> {
    let record = store.type_record(handle)?;
    let mut out = Vec::new();
    walk(store, &record, instance, 0, max_depth, &mut out)?;
    Ok(out)
}

fn walk(
    store: &AttributeStore,
    record: &TypeRecord,
    instance: &Value,
    depth: usize,
    max_depth: usize,
    out: &mut Vec<ExtractedValue>,
) -> Result<()> {
    for property in record.properties().values() {
        let value = property.read_value(instance);
        out.push(ExtractedValue {
            property: Arc::clone(property),
            value: value.clone(),
        });

        match property.shape() {
            PropertyShape::Scalar | PropertyShape::Array => {}
            PropertyShape::Dictionary => {
                tracing::debug!(
                    property = property.name(),
                    "dictionary entries are not recursed"
                );
            }
            PropertyShape::ObjectList(element_type) => {
                if let Value::Array(items) = &value {
                    for item in items {
                        descend(store, element_type, item, depth + 1, max_depth, out)?;
                    }
                }
            }
            // Recursion follows the declared type; a null value still emits
            // the nested property pairs with null values.
            PropertyShape::Object(target) => {
                descend(store, target, &value, depth + 1, max_depth, out)?;
            }
        }
    }
    Ok(())
}

fn descend(
    store: &AttributeStore,
    handle: TypeHandle,
    instance: &Value,
    depth: usize,
    max_depth: usize,
    out: &mut Vec<ExtractedValue>,
) -> Result<()> {
    if depth > max_depth {
        tracing::warn!(
            type_name = handle.name(),
            max_depth,
            "extraction depth bound reached, not descending further"
        );
        return Ok(());
    }

    match store.type_record(handle) {
        Ok(record) => walk(store, &record, instance, depth, max_depth, out),
        Err(StoreError::UnknownType(_)) => {
            tracing::warn!(
                type_name = handle.name(),
                "no metadata registered for nested type, skipping subtree"
            );
            Ok(())
        }
        Err(err) => Err(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attribute::DisplayAttribute;
    use crate::metadata::{MetadataRegistry, PropertyMetadata, TypeMetadata};
    use crate::rules::{EmailAddress, Required};
    use serde_json::json;

    fn person_store() -> AttributeStore {
        let mut registry = MetadataRegistry::new();
        registry.register(
            TypeMetadata::new("EmailEntry").with_property(
                PropertyMetadata::scalar("Address", "string")
                    .with_rule(Required::new())
                    .with_rule(EmailAddress)
                    .with_display(DisplayAttribute::new().with_label("E-mail address")),
            ),
        );
        registry.register(
            TypeMetadata::new("Person")
                .with_property(PropertyMetadata::scalar("Name", "string").with_rule(Required::new()))
                .with_property(PropertyMetadata::object_list(
                    "Emails",
                    "Vec<EmailEntry>",
                    "EmailEntry",
                )),
        );
        AttributeStore::new(registry)
    }

    fn names(entries: &[ExtractedValue]) -> Vec<&str> {
        entries.iter().map(|e| e.property.name()).collect()
    }

    #[test]
    fn test_flat_type_one_entry_per_property() {
        let store = person_store();
        let instance = json!({"Name": "ada", "Emails": []});
        let entries = extract(&store, "Person".into(), &instance, 32).unwrap();

        assert_eq!(names(&entries), vec!["Name", "Emails"]);
        assert_eq!(entries[0].value, json!("ada"));
        assert_eq!(entries[1].value, json!([]));
    }

    #[test]
    fn test_list_elements_append_after_container() {
        let store = person_store();
        let instance = json!({
            "Name": "ada",
            "Emails": [{"Address": "a@x.com"}, {"Address": "bad"}],
        });
        let entries = extract(&store, "Person".into(), &instance, 32).unwrap();

        assert_eq!(names(&entries), vec!["Name", "Emails", "Address", "Address"]);
        assert_eq!(entries[1].value, json!([{"Address": "a@x.com"}, {"Address": "bad"}]));
        assert_eq!(entries[2].value, json!("a@x.com"));
        assert_eq!(entries[3].value, json!("bad"));
    }

    #[test]
    fn test_duplicate_names_keep_distinct_records() {
        let store = person_store();
        let instance = json!({
            "Name": "ada",
            "Emails": [{"Address": "a@x.com"}, {"Address": "b@x.com"}],
        });
        let entries = extract(&store, "Person".into(), &instance, 32).unwrap();

        // Both Address entries share one property record; identity is the
        // (record, value) pair.
        assert!(Arc::ptr_eq(&entries[2].property, &entries[3].property));
        assert_ne!(entries[2].value, entries[3].value);
    }

    #[test]
    fn test_nested_object_recursed_by_declared_type() {
        let mut registry = MetadataRegistry::new();
        registry.register(
            TypeMetadata::new("Address")
                .with_property(PropertyMetadata::scalar("City", "string")),
        );
        registry.register(
            TypeMetadata::new("Person")
                .with_property(PropertyMetadata::scalar("Name", "string"))
                .with_property(PropertyMetadata::object("Home", "Address")),
        );
        let store = AttributeStore::new(registry);

        let instance = json!({"Name": "ada", "Home": {"City": "London"}});
        let entries = extract(&store, "Person".into(), &instance, 32).unwrap();

        assert_eq!(names(&entries), vec!["Name", "Home", "City"]);
        assert_eq!(entries[2].value, json!("London"));
    }

    #[test]
    fn test_null_nested_object_still_emits_nested_pairs() {
        let mut registry = MetadataRegistry::new();
        registry.register(
            TypeMetadata::new("Address")
                .with_property(PropertyMetadata::scalar("City", "string")),
        );
        registry.register(
            TypeMetadata::new("Person")
                .with_property(PropertyMetadata::object("Home", "Address")),
        );
        let store = AttributeStore::new(registry);

        let entries = extract(&store, "Person".into(), &json!({}), 32).unwrap();
        assert_eq!(names(&entries), vec!["Home", "City"]);
        assert_eq!(entries[1].value, Value::Null);
    }

    #[test]
    fn test_dictionary_entries_not_recursed() {
        let mut registry = MetadataRegistry::new();
        registry.register(
            TypeMetadata::new("Settings")
                .with_property(PropertyMetadata::dictionary("Extras", "Map<string,string>")),
        );
        let store = AttributeStore::new(registry);

        let instance = json!({"Extras": {"a": "1", "b": "2"}});
        let entries = extract(&store, "Settings".into(), &instance, 32).unwrap();

        assert_eq!(names(&entries), vec!["Extras"]);
        assert_eq!(entries[0].value, json!({"a": "1", "b": "2"}));
    }

    #[test]
    fn test_self_referential_type_stops_at_depth_bound() {
        let mut registry = MetadataRegistry::new();
        registry.register(
            TypeMetadata::new("Node")
                .with_property(PropertyMetadata::scalar("Label", "string"))
                .with_property(PropertyMetadata::object("Next", "Node")),
        );
        let store = AttributeStore::new(registry);

        let instance = json!({"Label": "root", "Next": null});
        let entries = extract(&store, "Node".into(), &instance, 3).unwrap();

        // Depths 0..=3, two entries per level.
        assert_eq!(entries.len(), 8);
    }

    #[test]
    fn test_unregistered_nested_type_skips_subtree() {
        let mut registry = MetadataRegistry::new();
        registry.register(
            TypeMetadata::new("Person")
                .with_property(PropertyMetadata::scalar("Name", "string"))
                .with_property(PropertyMetadata::object("Home", "Address")),
        );
        let store = AttributeStore::new(registry);

        let instance = json!({"Name": "ada", "Home": {"City": "London"}});
        let entries = extract(&store, "Person".into(), &instance, 32).unwrap();

        // Home itself is emitted, its subtree is not.
        assert_eq!(names(&entries), vec!["Name", "Home"]);
    }

    #[test]
    fn test_unregistered_root_type_fails() {
        let store = AttributeStore::new(MetadataRegistry::new());
        let err = extract(&store, "Ghost".into(), &json!({}), 32).unwrap_err();
        assert!(matches!(err, StoreError::UnknownType(_)));
    }
}
