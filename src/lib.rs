//! Validation metadata store
//!
//! A metadata cache and recursive object-graph walker for declarative
//! validation. Models declare which rules and display hints apply to their
//! types and properties; the store caches that metadata once per type and
//! flattens object instances into (property, value) pairs so an external
//! orchestrator can validate every nested property against its own rules.
//!
//! ## Features
//!
//! - **Explicit registration**: metadata is declared through builders and
//!   collected into a [`MetadataRegistry`] at startup, no runtime
//!   introspection
//! - **Per-type caching**: rule discovery runs once per type, not once per
//!   validated instance, with idempotent record creation under concurrent
//!   access
//! - **Recursive extraction**: nested objects and object lists are walked
//!   depth-first in declaration order, bounded against cyclic type graphs
//! - **Defensive reads**: a failing property accessor is logged and recorded
//!   as null instead of aborting the walk
//! - **Pluggable rules**: any type implementing [`ValidationAttribute`] can
//!   be attached; a small built-in catalogue lives in [`rules`]
//!
//! ## Architecture
//!
//! 1. **Metadata** (`metadata`): [`TypeHandle`], shape classification, and
//!    the [`TypeMetadata`] / [`PropertyMetadata`] builders.
//!
//! 2. **Attributes** (`attribute`): the [`ValidationAttribute`] rule
//!    contract, [`DisplayAttribute`] presentation hints, and the immutable
//!    [`AttributeSet`] grouping both.
//!
//! 3. **Store** (`store`): the [`AttributeStore`] type cache and query
//!    facade, its cached records, and the recursive graph extractor.
//!
//! 4. **Rules** (`rules`): built-in rule descriptors (required, e-mail,
//!    URL, range, string length).
//!
//! ## Example
//!
//! ```rust
//! use serde_json::json;
//! use validation_metadata::rules::{EmailAddress, Required};
//! use validation_metadata::{
//!     AttributeStore, MetadataRegistry, PropertyMetadata, TypeMetadata, ValidationContext,
//! };
//!
//! let mut registry = MetadataRegistry::new();
//! registry.register(
//!     TypeMetadata::new("EmailEntry").with_property(
//!         PropertyMetadata::scalar("Address", "string")
//!             .with_rule(Required::new())
//!             .with_rule(EmailAddress),
//!     ),
//! );
//! registry.register(
//!     TypeMetadata::new("Person")
//!         .with_property(PropertyMetadata::scalar("Name", "string").with_rule(Required::new()))
//!         .with_property(PropertyMetadata::object_list(
//!             "Emails",
//!             "Vec<EmailEntry>",
//!             "EmailEntry",
//!         )),
//! );
//!
//! let store = AttributeStore::new(registry);
//! let ctx = ValidationContext::new("Person").with_instance(json!({
//!     "Name": "Ada",
//!     "Emails": [{"Address": "ada@example.com"}, {"Address": "bad"}],
//! }));
//!
//! let mut failures = Vec::new();
//! for entry in store.all_values(&ctx)? {
//!     for rule in entry.property.attributes().rules() {
//!         if !rule.is_valid(&entry.value) {
//!             failures.push(rule.format_error(entry.property.name()));
//!         }
//!     }
//! }
//! assert_eq!(failures, vec!["the Address field is not a valid e-mail address"]);
//! # Ok::<(), validation_metadata::StoreError>(())
//! ```

pub mod attribute;
pub mod context;
pub mod error;
pub mod metadata;
pub mod rules;
pub mod store;

pub use attribute::{AttributeSet, DisplayAttribute, ValidationAttribute};
pub use context::ValidationContext;
pub use error::{Result, StoreError, ValueReadError};
pub use metadata::{
    MetadataRegistry, PropertyMetadata, PropertyShape, TypeHandle, TypeMetadata, ValueReader,
};
pub use store::{AttributeStore, ExtractedValue, PropertyRecord, TypeRecord, DEFAULT_MAX_DEPTH};

/// Crate version (from Cargo.toml)
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
