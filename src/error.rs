//! Error types for the validation metadata store
//!
//! Provides structured error types for metadata lookups and cache access.
//! Value-read failures are deliberately not part of [`StoreError`]: they are
//! recovered during graph extraction and never surfaced to callers.

use thiserror::Error;

use crate::metadata::TypeHandle;

/// Main error type for store operations
#[derive(Error, Debug)]
pub enum StoreError {
    /// The validation context carries no member name, but the operation
    /// targets a property
    #[error("validation context has no member name")]
    MissingMemberName,

    /// The validation context carries no object instance, but the operation
    /// extracts instance values
    #[error("validation context has no object instance")]
    MissingInstance,

    /// No metadata has been registered for the requested type
    #[error("no metadata registered for type '{0}'")]
    UnknownType(TypeHandle),

    /// The member name does not resolve to a registered property
    #[error("the type '{type_name}' does not contain a public property named '{member}'")]
    UnknownMember {
        /// Name of the resolved declaring type
        type_name: &'static str,
        /// The member name that failed to resolve
        member: String,
    },

    /// The cache lock was poisoned by a panicking thread
    #[error("failed to acquire store lock: {0}")]
    LockPoisoned(String),
}

impl StoreError {
    /// Create an unknown-member error
    pub fn unknown_member(type_name: &'static str, member: impl Into<String>) -> Self {
        StoreError::UnknownMember {
            type_name,
            member: member.into(),
        }
    }

    /// Check if this error reports a member that failed to resolve
    pub fn is_unknown_member(&self) -> bool {
        matches!(self, StoreError::UnknownMember { .. })
    }
}

/// Error produced by a custom property value reader
///
/// Read failures are recovered locally by the graph extractor: the failure is
/// logged once and the value recorded as null, so a single broken accessor
/// cannot block extraction of the rest of an object graph.
#[derive(Error, Debug, Clone)]
#[error("value read failed: {0}")]
pub struct ValueReadError(String);

impl ValueReadError {
    /// Create a new value-read error
    pub fn new(msg: impl Into<String>) -> Self {
        ValueReadError(msg.into())
    }
}

/// Result type alias for store operations
pub type Result<T> = std::result::Result<T, StoreError>;
