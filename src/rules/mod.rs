//! Built-in rule descriptors
//!
//! Trivial, reusable implementations of [`ValidationAttribute`] ported from
//! the annotation catalogue this store was designed around. Every rule
//! except [`Required`] treats null as valid: required-ness is composed
//! separately rather than baked into each rule.
//!
//! [`ValidationAttribute`]: crate::ValidationAttribute

pub mod bounds;
pub mod email;
pub mod required;
pub mod url;

pub use bounds::{Range, StringLength};
pub use email::EmailAddress;
pub use required::Required;
pub use url::Url;
