//! Validation of attribute snapshots against schemas.
//!
//! [`SchemaValidator`] evaluates a [`Schema`](crate::schema::Schema) against a
//! [`Snapshot`](crate::snapshot::Snapshot) and returns `Ok(())`, the first
//! violation message, or every violation, depending on the error mode.

pub mod builder;
pub mod core;


pub use builder::{ErrorMode, ValidatorBuilder, ValidatorConfig};
pub use core::SchemaValidator;
