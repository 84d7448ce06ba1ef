//! Schema definitions for attribute validation.
//!
//! This module provides the declarative side of validation: what fields an
//! object has, which are required, which values and types they accept, and
//! which custom rules apply.
//!
//! # Key Types
//!
//! - [`Schema`] - Ordered field declarations plus the strict / collect-all flags
//! - [`FieldSpec`] - Rules for one field
//! - [`TypeDescriptor`] - Primitive category or nominal Rust type
//! - [`TypeRegistry`] - Type names available to JSON schema documents
//!
//! # Examples
//!
//! ```rust
//! use attr_schema::schema::{FieldSpec, Schema};
//! use attr_schema::value::PrimitiveType;
//!
//! let schema = Schema::builder()
//!     .field("name", FieldSpec::new().of_type(PrimitiveType::String).required())
//!     .field("status", FieldSpec::new().choices(["online", "offline", "away"]))
//!     .field("age", PrimitiveType::Number)
//!     .strict(true)
//!     .build();
//!
//! assert_eq!(schema.len(), 3);
//! assert!(schema.is_strict());
//! ```

pub mod json;
pub mod registry;
pub mod types;


// Re-export the main types for convenience
pub use registry::TypeRegistry;
pub use types::{FieldSpec, FieldValidator, NominalType, Schema, SchemaBuilder, TypeDescriptor};
