//! Declarative, schema-driven validation of object attributes.
//!
//! Given a [`Schema`] describing per-field constraints and a [`Snapshot`] of
//! an object's current attributes, a [`SchemaValidator`] reports either no
//! error or a description of the violations it found.
//!
//! # Core Components
//!
//! - [`Schema`] / [`FieldSpec`] - Field declarations: type, required, choices, custom validators
//! - [`Snapshot`] - Read-only view of an object's current attributes
//! - [`SchemaValidator`] - Runs the rules in a fixed order, short-circuit or collect-all
//! - [`Validated`] - Hook for host objects that carry a schema
//!
//! # Quick Start
//!
//! ```rust
//! use attr_schema::{FieldSpec, Schema, SchemaValidator, Snapshot, ValidationError};
//! use attr_schema::value::PrimitiveType;
//!
//! let schema = Schema::builder()
//!     .field("status", FieldSpec::new().choices(["online", "offline", "away"]))
//!     .field("age", PrimitiveType::Number)
//!     .collect_all_errors(true)
//!     .build();
//!
//! let attributes = Snapshot::new().with("status", "busy").with("age", "ten");
//! let error = SchemaValidator::new().validate(&schema, &attributes).unwrap_err();
//!
//! assert_eq!(
//!     error.messages(),
//!     vec![
//!         "\"status\" must be one of online, offline, away",
//!         "\"age\" must be a number",
//!     ]
//! );
//! assert!(matches!(error, ValidationError::Errors(_)));
//! ```

pub mod error;
pub mod model;
pub mod schema;
pub mod snapshot;
pub mod validator;
pub mod value;

// Re-export commonly used types for convenience
pub use error::{
    ErrorKey, ErrorKind, ErrorRecord, SchemaError, SnapshotError, ValidationError,
    ValidationResult,
};
pub use model::{Model, Validated};
pub use schema::{
    FieldSpec, FieldValidator, NominalType, Schema, TypeDescriptor, TypeRegistry,
};
pub use snapshot::Snapshot;
pub use validator::{ErrorMode, SchemaValidator, ValidatorConfig};
pub use value::{AttributeValue, PrimitiveType};
