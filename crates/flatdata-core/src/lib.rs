//! flatdata core - shared types for relation-aware flat data repositories
//!
//! This crate provides the building blocks used across the flatdata workspace:
//! - Value types for repository content (scalars, sequences, ordered mappings)
//! - Record identifiers and record sets
//! - Relation declarations, detection and provenance metadata
//! - Filter operators with loose and strict comparison semantics
//! - Error types

pub mod error;
pub mod filter;
pub mod relation;
pub mod types;

// Re-export commonly used types
pub use error::{CoreError, Result};
pub use filter::FilterOperator;
pub use relation::{
    contains_relation_declaration, is_relation_declaration, push_relation_property,
    relation_properties, strip_relation_declarations, RelationDeclaration, RelationProperty, RelationSource, RelationType,
    RELATION_PROPERTIES_FIELD,
};
pub use types::{RecordId, RecordSet, Value};
