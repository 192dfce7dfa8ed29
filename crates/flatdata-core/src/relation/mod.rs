//! Relation declarations embedded in repository data
//!
//! A record field whose value is a mapping with a `repository` key points at
//! records of another repository:
//!
//! ```yaml
//! real_project_1:
//!   name: real project 1!
//!   manager:
//!     repository: user
//!     foreign_alias: managed_projects
//!     type: one
//!     values: [mr_admin]
//! ```
//!
//! This module detects such declarations, reads them into
//! [`RelationDeclaration`], and maintains the `_relation_properties`
//! provenance list hydration leaves on each record.

pub mod declaration;
pub mod detector;
pub mod metadata;

pub use declaration::{RelationDeclaration, RelationType};
pub use detector::{
    contains_relation_declaration, is_relation_declaration, strip_relation_declarations,
};
pub use metadata::{
    push_relation_property, relation_properties, RelationProperty, RelationSource,
    RELATION_PROPERTIES_FIELD,
};

/// Key that marks a mapping as a relation declaration
pub const REPOSITORY_KEY: &str = "repository";
/// Key listing the target record ids
pub const VALUES_KEY: &str = "values";
/// Key naming the field the declaring record appears under on the target side
pub const FOREIGN_ALIAS_KEY: &str = "foreign_alias";
/// Key holding the relation cardinality (`one` or `many`)
pub const TYPE_KEY: &str = "type";
