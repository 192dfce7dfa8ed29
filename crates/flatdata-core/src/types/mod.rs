//! Type system for flatdata
//!
//! This module contains the data model all repository content is expressed in:
//! - Value types
//! - Record identifiers
//! - Loose and strict comparison

mod compare;
pub mod record;
pub mod value;

pub use record::{RecordId, RecordSet};
pub use value::Value;
