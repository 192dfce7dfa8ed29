//! One-to-one relation staging

use flatdata_core::{relation_properties, RecordSet, RelationType, Value};

/// Collapses `type: one` relations that resolved to exactly one record
///
/// `{mr_admin: {name: ...}}` becomes `{name: ...}`. Relations with zero or
/// several resolved records, and foreign relations, keep their mapping.
#[derive(Debug, Default, Clone, Copy)]
pub struct RelationStager;

impl RelationStager {
    pub fn new() -> Self {
        Self
    }

    pub fn stage(&self, mut records: RecordSet) -> RecordSet {
        for record in records.values_mut() {
            if let Some(fields) = record.as_object_mut() {
                Self::stage_record(fields);
            }
        }
        records
    }

    fn stage_record(fields: &mut RecordSet) {
        for entry in relation_properties(fields) {
            if entry.relation_type != Some(RelationType::One) {
                continue;
            }

            let Some(Value::Object(resolved)) = fields.get_mut(&entry.property) else {
                continue;
            };
            if resolved.len() != 1 {
                continue;
            }
            if let Some((_, single)) = resolved.pop() {
                fields.insert(entry.property, single);
            }
        }
    }
}
