//! Relation hydration
//!
//! Hydration runs in two passes over the record set of one repository:
//!
//! 1. **Local**: every field of a record that is itself a relation
//!    declaration is replaced by the `{id: record}` mapping of the targets
//!    it names.
//! 2. **Foreign**: every repository (the current one included) is scanned
//!    for declarations pointing back at the current repository with a
//!    `foreign_alias`; each referenced record receives a copy of the
//!    declaring record under that alias.
//!
//! Resolution stops after one hop: target records are embedded as loaded,
//! and foreign copies have their own declarations stripped.

use flatdata_core::{
    contains_relation_declaration, is_relation_declaration, push_relation_property,
    strip_relation_declarations, RecordId, RecordSet, RelationDeclaration, RelationProperty,
    Value,
};
use flatdata_repository::{Repository, RepositoryError};

use crate::error::Result;

/// Load a repository and view it as a record set
///
/// An empty repository file (null document) is an empty record set.
pub(crate) async fn load_record_set(repository: &dyn Repository, name: &str) -> Result<RecordSet> {
    match repository.load_raw(name).await? {
        Value::Object(records) => Ok(records),
        Value::Null => Ok(RecordSet::new()),
        _ => Err(RepositoryError::NotARecordSet {
            name: name.to_string(),
        }
        .into()),
    }
}

/// Resolves relation declarations against a repository source
pub struct RelationHydrator<'a> {
    repository: &'a dyn Repository,
}

impl<'a> RelationHydrator<'a> {
    pub fn new(repository: &'a dyn Repository) -> Self {
        Self { repository }
    }

    /// Resolve the relations declared by the records themselves
    pub async fn hydrate_local(&self, mut records: RecordSet) -> Result<RecordSet> {
        if !records.values().any(contains_relation_declaration) {
            tracing::trace!("No relation declarations, skipping local hydration");
            return Ok(records);
        }

        for (record_id, record) in records.iter_mut() {
            let Some(fields) = record.as_object_mut() else {
                continue;
            };

            let mut declarations = Vec::new();
            for (field, value) in fields.iter() {
                if !is_relation_declaration(value) {
                    continue;
                }
                if let Some(declaration) = RelationDeclaration::parse(value)? {
                    declarations.push((field.clone(), declaration));
                }
            }

            for (field, declaration) in declarations {
                let target = load_record_set(self.repository, &declaration.repository).await?;
                let resolved = declaration.resolve(&target);

                tracing::debug!(
                    "Resolved {}.{} -> {} ({} of {} ids)",
                    record_id,
                    field,
                    declaration.repository,
                    resolved.len(),
                    declaration.values.len()
                );

                fields.insert(field.clone(), Value::Object(resolved));
                push_relation_property(
                    fields,
                    RelationProperty::local(field, declaration.relation_type),
                );
            }
        }

        Ok(records)
    }

    /// Merge in the relations other repositories declare towards `current`
    pub async fn hydrate_foreign(&self, current: &str, mut records: RecordSet) -> Result<RecordSet> {
        for name in self.repository.list_repository_names().await? {
            // Siblings that are not record sets cannot declare relations
            let Value::Object(foreign) = self.repository.load_raw(&name).await? else {
                tracing::trace!("Skipping '{}' in foreign pass: not a record set", name);
                continue;
            };

            if !foreign.values().any(contains_relation_declaration) {
                continue;
            }

            for (foreign_id, foreign_record) in &foreign {
                let Some(fields) = foreign_record.as_object() else {
                    continue;
                };

                for value in fields.values() {
                    if !is_relation_declaration(value) {
                        continue;
                    }
                    let Some(declaration) = RelationDeclaration::parse(value)? else {
                        continue;
                    };
                    if declaration.repository != current {
                        continue;
                    }
                    let Some(alias) = declaration.foreign_alias.as_deref() else {
                        continue;
                    };

                    self.embed_foreign(&mut records, &declaration, alias, foreign_id, foreign_record);
                }
            }
        }

        Ok(records)
    }

    fn embed_foreign(
        &self,
        records: &mut RecordSet,
        declaration: &RelationDeclaration,
        alias: &str,
        foreign_id: &str,
        foreign_record: &Value,
    ) {
        for (record_id, record) in records.iter_mut() {
            if !declaration.targets(&RecordId::from(record_id.as_str())) {
                continue;
            }
            let Some(fields) = record.as_object_mut() else {
                continue;
            };

            push_relation_property(fields, RelationProperty::foreign(alias));

            let slot = fields
                .entry(alias.to_string())
                .or_insert_with(Value::empty_object);
            if !slot.is_object() {
                tracing::warn!(
                    "Field {}.{} is a {}, replacing it with foreign relation data",
                    record_id,
                    alias,
                    slot.type_name()
                );
                *slot = Value::empty_object();
            }
            if let Some(embedded) = slot.as_object_mut() {
                embedded.insert(
                    foreign_id.to_string(),
                    strip_relation_declarations(foreign_record),
                );
            }

            tracing::debug!("Embedded {} under {}.{}", foreign_id, record_id, alias);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flatdata_core::{relation_properties, RelationSource, RelationType};
    use flatdata_repository::MemoryRepository;

    fn yaml(src: &str) -> Value {
        Value::from_yaml(serde_yaml::from_str(src).unwrap()).unwrap()
    }

    fn fixture() -> MemoryRepository {
        MemoryRepository::new()
            .with_repository(
                "project",
                yaml(
                    r#"
plain:
  name: plain project
real_project_1:
  name: real project 1!
  manager:
    repository: user
    foreign_alias: managed_projects
    type: one
    values: [mr_admin]
  users:
    repository: user
    foreign_alias: projects
    values: [mr_admin, joe, ghost]
"#,
                ),
            )
            .with_repository(
                "user",
                yaml(
                    r#"
mr_admin:
  name: Mr Admin
joe:
  name: Joe
bob:
  name: Bob
"#,
                ),
            )
    }

    #[tokio::test]
    async fn test_local_resolves_declared_ids() {
        let repo = fixture();
        let hydrator = RelationHydrator::new(&repo);
        let records = load_record_set(&repo, "project").await.unwrap();

        let hydrated = hydrator.hydrate_local(records).await.unwrap();
        let project = hydrated["real_project_1"].as_object().unwrap();

        let users: Vec<&String> = project["users"].as_object().unwrap().keys().collect();
        assert_eq!(users, vec!["mr_admin", "joe"]);
        assert_eq!(
            project["manager"].get("mr_admin").and_then(|u| u.get("name")),
            Some(&Value::from("Mr Admin"))
        );

        let metadata = relation_properties(project);
        assert_eq!(metadata.len(), 2);
        assert_eq!(metadata[0], RelationProperty::local("manager", RelationType::One));
        assert_eq!(metadata[1], RelationProperty::local("users", RelationType::Many));

        assert_eq!(hydrated["plain"], yaml("name: plain project"));
    }

    #[tokio::test]
    async fn test_local_without_declarations_is_noop() {
        let repo = fixture();
        let hydrator = RelationHydrator::new(&repo);
        let records = load_record_set(&repo, "user").await.unwrap();

        let hydrated = hydrator.hydrate_local(records.clone()).await.unwrap();
        assert_eq!(hydrated, records);
    }

    #[tokio::test]
    async fn test_local_missing_target_repository() {
        let repo = MemoryRepository::new().with_repository(
            "project",
            yaml("p:\n  owner:\n    repository: team\n    values: [a]\n"),
        );
        let hydrator = RelationHydrator::new(&repo);
        let records = load_record_set(&repo, "project").await.unwrap();

        let err = hydrator.hydrate_local(records).await.unwrap_err();
        assert!(err.is_repository_not_found());
    }

    #[tokio::test]
    async fn test_local_malformed_declaration() {
        let repo = MemoryRepository::new()
            .with_repository("project", yaml("p:\n  owner:\n    repository: user\n"))
            .with_repository("user", yaml("a: {}\n"));
        let hydrator = RelationHydrator::new(&repo);
        let records = load_record_set(&repo, "project").await.unwrap();

        let err = hydrator.hydrate_local(records).await.unwrap_err();
        assert!(err.is_malformed_relation());
    }

    #[tokio::test]
    async fn test_foreign_embeds_stripped_record() {
        let repo = fixture();
        let hydrator = RelationHydrator::new(&repo);
        let records = load_record_set(&repo, "user").await.unwrap();

        let hydrated = hydrator.hydrate_foreign("user", records).await.unwrap();

        let admin = hydrated["mr_admin"].as_object().unwrap();
        let managed = admin["managed_projects"].as_object().unwrap();
        let project = managed["real_project_1"].as_object().unwrap();
        assert_eq!(project.get("name"), Some(&Value::from("real project 1!")));
        assert!(!project.contains_key("manager"));
        assert!(!project.contains_key("users"));
        assert!(admin["projects"].get("real_project_1").is_some());

        let sources: Vec<_> = relation_properties(admin)
            .into_iter()
            .map(|p| (p.property, p.source))
            .collect();
        assert_eq!(
            sources,
            vec![
                ("managed_projects".to_string(), RelationSource::Foreign),
                ("projects".to_string(), RelationSource::Foreign),
            ]
        );

        // joe is only listed in `users`
        let joe = hydrated["joe"].as_object().unwrap();
        assert!(joe.contains_key("projects"));
        assert!(!joe.contains_key("managed_projects"));

        // bob is never referenced
        assert_eq!(hydrated["bob"], yaml("name: Bob"));
    }

    #[tokio::test]
    async fn test_foreign_ignores_other_targets() {
        let repo = fixture();
        let hydrator = RelationHydrator::new(&repo);
        let records = load_record_set(&repo, "project").await.unwrap();

        let hydrated = hydrator
            .hydrate_foreign("project", records.clone())
            .await
            .unwrap();
        assert_eq!(hydrated, records);
    }

    #[tokio::test]
    async fn test_foreign_replaces_scalar_alias_field() {
        let repo = fixture().with_repository("user", yaml("mr_admin:\n  projects: none\n"));
        let hydrator = RelationHydrator::new(&repo);
        let records = load_record_set(&repo, "user").await.unwrap();

        let hydrated = hydrator.hydrate_foreign("user", records).await.unwrap();
        let projects = hydrated["mr_admin"].get("projects").unwrap();
        assert!(projects.get("real_project_1").is_some());
    }

    #[tokio::test]
    async fn test_foreign_skips_non_mapping_siblings() {
        let repo = fixture()
            .with_repository("tags", yaml("- red\n- blue\n"))
            .with_repository("version", Value::from(3));
        let hydrator = RelationHydrator::new(&repo);
        let records = load_record_set(&repo, "user").await.unwrap();

        let hydrated = hydrator.hydrate_foreign("user", records).await.unwrap();
        assert!(hydrated["mr_admin"].get("managed_projects").is_some());
    }

    #[tokio::test]
    async fn test_load_record_set_rejects_scalar() {
        let repo = MemoryRepository::new().with_repository("scalar", Value::from(42));

        let err = load_record_set(&repo, "scalar").await.unwrap_err();
        assert!(err.to_string().contains("not a record set"));
    }
}
