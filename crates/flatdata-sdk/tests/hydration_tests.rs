//! Integration tests for relation hydration through the engine

mod common;

use common::{create_test_data, create_test_engine, repository_config};
use flatdata_core::{relation_properties, RelationSource, RelationType, RELATION_PROPERTIES_FIELD};
use flatdata_sdk::{FlatDataEngineBuilder, Value};
use tokio::fs;

#[tokio::test]
async fn test_foreign_managed_projects() {
    let (_dir, engine) = create_test_engine().await;

    let managed = engine
        .query()
        .get_repository("user")
        .await
        .unwrap()
        .get_record("mr_admin")
        .unwrap()
        .get_property("managed_projects")
        .await
        .unwrap()
        .execute()
        .unwrap();

    let project = managed.get("real_project_1").expect("real_project_1 embedded");
    assert_eq!(project.get("name"), Some(&Value::from("real project 1!")));
    assert!(project.get("manager").is_none());
    assert!(project.get("users").is_none());
}

#[tokio::test]
async fn test_foreign_projects_alias() {
    let (_dir, engine) = create_test_engine().await;
    let users = engine.hydrated_repository("user").await.unwrap();

    for id in ["mr_admin", "joe"] {
        let projects = users[id].get("projects").expect("projects alias");
        assert!(projects.get("real_project_1").is_some());
    }

    // alice is not referenced by any project
    assert!(users["alice"].get("projects").is_none());
    assert!(users["alice"].get(RELATION_PROPERTIES_FIELD).is_none());

    let joe = users["joe"].as_object().unwrap();
    let entries = relation_properties(joe);
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].property, "projects");
    assert_eq!(entries[0].source, RelationSource::Foreign);
}

#[tokio::test]
async fn test_local_metadata_carries_type() {
    let (_dir, engine) = create_test_engine().await;
    let projects = engine.hydrated_repository("project").await.unwrap();

    let entries = relation_properties(projects["real_project_1"].as_object().unwrap());
    let manager = entries.iter().find(|e| e.property == "manager").unwrap();
    let users = entries.iter().find(|e| e.property == "users").unwrap();

    assert_eq!(manager.source, RelationSource::Local);
    assert_eq!(manager.relation_type, Some(RelationType::One));
    assert_eq!(users.relation_type, Some(RelationType::Many));
}

#[tokio::test]
async fn test_plain_records_untouched() {
    let (_dir, engine) = create_test_engine().await;

    let raw = engine.load_repository("project").await.unwrap();
    let hydrated = engine.hydrated_repository("project").await.unwrap();

    for i in 0..10 {
        let id = i.to_string();
        assert_eq!(raw.get(&id), hydrated.get(&id));
    }
}

#[tokio::test]
async fn test_no_declarations_is_noop() {
    let dir = tempfile::TempDir::new().unwrap();
    fs::write(dir.path().join("color.yml"), "red: {hex: ff0000}\nblue: {hex: 0000ff}\n")
        .await
        .unwrap();
    fs::write(dir.path().join("shape.yml"), "circle: {sides: 0}\n")
        .await
        .unwrap();

    let engine = FlatDataEngineBuilder::new()
        .with_repository_config(repository_config(&dir))
        .build()
        .await
        .unwrap();

    let raw = engine.load_repository("color").await.unwrap();
    let hydrated = engine.hydrated_repository("color").await.unwrap();
    assert_eq!(Value::Object(hydrated), raw);
}

#[tokio::test]
async fn test_unstaged_one_relation_stays_mapping() {
    let dir = create_test_data().await;
    let engine = FlatDataEngineBuilder::new()
        .with_repository_config(repository_config(&dir))
        .stage_relations(false)
        .build()
        .await
        .unwrap();

    let projects = engine.hydrated_repository("project").await.unwrap();
    let manager = projects["real_project_1"].get("manager").unwrap();

    assert_eq!(manager.len(), 1);
    assert!(manager.get("mr_admin").is_some());
}

#[tokio::test]
async fn test_one_relation_with_two_targets_stays_mapping() {
    let dir = create_test_data().await;
    fs::write(
        dir.path().join("team.yml"),
        "core:\n  lead:\n    repository: user\n    type: one\n    values: [joe, alice]\n",
    )
    .await
    .unwrap();

    let engine = FlatDataEngineBuilder::new()
        .with_repository_config(repository_config(&dir))
        .build()
        .await
        .unwrap();

    let teams = engine.hydrated_repository("team").await.unwrap();
    let lead = teams["core"].get("lead").unwrap();
    assert_eq!(lead.len(), 2);
    assert!(lead.get("joe").is_some());
}

#[tokio::test]
async fn test_missing_target_repository() {
    let dir = create_test_data().await;
    fs::write(
        dir.path().join("task.yml"),
        "t1:\n  owner:\n    repository: department\n    values: [it]\n",
    )
    .await
    .unwrap();

    let engine = FlatDataEngineBuilder::new()
        .with_repository_config(repository_config(&dir))
        .build()
        .await
        .unwrap();

    let err = engine.hydrated_repository("task").await.unwrap_err();
    assert!(err.is_repository_not_found());
}

#[tokio::test]
async fn test_malformed_declaration_in_other_repository() {
    let dir = create_test_data().await;
    fs::write(
        dir.path().join("task.yml"),
        "t1:\n  owner:\n    repository: user\n",
    )
    .await
    .unwrap();

    let engine = FlatDataEngineBuilder::new()
        .with_repository_config(repository_config(&dir))
        .build()
        .await
        .unwrap();

    // the foreign pass over `user` scans `task` too
    let err = engine.hydrated_repository("user").await.unwrap_err();
    assert!(err.is_malformed_relation());
}

#[tokio::test]
async fn test_list_repository_beside_record_sets() {
    let dir = create_test_data().await;
    fs::write(dir.path().join("tags.yml"), "- red\n- blue\n")
        .await
        .unwrap();

    let engine = FlatDataEngineBuilder::new()
        .with_repository_config(repository_config(&dir))
        .build()
        .await
        .unwrap();

    // the foreign pass over `user` skips `tags`
    let users = engine.hydrated_repository("user").await.unwrap();
    assert!(users["mr_admin"].get("managed_projects").is_some());

    let projects = engine.hydrated_repository("project").await.unwrap();
    assert!(projects.contains_key("real_project_1"));

    // `tags` itself is still not a record set
    let err = engine.hydrated_repository("tags").await.unwrap_err();
    assert!(err.to_string().contains("not a record set"));
}
