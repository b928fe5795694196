#![forbid(unsafe_code)]

use rusqlite::{Connection, params};
use std::path::PathBuf;
use tl_core::model::NodeKind;
use tl_storage::{NodeInsertRequest, NodePayload, SqliteStore, StoreError};

fn temp_dir(test_name: &str) -> PathBuf {
    let base = std::env::temp_dir();
    let pid = std::process::id();
    let nonce = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    let dir = base.join(format!("tl_storage_{test_name}_{pid}_{nonce}"));
    std::fs::create_dir_all(&dir).expect("create temp dir");
    dir
}

fn seed_project(store: &mut SqliteStore) -> String {
    let group = store
        .node_insert(NodeInsertRequest {
            scope_id: None,
            ordinal: 1,
            payload: NodePayload::Group {
                name: "Work".to_string(),
                description: None,
                color: None,
            },
        })
        .expect("insert group");
    let subgroup = store
        .node_insert(NodeInsertRequest {
            scope_id: Some(group.id),
            ordinal: 1,
            payload: NodePayload::Subgroup {
                name: "Backlog".to_string(),
                description: None,
                color: None,
            },
        })
        .expect("insert subgroup");
    let project = store
        .node_insert(NodeInsertRequest {
            scope_id: Some(subgroup.id),
            ordinal: 1,
            payload: NodePayload::Project {
                name: "Release".to_string(),
                description: None,
                status: None,
                color: None,
            },
        })
        .expect("insert project");
    project.id
}

fn insert_todo(store: &mut SqliteStore, project_id: &str, ordinal: i64, content: &str) -> String {
    store
        .node_insert(NodeInsertRequest {
            scope_id: Some(project_id.to_string()),
            ordinal,
            payload: NodePayload::Todo {
                content: content.to_string(),
                kind: "TASK".to_string(),
                completed: false,
                level: 0,
                parent_id: None,
            },
        })
        .expect("insert todo")
        .id
}

fn ordinals(store: &SqliteStore, project_id: &str) -> Vec<i64> {
    store
        .scope_entries(NodeKind::Todo, Some(project_id))
        .expect("scope entries")
        .iter()
        .map(|entry| entry.ordinal)
        .collect()
}

#[test]
fn tail_insert_leaves_existing_orders_alone() {
    let storage_dir = temp_dir("tail_insert_leaves_existing_orders_alone");
    let mut store = SqliteStore::open(&storage_dir).expect("open store");
    let project_id = seed_project(&mut store);

    for ordinal in 1..=3 {
        let result = store
            .node_insert(NodeInsertRequest {
                scope_id: Some(project_id.clone()),
                ordinal,
                payload: NodePayload::Todo {
                    content: format!("task {ordinal}"),
                    kind: "TASK".to_string(),
                    completed: false,
                    level: 0,
                    parent_id: None,
                },
            })
            .expect("insert todo");
        assert_eq!(result.ordinal, ordinal);
        assert_eq!(result.shifted, 0, "tail insert must not shift");
    }

    // A gap beyond the maximum is allowed and shifts nothing.
    let result = store
        .node_insert(NodeInsertRequest {
            scope_id: Some(project_id.clone()),
            ordinal: 10,
            payload: NodePayload::Todo {
                content: "far tail".to_string(),
                kind: "TASK".to_string(),
                completed: false,
                level: 0,
                parent_id: None,
            },
        })
        .expect("insert todo");
    assert_eq!(result.shifted, 0);
    assert_eq!(result.event.event_type, "node_added");

    assert_eq!(ordinals(&store, &project_id), vec![1, 2, 3, 10]);
}

#[test]
fn mid_insert_shifts_conflicting_siblings() {
    let storage_dir = temp_dir("mid_insert_shifts_conflicting_siblings");
    let mut store = SqliteStore::open(&storage_dir).expect("open store");
    let project_id = seed_project(&mut store);

    let a = insert_todo(&mut store, &project_id, 1, "a");
    let b = insert_todo(&mut store, &project_id, 2, "b");
    let c = insert_todo(&mut store, &project_id, 3, "c");

    let result = store
        .node_insert(NodeInsertRequest {
            scope_id: Some(project_id.clone()),
            ordinal: 2,
            payload: NodePayload::Todo {
                content: "wedged".to_string(),
                kind: "TASK".to_string(),
                completed: false,
                level: 0,
                parent_id: None,
            },
        })
        .expect("insert todo");
    assert_eq!(result.ordinal, 2);
    assert_eq!(result.shifted, 2, "b and c move up");

    assert_eq!(ordinals(&store, &project_id), vec![1, 2, 3, 4]);
    assert_eq!(store.todo_get(&a).expect("todo a").ordinal, 1);
    assert_eq!(store.todo_get(&result.id).expect("new todo").ordinal, 2);
    assert_eq!(store.todo_get(&b).expect("todo b").ordinal, 3);
    assert_eq!(store.todo_get(&c).expect("todo c").ordinal, 4);
}

#[test]
fn duplicate_ordinals_from_imported_data_all_shift() {
    let storage_dir = temp_dir("duplicate_ordinals_from_imported_data_all_shift");
    let project_id;
    let imported: Vec<String>;
    {
        let mut store = SqliteStore::open(&storage_dir).expect("open store");
        project_id = seed_project(&mut store);
        imported = vec![
            insert_todo(&mut store, &project_id, 1, "x"),
            insert_todo(&mut store, &project_id, 2, "y"),
            insert_todo(&mut store, &project_id, 3, "z"),
        ];
    }

    // Simulate imported data carrying duplicate ordinals.
    {
        let conn = Connection::open(storage_dir.join("treeline.db")).expect("open db");
        for (id, ordinal) in imported.iter().zip([3i64, 3, 5]) {
            conn.execute(
                "UPDATE todos SET ordinal=?2 WHERE id=?1",
                params![id, ordinal],
            )
            .expect("rewrite ordinal");
        }
    }

    let mut store = SqliteStore::open(&storage_dir).expect("open store again");
    let result = store
        .node_insert(NodeInsertRequest {
            scope_id: Some(project_id.clone()),
            ordinal: 3,
            payload: NodePayload::Todo {
                content: "wedged".to_string(),
                kind: "TASK".to_string(),
                completed: false,
                level: 0,
                parent_id: None,
            },
        })
        .expect("insert todo");
    assert_eq!(result.shifted, 3, "both duplicates and the tail must move");
    assert_eq!(ordinals(&store, &project_id), vec![3, 4, 4, 6]);
}

#[test]
fn sequential_front_inserts_stay_dense_and_distinct() {
    let storage_dir = temp_dir("sequential_front_inserts_stay_dense_and_distinct");
    let mut store = SqliteStore::open(&storage_dir).expect("open store");
    let project_id = seed_project(&mut store);

    insert_todo(&mut store, &project_id, 1, "first");
    insert_todo(&mut store, &project_id, 1, "second");

    assert_eq!(ordinals(&store, &project_id), vec![1, 2]);
}

#[test]
fn unknown_scope_is_rejected() {
    let storage_dir = temp_dir("unknown_scope_is_rejected");
    let mut store = SqliteStore::open(&storage_dir).expect("open store");

    let err = store
        .node_insert(NodeInsertRequest {
            scope_id: Some("PRJ-999".to_string()),
            ordinal: 1,
            payload: NodePayload::Todo {
                content: "orphan".to_string(),
                kind: "TASK".to_string(),
                completed: false,
                level: 0,
                parent_id: None,
            },
        })
        .expect_err("expected unknown scope to fail");
    match err {
        StoreError::InvalidScope {
            scope_kind,
            scope_id,
        } => {
            assert_eq!(scope_kind, "project");
            assert_eq!(scope_id, "PRJ-999");
        }
        other => panic!("expected InvalidScope, got {other:?}"),
    }

    // Listings reject the scope the same way writes do.
    let err = store
        .scope_entries(NodeKind::Todo, Some("PRJ-999"))
        .expect_err("expected listing an unknown scope to fail");
    assert!(matches!(err, StoreError::InvalidScope { .. }));
}

#[test]
fn scope_shape_mismatches_are_rejected() {
    let storage_dir = temp_dir("scope_shape_mismatches_are_rejected");
    let mut store = SqliteStore::open(&storage_dir).expect("open store");

    let err = store
        .node_insert(NodeInsertRequest {
            scope_id: Some("GRP-001".to_string()),
            ordinal: 1,
            payload: NodePayload::Group {
                name: "scoped group".to_string(),
                description: None,
                color: None,
            },
        })
        .expect_err("groups must not carry a scope id");
    assert!(matches!(err, StoreError::InvalidInput(_)));

    let err = store
        .node_insert(NodeInsertRequest {
            scope_id: None,
            ordinal: 1,
            payload: NodePayload::Todo {
                content: "scopeless".to_string(),
                kind: "TASK".to_string(),
                completed: false,
                level: 0,
                parent_id: None,
            },
        })
        .expect_err("todos require a scope id");
    assert!(matches!(err, StoreError::InvalidInput(_)));
}
