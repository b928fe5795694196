#![forbid(unsafe_code)]

use super::*;
use rusqlite::{Transaction, params};
use serde_json::json;

impl SqliteStore {
    /// Inserts a new sibling at the requested ordinal, shifting every
    /// conflicting sibling up by one.
    ///
    /// When the requested ordinal exceeds the scope's current maximum (or
    /// the scope is empty) no shift runs at all; otherwise the shift and the
    /// insert commit as one unit, so a failure leaves the scope's ordinals
    /// exactly as they were.
    pub fn node_insert(&mut self, request: NodeInsertRequest) -> Result<NodeInsertResult, StoreError> {
        let kind = request.payload.node_kind();
        check_scope_shape(kind, request.scope_id.as_deref())?;

        self.with_immediate_tx(|tx| {
            let now_ms = now_ms();
            let scope_id = request.scope_id.as_deref();
            ensure_scope(tx, kind, scope_id)?;

            let max = max_ordinal_tx(tx, kind, scope_id)?;
            let shifted = if max.is_some_and(|max| request.ordinal <= max) {
                shift_ordinals_tx(tx, kind, scope_id, request.ordinal)?
            } else {
                0
            };

            let id = allocate_node_id_tx(tx, kind)?;
            insert_node_row_tx(tx, &id, scope_id, request.ordinal, &request.payload, now_ms)
                .map_err(|err| match err {
                    StoreError::Sql(sql_err) => ordinal_conflict(sql_err, kind, scope_id),
                    other => other,
                })?;

            let payload_json = json!({
                "kind": kind.as_str(),
                "id": id,
                "scope": scope_id,
                "ordinal": request.ordinal,
                "shifted": shifted,
            })
            .to_string();
            let event = insert_event_tx(tx, now_ms, Some(id.as_str()), "node_added", &payload_json)?;

            Ok(NodeInsertResult {
                id,
                ordinal: request.ordinal,
                shifted,
                event,
            })
        })
    }
}

fn insert_node_row_tx(
    tx: &Transaction<'_>,
    id: &str,
    scope_id: Option<&str>,
    ordinal: i64,
    payload: &NodePayload,
    now_ms: i64,
) -> Result<(), StoreError> {
    match payload {
        NodePayload::Group {
            name,
            description,
            color,
        } => {
            tx.execute(
                r#"
                INSERT INTO groups(id, name, description, color, ordinal, created_at_ms, updated_at_ms)
                VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
                "#,
                params![id, name, description, color, ordinal, now_ms, now_ms],
            )?;
        }
        NodePayload::Subgroup {
            name,
            description,
            color,
        } => {
            tx.execute(
                r#"
                INSERT INTO subgroups(id, group_id, name, description, color, ordinal, created_at_ms, updated_at_ms)
                VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
                "#,
                params![id, scope_id, name, description, color, ordinal, now_ms, now_ms],
            )?;
        }
        NodePayload::Project {
            name,
            description,
            status,
            color,
        } => {
            tx.execute(
                r#"
                INSERT INTO projects(id, subgroup_id, name, description, status, color, ordinal, created_at_ms, updated_at_ms)
                VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
                "#,
                params![
                    id,
                    scope_id,
                    name,
                    description,
                    status.as_deref().unwrap_or("ACTIVE"),
                    color,
                    ordinal,
                    now_ms,
                    now_ms
                ],
            )?;
        }
        NodePayload::Todo {
            content,
            kind,
            completed,
            level,
            parent_id,
        } => {
            if let Some(parent_id) = parent_id.as_deref() {
                let scope_id = scope_id.ok_or(StoreError::InvalidInput(
                    "a scope id is required for this kind",
                ))?;
                parent_in_scope_tx(tx, "todos", "project_id", parent_id, scope_id)?;
            }
            tx.execute(
                r#"
                INSERT INTO todos(
                    id, project_id, parent_id, content, kind, completed,
                    ordinal, level, expanded, visible, created_at_ms, updated_at_ms
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, 1, 1, ?9, ?10)
                "#,
                params![
                    id,
                    scope_id,
                    parent_id,
                    content,
                    kind,
                    if *completed { 1i64 } else { 0i64 },
                    ordinal,
                    level,
                    now_ms,
                    now_ms
                ],
            )?;
        }
        NodePayload::TemplateItem {
            content,
            kind,
            level,
            parent_id,
        } => {
            if let Some(parent_id) = parent_id.as_deref() {
                let scope_id = scope_id.ok_or(StoreError::InvalidInput(
                    "a scope id is required for this kind",
                ))?;
                parent_in_scope_tx(tx, "template_items", "template_id", parent_id, scope_id)?;
            }
            tx.execute(
                r#"
                INSERT INTO template_items(
                    id, template_id, parent_id, content, kind,
                    ordinal, level, created_at_ms, updated_at_ms
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
                "#,
                params![id, scope_id, parent_id, content, kind, ordinal, level, now_ms, now_ms],
            )?;
        }
    }
    Ok(())
}
