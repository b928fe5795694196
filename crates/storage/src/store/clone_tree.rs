#![forbid(unsafe_code)]

use super::*;
use rusqlite::{OptionalExtension, params};
use serde_json::json;
use std::collections::BTreeMap;
use tl_core::model::{NodeKind, TreeKind};

impl SqliteStore {
    /// Clones a whole parent-linked tree into a fresh scope and returns the
    /// new scope's identity.
    ///
    /// Two phases, because clone ids only exist once their rows do: first
    /// every source node is copied under the new scope with `parent_id`
    /// cleared while an old-to-new id map is built, then every edge of the
    /// source tree is replayed through the map. Both phases plus the scope
    /// row creation commit as one transaction; a source edge that points
    /// outside the scope aborts the whole clone.
    pub fn tree_clone(
        &mut self,
        kind: TreeKind,
        source_scope_id: &str,
    ) -> Result<CloneResult, StoreError> {
        match kind {
            TreeKind::Todo => self.clone_project(source_scope_id),
            TreeKind::TemplateItem => self.clone_template(source_scope_id),
        }
    }

    fn clone_project(&mut self, source_project_id: &str) -> Result<CloneResult, StoreError> {
        self.with_immediate_tx(|tx| {
            let now_ms = now_ms();
            let source = tx
                .query_row(
                    &format!("SELECT {PROJECT_COLUMNS} FROM projects WHERE id=?1"),
                    params![source_project_id],
                    map_project_row,
                )
                .optional()?
                .ok_or_else(|| StoreError::InvalidScope {
                    scope_kind: "project",
                    scope_id: source_project_id.to_string(),
                })?;

            // The clone becomes the last sibling of the source's subgroup.
            let max = max_ordinal_tx(tx, NodeKind::Project, Some(source.subgroup_id.as_str()))?;
            let new_project_id = allocate_node_id_tx(tx, NodeKind::Project)?;
            tx.execute(
                r#"
                INSERT INTO projects(id, subgroup_id, name, description, status, color, ordinal, created_at_ms, updated_at_ms)
                VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
                "#,
                params![
                    new_project_id,
                    source.subgroup_id,
                    source.name,
                    source.description,
                    source.status,
                    source.color,
                    max.unwrap_or(0) + 1,
                    now_ms,
                    now_ms
                ],
            )?;

            let mut stmt = tx.prepare(&format!(
                "SELECT {TODO_COLUMNS} FROM todos WHERE project_id=?1 ORDER BY ordinal ASC, id ASC"
            ))?;
            let sources = stmt
                .query_map(params![source_project_id], map_todo_row)?
                .collect::<Result<Vec<_>, _>>()?;

            // Phase one: copy every node with its parent cleared.
            let mut id_map: BTreeMap<String, String> = BTreeMap::new();
            for todo in &sources {
                let clone_id = allocate_node_id_tx(tx, NodeKind::Todo)?;
                tx.execute(
                    r#"
                    INSERT INTO todos(
                        id, project_id, parent_id, content, kind, completed,
                        ordinal, level, expanded, visible, created_at_ms, updated_at_ms
                    ) VALUES (?1, ?2, NULL, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)
                    "#,
                    params![
                        clone_id,
                        new_project_id,
                        todo.content,
                        todo.kind,
                        if todo.completed { 1i64 } else { 0i64 },
                        todo.ordinal,
                        todo.level,
                        if todo.expanded { 1i64 } else { 0i64 },
                        if todo.visible { 1i64 } else { 0i64 },
                        now_ms,
                        now_ms
                    ],
                )?;
                id_map.insert(todo.id.clone(), clone_id);
            }

            // Phase two: replay the source edges through the id map.
            let mut relink =
                tx.prepare("UPDATE todos SET parent_id=?2 WHERE id=?1")?;
            let mut edges = 0usize;
            for todo in &sources {
                let Some(parent_id) = todo.parent_id.as_deref() else {
                    continue;
                };
                let clone_id = &id_map[&todo.id];
                let clone_parent_id = id_map.get(parent_id).ok_or(StoreError::InvalidInput(
                    "source tree references a parent outside its scope",
                ))?;
                relink.execute(params![clone_id, clone_parent_id])?;
                edges += 1;
            }

            let payload_json = json!({
                "kind": "todo",
                "source": source_project_id,
                "scope": new_project_id,
                "nodes": sources.len(),
                "edges": edges,
            })
            .to_string();
            let event =
                insert_event_tx(tx, now_ms, Some(new_project_id.as_str()), "tree_cloned", &payload_json)?;

            Ok(CloneResult {
                new_scope_id: new_project_id,
                nodes: sources.len(),
                edges,
                event,
            })
        })
    }

    fn clone_template(&mut self, source_template_id: &str) -> Result<CloneResult, StoreError> {
        self.with_immediate_tx(|tx| {
            let now_ms = now_ms();
            let source = tx
                .query_row(
                    "SELECT id, name, description, created_at_ms, updated_at_ms FROM templates WHERE id=?1",
                    params![source_template_id],
                    map_template_row,
                )
                .optional()?
                .ok_or_else(|| StoreError::InvalidScope {
                    scope_kind: "template",
                    scope_id: source_template_id.to_string(),
                })?;

            let seq = next_counter_tx(tx, "template_seq")?;
            let new_template_id = format!("TPL-{seq:03}");
            tx.execute(
                r#"
                INSERT INTO templates(id, name, description, created_at_ms, updated_at_ms)
                VALUES (?1, ?2, ?3, ?4, ?5)
                "#,
                params![new_template_id, source.name, source.description, now_ms, now_ms],
            )?;

            let mut stmt = tx.prepare(&format!(
                "SELECT {TEMPLATE_ITEM_COLUMNS} FROM template_items WHERE template_id=?1 ORDER BY ordinal ASC, id ASC"
            ))?;
            let sources = stmt
                .query_map(params![source_template_id], map_template_item_row)?
                .collect::<Result<Vec<_>, _>>()?;

            let mut id_map: BTreeMap<String, String> = BTreeMap::new();
            for item in &sources {
                let clone_id = allocate_node_id_tx(tx, NodeKind::TemplateItem)?;
                tx.execute(
                    r#"
                    INSERT INTO template_items(
                        id, template_id, parent_id, content, kind,
                        ordinal, level, created_at_ms, updated_at_ms
                    ) VALUES (?1, ?2, NULL, ?3, ?4, ?5, ?6, ?7, ?8)
                    "#,
                    params![
                        clone_id,
                        new_template_id,
                        item.content,
                        item.kind,
                        item.ordinal,
                        item.level,
                        now_ms,
                        now_ms
                    ],
                )?;
                id_map.insert(item.id.clone(), clone_id);
            }

            let mut relink =
                tx.prepare("UPDATE template_items SET parent_id=?2 WHERE id=?1")?;
            let mut edges = 0usize;
            for item in &sources {
                let Some(parent_id) = item.parent_id.as_deref() else {
                    continue;
                };
                let clone_id = &id_map[&item.id];
                let clone_parent_id = id_map.get(parent_id).ok_or(StoreError::InvalidInput(
                    "source tree references a parent outside its scope",
                ))?;
                relink.execute(params![clone_id, clone_parent_id])?;
                edges += 1;
            }

            let payload_json = json!({
                "kind": "templateItem",
                "source": source_template_id,
                "scope": new_template_id,
                "nodes": sources.len(),
                "edges": edges,
            })
            .to_string();
            let event =
                insert_event_tx(tx, now_ms, Some(new_template_id.as_str()), "tree_cloned", &payload_json)?;

            Ok(CloneResult {
                new_scope_id: new_template_id,
                nodes: sources.len(),
                edges,
                event,
            })
        })
    }
}
