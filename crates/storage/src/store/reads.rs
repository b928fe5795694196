#![forbid(unsafe_code)]

use super::*;
use rusqlite::{OptionalExtension, params};
use tl_core::model::NodeKind;

impl SqliteStore {
    /// Siblings of one scope, ascending by `(ordinal, id)`.
    pub fn scope_entries(
        &self,
        kind: NodeKind,
        scope_id: Option<&str>,
    ) -> Result<Vec<OrderedEntryRow>, StoreError> {
        check_scope_shape(kind, scope_id)?;
        ensure_scope(&self.conn, kind, scope_id)?;

        let table = kind_table(kind);
        let (sql, scope) = match (kind_scope_column(kind), scope_id) {
            (Some(column), Some(scope_id)) => (
                format!(
                    "SELECT id, ordinal FROM {table} WHERE {column}=?1 ORDER BY ordinal ASC, id ASC"
                ),
                Some(scope_id),
            ),
            _ => (
                format!("SELECT id, ordinal FROM {table} ORDER BY ordinal ASC, id ASC"),
                None,
            ),
        };
        let mut stmt = self.conn.prepare(&sql)?;
        let map_row = |row: &rusqlite::Row<'_>| {
            Ok(OrderedEntryRow {
                id: row.get(0)?,
                ordinal: row.get(1)?,
            })
        };
        let rows = match scope {
            Some(scope_id) => stmt.query_map(params![scope_id], map_row)?,
            None => stmt.query_map([], map_row)?,
        };
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    pub fn project_get(&self, id: &str) -> Result<ProjectRow, StoreError> {
        self.conn
            .query_row(
                &format!("SELECT {PROJECT_COLUMNS} FROM projects WHERE id=?1"),
                params![id],
                map_project_row,
            )
            .optional()?
            .ok_or_else(|| StoreError::NotFound { id: id.to_string() })
    }

    pub fn todo_get(&self, id: &str) -> Result<TodoRow, StoreError> {
        self.conn
            .query_row(
                &format!("SELECT {TODO_COLUMNS} FROM todos WHERE id=?1"),
                params![id],
                map_todo_row,
            )
            .optional()?
            .ok_or_else(|| StoreError::NotFound { id: id.to_string() })
    }

    pub fn todos_list(&self, project_id: &str) -> Result<Vec<TodoRow>, StoreError> {
        ensure_scope(&self.conn, NodeKind::Todo, Some(project_id))?;
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {TODO_COLUMNS} FROM todos WHERE project_id=?1 ORDER BY ordinal ASC, id ASC"
        ))?;
        let rows = stmt.query_map(params![project_id], map_todo_row)?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    pub fn template_items_list(
        &self,
        template_id: &str,
    ) -> Result<Vec<TemplateItemRow>, StoreError> {
        ensure_scope(&self.conn, NodeKind::TemplateItem, Some(template_id))?;
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {TEMPLATE_ITEM_COLUMNS} FROM template_items WHERE template_id=?1 ORDER BY ordinal ASC, id ASC"
        ))?;
        let rows = stmt.query_map(params![template_id], map_template_item_row)?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    /// Most recent journal entries, newest first.
    pub fn events_tail(&self, limit: usize) -> Result<Vec<EventRow>, StoreError> {
        let mut stmt = self.conn.prepare(
            "SELECT seq, ts_ms, entity_id, type, payload_json FROM events ORDER BY seq DESC LIMIT ?1",
        )?;
        let rows = stmt.query_map(params![limit as i64], map_event_row)?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }
}
