#![forbid(unsafe_code)]

use super::*;
use rusqlite::{OptionalExtension, params};
use serde_json::json;
use tl_core::tree::{ParentLink, collect_descendants};

impl SqliteStore {
    /// Propagates an expand/collapse toggle from a todo to its whole subtree.
    ///
    /// The owning project's todos are fetched in one read and walked in
    /// memory; no per-level queries. The root only changes `expanded`, while
    /// every descendant takes both `expanded` and `visible` from the new
    /// root state. Descendant state is flattened wholesale: re-expanding a
    /// root re-expands children a user had collapsed individually.
    pub fn todo_set_expanded(
        &mut self,
        root_id: &str,
        expanded: bool,
    ) -> Result<CascadeResult, StoreError> {
        self.with_immediate_tx(|tx| {
            let now_ms = now_ms();
            let project_id: String = tx
                .query_row(
                    "SELECT project_id FROM todos WHERE id=?1",
                    params![root_id],
                    |row| row.get(0),
                )
                .optional()?
                .ok_or_else(|| StoreError::NotFound {
                    id: root_id.to_string(),
                })?;

            let mut stmt = tx.prepare(
                "SELECT id, parent_id FROM todos WHERE project_id=?1 ORDER BY ordinal ASC, id ASC",
            )?;
            let links = stmt
                .query_map(params![project_id], |row| {
                    Ok(ParentLink {
                        id: row.get(0)?,
                        parent_id: row.get(1)?,
                    })
                })?
                .collect::<Result<Vec<_>, _>>()?;

            let descendants = collect_descendants(&links, root_id);

            let flag = if expanded { 1i64 } else { 0i64 };
            tx.execute(
                "UPDATE todos SET expanded=?2, updated_at_ms=?3 WHERE id=?1",
                params![root_id, flag, now_ms],
            )?;
            let mut update = tx.prepare(
                "UPDATE todos SET expanded=?2, visible=?2, updated_at_ms=?3 WHERE id=?1",
            )?;
            for descendant_id in &descendants {
                update.execute(params![descendant_id, flag, now_ms])?;
            }

            let payload_json = json!({
                "root": root_id,
                "project": project_id,
                "expanded": expanded,
                "descendants": descendants.len(),
            })
            .to_string();
            let event = insert_event_tx(tx, now_ms, Some(root_id), "collapse_set", &payload_json)?;

            Ok(CascadeResult {
                root_id: root_id.to_string(),
                updated: descendants.len() + 1,
                event,
            })
        })
    }
}
