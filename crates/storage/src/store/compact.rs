#![forbid(unsafe_code)]

use super::*;
use rusqlite::params;
use serde_json::json;
use tl_core::model::NodeKind;

impl SqliteStore {
    /// Renumbers every sibling in the scope to a dense `1..N` run.
    ///
    /// Current precedence is preserved: rows are taken ascending by ordinal
    /// with id as the stable tie-break, then assigned sequential ordinals.
    /// Rows whose ordinal already matches are left untouched, so compacting
    /// an already-dense scope rewrites nothing.
    pub fn scope_compact(
        &mut self,
        kind: NodeKind,
        scope_id: Option<&str>,
    ) -> Result<CompactResult, StoreError> {
        check_scope_shape(kind, scope_id)?;

        self.with_immediate_tx(|tx| {
            let now_ms = now_ms();
            ensure_scope(tx, kind, scope_id)?;

            let entries = scope_entries_tx(tx, kind, scope_id)?;
            let table = kind_table(kind);
            let mut rewritten = 0usize;
            for (index, entry) in entries.iter().enumerate() {
                let next = index as i64 + 1;
                if entry.ordinal == next {
                    continue;
                }
                tx.execute(
                    &format!("UPDATE {table} SET ordinal=?2 WHERE id=?1"),
                    params![entry.id, next],
                )
                .map_err(|err| ordinal_conflict(err, kind, scope_id))?;
                rewritten += 1;
            }

            let payload_json = json!({
                "kind": kind.as_str(),
                "scope": scope_id,
                "total": entries.len(),
                "rewritten": rewritten,
            })
            .to_string();
            let event = insert_event_tx(tx, now_ms, scope_id, "scope_compacted", &payload_json)?;

            Ok(CompactResult {
                total: entries.len(),
                rewritten,
                event,
            })
        })
    }
}
