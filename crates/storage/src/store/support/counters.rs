#![forbid(unsafe_code)]

use super::super::StoreError;
use super::{format_node_id, kind_counter};
use rusqlite::{OptionalExtension, Transaction, params};
use tl_core::model::NodeKind;

pub(in crate::store) fn next_counter_tx(
    tx: &Transaction<'_>,
    name: &str,
) -> Result<i64, StoreError> {
    let current: i64 = tx
        .query_row(
            "SELECT value FROM counters WHERE name=?1",
            params![name],
            |row| row.get(0),
        )
        .optional()?
        .unwrap_or(0);
    let next = current + 1;
    tx.execute(
        r#"
        INSERT INTO counters(name, value) VALUES (?1, ?2)
        ON CONFLICT(name) DO UPDATE SET value=excluded.value
        "#,
        params![name, next],
    )?;
    Ok(next)
}

pub(in crate::store) fn allocate_node_id_tx(
    tx: &Transaction<'_>,
    kind: NodeKind,
) -> Result<String, StoreError> {
    let seq = next_counter_tx(tx, kind_counter(kind))?;
    Ok(format_node_id(kind, seq))
}
