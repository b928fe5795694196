#![forbid(unsafe_code)]

use super::super::{OrderedEntryRow, StoreError};
use super::{kind_scope_column, kind_scope_name, kind_scope_table, kind_table};
use rusqlite::{Connection, OptionalExtension, Transaction, params};
use tl_core::model::NodeKind;

/// Rejects scope-id/kind mismatches before any read: every kind except
/// group requires a scope id, groups must not carry one.
pub(in crate::store) fn check_scope_shape(
    kind: NodeKind,
    scope_id: Option<&str>,
) -> Result<(), StoreError> {
    match (kind_scope_column(kind), scope_id) {
        (Some(_), None) => Err(StoreError::InvalidInput("a scope id is required for this kind")),
        (None, Some(_)) => Err(StoreError::InvalidInput(
            "groups are ordered globally; scope id must be absent",
        )),
        _ => Ok(()),
    }
}

/// Existence check for the scope a kind's siblings live in; globally
/// ordered kinds pass through. Works on a plain connection or, through
/// deref, inside an open transaction.
pub(in crate::store) fn ensure_scope(
    conn: &Connection,
    kind: NodeKind,
    scope_id: Option<&str>,
) -> Result<(), StoreError> {
    let (Some(scope_table), Some(scope_id)) = (kind_scope_table(kind), scope_id) else {
        return Ok(());
    };
    let exists: Option<i64> = conn
        .query_row(
            &format!("SELECT 1 FROM {scope_table} WHERE id=?1"),
            params![scope_id],
            |row| row.get(0),
        )
        .optional()?;
    if exists.is_none() {
        return Err(StoreError::InvalidScope {
            scope_kind: kind_scope_name(kind).unwrap_or("global"),
            scope_id: scope_id.to_string(),
        });
    }
    Ok(())
}

pub(in crate::store) fn max_ordinal_tx(
    tx: &Transaction<'_>,
    kind: NodeKind,
    scope_id: Option<&str>,
) -> Result<Option<i64>, StoreError> {
    let table = kind_table(kind);
    let max = match (kind_scope_column(kind), scope_id) {
        (Some(column), Some(scope_id)) => tx.query_row(
            &format!("SELECT MAX(ordinal) FROM {table} WHERE {column}=?1"),
            params![scope_id],
            |row| row.get::<_, Option<i64>>(0),
        )?,
        _ => tx.query_row(&format!("SELECT MAX(ordinal) FROM {table}"), [], |row| {
            row.get::<_, Option<i64>>(0)
        })?,
    };
    Ok(max)
}

/// Bulk `ordinal + 1` shift for every sibling at or above `from_ordinal`.
/// One statement, so duplicate ordinals (imported data) all move together.
pub(in crate::store) fn shift_ordinals_tx(
    tx: &Transaction<'_>,
    kind: NodeKind,
    scope_id: Option<&str>,
    from_ordinal: i64,
) -> Result<usize, StoreError> {
    let table = kind_table(kind);
    let shifted = match (kind_scope_column(kind), scope_id) {
        (Some(column), Some(scope_id)) => tx.execute(
            &format!("UPDATE {table} SET ordinal = ordinal + 1 WHERE {column}=?1 AND ordinal >= ?2"),
            params![scope_id, from_ordinal],
        ),
        _ => tx.execute(
            &format!("UPDATE {table} SET ordinal = ordinal + 1 WHERE ordinal >= ?1"),
            params![from_ordinal],
        ),
    };
    shifted.map_err(|err| ordinal_conflict(err, kind, scope_id))
}

/// Siblings ordered ascending by ordinal, ties broken by id (ids are
/// zero-padded, so id order is creation order).
pub(in crate::store) fn scope_entries_tx(
    tx: &Transaction<'_>,
    kind: NodeKind,
    scope_id: Option<&str>,
) -> Result<Vec<OrderedEntryRow>, StoreError> {
    let table = kind_table(kind);
    let (sql, scope) = match (kind_scope_column(kind), scope_id) {
        (Some(column), Some(scope_id)) => (
            format!("SELECT id, ordinal FROM {table} WHERE {column}=?1 ORDER BY ordinal ASC, id ASC"),
            Some(scope_id),
        ),
        _ => (
            format!("SELECT id, ordinal FROM {table} ORDER BY ordinal ASC, id ASC"),
            None,
        ),
    };
    let mut stmt = tx.prepare(&sql)?;
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

/// The parent of a tree node must live in the same scope as the node itself.
pub(in crate::store) fn parent_in_scope_tx(
    tx: &Transaction<'_>,
    table: &'static str,
    scope_column: &'static str,
    parent_id: &str,
    scope_id: &str,
) -> Result<(), StoreError> {
    let owner: Option<String> = tx
        .query_row(
            &format!("SELECT {scope_column} FROM {table} WHERE id=?1"),
            params![parent_id],
            |row| row.get(0),
        )
        .optional()?;
    match owner {
        None => Err(StoreError::NotFound {
            id: parent_id.to_string(),
        }),
        Some(owner) if owner != scope_id => Err(StoreError::InvalidInput(
            "parent_id must reference a node in the same scope",
        )),
        Some(_) => Ok(()),
    }
}

pub(in crate::store) fn ordinal_conflict(
    err: rusqlite::Error,
    kind: NodeKind,
    scope_id: Option<&str>,
) -> StoreError {
    if let rusqlite::Error::SqliteFailure(failure, _) = &err {
        if failure.code == rusqlite::ErrorCode::ConstraintViolation {
            return StoreError::OrderConflict {
                kind: kind.as_str(),
                scope_id: scope_id.unwrap_or("global").to_string(),
            };
        }
    }
    StoreError::Sql(err)
}
