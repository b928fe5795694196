#![forbid(unsafe_code)]

use super::super::StoreError;
use rusqlite::{Connection, params};

pub(in crate::store) fn install_schema(conn: &Connection) -> Result<(), StoreError> {
    conn.execute_batch(
        r#"
        PRAGMA journal_mode=WAL;
        PRAGMA synchronous=NORMAL;

        CREATE TABLE IF NOT EXISTS meta (
          key TEXT PRIMARY KEY,
          value TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS counters (
          name TEXT PRIMARY KEY,
          value INTEGER NOT NULL
        );

        CREATE TABLE IF NOT EXISTS groups (
          id TEXT PRIMARY KEY,
          name TEXT NOT NULL,
          description TEXT,
          color TEXT,
          ordinal INTEGER NOT NULL,
          created_at_ms INTEGER NOT NULL,
          updated_at_ms INTEGER NOT NULL
        );

        CREATE TABLE IF NOT EXISTS subgroups (
          id TEXT PRIMARY KEY,
          group_id TEXT NOT NULL REFERENCES groups(id) ON DELETE CASCADE,
          name TEXT NOT NULL,
          description TEXT,
          color TEXT,
          ordinal INTEGER NOT NULL,
          created_at_ms INTEGER NOT NULL,
          updated_at_ms INTEGER NOT NULL
        );

        CREATE TABLE IF NOT EXISTS projects (
          id TEXT PRIMARY KEY,
          subgroup_id TEXT NOT NULL REFERENCES subgroups(id) ON DELETE CASCADE,
          name TEXT NOT NULL,
          description TEXT,
          status TEXT NOT NULL DEFAULT 'ACTIVE',
          color TEXT,
          ordinal INTEGER NOT NULL,
          created_at_ms INTEGER NOT NULL,
          updated_at_ms INTEGER NOT NULL
        );

        CREATE TABLE IF NOT EXISTS todos (
          id TEXT PRIMARY KEY,
          project_id TEXT NOT NULL REFERENCES projects(id) ON DELETE CASCADE,
          parent_id TEXT REFERENCES todos(id) ON DELETE CASCADE,
          content TEXT NOT NULL,
          kind TEXT NOT NULL DEFAULT 'TASK',
          completed INTEGER NOT NULL DEFAULT 0,
          ordinal INTEGER NOT NULL,
          level INTEGER NOT NULL DEFAULT 0,
          expanded INTEGER NOT NULL DEFAULT 1,
          visible INTEGER NOT NULL DEFAULT 1,
          created_at_ms INTEGER NOT NULL,
          updated_at_ms INTEGER NOT NULL
        );

        CREATE TABLE IF NOT EXISTS templates (
          id TEXT PRIMARY KEY,
          name TEXT NOT NULL,
          description TEXT,
          created_at_ms INTEGER NOT NULL,
          updated_at_ms INTEGER NOT NULL
        );

        CREATE TABLE IF NOT EXISTS template_items (
          id TEXT PRIMARY KEY,
          template_id TEXT NOT NULL REFERENCES templates(id) ON DELETE CASCADE,
          parent_id TEXT REFERENCES template_items(id) ON DELETE CASCADE,
          content TEXT NOT NULL,
          kind TEXT NOT NULL DEFAULT 'TASK',
          ordinal INTEGER NOT NULL,
          level INTEGER NOT NULL DEFAULT 0,
          created_at_ms INTEGER NOT NULL,
          updated_at_ms INTEGER NOT NULL
        );

        CREATE TABLE IF NOT EXISTS events (
          seq INTEGER PRIMARY KEY AUTOINCREMENT,
          ts_ms INTEGER NOT NULL,
          entity_id TEXT,
          type TEXT NOT NULL,
          payload_json TEXT NOT NULL
        );

        -- Ordinal indexes are deliberately non-unique: imported data may
        -- carry duplicate ordinals until a compaction pass repairs the scope.
        CREATE INDEX IF NOT EXISTS idx_groups_ordinal ON groups(ordinal);
        CREATE INDEX IF NOT EXISTS idx_subgroups_scope_ordinal ON subgroups(group_id, ordinal);
        CREATE INDEX IF NOT EXISTS idx_projects_scope_ordinal ON projects(subgroup_id, ordinal);
        CREATE INDEX IF NOT EXISTS idx_todos_scope_ordinal ON todos(project_id, ordinal);
        CREATE INDEX IF NOT EXISTS idx_todos_parent ON todos(parent_id);
        CREATE INDEX IF NOT EXISTS idx_template_items_scope_ordinal ON template_items(template_id, ordinal);
        CREATE INDEX IF NOT EXISTS idx_template_items_parent ON template_items(parent_id);
        "#,
    )?;

    conn.execute(
        "INSERT OR IGNORE INTO meta(key, value) VALUES (?1, ?2)",
        params!["schema_version", "v1"],
    )?;

    Ok(())
}
