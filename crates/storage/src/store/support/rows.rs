#![forbid(unsafe_code)]

use super::super::{EventRow, ProjectRow, TemplateItemRow, TemplateRow, TodoRow};
use rusqlite::Row;

pub(in crate::store) fn map_project_row(row: &Row<'_>) -> rusqlite::Result<ProjectRow> {
    Ok(ProjectRow {
        id: row.get(0)?,
        subgroup_id: row.get(1)?,
        name: row.get(2)?,
        description: row.get(3)?,
        status: row.get(4)?,
        color: row.get(5)?,
        ordinal: row.get(6)?,
        created_at_ms: row.get(7)?,
        updated_at_ms: row.get(8)?,
    })
}

pub(in crate::store) const PROJECT_COLUMNS: &str =
    "id, subgroup_id, name, description, status, color, ordinal, created_at_ms, updated_at_ms";

pub(in crate::store) fn map_todo_row(row: &Row<'_>) -> rusqlite::Result<TodoRow> {
    Ok(TodoRow {
        id: row.get(0)?,
        project_id: row.get(1)?,
        parent_id: row.get(2)?,
        content: row.get(3)?,
        kind: row.get(4)?,
        completed: row.get::<_, i64>(5)? != 0,
        ordinal: row.get(6)?,
        level: row.get(7)?,
        expanded: row.get::<_, i64>(8)? != 0,
        visible: row.get::<_, i64>(9)? != 0,
        created_at_ms: row.get(10)?,
        updated_at_ms: row.get(11)?,
    })
}

pub(in crate::store) const TODO_COLUMNS: &str = "id, project_id, parent_id, content, kind, \
     completed, ordinal, level, expanded, visible, created_at_ms, updated_at_ms";

pub(in crate::store) fn map_template_item_row(row: &Row<'_>) -> rusqlite::Result<TemplateItemRow> {
    Ok(TemplateItemRow {
        id: row.get(0)?,
        template_id: row.get(1)?,
        parent_id: row.get(2)?,
        content: row.get(3)?,
        kind: row.get(4)?,
        ordinal: row.get(5)?,
        level: row.get(6)?,
        created_at_ms: row.get(7)?,
        updated_at_ms: row.get(8)?,
    })
}

pub(in crate::store) const TEMPLATE_ITEM_COLUMNS: &str =
    "id, template_id, parent_id, content, kind, ordinal, level, created_at_ms, updated_at_ms";

pub(in crate::store) fn map_template_row(row: &Row<'_>) -> rusqlite::Result<TemplateRow> {
    Ok(TemplateRow {
        id: row.get(0)?,
        name: row.get(1)?,
        description: row.get(2)?,
        created_at_ms: row.get(3)?,
        updated_at_ms: row.get(4)?,
    })
}

pub(in crate::store) fn map_event_row(row: &Row<'_>) -> rusqlite::Result<EventRow> {
    Ok(EventRow {
        seq: row.get(0)?,
        ts_ms: row.get(1)?,
        entity_id: row.get(2)?,
        event_type: row.get(3)?,
        payload_json: row.get(4)?,
    })
}
