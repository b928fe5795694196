#![forbid(unsafe_code)]

use super::*;
use rusqlite::params;
use serde_json::json;

impl SqliteStore {
    /// Creates an empty template scope for template items to live under.
    pub fn template_create(
        &mut self,
        name: &str,
        description: Option<&str>,
    ) -> Result<TemplateRow, StoreError> {
        self.with_immediate_tx(|tx| {
            let now_ms = now_ms();
            let seq = next_counter_tx(tx, "template_seq")?;
            let id = format!("TPL-{seq:03}");
            tx.execute(
                r#"
                INSERT INTO templates(id, name, description, created_at_ms, updated_at_ms)
                VALUES (?1, ?2, ?3, ?4, ?5)
                "#,
                params![id, name, description, now_ms, now_ms],
            )?;

            let payload_json = json!({ "id": id, "name": name }).to_string();
            insert_event_tx(tx, now_ms, Some(id.as_str()), "template_created", &payload_json)?;

            Ok(TemplateRow {
                id,
                name: name.to_string(),
                description: description.map(str::to_string),
                created_at_ms: now_ms,
                updated_at_ms: now_ms,
            })
        })
    }
}
