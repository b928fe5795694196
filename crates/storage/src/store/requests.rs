#![forbid(unsafe_code)]

use tl_core::model::NodeKind;

/// Domain fields for one ordered node, per kind.
///
/// Field sets follow the owning application's allow-lists: presentation
/// fields for the group/subgroup/project levels, content plus tree fields
/// for todos and template items. The `kind` strings on todo and template
/// item payloads ("TASK", "NOTE", ...) are stored verbatim.
#[derive(Clone, Debug)]
pub enum NodePayload {
    Group {
        name: String,
        description: Option<String>,
        color: Option<String>,
    },
    Subgroup {
        name: String,
        description: Option<String>,
        color: Option<String>,
    },
    Project {
        name: String,
        description: Option<String>,
        status: Option<String>,
        color: Option<String>,
    },
    Todo {
        content: String,
        kind: String,
        completed: bool,
        level: i64,
        parent_id: Option<String>,
    },
    TemplateItem {
        content: String,
        kind: String,
        level: i64,
        parent_id: Option<String>,
    },
}

impl NodePayload {
    pub fn node_kind(&self) -> NodeKind {
        match self {
            Self::Group { .. } => NodeKind::Group,
            Self::Subgroup { .. } => NodeKind::Subgroup,
            Self::Project { .. } => NodeKind::Project,
            Self::Todo { .. } => NodeKind::Todo,
            Self::TemplateItem { .. } => NodeKind::TemplateItem,
        }
    }
}

/// Insert a new sibling at `ordinal` within the scope identified by
/// `scope_id` (`None` only for groups, which are ordered globally).
#[derive(Clone, Debug)]
pub struct NodeInsertRequest {
    pub scope_id: Option<String>,
    pub ordinal: i64,
    pub payload: NodePayload,
}

#[derive(Clone, Debug)]
pub struct NodeInsertResult {
    pub id: String,
    pub ordinal: i64,
    /// Siblings whose ordinal was incremented to make room.
    pub shifted: usize,
    pub event: EventRow,
}

#[derive(Clone, Debug)]
pub struct CompactResult {
    pub total: usize,
    /// Rows whose ordinal actually changed; zero on an already-dense scope.
    pub rewritten: usize,
    pub event: EventRow,
}

#[derive(Clone, Debug)]
pub struct CascadeResult {
    pub root_id: String,
    /// Root plus every updated descendant.
    pub updated: usize,
    pub event: EventRow,
}

#[derive(Clone, Debug)]
pub struct CloneResult {
    pub new_scope_id: String,
    pub nodes: usize,
    /// Parent edges relinked in phase two.
    pub edges: usize,
    pub event: EventRow,
}

#[derive(Clone, Debug)]
pub struct OrderedEntryRow {
    pub id: String,
    pub ordinal: i64,
}

#[derive(Clone, Debug)]
pub struct ProjectRow {
    pub id: String,
    pub subgroup_id: String,
    pub name: String,
    pub description: Option<String>,
    pub status: String,
    pub color: Option<String>,
    pub ordinal: i64,
    pub created_at_ms: i64,
    pub updated_at_ms: i64,
}

#[derive(Clone, Debug)]
pub struct TodoRow {
    pub id: String,
    pub project_id: String,
    pub parent_id: Option<String>,
    pub content: String,
    pub kind: String,
    pub completed: bool,
    pub ordinal: i64,
    pub level: i64,
    pub expanded: bool,
    pub visible: bool,
    pub created_at_ms: i64,
    pub updated_at_ms: i64,
}

#[derive(Clone, Debug)]
pub struct TemplateItemRow {
    pub id: String,
    pub template_id: String,
    pub parent_id: Option<String>,
    pub content: String,
    pub kind: String,
    pub ordinal: i64,
    pub level: i64,
    pub created_at_ms: i64,
    pub updated_at_ms: i64,
}

#[derive(Clone, Debug)]
pub struct TemplateRow {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub created_at_ms: i64,
    pub updated_at_ms: i64,
}

#[derive(Clone, Debug)]
pub struct EventRow {
    pub seq: i64,
    pub ts_ms: i64,
    pub entity_id: Option<String>,
    pub event_type: String,
    pub payload_json: String,
}
