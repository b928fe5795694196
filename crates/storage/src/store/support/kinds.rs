#![forbid(unsafe_code)]

use tl_core::model::NodeKind;

pub(in crate::store) fn kind_table(kind: NodeKind) -> &'static str {
    match kind {
        NodeKind::Group => "groups",
        NodeKind::Subgroup => "subgroups",
        NodeKind::Project => "projects",
        NodeKind::Todo => "todos",
        NodeKind::TemplateItem => "template_items",
    }
}

/// Column on the kind's table that names its parent scope; `None` for the
/// globally ordered group kind.
pub(in crate::store) fn kind_scope_column(kind: NodeKind) -> Option<&'static str> {
    match kind {
        NodeKind::Group => None,
        NodeKind::Subgroup => Some("group_id"),
        NodeKind::Project => Some("subgroup_id"),
        NodeKind::Todo => Some("project_id"),
        NodeKind::TemplateItem => Some("template_id"),
    }
}

pub(in crate::store) fn kind_scope_table(kind: NodeKind) -> Option<&'static str> {
    match kind {
        NodeKind::Group => None,
        NodeKind::Subgroup => Some("groups"),
        NodeKind::Project => Some("subgroups"),
        NodeKind::Todo => Some("projects"),
        NodeKind::TemplateItem => Some("templates"),
    }
}

pub(in crate::store) fn kind_scope_name(kind: NodeKind) -> Option<&'static str> {
    match kind {
        NodeKind::Group => None,
        NodeKind::Subgroup => Some("group"),
        NodeKind::Project => Some("subgroup"),
        NodeKind::Todo => Some("project"),
        NodeKind::TemplateItem => Some("template"),
    }
}

pub(in crate::store) fn kind_counter(kind: NodeKind) -> &'static str {
    match kind {
        NodeKind::Group => "group_seq",
        NodeKind::Subgroup => "subgroup_seq",
        NodeKind::Project => "project_seq",
        NodeKind::Todo => "todo_seq",
        NodeKind::TemplateItem => "template_item_seq",
    }
}

/// Ids are zero-padded so lexicographic order matches creation order; the
/// compactor leans on that as its stable tie-break.
pub(in crate::store) fn format_node_id(kind: NodeKind, seq: i64) -> String {
    match kind {
        NodeKind::Group => format!("GRP-{seq:03}"),
        NodeKind::Subgroup => format!("SUB-{seq:03}"),
        NodeKind::Project => format!("PRJ-{seq:03}"),
        NodeKind::Todo => format!("TODO-{seq:08}"),
        NodeKind::TemplateItem => format!("ITEM-{seq:08}"),
    }
}
