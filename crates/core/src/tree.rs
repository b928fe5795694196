#![forbid(unsafe_code)]

use std::collections::{BTreeMap, BTreeSet};

/// One parent edge of an in-memory tree snapshot.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParentLink {
    pub id: String,
    pub parent_id: Option<String>,
}

impl ParentLink {
    pub fn new(id: impl Into<String>, parent_id: Option<impl Into<String>>) -> Self {
        Self {
            id: id.into(),
            parent_id: parent_id.map(Into::into),
        }
    }
}

/// Collects every transitive descendant of `root_id`, depth first.
///
/// The whole candidate set is scanned once to build a child index, then the
/// index is walked iteratively; no query fan-out, no recursion. Children are
/// visited in the order their links appear in `links`, so callers that pass
/// rows sorted by ordinal get a deterministic result. A node already visited
/// is never pushed twice, which keeps the walk finite even on corrupt input
/// with a parent cycle.
pub fn collect_descendants(links: &[ParentLink], root_id: &str) -> Vec<String> {
    let mut children: BTreeMap<&str, Vec<&str>> = BTreeMap::new();
    for link in links {
        if let Some(parent_id) = link.parent_id.as_deref() {
            children.entry(parent_id).or_default().push(link.id.as_str());
        }
    }

    let mut seen: BTreeSet<&str> = BTreeSet::new();
    seen.insert(root_id);
    let mut descendants: Vec<String> = Vec::new();
    let mut stack: Vec<&str> = vec![root_id];
    while let Some(current) = stack.pop() {
        let Some(direct) = children.get(current) else {
            continue;
        };
        for &child in direct {
            if seen.insert(child) {
                descendants.push(child.to_string());
                stack.push(child);
            }
        }
    }
    descendants
}
