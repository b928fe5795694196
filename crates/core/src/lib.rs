#![forbid(unsafe_code)]

pub mod tree;

pub mod model {
    /// Entity kinds that participate in sibling ordering.
    ///
    /// Every kind except `Group` is ordered inside a parent scope; groups are
    /// ordered in a single global scope.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub enum NodeKind {
        Group,
        Subgroup,
        Project,
        Todo,
        TemplateItem,
    }

    impl NodeKind {
        pub fn as_str(&self) -> &'static str {
            match self {
                Self::Group => "group",
                Self::Subgroup => "subgroup",
                Self::Project => "project",
                Self::Todo => "todo",
                Self::TemplateItem => "templateItem",
            }
        }

        pub fn parse(value: &str) -> Option<Self> {
            match value {
                "group" => Some(Self::Group),
                "subgroup" => Some(Self::Subgroup),
                "project" => Some(Self::Project),
                "todo" => Some(Self::Todo),
                "templateItem" => Some(Self::TemplateItem),
                _ => None,
            }
        }
    }

    /// Kinds that form parent-linked hierarchies and can be cloned as trees.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub enum TreeKind {
        Todo,
        TemplateItem,
    }

    impl TreeKind {
        pub fn as_str(&self) -> &'static str {
            self.node_kind().as_str()
        }

        pub fn node_kind(&self) -> NodeKind {
            match self {
                Self::Todo => NodeKind::Todo,
                Self::TemplateItem => NodeKind::TemplateItem,
            }
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn node_kind_round_trips_through_parse() {
            for kind in [
                NodeKind::Group,
                NodeKind::Subgroup,
                NodeKind::Project,
                NodeKind::Todo,
                NodeKind::TemplateItem,
            ] {
                assert_eq!(NodeKind::parse(kind.as_str()), Some(kind));
            }
            assert_eq!(NodeKind::parse("tag"), None);
            assert_eq!(NodeKind::parse(""), None);
        }

        #[test]
        fn tree_kind_maps_to_node_kind() {
            assert_eq!(TreeKind::Todo.node_kind(), NodeKind::Todo);
            assert_eq!(TreeKind::TemplateItem.node_kind(), NodeKind::TemplateItem);
            assert_eq!(TreeKind::TemplateItem.as_str(), "templateItem");
        }
    }
}
