//! NodeKind - closed set of node classes the tool knows about.
//!
//! Built from the host class name. Everything unknown lands in `Other`
//! and keeps its class string so snapshots round-trip.

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum NodeKind {
    TimeClip,
    FrameRange,
    Retime,
    Read,
    StickyNote,
    BackdropNode,
    Other(String),
}

impl NodeKind {
    pub fn from_class(class: &str) -> Self {
        match class {
            "TimeClip" => NodeKind::TimeClip,
            "FrameRange" => NodeKind::FrameRange,
            "Retime" => NodeKind::Retime,
            "Read" => NodeKind::Read,
            "StickyNote" => NodeKind::StickyNote,
            "BackdropNode" => NodeKind::BackdropNode,
            other => NodeKind::Other(other.to_string()),
        }
    }

    /// Host class name
    pub fn class(&self) -> &str {
        match self {
            NodeKind::TimeClip => "TimeClip",
            NodeKind::FrameRange => "FrameRange",
            NodeKind::Retime => "Retime",
            NodeKind::Read => "Read",
            NodeKind::StickyNote => "StickyNote",
            NodeKind::BackdropNode => "BackdropNode",
            NodeKind::Other(class) => class,
        }
    }

    /// Free-text annotation nodes (frame data lives in the label)
    pub fn is_annotation(&self) -> bool {
        matches!(self, NodeKind::StickyNote | NodeKind::BackdropNode)
    }

    /// Nodes carrying explicit first/last knobs
    pub fn has_range_knobs(&self) -> bool {
        matches!(
            self,
            NodeKind::TimeClip | NodeKind::FrameRange | NodeKind::Retime | NodeKind::Read
        )
    }

    /// Kinds handled by the range extraction engine
    pub fn is_range_bearing(&self) -> bool {
        self.has_range_knobs() || self.is_annotation()
    }
}

impl From<String> for NodeKind {
    fn from(class: String) -> Self {
        NodeKind::from_class(&class)
    }
}

impl From<NodeKind> for String {
    fn from(kind: NodeKind) -> Self {
        kind.class().to_string()
    }
}

impl std::fmt::Display for NodeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.class())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_class_round_trip() {
        for class in ["TimeClip", "FrameRange", "Retime", "Read", "StickyNote", "BackdropNode", "Blur"] {
            assert_eq!(NodeKind::from_class(class).class(), class);
        }
        assert_eq!(NodeKind::from_class("Blur"), NodeKind::Other("Blur".into()));
    }

    #[test]
    fn test_categories() {
        assert!(NodeKind::StickyNote.is_annotation());
        assert!(NodeKind::BackdropNode.is_range_bearing());
        assert!(NodeKind::Retime.has_range_knobs());
        assert!(!NodeKind::Read.is_annotation());
        assert!(!NodeKind::Other("Grade".into()).is_range_bearing());
    }

    #[test]
    fn test_serializes_as_class_name() {
        let json = serde_json::to_string(&NodeKind::TimeClip).unwrap();
        assert_eq!(json, "\"TimeClip\"");
        let kind: NodeKind = serde_json::from_str("\"Transform\"").unwrap();
        assert_eq!(kind, NodeKind::Other("Transform".into()));
    }
}
