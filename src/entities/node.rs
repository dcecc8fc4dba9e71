//! Node trait - what the tool needs from a host graph node.
//!
//! Nodes are owned by the host. The tool only asks three things of them:
//! - which class they are (`kind`)
//! - whether a knob exists (`has_knob`), never a scan over all knobs
//! - knob reads and writes
//!
//! `ScriptNode` is the in-memory implementation used by [`Script`](super::script::Script).

use serde::{Deserialize, Serialize};

use crate::error::Result;

use super::attrs::{AttrValue, Attrs};
use super::keys::K_LABEL;
use super::node_kind::NodeKind;

/// Base trait for host nodes.
pub trait Node {
    /// Unique node name within the script
    fn name(&self) -> &str;

    /// Closed node class
    fn kind(&self) -> NodeKind;

    /// Capability query: does this node expose a knob with this name
    fn has_knob(&self, name: &str) -> bool;

    /// Current knob value, None if the knob is missing or unreadable
    fn knob(&self, name: &str) -> Option<AttrValue>;

    /// Write a knob value
    fn set_knob(&mut self, name: &str, value: AttrValue) -> Result<()>;

    // --- Convenience methods with default implementations ---

    /// Frame number held by an int or float knob
    fn knob_frame(&self, name: &str) -> Option<i32> {
        self.knob(name).and_then(|v| v.as_frame())
    }

    /// Free-text label (annotation nodes)
    fn label(&self) -> Option<String> {
        match self.knob(K_LABEL) {
            Some(AttrValue::Str(s)) => Some(s),
            _ => None,
        }
    }
}

/// Plain node stored in a [`Script`](super::script::Script) snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScriptNode {
    pub name: String,
    #[serde(rename = "class")]
    pub kind: NodeKind,
    #[serde(default)]
    pub knobs: Attrs,
}

impl ScriptNode {
    pub fn new(name: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            name: name.into(),
            kind,
            knobs: Attrs::new(),
        }
    }

    /// Builder-style knob insert
    pub fn with(mut self, knob: &str, value: impl Into<AttrValue>) -> Self {
        self.knobs.set(knob, value.into());
        self
    }
}

impl Node for ScriptNode {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> NodeKind {
        self.kind.clone()
    }

    fn has_knob(&self, name: &str) -> bool {
        self.knobs.contains(name)
    }

    fn knob(&self, name: &str) -> Option<AttrValue> {
        self.knobs.get(name).cloned()
    }

    fn set_knob(&mut self, name: &str, value: AttrValue) -> Result<()> {
        self.knobs.set(name, value);
        Ok(())
    }

    fn knob_frame(&self, name: &str) -> Option<i32> {
        self.knobs.get_frame(name)
    }

    fn label(&self) -> Option<String> {
        self.knobs.get_str(K_LABEL).map(str::to_string)
    }
}
