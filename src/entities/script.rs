//! Script: serializable snapshot of a host script.
//!
//! Holds nodes, selection, root range and viewers. Implements [`Host`] so
//! commands can run without the compositing application (CLI, tests).
//! Saved and loaded via `Script::to_json` / `Script::from_json`.

use std::collections::VecDeque;
use std::fs;
use std::path::Path;

use indexmap::IndexMap;
use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::config::AnnotationStyle;
use crate::error::{Error, Result};

use super::attrs::AttrValue;
use super::frame_range::FrameRange;
use super::keys::{K_LABEL, K_NOTE_FONT, K_NOTE_FONT_SIZE};
use super::node::{Node, ScriptNode};
use super::node_kind::NodeKind;
use super::traits::Host;
use super::viewer::{Viewer, ViewerState};

/// Top-level script snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Script {
    /// Root first/last frame
    pub root: FrameRange,

    #[serde(default)]
    pub nodes: Vec<ScriptNode>,

    /// Selected node names (ordered)
    #[serde(default)]
    pub selection: Vec<String>,

    #[serde(default)]
    pub viewers: IndexMap<String, ViewerState>,

    #[serde(default)]
    pub active_viewer: Option<String>,

    /// Scripted answers for `ask_input` (None = cancel), runtime-only
    #[serde(skip)]
    inputs: VecDeque<Option<String>>,

    /// Warnings emitted by commands, runtime-only
    #[serde(skip)]
    warnings: Vec<String>,

    /// Blocking messages emitted by commands, runtime-only
    #[serde(skip)]
    messages: Vec<String>,
}

impl Default for Script {
    fn default() -> Self {
        Self::new(FrameRange::new(1, 100))
    }
}

impl Script {
    /// Script with one active viewer ("Viewer1") showing the root range
    pub fn new(root: FrameRange) -> Self {
        let mut viewers = IndexMap::new();
        viewers.insert("Viewer1".to_string(), ViewerState::new(root));
        Self {
            root,
            nodes: Vec::new(),
            selection: Vec::new(),
            viewers,
            active_viewer: Some("Viewer1".to_string()),
            inputs: VecDeque::new(),
            warnings: Vec::new(),
            messages: Vec::new(),
        }
    }

    pub fn add_node(&mut self, node: ScriptNode) {
        self.nodes.push(node);
    }

    /// Replace the selection
    pub fn select<S: AsRef<str>>(&mut self, names: &[S]) {
        self.selection = names.iter().map(|s| s.as_ref().to_string()).collect();
    }

    pub fn node(&self, name: &str) -> Option<&ScriptNode> {
        self.nodes.iter().find(|n| n.name == name)
    }

    pub fn active_viewer(&self) -> Option<&ViewerState> {
        self.active_viewer.as_ref().and_then(|name| self.viewers.get(name))
    }

    pub fn active_viewer_mut(&mut self) -> Option<&mut ViewerState> {
        let name = self.active_viewer.as_ref()?;
        self.viewers.get_mut(name)
    }

    /// Queue an answer for the next prompt
    pub fn push_input(&mut self, answer: Option<String>) {
        self.inputs.push_back(answer);
    }

    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    /// First free `<Class><N>` name
    fn unique_name(&self, class: &str) -> String {
        (1..)
            .map(|n| format!("{}{}", class, n))
            .find(|candidate| self.node(candidate).is_none())
            .unwrap_or_else(|| class.to_string())
    }

    /// Save script to JSON file.
    pub fn to_json<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path.as_ref(), json)?;
        Ok(())
    }

    /// Load script from JSON file.
    pub fn from_json<P: AsRef<Path>>(path: P) -> Result<Self> {
        let json = fs::read_to_string(path.as_ref())?;
        let script: Script = serde_json::from_str(&json)?;
        if let Some(name) = &script.active_viewer {
            if !script.viewers.contains_key(name) {
                return Err(Error::host(format!("active viewer {} is not in the script", name)));
            }
        }
        Ok(script)
    }
}

impl Host for Script {
    fn selected_nodes(&self) -> Vec<String> {
        self.selection.clone()
    }

    fn with_node<R>(&self, name: &str, f: impl FnOnce(&dyn Node) -> R) -> Option<R> {
        self.node(name).map(|node| f(node))
    }

    fn with_node_mut<R>(&mut self, name: &str, f: impl FnOnce(&mut dyn Node) -> R) -> Option<R> {
        self.nodes
            .iter_mut()
            .find(|n| n.name == name)
            .map(|node| f(node))
    }

    fn has_active_viewer(&self) -> bool {
        self.active_viewer().is_some()
    }

    fn with_active_viewer<R>(&mut self, f: impl FnOnce(&mut dyn Viewer) -> R) -> Option<R> {
        self.active_viewer_mut().map(|viewer| f(viewer))
    }

    fn root_range(&self) -> Result<FrameRange> {
        Ok(self.root)
    }

    fn current_frame(&self) -> i32 {
        self.active_viewer()
            .map(|v| v.current_frame)
            .unwrap_or(self.root.first)
    }

    fn ask_input(&mut self, prompt: &str, default: &str) -> Option<String> {
        let answer = self.inputs.pop_front().flatten();
        info!("{} [{}] -> {:?}", prompt.trim(), default, answer);
        answer
    }

    fn create_annotation(&mut self, label: &str, style: &AnnotationStyle) -> Result<String> {
        let kind = NodeKind::StickyNote;
        let name = self.unique_name(kind.class());
        let node = ScriptNode::new(name.clone(), kind)
            .with(K_LABEL, label)
            .with(K_NOTE_FONT, style.font.as_str())
            .with(K_NOTE_FONT_SIZE, AttrValue::Int(style.font_size));
        self.nodes.push(node);
        // New nodes come in selected, alone
        self.selection = vec![name.clone()];
        Ok(name)
    }

    fn warning(&mut self, msg: &str) {
        warn!("{}", msg);
        self.warnings.push(msg.to_string());
    }

    fn message(&mut self, msg: &str) {
        warn!("{}", msg);
        self.messages.push(msg.to_string());
    }
}
