//! Abstract host interface for dependency inversion.
//!
//! `core` drives everything through [`Host`]; implementations live next to
//! the state they wrap (`entities::script::Script` in memory, the Python
//! extension for a live session).

use crate::config::AnnotationStyle;
use crate::error::Result;

use super::frame_range::FrameRange;
use super::node::Node;
use super::viewer::Viewer;

/// Everything the tool reads from or writes to the host application.
///
/// Calls happen on the host's thread, one command at a time.
pub trait Host {
    /// Names of the selected nodes, in host order
    fn selected_nodes(&self) -> Vec<String>;

    /// Read access to a node by name. None if no such node.
    fn with_node<R>(&self, name: &str, f: impl FnOnce(&dyn Node) -> R) -> Option<R>;

    /// Write access to a node by name. None if no such node.
    fn with_node_mut<R>(&mut self, name: &str, f: impl FnOnce(&mut dyn Node) -> R) -> Option<R>;

    fn has_active_viewer(&self) -> bool;

    /// Access to the active viewer. None if there is none.
    fn with_active_viewer<R>(&mut self, f: impl FnOnce(&mut dyn Viewer) -> R) -> Option<R>;

    /// Script-wide default range (root first/last frame)
    fn root_range(&self) -> Result<FrameRange>;

    /// Global playhead
    fn current_frame(&self) -> i32;

    /// Modal text prompt. None means the user cancelled.
    fn ask_input(&mut self, prompt: &str, default: &str) -> Option<String>;

    /// Create an annotation node with `label`, return its name
    fn create_annotation(&mut self, label: &str, style: &AnnotationStyle) -> Result<String>;

    /// Non-blocking warning
    fn warning(&mut self, msg: &str);

    /// Blocking message dialog
    fn message(&mut self, msg: &str);
}
