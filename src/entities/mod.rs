//! Entities module - data model and host-facing traits.
//!
//! - `Node`, `Viewer`, `Host`: what the tool needs from the compositing application
//! - `Script`: in-memory host snapshot (offline runs, tests)
//! - `FrameRange`, `Extraction`: values the core computes

pub mod attrs;
pub mod frame_range;
pub mod keys;
pub mod node;
pub mod node_kind;
pub mod script;
pub mod traits;
pub mod viewer;

pub use attrs::{AttrValue, Attrs};
pub use frame_range::{Extraction, FrameRange, ParseRangeError};
pub use node::{Node, ScriptNode};
pub use node_kind::NodeKind;
pub use script::Script;
pub use traits::Host;
pub use viewer::{Viewer, ViewerState};
