//! FrameHandling - reference frames and viewer in/out for compositing scripts.
//!
//! Re-exports all modules for use by the binary and the host extension.

// Core engine (resolver, label parser, extraction, viewer sync, commands)
pub mod core;

// App modules
pub mod cli;
pub mod config;
pub mod entities;
pub mod error;
pub mod paths;

// Re-export commonly used types from core
pub use crate::core::commands::{Command, FrameHandler, GoToOutcome, SetOutcome, ValueSource};
pub use crate::core::label::LabelParser;
pub use crate::core::resolver::ReferenceResolver;

// Re-export entities
pub use config::{AnnotationStyle, Settings};
pub use entities::{Extraction, FrameRange, Host, Node, NodeKind, Script, Viewer};
pub use error::{Error, Result};
