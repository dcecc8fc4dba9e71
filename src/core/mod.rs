//! Core engine - reference resolution, range extraction, viewer sync, commands.
//!
//! Host-agnostic: everything goes through `entities::Host`.

pub mod commands;
pub mod extract;
pub mod label;
pub mod resolver;
pub mod viewer_sync;

// Re-exports for convenience
pub use commands::{Command, FrameHandler, GoToOutcome, SetOutcome, ValueSource};
pub use extract::extract_range;
pub use label::LabelParser;
pub use resolver::ReferenceResolver;
