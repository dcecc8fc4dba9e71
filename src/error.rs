use std::io;

/// Errors raised by frame-handling operations.
///
/// Every variant is terminal for the current command: the caller turns it
/// into a host notification and the host state is left as it was.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Select something!")]
    NoSelection,

    #[error("Select only one node ({0} selected)")]
    AmbiguousSelection(usize),

    #[error("You must write an integer value! (e.g., 1055)\n{0}")]
    InvalidInput(String),

    #[error("{0} has no reference frame knob")]
    NoReferenceKnob(String),

    #[error("{0} does not provide any useful range or frame")]
    NoFrameData(String),

    #[error("no active viewer")]
    NoActiveViewer,

    #[error("unknown node: {0}")]
    UnknownNode(String),

    #[error("host error: {0}")]
    Host(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub fn host(msg: impl Into<String>) -> Self {
        Self::Host(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Errors the host shows as a blocking dialog rather than a warning.
    pub fn is_blocking(&self) -> bool {
        matches!(self, Error::InvalidInput(_))
    }
}

/// Result type alias for frame-handling operations
pub type Result<T> = std::result::Result<T, Error>;
