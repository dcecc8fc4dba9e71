//! FrameRange - inclusive in/out pair and the result of range extraction.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Inclusive `(first, last)` frame pair.
///
/// `first <= last` is expected but not enforced: values read from nodes or
/// labels are kept verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FrameRange {
    pub first: i32,
    pub last: i32,
}

impl FrameRange {
    pub fn new(first: i32, last: i32) -> Self {
        Self { first, last }
    }

    /// Symmetric handle padding: `first - handle`, `last + handle`.
    pub fn padded(self, handle: i32) -> Self {
        Self {
            first: self.first.saturating_sub(handle),
            last: self.last.saturating_add(handle),
        }
    }
}

impl fmt::Display for FrameRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.first, self.last)
    }
}

/// Parse failure for a rendered range ("1001-1100")
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid frame range: {0:?}")]
pub struct ParseRangeError(pub String);

impl FromStr for FrameRange {
    type Err = ParseRangeError;

    /// Accepts `first-last` with optional whitespace; a leading `-` on
    /// either side is a sign.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseRangeError(s.to_string());
        let text = s.trim();
        let split = text
            .char_indices()
            .skip(1)
            .find(|&(i, c)| c == '-' && !text[..i].trim_end().ends_with('-'))
            .map(|(i, _)| i)
            .ok_or_else(err)?;
        let first = text[..split].trim().parse().map_err(|_| err())?;
        let last = text[split + 1..].trim().parse().map_err(|_| err())?;
        Ok(Self { first, last })
    }
}

/// What a node says about where to go.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Extraction {
    /// Lock the viewer to this in/out and jump to its first frame
    Range(FrameRange),
    /// Jump to this frame and drop any custom in/out
    SingleFrame(i32),
    /// Nothing usable
    NoData,
}
