//! Viewer trait - the in/out lock and playhead of a host viewer.

use serde::{Deserialize, Serialize};

use crate::error::Result;

use super::frame_range::FrameRange;

/// Host viewer surface touched by the synchronizer.
pub trait Viewer {
    fn frame_range(&self) -> FrameRange;
    fn set_frame_range(&mut self, range: FrameRange) -> Result<()>;

    fn range_locked(&self) -> bool;
    fn set_range_lock(&mut self, locked: bool) -> Result<()>;

    /// Playhead position
    fn current_frame(&self) -> i32;
    fn set_current_frame(&mut self, frame: i32) -> Result<()>;
}

/// In-memory viewer state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewerState {
    pub frame_range: FrameRange,
    #[serde(default)]
    pub frame_range_lock: bool,
    pub current_frame: i32,
}

impl ViewerState {
    /// Unlocked viewer showing `range`, playhead on its first frame
    pub fn new(range: FrameRange) -> Self {
        Self {
            frame_range: range,
            frame_range_lock: false,
            current_frame: range.first,
        }
    }
}

impl Viewer for ViewerState {
    fn frame_range(&self) -> FrameRange {
        self.frame_range
    }

    fn set_frame_range(&mut self, range: FrameRange) -> Result<()> {
        self.frame_range = range;
        Ok(())
    }

    fn range_locked(&self) -> bool {
        self.frame_range_lock
    }

    fn set_range_lock(&mut self, locked: bool) -> Result<()> {
        self.frame_range_lock = locked;
        Ok(())
    }

    fn current_frame(&self) -> i32 {
        self.current_frame
    }

    fn set_current_frame(&mut self, frame: i32) -> Result<()> {
        self.current_frame = frame;
        Ok(())
    }
}
