//! Viewer range synchronizer.
//!
//! The only way the in/out lock gets switched on is [`apply_range`].
//! A single frame means "go there" and drops any custom in/out.

use log::info;

use crate::entities::{FrameRange, Viewer};
use crate::error::Result;

/// Lock the viewer to `range` and put the playhead on its first frame.
pub fn apply_range<V: Viewer + ?Sized>(viewer: &mut V, range: FrameRange) -> Result<()> {
    viewer.set_range_lock(true)?;
    viewer.set_frame_range(range)?;
    viewer.set_current_frame(range.first)?;
    info!("Viewer in-out set to {}", range);
    Ok(())
}

/// Jump to `frame` and unlock the in/out.
pub fn apply_single_frame<V: Viewer + ?Sized>(viewer: &mut V, frame: i32) -> Result<()> {
    viewer.set_current_frame(frame)?;
    viewer.set_range_lock(false)?;
    info!("Viewer moved to frame {}, in-out cleared", frame);
    Ok(())
}

/// Unlock the in/out; range and playhead stay where they are.
pub fn clear_lock<V: Viewer + ?Sized>(viewer: &mut V) -> Result<()> {
    viewer.set_range_lock(false)
}

/// Unlock and put the range back to the script's root range.
pub fn reset_range<V: Viewer + ?Sized>(viewer: &mut V, root: FrameRange) -> Result<()> {
    clear_lock(viewer)?;
    viewer.set_frame_range(root)?;
    info!("Viewer in-out reset to {}", root);
    Ok(())
}

/// Whether the viewer shows something other than the root range.
/// Compared on the rendered `first-last` text, lock state is ignored.
pub fn is_custom_range<V: Viewer + ?Sized>(viewer: &V, root: FrameRange) -> bool {
    viewer.frame_range().to_string() != root.to_string()
}
