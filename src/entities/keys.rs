//! Knob name constants.
//!
//! Avoid string typos, enable IDE autocomplete.
//! Usage: `node.knob_frame(K_FIRST_FRAME)`

// === Reference frame ===
/// Reference knob names in resolution priority order
pub const REFERENCE_KNOBS: &[&str] = &[
    "reference_frame",
    "referenceFrame",
    "first_frame",
    "ref_frame",
    "fframe",
    "tr_reference_frame",
];

// === FrameRange node ===
pub const K_FIRST_FRAME: &str = "first_frame";
pub const K_LAST_FRAME: &str = "last_frame";

// === TimeClip / Read ===
pub const K_FIRST: &str = "first";
pub const K_LAST: &str = "last";

// === Retime ===
pub const K_OUTPUT_FIRST: &str = "output.first";
pub const K_OUTPUT_LAST: &str = "output.last";

// === Annotations (StickyNote / BackdropNode) ===
/// Free-text label
pub const K_LABEL: &str = "label";
pub const K_NOTE_FONT: &str = "note_font";
pub const K_NOTE_FONT_SIZE: &str = "note_font_size";

// === Viewer ===
/// Viewer in-out, rendered as "first-last"
pub const K_FRAME_RANGE: &str = "frame_range";
/// Viewer in-out lock toggle
pub const K_FRAME_RANGE_LOCK: &str = "frame_range_lock";
