//! Range extraction engine: what in/out (or frame) a node stands for.
//!
//! | kind                     | source                          |
//! |--------------------------|---------------------------------|
//! | FrameRange               | `first_frame`, `last_frame`     |
//! | TimeClip, Read           | `first`, `last`                 |
//! | Retime                   | `output.first`, `output.last`   |
//! | StickyNote, BackdropNode | label text via [`LabelParser`]  |
//! | anything else            | no data                         |

use crate::entities::keys::{K_FIRST, K_FIRST_FRAME, K_LAST, K_LAST_FRAME, K_OUTPUT_FIRST, K_OUTPUT_LAST};
use crate::entities::{Extraction, FrameRange, Node, NodeKind};

use super::label::LabelParser;

/// Extract the range a node stands for. Knob values are taken verbatim.
pub fn extract_range<N: Node + ?Sized>(node: &N, parser: &LabelParser) -> Extraction {
    match node.kind() {
        NodeKind::FrameRange => knob_pair(node, K_FIRST_FRAME, K_LAST_FRAME),
        NodeKind::TimeClip | NodeKind::Read => knob_pair(node, K_FIRST, K_LAST),
        NodeKind::Retime => knob_pair(node, K_OUTPUT_FIRST, K_OUTPUT_LAST),
        NodeKind::StickyNote | NodeKind::BackdropNode => match node.label() {
            Some(text) => parser.parse(&text),
            None => Extraction::NoData,
        },
        NodeKind::Other(_) => Extraction::NoData,
    }
}

fn knob_pair<N: Node + ?Sized>(node: &N, first: &str, last: &str) -> Extraction {
    match (node.knob_frame(first), node.knob_frame(last)) {
        (Some(first), Some(last)) => Extraction::Range(FrameRange::new(first, last)),
        _ => Extraction::NoData,
    }
}
