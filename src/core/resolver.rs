//! Reference knob resolution.
//!
//! A node's reference frame lives in the first knob of the priority list it
//! exposes. The list is consulted in order against `Node::has_knob`, so a node
//! carrying several candidates always resolves to the same one.

use log::info;

use crate::entities::{AttrValue, Node};
use crate::error::Result;

#[derive(Debug, Clone)]
pub struct ReferenceResolver {
    knobs: Vec<String>,
}

impl ReferenceResolver {
    /// `knobs` in priority order, highest first
    pub fn new<S: Into<String>>(knobs: impl IntoIterator<Item = S>) -> Self {
        Self {
            knobs: knobs.into_iter().map(Into::into).collect(),
        }
    }

    pub fn knobs(&self) -> &[String] {
        &self.knobs
    }

    /// Highest-priority reference knob present on `node`
    pub fn find_knob<N: Node + ?Sized>(&self, node: &N) -> Option<&str> {
        self.knobs
            .iter()
            .map(String::as_str)
            .find(|name| node.has_knob(name))
    }

    /// Write `value` into the node's reference knob.
    /// Returns the knob written, None when the node has none.
    pub fn write_node<N: Node + ?Sized>(&self, node: &mut N, value: i32) -> Result<Option<String>> {
        let Some(knob) = self.find_knob(node).map(str::to_string) else {
            return Ok(None);
        };
        node.set_knob(&knob, AttrValue::Int(value))?;
        info!("\t :> {}.{} got the value: {}", node.name(), knob, value);
        Ok(Some(knob))
    }

    /// Write `value` into every node that has a reference knob.
    /// Nodes without one are skipped. Returns the number of nodes updated.
    pub fn write_reference<'a, N, I>(&self, nodes: I, value: i32) -> Result<usize>
    where
        N: Node + ?Sized + 'a,
        I: IntoIterator<Item = &'a mut N>,
    {
        let mut count = 0;
        for node in nodes {
            if self.write_node(node, value)?.is_some() {
                count += 1;
            }
        }
        Ok(count)
    }

    /// Current reference frame, None when the node has no reference knob
    /// or it holds no number.
    pub fn read_reference<N: Node + ?Sized>(&self, node: &N) -> Option<i32> {
        self.find_knob(node).and_then(|knob| node.knob_frame(knob))
    }
}

impl Default for ReferenceResolver {
    fn default() -> Self {
        Self::new(crate::entities::keys::REFERENCE_KNOBS.iter().copied())
    }
}
