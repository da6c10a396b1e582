//! Per-compilation bookkeeping.

use crate::core::State;
use std::collections::BTreeMap;

/// Frame counter and node registry of one compilation.
///
/// A fresh context is created for every top-level compilation and passed
/// by reference through each nested graph, so two compilations of the same
/// definition hand out the same ids.
#[derive(Clone, Debug, Default)]
pub struct Context<'d> {
    frames: usize,
    states: BTreeMap<String, &'d State>,
}

impl<'d> Context<'d> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a new frame with the next unused id.
    pub fn next_frame(&mut self) -> Frame {
        let frame = Frame {
            id: format!("s{}", self.frames),
        };
        self.frames += 1;
        frame
    }

    /// Remember which state a node id stands for.
    pub fn register(&mut self, id: String, state: &'d State) {
        self.states.insert(id, state);
    }

    /// The state drawn as node `id`.
    pub fn state(&self, id: &str) -> Option<&'d State> {
        self.states.get(id).copied()
    }

    /// Every registered node id with its state, ordered by id.
    pub fn states(&self) -> impl Iterator<Item = (&str, &'d State)> {
        self.states.iter().map(|(id, state)| (id.as_str(), *state))
    }

    /// Number of frames opened so far.
    pub fn frames(&self) -> usize {
        self.frames
    }
}

/// Namespace for the node ids of one graph.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frame {
    id: String,
}

impl Frame {
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Node id of state `name` inside this frame.
    ///
    /// Characters outside `[A-Za-z0-9-]`, `_` included, are written as
    /// `_x<hex>_`, so any state name yields a valid identifier and distinct
    /// names yield distinct ids.
    pub fn node_id(&self, name: &str) -> String {
        let mut id = String::with_capacity(self.id.len() + 1 + name.len());
        id.push_str(&self.id);
        id.push('-');
        for c in name.chars() {
            if c.is_ascii_alphanumeric() || c == '-' {
                id.push(c);
            } else {
                id.push_str(&format!("_x{:x}_", c as u32));
            }
        }
        id
    }
}
