//! Edge and node payload model of the fitting alignment graph.

use num_traits::Zero;

use crate::grid::{GridEdge, Node};

/// An edge of the fitting alignment graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Edge {
    /// Zero-cost shortcut skipping a prefix or suffix of the down sequence.
    FreeRide { from: Node, to: Node },
    /// Ordinary down / right / diagonal grid edge.
    Normal(GridEdge),
}

impl Edge {
    #[inline]
    pub fn from_node(&self) -> Node {
        match *self {
            Edge::FreeRide { from, .. } => from,
            Edge::Normal((from, _)) => from,
        }
    }

    #[inline]
    pub fn to_node(&self) -> Node {
        match *self {
            Edge::FreeRide { to, .. } => to,
            Edge::Normal((_, to)) => to,
        }
    }

    #[inline]
    pub fn is_free_ride(&self) -> bool {
        matches!(self, Edge::FreeRide { .. })
    }
}

/// The two places a free ride may appear.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FreeRideKind {
    /// Source `(0, 0)` to `(d, 0)` with `1 <= d < down_cnt`.
    Entry,
    /// `(d, right_cnt - 1)` with `d < down_cnt - 1` to the sink.
    Exit,
}

impl FreeRideKind {
    /// Classify a free-ride coordinate pair in a `down_cnt × right_cnt` graph.
    ///
    /// This is the only place the free-ride shape rules live; `None` means the
    /// pair is not a free ride of this graph.
    pub fn classify(from: Node, to: Node, down_cnt: usize, right_cnt: usize) -> Option<Self> {
        if down_cnt == 0 || right_cnt == 0 {
            return None;
        }
        let source = (0, 0);
        let sink = (down_cnt - 1, right_cnt - 1);
        if from == source && to != source && to.0 < down_cnt && to.1 == 0 {
            Some(FreeRideKind::Entry)
        } else if to == sink && from != sink && from.0 < down_cnt && from.1 == right_cnt - 1 {
            Some(FreeRideKind::Exit)
        } else {
            None
        }
    }
}

/// Per-node payload filled in by a backtracker.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodeData<W> {
    pub backtracking_edge: Option<Edge>,
    pub backtracking_weight: W,
}

impl<W: Zero> Default for NodeData<W> {
    fn default() -> Self {
        Self {
            backtracking_edge: None,
            backtracking_weight: W::zero(),
        }
    }
}
