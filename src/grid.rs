//! Dense alignment grid.
//!
//! Nodes form a `down_count × right_count` lattice addressed by
//! `(down, right)`. Every node has at most three outgoing edges: one step
//! down, one step right and one diagonal step. Node payloads live in one flat
//! container and edge weights in another, both laid out row-major with one
//! slot per node; the edge slot of a node is an [`EdgeDataSet`] holding the
//! weights of the (up to) three edges leaving it.
//!
//! The containers are supplied by [`ContainerCreator`]s, so the same graph
//! logic runs on heap or inline storage.

use std::iter::{once, Once};
use std::marker::PhantomData;

use smallvec::SmallVec;

use crate::bidi::{BidiView, Cursor};
use crate::check::{CheckPolicy, Checked};
use crate::edge::Edge;
use crate::error::{GraphError, Result};
use crate::storage::ContainerCreator;
use crate::utils::node_count;

/// `(down, right)` coordinate of a lattice node.
pub type Node = (usize, usize);

/// Edge between two adjacent lattice nodes, `(from, to)`.
pub type GridEdge = (Node, Node);

/// The three moves a grid edge can make.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Step {
    /// `(+1, 0)`: consumes an element of the down sequence only.
    Down,
    /// `(0, +1)`: consumes an element of the right sequence only.
    Right,
    /// `(+1, +1)`: consumes one element of each.
    Diagonal,
}

impl Step {
    pub const ALL: [Step; 3] = [Step::Down, Step::Right, Step::Diagonal];

    #[inline]
    pub fn offset(self) -> (usize, usize) {
        match self {
            Step::Down => (1, 0),
            Step::Right => (0, 1),
            Step::Diagonal => (1, 1),
        }
    }

    /// Step leading from `from` to `to`, if the two nodes are adjacent.
    #[inline]
    pub fn between(from: Node, to: Node) -> Option<Step> {
        match (to.0.checked_sub(from.0), to.1.checked_sub(from.1)) {
            (Some(1), Some(0)) => Some(Step::Down),
            (Some(0), Some(1)) => Some(Step::Right),
            (Some(1), Some(1)) => Some(Step::Diagonal),
            _ => None,
        }
    }

    /// Node reached from `from` inside a `down_cnt × right_cnt` grid.
    #[inline]
    pub fn target(self, from: Node, down_cnt: usize, right_cnt: usize) -> Option<Node> {
        let (dd, dr) = self.offset();
        let to = (from.0 + dd, from.1 + dr);
        (to.0 < down_cnt && to.1 < right_cnt).then_some(to)
    }

    /// Node this step leaves from when it arrives at `to`.
    #[inline]
    pub fn source(self, to: Node) -> Option<Node> {
        let (dd, dr) = self.offset();
        Some((to.0.checked_sub(dd)?, to.1.checked_sub(dr)?))
    }
}

/// Weights of the edges leaving one node.
///
/// Cells for moves that would leave the grid exist but are never exposed.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct EdgeDataSet<W> {
    pub down: W,
    pub right: W,
    pub diagonal: W,
}

impl<W: Copy> EdgeDataSet<W> {
    pub fn splat(weight: W) -> Self {
        Self {
            down: weight,
            right: weight,
            diagonal: weight,
        }
    }
}

impl<W> EdgeDataSet<W> {
    #[inline]
    pub fn get(&self, step: Step) -> &W {
        match step {
            Step::Down => &self.down,
            Step::Right => &self.right,
            Step::Diagonal => &self.diagonal,
        }
    }

    #[inline]
    pub fn get_mut(&mut self, step: Step) -> &mut W {
        match step {
            Step::Down => &mut self.down,
            Step::Right => &mut self.right,
            Step::Diagonal => &mut self.diagonal,
        }
    }
}

/// One neighbor listing entry: the edge, its endpoints and its weight cell.
#[derive(Debug)]
pub struct GridSlot<'a, W> {
    pub edge: GridEdge,
    pub from: Node,
    pub to: Node,
    pub weight: &'a mut W,
}

/// Row-major walk over every node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeCursor {
    index: usize,
    right_cnt: usize,
}

impl Cursor for NodeCursor {
    type Item = Node;

    #[inline]
    fn value(&self) -> Node {
        (self.index / self.right_cnt, self.index % self.right_cnt)
    }

    #[inline]
    fn to_next(&mut self) {
        self.index += 1;
    }

    #[inline]
    fn to_prev(&mut self) {
        self.index -= 1;
    }
}

/// Walk over every grid edge, ordered by from-node then by [`Step::ALL`].
///
/// Positions are `node_index * 3 + step_index`; positions whose step would
/// leave the grid are skipped in both directions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridEdgeCursor {
    slot: usize,
    down_cnt: usize,
    right_cnt: usize,
}

impl GridEdgeCursor {
    fn begin(down_cnt: usize, right_cnt: usize) -> Self {
        let mut cursor = Self {
            slot: 0,
            down_cnt,
            right_cnt,
        };
        while cursor.slot < cursor.total() && !cursor.is_valid() {
            cursor.slot += 1;
        }
        cursor
    }

    fn end(down_cnt: usize, right_cnt: usize) -> Self {
        Self {
            slot: down_cnt * right_cnt * 3,
            down_cnt,
            right_cnt,
        }
    }

    #[inline]
    fn total(&self) -> usize {
        self.down_cnt * self.right_cnt * 3
    }

    #[inline]
    fn decode(&self) -> (Node, Step) {
        let node_index = self.slot / 3;
        let node = (node_index / self.right_cnt, node_index % self.right_cnt);
        (node, Step::ALL[self.slot % 3])
    }

    #[inline]
    fn is_valid(&self) -> bool {
        let (from, step) = self.decode();
        step.target(from, self.down_cnt, self.right_cnt).is_some()
    }
}

impl Cursor for GridEdgeCursor {
    type Item = GridEdge;

    fn value(&self) -> GridEdge {
        let (from, step) = self.decode();
        let (dd, dr) = step.offset();
        (from, (from.0 + dd, from.1 + dr))
    }

    fn to_next(&mut self) {
        self.slot += 1;
        while self.slot < self.total() && !self.is_valid() {
            self.slot += 1;
        }
    }

    fn to_prev(&mut self) {
        self.slot -= 1;
        while !self.is_valid() {
            self.slot -= 1;
        }
    }
}

/// Dense `down_count × right_count` grid graph.
///
/// `NS` and `ES` are the node and edge containers produced by the creators
/// passed to [`GridGraph::new`]; `P` selects whether lookups are validated.
pub struct GridGraph<ND, W, NS, ES, P = Checked> {
    down_node_cnt: usize,
    right_node_cnt: usize,
    nodes: NS,
    edges: ES,
    _marker: PhantomData<(ND, W, P)>,
}

impl<ND, W, NS, ES, P> GridGraph<ND, W, NS, ES, P>
where
    ND: Clone + Default,
    W: Copy,
    NS: AsRef<[ND]> + AsMut<[ND]>,
    ES: AsRef<[EdgeDataSet<W>]> + AsMut<[EdgeDataSet<W>]>,
    P: CheckPolicy,
{
    /// Allocate node and edge storage and set every edge weight to
    /// `default_weight`.
    pub fn new<NC, EC>(
        down_node_cnt: usize,
        right_node_cnt: usize,
        node_creator: &NC,
        edge_creator: &EC,
        default_weight: W,
    ) -> Result<Self>
    where
        NC: ContainerCreator<ND, Container = NS>,
        EC: ContainerCreator<EdgeDataSet<W>, Container = ES>,
    {
        P::ensure(
            || down_node_cnt > 0 && right_node_cnt > 0,
            || GraphError::SizeMismatch {
                expected: 1,
                actual: down_node_cnt.min(right_node_cnt),
            },
        )?;
        // Edge cursors address `node_index * 3 + step` positions.
        node_count(down_node_cnt, right_node_cnt)
            .and_then(|cells| cells.checked_mul(Step::ALL.len()))
            .ok_or(GraphError::SizeMismatch {
                expected: usize::MAX / Step::ALL.len() / right_node_cnt.max(1),
                actual: down_node_cnt,
            })?;
        let nodes = node_creator.create_filled(down_node_cnt, right_node_cnt, ND::default())?;
        let edges = edge_creator.create_filled(
            down_node_cnt,
            right_node_cnt,
            EdgeDataSet::splat(default_weight),
        )?;
        Ok(Self {
            down_node_cnt,
            right_node_cnt,
            nodes,
            edges,
            _marker: PhantomData,
        })
    }

    #[inline]
    pub fn down_node_count(&self) -> usize {
        self.down_node_cnt
    }

    #[inline]
    pub fn right_node_count(&self) -> usize {
        self.right_node_cnt
    }

    #[inline]
    fn index(&self, node: Node) -> usize {
        node.0 * self.right_node_cnt + node.1
    }

    #[inline]
    pub fn has_node(&self, node: Node) -> bool {
        node.0 < self.down_node_cnt && node.1 < self.right_node_cnt
    }

    #[inline]
    pub fn has_edge(&self, edge: GridEdge) -> bool {
        let (from, to) = edge;
        self.has_node(from) && self.has_node(to) && Step::between(from, to).is_some()
    }

    fn ensure_node(&self, node: Node) -> Result<()> {
        P::ensure(|| self.has_node(node), || GraphError::NodeNotFound(node))
    }

    /// Validate `edge` (under `P`) and resolve the weight cell it lives in.
    fn locate(&self, edge: GridEdge) -> Result<(usize, Step)> {
        P::ensure(
            || self.has_edge(edge),
            || GraphError::EdgeNotFound(Edge::Normal(edge)),
        )?;
        let step = Step::between(edge.0, edge.1)
            .ok_or(GraphError::EdgeNotFound(Edge::Normal(edge)))?;
        Ok((self.index(edge.0), step))
    }

    pub fn node_data(&self, node: Node) -> Result<&ND> {
        self.ensure_node(node)?;
        Ok(&self.nodes.as_ref()[self.index(node)])
    }

    pub fn node_data_mut(&mut self, node: Node) -> Result<&mut ND> {
        self.ensure_node(node)?;
        let idx = self.index(node);
        Ok(&mut self.nodes.as_mut()[idx])
    }

    pub fn update_node_data(&mut self, node: Node, data: ND) -> Result<()> {
        *self.node_data_mut(node)? = data;
        Ok(())
    }

    pub fn edge_data(&self, edge: GridEdge) -> Result<&W> {
        let (idx, step) = self.locate(edge)?;
        Ok(self.edges.as_ref()[idx].get(step))
    }

    pub fn edge_data_mut(&mut self, edge: GridEdge) -> Result<&mut W> {
        let (idx, step) = self.locate(edge)?;
        Ok(self.edges.as_mut()[idx].get_mut(step))
    }

    pub fn update_edge_data(&mut self, edge: GridEdge, weight: W) -> Result<()> {
        *self.edge_data_mut(edge)? = weight;
        Ok(())
    }

    /// Endpoints and weight of `edge`.
    pub fn edge(&self, edge: GridEdge) -> Result<(Node, Node, &W)> {
        let weight = self.edge_data(edge)?;
        Ok((edge.0, edge.1, weight))
    }

    pub fn nodes(&self) -> BidiView<NodeCursor> {
        let right_cnt = self.right_node_cnt;
        BidiView::new(
            NodeCursor {
                index: 0,
                right_cnt,
            },
            NodeCursor {
                index: self.down_node_cnt * right_cnt,
                right_cnt,
            },
        )
    }

    pub fn edges(&self) -> BidiView<GridEdgeCursor> {
        BidiView::new(
            GridEdgeCursor::begin(self.down_node_cnt, self.right_node_cnt),
            GridEdgeCursor::end(self.down_node_cnt, self.right_node_cnt),
        )
    }

    #[inline]
    pub fn root_node(&self) -> Node {
        (0, 0)
    }

    pub fn root_nodes(&self) -> Once<Node> {
        once(self.root_node())
    }

    #[inline]
    pub fn leaf_node(&self) -> Node {
        (self.down_node_cnt - 1, self.right_node_cnt - 1)
    }

    pub fn leaf_nodes(&self) -> Once<Node> {
        once(self.leaf_node())
    }

    pub fn outputs(&self, node: Node) -> Result<SmallVec<[GridEdge; 3]>> {
        self.ensure_node(node)?;
        Ok(Step::ALL
            .iter()
            .filter_map(|step| step.target(node, self.down_node_cnt, self.right_node_cnt))
            .map(|to| (node, to))
            .collect())
    }

    pub fn inputs(&self, node: Node) -> Result<SmallVec<[GridEdge; 3]>> {
        self.ensure_node(node)?;
        Ok(Step::ALL
            .iter()
            .filter_map(|step| step.source(node))
            .map(|from| (from, node))
            .collect())
    }

    /// Up to three outgoing edges with mutable access to their weights.
    pub fn outputs_full(&mut self, node: Node) -> Result<SmallVec<[GridSlot<'_, W>; 3]>> {
        self.ensure_node(node)?;
        let (down_cnt, right_cnt) = (self.down_node_cnt, self.right_node_cnt);
        let idx = self.index(node);
        let EdgeDataSet {
            down,
            right,
            diagonal,
        } = &mut self.edges.as_mut()[idx];

        let mut out = SmallVec::new();
        for (step, weight) in [
            (Step::Down, down),
            (Step::Right, right),
            (Step::Diagonal, diagonal),
        ] {
            if let Some(to) = step.target(node, down_cnt, right_cnt) {
                out.push(GridSlot {
                    edge: (node, to),
                    from: node,
                    to,
                    weight,
                });
            }
        }
        Ok(out)
    }

    /// Up to three incoming edges with mutable access to their weights.
    ///
    /// The cells belong to three different neighbors, so they are split out
    /// of the edge storage in ascending index order.
    pub fn inputs_full(&mut self, node: Node) -> Result<SmallVec<[GridSlot<'_, W>; 3]>> {
        self.ensure_node(node)?;
        let mut wanted: SmallVec<[(usize, Node, Step); 3]> = SmallVec::new();
        for step in [Step::Diagonal, Step::Down, Step::Right] {
            if let Some(from) = step.source(node) {
                wanted.push((self.index(from), from, step));
            }
        }

        let mut rest: &mut [EdgeDataSet<W>] = self.edges.as_mut();
        let mut consumed = 0;
        let mut out = SmallVec::new();
        for (idx, from, step) in wanted {
            let tail = std::mem::take(&mut rest);
            let (_, tail) = tail.split_at_mut(idx - consumed);
            let Some((cell, tail)) = tail.split_first_mut() else {
                break;
            };
            rest = tail;
            consumed = idx + 1;
            out.push(GridSlot {
                edge: (from, node),
                from,
                to: node,
                weight: cell.get_mut(step),
            });
        }
        Ok(out)
    }

    /// Raw row-major edge cells, one [`EdgeDataSet`] per node.
    pub(crate) fn edge_cells_mut(&mut self) -> &mut [EdgeDataSet<W>] {
        self.edges.as_mut()
    }
}
