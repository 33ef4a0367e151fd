//! Fitting (semi-global) alignment graph.
//!
//! The graph is an alignment grid plus free-ride edges at its two ends:
//! - *entry* rides from the source `(0, 0)` straight down the first column to
//!   every `(d, 0)`, skipping a prefix of the down sequence;
//! - *exit* rides from every `(d, right_cnt - 1)` on the last column straight
//!   to the sink, skipping a suffix of the down sequence.
//!
//! The right sequence therefore has to be consumed completely, while any
//! prefix and suffix of the down sequence can be left unaligned at no cost.
//!
//! Grid edges each own a weight cell in the underlying [`GridGraph`]. All free
//! rides share one weight: writing it through any free ride changes it for
//! every other one.

use std::iter::{Chain, Map, Once};

use num_traits::Zero;
use smallvec::SmallVec;

use crate::bidi::{BidiIter, BidiView, Cursor};
use crate::check::{CheckPolicy, Checked};
use crate::edge::{Edge, FreeRideKind, NodeData};
use crate::error::{GraphError, Result};
use crate::grid::{EdgeDataSet, GridEdge, GridEdgeCursor, GridGraph, Node, NodeCursor};
use crate::storage::ContainerCreator;
use crate::utils::fitting_edge_count;

/// Lazy walk over every edge: grid edges, then entry rides, then exit rides.
pub type EdgeIter = Chain<
    Map<BidiIter<GridEdgeCursor>, fn(GridEdge) -> Edge>,
    Chain<BidiIter<FreeRideCursor>, BidiIter<FreeRideCursor>>,
>;

/// One neighbor listing entry of a [`FittingGraph`].
#[derive(Debug)]
pub struct EdgeSlot<'a, W> {
    pub edge: Edge,
    pub from: Node,
    pub to: Node,
    pub weight: &'a mut W,
}

/// Walk over the entry or exit free rides, indexed by the down coordinate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FreeRideCursor {
    kind: FreeRideKind,
    down: usize,
    down_cnt: usize,
    right_cnt: usize,
}

impl Cursor for FreeRideCursor {
    type Item = Edge;

    fn value(&self) -> Edge {
        match self.kind {
            FreeRideKind::Entry => Edge::FreeRide {
                from: (0, 0),
                to: (self.down, 0),
            },
            FreeRideKind::Exit => Edge::FreeRide {
                from: (self.down, self.right_cnt - 1),
                to: (self.down_cnt - 1, self.right_cnt - 1),
            },
        }
    }

    fn to_next(&mut self) {
        self.down += 1;
    }

    fn to_prev(&mut self) {
        self.down -= 1;
    }
}

/// Alignment grid with free-ride shortcuts from the source and to the sink.
pub struct FittingGraph<W, NS, ES, P = Checked> {
    grid: GridGraph<NodeData<W>, W, NS, ES, P>,
    free_ride_weight: W,
    edge_cnt: usize,
}

impl<W, NS, ES, P> FittingGraph<W, NS, ES, P>
where
    W: Copy + Zero,
    NS: AsRef<[NodeData<W>]> + AsMut<[NodeData<W>]>,
    ES: AsRef<[EdgeDataSet<W>]> + AsMut<[EdgeDataSet<W>]>,
    P: CheckPolicy,
{
    /// Build a `down_node_cnt × right_node_cnt` graph whose grid edges start
    /// at `indel_weight` and whose free rides start at `free_ride_weight`.
    pub fn new<NC, EC>(
        down_node_cnt: usize,
        right_node_cnt: usize,
        node_creator: &NC,
        edge_creator: &EC,
        indel_weight: W,
        free_ride_weight: W,
    ) -> Result<Self>
    where
        NC: ContainerCreator<NodeData<W>, Container = NS>,
        EC: ContainerCreator<EdgeDataSet<W>, Container = ES>,
    {
        #[cfg(feature = "tracing")]
        let span = tracing::trace_span!(
            "fitting_graph_new",
            down = down_node_cnt,
            right = right_node_cnt,
            checked = P::ENABLED
        );
        #[cfg(feature = "tracing")]
        let _enter = span.enter();

        let grid = GridGraph::new(
            down_node_cnt,
            right_node_cnt,
            node_creator,
            edge_creator,
            indel_weight,
        )?;
        let edge_cnt = fitting_edge_count(down_node_cnt, right_node_cnt).ok_or(
            GraphError::SizeMismatch {
                expected: usize::MAX,
                actual: down_node_cnt,
            },
        )?;
        Ok(Self {
            grid,
            free_ride_weight,
            edge_cnt,
        })
    }

    #[inline]
    pub fn down_node_count(&self) -> usize {
        self.grid.down_node_count()
    }

    #[inline]
    pub fn right_node_count(&self) -> usize {
        self.grid.right_node_count()
    }

    #[inline]
    pub fn source(&self) -> Node {
        self.grid.root_node()
    }

    #[inline]
    pub fn sink(&self) -> Node {
        self.grid.leaf_node()
    }

    /// Current value of the weight shared by all free rides.
    #[inline]
    pub fn free_ride_weight(&self) -> W {
        self.free_ride_weight
    }

    pub fn root_node(&self) -> Node {
        self.grid.root_node()
    }

    pub fn root_nodes(&self) -> Once<Node> {
        self.grid.root_nodes()
    }

    pub fn leaf_nodes(&self) -> Once<Node> {
        self.grid.leaf_nodes()
    }

    pub fn nodes(&self) -> BidiView<NodeCursor> {
        self.grid.nodes()
    }

    fn free_rides(&self, kind: FreeRideKind) -> BidiView<FreeRideCursor> {
        let down_cnt = self.down_node_count();
        let right_cnt = self.right_node_count();
        let (first, last) = match kind {
            FreeRideKind::Entry => (1, down_cnt.max(1)),
            FreeRideKind::Exit => (0, down_cnt.saturating_sub(1)),
        };
        let at = |down| FreeRideCursor {
            kind,
            down,
            down_cnt,
            right_cnt,
        };
        BidiView::new(at(first), at(last))
    }

    /// Number of edges [`edges`](Self::edges) yields.
    pub fn edge_count(&self) -> usize {
        self.edge_cnt
    }

    /// Every edge of the graph, produced lazily and walkable from both ends.
    pub fn edges(&self) -> EdgeIter {
        let normal: fn(GridEdge) -> Edge = Edge::Normal;
        self.grid.edges().into_iter().map(normal).chain(
            self.free_rides(FreeRideKind::Entry)
                .into_iter()
                .chain(self.free_rides(FreeRideKind::Exit)),
        )
    }

    #[inline]
    pub fn has_node(&self, node: Node) -> bool {
        self.grid.has_node(node)
    }

    /// Whether `edge` belongs to the graph. Malformed free rides are simply
    /// absent.
    pub fn has_edge(&self, edge: Edge) -> bool {
        match edge {
            Edge::Normal(inner) => self.grid.has_edge(inner),
            Edge::FreeRide { from, to } => {
                FreeRideKind::classify(from, to, self.down_node_count(), self.right_node_count())
                    .is_some()
            }
        }
    }

    fn ensure_edge(&self, edge: Edge) -> Result<()> {
        P::ensure(|| self.has_edge(edge), || GraphError::EdgeNotFound(edge))
    }

    fn ensure_node(&self, node: Node) -> Result<()> {
        P::ensure(|| self.has_node(node), || GraphError::NodeNotFound(node))
    }

    pub fn node_data(&self, node: Node) -> Result<&NodeData<W>> {
        self.grid.node_data(node)
    }

    pub fn node_data_mut(&mut self, node: Node) -> Result<&mut NodeData<W>> {
        self.grid.node_data_mut(node)
    }

    pub fn update_node_data(&mut self, node: Node, data: NodeData<W>) -> Result<()> {
        self.grid.update_node_data(node, data)
    }

    pub fn edge_data(&self, edge: Edge) -> Result<&W> {
        self.ensure_edge(edge)?;
        match edge {
            Edge::FreeRide { .. } => Ok(&self.free_ride_weight),
            Edge::Normal(inner) => self.grid.edge_data(inner),
        }
    }

    pub fn edge_data_mut(&mut self, edge: Edge) -> Result<&mut W> {
        self.ensure_edge(edge)?;
        match edge {
            Edge::FreeRide { .. } => Ok(&mut self.free_ride_weight),
            Edge::Normal(inner) => self.grid.edge_data_mut(inner),
        }
    }

    /// Set the weight of `edge`. For a free ride this sets the weight of
    /// every free ride.
    pub fn update_edge_data(&mut self, edge: Edge, weight: W) -> Result<()> {
        *self.edge_data_mut(edge)? = weight;
        Ok(())
    }

    /// Endpoints and weight of `edge`.
    pub fn edge(&self, edge: Edge) -> Result<(Node, Node, &W)> {
        let weight = self.edge_data(edge)?;
        Ok((edge.from_node(), edge.to_node(), weight))
    }

    pub fn edge_from(&self, edge: Edge) -> Result<Node> {
        self.ensure_edge(edge)?;
        Ok(edge.from_node())
    }

    pub fn edge_to(&self, edge: Edge) -> Result<Node> {
        self.ensure_edge(edge)?;
        Ok(edge.to_node())
    }

    /// Outgoing edges of `node` with their weight cells: the grid neighbors,
    /// plus a free ride to the sink unless `node` is the sink.
    pub fn outputs_full(&mut self, node: Node) -> Result<SmallVec<[EdgeSlot<'_, W>; 4]>> {
        let sink = self.sink();
        let mut out: SmallVec<[EdgeSlot<'_, W>; 4]> = self
            .grid
            .outputs_full(node)?
            .into_iter()
            .map(|slot| EdgeSlot {
                edge: Edge::Normal(slot.edge),
                from: slot.from,
                to: slot.to,
                weight: slot.weight,
            })
            .collect();
        if node != sink {
            out.push(EdgeSlot {
                edge: Edge::FreeRide {
                    from: node,
                    to: sink,
                },
                from: node,
                to: sink,
                weight: &mut self.free_ride_weight,
            });
        }
        Ok(out)
    }

    /// Incoming edges of `node` with their weight cells: the grid neighbors,
    /// plus a free ride from the source unless `node` is the source.
    pub fn inputs_full(&mut self, node: Node) -> Result<SmallVec<[EdgeSlot<'_, W>; 4]>> {
        let source = self.source();
        let mut out: SmallVec<[EdgeSlot<'_, W>; 4]> = self
            .grid
            .inputs_full(node)?
            .into_iter()
            .map(|slot| EdgeSlot {
                edge: Edge::Normal(slot.edge),
                from: slot.from,
                to: slot.to,
                weight: slot.weight,
            })
            .collect();
        if node != source {
            out.push(EdgeSlot {
                edge: Edge::FreeRide {
                    from: source,
                    to: node,
                },
                from: source,
                to: node,
                weight: &mut self.free_ride_weight,
            });
        }
        Ok(out)
    }

    /// Same edges as [`outputs_full`](Self::outputs_full), without weights.
    pub fn outputs(&self, node: Node) -> Result<SmallVec<[Edge; 4]>> {
        let sink = self.sink();
        let mut out: SmallVec<[Edge; 4]> = self
            .grid
            .outputs(node)?
            .into_iter()
            .map(Edge::Normal)
            .collect();
        if node != sink {
            out.push(Edge::FreeRide {
                from: node,
                to: sink,
            });
        }
        Ok(out)
    }

    /// Same edges as [`inputs_full`](Self::inputs_full), without weights.
    pub fn inputs(&self, node: Node) -> Result<SmallVec<[Edge; 4]>> {
        let source = self.source();
        let mut out: SmallVec<[Edge; 4]> = self
            .grid
            .inputs(node)?
            .into_iter()
            .map(Edge::Normal)
            .collect();
        if node != source {
            out.push(Edge::FreeRide {
                from: source,
                to: node,
            });
        }
        Ok(out)
    }

    /// The single outgoing edge of `node`.
    pub fn output(&self, node: Node) -> Result<Edge> {
        exactly_one(node, self.outputs(node)?)
    }

    /// The single incoming edge of `node`.
    pub fn input(&self, node: Node) -> Result<Edge> {
        exactly_one(node, self.inputs(node)?)
    }

    pub fn output_full(&mut self, node: Node) -> Result<EdgeSlot<'_, W>> {
        exactly_one(node, self.outputs_full(node)?)
    }

    pub fn input_full(&mut self, node: Node) -> Result<EdgeSlot<'_, W>> {
        exactly_one(node, self.inputs_full(node)?)
    }

    pub fn out_degree(&self, node: Node) -> Result<usize> {
        self.ensure_node(node)?;
        Ok(self.outputs(node)?.len())
    }

    pub fn in_degree(&self, node: Node) -> Result<usize> {
        self.ensure_node(node)?;
        Ok(self.inputs(node)?.len())
    }

    pub fn has_outputs(&self, node: Node) -> Result<bool> {
        Ok(self.out_degree(node)? > 0)
    }

    pub fn has_inputs(&self, node: Node) -> Result<bool> {
        Ok(self.in_degree(node)? > 0)
    }

    /// Grid and shared free-ride cell, borrowed separately.
    pub(crate) fn parts_mut(&mut self) -> (&mut GridGraph<NodeData<W>, W, NS, ES, P>, &mut W) {
        (&mut self.grid, &mut self.free_ride_weight)
    }
}

fn exactly_one<T>(node: Node, items: SmallVec<[T; 4]>) -> Result<T> {
    let count = items.len();
    let mut it = items.into_iter();
    match (it.next(), it.next()) {
        (Some(only), None) => Ok(only),
        _ => Err(GraphError::CardinalityViolation { node, count }),
    }
}
