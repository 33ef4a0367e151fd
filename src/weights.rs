//! Bulk weight assignment from two sequences and a scorer.
//!
//! Row `i` of the graph sits before element `v[i]` of the down sequence and
//! column `j` before element `w[j]` of the right sequence, so a graph for
//! sequences of lengths `n` and `m` has `(n + 1) × (m + 1)` nodes. An edge
//! leaving `(i, j)` consumes `v[i]` if it moves down, `w[j]` if it moves right,
//! and both if it moves diagonally. Free rides consume nothing and always
//! weigh zero.

use num_traits::Zero;

use crate::check::CheckPolicy;
use crate::edge::{Edge, NodeData};
use crate::error::{GraphError, Result};
use crate::fitting::FittingGraph;
use crate::grid::{EdgeDataSet, Step};
use crate::scorer::Scorer;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Elements of `v` and `w` consumed by `edge`, or `None` for a free ride.
///
/// Fails with [`GraphError::EdgeNotFound`] when the endpoints are not
/// adjacent, and with [`GraphError::SizeMismatch`] when the edge reaches past
/// the end of a sequence.
pub fn edge_elements<'a, D, R>(
    edge: Edge,
    v: &'a [D],
    w: &'a [R],
) -> Result<Option<(Option<&'a D>, Option<&'a R>)>> {
    let (from, to) = match edge {
        Edge::FreeRide { .. } => return Ok(None),
        Edge::Normal(inner) => inner,
    };
    let step = Step::between(from, to).ok_or(GraphError::EdgeNotFound(edge))?;
    let down = match step {
        Step::Down | Step::Diagonal => Some(element(v, from.0)?),
        Step::Right => None,
    };
    let right = match step {
        Step::Right | Step::Diagonal => Some(element(w, from.1)?),
        Step::Down => None,
    };
    Ok(Some((down, right)))
}

#[inline]
fn element<T>(seq: &[T], index: usize) -> Result<&T> {
    seq.get(index).ok_or(GraphError::SizeMismatch {
        expected: index.saturating_add(1),
        actual: seq.len(),
    })
}

fn ensure_dimensions<P: CheckPolicy>(
    down_cnt: usize,
    right_cnt: usize,
    v_len: usize,
    w_len: usize,
) -> Result<()> {
    P::ensure(
        || v_len.checked_add(1) == Some(down_cnt),
        || GraphError::SizeMismatch {
            expected: down_cnt,
            actual: v_len.saturating_add(1),
        },
    )?;
    P::ensure(
        || w_len.checked_add(1) == Some(right_cnt),
        || GraphError::SizeMismatch {
            expected: right_cnt,
            actual: w_len.saturating_add(1),
        },
    )
}

/// Score the edges leaving every node of row `down`. `row` holds that row's
/// edge cells, one per column.
fn score_row<W, D, R, S>(
    down: usize,
    row: &mut [EdgeDataSet<W>],
    down_cnt: usize,
    right_cnt: usize,
    v: &[D],
    w: &[R],
    scorer: &S,
) -> Result<()>
where
    S: Scorer<Edge, D, R, W> + ?Sized,
{
    for (right, cell) in row.iter_mut().enumerate() {
        let from = (down, right);
        for step in Step::ALL {
            let Some(to) = step.target(from, down_cnt, right_cnt) else {
                continue;
            };
            let edge = Edge::Normal((from, to));
            if let Some((d, r)) = edge_elements(edge, v, w)? {
                *cell.get_mut(step) = scorer.score(Some(&edge), d, r);
            }
        }
    }
    Ok(())
}

/// Score every edge of `graph` against `v` (down) and `w` (right).
///
/// Free rides are set to zero; every grid edge gets
/// `scorer.score(Some(&edge), down_elem, right_elem)`, in the order
/// [`FittingGraph::edges`] lists them. The graph must have `v.len() + 1`
/// rows and `w.len() + 1` columns.
pub fn assign_weights<W, NS, ES, P, D, R, S>(
    graph: &mut FittingGraph<W, NS, ES, P>,
    v: &[D],
    w: &[R],
    scorer: &S,
) -> Result<()>
where
    W: Copy + Zero,
    NS: AsRef<[NodeData<W>]> + AsMut<[NodeData<W>]>,
    ES: AsRef<[EdgeDataSet<W>]> + AsMut<[EdgeDataSet<W>]>,
    P: CheckPolicy,
    S: Scorer<Edge, D, R, W> + ?Sized,
{
    #[cfg(feature = "tracing")]
    let span = tracing::trace_span!("assign_weights", v_len = v.len(), w_len = w.len());
    #[cfg(feature = "tracing")]
    let _enter = span.enter();

    let down_cnt = graph.down_node_count();
    let right_cnt = graph.right_node_count();
    ensure_dimensions::<P>(down_cnt, right_cnt, v.len(), w.len())?;
    let (grid, free_ride) = graph.parts_mut();
    *free_ride = W::zero();
    if right_cnt == 0 {
        return Ok(());
    }

    for (down, row) in grid.edge_cells_mut().chunks_mut(right_cnt).enumerate() {
        score_row(down, row, down_cnt, right_cnt, v, w, scorer)?;
    }
    Ok(())
}

/// Parallel variant of [`assign_weights`] with the same result.
///
/// Every grid edge's weight lives in the cell of its from-node, so rows of
/// cells are disjoint and scored independently.
#[cfg(feature = "parallel")]
pub fn assign_weights_parallel<W, NS, ES, P, D, R, S>(
    graph: &mut FittingGraph<W, NS, ES, P>,
    v: &[D],
    w: &[R],
    scorer: &S,
) -> Result<()>
where
    W: Copy + Zero + Send,
    NS: AsRef<[NodeData<W>]> + AsMut<[NodeData<W>]>,
    ES: AsRef<[EdgeDataSet<W>]> + AsMut<[EdgeDataSet<W>]>,
    P: CheckPolicy,
    D: Sync,
    R: Sync,
    S: Scorer<Edge, D, R, W> + Sync + ?Sized,
{
    #[cfg(feature = "tracing")]
    let span = tracing::trace_span!("assign_weights_parallel", v_len = v.len(), w_len = w.len());
    #[cfg(feature = "tracing")]
    let _enter = span.enter();

    let down_cnt = graph.down_node_count();
    let right_cnt = graph.right_node_count();
    ensure_dimensions::<P>(down_cnt, right_cnt, v.len(), w.len())?;
    let (grid, free_ride) = graph.parts_mut();
    *free_ride = W::zero();
    if right_cnt == 0 {
        return Ok(());
    }

    grid.edge_cells_mut()
        .par_chunks_mut(right_cnt)
        .enumerate()
        .try_for_each(|(down, row)| score_row(down, row, down_cnt, right_cnt, v, w, scorer))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::check::Unchecked;
    use crate::scorer::SimpleScorer;
    use crate::storage::VecCreator;

    type Graph<P> = FittingGraph<i32, Vec<NodeData<i32>>, Vec<EdgeDataSet<i32>>, P>;

    fn graph<P: CheckPolicy>(down: usize, right: usize) -> Graph<P> {
        FittingGraph::new(down, right, &VecCreator, &VecCreator, 0, 0).unwrap()
    }

    #[test]
    fn elements_per_step() {
        let v = b"AC";
        let w = b"G";
        assert_eq!(
            edge_elements(Edge::Normal(((1, 0), (2, 1))), v, w).unwrap(),
            Some((Some(&b'C'), Some(&b'G')))
        );
        assert_eq!(
            edge_elements(Edge::Normal(((1, 0), (2, 0))), v, w).unwrap(),
            Some((Some(&b'C'), None))
        );
        assert_eq!(
            edge_elements(Edge::Normal(((2, 0), (2, 1))), v, w).unwrap(),
            Some((None, Some(&b'G')))
        );
        let free = Edge::FreeRide {
            from: (0, 0),
            to: (2, 0),
        };
        assert_eq!(edge_elements(free, v, w).unwrap(), None);
    }

    #[test]
    fn elements_reject_bad_edges() {
        let v = b"AC";
        let w = b"G";
        let skip = Edge::Normal(((0, 0), (2, 0)));
        assert_eq!(
            edge_elements(skip, v, w),
            Err(GraphError::EdgeNotFound(skip))
        );
        assert!(matches!(
            edge_elements(Edge::Normal(((0, 1), (0, 2))), v, w),
            Err(GraphError::SizeMismatch { .. })
        ));
    }

    #[test]
    fn free_rides_forced_to_zero() {
        let mut g: Graph<crate::check::Checked> =
            FittingGraph::new(3, 2, &VecCreator, &VecCreator, 0, 77).unwrap();
        assert_eq!(g.free_ride_weight(), 77);
        let always_ten = |_: Option<&Edge>, _: Option<&u8>, _: Option<&u8>| -> i32 { 10 };
        assign_weights(&mut g, b"AC", b"A", &always_ten).unwrap();
        assert_eq!(g.free_ride_weight(), 0);
        for e in g.edges().filter(|e| !e.is_free_ride()) {
            assert_eq!(*g.edge_data(e).unwrap(), 10);
        }
    }

    #[test]
    fn dimension_mismatch_is_reported() {
        let mut g = graph::<crate::check::Checked>(3, 2);
        let scorer = SimpleScorer::new(1, -1, 0);
        assert_eq!(
            assign_weights(&mut g, b"A", b"A", &scorer),
            Err(GraphError::SizeMismatch {
                expected: 3,
                actual: 2
            })
        );
        assert_eq!(
            assign_weights(&mut g, b"AC", b"", &scorer),
            Err(GraphError::SizeMismatch {
                expected: 2,
                actual: 1
            })
        );
    }

    #[test]
    fn unchecked_graph_with_matching_sizes() {
        let mut g = graph::<Unchecked>(2, 2);
        assign_weights(&mut g, b"A", b"A", &SimpleScorer::new(3, -3, -1)).unwrap();
        assert_eq!(*g.edge_data(Edge::Normal(((0, 0), (1, 1)))).unwrap(), 3);
        assert_eq!(*g.edge_data(Edge::Normal(((0, 0), (1, 0)))).unwrap(), -1);
    }

    #[test]
    fn scorer_sees_the_edge() {
        let mut g = graph::<crate::check::Checked>(2, 3);
        let by_column = |e: Option<&Edge>, _: Option<&u8>, _: Option<&u8>| -> i32 {
            e.map_or(-1, |e| e.to_node().1 as i32)
        };
        assign_weights(&mut g, b"X", b"YZ", &by_column).unwrap();
        assert_eq!(*g.edge_data(Edge::Normal(((0, 1), (1, 2)))).unwrap(), 2);
        assert_eq!(*g.edge_data(Edge::Normal(((1, 0), (1, 1)))).unwrap(), 1);
    }

    #[test]
    fn rows_are_scored_in_listing_order() {
        let mut g = graph::<crate::check::Checked>(4, 3);
        let seen = std::cell::RefCell::new(Vec::new());
        let recorder = |e: Option<&Edge>, _: Option<&u8>, _: Option<&u8>| -> i32 {
            let mut seen = seen.borrow_mut();
            seen.push(*e.unwrap());
            seen.len() as i32
        };
        assign_weights(&mut g, b"ACG", b"TT", &recorder).unwrap();

        let grid: Vec<Edge> = g.edges().filter(|e| !e.is_free_ride()).collect();
        assert_eq!(*seen.borrow(), grid);
        for (i, e) in grid.iter().enumerate() {
            assert_eq!(*g.edge_data(*e).unwrap(), i as i32 + 1);
        }
    }
}
