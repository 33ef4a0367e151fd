//! Ready-made constructors for the four storage strategies.
//!
//! Each strategy has a bare `create_*` form, which builds a graph with every
//! weight at zero, and a `create_*_and_assign` form, which sizes the graph
//! for two sequences and runs [`assign_weights`] on it. The result type names
//! the strategy, so annotating the binding is usually enough:
//!
//! ```
//! use fitting_align::factory::{create_vec_and_assign, VecFittingGraph};
//! use fitting_align::scorer::SimpleScorer;
//!
//! let scorer = SimpleScorer::new(1.0, -1.0, -1.0);
//! let g: VecFittingGraph<f64> = create_vec_and_assign(b"ACGT", b"CG", &scorer).unwrap();
//! assert_eq!(g.down_node_count(), 5);
//! assert_eq!(g.right_node_count(), 3);
//! ```

use num_traits::Zero;
use smallvec::SmallVec;

use crate::builder::FittingGraphBuilder;
use crate::check::{CheckPolicy, Checked};
use crate::edge::{Edge, NodeData};
use crate::error::{GraphError, Result};
use crate::fitting::FittingGraph;
use crate::grid::EdgeDataSet;
use crate::scorer::Scorer;
use crate::storage::{
    ArrayCreator, ArrayStorage, BoundedCreator, BoundedStorage, SmallVecCreator, VecCreator,
};
use crate::utils::node_count;
use crate::weights::assign_weights;

/// Heap-backed graph of any size.
pub type VecFittingGraph<W, P = Checked> =
    FittingGraph<W, Vec<NodeData<W>>, Vec<EdgeDataSet<W>>, P>;

/// Inline graph of exactly `DOWN × RIGHT` nodes.
pub type ArrayFittingGraph<W, const DOWN: usize, const RIGHT: usize, P = Checked> = FittingGraph<
    W,
    ArrayStorage<NodeData<W>, DOWN, RIGHT>,
    ArrayStorage<EdgeDataSet<W>, DOWN, RIGHT>,
    P,
>;

/// Graph kept inline up to `N` nodes, on the heap beyond.
pub type SmallVecFittingGraph<W, const N: usize, P = Checked> =
    FittingGraph<W, SmallVec<[NodeData<W>; N]>, SmallVec<[EdgeDataSet<W>; N]>, P>;

/// Inline graph of at most `N` nodes.
pub type BoundedFittingGraph<W, const N: usize, P = Checked> =
    FittingGraph<W, BoundedStorage<NodeData<W>, N>, BoundedStorage<EdgeDataSet<W>, N>, P>;

pub fn create_vec<W, P>(down_cnt: usize, right_cnt: usize) -> Result<VecFittingGraph<W, P>>
where
    W: Copy + Zero,
    P: CheckPolicy,
{
    FittingGraphBuilder::new(down_cnt, right_cnt).build(&VecCreator, &VecCreator)
}

pub fn create_array<W, const DOWN: usize, const RIGHT: usize, P>(
) -> Result<ArrayFittingGraph<W, DOWN, RIGHT, P>>
where
    W: Copy + Zero,
    P: CheckPolicy,
{
    FittingGraphBuilder::new(DOWN, RIGHT)
        .build(&ArrayCreator::<DOWN, RIGHT>, &ArrayCreator::<DOWN, RIGHT>)
}

pub fn create_small_vec<W, const N: usize, P>(
    down_cnt: usize,
    right_cnt: usize,
) -> Result<SmallVecFittingGraph<W, N, P>>
where
    W: Copy + Zero,
    P: CheckPolicy,
{
    FittingGraphBuilder::new(down_cnt, right_cnt)
        .build(&SmallVecCreator::<N>, &SmallVecCreator::<N>)
}

pub fn create_bounded<W, const N: usize, P>(
    down_cnt: usize,
    right_cnt: usize,
) -> Result<BoundedFittingGraph<W, N, P>>
where
    W: Copy + Zero,
    P: CheckPolicy,
{
    FittingGraphBuilder::new(down_cnt, right_cnt)
        .build(&BoundedCreator::<N>, &BoundedCreator::<N>)
}

pub fn create_vec_and_assign<W, P, D, R, S>(
    v: &[D],
    w: &[R],
    scorer: &S,
) -> Result<VecFittingGraph<W, P>>
where
    W: Copy + Zero,
    P: CheckPolicy,
    S: Scorer<Edge, D, R, W> + ?Sized,
{
    let mut g = create_vec(v.len().saturating_add(1), w.len().saturating_add(1))?;
    assign_weights(&mut g, v, w, scorer)?;
    Ok(g)
}

/// Fails with [`GraphError::SizeMismatch`] unless the sequences have exactly
/// `DOWN - 1` and `RIGHT - 1` elements.
pub fn create_array_and_assign<W, const DOWN: usize, const RIGHT: usize, P, D, R, S>(
    v: &[D],
    w: &[R],
    scorer: &S,
) -> Result<ArrayFittingGraph<W, DOWN, RIGHT, P>>
where
    W: Copy + Zero,
    P: CheckPolicy,
    S: Scorer<Edge, D, R, W> + ?Sized,
{
    let (down_cnt, right_cnt) = (v.len().saturating_add(1), w.len().saturating_add(1));
    P::ensure(
        || down_cnt == DOWN && right_cnt == RIGHT,
        || GraphError::SizeMismatch {
            expected: DOWN * RIGHT,
            actual: down_cnt.saturating_mul(right_cnt),
        },
    )?;
    let mut g = create_array()?;
    assign_weights(&mut g, v, w, scorer)?;
    Ok(g)
}

pub fn create_small_vec_and_assign<W, const N: usize, P, D, R, S>(
    v: &[D],
    w: &[R],
    scorer: &S,
) -> Result<SmallVecFittingGraph<W, N, P>>
where
    W: Copy + Zero,
    P: CheckPolicy,
    S: Scorer<Edge, D, R, W> + ?Sized,
{
    let mut g = create_small_vec(v.len().saturating_add(1), w.len().saturating_add(1))?;
    assign_weights(&mut g, v, w, scorer)?;
    Ok(g)
}

/// Fails with [`GraphError::SizeMismatch`] when the sequences need more than
/// `N` nodes.
pub fn create_bounded_and_assign<W, const N: usize, P, D, R, S>(
    v: &[D],
    w: &[R],
    scorer: &S,
) -> Result<BoundedFittingGraph<W, N, P>>
where
    W: Copy + Zero,
    P: CheckPolicy,
    S: Scorer<Edge, D, R, W> + ?Sized,
{
    let (down_cnt, right_cnt) = (v.len().saturating_add(1), w.len().saturating_add(1));
    P::ensure(
        || node_count(down_cnt, right_cnt).is_some_and(|cells| cells <= N),
        || GraphError::SizeMismatch {
            expected: N,
            actual: down_cnt.saturating_mul(right_cnt),
        },
    )?;
    let mut g = create_bounded(down_cnt, right_cnt)?;
    assign_weights(&mut g, v, w, scorer)?;
    Ok(g)
}
