//! Storage strategies for node payloads and edge-weight cells.
//!
//! A graph never allocates on its own: it asks two [`ContainerCreator`]s (one
//! for nodes, one for edge cells) for flat containers of exactly
//! `down_count * right_count` slots, and from then on only sees them as
//! slices. Which creator is used decides where the memory lives:
//!
//! | Creator | Container | Allocation | Size rule |
//! |---------|-----------|------------|-----------|
//! | [`VecCreator`] | `Vec<T>` | heap | any |
//! | [`ArrayCreator`] | [`ArrayStorage`] | none | exactly `D * R` |
//! | [`SmallVecCreator`] | `SmallVec<[T; N]>` | heap above `N` | any |
//! | [`BoundedCreator`] | [`BoundedStorage`] | none | at most `N` |
//!
//! The inline strategies exist for hot loops aligning many short sequences,
//! where a heap allocation per graph would dominate the run time.

use smallvec::SmallVec;

use crate::error::{GraphError, Result};
use crate::utils::node_count;

/// Number of slots in a `down × right` container.
///
/// A product that does not fit in `usize` fails with
/// [`GraphError::SizeMismatch`] carrying the largest row count that would fit
/// and the requested one.
pub(crate) fn cell_count(down: usize, right: usize) -> Result<usize> {
    node_count(down, right).ok_or(GraphError::SizeMismatch {
        expected: usize::MAX / right.max(1),
        actual: down,
    })
}

/// Factory for one flat container of `down * right` slots.
///
/// Creators reject sizes their container cannot physically hold, regardless
/// of the graph's check policy.
pub trait ContainerCreator<T: Clone> {
    type Container: AsRef<[T]> + AsMut<[T]>;

    /// Create a container of `down * right` copies of `value`.
    fn create_filled(&self, down: usize, right: usize, value: T) -> Result<Self::Container>;
}

/// Heap storage sized exactly to the grid.
#[derive(Debug, Clone, Copy, Default)]
pub struct VecCreator;

impl<T: Clone> ContainerCreator<T> for VecCreator {
    type Container = Vec<T>;

    fn create_filled(&self, down: usize, right: usize, value: T) -> Result<Vec<T>> {
        Ok(vec![value; cell_count(down, right)?])
    }
}

/// Inline `D × R` array; the grid must have exactly `D * R` nodes.
#[derive(Debug, Clone, Copy, Default)]
pub struct ArrayCreator<const D: usize, const R: usize>;

/// Fixed-size inline storage produced by [`ArrayCreator`].
#[derive(Debug, Clone)]
pub struct ArrayStorage<T, const D: usize, const R: usize> {
    cells: [[T; R]; D],
}

impl<T, const D: usize, const R: usize> AsRef<[T]> for ArrayStorage<T, D, R> {
    fn as_ref(&self) -> &[T] {
        self.cells.as_flattened()
    }
}

impl<T, const D: usize, const R: usize> AsMut<[T]> for ArrayStorage<T, D, R> {
    fn as_mut(&mut self) -> &mut [T] {
        self.cells.as_flattened_mut()
    }
}

impl<T: Clone, const D: usize, const R: usize> ContainerCreator<T> for ArrayCreator<D, R> {
    type Container = ArrayStorage<T, D, R>;

    fn create_filled(&self, down: usize, right: usize, value: T) -> Result<Self::Container> {
        let len = cell_count(down, right)?;
        if len != D * R {
            return Err(GraphError::SizeMismatch {
                expected: D * R,
                actual: len,
            });
        }
        Ok(ArrayStorage {
            cells: std::array::from_fn(|_| std::array::from_fn(|_| value.clone())),
        })
    }
}

/// Inline storage for up to `N` slots, spilling to the heap beyond that.
#[derive(Debug, Clone, Copy, Default)]
pub struct SmallVecCreator<const N: usize>;

impl<T: Clone, const N: usize> ContainerCreator<T> for SmallVecCreator<N> {
    type Container = SmallVec<[T; N]>;

    fn create_filled(&self, down: usize, right: usize, value: T) -> Result<Self::Container> {
        Ok(SmallVec::from_elem(value, cell_count(down, right)?))
    }
}

/// Inline storage with a hard capacity of `N` slots.
#[derive(Debug, Clone, Copy, Default)]
pub struct BoundedCreator<const N: usize>;

/// Fixed-capacity inline storage produced by [`BoundedCreator`]; only the
/// first `len` slots are visible.
#[derive(Debug, Clone)]
pub struct BoundedStorage<T, const N: usize> {
    cells: [T; N],
    len: usize,
}

impl<T, const N: usize> BoundedStorage<T, N> {
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub const fn capacity(&self) -> usize {
        N
    }
}

impl<T, const N: usize> AsRef<[T]> for BoundedStorage<T, N> {
    fn as_ref(&self) -> &[T] {
        &self.cells[..self.len]
    }
}

impl<T, const N: usize> AsMut<[T]> for BoundedStorage<T, N> {
    fn as_mut(&mut self) -> &mut [T] {
        &mut self.cells[..self.len]
    }
}

impl<T: Clone, const N: usize> ContainerCreator<T> for BoundedCreator<N> {
    type Container = BoundedStorage<T, N>;

    fn create_filled(&self, down: usize, right: usize, value: T) -> Result<Self::Container> {
        let len = cell_count(down, right)?;
        if len > N {
            return Err(GraphError::SizeMismatch {
                expected: N,
                actual: len,
            });
        }
        Ok(BoundedStorage {
            cells: std::array::from_fn(|_| value.clone()),
            len,
        })
    }
}
