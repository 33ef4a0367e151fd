//! Fitting alignment graphs
//!
//! This crate builds the weighted directed acyclic graph a backtracker walks
//! to find a *fitting* (semi-global) alignment of two sequences: the right
//! sequence must be aligned end to end, while any prefix and suffix of the
//! down sequence may be skipped for free.
//!
//! ## Core idea
//! 1. The search space is a `(|v| + 1) × (|w| + 1)` grid ([`grid`]) whose
//!    down, right and diagonal edges consume sequence elements.
//! 2. [`FittingGraph`] adds *free-ride* edges from the source down the first
//!    column and from the last column into the sink. All free rides share a
//!    single weight.
//! 3. [`assign_weights`] fills every edge weight from a [`Scorer`].
//!
//! Storage is pluggable ([`storage`]): the same graph runs on heap vectors,
//! fixed inline arrays, small vectors that only spill for large inputs, or
//! bounded inline buffers. Contract checks are a type parameter
//! ([`check::Checked`] / [`check::Unchecked`]).
//!
//! ## Quick start
//! ```
//! use fitting_align::{factory::{create_vec_and_assign, VecFittingGraph}, Edge, SimpleScorer};
//!
//! let scorer = SimpleScorer::new(5.0, -4.0, 0.0);
//! let g: VecFittingGraph<f64> = create_vec_and_assign(b"AC", b"A", &scorer).unwrap();
//!
//! assert_eq!(*g.edge_data(Edge::Normal(((0, 0), (1, 1)))).unwrap(), 5.0);
//! assert_eq!(*g.edge_data(Edge::Normal(((1, 0), (2, 1)))).unwrap(), -4.0);
//! assert_eq!(g.free_ride_weight(), 0.0);
//! ```
//!
//! ## Cargo features
//! - `tracing`: trace spans around graph construction and weight assignment.
//! - `parallel`: `weights::assign_weights_parallel`, scoring grid rows with
//!   rayon.

pub mod bidi;
pub mod builder;
pub mod check;
pub mod edge;
pub mod error;
pub mod factory;
pub mod fitting;
pub mod grid;
pub mod scorer;
pub mod storage;
pub mod utils;
pub mod weights;

pub use crate::builder::FittingGraphBuilder;
pub use crate::check::{CheckPolicy, Checked, Unchecked};
pub use crate::edge::{Edge, NodeData};
pub use crate::error::{GraphError, Result};
pub use crate::fitting::FittingGraph;
pub use crate::grid::Node;
pub use crate::scorer::{Scorer, SimpleScorer};
pub use crate::weights::assign_weights;
