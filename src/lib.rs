//! Minimum/maximum cycle ratio solvers for directed, integer-weighted graphs.
//!
//! Given a directed graph with an integer weight `w(e)` and transit time
//! `t(e) >= 1` on every edge, this crate finds
//!
//! ```text
//! lambda* = min over directed cycles C of (sum w(e)) / (sum t(e))
//! ```
//!
//! or its max-ratio counterpart. When every `t(e) = 1` this is the classical
//! minimum cycle mean. Six independent algorithms are shipped
//! ([`solvers`]); [`driver`] decomposes the graph into strongly connected
//! components and runs the chosen algorithm on each, threading a
//! best-so-far bound through for pruning.
//!
//! ```
//! use cycle_ratio::graph::GraphBuilder;
//! use cycle_ratio::driver::{min_cycle_ratio, Algorithm};
//!
//! let mut b = GraphBuilder::new(3);
//! b.insert_edge(0, 1, 1, 1);
//! b.insert_edge(1, 2, 2, 1);
//! b.insert_edge(2, 0, 3, 1);
//! let g = b.build();
//!
//! let lambda = min_cycle_ratio(&g, Algorithm::KarpOrlin).unwrap();
//! assert!((lambda - 2.0).abs() < cycle_ratio::EPSILON);
//! ```

pub mod bounds;
pub mod components;
pub mod dimacs;
pub mod driver;
pub mod error;
pub mod generate;
pub mod graph;
pub mod heap;
pub mod scc;
pub mod solvers;

pub use error::{CycleRatioError, Result};

/// Half-interval tolerance for the bisection solvers (C6) and the
/// improvement threshold for policy iteration (C7).
pub const EPSILON: f64 = 0.01;
/// Half of [`EPSILON`], the tolerance bisection tightens to after a
/// negative-cycle hit before declaring convergence.
pub const EPSILON2: f64 = EPSILON / 2.0;
/// Tolerance used to classify an edge as "critical" in Burns's method.
pub const SMALL_EPSILON: f64 = 0.001;
