//! Per-SCC minimum cycle ratio solvers.
//!
//! Six independent algorithms, grouped by family: [`tree`] (Karp-Orlin,
//! Young-Tarjan-Orlin), [`bisection`] (Lawler's binary search over three
//! negative-cycle oracles), [`policy`] (Howard's policy iteration and its
//! value-iteration cousin), and [`burns`] (the critical-graph method).
//! [`Algorithm`] names all six for the driver and CLI to select between.

pub mod bisection;
pub mod burns;
pub mod policy;
pub mod tree;

use tracing::trace;

use crate::components::{build_component_graph, ScComponent};
use crate::graph::Graph;
use crate::scc::Components;
use crate::Result;

/// The six solvers shipped for the minimum cycle ratio problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Algorithm {
    KarpOrlin,
    YoungTarjanOrlin,
    LawlerBellmanFord,
    LawlerSzymanski,
    Tarjan,
    Howard,
    ValueIteration,
    Burns,
}

impl Algorithm {
    /// Whether this solver needs its sub-graph built with a synthetic
    /// source node (the tree-based solvers root their shortest-paths tree
    /// there; every other family starts relaxation from local node 0 of a
    /// plain, already-strongly-connected sub-graph).
    fn needs_source(self) -> bool {
        matches!(self, Algorithm::KarpOrlin | Algorithm::YoungTarjanOrlin)
    }
}

/// Runs `algorithm` on every strongly connected component of `g` that has
/// at least one edge, threading the best ratio found so far through as a
/// pruning bound (component C8's per-algorithm half; see [`crate::driver`]
/// for the SCC-decomposition wrapper).
pub fn solve_component(
    g: &Graph,
    sc: &Components,
    algorithm: Algorithm,
    plus_infinity: f64,
) -> Result<f64> {
    let component_graph = build_component_graph(g, sc, algorithm.needs_source());
    let mut lambda_best = plus_infinity;

    for (i, sub) in component_graph.components.iter().enumerate() {
        if sub.graph.num_edges() <= sub.real_edge_start() {
            // No genuine intra-SCC edges: a singleton with no self-loop.
            continue;
        }
        let lambda = solve_one(sub, algorithm, plus_infinity, lambda_best)?;
        trace!(component = i, lambda, lambda_best, "solved component");
        if lambda < lambda_best {
            lambda_best = lambda;
        }
    }

    Ok(lambda_best)
}

fn solve_one(
    sub: &ScComponent,
    algorithm: Algorithm,
    plus_infinity: f64,
    lambda_so_far: f64,
) -> Result<f64> {
    let lambda = match algorithm {
        Algorithm::KarpOrlin => tree::karp_orlin(sub, plus_infinity),
        Algorithm::YoungTarjanOrlin => tree::young_tarjan_orlin(sub, plus_infinity),
        Algorithm::LawlerBellmanFord => bisection::bellman_ford(sub, plus_infinity, lambda_so_far),
        Algorithm::LawlerSzymanski => bisection::szymanski(sub, plus_infinity, lambda_so_far),
        Algorithm::Tarjan => bisection::tarjan(sub, plus_infinity, lambda_so_far),
        Algorithm::Howard => policy::howard(sub, plus_infinity, lambda_so_far),
        Algorithm::ValueIteration => policy::value_iteration(sub, plus_infinity, lambda_so_far),
        Algorithm::Burns => return burns::burns(sub, plus_infinity, lambda_so_far),
    };
    Ok(lambda)
}
