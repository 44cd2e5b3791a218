//! The overall cycle ratio driver (component C8), ported from
//! `ad_main.cc`'s `find_min_cycle_ratio_for_components` /
//! `find_max_cycle_ratio_for_components` call sites.
//!
//! Decomposes `g` into strongly connected components and solves each with
//! the chosen [`Algorithm`], threading the best ratio found so far through
//! as a pruning bound for every solver family that accepts one (the
//! bisection, policy, and Burns families all use it to shrink their search
//! range or skip a component outright; the tree solvers ignore it since
//! they are not iterative bisections).

use tracing::debug;

use crate::graph::Graph;
use crate::scc::strongly_connected_components;
use crate::solvers::solve_component;
use crate::Result;

pub use crate::solvers::Algorithm;

/// `2 + sum(|w(e)|)` over every edge — the same sentinel the original uses
/// for "larger than any real cycle ratio could be", derived straight from
/// the input rather than hardcoded, so it scales with the graph's weights.
pub fn plus_infinity(g: &Graph) -> f64 {
    let total: i64 = g.edge_ids().map(|e| g.weight(e).abs()).sum();
    2.0 + total as f64
}

/// The minimum cycle ratio over every directed cycle of `g`, or
/// `f64::INFINITY` if `g` is acyclic.
///
/// # Errors
/// Returns [`crate::CycleRatioError::EmptyGraph`] if `g` has no nodes, and
/// propagates [`crate::CycleRatioError::ZeroTransitCycle`] from
/// [`Algorithm::Burns`] if the graph has a cycle of edges with
/// `t(e) <= 0`.
pub fn min_cycle_ratio(g: &Graph, algorithm: Algorithm) -> Result<f64> {
    if g.num_nodes() == 0 {
        return Err(crate::CycleRatioError::EmptyGraph);
    }

    let sc = strongly_connected_components(g);
    if sc.is_acyclic(g) {
        debug!(nnodes = g.num_nodes(), "graph is acyclic, returning +infinity");
        return Ok(f64::INFINITY);
    }

    let plus_infinity = plus_infinity(g);
    debug!(components = sc.count, plus_infinity, ?algorithm, "solving for minimum cycle ratio");
    let lambda = solve_component(g, &sc, algorithm, plus_infinity)?;
    debug!(lambda, "minimum cycle ratio found");
    Ok(lambda)
}

/// The maximum cycle ratio over every directed cycle of `g`, or
/// `f64::NEG_INFINITY` if `g` is acyclic. Solved by negating every edge
/// weight and negating the minimum-ratio result.
///
/// # Errors
/// See [`min_cycle_ratio`].
pub fn max_cycle_ratio(g: &Graph, algorithm: Algorithm) -> Result<f64> {
    if g.num_nodes() == 0 {
        return Err(crate::CycleRatioError::EmptyGraph);
    }

    let sc = strongly_connected_components(g);
    if sc.is_acyclic(g) {
        debug!(nnodes = g.num_nodes(), "graph is acyclic, returning -infinity");
        return Ok(f64::NEG_INFINITY);
    }

    let negated = g.negate_weights();
    let plus_infinity = plus_infinity(&negated);
    debug!(components = sc.count, plus_infinity, ?algorithm, "solving for maximum cycle ratio via negated weights");
    let lambda = solve_component(&negated, &sc, algorithm, plus_infinity)?;
    debug!(lambda = -lambda, "maximum cycle ratio found");
    Ok(-lambda)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::GraphBuilder;

    fn three_cycle() -> Graph {
        let mut b = GraphBuilder::new(3);
        b.insert_edge(0, 1, 1, 1);
        b.insert_edge(1, 2, 2, 1);
        b.insert_edge(2, 0, 3, 1);
        b.build()
    }

    #[test]
    fn acyclic_graph_returns_infinity() {
        let mut b = GraphBuilder::new(2);
        b.insert_edge(0, 1, 1, 1);
        let g = b.build();
        assert_eq!(min_cycle_ratio(&g, Algorithm::KarpOrlin).unwrap(), f64::INFINITY);
        assert_eq!(max_cycle_ratio(&g, Algorithm::KarpOrlin).unwrap(), f64::NEG_INFINITY);
    }

    #[test]
    fn every_algorithm_agrees_on_min() {
        let g = three_cycle();
        let algorithms = [
            Algorithm::KarpOrlin,
            Algorithm::YoungTarjanOrlin,
            Algorithm::LawlerBellmanFord,
            Algorithm::LawlerSzymanski,
            Algorithm::Tarjan,
            Algorithm::Howard,
            Algorithm::ValueIteration,
            Algorithm::Burns,
        ];
        for algorithm in algorithms {
            let lambda = min_cycle_ratio(&g, algorithm).unwrap();
            assert!((lambda - 2.0).abs() < 0.02, "{algorithm:?} gave {lambda}");
        }
    }

    #[test]
    fn max_is_min_of_negated() {
        let g = three_cycle();
        let lambda = max_cycle_ratio(&g, Algorithm::KarpOrlin).unwrap();
        assert!((lambda - 3.0).abs() < 1e-6);
    }
}
