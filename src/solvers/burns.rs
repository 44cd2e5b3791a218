//! Burns's critical-graph minimum cycle ratio method (supplemented solver,
//! not named by the original distillation but present in the original
//! source as `ad_alg_burns.cc`).
//!
//! Maintains node potentials `dist` and, each round, the subset of
//! "critical" edges tight against the current `lambda` guess
//! (`|lambda * t(e) - delta1(e)| < SMALL_EPSILON`, where
//! `delta1(e) = dist(u) + w(e) - dist(v)`). As long as the critical graph
//! is acyclic it has a valid topological `length` labelling; `theta`, the
//! largest amount `lambda` can still drop while keeping it acyclic, is
//! computed from the non-critical edges and used to update both `lambda`
//! and every node's potential. The loop terminates the first round the
//! critical graph becomes cyclic: `lambda` has converged.
//!
//! Requires every cycle of zero-transit-time edges to be absent up front
//! (a deadlock in the system the graph models); this is checked once before
//! the main loop and surfaced as [`CycleRatioError::ZeroTransitCycle`].

use crate::components::ScComponent;
use crate::{CycleRatioError, Result, SMALL_EPSILON};

/// Topologically sorts the subgraph of edges with `critical[e] == true`
/// using Kahn's algorithm, producing `length[v]` — node `v`'s longest
/// "negative length" path from any critical-indegree-0 node, accumulated
/// via `init(v) + increment(e)` along critical edges.
///
/// Returns `None` if that subgraph is cyclic (not every node gets visited).
fn topo_length(
    sub: &ScComponent,
    critical: &[bool],
    init: impl Fn(usize) -> f64,
    plus_infinity: f64,
    increment: impl Fn(usize) -> f64,
) -> Option<Vec<f64>> {
    let g = &sub.graph;
    let n = g.num_nodes();

    let mut indeg = vec![0usize; n];
    let mut length = vec![0.0f64; n];
    let mut queue = Vec::new();

    for v in 0..n {
        let mut d = 0usize;
        for i in 0..g.indegree(v) {
            if critical[g.in_edge(v, i)] {
                d += 1;
            }
        }
        indeg[v] = d;
        if d == 0 {
            length[v] = init(v);
            queue.push(v);
        } else {
            length[v] = plus_infinity;
        }
    }

    let mut count_visited = 0usize;
    let mut head = 0usize;
    while head < queue.len() {
        let u = queue[head];
        head += 1;
        count_visited += 1;
        for i in 0..g.outdegree(u) {
            let e = g.out_edge(u, i);
            if critical[e] {
                let v = g.tar(e);
                let candidate = length[u] + increment(e);
                if candidate < length[v] {
                    length[v] = candidate;
                }
                indeg[v] -= 1;
                if indeg[v] == 0 {
                    queue.push(v);
                }
            }
        }
    }

    if count_visited != n {
        None
    } else {
        Some(length)
    }
}

/// Burns's method.
///
/// # Errors
/// Returns [`CycleRatioError::ZeroTransitCycle`] if the subgraph of edges
/// with `t(e) <= 0` contains a cycle (preprocessing invariant of the
/// method; every such cycle would represent a deadlock).
pub fn burns(sub: &ScComponent, plus_infinity: f64, lambda_so_far: f64) -> Result<f64> {
    let g = &sub.graph;
    let n = g.num_nodes();
    let m = g.num_edges();

    let zero_transit: Vec<bool> = (0..m).map(|e| g.transit(e) <= 0).collect();
    let Some(dist) = topo_length(sub, &zero_transit, |_| 0.0, plus_infinity, |e| g.weight(e) as f64)
    else {
        return Err(CycleRatioError::ZeroTransitCycle);
    };
    let mut dist = dist;

    let mut lambda = lambda_so_far;
    for e in 0..m {
        if g.transit(e) > 0 {
            let u = g.src(e);
            let v = g.tar(e);
            let delta = dist[u] + g.weight(e) as f64 - dist[v];
            let ratio = delta / g.transit(e) as f64;
            if ratio < lambda {
                lambda = ratio;
            }
        }
    }

    loop {
        let critical: Vec<bool> = (0..m)
            .map(|e| {
                let u = g.src(e);
                let v = g.tar(e);
                let delta1 = dist[u] + g.weight(e) as f64 - dist[v];
                (lambda * g.transit(e) as f64 - delta1).abs() < SMALL_EPSILON
            })
            .collect();

        let length = match topo_length(sub, &critical, |_| 0.0, plus_infinity, |e| -(g.transit(e) as f64)) {
            None => break,
            Some(length) => length,
        };

        let mut theta = f64::NEG_INFINITY;
        for e in 0..m {
            let u = g.src(e);
            let v = g.tar(e);
            let delta2 = length[v] + g.transit(e) as f64 - length[u];
            if delta2 > 0.0 {
                let delta1 = dist[u] + g.weight(e) as f64 - dist[v];
                let candidate = (lambda * g.transit(e) as f64 - delta1) / delta2;
                if candidate > theta {
                    theta = candidate;
                }
            }
        }

        lambda -= theta;
        for v in 0..n {
            dist[v] -= theta * length[v];
        }
    }

    Ok(lambda)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::build_component_graph;
    use crate::graph::GraphBuilder;
    use crate::scc::strongly_connected_components;

    fn single_scc(edges: &[(usize, usize, i64, i64)], n: usize) -> ScComponent {
        let mut b = GraphBuilder::new(n);
        for &(u, v, w, t) in edges {
            b.insert_edge(u, v, w, t);
        }
        let g = b.build();
        let sc = strongly_connected_components(&g);
        let cg = build_component_graph(&g, &sc, false);
        assert_eq!(cg.components.len(), 1);
        let mut comps = cg.components;
        comps.pop().unwrap()
    }

    #[test]
    fn three_cycle() {
        let sub = single_scc(&[(0, 1, 1, 1), (1, 2, 2, 1), (2, 0, 3, 1)], 3);
        let lambda = burns(&sub, 1e9, 1e9).unwrap();
        assert!((lambda - 2.0).abs() < 1e-6);
    }

    #[test]
    fn negative_ratio_cycle() {
        let sub = single_scc(&[(0, 1, 0, 1), (1, 2, 0, 1), (2, 3, 0, 1), (3, 0, -4, 1)], 4);
        let lambda = burns(&sub, 1e9, 1e9).unwrap();
        assert!((lambda - (-1.0)).abs() < 1e-6);
    }

    #[test]
    fn zero_transit_cycle_is_an_error() {
        let sub = single_scc(&[(0, 1, 1, 0), (1, 0, 1, 0)], 2);
        let result = burns(&sub, 1e9, 1e9);
        assert!(matches!(result, Err(CycleRatioError::ZeroTransitCycle)));
    }
}
