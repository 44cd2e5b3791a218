//! Policy iteration ratio solvers (component C7): Howard's algorithm and
//! its value-iteration cousin, ported from `ad_alg_howard.cc` and
//! `ad_alg_valiter.cc`.
//!
//! Both maintain a *policy graph* — exactly one successor edge per node —
//! and alternate between two steps: find the cycle(s) in the current
//! policy and take the best ratio among them, then relax every edge in a
//! single Bellman-Ford-like sweep, switching a node's policy edge whenever
//! a strictly better successor turns up. Howard's version additionally
//! re-anchors every predecessor of the improving cycle's node with a
//! reverse BFS before that sweep; value iteration skips this and simply
//! runs the sweep.
//!
//! Operates on [`ScComponent`] with `has_source = false`: the sub-graph is
//! strongly connected, so every node already has at least one outgoing
//! edge and the initial policy graph is well-defined without a synthetic
//! source.

use std::collections::VecDeque;

use crate::components::ScComponent;
use crate::EPSILON;

struct PolicyState {
    dist: Vec<f64>,
    visited: Vec<i64>,
    target: Vec<usize>,
    einfo: Vec<i64>,
    einfo2: Vec<i64>,
}

impl PolicyState {
    fn initial(sub: &ScComponent, plus_infinity: f64) -> Self {
        let g = &sub.graph;
        let n = g.num_nodes();
        let mut dist = vec![plus_infinity; n];
        let mut target = vec![0usize; n];
        let mut einfo = vec![0i64; n];
        let mut einfo2 = vec![1i64; n];

        for e in g.edge_ids() {
            let u = g.src(e);
            let d = g.weight(e);
            if (d as f64) < dist[u] {
                dist[u] = d as f64;
                target[u] = g.tar(e);
                einfo[u] = d;
                einfo2[u] = g.transit(e);
            }
        }

        PolicyState {
            dist,
            visited: vec![-1; n],
            target,
            einfo,
            einfo2,
        }
    }

    /// Finds every cycle in the current (functional) policy graph and
    /// returns the best `(ratio, a node on that cycle)` pair seen, if any
    /// ratio improves on `lambda`.
    fn best_improving_cycle(&mut self, n: usize, lambda: f64) -> Option<(f64, usize)> {
        self.visited.iter_mut().for_each(|v| *v = -1);
        let mut best: Option<(f64, usize)> = None;

        for v in 0..n {
            if self.visited[v] >= 0 {
                continue;
            }
            let mut u = v;
            while self.visited[u] == -1 {
                self.visited[u] = v as i64;
                u = self.target[u];
            }
            if self.visited[u] != v as i64 {
                continue;
            }

            let w = u;
            let mut total_weight: i64 = 0;
            let mut total_length: i64 = 0;
            loop {
                total_length += self.einfo2[u];
                total_weight += self.einfo[u];
                u = self.target[u];
                if u == w {
                    break;
                }
            }

            let new_lambda = total_weight as f64 / total_length as f64;
            let current_best = best.map_or(lambda, |(l, _)| l);
            if new_lambda < current_best {
                best = Some((new_lambda, w));
            }
        }

        best
    }

    /// One Bellman-Ford-like relaxation sweep over every edge, switching a
    /// node's policy whenever a strictly better successor (by more than
    /// [`EPSILON`]) appears. Returns whether anything changed.
    fn relax_sweep(&mut self, sub: &ScComponent, lambda: f64) -> bool {
        let g = &sub.graph;
        let mut improved = false;
        for e in g.edge_ids() {
            let u = g.src(e);
            let v = g.tar(e);
            let new_dist = self.dist[v] + g.weight(e) as f64 - lambda * g.transit(e) as f64;
            if EPSILON < (self.dist[u] - new_dist) {
                improved = true;
                self.dist[u] = new_dist;
                self.target[u] = v;
                self.einfo[u] = g.weight(e);
                self.einfo2[u] = g.transit(e);
            }
        }
        improved
    }
}

/// Howard's policy iteration algorithm.
pub fn howard(sub: &ScComponent, plus_infinity: f64, lambda_so_far: f64) -> f64 {
    let g = &sub.graph;
    let n = g.num_nodes();
    let mut state = PolicyState::initial(sub, plus_infinity);

    let mut lambda = lambda_so_far;
    let check_limit = n;
    let mut check_count = 0usize;

    loop {
        match state.best_improving_cycle(n, lambda) {
            None => {
                check_count += 1;
                if check_count > check_limit {
                    break;
                }
            }
            Some((new_lambda, best_node)) => {
                lambda = new_lambda;
                check_count = 0;

                // Reverse BFS: re-anchor every predecessor of the cycle
                // through the node the search landed on.
                let mut queue: VecDeque<usize> = VecDeque::new();
                queue.push_back(best_node);
                state.visited[best_node] = -1;

                while let Some(v) = queue.pop_front() {
                    for i in 0..g.indegree(v) {
                        let e = g.in_edge(v, i);
                        let u = g.src(e);
                        if state.visited[u] != -1 && v == state.target[u] {
                            state.visited[u] = -1;
                            state.dist[u] = state.dist[v] + state.einfo[u] as f64
                                - lambda * state.einfo2[u] as f64;
                            queue.push_back(u);
                        }
                    }
                }
            }
        }

        if !state.relax_sweep(sub, lambda) {
            break;
        }
    }

    lambda
}

/// Howard's value-iteration variant: skips the reverse-BFS re-anchoring
/// step and simply runs a fixed `n + 1` Bellman-Ford-like sweeps (or until
/// a sweep changes nothing, whichever comes first) — it does not reset its
/// non-improvement counter on an improving cycle, matching the shipped
/// source rather than the debug-only counter reset in its `PROGRESS`
/// block.
pub fn value_iteration(sub: &ScComponent, plus_infinity: f64, lambda_so_far: f64) -> f64 {
    let g = &sub.graph;
    let n = g.num_nodes();
    let mut state = PolicyState::initial(sub, plus_infinity);

    let mut lambda = lambda_so_far;
    let check_limit = n;
    let mut check_count = 0usize;

    loop {
        if let Some((new_lambda, _)) = state.best_improving_cycle(n, lambda) {
            lambda = new_lambda;
        }

        check_count += 1;
        if check_count > check_limit {
            break;
        }

        if !state.relax_sweep(sub, lambda) {
            break;
        }
    }

    lambda
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
    fn three_cycle_howard() {
        let sub = single_scc(&[(0, 1, 1, 1), (1, 2, 2, 1), (2, 0, 3, 1)], 3);
        let lambda = howard(&sub, 1e9, 1e9);
        assert!((lambda - 2.0).abs() < 1e-6);
    }

    #[test]
    fn three_cycle_value_iteration() {
        let sub = single_scc(&[(0, 1, 1, 1), (1, 2, 2, 1), (2, 0, 3, 1)], 3);
        let lambda = value_iteration(&sub, 1e9, 1e9);
        assert!((lambda - 2.0).abs() < 1e-6);
    }

    #[test]
    fn negative_ratio_cycle_both() {
        let sub = single_scc(&[(0, 1, 0, 1), (1, 2, 0, 1), (2, 3, 0, 1), (3, 0, -4, 1)], 4);
        let h = howard(&sub, 1e9, 1e9);
        let v = value_iteration(&sub, 1e9, 1e9);
        assert!((h - (-1.0)).abs() < 1e-6);
        assert!((v - (-1.0)).abs() < 1e-6);
    }

    #[test]
    fn self_loop() {
        let sub = single_scc(&[(0, 0, 5, 1)], 1);
        let lambda = howard(&sub, 1e9, 1e9);
        assert!((lambda - 5.0).abs() < 1e-6);
    }
}
