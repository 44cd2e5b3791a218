//! Lawler's bisection method with three interchangeable negative-cycle
//! oracles (component C6), ported from `ad_alg_lawler.cc`,
//! `ad_alg_szymanski.cc` and `ad_alg_tarjan.cc`.
//!
//! All three share the same outer binary search over `lambda`: reweight
//! every edge to `w(e) - lambda * t(e)` and ask whether the result has a
//! negative cycle. If it does, `lambda` was too high, so the search
//! continues below it; otherwise it continues above. The oracles differ
//! only in how they look for that negative cycle.
//!
//! Each sub-graph is strongly connected by construction (these operate on
//! [`ScComponent`] with `has_source = false`), so relaxation can start from
//! local node `0` without needing a synthetic source — every node is
//! reachable from it.

use std::collections::VecDeque;

use crate::components::ScComponent;
use crate::{EPSILON, EPSILON2};

const SOURCE: usize = 0;

/// Computes `(lower, upper, lambda)` bounds shared by all three oracles:
/// `lower` is the minimum edge ratio `w(e) / t(e)`, `upper` is the sum of
/// edge weights. Returns `None` if `lambda_so_far` already proves the
/// component can't beat it (the driver's pruning short-circuit).
fn initial_bounds(sub: &ScComponent, plus_infinity: f64, lambda_so_far: f64) -> Option<(f64, f64, f64)> {
    let g = &sub.graph;
    let mut lower = plus_infinity;
    let mut upper = 0.0;
    for e in g.edge_ids() {
        upper += g.weight(e) as f64;
        if g.transit(e) > 0 {
            let ratio = g.weight(e) as f64 / g.transit(e) as f64;
            if ratio < lower {
                lower = ratio;
            }
        }
    }

    if lambda_so_far <= lower {
        return None;
    }

    if upper > 2.0 * lambda_so_far - lower {
        upper = 2.0 * lambda_so_far - lower;
    }

    let lambda = upper;
    Some((lower, upper, lambda))
}

/// Bellman-Ford-based oracle (Lawler's original formulation): a circular
/// queue of nodes with an `END_PHASE` sentinel delimiting relaxation
/// rounds; if any round is still adding nodes after `n` rounds, `G_lambda`
/// has a negative cycle.
pub fn bellman_ford(sub: &ScComponent, plus_infinity: f64, lambda_so_far: f64) -> f64 {
    let g = &sub.graph;
    let n = g.num_nodes();

    let Some((mut lower, mut upper, mut lambda)) = initial_bounds(sub, plus_infinity, lambda_so_far) else {
        return lambda_so_far;
    };

    const END_PHASE: i64 = -1;
    let mut dist = vec![0.0f64; n];
    let mut in_queue = vec![false; n];

    while (upper - lower) > EPSILON {
        lambda = (upper + lower) / 2.0;

        dist[SOURCE] = 0.0;
        in_queue[SOURCE] = true;
        for v in 1..n {
            dist[v] = plus_infinity;
            in_queue[v] = false;
        }

        let mut queue: VecDeque<i64> = VecDeque::new();
        queue.push_back(SOURCE as i64);
        queue.push_back(END_PHASE);

        let mut found = true;
        let mut nphase = 0usize;

        while nphase < n {
            let u = queue.pop_front().expect("queue never drains mid-phase");
            if u == END_PHASE {
                nphase += 1;
                if queue.is_empty() {
                    found = false;
                    break;
                }
                queue.push_back(END_PHASE);
                continue;
            }
            let u = u as usize;
            in_queue[u] = true;

            let udist = dist[u];
            for i in 0..g.outdegree(u) {
                let e = g.out_edge(u, i);
                let v = g.tar(e);
                let new_dist = udist + g.weight(e) as f64 - lambda * g.transit(e) as f64;
                if new_dist < dist[v] {
                    dist[v] = new_dist;
                    if !in_queue[v] {
                        in_queue[v] = true;
                        queue.push_back(v as i64);
                    }
                }
            }
        }

        if found {
            if (upper - lambda) < EPSILON2 {
                break;
            }
            upper = lambda;
        } else {
            if (lambda - lower) < EPSILON2 {
                break;
            }
            lower = lambda;
        }
    }

    lambda
}

/// Szymanski's improvement: periodically (every `INTERVAL` passes, and on
/// the last possible pass) walks the predecessor pointers of every
/// as-yet-unvisited node looking for a cycle directly, rather than waiting
/// for the full `n`-phase Bellman-Ford limit.
pub fn szymanski(sub: &ScComponent, plus_infinity: f64, lambda_so_far: f64) -> f64 {
    const INTERVAL: usize = 10;

    let g = &sub.graph;
    let n = g.num_nodes();

    let Some((mut lower, mut upper, mut lambda)) = initial_bounds(sub, plus_infinity, lambda_so_far) else {
        return lambda_so_far;
    };

    let mut dist = vec![0.0f64; n];
    let mut pred = vec![-1i64; n];
    let mut einfo = vec![0i64; n];
    let mut einfo2 = vec![0i64; n];
    let mut changed = vec![true; n];
    let mut visited = vec![-1i64; n];

    while (upper - lower) > EPSILON {
        lambda = (upper + lower) / 2.0;

        dist[SOURCE] = 0.0;
        pred[SOURCE] = -1;
        changed[SOURCE] = true;
        for v in 1..n {
            dist[v] = plus_infinity;
            pred[v] = -1;
            changed[v] = true;
        }

        let mut neg_cycle_found = false;

        'passes: for npass in 0..n {
            let check_cycle = (npass == n - 1) || (npass % INTERVAL == 0);

            let mut one_changed = false;
            for u in 0..n {
                if check_cycle {
                    visited[u] = -1;
                }
                if changed[u] {
                    changed[u] = false;
                    let udist = dist[u];
                    for i in 0..g.outdegree(u) {
                        let e = g.out_edge(u, i);
                        let v = g.tar(e);
                        let w = g.weight(e);
                        let t = g.transit(e);
                        let new_dist = udist + w as f64 - lambda * t as f64;
                        if new_dist < dist[v] {
                            dist[v] = new_dist;
                            pred[v] = u as i64;
                            einfo[v] = w;
                            einfo2[v] = t;
                            changed[v] = true;
                            one_changed = true;
                        }
                    }
                }
            }

            if dist[SOURCE] < 0.0 {
                neg_cycle_found = true;
                break 'passes;
            }
            if !one_changed {
                neg_cycle_found = false;
                break 'passes;
            }

            if check_cycle {
                for v in 0..n {
                    if visited[v] >= 0 {
                        continue;
                    }
                    let mut u = v as i64;
                    loop {
                        visited[u as usize] = v as i64;
                        u = pred[u as usize];
                        if u == -1 || visited[u as usize] != -1 {
                            break;
                        }
                    }
                    if u == -1 || v as i64 != visited[u as usize] {
                        continue;
                    }

                    let w0 = u as usize;
                    let mut total_length: i64 = 0;
                    let mut total_weight: i64 = 0;
                    let mut walk = u;
                    loop {
                        let wu = walk as usize;
                        total_length += einfo2[wu];
                        total_weight += einfo[wu];
                        walk = pred[wu];
                        if walk as usize == w0 {
                            break;
                        }
                    }

                    let new_lambda = total_weight as f64 / total_length as f64;
                    if new_lambda < lambda {
                        // IMPROVE_UPPER_BOUND is never defined in the original's
                        // default build, so the exact cycle ratio found here is
                        // not adopted; `lambda` stays at the bisection midpoint
                        // and `upper` narrows to it below.
                        neg_cycle_found = true;
                        break 'passes;
                    }
                }
            }
        }

        if neg_cycle_found {
            if (upper - lambda) < EPSILON2 {
                break;
            }
            upper = lambda;
        } else {
            if (lambda - lower) < EPSILON2 {
                break;
            }
            lower = lambda;
        }
    }

    lambda
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Status {
    OutOfQueue,
    Inactive,
    Active,
}

/// Tarjan's subtree-disassembly oracle: maintains a shortest-paths tree
/// incrementally, and recognizes a negative cycle the moment a relaxation
/// would make a node its own ancestor (detected while disassembling the
/// stale subtree being replaced).
pub fn tarjan(sub: &ScComponent, plus_infinity: f64, lambda_so_far: f64) -> f64 {
    let g = &sub.graph;
    let n = g.num_nodes();

    let Some((mut lower, mut upper, mut lambda)) = initial_bounds(sub, plus_infinity, lambda_so_far) else {
        return lambda_so_far;
    };

    let mut dist = vec![0.0f64; n];
    let mut degree = vec![-1i64; n];
    let mut parent = vec![-1i64; n];
    let mut edge2parent = vec![-1i64; n];
    let mut prev = vec![-1i64; n];
    let mut next = vec![-1i64; n];
    let mut status = vec![Status::OutOfQueue; n];

    while (upper - lower) > EPSILON {
        lambda = (upper + lower) / 2.0;

        dist[SOURCE] = 0.0;
        degree[SOURCE] = -1;
        prev[SOURCE] = SOURCE as i64;
        next[SOURCE] = SOURCE as i64;
        parent[SOURCE] = SOURCE as i64;
        edge2parent[SOURCE] = -1;
        status[SOURCE] = Status::Active;
        for v in 1..n {
            dist[v] = plus_infinity;
            degree[v] = -1;
            prev[v] = -1;
            next[v] = -1;
            parent[v] = -1;
            edge2parent[v] = -1;
            status[v] = Status::OutOfQueue;
        }

        let mut neg_cycle_found = false;
        let mut queue: VecDeque<usize> = VecDeque::new();
        queue.push_back(SOURCE);

        'outer: while let Some(u) = queue.pop_front() {
            let u_stat = status[u];
            status[u] = Status::OutOfQueue;
            if u_stat == Status::Inactive {
                continue;
            }

            let udist = dist[u];
            for i in 0..g.outdegree(u) {
                let e = g.out_edge(u, i);
                let v = g.tar(e);
                let new_dist = udist + g.weight(e) as f64 - lambda * g.transit(e) as f64;

                if new_dist < dist[v] {
                    dist[v] = new_dist;

                    if prev[v] != -1 {
                        let before_v = prev[v];
                        let mut total_degree: i64 = 0;
                        let mut w = v;
                        loop {
                            if total_degree < 0 {
                                break;
                            }
                            if w == u {
                                // u lies in T(v): the edge u->v closes a cycle.
                                neg_cycle_found = true;
                                parent[v] = u as i64;
                                edge2parent[v] = e as i64;
                                let mut x = u;
                                let mut total_weight: i64 = 0;
                                let mut total_length: i64 = 0;
                                loop {
                                    let ep = edge2parent[x] as usize;
                                    total_length += g.transit(ep);
                                    total_weight += g.weight(ep);
                                    x = parent[x] as usize;
                                    if x == u {
                                        break;
                                    }
                                }
                                let new_lambda = total_weight as f64 / total_length as f64;
                                if new_lambda < lambda {
                                    lambda = new_lambda;
                                }
                                break 'outer;
                            }

                            total_degree += degree[w];
                            degree[w] = -1;
                            prev[w] = -1;
                            if status[w] == Status::Active {
                                status[w] = Status::Inactive;
                            }
                            w = next[w] as usize;
                        }

                        degree[parent[v] as usize] -= 1;
                        next[before_v as usize] = w as i64;
                        prev[w] = before_v;
                    }

                    parent[v] = u as i64;
                    edge2parent[v] = e as i64;
                    degree[u] += 1;

                    let after_u = next[u];
                    next[u] = v as i64;
                    prev[v] = u as i64;
                    next[v] = after_u;
                    prev[after_u as usize] = v as i64;

                    if status[v] == Status::OutOfQueue {
                        status[v] = Status::Active;
                        queue.push_back(v);
                    } else {
                        status[v] = Status::Active;
                    }
                }
            }
        }

        if neg_cycle_found {
            if (upper - lambda) < EPSILON2 {
                break;
            }
            upper = lambda;
        } else {
            if (lambda - lower) < EPSILON2 {
                break;
            }
            lower = lambda;
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
    fn three_cycle_all_oracles() {
        let sub = single_scc(&[(0, 1, 1, 1), (1, 2, 2, 1), (2, 0, 3, 1)], 3);
        let bf = bellman_ford(&sub, 1e9, 1e9);
        let sz = szymanski(&sub, 1e9, 1e9);
        let tj = tarjan(&sub, 1e9, 1e9);
        assert!((bf - 2.0).abs() < 0.02);
        assert!((sz - 2.0).abs() < 0.02);
        assert!((tj - 2.0).abs() < 0.02);
    }

    #[test]
    fn negative_ratio_cycle() {
        let sub = single_scc(&[(0, 1, 0, 1), (1, 2, 0, 1), (2, 3, 0, 1), (3, 0, -4, 1)], 4);
        let bf = bellman_ford(&sub, 1e9, 1e9);
        let tj = tarjan(&sub, 1e9, 1e9);
        assert!((bf - (-1.0)).abs() < 0.02);
        assert!((tj - (-1.0)).abs() < 0.02);
    }

    #[test]
    fn pruning_short_circuit_returns_lambda_so_far() {
        let sub = single_scc(&[(0, 1, 1, 1), (1, 0, 1, 1)], 2);
        let result = bellman_ford(&sub, 1e9, -1e9);
        assert_eq!(result, -1e9);
    }
}
